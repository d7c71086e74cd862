//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::{
    DEFAULT_HALF_DAY_WEIGHT, DEFAULT_LATE_PENALTY_MINUTES, DEFAULT_MONTHS_PER_YEAR,
    DEFAULT_PAID_ABSENCE_ALLOWANCE,
};
use crate::error::{EngineError, EngineResult};
use crate::models::PayMonth;

/// Metadata about the engine deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineMetadata {
    /// Human-readable name of the engine.
    pub name: String,
    /// The configuration version, stamped on every calculation.
    pub version: String,
    /// ISO currency code of all monetary amounts.
    pub currency: String,
}

/// Payroll rules effective from a given date.
///
/// These are the organisation-wide knobs of the salary formula. The
/// [`Default`] value carries the standard rules.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
///
/// let rules = PayrollRules::default();
/// assert_eq!(rules.paid_absence_allowance, 1);
/// assert_eq!(rules.half_day_weight, Decimal::new(5, 1));
/// assert_eq!(rules.late_penalty_minutes, 10);
/// assert_eq!(rules.months_per_year, 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayrollRules {
    /// The first date these rules apply to.
    pub effective_date: NaiveDate,
    /// Absences per month that are still paid.
    #[serde(default = "default_paid_absence_allowance")]
    pub paid_absence_allowance: u32,
    /// Fraction of a day a half day counts as.
    #[serde(default = "default_half_day_weight")]
    pub half_day_weight: Decimal,
    /// Minutes charged for each late mark.
    #[serde(default = "default_late_penalty_minutes")]
    pub late_penalty_minutes: u32,
    /// Months used to project yearly CTC.
    #[serde(default = "default_months_per_year")]
    pub months_per_year: u32,
}

fn default_paid_absence_allowance() -> u32 {
    DEFAULT_PAID_ABSENCE_ALLOWANCE
}

fn default_half_day_weight() -> Decimal {
    DEFAULT_HALF_DAY_WEIGHT
}

fn default_late_penalty_minutes() -> u32 {
    DEFAULT_LATE_PENALTY_MINUTES
}

fn default_months_per_year() -> u32 {
    DEFAULT_MONTHS_PER_YEAR
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            effective_date: NaiveDate::MIN,
            paid_absence_allowance: DEFAULT_PAID_ABSENCE_ALLOWANCE,
            half_day_weight: DEFAULT_HALF_DAY_WEIGHT,
            late_penalty_minutes: DEFAULT_LATE_PENALTY_MINUTES,
            months_per_year: DEFAULT_MONTHS_PER_YEAR,
        }
    }
}

impl PayrollRules {
    /// Checks the rules are internally consistent.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.half_day_weight < Decimal::ZERO || self.half_day_weight > Decimal::ONE {
            return Err(format!(
                "half_day_weight must be between 0 and 1, got {}",
                self.half_day_weight
            ));
        }
        if self.months_per_year == 0 {
            return Err("months_per_year must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Engine metadata.
    metadata: EngineMetadata,
    /// Rule sets by effective date (sorted oldest first).
    rules: Vec<PayrollRules>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(metadata: EngineMetadata, rules: Vec<PayrollRules>) -> Self {
        let mut sorted_rules = rules;
        sorted_rules.sort_by(|a, b| a.effective_date.cmp(&b.effective_date));
        Self {
            metadata,
            rules: sorted_rules,
        }
    }

    /// Returns the engine metadata.
    pub fn engine(&self) -> &EngineMetadata {
        &self.metadata
    }

    /// Returns all rule sets, oldest first.
    pub fn rules(&self) -> &[PayrollRules] {
        &self.rules
    }

    /// Returns the rules in effect for a month.
    ///
    /// The most recent rule set effective on or before the month's first day
    /// applies to the whole month.
    pub fn rules_for(&self, month: PayMonth) -> EngineResult<&PayrollRules> {
        let first_day = month.first_day();
        self.rules
            .iter()
            .rfind(|r| r.effective_date <= first_day)
            .ok_or(EngineError::RulesNotFound { date: first_day })
    }
}
