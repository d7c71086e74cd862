//! Calculation result models for the payroll engine.
//!
//! This module contains the [`SalaryBreakdown`] produced for one employee and
//! month, the audit types recording how it was derived, and the envelopes
//! returned for single and whole-month calculations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayMonth, SalaryAdjustment, SalaryStatus};

/// The computed salary for one employee and month.
///
/// Field names on the wire are camelCase to match the dashboard that
/// consumes them, and every amount is a JSON number. A breakdown with `has_policy == false` is the "no active
/// policy" sentinel: every numeric field is zero and callers should surface
/// a warning rather than a zero salary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryBreakdown {
    /// Calendar days in the month.
    pub total_days: u32,
    /// Days present, checked out or working from home.
    pub present: u32,
    /// Days absent.
    pub absent: u32,
    /// Absences beyond the paid allowance.
    pub unpaid_absent: u32,
    /// Present days plus paid absences.
    pub effective_present: u32,
    /// Half days.
    pub half_day: u32,
    /// Days on paid leave.
    pub paid_leave: u32,
    /// Weekly offs.
    pub weekoff: u32,
    /// Holidays.
    pub holiday: u32,
    /// Days marked late.
    pub late: u32,
    /// Days that count toward earning (half days count by their weight).
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_days: Decimal,
    /// Days without an attendance record. Negative when records overlap.
    pub not_marked: i64,
    /// Earned components plus the employer incentive.
    #[serde(with = "rust_decimal::serde::float")]
    pub base_salary: Decimal,
    /// Prorated basic salary.
    #[serde(with = "rust_decimal::serde::float")]
    pub earned_basic: Decimal,
    /// Prorated house rent allowance.
    #[serde(with = "rust_decimal::serde::float")]
    pub earned_hra: Decimal,
    /// Prorated travelling allowance.
    #[serde(with = "rust_decimal::serde::float")]
    pub earned_ta: Decimal,
    /// Prorated children education allowance.
    #[serde(with = "rust_decimal::serde::float")]
    pub earned_cea: Decimal,
    /// Prorated fixed incentive.
    #[serde(with = "rust_decimal::serde::float")]
    pub earned_fi: Decimal,
    /// Employer incentive, unprorated.
    #[serde(with = "rust_decimal::serde::float")]
    pub emp_incentive: Decimal,
    /// Net of approved adjustments.
    #[serde(with = "rust_decimal::serde::float")]
    pub adjustments: Decimal,
    /// Base salary plus adjustments.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    /// Employee provident fund deduction.
    #[serde(rename = "empPF")]
    #[serde(with = "rust_decimal::serde::float")]
    pub emp_pf: Decimal,
    /// Employee state insurance deduction.
    #[serde(rename = "empESI")]
    #[serde(with = "rust_decimal::serde::float")]
    pub emp_esi: Decimal,
    /// Employee labour welfare fund deduction.
    #[serde(with = "rust_decimal::serde::float")]
    pub lwf: Decimal,
    /// Late-mark penalty.
    #[serde(with = "rust_decimal::serde::float")]
    pub late_penalty: Decimal,
    /// Deduction for unpaid absences.
    #[serde(with = "rust_decimal::serde::float")]
    pub absent_deduction: Decimal,
    /// Sum of all deductions, including recoveries on the salary record.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    /// Net payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    /// Paid days as a rounded percentage of the month.
    #[serde(with = "rust_decimal::serde::float")]
    pub attendance_percentage: Decimal,
    /// Monthly cost to company from the policy alone.
    #[serde(rename = "monthlyCTC1")]
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_ctc1: Decimal,
    /// Yearly projection of CTC1.
    #[serde(rename = "yearlyCTC1")]
    #[serde(with = "rust_decimal::serde::float")]
    pub yearly_ctc1: Decimal,
    /// CTC1 plus the month's adjustments.
    #[serde(rename = "monthlyCTC2")]
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_ctc2: Decimal,
    /// Yearly projection of CTC2.
    #[serde(rename = "yearlyCTC2")]
    #[serde(with = "rust_decimal::serde::float")]
    pub yearly_ctc2: Decimal,
    /// False when the employee has no active policy.
    pub has_policy: bool,
    /// The approved adjustments that were applied.
    pub employee_adjustments: Vec<SalaryAdjustment>,
}

impl SalaryBreakdown {
    /// The zero-filled "no active policy" sentinel.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::SalaryBreakdown;
    /// use rust_decimal::Decimal;
    ///
    /// let breakdown = SalaryBreakdown::without_policy();
    /// assert!(!breakdown.has_policy);
    /// assert_eq!(breakdown.net, Decimal::ZERO);
    /// ```
    pub fn without_policy() -> Self {
        Self::default()
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag suspicious input that does not stop the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level ("low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The deterministic output of the salary calculator for one employee.
///
/// Contains no identifiers or timestamps, so identical inputs always give
/// identical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComputation {
    /// Email of the employee.
    pub employee_email: String,
    /// The month computed.
    pub month: PayMonth,
    /// The computed breakdown.
    pub breakdown: SalaryBreakdown,
    /// Status of the persisted salary record for the month, if any.
    pub salary_status: Option<SalaryStatus>,
    /// Rule steps in the order they were applied.
    pub steps: Vec<AuditStep>,
    /// Warnings raised while computing.
    pub warnings: Vec<AuditWarning>,
}

/// Aggregates over every employee with an active policy in a payroll run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Number of employees included in the totals.
    pub employee_count: u32,
    /// Total gross pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross: Decimal,
    /// Total deductions.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_deductions: Decimal,
    /// Total net payable.
    #[serde(with = "rust_decimal::serde::float")]
    pub net: Decimal,
    /// Total monthly CTC1.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_ctc1: Decimal,
    /// Total monthly CTC2.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_ctc2: Decimal,
}

/// The deterministic output of a whole-month payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// The month computed.
    pub month: PayMonth,
    /// One computation per employee, sorted by email.
    pub employees: Vec<SalaryComputation>,
    /// Employees seen in the input without an active policy.
    pub missing_policy: Vec<String>,
    /// Totals over employees with a policy.
    pub totals: PayrollTotals,
}

/// The complete result of a salary calculation as returned by the API.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AuditTrace, SalaryBreakdown, SalaryCalculation};
/// use chrono::Utc;
/// use uuid::Uuid;
///
/// let result = SalaryCalculation {
///     calculation_id: Uuid::new_v4(),
///     timestamp: Utc::now(),
///     engine_version: "2024-04-01".to_string(),
///     employee_email: "asha@example.com".to_string(),
///     month: "2025-06".parse().unwrap(),
///     breakdown: SalaryBreakdown::without_policy(),
///     salary_status: None,
///     audit_trace: AuditTrace {
///         steps: vec![],
///         warnings: vec![],
///         duration_us: 0,
///     },
/// };
/// assert!(!result.breakdown.has_policy);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine configuration that performed the calculation.
    pub engine_version: String,
    /// Email of the employee.
    pub employee_email: String,
    /// The month computed.
    pub month: PayMonth,
    /// The computed breakdown.
    pub breakdown: SalaryBreakdown,
    /// Status of the persisted salary record for the month, if any.
    #[serde(default)]
    pub salary_status: Option<SalaryStatus>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

impl SalaryCalculation {
    /// Wraps a computation with an identifier, timestamp and timing.
    pub fn from_computation(
        computation: SalaryComputation,
        engine_version: impl Into<String>,
        duration_us: u64,
    ) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: engine_version.into(),
            employee_email: computation.employee_email,
            month: computation.month,
            breakdown: computation.breakdown,
            salary_status: computation.salary_status,
            audit_trace: AuditTrace {
                steps: computation.steps,
                warnings: computation.warnings,
                duration_us,
            },
        }
    }
}

/// A whole-month payroll run as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRunSummary {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine configuration that performed the run.
    pub engine_version: String,
    /// The month computed.
    pub month: PayMonth,
    /// One calculation per employee, sorted by email.
    pub employees: Vec<SalaryCalculation>,
    /// Employees seen in the input without an active policy.
    pub missing_policy: Vec<String>,
    /// Totals over employees with a policy.
    pub totals: PayrollTotals,
    /// The total run duration in microseconds.
    pub duration_us: u64,
}

impl PayrollRunSummary {
    /// Wraps a payroll run with identifiers, timestamps and timing.
    pub fn from_run(run: PayrollRun, engine_version: impl Into<String>, duration_us: u64) -> Self {
        let engine_version = engine_version.into();
        let employees = run
            .employees
            .into_iter()
            .map(|computation| {
                SalaryCalculation::from_computation(computation, engine_version.clone(), 0)
            })
            .collect();

        Self {
            run_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version,
            month: run.month,
            employees,
            missing_policy: run.missing_policy,
            totals: run.totals,
            duration_us,
        }
    }
}
