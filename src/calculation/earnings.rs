//! Earned salary components.
//!
//! Each prorated component is paid per paid day at `monthly / total_days`
//! and rounded on its own. The employer incentive is paid in full.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceTally, round_half_up};
use crate::models::{AuditStep, SalaryPolicy};

/// The earned amount of each policy component for the month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedComponents {
    /// Prorated basic salary.
    pub basic: Decimal,
    /// Prorated house rent allowance.
    pub hra: Decimal,
    /// Prorated travelling allowance.
    pub travelling_allowance: Decimal,
    /// Prorated children education allowance.
    pub children_education_allowance: Decimal,
    /// Prorated fixed incentive.
    pub fixed_incentive: Decimal,
    /// Employer incentive, not prorated.
    pub employer_incentive: Decimal,
}

impl EarnedComponents {
    /// Sum of the prorated components, excluding the employer incentive.
    pub fn prorated_total(&self) -> Decimal {
        self.basic
            + self.hra
            + self.travelling_allowance
            + self.children_education_allowance
            + self.fixed_incentive
    }

    /// Prorated components plus the employer incentive.
    pub fn base_salary(&self) -> Decimal {
        self.prorated_total() + self.employer_incentive
    }
}

/// The result of computing earnings, including the audit step.
#[derive(Debug, Clone)]
pub struct EarningsResult {
    /// The earned components.
    pub earnings: EarnedComponents,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

/// Prorates a monthly amount to the paid days, rounded to the rupee.
fn prorate(monthly: Decimal, tally: &AttendanceTally) -> Decimal {
    if tally.total_days == 0 {
        return Decimal::ZERO;
    }
    let per_day = monthly / Decimal::from(tally.total_days);
    round_half_up(per_day * tally.paid_days)
}

/// Computes the earned salary components for the month.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{AttendanceTally, calculate_earnings};
/// use payroll_engine::models::{ContributionRate, SalaryPolicy};
/// use rust_decimal::Decimal;
///
/// let policy = SalaryPolicy {
///     employee_email: "asha@example.com".to_string(),
///     is_active: true,
///     basic_salary: Decimal::from(30000),
///     hra: Decimal::ZERO,
///     travelling_allowance: Decimal::ZERO,
///     children_education_allowance: Decimal::ZERO,
///     fixed_incentive: Decimal::ZERO,
///     employer_incentive: Decimal::ZERO,
///     employee_pf: ContributionRate::default(),
///     employer_pf: ContributionRate::default(),
///     employee_esi: ContributionRate::default(),
///     employer_esi: ContributionRate::default(),
///     labour_welfare_employee: Decimal::ZERO,
///     labour_welfare_employer: Decimal::ZERO,
///     ex_gratia: ContributionRate::default(),
///     late_penalty_per_minute: Decimal::ZERO,
/// };
/// let tally = AttendanceTally {
///     total_days: 31,
///     paid_days: Decimal::from(30),
///     ..AttendanceTally::default()
/// };
///
/// let result = calculate_earnings(&policy, &tally, 1);
/// // 30000 / 31 * 30 = 29032.26
/// assert_eq!(result.earnings.basic, Decimal::from(29032));
/// ```
pub fn calculate_earnings(
    policy: &SalaryPolicy,
    tally: &AttendanceTally,
    step_number: u32,
) -> EarningsResult {
    let earnings = EarnedComponents {
        basic: prorate(policy.basic_salary, tally),
        hra: prorate(policy.hra, tally),
        travelling_allowance: prorate(policy.travelling_allowance, tally),
        children_education_allowance: prorate(policy.children_education_allowance, tally),
        fixed_incentive: prorate(policy.fixed_incentive, tally),
        employer_incentive: policy.employer_incentive,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "earned_components".to_string(),
        rule_name: "Earned Components".to_string(),
        input: serde_json::json!({
            "basic_salary": policy.basic_salary.to_string(),
            "hra": policy.hra.to_string(),
            "travelling_allowance": policy.travelling_allowance.to_string(),
            "children_education_allowance": policy.children_education_allowance.to_string(),
            "fixed_incentive": policy.fixed_incentive.to_string(),
            "employer_incentive": policy.employer_incentive.to_string(),
            "paid_days": tally.paid_days.normalize().to_string(),
            "total_days": tally.total_days
        }),
        output: serde_json::json!({
            "earned_basic": earnings.basic.to_string(),
            "earned_hra": earnings.hra.to_string(),
            "earned_ta": earnings.travelling_allowance.to_string(),
            "earned_cea": earnings.children_education_allowance.to_string(),
            "earned_fi": earnings.fixed_incentive.to_string(),
            "employer_incentive": earnings.employer_incentive.to_string(),
            "base_salary": earnings.base_salary().to_string()
        }),
        reasoning: format!(
            "Components prorated over {} of {} days; employer incentive {} paid in full; base salary {}",
            tally.paid_days.normalize(),
            tally.total_days,
            earnings.employer_incentive,
            earnings.base_salary()
        ),
    };

    EarningsResult {
        earnings,
        audit_step,
    }
}
