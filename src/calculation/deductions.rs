//! Employee-side deductions.
//!
//! Statutory contributions follow their [`ContributionRate`]: percentages
//! apply to the earned figure, fixed amounts are scaled by the paid ratio.
//! Every component is rounded on its own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceTally, EarnedComponents, round_half_up};
use crate::config::PayrollRules;
use crate::models::{AuditStep, ContributionRate, SalaryPolicy, SalaryRecord};

/// Minutes charged for each late mark.
pub const DEFAULT_LATE_PENALTY_MINUTES: u32 = 10;

/// Every deduction taken from gross pay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Employee provident fund.
    pub emp_pf: Decimal,
    /// Employee state insurance.
    pub emp_esi: Decimal,
    /// Employee labour welfare fund.
    pub lwf: Decimal,
    /// Late-mark penalty.
    pub late_penalty: Decimal,
    /// Deduction for unpaid absences.
    pub absent_deduction: Decimal,
    /// Advance recovered on the salary record.
    pub advance_recovery: Decimal,
    /// Other deductions entered on the salary record.
    pub other_deductions: Decimal,
}

impl Deductions {
    /// Sum of every deduction.
    pub fn total(&self) -> Decimal {
        self.emp_pf
            + self.emp_esi
            + self.lwf
            + self.late_penalty
            + self.absent_deduction
            + self.advance_recovery
            + self.other_deductions
    }
}

/// The result of computing deductions, including the audit step.
#[derive(Debug, Clone)]
pub struct DeductionsResult {
    /// The deductions.
    pub deductions: Deductions,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

fn employee_contribution(rate: ContributionRate, earned_base: Decimal, paid_ratio: Decimal) -> Decimal {
    match rate {
        ContributionRate::Percentage(pct) => {
            round_half_up(earned_base * pct / Decimal::ONE_HUNDRED)
        }
        ContributionRate::Fixed(amount) => round_half_up(amount * paid_ratio),
    }
}

/// Computes every deduction for the month.
///
/// PF applies to the earned basic and ESI to the base salary. The absence
/// deduction charges each unpaid absence at the earned daily rate and is
/// zero when nothing was earned. Recoveries come from the month's salary
/// record, if one exists.
pub fn calculate_deductions(
    policy: &SalaryPolicy,
    earnings: &EarnedComponents,
    tally: &AttendanceTally,
    salary_record: Option<&SalaryRecord>,
    rules: &PayrollRules,
    step_number: u32,
) -> DeductionsResult {
    let paid_ratio = tally.paid_ratio();

    let absent_deduction = if tally.paid_days.is_zero() {
        Decimal::ZERO
    } else {
        round_half_up(
            earnings.prorated_total() / tally.paid_days * Decimal::from(tally.unpaid_absent),
        )
    };

    let deductions = Deductions {
        emp_pf: employee_contribution(policy.employee_pf, earnings.basic, paid_ratio),
        emp_esi: employee_contribution(policy.employee_esi, earnings.base_salary(), paid_ratio),
        lwf: round_half_up(policy.labour_welfare_employee * paid_ratio),
        late_penalty: round_half_up(
            Decimal::from(tally.late)
                * policy.late_penalty_per_minute
                * Decimal::from(rules.late_penalty_minutes),
        ),
        absent_deduction,
        advance_recovery: salary_record.map_or(Decimal::ZERO, |r| r.advance_recovery),
        other_deductions: salary_record.map_or(Decimal::ZERO, |r| r.other_deductions),
    };
    let total = deductions.total();

    let audit_step = AuditStep {
        step_number,
        rule_id: "deductions".to_string(),
        rule_name: "Employee Deductions".to_string(),
        input: serde_json::json!({
            "employee_pf": policy.employee_pf,
            "employee_esi": policy.employee_esi,
            "labour_welfare_employee": policy.labour_welfare_employee.to_string(),
            "late_penalty_per_minute": policy.late_penalty_per_minute.to_string(),
            "late_penalty_minutes": rules.late_penalty_minutes,
            "late": tally.late,
            "unpaid_absent": tally.unpaid_absent,
            "paid_days": tally.paid_days.normalize().to_string(),
            "has_salary_record": salary_record.is_some()
        }),
        output: serde_json::json!({
            "emp_pf": deductions.emp_pf.to_string(),
            "emp_esi": deductions.emp_esi.to_string(),
            "lwf": deductions.lwf.to_string(),
            "late_penalty": deductions.late_penalty.to_string(),
            "absent_deduction": deductions.absent_deduction.to_string(),
            "advance_recovery": deductions.advance_recovery.to_string(),
            "other_deductions": deductions.other_deductions.to_string(),
            "total": total.to_string()
        }),
        reasoning: format!(
            "PF {} + ESI {} + LWF {} + late {} + absence {} + recoveries {} = {}",
            deductions.emp_pf,
            deductions.emp_esi,
            deductions.lwf,
            deductions.late_penalty,
            deductions.absent_deduction,
            deductions.advance_recovery + deductions.other_deductions,
            total
        ),
    };

    DeductionsResult {
        deductions,
        audit_step,
    }
}
