//! Salary calculation for one employee and month.
//!
//! [`calculate_employee_salary`] runs each rule in order, numbering audit
//! steps as it goes, and assembles the [`SalaryBreakdown`].

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::{
    apply_adjustments, calculate_deductions, calculate_earnings, find_active_policy, project_ctc,
    tally_attendance,
};
use crate::config::PayrollRules;
use crate::models::{
    AttendanceRecord, AuditStep, PayMonth, SalaryAdjustment, SalaryBreakdown, SalaryComputation,
    SalaryPolicy, SalaryRecord,
};

/// The backend collections a salary is computed from.
///
/// The calculator filters each collection by employee and month itself, so
/// callers may pass the whole organisation's data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SalaryInputs {
    /// Salary policies, active and inactive.
    pub policies: Vec<SalaryPolicy>,
    /// Attendance records.
    pub attendance: Vec<AttendanceRecord>,
    /// Salary adjustments in any state.
    pub adjustments: Vec<SalaryAdjustment>,
    /// Persisted salary records.
    pub salary_records: Vec<SalaryRecord>,
}

impl SalaryInputs {
    /// The persisted salary record for an employee and month, if any.
    pub fn salary_record_for(&self, employee_email: &str, month: PayMonth) -> Option<&SalaryRecord> {
        self.salary_records
            .iter()
            .find(|r| r.applies_to(employee_email, month))
    }
}

/// Computes the salary breakdown for one employee and month.
///
/// Never fails: an employee without an active policy gets the zero-filled
/// [`SalaryBreakdown::without_policy`] sentinel, and missing amounts count
/// as zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{SalaryInputs, calculate_employee_salary};
/// use payroll_engine::config::PayrollRules;
///
/// let inputs = SalaryInputs::default();
/// let result = calculate_employee_salary(
///     &inputs,
///     "asha@example.com",
///     "2025-06".parse().unwrap(),
///     &PayrollRules::default(),
/// );
/// assert!(!result.breakdown.has_policy);
/// ```
pub fn calculate_employee_salary(
    inputs: &SalaryInputs,
    employee_email: &str,
    month: PayMonth,
    rules: &PayrollRules,
) -> SalaryComputation {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    let salary_record = inputs.salary_record_for(employee_email, month);
    let salary_status = salary_record.map(|r| r.status);

    // Step 1: active policy
    let lookup = find_active_policy(&inputs.policies, employee_email, step_number);
    steps.push(lookup.audit_step);
    let mut warnings = lookup.warnings;
    step_number += 1;

    let Some(policy) = lookup.policy else {
        debug!(employee = %employee_email, month = %month, "No active salary policy");
        return SalaryComputation {
            employee_email: employee_email.to_string(),
            month,
            breakdown: SalaryBreakdown::without_policy(),
            salary_status,
            steps,
            warnings,
        };
    };

    // Step 2: attendance
    let tally_result = tally_attendance(&inputs.attendance, employee_email, month, rules, step_number);
    steps.push(tally_result.audit_step);
    warnings.extend(tally_result.warnings);
    let tally = tally_result.tally;
    step_number += 1;

    debug!(
        employee = %employee_email,
        month = %month,
        basic_salary = %policy.basic_salary,
        paid_days = %tally.paid_days,
        unpaid_absent = tally.unpaid_absent,
        "Resolved policy and attendance"
    );

    // Step 3: earned components
    let earnings_result = calculate_earnings(policy, &tally, step_number);
    steps.push(earnings_result.audit_step);
    let earnings = earnings_result.earnings;
    step_number += 1;

    // Step 4: adjustments
    let adjustment_result = apply_adjustments(&inputs.adjustments, employee_email, month, step_number);
    steps.push(adjustment_result.audit_step);
    let adjustments = adjustment_result.summary;
    step_number += 1;

    // Step 5: CTC
    let ctc_result = project_ctc(policy, adjustments.net, rules, step_number);
    steps.push(ctc_result.audit_step);
    let ctc = ctc_result.projection;
    step_number += 1;

    // Step 6: deductions
    let deductions_result =
        calculate_deductions(policy, &earnings, &tally, salary_record, rules, step_number);
    steps.push(deductions_result.audit_step);
    let deductions = deductions_result.deductions;
    step_number += 1;

    // Step 7: net pay
    let base_salary = earnings.base_salary();
    let gross = base_salary + adjustments.net;
    let total_deductions = deductions.total();
    let net = gross - total_deductions;
    steps.push(net_pay_step(
        step_number,
        base_salary,
        adjustments.net,
        gross,
        total_deductions,
        net,
    ));

    let breakdown = SalaryBreakdown {
        total_days: tally.total_days,
        present: tally.present,
        absent: tally.absent,
        unpaid_absent: tally.unpaid_absent,
        effective_present: tally.effective_present,
        half_day: tally.half_day,
        paid_leave: tally.paid_leave,
        weekoff: tally.weekoff,
        holiday: tally.holiday,
        late: tally.late,
        paid_days: tally.paid_days.normalize(),
        not_marked: tally.not_marked,
        base_salary,
        earned_basic: earnings.basic,
        earned_hra: earnings.hra,
        earned_ta: earnings.travelling_allowance,
        earned_cea: earnings.children_education_allowance,
        earned_fi: earnings.fixed_incentive,
        emp_incentive: earnings.employer_incentive,
        adjustments: adjustments.net,
        gross,
        emp_pf: deductions.emp_pf,
        emp_esi: deductions.emp_esi,
        lwf: deductions.lwf,
        late_penalty: deductions.late_penalty,
        absent_deduction: deductions.absent_deduction,
        total_deductions,
        net,
        attendance_percentage: tally.attendance_percentage(),
        monthly_ctc1: ctc.monthly_ctc1,
        yearly_ctc1: ctc.yearly_ctc1,
        monthly_ctc2: ctc.monthly_ctc2,
        yearly_ctc2: ctc.yearly_ctc2,
        has_policy: true,
        employee_adjustments: adjustments.applied,
    };

    SalaryComputation {
        employee_email: employee_email.to_string(),
        month,
        breakdown,
        salary_status,
        steps,
        warnings,
    }
}

fn net_pay_step(
    step_number: u32,
    base_salary: Decimal,
    adjustments: Decimal,
    gross: Decimal,
    total_deductions: Decimal,
    net: Decimal,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "base_salary": base_salary.to_string(),
            "adjustments": adjustments.to_string(),
            "total_deductions": total_deductions.to_string()
        }),
        output: serde_json::json!({
            "gross": gross.to_string(),
            "net": net.to_string()
        }),
        reasoning: format!(
            "Gross {} ({} base + {} adjustments) less {} deductions = net {}",
            gross, base_salary, adjustments, total_deductions, net
        ),
    }
}
