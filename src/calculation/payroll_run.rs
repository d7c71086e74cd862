//! Whole-month payroll runs.

use std::collections::BTreeMap;

use tracing::debug;

use super::{SalaryInputs, calculate_employee_salary};
use crate::config::PayrollRules;
use crate::models::{PayMonth, PayrollRun, PayrollTotals};

/// Computes salaries for every employee seen in the inputs for a month.
///
/// An employee is included when they have an active policy or any
/// attendance inside the month. Emails are compared case-insensitively;
/// the first spelling seen is the one reported. Employees without an
/// active policy are listed in `missing_policy` and left out of the totals.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{SalaryInputs, run_payroll};
/// use payroll_engine::config::PayrollRules;
///
/// let run = run_payroll(&SalaryInputs::default(), "2025-06".parse().unwrap(), &PayrollRules::default());
/// assert!(run.employees.is_empty());
/// assert_eq!(run.totals.employee_count, 0);
/// ```
pub fn run_payroll(inputs: &SalaryInputs, month: PayMonth, rules: &PayrollRules) -> PayrollRun {
    let mut employees: BTreeMap<String, &str> = BTreeMap::new();

    let policy_emails = inputs
        .policies
        .iter()
        .filter(|p| p.is_active)
        .map(|p| p.employee_email.as_str());
    let attendance_emails = inputs
        .attendance
        .iter()
        .filter(|r| month.contains_date(r.date))
        .map(|r| r.employee_email.as_str());

    for email in policy_emails.chain(attendance_emails) {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            continue;
        }
        employees
            .entry(trimmed.to_ascii_lowercase())
            .or_insert(trimmed);
    }

    let mut run = PayrollRun {
        month,
        employees: Vec::with_capacity(employees.len()),
        missing_policy: Vec::new(),
        totals: PayrollTotals::default(),
    };

    for email in employees.into_values() {
        let computation = calculate_employee_salary(inputs, email, month, rules);
        let breakdown = &computation.breakdown;

        if breakdown.has_policy {
            let totals = &mut run.totals;
            totals.employee_count += 1;
            totals.gross += breakdown.gross;
            totals.total_deductions += breakdown.total_deductions;
            totals.net += breakdown.net;
            totals.monthly_ctc1 += breakdown.monthly_ctc1;
            totals.monthly_ctc2 += breakdown.monthly_ctc2;
        } else {
            run.missing_policy.push(email.to_string());
        }
        run.employees.push(computation);
    }

    debug!(
        month = %month,
        employees = run.employees.len(),
        missing_policy = run.missing_policy.len(),
        net = %run.totals.net,
        "Payroll run computed"
    );

    run
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceRecord, AttendanceStatus, ContributionRate, SalaryPolicy};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn june() -> PayMonth {
        "2025-06".parse().unwrap()
    }

    fn policy(email: &str, basic: i64) -> SalaryPolicy {
        SalaryPolicy {
            employee_email: email.to_string(),
            is_active: true,
            basic_salary: Decimal::from(basic),
            hra: Decimal::ZERO,
            travelling_allowance: Decimal::ZERO,
            children_education_allowance: Decimal::ZERO,
            fixed_incentive: Decimal::ZERO,
            employer_incentive: Decimal::ZERO,
            employee_pf: ContributionRate::default(),
            employer_pf: ContributionRate::default(),
            employee_esi: ContributionRate::default(),
            employer_esi: ContributionRate::default(),
            labour_welfare_employee: Decimal::ZERO,
            labour_welfare_employer: Decimal::ZERO,
            ex_gratia: ContributionRate::default(),
            late_penalty_per_minute: Decimal::ZERO,
        }
    }

    fn full_month(email: &str) -> Vec<AttendanceRecord> {
        (1..=30)
            .map(|day| AttendanceRecord {
                employee_email: email.to_string(),
                date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
                status: AttendanceStatus::Present,
                is_late: false,
            })
            .collect()
    }

    /// RUN-001: employees are sorted and totals cover those with a policy
    #[test]
    fn test_run_sorts_and_totals() {
        let mut attendance = full_month("ravi@example.com");
        attendance.extend(full_month("asha@example.com"));
        attendance.extend(full_month("zoe@example.com"));
        let inputs = SalaryInputs {
            policies: vec![policy("ravi@example.com", 20000), policy("asha@example.com", 30000)],
            attendance,
            ..SalaryInputs::default()
        };

        let run = run_payroll(&inputs, june(), &PayrollRules::default());

        let emails: Vec<&str> = run.employees.iter().map(|e| e.employee_email.as_str()).collect();
        assert_eq!(emails, vec!["asha@example.com", "ravi@example.com", "zoe@example.com"]);
        assert_eq!(run.missing_policy, vec!["zoe@example.com".to_string()]);
        assert_eq!(run.totals.employee_count, 2);
        assert_eq!(run.totals.gross, Decimal::from(50000));
        assert_eq!(run.totals.net, Decimal::from(50000));
    }

    /// RUN-002: emails differing only in case are one employee
    #[test]
    fn test_emails_deduplicated_case_insensitively() {
        let inputs = SalaryInputs {
            policies: vec![policy("Asha@Example.com", 30000)],
            attendance: full_month("asha@example.com"),
            ..SalaryInputs::default()
        };

        let run = run_payroll(&inputs, june(), &PayrollRules::default());

        assert_eq!(run.employees.len(), 1);
        assert_eq!(run.employees[0].employee_email, "Asha@Example.com");
        assert!(run.employees[0].breakdown.has_policy);
    }

    #[test]
    fn test_attendance_outside_month_does_not_add_employee() {
        let mut inputs = SalaryInputs::default();
        inputs.attendance.push(AttendanceRecord {
            employee_email: "ravi@example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            status: AttendanceStatus::Present,
            is_late: false,
        });

        let run = run_payroll(&inputs, june(), &PayrollRules::default());

        assert!(run.employees.is_empty());
        assert!(run.missing_policy.is_empty());
    }
}
