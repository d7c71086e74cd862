//! Attendance tallying for a pay month.
//!
//! This module counts an employee's attendance records into buckets and
//! derives the paid-day figure every prorated component is based on.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::round_half_up;
use crate::config::PayrollRules;
use crate::models::{AttendanceCategory, AttendanceRecord, AuditStep, AuditWarning, PayMonth};

/// Absences per month that are still paid. The first absence is free.
pub const DEFAULT_PAID_ABSENCE_ALLOWANCE: u32 = 1;

/// A half day counts as half a paid day.
pub const DEFAULT_HALF_DAY_WEIGHT: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Attendance counts for one employee over one month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTally {
    /// Calendar days in the month.
    pub total_days: u32,
    /// Records counted.
    pub recorded: u32,
    /// Present, checked out or working from home.
    pub present: u32,
    /// All absences.
    pub absent: u32,
    /// Absences covered by the paid allowance.
    pub paid_absent: u32,
    /// Absences beyond the allowance.
    pub unpaid_absent: u32,
    /// Present plus paid absences.
    pub effective_present: u32,
    /// Half days.
    pub half_day: u32,
    /// Leave, sick leave and casual leave.
    pub paid_leave: u32,
    /// Weekly offs.
    pub weekoff: u32,
    /// Holidays.
    pub holiday: u32,
    /// Records flagged late.
    pub late: u32,
    /// Days that count toward earning.
    pub paid_days: Decimal,
    /// Calendar days minus records counted.
    pub not_marked: i64,
}

impl AttendanceTally {
    /// Paid days as a fraction of the month, or zero for an empty month.
    pub fn paid_ratio(&self) -> Decimal {
        if self.total_days == 0 {
            Decimal::ZERO
        } else {
            self.paid_days / Decimal::from(self.total_days)
        }
    }

    /// Paid days as a rounded percentage of the month.
    pub fn attendance_percentage(&self) -> Decimal {
        round_half_up(self.paid_ratio() * Decimal::ONE_HUNDRED)
    }
}

/// The result of tallying attendance, including the audit step.
#[derive(Debug, Clone)]
pub struct AttendanceTallyResult {
    /// The counts.
    pub tally: AttendanceTally,
    /// The audit step recording the tally.
    pub audit_step: AuditStep,
    /// Raised for records sharing a date.
    pub warnings: Vec<AuditWarning>,
}

/// Tallies an employee's attendance for a month.
///
/// Only records belonging to the employee and dated inside the month are
/// counted. Absences up to `rules.paid_absence_allowance` are paid; the rest
/// are unpaid. Paid days are
/// `present + weekoff + holiday + paid_leave + paid_absent + half_day_weight × half_day`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::tally_attendance;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{AttendanceRecord, AttendanceStatus, PayMonth};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let month: PayMonth = "2025-06".parse().unwrap();
/// let records = vec![AttendanceRecord {
///     employee_email: "asha@example.com".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
///     status: AttendanceStatus::HalfDay,
///     is_late: false,
/// }];
///
/// let result = tally_attendance(&records, "asha@example.com", month, &PayrollRules::default(), 1);
/// assert_eq!(result.tally.paid_days, Decimal::new(5, 1));
/// assert_eq!(result.tally.not_marked, 29);
/// ```
pub fn tally_attendance(
    records: &[AttendanceRecord],
    employee_email: &str,
    month: PayMonth,
    rules: &PayrollRules,
    step_number: u32,
) -> AttendanceTallyResult {
    let mut tally = AttendanceTally {
        total_days: month.total_days(),
        ..AttendanceTally::default()
    };
    let mut seen_dates = HashSet::new();
    let mut duplicate_dates = Vec::new();

    for record in records
        .iter()
        .filter(|r| r.belongs_to(employee_email) && month.contains_date(r.date))
    {
        tally.recorded += 1;
        if !seen_dates.insert(record.date) {
            duplicate_dates.push(record.date);
        }

        match record.status.category() {
            AttendanceCategory::Present => tally.present += 1,
            AttendanceCategory::Absent => tally.absent += 1,
            AttendanceCategory::HalfDay => tally.half_day += 1,
            AttendanceCategory::PaidLeave => tally.paid_leave += 1,
            AttendanceCategory::Weekoff => tally.weekoff += 1,
            AttendanceCategory::Holiday => tally.holiday += 1,
        }

        if record.is_late {
            tally.late += 1;
        }
    }

    tally.paid_absent = tally.absent.min(rules.paid_absence_allowance);
    tally.unpaid_absent = tally.absent - tally.paid_absent;
    tally.effective_present = tally.present + tally.paid_absent;

    let full_days = tally.present + tally.weekoff + tally.holiday + tally.paid_leave + tally.paid_absent;
    tally.paid_days =
        Decimal::from(full_days) + rules.half_day_weight * Decimal::from(tally.half_day);
    tally.not_marked = i64::from(tally.total_days) - i64::from(tally.recorded);

    let mut warnings = Vec::new();
    if !duplicate_dates.is_empty() {
        duplicate_dates.sort();
        duplicate_dates.dedup();
        warnings.push(AuditWarning {
            code: "DUPLICATE_ATTENDANCE".to_string(),
            message: format!(
                "{} has more than one attendance record on {}",
                employee_email,
                duplicate_dates
                    .iter()
                    .map(|d| d.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            severity: "medium".to_string(),
        });
    }

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_tally".to_string(),
        rule_name: "Attendance Tally".to_string(),
        input: serde_json::json!({
            "employee_email": employee_email,
            "month": month.to_string(),
            "records": tally.recorded,
            "paid_absence_allowance": rules.paid_absence_allowance,
            "half_day_weight": rules.half_day_weight.to_string()
        }),
        output: serde_json::json!({
            "total_days": tally.total_days,
            "present": tally.present,
            "absent": tally.absent,
            "paid_absent": tally.paid_absent,
            "unpaid_absent": tally.unpaid_absent,
            "half_day": tally.half_day,
            "paid_leave": tally.paid_leave,
            "weekoff": tally.weekoff,
            "holiday": tally.holiday,
            "late": tally.late,
            "paid_days": tally.paid_days.normalize().to_string(),
            "not_marked": tally.not_marked
        }),
        reasoning: format!(
            "{} paid days of {} ({} present, {} weekoff, {} holiday, {} paid leave, {} paid absent, {} half days); {} unpaid absences",
            tally.paid_days.normalize(),
            tally.total_days,
            tally.present,
            tally.weekoff,
            tally.holiday,
            tally.paid_leave,
            tally.paid_absent,
            tally.half_day,
            tally.unpaid_absent
        ),
    };

    AttendanceTallyResult {
        tally,
        audit_step,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AttendanceStatus;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn june() -> PayMonth {
        "2025-06".parse().unwrap()
    }

    fn record(day: u32, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            employee_email: "asha@example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, day).unwrap(),
            status,
            is_late: false,
        }
    }

    /// Builds a full June: `present` present days, then `absent` absences,
    /// then weekoffs for the rest.
    fn month_with(present: u32, absent: u32) -> Vec<AttendanceRecord> {
        (1..=30)
            .map(|day| {
                let status = if day <= present {
                    AttendanceStatus::Present
                } else if day <= present + absent {
                    AttendanceStatus::Absent
                } else {
                    AttendanceStatus::Weekoff
                };
                record(day, status)
            })
            .collect()
    }

    /// AT-001: 25 present, 2 absent, 3 weekoff
    #[test]
    fn test_first_absence_is_paid() {
        let records = month_with(25, 2);
        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 1);
        let tally = result.tally;

        assert_eq!(tally.total_days, 30);
        assert_eq!(tally.present, 25);
        assert_eq!(tally.absent, 2);
        assert_eq!(tally.paid_absent, 1);
        assert_eq!(tally.unpaid_absent, 1);
        assert_eq!(tally.effective_present, 26);
        assert_eq!(tally.weekoff, 3);
        assert_eq!(tally.paid_days, dec("29"));
        assert_eq!(tally.not_marked, 0);
    }

    /// AT-002: no absences means nothing unpaid
    #[test]
    fn test_no_absences() {
        let records = month_with(26, 0);
        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 1);

        assert_eq!(result.tally.paid_absent, 0);
        assert_eq!(result.tally.unpaid_absent, 0);
        assert_eq!(result.tally.paid_days, dec("30"));
        assert_eq!(result.tally.attendance_percentage(), dec("100"));
    }

    /// AT-003: status buckets
    #[test]
    fn test_status_buckets() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::CheckedOut),
            record(3, AttendanceStatus::WorkFromHome),
            record(4, AttendanceStatus::Leave),
            record(5, AttendanceStatus::SickLeave),
            record(6, AttendanceStatus::CasualLeave),
            record(7, AttendanceStatus::Weekoff),
            record(8, AttendanceStatus::Holiday),
            record(9, AttendanceStatus::HalfDay),
            record(10, AttendanceStatus::HalfDay),
        ];

        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 1);
        let tally = result.tally;

        assert_eq!(tally.present, 3);
        assert_eq!(tally.paid_leave, 3);
        assert_eq!(tally.weekoff, 1);
        assert_eq!(tally.holiday, 1);
        assert_eq!(tally.half_day, 2);
        // 3 + 3 + 1 + 1 + 0.5 * 2
        assert_eq!(tally.paid_days, dec("9"));
        assert_eq!(tally.not_marked, 20);
    }

    #[test]
    fn test_late_marks_counted_regardless_of_status() {
        let mut records = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::HalfDay),
            record(3, AttendanceStatus::Present),
        ];
        records[0].is_late = true;
        records[1].is_late = true;

        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 1);
        assert_eq!(result.tally.late, 2);
    }

    #[test]
    fn test_ignores_other_employees_and_months() {
        let mut records = month_with(30, 0);
        records.push(AttendanceRecord {
            employee_email: "ravi@example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            status: AttendanceStatus::Absent,
            is_late: true,
        });
        records.push(AttendanceRecord {
            employee_email: "asha@example.com".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            status: AttendanceStatus::Absent,
            is_late: false,
        });

        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 1);
        assert_eq!(result.tally.recorded, 30);
        assert_eq!(result.tally.absent, 0);
        assert_eq!(result.tally.late, 0);
    }

    #[test]
    fn test_paid_absence_allowance_is_configurable() {
        let rules = PayrollRules {
            paid_absence_allowance: 2,
            ..PayrollRules::default()
        };
        let records = month_with(25, 3);

        let result = tally_attendance(&records, "asha@example.com", june(), &rules, 1);
        assert_eq!(result.tally.paid_absent, 2);
        assert_eq!(result.tally.unpaid_absent, 1);
    }

    #[test]
    fn test_no_records_leaves_whole_month_unmarked() {
        let result = tally_attendance(&[], "asha@example.com", june(), &PayrollRules::default(), 1);

        assert_eq!(result.tally.paid_days, Decimal::ZERO);
        assert_eq!(result.tally.not_marked, 30);
        assert_eq!(result.tally.attendance_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_duplicate_dates_warn_and_go_negative() {
        let mut records = month_with(30, 0);
        records.push(record(15, AttendanceStatus::Present));

        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 1);

        assert_eq!(result.tally.not_marked, -1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "DUPLICATE_ATTENDANCE");
        assert!(result.warnings[0].message.contains("2025-06-15"));
    }

    #[test]
    fn test_attendance_percentage_rounds() {
        // 20 of 30 days = 66.67%
        let records = month_with(20, 0)
            .into_iter()
            .take(20)
            .collect::<Vec<_>>();
        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 1);
        assert_eq!(result.tally.attendance_percentage(), dec("67"));
    }

    #[test]
    fn test_audit_step_records_tally() {
        let records = month_with(25, 2);
        let result =
            tally_attendance(&records, "asha@example.com", june(), &PayrollRules::default(), 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "attendance_tally");
        assert_eq!(result.audit_step.output["paid_days"].as_str().unwrap(), "29");
        assert_eq!(result.audit_step.output["unpaid_absent"], 1);
    }
}
