//! Core data models for the payroll engine.
//!
//! This module contains the domain models consumed and produced by the
//! salary calculator.

mod adjustment;
mod attendance;
mod calculation_result;
mod month;
mod salary_policy;
mod salary_record;

pub use adjustment::{AdjustmentStatus, AdjustmentType, SalaryAdjustment};
pub use attendance::{AttendanceCategory, AttendanceRecord, AttendanceStatus};
pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, PayrollRun, PayrollRunSummary, PayrollTotals,
    SalaryBreakdown, SalaryCalculation, SalaryComputation,
};
pub use month::PayMonth;
pub use salary_policy::{ContributionRate, SalaryPolicy};
pub use salary_record::{SalaryRecord, SalaryStatus};

/// Employee emails are compared trimmed and case-insensitively.
pub(crate) fn emails_match(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}
