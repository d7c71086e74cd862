//! Calculation logic for the payroll engine.
//!
//! This module contains the rules that turn a salary policy, attendance,
//! adjustments and a persisted salary record into a monthly salary: active
//! policy lookup, attendance tallying, earned components, adjustments, CTC
//! projection, deductions, and the orchestration that runs them for one
//! employee or a whole month.

mod adjustments;
mod attendance_tally;
mod ctc;
mod deductions;
mod earnings;
mod payroll_run;
mod policy_lookup;
mod rounding;
mod salary;

pub use adjustments::{AdjustmentResult, AdjustmentSummary, apply_adjustments};
pub use attendance_tally::{
    AttendanceTally, AttendanceTallyResult, DEFAULT_HALF_DAY_WEIGHT,
    DEFAULT_PAID_ABSENCE_ALLOWANCE, tally_attendance,
};
pub use ctc::{CtcProjection, CtcResult, DEFAULT_MONTHS_PER_YEAR, project_ctc};
pub use deductions::{
    DEFAULT_LATE_PENALTY_MINUTES, Deductions, DeductionsResult, calculate_deductions,
};
pub use earnings::{EarnedComponents, EarningsResult, calculate_earnings};
pub use payroll_run::run_payroll;
pub use policy_lookup::{PolicyLookupResult, find_active_policy};
pub use rounding::round_half_up;
pub use salary::{SalaryInputs, calculate_employee_salary};
