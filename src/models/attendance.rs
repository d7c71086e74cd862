//! Attendance record model.
//!
//! This module defines the closed attendance status vocabulary and the
//! table mapping each status onto the bucket it is tallied under.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::emails_match;
use crate::error::EngineError;

/// The status recorded for one employee on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    /// Marked present.
    Present,
    /// Checked in and out for the day.
    CheckedOut,
    /// Worked remotely.
    WorkFromHome,
    /// Absent without leave.
    Absent,
    /// Worked half a day.
    HalfDay,
    /// Generic approved leave.
    Leave,
    /// Sick leave.
    SickLeave,
    /// Casual leave.
    CasualLeave,
    /// Weekly off day.
    Weekoff,
    /// Company holiday.
    Holiday,
}

/// The tally bucket a status counts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceCategory {
    /// Worked the day, on site or remotely.
    Present,
    /// Did not work and had no leave.
    Absent,
    /// Worked half the day.
    HalfDay,
    /// On paid leave.
    PaidLeave,
    /// Weekly off.
    Weekoff,
    /// Holiday.
    Holiday,
}

impl AttendanceStatus {
    /// Every status in the vocabulary, in declaration order.
    pub const ALL: [AttendanceStatus; 10] = [
        AttendanceStatus::Present,
        AttendanceStatus::CheckedOut,
        AttendanceStatus::WorkFromHome,
        AttendanceStatus::Absent,
        AttendanceStatus::HalfDay,
        AttendanceStatus::Leave,
        AttendanceStatus::SickLeave,
        AttendanceStatus::CasualLeave,
        AttendanceStatus::Weekoff,
        AttendanceStatus::Holiday,
    ];

    /// Maps the status onto its tally bucket.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceCategory, AttendanceStatus};
    ///
    /// assert_eq!(AttendanceStatus::WorkFromHome.category(), AttendanceCategory::Present);
    /// assert_eq!(AttendanceStatus::SickLeave.category(), AttendanceCategory::PaidLeave);
    /// ```
    pub fn category(&self) -> AttendanceCategory {
        match self {
            AttendanceStatus::Present
            | AttendanceStatus::CheckedOut
            | AttendanceStatus::WorkFromHome => AttendanceCategory::Present,
            AttendanceStatus::Absent => AttendanceCategory::Absent,
            AttendanceStatus::HalfDay => AttendanceCategory::HalfDay,
            AttendanceStatus::Leave | AttendanceStatus::SickLeave | AttendanceStatus::CasualLeave => {
                AttendanceCategory::PaidLeave
            }
            AttendanceStatus::Weekoff => AttendanceCategory::Weekoff,
            AttendanceStatus::Holiday => AttendanceCategory::Holiday,
        }
    }

    /// The wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::CheckedOut => "checked_out",
            AttendanceStatus::WorkFromHome => "work_from_home",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::HalfDay => "half_day",
            AttendanceStatus::Leave => "leave",
            AttendanceStatus::SickLeave => "sick_leave",
            AttendanceStatus::CasualLeave => "casual_leave",
            AttendanceStatus::Weekoff => "weekoff",
            AttendanceStatus::Holiday => "holiday",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        AttendanceStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| EngineError::UnknownAttendanceStatus {
                status: s.to_string(),
            })
    }
}

/// One attendance row for one employee on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Email of the employee.
    pub employee_email: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// The status marked for the day.
    pub status: AttendanceStatus,
    /// Whether the employee was marked late.
    #[serde(default)]
    pub is_late: bool,
}

impl AttendanceRecord {
    /// Returns true if the record belongs to the given employee.
    pub fn belongs_to(&self, email: &str) -> bool {
        emails_match(&self.employee_email, email)
    }
}
