//! Persisted salary record model.
//!
//! A [`SalaryRecord`] is the backend's stored result for a month. The engine
//! only reads it for recoveries and deductions that were entered against the
//! record, and echoes its status.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayMonth, emails_match};

/// Lifecycle state of a persisted salary record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// Generated but not yet reviewed.
    Draft,
    /// Approved for payment.
    Approved,
    /// Locked against further edits.
    Locked,
    /// Paid out.
    Paid,
    /// Any state this engine does not track.
    #[serde(other)]
    Other,
}

/// The stored salary record for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Email of the employee.
    pub employee_email: String,
    /// The month the record covers.
    pub month: PayMonth,
    /// Salary advance recovered this month.
    #[serde(default)]
    pub advance_recovery: Decimal,
    /// Any other deductions entered against the record.
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Lifecycle state.
    pub status: SalaryStatus,
}

impl SalaryRecord {
    /// Returns true if the record is for the given employee and month.
    pub fn applies_to(&self, email: &str, month: PayMonth) -> bool {
        self.month == month && emails_match(&self.employee_email, email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_record_with_missing_amounts() {
        let json = r#"{
            "employee_email": "asha@example.com",
            "month": "2025-06",
            "status": "locked"
        }"#;

        let record: SalaryRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.advance_recovery, Decimal::ZERO);
        assert_eq!(record.other_deductions, Decimal::ZERO);
        assert_eq!(record.status, SalaryStatus::Locked);
    }

    #[test]
    fn test_applies_to_matches_employee_and_month() {
        let record = SalaryRecord {
            employee_email: "asha@example.com".to_string(),
            month: "2025-06".parse().unwrap(),
            advance_recovery: Decimal::new(1000, 0),
            other_deductions: Decimal::ZERO,
            status: SalaryStatus::Draft,
        };

        assert!(record.applies_to("asha@example.com", "2025-06".parse().unwrap()));
        assert!(!record.applies_to("asha@example.com", "2025-05".parse().unwrap()));
        assert!(!record.applies_to("ravi@example.com", "2025-06".parse().unwrap()));
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(serde_json::to_string(&SalaryStatus::Paid).unwrap(), "\"paid\"");
        let status: SalaryStatus = serde_json::from_str("\"approved\"").unwrap();
        assert_eq!(status, SalaryStatus::Approved);
    }

    #[test]
    fn test_unrecognised_status_deserializes_as_other() {
        let status: SalaryStatus = serde_json::from_str("\"on_hold\"").unwrap();
        assert_eq!(status, SalaryStatus::Other);
    }
}
