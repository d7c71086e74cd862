//! Salary adjustment model.
//!
//! Adjustments are ad-hoc monthly entries (bonuses, reimbursements,
//! recoveries) that move gross pay and CTC up or down.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayMonth, emails_match};

/// The kind of adjustment.
///
/// Bonus, incentive, reimbursement and allowance add to pay; every other
/// kind, including labels this engine does not recognise, subtracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentType {
    /// One-off bonus.
    Bonus,
    /// Performance incentive.
    Incentive,
    /// Expense reimbursement.
    Reimbursement,
    /// Ad-hoc allowance.
    Allowance,
    /// Generic deduction.
    Deduction,
    /// Disciplinary penalty.
    Penalty,
    /// Recovery of a salary advance.
    AdvanceRecovery,
    /// Any other label; treated as a deduction.
    #[serde(other)]
    Other,
}

impl AdjustmentType {
    /// Returns true if this kind of adjustment adds to pay.
    pub fn is_additive(&self) -> bool {
        matches!(
            self,
            AdjustmentType::Bonus
                | AdjustmentType::Incentive
                | AdjustmentType::Reimbursement
                | AdjustmentType::Allowance
        )
    }
}

/// Approval state of an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentStatus {
    /// Awaiting approval.
    Pending,
    /// Approved; counts towards the month's pay.
    Approved,
    /// Rejected; ignored.
    Rejected,
    /// Any other state, such as cancelled; ignored.
    #[serde(other)]
    Other,
}

/// A single adjustment for one employee and month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryAdjustment {
    /// Email of the employee.
    pub employee_email: String,
    /// The month the adjustment applies to.
    pub month: PayMonth,
    /// The kind of adjustment.
    pub adjustment_type: AdjustmentType,
    /// The recorded amount. Its sign is ignored for subtractive kinds.
    pub amount: Decimal,
    /// Approval state.
    pub status: AdjustmentStatus,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SalaryAdjustment {
    /// Returns true if the adjustment is approved and applies to the given
    /// employee and month.
    pub fn applies_to(&self, email: &str, month: PayMonth) -> bool {
        self.status == AdjustmentStatus::Approved
            && self.month == month
            && emails_match(&self.employee_email, email)
    }

    /// The amount's effect on pay: the raw amount for additive kinds,
    /// minus its absolute value for everything else.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AdjustmentStatus, AdjustmentType, SalaryAdjustment};
    /// use rust_decimal::Decimal;
    ///
    /// let recovery = SalaryAdjustment {
    ///     employee_email: "asha@example.com".to_string(),
    ///     month: "2025-06".parse().unwrap(),
    ///     adjustment_type: AdjustmentType::AdvanceRecovery,
    ///     amount: Decimal::new(2000, 0),
    ///     status: AdjustmentStatus::Approved,
    ///     description: None,
    /// };
    /// assert_eq!(recovery.signed_amount(), Decimal::new(-2000, 0));
    /// ```
    pub fn signed_amount(&self) -> Decimal {
        if self.adjustment_type.is_additive() {
            self.amount
        } else {
            -self.amount.abs()
        }
    }
}
