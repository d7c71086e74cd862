//! Approved monthly adjustments.

use rust_decimal::Decimal;

use crate::models::{AuditStep, PayMonth, SalaryAdjustment};

/// The net effect of an employee's approved adjustments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjustmentSummary {
    /// Signed sum of the applied adjustments.
    pub net: Decimal,
    /// The adjustments that were applied, in input order.
    pub applied: Vec<SalaryAdjustment>,
}

/// The result of applying adjustments, including the audit step.
#[derive(Debug, Clone)]
pub struct AdjustmentResult {
    /// The applied adjustments and their net.
    pub summary: AdjustmentSummary,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

/// Sums the approved adjustments for an employee and month.
///
/// Additive kinds contribute their amount as recorded; every other kind
/// subtracts its absolute value. Pending and rejected entries are ignored.
pub fn apply_adjustments(
    adjustments: &[SalaryAdjustment],
    employee_email: &str,
    month: PayMonth,
    step_number: u32,
) -> AdjustmentResult {
    let applied: Vec<SalaryAdjustment> = adjustments
        .iter()
        .filter(|a| a.applies_to(employee_email, month))
        .cloned()
        .collect();

    let additions: Decimal = applied
        .iter()
        .filter(|a| a.adjustment_type.is_additive())
        .map(SalaryAdjustment::signed_amount)
        .sum();
    let subtractions: Decimal = applied
        .iter()
        .filter(|a| !a.adjustment_type.is_additive())
        .map(SalaryAdjustment::signed_amount)
        .sum();
    let net = additions + subtractions;

    let audit_step = AuditStep {
        step_number,
        rule_id: "approved_adjustments".to_string(),
        rule_name: "Approved Adjustments".to_string(),
        input: serde_json::json!({
            "adjustments_considered": adjustments.len(),
            "month": month.to_string()
        }),
        output: serde_json::json!({
            "applied": applied.len(),
            "additions": additions.to_string(),
            "subtractions": subtractions.to_string(),
            "net": net.to_string()
        }),
        reasoning: if applied.is_empty() {
            format!("No approved adjustments for {} in {}", employee_email, month)
        } else {
            format!(
                "{} approved adjustment(s): +{} / {} = net {}",
                applied.len(),
                additions,
                subtractions,
                net
            )
        },
    };

    AdjustmentResult {
        summary: AdjustmentSummary { net, applied },
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AdjustmentStatus, AdjustmentType};

    fn june() -> PayMonth {
        "2025-06".parse().unwrap()
    }

    fn adjustment(
        email: &str,
        month: &str,
        adjustment_type: AdjustmentType,
        amount: i64,
        status: AdjustmentStatus,
    ) -> SalaryAdjustment {
        SalaryAdjustment {
            employee_email: email.to_string(),
            month: month.parse().unwrap(),
            adjustment_type,
            amount: Decimal::from(amount),
            status,
            description: None,
        }
    }

    /// ADJ-001: additive and subtractive kinds net out
    #[test]
    fn test_bonus_and_penalty_net() {
        let adjustments = vec![
            adjustment("asha@example.com", "2025-06", AdjustmentType::Bonus, 5000, AdjustmentStatus::Approved),
            adjustment("asha@example.com", "2025-06", AdjustmentType::Penalty, 750, AdjustmentStatus::Approved),
        ];

        let result = apply_adjustments(&adjustments, "asha@example.com", june(), 4);

        assert_eq!(result.summary.net, Decimal::from(4250));
        assert_eq!(result.summary.applied.len(), 2);
        assert_eq!(result.audit_step.step_number, 4);
    }

    /// ADJ-002: subtractive amounts are applied by magnitude
    #[test]
    fn test_negative_deduction_still_subtracts() {
        let adjustments = vec![adjustment(
            "asha@example.com",
            "2025-06",
            AdjustmentType::Deduction,
            -300,
            AdjustmentStatus::Approved,
        )];

        let result = apply_adjustments(&adjustments, "asha@example.com", june(), 1);

        assert_eq!(result.summary.net, Decimal::from(-300));
    }

    /// ADJ-003: pending, rejected, other months and other employees are ignored
    #[test]
    fn test_only_approved_entries_for_employee_and_month() {
        let adjustments = vec![
            adjustment("asha@example.com", "2025-06", AdjustmentType::Bonus, 100, AdjustmentStatus::Pending),
            adjustment("asha@example.com", "2025-06", AdjustmentType::Bonus, 200, AdjustmentStatus::Rejected),
            adjustment("asha@example.com", "2025-05", AdjustmentType::Bonus, 400, AdjustmentStatus::Approved),
            adjustment("ravi@example.com", "2025-06", AdjustmentType::Bonus, 800, AdjustmentStatus::Approved),
        ];

        let result = apply_adjustments(&adjustments, "asha@example.com", june(), 1);

        assert_eq!(result.summary.net, Decimal::ZERO);
        assert!(result.summary.applied.is_empty());
        assert!(result.audit_step.reasoning.contains("No approved adjustments"));
    }

    #[test]
    fn test_unrecognised_type_subtracts() {
        let adjustments = vec![adjustment(
            "asha@example.com",
            "2025-06",
            AdjustmentType::Other,
            120,
            AdjustmentStatus::Approved,
        )];

        let result = apply_adjustments(&adjustments, "asha@example.com", june(), 1);

        assert_eq!(result.summary.net, Decimal::from(-120));
    }
}
