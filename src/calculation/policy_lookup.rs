//! Active salary policy resolution.

use crate::models::{AuditStep, AuditWarning, SalaryPolicy};

/// The result of resolving an employee's active policy.
#[derive(Debug, Clone)]
pub struct PolicyLookupResult<'a> {
    /// The active policy, if the employee has one.
    pub policy: Option<&'a SalaryPolicy>,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
    /// Raised when more than one active policy matched.
    pub warnings: Vec<AuditWarning>,
}

/// Finds the active policy for an employee.
///
/// At most one policy per employee should be active. If several are, the
/// first in input order is used and a `MULTIPLE_ACTIVE_POLICIES` warning is
/// raised.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::find_active_policy;
///
/// let result = find_active_policy(&[], "asha@example.com", 1);
/// assert!(result.policy.is_none());
/// assert_eq!(result.audit_step.output["found"], false);
/// ```
pub fn find_active_policy<'a>(
    policies: &'a [SalaryPolicy],
    employee_email: &str,
    step_number: u32,
) -> PolicyLookupResult<'a> {
    let active: Vec<&SalaryPolicy> = policies
        .iter()
        .filter(|p| p.is_active && p.belongs_to(employee_email))
        .collect();

    let mut warnings = Vec::new();
    if active.len() > 1 {
        warnings.push(AuditWarning {
            code: "MULTIPLE_ACTIVE_POLICIES".to_string(),
            message: format!(
                "{} active policies found for {}; using the first",
                active.len(),
                employee_email
            ),
            severity: "high".to_string(),
        });
    }

    let policy = active.first().copied();

    let reasoning = match policy {
        Some(p) => format!(
            "Active policy found for {} with basic salary {}",
            employee_email, p.basic_salary
        ),
        None => format!(
            "No active policy for {}; salary cannot be computed",
            employee_email
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "policy_lookup".to_string(),
        rule_name: "Active Policy Lookup".to_string(),
        input: serde_json::json!({
            "employee_email": employee_email,
            "policies_considered": policies.len()
        }),
        output: serde_json::json!({
            "found": policy.is_some(),
            "active_matches": active.len()
        }),
        reasoning,
    };

    PolicyLookupResult {
        policy,
        audit_step,
        warnings,
    }
}
