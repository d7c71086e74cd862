//! Cost-to-company projection.
//!
//! CTC1 is what the policy costs the employer for a full month, independent
//! of attendance. CTC2 adds the month's approved adjustments.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::round_half_up;
use crate::config::PayrollRules;
use crate::models::{AuditStep, ContributionRate, SalaryPolicy};

/// Months in a year for the yearly projection.
pub const DEFAULT_MONTHS_PER_YEAR: u32 = 12;

/// The monthly and yearly CTC figures with their employer-side parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtcProjection {
    /// Full unprorated monthly gross including the employer incentive.
    pub monthly_gross: Decimal,
    /// Employer provident fund contribution.
    pub employer_pf: Decimal,
    /// Employer state insurance contribution.
    pub employer_esi: Decimal,
    /// Employer labour welfare fund contribution.
    pub employer_lwf: Decimal,
    /// Ex-gratia.
    pub ex_gratia: Decimal,
    /// Monthly CTC from the policy alone.
    pub monthly_ctc1: Decimal,
    /// `monthly_ctc1` over a year.
    pub yearly_ctc1: Decimal,
    /// `monthly_ctc1` plus net adjustments.
    pub monthly_ctc2: Decimal,
    /// `monthly_ctc2` over a year.
    pub yearly_ctc2: Decimal,
}

/// The result of projecting CTC, including the audit step.
#[derive(Debug, Clone)]
pub struct CtcResult {
    /// The projection.
    pub projection: CtcProjection,
    /// The audit step recording the computation.
    pub audit_step: AuditStep,
}

/// Resolves an employer contribution against its base.
///
/// Percentages are rounded to the rupee; fixed amounts are taken as given.
fn employer_contribution(rate: ContributionRate, base: Decimal) -> Decimal {
    match rate {
        ContributionRate::Percentage(pct) => round_half_up(base * pct / Decimal::ONE_HUNDRED),
        ContributionRate::Fixed(amount) => amount,
    }
}

/// Projects monthly and yearly CTC for a policy.
///
/// Employer PF and ESI percentages apply to the full monthly gross; the
/// ex-gratia percentage applies to the basic salary.
pub fn project_ctc(
    policy: &SalaryPolicy,
    net_adjustments: Decimal,
    rules: &PayrollRules,
    step_number: u32,
) -> CtcResult {
    let monthly_gross = policy.monthly_gross();
    let employer_pf = employer_contribution(policy.employer_pf, monthly_gross);
    let employer_esi = employer_contribution(policy.employer_esi, monthly_gross);
    let employer_lwf = policy.labour_welfare_employer;
    let ex_gratia = employer_contribution(policy.ex_gratia, policy.basic_salary);

    let months = Decimal::from(rules.months_per_year);
    let monthly_ctc1 = monthly_gross + employer_pf + employer_esi + employer_lwf + ex_gratia;
    let monthly_ctc2 = monthly_ctc1 + net_adjustments;

    let projection = CtcProjection {
        monthly_gross,
        employer_pf,
        employer_esi,
        employer_lwf,
        ex_gratia,
        monthly_ctc1,
        yearly_ctc1: monthly_ctc1 * months,
        monthly_ctc2,
        yearly_ctc2: monthly_ctc2 * months,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "ctc_projection".to_string(),
        rule_name: "Cost To Company".to_string(),
        input: serde_json::json!({
            "monthly_gross": monthly_gross.to_string(),
            "employer_pf": policy.employer_pf,
            "employer_esi": policy.employer_esi,
            "labour_welfare_employer": employer_lwf.to_string(),
            "ex_gratia": policy.ex_gratia,
            "net_adjustments": net_adjustments.to_string(),
            "months_per_year": rules.months_per_year
        }),
        output: serde_json::json!({
            "employer_pf": employer_pf.to_string(),
            "employer_esi": employer_esi.to_string(),
            "ex_gratia": ex_gratia.to_string(),
            "monthly_ctc1": projection.monthly_ctc1.to_string(),
            "yearly_ctc1": projection.yearly_ctc1.to_string(),
            "monthly_ctc2": projection.monthly_ctc2.to_string(),
            "yearly_ctc2": projection.yearly_ctc2.to_string()
        }),
        reasoning: format!(
            "CTC1 = {} gross + {} PF + {} ESI + {} LWF + {} ex-gratia = {}; CTC2 = {} with adjustments",
            monthly_gross,
            employer_pf,
            employer_esi,
            employer_lwf,
            ex_gratia,
            monthly_ctc1,
            monthly_ctc2
        ),
    };

    CtcResult {
        projection,
        audit_step,
    }
}
