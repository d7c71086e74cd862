//! Salary policy model and related types.
//!
//! A [`SalaryPolicy`] is the per-employee compensation template every salary
//! figure is derived from. Statutory contributions that may be configured
//! either as a percentage or as a fixed amount are represented by
//! [`ContributionRate`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::emails_match;

/// How a statutory contribution (PF, ESI, ex-gratia) is computed.
///
/// The backend stores these as two numeric fields, a percentage and a fixed
/// fallback. [`ContributionRate::from_pair`] resolves that pair once so the
/// precedence is explicit: a positive percentage always wins.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ContributionRate;
/// use rust_decimal::Decimal;
///
/// let rate = ContributionRate::from_pair(Decimal::new(12, 0), Decimal::new(1800, 0));
/// assert_eq!(rate, ContributionRate::Percentage(Decimal::new(12, 0)));
///
/// let rate = ContributionRate::from_pair(Decimal::ZERO, Decimal::new(1800, 0));
/// assert_eq!(rate, ContributionRate::Fixed(Decimal::new(1800, 0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum ContributionRate {
    /// A percentage (0-100) of some base amount.
    Percentage(Decimal),
    /// A fixed monthly amount.
    Fixed(Decimal),
}

impl ContributionRate {
    /// Resolves a percentage/fixed pair; the percentage applies only when > 0.
    pub fn from_pair(percentage: Decimal, fixed: Decimal) -> Self {
        if percentage > Decimal::ZERO {
            ContributionRate::Percentage(percentage)
        } else {
            ContributionRate::Fixed(fixed)
        }
    }

    /// Returns true if this contribution is percentage based.
    pub fn is_percentage(&self) -> bool {
        matches!(self, ContributionRate::Percentage(_))
    }
}

impl Default for ContributionRate {
    fn default() -> Self {
        ContributionRate::Fixed(Decimal::ZERO)
    }
}

/// The active compensation template for one employee.
///
/// All monetary values are monthly amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryPolicy {
    /// Email of the employee the policy belongs to.
    pub employee_email: String,
    /// Whether this is the policy currently in effect.
    pub is_active: bool,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// House rent allowance.
    pub hra: Decimal,
    /// Travelling allowance.
    pub travelling_allowance: Decimal,
    /// Children education allowance.
    pub children_education_allowance: Decimal,
    /// Fixed incentive paid with salary.
    pub fixed_incentive: Decimal,
    /// Employer incentive, paid in full regardless of attendance.
    pub employer_incentive: Decimal,
    /// Employee provident fund contribution.
    pub employee_pf: ContributionRate,
    /// Employer provident fund contribution.
    pub employer_pf: ContributionRate,
    /// Employee state insurance contribution.
    pub employee_esi: ContributionRate,
    /// Employer state insurance contribution.
    pub employer_esi: ContributionRate,
    /// Employee labour welfare fund contribution.
    pub labour_welfare_employee: Decimal,
    /// Employer labour welfare fund contribution.
    pub labour_welfare_employer: Decimal,
    /// Ex-gratia paid by the employer.
    pub ex_gratia: ContributionRate,
    /// Penalty per late minute.
    pub late_penalty_per_minute: Decimal,
}

impl SalaryPolicy {
    /// Returns true if this policy belongs to the given employee.
    pub fn belongs_to(&self, email: &str) -> bool {
        emails_match(&self.employee_email, email)
    }

    /// Sum of the components that are prorated by paid days
    /// (basic, HRA, travel, child education, fixed incentive).
    pub fn prorated_components_total(&self) -> Decimal {
        self.basic_salary
            + self.hra
            + self.travelling_allowance
            + self.children_education_allowance
            + self.fixed_incentive
    }

    /// Full unprorated monthly gross, including the employer incentive.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{ContributionRate, SalaryPolicy};
    /// use rust_decimal::Decimal;
    ///
    /// let policy = SalaryPolicy {
    ///     employee_email: "asha@example.com".to_string(),
    ///     is_active: true,
    ///     basic_salary: Decimal::new(30000, 0),
    ///     hra: Decimal::new(12000, 0),
    ///     travelling_allowance: Decimal::new(1600, 0),
    ///     children_education_allowance: Decimal::new(200, 0),
    ///     fixed_incentive: Decimal::new(1000, 0),
    ///     employer_incentive: Decimal::new(500, 0),
    ///     employee_pf: ContributionRate::default(),
    ///     employer_pf: ContributionRate::default(),
    ///     employee_esi: ContributionRate::default(),
    ///     employer_esi: ContributionRate::default(),
    ///     labour_welfare_employee: Decimal::ZERO,
    ///     labour_welfare_employer: Decimal::ZERO,
    ///     ex_gratia: ContributionRate::default(),
    ///     late_penalty_per_minute: Decimal::ZERO,
    /// };
    /// assert_eq!(policy.monthly_gross(), Decimal::new(45300, 0));
    /// ```
    pub fn monthly_gross(&self) -> Decimal {
        self.prorated_components_total() + self.employer_incentive
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_policy() -> SalaryPolicy {
        SalaryPolicy {
            employee_email: "Asha@Example.com".to_string(),
            is_active: true,
            basic_salary: dec("30000"),
            hra: dec("12000"),
            travelling_allowance: dec("1600"),
            children_education_allowance: dec("200"),
            fixed_incentive: dec("1000"),
            employer_incentive: dec("500"),
            employee_pf: ContributionRate::Percentage(dec("12")),
            employer_pf: ContributionRate::Percentage(dec("13")),
            employee_esi: ContributionRate::Fixed(dec("0")),
            employer_esi: ContributionRate::Fixed(dec("0")),
            labour_welfare_employee: dec("25"),
            labour_welfare_employer: dec("75"),
            ex_gratia: ContributionRate::Percentage(dec("8.33")),
            late_penalty_per_minute: dec("2"),
        }
    }

    #[test]
    fn test_from_pair_prefers_positive_percentage() {
        let rate = ContributionRate::from_pair(dec("0.75"), dec("500"));
        assert_eq!(rate, ContributionRate::Percentage(dec("0.75")));
        assert!(rate.is_percentage());
    }

    #[test]
    fn test_from_pair_falls_back_to_fixed() {
        let rate = ContributionRate::from_pair(dec("0"), dec("500"));
        assert_eq!(rate, ContributionRate::Fixed(dec("500")));
        assert!(!rate.is_percentage());
    }

    #[test]
    fn test_from_pair_negative_percentage_is_ignored() {
        let rate = ContributionRate::from_pair(dec("-1"), dec("0"));
        assert_eq!(rate, ContributionRate::Fixed(Decimal::ZERO));
    }

    #[test]
    fn test_contribution_rate_serialization() {
        let json = serde_json::to_string(&ContributionRate::Percentage(dec("12"))).unwrap();
        assert_eq!(json, r#"{"mode":"percentage","value":"12"}"#);

        let json = serde_json::to_string(&ContributionRate::Fixed(dec("1800"))).unwrap();
        assert_eq!(json, r#"{"mode":"fixed","value":"1800"}"#);
    }

    #[test]
    fn test_contribution_rate_deserialization() {
        let rate: ContributionRate =
            serde_json::from_str(r#"{"mode":"fixed","value":"250"}"#).unwrap();
        assert_eq!(rate, ContributionRate::Fixed(dec("250")));
    }

    #[test]
    fn test_belongs_to_ignores_case_and_whitespace() {
        let policy = create_test_policy();
        assert!(policy.belongs_to("asha@example.com"));
        assert!(policy.belongs_to("  ASHA@example.COM "));
        assert!(!policy.belongs_to("ravi@example.com"));
    }

    #[test]
    fn test_prorated_components_excludes_employer_incentive() {
        let policy = create_test_policy();
        assert_eq!(policy.prorated_components_total(), dec("44800"));
        assert_eq!(policy.monthly_gross(), dec("45300"));
    }

    #[test]
    fn test_policy_serialization_round_trip() {
        let policy = create_test_policy();
        let json = serde_json::to_string(&policy).unwrap();
        let deserialized: SalaryPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy, deserialized);
    }
}
