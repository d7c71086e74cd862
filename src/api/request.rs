//! Request types for the payroll engine API.
//!
//! Request bodies mirror the backend's row shapes: flat snake_case fields,
//! with every amount optional and `null` or missing read as zero. Each row
//! is converted into its domain type before calculation; conversion is
//! where months, attendance statuses and amount ranges are validated.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::SalaryInputs;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AdjustmentStatus, AdjustmentType, AttendanceRecord, ContributionRate, PayMonth,
    SalaryAdjustment, SalaryPolicy, SalaryRecord, SalaryStatus,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The month to compute, as `YYYY-MM`.
    pub month: String,
    /// The employee to compute.
    pub employee_email: String,
    /// Salary policies.
    #[serde(default)]
    pub policies: Vec<SalaryPolicyRequest>,
    /// Attendance rows.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecordRequest>,
    /// Salary adjustments.
    #[serde(default)]
    pub adjustments: Vec<SalaryAdjustmentRequest>,
    /// Persisted salary records.
    #[serde(default)]
    pub salary_records: Vec<SalaryRecordRequest>,
}

impl CalculationRequest {
    /// Validates the request and converts it to domain inputs.
    pub fn into_domain(self) -> EngineResult<(String, PayMonth, SalaryInputs)> {
        let month: PayMonth = self.month.parse()?;
        let inputs = build_inputs(
            self.policies,
            self.attendance,
            self.adjustments,
            self.salary_records,
        )?;
        Ok((self.employee_email, month, inputs))
    }
}

/// Request body for the `/calculate/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchCalculationRequest {
    /// The month to compute, as `YYYY-MM`.
    pub month: String,
    /// Salary policies.
    #[serde(default)]
    pub policies: Vec<SalaryPolicyRequest>,
    /// Attendance rows.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecordRequest>,
    /// Salary adjustments.
    #[serde(default)]
    pub adjustments: Vec<SalaryAdjustmentRequest>,
    /// Persisted salary records.
    #[serde(default)]
    pub salary_records: Vec<SalaryRecordRequest>,
}

impl BatchCalculationRequest {
    /// Validates the request and converts it to domain inputs.
    pub fn into_domain(self) -> EngineResult<(PayMonth, SalaryInputs)> {
        let month: PayMonth = self.month.parse()?;
        let inputs = build_inputs(
            self.policies,
            self.attendance,
            self.adjustments,
            self.salary_records,
        )?;
        Ok((month, inputs))
    }
}

fn build_inputs(
    policies: Vec<SalaryPolicyRequest>,
    attendance: Vec<AttendanceRecordRequest>,
    adjustments: Vec<SalaryAdjustmentRequest>,
    salary_records: Vec<SalaryRecordRequest>,
) -> EngineResult<SalaryInputs> {
    Ok(SalaryInputs {
        policies: policies
            .into_iter()
            .map(TryInto::try_into)
            .collect::<EngineResult<_>>()?,
        attendance: attendance
            .into_iter()
            .map(TryInto::try_into)
            .collect::<EngineResult<_>>()?,
        adjustments: adjustments
            .into_iter()
            .map(TryInto::try_into)
            .collect::<EngineResult<_>>()?,
        salary_records: salary_records
            .into_iter()
            .map(TryInto::try_into)
            .collect::<EngineResult<_>>()?,
    })
}

/// A salary policy row as stored by the backend.
///
/// Contributions arrive as percentage/fixed pairs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SalaryPolicyRequest {
    /// Email of the employee.
    pub employee_email: String,
    /// Whether this is the policy in effect. A row without the flag is inactive.
    pub is_active: bool,
    /// Monthly basic salary.
    pub basic_salary: Option<Decimal>,
    /// House rent allowance.
    pub hra: Option<Decimal>,
    /// Travelling allowance.
    pub travelling_allowance: Option<Decimal>,
    /// Children education allowance.
    pub children_education_allowance: Option<Decimal>,
    /// Fixed incentive.
    pub fixed_incentive: Option<Decimal>,
    /// Employer incentive.
    pub employer_incentive: Option<Decimal>,
    /// Employee PF as a percentage of earned basic.
    pub employee_pf_percentage: Option<Decimal>,
    /// Employee PF fixed amount.
    pub employee_pf_fixed: Option<Decimal>,
    /// Employer PF as a percentage of gross.
    pub employer_pf_percentage: Option<Decimal>,
    /// Employer PF fixed amount.
    pub employer_pf_fixed: Option<Decimal>,
    /// Employee ESI as a percentage of base salary.
    pub employee_esi_percentage: Option<Decimal>,
    /// Employee ESI fixed amount.
    pub employee_esi_fixed: Option<Decimal>,
    /// Employer ESI as a percentage of gross.
    pub employer_esi_percentage: Option<Decimal>,
    /// Employer ESI fixed amount.
    pub employer_esi_fixed: Option<Decimal>,
    /// Employee labour welfare fund.
    pub labour_welfare_employee: Option<Decimal>,
    /// Employer labour welfare fund.
    pub labour_welfare_employer: Option<Decimal>,
    /// Ex-gratia as a percentage of basic.
    pub ex_gratia_percentage: Option<Decimal>,
    /// Ex-gratia fixed amount.
    pub ex_gratia_fixed: Option<Decimal>,
    /// Penalty per late minute.
    pub late_penalty_per_minute: Option<Decimal>,
}

/// Largest magnitude accepted for any amount on an input row (one trillion).
///
/// Keeps every intermediate sum and product well inside `Decimal` range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3567587328, 232, 0, false, 0);

/// Largest magnitude accepted for a contribution percentage.
pub const MAX_PERCENTAGE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

/// Reads an optional amount, treating `None` as zero and rejecting values
/// beyond `limit`.
fn bounded(field: &str, value: Option<Decimal>, limit: Decimal) -> EngineResult<Decimal> {
    let value = value.unwrap_or_default();
    if value.abs() > limit {
        return Err(EngineError::AmountOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
    Ok(value)
}

fn amount(field: &str, value: Option<Decimal>) -> EngineResult<Decimal> {
    bounded(field, value, MAX_AMOUNT)
}

fn rate(
    field: &str,
    percentage: Option<Decimal>,
    fixed: Option<Decimal>,
) -> EngineResult<ContributionRate> {
    Ok(ContributionRate::from_pair(
        bounded(&format!("{}_percentage", field), percentage, MAX_PERCENTAGE)?,
        amount(&format!("{}_fixed", field), fixed)?,
    ))
}

impl TryFrom<SalaryPolicyRequest> for SalaryPolicy {
    type Error = EngineError;

    fn try_from(req: SalaryPolicyRequest) -> Result<Self, Self::Error> {
        Ok(SalaryPolicy {
            basic_salary: amount("basic_salary", req.basic_salary)?,
            hra: amount("hra", req.hra)?,
            travelling_allowance: amount("travelling_allowance", req.travelling_allowance)?,
            children_education_allowance: amount(
                "children_education_allowance",
                req.children_education_allowance,
            )?,
            fixed_incentive: amount("fixed_incentive", req.fixed_incentive)?,
            employer_incentive: amount("employer_incentive", req.employer_incentive)?,
            employee_pf: rate("employee_pf", req.employee_pf_percentage, req.employee_pf_fixed)?,
            employer_pf: rate("employer_pf", req.employer_pf_percentage, req.employer_pf_fixed)?,
            employee_esi: rate(
                "employee_esi",
                req.employee_esi_percentage,
                req.employee_esi_fixed,
            )?,
            employer_esi: rate(
                "employer_esi",
                req.employer_esi_percentage,
                req.employer_esi_fixed,
            )?,
            labour_welfare_employee: amount(
                "labour_welfare_employee",
                req.labour_welfare_employee,
            )?,
            labour_welfare_employer: amount(
                "labour_welfare_employer",
                req.labour_welfare_employer,
            )?,
            ex_gratia: rate("ex_gratia", req.ex_gratia_percentage, req.ex_gratia_fixed)?,
            late_penalty_per_minute: amount(
                "late_penalty_per_minute",
                req.late_penalty_per_minute,
            )?,
            employee_email: req.employee_email,
            is_active: req.is_active,
        })
    }
}

/// An attendance row. The status is kept as text until conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecordRequest {
    /// Email of the employee.
    pub employee_email: String,
    /// The calendar day.
    pub date: NaiveDate,
    /// The status as recorded by the backend.
    pub status: String,
    /// Whether the employee was marked late.
    #[serde(default)]
    pub is_late: Option<bool>,
}

impl TryFrom<AttendanceRecordRequest> for AttendanceRecord {
    type Error = EngineError;

    fn try_from(req: AttendanceRecordRequest) -> Result<Self, Self::Error> {
        Ok(AttendanceRecord {
            employee_email: req.employee_email,
            date: req.date,
            status: req.status.parse()?,
            is_late: req.is_late.unwrap_or(false),
        })
    }
}

/// A salary adjustment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryAdjustmentRequest {
    /// Email of the employee.
    pub employee_email: String,
    /// The month as `YYYY-MM`.
    pub month: String,
    /// The kind of adjustment.
    pub adjustment_type: AdjustmentType,
    /// The recorded amount.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Approval state.
    pub status: AdjustmentStatus,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<SalaryAdjustmentRequest> for SalaryAdjustment {
    type Error = EngineError;

    fn try_from(req: SalaryAdjustmentRequest) -> Result<Self, Self::Error> {
        Ok(SalaryAdjustment {
            employee_email: req.employee_email,
            month: req.month.parse()?,
            adjustment_type: req.adjustment_type,
            amount: amount("amount", req.amount)?,
            status: req.status,
            description: req.description,
        })
    }
}

/// A persisted salary record row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRecordRequest {
    /// Email of the employee.
    pub employee_email: String,
    /// The month as `YYYY-MM`.
    pub month: String,
    /// Salary advance recovered this month.
    #[serde(default)]
    pub advance_recovery: Option<Decimal>,
    /// Other deductions entered against the record.
    #[serde(default)]
    pub other_deductions: Option<Decimal>,
    /// Lifecycle state.
    pub status: SalaryStatus,
}

impl TryFrom<SalaryRecordRequest> for SalaryRecord {
    type Error = EngineError;

    fn try_from(req: SalaryRecordRequest) -> Result<Self, Self::Error> {
        Ok(SalaryRecord {
            employee_email: req.employee_email,
            month: req.month.parse()?,
            advance_recovery: amount("advance_recovery", req.advance_recovery)?,
            other_deductions: amount("other_deductions", req.other_deductions)?,
            status: req.status,
        })
    }
}
