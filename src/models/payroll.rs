//! Payroll input, computed totals and the external payslip record shape.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EmployeeInfo, LineItem, NamedAmounts, RawAmount};

/// A payslip record as held by the external record store.
///
/// Numeric fields keep whatever the data-entry layer produced, including
/// blanks; [`PayrollInput::from_record`](crate::models::PayrollInput::from_record)
/// turns them into a normalized input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipRecord {
    /// Unique identifier of the payslip, used in the verification URL.
    pub id: Uuid,
    /// Basic salary for the period.
    #[serde(default)]
    pub basic_salary: Option<RawAmount>,
    /// Named allowances, in entry order.
    #[serde(default)]
    pub allowances: NamedAmounts,
    /// Named deductions, in entry order.
    #[serde(default)]
    pub deductions: NamedAmounts,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Option<RawAmount>,
    /// Pay per overtime hour.
    #[serde(default)]
    pub overtime_rate: Option<RawAmount>,
    /// Named bonuses, in entry order.
    #[serde(default)]
    pub bonuses: NamedAmounts,
    /// Tax rate in percent of gross pay.
    #[serde(default)]
    pub tax_percentage: Option<RawAmount>,
    /// The date the salary is paid.
    pub payment_date: NaiveDate,
    /// The employee being paid.
    pub employee: EmployeeInfo,
    /// Gross pay as previously stored, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gross_pay: Option<Decimal>,
    /// Total deductions as previously stored, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_deductions: Option<Decimal>,
    /// Net pay as previously stored, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_pay: Option<Decimal>,
}

/// Normalized payroll input for a single payslip.
///
/// Every numeric field is a concrete decimal; blank values have already been
/// coerced to zero. Line item lists keep the order of their source maps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// Basic salary for the period.
    pub basic_salary: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Pay per overtime hour.
    pub overtime_rate: Decimal,
    /// Allowances, as earnings.
    pub allowances: Vec<LineItem>,
    /// Bonuses, as earnings.
    pub bonuses: Vec<LineItem>,
    /// Deductions other than tax.
    pub deductions: Vec<LineItem>,
    /// Tax rate in percent of gross pay.
    pub tax_percentage: Decimal,
    /// The date the salary is paid.
    pub payment_date: NaiveDate,
}

/// Monetary totals derived from a [`PayrollInput`].
///
/// Always produced by [`compute_totals`](crate::calculation::compute_totals);
/// never edited in place.
///
/// # Example
///
/// ```
/// use payslip_engine::models::PayrollTotals;
/// use rust_decimal::Decimal;
///
/// let totals = PayrollTotals {
///     overtime_pay: Decimal::from(50),
///     gross_pay: Decimal::from(1250),
///     tax_amount: Decimal::from(125),
///     total_deductions: Decimal::from(175),
///     net_pay: Decimal::from(1075),
/// };
/// assert_eq!(totals.net_pay, totals.gross_pay - totals.total_deductions);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Overtime hours multiplied by the overtime rate.
    pub overtime_pay: Decimal,
    /// Basic salary plus overtime pay plus all earnings.
    pub gross_pay: Decimal,
    /// Tax on gross pay.
    pub tax_amount: Decimal,
    /// Deductions plus tax.
    pub total_deductions: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
}

/// A non-fatal observation about payroll input.
///
/// Produced by boundary checks; never changes the computed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}
