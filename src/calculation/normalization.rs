//! Blank-field normalization at the calculator boundary.
//!
//! Data-entry forms routinely leave numeric fields empty. The engine treats a
//! blank or missing value as zero, and this module is the only place where
//! that happens. Text that is present but not a number is also read as zero;
//! that case is logged so a typo does not silently vanish.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::models::{
    CompanyInfo, EmployeeInfo, LineItem, LineItemKind, NamedAmounts, PayrollInput, PayslipRecord,
    RawAmount,
};

/// Tax rate used to prefill input when the company has not configured one.
pub const DEFAULT_TAX_PERCENTAGE: Decimal = Decimal::from_parts(25, 0, 0, false, 0);

/// Coerces a raw numeric field to a decimal.
///
/// Missing, blank and unparseable values all become zero. Numbers beyond the
/// decimal range saturate (see [`RawAmount::parse`]).
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::coerce_amount;
/// use payslip_engine::models::RawAmount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(coerce_amount("basic_salary", None), Decimal::ZERO);
/// assert_eq!(coerce_amount("basic_salary", Some(&RawAmount::from(""))), Decimal::ZERO);
/// assert_eq!(coerce_amount("basic_salary", Some(&RawAmount::from("1500"))), Decimal::from(1500));
/// ```
pub fn coerce_amount(field: &str, raw: Option<&RawAmount>) -> Decimal {
    let Some(raw) = raw else {
        return Decimal::ZERO;
    };
    if raw.is_blank() {
        return Decimal::ZERO;
    }
    match raw.parse() {
        Some(value) => value,
        None => {
            warn!(field = %field, value = ?raw, "Unparseable amount coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Converts a named map into line items of the given kind.
///
/// Entries without a value (blank or `null`) are dropped; unparseable entries
/// are kept with a zero amount.
pub fn to_line_items(group: &str, amounts: &NamedAmounts, kind: LineItemKind) -> Vec<LineItem> {
    amounts
        .iter()
        .filter(|(_, raw)| raw.is_some_and(|raw| !raw.is_blank()))
        .map(|(label, raw)| LineItem {
            label: label.to_string(),
            amount: coerce_amount(&format!("{group}.{label}"), raw),
            kind,
        })
        .collect()
}

impl PayrollInput {
    /// Builds a normalized input from an external payslip record.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::{EmployeeInfo, NamedAmounts, PayrollInput, PayslipRecord, RawAmount};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let record = PayslipRecord {
    ///     id: Uuid::nil(),
    ///     basic_salary: Some(RawAmount::from("2000")),
    ///     allowances: NamedAmounts::new().with("housing", "").with("transport", 50),
    ///     deductions: NamedAmounts::new(),
    ///     overtime_hours: Some(RawAmount::from("")),
    ///     overtime_rate: None,
    ///     bonuses: NamedAmounts::new(),
    ///     tax_percentage: None,
    ///     payment_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    ///     employee: EmployeeInfo {
    ///         employee_id: "EMP-001".to_string(),
    ///         name: "Ada Obi".to_string(),
    ///         email: "ada@example.com".to_string(),
    ///         phone: None,
    ///         department: "Finance".to_string(),
    ///         designation: "Analyst".to_string(),
    ///         bank_name: None,
    ///         bank_account: None,
    ///         tax_number: None,
    ///         basic_salary: None,
    ///     },
    ///     gross_pay: None,
    ///     total_deductions: None,
    ///     net_pay: None,
    /// };
    ///
    /// let input = PayrollInput::from_record(&record);
    /// assert_eq!(input.basic_salary, Decimal::from(2000));
    /// assert_eq!(input.overtime_hours, Decimal::ZERO);
    /// assert_eq!(input.allowances.len(), 1);
    /// assert_eq!(input.allowances[0].label, "transport");
    /// ```
    pub fn from_record(record: &PayslipRecord) -> Self {
        Self {
            basic_salary: coerce_amount("basic_salary", record.basic_salary.as_ref()),
            overtime_hours: coerce_amount("overtime_hours", record.overtime_hours.as_ref()),
            overtime_rate: coerce_amount("overtime_rate", record.overtime_rate.as_ref()),
            allowances: to_line_items("allowances", &record.allowances, LineItemKind::Earning),
            bonuses: to_line_items("bonuses", &record.bonuses, LineItemKind::Earning),
            deductions: to_line_items("deductions", &record.deductions, LineItemKind::Deduction),
            tax_percentage: coerce_amount("tax_percentage", record.tax_percentage.as_ref()),
            payment_date: record.payment_date,
        }
    }

    /// The starting input for a new payslip.
    ///
    /// Takes the employee's standing basic salary and the company's default tax
    /// rate ([`DEFAULT_TAX_PERCENTAGE`] if none is configured); everything else
    /// starts at zero with no line items.
    pub fn prefilled(
        employee: &EmployeeInfo,
        company: &CompanyInfo,
        payment_date: NaiveDate,
    ) -> Self {
        Self {
            basic_salary: employee.basic_salary.unwrap_or(Decimal::ZERO),
            overtime_hours: Decimal::ZERO,
            overtime_rate: Decimal::ZERO,
            allowances: Vec::new(),
            bonuses: Vec::new(),
            deductions: Vec::new(),
            tax_percentage: company.default_tax_rate.unwrap_or(DEFAULT_TAX_PERCENTAGE),
            payment_date,
        }
    }
}
