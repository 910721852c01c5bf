//! Caller-side checks on payroll input.
//!
//! The calculator accepts every numeric value as given. These checks let the
//! surrounding layer flag suspicious input without changing the totals.

use rust_decimal::Decimal;

use crate::models::{InputWarning, LineItem, PayrollInput, PayrollTotals, PayslipRecord};

/// Warning code for a negative monetary or hour value.
pub const NEGATIVE_AMOUNT: &str = "NEGATIVE_AMOUNT";

/// Warning code for a tax rate outside 0-100 percent.
pub const TAX_OUT_OF_RANGE: &str = "TAX_OUT_OF_RANGE";

/// Warning code for stored totals that disagree with the recomputed ones.
pub const STORED_TOTALS_MISMATCH: &str = "STORED_TOTALS_MISMATCH";

/// Warning code for an amount too large to be a real payroll figure.
pub const VALUE_OUT_OF_RANGE: &str = "VALUE_OUT_OF_RANGE";

/// Largest magnitude accepted without a [`VALUE_OUT_OF_RANGE`] warning (10^15).
///
/// Values above this are still used as given; once squared or summed they can
/// reach the decimal range, where the calculator saturates.
pub const MAX_PLAUSIBLE_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest difference between stored and recomputed totals treated as rounding.
const STORED_TOTALS_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Reports negative amounts, implausibly large amounts and out-of-range tax
/// rates.
///
/// # Example
///
/// ```
/// use payslip_engine::calculation::{check_input, TAX_OUT_OF_RANGE};
/// use payslip_engine::models::PayrollInput;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     basic_salary: Decimal::from(1000),
///     overtime_hours: Decimal::ZERO,
///     overtime_rate: Decimal::ZERO,
///     allowances: vec![],
///     bonuses: vec![],
///     deductions: vec![],
///     tax_percentage: Decimal::from(120),
///     payment_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
/// };
///
/// let warnings = check_input(&input);
/// assert_eq!(warnings.len(), 1);
/// assert_eq!(warnings[0].code, TAX_OUT_OF_RANGE);
/// ```
pub fn check_input(input: &PayrollInput) -> Vec<InputWarning> {
    let mut warnings = Vec::new();

    let scalars = [
        ("basic_salary", input.basic_salary),
        ("overtime_hours", input.overtime_hours),
        ("overtime_rate", input.overtime_rate),
    ];
    for (field, value) in scalars {
        check_amount(&mut warnings, field, value);
    }

    let groups: [(&str, &[LineItem]); 3] = [
        ("allowances", &input.allowances),
        ("bonuses", &input.bonuses),
        ("deductions", &input.deductions),
    ];
    for (group, items) in groups {
        for item in items {
            check_amount(&mut warnings, &format!("{group}.{}", item.label), item.amount);
        }
    }

    if input.tax_percentage < Decimal::ZERO || input.tax_percentage > Decimal::ONE_HUNDRED {
        warnings.push(InputWarning {
            code: TAX_OUT_OF_RANGE.to_string(),
            message: format!(
                "Tax percentage {}% is outside 0-100%",
                input.tax_percentage.normalize()
            ),
            severity: "high".to_string(),
        });
    }

    warnings
}

/// Compares totals saved with a record against freshly computed ones.
///
/// Records written by older clients may carry totals that were rounded or
/// computed differently; differences of at most one cent are ignored. The
/// recomputed totals always win, this only reports the disagreement.
pub fn check_stored_totals(record: &PayslipRecord, computed: &PayrollTotals) -> Vec<InputWarning> {
    let stored = [
        ("gross_pay", record.gross_pay, computed.gross_pay),
        ("total_deductions", record.total_deductions, computed.total_deductions),
        ("net_pay", record.net_pay, computed.net_pay),
    ];

    stored
        .into_iter()
        .filter_map(|(field, stored, computed)| {
            let stored = stored?;
            let differs = stored
                .checked_sub(computed)
                .is_none_or(|difference| difference.abs() > STORED_TOTALS_TOLERANCE);
            differs.then(|| InputWarning {
                code: STORED_TOTALS_MISMATCH.to_string(),
                message: format!(
                    "Stored {} {} differs from recomputed {}",
                    field,
                    stored.normalize(),
                    computed.normalize()
                ),
                severity: "low".to_string(),
            })
        })
        .collect()
}

fn check_amount(warnings: &mut Vec<InputWarning>, field: &str, value: Decimal) {
    if value < Decimal::ZERO {
        warnings.push(InputWarning {
            code: NEGATIVE_AMOUNT.to_string(),
            message: format!("'{}' is negative: {}", field, value.normalize()),
            severity: "medium".to_string(),
        });
    }
    if value.abs() > MAX_PLAUSIBLE_AMOUNT {
        warnings.push(InputWarning {
            code: VALUE_OUT_OF_RANGE.to_string(),
            message: format!(
                "'{}' is {} which exceeds {}",
                field,
                value.normalize(),
                MAX_PLAUSIBLE_AMOUNT
            ),
            severity: "high".to_string(),
        });
    }
}
