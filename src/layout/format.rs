//! Locale-agnostic number formatting for document text.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of minor-unit digits for an ISO 4217 currency code.
///
/// # Examples
///
/// ```
/// use payslip_engine::layout::currency_decimal_places;
///
/// assert_eq!(currency_decimal_places("USD"), 2);
/// assert_eq!(currency_decimal_places("jpy"), 0);
/// assert_eq!(currency_decimal_places("KWD"), 3);
/// ```
pub fn currency_decimal_places(currency: &str) -> u32 {
    match currency.trim().to_ascii_uppercase().as_str() {
        "JPY" | "KRW" | "VND" | "CLP" | "ISK" | "UGX" | "XAF" | "XOF" => 0,
        "BHD" | "KWD" | "OMR" | "JOD" | "TND" | "LYD" | "IQD" => 3,
        _ => 2,
    }
}

/// Formats an amount with grouped thousands and a fixed number of decimals.
///
/// Rounds half away from zero. Negative amounts get a leading `-`; an amount
/// that rounds to zero never does.
///
/// # Examples
///
/// ```
/// use payslip_engine::layout::format_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_amount(Decimal::new(123456789, 2), 2), "1,234,567.89");
/// assert_eq!(format_amount(Decimal::new(-5, 1), 0), "-1");
/// ```
pub fn format_amount(amount: Decimal, decimal_places: u32) -> String {
    let rounded =
        amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.*}", decimal_places as usize, rounded.abs());
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < Decimal::ZERO && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Formats an amount with an optional currency label, e.g. `USD 1,250.00`.
pub fn format_money(amount: Decimal, decimal_places: u32, label: Option<&str>) -> String {
    let formatted = format_amount(amount, decimal_places);
    match label {
        None => formatted,
        Some(label) => match formatted.strip_prefix('-') {
            Some(positive) => format!("-{label} {positive}"),
            None => format!("{label} {formatted}"),
        },
    }
}

/// Formats a percentage without trailing zeros, e.g. `12.5%`.
pub fn format_percentage(percentage: Decimal) -> String {
    format!("{}%", percentage.normalize())
}

fn group_thousands(integer: &str) -> String {
    let len = integer.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, ch) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
