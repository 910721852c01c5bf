//! Line item model for named earnings and deductions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a line item adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineItemKind {
    /// Adds to gross pay (allowances and bonuses).
    Earning,
    /// Subtracted from gross pay (insurance, loan repayments, ...).
    Deduction,
}

/// A single named earning or deduction.
///
/// # Example
///
/// ```
/// use payslip_engine::models::{LineItem, LineItemKind};
/// use rust_decimal::Decimal;
///
/// let housing = LineItem::earning("housing", Decimal::from(200));
/// assert_eq!(housing.kind, LineItemKind::Earning);
/// assert_eq!(housing.label, "housing");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The label, taken from the key of the source map.
    pub label: String,
    /// The amount of the item.
    pub amount: Decimal,
    /// Whether the item is an earning or a deduction.
    pub kind: LineItemKind,
}

impl LineItem {
    /// Creates an earning line item.
    pub fn earning(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
            kind: LineItemKind::Earning,
        }
    }

    /// Creates a deduction line item.
    pub fn deduction(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
            kind: LineItemKind::Deduction,
        }
    }
}

/// Sums the amounts of a slice of line items, saturating at the decimal range.
pub fn sum_amounts(items: &[LineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |total, item| total.saturating_add(item.amount))
}
