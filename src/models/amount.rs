//! Monetary amounts and their raw, possibly-blank input form.
//!
//! Payroll figures arrive from data-entry forms where any field may be left
//! empty. This module defines [`RawAmount`] for that untrusted shape and
//! [`NamedAmounts`] for the ordered allowance/bonus/deduction maps.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A monetary quantity.
///
/// Decimal arithmetic is exact at the cent level, so sums over any number of
/// amounts do not depend on iteration order.
pub type MoneyAmount = Decimal;

/// A numeric field as supplied by the caller.
///
/// Accepts JSON numbers and strings. Strings may be blank or not numeric at
/// all; see [`RawAmount::parse`] for how those are interpreted. A JSON number
/// outside the decimal range is kept as text, so it parses exactly like the
/// same value written as a string.
///
/// # Example
///
/// ```
/// use payslip_engine::models::RawAmount;
/// use rust_decimal::Decimal;
///
/// let typed: RawAmount = serde_json::from_str("12.5").unwrap();
/// let text: RawAmount = serde_json::from_str("\" 1200 \"").unwrap();
/// let blank: RawAmount = serde_json::from_str("\"\"").unwrap();
///
/// assert_eq!(typed.parse(), Some(Decimal::new(125, 1)));
/// assert_eq!(text.parse(), Some(Decimal::from(1200)));
/// assert!(blank.is_blank());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A value that was already numeric.
    Number(Decimal),
    /// Free text, typically straight from a form input.
    Text(String),
}

impl RawAmount {
    /// Returns true if the value is an empty or whitespace-only string.
    pub fn is_blank(&self) -> bool {
        matches!(self, RawAmount::Text(text) if text.trim().is_empty())
    }

    /// Parses the value as a decimal.
    ///
    /// Returns `None` for blank text and for text that is not a finite number.
    /// Well-formed numbers beyond the decimal range saturate to
    /// [`Decimal::MAX`] or [`Decimal::MIN`]; digits below its precision are
    /// rounded away.
    pub fn parse(&self) -> Option<Decimal> {
        match self {
            RawAmount::Number(value) => Some(*value),
            RawAmount::Text(text) => parse_text(text),
        }
    }
}

fn parse_text(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        return Some(value);
    }

    let float = f64::from_str(trimmed).ok().filter(|f| f.is_finite())?;
    Some(Decimal::from_f64(float).unwrap_or(if float >= 1.0 {
        Decimal::MAX
    } else if float <= -1.0 {
        Decimal::MIN
    } else {
        Decimal::ZERO
    }))
}

struct RawAmountVisitor;

impl<'de> Visitor<'de> for RawAmountVisitor {
    type Value = RawAmount;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number or a string")
    }

    fn visit_i64<E: serde::de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(RawAmount::Number(Decimal::from(value)))
    }

    fn visit_u64<E: serde::de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(RawAmount::Number(Decimal::from(value)))
    }

    fn visit_f64<E: serde::de::Error>(self, value: f64) -> Result<Self::Value, E> {
        let text = value.to_string();
        Ok(match Decimal::from_str(&text) {
            Ok(decimal) => RawAmount::Number(decimal),
            Err(_) => RawAmount::Text(text),
        })
    }

    fn visit_str<E: serde::de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(RawAmount::Text(value.to_string()))
    }

    fn visit_string<E: serde::de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(RawAmount::Text(value))
    }
}

impl<'de> Deserialize<'de> for RawAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(RawAmountVisitor)
    }
}

impl From<Decimal> for RawAmount {
    fn from(value: Decimal) -> Self {
        RawAmount::Number(value)
    }
}

impl From<i32> for RawAmount {
    fn from(value: i32) -> Self {
        RawAmount::Number(Decimal::from(value))
    }
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        RawAmount::Number(Decimal::from(value))
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        RawAmount::Text(value.to_string())
    }
}

/// An ordered list of named amounts, e.g. `{"housing": 200, "transport": 50}`.
///
/// Deserializes from a JSON object and keeps the keys in document order, which
/// later drives the row order of the rendered breakdown table. A `null` value
/// is kept as `None`.
///
/// # Example
///
/// ```
/// use payslip_engine::models::NamedAmounts;
///
/// let amounts: NamedAmounts =
///     serde_json::from_str(r#"{"transport": 50, "housing": "200", "medical": ""}"#).unwrap();
/// let labels: Vec<&str> = amounts.iter().map(|(label, _)| label).collect();
/// assert_eq!(labels, vec!["transport", "housing", "medical"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedAmounts(Vec<(String, Option<RawAmount>)>);

impl NamedAmounts {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry, keeping insertion order.
    pub fn push(&mut self, label: impl Into<String>, amount: impl Into<RawAmount>) {
        self.0.push((label.into(), Some(amount.into())));
    }

    /// Builder-style variant of [`NamedAmounts::push`].
    pub fn with(mut self, label: impl Into<String>, amount: impl Into<RawAmount>) -> Self {
        self.push(label, amount);
        self
    }

    /// Iterates over `(label, raw value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&RawAmount>)> {
        self.0
            .iter()
            .map(|(label, amount)| (label.as_str(), amount.as_ref()))
    }

    /// Number of entries, blank ones included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, RawAmount)> for NamedAmounts {
    fn from_iter<I: IntoIterator<Item = (S, RawAmount)>>(iter: I) -> Self {
        NamedAmounts(
            iter.into_iter()
                .map(|(label, amount)| (label.into(), Some(amount)))
                .collect(),
        )
    }
}

impl Serialize for NamedAmounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, amount) in &self.0 {
            map.serialize_entry(label, amount)?;
        }
        map.end()
    }
}

struct NamedAmountsVisitor;

impl<'de> Visitor<'de> for NamedAmountsVisitor {
    type Value = NamedAmounts;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of labels to amounts")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((label, amount)) = access.next_entry::<String, Option<RawAmount>>()? {
            entries.push((label, amount));
        }
        Ok(NamedAmounts(entries))
    }

    fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
        Ok(NamedAmounts::default())
    }
}

impl<'de> Deserialize<'de> for NamedAmounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NamedAmountsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_number_parses_to_itself() {
        assert_eq!(RawAmount::from(dec("1000.50")).parse(), Some(dec("1000.50")));
    }

    #[test]
    fn test_numeric_text_is_trimmed_and_parsed() {
        assert_eq!(RawAmount::from("  42.10 ").parse(), Some(dec("42.10")));
    }

    #[test]
    fn test_scientific_text_is_parsed() {
        assert_eq!(RawAmount::from("1e3").parse(), Some(dec("1000")));
    }

    #[test]
    fn test_blank_text_parses_to_none() {
        let raw = RawAmount::from("   ");
        assert!(raw.is_blank());
        assert_eq!(raw.parse(), None);
    }

    #[test]
    fn test_garbage_text_parses_to_none_but_is_not_blank() {
        let raw = RawAmount::from("12,O0");
        assert!(!raw.is_blank());
        assert_eq!(raw.parse(), None);
    }

    #[test]
    fn test_deserialize_json_number() {
        let raw: RawAmount = serde_json::from_str("250").unwrap();
        assert_eq!(raw.parse(), Some(dec("250")));
    }

    #[test]
    fn test_deserialize_json_fraction() {
        let raw: RawAmount = serde_json::from_str("0.1").unwrap();
        assert_eq!(raw.parse(), Some(dec("0.1")));
    }

    #[test]
    fn test_deserialize_non_numeric_string_falls_back_to_text() {
        let raw: RawAmount = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(raw, RawAmount::Text("abc".to_string()));
    }

    #[test]
    fn test_oversized_text_saturates() {
        assert_eq!(RawAmount::from("1e30").parse(), Some(Decimal::MAX));
        assert_eq!(RawAmount::from("-1e30").parse(), Some(Decimal::MIN));
        assert_eq!(
            RawAmount::from("123456789012345678901234567890123").parse(),
            Some(Decimal::MAX)
        );
    }

    #[test]
    fn test_non_finite_text_parses_to_none() {
        assert_eq!(RawAmount::from("inf").parse(), None);
        assert_eq!(RawAmount::from("NaN").parse(), None);
    }

    #[test]
    fn test_oversized_json_number_matches_oversized_string() {
        let number: RawAmount = serde_json::from_str("1e30").unwrap();
        let text: RawAmount = serde_json::from_str("\"1e30\"").unwrap();
        assert_eq!(number.parse(), Some(Decimal::MAX));
        assert_eq!(number.parse(), text.parse());

        let negative: RawAmount = serde_json::from_str("-1e30").unwrap();
        assert_eq!(negative.parse(), Some(Decimal::MIN));
    }

    #[test]
    fn test_deserialize_rejects_booleans() {
        assert!(serde_json::from_str::<RawAmount>("true").is_err());
    }

    #[test]
    fn test_named_amounts_preserve_key_order() {
        let json = r#"{"zeta": 1, "alpha": 2, "mid": 3}"#;
        let amounts: NamedAmounts = serde_json::from_str(json).unwrap();
        let labels: Vec<&str> = amounts.iter().map(|(label, _)| label).collect();
        assert_eq!(labels, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_named_amounts_keep_null_values_as_none() {
        let json = r#"{"loan": null}"#;
        let amounts: NamedAmounts = serde_json::from_str(json).unwrap();
        let entries: Vec<_> = amounts.iter().collect();
        assert_eq!(entries, vec![("loan", None)]);
    }

    #[test]
    fn test_named_amounts_null_map_is_empty() {
        let amounts: NamedAmounts = serde_json::from_str("null").unwrap();
        assert!(amounts.is_empty());
    }

    #[test]
    fn test_named_amounts_serialize_in_order() {
        let amounts = NamedAmounts::new().with("b", 2).with("a", 1);
        let json = serde_json::to_string(&amounts).unwrap();
        assert!(json.find("\"b\"").unwrap() < json.find("\"a\"").unwrap());
    }
}
