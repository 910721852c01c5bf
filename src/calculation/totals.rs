//! Payroll totals calculation.
//!
//! This module turns a normalized [`PayrollInput`] into [`PayrollTotals`].

use rust_decimal::Decimal;

use crate::models::{PayrollInput, PayrollTotals, sum_amounts};

/// Computes gross pay, tax, total deductions and net pay.
///
/// The function is pure and cheap: callers recompute after every change to
/// the input instead of patching totals incrementally. No rounding is
/// applied; presentation rounds later.
///
/// The formulas, in order:
///
/// ```text
/// overtime_pay     = overtime_hours * overtime_rate
/// gross_pay        = basic_salary + overtime_pay + sum(allowances) + sum(bonuses)
/// tax_amount       = gross_pay * (tax_percentage / 100)
/// total_deductions = sum(deductions) + tax_amount
/// net_pay          = gross_pay - total_deductions
/// ```
///
/// Negative amounts and tax rates outside 0-100 are accepted as given; see
/// [`check_input`](crate::calculation::check_input) for caller-side checks.
///
/// Every step saturates at [`Decimal::MAX`] / [`Decimal::MIN`], so the
/// function never panics. Inputs large enough to saturate are reported as
/// [`VALUE_OUT_OF_RANGE`](crate::calculation::VALUE_OUT_OF_RANGE) by the checks.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::compute_totals;
/// use payslip_engine::models::{LineItem, PayrollInput};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = PayrollInput {
///     basic_salary: Decimal::from(1000),
///     overtime_hours: Decimal::from(10),
///     overtime_rate: Decimal::from(5),
///     allowances: vec![LineItem::earning("housing", Decimal::from(200))],
///     bonuses: vec![],
///     deductions: vec![LineItem::deduction("insurance", Decimal::from(50))],
///     tax_percentage: Decimal::from(10),
///     payment_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
/// };
///
/// let totals = compute_totals(&input);
/// assert_eq!(totals.overtime_pay, Decimal::from(50));
/// assert_eq!(totals.gross_pay, Decimal::from(1250));
/// assert_eq!(totals.tax_amount, Decimal::from(125));
/// assert_eq!(totals.total_deductions, Decimal::from(175));
/// assert_eq!(totals.net_pay, Decimal::from(1075));
/// ```
pub fn compute_totals(input: &PayrollInput) -> PayrollTotals {
    let overtime_pay = input.overtime_hours.saturating_mul(input.overtime_rate);
    let gross_pay = input
        .basic_salary
        .saturating_add(overtime_pay)
        .saturating_add(sum_amounts(&input.allowances))
        .saturating_add(sum_amounts(&input.bonuses));
    let tax_amount = gross_pay.saturating_mul(input.tax_percentage / Decimal::ONE_HUNDRED);
    let total_deductions = sum_amounts(&input.deductions).saturating_add(tax_amount);
    let net_pay = gross_pay.saturating_sub(total_deductions);

    PayrollTotals {
        overtime_pay,
        gross_pay,
        tax_amount,
        total_deductions,
        net_pay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineItem;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_input(basic: &str, tax: &str) -> PayrollInput {
        PayrollInput {
            basic_salary: dec(basic),
            overtime_hours: Decimal::ZERO,
            overtime_rate: Decimal::ZERO,
            allowances: vec![],
            bonuses: vec![],
            deductions: vec![],
            tax_percentage: dec(tax),
            payment_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        }
    }

    #[test]
    fn test_basic_salary_only_without_tax() {
        let totals = compute_totals(&create_input("2000", "0"));
        assert_eq!(totals.gross_pay, dec("2000"));
        assert_eq!(totals.tax_amount, Decimal::ZERO);
        assert_eq!(totals.total_deductions, Decimal::ZERO);
        assert_eq!(totals.net_pay, dec("2000"));
    }

    #[test]
    fn test_overtime_is_hours_times_rate() {
        let mut input = create_input("0", "0");
        input.overtime_hours = dec("7.5");
        input.overtime_rate = dec("22.40");
        let totals = compute_totals(&input);
        assert_eq!(totals.overtime_pay, dec("168.00"));
        assert_eq!(totals.gross_pay, dec("168.00"));
    }

    #[test]
    fn test_bonuses_count_towards_gross() {
        let mut input = create_input("1000", "0");
        input.bonuses = vec![LineItem::earning("performance", dec("300"))];
        assert_eq!(compute_totals(&input).gross_pay, dec("1300"));
    }

    #[test]
    fn test_tax_is_applied_to_gross_not_basic() {
        let mut input = create_input("1000", "20");
        input.allowances = vec![LineItem::earning("transport", dec("500"))];
        let totals = compute_totals(&input);
        assert_eq!(totals.tax_amount, dec("300"));
        assert_eq!(totals.net_pay, dec("1200"));
    }

    #[test]
    fn test_fractional_tax_is_not_rounded() {
        let totals = compute_totals(&create_input("1234.56", "12.5"));
        assert_eq!(totals.tax_amount, dec("154.32"));
        let totals = compute_totals(&create_input("100.01", "33"));
        assert_eq!(totals.tax_amount, dec("33.0033"));
    }

    #[test]
    fn test_repeated_cents_do_not_drift() {
        let mut input = create_input("0", "0");
        input.allowances = (0..1000)
            .map(|i| LineItem::earning(format!("a{i}"), dec("0.01")))
            .collect();
        assert_eq!(compute_totals(&input).gross_pay, dec("10.00"));
    }

    #[test]
    fn test_negative_amounts_are_not_rejected() {
        let mut input = create_input("1000", "0");
        input.deductions = vec![LineItem::deduction("refund", dec("-50"))];
        let totals = compute_totals(&input);
        assert_eq!(totals.total_deductions, dec("-50"));
        assert_eq!(totals.net_pay, dec("1050"));
    }

    #[test]
    fn test_tax_above_one_hundred_is_not_clamped() {
        let totals = compute_totals(&create_input("1000", "150"));
        assert_eq!(totals.tax_amount, dec("1500"));
        assert_eq!(totals.net_pay, dec("-500"));
    }

    #[test]
    fn test_huge_overtime_saturates_instead_of_panicking() {
        let mut input = create_input("0", "12.5");
        input.overtime_hours = dec("100000000000000000000");
        input.overtime_rate = dec("100000000000000000000");
        let totals = compute_totals(&input);
        assert_eq!(totals.overtime_pay, Decimal::MAX);
        assert_eq!(totals.gross_pay, Decimal::MAX);
        assert_eq!(totals.tax_amount, Decimal::MAX * dec("0.125"));
        assert_eq!(totals.net_pay, Decimal::MAX - totals.tax_amount);
    }

    #[test]
    fn test_tax_rate_is_scaled_before_multiplying() {
        // gross * pct alone would exceed the decimal range here.
        let totals = compute_totals(&create_input("100000000000000000000", "10000000000"));
        assert_eq!(totals.tax_amount, dec("10000000000000000000000000000"));
        assert_eq!(
            totals.net_pay,
            dec("100000000000000000000") - dec("10000000000000000000000000000")
        );
    }

    #[test]
    fn test_huge_salary_with_huge_tax_saturates() {
        let totals = compute_totals(&create_input("100000000000000000000", "1000000000000"));
        assert_eq!(totals.tax_amount, Decimal::MAX);
        assert_eq!(totals.total_deductions, Decimal::MAX);
        assert_eq!(totals.net_pay, dec("100000000000000000000") - Decimal::MAX);
    }

    #[test]
    fn test_extreme_negative_values_saturate() {
        let mut input = create_input("0", "0");
        input.overtime_hours = Decimal::MIN;
        input.overtime_rate = dec("2");
        input.deductions = vec![
            LineItem::deduction("a", Decimal::MAX),
            LineItem::deduction("b", Decimal::MAX),
        ];
        let totals = compute_totals(&input);
        assert_eq!(totals.gross_pay, Decimal::MIN);
        assert_eq!(totals.total_deductions, Decimal::MAX);
        assert_eq!(totals.net_pay, Decimal::MIN);
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let mut input = create_input("4321.09", "17.25");
        input.deductions = vec![LineItem::deduction("loan", dec("99.99"))];
        assert_eq!(compute_totals(&input), compute_totals(&input));
    }

    #[test]
    fn test_net_pay_identity_holds() {
        let mut input = create_input("5000", "30");
        input.overtime_hours = dec("3");
        input.overtime_rate = dec("41.5");
        input.deductions = vec![
            LineItem::deduction("insurance", dec("120")),
            LineItem::deduction("loan", dec("250")),
        ];
        let totals = compute_totals(&input);
        assert_eq!(totals.net_pay, totals.gross_pay - totals.total_deductions);
        assert_eq!(
            totals.total_deductions,
            dec("370") + totals.gross_pay * dec("30") / dec("100")
        );
    }
}
