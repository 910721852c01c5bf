//! Property tests for the payroll calculator.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use payslip_engine::calculation::compute_totals;
use payslip_engine::models::{LineItem, PayrollInput, PayslipRecord, sum_amounts};

fn money() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn signed_money() -> impl Strategy<Value = Decimal> {
    (-10_000_000i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn percentage() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|hundredths| Decimal::new(hundredths, 2))
}

fn line_items(earning: bool) -> impl Strategy<Value = Vec<LineItem>> {
    prop::collection::vec(signed_money(), 0..8).prop_map(move |amounts| {
        amounts
            .into_iter()
            .enumerate()
            .map(|(index, amount)| {
                let label = format!("item{index}");
                if earning {
                    LineItem::earning(label, amount)
                } else {
                    LineItem::deduction(label, amount)
                }
            })
            .collect()
    })
}

prop_compose! {
    fn payroll_input()(
        basic_salary in money(),
        overtime_hours in (0i64..20_000).prop_map(|h| Decimal::new(h, 2)),
        overtime_rate in money(),
        allowances in line_items(true),
        bonuses in line_items(true),
        deductions in line_items(false),
        tax_percentage in percentage(),
    ) -> PayrollInput {
        PayrollInput {
            basic_salary,
            overtime_hours,
            overtime_rate,
            allowances,
            bonuses,
            deductions,
            tax_percentage,
            payment_date: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        }
    }
}

fn record_with(field: &str, value: Value) -> PayslipRecord {
    let mut json = json!({
        "id": "8c1f5a52-7e8e-4a53-9a3c-2f1e0d9b6a11",
        "basic_salary": "1500",
        "overtime_hours": "3",
        "overtime_rate": "20",
        "tax_percentage": "12.5",
        "payment_date": "2025-01-31",
        "employee": {
            "employee_id": "EMP-001",
            "name": "Ada Obi",
            "email": "ada@example.com",
            "department": "Finance",
            "designation": "Analyst"
        }
    });
    json[field] = value;
    serde_json::from_value(json).unwrap()
}

proptest! {
    #[test]
    fn net_pay_is_gross_minus_deductions(input in payroll_input()) {
        let totals = compute_totals(&input);

        prop_assert_eq!(totals.net_pay, totals.gross_pay - totals.total_deductions);
        prop_assert_eq!(
            totals.total_deductions,
            sum_amounts(&input.deductions)
                + totals.gross_pay * (input.tax_percentage / Decimal::ONE_HUNDRED)
        );
        prop_assert_eq!(
            totals.gross_pay,
            input.basic_salary
                + input.overtime_hours * input.overtime_rate
                + sum_amounts(&input.allowances)
                + sum_amounts(&input.bonuses)
        );
    }

    #[test]
    fn computing_twice_is_identical(input in payroll_input()) {
        let first = compute_totals(&input);
        let second = compute_totals(&input);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first.net_pay.serialize(), second.net_pay.serialize());
    }

    #[test]
    fn line_item_order_does_not_change_totals(input in payroll_input()) {
        let mut reversed = input.clone();
        reversed.allowances.reverse();
        reversed.bonuses.reverse();
        reversed.deductions.reverse();

        prop_assert_eq!(compute_totals(&input), compute_totals(&reversed));
    }

    #[test]
    fn blank_field_behaves_like_zero(
        field in prop::sample::select(vec![
            "basic_salary",
            "overtime_hours",
            "overtime_rate",
            "tax_percentage",
        ]),
        blank in prop::sample::select(vec!["", " ", "\t"]),
    ) {
        let from_blank = PayrollInput::from_record(&record_with(field, json!(blank)));
        let from_null = PayrollInput::from_record(&record_with(field, Value::Null));
        let from_zero = PayrollInput::from_record(&record_with(field, json!(0)));

        prop_assert_eq!(compute_totals(&from_blank), compute_totals(&from_zero));
        prop_assert_eq!(compute_totals(&from_null), compute_totals(&from_zero));
    }
}
