//! Calculation logic for the Payslip Engine.
//!
//! This module contains the blank-field normalization applied to raw payslip
//! records, the totals calculation, and caller-side input checks.

mod checks;
mod normalization;
mod totals;

pub use checks::{
    MAX_PLAUSIBLE_AMOUNT, NEGATIVE_AMOUNT, STORED_TOTALS_MISMATCH, TAX_OUT_OF_RANGE,
    VALUE_OUT_OF_RANGE, check_input, check_stored_totals,
};
pub use normalization::{DEFAULT_TAX_PERCENTAGE, coerce_amount, to_line_items};
pub use totals::compute_totals;
