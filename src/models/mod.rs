//! Core data models for the Payslip Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod amount;
mod employee;
mod line_item;
mod payroll;

pub use amount::{MoneyAmount, NamedAmounts, RawAmount};
pub use employee::{CompanyInfo, EmployeeInfo};
pub use line_item::{LineItem, LineItemKind, sum_amounts};
pub use payroll::{InputWarning, PayrollInput, PayrollTotals, PayslipRecord};
