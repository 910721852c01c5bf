//! Payslip Computation & Document Rendering Engine
//!
//! This crate turns a stored payroll record into a payslip: it normalises the
//! raw form values, computes gross pay, tax, deductions and net pay, encodes a
//! verification code that links back to the stored record, lays the page out
//! and serializes it to PDF.
//!
//! The entry point for whole documents is [`pipeline::PayslipGenerator`]; the
//! [`api`] module exposes the same operations over HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod pipeline;
pub mod render;
pub mod verification;
