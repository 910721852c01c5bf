//! Configuration types for payslip rendering.
//!
//! Every field has a default, so a partial YAML file (or none at all) yields a
//! usable configuration.

use serde::{Deserialize, Serialize};

use crate::verification::EncodeOptions;

/// Fixed text printed on every payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentText {
    /// Heading below the company header, also used as the document title.
    pub title: String,
    /// First footer line.
    pub footer_disclaimer: String,
    /// Last footer line.
    pub attribution: String,
    /// Prefix amounts with the company's currency code (e.g. `USD 1,250.00`).
    pub show_currency_code: bool,
}

impl Default for DocumentText {
    fn default() -> Self {
        Self {
            title: "PAYSLIP".to_string(),
            footer_disclaimer: "This is a computer-generated payslip and does not require a signature."
                .to_string(),
            attribution: "Generated by Payslip Engine".to_string(),
            show_currency_code: false,
        }
    }
}

/// Top-level rendering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Origin of the payslip viewer that verification codes point at.
    pub base_origin: String,
    /// Verification code encoding options.
    pub verification: EncodeOptions,
    /// Fixed document text.
    pub document: DocumentText,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_origin: "http://localhost:3000".to_string(),
            verification: EncodeOptions::default(),
            document: DocumentText::default(),
        }
    }
}
