//! Employee and company metadata consumed by the document layout.
//!
//! Both records are owned by the external record store; the engine only
//! reads them.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Identity, contact and banking details of an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeInfo {
    /// The employer-assigned employee identifier (e.g., "EMP-0042").
    pub employee_id: String,
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Optional contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Department the employee belongs to.
    pub department: String,
    /// Job title.
    pub designation: String,
    /// Name of the bank salary is paid into.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Bank account number.
    #[serde(default)]
    pub bank_account: Option<String>,
    /// Tax identification number.
    #[serde(default)]
    pub tax_number: Option<String>,
    /// The employee's standing basic salary, used to prefill payroll input.
    #[serde(default)]
    pub basic_salary: Option<Decimal>,
}

impl EmployeeInfo {
    /// Returns the banking and tax lines that have a value, in display order.
    ///
    /// Absent or blank fields are omitted entirely.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::EmployeeInfo;
    ///
    /// let employee = EmployeeInfo {
    ///     employee_id: "EMP-001".to_string(),
    ///     name: "Ada Obi".to_string(),
    ///     email: "ada@example.com".to_string(),
    ///     phone: None,
    ///     department: "Finance".to_string(),
    ///     designation: "Analyst".to_string(),
    ///     bank_name: None,
    ///     bank_account: Some("0123456789".to_string()),
    ///     tax_number: Some("".to_string()),
    ///     basic_salary: None,
    /// };
    /// assert_eq!(employee.banking_lines(), vec!["Account: 0123456789".to_string()]);
    /// ```
    pub fn banking_lines(&self) -> Vec<String> {
        [
            ("Bank", &self.bank_name),
            ("Account", &self.bank_account),
            ("Tax Number", &self.tax_number),
        ]
        .into_iter()
        .filter_map(|(label, value)| present(value).map(|v| format!("{label}: {v}")))
        .collect()
    }

    /// Returns the identity and contact lines, in display order.
    pub fn identity_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Name: {}", self.name),
            format!("Employee ID: {}", self.employee_id),
            format!("Department: {}", self.department),
            format!("Designation: {}", self.designation),
            format!("Email: {}", self.email),
        ];
        if let Some(phone) = present(&self.phone) {
            lines.push(format!("Phone: {phone}"));
        }
        lines
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Company details shown in the document header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    /// Registered company name.
    pub company_name: String,
    /// Postal address, printed under the name.
    pub company_address: String,
    /// ISO 4217 currency code salaries are paid in.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Tax rate used to prefill new payroll input, in percent.
    #[serde(default)]
    pub default_tax_rate: Option<Decimal>,
    /// Location of the company logo. Only inline `data:image/png;base64,`
    /// URLs are drawn; the engine never fetches remote images.
    #[serde(default)]
    pub company_logo_url: Option<String>,
}

impl CompanyInfo {
    /// Decodes the logo if it is an inline PNG data URL.
    ///
    /// Returns `None` when there is no logo, when it points elsewhere, or when
    /// the base64 payload is invalid. The PNG itself is decoded later, when
    /// the document is serialized.
    ///
    /// # Example
    ///
    /// ```
    /// use payslip_engine::models::CompanyInfo;
    ///
    /// let mut company: CompanyInfo =
    ///     serde_json::from_str(r#"{"company_name": "Acme", "company_address": "1 Main St"}"#)
    ///         .unwrap();
    /// assert_eq!(company.inline_logo_png(), None);
    ///
    /// company.company_logo_url = Some("data:image/png;base64,iVBORw==".to_string());
    /// assert_eq!(company.inline_logo_png(), Some(vec![0x89, b'P', b'N', b'G']));
    /// ```
    pub fn inline_logo_png(&self) -> Option<Vec<u8>> {
        let url = self.company_logo_url.as_deref()?.trim();
        let payload = url.strip_prefix(PNG_DATA_URL_PREFIX)?;
        STANDARD.decode(payload).ok().filter(|bytes| !bytes.is_empty())
    }
}

fn default_currency() -> String {
    "USD".to_string()
}
