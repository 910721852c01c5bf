//! End-to-end payslip generation.
//!
//! [`PayslipGenerator`] runs the full chain for one stored payslip record:
//! normalisation, totals, verification code, layout and serialization.
//! Generation is synchronous and self-contained, so any number of documents
//! can be produced concurrently from a shared generator.

use std::time::Instant;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::calculation::{check_input, check_stored_totals, compute_totals};
use crate::config::RenderConfig;
use crate::error::EngineResult;
use crate::layout::{PayslipContent, layout_payslip};
use crate::models::{CompanyInfo, InputWarning, PayrollInput, PayrollTotals, PayslipRecord};
use crate::render::{RenderedDocument, serialize};
use crate::verification::{encode, verification_url};

/// Normalised input, its totals and any warnings raised along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollComputation {
    /// The normalised payroll input.
    pub input: PayrollInput,
    /// Totals computed from `input`.
    pub totals: PayrollTotals,
    /// Boundary and stored-total warnings; they never change `totals`.
    pub warnings: Vec<InputWarning>,
}

/// Generates payslip documents from stored records.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use payslip_engine::config::RenderConfig;
/// use payslip_engine::models::{CompanyInfo, PayslipRecord};
/// use payslip_engine::pipeline::PayslipGenerator;
///
/// let record: PayslipRecord = serde_json::from_value(serde_json::json!({
///     "id": "8c1f5a52-7e8e-4a53-9a3c-2f1e0d9b6a11",
///     "basic_salary": "1000",
///     "tax_percentage": 10,
///     "payment_date": "2025-01-31",
///     "employee": {
///         "employee_id": "EMP-001",
///         "name": "Ada Obi",
///         "email": "ada@example.com",
///         "department": "Finance",
///         "designation": "Analyst"
///     }
/// }))
/// .unwrap();
/// let company = CompanyInfo {
///     company_name: "Acme Ltd".to_string(),
///     company_address: "1 Main Street".to_string(),
///     currency: "USD".to_string(),
///     default_tax_rate: None,
///     company_logo_url: None,
/// };
///
/// let generator = PayslipGenerator::new(RenderConfig::default());
/// let generated_at = Utc.with_ymd_and_hms(2025, 1, 31, 9, 0, 0).unwrap();
/// let document = generator.generate_document_at(&record, &company, generated_at).unwrap();
/// assert!(document.as_bytes().starts_with(b"%PDF"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PayslipGenerator {
    config: RenderConfig,
}

impl PayslipGenerator {
    /// Creates a generator with the given configuration.
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Returns the rendering configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Normalises a record and computes its totals.
    ///
    /// Warnings are logged and returned; they never block the computation.
    pub fn compute(&self, record: &PayslipRecord) -> PayrollComputation {
        let input = PayrollInput::from_record(record);
        let totals = compute_totals(&input);

        let mut warnings = check_input(&input);
        warnings.extend(check_stored_totals(record, &totals));
        for warning in &warnings {
            warn!(
                payslip_id = %record.id,
                code = %warning.code,
                severity = %warning.severity,
                "{}",
                warning.message
            );
        }

        PayrollComputation {
            input,
            totals,
            warnings,
        }
    }

    /// Generates the PDF document for a record, stamped with the current time.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EncodingOverflow`](crate::error::EngineError::EncodingOverflow)
    ///   or `InvalidEncodingOptions` if the verification code cannot be built
    /// - [`EngineError::SerializationError`](crate::error::EngineError::SerializationError)
    ///   if the document cannot be written
    pub fn generate_document(
        &self,
        record: &PayslipRecord,
        company: &CompanyInfo,
    ) -> EngineResult<RenderedDocument> {
        self.generate_document_at(record, company, Utc::now())
    }

    /// Generates the PDF document for a record with an explicit generation time.
    ///
    /// The same record, company, configuration and timestamp always produce
    /// the same bytes.
    pub fn generate_document_at(
        &self,
        record: &PayslipRecord,
        company: &CompanyInfo,
        generated_at: DateTime<Utc>,
    ) -> EngineResult<RenderedDocument> {
        let start_time = Instant::now();
        let computation = self.compute(record);

        let url = verification_url(&self.config.base_origin, &record.id);
        let bitmap = encode(&url, &self.config.verification)?;
        debug!(
            payslip_id = %record.id,
            bitmap_width = bitmap.width(),
            "Built verification code"
        );

        let content = PayslipContent {
            input: &computation.input,
            totals: &computation.totals,
            employee: &record.employee,
            company,
        };
        let layout = layout_payslip(&content, bitmap, &self.config.document, generated_at);
        let document = serialize(&layout)?;

        info!(
            payslip_id = %record.id,
            employee_id = %record.employee.employee_id,
            net_pay = %computation.totals.net_pay,
            warnings = computation.warnings.len(),
            overflows = layout.overflows(),
            bytes = document.len(),
            duration_us = start_time.elapsed().as_micros(),
            "Payslip document generated"
        );

        Ok(document)
    }
}

/// Builds the download file name `payslip-<employee_id>-<payment_date>.<extension>`.
///
/// Characters outside `[A-Za-z0-9._-]` in the employee id are replaced with `_`
/// so the name is safe in a `Content-Disposition` header and on disk.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use payslip_engine::pipeline::payslip_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
/// assert_eq!(payslip_file_name("EMP-001", date, "pdf"), "payslip-EMP-001-2025-01-31.pdf");
/// ```
pub fn payslip_file_name(employee_id: &str, payment_date: NaiveDate, extension: &str) -> String {
    let safe_id: String = employee_id
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "payslip-{}-{}.{}",
        safe_id,
        payment_date.format("%Y-%m-%d"),
        extension
    )
}
