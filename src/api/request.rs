//! Request types for the Payslip Engine API.
//!
//! `POST /payslips/totals` takes a bare [`PayslipRecord`];
//! `POST /payslips/render` takes a [`RenderRequest`].

use serde::{Deserialize, Serialize};

use crate::models::{CompanyInfo, PayslipRecord};

/// Request body for the `/payslips/render` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderRequest {
    /// The stored payslip record to render.
    pub payslip: PayslipRecord,
    /// The company printed in the document header.
    pub company: CompanyInfo,
}
