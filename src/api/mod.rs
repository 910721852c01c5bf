//! HTTP API module for the Payslip Engine.
//!
//! This module provides the REST endpoints for recomputing payslip totals
//! and downloading rendered payslip documents.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::RenderRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
