//! Configuration loading for the payslip engine.
//!
//! Rendering is configured by a single YAML file: the viewer origin that
//! verification codes point at, the verification code options, and the fixed
//! document text.
//!
//! # Example
//!
//! ```no_run
//! use payslip_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payslip.yaml").unwrap().into_config();
//! println!("Document title: {}", config.document.title);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DocumentText, RenderConfig};
