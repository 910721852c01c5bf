//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for reading a
//! [`RenderConfig`] from a YAML file.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::RenderConfig;

/// Loads rendering configuration from disk.
///
/// # Example
///
/// ```no_run
/// use payslip_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payslip.yaml")?;
/// println!("Verification codes point at {}", loader.config().base_origin);
/// # Ok::<(), payslip_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: RenderConfig,
}

impl ConfigLoader {
    /// Loads configuration from a single YAML file.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if the file cannot be read
    /// - [`EngineError::ConfigParseError`] if it is not valid YAML for
    ///   [`RenderConfig`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config = Self::load_yaml::<RenderConfig>(path.as_ref())?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> RenderConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::ErrorCorrection;

    fn config_path() -> &'static str {
        "./config/payslip.yaml"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let config = result.unwrap().into_config();
        assert_eq!(config.base_origin, "https://payroll.example.com");
        assert_eq!(config.verification.error_correction, ErrorCorrection::Medium);
        assert_eq!(config.document.title, "PAYSLIP");
    }

    #[test]
    fn test_load_missing_file_returns_error() {
        let result = ConfigLoader::load("/nonexistent/payslip.yaml");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payslip.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_invalid_yaml_returns_parse_error() {
        let path = std::env::temp_dir().join(format!(
            "payslip-engine-invalid-{}.yaml",
            uuid::Uuid::new_v4()
        ));
        fs::write(&path, "verification:\n  error_correction: extreme\n").unwrap();

        let result = ConfigLoader::load(&path);
        let _ = fs::remove_file(&path);

        match result {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("payslip-engine-invalid"));
                assert!(!message.is_empty());
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }
}
