//! Error types for the Payslip Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while computing and rendering a payslip.

use thiserror::Error;

/// The main error type for the Payslip Engine.
///
/// Every fallible operation in the engine returns this error type. None of
/// these errors are retried inside the engine; they surface to the immediate caller.
///
/// # Example
///
/// ```
/// use payslip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The verification token does not fit the chosen code size and error correction level.
    #[error(
        "Verification token of {length} bytes exceeds capacity at error correction '{error_correction}'{}",
        version_suffix(.version)
    )]
    EncodingOverflow {
        /// The byte length of the rejected token.
        length: usize,
        /// The error correction level that was requested.
        error_correction: String,
        /// The fixed code version, if one was requested.
        version: Option<u8>,
    },

    /// The encoder options cannot describe a valid verification code.
    #[error("Invalid encoding options: {message}")]
    InvalidEncodingOptions {
        /// A description of what was wrong with the options.
        message: String,
    },

    /// A primitive could not be written to the document stream.
    #[error("Serialization error: {message}")]
    SerializationError {
        /// A description of the malformed primitive or writer failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for building a [`EngineError::SerializationError`].
    pub(crate) fn serialization(message: impl Into<String>) -> Self {
        EngineError::SerializationError {
            message: message.into(),
        }
    }
}

fn version_suffix(version: &Option<u8>) -> String {
    match version {
        Some(v) => format!(" and version {v}"),
        None => String::new(),
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
