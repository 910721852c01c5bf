//! Verification code encoding.
//!
//! This module renders a verification token (normally the URL of the payslip
//! viewer) as a QR code bitmap using the `qrcode` crate.

use qrcode::types::QrError;
use qrcode::{Color, EcLevel, QrCode, Version};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

use super::bitmap::{Bitmap, DARK, LIGHT};

/// Highest QR code version.
pub const MAX_VERSION: u8 = 40;

/// Largest accepted `module_pixels`.
pub const MAX_MODULE_PIXELS: u32 = 16;

/// Largest accepted `quiet_zone`, in modules.
pub const MAX_QUIET_ZONE: u32 = 16;

/// QR error correction level.
///
/// Higher levels survive more damage but leave less room for data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCorrection {
    /// Recovers about 7% of codewords.
    Low,
    /// Recovers about 15% of codewords.
    #[default]
    Medium,
    /// Recovers about 25% of codewords.
    Quartile,
    /// Recovers about 30% of codewords.
    High,
}

impl ErrorCorrection {
    /// The lowercase name used in configuration and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCorrection::Low => "low",
            ErrorCorrection::Medium => "medium",
            ErrorCorrection::Quartile => "quartile",
            ErrorCorrection::High => "high",
        }
    }

    fn ec_level(self) -> EcLevel {
        match self {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Options controlling the size and robustness of the encoded code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Error correction level.
    pub error_correction: ErrorCorrection,
    /// Fixed QR version (1-40), or `None` for the smallest version that fits.
    pub version: Option<u8>,
    /// Pixels per module edge in the output bitmap.
    pub module_pixels: u32,
    /// Width of the light border, in modules.
    pub quiet_zone: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            error_correction: ErrorCorrection::Medium,
            version: None,
            module_pixels: 4,
            quiet_zone: 4,
        }
    }
}

/// Encodes a verification token as a QR code bitmap.
///
/// The output depends only on `token` and `options`.
///
/// # Errors
///
/// - [`EngineError::EncodingOverflow`] if the token does not fit the requested
///   version at the requested error correction level (or any version, when
///   none is fixed).
/// - [`EngineError::InvalidEncodingOptions`] for a version outside 1-40, a
///   module size outside 1-[`MAX_MODULE_PIXELS`] or a quiet zone wider than
///   [`MAX_QUIET_ZONE`].
///
/// # Example
///
/// ```
/// use payslip_engine::verification::{encode, EncodeOptions};
///
/// let bitmap = encode("https://payroll.example.com/payslip/view/42", &EncodeOptions::default())
///     .unwrap();
/// assert_eq!(bitmap.width(), bitmap.height());
/// assert!(bitmap.is_well_formed());
/// ```
pub fn encode(token: &str, options: &EncodeOptions) -> EngineResult<Bitmap> {
    if options.module_pixels == 0 || options.module_pixels > MAX_MODULE_PIXELS {
        return Err(EngineError::InvalidEncodingOptions {
            message: format!(
                "module_pixels must be between 1 and {MAX_MODULE_PIXELS}, got {}",
                options.module_pixels
            ),
        });
    }
    if options.quiet_zone > MAX_QUIET_ZONE {
        return Err(EngineError::InvalidEncodingOptions {
            message: format!(
                "quiet_zone must be at most {MAX_QUIET_ZONE}, got {}",
                options.quiet_zone
            ),
        });
    }

    let ec_level = options.error_correction.ec_level();
    let code = match options.version {
        Some(version) if version == 0 || version > MAX_VERSION => {
            return Err(EngineError::InvalidEncodingOptions {
                message: format!("version must be between 1 and {MAX_VERSION}, got {version}"),
            });
        }
        Some(version) => {
            QrCode::with_version(token, Version::Normal(i16::from(version)), ec_level)
        }
        None => QrCode::with_error_correction_level(token, ec_level),
    }
    .map_err(|error| match error {
        QrError::DataTooLong => EngineError::EncodingOverflow {
            length: token.len(),
            error_correction: options.error_correction.as_str().to_string(),
            version: options.version,
        },
        other => EngineError::InvalidEncodingOptions {
            message: other.to_string(),
        },
    })?;

    let modules = code.width();
    let colors = code.to_colors();
    debug!(
        token_len = token.len(),
        modules,
        error_correction = options.error_correction.as_str(),
        "Encoded verification token"
    );

    Ok(rasterize(&colors, modules, options))
}

/// Scales a square module grid into a bitmap with a light quiet zone.
fn rasterize(colors: &[Color], modules: usize, options: &EncodeOptions) -> Bitmap {
    let scale = options.module_pixels as usize;
    let border = options.quiet_zone as usize;
    let side_modules = modules + 2 * border;
    let side = side_modules * scale;

    let mut pixels = vec![LIGHT; side * side];
    for (index, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let module_x = index % modules + border;
        let module_y = index / modules + border;
        for dy in 0..scale {
            let row = (module_y * scale + dy) * side;
            let start = row + module_x * scale;
            pixels[start..start + scale].fill(DARK);
        }
    }

    Bitmap::from_luma(side as u32, side as u32, pixels)
}

/// Builds the URL a payslip's verification code points at.
///
/// # Example
///
/// ```
/// use payslip_engine::verification::verification_url;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// assert_eq!(
///     verification_url("https://payroll.example.com/", &id),
///     "https://payroll.example.com/payslip/view/00000000-0000-0000-0000-000000000000"
/// );
/// ```
pub fn verification_url(base_origin: &str, payslip_id: &Uuid) -> String {
    format!(
        "{}/payslip/view/{}",
        base_origin.trim_end_matches('/'),
        payslip_id
    )
}
