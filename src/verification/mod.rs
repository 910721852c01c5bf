//! Verification code support.
//!
//! Each payslip carries a scannable code pointing at its viewer URL, so a
//! printed copy can be checked against the stored record.

mod bitmap;
mod encoder;

pub use bitmap::{Bitmap, DARK, LIGHT};
pub use encoder::{
    EncodeOptions, ErrorCorrection, MAX_MODULE_PIXELS, MAX_QUIET_ZONE, MAX_VERSION, encode,
    verification_url,
};
