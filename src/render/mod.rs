//! Document serialization.
//!
//! Writes a [`DocumentLayout`](crate::layout::DocumentLayout) to PDF bytes.

mod encoding;
mod pdf;

pub use encoding::encode_win_ansi;
pub use pdf::{PDF_CONTENT_TYPE, RenderedDocument, serialize};
