//! Document layout.
//!
//! Turns computed payroll data into a device-independent list of drawing
//! primitives (filled rectangles, text runs and images) on a single page.
//! The [`render`](crate::render) module serializes the result.

mod format;
mod payslip;
mod primitives;

pub use format::{currency_decimal_places, format_amount, format_money, format_percentage};
pub use payslip::{PayslipContent, layout_payslip};
pub use primitives::{
    DocumentLayout, DrawPrimitive, Font, FontFamily, FontWeight, ImagePlacement, PageSize,
    RasterImage, Rect, Rgb, TextRun,
};
