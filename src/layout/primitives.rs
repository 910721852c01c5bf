//! Abstract drawing primitives.
//!
//! Coordinates are millimetres from the top-left corner of the page. Text is
//! positioned at the left end of its baseline; font sizes are in points.

use serde::{Deserialize, Serialize};

use crate::verification::Bitmap;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure white.
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Components scaled to `0.0..=1.0`.
    pub fn unit(&self) -> [f32; 3] {
        [
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
        ]
    }
}

/// An axis-aligned rectangle; `(x, y)` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Distance from the left page edge.
    pub x: f32,
    /// Distance from the top page edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true if every field is finite and both extents are non-negative.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }
}

/// Typeface family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Sans-serif.
    Helvetica,
    /// Serif.
    Times,
    /// Monospace.
    Courier,
}

/// Typeface weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Regular weight.
    Normal,
    /// Bold weight.
    Bold,
}

/// A family and weight pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    /// The family.
    pub family: FontFamily,
    /// The weight.
    pub weight: FontWeight,
}

impl Font {
    /// Regular Helvetica.
    pub const REGULAR: Font = Font {
        family: FontFamily::Helvetica,
        weight: FontWeight::Normal,
    };

    /// Bold Helvetica.
    pub const BOLD: Font = Font {
        family: FontFamily::Helvetica,
        weight: FontWeight::Bold,
    };
}

/// A single line of styled text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRun {
    /// The text to draw.
    pub text: String,
    /// Left end of the baseline, from the left page edge.
    pub x: f32,
    /// Baseline, from the top page edge.
    pub y: f32,
    /// Font family and weight.
    pub font: Font,
    /// Font size in points.
    pub size: f32,
    /// Fill colour.
    pub color: Rgb,
}

/// Pixel data of an embedded image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RasterImage {
    /// An already-decoded greyscale raster.
    Bitmap(Bitmap),
    /// An encoded image file (PNG) that is decoded while serializing.
    Encoded(Vec<u8>),
}

/// An image scaled into a target rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePlacement {
    /// Where the image is drawn.
    pub rect: Rect,
    /// The image itself.
    pub image: RasterImage,
}

/// One drawing instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawPrimitive {
    /// A filled rectangle without stroke.
    FilledRect {
        /// The area to fill.
        rect: Rect,
        /// The fill colour.
        color: Rgb,
    },
    /// A text run.
    Text(TextRun),
    /// An embedded raster image.
    Image(ImagePlacement),
}

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
}

impl PageSize {
    /// ISO 216 A4 portrait.
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

/// A single laid-out page, ready to be serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentLayout {
    /// Page dimensions.
    pub page: PageSize,
    /// Document title written to the metadata.
    pub title: String,
    /// Primitives in painting order.
    pub primitives: Vec<DrawPrimitive>,
    /// Lowest point reached by body content, from the top page edge.
    pub content_bottom: f32,
    /// Top of the area reserved for the footer.
    pub footer_top: f32,
}

impl DocumentLayout {
    /// Returns true if body content runs into the footer area or past the page.
    ///
    /// The page is still emitted as a single page; nothing is reflowed.
    pub fn overflows(&self) -> bool {
        self.content_bottom > self.footer_top || self.content_bottom > self.page.height
    }

    /// Iterates over all text runs in painting order.
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.primitives.iter().filter_map(|primitive| match primitive {
            DrawPrimitive::Text(run) => Some(run),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_unit_components() {
        assert_eq!(Rgb::WHITE.unit(), [1.0, 1.0, 1.0]);
        assert_eq!(Rgb(0, 0, 0).unit(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rect_with_negative_height_is_invalid() {
        assert!(!Rect::new(0.0, 0.0, 10.0, -1.0).is_valid());
    }

    #[test]
    fn test_rect_with_nan_is_invalid() {
        assert!(!Rect::new(f32::NAN, 0.0, 10.0, 10.0).is_valid());
    }

    #[test]
    fn test_zero_sized_rect_is_valid() {
        assert!(Rect::new(5.0, 5.0, 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_overflow_detection() {
        let mut layout = DocumentLayout {
            page: PageSize::A4,
            title: "Payslip".to_string(),
            primitives: vec![],
            content_bottom: 200.0,
            footer_top: 250.0,
        };
        assert!(!layout.overflows());
        layout.content_bottom = 251.0;
        assert!(layout.overflows());
    }
}
