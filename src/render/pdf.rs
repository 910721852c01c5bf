//! PDF serialization of a [`DocumentLayout`] using `lopdf`.
//!
//! The writer produces a single-page PDF 1.5 file with the standard Type 1
//! fonts, an uncompressed content stream and one image XObject per image
//! primitive. Nothing time- or randomness-dependent is written, so the same
//! layout always serializes to the same bytes.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::layout::{
    DocumentLayout, DrawPrimitive, Font, FontFamily, FontWeight, ImagePlacement, PageSize,
    RasterImage, Rect, Rgb, TextRun,
};

use super::encoding::encode_win_ansi;

const PDF_VERSION: &str = "1.5";
const POINTS_PER_MM: f32 = 72.0 / 25.4;
const PRODUCER: &str = "payslip-engine";

/// MIME type of serialized documents.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A serialized PDF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    bytes: Vec<u8>,
}

impl RenderedDocument {
    /// The raw PDF bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the document, returning the raw PDF bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Size of the document in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if no bytes were written.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Serializes a layout into a PDF document.
///
/// # Errors
///
/// Returns [`EngineError::SerializationError`] if a primitive has non-finite
/// or negative geometry, a bitmap's pixel buffer does not match its
/// dimensions, an encoded image cannot be decoded or is empty, or the writer
/// fails.
///
/// # Example
///
/// ```
/// use payslip_engine::layout::{DocumentLayout, DrawPrimitive, Font, PageSize, Rgb, TextRun};
/// use payslip_engine::render::serialize;
///
/// let layout = DocumentLayout {
///     page: PageSize::A4,
///     title: "Example".to_string(),
///     primitives: vec![DrawPrimitive::Text(TextRun {
///         text: "Hello".to_string(),
///         x: 20.0,
///         y: 20.0,
///         font: Font::REGULAR,
///         size: 12.0,
///         color: Rgb(0, 0, 0),
///     })],
///     content_bottom: 20.0,
///     footer_top: 250.0,
/// };
///
/// let document = serialize(&layout).unwrap();
/// assert!(document.as_bytes().starts_with(b"%PDF-1.5"));
/// ```
pub fn serialize(layout: &DocumentLayout) -> EngineResult<RenderedDocument> {
    check_page(&layout.page)?;

    let mut document = Document::with_version(PDF_VERSION);
    let mut page = PageWriter::new(layout.page);

    for (index, primitive) in layout.primitives.iter().enumerate() {
        match primitive {
            DrawPrimitive::FilledRect { rect, color } => page.fill(index, rect, *color)?,
            DrawPrimitive::Text(run) => page.text(index, run)?,
            DrawPrimitive::Image(placement) => page.image(&mut document, index, placement)?,
        }
    }

    let operation_count = page.operations.len();
    let content = Content {
        operations: page.operations,
    };
    let content_bytes = content
        .encode()
        .map_err(|e| EngineError::serialization(format!("failed to encode page content: {e}")))?;
    let content_id = document.add_object(Stream::new(Dictionary::new(), content_bytes));

    let mut fonts = Dictionary::new();
    for (font, name) in &page.fonts {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font(*font),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(name.as_str(), font_id);
    }

    let mut resources = dictionary! { "Font" => fonts };
    if !page.images.is_empty() {
        let mut xobjects = Dictionary::new();
        for (name, image_id) in &page.images {
            xobjects.set(name.as_str(), *image_id);
        }
        resources.set("XObject", xobjects);
    }

    let pages_id = document.new_object_id();
    let page_id = document.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(layout.page.width * POINTS_PER_MM),
            Object::Real(layout.page.height * POINTS_PER_MM),
        ]),
        "Contents" => content_id,
        "Resources" => resources,
    });
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => Object::Array(vec![Object::Reference(page_id)]),
            "Count" => Object::Integer(1),
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = document.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(&layout.title), StringFormat::Literal),
        "Producer" => Object::String(PRODUCER.as_bytes().to_vec(), StringFormat::Literal),
    });
    document.trailer.set("Root", catalog_id);
    document.trailer.set("Info", info_id);

    let mut bytes = Vec::new();
    document
        .save_to(&mut bytes)
        .map_err(|e| EngineError::serialization(format!("failed to write document: {e}")))?;

    debug!(
        primitives = layout.primitives.len(),
        operations = operation_count,
        fonts = page.fonts.len(),
        images = page.images.len(),
        bytes = bytes.len(),
        "Serialized document"
    );

    Ok(RenderedDocument { bytes })
}

/// Accumulates content stream operations and the resources they refer to.
struct PageWriter {
    height: f32,
    operations: Vec<Operation>,
    fonts: Vec<(Font, String)>,
    images: Vec<(String, ObjectId)>,
}

impl PageWriter {
    fn new(page: PageSize) -> Self {
        Self {
            height: page.height,
            operations: Vec::new(),
            fonts: Vec::new(),
            images: Vec::new(),
        }
    }

    fn fill(&mut self, index: usize, rect: &Rect, color: Rgb) -> EngineResult<()> {
        check_rect(index, rect)?;
        let [x, y, width, height] = self.user_space(rect);
        self.operations.extend([
            Operation::new("q", vec![]),
            fill_color(color),
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn text(&mut self, index: usize, run: &TextRun) -> EngineResult<()> {
        let finite = run.x.is_finite() && run.y.is_finite() && run.size.is_finite();
        if !finite || run.size <= 0.0 {
            return Err(EngineError::serialization(format!(
                "primitive {index}: text run at ({}, {}) with size {} cannot be placed",
                run.x, run.y, run.size
            )));
        }

        let font = self.font_resource(run.font);
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.into_bytes()), run.size.into()]),
            fill_color(run.color),
            Operation::new(
                "Td",
                vec![
                    (run.x * POINTS_PER_MM).into(),
                    ((self.height - run.y) * POINTS_PER_MM).into(),
                ],
            ),
            Operation::new(
                "Tj",
                vec![Object::String(
                    encode_win_ansi(&run.text),
                    StringFormat::Literal,
                )],
            ),
            Operation::new("ET", vec![]),
        ]);
        Ok(())
    }

    fn image(
        &mut self,
        document: &mut Document,
        index: usize,
        placement: &ImagePlacement,
    ) -> EngineResult<()> {
        check_rect(index, &placement.rect)?;
        let image_id = document.add_object(image_stream(index, &placement.image)?);
        let name = format!("Im{}", self.images.len() + 1);
        self.images.push((name.clone(), image_id));

        // Images are drawn into the unit square, so scale it to the target rectangle.
        let [x, y, width, height] = self.user_space(&placement.rect);
        self.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    Object::Integer(0),
                    Object::Integer(0),
                    height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.into_bytes())]),
            Operation::new("Q", vec![]),
        ]);
        Ok(())
    }

    fn font_resource(&mut self, font: Font) -> String {
        if let Some((_, name)) = self.fonts.iter().find(|(known, _)| *known == font) {
            return name.clone();
        }
        let name = format!("F{}", self.fonts.len() + 1);
        self.fonts.push((font, name.clone()));
        name
    }

    /// Converts a top-left millimetre rectangle to bottom-left points.
    fn user_space(&self, rect: &Rect) -> [f32; 4] {
        [
            rect.x * POINTS_PER_MM,
            (self.height - rect.y - rect.height) * POINTS_PER_MM,
            rect.width * POINTS_PER_MM,
            rect.height * POINTS_PER_MM,
        ]
    }
}

fn fill_color(color: Rgb) -> Operation {
    let [r, g, b] = color.unit();
    Operation::new("rg", vec![r.into(), g.into(), b.into()])
}

fn base_font(font: Font) -> &'static str {
    match (font.family, font.weight) {
        (FontFamily::Helvetica, FontWeight::Normal) => "Helvetica",
        (FontFamily::Helvetica, FontWeight::Bold) => "Helvetica-Bold",
        (FontFamily::Times, FontWeight::Normal) => "Times-Roman",
        (FontFamily::Times, FontWeight::Bold) => "Times-Bold",
        (FontFamily::Courier, FontWeight::Normal) => "Courier",
        (FontFamily::Courier, FontWeight::Bold) => "Courier-Bold",
    }
}

fn image_stream(index: usize, image: &RasterImage) -> EngineResult<Stream> {
    let (width, height, color_space, samples) = match image {
        RasterImage::Bitmap(bitmap) => {
            if !bitmap.is_well_formed() {
                return Err(EngineError::serialization(format!(
                    "primitive {index}: bitmap of {}x{} pixels holds {} bytes",
                    bitmap.width(),
                    bitmap.height(),
                    bitmap.pixels().len()
                )));
            }
            (
                bitmap.width(),
                bitmap.height(),
                "DeviceGray",
                bitmap.pixels().to_vec(),
            )
        }
        RasterImage::Encoded(bytes) => {
            let decoded = image::load_from_memory(bytes).map_err(|e| {
                EngineError::serialization(format!("primitive {index}: cannot decode image: {e}"))
            })?;
            let rgb = decoded.to_rgb8();
            if rgb.width() == 0 || rgb.height() == 0 {
                return Err(EngineError::serialization(format!(
                    "primitive {index}: image has no pixels"
                )));
            }
            (rgb.width(), rgb.height(), "DeviceRGB", rgb.into_raw())
        }
    };

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8_i64,
        },
        samples,
    ))
}

fn check_page(page: &PageSize) -> EngineResult<()> {
    let valid = page.width.is_finite()
        && page.height.is_finite()
        && page.width > 0.0
        && page.height > 0.0;
    if valid {
        Ok(())
    } else {
        Err(EngineError::serialization(format!(
            "page size {}x{} mm is not printable",
            page.width, page.height
        )))
    }
}

fn check_rect(index: usize, rect: &Rect) -> EngineResult<()> {
    if rect.is_valid() {
        Ok(())
    } else {
        Err(EngineError::serialization(format!(
            "primitive {index}: invalid rectangle {rect:?}"
        )))
    }
}
