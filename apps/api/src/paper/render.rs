//! Rendering backends: turn a laid-out `Document` into output bytes.
//!
//! `PdfBackend` writes one PDF page per `Page` with `lopdf`. Text is set in the
//! base-14 Helvetica faces with WinAnsiEncoding, so nothing is embedded and the
//! advance widths match `layout::font_metrics` exactly.

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Object, ObjectId, Stream, StringFormat};

use crate::layout::font_metrics::{win_ansi_byte, FontFace, Rgb, TextStyle};
use crate::layout::{block_geometry, Document, DrawOp, Page, TextMeasurer};
use crate::paper::PaperError;

/// Produces the final bytes for a composed paper. Called once per build.
pub trait RenderBackend: Send + Sync {
    /// File extension of the output, without the dot.
    fn extension(&self) -> &'static str;

    /// `measurer` must be the one the document was composed with.
    fn render(
        &self,
        document: &Document,
        title: &str,
        measurer: &dyn TextMeasurer,
    ) -> Result<Vec<u8>, PaperError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfBackend;

impl RenderBackend for PdfBackend {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(
        &self,
        document: &Document,
        title: &str,
        measurer: &dyn TextMeasurer,
    ) -> Result<Vec<u8>, PaperError> {
        let geometry = document.settings.geometry;
        let mut pdf = lopdf::Document::with_version("1.5");
        let pages_id = pdf.new_object_id();

        let mut fonts = Dictionary::new();
        for face in [FontFace::Helvetica, FontFace::HelveticaBold] {
            let font_id = pdf.add_object(Dictionary::from_iter([
                ("Type", Object::Name(b"Font".to_vec())),
                ("Subtype", Object::Name(b"Type1".to_vec())),
                ("BaseFont", Object::Name(face.base_font().as_bytes().to_vec())),
                ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
            ]));
            fonts.set(face.resource_name(), Object::Reference(font_id));
        }
        let resources_id = pdf.add_object(Dictionary::from_iter([(
            "Font",
            Object::Dictionary(fonts),
        )]));

        let mut kids: Vec<Object> = Vec::with_capacity(document.pages.len());
        for page in &document.pages {
            let operations = page_operations(document, page, measurer)?;
            let content = Content { operations }
                .encode()
                .map_err(|e| PaperError::Render(format!("page {}: {e}", page.number)))?;
            let content_id = pdf.add_object(Stream::new(Dictionary::new(), content));
            let page_id: ObjectId = pdf.add_object(Dictionary::from_iter([
                ("Type", Object::Name(b"Page".to_vec())),
                ("Parent", Object::Reference(pages_id)),
                ("Contents", Object::Reference(content_id)),
                ("Resources", Object::Reference(resources_id)),
                (
                    "MediaBox",
                    Object::Array(vec![
                        0.into(),
                        0.into(),
                        geometry.width_pt.into(),
                        geometry.height_pt.into(),
                    ]),
                ),
            ]));
            kids.push(Object::Reference(page_id));
        }

        let page_count = kids.len() as i64;
        pdf.objects.insert(
            pages_id,
            Object::Dictionary(Dictionary::from_iter([
                ("Type", Object::Name(b"Pages".to_vec())),
                ("Kids", Object::Array(kids)),
                ("Count", Object::Integer(page_count)),
            ])),
        );

        let catalog_id = pdf.add_object(Dictionary::from_iter([
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(pages_id)),
        ]));
        pdf.trailer.set("Root", Object::Reference(catalog_id));

        let created = chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string();
        let info_id = pdf.add_object(Dictionary::from_iter([
            ("Title", Object::String(encode_lossy(title), StringFormat::Literal)),
            (
                "Producer",
                Object::string_literal(concat!("quizpaper-api ", env!("CARGO_PKG_VERSION"))),
            ),
            ("CreationDate", Object::string_literal(created)),
        ]));
        pdf.trailer.set("Info", Object::Reference(info_id));

        pdf.compress();

        let mut output = Vec::new();
        pdf.save_to(&mut output)
            .map_err(|e| PaperError::Render(format!("failed to serialize PDF: {e}")))?;
        Ok(output)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Content stream construction
// ────────────────────────────────────────────────────────────────────────────

fn page_operations(
    document: &Document,
    page: &Page,
    measurer: &dyn TextMeasurer,
) -> Result<Vec<Operation>, PaperError> {
    let settings = &document.settings;
    let page_height = settings.geometry.height_pt;
    let mut ops = Vec::new();

    if let Some(caption) = &page.caption {
        let style = settings.styles.caption;
        let width = measurer
            .width(caption, &style)
            .map_err(|e| PaperError::Render(format!("caption on page {}: {e}", page.number)))?;
        let x = (settings.geometry.width_pt - width) / 2.0;
        push_text(&mut ops, caption, x, settings.geometry.margin_pt, &style, page_height)?;
    }

    for placed in &page.blocks {
        let geometry = block_geometry(&placed.block, measurer, settings).map_err(|e| {
            PaperError::Render(format!("{} on page {}: {e}", placed.block.label(), page.number))
        })?;
        for op in geometry.ops {
            match op {
                DrawOp::Text { x, dy, text, style } => {
                    push_text(&mut ops, &text, x, placed.y + dy, &style, page_height)?;
                }
                DrawOp::Rect {
                    x,
                    dy,
                    width,
                    height,
                    fill,
                    stroke,
                } => {
                    let bottom = page_height - (placed.y + dy + height);
                    push_rect(&mut ops, x, bottom, width, height, fill, stroke);
                }
            }
        }
    }

    Ok(ops)
}

/// Draws one line whose line box starts `top` points below the top edge.
fn push_text(
    ops: &mut Vec<Operation>,
    text: &str,
    x: f32,
    top: f32,
    style: &TextStyle,
    page_height: f32,
) -> Result<(), PaperError> {
    let bytes = encode_win_ansi(text)?;
    let baseline = page_height - (top + style.baseline_offset());
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![
            Object::Name(style.face.resource_name().as_bytes().to_vec()),
            style.size_pt.into(),
        ],
    ));
    ops.push(Operation::new("rg", color_operands(style.color)));
    ops.push(Operation::new("Td", vec![x.into(), baseline.into()]));
    ops.push(Operation::new(
        "Tj",
        vec![Object::String(bytes, StringFormat::Literal)],
    ));
    ops.push(Operation::new("ET", vec![]));
    Ok(())
}

fn push_rect(
    ops: &mut Vec<Operation>,
    x: f32,
    bottom: f32,
    width: f32,
    height: f32,
    fill: Option<Rgb>,
    stroke: Option<Rgb>,
) {
    let rect = || {
        Operation::new(
            "re",
            vec![x.into(), bottom.into(), width.into(), height.into()],
        )
    };
    ops.push(Operation::new("q", vec![]));
    if let Some(color) = fill {
        ops.push(Operation::new("rg", color_operands(color)));
        ops.push(rect());
        ops.push(Operation::new("f", vec![]));
    }
    if let Some(color) = stroke {
        ops.push(Operation::new("RG", color_operands(color)));
        ops.push(Operation::new("w", vec![Object::Real(0.5)]));
        ops.push(rect());
        ops.push(Operation::new("S", vec![]));
    }
    ops.push(Operation::new("Q", vec![]));
}

fn color_operands(color: Rgb) -> Vec<Object> {
    let Rgb(r, g, b) = color;
    [r, g, b]
        .into_iter()
        .map(|c| (c as f32 / 255.0).into())
        .collect()
}

fn encode_win_ansi(text: &str) -> Result<Vec<u8>, PaperError> {
    text.chars()
        .map(|c| {
            win_ansi_byte(c)
                .ok_or_else(|| PaperError::Render(format!("character {c:?} cannot be encoded")))
        })
        .collect()
}

/// For metadata only: unencodable chars become `?`.
fn encode_lossy(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| win_ansi_byte(c).unwrap_or(b'?'))
        .collect()
}
