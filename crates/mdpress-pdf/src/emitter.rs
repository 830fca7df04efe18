//! Draw-op pages to PDF bytes
//!
//! Emits the layout's per-page draw operations through `printpdf`,
//! using the builtin Helvetica and Courier faces. Layout coordinates
//! are top-origin millimetres; PDF space is bottom-origin, so y is
//! flipped here and text gets a baseline offset within its line cell.
//!
//! The layout works in f64; printpdf's `Mm`, font sizes, stroke
//! thickness, and color channels are f32, so all values narrow at
//! this boundary.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color as PdfColor, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point, Rect, Rgb,
};

use crate::error::{PdfError, Result};
use crate::layout::{DrawOp, Page};
use crate::style::{Color, FontFace, TextStyle, PAGE_HEIGHT, PAGE_WIDTH, PT_TO_MM};

/// Baseline position as a fraction of the line cell height
const BASELINE_FACTOR: f64 = 0.78;

/// Emitter for converting laid-out pages to PDF bytes
pub struct Emitter;

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
    mono: IndirectFontRef,
}

impl FontSet {
    fn load(doc: &printpdf::PdfDocumentReference) -> Result<Self> {
        let builtin = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| PdfError::Font(e.to_string()))
        };
        Ok(Self {
            regular: builtin(BuiltinFont::Helvetica)?,
            bold: builtin(BuiltinFont::HelveticaBold)?,
            oblique: builtin(BuiltinFont::HelveticaOblique)?,
            mono: builtin(BuiltinFont::Courier)?,
        })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Helvetica => &self.regular,
            FontFace::HelveticaBold => &self.bold,
            FontFace::HelveticaOblique => &self.oblique,
            FontFace::Courier => &self.mono,
        }
    }
}

impl Emitter {
    /// Serialize laid-out pages into a PDF byte buffer
    pub fn emit(title: &str, pages: &[Page]) -> Result<Vec<u8>> {
        let (doc, first_page, first_layer) =
            PdfDocument::new(title, mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
        let fonts = FontSet::load(&doc)?;

        for (index, page) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_ref, layer_ref) = doc.add_page(mm(PAGE_WIDTH), mm(PAGE_HEIGHT), "Layer 1");
                doc.get_page(page_ref).get_layer(layer_ref)
            };
            for op in &page.ops {
                Self::emit_op(&layer, &fonts, op);
            }
        }

        doc.save_to_bytes()
            .map_err(|e| PdfError::Emit(e.to_string()))
    }

    fn emit_op(layer: &PdfLayerReference, fonts: &FontSet, op: &DrawOp) {
        match op {
            DrawOp::Text { x, y, text, style } => {
                Self::emit_text(layer, fonts, *x, *y, text, style);
            }

            DrawOp::Rule {
                x1,
                y1,
                x2,
                y2,
                stroke,
                color,
            } => {
                layer.set_outline_color(pdf_color(*color));
                layer.set_outline_thickness(*stroke as f32);
                layer.add_line(Line {
                    points: vec![
                        (Point::new(mm(*x1), mm(PAGE_HEIGHT - y1)), false),
                        (Point::new(mm(*x2), mm(PAGE_HEIGHT - y2)), false),
                    ],
                    is_closed: false,
                });
            }

            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                layer.set_fill_color(pdf_color(*fill));
                let top = PAGE_HEIGHT - y;
                let rect = Rect::new(mm(*x), mm(top - height), mm(*x + width), mm(top))
                    .with_mode(PaintMode::Fill);
                layer.add_rect(rect);
            }
        }
    }

    fn emit_text(
        layer: &PdfLayerReference,
        fonts: &FontSet,
        x: f64,
        y: f64,
        text: &str,
        style: &TextStyle,
    ) {
        // Baseline sits inside the line cell, below the cell top
        let baseline = y + style.size * PT_TO_MM * BASELINE_FACTOR;
        layer.set_fill_color(pdf_color(style.color));
        layer.use_text(
            text,
            style.size as f32,
            mm(x),
            mm(PAGE_HEIGHT - baseline),
            fonts.get(style.face),
        );
    }
}

fn mm(value: f64) -> Mm {
    Mm(value as f32)
}

fn pdf_color(color: Color) -> PdfColor {
    PdfColor::Rgb(Rgb::new(
        color.r as f32 / 255.0,
        color.g as f32 / 255.0,
        color.b as f32 / 255.0,
        None,
    ))
}
