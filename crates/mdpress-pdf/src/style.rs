//! Visual constants for the page layout
//!
//! A4 portrait geometry plus the per-block fonts, colors, line heights,
//! and stroke widths. Coordinates are millimetres from the top-left page
//! corner; font sizes are points.

/// Points to millimetres
pub const PT_TO_MM: f64 = 0.352_778;

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

/// Left edge of content and of separator/edge decorations
pub const MARGIN_LEFT: f64 = 10.0;
/// Right edge of content and of separators
pub const CONTENT_RIGHT: f64 = 200.0;
/// First body line on every page, below the running header
pub const BODY_TOP: f64 = 25.0;

/// Running header cell top
pub const HEADER_Y: f64 = 10.0;
/// Footer cell top (15 mm above the bottom edge)
pub const FOOTER_Y: f64 = 282.0;

/// Auto page-break trigger for normal text lines
pub const AUTO_BREAK_Y: f64 = 282.0;
/// Stricter per-line page-break trigger inside code blocks
pub const CODE_BREAK_Y: f64 = 270.0;

/// Width of the bullet/number marker cell in front of list items
pub const MARKER_CELL_WIDTH: f64 = 10.0;
/// Text inset for code and blockquote lines, clear of the left edge stroke
pub const EDGED_TEXT_X: f64 = 12.0;

/// An RGB color, 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Dark slate used for the cover title and level-1 headings
pub const HEADING_PRIMARY: Color = Color::new(44, 62, 80);
/// Slightly lighter slate for level-2+ headings
pub const HEADING_SECONDARY: Color = Color::new(52, 73, 94);
/// Body text gray
pub const BODY_TEXT: Color = Color::new(51, 51, 51);
/// Muted gray for blockquotes and the cover subtitle
pub const MUTED_TEXT: Color = Color::new(127, 140, 141);
/// Header/footer gray
pub const PAGE_CHROME: Color = Color::new(128, 128, 128);
/// Accent blue: level-1 separators, code block edges, cover rule
pub const ACCENT: Color = Color::new(52, 152, 219);
/// Light gray for level-2 separators
pub const SEPARATOR_LIGHT: Color = Color::new(149, 165, 166);
/// Blockquote edge gray
pub const QUOTE_EDGE: Color = Color::new(189, 195, 199);
/// Code block background
pub const CODE_FILL: Color = Color::new(248, 248, 248);
/// Blockquote background
pub const QUOTE_FILL: Color = Color::new(249, 249, 249);

/// Separator stroke widths; level 1 is always strictly heavier
pub const H1_SEPARATOR_STROKE: f64 = 0.5;
pub const H2_SEPARATOR_STROKE: f64 = 0.3;
/// Left edge strokes for code blocks and blockquotes
pub const CODE_EDGE_STROKE: f64 = 2.0;
pub const QUOTE_EDGE_STROKE: f64 = 1.5;
/// Cover page rule stroke
pub const COVER_RULE_STROKE: f64 = 0.5;

/// The builtin PDF faces the renderer draws with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    Courier,
}

impl FontFace {
    /// Average advance width as a fraction of the font size
    ///
    /// Courier is exact (fixed pitch); the Helvetica factor is an
    /// average good enough for word wrapping and centering.
    pub fn char_width_factor(self) -> f64 {
        match self {
            FontFace::Courier => 0.6,
            _ => 0.5,
        }
    }
}

/// Font, size, and color of one run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f64,
    pub color: Color,
}

impl TextStyle {
    pub const fn new(face: FontFace, size: f64, color: Color) -> Self {
        Self { face, size, color }
    }

    /// Estimated width of `text` in millimetres
    pub fn text_width_mm(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.size * self.face.char_width_factor() * PT_TO_MM
    }

    /// How many characters fit into `width_mm`
    pub fn chars_per_line(&self, width_mm: f64) -> usize {
        let char_width = self.size * self.face.char_width_factor() * PT_TO_MM;
        ((width_mm / char_width) as usize).max(1)
    }
}

/// Text style plus the vertical cell height of one line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockStyle {
    pub text: TextStyle,
    pub line_height: f64,
}

impl BlockStyle {
    pub const fn new(face: FontFace, size: f64, color: Color, line_height: f64) -> Self {
        Self {
            text: TextStyle::new(face, size, color),
            line_height,
        }
    }
}

pub const HEADER_STYLE: TextStyle =
    TextStyle::new(FontFace::HelveticaOblique, 8.0, PAGE_CHROME);
pub const FOOTER_STYLE: TextStyle =
    TextStyle::new(FontFace::HelveticaOblique, 8.0, PAGE_CHROME);

pub const COVER_TITLE: BlockStyle =
    BlockStyle::new(FontFace::HelveticaBold, 24.0, HEADING_PRIMARY, 15.0);
pub const COVER_SUBTITLE: BlockStyle =
    BlockStyle::new(FontFace::HelveticaOblique, 12.0, MUTED_TEXT, 10.0);

pub const HEADING_1: BlockStyle =
    BlockStyle::new(FontFace::HelveticaBold, 18.0, HEADING_PRIMARY, 10.0);
pub const HEADING_2: BlockStyle =
    BlockStyle::new(FontFace::HelveticaBold, 14.0, HEADING_SECONDARY, 8.0);
pub const HEADING_MINOR: BlockStyle =
    BlockStyle::new(FontFace::HelveticaBold, 12.0, HEADING_SECONDARY, 7.0);

pub const PARAGRAPH: BlockStyle = BlockStyle::new(FontFace::Helvetica, 11.0, BODY_TEXT, 6.0);
pub const CODE: BlockStyle = BlockStyle::new(FontFace::Courier, 9.0, BODY_TEXT, 5.0);
pub const QUOTE: BlockStyle = BlockStyle::new(FontFace::HelveticaOblique, 11.0, MUTED_TEXT, 6.0);
pub const LIST_ITEM: BlockStyle = BlockStyle::new(FontFace::Helvetica, 11.0, BODY_TEXT, 6.0);
