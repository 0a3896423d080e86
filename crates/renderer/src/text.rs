//! Text rendering for labels, ticks and cell annotations.
//!
//! Two faces implement [`TextFace`]:
//! - [`BitmapFace`]: a built-in 5x7 dot-matrix font scaled to any pixel size.
//!   Needs no font file and renders identically everywhere.
//! - [`TrueTypeFace`]: any TrueType font loaded at runtime, drawn with
//!   `rusttype` and `imageproc`.

use std::path::Path;

use heatmap_common::{HeatmapError, HeatmapResult};
use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use rusttype::{point, Font, Scale};

/// Measures and draws single-line text.
///
/// `px` is the font size in pixels. Positions are the top-left corner of the
/// measured box.
pub trait TextFace: Send + Sync {
    /// Width and height of the rendered text in pixels.
    fn measure(&self, text: &str, px: f32, bold: bool) -> (u32, u32);

    /// Draw `text` with its top-left corner at (x, y).
    fn draw(&self, img: &mut RgbaImage, text: &str, x: i32, y: i32, px: f32, color: Rgba<u8>, bold: bool);
}

/// Load a TrueType face when a path is given, otherwise the built-in face.
pub fn load_face(path: Option<&Path>) -> HeatmapResult<Box<dyn TextFace>> {
    match path {
        Some(path) => {
            let face = TrueTypeFace::from_file(path)?;
            tracing::debug!(path = %path.display(), "Loaded TrueType font");
            Ok(Box::new(face))
        }
        None => Ok(Box::new(BitmapFace)),
    }
}

/// Draw text rotated 90 degrees counter-clockwise (reading bottom to top).
///
/// (x, y) is the top-left corner of the rotated box, whose size is the
/// measured (height, width). The text is first drawn onto `background`.
#[allow(clippy::too_many_arguments)]
pub fn draw_text_rotated(
    img: &mut RgbaImage,
    face: &dyn TextFace,
    text: &str,
    x: i32,
    y: i32,
    px: f32,
    color: Rgba<u8>,
    bold: bool,
    background: Rgba<u8>,
) {
    let (w, h) = face.measure(text, px, bold);
    if w == 0 || h == 0 {
        return;
    }
    let mut buf = RgbaImage::from_pixel(w, h, background);
    face.draw(&mut buf, text, 0, 0, px, color, bold);
    let rotated = imageops::rotate270(&buf);
    imageops::overlay(img, &rotated, x as i64, y as i64);
}

/// Format a numeric value with specified decimal places
pub fn format_value_with_decimals(value: f64, decimal_places: u32) -> String {
    match decimal_places {
        0 => format!("{:.0}", value.round()),
        1 => format!("{:.1}", (value * 10.0).round() / 10.0),
        2 => format!("{:.2}", (value * 100.0).round() / 100.0),
        _ => format!("{:.1}", value), // Default to 1 decimal
    }
}

// ============================================================================
// Built-in dot-matrix face
// ============================================================================

/// Glyph grid: 5 columns, 7 rows above the baseline plus 2 descender rows.
const GLYPH_COLS: usize = 5;
const GLYPH_ROWS: usize = 9;
/// Units per em; one unit of leading below the descender.
const UNITS_PER_EM: f32 = 10.0;
/// Advance per character, in units (glyph plus one column of spacing).
const ADVANCE: f32 = 6.0;

/// Built-in 5x7 dot-matrix face.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFace;

impl BitmapFace {
    fn unit(px: f32) -> f32 {
        (px / UNITS_PER_EM).max(0.5)
    }

    fn bold_extra(unit: f32) -> f32 {
        (unit * 0.5).max(1.0)
    }
}

impl TextFace for BitmapFace {
    fn measure(&self, text: &str, px: f32, bold: bool) -> (u32, u32) {
        let n = text.chars().count();
        if n == 0 {
            return (0, 0);
        }
        let unit = Self::unit(px);
        let mut width = (n as f32 * ADVANCE - 1.0) * unit;
        if bold {
            width += Self::bold_extra(unit);
        }
        let height = GLYPH_ROWS as f32 * unit;
        (width.ceil() as u32, height.ceil() as u32)
    }

    fn draw(&self, img: &mut RgbaImage, text: &str, x: i32, y: i32, px: f32, color: Rgba<u8>, bold: bool) {
        let unit = Self::unit(px);
        let extra = if bold { Self::bold_extra(unit) } else { 0.0 };

        for (i, ch) in text.chars().enumerate() {
            let origin_x = x as f32 + i as f32 * ADVANCE * unit;
            let rows = glyph(ch);
            for (r, bits) in rows.iter().enumerate() {
                for c in 0..GLYPH_COLS {
                    if bits & (1 << (GLYPH_COLS - 1 - c)) == 0 {
                        continue;
                    }
                    let x0 = (origin_x + c as f32 * unit).floor();
                    let x1 = (origin_x + (c + 1) as f32 * unit + extra).floor();
                    let y0 = (y as f32 + r as f32 * unit).floor();
                    let y1 = (y as f32 + (r + 1) as f32 * unit).floor();
                    let w = ((x1 - x0) as u32).max(1);
                    let h = ((y1 - y0) as u32).max(1);
                    draw_filled_rect_mut(img, Rect::at(x0 as i32, y0 as i32).of_size(w, h), color);
                }
            }
        }
    }
}

/// Pad a 7-row glyph with empty descender rows.
const fn caps(rows: [u8; 7]) -> [u8; GLYPH_ROWS] {
    [rows[0], rows[1], rows[2], rows[3], rows[4], rows[5], rows[6], 0, 0]
}

/// Row bitmaps for a character; bit 4 is the leftmost column.
fn glyph(ch: char) -> [u8; GLYPH_ROWS] {
    match ch {
        ' ' => [0; GLYPH_ROWS],
        '0' => caps([0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110]),
        '1' => caps([0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        '2' => caps([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111]),
        '3' => caps([0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110]),
        '4' => caps([0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010]),
        '5' => caps([0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110]),
        '6' => caps([0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110]),
        '7' => caps([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000]),
        '8' => caps([0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110]),
        '9' => caps([0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100]),
        'A' => caps([0b01110, 0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001]),
        'B' => caps([0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110]),
        'C' => caps([0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110]),
        'D' => caps([0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100]),
        'E' => caps([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111]),
        'F' => caps([0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000]),
        'G' => caps([0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111]),
        'H' => caps([0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001]),
        'I' => caps([0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'J' => caps([0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100]),
        'K' => caps([0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001]),
        'L' => caps([0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111]),
        'M' => caps([0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001]),
        'N' => caps([0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001]),
        'O' => caps([0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'P' => caps([0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000]),
        'Q' => caps([0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101]),
        'R' => caps([0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001]),
        'S' => caps([0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110]),
        'T' => caps([0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100]),
        'U' => caps([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110]),
        'V' => caps([0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
        'W' => caps([0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010]),
        'X' => caps([0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001]),
        'Y' => caps([0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100]),
        'Z' => caps([0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111]),
        'a' => caps([0b00000, 0b00000, 0b01110, 0b00001, 0b01111, 0b10001, 0b01111]),
        'b' => caps([0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b11110]),
        'c' => caps([0b00000, 0b00000, 0b01110, 0b10000, 0b10000, 0b10001, 0b01110]),
        'd' => caps([0b00001, 0b00001, 0b01101, 0b10011, 0b10001, 0b10001, 0b01111]),
        'e' => caps([0b00000, 0b00000, 0b01110, 0b10001, 0b11111, 0b10000, 0b01110]),
        'f' => caps([0b00110, 0b01001, 0b01000, 0b11100, 0b01000, 0b01000, 0b01000]),
        'g' => [0, 0, 0b01111, 0b10001, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'h' => caps([0b10000, 0b10000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001]),
        'i' => caps([0b00100, 0b00000, 0b01100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'j' => [0b00010, 0, 0b00110, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'k' => caps([0b10000, 0b10000, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010]),
        'l' => caps([0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110]),
        'm' => caps([0b00000, 0b00000, 0b11010, 0b10101, 0b10101, 0b10001, 0b10001]),
        'n' => caps([0b00000, 0b00000, 0b10110, 0b11001, 0b10001, 0b10001, 0b10001]),
        'o' => caps([0b00000, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110]),
        'p' => [0, 0, 0b11110, 0b10001, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000],
        'q' => [0, 0, 0b01111, 0b10001, 0b10001, 0b10001, 0b01111, 0b00001, 0b00001],
        'r' => caps([0b00000, 0b00000, 0b10110, 0b11001, 0b10000, 0b10000, 0b10000]),
        's' => caps([0b00000, 0b00000, 0b01110, 0b10000, 0b01110, 0b00001, 0b11110]),
        't' => caps([0b01000, 0b01000, 0b11100, 0b01000, 0b01000, 0b01001, 0b00110]),
        'u' => caps([0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b10011, 0b01101]),
        'v' => caps([0b00000, 0b00000, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100]),
        'w' => caps([0b00000, 0b00000, 0b10001, 0b10001, 0b10101, 0b10101, 0b01010]),
        'x' => caps([0b00000, 0b00000, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001]),
        'y' => [0, 0, 0b10001, 0b10001, 0b10001, 0b10001, 0b01111, 0b00001, 0b01110],
        'z' => caps([0b00000, 0b00000, 0b11111, 0b00010, 0b00100, 0b01000, 0b11111]),
        ':' => caps([0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000]),
        '.' => caps([0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100]),
        ',' => [0, 0, 0, 0, 0, 0b01100, 0b01100, 0b00100, 0b01000],
        '-' => caps([0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000]),
        '+' => caps([0b00000, 0b00100, 0b00100, 0b11111, 0b00100, 0b00100, 0b00000]),
        '=' => caps([0b00000, 0b00000, 0b11111, 0b00000, 0b11111, 0b00000, 0b00000]),
        '%' => caps([0b11000, 0b11001, 0b00010, 0b00100, 0b01000, 0b10011, 0b00011]),
        '/' => caps([0b00000, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b00000]),
        '(' => caps([0b00010, 0b00100, 0b01000, 0b01000, 0b01000, 0b00100, 0b00010]),
        ')' => caps([0b01000, 0b00100, 0b00010, 0b00010, 0b00010, 0b00100, 0b01000]),
        '\'' => caps([0b01100, 0b00100, 0b01000, 0b00000, 0b00000, 0b00000, 0b00000]),
        '!' => caps([0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100]),
        '_' => [0, 0, 0, 0, 0, 0, 0, 0, 0b11111],
        // Unknown characters render as '?'
        _ => caps([0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100]),
    }
}

// ============================================================================
// TrueType face
// ============================================================================

/// TrueType font drawn with `imageproc`.
pub struct TrueTypeFace {
    font: Font<'static>,
}

impl TrueTypeFace {
    pub fn from_bytes(data: Vec<u8>) -> HeatmapResult<Self> {
        let font = Font::try_from_vec(data)
            .ok_or_else(|| HeatmapError::Font("data is not a valid TrueType font".to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: &Path) -> HeatmapResult<Self> {
        let data = std::fs::read(path)
            .map_err(|e| HeatmapError::Font(format!("{}: {}", path.display(), e)))?;
        Self::from_bytes(data)
    }
}

impl TextFace for TrueTypeFace {
    fn measure(&self, text: &str, px: f32, bold: bool) -> (u32, u32) {
        if text.is_empty() {
            return (0, 0);
        }
        let scale = Scale::uniform(px);
        let v_metrics = self.font.v_metrics(scale);
        let width = self
            .font
            .layout(text, scale, point(0.0, v_metrics.ascent))
            .last()
            .map(|g| g.position().x + g.unpositioned().h_metrics().advance_width)
            .unwrap_or(0.0);
        let height = v_metrics.ascent - v_metrics.descent;
        let extra = if bold { 1.0 } else { 0.0 };
        ((width + extra).ceil() as u32, height.ceil() as u32)
    }

    fn draw(&self, img: &mut RgbaImage, text: &str, x: i32, y: i32, px: f32, color: Rgba<u8>, bold: bool) {
        let scale = Scale::uniform(px);
        draw_text_mut(img, color, x, y, scale, &self.font, text);
        if bold {
            draw_text_mut(img, color, x + 1, y, scale, &self.font, text);
        }
    }
}
