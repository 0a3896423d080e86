//! Figure geometry: physical size, and where every chart element goes.
//!
//! Sizes in the style are points; they are converted to pixels with the
//! figure's dpi, so the same style looks alike at any resolution.

use heatmap_common::{EngagementTable, HeatmapError, HeatmapResult};
use serde::{Deserialize, Serialize};

use crate::style::HeatmapStyle;
use crate::text::TextFace;

/// Outer margin around the whole figure, in points.
const FIGURE_PAD_PT: f32 = 7.2;
/// Gap between an axis caption and its tick labels, in points.
const LABEL_GAP_PT: f32 = 4.0;
/// Gap between tick labels and the grid or colour bar, in points.
const TICK_GAP_PT: f32 = 3.5;
/// Colour bar tick mark length, in points.
pub const TICK_LEN_PT: f32 = 3.5;
/// Fraction of the title size left between title lines.
const TITLE_LINE_GAP: f32 = 0.2;
/// Colour bar width and its distance from the grid, as fractions of the figure width.
const CBAR_WIDTH_FRAC: f32 = 0.035;
const CBAR_PAD_FRAC: f32 = 0.025;
/// Column labels rotate when wider than this share of a cell.
const ROTATE_THRESHOLD: f32 = 0.9;
/// Target number of colour bar ticks.
const CBAR_TICKS: usize = 5;

/// Physical figure size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: f32,
}

impl Figure {
    pub const fn new(width_in: f32, height_in: f32, dpi: f32) -> Self {
        Self { width_in, height_in, dpi }
    }

    /// Canvas size in whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    /// Convert points to pixels.
    pub fn pt(&self, points: f32) -> f32 {
        points * self.dpi / 72.0
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        for (name, v) in [("width_in", self.width_in), ("height_in", self.height_in), ("dpi", self.dpi)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(HeatmapError::config(name, format!("must be positive, got {}", v)));
            }
        }
        Ok(())
    }
}

/// Axis-aligned box in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PxRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl PxRect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Pixel sizes for each text role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextSizes {
    pub title: f32,
    pub label: f32,
    pub tick: f32,
    pub annotation: f32,
}

/// Resolved positions of every chart element.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub text: TextSizes,
    /// Top-left of each title line
    pub title_lines: Vec<(f32, f32)>,
    pub grid: PxRect,
    pub cell_w: f32,
    pub cell_h: f32,
    /// Separator width between cells
    pub line_px: u32,
    /// Right edge of the row labels
    pub y_ticks_right: f32,
    /// Top of the column labels
    pub x_ticks_top: f32,
    pub rotate_x_ticks: bool,
    /// Top-left of the rotated row caption
    pub y_label_pos: (f32, f32),
    /// Top-left of the column caption
    pub x_label_pos: (f32, f32),
    pub colorbar: PxRect,
    pub tick_len: f32,
    /// Left edge of the colour bar tick labels
    pub cbar_ticks_left: f32,
    /// Top-left of the rotated colour bar caption
    pub cbar_label_pos: (f32, f32),
    pub cbar_ticks: Vec<f64>,
    pub cbar_decimals: u32,
}

impl Layout {
    /// Place the title, axes, grid and colour bar on a `figure`-sized canvas.
    pub fn compute(
        table: &EngagementTable,
        style: &HeatmapStyle,
        face: &dyn TextFace,
        figure: &Figure,
    ) -> HeatmapResult<Self> {
        figure.validate()?;
        let (width, height) = figure.pixel_size();
        let (w, h) = (width as f32, height as f32);

        let text = TextSizes {
            title: figure.pt(style.title_size),
            label: figure.pt(style.label_size),
            tick: figure.pt(style.tick_size),
            annotation: figure.pt(style.annotation_size),
        };
        let pad = figure.pt(FIGURE_PAD_PT);
        let label_gap = figure.pt(LABEL_GAP_PT);
        let tick_gap = figure.pt(TICK_GAP_PT);
        let tick_len = figure.pt(TICK_LEN_PT);

        // Title block, centred horizontally
        let mut title_lines = Vec::with_capacity(style.title.len());
        let mut y = pad;
        for (i, line) in style.title.iter().enumerate() {
            let (lw, lh) = face.measure(line, text.title, true);
            if i > 0 {
                y += text.title * TITLE_LINE_GAP;
            }
            title_lines.push(((w - lw as f32) / 2.0, y));
            y += lh as f32;
        }
        let grid_top = if style.title.is_empty() { pad } else { y + figure.pt(style.title_pad) };

        // Left: rotated caption, row labels
        let y_label_thick = face.measure(&style.y_label, text.label, false).1 as f32;
        let y_ticks_w = max_width(face, table.row_labels(), text.tick);
        let y_label_x = pad;
        let y_ticks_right = y_label_x + y_label_thick + label_gap + y_ticks_w;
        let grid_left = y_ticks_right + tick_gap;

        // Right: colour bar, its ticks, rotated caption
        let (min, max) = (table.min() as f64, table.max() as f64);
        let cbar_ticks = nice_ticks(min, max, CBAR_TICKS);
        let cbar_decimals = tick_decimals(&cbar_ticks);
        let tick_labels: Vec<String> = cbar_ticks
            .iter()
            .map(|v| crate::text::format_value_with_decimals(*v, cbar_decimals))
            .collect();
        let cbar_ticks_w = max_width(face, tick_labels.as_slice(), text.tick);
        let cbar_label_thick = face.measure(&style.colorbar_label, text.label, false).1 as f32;
        let cbar_w = (w * CBAR_WIDTH_FRAC).max(1.0);
        let cbar_right_extent = tick_len + tick_gap + cbar_ticks_w + label_gap + cbar_label_thick + pad;
        let cbar_x = w - cbar_right_extent - cbar_w;
        let grid_right = cbar_x - w * CBAR_PAD_FRAC;

        let grid_w = grid_right - grid_left;
        let cols = table.n_cols() as f32;
        if grid_w < cols {
            return Err(HeatmapError::Render(format!(
                "figure {}x{} px is too narrow for {} columns",
                width, height, table.n_cols()
            )));
        }
        let cell_w = grid_w / cols;

        // Bottom: column labels, caption
        let x_ticks_w = max_width(face, table.column_labels(), text.tick);
        let rotate_x_ticks = x_ticks_w > cell_w * ROTATE_THRESHOLD;
        let x_ticks_band = if rotate_x_ticks {
            x_ticks_w
        } else {
            max_height(face, table.column_labels(), text.tick)
        };
        let (x_label_w, x_label_h) = face.measure(&style.x_label, text.label, false);
        let x_label_y = h - pad - x_label_h as f32;
        let x_ticks_top = x_label_y - label_gap - x_ticks_band;
        let grid_bottom = x_ticks_top - tick_gap;

        let grid_h = grid_bottom - grid_top;
        let rows = table.n_rows() as f32;
        if grid_h < rows {
            return Err(HeatmapError::Render(format!(
                "figure {}x{} px is too short for {} rows",
                width, height, table.n_rows()
            )));
        }
        let cell_h = grid_h / rows;
        let grid = PxRect { x: grid_left, y: grid_top, w: grid_w, h: grid_h };

        let y_label_len = face.measure(&style.y_label, text.label, false).0 as f32;
        let cbar_label_len = face.measure(&style.colorbar_label, text.label, false).0 as f32;
        let colorbar = PxRect { x: cbar_x, y: grid_top, w: cbar_w, h: grid_h };
        let cbar_ticks_left = colorbar.right() + tick_len + tick_gap;

        let layout = Self {
            width,
            height,
            text,
            title_lines,
            grid,
            cell_w,
            cell_h,
            line_px: figure.pt(style.line_width).round().max(1.0) as u32,
            y_ticks_right,
            x_ticks_top,
            rotate_x_ticks,
            y_label_pos: (y_label_x, grid.y + (grid.h - y_label_len) / 2.0),
            x_label_pos: (grid.x + (grid.w - x_label_w as f32) / 2.0, x_label_y),
            colorbar,
            tick_len,
            cbar_ticks_left,
            cbar_label_pos: (
                cbar_ticks_left + cbar_ticks_w + label_gap,
                colorbar.y + (colorbar.h - cbar_label_len) / 2.0,
            ),
            cbar_ticks,
            cbar_decimals,
        };
        tracing::debug!(
            width,
            height,
            grid_x = grid.x,
            grid_y = grid.y,
            cell_w,
            cell_h,
            rotate_x_ticks,
            "Computed heatmap layout"
        );
        Ok(layout)
    }

    /// Pixel box of cell (row, col), before separators are drawn.
    pub fn cell_rect(&self, row: usize, col: usize) -> PxRect {
        PxRect {
            x: self.grid.x + col as f32 * self.cell_w,
            y: self.grid.y + row as f32 * self.cell_h,
            w: self.cell_w,
            h: self.cell_h,
        }
    }
}

fn max_width<S: AsRef<str>>(face: &dyn TextFace, labels: &[S], px: f32) -> f32 {
    labels.iter().map(|l| face.measure(l.as_ref(), px, false).0).max().unwrap_or(0) as f32
}

fn max_height<S: AsRef<str>>(face: &dyn TextFace, labels: &[S], px: f32) -> f32 {
    labels.iter().map(|l| face.measure(l.as_ref(), px, false).1).max().unwrap_or(0) as f32
}

/// Round tick values within `[min, max]`.
///
/// The step is the smallest of 1, 2, 2.5, 5 and 10 times a power of ten that
/// yields at most `target + 1` ticks. A degenerate range has the single tick
/// `min`.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !(min.is_finite() && max.is_finite()) || max <= min || target == 0 {
        return vec![min];
    }

    let span = max - min;
    let magnitude = 10f64.powf((span / target as f64).log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| count_ticks(min, max, *step) <= target + 1)
        .unwrap_or(10.0 * magnitude);

    // Start from first multiple of step at or above min
    let start = (min / step - 1e-9).ceil() * step;
    let mut ticks = Vec::new();
    let mut i = 0;
    loop {
        let tick = start + i as f64 * step;
        if tick > max + step * 1e-9 {
            break;
        }
        // Avoid "-0"
        ticks.push(if tick.abs() < step * 1e-9 { 0.0 } else { tick });
        i += 1;
    }
    ticks
}

fn count_ticks(min: f64, max: f64, step: f64) -> usize {
    let first = (min / step - 1e-9).ceil();
    let last = (max / step + 1e-9).floor();
    if last < first {
        0
    } else {
        (last - first) as usize + 1
    }
}

/// Decimal places needed to print every tick exactly (at most 2).
pub fn tick_decimals(ticks: &[f64]) -> u32 {
    (0..=2)
        .find(|d| {
            let scale = 10f64.powi(*d as i32);
            ticks.iter().all(|t| ((t * scale).round() - t * scale).abs() < 1e-6)
        })
        .unwrap_or(2)
}
