//! Exact-size output.
//!
//! A chart is drawn at a figure's native resolution, trimmed to its content
//! and then brought to exactly `size x size` pixels by one of two strategies:
//!
//! - [`ResizeStrategy::Direct`]: the figure already is the target size; the
//!   trimmed chart is centred on a fresh canvas of that size.
//! - [`ResizeStrategy::Resample`]: the figure may be any size; the trimmed
//!   chart is resampled with Lanczos3 to the target.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use heatmap_common::{EngagementTable, HeatmapError, HeatmapResult};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::heatmap::{background_color, render_figure};
use crate::layout::Figure;
use crate::style::HeatmapStyle;
use crate::text::load_face;

/// Default output edge length in pixels.
pub const DEFAULT_SIZE: u32 = 512;

/// Largest accepted output edge and figure canvas edge, in pixels.
pub const MAX_SIZE: u32 = 8192;

/// How the final pixel size is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeStrategy {
    #[default]
    Direct,
    Resample,
}

impl fmt::Display for ResizeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResizeStrategy::Direct => write!(f, "direct"),
            ResizeStrategy::Resample => write!(f, "resample"),
        }
    }
}

impl FromStr for ResizeStrategy {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "direct" => Ok(ResizeStrategy::Direct),
            "resample" => Ok(ResizeStrategy::Resample),
            other => Err(HeatmapError::config(
                "strategy",
                format!("unknown strategy '{}', expected 'direct' or 'resample'", other),
            )),
        }
    }
}

/// Everything needed to turn a table into an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width and height in pixels
    pub size: u32,
    pub strategy: ResizeStrategy,
    /// Figure for the direct strategy; must be exactly `size` pixels
    pub direct: Figure,
    /// Figure for the resample strategy
    pub resample: Figure,
    /// Padding kept around the content when trimming, in inches
    pub crop_pad_in: f32,
    pub style: HeatmapStyle,
    /// TrueType font; the built-in face is used when unset
    pub font: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            strategy: ResizeStrategy::Direct,
            direct: Figure::new(5.12, 5.12, 100.0),
            resample: Figure::new(8.0, 8.0, 150.0),
            crop_pad_in: 0.1,
            style: HeatmapStyle::default(),
            font: None,
        }
    }
}

impl RenderConfig {
    pub fn with_strategy(mut self, strategy: ResizeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Figure used by the selected strategy.
    pub fn figure(&self) -> Figure {
        match self.strategy {
            ResizeStrategy::Direct => self.direct,
            ResizeStrategy::Resample => self.resample,
        }
    }

    pub fn validate(&self) -> HeatmapResult<()> {
        if self.size == 0 {
            return Err(HeatmapError::config("size", "must be at least 1 pixel"));
        }
        if self.size > MAX_SIZE {
            return Err(HeatmapError::config(
                "size",
                format!("{} px exceeds the limit of {} px", self.size, MAX_SIZE),
            ));
        }
        if !(self.crop_pad_in.is_finite() && self.crop_pad_in >= 0.0) {
            return Err(HeatmapError::config("crop_pad_in", "must be zero or positive"));
        }
        let figure = self.figure();
        figure.validate()?;
        let (w, h) = figure.pixel_size();
        if w > MAX_SIZE || h > MAX_SIZE {
            return Err(HeatmapError::config(
                self.strategy.to_string(),
                format!("figure canvas {}x{} px exceeds the limit of {} px", w, h, MAX_SIZE),
            ));
        }
        if self.strategy == ResizeStrategy::Direct && (w, h) != (self.size, self.size) {
            return Err(HeatmapError::config(
                "direct",
                format!(
                    "{}x{} in at {} dpi is {}x{} px, expected {}x{}",
                    figure.width_in, figure.height_in, figure.dpi, w, h, self.size, self.size
                ),
            ));
        }
        self.style.validate()
    }
}

/// Render `table` to an image of exactly `config.size` pixels square.
pub fn render_heatmap(table: &EngagementTable, config: &RenderConfig) -> HeatmapResult<RgbaImage> {
    config.validate()?;
    let face = load_face(config.font.as_deref())?;
    let figure = config.figure();
    let background = background_color(&config.style)?.to_rgba();

    let canvas = render_figure(table, &config.style, face.as_ref(), &figure)?;
    let pad = (config.crop_pad_in * figure.dpi).round() as u32;
    let trimmed = tight_crop(&canvas, background, pad);
    debug!(
        strategy = %config.strategy,
        canvas_width = canvas.width(),
        canvas_height = canvas.height(),
        trimmed_width = trimmed.width(),
        trimmed_height = trimmed.height(),
        "Trimmed figure"
    );

    let out = match config.strategy {
        ResizeStrategy::Direct => pad_to(&trimmed, config.size, config.size, background),
        ResizeStrategy::Resample => imageops::resize(&trimmed, config.size, config.size, FilterType::Lanczos3),
    };

    if out.dimensions() != (config.size, config.size) {
        return Err(HeatmapError::Render(format!(
            "output is {}x{}, expected {}x{}",
            out.width(),
            out.height(),
            config.size,
            config.size
        )));
    }
    Ok(out)
}

/// Render `table` and write it as PNG to `path`, replacing any existing file.
///
/// Returns the number of bytes written.
pub fn render_to_file(table: &EngagementTable, path: &Path, config: &RenderConfig) -> HeatmapResult<usize> {
    let img = render_heatmap(table, config)?;
    let bytes = crate::png::write_png(&img, path)?;
    info!(
        path = %path.display(),
        strategy = %config.strategy,
        width = img.width(),
        height = img.height(),
        bytes,
        "Wrote heatmap"
    );
    Ok(bytes)
}

/// Bounding box `(x0, y0, x1, y1)` (exclusive ends) of pixels that differ
/// from `background`, or `None` for a blank image.
pub fn content_bounds(img: &RgbaImage, background: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (x, y, px) in img.enumerate_pixels() {
        if *px == background {
            continue;
        }
        bounds = Some(match bounds {
            None => (x, y, x + 1, y + 1),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
        });
    }
    bounds
}

/// Trim to the content plus `pad` pixels on each side, within the image.
pub fn tight_crop(img: &RgbaImage, background: Rgba<u8>, pad: u32) -> RgbaImage {
    let Some((x0, y0, x1, y1)) = content_bounds(img, background) else {
        return img.clone();
    };
    let x0 = x0.saturating_sub(pad);
    let y0 = y0.saturating_sub(pad);
    let x1 = (x1 + pad).min(img.width());
    let y1 = (y1 + pad).min(img.height());
    imageops::crop_imm(img, x0, y0, x1 - x0, y1 - y0).to_image()
}

/// Centre `img` on a `width x height` canvas of `background`. Larger images
/// are clipped evenly on both sides.
pub fn pad_to(img: &RgbaImage, width: u32, height: u32, background: Rgba<u8>) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(width, height, background);
    let x = (width as i64 - img.width() as i64) / 2;
    let y = (height as i64 - img.height() as i64) / 2;
    imageops::overlay(&mut canvas, img, x, y);
    canvas
}
