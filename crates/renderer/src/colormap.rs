//! Colour scales for heatmap cells and the colour bar.

use heatmap_common::{HeatmapError, HeatmapResult};
use image::Rgba;
use serde::{Deserialize, Serialize};

use crate::style::{hex_to_rgb, ColorStop};

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    /// Dark gray used for labels and light-cell annotations
    pub const INK: Color = Color::new(38, 38, 38, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// WCAG relative luminance of the sRGB color, in `[0, 1]`.
    pub fn relative_luminance(&self) -> f32 {
        fn linear(c: u8) -> f32 {
            let c = c as f32 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }

    /// Annotation color readable on top of this cell color.
    pub fn contrasting_text(&self) -> Color {
        if self.relative_luminance() > 0.408 {
            Color::INK
        } else {
            Color::WHITE
        }
    }
}

/// Linear color interpolation
pub fn interpolate_color(color1: Color, color2: Color, t: f32) -> Color {
    let t = t.max(0.0).min(1.0);
    let t_inv = 1.0 - t;

    Color::new(
        ((color1.r as f32 * t_inv) + (color2.r as f32 * t)).round() as u8,
        ((color1.g as f32 * t_inv) + (color2.g as f32 * t)).round() as u8,
        ((color1.b as f32 * t_inv) + (color2.b as f32 * t)).round() as u8,
        ((color1.a as f32 * t_inv) + (color2.a as f32 * t)).round() as u8,
    )
}

// ColorBrewer 9-class sequential schemes
const YL_GN_BU: [&str; 9] = [
    "#ffffd9", "#edf8b1", "#c7e9b4", "#7fcdbb", "#41b6c4", "#1d91c0", "#225ea8", "#253494",
    "#081d58",
];
const YL_OR_RD: [&str; 9] = [
    "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
    "#800026",
];
const BLUES: [&str; 9] = [
    "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5", "#08519c",
    "#08306b",
];

/// Names accepted by [`Colormap::named`].
pub const PALETTE_NAMES: [&str; 3] = ["YlGnBu", "YlOrRd", "Blues"];

/// Piecewise-linear colour scale over the unit interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    /// Positions in `[0, 1]`, ascending
    positions: Vec<f32>,
    colors: Vec<Color>,
}

impl Colormap {
    /// Evenly spaced colours from hex strings.
    fn from_hex_evenly(hex: &[&str]) -> HeatmapResult<Self> {
        let n = hex.len();
        let stops: Vec<ColorStop> = hex
            .iter()
            .enumerate()
            .map(|(i, h)| ColorStop {
                value: if n > 1 { i as f32 / (n - 1) as f32 } else { 0.0 },
                color: h.to_string(),
            })
            .collect();
        Self::from_stops(&stops)
    }

    /// One of the built-in palettes (case-insensitive).
    pub fn named(name: &str) -> HeatmapResult<Self> {
        match name.to_ascii_lowercase().as_str() {
            "ylgnbu" => Self::from_hex_evenly(&YL_GN_BU),
            "ylorrd" => Self::from_hex_evenly(&YL_OR_RD),
            "blues" => Self::from_hex_evenly(&BLUES),
            _ => Err(HeatmapError::config(
                "palette",
                format!("unknown palette '{}', expected one of {:?}", name, PALETTE_NAMES),
            )),
        }
    }

    /// Build from color stops. Stop values are rescaled to `[0, 1]`, so any
    /// ascending scale works.
    pub fn from_stops(stops: &[ColorStop]) -> HeatmapResult<Self> {
        if stops.is_empty() {
            return Err(HeatmapError::config("palette", "at least one color stop is required"));
        }

        let mut stops = stops.to_vec();
        stops.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap_or(std::cmp::Ordering::Equal));

        let mut colors = Vec::with_capacity(stops.len());
        for stop in &stops {
            let (r, g, b) = hex_to_rgb(&stop.color).ok_or_else(|| {
                HeatmapError::config("palette", format!("invalid hex color '{}'", stop.color))
            })?;
            colors.push(Color::rgb(r, g, b));
        }

        let lo = stops[0].value;
        let hi = stops[stops.len() - 1].value;
        let span = hi - lo;
        let positions = stops
            .iter()
            .map(|s| if span.abs() < f32::EPSILON { 0.0 } else { (s.value - lo) / span })
            .collect();

        Ok(Self { positions, colors })
    }

    /// Color at `t` in `[0, 1]` (clamped).
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = self.colors.len() - 1;
        if last == 0 || t <= self.positions[0] {
            return self.colors[0];
        }
        if t >= self.positions[last] {
            return self.colors[last];
        }

        let upper = self.positions.iter().position(|p| *p >= t).unwrap_or(last);
        let lower = upper.saturating_sub(1);
        let (p0, p1) = (self.positions[lower], self.positions[upper]);
        if (p1 - p0).abs() < f32::EPSILON {
            return self.colors[upper];
        }
        interpolate_color(self.colors[lower], self.colors[upper], (t - p0) / (p1 - p0))
    }

    /// Color for `value` on a scale spanning `min..=max`. A degenerate range
    /// maps everything to the low end.
    pub fn color_for(&self, value: f64, min: f64, max: f64) -> Color {
        self.sample(normalize(value, min, max))
    }
}

/// Position of `value` within `min..=max`, clamped to `[0, 1]`.
pub fn normalize(value: f64, min: f64, max: f64) -> f32 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return 0.0;
    }
    ((value - min) / range).clamp(0.0, 1.0) as f32
}
