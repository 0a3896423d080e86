//! Style configuration for heatmap rendering.
//!
//! Every field has a default, so a style file only needs the keys it changes.

use heatmap_common::{HeatmapError, HeatmapResult};
use serde::{Deserialize, Serialize};

use crate::colormap::Colormap;

/// Color stop for a custom palette
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ColorStop {
    pub value: f32,
    pub color: String,
}

/// Either a built-in palette name or explicit stops.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PaletteSpec {
    Named(String),
    Stops(Vec<ColorStop>),
}

impl Default for PaletteSpec {
    fn default() -> Self {
        PaletteSpec::Named("YlGnBu".to_string())
    }
}

impl PaletteSpec {
    pub fn colormap(&self) -> HeatmapResult<Colormap> {
        match self {
            PaletteSpec::Named(name) => Colormap::named(name),
            PaletteSpec::Stops(stops) => Colormap::from_stops(stops),
        }
    }
}

/// Text, palette and font sizes of the figure.
///
/// Font sizes are in points and scale with the figure's dpi.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HeatmapStyle {
    /// Title, one entry per line
    pub title: Vec<String>,
    pub x_label: String,
    pub y_label: String,
    pub colorbar_label: String,
    pub palette: PaletteSpec,
    pub title_size: f32,
    /// Space between the title and the grid
    pub title_pad: f32,
    pub label_size: f32,
    pub tick_size: f32,
    pub annotation_size: f32,
    /// Width of the separators between cells
    pub line_width: f32,
    /// Figure background
    pub background: String,
}

impl Default for HeatmapStyle {
    fn default() -> Self {
        Self {
            title: vec![
                "Customer Engagement Patterns".to_string(),
                "by Day and Hour".to_string(),
            ],
            x_label: "Hour of Day".to_string(),
            y_label: "Day of Week".to_string(),
            colorbar_label: "Engagement Score".to_string(),
            palette: PaletteSpec::default(),
            title_size: 14.0,
            title_pad: 15.0,
            label_size: 12.0,
            tick_size: 10.0,
            annotation_size: 9.0,
            line_width: 0.5,
            background: "#ffffff".to_string(),
        }
    }
}

impl HeatmapStyle {
    /// Load a style from a YAML string (JSON is valid YAML too).
    pub fn from_yaml(yaml: &str) -> HeatmapResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| HeatmapError::config("style", e.to_string()))
    }

    /// Check sizes and colors.
    pub fn validate(&self) -> HeatmapResult<()> {
        let sizes = [
            ("title_size", self.title_size),
            ("label_size", self.label_size),
            ("tick_size", self.tick_size),
            ("annotation_size", self.annotation_size),
        ];
        for (name, size) in sizes {
            if !(size.is_finite() && size > 0.0) {
                return Err(HeatmapError::config(name, format!("must be positive, got {}", size)));
            }
        }
        if !(self.line_width.is_finite() && self.line_width >= 0.0) {
            return Err(HeatmapError::config("line_width", "must be zero or positive"));
        }
        if hex_to_rgb(&self.background).is_none() {
            return Err(HeatmapError::config(
                "background",
                format!("invalid hex color '{}'", self.background),
            ));
        }
        self.palette.colormap().map(|_| ())
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("#00FF00"), Some((0, 255, 0)));
        assert_eq!(hex_to_rgb("#0000FF"), Some((0, 0, 255)));
        assert_eq!(hex_to_rgb("FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
    }

    #[test]
    fn test_default_style_is_valid() {
        assert!(HeatmapStyle::default().validate().is_ok());
    }
}
