//! Tests for style loading and palettes.

use renderer::colormap::{Color, Colormap, PALETTE_NAMES};
use renderer::style::{ColorStop, HeatmapStyle, PaletteSpec};
use renderer::{RenderConfig, ResizeStrategy};
use test_utils::assert_approx_eq;

// ============================================================================
// Style files
// ============================================================================

#[test]
fn test_partial_yaml_keeps_defaults() {
    let style = HeatmapStyle::from_yaml("palette: Blues\ntick_size: 8\n").unwrap();
    assert_eq!(style.palette, PaletteSpec::Named("Blues".to_string()));
    assert_approx_eq!(style.tick_size, 8.0, 1e-6);
    assert_eq!(style.colorbar_label, "Engagement Score");
    assert_eq!(style.title.len(), 2);
}

#[test]
fn test_custom_stops_from_yaml() {
    let yaml = r##"
palette:
  - value: 0
    color: "#000000"
  - value: 200
    color: "#ffffff"
"##;
    let style = HeatmapStyle::from_yaml(yaml).unwrap();
    let stop = |value: f32, color: &str| ColorStop { value, color: color.to_string() };
    assert_eq!(style.palette, PaletteSpec::Stops(vec![stop(0.0, "#000000"), stop(200.0, "#ffffff")]));
    let cmap = style.palette.colormap().unwrap();
    assert_eq!(cmap.sample(0.0), Color::rgb(0, 0, 0));
    assert_eq!(cmap.sample(0.5), Color::rgb(128, 128, 128));
    assert_eq!(cmap.sample(1.0), Color::rgb(255, 255, 255));
}

#[test]
fn test_json_style_is_accepted() {
    let style = HeatmapStyle::from_yaml(r#"{"title": ["One line"], "x_label": "Hour"}"#).unwrap();
    assert_eq!(style.title, vec!["One line".to_string()]);
    assert_eq!(style.x_label, "Hour");
}

#[test]
fn test_invalid_styles_are_rejected() {
    let bad_palette = HeatmapStyle::from_yaml("palette: Viridis").unwrap();
    assert!(bad_palette.validate().is_err());

    let bad_background = HeatmapStyle::from_yaml("background: '#12345'").unwrap();
    assert!(bad_background.validate().is_err());

    let bad_size = HeatmapStyle::from_yaml("title_size: 0").unwrap();
    assert!(bad_size.validate().is_err());

    assert!(HeatmapStyle::from_yaml("title_size: [1, 2]").is_err());
}

// ============================================================================
// Render configuration
// ============================================================================

#[test]
fn test_render_config_from_yaml() {
    let yaml = r#"
strategy: resample
size: 256
resample:
  width_in: 6
  height_in: 4
  dpi: 200
style:
  palette: YlOrRd
"#;
    let config: RenderConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.strategy, ResizeStrategy::Resample);
    assert_eq!(config.size, 256);
    assert_eq!(config.figure().pixel_size(), (1200, 800));
    assert_eq!(config.style.palette, PaletteSpec::Named("YlOrRd".to_string()));
    assert!(config.validate().is_ok());
}

// ============================================================================
// Palettes
// ============================================================================

#[test]
fn test_every_named_palette_loads() {
    for name in PALETTE_NAMES {
        let cmap = Colormap::named(name).unwrap();
        // Sequential palettes go from light to dark
        assert!(cmap.sample(0.0).relative_luminance() > cmap.sample(1.0).relative_luminance());
    }
    assert!(Colormap::named("ylgnbu").is_ok());
}

#[test]
fn test_annotation_contrast_flips_along_ylgnbu() {
    let cmap = Colormap::named("YlGnBu").unwrap();
    assert_eq!(cmap.color_for(2.0, 2.0, 148.0).contrasting_text(), Color::INK);
    assert_eq!(cmap.color_for(148.0, 2.0, 148.0).contrasting_text(), Color::WHITE);
}
