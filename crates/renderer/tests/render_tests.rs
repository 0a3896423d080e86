//! End-to-end rendering tests.
//!
//! Covers the exact output size for both strategies, file overwrite, error
//! cases and determinism.

use heatmap_common::HeatmapError;
use renderer::layout::Figure;
use renderer::text::{load_face, TextFace};
use renderer::{render_heatmap, render_to_file, RenderConfig, ResizeStrategy};
use test_utils::{
    create_constant_table, create_test_table, read_png_header, require_test_file, seed_42_table, temp_output,
};

// ============================================================================
// Output dimensions
// ============================================================================

#[test]
fn test_direct_strategy_writes_512() {
    let out = temp_output("chart.png");
    let config = RenderConfig::default();
    render_to_file(&seed_42_table(), &out.path, &config).unwrap();

    let header = read_png_header(&out.path).expect("valid PNG");
    assert_eq!((header.width, header.height), (512, 512));
}

#[test]
fn test_resample_strategy_writes_512() {
    let out = temp_output("chart.png");
    let config = RenderConfig::default().with_strategy(ResizeStrategy::Resample);
    render_to_file(&seed_42_table(), &out.path, &config).unwrap();

    let header = read_png_header(&out.path).expect("valid PNG");
    assert_eq!((header.width, header.height), (512, 512));
}

#[test]
fn test_custom_target_size() {
    let config = RenderConfig {
        size: 300,
        strategy: ResizeStrategy::Resample,
        ..RenderConfig::default()
    };
    let img = render_heatmap(&seed_42_table(), &config).unwrap();
    assert_eq!(img.dimensions(), (300, 300));

    let config = RenderConfig {
        size: 600,
        direct: Figure::new(6.0, 6.0, 100.0),
        ..RenderConfig::default()
    };
    let img = render_heatmap(&seed_42_table(), &config).unwrap();
    assert_eq!(img.dimensions(), (600, 600));
}

#[test]
fn test_decoded_file_matches_rendered_image() {
    let out = temp_output("chart.png");
    let config = RenderConfig::default();
    let table = seed_42_table();
    render_to_file(&table, &out.path, &config).unwrap();

    let decoded = image::open(&out.path).unwrap().to_rgba8();
    let rendered = render_heatmap(&table, &config).unwrap();
    assert_eq!(decoded.as_raw(), rendered.as_raw());
}

// ============================================================================
// Overwrite and determinism
// ============================================================================

#[test]
fn test_rendering_twice_overwrites() {
    let out = temp_output("chart.png");
    std::fs::write(&out.path, vec![0xAB; 4 * 1024 * 1024]).unwrap();

    let config = RenderConfig::default();
    let first = render_to_file(&seed_42_table(), &out.path, &config).unwrap();
    let second = render_to_file(&seed_42_table(), &out.path, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::metadata(&out.path).unwrap().len() as usize, second);
    let header = read_png_header(&out.path).expect("valid PNG");
    assert_eq!((header.width, header.height), (512, 512));
}

#[test]
fn test_rendering_is_deterministic() {
    for strategy in [ResizeStrategy::Direct, ResizeStrategy::Resample] {
        let config = RenderConfig::default().with_strategy(strategy);
        let a = render_heatmap(&seed_42_table(), &config).unwrap();
        let b = render_heatmap(&seed_42_table(), &config).unwrap();
        assert_eq!(a.as_raw(), b.as_raw(), "strategy {}", strategy);
    }
}

#[test]
fn test_different_tables_differ() {
    let config = RenderConfig::default();
    let a = render_heatmap(&seed_42_table(), &config).unwrap();
    let b = render_heatmap(&create_test_table(7, 9), &config).unwrap();
    assert_ne!(a.as_raw(), b.as_raw());
}

// ============================================================================
// Value ranges
// ============================================================================

#[test]
fn test_constant_table_renders() {
    let img = render_heatmap(&create_constant_table(7, 9, 42), &RenderConfig::default()).unwrap();
    assert_eq!(img.dimensions(), (512, 512));
}

#[test]
fn test_negative_values_render() {
    let table = heatmap_common::EngagementTable::from_rows(
        vec!["Saturday".to_string(), "Sunday".to_string()],
        vec!["09:00".to_string(), "10:00".to_string()],
        vec![vec![-5, 3], vec![0, 120]],
    )
    .unwrap();
    let img = render_heatmap(&table, &RenderConfig::default()).unwrap();
    assert_eq!(img.dimensions(), (512, 512));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_direct_size_mismatch_is_config_error() {
    let config = RenderConfig {
        direct: Figure::new(6.4, 4.8, 100.0),
        ..RenderConfig::default()
    };
    let err = render_heatmap(&seed_42_table(), &config).unwrap_err();
    assert!(matches!(err, HeatmapError::InvalidConfig { .. }), "got {}", err);
}

#[test]
fn test_missing_directory_is_io_error() {
    let out = temp_output("chart.png");
    let path = out.path.with_file_name("missing").join("chart.png");
    let err = render_to_file(&seed_42_table(), &path, &RenderConfig::default()).unwrap_err();
    assert!(err.is_io(), "got {}", err);
    assert!(!path.exists());
}

#[test]
fn test_unreadable_font_is_font_error() {
    let out = temp_output("font.ttf");
    std::fs::write(&out.path, b"definitely not a font").unwrap();
    let config = RenderConfig {
        font: Some(out.path.clone()),
        ..RenderConfig::default()
    };
    let err = render_heatmap(&seed_42_table(), &config).unwrap_err();
    assert!(matches!(err, HeatmapError::Font(_)), "got {}", err);
}

// ============================================================================
// TrueType fonts
// ============================================================================

#[test]
fn test_truetype_face_measures_and_draws() {
    let path = require_test_file!("DejaVuSansMono.ttf");
    let face = load_face(Some(path.as_path())).unwrap();

    let (w, h) = face.measure("Wednesday", 14.0, false);
    assert!(w > 0 && h > 0);
    assert!(face.measure("Wednesday", 14.0, true).0 > w);

    let background = image::Rgba([255, 255, 255, 255]);
    let mut img = image::RgbaImage::from_pixel(w + 4, h + 4, background);
    face.draw(&mut img, "Wednesday", 2, 2, 14.0, image::Rgba([0, 0, 0, 255]), false);
    assert!(img.pixels().any(|p| *p != background));
}

#[test]
fn test_truetype_font_renders_512() {
    let path = require_test_file!("DejaVuSansMono.ttf");
    let table = seed_42_table();

    for strategy in [ResizeStrategy::Direct, ResizeStrategy::Resample] {
        let config = RenderConfig {
            font: Some(path.clone()),
            ..RenderConfig::default()
        }
        .with_strategy(strategy);
        let img = render_heatmap(&table, &config).unwrap();
        assert_eq!(img.dimensions(), (512, 512), "{} strategy", strategy);

        let out = temp_output("chart.png");
        render_to_file(&table, &out.path, &config).unwrap();
        let header = read_png_header(&out.path).expect("valid PNG");
        assert_eq!((header.width, header.height), (512, 512));
    }
}
