//! Tests for PNG encoding.
//!
//! Checks format selection (indexed vs RGBA), chunk layout and that the
//! output decodes back to the same pixels.

use image::{Rgba, RgbaImage};
use renderer::png::{create_png, create_png_auto, create_png_indexed, encode_image, write_png};
use test_utils::{parse_png_header, png_chunk_types, read_png_header, temp_output};

/// A flat-coloured chart-like image with `bands` distinct colours.
fn banded_image(width: u32, height: u32, bands: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let band = (x * bands / width) as u8;
        Rgba([band, 255 - band, 128, 255])
    })
}

/// An image with one distinct colour per pixel.
fn noisy_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, (x ^ y) as u8, 255]))
}

#[test]
fn test_few_colors_use_indexed_png() {
    let img = banded_image(32, 16, 9);
    let bytes = encode_image(&img).unwrap();

    let header = parse_png_header(&bytes).unwrap();
    assert_eq!((header.width, header.height), (32, 16));
    assert_eq!(header.color_type, 3);
    assert_eq!(png_chunk_types(&bytes), vec!["IHDR", "PLTE", "IDAT", "IEND"]);
}

#[test]
fn test_many_colors_fall_back_to_rgba() {
    let img = noisy_image(64, 64);
    let bytes = encode_image(&img).unwrap();

    let header = parse_png_header(&bytes).unwrap();
    assert_eq!(header.color_type, 6);
    assert_eq!(png_chunk_types(&bytes), vec!["IHDR", "IDAT", "IEND"]);
}

#[test]
fn test_transparency_adds_trns() {
    let mut img = banded_image(8, 8, 2);
    img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));
    let bytes = encode_image(&img).unwrap();
    assert!(png_chunk_types(&bytes).contains(&"tRNS".to_string()));
}

#[test]
fn test_indexed_output_decodes_to_same_pixels() {
    // Large enough for the parallel palette path
    let img = banded_image(200, 100, 40);
    let bytes = create_png_auto(img.as_raw(), 200, 100).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw(), img.as_raw());
}

#[test]
fn test_rgba_output_decodes_to_same_pixels() {
    let img = noisy_image(40, 30);
    let bytes = create_png(img.as_raw(), 40, 30).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.as_raw(), img.as_raw());
}

#[test]
fn test_indexed_rejects_bad_input() {
    assert!(create_png_indexed(2, 2, &[], &[0, 0, 0, 0]).is_err());
    assert!(create_png_indexed(2, 2, &[[0, 0, 0, 255]], &[0, 0, 0]).is_err());
}

#[test]
fn test_write_png_replaces_file() {
    let out = temp_output("out.png");
    std::fs::write(&out.path, vec![1u8; 100_000]).unwrap();

    let written = write_png(&banded_image(10, 10, 3), &out.path).unwrap();
    assert_eq!(std::fs::metadata(&out.path).unwrap().len() as usize, written);
    assert_eq!(read_png_header(&out.path).unwrap().width, 10);
}
