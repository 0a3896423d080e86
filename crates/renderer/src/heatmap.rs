//! Annotated heatmap drawing.
//!
//! Draws one figure at its native resolution: title, coloured cell grid with
//! value annotations, axis labels and a vertical colour bar. Geometry comes
//! from [`Layout`]; final sizing is handled by [`crate::strategy`].

use heatmap_common::{EngagementTable, HeatmapError, HeatmapResult};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::colormap::{normalize, Color};
use crate::layout::{Figure, Layout};
use crate::style::{hex_to_rgb, HeatmapStyle};
use crate::text::{draw_text_rotated, format_value_with_decimals, TextFace};

/// Figure background as a colour.
pub fn background_color(style: &HeatmapStyle) -> HeatmapResult<Color> {
    let (r, g, b) = hex_to_rgb(&style.background).ok_or_else(|| {
        HeatmapError::config("background", format!("invalid hex color '{}'", style.background))
    })?;
    Ok(Color::rgb(r, g, b))
}

/// Render `table` onto a canvas of the figure's pixel size.
pub fn render_figure(
    table: &EngagementTable,
    style: &HeatmapStyle,
    face: &dyn TextFace,
    figure: &Figure,
) -> HeatmapResult<RgbaImage> {
    style.validate()?;
    let layout = Layout::compute(table, style, face, figure)?;
    let cmap = style.palette.colormap()?;
    let background = background_color(style)?.to_rgba();
    let ink = Color::INK.to_rgba();

    let mut img = RgbaImage::from_pixel(layout.width, layout.height, background);
    let (min, max) = (table.min() as f64, table.max() as f64);

    // Cells and annotations
    for (r, row) in table.iter_rows().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let cell = layout.cell_rect(r, c);
            let fill = cmap.color_for(*value as f64, min, max);
            fill_span(&mut img, cell.x, cell.y, cell.right(), cell.bottom(), fill.to_rgba());

            let label = value.to_string();
            let (tw, th) = face.measure(&label, layout.text.annotation, false);
            let tx = cell.x + (cell.w - tw as f32) / 2.0;
            let ty = cell.y + (cell.h - th as f32) / 2.0;
            face.draw(
                &mut img,
                &label,
                tx.round() as i32,
                ty.round() as i32,
                layout.text.annotation,
                fill.contrasting_text().to_rgba(),
                false,
            );
        }
    }
    draw_separators(&mut img, table, &layout, background);

    // Row labels, right-aligned against the grid
    for (r, label) in table.row_labels().iter().enumerate() {
        let cell = layout.cell_rect(r, 0);
        let (tw, th) = face.measure(label, layout.text.tick, false);
        let x = layout.y_ticks_right - tw as f32;
        let y = cell.y + (cell.h - th as f32) / 2.0;
        face.draw(&mut img, label, x.round() as i32, y.round() as i32, layout.text.tick, ink, false);
    }

    // Column labels, centred under each column
    for (c, label) in table.column_labels().iter().enumerate() {
        let cell = layout.cell_rect(0, c);
        let centre = cell.x + cell.w / 2.0;
        let (tw, th) = face.measure(label, layout.text.tick, false);
        if layout.rotate_x_ticks {
            let x = centre - th as f32 / 2.0;
            draw_text_rotated(
                &mut img,
                face,
                label,
                x.round() as i32,
                layout.x_ticks_top.round() as i32,
                layout.text.tick,
                ink,
                false,
                background,
            );
        } else {
            let x = centre - tw as f32 / 2.0;
            face.draw(
                &mut img,
                label,
                x.round() as i32,
                layout.x_ticks_top.round() as i32,
                layout.text.tick,
                ink,
                false,
            );
        }
    }

    // Axis captions
    let (lx, ly) = layout.y_label_pos;
    draw_text_rotated(
        &mut img,
        face,
        &style.y_label,
        lx.round() as i32,
        ly.round() as i32,
        layout.text.label,
        ink,
        false,
        background,
    );
    let (lx, ly) = layout.x_label_pos;
    face.draw(&mut img, &style.x_label, lx.round() as i32, ly.round() as i32, layout.text.label, ink, false);

    for (line, (x, y)) in style.title.iter().zip(layout.title_lines.iter()) {
        face.draw(&mut img, line, x.round() as i32, y.round() as i32, layout.text.title, ink, true);
    }

    draw_colorbar(&mut img, style, face, &layout, &cmap, min, max, background);

    Ok(img)
}

/// White (background) lines between adjacent cells.
fn draw_separators(img: &mut RgbaImage, table: &EngagementTable, layout: &Layout, color: Rgba<u8>) {
    let half = layout.line_px as f32 / 2.0;
    let grid = layout.grid;
    for c in 1..table.n_cols() {
        let x = grid.x + c as f32 * layout.cell_w;
        fill_span(img, x - half, grid.y, x + half, grid.bottom(), color);
    }
    for r in 1..table.n_rows() {
        let y = grid.y + r as f32 * layout.cell_h;
        fill_span(img, grid.x, y - half, grid.right(), y + half, color);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_colorbar(
    img: &mut RgbaImage,
    style: &HeatmapStyle,
    face: &dyn TextFace,
    layout: &Layout,
    cmap: &crate::colormap::Colormap,
    min: f64,
    max: f64,
    background: Rgba<u8>,
) {
    let ink = Color::INK.to_rgba();
    let bar = layout.colorbar;
    let top = bar.y.round() as i32;
    let bottom = bar.bottom().round() as i32;
    let left = bar.x.round() as i32;
    let right = bar.right().round() as i32;
    let width = (right - left).max(1) as u32;

    // High values at the top
    for y in top..bottom {
        let t = 1.0 - ((y - top) as f32 + 0.5) / (bottom - top) as f32;
        let color = cmap.sample(t).to_rgba();
        draw_filled_rect_mut(img, Rect::at(left, y).of_size(width, 1), color);
    }
    if bottom > top {
        draw_hollow_rect_mut(img, Rect::at(left, top).of_size(width, (bottom - top) as u32), ink);
    }

    for tick in &layout.cbar_ticks {
        let y = bar.bottom() - normalize(*tick, min, max) * bar.h;
        fill_span(img, bar.right(), y - 0.5, bar.right() + layout.tick_len, y + 0.5, ink);

        let label = format_value_with_decimals(*tick, layout.cbar_decimals);
        let (_, th) = face.measure(&label, layout.text.tick, false);
        let ly = y - th as f32 / 2.0;
        face.draw(
            img,
            &label,
            layout.cbar_ticks_left.round() as i32,
            ly.round() as i32,
            layout.text.tick,
            ink,
            false,
        );
    }

    let (lx, ly) = layout.cbar_label_pos;
    draw_text_rotated(
        img,
        face,
        &style.colorbar_label,
        lx.round() as i32,
        ly.round() as i32,
        layout.text.label,
        ink,
        false,
        background,
    );
}

/// Fill the pixels covered by `[x0, x1) x [y0, y1)` after rounding to the
/// pixel grid. Always covers at least one pixel in each direction.
fn fill_span(img: &mut RgbaImage, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba<u8>) {
    let (x0, x1) = (x0.round() as i32, x1.round() as i32);
    let (y0, y1) = (y0.round() as i32, y1.round() as i32);
    let w = (x1 - x0).max(1) as u32;
    let h = (y1 - y0).max(1) as u32;
    draw_filled_rect_mut(img, Rect::at(x0, y0).of_size(w, h), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::BitmapFace;

    fn small_table() -> EngagementTable {
        EngagementTable::from_rows(
            vec!["A".to_string(), "B".to_string()],
            vec!["x".to_string(), "y".to_string()],
            vec![vec![0, 10], vec![20, 30]],
        )
        .unwrap()
    }

    #[test]
    fn test_canvas_matches_figure() {
        let img = render_figure(&small_table(), &HeatmapStyle::default(), &BitmapFace, &Figure::new(4.0, 3.0, 50.0))
            .unwrap();
        assert_eq!(img.dimensions(), (200, 150));
    }

    #[test]
    fn test_extreme_cells_use_palette_ends() {
        let style = HeatmapStyle::default();
        let figure = Figure::new(5.12, 5.12, 100.0);
        let table = small_table();
        let img = render_figure(&table, &style, &BitmapFace, &figure).unwrap();
        let layout = Layout::compute(&table, &style, &BitmapFace, &figure).unwrap();
        let cmap = style.palette.colormap().unwrap();

        // Sample near a cell corner, away from the annotation
        let corner = |r, c| {
            let cell = layout.cell_rect(r, c);
            *img.get_pixel((cell.x + 3.0) as u32, (cell.y + 3.0) as u32)
        };
        assert_eq!(corner(0, 0), cmap.sample(0.0).to_rgba());
        assert_eq!(corner(1, 1), cmap.sample(1.0).to_rgba());
    }

    #[test]
    fn test_tiny_figure_fails() {
        let result = render_figure(&small_table(), &HeatmapStyle::default(), &BitmapFace, &Figure::new(0.5, 0.5, 50.0));
        assert!(matches!(result, Err(HeatmapError::Render(_))));
    }
}
