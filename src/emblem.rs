//! Brand emblems shared by the launcher assets: the score-sheet grid and the
//! tilted mahjong tile.
//!
//! Geometry here is expressed as fractions of the emblem's own box, truncated
//! to pixels, so the same artwork scales from the 8x favicon render up to the
//! 1024px icon.

use crate::{
    canvas::Canvas,
    core::{Rect, Rgba},
    error::AppshotResult,
    shape::{self, ShadowSpec},
    text::{Align, FontFamily, FontSpec, TextEngine, draw_text},
    theme::Theme,
};

/// Score-sheet grid dimensions. Fewer rows/cols keeps the grid legible on
/// small renders.
#[derive(Clone, Copy, Debug)]
pub struct SheetSpec {
    pub rect: Rect,
    pub rows: u32,
    pub cols: u32,
    /// "SCORE" title size in pixels.
    pub title_px: f32,
}

fn frac(v: f64) -> i32 {
    v as i32
}

/// Horizontal line of `width` px centered on `y`.
fn hline(canvas: &mut Canvas, x0: i32, x1: i32, y: i32, width: i32, color: Rgba) -> AppshotResult<()> {
    shape::fill_rect(canvas, Rect::new(x0, y - width / 2, x1 - x0, width), color)
}

/// Vertical line of `width` px centered on `x`.
fn vline(canvas: &mut Canvas, x: i32, y0: i32, y1: i32, width: i32, color: Rgba) -> AppshotResult<()> {
    shape::fill_rect(canvas, Rect::new(x - width / 2, y0, width, y1 - y0), color)
}

/// Rectangular outline stroked inward.
fn stroke_rect(canvas: &mut Canvas, rect: Rect, width: i32, color: Rgba) -> AppshotResult<()> {
    shape::fill_rect(canvas, Rect::new(rect.x, rect.y, rect.w, width), color)?;
    shape::fill_rect(
        canvas,
        Rect::new(rect.x, rect.bottom() - width, rect.w, width),
        color,
    )?;
    shape::fill_rect(canvas, Rect::new(rect.x, rect.y, width, rect.h), color)?;
    shape::fill_rect(
        canvas,
        Rect::new(rect.right() - width, rect.y, width, rect.h),
        color,
    )
}

/// Paint the paper score sheet: drop shadow, white panel, "SCORE" title,
/// zebra-striped grid with a numbered first column.
pub fn score_sheet(
    canvas: &mut Canvas,
    engine: &mut dyn TextEngine,
    theme: &Theme,
    spec: SheetSpec,
) -> AppshotResult<()> {
    let r = spec.rect;
    r.validate()?;
    let h = f64::from(r.h);
    let w = f64::from(r.w);

    shape::drop_shadow(
        canvas,
        r,
        12,
        ShadowSpec {
            offset: (8, 8),
            blur_px: 15,
            alpha: 50,
        },
    )?;
    shape::fill_rounded_panel(
        canvas,
        r,
        10,
        Some(theme.card_bg),
        Some(theme.sheet_border),
        2,
    )?;

    // Title sits inside the top 14% band, optically nudged above its center.
    let title_font = FontSpec::new(FontFamily::Bold, spec.title_px);
    let (_, th) = engine.measure("SCORE", title_font)?;
    let title_h = frac(h * 0.14);
    let title_y = r.y + ((f64::from(title_h) - th) * 0.4) as i32;
    draw_text(
        canvas,
        engine,
        "SCORE",
        Align::Center,
        r.x + r.w / 2,
        title_y,
        title_font,
        theme.sheet_title,
    )?;

    let grid_top = r.y + title_h + frac(h * 0.01);
    let grid_bottom = r.bottom() - frac(h * 0.02);
    let grid_left = r.x + frac(w * 0.02);
    let grid_right = r.right() - frac(w * 0.02);
    let grid_h = f64::from(grid_bottom - grid_top);
    let grid_w = f64::from(grid_right - grid_left);

    let num_col_w = frac(grid_w * 0.07);
    let header_h = frac(grid_h * 0.06);
    let data_left = grid_left + num_col_w;
    let data_top = grid_top + header_h;
    let col_w = f64::from(grid_right - data_left) / f64::from(spec.cols);
    let row_h = f64::from(grid_bottom - data_top) / f64::from(spec.rows);

    // zebra stripes under the lines
    for i in 0..spec.rows {
        if i % 2 != 0 {
            continue;
        }
        let y0 = frac(f64::from(data_top) + f64::from(i) * row_h);
        let y1 = frac(f64::from(data_top) + f64::from(i + 1) * row_h);
        shape::fill_rect(
            canvas,
            Rect::new(grid_left, y0, grid_right - grid_left, y1 - y0),
            theme.grid_zebra,
        )?;
    }

    let line_w = 2.max(frac(w * 0.003));
    stroke_rect(
        canvas,
        Rect::new(grid_left, grid_top, grid_right - grid_left, grid_bottom - grid_top),
        line_w + 1,
        theme.grid_line,
    )?;
    hline(canvas, grid_left, grid_right, data_top, line_w + 1, theme.grid_line)?;
    vline(canvas, data_left, grid_top, grid_bottom, line_w, theme.grid_line)?;
    for i in 1..spec.rows {
        let y = frac(f64::from(data_top) + f64::from(i) * row_h);
        hline(canvas, grid_left, grid_right, y, line_w, theme.grid_line)?;
    }
    for i in 1..spec.cols {
        let x = frac(f64::from(data_left) + f64::from(i) * col_w);
        vline(canvas, x, grid_top, grid_bottom, line_w, theme.grid_line)?;
    }

    // hand-numbered first column
    let num_font = FontSpec::new(FontFamily::Regular, (row_h * 0.45) as f32);
    for i in 0..spec.rows {
        let num = (i + 1).to_string();
        let (_, nh) = engine.measure(&num, num_font)?;
        let ny = frac(f64::from(data_top) + f64::from(i) * row_h + (row_h - nh) / 2.0);
        draw_text(
            canvas,
            engine,
            &num,
            Align::Center,
            grid_left + num_col_w / 2,
            ny,
            num_font,
            theme.grid_line,
        )?;
    }
    Ok(())
}

/// Paint a mahjong tile centered on (cx, cy), tilted clockwise by
/// `rotation_deg`.
///
/// The tile is drawn upright on a padded scratch layer, rotated in place, and
/// composited centered, so no corner is clipped by the rotation.
pub fn mahjong_tile(
    canvas: &mut Canvas,
    engine: &mut dyn TextEngine,
    theme: &Theme,
    cx: i32,
    cy: i32,
    tile_w: i32,
    tile_h: i32,
    rotation_deg: f64,
) -> AppshotResult<()> {
    let pad = frac(f64::from(tile_w.max(tile_h)) * 0.8);
    let mut layer = Canvas::new((tile_w + 2 * pad) as u32, (tile_h + 2 * pad) as u32);
    let (tx, ty) = (pad, pad);

    let body_radius = frac(f64::from(tile_w) * 0.1);
    shape::fill_rounded_panel(
        &mut layer,
        Rect::new(tx + 4, ty + 4, tile_w, tile_h),
        body_radius,
        Some(theme.tile_inner_shadow),
        None,
        0,
    )?;
    shape::fill_rounded_panel(
        &mut layer,
        Rect::new(tx, ty, tile_w, tile_h),
        body_radius,
        Some(theme.tile_body),
        Some(theme.tile_border),
        3,
    )?;
    let margin = frac(f64::from(tile_w) * 0.07);
    shape::fill_rounded_panel(
        &mut layer,
        Rect::new(tx, ty, tile_w, tile_h).inset(margin),
        margin,
        Some(theme.tile_face),
        None,
        0,
    )?;

    // The red dragon glyph. CJK coverage is preferred but the glyph must
    // always render, so a missing CJK face falls back to the bold face here.
    let family = if engine.has_family(FontFamily::Cjk) {
        FontFamily::Cjk
    } else {
        tracing::warn!("CJK face unavailable, tile glyph falls back to bold");
        FontFamily::Bold
    };
    let glyph_font = FontSpec::new(family, (f64::from(tile_h) * 0.45) as f32);
    let (_, gh) = engine.measure("中", glyph_font)?;
    let glyph_y = ty + frac((f64::from(tile_h) - gh) / 2.0) - frac(f64::from(tile_h) * 0.05);
    draw_text(
        &mut layer,
        engine,
        "中",
        Align::Center,
        tx + tile_w / 2,
        glyph_y,
        glyph_font,
        theme.tile_glyph,
    )?;

    if rotation_deg != 0.0 {
        layer = layer.rotated_about_center(rotation_deg);
    }
    canvas.composite_at(
        &layer,
        cx - layer.width() as i32 / 2,
        cy - layer.height() as i32 / 2,
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tests::BlockEngine;

    #[test]
    fn sheet_center_is_paper_or_zebra() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(400, 400);
        let mut engine = BlockEngine;
        score_sheet(
            &mut canvas,
            &mut engine,
            &theme,
            SheetSpec {
                rect: Rect::new(40, 60, 320, 300),
                rows: 8,
                cols: 8,
                title_px: 33.0,
            },
        )
        .unwrap();

        let center = canvas.pixel_straight(200, 220);
        assert!(
            center == theme.card_bg || center == theme.grid_zebra || center == theme.grid_line,
            "unexpected sheet interior {center:?}"
        );
        // outside the sheet stays untouched apart from shadow
        assert_eq!(canvas.pixel(10, 10), [0, 0, 0, 0]);
    }

    #[test]
    fn sheet_has_zebra_stripes() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(400, 400);
        let mut engine = BlockEngine;
        score_sheet(
            &mut canvas,
            &mut engine,
            &theme,
            SheetSpec {
                rect: Rect::new(0, 0, 400, 400),
                rows: 8,
                cols: 8,
                title_px: 44.0,
            },
        )
        .unwrap();

        let mut saw_zebra = false;
        for y in 0..400 {
            if canvas.pixel_straight(200, y) == theme.grid_zebra {
                saw_zebra = true;
                break;
            }
        }
        assert!(saw_zebra);
    }

    #[test]
    fn upright_tile_is_centered_and_opaque() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(300, 300);
        let mut engine = BlockEngine;
        mahjong_tile(&mut canvas, &mut engine, &theme, 150, 150, 80, 100, 0.0).unwrap();
        assert_eq!(canvas.pixel(150, 150)[3], 255);
        // corners of the canvas stay clear
        assert_eq!(canvas.pixel(5, 5), [0, 0, 0, 0]);
    }

    #[test]
    fn rotation_tilts_the_tile_outline() {
        let theme = Theme::default();
        let mut upright = Canvas::new(300, 300);
        let mut tilted = Canvas::new(300, 300);
        let mut engine = BlockEngine;
        mahjong_tile(&mut upright, &mut engine, &theme, 150, 150, 80, 100, 0.0).unwrap();
        mahjong_tile(&mut tilted, &mut engine, &theme, 150, 150, 80, 100, 15.0).unwrap();

        // a point just right of the upright tile's edge gains coverage once
        // the top-right corner swings over
        let x = 150 + 40 + 6;
        assert_eq!(upright.pixel(x, 120)[3], 0);
        assert!(tilted.pixel(x, 120)[3] > 0);
    }
}
