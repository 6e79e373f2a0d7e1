//! Vertical linear gradient fill.

use crate::{
    canvas::Canvas,
    core::{Rect, Rgba},
    error::AppshotResult,
};

/// Fill `rect` with a scanline-interpolated vertical gradient.
///
/// Backgrounds are always painted first, so this is an opaque overwrite with
/// no blending against existing content. `t = (y - rect.y) / rect.h`; the top
/// row is exactly `top`.
pub fn fill_linear_gradient(
    canvas: &mut Canvas,
    rect: Rect,
    top: Rgba,
    bottom: Rgba,
) -> AppshotResult<()> {
    rect.validate()?;
    if rect.h == 0 || rect.w == 0 {
        return Ok(());
    }

    let x0 = rect.x.max(0);
    let x1 = rect.right().min(canvas.width() as i32);
    for y in rect.y..rect.bottom() {
        if y < 0 || y >= canvas.height() as i32 {
            continue;
        }
        let t = f64::from(y - rect.y) / f64::from(rect.h);
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
        let row = Rgba::rgb(lerp(top.r, bottom.r), lerp(top.g, bottom.g), lerp(top.b, bottom.b));
        let px = row.premultiplied();
        for x in x0..x1 {
            canvas.put(x, y, px);
        }
    }
    Ok(())
}

/// Full-canvas gradient, the usual background form.
pub fn fill_background(canvas: &mut Canvas, top: Rgba, bottom: Rgba) -> AppshotResult<()> {
    let rect = Rect::new(0, 0, canvas.width() as i32, canvas.height() as i32);
    fill_linear_gradient(canvas, rect, top, bottom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_row_is_exact_and_bottom_row_close() {
        let mut c = Canvas::new(4, 100);
        let top = Rgba::rgb(30, 60, 114);
        let bottom = Rgba::rgb(42, 82, 152);
        fill_background(&mut c, top, bottom).unwrap();

        assert_eq!(c.pixel_straight(0, 0), top);
        let last = c.pixel_straight(0, 99);
        assert!((i32::from(last.r) - i32::from(bottom.r)).abs() <= 1);
        assert!((i32::from(last.g) - i32::from(bottom.g)).abs() <= 1);
        assert!((i32::from(last.b) - i32::from(bottom.b)).abs() <= 1);
    }

    #[test]
    fn interpolation_is_linear_per_scanline() {
        let mut c = Canvas::new(1, 10);
        let top = Rgba::rgb(0, 0, 0);
        let bottom = Rgba::rgb(200, 100, 50);
        fill_background(&mut c, top, bottom).unwrap();

        for y in 0..10 {
            let t = f64::from(y) / 10.0;
            let expect = (200.0 * t) as u8;
            assert_eq!(c.pixel_straight(0, y).r, expect, "row {y}");
        }
    }

    #[test]
    fn rect_gradient_leaves_outside_untouched() {
        let mut c = Canvas::new(10, 10);
        fill_linear_gradient(
            &mut c,
            Rect::new(2, 2, 4, 4),
            Rgba::WHITE,
            Rgba::rgb(0, 0, 0),
        )
        .unwrap();
        assert_eq!(c.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(c.pixel(2, 2), [255, 255, 255, 255]);
        assert_eq!(c.pixel(7, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn negative_rect_is_rejected() {
        let mut c = Canvas::new(4, 4);
        let r = Rect::new(0, 0, -2, 4);
        assert!(fill_linear_gradient(&mut c, r, Rgba::WHITE, Rgba::WHITE).is_err());
    }
}
