//! Rounded-rectangle and ellipse rasterization, clip masks, drop shadows.

use crate::{
    blur::gaussian_blur_rgba8,
    canvas::Canvas,
    composite,
    core::{Rect, Rgba, validate_rounded},
    error::{AppshotError, AppshotResult},
};

/// Drop-shadow parameters, always paired with exactly one shape.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShadowSpec {
    pub offset: (i32, i32),
    pub blur_px: u32,
    pub alpha: u8,
}

/// Single-channel coverage mask used to clip rectangular content to rounded
/// corners.
#[derive(Clone, Debug)]
pub struct Mask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Mask {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn value(&self, x: i32, y: i32) -> u8 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }
}

/// Build a `w x h` mask that is 255 inside the rounded rectangle and 0 outside.
pub fn rounded_mask(width: u32, height: u32, radius: i32) -> AppshotResult<Mask> {
    let rect = Rect::new(0, 0, width as i32, height as i32);
    validate_rounded(&rect, radius)?;

    let mut data = vec![0u8; width as usize * height as usize];
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let cov = rounded_coverage(&rect, radius, f64::from(x) + 0.5, f64::from(y) + 0.5);
            data[y as usize * width as usize + x as usize] = (cov * 255.0).round() as u8;
        }
    }
    Ok(Mask {
        width,
        height,
        data,
    })
}

/// Filled and/or outlined rounded rectangle, painted last-writer-wins.
///
/// The outline is an inward ring `outline_w` pixels deep, drawn over the fill
/// the way PIL's `rounded_rectangle` lays its border.
pub fn fill_rounded_panel(
    canvas: &mut Canvas,
    rect: Rect,
    radius: i32,
    fill: Option<Rgba>,
    outline: Option<Rgba>,
    outline_w: i32,
) -> AppshotResult<()> {
    validate_rounded(&rect, radius)?;
    if outline.is_some() && outline_w <= 0 {
        return Err(AppshotError::geometry("outline width must be > 0"));
    }

    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(canvas.width() as i32);
    let y1 = rect.bottom().min(canvas.height() as i32);

    let inner = rect.inset(outline_w);
    let inner_radius = (radius - outline_w).max(0);

    let fill_px = fill.map(Rgba::premultiplied);
    let outline_px = outline.map(Rgba::premultiplied);

    for y in y0..y1 {
        let py = f64::from(y) + 0.5;
        for x in x0..x1 {
            let px = f64::from(x) + 0.5;
            let cov_outer = rounded_coverage(&rect, radius, px, py);
            if cov_outer <= 0.0 {
                continue;
            }

            if let Some(c) = fill_px {
                let out = composite::paint(canvas.pixel(x, y), c, (cov_outer * 255.0).round() as u8);
                canvas.put(x, y, out);
            }
            if let Some(c) = outline_px {
                let cov_inner = rounded_coverage(&inner, inner_radius, px, py);
                let ring = (cov_outer - cov_inner).max(0.0);
                if ring > 0.0 {
                    let out = composite::paint(canvas.pixel(x, y), c, (ring * 255.0).round() as u8);
                    canvas.put(x, y, out);
                }
            }
        }
    }
    Ok(())
}

/// Axis-aligned rectangle, opaque overwrite.
pub fn fill_rect(canvas: &mut Canvas, rect: Rect, color: Rgba) -> AppshotResult<()> {
    rect.validate()?;
    let px = color.premultiplied();
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(canvas.width() as i32);
    let y1 = rect.bottom().min(canvas.height() as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            canvas.put(x, y, px);
        }
    }
    Ok(())
}

/// Ellipse inscribed in `rect`, coverage-rasterized.
pub fn fill_ellipse(canvas: &mut Canvas, rect: Rect, color: Rgba) -> AppshotResult<()> {
    rect.validate()?;
    if rect.w == 0 || rect.h == 0 {
        return Ok(());
    }
    let cx = f64::from(rect.x) + f64::from(rect.w) / 2.0;
    let cy = f64::from(rect.y) + f64::from(rect.h) / 2.0;
    let rx = f64::from(rect.w) / 2.0;
    let ry = f64::from(rect.h) / 2.0;
    let edge = rx.min(ry);
    let src = color.premultiplied();

    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = rect.right().min(canvas.width() as i32);
    let y1 = rect.bottom().min(canvas.height() as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            let nx = (f64::from(x) + 0.5 - cx) / rx;
            let ny = (f64::from(y) + 0.5 - cy) / ry;
            let d = (nx * nx + ny * ny).sqrt();
            let cov = ((1.0 - d) * edge + 0.5).clamp(0.0, 1.0);
            if cov > 0.0 {
                let out = composite::paint(canvas.pixel(x, y), src, (cov * 255.0).round() as u8);
                canvas.put(x, y, out);
            }
        }
    }
    Ok(())
}

/// Synthesize a soft shadow for the rounded rectangle that a caller is about
/// to paint.
///
/// An offset opaque-shape silhouette at `shadow.alpha` goes into a transient
/// transparent layer, the whole layer is Gaussian-blurred, and the result is
/// composited over the canvas. Callers must invoke this strictly before
/// painting the shape itself.
pub fn drop_shadow(
    canvas: &mut Canvas,
    rect: Rect,
    radius: i32,
    shadow: ShadowSpec,
) -> AppshotResult<()> {
    validate_rounded(&rect, radius)?;

    let mut layer = Canvas::new(canvas.width(), canvas.height());
    fill_rounded_panel(
        &mut layer,
        rect.translated(shadow.offset.0, shadow.offset.1),
        radius,
        Some(Rgba::rgba(0, 0, 0, shadow.alpha)),
        None,
        0,
    )?;

    let blurred = gaussian_blur_rgba8(layer.data(), layer.width(), layer.height(), shadow.blur_px)?;
    let blurred = Canvas::from_premul_parts(layer.width(), layer.height(), blurred)?;
    canvas.composite_over(&blurred)
}

/// Coverage of the pixel center (px, py) against a rounded rectangle, in
/// [0, 1]. One-pixel analytic edge ramp; interior pixels are exactly 1.
fn rounded_coverage(rect: &Rect, radius: i32, px: f64, py: f64) -> f64 {
    if rect.w <= 0 || rect.h <= 0 {
        return 0.0;
    }
    let left = f64::from(rect.x);
    let top = f64::from(rect.y);
    let right = f64::from(rect.right());
    let bottom = f64::from(rect.bottom());
    if px < left || px > right || py < top || py > bottom {
        return 0.0;
    }

    // Nearest point on the corner-center rectangle. Written as max/min rather
    // than clamp so degenerate inner rects (radius > half side) cannot panic.
    let r = f64::from(radius);
    let cx = px.max(left + r).min(right - r);
    let cy = py.max(top + r).min(bottom - r);
    let dx = px - cx;
    let dy = py - cy;
    if dx == 0.0 && dy == 0.0 {
        return 1.0;
    }
    let d = (dx * dx + dy * dy).sqrt();
    (r + 0.5 - d).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_is_opaque_inside_and_clear_at_corners() {
        let m = rounded_mask(100, 100, 18).unwrap();
        assert_eq!(m.value(50, 50), 255);
        assert_eq!(m.value(0, 0), 0);
        assert_eq!(m.value(99, 99), 0);
        // straight edge midpoints stay inside
        assert_eq!(m.value(50, 0), 255);
        assert_eq!(m.value(0, 50), 255);
    }

    #[test]
    fn mask_rejects_oversized_radius() {
        assert!(rounded_mask(10, 10, 6).is_err());
    }

    #[test]
    fn panel_interior_is_exact_fill_color() {
        let mut c = Canvas::new(40, 40);
        let fill = Rgba::rgb(255, 255, 255);
        fill_rounded_panel(&mut c, Rect::new(4, 4, 32, 32), 8, Some(fill), None, 0).unwrap();
        assert_eq!(c.pixel_straight(20, 20), fill);
        assert_eq!(c.pixel(4, 4), [0, 0, 0, 0]);
    }

    #[test]
    fn outline_ring_sits_inside_the_rect_edge() {
        let mut c = Canvas::new(40, 40);
        let fill = Rgba::WHITE;
        let border = Rgba::rgb(180, 190, 210);
        fill_rounded_panel(&mut c, Rect::new(0, 10, 40, 20), 4, Some(fill), Some(border), 2)
            .unwrap();
        // first two rows of the panel are border, the next is fill
        assert_eq!(c.pixel_straight(20, 10), border);
        assert_eq!(c.pixel_straight(20, 11), border);
        assert_eq!(c.pixel_straight(20, 12), fill);
    }

    #[test]
    fn translucent_fill_overwrites_rather_than_blends() {
        let mut c = Canvas::new(20, 20);
        fill_rect(&mut c, Rect::new(0, 0, 20, 20), Rgba::WHITE).unwrap();
        let glassy = Rgba::rgba(255, 255, 255, 50);
        fill_rounded_panel(&mut c, Rect::new(2, 2, 16, 16), 4, Some(glassy), None, 0).unwrap();
        assert_eq!(c.pixel(10, 10), glassy.premultiplied());
    }

    #[test]
    fn shadow_lands_before_and_never_on_the_shape() {
        let mut c = Canvas::new(80, 80);
        let rect = Rect::new(20, 20, 40, 40);
        let spec = ShadowSpec {
            offset: (6, 6),
            blur_px: 6,
            alpha: 60,
        };
        drop_shadow(&mut c, rect, 8, spec).unwrap();
        // shadow energy exists outside the panel, inside the offset halo
        assert!(c.pixel(64, 64)[3] > 0);

        let fill = Rgba::WHITE;
        fill_rounded_panel(&mut c, rect, 8, Some(fill), None, 0).unwrap();
        // the shape's own pixels are the unshadowed fill color
        assert_eq!(c.pixel_straight(40, 40), fill);
    }

    #[test]
    fn ellipse_covers_center_not_corners() {
        let mut c = Canvas::new(20, 20);
        fill_ellipse(&mut c, Rect::new(0, 0, 20, 20), Rgba::WHITE).unwrap();
        assert_eq!(c.pixel_straight(10, 10), Rgba::WHITE);
        assert_eq!(c.pixel(0, 0), [0, 0, 0, 0]);
    }
}
