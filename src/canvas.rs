//! Owned premultiplied-RGBA8 pixel buffer every drawing operation targets.

use crate::{
    composite,
    core::{Affine, Point, Rect, Rgba},
    error::{AppshotError, AppshotResult},
    shape::Mask,
};

#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    /// Row-major premultiplied RGBA8.
    data: Vec<u8>,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width as usize * height as usize * 4],
        }
    }

    pub fn from_premul_parts(width: u32, height: u32, data: Vec<u8>) -> AppshotResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(AppshotError::geometry(
                "canvas byte length must equal width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Premultiplied pixel at (x, y). Out-of-bounds reads are transparent.
    pub fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return [0, 0, 0, 0];
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Straight-alpha pixel at (x, y), for assertions and encoding.
    pub fn pixel_straight(&self, x: i32, y: i32) -> Rgba {
        let [r, g, b, a] = self.pixel(x, y);
        if a == 0 {
            return Rgba::TRANSPARENT;
        }
        let un = |c: u8| ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;
        Rgba::rgba(un(r), un(g), un(b), a)
    }

    pub(crate) fn put(&mut self, x: i32, y: i32, px: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        self.data[idx..idx + 4].copy_from_slice(&px);
    }

    /// Source-over merge of an equal-size canvas.
    pub fn composite_over(&mut self, src: &Canvas) -> AppshotResult<()> {
        if src.width != self.width || src.height != self.height {
            return Err(AppshotError::geometry(
                "composite_over expects equal-size canvases",
            ));
        }
        composite::over_in_place(&mut self.data, &src.data)
    }

    /// Source-over `src` positioned at (x, y), optionally clipped through a
    /// single-channel mask of the same size as `src`.
    pub fn composite_at(
        &mut self,
        src: &Canvas,
        x: i32,
        y: i32,
        mask: Option<&Mask>,
    ) -> AppshotResult<()> {
        if let Some(m) = mask
            && (m.width() != src.width || m.height() != src.height)
        {
            return Err(AppshotError::geometry(
                "composite_at mask must match source dimensions",
            ));
        }
        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width as i32 {
                let dx = x + sx;
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let coverage = mask.map_or(255, |m| m.value(sx, sy));
                if coverage == 0 {
                    continue;
                }
                let out = composite::over(self.pixel(dx, dy), src.pixel(sx, sy), coverage);
                self.put(dx, dy, out);
            }
        }
        Ok(())
    }

    /// Blend a translucent color over a rectangular region (overlay scrim).
    pub fn blend_rect_over(&mut self, rect: Rect, color: Rgba) -> AppshotResult<()> {
        rect.validate()?;
        let src = color.premultiplied();
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        for y in y0..y1 {
            for x in x0..x1 {
                let out = composite::over(self.pixel(x, y), src, 255);
                self.put(x, y, out);
            }
        }
        Ok(())
    }

    /// High-quality (Lanczos3) resize via the image codec.
    ///
    /// Resampling happens on the premultiplied representation, which keeps
    /// transparent regions from bleeding color into edges.
    pub fn resized(&self, width: u32, height: u32) -> AppshotResult<Canvas> {
        if width == 0 || height == 0 {
            return Err(AppshotError::geometry("resize target must be non-empty"));
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| AppshotError::encoding("canvas does not form a valid image buffer"))?;
        let scaled = image::imageops::resize(&img, width, height, image::imageops::FilterType::Lanczos3);
        Canvas::from_premul_parts(width, height, scaled.into_raw())
    }

    /// Same-size rotation about the canvas center, bilinear sampled.
    ///
    /// Positive angles rotate the content clockwise in raster coordinates.
    /// Content swept outside the bounds is clipped; uncovered pixels are
    /// transparent, so callers pad their scratch layer before rotating.
    pub fn rotated_about_center(&self, degrees: f64) -> Canvas {
        let cx = f64::from(self.width) / 2.0;
        let cy = f64::from(self.height) / 2.0;
        // Inverse map: for each output pixel, sample the source location.
        let inverse = Affine::translate((cx, cy))
            * Affine::rotate(-degrees.to_radians())
            * Affine::translate((-cx, -cy));

        let mut out = Canvas::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let p = inverse * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                out.put(x, y, self.sample_bilinear(p.x - 0.5, p.y - 0.5));
            }
        }
        out
    }

    fn sample_bilinear(&self, x: f64, y: f64) -> [u8; 4] {
        let x0 = x.floor() as i32;
        let y0 = y.floor() as i32;
        let fx = x - f64::from(x0);
        let fy = y - f64::from(y0);

        let mut acc = [0.0f64; 4];
        for (dy, wy) in [(0, 1.0 - fy), (1, fy)] {
            for (dx, wx) in [(0, 1.0 - fx), (1, fx)] {
                let px = self.pixel(x0 + dx, y0 + dy);
                let w = wx * wy;
                for c in 0..4 {
                    acc[c] += w * f64::from(px[c]);
                }
            }
        }
        [
            acc[0].round().min(255.0) as u8,
            acc[1].round().min(255.0) as u8,
            acc[2].round().min(255.0) as u8,
            acc[3].round().min(255.0) as u8,
        ]
    }

    /// Unpremultiplied copy for PNG encoding.
    pub fn unpremultiplied(&self) -> image::RgbaImage {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            let a = px[3];
            if a == 0 {
                out.extend_from_slice(&[0, 0, 0, 0]);
            } else {
                let un =
                    |c: u8| ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;
                out.extend_from_slice(&[un(px[0]), un(px[1]), un(px[2]), a]);
            }
        }
        image::RgbaImage::from_raw(self.width, self.height, out)
            .expect("canvas dimensions always form a valid image")
    }
}
