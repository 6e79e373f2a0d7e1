use crate::error::{AppshotError, AppshotResult};

pub use kurbo::{Affine, Point, Rect as DpRect};

/// Straight-alpha RGBA8 color value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Convert to premultiplied RGBA8 bytes.
    pub fn premultiplied(self) -> [u8; 4] {
        fn premul(c: u8, a: u8) -> u8 {
            ((u16::from(c) * u16::from(a) + 127) / 255) as u8
        }
        [
            premul(self.r, self.a),
            premul(self.g, self.a),
            premul(self.b, self.a),
            self.a,
        ]
    }
}

/// Integer pixel rectangle, top-left origin, y growing downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn validate(&self) -> AppshotResult<()> {
        if self.w < 0 || self.h < 0 {
            return Err(AppshotError::geometry(format!(
                "rect extents must be non-negative (got {}x{})",
                self.w, self.h
            )));
        }
        Ok(())
    }

    /// Largest corner radius this rect can carry.
    pub fn max_radius(&self) -> i32 {
        self.w.min(self.h) / 2
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    /// Shrink by `d` pixels on every side; collapses to an empty rect.
    pub fn inset(&self, d: i32) -> Self {
        let w = (self.w - 2 * d).max(0);
        let h = (self.h - 2 * d).max(0);
        Self::new(self.x + d, self.y + d, w, h)
    }
}

/// Validate a rect/radius pair for rounded rasterization.
pub fn validate_rounded(rect: &Rect, radius: i32) -> AppshotResult<()> {
    rect.validate()?;
    if radius < 0 {
        return Err(AppshotError::geometry("corner radius must be >= 0"));
    }
    if radius > rect.max_radius() {
        return Err(AppshotError::geometry(format!(
            "corner radius {} exceeds half the shorter side of {}x{}",
            radius, rect.w, rect.h
        )));
    }
    Ok(())
}
