//! Target device profiles and device-independent-pixel scaling.

use crate::error::{AppshotError, AppshotResult};

/// One supported output target. Immutable, process-wide configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeviceProfile {
    pub screen_w: u32,
    pub screen_h: u32,
    pub promo_w: u32,
    pub promo_h: u32,
    /// Reference width (in dp) the scene constants were authored against.
    pub base_dp: f64,
    pub is_tablet: bool,
}

impl DeviceProfile {
    pub fn phone() -> Self {
        Self {
            screen_w: 1080,
            screen_h: 2340,
            promo_w: 1242,
            promo_h: 2688,
            base_dp: 375.0,
            is_tablet: false,
        }
    }

    pub fn tablet() -> Self {
        Self {
            screen_w: 1536,
            screen_h: 2048,
            promo_w: 2048,
            promo_h: 2732,
            base_dp: 590.0,
            is_tablet: true,
        }
    }

    /// Screen height expressed in dp at this profile's density.
    pub fn screen_height_dp(&self) -> f64 {
        f64::from(self.screen_h) * self.base_dp / f64::from(self.screen_w)
    }

    pub fn validate(&self) -> AppshotResult<()> {
        if self.screen_w == 0 || self.screen_h == 0 || self.promo_w == 0 || self.promo_h == 0 {
            return Err(AppshotError::geometry("device dimensions must be > 0"));
        }
        if !self.base_dp.is_finite() || self.base_dp <= 0.0 {
            return Err(AppshotError::geometry("base_dp must be finite and > 0"));
        }
        Ok(())
    }
}

/// Converts authored dp to absolute pixels for one target width.
///
/// All geometry for a composed scene must go through the same scaler so the
/// scene stays self-consistent at any resolution.
#[derive(Clone, Copy, Debug)]
pub struct DeviceScaler {
    target_w: u32,
    base_dp: f64,
}

impl DeviceScaler {
    pub fn new(target_w: u32, base_dp: f64) -> AppshotResult<Self> {
        if target_w == 0 || !base_dp.is_finite() || base_dp <= 0.0 {
            return Err(AppshotError::geometry(
                "scaler needs target_w > 0 and base_dp > 0",
            ));
        }
        Ok(Self { target_w, base_dp })
    }

    pub fn for_screen(profile: &DeviceProfile) -> AppshotResult<Self> {
        profile.validate()?;
        Self::new(profile.screen_w, profile.base_dp)
    }

    /// `round(dp * target_w / base_dp)`.
    pub fn px(&self, dp: f64) -> i32 {
        (dp * f64::from(self.target_w) / self.base_dp).round() as i32
    }

    /// Pixel size for a dp-sized font.
    pub fn font_px(&self, dp: f64) -> f32 {
        (dp * f64::from(self.target_w) / self.base_dp) as f32
    }
}
