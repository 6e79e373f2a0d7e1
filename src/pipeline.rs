//! Asset pipeline: turns the theme plus a text engine into the full set of
//! launcher assets and promotional screenshots.

use std::path::Path;

use crate::{
    canvas::Canvas,
    core::{Rect, Rgba},
    device::DeviceProfile,
    emblem::{self, SheetSpec},
    encode,
    error::{AppshotError, AppshotResult},
    frame, gradient,
    scene::SceneComposer,
    scenes::PromoScene,
    shape,
    text::{Align, FontFamily, FontSpec, TextEngine, draw_text},
    theme::Theme,
};

/// Launcher icon edge length, in px.
pub const ICON_SIZE: u32 = 1024;
/// Splash screen raster size.
pub const SPLASH_SIZE: (u32, u32) = (1284, 2778);
/// Favicon edge length; rendered at 8x and downscaled.
pub const FAVICON_SIZE: u32 = 48;

pub struct AssetPipeline<'a> {
    theme: Theme,
    engine: &'a mut dyn TextEngine,
}

impl<'a> AssetPipeline<'a> {
    pub fn new(theme: Theme, engine: &'a mut dyn TextEngine) -> Self {
        Self { theme, engine }
    }

    /// Launcher icon: rounded-square gradient, score sheet, tilted tile.
    pub fn icon(&mut self, size: u32) -> AppshotResult<Canvas> {
        self.icon_art(size, 8, 8, 0.11)
    }

    /// Android adaptive-icon foreground: the emblem centered on transparency,
    /// no background plate (the launcher supplies it).
    pub fn adaptive_icon(&mut self, size: u32) -> AppshotResult<Canvas> {
        let s = f64::from(size);
        let mut canvas = Canvas::new(size, size);

        let sheet_w = (s * 0.56) as i32;
        let sheet_h = (s * 0.52) as i32;
        let sheet = Rect::new(
            (size as i32 - sheet_w) / 2 - (s * 0.02) as i32,
            (size as i32 - sheet_h) / 2 + (s * 0.04) as i32,
            sheet_w,
            sheet_h,
        );
        emblem::score_sheet(
            &mut canvas,
            self.engine,
            &self.theme,
            SheetSpec {
                rect: sheet,
                rows: 6,
                cols: 6,
                title_px: (f64::from(sheet_h) * 0.11) as f32,
            },
        )?;
        emblem::mahjong_tile(
            &mut canvas,
            self.engine,
            &self.theme,
            sheet.right() - (s * 0.04) as i32,
            sheet.bottom() - (s * 0.04) as i32,
            (s * 0.27) as i32,
            (s * 0.33) as i32,
            15.0,
        )?;
        Ok(canvas)
    }

    /// Splash screen: full-bleed gradient, emblem, app name lockup.
    pub fn splash(&mut self, width: u32, height: u32) -> AppshotResult<Canvas> {
        let w = f64::from(width);
        let h = f64::from(height);
        let mut canvas = Canvas::new(width, height);
        gradient::fill_background(&mut canvas, self.theme.bg_top, self.theme.splash_bg_bottom)?;

        let sheet_w = (w * 0.55) as i32;
        let sheet_h = (f64::from(sheet_w) * 0.9) as i32;
        let sheet = Rect::new(
            (width as i32 - sheet_w) / 2,
            (h * 0.25) as i32,
            sheet_w,
            sheet_h,
        );
        emblem::score_sheet(
            &mut canvas,
            self.engine,
            &self.theme,
            SheetSpec {
                rect: sheet,
                rows: 6,
                cols: 6,
                title_px: (f64::from(sheet_h) * 0.11) as f32,
            },
        )?;

        let tile_w = (w * 0.22) as i32;
        emblem::mahjong_tile(
            &mut canvas,
            self.engine,
            &self.theme,
            sheet.right() - (w * 0.04) as i32,
            sheet.bottom() - (w * 0.04) as i32,
            tile_w,
            (f64::from(tile_w) * 1.23) as i32,
            15.0,
        )?;

        let text_y = sheet.bottom() + (h * 0.04) as i32;
        draw_text(
            &mut canvas,
            self.engine,
            "麻雀",
            Align::Center,
            width as i32 / 2,
            text_y,
            FontSpec::new(FontFamily::Cjk, (w * 0.09) as f32),
            Rgba::WHITE,
        )?;
        draw_text(
            &mut canvas,
            self.engine,
            "スコアシートモバイル",
            Align::Center,
            width as i32 / 2,
            text_y + (w * 0.12) as i32,
            FontSpec::new(FontFamily::Cjk, (w * 0.055) as f32),
            self.theme.subtitle_text,
        )?;
        Ok(canvas)
    }

    /// Favicon: the icon artwork rendered at 8x with a coarser grid, then
    /// Lanczos-downscaled so the grid survives at 48px.
    pub fn favicon(&mut self, size: u32) -> AppshotResult<Canvas> {
        let art = self.icon_art(size * 8, 5, 5, 0.13)?;
        art.resized(size, size)
    }

    /// One promotional screenshot: scene composed at screen resolution, then
    /// wrapped in the marketing frame.
    #[tracing::instrument(skip(self, profile))]
    pub fn promo(&mut self, scene: PromoScene, profile: &DeviceProfile) -> AppshotResult<Canvas> {
        let desc = scene.descriptor(profile, &self.theme);
        let screen = SceneComposer::compose(&desc, profile, &self.theme, self.engine)?;
        frame::wrap(
            &screen,
            profile,
            &self.theme,
            self.engine,
            Some(scene.headline()),
            Some(scene.subheadline()),
        )
    }

    /// Generate the full asset set under `out_dir`.
    ///
    /// One failing artifact does not stop the rest; failures are logged as
    /// they happen and reported together at the end.
    #[tracing::instrument(skip(self))]
    pub fn generate_all(&mut self, out_dir: &Path) -> AppshotResult<()> {
        let mut failures = Vec::new();

        self.emit(&mut failures, &out_dir.join("icon.png"), |p| {
            p.icon(ICON_SIZE)
        });
        self.emit(&mut failures, &out_dir.join("adaptive-icon.png"), |p| {
            p.adaptive_icon(ICON_SIZE)
        });
        self.emit(&mut failures, &out_dir.join("splash.png"), |p| {
            p.splash(SPLASH_SIZE.0, SPLASH_SIZE.1)
        });
        self.emit(&mut failures, &out_dir.join("favicon.png"), |p| {
            p.favicon(FAVICON_SIZE)
        });

        for (dir, profile) in [
            ("iphone", DeviceProfile::phone()),
            ("ipad", DeviceProfile::tablet()),
        ] {
            for scene in PromoScene::ALL {
                let path = out_dir.join(dir).join(format!("{}.png", scene.slug()));
                self.emit(&mut failures, &path, |p| p.promo(scene, &profile));
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AppshotError::Other(anyhow::anyhow!(
                "{} asset(s) failed: {}",
                failures.len(),
                failures.join(", ")
            )))
        }
    }

    fn emit(
        &mut self,
        failures: &mut Vec<String>,
        path: &Path,
        render: impl FnOnce(&mut Self) -> AppshotResult<Canvas>,
    ) {
        match render(self).and_then(|canvas| encode::write_png(&canvas, path)) {
            Ok(()) => {}
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "asset generation failed");
                failures.push(path.display().to_string());
            }
        }
    }

    fn icon_art(
        &mut self,
        size: u32,
        rows: u32,
        cols: u32,
        title_frac: f64,
    ) -> AppshotResult<Canvas> {
        let s = f64::from(size);
        let mut canvas = Canvas::new(size, size);

        // gradient plate clipped to the rounded app-icon silhouette
        let mut plate = Canvas::new(size, size);
        gradient::fill_background(&mut plate, self.theme.bg_top, self.theme.bg_bottom)?;
        let mask = shape::rounded_mask(size, size, (s * 0.18) as i32)?;
        canvas.composite_at(&plate, 0, 0, Some(&mask))?;

        let sheet = Rect::new(
            (s * 0.10) as i32,
            (s * 0.17) as i32,
            (s * 0.80) as i32,
            (s * 0.72) as i32,
        );
        emblem::score_sheet(
            &mut canvas,
            self.engine,
            &self.theme,
            SheetSpec {
                rect: sheet,
                rows,
                cols,
                title_px: (f64::from(sheet.h) * title_frac) as f32,
            },
        )?;
        emblem::mahjong_tile(
            &mut canvas,
            self.engine,
            &self.theme,
            sheet.right() - (s * 0.06) as i32,
            sheet.bottom() - (s * 0.06) as i32,
            (s * 0.35) as i32,
            (s * 0.43) as i32,
            15.0,
        )?;
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tests::BlockEngine;

    #[test]
    fn icon_is_a_rounded_square_on_transparency() {
        let mut engine = BlockEngine;
        let mut pipeline = AssetPipeline::new(Theme::default(), &mut engine);
        let icon = pipeline.icon(256).unwrap();
        assert_eq!((icon.width(), icon.height()), (256, 256));
        assert_eq!(icon.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(icon.pixel(255, 0), [0, 0, 0, 0]);
        // top edge midpoint is inside the rounded plate
        assert_eq!(icon.pixel(128, 2)[3], 255);
    }

    #[test]
    fn adaptive_icon_keeps_background_transparent() {
        let mut engine = BlockEngine;
        let mut pipeline = AssetPipeline::new(Theme::default(), &mut engine);
        let icon = pipeline.adaptive_icon(256).unwrap();
        // no plate behind the emblem
        assert_eq!(icon.pixel(128, 4), [0, 0, 0, 0]);
        // emblem center is opaque
        assert_eq!(icon.pixel(128, 128)[3], 255);
    }

    #[test]
    fn favicon_downscales_to_target_size() {
        let mut engine = BlockEngine;
        let mut pipeline = AssetPipeline::new(Theme::default(), &mut engine);
        let favicon = pipeline.favicon(16).unwrap();
        assert_eq!((favicon.width(), favicon.height()), (16, 16));
        // at 16px the rounded corner is under 3 output pixels deep, so the
        // resampler leaves a faint ramp rather than hard transparency
        assert!(favicon.pixel(0, 0)[3] < favicon.pixel(8, 8)[3]);
        assert_eq!(favicon.pixel(8, 8)[3], 255);
    }

    #[test]
    fn splash_keeps_the_gradient_top_color() {
        let mut engine = BlockEngine;
        let mut pipeline = AssetPipeline::new(Theme::default(), &mut engine);
        let theme = Theme::default();
        let splash = pipeline.splash(320, 694).unwrap();
        assert_eq!(splash.pixel_straight(0, 0), theme.bg_top);
        assert_eq!(splash.pixel(319, 693)[3], 255);
    }
}
