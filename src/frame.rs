//! Promotional framing: marketing gradient, headline copy, and the device
//! body wrapped around a composed screen.

use crate::{
    canvas::Canvas,
    core::{Rect, Rgba},
    device::DeviceProfile,
    error::{AppshotError, AppshotResult},
    gradient,
    shape::{self, ShadowSpec},
    text::{Align, FontFamily, FontSpec, TextEngine, draw_text},
    theme::Theme,
};

/// Wrap a composed screen in a promo canvas: headline, subheadline, drop
/// shadow, dark device body with bezel, and the screen clipped to rounded
/// corners.
///
/// The screen canvas must match the profile's screen resolution; it is
/// downscaled to 82% of the promo width inside the frame.
pub fn wrap(
    screen: &Canvas,
    profile: &DeviceProfile,
    theme: &Theme,
    engine: &mut dyn TextEngine,
    title: Option<&str>,
    subtitle: Option<&str>,
) -> AppshotResult<Canvas> {
    profile.validate()?;
    if screen.width() != profile.screen_w || screen.height() != profile.screen_h {
        return Err(AppshotError::geometry(format!(
            "screen canvas is {}x{}, profile expects {}x{}",
            screen.width(),
            screen.height(),
            profile.screen_w,
            profile.screen_h
        )));
    }

    let promo_w = profile.promo_w as i32;
    let promo_h = profile.promo_h as i32;
    let mut canvas = Canvas::new(profile.promo_w, profile.promo_h);
    gradient::fill_background(&mut canvas, theme.promo_bg_top, theme.promo_bg_bottom)?;

    let mut top_y = (f64::from(promo_h) * 0.02) as i32;
    if let Some(text) = title {
        let size = (f64::from(promo_w) * 0.058) as f32;
        draw_text(
            &mut canvas,
            engine,
            text,
            Align::Center,
            promo_w / 2,
            top_y,
            FontSpec::new(FontFamily::Cjk, size),
            Rgba::WHITE,
        )?;
        top_y += (size * 1.4) as i32;
    }
    if let Some(text) = subtitle {
        let size = (f64::from(promo_w) * 0.032) as f32;
        draw_text(
            &mut canvas,
            engine,
            text,
            Align::Center,
            promo_w / 2,
            top_y,
            FontSpec::new(FontFamily::Cjk, size),
            theme.promo_subtitle,
        )?;
        top_y += (size * 1.4) as i32;
    }

    let phone_w = (f64::from(promo_w) * 0.82) as i32;
    let phone_h =
        (f64::from(phone_w) * f64::from(profile.screen_h) / f64::from(profile.screen_w)) as i32;
    let scaled = screen.resized(phone_w as u32, phone_h as u32)?;

    // tablets get thicker bezels and squarer corners
    let (bezel, corner_r) = if profile.is_tablet {
        (
            (f64::from(phone_w) * 0.012) as i32,
            (f64::from(phone_w) * 0.03) as i32,
        )
    } else {
        (
            (f64::from(phone_w) * 0.015) as i32,
            (f64::from(phone_w) * 0.055) as i32,
        )
    };

    let px = (promo_w - phone_w) / 2 - bezel;
    let py = top_y + (f64::from(promo_h) * 0.01) as i32;
    let body = Rect::new(px, py, phone_w + 2 * bezel, phone_h + 2 * bezel);

    shape::drop_shadow(
        &mut canvas,
        body,
        corner_r + bezel,
        ShadowSpec {
            offset: (12, 12),
            blur_px: 30,
            alpha: 80,
        },
    )?;
    shape::fill_rounded_panel(
        &mut canvas,
        body,
        corner_r + bezel,
        Some(theme.device_body),
        Some(theme.device_edge),
        2,
    )?;

    let mask = shape::rounded_mask(phone_w as u32, phone_h as u32, corner_r)?;
    canvas.composite_at(&scaled, px + bezel, py + bezel, Some(&mask))?;
    Ok(canvas)
}
