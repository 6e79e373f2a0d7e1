mod common;

use appshot::{AssetPipeline, Canvas, DeviceProfile, PromoScene, Theme, frame};
use common::BlockEngine;

/// Scan one row for the extent of device-body pixels.
fn device_extent(canvas: &Canvas, theme: &Theme, y: i32) -> (i32, i32) {
    let mut left = None;
    let mut right = None;
    for x in 0..canvas.width() as i32 {
        let px = canvas.pixel_straight(x, y);
        if px == theme.device_body || px == theme.device_edge {
            left.get_or_insert(x);
            right = Some(x);
        }
    }
    (left.expect("device body in row"), right.unwrap())
}

#[test]
fn iphone_promo_frame_is_exact_store_size() {
    common::init_tracing();
    let profile = DeviceProfile::phone();
    let theme = Theme::default();
    let mut engine = BlockEngine;
    let screen = Canvas::new(profile.screen_w, profile.screen_h);

    let promo = frame::wrap(&screen, &profile, &theme, &mut engine, None, None).unwrap();
    assert_eq!((promo.width(), promo.height()), (1242, 2688));

    // the device body is 82% of the promo width plus two bezels, centered
    let phone_w = (1242.0f64 * 0.82) as i32;
    let bezel = (f64::from(phone_w) * 0.015) as i32;
    let body_w = phone_w + 2 * bezel;
    let body_h = (f64::from(phone_w) * 2340.0 / 1080.0) as i32 + 2 * bezel;
    let top_y = (2688.0f64 * 0.02) as i32 + (2688.0f64 * 0.01) as i32;

    let (left, right) = device_extent(&promo, &theme, top_y + body_h / 2);
    let measured_w = right - left + 1;
    assert!(
        (measured_w - body_w).abs() <= 2,
        "body width {measured_w}, expected ~{body_w}"
    );
    // horizontally centered within a pixel of rounding
    let right_margin = 1242 - 1 - right;
    assert!((left - right_margin).abs() <= 2, "margins {left}/{right_margin}");
}

#[test]
fn full_promo_path_yields_promo_dimensions() {
    // reduced profile keeps the end-to-end render cheap
    let profile = DeviceProfile {
        screen_w: 375,
        screen_h: 812,
        promo_w: 438,
        promo_h: 948,
        base_dp: 375.0,
        is_tablet: false,
    };
    let mut engine = BlockEngine;
    let mut pipeline = AssetPipeline::new(Theme::default(), &mut engine);

    let promo = pipeline.promo(PromoScene::Setup, &profile).unwrap();
    assert_eq!((promo.width(), promo.height()), (438, 948));
}

#[test]
fn share_promo_renders_with_its_modal() {
    let profile = DeviceProfile {
        screen_w: 375,
        screen_h: 812,
        promo_w: 438,
        promo_h: 948,
        base_dp: 375.0,
        is_tablet: false,
    };
    let mut engine = BlockEngine;
    let mut pipeline = AssetPipeline::new(Theme::default(), &mut engine);
    let promo = pipeline.promo(PromoScene::Share, &profile).unwrap();
    assert_eq!((promo.width(), promo.height()), (438, 948));
}
