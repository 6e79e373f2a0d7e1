//! Brand theme: every color the composers reference, as one immutable value.
//!
//! The default theme is the Mahjong score-table brand; alternate brands are
//! just alternate `Theme` values passed into the composers.

use crate::core::Rgba;

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Theme {
    /// App background gradient, top then bottom.
    pub bg_top: Rgba,
    pub bg_bottom: Rgba,
    /// Splash variant of the gradient bottom.
    pub splash_bg_bottom: Rgba,
    /// Promo-canvas background gradient.
    pub promo_bg_top: Rgba,
    pub promo_bg_bottom: Rgba,

    pub card_bg: Rgba,
    pub card_border: Rgba,
    pub section_title: Rgba,
    pub section_border: Rgba,
    pub accent: Rgba,

    pub green: Rgba,
    pub red: Rgba,
    pub teal: Rgba,

    pub dark_text: Rgba,
    pub med_text: Rgba,
    pub light_text: Rgba,
    pub gray_text: Rgba,
    pub hint_text: Rgba,
    pub subtitle_text: Rgba,
    pub promo_subtitle: Rgba,

    pub input_border: Rgba,
    pub code_bg: Rgba,
    pub stepper_btn_bg: Rgba,
    pub stepper_btn_border: Rgba,
    pub stepper_btn_text: Rgba,
    pub stepper_display_border: Rgba,
    pub row_bg: Rgba,
    pub divider: Rgba,

    pub rank_gold: Rgba,
    pub rank_silver: Rgba,
    pub rank_bronze: Rgba,
    pub rank_gray: Rgba,

    pub grid_line: Rgba,
    pub grid_zebra: Rgba,
    pub sheet_border: Rgba,
    pub sheet_title: Rgba,
    pub tile_face: Rgba,
    pub tile_body: Rgba,
    pub tile_border: Rgba,
    pub tile_inner_shadow: Rgba,
    pub tile_glyph: Rgba,

    pub device_body: Rgba,
    pub device_edge: Rgba,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_top: Rgba::rgb(30, 60, 114),
            bg_bottom: Rgba::rgb(42, 82, 152),
            splash_bg_bottom: Rgba::rgb(35, 70, 130),
            promo_bg_top: Rgba::rgb(15, 30, 80),
            promo_bg_bottom: Rgba::rgb(25, 55, 120),

            card_bg: Rgba::WHITE,
            card_border: Rgba::rgb(222, 226, 230),
            section_title: Rgba::rgb(30, 60, 114),
            section_border: Rgba::rgb(42, 82, 152),
            accent: Rgba::rgb(42, 82, 152),

            green: Rgba::rgb(40, 167, 69),
            red: Rgba::rgb(220, 53, 69),
            teal: Rgba::rgb(23, 162, 184),

            dark_text: Rgba::rgb(51, 51, 51),
            med_text: Rgba::rgb(85, 85, 85),
            light_text: Rgba::rgb(102, 102, 102),
            gray_text: Rgba::rgb(108, 117, 125),
            hint_text: Rgba::rgb(153, 153, 153),
            subtitle_text: Rgba::rgb(200, 210, 230),
            promo_subtitle: Rgba::rgb(160, 200, 255),

            input_border: Rgba::rgb(221, 221, 221),
            code_bg: Rgba::rgb(245, 245, 245),
            stepper_btn_bg: Rgba::rgb(233, 236, 239),
            stepper_btn_border: Rgba::rgb(173, 181, 189),
            stepper_btn_text: Rgba::rgb(73, 80, 87),
            stepper_display_border: Rgba::rgb(42, 82, 152),
            row_bg: Rgba::rgb(248, 249, 250),
            divider: Rgba::rgb(238, 238, 238),

            rank_gold: Rgba::rgb(255, 215, 0),
            rank_silver: Rgba::rgb(192, 192, 192),
            rank_bronze: Rgba::rgb(205, 127, 50),
            rank_gray: Rgba::rgb(149, 165, 166),

            grid_line: Rgba::rgb(60, 90, 160),
            grid_zebra: Rgba::rgb(220, 230, 245),
            sheet_border: Rgba::rgb(180, 190, 210),
            sheet_title: Rgba::rgb(25, 50, 110),
            tile_face: Rgba::rgb(250, 245, 235),
            tile_body: Rgba::rgb(230, 230, 230),
            tile_border: Rgba::rgb(180, 180, 185),
            tile_inner_shadow: Rgba::rgba(100, 100, 110, 70),
            tile_glyph: Rgba::rgb(190, 30, 30),

            device_body: Rgba::rgb(20, 20, 25),
            device_edge: Rgba::rgb(60, 60, 65),
        }
    }
}

impl Theme {
    /// Accent color for a 1-based rank.
    pub fn rank_color(&self, rank: u8) -> Rgba {
        match rank {
            1 => self.rank_gold,
            2 => self.rank_silver,
            3 => self.rank_bronze,
            _ => self.rank_gray,
        }
    }

    /// Green for gains, red for losses, section blue for zero.
    pub fn value_color(&self, value: i32) -> Rgba {
        if value > 0 {
            self.green
        } else if value < 0 {
            self.red
        } else {
            self.section_title
        }
    }

    /// Green/red for a pre-formatted signed string like "+87".
    pub fn signed_text_color(&self, text: &str) -> Rgba {
        if text.starts_with('+') {
            self.green
        } else {
            self.red
        }
    }
}

/// Format a stepper value the way the app renders it: explicit plus sign for
/// gains, bare zero.
pub fn signed_label(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_colors_follow_podium_order() {
        let t = Theme::default();
        assert_eq!(t.rank_color(1), t.rank_gold);
        assert_eq!(t.rank_color(2), t.rank_silver);
        assert_eq!(t.rank_color(3), t.rank_bronze);
        assert_eq!(t.rank_color(4), t.rank_gray);
        assert_eq!(t.rank_color(9), t.rank_gray);
    }

    #[test]
    fn signed_label_has_no_plus_on_zero() {
        assert_eq!(signed_label(32), "+32");
        assert_eq!(signed_label(0), "0");
        assert_eq!(signed_label(-15), "-15");
    }

    #[test]
    fn theme_round_trips_through_json() {
        let t = Theme::default();
        let s = serde_json::to_string(&t).unwrap();
        let de: Theme = serde_json::from_str(&s).unwrap();
        assert_eq!(de.bg_top, t.bg_top);
        assert_eq!(de.device_body, t.device_body);
    }
}
