//! Scene descriptors (pure data, dp coordinates) and the composer that
//! paints them.

use crate::{
    canvas::Canvas,
    core::{DpRect, Rect, Rgba},
    device::{DeviceProfile, DeviceScaler},
    error::AppshotResult,
    gradient,
    shape::ShadowSpec,
    text::{Align, FontFamily, FontSpec, TextEngine},
    theme::Theme,
};

/// One draw instruction. Positions and sizes are authored in dp; line widths
/// and shadow parameters are absolute pixels, matching how the mockups were
/// originally tuned.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    /// Vertical gradient over a sub-rect (backgrounds use the descriptor's
    /// own background pair instead).
    Gradient {
        rect: DpRect,
        top: Rgba,
        bottom: Rgba,
    },
    /// Rounded rectangle, optionally shadowed.
    Panel {
        rect: DpRect,
        radius: f64,
        fill: Option<Rgba>,
        outline: Option<Rgba>,
        outline_px: i32,
        shadow: Option<ShadowSpec>,
    },
    /// Single line of text.
    Label {
        text: String,
        align: Align,
        x: f64,
        y: f64,
        family: FontFamily,
        size: f64,
        color: Rgba,
    },
    /// Plain rectangle (accent bars, battery nub).
    Block { rect: DpRect, color: Rgba },
    /// Horizontal rule.
    Rule {
        x: f64,
        y: f64,
        w: f64,
        thickness_px: i32,
        color: Rgba,
    },
    /// iOS-style status bar: clock plus battery glyph.
    StatusBar,
    /// Shadowed white card.
    Card { rect: DpRect },
    /// Section heading with underline and optional right-aligned note.
    SectionTitle {
        x: f64,
        y: f64,
        w: f64,
        text: String,
        right_note: Option<String>,
    },
    /// Numeric stepper: +10/+1 row, value display, -1/-10 row.
    DrumRoll {
        x: f64,
        y: f64,
        w: f64,
        label: String,
        value: i32,
    },
    /// Colored rounded button with centered label.
    Button {
        rect: DpRect,
        text: String,
        bg: Rgba,
        fg: Rgba,
    },
    /// Ranked player score card with accent bar and rank pill.
    SummaryCard {
        rect: DpRect,
        name: String,
        score: String,
        rank: u8,
    },
    /// History table row: round label, timestamp, per-player cells.
    HistoryRow {
        x: f64,
        y: f64,
        w: f64,
        label: String,
        time: String,
        entries: Vec<HistoryEntry>,
    },
    /// Past-game list card.
    GameCard {
        rect: DpRect,
        date: String,
        mode: String,
        players: String,
        rounds: String,
    },
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct HistoryEntry {
    pub name: String,
    pub delta: String,
    pub rank: u8,
}

/// Modal phase painted after the widget list: scrim, shadowed panel, then
/// the panel's own widgets.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Overlay {
    pub scrim_alpha: u8,
    pub panel: DpRect,
    pub radius: f64,
    pub shadow: Option<ShadowSpec>,
    pub widgets: Vec<Widget>,
}

/// A complete screen mockup: background gradient, widgets in paint order,
/// optional modal overlay. Later instructions paint over earlier ones; there
/// is no z-index sorting.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneDescriptor {
    pub background: (Rgba, Rgba),
    pub widgets: Vec<Widget>,
    pub overlay: Option<Overlay>,
}

impl SceneDescriptor {
    pub fn new(background: (Rgba, Rgba)) -> Self {
        Self {
            background,
            widgets: Vec::new(),
            overlay: None,
        }
    }
}

/// Paints a [`SceneDescriptor`] onto a fresh canvas at one device's screen
/// resolution.
pub struct SceneComposer<'a> {
    pub(crate) canvas: Canvas,
    pub(crate) scaler: DeviceScaler,
    pub(crate) theme: &'a Theme,
    pub(crate) text: &'a mut dyn TextEngine,
}

impl<'a> SceneComposer<'a> {
    /// Compose `desc` for `profile`. Three phases: background, widgets in
    /// list order, optional overlay. An empty widget list yields just the
    /// background.
    pub fn compose(
        desc: &SceneDescriptor,
        profile: &DeviceProfile,
        theme: &'a Theme,
        text: &'a mut dyn TextEngine,
    ) -> AppshotResult<Canvas> {
        let scaler = DeviceScaler::for_screen(profile)?;
        let mut composer = Self {
            canvas: Canvas::new(profile.screen_w, profile.screen_h),
            scaler,
            theme,
            text,
        };

        gradient::fill_background(&mut composer.canvas, desc.background.0, desc.background.1)?;
        for widget in &desc.widgets {
            composer.widget(widget)?;
        }
        if let Some(overlay) = &desc.overlay {
            composer.overlay(overlay)?;
        }
        Ok(composer.canvas)
    }

    pub(crate) fn px(&self, dp: f64) -> i32 {
        self.scaler.px(dp)
    }

    pub(crate) fn rect_px(&self, rect: &DpRect) -> Rect {
        Rect::new(
            self.px(rect.x0),
            self.px(rect.y0),
            self.px(rect.width()),
            self.px(rect.height()),
        )
    }

    pub(crate) fn font(&self, family: FontFamily, size_dp: f64) -> FontSpec {
        FontSpec::new(family, self.scaler.font_px(size_dp))
    }

    fn widget(&mut self, widget: &Widget) -> AppshotResult<()> {
        match widget {
            Widget::Gradient { rect, top, bottom } => {
                let r = self.rect_px(rect);
                gradient::fill_linear_gradient(&mut self.canvas, r, *top, *bottom)
            }
            Widget::Panel {
                rect,
                radius,
                fill,
                outline,
                outline_px,
                shadow,
            } => self.panel(rect, *radius, *fill, *outline, *outline_px, *shadow),
            Widget::Label {
                text,
                align,
                x,
                y,
                family,
                size,
                color,
            } => self.label(text, *align, *x, *y, *family, *size, *color),
            Widget::Block { rect, color } => {
                let r = self.rect_px(rect);
                crate::shape::fill_rect(&mut self.canvas, r, *color)
            }
            Widget::Rule {
                x,
                y,
                w,
                thickness_px,
                color,
            } => {
                let r = Rect::new(self.px(*x), self.px(*y), self.px(*w), *thickness_px);
                crate::shape::fill_rect(&mut self.canvas, r, *color)
            }
            Widget::StatusBar => self.status_bar(),
            Widget::Card { rect } => self.card(rect),
            Widget::SectionTitle {
                x,
                y,
                w,
                text,
                right_note,
            } => self.section_title(*x, *y, *w, text, right_note.as_deref()),
            Widget::DrumRoll { x, y, w, label, value } => {
                self.drum_roll(*x, *y, *w, label, *value)
            }
            Widget::Button { rect, text, bg, fg } => self.button(rect, text, *bg, *fg),
            Widget::SummaryCard {
                rect,
                name,
                score,
                rank,
            } => self.summary_card(rect, name, score, *rank),
            Widget::HistoryRow {
                x,
                y,
                w,
                label,
                time,
                entries,
            } => self.history_row(*x, *y, *w, label, time, entries),
            Widget::GameCard {
                rect,
                date,
                mode,
                players,
                rounds,
            } => self.game_card(rect, date, mode, players, rounds),
        }
    }

    fn overlay(&mut self, overlay: &Overlay) -> AppshotResult<()> {
        let full = Rect::new(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        self.canvas
            .blend_rect_over(full, Rgba::rgba(0, 0, 0, overlay.scrim_alpha))?;

        self.panel(
            &overlay.panel,
            overlay.radius,
            Some(self.theme.card_bg),
            None,
            0,
            overlay.shadow,
        )?;
        for widget in &overlay.widgets {
            self.widget(widget)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::tests::BlockEngine;

    fn tiny_profile(width: u32) -> DeviceProfile {
        DeviceProfile {
            screen_w: width,
            screen_h: width * 2,
            promo_w: width + 16,
            promo_h: width * 2 + 16,
            base_dp: 100.0,
            is_tablet: false,
        }
    }

    #[test]
    fn empty_scene_is_just_the_background() {
        let theme = Theme::default();
        let desc = SceneDescriptor::new((theme.bg_top, theme.bg_bottom));
        let mut text = BlockEngine;
        let canvas =
            SceneComposer::compose(&desc, &tiny_profile(100), &theme, &mut text).unwrap();
        assert_eq!(canvas.pixel_straight(0, 0), theme.bg_top);
        assert_eq!(canvas.pixel(50, 100)[3], 255);
    }

    #[test]
    fn widgets_paint_in_list_order() {
        let theme = Theme::default();
        let mut desc = SceneDescriptor::new((Rgba::rgb(0, 0, 0), Rgba::rgb(0, 0, 0)));
        desc.widgets.push(Widget::Block {
            rect: DpRect::from_origin_size((10.0, 10.0), (20.0, 20.0)),
            color: Rgba::rgb(255, 0, 0),
        });
        desc.widgets.push(Widget::Block {
            rect: DpRect::from_origin_size((10.0, 10.0), (20.0, 20.0)),
            color: Rgba::rgb(0, 255, 0),
        });

        let mut text = BlockEngine;
        let canvas =
            SceneComposer::compose(&desc, &tiny_profile(100), &theme, &mut text).unwrap();
        assert_eq!(canvas.pixel_straight(15, 15), Rgba::rgb(0, 255, 0));
    }

    #[test]
    fn overlay_darkens_the_scene_under_the_scrim() {
        let theme = Theme::default();
        let mut desc = SceneDescriptor::new((Rgba::WHITE, Rgba::WHITE));
        desc.overlay = Some(Overlay {
            scrim_alpha: 128,
            panel: DpRect::from_origin_size((30.0, 80.0), (40.0, 40.0)),
            radius: 8.0,
            shadow: None,
            widgets: vec![],
        });

        let mut text = BlockEngine;
        let canvas =
            SceneComposer::compose(&desc, &tiny_profile(100), &theme, &mut text).unwrap();
        // outside the modal: white dimmed by the scrim
        let dimmed = canvas.pixel_straight(5, 5);
        assert!(dimmed.r < 200 && dimmed.r > 80);
        // inside the modal: card white
        assert_eq!(canvas.pixel_straight(50, 100), theme.card_bg);
    }

    #[test]
    fn game_card_round_trips_under_the_kind_tag() {
        let widget = Widget::GameCard {
            rect: DpRect::from_origin_size((16.0, 80.0), (343.0, 88.0)),
            date: "2026/02/15".to_string(),
            mode: "4人麻雀".to_string(),
            players: "太郎 / 花子".to_string(),
            rounds: "4半荘".to_string(),
        };
        let s = serde_json::to_string(&widget).unwrap();
        assert!(s.contains("\"kind\":\"game_card\""), "{s}");
        match serde_json::from_str(&s).unwrap() {
            Widget::GameCard { mode, .. } => assert_eq!(mode, "4人麻雀"),
            other => panic!("unexpected widget {other:?}"),
        }
    }

    #[test]
    fn descriptor_round_trips_through_json() {
        let mut desc = SceneDescriptor::new((Rgba::rgb(1, 2, 3), Rgba::rgb(4, 5, 6)));
        desc.widgets.push(Widget::DrumRoll {
            x: 10.0,
            y: 20.0,
            w: 155.0,
            label: "player".to_string(),
            value: -15,
        });
        let s = serde_json::to_string_pretty(&desc).unwrap();
        let de: SceneDescriptor = serde_json::from_str(&s).unwrap();
        assert_eq!(de.widgets.len(), 1);
        match &de.widgets[0] {
            Widget::DrumRoll { value, .. } => assert_eq!(*value, -15),
            other => panic!("unexpected widget {other:?}"),
        }
    }
}
