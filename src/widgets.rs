//! Widget painters: the reusable mockup components the scene descriptors
//! reference. All methods take dp inputs and convert through the composer's
//! scaler exactly once.

use crate::{
    core::{DpRect, Rect, Rgba},
    error::AppshotResult,
    scene::{HistoryEntry, SceneComposer},
    shape::{self, ShadowSpec},
    text::{self, Align, FontFamily},
    theme::signed_label,
};

impl SceneComposer<'_> {
    pub(crate) fn panel(
        &mut self,
        rect: &DpRect,
        radius_dp: f64,
        fill: Option<Rgba>,
        outline: Option<Rgba>,
        outline_px: i32,
        shadow: Option<ShadowSpec>,
    ) -> AppshotResult<()> {
        let r = self.rect_px(rect);
        let radius = self.scaler.px(radius_dp);
        if let Some(spec) = shadow {
            shape::drop_shadow(&mut self.canvas, r, radius, spec)?;
        }
        shape::fill_rounded_panel(&mut self.canvas, r, radius, fill, outline, outline_px)
    }

    pub(crate) fn label(
        &mut self,
        content: &str,
        align: Align,
        x: f64,
        y: f64,
        family: FontFamily,
        size_dp: f64,
        color: Rgba,
    ) -> AppshotResult<()> {
        let spec = self.font(family, size_dp);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            content,
            align,
            self.scaler.px(x),
            self.scaler.px(y),
            spec,
            color,
        )
    }

    /// iOS-style status bar: bold clock on the left, battery glyph on the
    /// right.
    pub(crate) fn status_bar(&mut self) -> AppshotResult<()> {
        let clock = self.font(FontFamily::Bold, 12.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            "9:41",
            Align::Left,
            self.scaler.px(20.0),
            self.scaler.px(6.0),
            clock,
            Rgba::WHITE,
        )?;

        let bx = self.canvas.width() as i32 - self.scaler.px(35.0);
        let by = self.scaler.px(8.0);
        let bw = self.scaler.px(22.0);
        let bh = self.scaler.px(10.0);
        shape::fill_rounded_panel(
            &mut self.canvas,
            Rect::new(bx, by, bw, bh),
            2,
            Some(Rgba::WHITE),
            None,
            0,
        )?;
        // battery nub
        shape::fill_rect(
            &mut self.canvas,
            Rect::new(bx + bw, by + bh / 4, 2, bh * 3 / 4 - bh / 4),
            Rgba::WHITE,
        )
    }

    /// Shadowed white card, 12dp corners. The shadow parameters are absolute
    /// pixels, tuned once for both device sizes.
    pub(crate) fn card(&mut self, rect: &DpRect) -> AppshotResult<()> {
        let r = self.rect_px(rect);
        let radius = self.scaler.px(12.0);
        shape::drop_shadow(
            &mut self.canvas,
            r,
            radius,
            ShadowSpec {
                offset: (2, 4),
                blur_px: 8,
                alpha: 40,
            },
        )?;
        shape::fill_rounded_panel(&mut self.canvas, r, radius, Some(self.theme.card_bg), None, 0)
    }

    /// Section heading with the app's blue underline and an optional green
    /// right-aligned note.
    pub(crate) fn section_title(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        title: &str,
        right_note: Option<&str>,
    ) -> AppshotResult<()> {
        self.label(
            title,
            Align::Left,
            x,
            y,
            FontFamily::Cjk,
            16.0,
            self.theme.section_title,
        )?;
        let rule = Rect::new(
            self.scaler.px(x),
            self.scaler.px(y + 24.0),
            self.scaler.px(w),
            self.scaler.px(2.0).max(2),
        );
        shape::fill_rect(&mut self.canvas, rule, self.theme.section_border)?;
        if let Some(note) = right_note {
            self.label(
                note,
                Align::Right,
                x + w,
                y + 4.0,
                FontFamily::Cjk,
                12.0,
                self.theme.green,
            )?;
        }
        Ok(())
    }

    /// Numeric stepper matching the app's DrumRollInput: +10/+1 row, signed
    /// value display, -1/-10 row.
    pub(crate) fn drum_roll(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        player: &str,
        value: i32,
    ) -> AppshotResult<()> {
        let x = self.scaler.px(x);
        let mut y = self.scaler.px(y);
        let box_w = self.scaler.px(w);

        let label = self.font(FontFamily::Cjk, 12.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            player,
            Align::Left,
            x,
            y,
            label,
            self.theme.dark_text,
        )?;
        y += self.scaler.px(18.0);

        let btn_h = self.scaler.px(26.0);
        let gap = self.scaler.px(4.0);

        self.stepper_row(x, y, box_w, btn_h, gap, ["+10", "+1"])?;
        y += btn_h + gap;

        let disp_h = self.scaler.px(40.0);
        shape::fill_rounded_panel(
            &mut self.canvas,
            Rect::new(x, y, box_w, disp_h),
            self.scaler.px(6.0),
            Some(Rgba::WHITE),
            Some(self.theme.stepper_display_border),
            2,
        )?;
        let value_font = self.font(FontFamily::Bold, 18.0);
        let value_text = signed_label(value);
        text::draw_centered(
            &mut self.canvas,
            &mut *self.text,
            &value_text,
            x + box_w / 2,
            y + (disp_h - self.scaler.px(18.0)) / 2,
            value_font,
            self.theme.value_color(value),
        )?;
        y += disp_h + gap;

        self.stepper_row(x, y, box_w, btn_h, gap, ["-1", "-10"])
    }

    fn stepper_row(
        &mut self,
        x: i32,
        y: i32,
        box_w: i32,
        btn_h: i32,
        gap: i32,
        labels: [&str; 2],
    ) -> AppshotResult<()> {
        let spec = self.font(FontFamily::Bold, 11.0);
        let radius = self.scaler.px(4.0);
        let text_y = y + (btn_h - self.scaler.px(12.0)) / 2;
        for (i, caption) in labels.iter().enumerate() {
            let bx = x + i as i32 * (box_w / 2 + gap / 2);
            let bw = box_w / 2 - gap / 2;
            shape::fill_rounded_panel(
                &mut self.canvas,
                Rect::new(bx, y, bw, btn_h),
                radius,
                Some(self.theme.stepper_btn_bg),
                Some(self.theme.stepper_btn_border),
                1,
            )?;
            text::draw_centered(
                &mut self.canvas,
                &mut *self.text,
                caption,
                bx + bw / 2,
                text_y,
                spec,
                self.theme.stepper_btn_text,
            )?;
        }
        Ok(())
    }

    /// Rounded button, 6dp corners, centered 14dp label.
    pub(crate) fn button(
        &mut self,
        rect: &DpRect,
        caption: &str,
        bg: Rgba,
        fg: Rgba,
    ) -> AppshotResult<()> {
        let r = self.rect_px(rect);
        shape::fill_rounded_panel(&mut self.canvas, r, self.scaler.px(6.0), Some(bg), None, 0)?;
        let spec = self.font(FontFamily::Cjk, 14.0);
        text::draw_centered(
            &mut self.canvas,
            &mut *self.text,
            caption,
            r.x + r.w / 2,
            r.y + (r.h - self.scaler.px(14.0)) / 2,
            spec,
            fg,
        )
    }

    /// Ranked player score card: rank-colored accent bar on the left, name,
    /// big signed score, rank pill.
    pub(crate) fn summary_card(
        &mut self,
        rect: &DpRect,
        name: &str,
        score: &str,
        rank: u8,
    ) -> AppshotResult<()> {
        let r = self.rect_px(rect);
        let accent = self.theme.rank_color(rank);

        shape::fill_rounded_panel(
            &mut self.canvas,
            r,
            self.scaler.px(8.0),
            Some(self.theme.row_bg),
            Some(self.theme.card_border),
            2,
        )?;
        let bar_top = self.scaler.px(6.0);
        shape::fill_rect(
            &mut self.canvas,
            Rect::new(r.x + 1, r.y + bar_top, self.scaler.px(4.0) - 1, r.h - 2 * bar_top),
            accent,
        )?;

        let name_font = self.font(FontFamily::Cjk, 14.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            name,
            Align::Left,
            r.x + self.scaler.px(12.0),
            r.y + self.scaler.px(6.0),
            name_font,
            self.theme.dark_text,
        )?;

        let score_font = self.font(FontFamily::Bold, 20.0);
        text::draw_centered(
            &mut self.canvas,
            &mut *self.text,
            score,
            r.x + r.w / 2,
            r.y + self.scaler.px(28.0),
            score_font,
            self.theme.signed_text_color(score),
        )?;

        let pill_text = format!("{rank}位");
        let pill_font = self.font(FontFamily::Cjk, 10.0);
        let (tw, _) = self.text.measure(&pill_text, pill_font)?;
        let tw = tw.round() as i32;
        let px_ = r.x + self.scaler.px(12.0);
        let py = r.y + r.h - self.scaler.px(22.0);
        shape::fill_rounded_panel(
            &mut self.canvas,
            Rect::new(px_, py, tw + self.scaler.px(10.0), self.scaler.px(16.0)),
            self.scaler.px(8.0),
            Some(accent),
            None,
            0,
        )?;
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            &pill_text,
            Align::Left,
            px_ + self.scaler.px(5.0),
            py + self.scaler.px(1.0),
            pill_font,
            Rgba::WHITE,
        )
    }

    /// One history table row: round label, timestamp, and a centered cell per
    /// player with name, rank badge and signed delta.
    pub(crate) fn history_row(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        label: &str,
        time: &str,
        entries: &[HistoryEntry],
    ) -> AppshotResult<()> {
        let x = self.scaler.px(x);
        let y = self.scaler.px(y);
        let w = self.scaler.px(w);
        let row_h = self.scaler.px(80.0);

        shape::fill_rounded_panel(
            &mut self.canvas,
            Rect::new(x, y, w, row_h),
            self.scaler.px(8.0),
            Some(self.theme.row_bg),
            Some(self.theme.card_border),
            1,
        )?;

        let label_font = self.font(FontFamily::Cjk, 13.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            label,
            Align::Left,
            x + self.scaler.px(8.0),
            y + self.scaler.px(4.0),
            label_font,
            self.theme.dark_text,
        )?;
        let time_font = self.font(FontFamily::Cjk, 11.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            time,
            Align::Left,
            x + w - self.scaler.px(60.0),
            y + self.scaler.px(6.0),
            time_font,
            self.theme.gray_text,
        )?;

        let cell_w = w / entries.len().max(1) as i32;
        let cell_y = y + self.scaler.px(24.0);
        let name_font = self.font(FontFamily::Cjk, 11.0);
        let badge_font = self.font(FontFamily::Cjk, 10.0);
        let delta_font = self.font(FontFamily::Bold, 13.0);
        for (ci, entry) in entries.iter().enumerate() {
            let cell_cx = x + ci as i32 * cell_w + cell_w / 2;
            text::draw_centered(
                &mut self.canvas,
                &mut *self.text,
                &entry.name,
                cell_cx,
                cell_y,
                name_font,
                self.theme.med_text,
            )?;

            let badge_text = format!("{}位", entry.rank);
            let (tw, _) = self.text.measure(&badge_text, badge_font)?;
            let badge_w = tw.round() as i32 + self.scaler.px(8.0);
            shape::fill_rounded_panel(
                &mut self.canvas,
                Rect::new(cell_cx - badge_w / 2, cell_y + self.scaler.px(16.0), badge_w, self.scaler.px(14.0)),
                self.scaler.px(6.0),
                Some(self.theme.rank_color(entry.rank)),
                None,
                0,
            )?;
            text::draw_centered(
                &mut self.canvas,
                &mut *self.text,
                &badge_text,
                cell_cx,
                cell_y + self.scaler.px(17.0),
                badge_font,
                Rgba::WHITE,
            )?;

            text::draw_centered(
                &mut self.canvas,
                &mut *self.text,
                &entry.delta,
                cell_cx,
                cell_y + self.scaler.px(34.0),
                delta_font,
                self.theme.signed_text_color(&entry.delta),
            )?;
        }
        Ok(())
    }

    /// Past-game list card: date/type header row, divider, players/rounds
    /// body row.
    pub(crate) fn game_card(
        &mut self,
        rect: &DpRect,
        date: &str,
        mode: &str,
        players: &str,
        rounds: &str,
    ) -> AppshotResult<()> {
        self.card(rect)?;
        let r = self.rect_px(rect);
        let inner = self.scaler.px(16.0);
        let cx = r.x + inner;
        let cw = r.w - 2 * inner;

        let date_font = self.font(FontFamily::Cjk, 16.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            date,
            Align::Left,
            cx,
            r.y + self.scaler.px(10.0),
            date_font,
            self.theme.section_title,
        )?;
        let mode_font = self.font(FontFamily::Cjk, 13.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            mode,
            Align::Right,
            cx + cw,
            r.y + self.scaler.px(12.0),
            mode_font,
            self.theme.gray_text,
        )?;

        let div_y = r.y + self.scaler.px(38.0);
        shape::fill_rect(
            &mut self.canvas,
            Rect::new(cx, div_y, cw, 1),
            self.theme.divider,
        )?;

        let players_font = self.font(FontFamily::Cjk, 14.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            players,
            Align::Left,
            cx,
            div_y + self.scaler.px(8.0),
            players_font,
            self.theme.dark_text,
        )?;
        let rounds_font = self.font(FontFamily::Cjk, 13.0);
        text::draw_text(
            &mut self.canvas,
            &mut *self.text,
            rounds,
            Align::Right,
            cx + cw,
            div_y + self.scaler.px(10.0),
            rounds_font,
            self.theme.gray_text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        canvas::Canvas,
        device::DeviceScaler,
        text::{TextEngine, tests::BlockEngine},
        theme::Theme,
    };

    /// 1 px per dp, comfortably sized scratch screen.
    fn composer<'a>(theme: &'a Theme, text: &'a mut dyn TextEngine) -> SceneComposer<'a> {
        SceneComposer {
            canvas: Canvas::new(400, 800),
            scaler: DeviceScaler::new(400, 400.0).unwrap(),
            theme,
            text,
        }
    }

    #[test]
    fn status_bar_puts_the_battery_on_the_right() {
        let theme = Theme::default();
        let mut engine = BlockEngine;
        let mut c = composer(&theme, &mut engine);
        c.status_bar().unwrap();
        // battery body center: bx = 400 - 35 = 365, 22x10 at y=8
        assert_eq!(c.canvas.pixel_straight(375, 13), Rgba::WHITE);
        // clock ink near the left edge
        assert_ne!(c.canvas.pixel(22, 10)[3], 0);
    }

    #[test]
    fn drum_roll_display_has_blue_border_and_white_well() {
        let theme = Theme::default();
        let mut engine = BlockEngine;
        let mut c = composer(&theme, &mut engine);
        c.drum_roll(10.0, 10.0, 155.0, "太郎", 32).unwrap();

        // display spans y 58..98 (label 18 + buttons 26 + gap 4)
        let mid = 58 + 20;
        assert_eq!(c.canvas.pixel_straight(10, mid), theme.stepper_display_border);
        assert_eq!(c.canvas.pixel_straight(11, mid), theme.stepper_display_border);
        assert_eq!(c.canvas.pixel_straight(14, mid), Rgba::WHITE);
    }

    #[test]
    fn summary_card_accent_follows_rank() {
        let theme = Theme::default();
        let mut engine = BlockEngine;
        let mut c = composer(&theme, &mut engine);
        let rect = DpRect::from_origin_size((10.0, 10.0), (180.0, 80.0));
        c.summary_card(&rect, "太郎", "+87", 1).unwrap();
        assert_eq!(c.canvas.pixel_straight(12, 50), theme.rank_gold);

        let rect2 = DpRect::from_origin_size((10.0, 110.0), (180.0, 80.0));
        c.summary_card(&rect2, "美咲", "-68", 4).unwrap();
        assert_eq!(c.canvas.pixel_straight(12, 150), theme.rank_gray);
    }

    #[test]
    fn button_fills_background_and_centers_caption() {
        let theme = Theme::default();
        let mut engine = BlockEngine;
        let mut c = composer(&theme, &mut engine);
        let rect = DpRect::from_origin_size((20.0, 20.0), (200.0, 48.0));
        c.button(&rect, "ゲーム開始", theme.accent, Rgba::WHITE).unwrap();

        // left of the caption, inside the rounded corner
        assert_eq!(c.canvas.pixel_straight(30, 44), theme.accent);
        // caption ink at the center
        assert_eq!(c.canvas.pixel_straight(120, 44), Rgba::WHITE);
    }

    #[test]
    fn game_card_draws_divider_between_header_and_body() {
        let theme = Theme::default();
        let mut engine = BlockEngine;
        let mut c = composer(&theme, &mut engine);
        let rect = DpRect::from_origin_size((10.0, 10.0), (300.0, 120.0));
        c.game_card(&rect, "2026/02/15", "4人麻雀", "太郎 / 花子", "4半荘")
            .unwrap();

        // divider rule at r.y + 38, inset 16 from each side
        assert_eq!(c.canvas.pixel_straight(100, 48), theme.divider);
        // card paper between the date block and the divider
        assert_eq!(c.canvas.pixel_straight(100, 40), theme.card_bg);
    }

    #[test]
    fn history_row_centers_cells_per_entry() {
        let theme = Theme::default();
        let mut engine = BlockEngine;
        let mut c = composer(&theme, &mut engine);
        let entries = vec![
            HistoryEntry {
                name: "太郎".into(),
                delta: "+12".into(),
                rank: 1,
            },
            HistoryEntry {
                name: "花子".into(),
                delta: "-8".into(),
                rank: 3,
            },
        ];
        c.history_row(10.0, 10.0, 380.0, "第1半荘", "14:30", &entries)
            .unwrap();

        // row background inside the border
        assert_eq!(c.canvas.pixel_straight(100, 12), theme.row_bg);
        // first cell badge: centered at x = 10 + 95, badge spans y 50..64 with
        // its white caption ending around y 60
        assert_eq!(c.canvas.pixel_straight(105, 62), theme.rank_gold);
    }
}
