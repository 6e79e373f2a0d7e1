//! The five shipped promo scenes, expressed as scene descriptors.
//!
//! Everything here is data: positions in dp against the profile's base
//! width, copy in Japanese, and colors pulled from the theme. The composer
//! does the painting.

use crate::{
    core::{DpRect, Rgba},
    device::DeviceProfile,
    scene::{HistoryEntry, Overlay, SceneDescriptor, Widget},
    shape::ShadowSpec,
    text::{Align, FontFamily},
    theme::Theme,
};

/// One promotional screenshot. Order matches the store listing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromoScene {
    Setup,
    Score,
    Summary,
    PastGames,
    Share,
}

impl PromoScene {
    pub const ALL: [PromoScene; 5] = [
        PromoScene::Setup,
        PromoScene::Score,
        PromoScene::Summary,
        PromoScene::PastGames,
        PromoScene::Share,
    ];

    /// Output file stem, e.g. `promo_1_setup`.
    pub fn slug(self) -> &'static str {
        match self {
            PromoScene::Setup => "promo_1_setup",
            PromoScene::Score => "promo_2_score",
            PromoScene::Summary => "promo_3_summary",
            PromoScene::PastGames => "promo_4_past_games",
            PromoScene::Share => "promo_5_share",
        }
    }

    /// Headline above the device frame.
    pub fn headline(self) -> &'static str {
        match self {
            PromoScene::Setup => "麻雀対戦スコア管理",
            PromoScene::Score => "スコアの記録",
            PromoScene::Summary => "総合スコア & 履歴",
            PromoScene::PastGames => "過去のゲーム一覧",
            PromoScene::Share => "ゲームの共有",
        }
    }

    pub fn subheadline(self) -> &'static str {
        match self {
            PromoScene::Setup => "３麻４麻両対応！",
            PromoScene::Score => "直感的なUIでかんたん入力",
            PromoScene::Summary => "ランキングと全記録を一目で確認",
            PromoScene::PastGames => "いつでも振り返り・削除が可能",
            PromoScene::Share => "共有コードで友達にかんたん送信",
        }
    }

    /// Build the dp-space descriptor for one device profile.
    pub fn descriptor(self, profile: &DeviceProfile, theme: &Theme) -> SceneDescriptor {
        let l = Layout::of(profile);
        match self {
            PromoScene::Setup => setup_scene(&l, theme),
            PromoScene::Score => score_scene(&l, theme),
            PromoScene::Summary => summary_scene(&l, theme),
            PromoScene::PastGames => past_games_scene(&l, theme),
            PromoScene::Share => share_scene(&l, theme),
        }
    }
}

/// Shared dp measurements for one profile.
struct Layout {
    /// Screen width in dp (the scaling base).
    w: f64,
    /// Screen height in dp.
    h: f64,
    /// Outer horizontal padding, ~16dp on a phone.
    pad: f64,
}

impl Layout {
    fn of(profile: &DeviceProfile) -> Self {
        Self {
            w: profile.base_dp,
            h: profile.screen_height_dp(),
            pad: 0.042 * profile.base_dp,
        }
    }
}

fn rect(x: f64, y: f64, w: f64, h: f64) -> DpRect {
    DpRect::from_origin_size((x, y), (w, h))
}

fn label(
    text: &str,
    align: Align,
    x: f64,
    y: f64,
    family: FontFamily,
    size: f64,
    color: Rgba,
) -> Widget {
    Widget::Label {
        text: text.to_string(),
        align,
        x,
        y,
        family,
        size,
        color,
    }
}

fn panel(r: DpRect, radius: f64, fill: Rgba) -> Widget {
    Widget::Panel {
        rect: r,
        radius,
        fill: Some(fill),
        outline: None,
        outline_px: 0,
        shadow: None,
    }
}

fn outlined_panel(r: DpRect, radius: f64, fill: Rgba, outline: Rgba, outline_px: i32) -> Widget {
    Widget::Panel {
        rect: r,
        radius,
        fill: Some(fill),
        outline: Some(outline),
        outline_px,
        shadow: None,
    }
}

fn button(r: DpRect, text: &str, bg: Rgba) -> Widget {
    Widget::Button {
        rect: r,
        text: text.to_string(),
        bg,
        fg: Rgba::WHITE,
    }
}

/// In-game header: hanchan counter on the left, suspend and finish buttons on
/// the right. Returns the y where the first card starts.
fn game_header(widgets: &mut Vec<Widget>, l: &Layout, round: &str, theme: &Theme) -> f64 {
    let hy = 32.0;
    widgets.push(label(
        round,
        Align::Left,
        l.pad,
        hy,
        FontFamily::Cjk,
        24.0,
        Rgba::WHITE,
    ));

    let suspend_x = l.w - l.pad - 86.0 - 8.0 - 50.0;
    widgets.push(outlined_panel(
        rect(suspend_x, hy, 50.0, 32.0),
        6.0,
        Rgba::rgba(255, 255, 255, 50),
        Rgba::rgba(255, 255, 255, 100),
        1,
    ));
    widgets.push(label(
        "中断",
        Align::Center,
        suspend_x + 25.0,
        hy + 6.0,
        FontFamily::Cjk,
        13.0,
        Rgba::WHITE,
    ));

    let finish_x = l.w - l.pad - 86.0;
    widgets.push(panel(rect(finish_x, hy, 86.0, 32.0), 6.0, theme.red));
    widgets.push(label(
        "ゲーム終了",
        Align::Center,
        finish_x + 43.0,
        hy + 6.0,
        FontFamily::Cjk,
        13.0,
        Rgba::WHITE,
    ));

    hy + 48.0
}

/// Back-navigation pill used on the read-only screens.
fn back_button(widgets: &mut Vec<Widget>, l: &Layout) {
    widgets.push(panel(
        rect(l.pad, 32.0, 60.0, 32.0),
        6.0,
        Rgba::rgba(255, 255, 255, 50),
    ));
    widgets.push(label(
        "← 戻る",
        Align::Center,
        l.pad + 30.0,
        38.0,
        FontFamily::Cjk,
        14.0,
        Rgba::WHITE,
    ));
}

/// Four summary cards in a 2x2 grid, top-left at (cx, cy).
fn summary_grid(widgets: &mut Vec<Widget>, cx: f64, cy: f64, cw: f64) {
    let players: [(&str, &str, u8); 4] = [
        ("太郎", "+87", 1),
        ("花子", "+23", 2),
        ("次郎", "-42", 3),
        ("美咲", "-68", 4),
    ];
    let card_w = (cw - 8.0) / 2.0;
    let card_h = 80.0;
    for (i, (name, score, rank)) in players.into_iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        widgets.push(Widget::SummaryCard {
            rect: rect(cx + col * (card_w + 8.0), cy + row * (card_h + 8.0), card_w, card_h),
            name: name.to_string(),
            score: score.to_string(),
            rank,
        });
    }
}

fn setup_scene(l: &Layout, theme: &Theme) -> SceneDescriptor {
    let mut desc = SceneDescriptor::new((theme.bg_top, theme.bg_bottom));
    let w = &mut desc.widgets;
    w.push(Widget::StatusBar);

    let header_y = 36.0;
    w.push(label(
        "麻雀",
        Align::Center,
        l.w / 2.0,
        header_y,
        FontFamily::Cjk,
        36.0,
        Rgba::WHITE,
    ));
    w.push(label(
        "スコアシートモバイル",
        Align::Center,
        l.w / 2.0,
        header_y + 44.0,
        FontFamily::Cjk,
        16.0,
        Rgba::WHITE,
    ));

    // help button, top right
    let help_x = l.w - l.pad - 40.0;
    w.push(panel(
        rect(help_x, header_y, 40.0, 36.0),
        8.0,
        Rgba::rgba(255, 255, 255, 64),
    ));
    w.push(label(
        "?",
        Align::Center,
        help_x + 20.0,
        header_y + 2.0,
        FontFamily::Bold,
        18.0,
        Rgba::WHITE,
    ));
    w.push(label(
        "使い方",
        Align::Center,
        help_x + 20.0,
        header_y + 22.0,
        FontFamily::Cjk,
        9.0,
        Rgba::WHITE,
    ));

    // game-settings card
    let card_x = l.pad;
    let card_y = header_y + 76.0;
    let card_w = l.w - 2.0 * l.pad;
    let card_h = 380.0;
    w.push(Widget::Card {
        rect: rect(card_x, card_y, card_w, card_h),
    });

    let cx = card_x + 20.0;
    let cw = card_w - 40.0;
    w.push(Widget::SectionTitle {
        x: cx,
        y: card_y + 20.0,
        w: cw,
        text: "ゲーム設定".to_string(),
        right_note: None,
    });
    let mut y = card_y + 20.0 + 32.0;

    w.push(label(
        "麻雀タイプ",
        Align::Left,
        cx,
        y,
        FontFamily::Cjk,
        14.0,
        theme.section_title,
    ));
    y += 24.0;

    // type toggle, four-player active
    let type_w = (cw - 12.0) / 2.0;
    w.push(outlined_panel(
        rect(cx, y, type_w, 56.0),
        8.0,
        theme.accent,
        theme.accent,
        2,
    ));
    w.push(label(
        "4人麻雀",
        Align::Center,
        cx + type_w / 2.0,
        y + 20.0,
        FontFamily::Cjk,
        14.0,
        Rgba::WHITE,
    ));
    let bx2 = cx + type_w + 12.0;
    w.push(outlined_panel(
        rect(bx2, y, type_w, 56.0),
        8.0,
        Rgba::WHITE,
        theme.card_border,
        2,
    ));
    w.push(label(
        "3人麻雀",
        Align::Center,
        bx2 + type_w / 2.0,
        y + 20.0,
        FontFamily::Cjk,
        14.0,
        theme.gray_text,
    ));
    y += 56.0 + 16.0;

    w.push(label(
        "プレイヤー設定",
        Align::Left,
        cx,
        y,
        FontFamily::Cjk,
        14.0,
        theme.section_title,
    ));
    y += 22.0;
    w.push(label(
        "※ 4文字以内で入力してください",
        Align::Left,
        cx,
        y,
        FontFamily::Cjk,
        11.0,
        theme.hint_text,
    ));
    y += 18.0;

    // player name inputs, 2x2
    let input_w = (cw - 12.0) / 2.0;
    let input_h = 44.0;
    for (i, name) in ["太郎", "花子", "次郎", "美咲"].into_iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        let ix = cx + col * (input_w + 12.0);
        let iy = y + row * (input_h + 24.0);
        w.push(label(
            &format!("プレイヤー{}", i + 1),
            Align::Left,
            ix,
            iy,
            FontFamily::Cjk,
            12.0,
            theme.med_text,
        ));
        w.push(outlined_panel(
            rect(ix, iy + 18.0, input_w, input_h),
            6.0,
            Rgba::WHITE,
            theme.input_border,
            2,
        ));
        w.push(label(
            name,
            Align::Left,
            ix + 10.0,
            iy + 28.0,
            FontFamily::Cjk,
            16.0,
            theme.dark_text,
        ));
    }
    y += 2.0 * (input_h + 24.0) + 4.0;

    w.push(button(rect(cx, y, cw, 48.0), "ゲーム開始", theme.accent));

    // history-management card
    let card2_y = card_y + card_h + 16.0;
    w.push(Widget::Card {
        rect: rect(card_x, card2_y, card_w, 170.0),
    });
    w.push(Widget::SectionTitle {
        x: cx,
        y: card2_y + 20.0,
        w: cw,
        text: "過去のゲーム履歴管理".to_string(),
        right_note: None,
    });
    let mut by = card2_y + 20.0 + 36.0;
    w.push(button(
        rect(cx, by, cw, 48.0),
        "過去のゲームを見る",
        theme.gray_text,
    ));
    by += 56.0;
    w.push(button(rect(cx, by, cw, 48.0), "ゲームを取り込む", theme.teal));

    desc
}

fn score_scene(l: &Layout, theme: &Theme) -> SceneDescriptor {
    let mut desc = SceneDescriptor::new((theme.bg_top, theme.bg_bottom));
    let w = &mut desc.widgets;
    w.push(Widget::StatusBar);

    let card_y = game_header(w, l, "第1半荘", theme);
    let card_x = l.pad;
    let card_w = l.w - 2.0 * l.pad;
    let cx = card_x + 16.0;
    let cw = card_w - 32.0;

    // point-entry card with the 2x2 stepper grid
    w.push(Widget::Card {
        rect: rect(card_x, card_y, card_w, 390.0),
    });
    w.push(Widget::SectionTitle {
        x: cx,
        y: card_y + 16.0,
        w: cw,
        text: "ポイント入力".to_string(),
        right_note: Some("合計: 0".to_string()),
    });

    let points: [(&str, i32); 4] = [("太郎", 32), ("花子", -15), ("次郎", -8), ("美咲", -9)];
    let roll_w = (cw - 8.0) / 2.0;
    let grid_y = card_y + 16.0 + 32.0;
    for (i, (name, value)) in points.into_iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        w.push(Widget::DrumRoll {
            x: cx + col * (roll_w + 8.0),
            y: grid_y + row * 120.0,
            w: roll_w,
            label: name.to_string(),
            value,
        });
    }
    w.push(button(
        rect(cx, grid_y + 240.0 + 8.0, cw, 42.0),
        "スコアを記録",
        theme.green,
    ));

    // chip-transfer card
    let chip_y = card_y + 390.0 + 16.0;
    w.push(Widget::Card {
        rect: rect(card_x, chip_y, card_w, 290.0),
    });
    w.push(Widget::SectionTitle {
        x: cx,
        y: chip_y + 16.0,
        w: cw,
        text: "チップ移動".to_string(),
        right_note: Some("合計: 0".to_string()),
    });
    let chips: [(&str, i32); 4] = [("太郎", 3), ("花子", -1), ("次郎", 2), ("美咲", -4)];
    let chip_grid_y = chip_y + 16.0 + 36.0;
    for (i, (name, value)) in chips.into_iter().enumerate() {
        let col = (i % 2) as f64;
        let row = (i / 2) as f64;
        w.push(Widget::DrumRoll {
            x: cx + col * (roll_w + 8.0),
            y: chip_grid_y + row * 120.0,
            w: roll_w,
            label: name.to_string(),
            value,
        });
    }

    desc
}

fn summary_scene(l: &Layout, theme: &Theme) -> SceneDescriptor {
    let mut desc = SceneDescriptor::new((theme.bg_top, theme.bg_bottom));
    let w = &mut desc.widgets;
    w.push(Widget::StatusBar);

    let card_y = game_header(w, l, "第3半荘", theme);
    let card_x = l.pad;
    let card_w = l.w - 2.0 * l.pad;
    let cx = card_x + 16.0;
    let cw = card_w - 32.0;

    w.push(Widget::Card {
        rect: rect(card_x, card_y, card_w, 240.0),
    });
    w.push(Widget::SectionTitle {
        x: cx,
        y: card_y + 16.0,
        w: cw,
        text: "総合スコア".to_string(),
        right_note: None,
    });
    summary_grid(w, cx, card_y + 16.0 + 32.0, cw);

    // history card with two recorded hanchan
    let hist_y = card_y + 240.0 + 16.0;
    w.push(Widget::Card {
        rect: rect(card_x, hist_y, card_w, 280.0),
    });
    w.push(Widget::SectionTitle {
        x: cx,
        y: hist_y + 16.0,
        w: cw,
        text: "記録履歴".to_string(),
        right_note: None,
    });
    let mut y = hist_y + 16.0 + 32.0;
    w.push(label(
        "※ 長押しで記録を削除",
        Align::Left,
        cx,
        y,
        FontFamily::Cjk,
        11.0,
        theme.hint_text,
    ));
    y += 18.0;

    let rows: [(&str, &str, [(&str, &str, u8); 4]); 2] = [
        (
            "第1半荘",
            "14:30",
            [
                ("太郎", "+12", 1),
                ("花子", "-8", 3),
                ("次郎", "+20", 1),
                ("美咲", "-24", 4),
            ],
        ),
        (
            "第2半荘",
            "14:31",
            [
                ("太郎", "+43", 1),
                ("花子", "-30", 4),
                ("次郎", "-20", 3),
                ("美咲", "+7", 2),
            ],
        ),
    ];
    for (i, (round, time, entries)) in rows.into_iter().enumerate() {
        w.push(Widget::HistoryRow {
            x: cx,
            y: y + i as f64 * 88.0,
            w: cw,
            label: round.to_string(),
            time: time.to_string(),
            entries: entries
                .into_iter()
                .map(|(name, delta, rank)| HistoryEntry {
                    name: name.to_string(),
                    delta: delta.to_string(),
                    rank,
                })
                .collect(),
        });
    }

    desc
}

fn past_games_scene(l: &Layout, theme: &Theme) -> SceneDescriptor {
    let mut desc = SceneDescriptor::new((theme.bg_top, theme.bg_bottom));
    let w = &mut desc.widgets;
    w.push(Widget::StatusBar);

    back_button(w, l);
    w.push(label(
        "過去のゲーム",
        Align::Center,
        l.w / 2.0,
        34.0,
        FontFamily::Cjk,
        20.0,
        Rgba::WHITE,
    ));

    let games: [(&str, &str, &str, &str); 5] = [
        ("2026/02/25", "4人麻雀", "太郎 / 花子 / 次郎 / 美咲", "5半荘"),
        ("2026/02/20", "3人麻雀", "太郎 / 花子 / 次郎", "3半荘"),
        ("2026/02/15", "4人麻雀", "Aさん / Bさん / Cさん / Dさん", "4半荘"),
        ("2026/02/10", "4人麻雀", "太郎 / 花子 / 次郎 / 美咲", "6半荘"),
        ("2026/02/05", "3人麻雀", "太郎 / 花子 / 次郎", "2半荘"),
    ];
    let card_w = l.w - 2.0 * l.pad;
    let mut y = 32.0 + 48.0;
    for (date, mode, players, rounds) in games {
        w.push(Widget::GameCard {
            rect: rect(l.pad, y, card_w, 88.0),
            date: date.to_string(),
            mode: mode.to_string(),
            players: players.to_string(),
            rounds: rounds.to_string(),
        });
        y += 88.0 + 12.0;
    }

    desc
}

fn share_scene(l: &Layout, theme: &Theme) -> SceneDescriptor {
    let mut desc = SceneDescriptor::new((theme.bg_top, theme.bg_bottom));
    let w = &mut desc.widgets;
    w.push(Widget::StatusBar);

    back_button(w, l);
    w.push(label(
        "2026/02/25",
        Align::Center,
        l.w / 2.0,
        32.0,
        FontFamily::Cjk,
        24.0,
        Rgba::WHITE,
    ));
    let share_x = l.w - l.pad - 50.0;
    w.push(panel(rect(share_x, 32.0, 50.0, 32.0), 6.0, theme.accent));
    w.push(label(
        "共有",
        Align::Center,
        share_x + 25.0,
        38.0,
        FontFamily::Cjk,
        13.0,
        Rgba::WHITE,
    ));

    let card_y = 32.0 + 48.0;
    let card_x = l.pad;
    let card_w = l.w - 2.0 * l.pad;
    let cx = card_x + 16.0;
    let cw = card_w - 32.0;
    w.push(Widget::Card {
        rect: rect(card_x, card_y, card_w, 240.0),
    });
    w.push(Widget::SectionTitle {
        x: cx,
        y: card_y + 16.0,
        w: cw,
        text: "総合スコア".to_string(),
        right_note: None,
    });
    summary_grid(w, cx, card_y + 16.0 + 32.0, cw);

    // share modal on top
    let modal_w = l.w - 48.0;
    let modal_h = 360.0;
    let mx = 24.0;
    let my = (l.h - modal_h) / 2.0;
    let mut overlay_widgets = Vec::new();

    overlay_widgets.push(label(
        "ゲームを共有",
        Align::Center,
        l.w / 2.0,
        my + 20.0,
        FontFamily::Cjk,
        20.0,
        theme.section_title,
    ));
    for (i, line) in [
        "以下の共有コードを相手に送ってください。",
        "相手はセットアップ画面の「ゲームを取り込む」",
        "から入力できます。",
    ]
    .into_iter()
    .enumerate()
    {
        overlay_widgets.push(label(
            line,
            Align::Center,
            l.w / 2.0,
            my + 52.0 + i as f64 * 18.0,
            FontFamily::Cjk,
            13.0,
            theme.light_text,
        ));
    }

    let code_x = mx + 20.0;
    let code_y = my + 110.0;
    let code_w = modal_w - 40.0;
    overlay_widgets.push(outlined_panel(
        rect(code_x, code_y, code_w, 80.0),
        8.0,
        theme.code_bg,
        theme.input_border,
        1,
    ));
    for (i, line) in [
        "eyJ2IjoxLCJwYyI6NCwicG4iOl",
        "siWkRvbGxhciIsIuiKseiKsSIsIu",
        "asoYjmiiIsIue+Ogjk5Il0sInNo...",
    ]
    .into_iter()
    .enumerate()
    {
        overlay_widgets.push(label(
            line,
            Align::Left,
            code_x + 10.0,
            code_y + 8.0 + i as f64 * 16.0,
            FontFamily::Mono,
            11.0,
            theme.dark_text,
        ));
    }

    let mut btn_y = code_y + 80.0 + 16.0;
    let actions: [(&str, Rgba, Rgba); 3] = [
        ("送信する", theme.accent, Rgba::WHITE),
        ("コピーする", theme.green, Rgba::WHITE),
        ("閉じる", Rgba::rgb(240, 240, 240), theme.light_text),
    ];
    for (caption, bg, fg) in actions {
        overlay_widgets.push(panel(rect(code_x, btn_y, code_w, 44.0), 8.0, bg));
        overlay_widgets.push(label(
            caption,
            Align::Center,
            l.w / 2.0,
            btn_y + 10.0,
            FontFamily::Cjk,
            16.0,
            fg,
        ));
        btn_y += 44.0 + 8.0;
    }

    desc.overlay = Some(Overlay {
        scrim_alpha: 128,
        panel: rect(mx, my, modal_w, modal_h),
        radius: 16.0,
        shadow: Some(ShadowSpec {
            offset: (4, 4),
            blur_px: 12,
            alpha: 60,
        }),
        widgets: overlay_widgets,
    });

    desc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{scene::SceneComposer, text::tests::BlockEngine};

    fn dev_profile() -> DeviceProfile {
        // 1 px per dp keeps compose cheap in tests
        DeviceProfile {
            screen_w: 375,
            screen_h: 812,
            promo_w: 414,
            promo_h: 896,
            base_dp: 375.0,
            is_tablet: false,
        }
    }

    #[test]
    fn slugs_are_unique_and_ordered() {
        let slugs: Vec<_> = PromoScene::ALL.iter().map(|s| s.slug()).collect();
        assert_eq!(
            slugs,
            [
                "promo_1_setup",
                "promo_2_score",
                "promo_3_summary",
                "promo_4_past_games",
                "promo_5_share"
            ]
        );
    }

    #[test]
    fn only_the_share_scene_carries_an_overlay() {
        let theme = Theme::default();
        let profile = dev_profile();
        for scene in PromoScene::ALL {
            let desc = scene.descriptor(&profile, &theme);
            assert_eq!(desc.overlay.is_some(), scene == PromoScene::Share, "{scene:?}");
        }
    }

    #[test]
    fn score_scene_has_eight_steppers() {
        let theme = Theme::default();
        let desc = PromoScene::Score.descriptor(&dev_profile(), &theme);
        let steppers = desc
            .widgets
            .iter()
            .filter(|w| matches!(w, Widget::DrumRoll { .. }))
            .count();
        assert_eq!(steppers, 8);
    }

    #[test]
    fn every_scene_composes_at_screen_resolution() {
        let theme = Theme::default();
        let profile = dev_profile();
        for scene in PromoScene::ALL {
            let desc = scene.descriptor(&profile, &theme);
            let mut engine = BlockEngine;
            let canvas = SceneComposer::compose(&desc, &profile, &theme, &mut engine)
                .unwrap_or_else(|e| panic!("{scene:?}: {e}"));
            assert_eq!((canvas.width(), canvas.height()), (375, 812));
        }
    }
}
