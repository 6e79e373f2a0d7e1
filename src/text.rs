//! Text measurement and glyph rasterization.
//!
//! Shaping is delegated to `parley` and glyph painting to `vello_cpu`; the
//! rest of the crate only sees ink-box measurements and rendered bitmaps
//! through the [`TextEngine`] trait.

use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{
    canvas::Canvas,
    core::Rgba,
    error::{AppshotError, AppshotResult},
};

/// The four faces the scene data may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    Regular,
    Bold,
    Mono,
    Cjk,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    pub size_px: f32,
}

impl FontSpec {
    pub fn new(family: FontFamily, size_px: f32) -> Self {
        Self { family, size_px }
    }
}

/// Horizontal anchor for single-line placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Center,
    Right,
}

/// External text service: ink-box measurement and glyph bitmaps.
pub trait TextEngine {
    /// Ink-box `(width, height)` of a single line.
    fn measure(&mut self, text: &str, spec: FontSpec) -> AppshotResult<(f64, f64)>;

    /// Rendered premultiplied glyph bitmap sized to the ink box.
    fn render(&mut self, text: &str, spec: FontSpec, color: Rgba) -> AppshotResult<Canvas>;

    /// Whether a face was resolved for `family` at startup.
    fn has_family(&self, family: FontFamily) -> bool;
}

/// Place a single line anchored at `x`. Callers advance `y` themselves; there
/// is no wrapping.
pub fn draw_text(
    canvas: &mut Canvas,
    engine: &mut dyn TextEngine,
    text: &str,
    align: Align,
    x: i32,
    y: i32,
    spec: FontSpec,
    color: Rgba,
) -> AppshotResult<()> {
    if text.is_empty() {
        return Ok(());
    }
    let (w, _) = engine.measure(text, spec)?;
    let w = w.round() as i32;
    let left = match align {
        Align::Left => x,
        Align::Center => x - w / 2,
        Align::Right => x - w,
    };
    let bitmap = engine.render(text, spec, color)?;
    canvas.composite_at(&bitmap, left, y, None)
}

pub fn draw_centered(
    canvas: &mut Canvas,
    engine: &mut dyn TextEngine,
    text: &str,
    cx: i32,
    y: i32,
    spec: FontSpec,
    color: Rgba,
) -> AppshotResult<()> {
    draw_text(canvas, engine, text, Align::Center, cx, y, spec, color)
}

/// RGBA8 brush color carried through Parley styling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

struct LoadedFace {
    family_name: String,
    font_data: vello_cpu::peniko::FontData,
}

/// Production engine: fonts from disk, shaped with Parley, rasterized on the
/// vello_cpu glyph path.
pub struct ParleyEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: HashMap<FontFamily, LoadedFace>,
}

/// Candidate file names per family, searched in an optional override
/// directory first and then in the usual system font locations.
fn candidate_paths(family: FontFamily) -> (&'static [&'static str], &'static [&'static str]) {
    match family {
        FontFamily::Regular => (
            &["DejaVuSans.ttf"],
            &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
                "/usr/share/fonts/TTF/DejaVuSans.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            ],
        ),
        FontFamily::Bold => (
            &["DejaVuSans-Bold.ttf"],
            &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
                "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
            ],
        ),
        FontFamily::Mono => (
            &["DejaVuSansMono.ttf"],
            &[
                "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
                "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
                "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
            ],
        ),
        FontFamily::Cjk => (
            &["ipag.ttf", "NotoSansCJK-Regular.ttc"],
            &[
                "/usr/share/fonts/opentype/ipafont-gothic/ipag.ttf",
                "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
                "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            ],
        ),
    }
}

fn find_font_file(family: FontFamily, extra_dir: Option<&Path>) -> Option<PathBuf> {
    let (names, system) = candidate_paths(family);
    if let Some(dir) = extra_dir {
        for name in names {
            let p = dir.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
    }
    system.iter().map(PathBuf::from).find(|p| p.is_file())
}

impl ParleyEngine {
    /// Resolve and register all faces. `regular`, `bold` and `mono` are
    /// required and missing files abort the run; `cjk` is optional and its
    /// absence is only surfaced when CJK text is actually requested (with the
    /// one documented tile-glyph exception handled by the caller).
    pub fn load(extra_font_dir: Option<&Path>) -> AppshotResult<Self> {
        let mut engine = Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        };

        for family in [FontFamily::Regular, FontFamily::Bold, FontFamily::Mono] {
            let path = find_font_file(family, extra_font_dir).ok_or_else(|| {
                AppshotError::configuration(format!(
                    "required font for {family:?} not found; pass --font-dir or install DejaVu"
                ))
            })?;
            engine.register(family, &path)?;
        }

        match find_font_file(FontFamily::Cjk, extra_font_dir) {
            Some(path) => engine.register(FontFamily::Cjk, &path)?,
            None => tracing::warn!("no CJK font found; CJK text will fail fast"),
        }

        Ok(engine)
    }

    fn register(&mut self, family: FontFamily, path: &Path) -> AppshotResult<()> {
        let bytes = std::fs::read(path).map_err(|e| {
            AppshotError::configuration(format!("read font '{}': {e}", path.display()))
        })?;

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            AppshotError::configuration(format!(
                "no font families registered from '{}'",
                path.display()
            ))
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| AppshotError::configuration("registered font family has no name"))?
            .to_string();

        let font_data =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
        tracing::debug!(?family, %family_name, path = %path.display(), "font registered");
        self.faces.insert(
            family,
            LoadedFace {
                family_name,
                font_data,
            },
        );
        Ok(())
    }

    fn face(&self, family: FontFamily) -> AppshotResult<&LoadedFace> {
        self.faces.get(&family).ok_or_else(|| {
            AppshotError::configuration(format!("font for {family:?} is not available"))
        })
    }

    fn layout(
        &mut self,
        text: &str,
        spec: FontSpec,
        brush: TextBrushRgba8,
    ) -> AppshotResult<parley::Layout<TextBrushRgba8>> {
        if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
            return Err(AppshotError::text("font size must be finite and > 0"));
        }
        let family_name = self.face(spec.family)?.family_name.clone();

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(spec.size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

impl TextEngine for ParleyEngine {
    fn measure(&mut self, text: &str, spec: FontSpec) -> AppshotResult<(f64, f64)> {
        let layout = self.layout(text, spec, TextBrushRgba8::default())?;
        Ok((f64::from(layout.width()), f64::from(layout.height())))
    }

    fn render(&mut self, text: &str, spec: FontSpec, color: Rgba) -> AppshotResult<Canvas> {
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = self.layout(text, spec, brush)?;
        let w = layout.width().ceil().max(1.0) as u32;
        let h = layout.height().ceil().max(1.0) as u32;
        let w_u16: u16 = w
            .try_into()
            .map_err(|_| AppshotError::text("glyph bitmap width exceeds u16"))?;
        let h_u16: u16 = h
            .try_into()
            .map_err(|_| AppshotError::text("glyph bitmap height exceeds u16"))?;

        let font_data = self.face(spec.family)?.font_data.clone();
        let mut pixmap = vello_cpu::Pixmap::new(w_u16, h_u16);
        let mut ctx = vello_cpu::RenderContext::new(w_u16, h_u16);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Canvas::from_premul_parts(w, h, pixmap.data_as_u8_slice().to_vec())
    }

    fn has_family(&self, family: FontFamily) -> bool {
        self.faces.contains_key(&family)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Deterministic stand-in: every glyph is a `0.6 * size` wide solid block.
    pub(crate) struct BlockEngine;

    impl TextEngine for BlockEngine {
        fn measure(&mut self, text: &str, spec: FontSpec) -> AppshotResult<(f64, f64)> {
            let w = text.chars().count() as f64 * f64::from(spec.size_px) * 0.6;
            Ok((w, f64::from(spec.size_px)))
        }

        fn render(&mut self, text: &str, spec: FontSpec, color: Rgba) -> AppshotResult<Canvas> {
            let (w, h) = self.measure(text, spec)?;
            let mut c = Canvas::new(w.ceil().max(1.0) as u32, h.ceil().max(1.0) as u32);
            let px = color.premultiplied();
            for y in 0..c.height() as i32 {
                for x in 0..c.width() as i32 {
                    c.put(x, y, px);
                }
            }
            Ok(c)
        }

        fn has_family(&self, _family: FontFamily) -> bool {
            true
        }
    }

    #[test]
    fn centered_placement_is_symmetric_at_canvas_midpoint() {
        let mut canvas = Canvas::new(200, 40);
        let mut engine = BlockEngine;
        let spec = FontSpec::new(FontFamily::Regular, 20.0);
        draw_centered(&mut canvas, &mut engine, "abcd", 100, 10, spec, Rgba::WHITE).unwrap();

        let (w, _) = engine.measure("abcd", spec).unwrap();
        let w = w.round() as i32;
        let mut left_edge = None;
        let mut right_edge = None;
        for x in 0..200 {
            if canvas.pixel(x, 15)[3] != 0 {
                left_edge.get_or_insert(x);
                right_edge = Some(x);
            }
        }
        let (l, r) = (left_edge.unwrap(), right_edge.unwrap());
        assert_eq!(r - l + 1, w);
        let left_margin = l;
        let right_margin = 200 - 1 - r;
        assert!((left_margin - right_margin).abs() <= 1);
    }

    #[test]
    fn right_alignment_ends_at_anchor() {
        let mut canvas = Canvas::new(100, 30);
        let mut engine = BlockEngine;
        let spec = FontSpec::new(FontFamily::Regular, 10.0);
        draw_text(
            &mut canvas,
            &mut engine,
            "xy",
            Align::Right,
            90,
            5,
            spec,
            Rgba::WHITE,
        )
        .unwrap();
        assert_ne!(canvas.pixel(89, 10)[3], 0);
        assert_eq!(canvas.pixel(91, 10)[3], 0);
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut canvas = Canvas::new(10, 10);
        let mut engine = BlockEngine;
        let spec = FontSpec::new(FontFamily::Regular, 10.0);
        draw_centered(&mut canvas, &mut engine, "", 5, 0, spec, Rgba::WHITE).unwrap();
        assert!(canvas.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn parley_engine_fails_fast_without_fonts() {
        // An empty override dir with no system fonts either ends in a
        // configuration error; with system fonts present loading succeeds.
        let dir = std::env::temp_dir().join("appshot-no-fonts");
        let _ = std::fs::create_dir_all(&dir);
        match ParleyEngine::load(Some(&dir)) {
            Ok(engine) => {
                assert!(engine.has_family(FontFamily::Regular));
            }
            Err(AppshotError::Configuration(_)) => {}
            Err(other) => panic!("expected configuration error, got {other}"),
        }
    }
}
