use appshot::{AppshotResult, Canvas, FontFamily, FontSpec, Rgba, TextEngine};

/// Route pipeline logging through the test harness. Safe to call from every
/// test; only the first installation wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Deterministic text stand-in for end-to-end tests: every glyph becomes a
/// `0.6 * size` wide solid block, so nothing depends on installed fonts.
pub struct BlockEngine;

impl TextEngine for BlockEngine {
    fn measure(&mut self, text: &str, spec: FontSpec) -> AppshotResult<(f64, f64)> {
        let w = text.chars().count() as f64 * f64::from(spec.size_px) * 0.6;
        Ok((w, f64::from(spec.size_px)))
    }

    fn render(&mut self, text: &str, spec: FontSpec, color: Rgba) -> AppshotResult<Canvas> {
        let (w, h) = self.measure(text, spec)?;
        let width = w.ceil().max(1.0) as u32;
        let height = h.ceil().max(1.0) as u32;
        let px = color.premultiplied();
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..width * height {
            data.extend_from_slice(&px);
        }
        Canvas::from_premul_parts(width, height, data)
    }

    fn has_family(&self, _family: FontFamily) -> bool {
        true
    }
}
