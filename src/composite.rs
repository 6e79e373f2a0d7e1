//! Integer "over" compositing for premultiplied RGBA8 buffers.

use crate::error::{AppshotError, AppshotResult};

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels, with an extra coverage factor in
/// [0,255]. Coverage 255 with an opaque source replaces the destination
/// exactly; a zero-alpha source is a no-op.
pub fn over(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    if coverage == 0 || src[3] == 0 {
        return dst;
    }

    let cov = u16::from(coverage);
    let sa = mul_div255(u16::from(src[3]), cov);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = mul_div255(u16::from(dst[3]), inv).saturating_add(sa);
    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), cov);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Replace `dst` with `src` weighted by coverage. Full coverage is an exact
/// overwrite even when the source is translucent (last-writer-wins paint).
pub fn paint(dst: PremulRgba8, src: PremulRgba8, coverage: u8) -> PremulRgba8 {
    match coverage {
        0 => dst,
        255 => src,
        c => {
            let cov = u16::from(c);
            let inv = 255u16 - cov;
            let mut out = [0u8; 4];
            for i in 0..4 {
                out[i] =
                    mul_div255(u16::from(src[i]), cov).saturating_add(mul_div255(u16::from(dst[i]), inv));
            }
            out
        }
    }
}

/// Composite `src` over `dst` across two equal-size RGBA8 buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> AppshotResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(AppshotError::geometry(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], 255);
        d.copy_from_slice(&out);
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
