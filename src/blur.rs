//! Separable Gaussian blur over premultiplied RGBA8 buffers.
//!
//! The public entry takes only a blur radius; sigma equals the radius and the
//! kernel extent is `ceil(2.5 * sigma)`, which tracks PIL's `GaussianBlur`
//! closely enough for shadow synthesis.

use crate::error::{AppshotError, AppshotResult};

pub fn gaussian_blur_rgba8(
    src: &[u8],
    width: u32,
    height: u32,
    radius_px: u32,
) -> AppshotResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| AppshotError::geometry("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(AppshotError::geometry(
            "gaussian_blur_rgba8 expects src matching width*height*4",
        ));
    }
    if radius_px == 0 {
        return Ok(src.to_vec());
    }

    let sigma = radius_px as f64;
    let extent = (sigma * 2.5).ceil() as u32;
    let kernel = gaussian_kernel_q16(extent, sigma);

    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];
    horizontal_pass(src, &mut tmp, width, height, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Symmetric kernel of `2*extent + 1` Q16 fixed-point weights summing to 65536.
fn gaussian_kernel_q16(extent: u32, sigma: f64) -> Vec<u32> {
    let r = extent as i32;
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold rounding drift into the center tap so the kernel stays normalized.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    weights
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    for y in 0..height as i32 {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                let idx = ((y * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let h = height as i32;
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                let idx = ((sy * w + x) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    (((acc + 32768) >> 16).min(255)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_0_is_identity() {
        let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
        let out = gaussian_blur_rgba8(&src, 1, 2, 0).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn constant_image_is_unchanged() {
        let (w, h) = (4u32, 3u32);
        let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
        let out = gaussian_blur_rgba8(&src, w, h, 2).unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn energy_spreads_from_single_pixel() {
        let (w, h) = (9u32, 9u32);
        let mut src = vec![0u8; (w * h * 4) as usize];
        let center = ((4 * w + 4) * 4) as usize;
        src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

        let out = gaussian_blur_rgba8(&src, w, h, 1).unwrap();

        let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
        assert!(nonzero > 1);

        let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
        assert!((sum_a as i32 - 255).abs() <= 4);
    }

    #[test]
    fn rejects_mismatched_buffer() {
        assert!(gaussian_blur_rgba8(&[0u8; 5], 1, 1, 1).is_err());
    }
}
