use crate::foundation::error::{GraphError, GraphResult};
use crate::render::backend::Buffer;

const Q16_ONE: i64 = 1 << 16;

/// Blur every depth slice of `src` with a separable kernel of Q16 weights.
///
/// Edges clamp. A single-tap kernel returns the input unchanged.
pub fn blur_rgba8_premul(src: &Buffer, kernel: &[u32]) -> GraphResult<Buffer> {
    if kernel.is_empty() || kernel.len() % 2 == 0 {
        return Err(GraphError::validation("blur kernel must have an odd number of taps"));
    }
    if kernel.len() == 1 || src.extent.is_empty() {
        return Ok(src.clone());
    }

    let (w, h) = (src.width(), src.height());
    let slice_len = w as usize * h as usize * 4;
    let mut out = Buffer::cleared(src.extent);
    let mut tmp = vec![0u8; slice_len];
    for z in 0..src.depth() {
        let start = z as usize * slice_len;
        horizontal_pass(src.slice(z), &mut tmp, w, h, kernel);
        vertical_pass(&tmp, &mut out.data[start..start + slice_len], w, h, kernel);
    }
    Ok(out)
}

pub fn gaussian_kernel_q16(radius: u32, sigma: f32) -> GraphResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(GraphError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let weights: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    quantize(&weights)
}

/// Equal weights over `2 * radius + 1` taps.
pub fn box_kernel_q16(radius: u32) -> GraphResult<Vec<u32>> {
    quantize(&vec![1.0; 2 * radius as usize + 1])
}

fn quantize(weights: &[f64]) -> GraphResult<Vec<u32>> {
    let sum: f64 = weights.iter().sum();
    if sum <= 0.0 {
        return Err(GraphError::render("blur kernel sum is zero"));
    }

    let mut out = Vec::with_capacity(weights.len());
    let mut acc = 0i64;
    for &w in weights {
        let q = ((w / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, Q16_ONE);
        out.push(q as u32);
        acc += q;
    }
    // Rounding drift lands on the center tap so the kernel sums to exactly one.
    let delta = Q16_ONE - acc;
    if delta != 0 {
        let mid = out.len() / 2;
        out[mid] = (i64::from(out[mid]) + delta).clamp(0, Q16_ONE) as u32;
    }
    Ok(out)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    for y in 0..i64::from(height) {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sx = (x + ki as i64 - radius).clamp(0, w - 1);
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
    let radius = (k.len() / 2) as i64;
    let w = i64::from(width);
    let h = i64::from(height);
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let sy = (y + ki as i64 - radius).clamp(0, h - 1);
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
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
