//! Separable gaussian blur over premultiplied RGBA8, used for shadows and glows.
//!
//! Pixels outside the buffer count as transparent, so blurred shapes fade out at the edges
//! instead of smearing the border.

use crate::foundation::error::{CurvecastError, CurvecastResult};

/// Normalized gaussian weights in Q16 fixed point.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GaussianKernel {
    weights: Vec<u32>,
}

impl GaussianKernel {
    /// Kernel covering three standard deviations on each side.
    pub(crate) fn new(sigma: f64) -> CurvecastResult<Self> {
        if !sigma.is_finite() || sigma < 0.0 {
            return Err(CurvecastError::validation(
                "blur sigma must be finite and >= 0",
            ));
        }
        let radius = (sigma * 3.0).ceil() as i64;
        if radius == 0 {
            return Ok(Self {
                weights: vec![1 << 16],
            });
        }

        let denom = 2.0 * sigma * sigma;
        let weights_f: Vec<f64> = (-radius..=radius)
            .map(|i| {
                let x = i as f64;
                (-x * x / denom).exp()
            })
            .collect();
        let sum: f64 = weights_f.iter().sum();

        let mut weights: Vec<u32> = weights_f
            .iter()
            .map(|w| ((w / sum) * 65536.0).round().clamp(0.0, 65536.0) as u32)
            .collect();
        let acc: i64 = weights.iter().map(|&w| i64::from(w)).sum();
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + 65536 - acc).clamp(0, 65536) as u32;
        Ok(Self { weights })
    }

    /// Number of pixels the kernel reaches on each side.
    pub(crate) fn radius(&self) -> u32 {
        (self.weights.len() / 2) as u32
    }

    #[cfg(test)]
    pub(crate) fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Blur a `width * height` premultiplied buffer.
    pub(crate) fn blur(&self, src: &[u8], width: u32, height: u32) -> CurvecastResult<Vec<u8>> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| CurvecastError::render("blur buffer size overflow"))?;
        if src.len() != len {
            return Err(CurvecastError::render(
                "blur expects a buffer of width*height*4 bytes",
            ));
        }
        if self.radius() == 0 {
            return Ok(src.to_vec());
        }

        let mut tmp = vec![0u8; len];
        let mut out = vec![0u8; len];
        self.pass(src, &mut tmp, width as usize, height as usize, 4, width as usize * 4);
        self.pass(&tmp, &mut out, height as usize, width as usize, width as usize * 4, 4);
        Ok(out)
    }

    /// One 1-D pass. `len` pixels along the axis at `step` bytes apart, `lines` lines at `line_step`.
    fn pass(&self, src: &[u8], dst: &mut [u8], len: usize, lines: usize, step: usize, line_step: usize) {
        let r = self.radius() as isize;
        for line in 0..lines {
            let base = line * line_step;
            for i in 0..len {
                let mut acc = [0u64; 4];
                for (k, &w) in self.weights.iter().enumerate() {
                    let j = i as isize + k as isize - r;
                    if j < 0 || j >= len as isize {
                        continue;
                    }
                    let idx = base + j as usize * step;
                    for (c, a) in acc.iter_mut().enumerate() {
                        *a += u64::from(w) * u64::from(src[idx + c]);
                    }
                }
                let out = base + i * step;
                for (c, a) in acc.iter().enumerate() {
                    dst[out + c] = q16_to_u8(*a);
                }
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
