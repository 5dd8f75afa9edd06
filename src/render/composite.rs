use crate::foundation::error::{CurvecastError, CurvecastResult};
use crate::foundation::math::mul_div255_u8;

/// Integer pixel rectangle inside a backing store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Smallest rectangle covering `[x0, x1) x [y0, y1)` clipped to `width x height`.
    pub(crate) fn covering(x0: f64, y0: f64, x1: f64, y1: f64, width: u32, height: u32) -> Self {
        let clip = |v: f64, max: u32| -> u32 {
            if v.is_nan() {
                0
            } else {
                v.clamp(0.0, f64::from(max)) as u32
            }
        };
        let left = clip(x0.floor(), width);
        let top = clip(y0.floor(), height);
        let right = clip(x1.ceil(), width).max(left);
        let bottom = clip(y1.ceil(), height).max(top);
        Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Premultiplied src-over for one pixel.
pub(crate) fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    match src[3] {
        0 => dst,
        255 => src,
        sa => {
            let inv = 255 - u16::from(sa);
            let mut out = [0u8; 4];
            for c in 0..4 {
                out[c] = src[c].saturating_add(mul_div255_u8(u16::from(dst[c]), inv));
            }
            out
        }
    }
}

/// Composite `src` over `dst`; both are premultiplied RGBA8 of the same size.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> CurvecastResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(CurvecastError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Copy `rect` out of a `width`-wide buffer into a tightly packed one.
pub(crate) fn extract_region(src: &[u8], width: u32, rect: PixelRect) -> Vec<u8> {
    let row = rect.width as usize * 4;
    let mut out = Vec::with_capacity(row * rect.height as usize);
    for y in rect.y..rect.y + rect.height {
        let start = ((y as usize) * (width as usize) + rect.x as usize) * 4;
        out.extend_from_slice(&src[start..start + row]);
    }
    out
}

/// Composite a tightly packed `rect`-sized buffer over `dst` at `rect`'s position.
pub(crate) fn over_region(
    dst: &mut [u8],
    width: u32,
    src: &[u8],
    rect: PixelRect,
) -> CurvecastResult<()> {
    let row = rect.width as usize * 4;
    if src.len() != row * rect.height as usize {
        return Err(CurvecastError::render(
            "over_region expects a buffer matching the region",
        ));
    }
    for (i, src_row) in src.chunks_exact(row.max(4)).enumerate() {
        let start = ((rect.y as usize + i) * (width as usize) + rect.x as usize) * 4;
        let dst_row = dst
            .get_mut(start..start + row)
            .ok_or_else(|| CurvecastError::render("over_region rect out of bounds"))?;
        over_in_place(dst_row, src_row)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
