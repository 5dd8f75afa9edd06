use crate::foundation::error::{CurvecastError, CurvecastResult};
use std::fmt;

/// Straight-alpha color: 8-bit RGB plus floating-point alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB with alpha replaced.
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Channel-wise linear blend toward `other`, channels rounded to the nearest step.
    pub fn mix(self, other: Rgba, t: f64) -> Self {
        let ch = |a: u8, b: u8| {
            let (a, b) = (f64::from(a), f64::from(b));
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            r: ch(self.r, other.r),
            g: ch(self.g, other.g),
            b: ch(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Alpha clamped into `[0, 1]`; NaN is treated as transparent.
    pub fn alpha(self) -> f64 {
        if self.a.is_nan() {
            0.0
        } else {
            self.a.clamp(0.0, 1.0)
        }
    }

    pub fn is_transparent(self) -> bool {
        self.alpha() <= 0.0
    }

    /// Straight RGBA8 (alpha rounded to the nearest step).
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, (self.alpha() * 255.0).round() as u8]
    }

    /// Parse a CSS-style `#rrggbb` color.
    pub fn from_hex(hex: &str) -> CurvecastResult<Self> {
        parse_hex(hex)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Parse a 6-digit `#rrggbb` color (case-insensitive). Short and named forms are rejected.
pub fn parse_hex(hex: &str) -> CurvecastResult<Rgba> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| CurvecastError::color(format!("hex color \"{hex}\" must start with '#'")))?;
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(CurvecastError::color(format!(
            "hex color \"{hex}\" must be #RRGGBB"
        )));
    }

    let byte = |range: std::ops::Range<usize>| -> CurvecastResult<u8> {
        let pair = &digits[range];
        u8::from_str_radix(pair, 16)
            .map_err(|_| CurvecastError::color(format!("invalid hex byte \"{pair}\" in \"{hex}\"")))
    };

    Ok(Rgba::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?))
}

/// Parse `hex` and attach alpha `a`.
///
/// The result displays as `rgba(r,g,b,a)`.
pub fn with_alpha(hex: &str, a: f64) -> CurvecastResult<Rgba> {
    Ok(parse_hex(hex)?.with_alpha(a))
}

/// Shared diagram palette.
pub mod palette {
    use super::Rgba;

    pub const BG: Rgba = Rgba::rgb(0x0a, 0x0a, 0x0f);
    pub const TEAL: Rgba = Rgba::rgb(0x4e, 0xcd, 0xc4);
    pub const CORAL: Rgba = Rgba::rgb(0xff, 0x6b, 0x6b);
    pub const YELLOW: Rgba = Rgba::rgb(0xff, 0xd9, 0x3d);
    pub const GREEN: Rgba = Rgba::rgb(0x6b, 0xcb, 0x77);
    pub const BLUE: Rgba = Rgba::rgb(0x4d, 0x96, 0xff);
    pub const PURPLE: Rgba = Rgba::rgb(0xb0, 0x7a, 0xff);
    pub const WHITE: Rgba = Rgba::rgb(0xe8, 0xe8, 0xe8);
    pub const PURE_WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const DIM: Rgba = Rgba::rgba(255, 255, 255, 0.15);
    pub const DIMMER: Rgba = Rgba::rgba(255, 255, 255, 0.06);
    pub const GRID_LINE: Rgba = Rgba::rgba(255, 255, 255, 0.04);
    pub const TEXT: Rgba = Rgba::rgba(255, 255, 255, 0.7);
    pub const TEXT_DIM: Rgba = Rgba::rgba(255, 255, 255, 0.35);
}

#[cfg(test)]
#[path = "../../tests/unit/paint/color.rs"]
mod tests;
