//! Direct Bézier evaluation by repeated linear interpolation.
//!
//! Every function here is pure and total over finite inputs. The curve parameter `t` is never
//! clamped: values outside `[0, 1]` extrapolate along the same polynomial.

use crate::foundation::core::Point;

/// Linear interpolation `a + (b - a) * t`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Component-wise [`lerp`] between two points.
pub fn lerp_pt(p0: Point, p1: Point, t: f64) -> Point {
    Point::new(lerp(p0.x, p1.x, t), lerp(p0.y, p1.y, t))
}

/// Euclidean distance between two points.
pub fn dist(a: Point, b: Point) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike [`f64::clamp`] this never panics: with `lo > hi` the result is `lo`.
pub fn clamp(v: f64, lo: f64, hi: f64) -> f64 {
    lo.max(hi.min(v))
}

/// Evaluate a cubic Bézier at `t` (three levels of interpolation).
pub fn cubic_pt(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    de_casteljau(p0, p1, p2, p3, t).pt
}

/// Evaluate a quadratic Bézier at `t` (two levels of interpolation).
pub fn quad_pt(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let a = lerp_pt(p0, p1, t);
    let b = lerp_pt(p1, p2, t);
    lerp_pt(a, b, t)
}

/// Intermediate points of the De Casteljau construction of a cubic at one parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeCasteljau {
    /// Points on the three control legs.
    pub l1: [Point; 3],
    /// Points on the two level-1 segments.
    pub l2: [Point; 2],
    /// The point on the curve.
    pub pt: Point,
}

/// Full De Casteljau construction of the cubic `p0..p3` at `t`.
///
/// `pt` is bit-identical to [`cubic_pt`] for the same inputs.
pub fn de_casteljau(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> DeCasteljau {
    let a = lerp_pt(p0, p1, t);
    let b = lerp_pt(p1, p2, t);
    let c = lerp_pt(p2, p3, t);
    let d = lerp_pt(a, b, t);
    let e = lerp_pt(b, c, t);
    let f = lerp_pt(d, e, t);
    DeCasteljau {
        l1: [a, b, c],
        l2: [d, e],
        pt: f,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/eval.rs"]
mod tests;
