use crate::curve::eval::{cubic_pt, lerp_pt, quad_pt};
use crate::foundation::core::{BezPath, Point};

/// A Bézier segment of explicit degree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Curve {
    /// Straight segment `p0 -> p1`.
    Linear(Point, Point),
    /// Quadratic with one control point.
    Quadratic(Point, Point, Point),
    /// Cubic with two control points.
    Cubic(Point, Point, Point, Point),
}

impl Curve {
    /// Evaluate the curve at `t`.
    pub fn eval(&self, t: f64) -> Point {
        match *self {
            Self::Linear(p0, p1) => lerp_pt(p0, p1, t),
            Self::Quadratic(p0, p1, p2) => quad_pt(p0, p1, p2, t),
            Self::Cubic(p0, p1, p2, p3) => cubic_pt(p0, p1, p2, p3, t),
        }
    }

    /// Control points in order, including both endpoints.
    pub fn control_points(&self) -> Vec<Point> {
        match *self {
            Self::Linear(p0, p1) => vec![p0, p1],
            Self::Quadratic(p0, p1, p2) => vec![p0, p1, p2],
            Self::Cubic(p0, p1, p2, p3) => vec![p0, p1, p2, p3],
        }
    }

    /// `steps + 1` points at uniform parameter values `i / steps`.
    ///
    /// `steps == 0` yields the start point only.
    pub fn sample(&self, steps: usize) -> Vec<Point> {
        if steps == 0 {
            return vec![self.eval(0.0)];
        }
        (0..=steps)
            .map(|i| self.eval(i as f64 / steps as f64))
            .collect()
    }

    /// Sampled polyline as a path, ready to stroke.
    pub fn polyline(&self, steps: usize) -> BezPath {
        polyline_path(&self.sample(steps))
    }
}

pub(crate) fn polyline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut it = points.iter();
    if let Some(first) = it.next() {
        path.move_to(*first);
        for p in it {
            path.line_to(*p);
        }
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/curve/shape.rs"]
mod tests;
