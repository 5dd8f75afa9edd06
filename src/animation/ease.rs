//! Quadratic easing and time remapping over a normalized parameter.
//!
//! Callers clamp; outside `[0, 1]` the polynomials simply extrapolate.

/// Quadratic ease-in-out.
pub fn ease_in_out(t: f64) -> f64 {
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Quadratic ease-out.
pub fn ease_out(t: f64) -> f64 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Quadratic ease-in.
pub fn ease_in(t: f64) -> f64 {
    t * t
}

/// Triangular wave: `0 -> 1` over `[0, 0.5]`, then `1 -> 0` over `[0.5, 1]`.
pub fn ping_pong(t: f64) -> f64 {
    if t < 0.5 { t * 2.0 } else { 2.0 - t * 2.0 }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
