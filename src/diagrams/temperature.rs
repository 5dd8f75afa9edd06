//! The temperature dial: a fan of cubics from one start point that diverge as temperature
//! sweeps `0 -> 2 -> 0`.

use crate::animation::ease::{ease_in_out, ping_pong};
use crate::curve::eval::clamp;
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_line,
};
use std::f64::consts::PI;

pub const SLUG: &str = "temperature";
pub const TITLE: &str = "The Temperature Dial";

const NUM_CURVES: usize = 10;
const CYCLE: f64 = 6.0;
const MAX_TEMPERATURE: f64 = 2.0;

/// Gradient stops: teal, blue, purple, coral.
const STOPS: [(f64, [u8; 3]); 4] = [
    (0.0, [78, 205, 196]),
    (0.33, [77, 150, 255]),
    (0.66, [176, 122, 255]),
    (1.0, [255, 107, 107]),
];

/// How one curve deviates from the centerline, as fractions of the current spread.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Seed {
    pub cp1y: f64,
    pub cp2y: f64,
    pub endy: f64,
}

impl Seed {
    fn deviation(self) -> f64 {
        self.cp1y.abs() + self.cp2y.abs()
    }
}

pub struct Temperature {
    seeds: [Seed; NUM_CURVES],
    /// Draw order: largest deviation first so central curves land on top.
    order: [usize; NUM_CURVES],
}

impl Temperature {
    pub fn new() -> Self {
        let seeds: [Seed; NUM_CURVES] = std::array::from_fn(|i| {
            let norm = (i as f64 / (NUM_CURVES - 1) as f64) * 2.0 - 1.0;
            let warp = norm + 0.15 * (norm * PI * 1.3).sin();
            let fi = i as f64;
            Seed {
                cp1y: warp * 0.7 + 0.1 * (fi * 2.1).sin(),
                cp2y: warp + 0.15 * (fi * 1.7).cos(),
                endy: warp * 0.5 + 0.08 * (fi * 3.2).sin(),
            }
        });
        let mut order: [usize; NUM_CURVES] = std::array::from_fn(|i| i);
        order.sort_by(|&a, &b| seeds[b].deviation().total_cmp(&seeds[a].deviation()));
        Self { seeds, order }
    }

    pub(crate) fn seeds(&self) -> &[Seed; NUM_CURVES] {
        &self.seeds
    }

    pub(crate) fn order(&self) -> &[usize; NUM_CURVES] {
        &self.order
    }
}

impl Default for Temperature {
    fn default() -> Self {
        Self::new()
    }
}

/// Temperature in `[0, 2]` at `time` seconds.
pub(crate) fn temperature_at(time: f64) -> f64 {
    ease_in_out(ping_pong(cycle_phase(time, CYCLE))) * MAX_TEMPERATURE
}

/// Color of curve `i` of `n` along the gradient stops.
pub(crate) fn curve_color(i: usize, n: usize) -> Rgba {
    let t = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
    let (mut lo, mut hi) = (STOPS[0], STOPS[STOPS.len() - 1]);
    for pair in STOPS.windows(2) {
        if t >= pair[0].0 && t <= pair[1].0 {
            (lo, hi) = (pair[0], pair[1]);
            break;
        }
    }
    let f = if hi.0 == lo.0 { 0.0 } else { (t - lo.0) / (hi.0 - lo.0) };
    let channel = |c: usize| {
        let (a, b) = (f64::from(lo.1[c]), f64::from(hi.1[c]));
        (a + (b - a) * f).round().clamp(0.0, 255.0) as u8
    };
    Rgba::rgb(channel(0), channel(1), channel(2))
}

/// Word for the current temperature band.
pub(crate) fn describe(temperature: f64) -> &'static str {
    if temperature < 0.15 {
        "deterministic"
    } else if temperature < 0.6 {
        "focused"
    } else if temperature < 1.1 {
        "balanced"
    } else if temperature < 1.6 {
        "creative"
    } else {
        "chaotic"
    }
}

impl Diagram for Temperature {
    fn slug(&self) -> &'static str {
        SLUG
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn cycle_secs(&self) -> Option<f64> {
        Some(CYCLE)
    }

    fn draw(&self, ctx: &mut Context2d, w: f64, h: f64, time: f64) {
        clear(ctx, w, h);
        draw_grid(ctx, w, h, 40.0);

        let (mx, my) = (w * 0.1, h * 0.12);
        let usable_w = w - mx * 2.0;
        let usable_h = h - my * 2.0;
        let cy = h / 2.0;

        let temperature = temperature_at(time);
        let spread = temperature * usable_h * 0.45;

        let start = Point::new(mx, cy);
        let end_x = mx + usable_w;
        let cp1_x = mx + usable_w * 0.33;
        let cp2_x = mx + usable_w * 0.66;

        let glow_alpha = clamp(0.15 + temperature * 0.05, 0.1, 0.3);
        let main_alpha = clamp(0.6 + (1.0 - temperature / 2.0) * 0.35, 0.5, 0.95);
        let dot_alpha = clamp(0.3 + temperature * 0.2, 0.3, 0.7);

        for &i in &self.order {
            let seed = self.seeds[i];
            let end = Point::new(end_x, cy + seed.endy * spread);
            let curve = Curve::Cubic(
                start,
                Point::new(cp1_x, cy + seed.cp1y * spread),
                Point::new(cp2_x, cy + seed.cp2y * spread),
                end,
            );
            let color = curve_color(i, NUM_CURVES);
            draw_curve(ctx, &curve, 80, color.with_alpha(glow_alpha), 4.0, 12.0);
            draw_curve(ctx, &curve, 80, color.with_alpha(main_alpha), 2.0, 6.0);
            draw_dot(ctx, end, 2.5, color.with_alpha(dot_alpha), 0.0);
        }

        draw_dot(ctx, start, 5.0, palette::WHITE, 15.0);
        draw_dot(ctx, start, 3.0, palette::PURE_WHITE, 0.0);

        draw_label(
            ctx,
            &format!("t = {temperature:.2}"),
            Point::new(mx + 4.0, my * 0.6),
            LabelStyle::new(palette::WHITE, 14.0, TextAlign::Left),
        );
        draw_label(
            ctx,
            "temperature",
            Point::new(mx + 4.0, my * 0.6 + 18.0),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );
        draw_label(
            ctx,
            describe(temperature),
            Point::new(w - mx - 4.0, h - my * 0.5),
            LabelStyle::new(palette::TEXT, 11.0, TextAlign::Right),
        );

        draw_line(
            ctx,
            start,
            Point::new(end_x, cy),
            palette::WHITE.with_alpha(0.06),
            1.0,
            &[2.0, 6.0],
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/temperature.rs"]
mod tests;
