//! Training versus inference side by side: scattered data slowly converging into a model on the
//! left, a single prompt firing through in quick pulses on the right.

use crate::animation::ease::{ease_in_out, ease_out};
use crate::curve::eval::clamp;
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::palette;
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_line, draw_partial_curve,
};
use std::f64::consts::TAU;

pub const SLUG: &str = "training-inference";
pub const TITLE: &str = "Training vs. Inference";

const CYCLE: f64 = 8.0;
const NUM_TRAIN_CURVES: usize = 8;
const PULSES: f64 = 4.0;
const STEPS: usize = 50;

/// A training sample's position around the data cloud, in radius units, and its start delay.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Sample {
    ax: f64,
    ay: f64,
    delay: f64,
}

pub struct TrainingInference {
    samples: [Sample; NUM_TRAIN_CURVES],
}

impl TrainingInference {
    pub fn new() -> Self {
        let samples = std::array::from_fn(|i| {
            let fi = i as f64;
            let angle = fi / NUM_TRAIN_CURVES as f64 * TAU + 0.3;
            Sample {
                ax: angle.cos() * 0.7 + (fi * 2.7).sin() * 0.2,
                ay: angle.sin() * 0.7 + (fi * 3.1).cos() * 0.2,
                delay: fi * 0.06,
            }
        });
        Self { samples }
    }
}

impl Default for TrainingInference {
    fn default() -> Self {
        Self::new()
    }
}

/// Eased training progress at cycle phase `t`; training occupies the first 70% of the loop.
pub(crate) fn training_progress(t: f64) -> f64 {
    ease_in_out(clamp(t / 0.7, 0.0, 1.0))
}

/// Reveal of the current inference pulse at cycle phase `t`, or `None` outside the burst window.
pub(crate) fn pulse_at(t: f64) -> Option<f64> {
    let region = clamp((t - 0.25) / 0.7, 0.0, 1.0);
    if region <= 0.0 || region >= 1.0 {
        return None;
    }
    let phase = (region * PULSES).fract();
    Some(ease_out(clamp(phase / 0.6, 0.0, 1.0)))
}

impl Diagram for TrainingInference {
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

        let mid_x = w * 0.5;
        let cy = h * 0.5;
        let t = cycle_phase(time, CYCLE);

        draw_line(
            ctx,
            Point::new(mid_x, h * 0.1),
            Point::new(mid_x, h * 0.9),
            palette::WHITE.with_alpha(0.08),
            1.0,
            &[4.0, 8.0],
        );

        // Training.
        let train_center = Point::new(w * 0.28, cy);
        let model = Point::new(w * 0.40, cy);
        let radius = (w * 0.22).min(h * 0.35);
        let trained = training_progress(t);

        for (i, sample) in self.samples.iter().enumerate() {
            let delayed = clamp((trained - sample.delay) / (1.0 - sample.delay), 0.0, 1.0);
            if delayed <= 0.0 {
                continue;
            }
            let fi = i as f64;
            let from = Point::new(
                train_center.x + sample.ax * radius,
                train_center.y + sample.ay * radius,
            );
            let curve = Curve::Cubic(
                from,
                Point::new(
                    from.x + (model.x - from.x) * 0.3,
                    from.y + (model.y - from.y) * 0.1 + (fi * 1.5).sin() * 15.0,
                ),
                Point::new(
                    from.x + (model.x - from.x) * 0.7,
                    model.y + (fi * 1.8).cos() * 10.0,
                ),
                model,
            );
            let color = palette::PURPLE.with_alpha(0.15 + delayed * 0.45);
            draw_partial_curve(ctx, &curve, STEPS, delayed, color, 1.5, delayed * 8.0);
            draw_dot(ctx, from, 2.5, palette::PURPLE.with_alpha(0.3 + delayed * 0.3), 0.0);
        }

        let model_r = 6.0 + trained * 6.0;
        draw_dot(
            ctx,
            model,
            model_r,
            palette::PURPLE.with_alpha(0.2 + trained * 0.4),
            trained * 20.0,
        );
        draw_dot(ctx, model, model_r * 0.5, palette::PURE_WHITE.with_alpha(trained * 0.5), 0.0);

        draw_label(
            ctx,
            "TRAINING",
            Point::new(train_center.x, h * 0.1),
            LabelStyle::new(palette::PURPLE.with_alpha(0.8), 12.0, TextAlign::Center),
        );
        let stats = clamp(trained * 1.2, 0.0, 0.6);
        let left = |y: f64| Point::new(w * 0.13, h * y);
        draw_label(ctx, "2T tokens", left(0.22), LabelStyle::new(palette::PURPLE.with_alpha(stats), 10.0, TextAlign::Left));
        draw_label(ctx, "$100M+", left(0.30), LabelStyle::new(palette::CORAL.with_alpha(stats), 10.0, TextAlign::Left));
        draw_label(ctx, "months", left(0.38), LabelStyle::new(palette::WHITE.with_alpha(stats * 0.7), 10.0, TextAlign::Left));

        // Inference.
        let start = Point::new(w * 0.58, cy);
        let end = Point::new(w * 0.88, cy);
        let span = end.x - start.x;
        let inference = Curve::Cubic(
            start,
            Point::new(start.x + span * 0.35, cy - 2.0),
            Point::new(start.x + span * 0.65, cy + 2.0),
            end,
        );
        draw_curve(ctx, &inference, STEPS, palette::TEAL.with_alpha(0.15), 1.5, 0.0);

        if let Some(pulse) = pulse_at(t) {
            draw_partial_curve(ctx, &inference, STEPS, pulse, palette::TEAL.with_alpha(0.8), 2.5, 12.0);
            if pulse > 0.0 && pulse < 1.0 {
                let pt = inference.eval(pulse);
                draw_dot(ctx, pt, 4.0, palette::TEAL, 12.0);
                draw_dot(ctx, pt, 2.0, palette::PURE_WHITE, 0.0);
            }
        }

        for (pt, label) in [(start, "prompt"), (end, "response")] {
            draw_dot(ctx, pt, 5.0, palette::TEAL.with_alpha(0.5), 6.0);
            draw_label(
                ctx,
                label,
                Point::new(pt.x, pt.y - 16.0),
                LabelStyle::new(palette::TEAL.with_alpha(0.6), 9.0, TextAlign::Center),
            );
        }

        draw_label(
            ctx,
            "INFERENCE",
            Point::new(w * 0.73, h * 0.1),
            LabelStyle::new(palette::TEAL.with_alpha(0.8), 12.0, TextAlign::Center),
        );
        let right = |y: f64| Point::new(w * 0.60, h * y);
        draw_label(ctx, "1 prompt", right(0.22), LabelStyle::new(palette::TEAL.with_alpha(0.6), 10.0, TextAlign::Left));
        draw_label(ctx, "$0.003", right(0.30), LabelStyle::new(palette::GREEN.with_alpha(0.6), 10.0, TextAlign::Left));
        draw_label(ctx, "~800ms", right(0.38), LabelStyle::new(palette::WHITE.with_alpha(0.5), 10.0, TextAlign::Left));

        draw_label(
            ctx,
            "train once, infer millions of times",
            Point::new(w / 2.0, h * 0.9),
            LabelStyle::new(palette::WHITE.with_alpha(0.4), 10.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            "training vs inference",
            Point::new(w * 0.12 + 4.0, h * 0.06),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/training_inference.rs"]
mod tests;
