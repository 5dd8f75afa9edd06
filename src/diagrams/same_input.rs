//! Non-determinism: one prompt fans out into six sampled responses, each drawn in turn and
//! tagged with its probability, before the whole picture fades and repeats.

use crate::animation::ease::ease_out;
use crate::curve::eval::clamp;
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_dot, draw_grid, draw_label, draw_partial_curve,
};

pub const SLUG: &str = "same-input-diff-output";
pub const TITLE: &str = "Same Input, Different Output";

const CYCLE: f64 = 10.0;
const STAGGER: f64 = 1.0;
const DRAW_EACH: f64 = 1.2;
const HOLD: f64 = 2.5;
const STEPS: usize = 60;

struct Response {
    cp1y: f64,
    cp2y: f64,
    end_y: f64,
    prob: f64,
    color: Rgba,
}

const RESPONSES: [Response; 6] = [
    Response { cp1y: -0.18, cp2y: -0.10, end_y: -0.22, prob: 0.28, color: palette::TEAL },
    Response { cp1y: 0.05, cp2y: 0.15, end_y: 0.08, prob: 0.22, color: palette::BLUE },
    Response { cp1y: -0.08, cp2y: 0.20, end_y: 0.18, prob: 0.18, color: palette::GREEN },
    Response { cp1y: 0.15, cp2y: -0.12, end_y: -0.10, prob: 0.14, color: palette::PURPLE },
    Response { cp1y: -0.25, cp2y: -0.22, end_y: -0.35, prob: 0.10, color: palette::YELLOW },
    Response { cp1y: 0.20, cp2y: 0.30, end_y: 0.32, prob: 0.08, color: palette::CORAL },
];

/// Seconds until the last response has finished drawing.
const TOTAL_DRAW: f64 = STAGGER * (RESPONSES.len() - 1) as f64 + DRAW_EACH;
const FADE_FROM: f64 = TOTAL_DRAW + HOLD;

/// Eased draw progress of response `i` at `t` seconds into the loop.
pub(crate) fn response_progress(i: usize, t: f64) -> f64 {
    let elapsed = t - STAGGER * i as f64;
    if elapsed < 0.0 {
        return 0.0;
    }
    ease_out(clamp(elapsed / DRAW_EACH, 0.0, 1.0))
}

/// Overall opacity: full until the hold ends, then fading to zero by the end of the loop.
pub(crate) fn global_alpha(t: f64) -> f64 {
    if t > FADE_FROM {
        1.0 - clamp((t - FADE_FROM) / (CYCLE - FADE_FROM), 0.0, 1.0)
    } else {
        1.0
    }
}

pub struct SameInput;

impl Diagram for SameInput {
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

        let mx = w * 0.10;
        let my = h * 0.12;
        // Room on the right for the response tags.
        let usable_w = w - mx * 2.6;
        let cy = h * 0.5;
        let t = cycle_phase(time, CYCLE) * CYCLE;
        let alpha = global_alpha(t);
        let start = Point::new(mx, cy);

        for (i, r) in RESPONSES.iter().enumerate() {
            if t < STAGGER * i as f64 {
                continue;
            }
            let progress = response_progress(i, t);
            let end = Point::new(mx + usable_w, cy + r.end_y * h * 0.7);
            let curve = Curve::Cubic(
                start,
                Point::new(mx + usable_w * 0.3, cy + r.cp1y * h * 0.7),
                Point::new(mx + usable_w * 0.65, cy + r.cp2y * h * 0.7),
                end,
            );
            draw_partial_curve(ctx, &curve, STEPS, progress, r.color.with_alpha(0.15 * alpha), 5.0, 10.0 * alpha);
            draw_partial_curve(ctx, &curve, STEPS, progress, r.color.with_alpha(0.75 * alpha), 2.0, 6.0 * alpha);

            if progress > 0.9 {
                let ep = clamp((progress - 0.9) / 0.1, 0.0, 1.0) * alpha;
                draw_dot(ctx, end, 3.5, r.color.with_alpha(ep * 0.8), 8.0 * ep);
                draw_label(
                    ctx,
                    &format!("response {}", i + 1),
                    Point::new(end.x + 8.0, end.y - 10.0),
                    LabelStyle::new(r.color.with_alpha(ep * 0.6), 9.0, TextAlign::Left),
                );
                draw_label(
                    ctx,
                    &format!("{:.0}%", r.prob * 100.0),
                    Point::new(end.x + 8.0, end.y + 6.0),
                    LabelStyle::new(r.color.with_alpha(ep * 0.45), 9.0, TextAlign::Left),
                );
            }
        }

        draw_dot(ctx, start, 6.0, palette::WHITE.with_alpha(alpha), 15.0 * alpha);
        draw_dot(ctx, start, 3.0, palette::PURE_WHITE.with_alpha(0.9 * alpha), 0.0);
        draw_label(
            ctx,
            "same prompt",
            Point::new(start.x, start.y + 24.0),
            LabelStyle::new(palette::WHITE.with_alpha(0.5 * alpha), 10.0, TextAlign::Center),
        );

        if t > TOTAL_DRAW * 0.8 {
            let f = clamp(t - TOTAL_DRAW * 0.8, 0.0, 1.0) * alpha;
            draw_label(
                ctx,
                "P(output | input) \u{2260} 1.0",
                Point::new(w / 2.0, h * 0.92),
                LabelStyle::new(palette::YELLOW.with_alpha(0.6 * f), 12.0, TextAlign::Center),
            );
            draw_label(
                ctx,
                "non-deterministic sampling",
                Point::new(w / 2.0, h * 0.92 + 16.0),
                LabelStyle::new(palette::WHITE.with_alpha(0.3 * f), 10.0, TextAlign::Center),
            );
        }

        draw_label(
            ctx,
            "same input, different output",
            Point::new(mx + 4.0, my * 0.5),
            LabelStyle::new(palette::WHITE.with_alpha(0.35 * alpha), 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/same_input.rs"]
mod tests;
