//! Confidently wrong: the model's output tracks the truth, then peels away from it while the
//! confidence meter never drops.

use crate::animation::ease::ease_in_out;
use crate::curve::eval::{clamp, lerp};
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::{Point, Rect};
use crate::paint::color::palette;
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_dot, draw_grid, draw_label, draw_partial_curve,
};

pub const SLUG: &str = "hallucinations";
pub const TITLE: &str = "Hallucinations Aren't Bugs";

const CYCLE: f64 = 8.0;
const DRAW_DUR: f64 = 4.0;
const FADE_DUR: f64 = 1.0;
/// Curve parameter where the output leaves the truth.
const DIVERGE_AT: f64 = 0.35;
const STEPS: usize = 80;
const GAP_STEPS: usize = 50;

/// Eased draw progress at `t` seconds into the loop.
pub(crate) fn progress_at(t: f64) -> f64 {
    ease_in_out(clamp(t / DRAW_DUR, 0.0, 1.0))
}

/// Overall opacity; the last second of each loop fades out.
pub(crate) fn global_alpha(t: f64) -> f64 {
    let fade_from = CYCLE - FADE_DUR;
    if t > fade_from {
        1.0 - clamp((t - fade_from) / FADE_DUR, 0.0, 1.0)
    } else {
        1.0
    }
}

/// Displayed confidence, wandering between 89% and 97%.
pub(crate) fn confidence(time: f64) -> f64 {
    0.93 + 0.04 * (time * 2.1).sin()
}

pub struct Hallucinations;

impl Diagram for Hallucinations {
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

        let mx = w * 0.1;
        let my = h * 0.14;
        let usable_w = w - mx * 2.0;
        let cy = h * 0.48;
        let t = cycle_phase(time, CYCLE) * CYCLE;
        let alpha = global_alpha(t);
        let progress = progress_at(t);

        let start = Point::new(mx, cy);
        let truth = Curve::Cubic(
            start,
            Point::new(mx + usable_w * 0.3, cy - 10.0),
            Point::new(mx + usable_w * 0.65, cy + 15.0),
            Point::new(mx + usable_w, cy - 5.0),
        );
        let output = Curve::Cubic(
            start,
            Point::new(mx + usable_w * 0.3, cy - 12.0),
            Point::new(mx + usable_w * 0.6, cy - h * 0.25),
            Point::new(mx + usable_w, cy - h * 0.32),
        );

        draw_partial_curve(ctx, &truth, STEPS, progress, palette::GREEN.with_alpha(0.7 * alpha), 2.5, 10.0 * alpha);
        draw_partial_curve(ctx, &output, STEPS, progress, palette::CORAL.with_alpha(0.8 * alpha), 2.5, 12.0 * alpha);

        if progress > DIVERGE_AT {
            // Band between the two curves from the divergence point to the drawn tip.
            let gap = clamp((progress - DIVERGE_AT) / (1.0 - DIVERGE_AT), 0.0, 1.0) * 0.12 * alpha;
            let at = |g: usize| lerp(DIVERGE_AT, progress, g as f64 / GAP_STEPS as f64);
            ctx.save();
            ctx.set_fill_style(palette::CORAL.with_alpha(gap));
            ctx.begin_path();
            for g in 0..=GAP_STEPS {
                ctx.line_to(output.eval(at(g)));
            }
            for g in (0..=GAP_STEPS).rev() {
                ctx.line_to(truth.eval(at(g)));
            }
            ctx.close_path();
            ctx.fill();
            ctx.restore();

            let marker = clamp((progress - DIVERGE_AT) / 0.15, 0.0, 1.0) * alpha;
            let div = truth.eval(DIVERGE_AT);
            draw_dot(ctx, div, 4.0, palette::YELLOW.with_alpha(marker * 0.8), 10.0 * marker);
            draw_label(
                ctx,
                "hallucination begins",
                Point::new(div.x + 5.0, div.y + 20.0),
                LabelStyle::new(palette::YELLOW.with_alpha(marker * 0.7), 10.0, TextAlign::Left),
            );
        }

        draw_dot(ctx, start, 5.0, palette::WHITE.with_alpha(alpha), 12.0 * alpha);

        if progress > 0.85 {
            let end_alpha = clamp((progress - 0.85) / 0.15, 0.0, 1.0) * alpha * 0.8;
            for (curve, name, color) in [(&truth, "truth", palette::GREEN), (&output, "model output", palette::CORAL)] {
                let tip = curve.eval(progress);
                draw_label(
                    ctx,
                    name,
                    Point::new(tip.x + 8.0, tip.y),
                    LabelStyle::new(color.with_alpha(end_alpha), 11.0, TextAlign::Left),
                );
            }
        }

        draw_label(
            ctx,
            "\"prompt\"",
            Point::new(start.x, start.y + 20.0),
            LabelStyle::new(palette::WHITE.with_alpha(0.5 * alpha), 10.0, TextAlign::Center),
        );

        // Confidence meter: green while on track, coral once the output has diverged.
        let bar_y = h * 0.82;
        let bar_h = 14.0;
        let filled = usable_w * progress;
        ctx.save();
        ctx.set_stroke_style(palette::WHITE.with_alpha(0.15 * alpha));
        ctx.set_line_width(1.0);
        ctx.stroke_rect(Rect::new(mx, bar_y, mx + usable_w, bar_y + bar_h));
        if filled > 0.0 {
            let split = usable_w * DIVERGE_AT;
            ctx.set_fill_style(palette::GREEN.with_alpha(0.55 * alpha));
            ctx.fill_rect(Rect::new(mx, bar_y, mx + filled.min(split), bar_y + bar_h));
            if filled > split {
                ctx.set_fill_style(palette::CORAL.with_alpha(0.65 * alpha));
                ctx.fill_rect(Rect::new(mx + split, bar_y, mx + filled, bar_y + bar_h));
            }
        }
        ctx.restore();

        draw_label(
            ctx,
            &format!("confidence: {:.0}%", confidence(time) * 100.0),
            Point::new(mx + usable_w + 8.0, bar_y + bar_h / 2.0),
            LabelStyle::new(palette::CORAL.with_alpha(0.8 * alpha), 10.0, TextAlign::Left),
        );

        if progress > 0.5 {
            let f = clamp((progress - 0.5) / 0.2, 0.0, 1.0) * alpha;
            draw_label(
                ctx,
                "P(correct) \u{2260} P(confident)",
                Point::new(w / 2.0, h * 0.95),
                LabelStyle::new(palette::YELLOW.with_alpha(f * 0.6), 12.0, TextAlign::Center),
            );
        }

        draw_label(
            ctx,
            "hallucination",
            Point::new(mx + 4.0, my * 0.5),
            LabelStyle::new(palette::WHITE.with_alpha(0.35 * alpha), 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/hallucinations.rs"]
mod tests;
