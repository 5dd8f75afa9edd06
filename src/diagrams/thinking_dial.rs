//! Reasoning effort as a dial: the curve from query to answer dips deeper as the thinking budget
//! rises, shifting from green (fast, cheap) to purple (slow, expensive).

use crate::animation::ease::{ease_in_out, ping_pong};
use crate::curve::eval::{clamp, lerp};
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::{Point, Rect};
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_line, draw_ring,
};

pub const SLUG: &str = "thinking-dial";
pub const TITLE: &str = "Thinking Became a Dial";

const CYCLE: f64 = 5.0;
const STEPS: usize = 80;

/// Eased reasoning depth in `[0, 1]`, swinging shallow to deep and back once per loop.
pub(crate) fn depth_at(time: f64) -> f64 {
    ease_in_out(ping_pong(cycle_phase(time, CYCLE)))
}

pub(crate) fn depth_color(depth: f64) -> Rgba {
    palette::GREEN.mix(palette::PURPLE, depth)
}

/// Opacities of the "fast / cheap" and "slow / expensive" captions; they never overlap.
pub(crate) fn caption_alphas(depth: f64) -> (f64, f64) {
    (
        lerp(0.7, 0.0, clamp(depth * 2.0, 0.0, 1.0)),
        lerp(0.0, 0.7, clamp((depth - 0.5) * 2.0, 0.0, 1.0)),
    )
}

pub struct ThinkingDial;

impl Diagram for ThinkingDial {
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

        let pad = w.min(h) * 0.12;
        let left = pad + 20.0;
        let right = w - pad - 20.0;
        let base_y = h * 0.32;

        let depth = depth_at(time);
        let dip = lerp(h * 0.10, h * 0.52, depth);
        let third = (right - left) / 3.0;
        let a = Point::new(left, base_y);
        let b = Point::new(right, base_y);
        let cp1 = Point::new(left + third, base_y + dip);
        let cp2 = Point::new(right - third, base_y + dip);
        let curve = Curve::Cubic(a, cp1, cp2, b);

        let color = depth_color(depth);
        let fill_alpha = lerp(0.06, 0.18, depth);

        // Area between the baseline and the curve, at the midpoint of a top-to-bottom ramp.
        ctx.save();
        ctx.begin_path();
        for pt in curve.sample(STEPS) {
            ctx.line_to(pt);
        }
        ctx.line_to(a);
        ctx.close_path();
        ctx.set_fill_style(color.with_alpha(fill_alpha * 0.65));
        ctx.fill();
        ctx.restore();

        draw_line(ctx, a, b, palette::DIMMER, 1.0, &[6.0, 4.0]);
        let dash = color.with_alpha(0.25);
        for (p, q) in [(a, cp1), (cp1, cp2), (cp2, b)] {
            draw_line(ctx, p, q, dash, 1.0, &[4.0, 4.0]);
        }

        draw_curve(ctx, &curve, STEPS, color, 2.5, 12.0 * lerp(0.3, 0.7, depth));
        for cp in [cp1, cp2] {
            draw_ring(ctx, cp, 5.0, color.with_alpha(0.7), 1.5);
        }
        for (pt, label) in [(a, "Query"), (b, "Answer")] {
            draw_dot(ctx, pt, 5.0, palette::WHITE, 8.0);
            draw_label(
                ctx,
                label,
                Point::new(pt.x, pt.y - 18.0),
                LabelStyle::new(palette::TEXT, 12.0, TextAlign::Center),
            );
        }

        let center_x = (left + right) / 2.0;
        draw_label(
            ctx,
            "thinking tokens",
            Point::new(center_x, base_y + dip * 0.5),
            LabelStyle::new(color.with_alpha(lerp(0.15, 0.6, depth)), 11.0, TextAlign::Center),
        );

        let top = Point::new(center_x, (base_y - 44.0).min(h * 0.08 + 10.0));
        let (shallow, deep) = caption_alphas(depth);
        if shallow > 0.01 {
            draw_label(
                ctx,
                "fast / cheap",
                top,
                LabelStyle::new(palette::GREEN.with_alpha(shallow), 13.0, TextAlign::Center),
            );
        }
        if deep > 0.01 {
            draw_label(
                ctx,
                "slow / expensive",
                top,
                LabelStyle::new(palette::PURPLE.with_alpha(deep), 13.0, TextAlign::Center),
            );
        }

        // Budget bar.
        let bar_x = w - pad * 0.5 + 4.0;
        let bar_h = h * 0.52;
        let bar_w = 6.0;
        ctx.save();
        ctx.set_fill_style(palette::DIMMER);
        ctx.begin_path();
        ctx.round_rect(Rect::new(bar_x - bar_w / 2.0, base_y, bar_x + bar_w / 2.0, base_y + bar_h), 3.0);
        ctx.fill();
        let filled = bar_h * depth;
        if filled > 1.0 {
            ctx.set_fill_style(color.with_alpha(lerp(0.6, 0.8, depth)));
            ctx.begin_path();
            ctx.round_rect(
                Rect::new(bar_x - bar_w / 2.0, base_y, bar_x + bar_w / 2.0, base_y + filled),
                3.0,
            );
            ctx.fill();
        }
        ctx.restore();

        draw_label(
            ctx,
            "budget",
            Point::new(bar_x, base_y - 12.0),
            LabelStyle::new(palette::TEXT_DIM, 9.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            &format!("{}%", (depth * 100.0).round()),
            Point::new(bar_x + 14.0, base_y + filled),
            LabelStyle::new(color.with_alpha(0.6), 9.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/thinking_dial.rs"]
mod tests;
