//! Streaming versus batch responses: the same tokens either arrive all at once after a wait or
//! flow in one by one along a curve.

use crate::animation::ease::ease_out;
use crate::curve::eval::{clamp, cubic_pt};
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::{Point, Rect};
use crate::paint::color::palette;
use crate::paint::context::{Context2d, LineCap, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_line,
};

pub const SLUG: &str = "streaming";
pub const TITLE: &str = "Streaming Changed Everything";

const CYCLE: f64 = 8.0;
const TOKENS: [&str; 7] = ["The", "model", "generates", "tokens", "one", "by", "one"];

/// Cycle fraction at which the batch response lands.
const BATCH_AT: f64 = 0.6;
const FIRST_TOKEN_AT: f64 = 0.08;
const TOKEN_DELAY: f64 = 0.08;
const TOKEN_FADE: f64 = 0.06;
const STREAM_STEPS: usize = 60;

pub struct Streaming;

/// Appearance progress of streamed token `i` at cycle phase `t`, in `[0, 1]`.
pub(crate) fn token_progress(i: usize, t: f64) -> f64 {
    let start = FIRST_TOKEN_AT + i as f64 * TOKEN_DELAY;
    clamp((t - start) / TOKEN_FADE, 0.0, 1.0)
}

/// Fraction of the stream path revealed at cycle phase `t`.
pub(crate) fn stream_progress(t: f64) -> f64 {
    clamp(
        (t - FIRST_TOKEN_AT) / (TOKENS.len() as f64 * TOKEN_DELAY),
        0.0,
        1.0,
    )
}

/// Opacity of the batch block at cycle phase `t`; zero while waiting.
pub(crate) fn batch_appear(t: f64) -> f64 {
    if t > BATCH_AT {
        ease_out(clamp((t - BATCH_AT) / 0.1, 0.0, 1.0))
    } else {
        0.0
    }
}

impl Diagram for Streaming {
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

        let mx = w * 0.08;
        let t = cycle_phase(time, CYCLE);
        let top_y = h * 0.28;
        let bot_y = h * 0.58;
        let bar_w = w - mx * 2.0;
        let axis = palette::WHITE.with_alpha(0.1);

        draw_label(
            ctx,
            "streaming vs batch",
            Point::new(mx + 4.0, h * 0.07),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );

        for y in [top_y - 30.0, bot_y - 30.0] {
            draw_line(ctx, Point::new(mx, y), Point::new(mx + bar_w, y), axis, 1.0, &[4.0, 4.0]);
        }
        draw_label(
            ctx,
            "no streaming",
            Point::new(mx, top_y - 46.0),
            LabelStyle::new(palette::CORAL.with_alpha(0.8), 11.0, TextAlign::Left),
        );
        draw_label(
            ctx,
            "streaming",
            Point::new(mx, bot_y - 46.0),
            LabelStyle::new(palette::TEAL.with_alpha(0.8), 11.0, TextAlign::Left),
        );

        // Batch: a pulsing wait, then everything at once.
        if t < BATCH_AT {
            let wait = 0.3 + 0.15 * (time * 4.0).sin();
            for d in 0..3 {
                let fd = f64::from(d);
                let alpha = wait * (0.5 + 0.5 * (time * 6.0 + fd * 1.2).sin());
                let pt = Point::new(mx + 40.0 + fd * 12.0, top_y);
                draw_dot(ctx, pt, 3.0, palette::CORAL.with_alpha(alpha), 0.0);
            }
            draw_label(
                ctx,
                "waiting...",
                Point::new(mx + 80.0, top_y),
                LabelStyle::new(palette::CORAL.with_alpha(wait), 10.0, TextAlign::Left),
            );
        }

        let appear = batch_appear(t);
        if appear > 0.0 {
            let style = LabelStyle::new(palette::CORAL.with_alpha(appear * 0.9), 12.0, TextAlign::Left);
            let mut x = mx + 10.0;
            for token in TOKENS {
                draw_label(ctx, token, Point::new(x, top_y), style);
                // Advance at the label's own size so tokens never overlap.
                ctx.save();
                ctx.set_font(style.font);
                x += ctx.measure_text(token) + 10.0;
                ctx.restore();
            }
            ctx.save();
            ctx.set_stroke_style(palette::CORAL.with_alpha(appear * 0.3));
            ctx.set_line_width(1.0);
            ctx.stroke_rect(Rect::new(mx + 4.0, top_y - 12.0, x + 4.0, top_y + 12.0));
            ctx.restore();
        }

        // Stream: tokens ride a gentle cubic.
        let p0 = Point::new(mx, bot_y);
        let p1 = Point::new(mx + bar_w * 0.3, bot_y - 15.0);
        let p2 = Point::new(mx + bar_w * 0.6, bot_y + 10.0);
        let p3 = Point::new(mx + bar_w * 0.85, bot_y);
        draw_curve(
            ctx,
            &Curve::Cubic(p0, p1, p2, p3),
            STREAM_STEPS,
            palette::TEAL.with_alpha(0.08),
            1.5,
            0.0,
        );

        let leading = ((t - FIRST_TOKEN_AT) / TOKEN_DELAY).floor();
        let n = TOKENS.len() as f64;
        for (i, token) in TOKENS.iter().enumerate() {
            let progress = token_progress(i, t);
            if progress <= 0.0 {
                continue;
            }
            let eased = ease_out(progress);
            let pt = cubic_pt(p0, p1, p2, p3, clamp((i as f64 + eased) / n, 0.0, 1.0));
            draw_label(
                ctx,
                token,
                pt,
                LabelStyle::new(palette::TEAL.with_alpha(eased * 0.9), 12.0, TextAlign::Center),
            );
            if i as f64 == leading && progress < 1.0 {
                draw_dot(ctx, pt, 4.0, palette::TEAL, 12.0);
            }
        }

        let revealed = stream_progress(t);
        if revealed > 0.0 {
            ctx.save();
            ctx.set_stroke_style(palette::TEAL.with_alpha(0.5));
            ctx.set_line_width(2.0);
            ctx.set_shadow(palette::TEAL, 8.0);
            ctx.set_line_cap(LineCap::Round);
            ctx.begin_path();
            for s in 0..=STREAM_STEPS {
                let st = s as f64 / STREAM_STEPS as f64;
                if st > revealed {
                    break;
                }
                let sp = cubic_pt(p0, p1, p2, p3, st);
                if s == 0 {
                    ctx.move_to(sp);
                } else {
                    ctx.line_to(sp);
                }
            }
            ctx.stroke();
            ctx.restore();
        }

        let marker_y = h * 0.78;
        let ttft = Point::new(mx + bar_w * FIRST_TOKEN_AT, marker_y);
        let total = Point::new(mx + bar_w * BATCH_AT, marker_y + 22.0);

        draw_line(ctx, Point::new(mx, ttft.y), ttft, palette::TEAL.with_alpha(0.6), 2.0, &[]);
        draw_dot(ctx, ttft, 4.0, palette::TEAL, 10.0);
        draw_label(
            ctx,
            "TTFT: 180ms",
            Point::new(ttft.x + 8.0, ttft.y),
            LabelStyle::new(palette::TEAL.with_alpha(0.9), 11.0, TextAlign::Left),
        );

        draw_line(ctx, Point::new(mx, total.y), total, palette::CORAL.with_alpha(0.4), 2.0, &[]);
        draw_dot(ctx, total, 4.0, palette::CORAL, 10.0);
        draw_label(
            ctx,
            "Total: 2400ms",
            Point::new(total.x + 8.0, total.y),
            LabelStyle::new(palette::CORAL.with_alpha(0.7), 11.0, TextAlign::Left),
        );

        let formula = if t > 0.5 {
            ease_out(clamp((t - 0.5) / 0.2, 0.0, 1.0))
        } else {
            0.0
        };
        draw_label(
            ctx,
            "perceived_speed = 1/TTFT  not  1/total_time",
            Point::new(w / 2.0, h * 0.93),
            LabelStyle::new(palette::YELLOW.with_alpha(formula * 0.7), 10.0, TextAlign::Center),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/streaming.rs"]
mod tests;
