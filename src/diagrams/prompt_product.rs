//! A system prompt as guardrails: raw output wanders, then two purple boundary curves fade in
//! and pull it into a smooth channel.

use crate::animation::ease::{ease_in_out, ease_out};
use crate::curve::eval::{clamp, lerp};
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::palette;
use crate::paint::context::{Context2d, LineCap, TextAlign};
use crate::paint::primitives::{LabelStyle, clear, draw_curve, draw_grid, draw_label};

pub const SLUG: &str = "prompt-product";
pub const TITLE: &str = "The Prompt Is the Product";

const WILD_DUR: f64 = 3.5;
const TRANS_DUR: f64 = 2.0;
const CONSTRAINED_DUR: f64 = 3.5;
const FADE_DUR: f64 = 1.0;
const CYCLE: f64 = WILD_DUR + TRANS_DUR + CONSTRAINED_DUR + FADE_DUR;
const STEPS: usize = 80;
const FILL_STEPS: usize = 60;

const PROMPT: [&str; 4] = ["\"You are a", "helpful assistant", "that responds", "concisely...\""];

/// Where the loop is, with the normalized progress through that part.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Phase {
    Wild(f64),
    Transition(f64),
    Constrained(f64),
    Fade(f64),
}

impl Phase {
    pub(crate) fn at(t: f64) -> Self {
        if t < WILD_DUR {
            Self::Wild(t / WILD_DUR)
        } else if t < WILD_DUR + TRANS_DUR {
            Self::Transition((t - WILD_DUR) / TRANS_DUR)
        } else if t < WILD_DUR + TRANS_DUR + CONSTRAINED_DUR {
            Self::Constrained((t - WILD_DUR - TRANS_DUR) / CONSTRAINED_DUR)
        } else {
            Self::Fade(clamp((t - WILD_DUR - TRANS_DUR - CONSTRAINED_DUR) / FADE_DUR, 0.0, 1.0))
        }
    }

    pub(crate) fn global_alpha(self) -> f64 {
        match self {
            Self::Fade(p) => 1.0 - ease_in_out(p),
            _ => 1.0,
        }
    }

    /// How much of the output curve is drawn.
    pub(crate) fn draw_progress(self) -> f64 {
        match self {
            Self::Wild(p) => ease_out(p),
            _ => 1.0,
        }
    }

    /// Guardrail strength; also how far the output is pulled inside them.
    pub(crate) fn constrain(self) -> f64 {
        match self {
            Self::Wild(_) => 0.0,
            Self::Transition(p) => ease_in_out(p),
            Self::Constrained(_) | Self::Fade(_) => 1.0,
        }
    }
}

/// Unprompted output height: a sum of incommensurate sines.
pub(crate) fn wild_y(t: f64, h: f64, cy: f64) -> f64 {
    cy + h
        * 0.3
        * ((t * 4.2).sin() * 0.5 + (t * 7.1 + 1.0).sin() * 0.3 + (t * 11.3 + 2.5).sin() * 0.2)
}

/// Output height given the raw value, the guardrails at this x, and the constraint strength.
pub(crate) fn constrained_y(wild: f64, upper: f64, lower: f64, constrain: f64) -> f64 {
    let mid = (upper + lower) / 2.0;
    let clamped = lerp(wild, clamp(wild, upper, lower), constrain);
    lerp(clamped, lerp(mid, clamped, 0.7), constrain * 0.3)
}

pub struct PromptProduct;

impl PromptProduct {
    fn draw_guardrails(ctx: &mut Context2d, upper: &Curve, lower: &Curve, alpha: f64) {
        ctx.save();
        ctx.set_fill_style(palette::PURPLE.with_alpha(alpha * 0.06));
        ctx.begin_path();
        for pt in upper.sample(FILL_STEPS) {
            ctx.line_to(pt);
        }
        for pt in lower.sample(FILL_STEPS).into_iter().rev() {
            ctx.line_to(pt);
        }
        ctx.close_path();
        ctx.fill();
        ctx.restore();

        let rail = palette::PURPLE.with_alpha(0.4 * alpha);
        draw_curve(ctx, upper, FILL_STEPS, rail, 1.5, 6.0);
        draw_curve(ctx, lower, FILL_STEPS, rail, 1.5, 6.0);

        for (f, fragment) in PROMPT.iter().enumerate() {
            let pt = upper.eval((f as f64 + 0.5) / PROMPT.len() as f64);
            draw_label(
                ctx,
                fragment,
                Point::new(pt.x, pt.y - 12.0),
                LabelStyle::new(palette::PURPLE.with_alpha(0.3 * alpha), 9.0, TextAlign::Center),
            );
        }
    }
}

impl Diagram for PromptProduct {
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
        let my = h * 0.14;
        let usable_w = w - mx * 2.0;
        let cy = h * 0.5;

        let phase = Phase::at(cycle_phase(time, CYCLE) * CYCLE);
        let alpha = phase.global_alpha();
        let progress = phase.draw_progress();
        let constrain = phase.constrain();

        let upper = Curve::Cubic(
            Point::new(mx, cy - h * 0.12),
            Point::new(mx + usable_w * 0.33, cy - h * 0.15),
            Point::new(mx + usable_w * 0.66, cy - h * 0.10),
            Point::new(mx + usable_w, cy - h * 0.13),
        );
        let lower = Curve::Cubic(
            Point::new(mx, cy + h * 0.12),
            Point::new(mx + usable_w * 0.33, cy + h * 0.10),
            Point::new(mx + usable_w * 0.66, cy + h * 0.15),
            Point::new(mx + usable_w, cy + h * 0.13),
        );

        if constrain > 0.01 {
            Self::draw_guardrails(ctx, &upper, &lower, constrain * alpha);
        }

        let (glow, color) = if constrain < 0.5 {
            (palette::CORAL, palette::CORAL.with_alpha(0.8 * alpha))
        } else {
            (palette::TEAL, palette::TEAL.with_alpha((0.5 + constrain * 0.4) * alpha))
        };
        ctx.save();
        ctx.set_shadow(glow, 10.0 * alpha);
        ctx.set_stroke_style(color);
        ctx.set_line_width(2.5);
        ctx.set_line_cap(LineCap::Round);
        ctx.begin_path();
        let last = (STEPS as f64 * progress).ceil() as usize;
        for i in 0..=last {
            let ct = (i as f64 / STEPS as f64).min(progress);
            let y = constrained_y(wild_y(ct, h, cy), upper.eval(ct).y, lower.eval(ct).y, constrain);
            ctx.line_to(Point::new(mx + usable_w * ct, y));
        }
        ctx.stroke();
        ctx.restore();

        let caption = Point::new(w / 2.0, h * 0.90);
        match phase {
            Phase::Wild(p) => draw_label(
                ctx,
                "raw output (no system prompt)",
                caption,
                LabelStyle::new(palette::CORAL.with_alpha(0.6 * clamp(p / 0.3, 0.0, 1.0) * alpha), 11.0, TextAlign::Center),
            ),
            Phase::Transition(p) => draw_label(
                ctx,
                "system prompt constraining output...",
                caption,
                LabelStyle::new(palette::PURPLE.with_alpha(0.6 * ease_in_out(p) * alpha), 11.0, TextAlign::Center),
            ),
            Phase::Constrained(p) => {
                draw_label(
                    ctx,
                    "output = f(prompt, input)",
                    caption,
                    LabelStyle::new(palette::TEAL.with_alpha(0.6 * alpha), 12.0, TextAlign::Center),
                );
                if p > 0.3 {
                    let sub = clamp((p - 0.3) / 0.3, 0.0, 1.0);
                    draw_label(
                        ctx,
                        "prompt is the dominant variable",
                        Point::new(caption.x, caption.y + 18.0),
                        LabelStyle::new(palette::WHITE.with_alpha(0.35 * sub * alpha), 10.0, TextAlign::Center),
                    );
                }
            }
            Phase::Fade(_) => {}
        }

        draw_label(
            ctx,
            "prompt as product surface",
            Point::new(mx + 4.0, my * 0.5),
            LabelStyle::new(palette::WHITE.with_alpha(0.35 * alpha), 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/prompt_product.rs"]
mod tests;
