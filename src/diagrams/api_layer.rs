//! One API round trip: the prompt arcs out to the model, the app waits, the completion arcs back,
//! and the call's latency and cost tick up underneath.

use crate::animation::ease::ease_in_out;
use crate::curve::eval::clamp;
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_partial_curve,
};
use std::f64::consts::PI;

pub const SLUG: &str = "api-layer";
pub const TITLE: &str = "The API Layer";

const CYCLE: f64 = 6.0;
const STEPS: usize = 60;

/// Phase boundaries as cycle fractions.
const OUT_END: f64 = 0.35;
const WAIT_END: f64 = 0.50;
const RETURN_END: f64 = 0.85;

const PROMPT_TOKENS: f64 = 500.0;
const COMPLETION_TOKENS: f64 = 200.0;
/// Dollars per thousand tokens.
const INPUT_PRICE: f64 = 0.003;
const OUTPUT_PRICE: f64 = 0.015;

const OUT_LATENCY_MS: f64 = 890.0;
const WAIT_LATENCY_MS: f64 = 350.0;

/// Progress of the outbound trip, the wait, and the return trip at cycle phase `t`.
pub(crate) fn legs(t: f64) -> (f64, f64, f64) {
    (
        clamp(t / OUT_END, 0.0, 1.0),
        clamp((t - OUT_END) / (WAIT_END - OUT_END), 0.0, 1.0),
        clamp((t - WAIT_END) / (RETURN_END - WAIT_END), 0.0, 1.0),
    )
}

/// Latency shown by the timer at cycle phase `t`; it holds the total until the cycle idles.
pub(crate) fn latency_ms(t: f64) -> u32 {
    let (_, wait, _) = legs(t);
    let ms = if t < OUT_END {
        (t / OUT_END * OUT_LATENCY_MS).floor()
    } else if t < WAIT_END {
        OUT_LATENCY_MS + (wait * WAIT_LATENCY_MS).floor()
    } else if t < RETURN_END {
        OUT_LATENCY_MS + WAIT_LATENCY_MS
    } else {
        0.0
    };
    ms as u32
}

/// Dollar cost of one call.
pub(crate) fn call_cost() -> f64 {
    (PROMPT_TOKENS * INPUT_PRICE + COMPLETION_TOKENS * OUTPUT_PRICE) / 1000.0
}

pub struct ApiLayer;

impl ApiLayer {
    /// Partial leg with a travelling head while it is in flight.
    fn draw_leg(ctx: &mut Context2d, curve: &Curve, raw: f64, color: Rgba) {
        let eased = ease_in_out(raw);
        draw_partial_curve(ctx, curve, STEPS, eased, color.with_alpha(0.7), 2.5, 10.0);
        if raw > 0.0 && raw < 1.0 {
            let head = curve.eval(eased);
            draw_dot(ctx, head, 5.0, color, 15.0);
            draw_dot(ctx, head, 2.5, palette::PURE_WHITE, 0.0);
        }
    }
}

impl Diagram for ApiLayer {
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

        let mx = w * 0.12;
        let cy = h * 0.45;
        let t = cycle_phase(time, CYCLE);

        let app = Point::new(mx, cy);
        let api = Point::new(w - mx, cy);
        let span = api.x - app.x;
        let outbound = Curve::Cubic(
            app,
            Point::new(app.x + span * 0.3, cy - h * 0.22),
            Point::new(app.x + span * 0.7, cy - h * 0.22),
            api,
        );
        let inbound = Curve::Cubic(
            api,
            Point::new(api.x - span * 0.3, cy + h * 0.22),
            Point::new(api.x - span * 0.7, cy + h * 0.22),
            app,
        );
        let (out, wait, ret) = legs(t);

        draw_curve(ctx, &outbound, STEPS, palette::TEAL.with_alpha(0.12), 1.5, 0.0);
        draw_curve(ctx, &inbound, STEPS, palette::CORAL.with_alpha(0.12), 1.5, 0.0);

        if t < RETURN_END {
            Self::draw_leg(ctx, &outbound, out, palette::TEAL);
        }
        if out > 0.3 {
            let mid = outbound.eval(0.5);
            draw_label(
                ctx,
                &format!("prompt: {PROMPT_TOKENS} tokens"),
                Point::new(mid.x, mid.y - 16.0),
                LabelStyle::new(palette::TEAL.with_alpha(clamp((out - 0.3) / 0.3, 0.0, 0.8)), 10.0, TextAlign::Center),
            );
        }

        if t > WAIT_END {
            Self::draw_leg(ctx, &inbound, ret, palette::CORAL);
            if ret > 0.3 {
                let mid = inbound.eval(0.5);
                draw_label(
                    ctx,
                    &format!("completion: {COMPLETION_TOKENS} tokens"),
                    Point::new(mid.x, mid.y + 16.0),
                    LabelStyle::new(palette::CORAL.with_alpha(clamp((ret - 0.3) / 0.3, 0.0, 0.8)), 10.0, TextAlign::Center),
                );
            }
        }

        if t > OUT_END && t < WAIT_END {
            let r = 6.0 + (wait * PI * 4.0).sin() * 3.0;
            draw_dot(ctx, api, r, palette::YELLOW.with_alpha(0.5), 12.0);
        }

        for (pt, color, label) in [(app, palette::TEAL, "Your App"), (api, palette::CORAL, "LLM API")] {
            draw_dot(ctx, pt, 7.0, color.with_alpha(0.4), 8.0);
            draw_dot(ctx, pt, 4.0, color, 0.0);
            draw_label(
                ctx,
                label,
                Point::new(pt.x, pt.y - 18.0),
                LabelStyle::new(palette::WHITE, 12.0, TextAlign::Center),
            );
        }

        let timer_alpha = if t > 0.01 && t < 0.88 { 0.8 } else { 0.3 };
        draw_label(
            ctx,
            &format!("latency: {}ms", latency_ms(t)),
            Point::new(w / 2.0, cy + 4.0),
            LabelStyle::new(palette::YELLOW.with_alpha(timer_alpha), 11.0, TextAlign::Center),
        );

        let formula_y = h * 0.82;
        draw_label(
            ctx,
            &format!("cost = (input x ${INPUT_PRICE} + output x ${OUTPUT_PRICE}) / 1000"),
            Point::new(w / 2.0, formula_y),
            LabelStyle::new(palette::WHITE.with_alpha(0.5), 10.0, TextAlign::Center),
        );
        let done = t > RETURN_END;
        let cost = if done {
            format!("= ${:.4} per call", call_cost())
        } else {
            "= $... per call".to_owned()
        };
        draw_label(
            ctx,
            &cost,
            Point::new(w / 2.0, formula_y + 18.0),
            LabelStyle::new(palette::YELLOW.with_alpha(if done { 0.7 } else { 0.3 }), 10.0, TextAlign::Center),
        );

        draw_label(
            ctx,
            "api request / response",
            Point::new(mx + 4.0, h * 0.08),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/api_layer.rs"]
mod tests;
