//! Tokens as the unit of cost: word pieces stream along a curve while a running bill ticks up,
//! with a periodic reminder of what a thousand calls cost.

use crate::animation::ease::ease_out;
use crate::curve::eval::clamp;
use crate::curve::shape::Curve;
use crate::diagrams::Diagram;
use crate::foundation::core::{Point, Rect};
use crate::paint::color::palette;
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{LabelStyle, clear, draw_curve, draw_grid, draw_label};

pub const SLUG: &str = "tokens-cost";
pub const TITLE: &str = "Tokens Are the New API Calls";

const PIECES: [&str; 9] = ["The", "mod", "el", "pred", "icts", "the", "next", "tok", "en"];
const TOKENS_PER_SEC: f64 = 2.5;
/// $0.003 per thousand tokens.
const PRICE_PER_TOKEN: f64 = 0.000003;
const VISIBLE: usize = 8;
const BATCH_INTERVAL: f64 = 5.0;
const BATCH_SHOW: f64 = 2.0;

/// Tokens emitted after `time` seconds.
pub(crate) fn tokens_at(time: f64) -> u64 {
    (time.max(0.0) * TOKENS_PER_SEC).floor() as u64
}

pub(crate) fn running_cost(tokens: u64) -> f64 {
    tokens as f64 * PRICE_PER_TOKEN
}

/// Curve parameter of visible slot `i` at `time`; slots are evenly spaced and wrap.
pub(crate) fn slot_position(i: usize, time: f64) -> f64 {
    let spacing = 1.0 / (VISIBLE + 1) as f64;
    ((time * TOKENS_PER_SEC * spacing).rem_euclid(1.0) + i as f64 * spacing).rem_euclid(1.0)
}

/// Word piece shown in slot `i` once `emitted` tokens have gone by.
pub(crate) fn piece_for(emitted: u64, i: usize) -> &'static str {
    let n = PIECES.len() as i64;
    PIECES[(emitted as i64 - i as i64).rem_euclid(n) as usize]
}

/// Opacity of the "1000 calls" reminder; it pops in at the end of each interval and fades.
pub(crate) fn batch_alpha(time: f64) -> Option<f64> {
    let phase = time.rem_euclid(BATCH_INTERVAL);
    let from = BATCH_INTERVAL - BATCH_SHOW;
    (phase > from).then(|| ease_out(clamp(1.0 - (phase - from) / BATCH_SHOW, 0.0, 1.0)) * 0.8)
}

pub struct TokensCost;

impl Diagram for TokensCost {
    fn slug(&self) -> &'static str {
        SLUG
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn draw(&self, ctx: &mut Context2d, w: f64, h: f64, time: f64) {
        clear(ctx, w, h);
        draw_grid(ctx, w, h, 40.0);

        let mx = w * 0.08;
        let stream_y = h * 0.35;
        let start = Point::new(mx, stream_y);
        let end = Point::new(w - mx, stream_y);
        let span = end.x - start.x;
        let stream = Curve::Cubic(
            start,
            Point::new(start.x + span * 0.3, stream_y - h * 0.06),
            Point::new(start.x + span * 0.7, stream_y + h * 0.06),
            end,
        );
        draw_curve(ctx, &stream, 60, palette::TEAL.with_alpha(0.15), 1.5, 0.0);
        draw_curve(ctx, &stream, 60, palette::TEAL.with_alpha(0.05), 4.0, 8.0);

        let emitted = tokens_at(time);
        for i in 0..VISIBLE {
            let pos = slot_position(i, time);
            let pt = stream.eval(pos);
            let piece = piece_for(emitted, i);
            let rw = (piece.len() as f64 * 8.0 + 8.0).max(24.0);
            let rh = 18.0;
            // Brightest mid-stream.
            let alpha = clamp(1.0 - (pos - 0.5).abs() * 1.2, 0.1, 0.8);

            ctx.save();
            ctx.set_shadow(palette::TEAL, alpha * 6.0);
            ctx.set_fill_style(palette::TEAL.with_alpha(alpha * 0.2));
            ctx.set_stroke_style(palette::TEAL.with_alpha(alpha * 0.5));
            ctx.set_line_width(1.0);
            ctx.begin_path();
            ctx.round_rect(
                Rect::new(pt.x - rw / 2.0, pt.y - rh / 2.0, pt.x + rw / 2.0, pt.y + rh / 2.0),
                3.0,
            );
            ctx.fill();
            ctx.stroke();
            ctx.restore();

            draw_label(
                ctx,
                &format!("\"{piece}\""),
                pt,
                LabelStyle::new(palette::WHITE.with_alpha(alpha), 9.0, TextAlign::Center),
            );
        }

        let cost_y = h * 0.56;
        draw_label(
            ctx,
            "running cost",
            Point::new(w / 2.0, cost_y),
            LabelStyle::new(palette::WHITE.with_alpha(0.4), 9.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            &format!("${:.6}", running_cost(emitted)),
            Point::new(w / 2.0, cost_y + 20.0),
            LabelStyle::new(palette::YELLOW.with_alpha(0.85), 16.0, TextAlign::Center),
        );

        let formula_y = h * 0.70;
        draw_label(
            ctx,
            "cost = tokens x price_per_token",
            Point::new(w / 2.0, formula_y),
            LabelStyle::new(palette::WHITE.with_alpha(0.45), 10.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            &format!("{emitted} tokens x ${PRICE_PER_TOKEN:.6}"),
            Point::new(w / 2.0, formula_y + 16.0),
            LabelStyle::new(palette::TEAL.with_alpha(0.5), 9.0, TextAlign::Center),
        );

        let comp_y = h * 0.84;
        let small = |c| LabelStyle::new(c, 9.0, TextAlign::Center);
        draw_label(ctx, "SaaS: $0 / marginal call", Point::new(w * 0.3, comp_y), small(palette::GREEN.with_alpha(0.45)));
        draw_label(ctx, "vs", Point::new(w * 0.5, comp_y), small(palette::WHITE.with_alpha(0.3)));
        draw_label(
            ctx,
            "LLM: $0.003/call x \u{221e}",
            Point::new(w * 0.7, comp_y),
            small(palette::CORAL.with_alpha(0.45)),
        );

        if let Some(alpha) = batch_alpha(time) {
            let y = h * 0.93;
            let (half_w, r) = (80.0, 12.0);
            ctx.save();
            ctx.set_fill_style(palette::CORAL.with_alpha(alpha * 0.15));
            ctx.begin_path();
            ctx.round_rect(Rect::new(w / 2.0 - half_w - r, y - r, w / 2.0 + half_w + r, y + r), r);
            ctx.fill();
            ctx.restore();
            draw_label(
                ctx,
                "1000 calls = $3.00",
                Point::new(w / 2.0, y),
                LabelStyle::new(palette::CORAL.with_alpha(alpha), 11.0, TextAlign::Center),
            );
        }

        draw_label(
            ctx,
            "tokens & cost",
            Point::new(mx + 4.0, h * 0.08),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/tokens_cost.rs"]
mod tests;
