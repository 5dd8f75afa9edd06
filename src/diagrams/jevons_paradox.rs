//! Falling price per token against rising total spend.

use crate::animation::ease::{ease_in_out, ease_out};
use crate::curve::eval::clamp;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{LabelStyle, clear, draw_dot, draw_grid, draw_label, draw_line};

pub const SLUG: &str = "jevons-paradox";
pub const TITLE: &str = "The Jevons Paradox Hit AI";

const CYCLE: f64 = 7.0;
const STEPS: usize = 80;
const PRICE_MAX: f64 = 1.0;
const SPEND_MAX: f64 = 2.2;

struct Callout {
    at: f64,
    label: &'static str,
    color: Rgba,
    y_off: f64,
}

const CALLOUTS: [Callout; 3] = [
    Callout {
        at: 0.25,
        label: "price: \u{2212}90%",
        color: palette::CORAL,
        y_off: 0.35,
    },
    Callout {
        at: 0.5,
        label: "usage: +2000%",
        color: palette::GREEN,
        y_off: 0.5,
    },
    Callout {
        at: 0.75,
        label: "spend: +110%",
        color: palette::TEAL,
        y_off: 0.65,
    },
];

pub struct JevonsParadox;

/// Normalized price per token over normalized time.
pub(crate) fn price(t: f64) -> f64 {
    (-3.2 * t).exp()
}

/// Usage multiplier, saturating at 20x.
pub(crate) fn usage(t: f64) -> f64 {
    1.0 + 19.0 * (1.0 - (-2.5 * t).exp())
}

pub(crate) fn spend(t: f64) -> f64 {
    price(t) * usage(t)
}

/// How much of the time axis is drawn at cycle phase `phase`.
pub(crate) fn reveal(phase: f64) -> f64 {
    ease_out(clamp(phase * 1.8, 0.0, 1.0))
}

/// Plot area in logical pixels; values grow upward from [`Plot::bottom`].
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Plot {
    fn bottom(&self) -> f64 {
        self.top + self.height
    }

    fn at(&self, t: f64, value: f64, max: f64) -> Point {
        Point::new(self.left + t * self.width, self.bottom() - value / max * self.height)
    }

    fn trace(&self, ctx: &mut Context2d, upto: f64, f: fn(f64) -> f64, max: f64, color: Rgba) {
        ctx.save();
        ctx.begin_path();
        for i in 0..=STEPS {
            let t = i as f64 / STEPS as f64 * upto;
            let p = self.at(t, f(t), max);
            if i == 0 {
                ctx.move_to(p);
            } else {
                ctx.line_to(p);
            }
        }
        ctx.set_stroke_style(color.with_alpha(0.7));
        ctx.set_line_width(2.5);
        ctx.set_shadow(color, 10.0);
        ctx.stroke();
        ctx.restore();
    }
}

impl Diagram for JevonsParadox {
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

        let (mx, my) = (w * 0.12, h * 0.14);
        let plot = Plot {
            left: mx,
            top: my,
            width: w - mx * 2.0,
            height: h - my * 2.2,
        };
        let right = plot.left + plot.width;
        let bottom = plot.bottom();
        let phase = cycle_phase(time, CYCLE);
        let upto = reveal(phase);

        let axis = palette::WHITE.with_alpha(0.15);
        draw_line(ctx, Point::new(mx, my), Point::new(mx, bottom), axis, 1.0, &[]);
        draw_line(ctx, Point::new(mx, bottom), Point::new(right, bottom), axis, 1.0, &[]);
        draw_line(
            ctx,
            Point::new(right, my),
            Point::new(right, bottom),
            palette::WHITE.with_alpha(0.1),
            1.0,
            &[],
        );

        draw_label(
            ctx,
            "time \u{2192}",
            Point::new(mx + plot.width * 0.5, bottom + 28.0),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            "$/token",
            Point::new(mx - 4.0, my - 10.0),
            LabelStyle::new(palette::CORAL.with_alpha(0.6), 9.0, TextAlign::Right),
        );
        draw_label(
            ctx,
            "total spend",
            Point::new(right + 4.0, my - 10.0),
            LabelStyle::new(palette::TEAL.with_alpha(0.6), 9.0, TextAlign::Left),
        );

        plot.trace(ctx, upto, price, PRICE_MAX, palette::CORAL);
        plot.trace(ctx, upto, spend, SPEND_MAX, palette::TEAL);

        if upto > 0.05 {
            draw_dot(ctx, plot.at(upto, price(upto), PRICE_MAX), 4.0, palette::CORAL, 10.0);
            draw_dot(ctx, plot.at(upto, spend(upto), SPEND_MAX), 4.0, palette::TEAL, 10.0);
        }

        if upto > 0.4 {
            let x = mx + plot.width * 0.55;
            draw_label(
                ctx,
                "price/token \u{2193}",
                Point::new(x, bottom - plot.height * 0.08),
                LabelStyle::new(palette::CORAL.with_alpha(0.6), 10.0, TextAlign::Left),
            );
            draw_label(
                ctx,
                "total spend \u{2191}",
                Point::new(x, bottom - plot.height * 0.75),
                LabelStyle::new(palette::TEAL.with_alpha(0.6), 10.0, TextAlign::Left),
            );
        }

        for (i, callout) in CALLOUTS.iter().enumerate() {
            let appear = ease_out(clamp((upto - callout.at) * 5.0, 0.0, 1.0));
            if appear <= 0.01 {
                continue;
            }
            let cx = mx + plot.width * (0.12 + i as f64 * 0.3);
            let cy = my + plot.height * callout.y_off;
            draw_dot(ctx, Point::new(cx - 40.0, cy), 3.0, callout.color.with_alpha(appear * 0.6), 6.0);
            draw_label(
                ctx,
                callout.label,
                Point::new(cx - 24.0, cy + 4.0),
                LabelStyle::new(callout.color.with_alpha(appear * 0.8), 11.0, TextAlign::Left),
            );
        }

        let formula = ease_in_out(clamp(phase * 3.0 - 1.2, 0.0, 1.0));
        draw_label(
            ctx,
            "total_spend = price \u{d7} usage   where usage \u{221d} 1/price^\u{3b1}, \u{3b1} > 1",
            Point::new(w / 2.0, h - my * 0.25),
            LabelStyle::new(palette::WHITE.with_alpha(formula * 0.45), 9.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            "Jevons Paradox: cheaper but spending more",
            Point::new(w / 2.0, my * 0.45),
            LabelStyle::new(palette::YELLOW.with_alpha(0.55), 11.0, TextAlign::Center),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/jevons_paradox.rs"]
mod tests;
