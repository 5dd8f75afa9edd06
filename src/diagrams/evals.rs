//! Evals as A/B tests: two prompt variants' per-sample accuracy drawn as noisy polylines,
//! then summarized into means, one-sigma bands and a significance call.

use crate::animation::ease::ease_out;
use crate::curve::eval::{clamp, lerp};
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::{Point, Rect};
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, LineCap, TextAlign};
use crate::paint::primitives::{LabelStyle, clear, draw_dot, draw_grid, draw_label, draw_line};

pub const SLUG: &str = "evals";
pub const TITLE: &str = "Evals Are the New A/B Tests";

const CYCLE: f64 = 10.0;
const DRAW_DUR: f64 = 5.0;
const STATS_DUR: f64 = 2.5;
const FADE_DUR: f64 = 1.0;
const NUM_POINTS: usize = 40;
/// Lowest score on the chart's y axis; the axis spans 0.6 above it.
const FLOOR: f64 = 0.4;

/// Deterministic hash noise in `[0, 1)`.
pub(crate) fn seeded_rand(seed: f64) -> f64 {
    let x = (seed * 127.1 + 311.7).sin() * 43758.5453;
    x - x.floor()
}

/// One prompt variant's eval run.
#[derive(Clone, Debug)]
pub(crate) struct Variant {
    pub scores: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    pub color: Rgba,
}

impl Variant {
    fn new(scores: Vec<f64>, color: Rgba) -> Self {
        let n = scores.len().max(1) as f64;
        let mean = scores.iter().sum::<f64>() / n;
        let var = scores.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
        Self {
            scores,
            mean,
            std_dev: var.sqrt(),
            color,
        }
    }

    /// Mean of the first `count` scores, at least one.
    pub(crate) fn running_mean(&self, count: usize) -> f64 {
        let n = count.clamp(1, self.scores.len());
        self.scores[..n].iter().sum::<f64>() / n as f64
    }
}

/// Chart area and the score-to-canvas mapping.
#[derive(Clone, Copy, Debug)]
struct Chart {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Chart {
    fn score_y(&self, score: f64) -> f64 {
        self.y + self.height - (score - FLOOR) / 0.6 * self.height
    }

    fn point(&self, i: usize, score: f64) -> Point {
        Point::new(
            self.x + i as f64 / (NUM_POINTS - 1) as f64 * self.width,
            self.score_y(score),
        )
    }
}

/// Significance readout: a shrinking p-value that settles below 0.05.
pub(crate) fn p_value_label(stats: f64) -> String {
    if stats < 0.8 {
        format!("p = {:.2}...", 0.2 - stats * 0.22)
    } else {
        "p < 0.05".to_owned()
    }
}

pub struct Evals {
    a: Variant,
    b: Variant,
}

impl Evals {
    pub fn new() -> Self {
        let mut a = Vec::with_capacity(NUM_POINTS);
        let mut b = Vec::with_capacity(NUM_POINTS);
        for i in 0..NUM_POINTS {
            let k = (i * 3) as f64;
            a.push(clamp(0.72 + (seeded_rand(k + 1.0) - 0.5) * 0.18, 0.45, 0.95));
            b.push(clamp(0.81 + (seeded_rand(k + 2.0) - 0.5) * 0.15, 0.55, 0.98));
        }
        Self {
            a: Variant::new(a, palette::TEAL),
            b: Variant::new(b, palette::CORAL),
        }
    }

    fn draw_scores(ctx: &mut Context2d, chart: &Chart, variant: &Variant, count: usize, alpha: f64) {
        if count < 2 {
            return;
        }
        ctx.save();
        ctx.set_shadow(variant.color, 6.0 * alpha);
        ctx.set_stroke_style(variant.color.with_alpha(0.7 * alpha));
        ctx.set_line_width(2.0);
        ctx.set_line_cap(LineCap::Round);
        ctx.begin_path();
        for (i, &score) in variant.scores[..count].iter().enumerate() {
            ctx.line_to(chart.point(i, score));
        }
        ctx.stroke();
        ctx.restore();

        for (i, &score) in variant.scores[..count].iter().enumerate().step_by(3) {
            draw_dot(ctx, chart.point(i, score), 2.0, variant.color.with_alpha(0.5 * alpha), 0.0);
        }
    }
}

impl Default for Evals {
    fn default() -> Self {
        Self::new()
    }
}

impl Diagram for Evals {
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
        let my = h * 0.14;
        let chart = Chart {
            x: mx,
            y: h * 0.18,
            width: w * 0.75,
            height: h * 0.52,
        };

        let t = cycle_phase(time, CYCLE) * CYCLE;
        let alpha = 1.0 - clamp((t - (CYCLE - FADE_DUR)) / FADE_DUR, 0.0, 1.0);
        let drawn = ease_out(clamp(t / DRAW_DUR, 0.0, 1.0));
        let visible = ((drawn * NUM_POINTS as f64).floor() as usize).min(NUM_POINTS);
        let stats = ease_out(clamp((t - DRAW_DUR) / STATS_DUR, 0.0, 1.0));

        let bottom = chart.y + chart.height;
        let axis = palette::WHITE.with_alpha(0.15 * alpha);
        draw_line(ctx, Point::new(chart.x, chart.y), Point::new(chart.x, bottom), axis, 1.0, &[]);
        draw_line(ctx, Point::new(chart.x, bottom), Point::new(chart.x + chart.width, bottom), axis, 1.0, &[]);
        for pct in [50, 60, 70, 80, 90, 100] {
            let y = chart.score_y(pct as f64 / 100.0);
            draw_line(
                ctx,
                Point::new(chart.x - 4.0, y),
                Point::new(chart.x, y),
                palette::WHITE.with_alpha(0.2 * alpha),
                1.0,
                &[],
            );
            draw_label(
                ctx,
                &format!("{pct}%"),
                Point::new(chart.x - 8.0, y),
                LabelStyle::new(palette::WHITE.with_alpha(0.25 * alpha), 8.0, TextAlign::Right),
            );
            draw_line(
                ctx,
                Point::new(chart.x, y),
                Point::new(chart.x + chart.width, y),
                palette::WHITE.with_alpha(0.04 * alpha),
                1.0,
                &[2.0, 6.0],
            );
        }

        if stats > 0.0 {
            for v in [&self.a, &self.b] {
                ctx.save();
                ctx.set_fill_style(v.color.with_alpha(stats * 0.08 * alpha));
                ctx.fill_rect(Rect::new(
                    chart.x,
                    chart.score_y(v.mean + v.std_dev),
                    chart.x + chart.width,
                    chart.score_y(v.mean - v.std_dev),
                ));
                ctx.restore();
            }
        }

        Self::draw_scores(ctx, &chart, &self.a, visible, alpha);
        Self::draw_scores(ctx, &chart, &self.b, visible, alpha);

        if stats > 0.0 {
            let mean_alpha = stats * alpha;
            let label_x = chart.x + chart.width + 10.0;
            for (name, v) in [("A", &self.a), ("B", &self.b)] {
                // Running mean of what is drawn settles onto the full-run mean.
                let m = lerp(v.running_mean(visible), v.mean, stats);
                let y = chart.score_y(m);
                draw_line(
                    ctx,
                    Point::new(chart.x, y),
                    Point::new(chart.x + chart.width, y),
                    v.color.with_alpha(0.5 * mean_alpha),
                    1.5,
                    &[6.0, 4.0],
                );
                draw_label(
                    ctx,
                    &format!("{name}: {:.0}%", m * 100.0),
                    Point::new(label_x, y),
                    LabelStyle::new(v.color.with_alpha(0.7 * mean_alpha), 10.0, TextAlign::Left),
                );
            }
        }

        for (dx, name, v) in [(10.0, "Prompt A", &self.a), (90.0, "Prompt B", &self.b)] {
            let pt = Point::new(chart.x + dx, chart.y - 10.0);
            draw_dot(ctx, pt, 4.0, v.color.with_alpha(0.6 * alpha), 0.0);
            draw_label(
                ctx,
                name,
                Point::new(pt.x + 10.0, pt.y),
                LabelStyle::new(v.color.with_alpha(0.6 * alpha), 10.0, TextAlign::Left),
            );
        }

        if stats > 0.5 {
            let reveal = clamp((stats - 0.5) / 0.5, 0.0, 1.0) * alpha;
            let y = h * 0.80;
            draw_label(
                ctx,
                &format!("\u{0394} = B_mean - A_mean = +{:.0}%", (self.b.mean - self.a.mean) * 100.0),
                Point::new(w / 2.0, y),
                LabelStyle::new(palette::YELLOW.with_alpha(0.7 * reveal), 12.0, TextAlign::Center),
            );
            let verdict = if stats >= 0.8 { palette::GREEN } else { palette::WHITE };
            draw_label(
                ctx,
                &p_value_label(stats),
                Point::new(w / 2.0, y + 20.0),
                LabelStyle::new(verdict.with_alpha(0.6 * reveal), 11.0, TextAlign::Center),
            );
            if stats > 0.85 {
                let win = clamp((stats - 0.85) / 0.15, 0.0, 1.0) * reveal;
                draw_label(
                    ctx,
                    "Prompt B wins",
                    Point::new(w / 2.0, y + 40.0),
                    LabelStyle::new(palette::CORAL.with_alpha(0.8 * win), 12.0, TextAlign::Center),
                );
            }
        }

        draw_label(
            ctx,
            "eval samples",
            Point::new(chart.x + chart.width / 2.0, bottom + 16.0),
            LabelStyle::new(palette::WHITE.with_alpha(0.25 * alpha), 9.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            "evals",
            Point::new(mx + 4.0, my * 0.45),
            LabelStyle::new(palette::WHITE.with_alpha(0.35 * alpha), 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/evals.rs"]
mod tests;
