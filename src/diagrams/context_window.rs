//! A fixed-size context window filling with prompt chunks, overflowing, then fading out.

use crate::animation::ease::{ease_in_out, ease_out};
use crate::curve::eval::{clamp, cubic_pt, lerp};
use crate::curve::shape::Curve;
use crate::diagrams::Diagram;
use crate::foundation::core::{Point, Rect};
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label,
};

pub const SLUG: &str = "context-window";
pub const TITLE: &str = "Context Is All You Have";

const CYCLE: f64 = 12.0;
const FILL_DUR: f64 = 7.0;
const OVERFLOW_DUR: f64 = 2.5;
const FADE_DUR: f64 = 1.0;
const WINDOW_K: f64 = 128.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Chunk {
    pub label: &'static str,
    /// Size in thousands of tokens.
    pub tokens_k: u32,
    pub color: Rgba,
}

const CHUNKS: [Chunk; 4] = [
    Chunk {
        label: "system prompt",
        tokens_k: 2,
        color: palette::PURPLE,
    },
    Chunk {
        label: "conversation",
        tokens_k: 40,
        color: palette::TEAL,
    },
    Chunk {
        label: "retrieved docs",
        tokens_k: 20,
        color: palette::BLUE,
    },
    Chunk {
        label: "user input",
        tokens_k: 66,
        color: palette::GREEN,
    },
];

pub struct ContextWindow {
    /// Window offset of each chunk, in thousands of tokens.
    starts_k: [u32; 4],
}

impl ContextWindow {
    pub fn new() -> Self {
        let mut run = 0;
        let starts_k = CHUNKS.map(|c| {
            let start = run;
            run += c.tokens_k;
            start
        });
        Self { starts_k }
    }

    pub(crate) fn starts_k(&self) -> [u32; 4] {
        self.starts_k
    }
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self::new()
    }
}

/// Overall fill progress `t` seconds into the cycle.
pub(crate) fn fill_progress(t: f64) -> f64 {
    ease_out(clamp(t / FILL_DUR, 0.0, 1.0))
}

/// Linear share of chunk `c` that has arrived at a given fill progress.
fn chunk_share(c: usize, fill: f64) -> f64 {
    let n = CHUNKS.len() as f64;
    clamp((fill - c as f64 / n) * n, 0.0, 1.0)
}

/// Fraction of the window in use at a given fill progress.
pub(crate) fn fill_fraction(fill: f64) -> f64 {
    let used: f64 = CHUNKS
        .iter()
        .enumerate()
        .map(|(c, chunk)| f64::from(chunk.tokens_k) * chunk_share(c, fill))
        .sum();
    used / WINDOW_K
}

/// Global opacity `t` seconds into the cycle: 1 until the final fade.
pub(crate) fn global_alpha(t: f64) -> f64 {
    let fade_from = CYCLE - FADE_DUR;
    if t > fade_from {
        1.0 - clamp((t - fade_from) / FADE_DUR, 0.0, 1.0)
    } else {
        1.0
    }
}

/// Level bar color: coral when nearly full, yellow when filling up.
pub(crate) fn bar_color(fraction: f64) -> Rgba {
    if fraction > 0.9 {
        palette::CORAL
    } else if fraction > 0.7 {
        palette::YELLOW
    } else {
        palette::TEAL
    }
}

impl Diagram for ContextWindow {
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

        let (mx, my) = (w * 0.1, h * 0.16);
        let t = time.rem_euclid(CYCLE);
        let ga = global_alpha(t);

        let (bx, by, bw, bh) = (w * 0.25, h * 0.22, w * 0.5, h * 0.45);
        ctx.save();
        ctx.set_stroke_style(palette::WHITE.with_alpha(0.3 * ga));
        ctx.set_line_width(1.5);
        ctx.begin_path();
        ctx.round_rect(Rect::new(bx, by, bx + bw, by + bh), 6.0);
        ctx.stroke();
        ctx.restore();

        draw_label(
            ctx,
            "128K tokens",
            Point::new(bx + bw / 2.0, by - 12.0),
            LabelStyle::new(palette::WHITE.with_alpha(0.5 * ga), 11.0, TextAlign::Center),
        );

        let fill = fill_progress(t);
        let inner_w = bw - 4.0;
        for (c, chunk) in CHUNKS.iter().enumerate() {
            let cp = ease_out(chunk_share(c, fill));
            if cp <= 0.0 {
                continue;
            }
            let sf = f64::from(self.starts_k[c]) / WINDOW_K;
            let ef = f64::from(self.starts_k[c] + chunk.tokens_k) / WINDOW_K;
            let sx = bx + 2.0 + sf * inner_w;
            let sw = (lerp(sf, ef, cp) - sf) * inner_w;

            ctx.save();
            ctx.set_fill_style(chunk.color.with_alpha(0.25 * ga));
            ctx.fill_rect(Rect::new(sx, by + 2.0, sx + sw, by + bh - 2.0));
            ctx.set_fill_style(chunk.color.with_alpha(0.4 * ga));
            ctx.fill_rect(Rect::new(sx, by + 2.0, sx + sw, by + 4.0));
            ctx.restore();

            // Inflow curve while the chunk is still arriving.
            if cp < 1.0 {
                let cf = c as f64;
                let fy = by + bh * (0.2 + cf * 0.2);
                let fsx = bx - w * 0.15;
                let p0 = Point::new(fsx, fy - 10.0 + (time * 2.0 + cf).sin() * 8.0);
                let p1 = Point::new(lerp(fsx, bx, 0.5), fy + (time * 3.0 + cf).cos() * 5.0);
                let p2 = Point::new(bx, fy);
                let p3 = Point::new(sx + sw, by + bh / 2.0);
                draw_curve(
                    ctx,
                    &Curve::Cubic(p0, p1, p2, p3),
                    40,
                    chunk.color.with_alpha(0.5 * cp * ga),
                    1.5,
                    6.0,
                );
                let dt = (time * 0.8 + cf * 0.3).rem_euclid(1.0);
                draw_dot(ctx, cubic_pt(p0, p1, p2, p3, dt), 2.0, chunk.color.with_alpha(0.6 * ga), 4.0);
            }

            if cp > 0.5 && sw > 30.0 {
                let la = clamp((cp - 0.5) / 0.3, 0.0, 1.0);
                let size = (sw / chunk.label.len() as f64 * 1.2).clamp(8.0, 10.0);
                let mid_x = sx + sw / 2.0;
                draw_label(
                    ctx,
                    chunk.label,
                    Point::new(mid_x, by + bh / 2.0 - 7.0),
                    LabelStyle::new(chunk.color.with_alpha(0.7 * la * ga), size, TextAlign::Center),
                );
                draw_label(
                    ctx,
                    &format!("{}K", chunk.tokens_k),
                    Point::new(mid_x, by + bh / 2.0 + 8.0),
                    LabelStyle::new(chunk.color.with_alpha(0.5 * la * ga), 9.0, TextAlign::Center),
                );
            }
        }

        let ff = fill_fraction(fill);
        let (bar_x, bar_w) = (bx + bw + 15.0, 8.0);
        let level = bar_color(ff);
        ctx.save();
        ctx.set_stroke_style(palette::WHITE.with_alpha(0.2 * ga));
        ctx.set_line_width(1.0);
        ctx.stroke_rect(Rect::new(bar_x, by, bar_x + bar_w, by + bh));
        ctx.set_fill_style(level.with_alpha(0.5 * ga));
        ctx.fill_rect(Rect::new(bar_x, by + bh * (1.0 - ff), bar_x + bar_w, by + bh));
        ctx.restore();
        draw_label(
            ctx,
            &format!("{}%", (ff * 100.0).round()),
            Point::new(bar_x + bar_w / 2.0, by + bh + 14.0),
            LabelStyle::new(level.with_alpha(0.7 * ga), 10.0, TextAlign::Center),
        );

        if t > FILL_DUR && t < FILL_DUR + OVERFLOW_DUR {
            let ot = ease_in_out((t - FILL_DUR) / OVERFLOW_DUR);
            let right = bx + bw;
            for o in 0..3 {
                let of = f64::from(o);
                let oy = by + bh * (0.3 + of * 0.2);
                let spill = Curve::Quadratic(
                    Point::new(right, oy),
                    Point::new(right + 20.0, oy + 5.0 - of * 3.0),
                    Point::new(right + w * 0.12 * ot, oy + 3.0 - of * 2.0),
                );
                draw_curve(ctx, &spill, 30, palette::CORAL.with_alpha(0.4 * ot * ga), 1.5, 4.0);
            }
            draw_label(
                ctx,
                "truncated",
                Point::new(right + 15.0, by - 12.0),
                LabelStyle::new(palette::CORAL.with_alpha(0.6 * ot * ga), 9.0, TextAlign::Left),
            );
        }

        if fill > 0.7 {
            let fa = clamp((fill - 0.7) / 0.2, 0.0, 1.0) * ga;
            draw_label(
                ctx,
                "available = window - system - history - retrieval",
                Point::new(w / 2.0, h * 0.8),
                LabelStyle::new(palette::WHITE.with_alpha(0.4 * fa), 10.0, TextAlign::Center),
            );
            draw_label(
                ctx,
                "128K - 2K - 40K - 20K = 66K remaining",
                Point::new(w / 2.0, h * 0.8 + 18.0),
                LabelStyle::new(palette::YELLOW.with_alpha(0.6 * fa), 11.0, TextAlign::Center),
            );
        }

        draw_label(
            ctx,
            "context window",
            Point::new(mx + 4.0, my * 0.45),
            LabelStyle::new(palette::WHITE.with_alpha(0.35 * ga), 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/context_window.rs"]
mod tests;
