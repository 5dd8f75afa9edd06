//! Think, act, observe, repeat: a closed four-segment cubic loop with a glowing tracer, a fading
//! trail and live De Casteljau construction on the active segment.

use crate::animation::ease::ease_in_out;
use crate::curve::eval::{cubic_pt, de_casteljau};
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::palette;
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_line,
};

pub const SLUG: &str = "agent-loop";
pub const TITLE: &str = "The Loop Is the Product";

const LOOP_PERIOD: f64 = 8.0;
const TRAIL_LENGTH: f64 = 0.12;
const TRAIL_SEGMENTS: usize = 40;
const CURVE_STEPS: usize = 80;
const GLOW_SPAN: f64 = 0.03;
const GLOW_STEPS: usize = 20;
const ACTIVITY_WINDOW: f64 = 0.12;
const HANDLE_FRAC: f64 = 0.55;

const LABELS: [&str; 4] = ["THINK", "ACT", "OBSERVE", "REPEAT"];

pub struct AgentLoop;

/// Loop layout for one canvas size. Nodes run top, right, bottom, left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Geometry {
    pub nodes: [Point; 4],
    /// `segments[i]` runs from `nodes[i]` to `nodes[(i + 1) % 4]`.
    pub segments: [[Point; 4]; 4],
    pub label_pts: [Point; 4],
}

impl Geometry {
    pub(crate) fn new(w: f64, h: f64) -> Self {
        let (cx, cy) = (w / 2.0, h / 2.0);
        let r = w.min(h) * 0.34;
        let k = r * HANDLE_FRAC;
        let off = w.min(h) * 0.07;

        let nodes = [
            Point::new(cx, cy - r),
            Point::new(cx + r, cy),
            Point::new(cx, cy + r),
            Point::new(cx - r, cy),
        ];
        let segments = [
            [nodes[0], Point::new(cx + k, cy - r), Point::new(cx + r, cy - k), nodes[1]],
            [nodes[1], Point::new(cx + r, cy + k), Point::new(cx + k, cy + r), nodes[2]],
            [nodes[2], Point::new(cx - k, cy + r), Point::new(cx - r, cy + k), nodes[3]],
            [nodes[3], Point::new(cx - r, cy - k), Point::new(cx - k, cy - r), nodes[0]],
        ];
        let label_pts = [
            Point::new(cx, cy - r - off),
            Point::new(cx + r + off, cy),
            Point::new(cx, cy + r + off),
            Point::new(cx - r - off, cy),
        ];
        Self {
            nodes,
            segments,
            label_pts,
        }
    }

    /// Point on the whole loop; `global_t` wraps modulo 1.
    pub(crate) fn loop_pt(&self, global_t: f64) -> Point {
        let (idx, local) = segment_at(global_t);
        let [p0, p1, p2, p3] = self.segments[idx];
        cubic_pt(p0, p1, p2, p3, local)
    }
}

/// Segment index and local parameter for a loop position.
pub(crate) fn segment_at(global_t: f64) -> (usize, f64) {
    let scaled = global_t.rem_euclid(1.0) * 4.0;
    let whole = scaled.floor();
    ((whole as usize) % 4, scaled - whole)
}

/// How lit node `i` is when the tracer sits at `global_t`, in `[0, 1]`.
pub(crate) fn node_activity(i: usize, global_t: f64) -> f64 {
    let mut diff = (global_t - i as f64 / 4.0).abs();
    if diff > 0.5 {
        diff = 1.0 - diff;
    }
    ease_in_out((1.0 - diff / ACTIVITY_WINDOW).max(0.0))
}

impl Diagram for AgentLoop {
    fn slug(&self) -> &'static str {
        SLUG
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn cycle_secs(&self) -> Option<f64> {
        Some(LOOP_PERIOD)
    }

    fn draw(&self, ctx: &mut Context2d, w: f64, h: f64, time: f64) {
        clear(ctx, w, h);
        draw_grid(ctx, w, h, 40.0);

        let geo = Geometry::new(w, h);
        let global_t = cycle_phase(time, LOOP_PERIOD);

        let dim = palette::TEAL.with_alpha(0.25);
        for [p0, p1, p2, p3] in geo.segments {
            draw_curve(ctx, &Curve::Cubic(p0, p1, p2, p3), CURVE_STEPS, dim, 2.0, 0.0);
        }

        // Trail, oldest first.
        for i in (1..=TRAIL_SEGMENTS).rev() {
            let frac = i as f64 / TRAIL_SEGMENTS as f64;
            let next = (i - 1) as f64 / TRAIL_SEGMENTS as f64;
            let a = geo.loop_pt(global_t - TRAIL_LENGTH * frac);
            let b = geo.loop_pt(global_t - TRAIL_LENGTH * next);
            draw_line(ctx, a, b, palette::TEAL.with_alpha((1.0 - frac) * 0.7), 3.0, &[]);
        }

        let bright = palette::TEAL.with_alpha(0.9);
        for i in 0..GLOW_STEPS {
            let step = 2.0 * GLOW_SPAN / GLOW_STEPS as f64;
            let ta = global_t - GLOW_SPAN + step * i as f64;
            let a = geo.loop_pt(ta);
            let b = geo.loop_pt(ta + step);
            draw_line(ctx, a, b, bright, 3.0, &[]);
        }

        let (seg, local_t) = segment_at(global_t);
        if local_t > 0.1 && local_t < 0.9 {
            let strength = (1.0 - 2.0 * (local_t - 0.5).abs()) * 0.5;
            if strength > 0.05 {
                let [p0, p1, p2, p3] = geo.segments[seg];
                let dc = de_casteljau(p0, p1, p2, p3, local_t);
                let l1 = palette::TEAL.with_alpha(strength * 0.4);
                let l2 = palette::TEAL.with_alpha(strength * 0.7);
                draw_line(ctx, dc.l1[0], dc.l1[1], l1, 1.0, &[3.0, 3.0]);
                draw_line(ctx, dc.l1[1], dc.l1[2], l1, 1.0, &[3.0, 3.0]);
                draw_line(ctx, dc.l2[0], dc.l2[1], l2, 1.0, &[3.0, 3.0]);
                for p in dc.l1 {
                    draw_dot(ctx, p, 2.5, l1, 0.0);
                }
                for p in dc.l2 {
                    draw_dot(ctx, p, 2.5, l2, 0.0);
                }
            }
        }

        for (i, label) in LABELS.iter().enumerate() {
            let activity = node_activity(i, global_t);
            draw_dot(
                ctx,
                geo.nodes[i],
                5.0 + activity * 4.0,
                palette::TEAL.with_alpha(0.35 + activity * 0.65),
                activity * 18.0,
            );
            let style = LabelStyle::new(
                palette::PURE_WHITE.with_alpha(0.4 + activity * 0.5),
                (11.0 + activity * 3.0).round(),
                TextAlign::Center,
            );
            draw_label(ctx, label, geo.label_pts[i], style);
        }

        let tracer = geo.loop_pt(global_t);
        draw_dot(ctx, tracer, 12.0, palette::PURE_WHITE.with_alpha(0.1), 30.0);
        draw_dot(ctx, tracer, 6.0, palette::PURE_WHITE.with_alpha(0.5), 18.0);
        draw_dot(ctx, tracer, 3.5, palette::PURE_WHITE, 8.0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/agent_loop.rs"]
mod tests;
