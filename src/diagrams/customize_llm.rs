//! Three ways to customize a base model, drawn one after another: prompting is a short hop,
//! RAG detours through a retrieval node, fine-tuning takes the long way round.

use crate::animation::ease::ease_out;
use crate::curve::eval::clamp;
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_line, draw_partial_curve,
    draw_ring,
};

pub const SLUG: &str = "customize-llm";
pub const TITLE: &str = "Three Ways to Customize an LLM";

const CYCLE: f64 = 9.0;
const STEPS: usize = 60;
const SCALE_FROM: f64 = 0.85;

/// Eased draw progress of the prompting, RAG and fine-tuning paths at cycle phase `t`.
pub(crate) fn path_progress(t: f64) -> [f64; 3] {
    [
        ease_out(clamp(t / 0.25, 0.0, 1.0)),
        ease_out(clamp((t - 0.25) / 0.30, 0.0, 1.0)),
        ease_out(clamp((t - 0.55) / 0.30, 0.0, 1.0)),
    ]
}

/// Split RAG progress into its two halves, before and after the retrieval node.
pub(crate) fn rag_halves(progress: f64) -> (f64, f64) {
    (
        clamp(progress / 0.5, 0.0, 1.0),
        clamp((progress - 0.5) / 0.5, 0.0, 1.0),
    )
}

struct Path {
    name: &'static str,
    cost: &'static str,
    color: Rgba,
    end: Point,
}

pub struct CustomizeLlm;

impl CustomizeLlm {
    /// Title and cost captions at the end of a path, plus the end dot once it arrives.
    fn draw_caption(ctx: &mut Context2d, path: &Path, progress: f64) {
        if progress > 0.5 {
            let a = clamp((progress - 0.5) / 0.5, 0.0, 0.8);
            let x = path.end.x - 6.0;
            draw_label(
                ctx,
                path.name,
                Point::new(x, path.end.y - 16.0),
                LabelStyle::new(path.color.with_alpha(a), 11.0, TextAlign::Right),
            );
            draw_label(
                ctx,
                path.cost,
                Point::new(x, path.end.y + 16.0),
                LabelStyle::new(path.color.with_alpha(a * 0.6), 9.0, TextAlign::Right),
            );
        }
        if progress >= 1.0 {
            draw_dot(ctx, path.end, 5.0, path.color.with_alpha(0.6), 8.0);
        }
    }
}

impl Diagram for CustomizeLlm {
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
        let cy = h * 0.5;
        let t = cycle_phase(time, CYCLE);

        let base = Point::new(mx + w * 0.08, cy);
        let end_x = w - mx - w * 0.06;
        let run = end_x - base.x;
        let spacing = h * 0.22;

        let prompting = Path {
            name: "PROMPTING",
            cost: "minutes / $0",
            color: palette::GREEN,
            end: Point::new(end_x, cy - spacing),
        };
        let rag = Path {
            name: "RAG",
            cost: "days / $1K",
            color: palette::TEAL,
            end: Point::new(end_x, cy),
        };
        let tuning = Path {
            name: "FINE-TUNING",
            cost: "weeks / $10K+",
            color: palette::PURPLE,
            end: Point::new(end_x, cy + spacing),
        };

        let p1 = Curve::Cubic(
            base,
            Point::new(base.x + run * 0.3, cy - spacing * 0.3),
            Point::new(base.x + run * 0.6, prompting.end.y + 5.0),
            prompting.end,
        );
        let retrieval = Point::new(base.x + run * 0.5, cy + 8.0);
        let p2a = Curve::Cubic(
            base,
            Point::new(base.x + run * 0.2, cy + 15.0),
            Point::new(retrieval.x - 20.0, cy + 12.0),
            retrieval,
        );
        let p2b = Curve::Cubic(
            retrieval,
            Point::new(retrieval.x + 30.0, cy - 5.0),
            Point::new(end_x - (end_x - retrieval.x) * 0.3, cy + 2.0),
            rag.end,
        );
        let p3 = Curve::Cubic(
            base,
            Point::new(base.x + run * 0.2, cy + spacing * 0.5),
            Point::new(base.x + run * 0.5, tuning.end.y + spacing * 0.3),
            tuning.end,
        );

        draw_curve(ctx, &p1, STEPS, palette::GREEN.with_alpha(0.08), 1.0, 0.0);
        draw_curve(ctx, &p2a, 40, palette::TEAL.with_alpha(0.08), 1.0, 0.0);
        draw_curve(ctx, &p2b, 40, palette::TEAL.with_alpha(0.08), 1.0, 0.0);
        draw_curve(ctx, &p3, STEPS, palette::PURPLE.with_alpha(0.08), 1.0, 0.0);

        let [t1, t2, t3] = path_progress(t);

        draw_partial_curve(ctx, &p1, STEPS, t1, palette::GREEN.with_alpha(0.8), 2.5, 10.0);
        if t1 > 0.0 && t1 < 1.0 {
            draw_dot(ctx, p1.eval(t1), 4.0, palette::GREEN, 12.0);
        }
        Self::draw_caption(ctx, &prompting, t1);

        let (t2a, t2b) = rag_halves(t2);
        draw_partial_curve(ctx, &p2a, STEPS, t2a, palette::TEAL.with_alpha(0.8), 2.5, 10.0);
        if t2a >= 1.0 {
            draw_partial_curve(ctx, &p2b, STEPS, t2b, palette::TEAL.with_alpha(0.8), 2.5, 10.0);
        }
        if t2 > 0.0 && t2 < 1.0 {
            let head = if t2 < 0.5 { p2a.eval(t2a) } else { p2b.eval(t2b) };
            draw_dot(ctx, head, 4.0, palette::TEAL, 12.0);
        }
        if t2a >= 0.9 {
            let a = clamp((t2a - 0.9) / 0.1, 0.0, 0.7);
            draw_ring(ctx, retrieval, 8.0, palette::TEAL.with_alpha(a), 1.5);
            draw_label(
                ctx,
                "retrieval",
                Point::new(retrieval.x, retrieval.y - 16.0),
                LabelStyle::new(palette::TEAL.with_alpha(a * 0.7), 9.0, TextAlign::Center),
            );
        }
        Self::draw_caption(ctx, &rag, t2);

        draw_partial_curve(ctx, &p3, STEPS, t3, palette::PURPLE.with_alpha(0.8), 2.5, 10.0);
        if t3 > 0.0 && t3 < 1.0 {
            draw_dot(ctx, p3.eval(t3), 4.0, palette::PURPLE, 12.0);
        }
        Self::draw_caption(ctx, &tuning, t3);

        draw_dot(ctx, base, 8.0, palette::WHITE.with_alpha(0.3), 12.0);
        draw_dot(ctx, base, 5.0, palette::WHITE, 0.0);
        draw_label(
            ctx,
            "base model",
            Point::new(base.x, base.y - 20.0),
            LabelStyle::new(palette::WHITE.with_alpha(0.7), 10.0, TextAlign::Center),
        );

        if t > SCALE_FROM {
            let a = clamp((t - SCALE_FROM) / 0.10, 0.0, 0.5);
            let sx = w - mx * 0.5;
            let top = prompting.end.y;
            let bottom = tuning.end.y;
            let small = |c: Rgba, align| LabelStyle::new(c, 8.0, align);
            draw_line(ctx, Point::new(sx, top), Point::new(sx, bottom), palette::WHITE.with_alpha(a), 1.0, &[3.0, 3.0]);
            draw_label(ctx, "low", Point::new(sx + 4.0, top), small(palette::WHITE.with_alpha(a), TextAlign::Left));
            draw_label(ctx, "high", Point::new(sx + 4.0, bottom), small(palette::WHITE.with_alpha(a), TextAlign::Left));
            draw_label(ctx, "effort", Point::new(sx, cy), small(palette::WHITE.with_alpha(a * 0.7), TextAlign::Center));
        }

        draw_label(
            ctx,
            "quality = f(data, effort, cost)",
            Point::new(w / 2.0, h * 0.93),
            LabelStyle::new(palette::WHITE.with_alpha(0.4), 10.0, TextAlign::Center),
        );
        draw_label(
            ctx,
            "customization approaches",
            Point::new(mx + 4.0, h * 0.06),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/customize_llm.rs"]
mod tests;
