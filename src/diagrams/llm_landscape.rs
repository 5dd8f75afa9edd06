//! The provider landscape on capability and openness axes, with a dashed frontier curve
//! drifting toward higher capability.

use crate::curve::eval::cubic_pt;
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::{Point, Vec2};
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, Font, LineCap, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_line,
};
use std::f64::consts::FRAC_PI_2;

pub const SLUG: &str = "llm-landscape";
pub const TITLE: &str = "The LLM Landscape";

const CYCLE: f64 = 10.0;
/// How far the frontier moves right over one loop, in capability units.
const FRONTIER_DRIFT: f64 = 0.08;

/// Provider name, capability, openness.
const MODELS: [(&str, f64, f64, Rgba); 6] = [
    ("GPT-4", 0.88, 0.18, palette::CORAL),
    ("Claude", 0.85, 0.22, palette::TEAL),
    ("Gemini", 0.82, 0.15, palette::BLUE),
    ("Llama", 0.78, 0.82, palette::GREEN),
    ("Mistral", 0.60, 0.75, palette::YELLOW),
    ("Phi", 0.38, 0.85, palette::PURPLE),
];

const LINKS: [(usize, usize); 6] = [(0, 1), (1, 2), (3, 4), (4, 5), (0, 3), (2, 3)];

/// Plot area in canvas space; capability runs right, openness runs up.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Plot {
    pub mx: f64,
    pub my: f64,
    pub width: f64,
    pub height: f64,
}

impl Plot {
    pub(crate) fn new(w: f64, h: f64) -> Self {
        let (mx, my) = (w * 0.12, h * 0.14);
        Self {
            mx,
            my,
            width: w - mx * 2.0,
            height: h - my * 2.0,
        }
    }

    pub(crate) fn at(&self, capability: f64, openness: f64) -> Point {
        Point::new(
            self.mx + capability * self.width,
            self.my + (1.0 - openness) * self.height,
        )
    }
}

/// Label alignment for a model: right-aligned near the right edge, left-aligned near the left.
pub(crate) fn label_align(capability: f64) -> TextAlign {
    if capability > 0.75 {
        TextAlign::Right
    } else if capability < 0.4 {
        TextAlign::Left
    } else {
        TextAlign::Center
    }
}

/// The frontier's control points at cycle phase `t`.
pub(crate) fn frontier(plot: &Plot, t: f64) -> [Point; 4] {
    let shift = t * FRONTIER_DRIFT;
    [
        plot.at(0.70 + shift, 0.02),
        plot.at(0.90 + shift, 0.25),
        plot.at(0.88 + shift, 0.60),
        plot.at(0.72 + shift, 0.92),
    ]
}

pub struct LlmLandscape;

impl Diagram for LlmLandscape {
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

        let t = cycle_phase(time, CYCLE);
        let plot = Plot::new(w, h);
        let origin = Point::new(plot.mx, plot.my + plot.height);
        let axis = palette::WHITE.with_alpha(0.15);
        draw_line(ctx, origin, Point::new(plot.mx + plot.width, origin.y), axis, 1.0, &[]);
        draw_line(ctx, origin, Point::new(plot.mx, plot.my), axis, 1.0, &[]);

        draw_label(
            ctx,
            "capability \u{2192}",
            Point::new(plot.mx + plot.width / 2.0, origin.y + 22.0),
            LabelStyle::new(palette::WHITE.with_alpha(0.4), 9.0, TextAlign::Center),
        );
        ctx.save();
        ctx.translate(Vec2::new(plot.mx - 22.0, plot.my + plot.height / 2.0));
        ctx.rotate(-FRAC_PI_2);
        ctx.set_fill_style(palette::WHITE.with_alpha(0.4));
        ctx.set_font(Font::px(9.0));
        ctx.set_text_align(TextAlign::Center);
        ctx.fill_text("openness \u{2192}", Point::ORIGIN);
        ctx.restore();

        let zone = |align| LabelStyle::new(palette::WHITE.with_alpha(0.2), 8.0, align);
        draw_label(ctx, "closed / proprietary", plot.at(0.85, 0.05), zone(TextAlign::Right));
        draw_label(ctx, "open-weight", plot.at(0.5, 0.95), zone(TextAlign::Center));

        for (a, b) in LINKS {
            let pa = plot.at(MODELS[a].1, MODELS[a].2);
            let pb = plot.at(MODELS[b].1, MODELS[b].2);
            let mid_y = (pa.y + pb.y) / 2.0;
            let link = Curve::Cubic(
                pa,
                Point::new(pa.x + (pb.x - pa.x) * 0.3, mid_y - 8.0),
                Point::new(pa.x + (pb.x - pa.x) * 0.7, mid_y + 8.0),
                pb,
            );
            draw_curve(ctx, &link, 30, palette::WHITE.with_alpha(0.06), 1.0, 0.0);
        }

        let [f0, f1, f2, f3] = frontier(&plot, t);
        let edge = Curve::Cubic(f0, f1, f2, f3);
        draw_curve(ctx, &edge, 60, palette::WHITE.with_alpha(0.06), 3.0, 6.0);
        ctx.save();
        ctx.set_line_dash(&[6.0, 6.0]);
        ctx.set_stroke_style(palette::WHITE.with_alpha(0.25));
        ctx.set_line_width(1.5);
        ctx.set_line_cap(LineCap::Round);
        ctx.begin_path();
        for pt in edge.sample(60) {
            ctx.line_to(pt);
        }
        ctx.stroke();
        ctx.restore();

        let tag = cubic_pt(f0, f1, f2, f3, 0.15);
        draw_label(
            ctx,
            "frontier",
            Point::new(tag.x + 16.0, tag.y),
            LabelStyle::new(palette::WHITE.with_alpha(0.35), 9.0, TextAlign::Left),
        );

        for (m, &(name, capability, openness, color)) in MODELS.iter().enumerate() {
            let pt = plot.at(capability, openness);
            let pulse = 0.7 + 0.3 * (time * 1.5 + m as f64 * 1.2).sin();
            let radius = 5.0 + pulse * 2.0;
            let glow = 8.0 + pulse * 8.0;
            draw_dot(ctx, pt, radius + 3.0, color.with_alpha(0.12), glow);
            draw_dot(ctx, pt, radius, color.with_alpha(0.7), glow * 0.5);
            draw_dot(ctx, pt, 2.5, palette::PURE_WHITE.with_alpha(0.6), 0.0);

            let align = label_align(capability);
            let x = match align {
                TextAlign::Right => pt.x - 4.0,
                TextAlign::Left => pt.x + 4.0,
                TextAlign::Center => pt.x,
            };
            draw_label(
                ctx,
                name,
                Point::new(x, pt.y - radius - 10.0),
                LabelStyle::new(color.with_alpha(0.8), 10.0, align),
            );
        }

        draw_label(
            ctx,
            "llm landscape",
            Point::new(plot.mx + 4.0, plot.my * 0.45),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/llm_landscape.rs"]
mod tests;
