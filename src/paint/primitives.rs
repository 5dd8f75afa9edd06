//! Drawing primitives shared by every diagram.
//!
//! Each primitive saves the context state on entry and restores it before returning, so colors,
//! widths, dashes and glows never leak into later draws.

use crate::curve::eval::de_casteljau;
use crate::curve::shape::Curve;
use crate::foundation::core::{Point, Rect};
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, Font, LineCap, TextAlign};
use std::f64::consts::TAU;

/// Style for [`draw_label`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub color: Rgba,
    pub font: Font,
    pub align: TextAlign,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            color: palette::TEXT,
            font: Font::px(11.0),
            align: TextAlign::Center,
        }
    }
}

impl LabelStyle {
    pub fn new(color: Rgba, size_px: f64, align: TextAlign) -> Self {
        Self {
            color,
            font: Font::px(size_px),
            align,
        }
    }
}

/// Opaque full-frame fill with the context's clear color.
pub fn clear(ctx: &mut Context2d, w: f64, h: f64) {
    ctx.save();
    let color = ctx.clear_color().with_alpha(1.0);
    ctx.set_fill_style(color);
    ctx.fill_rect(Rect::new(0.0, 0.0, w, h));
    ctx.restore();
}

/// Faint grid lines every `spacing` logical pixels, excluding the edges.
pub fn draw_grid(ctx: &mut Context2d, w: f64, h: f64, spacing: f64) {
    if !(spacing.is_finite() && spacing > 0.0) {
        return;
    }
    ctx.save();
    ctx.set_stroke_style(palette::GRID_LINE);
    ctx.set_line_width(1.0);
    let mut x = spacing;
    while x < w {
        ctx.begin_path();
        ctx.move_to(Point::new(x, 0.0));
        ctx.line_to(Point::new(x, h));
        ctx.stroke();
        x += spacing;
    }
    let mut y = spacing;
    while y < h {
        ctx.begin_path();
        ctx.move_to(Point::new(0.0, y));
        ctx.line_to(Point::new(w, y));
        ctx.stroke();
        y += spacing;
    }
    ctx.restore();
}

/// Stroke `curve` sampled at `steps + 1` uniform parameter values, with round caps.
///
/// `glow > 0` adds a blurred shadow in the stroke color.
pub fn draw_curve(
    ctx: &mut Context2d,
    curve: &Curve,
    steps: usize,
    color: Rgba,
    width: f64,
    glow: f64,
) {
    ctx.save();
    if glow > 0.0 {
        ctx.set_shadow(color, glow);
    }
    ctx.set_stroke_style(color);
    ctx.set_line_width(width);
    ctx.set_line_cap(LineCap::Round);
    ctx.begin_path();
    for pt in curve.sample(steps) {
        ctx.line_to(pt);
    }
    ctx.stroke();
    ctx.restore();
}

/// Stroke `curve` from its start up to parameter `upto`, sampled on the same `steps` grid as
/// [`draw_curve`] with the final sample clamped to `upto`. Nothing is drawn for `upto <= 0`.
pub fn draw_partial_curve(
    ctx: &mut Context2d,
    curve: &Curve,
    steps: usize,
    upto: f64,
    color: Rgba,
    width: f64,
    glow: f64,
) {
    if !(upto.is_finite() && upto > 0.0) || steps == 0 {
        return;
    }
    let upto = upto.min(1.0);
    let last = (steps as f64 * upto).ceil() as usize;
    ctx.save();
    if glow > 0.0 {
        ctx.set_shadow(color, glow);
    }
    ctx.set_stroke_style(color);
    ctx.set_line_width(width);
    ctx.set_line_cap(LineCap::Round);
    ctx.begin_path();
    for i in 0..=last {
        ctx.line_to(curve.eval((i as f64 / steps as f64).min(upto)));
    }
    ctx.stroke();
    ctx.restore();
}

/// Filled circle, optionally glowing.
pub fn draw_dot(ctx: &mut Context2d, pt: Point, radius: f64, color: Rgba, glow: f64) {
    ctx.save();
    if glow > 0.0 {
        ctx.set_shadow(color, glow);
    }
    ctx.set_fill_style(color);
    ctx.begin_path();
    ctx.arc(pt, radius, 0.0, TAU);
    ctx.fill();
    ctx.restore();
}

/// Circle outline.
pub fn draw_ring(ctx: &mut Context2d, pt: Point, radius: f64, color: Rgba, width: f64) {
    ctx.save();
    ctx.set_stroke_style(color);
    ctx.set_line_width(width);
    ctx.begin_path();
    ctx.arc(pt, radius, 0.0, TAU);
    ctx.stroke();
    ctx.restore();
}

/// Straight segment; an empty `dash` draws it solid.
pub fn draw_line(ctx: &mut Context2d, a: Point, b: Point, color: Rgba, width: f64, dash: &[f64]) {
    ctx.save();
    ctx.set_stroke_style(color);
    ctx.set_line_width(width);
    if !dash.is_empty() {
        ctx.set_line_dash(dash);
    }
    ctx.begin_path();
    ctx.move_to(a);
    ctx.line_to(b);
    ctx.stroke();
    ctx.restore();
}

/// Text vertically centered on `pt`.
pub fn draw_label(ctx: &mut Context2d, text: &str, pt: Point, style: LabelStyle) {
    ctx.save();
    ctx.set_fill_style(style.color);
    ctx.set_font(style.font);
    ctx.set_text_align(style.align);
    ctx.fill_text(text, pt);
    ctx.restore();
}

/// De Casteljau construction of the cubic `p0..p3` at `t`: dimmed level-1 legs and points,
/// brighter level-2 leg and points, and a glowing point on the curve.
pub fn draw_construction_lines(
    ctx: &mut Context2d,
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    t: f64,
    color: Rgba,
) {
    let dc = de_casteljau(p0, p1, p2, p3, t);
    let dim = color.with_alpha(0.25);
    let mid = color.with_alpha(0.5);

    draw_line(ctx, dc.l1[0], dc.l1[1], dim, 1.0, &[]);
    draw_line(ctx, dc.l1[1], dc.l1[2], dim, 1.0, &[]);
    draw_line(ctx, dc.l2[0], dc.l2[1], mid, 1.0, &[]);
    for p in dc.l1 {
        draw_dot(ctx, p, 3.0, dim, 0.0);
    }
    for p in dc.l2 {
        draw_dot(ctx, p, 3.0, mid, 0.0);
    }
    draw_dot(ctx, dc.pt, 5.0, color, 10.0);
}

/// Dashed control polygon with solid endpoints and hollow interior control points.
pub fn draw_control_points(ctx: &mut Context2d, points: &[Point], color: Rgba) {
    let dim = color.with_alpha(0.3);
    for pair in points.windows(2) {
        draw_line(ctx, pair[0], pair[1], dim, 1.0, &[4.0, 4.0]);
    }
    let last = points.len().saturating_sub(1);
    for (i, p) in points.iter().enumerate() {
        if i == 0 || i == last {
            draw_dot(ctx, *p, 4.0, color, 0.0);
        } else {
            draw_ring(ctx, *p, 4.0, color, 1.5);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/primitives.rs"]
mod tests;
