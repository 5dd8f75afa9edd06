use super::*;
use crate::curve::eval::cubic_pt;
use crate::paint::context::DrawOp;
use kurbo::{PathEl, Shape as _};

fn styled_ctx() -> Context2d {
    let mut ctx = Context2d::new();
    ctx.set_stroke_style(palette::PURPLE);
    ctx.set_fill_style(palette::GREEN);
    ctx.set_line_width(7.0);
    ctx.set_line_dash(&[1.0, 2.0]);
    ctx.set_font(Font::px(30.0));
    ctx
}

fn assert_restores(draw: impl FnOnce(&mut Context2d)) {
    let mut ctx = styled_ctx();
    let before = ctx.state().clone();
    draw(&mut ctx);
    assert_eq!(ctx.state(), &before);
    assert_eq!(ctx.save_depth(), 0);
    assert!(!ctx.display_list().is_empty());
}

#[test]
fn every_primitive_restores_context_state() {
    let a = Point::new(10.0, 10.0);
    let b = Point::new(90.0, 40.0);
    let cubic = Curve::Cubic(a, Point::new(30.0, 80.0), Point::new(60.0, 0.0), b);

    assert_restores(|ctx| clear(ctx, 100.0, 50.0));
    assert_restores(|ctx| draw_grid(ctx, 100.0, 50.0, 40.0));
    assert_restores(|ctx| draw_curve(ctx, &cubic, 20, palette::TEAL, 2.0, 12.0));
    assert_restores(|ctx| draw_dot(ctx, a, 4.0, palette::CORAL, 10.0));
    assert_restores(|ctx| draw_ring(ctx, a, 4.0, palette::CORAL, 1.5));
    assert_restores(|ctx| draw_line(ctx, a, b, palette::WHITE, 1.0, &[4.0, 4.0]));
    assert_restores(|ctx| draw_label(ctx, "THINK", a, LabelStyle::default()));
    assert_restores(|ctx| {
        draw_construction_lines(ctx, a, Point::new(30.0, 80.0), Point::new(60.0, 0.0), b, 0.4, palette::YELLOW)
    });
    assert_restores(|ctx| draw_control_points(ctx, &[a, Point::new(50.0, 0.0), b], palette::BLUE));
}

#[test]
fn clear_is_an_opaque_full_frame_fill() {
    let mut ctx = Context2d::new();
    clear(&mut ctx, 64.0, 32.0);
    let [DrawOp::Fill { path, paint, .. }] = ctx.display_list().ops() else {
        panic!("expected a single fill");
    };
    assert_eq!(*paint, palette::BG);
    assert_eq!(paint.alpha(), 1.0);
    assert_eq!(path.bounding_box(), Rect::new(0.0, 0.0, 64.0, 32.0));
}

#[test]
fn grid_skips_edges() {
    let mut ctx = Context2d::new();
    draw_grid(&mut ctx, 100.0, 50.0, 40.0);
    // x = 40, 80 and y = 40.
    assert_eq!(ctx.display_list().len(), 3);

    let mut ctx = Context2d::new();
    draw_grid(&mut ctx, 100.0, 50.0, 0.0);
    assert!(ctx.display_list().is_empty());
}

#[test]
fn curve_is_sampled_uniformly_with_optional_glow() {
    let p0 = Point::new(0.0, 0.0);
    let p1 = Point::new(10.0, 30.0);
    let p2 = Point::new(40.0, -10.0);
    let p3 = Point::new(50.0, 0.0);
    let mut ctx = Context2d::new();
    draw_curve(&mut ctx, &Curve::Cubic(p0, p1, p2, p3), 10, palette::TEAL, 2.0, 0.0);
    draw_curve(&mut ctx, &Curve::Linear(p0, p3), 4, palette::TEAL, 2.0, 6.0);

    let ops = ctx.display_list().ops();
    let DrawOp::Stroke {
        path, style, shadow, ..
    } = &ops[0]
    else {
        panic!("expected stroke");
    };
    let els = path.elements();
    assert_eq!(els.len(), 11);
    assert_eq!(els[0], PathEl::MoveTo(p0));
    assert_eq!(els[5], PathEl::LineTo(cubic_pt(p0, p1, p2, p3, 0.5)));
    assert_eq!(style.cap, LineCap::Round);
    assert!(shadow.is_none());

    let DrawOp::Stroke { path, shadow, .. } = &ops[1] else {
        panic!("expected stroke");
    };
    assert_eq!(path.elements().len(), 5);
    assert_eq!(shadow.map(|s| s.blur), Some(6.0));
}

#[test]
fn line_dash_is_scoped_to_the_call() {
    let mut ctx = Context2d::new();
    let a = Point::new(0.0, 0.0);
    let b = Point::new(10.0, 0.0);
    draw_line(&mut ctx, a, b, palette::WHITE, 1.0, &[2.0, 6.0]);
    draw_line(&mut ctx, a, b, palette::WHITE, 1.0, &[]);
    let dashes: Vec<_> = ctx
        .display_list()
        .ops()
        .iter()
        .map(|op| match op {
            DrawOp::Stroke { style, .. } => style.dash.clone(),
            _ => panic!("expected strokes"),
        })
        .collect();
    assert_eq!(dashes, vec![vec![2.0, 6.0], vec![]]);
}

#[test]
fn construction_lines_use_fixed_relative_opacities() {
    let p0 = Point::new(0.0, 100.0);
    let p1 = Point::new(20.0, 0.0);
    let p2 = Point::new(80.0, 0.0);
    let p3 = Point::new(100.0, 100.0);
    let mut ctx = Context2d::new();
    draw_construction_lines(&mut ctx, p0, p1, p2, p3, 0.3, palette::CORAL);

    let ops = ctx.display_list().ops();
    assert_eq!(ops.len(), 9);
    let alphas: Vec<f64> = ops.iter().map(|op| op.paint().a).collect();
    assert_eq!(alphas, vec![0.25, 0.25, 0.5, 0.25, 0.25, 0.25, 0.5, 0.5, 1.0]);

    let last = ops.last().unwrap();
    assert_eq!(last.shadow().map(|s| s.blur), Some(10.0));
    let DrawOp::Fill { path, .. } = last else {
        panic!("expected final dot fill");
    };
    let center = path.bounding_box().center();
    assert!(center.distance(cubic_pt(p0, p1, p2, p3, 0.3)) < 0.1);
}

#[test]
fn control_points_mark_endpoints_solid_and_handles_hollow() {
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(20.0, 10.0),
        Point::new(30.0, 0.0),
    ];
    let mut ctx = Context2d::new();
    draw_control_points(&mut ctx, &pts, palette::BLUE);
    let ops = ctx.display_list().ops();
    assert_eq!(ops.len(), 3 + 4);
    assert!(ops[..3].iter().all(|op| matches!(op, DrawOp::Stroke { style, .. } if style.dash == vec![4.0, 4.0])));
    assert!(matches!(ops[3], DrawOp::Fill { .. }));
    assert!(matches!(ops[4], DrawOp::Stroke { .. }));
    assert!(matches!(ops[5], DrawOp::Stroke { .. }));
    assert!(matches!(ops[6], DrawOp::Fill { .. }));
}

#[test]
fn clear_paints_the_configured_clear_color_opaquely() {
    let mut ctx = Context2d::new();
    ctx.set_clear_color(Rgba::rgba(255, 255, 255, 0.4));
    clear(&mut ctx, 10.0, 10.0);
    let [DrawOp::Fill { paint, .. }] = ctx.display_list().ops() else {
        panic!("expected a single fill");
    };
    assert_eq!(*paint, Rgba::rgb(255, 255, 255));
}

#[test]
fn partial_curve_stops_at_the_requested_parameter() {
    let curve = Curve::Linear(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
    let mut ctx = Context2d::new();
    draw_partial_curve(&mut ctx, &curve, 10, 0.35, palette::TEAL, 2.0, 0.0);
    let [DrawOp::Stroke { path, style, .. }] = ctx.display_list().ops() else {
        panic!("expected one stroke");
    };
    assert_eq!(style.cap, LineCap::Round);
    // Samples 0.0..=0.3 plus the clamped 0.35.
    assert_eq!(path.elements().len(), 5);
    assert!((path.bounding_box().x1 - 35.0).abs() < 1e-9);

    let mut ctx = Context2d::new();
    draw_partial_curve(&mut ctx, &curve, 10, 0.0, palette::TEAL, 2.0, 0.0);
    draw_partial_curve(&mut ctx, &curve, 10, f64::NAN, palette::TEAL, 2.0, 0.0);
    assert!(ctx.display_list().is_empty());

    let mut full = Context2d::new();
    draw_partial_curve(&mut full, &curve, 10, 3.0, palette::TEAL, 2.0, 0.0);
    let mut whole = Context2d::new();
    draw_curve(&mut whole, &curve, 10, palette::TEAL, 2.0, 0.0);
    assert_eq!(full.display_list(), whole.display_list());
}
