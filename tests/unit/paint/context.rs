use super::*;
use crate::paint::color::palette;
use kurbo::Shape as _;

#[test]
fn save_restore_round_trips_state() {
    let mut ctx = Context2d::new();
    let before = ctx.state().clone();
    ctx.save();
    ctx.set_stroke_style(palette::CORAL);
    ctx.set_line_width(4.0);
    ctx.set_line_dash(&[4.0, 4.0]);
    ctx.set_shadow(palette::TEAL, 12.0);
    ctx.set_font(Font::px(14.0));
    ctx.set_text_align(TextAlign::Right);
    assert_ne!(ctx.state(), &before);
    ctx.restore();
    assert_eq!(ctx.state(), &before);
    assert_eq!(ctx.save_depth(), 0);
}

#[test]
fn unbalanced_restore_is_ignored() {
    let mut ctx = Context2d::new();
    ctx.set_line_width(3.0);
    ctx.restore();
    assert_eq!(ctx.state().line_width, 3.0);
}

#[test]
fn scale_compounds_and_reset_clears() {
    let mut ctx = Context2d::new();
    ctx.scale(2.0, 2.0);
    ctx.scale(2.0, 2.0);
    assert_eq!(ctx.transform(), Affine::scale(4.0));

    ctx.set_fill_style(palette::WHITE);
    ctx.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    assert_eq!(ctx.display_list().len(), 1);

    ctx.reset();
    assert_eq!(ctx.transform(), Affine::IDENTITY);
    assert!(ctx.display_list().is_empty());
    assert_eq!(ctx.state(), &DrawState::default());
}

#[test]
fn ops_capture_resolved_state() {
    let mut ctx = Context2d::new();
    ctx.scale(2.0, 2.0);
    ctx.set_stroke_style(palette::TEAL);
    ctx.set_line_width(3.0);
    ctx.set_line_cap(LineCap::Round);
    ctx.set_shadow(palette::TEAL, 8.0);
    ctx.begin_path();
    ctx.move_to(Point::new(0.0, 0.0));
    ctx.line_to(Point::new(10.0, 0.0));
    ctx.stroke();

    let [DrawOp::Stroke {
        transform,
        paint,
        style,
        shadow,
        ..
    }] = ctx.display_list().ops()
    else {
        panic!("expected one stroke op");
    };
    assert_eq!(*transform, Affine::scale(2.0));
    assert_eq!(*paint, palette::TEAL);
    assert_eq!(style.width, 3.0);
    assert_eq!(style.cap, LineCap::Round);
    assert_eq!(
        *shadow,
        Some(Shadow {
            color: palette::TEAL,
            blur: 8.0
        })
    );
}

#[test]
fn transparent_paint_and_empty_paths_record_nothing() {
    let mut ctx = Context2d::new();
    ctx.stroke();
    ctx.fill();
    ctx.set_fill_style(palette::WHITE.with_alpha(0.0));
    ctx.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    ctx.fill_text("hidden", Point::ZERO);
    assert!(ctx.display_list().is_empty());
}

#[test]
fn shadow_requires_blur_and_visible_color() {
    let mut ctx = Context2d::new();
    ctx.set_fill_style(palette::WHITE);
    ctx.set_shadow(palette::WHITE, 0.0);
    ctx.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    ctx.set_shadow(palette::WHITE.with_alpha(0.0), 10.0);
    ctx.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    assert!(ctx.display_list().ops().iter().all(|op| op.shadow().is_none()));
}

#[test]
fn odd_dash_patterns_are_doubled_and_invalid_ones_ignored() {
    let mut ctx = Context2d::new();
    ctx.set_line_dash(&[2.0, 6.0, 1.0]);
    assert_eq!(ctx.state().line_dash, vec![2.0, 6.0, 1.0, 2.0, 6.0, 1.0]);
    ctx.set_line_dash(&[-1.0, 2.0]);
    assert_eq!(ctx.state().line_dash.len(), 6);
    ctx.set_line_dash(&[]);
    assert!(ctx.state().line_dash.is_empty());
}

#[test]
fn arc_builds_a_closed_circle_outline() {
    let mut ctx = Context2d::new();
    ctx.begin_path();
    ctx.arc(Point::new(10.0, 10.0), 5.0, 0.0, std::f64::consts::TAU);
    let bbox = ctx.current_path().bounding_box();
    assert!((bbox.x0 - 5.0).abs() < 0.06);
    assert!((bbox.x1 - 15.0).abs() < 0.06);
    assert!((bbox.y0 - 5.0).abs() < 0.06);
    assert!((bbox.y1 - 15.0).abs() < 0.06);
}

#[test]
fn measure_text_uses_monospace_advance() {
    let mut ctx = Context2d::new();
    ctx.set_font(Font::px(10.0));
    assert!((ctx.measure_text("tokens") - 36.0).abs() < 1e-9);
    assert_eq!(ctx.measure_text(""), 0.0);
}

#[test]
fn clear_color_survives_reset_and_restore() {
    let mut ctx = Context2d::new();
    assert_eq!(ctx.clear_color(), palette::BG);

    ctx.set_clear_color(palette::PURE_WHITE);
    ctx.save();
    ctx.restore();
    ctx.set_line_width(5.0);
    ctx.reset();
    assert_eq!(ctx.clear_color(), palette::PURE_WHITE);
    assert_eq!(ctx.state().line_width, 1.0);
}

#[test]
fn rotation_applies_after_translation() {
    let mut ctx = Context2d::new();
    ctx.translate(Vec2::new(10.0, 20.0));
    ctx.rotate(-std::f64::consts::FRAC_PI_2);
    let p = ctx.transform() * Point::new(5.0, 0.0);
    assert!((p.x - 10.0).abs() < 1e-9 && (p.y - 15.0).abs() < 1e-9);

    ctx.set_fill_style(palette::WHITE);
    ctx.fill_text("up", Point::ORIGIN);
    let [DrawOp::Text { transform, .. }] = ctx.display_list().ops() else {
        panic!("expected one text op");
    };
    assert_eq!(*transform, ctx.transform());
}
