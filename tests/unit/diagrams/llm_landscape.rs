use super::*;
use crate::foundation::core::Affine;
use crate::paint::context::DrawOp;

#[test]
fn openness_runs_up_the_plot() {
    let plot = Plot::new(1000.0, 500.0);
    assert!(plot.at(0.0, 0.0).distance(Point::new(120.0, 430.0)) < 1e-9);
    assert!(plot.at(1.0, 1.0).distance(Point::new(880.0, 70.0)) < 1e-9);
}

#[test]
fn labels_hug_the_inside_of_the_plot() {
    assert_eq!(label_align(0.88), TextAlign::Right);
    assert_eq!(label_align(0.60), TextAlign::Center);
    assert_eq!(label_align(0.38), TextAlign::Left);
}

#[test]
fn frontier_drifts_toward_capability() {
    let plot = Plot::new(1000.0, 500.0);
    let start = frontier(&plot, 0.0);
    let half = frontier(&plot, 0.5);
    for (a, b) in start.iter().zip(half.iter()) {
        assert!((b.x - a.x - 0.04 * plot.width).abs() < 1e-9);
        assert_eq!(a.y, b.y);
    }
}

#[test]
fn every_provider_is_named_and_the_y_axis_is_rotated() {
    let mut ctx = Context2d::new();
    LlmLandscape.draw(&mut ctx, 720.0, 405.0, 1.0);
    let mut names = Vec::new();
    let mut rotated = None;
    for op in ctx.display_list().ops() {
        if let DrawOp::Text { text, transform, .. } = op {
            if text.starts_with("openness") {
                rotated = Some(*transform);
            } else {
                names.push(text.as_str());
            }
        }
    }
    for (name, ..) in MODELS {
        assert!(names.contains(&name), "missing {name}");
    }
    let rotated = rotated.unwrap();
    assert_ne!(rotated, Affine::IDENTITY);
    // Text baseline direction points up the screen.
    let dir = rotated * Point::new(1.0, 0.0) - rotated * Point::ORIGIN;
    assert!(dir.x.abs() < 1e-9 && dir.y < 0.0);
    assert_eq!(ctx.transform(), Affine::IDENTITY);
}
