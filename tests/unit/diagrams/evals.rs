use super::*;
use crate::paint::context::DrawOp;

fn texts(ctx: &Context2d) -> Vec<String> {
    ctx.display_list()
        .ops()
        .iter()
        .filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn seeded_noise_is_repeatable_and_in_range() {
    for i in 0..500 {
        let r = seeded_rand(i as f64);
        assert!((0.0..1.0).contains(&r));
        assert_eq!(r, seeded_rand(i as f64));
    }
}

#[test]
fn variant_b_scores_higher_with_tighter_spread() {
    let evals = Evals::new();
    assert_eq!(evals.a.scores.len(), NUM_POINTS);
    assert!(evals.a.scores.iter().all(|s| (0.45..=0.95).contains(s)));
    assert!(evals.b.scores.iter().all(|s| (0.55..=0.98).contains(s)));
    assert!(evals.b.mean > evals.a.mean);
    assert!((evals.a.mean - 0.72).abs() < 0.05);
    assert!((evals.b.mean - 0.81).abs() < 0.05);
    assert!(evals.a.std_dev > 0.0 && evals.a.std_dev < 0.1);
}

#[test]
fn running_mean_covers_at_least_one_sample() {
    let v = Variant::new(vec![0.5, 0.7, 0.9], palette::TEAL);
    assert_eq!(v.running_mean(0), 0.5);
    assert!((v.running_mean(2) - 0.6).abs() < 1e-12);
    assert!((v.running_mean(99) - 0.7).abs() < 1e-12);
    assert!((v.std_dev - (0.08f64 / 3.0).sqrt()).abs() < 1e-12);
}

#[test]
fn p_value_shrinks_then_settles() {
    assert_eq!(p_value_label(0.5), "p = 0.09...");
    assert_eq!(p_value_label(0.8), "p < 0.05");
    assert_eq!(p_value_label(1.0), "p < 0.05");
}

#[test]
fn verdict_only_after_the_statistics_land() {
    let evals = Evals::new();
    let mut drawing = Context2d::new();
    evals.draw(&mut drawing, 720.0, 405.0, 3.0);
    let labels = texts(&drawing);
    assert!(labels.iter().any(|t| t == "Prompt A"));
    assert!(!labels.iter().any(|t| t.starts_with("A: ")));
    assert!(!labels.iter().any(|t| t == "Prompt B wins"));

    let mut settled = Context2d::new();
    evals.draw(&mut settled, 720.0, 405.0, 8.5);
    let labels = texts(&settled);
    for tag in ["p < 0.05", "Prompt B wins"] {
        assert!(labels.iter().any(|t| t == tag), "missing {tag}");
    }
    assert!(labels.iter().any(|t| t.starts_with("A: ")));
    assert!(labels.iter().any(|t| t.starts_with("\u{0394} = B_mean - A_mean = +")));
}
