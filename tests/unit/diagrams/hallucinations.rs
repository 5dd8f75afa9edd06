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
fn drawing_completes_halfway_through_the_loop() {
    assert_eq!(progress_at(0.0), 0.0);
    assert!((progress_at(2.0) - 0.5).abs() < 1e-12);
    assert_eq!(progress_at(4.0), 1.0);
    assert_eq!(progress_at(6.5), 1.0);
    assert_eq!(global_alpha(6.0), 1.0);
    assert!((global_alpha(7.5) - 0.5).abs() < 1e-12);
}

#[test]
fn confidence_stays_high_whatever_the_truth() {
    for i in 0..200 {
        let c = confidence(i as f64 * 0.05);
        assert!((0.89..=0.97).contains(&c), "{c}");
    }
}

#[test]
fn divergence_is_only_marked_once_the_curves_split() {
    let mut early = Context2d::new();
    Hallucinations.draw(&mut early, 720.0, 405.0, 1.0);
    let labels = texts(&early);
    assert!(!labels.iter().any(|t| t == "hallucination begins"));
    assert!(!labels.iter().any(|t| t == "truth"));

    let mut done = Context2d::new();
    Hallucinations.draw(&mut done, 720.0, 405.0, 5.0);
    let labels = texts(&done);
    for tag in ["hallucination begins", "truth", "model output", "P(correct) \u{2260} P(confident)"] {
        assert!(labels.iter().any(|t| t == tag), "missing {tag}");
    }
    assert!(labels.iter().any(|t| t.starts_with("confidence: ")));
}

#[test]
fn confidence_bar_turns_coral_past_the_split() {
    let coral_fills = |time: f64| {
        let mut ctx = Context2d::new();
        Hallucinations.draw(&mut ctx, 720.0, 405.0, time);
        ctx.display_list()
            .ops()
            .iter()
            .filter(|op| {
                matches!(op, DrawOp::Fill { paint, .. }
                    if paint.r == palette::CORAL.r && paint.g == palette::CORAL.g && paint.b == palette::CORAL.b)
            })
            .count()
    };
    // Early on the bar is all green and there is no gap band.
    assert_eq!(coral_fills(1.0), 0);
    // Gap band plus the coral half of the bar.
    assert_eq!(coral_fills(5.0), 2);
}
