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
fn round_trip_runs_out_wait_back() {
    assert_eq!(legs(0.0), (0.0, 0.0, 0.0));
    assert_eq!(legs(OUT_END), (1.0, 0.0, 0.0));
    assert_eq!(legs(WAIT_END), (1.0, 1.0, 0.0));
    assert_eq!(legs(0.95), (1.0, 1.0, 1.0));
}

#[test]
fn latency_ticks_then_holds_then_resets() {
    assert_eq!(latency_ms(0.0), 0);
    let outbound = latency_ms(0.1);
    assert!(outbound > 0 && outbound < 890);
    let waiting = latency_ms(0.425);
    assert!((890..1240).contains(&waiting));
    assert_eq!(latency_ms(0.6), 1240);
    assert_eq!(latency_ms(0.9), 0);
}

#[test]
fn a_call_costs_under_half_a_cent() {
    assert!((call_cost() - 0.0045).abs() < 1e-12);
}

#[test]
fn outbound_frame_shows_only_the_prompt() {
    let mut ctx = Context2d::new();
    ApiLayer.draw(&mut ctx, 720.0, 405.0, 0.3 * CYCLE);
    let labels = texts(&ctx);
    assert!(labels.iter().any(|t| t == "prompt: 500 tokens"));
    assert!(!labels.iter().any(|t| t.starts_with("completion")));
    assert!(labels.iter().any(|t| t == "= $... per call"));
}

#[test]
fn idle_frame_shows_the_computed_cost() {
    let mut ctx = Context2d::new();
    ApiLayer.draw(&mut ctx, 720.0, 405.0, 0.95 * CYCLE);
    let labels = texts(&ctx);
    assert!(labels.iter().any(|t| t == "= $0.0045 per call"));
    assert!(labels.iter().any(|t| t == "latency: 0ms"));
    assert!(labels.iter().any(|t| t == "completion: 200 tokens"));
    assert!(labels.iter().any(|t| t == "cost = (input x $0.003 + output x $0.015) / 1000"));
}
