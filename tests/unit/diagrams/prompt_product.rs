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
fn phases_partition_the_loop() {
    assert_eq!(Phase::at(0.0), Phase::Wild(0.0));
    assert_eq!(Phase::at(4.5), Phase::Transition(0.5));
    assert!(matches!(Phase::at(7.0), Phase::Constrained(_)));
    assert!(matches!(Phase::at(9.5), Phase::Fade(_)));
    assert_eq!(CYCLE, 10.0);
}

#[test]
fn constraint_ramps_in_during_the_transition() {
    assert_eq!(Phase::Wild(0.9).constrain(), 0.0);
    assert_eq!(Phase::Transition(0.5).constrain(), 0.5);
    assert_eq!(Phase::Constrained(0.1).constrain(), 1.0);
    assert_eq!(Phase::Fade(0.5).constrain(), 1.0);
    assert_eq!(Phase::Fade(0.5).global_alpha(), 0.5);
    assert_eq!(Phase::Transition(0.2).draw_progress(), 1.0);
}

#[test]
fn constrained_output_stays_between_the_rails() {
    let (upper, lower) = (80.0, 120.0);
    for i in 0..100 {
        let wild = wild_y(i as f64 / 100.0, 400.0, 100.0);
        assert_eq!(constrained_y(wild, upper, lower, 0.0), wild);
        let y = constrained_y(wild, upper, lower, 1.0);
        assert!((upper..=lower).contains(&y), "{wild} -> {y}");
    }
}

#[test]
fn guardrails_and_prompt_only_appear_once_constrained() {
    let mut wild = Context2d::new();
    PromptProduct.draw(&mut wild, 720.0, 405.0, 2.0);
    let labels = texts(&wild);
    assert!(labels.iter().any(|t| t == "raw output (no system prompt)"));
    assert!(!labels.iter().any(|t| PROMPT.contains(&t.as_str())));

    let mut tame = Context2d::new();
    PromptProduct.draw(&mut tame, 720.0, 405.0, 8.0);
    let labels = texts(&tame);
    for tag in PROMPT.iter().copied().chain(["output = f(prompt, input)", "prompt is the dominant variable"]) {
        assert!(labels.iter().any(|t| t == tag), "missing {tag}");
    }
}
