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
fn paths_draw_in_order_of_effort() {
    assert_eq!(path_progress(0.0), [0.0, 0.0, 0.0]);
    assert_eq!(path_progress(0.25)[0], 1.0);
    assert_eq!(path_progress(0.25)[1], 0.0);
    let [a, b, c] = path_progress(0.4);
    assert!(a == 1.0 && b > 0.0 && b < 1.0 && c == 0.0);
    assert_eq!(path_progress(0.9), [1.0, 1.0, 1.0]);
}

#[test]
fn rag_reaches_retrieval_before_the_answer() {
    assert_eq!(rag_halves(0.0), (0.0, 0.0));
    assert_eq!(rag_halves(0.25), (0.5, 0.0));
    assert_eq!(rag_halves(0.5), (1.0, 0.0));
    assert_eq!(rag_halves(0.75), (1.0, 0.5));
    assert_eq!(rag_halves(1.0), (1.0, 1.0));
}

#[test]
fn captions_appear_as_each_path_lands() {
    let mut ctx = Context2d::new();
    CustomizeLlm.draw(&mut ctx, 720.0, 405.0, 0.4 * CYCLE);
    let labels = texts(&ctx);
    assert!(labels.iter().any(|t| t == "PROMPTING"));
    assert!(labels.iter().any(|t| t == "minutes / $0"));
    assert!(!labels.iter().any(|t| t == "FINE-TUNING"));
    assert!(!labels.iter().any(|t| t == "effort"));
}

#[test]
fn effort_scale_closes_the_loop() {
    let mut ctx = Context2d::new();
    CustomizeLlm.draw(&mut ctx, 720.0, 405.0, 0.97 * CYCLE);
    let labels = texts(&ctx);
    for expected in ["PROMPTING", "RAG", "FINE-TUNING", "retrieval", "low", "high", "effort"] {
        assert!(labels.iter().any(|t| t == expected), "missing {expected}");
    }
}
