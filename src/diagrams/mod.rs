//! Animated diagrams and their registry.
//!
//! A diagram is a pure function of `(width, height, time)`: it holds only constant layout data
//! and derives every per-frame value from the time it is handed, so any frame can be rendered in
//! isolation and a loop can resume from any time.

use crate::animation::driver::{Animation, animate};
use crate::animation::host::{FrameScheduler, Region};
use crate::paint::canvas::CanvasTarget;
use crate::paint::context::Context2d;
use std::cell::RefCell;
use std::rc::Rc;

pub mod agent_loop;
pub mod api_layer;
pub mod context_window;
pub mod customize_llm;
pub mod embeddings;
pub mod evals;
pub mod hallucinations;
pub mod jevons_paradox;
pub mod llm_landscape;
pub mod prompt_product;
pub mod same_input;
pub mod streaming;
pub mod temperature;
pub mod thinking_dial;
pub mod token_prediction;
pub mod tokens_cost;
pub mod training_inference;

/// One animated diagram.
pub trait Diagram {
    /// Stable identifier used on the command line.
    fn slug(&self) -> &'static str;
    fn title(&self) -> &'static str;
    /// Length of one animation cycle in seconds, for diagrams that loop.
    fn cycle_secs(&self) -> Option<f64> {
        None
    }
    /// Draw one frame at `time` seconds into a `width x height` logical area.
    fn draw(&self, ctx: &mut Context2d, width: f64, height: f64, time: f64);
}

/// Registry row.
pub struct DiagramEntry {
    pub slug: &'static str,
    pub title: &'static str,
    /// Article series the diagram belongs to, see [`series_title`].
    pub series: u8,
    /// Article section within the series.
    pub section: &'static str,
    pub build: fn() -> Box<dyn Diagram>,
}

static ENTRIES: &[DiagramEntry] = &[
    DiagramEntry {
        slug: token_prediction::SLUG,
        title: token_prediction::TITLE,
        series: 1,
        section: "Foundations",
        build: || Box::new(token_prediction::TokenPrediction),
    },
    DiagramEntry {
        slug: api_layer::SLUG,
        title: api_layer::TITLE,
        series: 1,
        section: "Foundations",
        build: || Box::new(api_layer::ApiLayer),
    },
    DiagramEntry {
        slug: training_inference::SLUG,
        title: training_inference::TITLE,
        series: 1,
        section: "Foundations",
        build: || Box::new(training_inference::TrainingInference::new()),
    },
    DiagramEntry {
        slug: embeddings::SLUG,
        title: embeddings::TITLE,
        series: 1,
        section: "Foundations",
        build: || Box::new(embeddings::Embeddings),
    },
    DiagramEntry {
        slug: customize_llm::SLUG,
        title: customize_llm::TITLE,
        series: 1,
        section: "Foundations",
        build: || Box::new(customize_llm::CustomizeLlm),
    },
    DiagramEntry {
        slug: llm_landscape::SLUG,
        title: llm_landscape::TITLE,
        series: 1,
        section: "Foundations",
        build: || Box::new(llm_landscape::LlmLandscape),
    },
    DiagramEntry {
        slug: tokens_cost::SLUG,
        title: tokens_cost::TITLE,
        series: 1,
        section: "Core Mechanics",
        build: || Box::new(tokens_cost::TokensCost),
    },
    DiagramEntry {
        slug: hallucinations::SLUG,
        title: hallucinations::TITLE,
        series: 1,
        section: "Core Mechanics",
        build: || Box::new(hallucinations::Hallucinations),
    },
    DiagramEntry {
        slug: prompt_product::SLUG,
        title: prompt_product::TITLE,
        series: 1,
        section: "Core Mechanics",
        build: || Box::new(prompt_product::PromptProduct),
    },
    DiagramEntry {
        slug: same_input::SLUG,
        title: same_input::TITLE,
        series: 1,
        section: "Core Mechanics",
        build: || Box::new(same_input::SameInput),
    },
    DiagramEntry {
        slug: temperature::SLUG,
        title: temperature::TITLE,
        series: 1,
        section: "Core Mechanics",
        build: || Box::new(temperature::Temperature::new()),
    },
    DiagramEntry {
        slug: context_window::SLUG,
        title: context_window::TITLE,
        series: 1,
        section: "Core Mechanics",
        build: || Box::new(context_window::ContextWindow::new()),
    },
    DiagramEntry {
        slug: evals::SLUG,
        title: evals::TITLE,
        series: 1,
        section: "Core Mechanics",
        build: || Box::new(evals::Evals::new()),
    },
    DiagramEntry {
        slug: streaming::SLUG,
        title: streaming::TITLE,
        series: 1,
        section: "UX & Economics",
        build: || Box::new(streaming::Streaming),
    },
    DiagramEntry {
        slug: agent_loop::SLUG,
        title: agent_loop::TITLE,
        series: 2,
        section: "The Architecture",
        build: || Box::new(agent_loop::AgentLoop),
    },
    DiagramEntry {
        slug: thinking_dial::SLUG,
        title: thinking_dial::TITLE,
        series: 2,
        section: "The Architecture",
        build: || Box::new(thinking_dial::ThinkingDial),
    },
    DiagramEntry {
        slug: jevons_paradox::SLUG,
        title: jevons_paradox::TITLE,
        series: 2,
        section: "The Economics",
        build: || Box::new(jevons_paradox::JevonsParadox),
    },
];

/// Display name of an article series.
pub fn series_title(series: u8) -> &'static str {
    match series {
        1 => "LLM Concepts for PMs",
        2 => "Design Patterns of the AI Era",
        _ => "Other",
    }
}

/// All registered diagrams in article order.
pub fn entries() -> &'static [DiagramEntry] {
    ENTRIES
}

pub fn lookup(slug: &str) -> Option<&'static DiagramEntry> {
    ENTRIES.iter().find(|e| e.slug == slug)
}

/// Start `diagram` on `canvas`, sized by `container`.
pub fn spawn(
    diagram: Box<dyn Diagram>,
    canvas: Rc<RefCell<dyn CanvasTarget>>,
    container: Rc<dyn Region>,
    scheduler: Rc<dyn FrameScheduler>,
) -> Animation {
    tracing::debug!(diagram = diagram.slug(), "spawning diagram");
    animate(canvas, container, scheduler, move |ctx, w, h, t| {
        diagram.draw(ctx, w, h, t)
    })
}

/// Position within a repeating cycle, in `[0, 1)`.
pub(crate) fn cycle_phase(time: f64, cycle: f64) -> f64 {
    time.rem_euclid(cycle) / cycle
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/registry.rs"]
mod tests;
