//! Curvecast renders animated Bézier explainer diagrams.
//!
//! Diagrams draw into a recording canvas-2D style [`Context2d`] as pure functions of time. The
//! [`animate`] driver runs them on any host implementing [`FrameScheduler`] and [`Region`]; for
//! offline output a [`RenderSession`] drives one diagram on an [`OfflineHost`], rasterizes frames
//! on the CPU and streams them into a [`FrameSink`] (PNG sequence or MP4 via `ffmpeg`).
#![forbid(unsafe_code)]

mod foundation;

/// Easing, host capabilities and the frame-loop driver.
pub mod animation;
/// Offline render configuration.
pub mod config;
pub mod curve;
/// Registered diagrams.
pub mod diagrams;
/// Frame sinks.
pub mod encode;
/// Colors, the drawing context and shared primitives.
pub mod paint;
/// CPU rasterization.
pub mod render;
pub mod session;

pub use crate::animation::driver::{Animation, AnimationState, AnimationStats, animate};
pub use crate::animation::ease::{ease_in, ease_in_out, ease_out, ping_pong};
pub use crate::animation::host::{
    Clock, FrameScheduler, MonotonicClock, OfflineHost, Region, VirtualClock,
};
pub use crate::config::RenderConfig;
pub use crate::curve::eval::{clamp, cubic_pt, de_casteljau, dist, lerp, lerp_pt, quad_pt};
pub use crate::curve::shape::Curve;
pub use crate::diagrams::{Diagram, DiagramEntry, entries, lookup, series_title, spawn};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::foundation::core::{Affine, BezPath, Fps, FrameIndex, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{CurvecastError, CurvecastResult};
pub use crate::paint::canvas::{CanvasTarget, init_canvas};
pub use crate::paint::color::{Rgba, palette, parse_hex, with_alpha};
pub use crate::paint::context::Context2d;
pub use crate::render::cpu::CpuCanvas;
pub use crate::render::frame::FrameRGBA;
pub use crate::session::RenderSession;
