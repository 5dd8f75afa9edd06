//! Frame sinks.
//!
//! Sinks consume presented frames in timeline order; `RenderSession::render_range` drives them.

/// `ffmpeg`-based MP4 output.
pub mod ffmpeg;
/// Sink contract, in-memory and PNG-sequence sinks.
pub mod sink;
