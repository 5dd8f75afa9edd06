//! Colors, the recording drawing context, canvas setup and drawing primitives.

/// Canvas surfaces and DPR-aware setup.
pub mod canvas;
/// Straight-alpha colors and the diagram palette.
pub mod color;
/// Canvas-2D style recording context.
pub mod context;
/// Save/restore-disciplined drawing helpers.
pub mod primitives;
