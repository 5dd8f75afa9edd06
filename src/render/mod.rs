//! Rasterization of recorded display lists.

pub(crate) mod blur;
pub(crate) mod composite;
/// CPU canvas backed by `vello_cpu`.
pub mod cpu;
/// Presented frames.
pub mod frame;
pub(crate) mod text;
