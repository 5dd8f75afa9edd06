//! Easing, the frame-loop driver and the host capabilities it runs on.

/// Self-rescheduling frame loop with resize handling.
pub mod driver;
/// Easing curves and time remapping.
pub mod ease;
/// Frame scheduling, regions, clocks and the offline host.
pub mod host;
