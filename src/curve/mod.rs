/// Interpolation and Bézier point evaluation.
pub mod eval;
/// Degree-tagged curve segments.
pub mod shape;
