use crate::animation::host::Region;
use crate::foundation::core::{Affine, Size, backing_dims};
use crate::paint::context::Context2d;

/// A drawable surface whose backing store the drawing utilities own.
pub trait CanvasTarget {
    /// Resize the backing store in physical pixels. Implementations discard prior pixels and
    /// reset the drawing context.
    fn set_backing_size(&mut self, width: u32, height: u32);
    /// Current backing-store size in physical pixels.
    fn backing_size(&self) -> (u32, u32);
    /// Record the presentation (logical) size.
    fn set_css_size(&mut self, size: Size);
    /// Presentation (logical) size.
    fn css_size(&self) -> Size;
    /// Drawing context for this surface.
    fn context(&mut self) -> &mut Context2d;
}

/// Result of [`init_canvas`]: the context plus logical drawing dimensions.
pub struct CanvasSetup<'a> {
    pub ctx: &'a mut Context2d,
    pub width: f64,
    pub height: f64,
}

/// Effective pixel ratio; anything unusable falls back to 1.
pub fn effective_dpr(dpr: f64) -> f64 {
    if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 }
}

/// Size `canvas` to `container`'s box at the container's pixel ratio.
///
/// The backing store becomes `box * dpr` physical pixels, the presentation size becomes the
/// box, and the context transform becomes exactly `scale(dpr)`, so drawing happens in logical
/// pixels. Repeated calls replace the scale rather than compounding it.
pub fn init_canvas<'a>(canvas: &'a mut dyn CanvasTarget, container: &dyn Region) -> CanvasSetup<'a> {
    let dpr = effective_dpr(container.device_pixel_ratio());
    let size = container.box_size();
    let (bw, bh) = backing_dims(size, dpr);

    canvas.set_backing_size(bw, bh);
    canvas.set_css_size(size);

    let ctx = canvas.context();
    ctx.reset();
    ctx.set_transform(Affine::scale(dpr));
    tracing::debug!(
        width = size.width,
        height = size.height,
        dpr,
        backing_w = bw,
        backing_h = bh,
        "canvas initialized"
    );

    CanvasSetup {
        ctx,
        width: size.width,
        height: size.height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/canvas.rs"]
mod tests;
