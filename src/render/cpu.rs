//! CPU rasterizer for recorded display lists, powered by `vello_cpu`.

use crate::foundation::core::{Affine, BezPath, Rect, Size, Vec2};
use crate::foundation::error::{CurvecastError, CurvecastResult};
use crate::paint::canvas::CanvasTarget;
use crate::paint::color::Rgba;
use crate::paint::context::{Context2d, DrawOp, LineCap, MONO_ADVANCE_EM, Shadow, StrokeStyle, TextAlign};
use crate::render::blur::GaussianKernel;
use crate::render::composite::{PixelRect, extract_region, over_in_place, over_region};
use crate::render::frame::FrameRGBA;
use crate::render::text::{LabelShaper, TextBrush};
use kurbo::Shape as _;
use std::path::Path;

const STROKE_TOLERANCE: f64 = 0.02;

/// Raster canvas with a persistent premultiplied backing store.
///
/// Drawing goes through [`CpuCanvas::context`]; [`CpuCanvas::present`] rasterizes whatever was
/// recorded since the last present on top of the existing pixels.
pub struct CpuCanvas {
    backing: (u32, u32),
    css: Size,
    ctx: Context2d,
    pixels: Vec<u8>,
    render: Option<vello_cpu::RenderContext>,
    scratch: Option<vello_cpu::Pixmap>,
    text: Option<LabelShaper>,
    text_skip_logged: bool,
}

impl Default for CpuCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuCanvas {
    /// Canvas without a font; labels are skipped.
    pub fn new() -> Self {
        Self {
            backing: (0, 0),
            css: Size::ZERO,
            ctx: Context2d::new(),
            pixels: Vec::new(),
            render: None,
            scratch: None,
            text: None,
            text_skip_logged: false,
        }
    }

    pub fn with_font_file(path: &Path) -> CurvecastResult<Self> {
        let mut canvas = Self::new();
        canvas.text = Some(LabelShaper::from_file(path)?);
        Ok(canvas)
    }

    pub fn with_font_bytes(bytes: Vec<u8>) -> CurvecastResult<Self> {
        let mut canvas = Self::new();
        canvas.text = Some(LabelShaper::from_bytes(bytes)?);
        Ok(canvas)
    }

    pub fn has_font(&self) -> bool {
        self.text.is_some()
    }

    /// Current pixels without rasterizing pending ops.
    pub fn snapshot(&self) -> FrameRGBA {
        FrameRGBA {
            width: self.backing.0,
            height: self.backing.1,
            data: self.pixels.clone(),
            premultiplied: true,
        }
    }

    /// Rasterize pending ops onto the backing store and return the result.
    pub fn present(&mut self) -> CurvecastResult<FrameRGBA> {
        let list = self.ctx.take_display_list();
        let (width, height) = self.backing;
        if width == 0 || height == 0 {
            return Ok(self.snapshot());
        }
        let (w16, h16) = dims_u16(width, height)?;
        if list.is_empty() {
            return Ok(self.snapshot());
        }

        if !matches!(&self.render, Some(r) if r.width() == w16 && r.height() == h16) {
            self.render = Some(vello_cpu::RenderContext::new(w16, h16));
        }
        if !matches!(&self.scratch, Some(p) if p.width() == w16 && p.height() == h16) {
            self.scratch = Some(vello_cpu::Pixmap::new(w16, h16));
        }

        let Self {
            pixels,
            render,
            scratch,
            text,
            ..
        } = &mut *self;
        let (Some(render), Some(scratch)) = (render.as_mut(), scratch.as_mut()) else {
            return Err(CurvecastError::render("raster context unavailable"));
        };
        let mut raster = Raster {
            width,
            height,
            render,
            scratch,
            pixels,
            text: text.as_mut(),
            skipped_text: 0,
        };

        let mut batch: Vec<&DrawOp> = Vec::new();
        for op in list.ops() {
            if let Some(shadow) = op.shadow() {
                raster.flush(&batch)?;
                batch.clear();
                raster.shadow(op, shadow)?;
            }
            batch.push(op);
        }
        raster.flush(&batch)?;

        let skipped = raster.skipped_text;
        if skipped > 0 && !self.text_skip_logged {
            tracing::debug!(skipped, "no font configured; labels skipped");
            self.text_skip_logged = true;
        }
        Ok(self.snapshot())
    }
}

impl CanvasTarget for CpuCanvas {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
        self.pixels.clear();
        if dims_u16(width, height).is_ok() {
            self.pixels.resize((width as usize) * (height as usize) * 4, 0);
        }
        self.ctx.reset();
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing
    }

    fn set_css_size(&mut self, size: Size) {
        self.css = size;
    }

    fn css_size(&self) -> Size {
        self.css
    }

    fn context(&mut self) -> &mut Context2d {
        &mut self.ctx
    }
}

struct Raster<'a> {
    width: u32,
    height: u32,
    render: &'a mut vello_cpu::RenderContext,
    scratch: &'a mut vello_cpu::Pixmap,
    pixels: &'a mut Vec<u8>,
    text: Option<&'a mut LabelShaper>,
    skipped_text: usize,
}

impl Raster<'_> {
    fn flush(&mut self, ops: &[&DrawOp]) -> CurvecastResult<()> {
        if ops.is_empty() {
            return Ok(());
        }
        self.draw_into_scratch(ops.iter().map(|op| (*op, op.paint())))?;
        over_in_place(self.pixels, self.scratch.data_as_u8_slice())
    }

    /// Render `op` in the shadow color, blur it and composite it under whatever comes next.
    fn shadow(&mut self, op: &DrawOp, shadow: Shadow) -> CurvecastResult<()> {
        let kernel = GaussianKernel::new(shadow.blur / 2.0)?;
        let alpha = shadow.color.alpha() * op.paint().alpha();
        self.draw_into_scratch(std::iter::once((op, shadow.color.with_alpha(alpha))))?;

        let pad = f64::from(kernel.radius()) + 1.0;
        let b = device_bounds(op);
        let rect = PixelRect::covering(
            b.x0 - pad,
            b.y0 - pad,
            b.x1 + pad,
            b.y1 + pad,
            self.width,
            self.height,
        );
        if rect.is_empty() {
            return Ok(());
        }
        let region = extract_region(self.scratch.data_as_u8_slice(), self.width, rect);
        let blurred = kernel.blur(&region, rect.width, rect.height)?;
        over_region(self.pixels, self.width, &blurred, rect)
    }

    fn draw_into_scratch<'op>(
        &mut self,
        ops: impl Iterator<Item = (&'op DrawOp, Rgba)>,
    ) -> CurvecastResult<()> {
        self.render.reset();
        for (op, paint) in ops {
            self.draw_op(op, paint);
        }
        self.render.flush();
        self.scratch.data_as_u8_slice_mut().fill(0);
        self.render.render_to_pixmap(self.scratch);
        Ok(())
    }

    fn draw_op(&mut self, op: &DrawOp, paint: Rgba) {
        let [r, g, b, a] = paint.to_rgba8();
        let color = vello_cpu::peniko::Color::from_rgba8(r, g, b, a);
        match op {
            DrawOp::Fill {
                path, transform, ..
            } => {
                self.render.set_transform(affine_to_cpu(*transform));
                self.render.set_paint(color);
                self.render.fill_path(&bezpath_to_cpu(path));
            }
            DrawOp::Stroke {
                path,
                transform,
                style,
                ..
            } => {
                let outline = stroke_outline(path, style);
                self.render.set_transform(affine_to_cpu(*transform));
                self.render.set_paint(color);
                self.render.fill_path(&bezpath_to_cpu(&outline));
            }
            DrawOp::Text {
                text,
                anchor,
                font,
                align,
                transform,
                ..
            } => {
                let Some(shaper) = self.text.as_deref_mut() else {
                    self.skipped_text += 1;
                    return;
                };
                let layout = match shaper.layout(text, font.size_px as f32, TextBrush::from(paint)) {
                    Ok(layout) => layout,
                    Err(e) => {
                        tracing::warn!(error = %e, text = %text, "label skipped");
                        return;
                    }
                };
                let lw = f64::from(layout.width());
                let lh = f64::from(layout.height());
                let dx = match align {
                    TextAlign::Left => 0.0,
                    TextAlign::Center => -lw / 2.0,
                    TextAlign::Right => -lw,
                };
                let origin = Vec2::new(anchor.x + dx, anchor.y - lh / 2.0);
                self.render
                    .set_transform(affine_to_cpu(*transform * Affine::translate(origin)));
                self.render.set_paint(color);
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        self.render
                            .glyph_run(shaper.font())
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
        }
    }
}

/// Fillable outline of a stroke, dashed in user space.
fn stroke_outline(path: &BezPath, style: &StrokeStyle) -> BezPath {
    let cap = match style.cap {
        LineCap::Butt => kurbo::Cap::Butt,
        LineCap::Round => kurbo::Cap::Round,
        LineCap::Square => kurbo::Cap::Square,
    };
    let mut stroke = kurbo::Stroke::new(style.width)
        .with_caps(cap)
        .with_join(kurbo::Join::Miter);
    if style.dash.iter().sum::<f64>() > 0.0 {
        stroke = stroke.with_dashes(0.0, style.dash.iter().copied());
    }
    kurbo::stroke(
        path.iter(),
        &stroke,
        &kurbo::StrokeOpts::default(),
        STROKE_TOLERANCE,
    )
}

/// Conservative device-space bounds of what `op` paints.
fn device_bounds(op: &DrawOp) -> Rect {
    match op {
        DrawOp::Fill {
            path, transform, ..
        } => transform.transform_rect_bbox(path.bounding_box()),
        DrawOp::Stroke {
            path,
            transform,
            style,
            ..
        } => transform.transform_rect_bbox(path.bounding_box().inflate(style.width, style.width)),
        DrawOp::Text {
            text,
            anchor,
            font,
            align,
            transform,
            ..
        } => {
            let w = text.chars().count() as f64 * MONO_ADVANCE_EM * font.size_px;
            let x0 = match align {
                TextAlign::Left => anchor.x,
                TextAlign::Center => anchor.x - w / 2.0,
                TextAlign::Right => anchor.x - w,
            };
            let r = Rect::new(x0, anchor.y - font.size_px, x0 + w, anchor.y + font.size_px);
            transform.transform_rect_bbox(r)
        }
    }
}

fn dims_u16(width: u32, height: u32) -> CurvecastResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| CurvecastError::render(format!("backing width {width} exceeds u16")))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CurvecastError::render(format!("backing height {height} exceeds u16")))?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
