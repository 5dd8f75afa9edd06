//! Offline rendering: one diagram driven by [`animate`] on an [`OfflineHost`], rasterized by a
//! [`CpuCanvas`] and streamed to a [`FrameSink`].

use crate::animation::driver::{Animation, animate};
use crate::animation::host::{FrameScheduler, OfflineHost, Region};
use crate::config::RenderConfig;
use crate::diagrams::Diagram;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{FrameIndex, Size};
use crate::foundation::error::{CurvecastError, CurvecastResult};
use crate::paint::canvas::CanvasTarget;
use crate::render::cpu::CpuCanvas;
use crate::render::frame::FrameRGBA;
use std::cell::RefCell;
use std::rc::Rc;

pub struct RenderSession {
    cfg: RenderConfig,
    diagram: Rc<dyn Diagram>,
    host: Rc<OfflineHost>,
    canvas: Rc<RefCell<CpuCanvas>>,
    animation: Animation,
    next_frame: u64,
}

impl RenderSession {
    /// Validate `cfg` and start `diagram` on a virtual clock at `cfg.start_secs`.
    ///
    /// A font that fails to load is logged and labels are skipped; the session still renders.
    #[tracing::instrument(skip(diagram, cfg), fields(diagram = diagram.slug()))]
    pub fn new(diagram: Box<dyn Diagram>, cfg: RenderConfig) -> CurvecastResult<Self> {
        cfg.validate()?;

        let mut canvas = match &cfg.font_path {
            Some(path) => CpuCanvas::with_font_file(path).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), %err, "font failed to load; labels skipped");
                CpuCanvas::new()
            }),
            None => CpuCanvas::new(),
        };
        canvas.context().set_clear_color(cfg.background_color()?);
        let canvas = Rc::new(RefCell::new(canvas));
        let host = Rc::new(OfflineHost::with_virtual_clock(
            cfg.fps,
            cfg.start_secs,
            cfg.logical_size(),
            cfg.device_pixel_ratio,
        ));

        let diagram: Rc<dyn Diagram> = Rc::from(diagram);
        let drawn = Rc::clone(&diagram);
        let animation = animate(
            Rc::clone(&canvas) as Rc<RefCell<dyn CanvasTarget>>,
            Rc::clone(&host) as Rc<dyn Region>,
            Rc::clone(&host) as Rc<dyn FrameScheduler>,
            move |ctx, w, h, t| drawn.draw(ctx, w, h, t),
        );

        Ok(Self {
            cfg,
            diagram,
            host,
            canvas,
            animation,
            next_frame: 0,
        })
    }

    pub fn config(&self) -> &RenderConfig {
        &self.cfg
    }

    pub fn diagram(&self) -> &dyn Diagram {
        &*self.diagram
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    /// Whether labels will be rasterized.
    pub fn has_font(&self) -> bool {
        self.canvas.borrow().has_font()
    }

    /// Index the next pumped frame will get.
    pub fn next_frame(&self) -> FrameIndex {
        FrameIndex(self.next_frame)
    }

    /// Frames needed to cover the configured duration.
    pub fn frame_count(&self) -> u64 {
        self.cfg.frame_count(&*self.diagram)
    }

    /// Draw the diagram at `time` seconds, bypassing the frame loop and its clock.
    pub fn render_frame_at(&mut self, time: f64) -> CurvecastResult<FrameRGBA> {
        if !time.is_finite() {
            return Err(CurvecastError::validation(format!(
                "frame time must be finite, got {time}"
            )));
        }
        // Apply pending resizes first so the frame matches the current box.
        self.host.deliver_resizes();
        let size = self.animation.size();
        let mut canvas = self.canvas.borrow_mut();
        self.diagram
            .draw(canvas.context(), size.width, size.height, time);
        canvas.present()
    }

    /// Run one frame of the loop and rasterize it.
    pub fn pump_frame(&mut self) -> CurvecastResult<(FrameIndex, FrameRGBA)> {
        if !self.animation.is_running() {
            return Err(CurvecastError::render("render session already finished"));
        }
        let ran = self.host.pump();
        if ran == 0 {
            return Err(CurvecastError::render("frame loop did not run"));
        }
        let frame = self.canvas.borrow_mut().present()?;
        let idx = FrameIndex(self.next_frame);
        self.next_frame += 1;
        Ok((idx, frame))
    }

    /// Pump `frames` frames into `sink`, then stop the animation.
    #[tracing::instrument(skip(self, sink), fields(diagram = self.diagram.slug()))]
    pub fn render_range(&mut self, frames: u64, sink: &mut dyn FrameSink) -> CurvecastResult<()> {
        if frames == 0 {
            return Err(CurvecastError::validation("render range must cover at least one frame"));
        }
        self.host.deliver_resizes();
        let (width, height) = self.canvas.borrow().backing_size();
        sink.begin(SinkConfig {
            width,
            height,
            fps: self.cfg.fps,
        })?;

        let result = (0..frames).try_for_each(|_| {
            let (idx, frame) = self.pump_frame()?;
            sink.push_frame(idx, &frame)
        });
        self.animation.stop();
        result?;
        sink.end()?;

        tracing::debug!(frames, width, height, "range rendered");
        Ok(())
    }

    /// Render the configured duration into `sink`.
    pub fn render_all(&mut self, sink: &mut dyn FrameSink) -> CurvecastResult<()> {
        let frames = self.frame_count();
        self.render_range(frames, sink)
    }

    /// Change the logical box size. Takes effect on the next pump.
    ///
    /// Fails once the session has finished, since nothing observes the box any more.
    pub fn resize(&mut self, size: Size) -> CurvecastResult<()> {
        if !self.animation.is_running() {
            return Err(CurvecastError::render("render session already finished"));
        }
        let resized = RenderConfig {
            width: size.width,
            height: size.height,
            ..self.cfg.clone()
        };
        resized.validate()?;
        self.cfg = resized;
        self.host.set_box_size(size);
        Ok(())
    }

    /// Stop the loop early. Later pumps fail.
    pub fn finish(&self) {
        self.animation.stop();
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
