use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{CurvecastError, CurvecastResult};
use crate::foundation::math::mul_div255_u16;
use crate::render::frame::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Configuration handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in backing pixels.
    pub width: u32,
    /// Frame height in backing pixels.
    pub height: u32,
    pub fps: Fps,
}

/// Consumer of presented frames.
///
/// `push_frame` is called in strictly increasing [`FrameIndex`] order between one `begin` and
/// one `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> CurvecastResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CurvecastResult<()>;
    fn end(&mut self) -> CurvecastResult<()>;
}

/// Keeps every frame in memory; for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }

    /// Whether `end` was called after the last `begin`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> CurvecastResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CurvecastResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> CurvecastResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    background: Option<[u8; 3]>,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            background: None,
            cfg: None,
            last_idx: None,
            written: Vec::new(),
        }
    }

    /// Flatten frames over `rgb` instead of writing alpha.
    pub fn with_background(mut self, rgb: [u8; 3]) -> Self {
        self.background = Some(rgb);
        self
    }

    /// File name for frame `idx`.
    pub fn file_name(idx: FrameIndex) -> String {
        format!("frame_{:06}.png", idx.0)
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> CurvecastResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(CurvecastError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).with_context(|| {
            format!("failed to create output directory '{}'", self.dir.display())
        })?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> CurvecastResult<()> {
        let cfg = self
            .cfg
            .ok_or_else(|| CurvecastError::encode("png sink not started"))?;
        check_order(&mut self.last_idx, idx)?;
        check_frame(&cfg, frame)?;

        let path = self.dir.join(Self::file_name(idx));
        write_png(&path, frame, self.background)?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> CurvecastResult<()> {
        self.cfg
            .take()
            .ok_or_else(|| CurvecastError::encode("png sink not started"))?;
        tracing::debug!(frames = self.written.len(), dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Encode one frame as PNG, flattened over `background` when given.
pub fn write_png(path: &Path, frame: &FrameRGBA, background: Option<[u8; 3]>) -> CurvecastResult<()> {
    let pixels = match background {
        Some(bg) if frame.premultiplied => {
            let mut out = vec![0u8; frame.data.len()];
            flatten_premul_over_bg(&mut out, &frame.data, bg)?;
            out
        }
        _ => frame.to_straight_rgba8(),
    };
    image::save_buffer_with_format(
        path,
        &pixels,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

pub(crate) fn check_order(last: &mut Option<FrameIndex>, idx: FrameIndex) -> CurvecastResult<()> {
    if let Some(prev) = *last
        && idx.0 <= prev.0
    {
        return Err(CurvecastError::encode(format!(
            "out-of-order frame index {} after {}",
            idx.0, prev.0
        )));
    }
    *last = Some(idx);
    Ok(())
}

pub(crate) fn check_frame(cfg: &SinkConfig, frame: &FrameRGBA) -> CurvecastResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(CurvecastError::validation(format!(
            "frame size mismatch: got {}x{}, expected {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    if frame.data.len() != (cfg.width as usize) * (cfg.height as usize) * 4 {
        return Err(CurvecastError::validation(
            "frame.data size mismatch with width*height*4",
        ));
    }
    Ok(())
}

/// Flatten premultiplied RGBA8 over an opaque background color.
pub(crate) fn flatten_premul_over_bg(
    dst: &mut [u8],
    src_premul: &[u8],
    bg: [u8; 3],
) -> CurvecastResult<()> {
    if dst.len() != src_premul.len() || !dst.len().is_multiple_of(4) {
        return Err(CurvecastError::validation(
            "flatten expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src_premul.chunks_exact(4)) {
        let inv = 255 - u16::from(s[3]);
        for c in 0..3 {
            let v = u16::from(s[c]) + mul_div255_u16(u16::from(bg[c]), inv);
            d[c] = v.min(255) as u8;
        }
        d[3] = 255;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
