//! Render configuration, loadable from JSON with every field optional.

use crate::diagrams::Diagram;
use crate::foundation::core::{Fps, Size, backing_dims};
use crate::foundation::error::{CurvecastError, CurvecastResult};
use crate::paint::color::{Rgba, parse_hex};
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Duration used for diagrams that do not loop.
pub const DEFAULT_DURATION_SECS: f64 = 8.0;

/// Settings for rendering a diagram offline.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Logical width in CSS pixels.
    pub width: f64,
    /// Logical height in CSS pixels.
    pub height: f64,
    pub device_pixel_ratio: f64,
    pub fps: Fps,
    /// Length of the render; `None` renders one cycle of the diagram.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f64>,
    /// Clock time of the first frame.
    pub start_secs: f64,
    /// Font file for labels. Without one, labels are not rasterized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// `#rrggbb` color diagrams clear each frame to; opaque outputs also flatten onto it.
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 720.0,
            height: 405.0,
            device_pixel_ratio: 2.0,
            fps: Fps::default(),
            duration_secs: None,
            start_secs: 0.0,
            font_path: None,
            background: "#0a0a0f".to_owned(),
        }
    }
}

impl RenderConfig {
    pub fn from_json_str(json: &str) -> CurvecastResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CurvecastError::serde(format!("render config: {e}")))
    }

    pub fn from_json_file(path: &Path) -> CurvecastResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> CurvecastResult<()> {
        for (name, v) in [("width", self.width), ("height", self.height)] {
            if !(v.is_finite() && v > 0.0) {
                return Err(CurvecastError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        let dpr = self.device_pixel_ratio;
        if !(dpr.is_finite() && dpr > 0.0) {
            return Err(CurvecastError::validation(format!(
                "device_pixel_ratio must be finite and > 0, got {dpr}"
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        if let Some(d) = self.duration_secs
            && !(d.is_finite() && d > 0.0)
        {
            return Err(CurvecastError::validation(format!(
                "duration_secs must be finite and > 0, got {d}"
            )));
        }
        if !self.start_secs.is_finite() || self.start_secs < 0.0 {
            return Err(CurvecastError::validation(format!(
                "start_secs must be finite and >= 0, got {}",
                self.start_secs
            )));
        }

        let (bw, bh) = self.backing_size();
        if bw == 0 || bh == 0 {
            return Err(CurvecastError::validation(
                "backing size rounds down to zero pixels",
            ));
        }
        let limit = u32::from(u16::MAX);
        if bw > limit || bh > limit {
            return Err(CurvecastError::validation(format!(
                "backing size {bw}x{bh} exceeds {limit}x{limit}"
            )));
        }

        self.background_color()?;
        Ok(())
    }

    pub fn logical_size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Backing-store size in physical pixels.
    pub fn backing_size(&self) -> (u32, u32) {
        backing_dims(self.logical_size(), self.device_pixel_ratio)
    }

    pub fn background_color(&self) -> CurvecastResult<Rgba> {
        parse_hex(&self.background)
    }

    pub fn background_rgb(&self) -> CurvecastResult<[u8; 3]> {
        let c = self.background_color()?;
        Ok([c.r, c.g, c.b])
    }

    /// Render length for `diagram`: the configured duration, else one cycle, else the default.
    pub fn duration_for(&self, diagram: &dyn Diagram) -> f64 {
        self.duration_secs
            .or_else(|| diagram.cycle_secs())
            .unwrap_or(DEFAULT_DURATION_SECS)
    }

    /// Number of frames covering [`RenderConfig::duration_for`].
    pub fn frame_count(&self, diagram: &dyn Diagram) -> u64 {
        self.fps.secs_to_frames_ceil(self.duration_for(diagram)).max(1)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
