//! A recording 2D drawing context.
//!
//! [`Context2d`] follows the canvas-2D state model (a current state plus a save/restore stack and
//! a current path) but does not rasterize. Every paint call is resolved against the current state
//! and appended to a [`DisplayList`]; backends such as [`crate::render::cpu::CpuCanvas`] turn that
//! list into pixels.
//!
//! One deliberate difference from a browser canvas: the transform in effect when a path is
//! painted applies to the whole path, not the transform at the time each point was added.

use crate::foundation::core::{Affine, BezPath, Point, Rect, Vec2};
use crate::paint::color::{Rgba, palette};
use kurbo::Shape as _;

const ARC_TOLERANCE: f64 = 0.05;

/// Monospace advance used for text measurement, in ems.
pub const MONO_ADVANCE_EM: f64 = 0.6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Font selection. Only the pixel size varies; the face comes from the render configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Font {
    pub size_px: f64,
}

impl Font {
    pub const fn px(size_px: f64) -> Self {
        Self { size_px }
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::px(10.0)
    }
}

/// Blurred shadow drawn beneath a shape in the shadow color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur amount in backing-store pixels.
    pub blur: f64,
}

/// Resolved stroke parameters in user space.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    pub width: f64,
    pub cap: LineCap,
    pub dash: Vec<f64>,
}

/// The mutable drawing state that `save`/`restore` snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawState {
    pub transform: Affine,
    pub fill: Rgba,
    pub stroke: Rgba,
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_dash: Vec<f64>,
    pub shadow_color: Rgba,
    pub shadow_blur: f64,
    pub font: Font,
    pub text_align: TextAlign,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            transform: Affine::IDENTITY,
            fill: Rgba::rgb(0, 0, 0),
            stroke: Rgba::rgb(0, 0, 0),
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_dash: Vec::new(),
            shadow_color: Rgba::rgba(0, 0, 0, 0.0),
            shadow_blur: 0.0,
            font: Font::default(),
            text_align: TextAlign::Left,
        }
    }
}

impl DrawState {
    fn shadow(&self) -> Option<Shadow> {
        (self.shadow_blur > 0.0 && !self.shadow_color.is_transparent()).then_some(Shadow {
            color: self.shadow_color,
            blur: self.shadow_blur,
        })
    }

    fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            width: self.line_width,
            cap: self.line_cap,
            dash: self.line_dash.clone(),
        }
    }
}

/// One recorded paint operation with fully resolved state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Fill {
        path: BezPath,
        transform: Affine,
        paint: Rgba,
        shadow: Option<Shadow>,
    },
    Stroke {
        path: BezPath,
        transform: Affine,
        paint: Rgba,
        style: StrokeStyle,
        shadow: Option<Shadow>,
    },
    Text {
        text: String,
        /// Anchor in user space; horizontal meaning depends on `align`, vertical is the middle.
        anchor: Point,
        font: Font,
        align: TextAlign,
        transform: Affine,
        paint: Rgba,
        shadow: Option<Shadow>,
    },
}

impl DrawOp {
    pub fn shadow(&self) -> Option<Shadow> {
        match self {
            Self::Fill { shadow, .. } | Self::Stroke { shadow, .. } | Self::Text { shadow, .. } => {
                *shadow
            }
        }
    }

    pub fn paint(&self) -> Rgba {
        match self {
            Self::Fill { paint, .. } | Self::Stroke { paint, .. } | Self::Text { paint, .. } => {
                *paint
            }
        }
    }
}

/// Ordered paint operations awaiting rasterization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayList {
    ops: Vec<DrawOp>,
}

impl DisplayList {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }
}

/// Recording canvas-2D style context.
#[derive(Debug)]
pub struct Context2d {
    state: DrawState,
    stack: Vec<DrawState>,
    path: BezPath,
    list: DisplayList,
    clear_color: Rgba,
}

impl Default for Context2d {
    fn default() -> Self {
        Self {
            state: DrawState::default(),
            stack: Vec::new(),
            path: BezPath::new(),
            list: DisplayList::default(),
            clear_color: palette::BG,
        }
    }
}

impl Context2d {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state, the save stack, the current path and any recorded ops.
    ///
    /// The clear color belongs to the surface and survives.
    pub fn reset(&mut self) {
        *self = Self {
            clear_color: self.clear_color,
            ..Self::default()
        };
    }

    /// Color full-frame clears paint with. Not part of the saved state.
    pub fn clear_color(&self) -> Rgba {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Rgba) {
        self.clear_color = color;
    }

    pub fn state(&self) -> &DrawState {
        &self.state
    }

    /// Depth of the save stack.
    pub fn save_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn display_list(&self) -> &DisplayList {
        &self.list
    }

    /// Take recorded ops, leaving the list empty. State and path are untouched.
    pub fn take_display_list(&mut self) -> DisplayList {
        std::mem::take(&mut self.list)
    }

    pub fn save(&mut self) {
        self.stack.push(self.state.clone());
    }

    /// Pop the last saved state. Unbalanced restores are ignored.
    pub fn restore(&mut self) {
        if let Some(prev) = self.stack.pop() {
            self.state = prev;
        }
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.state.transform = transform;
    }

    pub fn transform(&self) -> Affine {
        self.state.transform
    }

    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.state.transform = self.state.transform * Affine::scale_non_uniform(sx, sy);
    }

    pub fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine::translate(offset);
    }

    /// Rotate by `angle` radians, clockwise on screen.
    pub fn rotate(&mut self, angle: f64) {
        self.state.transform = self.state.transform * Affine::rotate(angle);
    }

    pub fn set_fill_style(&mut self, color: Rgba) {
        self.state.fill = color;
    }

    pub fn set_stroke_style(&mut self, color: Rgba) {
        self.state.stroke = color;
    }

    /// Non-finite or non-positive widths are ignored, as on a canvas.
    pub fn set_line_width(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    pub fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
    }

    /// Set the dash pattern. Odd-length patterns are repeated to even length; patterns with
    /// negative or non-finite entries are ignored.
    pub fn set_line_dash(&mut self, dash: &[f64]) {
        if dash.iter().any(|d| !d.is_finite() || *d < 0.0) {
            return;
        }
        let mut pattern = dash.to_vec();
        if pattern.len() % 2 == 1 {
            pattern.extend_from_slice(dash);
        }
        self.state.line_dash = pattern;
    }

    pub fn set_shadow(&mut self, color: Rgba, blur: f64) {
        self.state.shadow_color = color;
        self.state.shadow_blur = if blur.is_finite() { blur.max(0.0) } else { 0.0 };
    }

    pub fn set_font(&mut self, font: Font) {
        self.state.font = font;
    }

    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    pub fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    pub fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    /// Line to `p`; starts a subpath at `p` when there is none.
    pub fn line_to(&mut self, p: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(p);
        } else {
            self.path.line_to(p);
        }
    }

    pub fn close_path(&mut self) {
        if !self.path.elements().is_empty() {
            self.path.close_path();
        }
    }

    /// Clockwise arc around `center` from `start_angle` to `end_angle` (radians).
    ///
    /// Connects from the current point with a straight line, like a canvas arc.
    pub fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        if !radius.is_finite() || radius < 0.0 {
            return;
        }
        let start = center + Vec2::from_angle(start_angle) * radius;
        self.line_to(start);
        let arc = kurbo::Arc {
            center,
            radii: Vec2::new(radius, radius),
            start_angle,
            sweep_angle: end_angle - start_angle,
            x_rotation: 0.0,
        };
        arc.to_cubic_beziers(ARC_TOLERANCE, |p1, p2, p3| self.path.curve_to(p1, p2, p3));
    }

    /// Append a closed rectangle subpath.
    pub fn rect(&mut self, rect: Rect) {
        self.path.extend(rect.path_elements(ARC_TOLERANCE));
    }

    /// Append a closed rounded-rectangle subpath.
    pub fn round_rect(&mut self, rect: Rect, radius: f64) {
        let rr = kurbo::RoundedRect::from_rect(rect, radius.max(0.0));
        self.path.extend(rr.path_elements(ARC_TOLERANCE));
    }

    /// Current path as built so far.
    pub fn current_path(&self) -> &BezPath {
        &self.path
    }

    pub fn stroke(&mut self) {
        if self.path.elements().is_empty() || self.state.stroke.is_transparent() {
            return;
        }
        let op = DrawOp::Stroke {
            path: self.path.clone(),
            transform: self.state.transform,
            paint: self.state.stroke,
            style: self.state.stroke_style(),
            shadow: self.state.shadow(),
        };
        self.list.push(op);
    }

    pub fn fill(&mut self) {
        if self.path.elements().is_empty() || self.state.fill.is_transparent() {
            return;
        }
        let op = DrawOp::Fill {
            path: self.path.clone(),
            transform: self.state.transform,
            paint: self.state.fill,
            shadow: self.state.shadow(),
        };
        self.list.push(op);
    }

    /// Fill a rectangle without touching the current path.
    pub fn fill_rect(&mut self, rect: Rect) {
        if self.state.fill.is_transparent() {
            return;
        }
        self.list.push(DrawOp::Fill {
            path: rect.to_path(ARC_TOLERANCE),
            transform: self.state.transform,
            paint: self.state.fill,
            shadow: self.state.shadow(),
        });
    }

    /// Stroke a rectangle outline without touching the current path.
    pub fn stroke_rect(&mut self, rect: Rect) {
        if self.state.stroke.is_transparent() {
            return;
        }
        self.list.push(DrawOp::Stroke {
            path: rect.to_path(ARC_TOLERANCE),
            transform: self.state.transform,
            paint: self.state.stroke,
            style: self.state.stroke_style(),
            shadow: self.state.shadow(),
        });
    }

    /// Draw `text` vertically centered on `anchor.y`, aligned horizontally per the text align.
    pub fn fill_text(&mut self, text: &str, anchor: Point) {
        if text.is_empty() || self.state.fill.is_transparent() {
            return;
        }
        self.list.push(DrawOp::Text {
            text: text.to_owned(),
            anchor,
            font: self.state.font,
            align: self.state.text_align,
            transform: self.state.transform,
            paint: self.state.fill,
            shadow: self.state.shadow(),
        });
    }

    /// Advance width of `text` in user units at the current font size.
    pub fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * MONO_ADVANCE_EM * self.state.font.size_px
    }
}

#[cfg(test)]
#[path = "../../tests/unit/paint/context.rs"]
mod tests;
