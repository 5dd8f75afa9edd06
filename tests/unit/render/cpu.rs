use super::*;
use crate::animation::host::OfflineHost;
use crate::foundation::core::{Fps, Point};
use crate::paint::canvas::init_canvas;
use crate::paint::color::palette;
use crate::paint::context::Font;

const FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf";

fn canvas(w: u32, h: u32) -> CpuCanvas {
    let mut c = CpuCanvas::new();
    c.set_backing_size(w, h);
    c
}

fn alpha(frame: &FrameRGBA, x: u32, y: u32) -> u8 {
    frame.pixel(x, y).unwrap()[3]
}

#[test]
fn empty_canvas_presents_empty_frame() {
    let mut c = CpuCanvas::new();
    let f = c.present().unwrap();
    assert!(f.is_empty());
    assert!(f.data.is_empty());
}

#[test]
fn opaque_fill_covers_every_pixel() {
    let mut c = canvas(8, 4);
    c.context().set_fill_style(Rgba::rgb(255, 0, 0));
    c.context().fill_rect(Rect::new(0.0, 0.0, 8.0, 4.0));
    let f = c.present().unwrap();
    assert_eq!((f.width, f.height), (8, 4));
    assert!(f.data.chunks_exact(4).all(|px| px == [255, 0, 0, 255]));
    assert!(c.context().display_list().is_empty());
}

#[test]
fn pixels_persist_between_presents_and_composite() {
    let mut c = canvas(4, 4);
    c.context().set_fill_style(Rgba::rgb(0, 0, 0));
    c.context().fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    c.present().unwrap();

    let again = c.present().unwrap();
    assert_eq!(again.pixel(3, 3), Some([0, 0, 0, 255]));

    c.context().set_fill_style(Rgba::rgba(255, 255, 255, 0.5));
    c.context().fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0));
    let f = c.present().unwrap();
    let left = f.pixel(0, 0).unwrap();
    assert_eq!(left[3], 255);
    assert!((i32::from(left[0]) - 128).abs() <= 2);
    assert_eq!(f.pixel(3, 0), Some([0, 0, 0, 255]));
}

#[test]
fn resizing_the_backing_store_clears_pixels_and_context() {
    let mut c = canvas(4, 4);
    c.context().set_fill_style(palette::TEAL);
    c.context().fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    c.present().unwrap();
    c.context().save();
    c.context().fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));

    c.set_backing_size(6, 2);
    assert_eq!(c.backing_size(), (6, 2));
    assert_eq!(c.context().save_depth(), 0);
    assert!(c.context().display_list().is_empty());
    let f = c.present().unwrap();
    assert_eq!(f.data.len(), 6 * 2 * 4);
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn logical_drawing_is_scaled_by_dpr() {
    let host = OfflineHost::with_virtual_clock(Fps::default(), 0.0, Size::new(10.0, 5.0), 2.0);
    let mut c = CpuCanvas::new();
    let setup = init_canvas(&mut c, &host);
    setup.ctx.set_fill_style(Rgba::rgb(255, 255, 255));
    setup.ctx.fill_rect(Rect::new(0.0, 0.0, 5.0, 5.0));
    let f = c.present().unwrap();
    assert_eq!((f.width, f.height), (20, 10));
    assert_eq!(alpha(&f, 9, 9), 255);
    assert_eq!(alpha(&f, 10, 0), 0);
}

#[test]
fn strokes_cover_their_width_only() {
    let mut c = canvas(20, 10);
    let ctx = c.context();
    ctx.set_stroke_style(Rgba::rgb(255, 255, 255));
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(Point::new(0.0, 5.0));
    ctx.line_to(Point::new(20.0, 5.0));
    ctx.stroke();
    let f = c.present().unwrap();
    assert!(alpha(&f, 10, 4) > 200);
    assert!(alpha(&f, 10, 5) > 200);
    assert_eq!(alpha(&f, 10, 0), 0);
    assert_eq!(alpha(&f, 10, 9), 0);
}

#[test]
fn dashes_leave_gaps() {
    let mut c = canvas(20, 10);
    let ctx = c.context();
    ctx.set_stroke_style(Rgba::rgb(255, 255, 255));
    ctx.set_line_width(2.0);
    ctx.set_line_dash(&[4.0, 4.0]);
    ctx.begin_path();
    ctx.move_to(Point::new(0.0, 5.0));
    ctx.line_to(Point::new(20.0, 5.0));
    ctx.stroke();
    let f = c.present().unwrap();
    assert!(alpha(&f, 1, 4) > 200);
    assert_eq!(alpha(&f, 6, 4), 0);
    assert!(alpha(&f, 9, 4) > 200);
}

#[test]
fn glow_paints_beyond_the_shape() {
    let draw = |glow: f64| {
        let mut c = canvas(40, 40);
        let ctx = c.context();
        if glow > 0.0 {
            ctx.set_shadow(palette::CORAL, glow);
        }
        ctx.set_fill_style(palette::CORAL);
        ctx.begin_path();
        ctx.arc(Point::new(20.0, 20.0), 4.0, 0.0, std::f64::consts::TAU);
        ctx.fill();
        c.present().unwrap()
    };

    let plain = draw(0.0);
    let glowing = draw(10.0);
    assert_eq!(alpha(&plain, 20, 28), 0);
    assert!(alpha(&glowing, 20, 28) > 0);
    assert!(alpha(&glowing, 20, 20) > 250);
    assert_eq!(alpha(&glowing, 0, 0), 0);
}

#[test]
fn labels_without_a_font_are_skipped() {
    let mut c = canvas(30, 10);
    assert!(!c.has_font());
    c.context().set_fill_style(palette::WHITE);
    c.context().fill_text("label", Point::new(15.0, 5.0));
    let f = c.present().unwrap();
    assert!(f.data.iter().all(|&b| b == 0));
}

#[test]
fn labels_render_with_local_font_if_present() {
    let Ok(bytes) = std::fs::read(FONT_PATH) else {
        return;
    };
    let mut c = CpuCanvas::with_font_bytes(bytes).unwrap();
    c.set_backing_size(80, 30);
    let ctx = c.context();
    ctx.set_fill_style(palette::WHITE);
    ctx.set_font(Font::px(16.0));
    ctx.set_text_align(crate::paint::context::TextAlign::Center);
    ctx.fill_text("HELLO", Point::new(40.0, 15.0));
    let f = c.present().unwrap();
    let inked = f.data.chunks_exact(4).filter(|px| px[3] > 0).count();
    assert!(inked > 10);
    assert_eq!(alpha(&f, 0, 0), 0);
}

#[test]
fn oversized_backing_store_is_a_render_error() {
    let mut c = canvas(70_000, 1);
    c.context().set_fill_style(palette::WHITE);
    c.context().fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0));
    let err = c.present().unwrap_err();
    assert!(err.to_string().contains("exceeds u16"));
}

#[test]
fn outline_and_bounds_helpers() {
    let mut path = BezPath::new();
    path.move_to((0.0, 0.0));
    path.line_to((10.0, 0.0));
    let style = StrokeStyle {
        width: 2.0,
        cap: LineCap::Butt,
        dash: Vec::new(),
    };
    let bb = stroke_outline(&path, &style).bounding_box();
    assert!((bb.y0 + 1.0).abs() < 1e-6 && (bb.y1 - 1.0).abs() < 1e-6);
    assert!(bb.x0.abs() < 1e-6 && (bb.x1 - 10.0).abs() < 1e-6);

    let op = DrawOp::Stroke {
        path,
        transform: Affine::scale(2.0),
        paint: palette::WHITE,
        style,
        shadow: None,
    };
    let b = device_bounds(&op);
    assert!(b.x0 <= -4.0 + 1e-9 && b.x1 >= 24.0 - 1e-9);
}
