use super::*;
use crate::animation::host::OfflineHost;
use crate::foundation::core::Fps;
use std::cell::Cell;

#[derive(Default)]
struct MemCanvas {
    backing: (u32, u32),
    css: Size,
    ctx: Context2d,
}

impl CanvasTarget for MemCanvas {
    fn set_backing_size(&mut self, width: u32, height: u32) {
        self.backing = (width, height);
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

struct Fixture {
    host: Rc<OfflineHost>,
    canvas: Rc<RefCell<MemCanvas>>,
}

fn fixture() -> Fixture {
    Fixture {
        host: Rc::new(OfflineHost::with_virtual_clock(
            Fps::new(10, 1).unwrap(),
            0.0,
            Size::new(200.0, 100.0),
            2.0,
        )),
        canvas: Rc::new(RefCell::new(MemCanvas::default())),
    }
}

impl Fixture {
    fn animate(&self, draw: impl FnMut(&mut Context2d, f64, f64, f64) + 'static) -> Animation {
        animate(
            self.canvas.clone(),
            self.host.clone(),
            self.host.clone(),
            draw,
        )
    }
}

fn counting(counter: &Rc<Cell<u64>>) -> impl FnMut(&mut Context2d, f64, f64, f64) + 'static {
    let counter = Rc::clone(counter);
    move |_, _, _, _| counter.set(counter.get() + 1)
}

#[test]
fn animate_sets_up_and_starts_running() {
    let fx = fixture();
    let anim = fx.animate(|_, _, _, _| {});
    assert_eq!(anim.state(), AnimationState::Running);
    assert_eq!(anim.stats().setups, 1);
    assert_eq!(anim.size(), Size::new(200.0, 100.0));
    assert_eq!(fx.canvas.borrow().backing_size(), (400, 200));
    assert_eq!(fx.host.pending_frames(), 1);
    assert_eq!(fx.host.observer_count(), 1);
}

#[test]
fn draw_count_tracks_frames_and_stops_dead() {
    let fx = fixture();
    let counter = Rc::new(Cell::new(0));
    let anim = fx.animate(counting(&counter));

    fx.host.pump_frames(12);
    assert_eq!(counter.get(), 12);
    assert_eq!(anim.stats().frames_drawn, 12);

    anim.stop();
    assert_eq!(anim.state(), AnimationState::Stopped);
    assert_eq!(fx.host.pending_frames(), 0);
    assert_eq!(fx.host.observer_count(), 0);

    fx.host.pump_frames(12);
    assert_eq!(counter.get(), 12);
}

#[test]
fn draw_receives_logical_size_and_clock_seconds() {
    let fx = fixture();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    let _anim = fx.animate(move |ctx, w, h, t| {
        assert_eq!(ctx.transform(), crate::foundation::core::Affine::scale(2.0));
        s.borrow_mut().push((w, h, t));
    });
    fx.host.pump_frames(3);

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    for (i, (w, h, t)) in seen.iter().enumerate() {
        assert_eq!((*w, *h), (200.0, 100.0));
        assert!((t - i as f64 * 0.1).abs() < 1e-12);
    }
}

#[test]
fn explicit_resize_runs_exactly_one_setup() {
    let fx = fixture();
    let anim = fx.animate(|_, _, _, _| {});

    // Not yet delivered to observers: only the explicit call sees it.
    fx.host.set_box_size(Size::new(50.0, 40.0));
    anim.resize();
    assert_eq!(anim.stats().setups, 2);
    assert_eq!(anim.size(), Size::new(50.0, 40.0));
    assert_eq!(fx.canvas.borrow().backing_size(), (100, 80));

    anim.resize();
    assert_eq!(anim.stats().setups, 3);
}

#[test]
fn observed_resize_resets_canvas_without_interrupting_frames() {
    let fx = fixture();
    let counter = Rc::new(Cell::new(0));
    let anim = fx.animate(counting(&counter));
    fx.host.pump_frames(2);

    fx.host.set_device_pixel_ratio(1.0);
    fx.host.pump();
    assert_eq!(anim.stats().setups, 2);
    assert_eq!(fx.canvas.borrow().backing_size(), (200, 100));
    assert_eq!(counter.get(), 3);

    // Unchanged values queue nothing.
    fx.host.set_device_pixel_ratio(1.0);
    fx.host.pump();
    assert_eq!(anim.stats().setups, 2);
}

#[test]
fn stopped_animation_ignores_resizes() {
    let fx = fixture();
    let anim = fx.animate(|_, _, _, _| {});
    anim.stop();

    fx.host.set_box_size(Size::new(10.0, 10.0));
    fx.host.pump();
    anim.resize();
    assert_eq!(anim.stats().setups, 1);
    assert_eq!(fx.canvas.borrow().backing_size(), (400, 200));

    anim.stop();
    assert_eq!(anim.state(), AnimationState::Stopped);
}

#[test]
fn dropping_the_handle_stops_the_loop() {
    let fx = fixture();
    let counter = Rc::new(Cell::new(0));
    drop(fx.animate(counting(&counter)));
    assert_eq!(fx.host.pending_frames(), 0);
    assert_eq!(fx.host.observer_count(), 0);
    fx.host.pump_frames(5);
    assert_eq!(counter.get(), 0);
}

#[test]
fn panicking_draw_halts_the_loop() {
    let fx = fixture();
    let counter = Rc::new(Cell::new(0));
    let c = Rc::clone(&counter);
    let anim = fx.animate(move |_, _, _, _| {
        c.set(c.get() + 1);
        if c.get() == 2 {
            panic!("draw failed");
        }
    });

    fx.host.pump();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| fx.host.pump()));
    assert!(result.is_err());

    fx.host.pump_frames(3);
    assert_eq!(counter.get(), 2);
    assert_eq!(fx.host.pending_frames(), 0);
    assert_eq!(anim.stats().frames_drawn, 1);
    anim.stop();
}

#[test]
fn independent_animations_share_a_host() {
    let fx = fixture();
    let other = Rc::new(RefCell::new(MemCanvas::default()));
    let a = Rc::new(Cell::new(0));
    let b = Rc::new(Cell::new(0));
    let anim_a = fx.animate(counting(&a));
    let anim_b = animate(other, fx.host.clone(), fx.host.clone(), counting(&b));

    fx.host.pump_frames(2);
    anim_a.stop();
    fx.host.pump_frames(2);
    assert_eq!((a.get(), b.get()), (2, 4));
    assert!(anim_b.is_running());
}
