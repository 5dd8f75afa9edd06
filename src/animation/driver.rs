//! The animation driver: one self-rescheduling frame loop per canvas.
//!
//! [`animate`] sets the canvas up, starts the loop and subscribes to container resizes. The
//! returned [`Animation`] is the only way to stop it. Frame and resize callbacks hold weak
//! references, so a dropped or stopped handle can never draw again.

use crate::animation::host::{FrameRequestId, FrameScheduler, ObserverId, Region};
use crate::foundation::core::Size;
use crate::paint::canvas::{CanvasTarget, init_canvas};
use crate::paint::context::Context2d;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Per-frame draw callback: `(ctx, width, height, time_secs)` in logical pixels.
pub type DrawFn = Box<dyn FnMut(&mut Context2d, f64, f64, f64)>;

/// Lifecycle of an [`Animation`]. `Stopped` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Idle,
    Running,
    Stopped,
}

/// Counters for one animation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnimationStats {
    pub frames_drawn: u64,
    pub setups: u64,
}

struct Driver {
    state: AnimationState,
    canvas: Rc<RefCell<dyn CanvasTarget>>,
    container: Rc<dyn Region>,
    draw: DrawFn,
    size: Size,
    pending: Option<FrameRequestId>,
    observer: Option<ObserverId>,
    stats: AnimationStats,
}

impl Driver {
    fn setup(&mut self) {
        let mut canvas = self.canvas.borrow_mut();
        let setup = init_canvas(&mut *canvas, &*self.container);
        self.size = Size::new(setup.width, setup.height);
        self.stats.setups += 1;
    }
}

/// Handle to a running frame loop.
///
/// Dropping the handle stops the loop.
pub struct Animation {
    driver: Rc<RefCell<Driver>>,
    scheduler: Rc<dyn FrameScheduler>,
}

/// Start drawing `draw` into `canvas` every frame.
///
/// The canvas is set up from `container` before this returns, and again whenever the container
/// reports a resize.
pub fn animate(
    canvas: Rc<RefCell<dyn CanvasTarget>>,
    container: Rc<dyn Region>,
    scheduler: Rc<dyn FrameScheduler>,
    draw: impl FnMut(&mut Context2d, f64, f64, f64) + 'static,
) -> Animation {
    let driver = Rc::new(RefCell::new(Driver {
        state: AnimationState::Idle,
        canvas,
        container: Rc::clone(&container),
        draw: Box::new(draw),
        size: Size::ZERO,
        pending: None,
        observer: None,
        stats: AnimationStats::default(),
    }));

    {
        let mut d = driver.borrow_mut();
        d.setup();
        d.state = AnimationState::Running;
    }

    let weak = Rc::downgrade(&driver);
    let observer = container.observe_resize(Box::new(move |_size| on_resize(&weak)));
    driver.borrow_mut().observer = Some(observer);

    schedule(&driver, &scheduler);
    Animation { driver, scheduler }
}

fn on_resize(driver: &Weak<RefCell<Driver>>) {
    let Some(driver) = driver.upgrade() else {
        return;
    };
    let Ok(mut d) = driver.try_borrow_mut() else {
        tracing::warn!("resize delivered while the animation was busy; ignored");
        return;
    };
    if d.state == AnimationState::Running {
        d.setup();
    }
}

fn schedule(driver: &Rc<RefCell<Driver>>, scheduler: &Rc<dyn FrameScheduler>) {
    let weak_driver = Rc::downgrade(driver);
    let weak_scheduler = Rc::downgrade(scheduler);
    let id = scheduler.request_frame(Box::new(move |now_ms| {
        let (Some(driver), Some(scheduler)) = (weak_driver.upgrade(), weak_scheduler.upgrade())
        else {
            return;
        };
        run_frame(&driver, &scheduler, now_ms);
    }));
    driver.borrow_mut().pending = Some(id);
}

fn run_frame(driver: &Rc<RefCell<Driver>>, scheduler: &Rc<dyn FrameScheduler>, now_ms: f64) {
    {
        let mut d = driver.borrow_mut();
        if d.state != AnimationState::Running {
            return;
        }
        d.pending = None;
        let Driver {
            canvas,
            draw,
            size,
            stats,
            ..
        } = &mut *d;
        let mut canvas = canvas.borrow_mut();
        draw(canvas.context(), size.width, size.height, now_ms / 1000.0);
        stats.frames_drawn += 1;
    }
    schedule(driver, scheduler);
}

impl Animation {
    /// Stop the loop: cancel the pending frame and disconnect the resize subscription.
    ///
    /// No draw or resize-triggered setup happens after this returns. Stopping twice is a no-op.
    pub fn stop(&self) {
        let (pending, observer, container, stats) = {
            let mut d = self.driver.borrow_mut();
            if d.state == AnimationState::Stopped {
                return;
            }
            d.state = AnimationState::Stopped;
            (
                d.pending.take(),
                d.observer.take(),
                Rc::clone(&d.container),
                d.stats,
            )
        };
        if let Some(id) = pending {
            self.scheduler.cancel_frame(id);
        }
        if let Some(id) = observer {
            container.unobserve(id);
        }
        tracing::debug!(
            frames_drawn = stats.frames_drawn,
            setups = stats.setups,
            "animation stopped"
        );
    }

    /// Re-run canvas setup from the container's current box, as an observed resize would.
    ///
    /// Ignored once stopped.
    pub fn resize(&self) {
        let mut d = self.driver.borrow_mut();
        if d.state == AnimationState::Running {
            d.setup();
        }
    }

    pub fn state(&self) -> AnimationState {
        self.driver.borrow().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == AnimationState::Running
    }

    /// Logical drawing size from the most recent setup.
    pub fn size(&self) -> Size {
        self.driver.borrow().size
    }

    pub fn stats(&self) -> AnimationStats {
        self.driver.borrow().stats
    }
}

impl Drop for Animation {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
