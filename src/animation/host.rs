//! Host capabilities the animation driver runs on, plus a native single-threaded host.
//!
//! The driver never talks to a window system. It asks a [`FrameScheduler`] for frame callbacks
//! and a [`Region`] for its size, pixel ratio and resize notifications. [`OfflineHost`] provides
//! both for offline rendering and tests: nothing happens until [`OfflineHost::pump`] is called.

use crate::foundation::core::{Fps, Size};
use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::time::Instant;

/// Frame callback; receives the frame timestamp in milliseconds.
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Resize callback; receives the new box size.
pub type ResizeCallback = Box<dyn FnMut(Size)>;

/// Token for one outstanding frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequestId(pub u64);

/// Token for one resize subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u64);

/// One-shot frame callbacks, in the manner of `requestAnimationFrame`.
pub trait FrameScheduler {
    /// Run `callback` on the next frame.
    fn request_frame(&self, callback: FrameCallback) -> FrameRequestId;
    /// Cancel a request that has not run yet. Unknown ids are ignored.
    fn cancel_frame(&self, id: FrameRequestId);
}

/// The container a canvas lives in: the source of truth for logical drawing size.
pub trait Region {
    /// Rendered box size in logical pixels.
    fn box_size(&self) -> Size;
    /// Physical pixels per logical pixel.
    fn device_pixel_ratio(&self) -> f64;
    /// Call `callback` whenever the box size or pixel ratio changes.
    fn observe_resize(&self, callback: ResizeCallback) -> ObserverId;
    /// Stop delivering to a subscription. Unknown ids are ignored.
    fn unobserve(&self, id: ObserverId);
}

/// Monotonic time source for frame timestamps.
pub trait Clock {
    fn now_ms(&self) -> f64;
    /// Move to the next frame's time. Wall clocks ignore this.
    fn advance(&mut self);
}

/// Deterministic clock stepping one frame per [`Clock::advance`].
#[derive(Clone, Copy, Debug)]
pub struct VirtualClock {
    fps: Fps,
    start_secs: f64,
    frame: u64,
}

impl VirtualClock {
    pub fn new(fps: Fps, start_secs: f64) -> Self {
        Self {
            fps,
            start_secs,
            frame: 0,
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> f64 {
        (self.start_secs + self.fps.frames_to_secs(self.frame)) * 1000.0
    }

    fn advance(&mut self) {
        self.frame += 1;
    }
}

/// Wall-clock time since the clock was created.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn advance(&mut self) {}
}

/// Native host with a manual frame pump and one resizable region.
pub struct OfflineHost {
    clock: RefCell<Box<dyn Clock>>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<(FrameRequestId, FrameCallback)>>,
    cancelled: RefCell<HashSet<FrameRequestId>>,

    size: Cell<Size>,
    dpr: Cell<f64>,
    resize_dirty: Cell<bool>,
    observers: RefCell<Vec<(ObserverId, ResizeCallback)>>,
    unobserved: RefCell<HashSet<ObserverId>>,
}

impl OfflineHost {
    pub fn new(clock: impl Clock + 'static, size: Size, device_pixel_ratio: f64) -> Self {
        Self {
            clock: RefCell::new(Box::new(clock)),
            next_id: Cell::new(1),
            pending: RefCell::new(Vec::new()),
            cancelled: RefCell::new(HashSet::new()),
            size: Cell::new(size),
            dpr: Cell::new(device_pixel_ratio),
            resize_dirty: Cell::new(false),
            observers: RefCell::new(Vec::new()),
            unobserved: RefCell::new(HashSet::new()),
        }
    }

    /// Host on a [`VirtualClock`] starting at `start_secs`.
    pub fn with_virtual_clock(fps: Fps, start_secs: f64, size: Size, dpr: f64) -> Self {
        Self::new(VirtualClock::new(fps, start_secs), size, dpr)
    }

    fn next_id(&self) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        id
    }

    /// Current clock time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.clock.borrow().now_ms()
    }

    /// Number of frame requests waiting for the next pump.
    pub fn pending_frames(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Number of live resize subscriptions.
    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Change the box size. Observers hear about it on the next pump.
    pub fn set_box_size(&self, size: Size) {
        if self.size.get() != size {
            self.size.set(size);
            self.resize_dirty.set(true);
        }
    }

    /// Change the pixel ratio. Observers hear about it on the next pump.
    pub fn set_device_pixel_ratio(&self, dpr: f64) {
        if self.dpr.get() != dpr {
            self.dpr.set(dpr);
            self.resize_dirty.set(true);
        }
    }

    /// Deliver a queued resize notification to every live observer.
    ///
    /// Returns the number of callbacks invoked.
    pub fn deliver_resizes(&self) -> usize {
        if !self.resize_dirty.replace(false) {
            return 0;
        }
        let size = self.size.get();
        let mut observers = std::mem::take(&mut *self.observers.borrow_mut());
        let mut delivered = 0;
        for (id, callback) in observers.iter_mut() {
            if self.unobserved.borrow().contains(id) {
                continue;
            }
            callback(size);
            delivered += 1;
        }

        let mut unobserved = self.unobserved.borrow_mut();
        let mut current = self.observers.borrow_mut();
        observers.extend(std::mem::take(&mut *current));
        observers.retain(|(id, _)| !unobserved.contains(id));
        unobserved.clear();
        *current = observers;
        tracing::debug!(width = size.width, height = size.height, delivered, "resize delivered");
        delivered
    }

    /// Run one frame: deliver resizes, then every frame callback requested before this call,
    /// then advance the clock. Callbacks requested during the pump wait for the next one.
    ///
    /// Returns the number of frame callbacks run. A panicking callback unwinds out of `pump`
    /// and its requester is not rescheduled.
    pub fn pump(&self) -> usize {
        self.deliver_resizes();

        let now = self.now_ms();
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        let mut ran = 0;
        for (id, callback) in due {
            if self.cancelled.borrow().contains(&id) {
                continue;
            }
            callback(now);
            ran += 1;
        }
        self.cancelled.borrow_mut().clear();
        self.clock.borrow_mut().advance();
        ran
    }

    /// Pump `frames` times, returning the total number of callbacks run.
    pub fn pump_frames(&self, frames: u64) -> usize {
        (0..frames).map(|_| self.pump()).sum()
    }
}

impl FrameScheduler for OfflineHost {
    fn request_frame(&self, callback: FrameCallback) -> FrameRequestId {
        let id = FrameRequestId(self.next_id());
        self.pending.borrow_mut().push((id, callback));
        id
    }

    fn cancel_frame(&self, id: FrameRequestId) {
        let mut pending = self.pending.borrow_mut();
        let before = pending.len();
        pending.retain(|(pending_id, _)| *pending_id != id);
        if pending.len() == before {
            // May be in the batch currently being delivered.
            self.cancelled.borrow_mut().insert(id);
        }
    }
}

impl Region for OfflineHost {
    fn box_size(&self) -> Size {
        self.size.get()
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr.get()
    }

    fn observe_resize(&self, callback: ResizeCallback) -> ObserverId {
        let id = ObserverId(self.next_id());
        self.observers.borrow_mut().push((id, callback));
        id
    }

    fn unobserve(&self, id: ObserverId) {
        // During delivery the list is detached; record the id so it is skipped and dropped.
        self.observers.borrow_mut().retain(|(observer_id, _)| *observer_id != id);
        self.unobserved.borrow_mut().insert(id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/host.rs"]
mod tests;
