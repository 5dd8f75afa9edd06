use super::*;
use std::rc::Rc;

fn host() -> OfflineHost {
    OfflineHost::with_virtual_clock(
        Fps::new(10, 1).unwrap(),
        0.0,
        Size::new(100.0, 50.0),
        1.0,
    )
}

#[test]
fn virtual_clock_steps_one_frame_per_advance() {
    let mut clock = VirtualClock::new(Fps::new(4, 1).unwrap(), 1.0);
    assert_eq!(clock.now_ms(), 1000.0);
    clock.advance();
    assert_eq!(clock.now_ms(), 1250.0);
    assert_eq!(clock.frame(), 1);
}

#[test]
fn monotonic_clock_never_goes_backwards() {
    let clock = MonotonicClock::new();
    let a = clock.now_ms();
    let b = clock.now_ms();
    assert!(b >= a);
    assert!(a >= 0.0);
}

#[test]
fn callbacks_run_once_with_frame_timestamp() {
    let host = host();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&seen);
    host.request_frame(Box::new(move |ts| s.borrow_mut().push(ts)));

    assert_eq!(host.pump(), 1);
    assert_eq!(host.pump(), 0);
    assert_eq!(*seen.borrow(), vec![0.0]);
    assert!((host.now_ms() - 200.0).abs() < 1e-9);
}

#[test]
fn requests_made_during_a_pump_wait_for_the_next() {
    let host = Rc::new(host());
    let count = Rc::new(Cell::new(0));

    let h = Rc::clone(&host);
    let c = Rc::clone(&count);
    host.request_frame(Box::new(move |_| {
        c.set(c.get() + 1);
        let c2 = Rc::clone(&c);
        h.request_frame(Box::new(move |_| c2.set(c2.get() + 1)));
    }));

    assert_eq!(host.pump(), 1);
    assert_eq!(count.get(), 1);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.pump(), 1);
    assert_eq!(count.get(), 2);
}

#[test]
fn cancelled_requests_never_run() {
    let host = Rc::new(host());
    let ran = Rc::new(Cell::new(false));

    let r = Rc::clone(&ran);
    let id = host.request_frame(Box::new(move |_| r.set(true)));
    host.cancel_frame(id);
    assert_eq!(host.pending_frames(), 0);
    host.pump();
    assert!(!ran.get());

    // Cancelling a sibling in the same batch.
    let victim_ran = Rc::new(Cell::new(false));
    let victim = Rc::new(Cell::new(None));
    let h = Rc::clone(&host);
    let v = Rc::clone(&victim);
    host.request_frame(Box::new(move |_| {
        if let Some(id) = v.get() {
            h.cancel_frame(id);
        }
    }));
    let vr = Rc::clone(&victim_ran);
    victim.set(Some(host.request_frame(Box::new(move |_| vr.set(true)))));
    assert_eq!(host.pump(), 1);
    assert!(!victim_ran.get());
}

#[test]
fn resize_notifications_are_coalesced_and_deduplicated() {
    let host = host();
    let sizes = Rc::new(RefCell::new(Vec::new()));
    let s = Rc::clone(&sizes);
    let id = host.observe_resize(Box::new(move |size| s.borrow_mut().push(size)));

    host.set_box_size(Size::new(100.0, 50.0));
    assert_eq!(host.deliver_resizes(), 0);

    host.set_box_size(Size::new(200.0, 80.0));
    host.set_box_size(Size::new(300.0, 90.0));
    host.pump();
    assert_eq!(*sizes.borrow(), vec![Size::new(300.0, 90.0)]);

    host.set_device_pixel_ratio(2.0);
    assert_eq!(host.deliver_resizes(), 1);

    host.unobserve(id);
    assert_eq!(host.observer_count(), 0);
    host.set_box_size(Size::new(10.0, 10.0));
    assert_eq!(host.deliver_resizes(), 0);
    assert_eq!(sizes.borrow().len(), 2);
}
