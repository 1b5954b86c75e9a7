//! Region visibility tracking.
//!
//! [`VisibilityTracker`] is the platform's visibility-detection facility:
//! it watches rectangular regions and reports, per region, when the
//! fraction of the region inside the (margin-expanded) viewport crosses a
//! threshold. Callbacks are delivered through the runtime's task queue,
//! never synchronously from [`VisibilityTracker::bind`], and at most once
//! per actual crossing in either direction.
//!
//! A tracker can also be constructed [`VisibilityTracker::unavailable`],
//! modeling a platform without visibility detection. In that mode `bind`
//! invokes the callback synchronously with `intersecting = true`, so gated
//! content always renders instead of staying hidden forever.

use crate::viewport::Viewport;
use folio_core::RuntimeHandle;
use folio_ui_graphics::{Dp, Rect};
use smallvec::SmallVec;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Mutable bounding box of a watched region, in page coordinates.
///
/// The layout host owns the rect and rewrites it after every layout pass;
/// the tracker holds only a weak reference, so a region removed from the
/// layout makes its watch inert rather than dangling.
#[derive(Clone, Default)]
pub struct RegionHandle {
    rect: Rc<Cell<Rect>>,
}

impl RegionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounds(&self) -> Rect {
        self.rect.get()
    }

    pub fn set_bounds(&self, rect: Rect) {
        self.rect.set(rect);
    }

    fn downgrade(&self) -> Weak<Cell<Rect>> {
        Rc::downgrade(&self.rect)
    }
}

type WatchId = u64;

struct Watch {
    region: Weak<Cell<Rect>>,
    threshold: f32,
    margin_px: f32,
    callback: Rc<dyn Fn(bool)>,
    last_intersecting: Option<bool>,
}

struct TrackerState {
    watches: SmallVec<[(WatchId, Watch); 4]>,
    next_id: WatchId,
}

/// Exclusive handle to one registered watch.
///
/// Dropping the binding deregisters the watch; after that no callback runs
/// for it, including deliveries already sitting in the task queue. A
/// binding from an unavailable tracker is inert and releasing it is a
/// no-op.
pub struct TrackerBinding {
    id: WatchId,
    state: Weak<RefCell<TrackerState>>,
}

impl TrackerBinding {
    pub(crate) fn inert() -> Self {
        Self {
            id: 0,
            state: Weak::new(),
        }
    }

    /// Deregisters the watch. Consumes the binding; the release happens in
    /// `Drop`, so a binding that is simply dropped deregisters too.
    pub fn release(self) {}
}

impl Drop for TrackerBinding {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            let id = self.id;
            state.borrow_mut().watches.retain(|(wid, _)| *wid != id);
        }
    }
}

/// Fraction of `region`'s area inside `bounds`. Zero-area regions report 0.
pub fn intersection_ratio(region: &Rect, bounds: &Rect) -> f32 {
    let area = region.area();
    if area <= 0.0 {
        return 0.0;
    }
    region
        .intersection(bounds)
        .map(|hit| hit.area() / area)
        .unwrap_or(0.0)
}

#[derive(Clone)]
pub struct VisibilityTracker {
    // None models a platform without visibility detection (fail-open).
    state: Option<Rc<RefCell<TrackerState>>>,
    runtime: RuntimeHandle,
    density: f32,
}

impl VisibilityTracker {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            state: Some(Rc::new(RefCell::new(TrackerState {
                watches: SmallVec::new(),
                next_id: 1,
            }))),
            runtime,
            density: 1.0,
        }
    }

    /// Tracker for a platform without visibility detection. `bind` fires
    /// the callback synchronously with `intersecting = true`.
    pub fn unavailable(runtime: RuntimeHandle) -> Self {
        Self {
            state: None,
            runtime,
            density: 1.0,
        }
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn is_available(&self) -> bool {
        self.state.is_some()
    }

    /// Registers interest in one region. The callback fires at most once
    /// per crossing of `threshold`, asynchronously on the runtime's task
    /// queue during a later [`VisibilityTracker::evaluate`].
    pub fn bind(
        &self,
        region: &RegionHandle,
        threshold: f32,
        margin: Dp,
        callback: impl Fn(bool) + 'static,
    ) -> TrackerBinding {
        let Some(state) = &self.state else {
            callback(true);
            return TrackerBinding::inert();
        };
        let mut tracker = state.borrow_mut();
        let id = tracker.next_id;
        tracker.next_id += 1;
        tracker.watches.push((
            id,
            Watch {
                region: region.downgrade(),
                threshold: threshold.clamp(0.0, 1.0),
                margin_px: margin.to_px(self.density),
                callback: Rc::new(callback),
                last_intersecting: None,
            },
        ));
        log::trace!("visibility watch {id} bound (threshold {threshold})");
        TrackerBinding {
            id,
            state: Rc::downgrade(state),
        }
    }

    /// Recomputes every watch against the viewport and schedules callbacks
    /// for watches whose intersection verdict changed.
    ///
    /// The verdict for a watch is `ratio >= threshold`, except that a zero
    /// threshold requires any positive overlap. The first evaluation after
    /// `bind` reports the initial verdict in either direction.
    pub fn evaluate(&self, viewport: &Viewport) {
        let Some(state) = &self.state else { return };

        let mut due: Vec<(WatchId, Rc<dyn Fn(bool)>, bool)> = Vec::new();
        {
            let mut tracker = state.borrow_mut();
            tracker
                .watches
                .retain(|(_, watch)| watch.region.strong_count() > 0);
            let bounds = viewport.bounds();
            for (id, watch) in tracker.watches.iter_mut() {
                let Some(region) = watch.region.upgrade() else {
                    continue;
                };
                let expanded = bounds.outset(watch.margin_px);
                let ratio = intersection_ratio(&region.get(), &expanded);
                let intersecting = if watch.threshold <= 0.0 {
                    ratio > 0.0
                } else {
                    ratio >= watch.threshold
                };
                if watch.last_intersecting != Some(intersecting) {
                    watch.last_intersecting = Some(intersecting);
                    due.push((*id, Rc::clone(&watch.callback), intersecting));
                }
            }
        }

        for (id, callback, intersecting) in due {
            let state = Rc::downgrade(state);
            self.runtime.enqueue_ui_task(Box::new(move || {
                // The binding may have been released between scheduling and
                // delivery; a dead watch must not fire.
                let alive = state
                    .upgrade()
                    .map(|s| s.borrow().watches.iter().any(|(wid, _)| *wid == id))
                    .unwrap_or(false);
                if alive {
                    callback(intersecting);
                }
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_ui_graphics::Size;

    fn events_log() -> (Rc<RefCell<Vec<bool>>>, impl Fn(bool) + 'static) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        (log, move |intersecting| sink.borrow_mut().push(intersecting))
    }

    #[test]
    fn test_callback_is_not_synchronous_with_bind() {
        let runtime = RuntimeHandle::new();
        let tracker = VisibilityTracker::new(runtime.clone());
        let region = RegionHandle::new();
        region.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        let (log, sink) = events_log();

        let binding = tracker.bind(&region, 0.1, Dp(0.0), sink);
        assert!(log.borrow().is_empty(), "bind must never fire synchronously");

        let viewport = Viewport::new(Size::new(800.0, 600.0));
        tracker.evaluate(&viewport);
        assert!(log.borrow().is_empty(), "delivery waits for the task queue");

        runtime.drain_ui_tasks();
        assert_eq!(*log.borrow(), vec![true]);
        binding.release();
    }

    #[test]
    fn test_one_event_per_crossing() {
        let runtime = RuntimeHandle::new();
        let tracker = VisibilityTracker::new(runtime.clone());
        let region = RegionHandle::new();
        region.set_bounds(Rect::new(0.0, 1000.0, 100.0, 100.0));
        let (log, sink) = events_log();
        let _binding = tracker.bind(&region, 0.5, Dp(0.0), sink);

        let mut viewport = Viewport::new(Size::new(800.0, 800.0));
        // Below the fold: initial verdict is "not intersecting".
        tracker.evaluate(&viewport);
        tracker.evaluate(&viewport);
        runtime.drain_ui_tasks();
        assert_eq!(*log.borrow(), vec![false]);

        // Scroll it in; repeated evaluations must not repeat the event.
        viewport.scroll_to(400.0);
        tracker.evaluate(&viewport);
        tracker.evaluate(&viewport);
        runtime.drain_ui_tasks();
        assert_eq!(*log.borrow(), vec![false, true]);

        // And back out again.
        viewport.scroll_to(0.0);
        tracker.evaluate(&viewport);
        runtime.drain_ui_tasks();
        assert_eq!(*log.borrow(), vec![false, true, false]);
    }

    #[test]
    fn test_released_binding_swallows_queued_delivery() {
        let runtime = RuntimeHandle::new();
        let tracker = VisibilityTracker::new(runtime.clone());
        let region = RegionHandle::new();
        region.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        let (log, sink) = events_log();
        let binding = tracker.bind(&region, 0.1, Dp(0.0), sink);

        let viewport = Viewport::new(Size::new(800.0, 600.0));
        tracker.evaluate(&viewport);
        // Release with the delivery still queued: it must not fire.
        binding.release();
        runtime.drain_ui_tasks();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_dropped_region_makes_watch_inert() {
        let runtime = RuntimeHandle::new();
        let tracker = VisibilityTracker::new(runtime.clone());
        let (log, sink) = events_log();
        let binding = {
            let region = RegionHandle::new();
            region.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
            tracker.bind(&region, 0.1, Dp(0.0), sink)
        };

        let viewport = Viewport::new(Size::new(800.0, 600.0));
        tracker.evaluate(&viewport);
        runtime.drain_ui_tasks();
        assert!(log.borrow().is_empty());
        binding.release();
    }

    #[test]
    fn test_unavailable_tracker_fires_synchronously_open() {
        let runtime = RuntimeHandle::new();
        let tracker = VisibilityTracker::unavailable(runtime);
        let region = RegionHandle::new();
        let (log, sink) = events_log();

        let binding = tracker.bind(&region, 0.9, Dp(50.0), sink);
        assert_eq!(*log.borrow(), vec![true]);
        // Releasing an inert binding is a no-op.
        binding.release();
    }

    #[test]
    fn test_zero_threshold_requires_positive_overlap() {
        let runtime = RuntimeHandle::new();
        let tracker = VisibilityTracker::new(runtime.clone());
        let region = RegionHandle::new();
        // Region exactly below the expanded bounds: zero overlap.
        region.set_bounds(Rect::new(0.0, 600.0, 100.0, 100.0));
        let (log, sink) = events_log();
        let _binding = tracker.bind(&region, 0.0, Dp(0.0), sink);

        let viewport = Viewport::new(Size::new(800.0, 600.0));
        tracker.evaluate(&viewport);
        runtime.drain_ui_tasks();
        assert_eq!(*log.borrow(), vec![false]);
    }

    #[test]
    fn test_proximity_margin_fires_ahead_of_visibility() {
        let runtime = RuntimeHandle::new();
        let tracker = VisibilityTracker::new(runtime.clone());
        let region = RegionHandle::new();
        // 30px below the fold: outside the viewport, inside the 50px margin.
        region.set_bounds(Rect::new(0.0, 630.0, 100.0, 100.0));
        let (log, sink) = events_log();
        let _binding = tracker.bind(&region, 0.1, Dp(50.0), sink);

        let viewport = Viewport::new(Size::new(800.0, 600.0));
        tracker.evaluate(&viewport);
        runtime.drain_ui_tasks();
        assert_eq!(*log.borrow(), vec![true]);
    }
}
