//! Visibility-gated deferred mounting.
//!
//! A [`DeferredGate`] delays instantiating an expensive subtree until the
//! region that will host it is about to scroll into view, then commits to
//! the mounted state permanently. The gate is strictly one-shot: once
//! `Visible` it never re-observes, no matter how the region later moves
//! relative to the viewport.
//!
//! The tracker binding is a scoped acquisition. It is taken when the gate
//! starts observing and lives *inside* the `Observing` variant, so "visible
//! with a live binding" is unrepresentable, and it is released on exactly
//! one of two paths: the first qualifying intersection event, or
//! [`DeferredGate::teardown`] when the host region leaves the layout first.

use crate::visibility::{RegionHandle, TrackerBinding, VisibilityTracker};
use folio_ui_graphics::Dp;
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_THRESHOLD: f32 = 0.1;
pub const DEFAULT_PROXIMITY_MARGIN: Dp = Dp(50.0);

/// Gate lifecycle. Transitions only move forward.
pub enum GateState {
    /// Created, not yet watching a region.
    Unobserved,
    /// Watching; owns the tracker binding for its region.
    Observing(TrackerBinding),
    /// Content committed. Terminal.
    Visible,
}

impl GateState {
    pub fn name(&self) -> &'static str {
        match self {
            GateState::Unobserved => "unobserved",
            GateState::Observing(_) => "observing",
            GateState::Visible => "visible",
        }
    }
}

struct GateInner {
    state: GateState,
    threshold: f32,
    proximity_margin: Dp,
    on_visible: Option<Box<dyn FnOnce()>>,
}

/// One visibility-gated region.
#[derive(Clone)]
pub struct DeferredGate {
    inner: Rc<RefCell<GateInner>>,
}

impl DeferredGate {
    /// New gate in `Unobserved`. `threshold` is the minimum fraction of the
    /// region's area that must be inside the (margin-expanded) viewport,
    /// clamped to `[0, 1]`.
    pub fn new(threshold: f32, proximity_margin: Dp) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GateInner {
                state: GateState::Unobserved,
                threshold: threshold.clamp(0.0, 1.0),
                proximity_margin,
                on_visible: None,
            })),
        }
    }

    /// Hook fired exactly once, on the transition to `Visible`.
    pub fn on_visible(self, hook: impl FnOnce() + 'static) -> Self {
        self.inner.borrow_mut().on_visible = Some(Box::new(hook));
        self
    }

    pub fn threshold(&self) -> f32 {
        self.inner.borrow().threshold
    }

    pub fn proximity_margin(&self) -> Dp {
        self.inner.borrow().proximity_margin
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.inner.borrow().state, GateState::Visible)
    }

    pub fn is_observing(&self) -> bool {
        matches!(self.inner.borrow().state, GateState::Observing(_))
    }

    pub fn state_name(&self) -> &'static str {
        self.inner.borrow().state.name()
    }

    /// Starts watching `region`. Valid only from `Unobserved`; any later
    /// call is a state-guarded no-op.
    ///
    /// With an unavailable tracker the callback fires synchronously inside
    /// `bind` and the gate is already `Visible` when this returns.
    pub fn attach(&self, tracker: &VisibilityTracker, region: &RegionHandle) {
        let (threshold, margin) = {
            let mut inner = self.inner.borrow_mut();
            if !matches!(inner.state, GateState::Unobserved) {
                log::warn!(
                    "deferred gate attach ignored in state `{}`",
                    inner.state.name()
                );
                return;
            }
            // Reserve the observing slot before binding; the fail-open path
            // calls back synchronously from bind and must find `Observing`.
            inner.state = GateState::Observing(TrackerBinding::inert());
            (inner.threshold, inner.proximity_margin)
        };

        let gate = Rc::downgrade(&self.inner);
        let binding = tracker.bind(region, threshold, margin, move |intersecting| {
            if let Some(inner) = gate.upgrade() {
                DeferredGate { inner }.on_intersection(intersecting);
            }
        });

        let mut inner = self.inner.borrow_mut();
        match &mut inner.state {
            GateState::Observing(slot) => {
                // The inert placeholder is overwritten; dropping it is a no-op.
                *slot = binding;
                log::trace!("deferred gate observing (threshold {threshold})");
            }
            // Synchronous fail-open delivery already moved the gate to
            // `Visible`; the returned binding is inert in that mode.
            _ => drop(binding),
        }
    }

    /// Intersection event from the tracker.
    ///
    /// Fires only on `intersecting = true` while `Observing`: the binding
    /// is released within this same invocation, the state becomes
    /// `Visible`, and the on-visible hook runs. Every other combination of
    /// state and event is a no-op: the gate never reacts to the complement
    /// event, and late deliveries after teardown hit a dead handle.
    pub fn on_intersection(&self, intersecting: bool) {
        if !intersecting {
            return;
        }
        let (binding, hook) = {
            let mut inner = self.inner.borrow_mut();
            if !matches!(inner.state, GateState::Observing(_)) {
                return;
            }
            let GateState::Observing(binding) =
                std::mem::replace(&mut inner.state, GateState::Visible)
            else {
                unreachable!("state checked above");
            };
            (binding, inner.on_visible.take())
        };
        log::debug!("deferred gate visible");
        binding.release();
        if let Some(hook) = hook {
            hook();
        }
    }

    /// Releases the binding if observing. Valid from any state, idempotent.
    ///
    /// Called by the host when the region leaves the layout; afterwards any
    /// in-flight intersection delivery finds its watch deregistered and is
    /// dropped by the tracker.
    pub fn teardown(&self) {
        let released = {
            let mut inner = self.inner.borrow_mut();
            if !matches!(inner.state, GateState::Observing(_)) {
                return;
            }
            let GateState::Observing(binding) =
                std::mem::replace(&mut inner.state, GateState::Unobserved)
            else {
                unreachable!("state checked above");
            };
            binding
        };
        log::trace!("deferred gate torn down while observing");
        released.release();
    }
}
