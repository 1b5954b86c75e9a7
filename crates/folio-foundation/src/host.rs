//! Ambient visibility facility for the composing thread.
//!
//! The page host installs its [`VisibilityTracker`] around each composition
//! pass; widgets that gate on visibility pick it up from here. When nothing
//! is installed the platform is treated as lacking visibility detection,
//! which makes gated content render immediately (fail-open).

use crate::visibility::VisibilityTracker;
use std::cell::RefCell;

thread_local! {
    static TRACKER_STACK: RefCell<Vec<VisibilityTracker>> = const { RefCell::new(Vec::new()) };
}

/// Guard that pops the tracker stack on drop.
#[must_use = "HostScopeGuard pops the tracker stack on drop"]
pub struct HostScopeGuard;

impl Drop for HostScopeGuard {
    fn drop(&mut self) {
        TRACKER_STACK.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

/// Installs `tracker` as the ambient visibility facility for the scope.
pub fn enter(tracker: &VisibilityTracker) -> HostScopeGuard {
    TRACKER_STACK.with(|stack| {
        stack.borrow_mut().push(tracker.clone());
    });
    HostScopeGuard
}

/// The currently installed tracker, if any.
pub fn current() -> Option<VisibilityTracker> {
    TRACKER_STACK.with(|stack| stack.borrow().last().cloned())
}
