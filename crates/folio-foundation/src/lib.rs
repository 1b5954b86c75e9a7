//! Viewport model, visibility tracking and deferred mounting for Folio.

pub mod deferred;
pub mod host;
pub mod viewport;
pub mod visibility;

pub use deferred::{DeferredGate, GateState, DEFAULT_PROXIMITY_MARGIN, DEFAULT_THRESHOLD};
pub use viewport::Viewport;
pub use visibility::{intersection_ratio, RegionHandle, TrackerBinding, VisibilityTracker};
