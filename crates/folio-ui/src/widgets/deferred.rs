//! Deferred widget: placeholder now, content once the region nears view.

#![allow(non_snake_case)]

use crate::builder;
use crate::modifier::Modifier;
use crate::tree::{NodeKind, UiNode};
use folio_core::{remember, useState, with_current_composer, DisposableEffect};
use folio_foundation::{
    host, DeferredGate, RegionHandle, VisibilityTracker, DEFAULT_PROXIMITY_MARGIN,
    DEFAULT_THRESHOLD,
};
use folio_ui_graphics::Dp;

pub const DEFAULT_PLACEHOLDER_EXTENT: Dp = Dp(200.0);

/// Configuration for a deferred region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeferredSpec {
    /// Minimum visible-area fraction that commits the content, in `0..=1`.
    pub threshold: f32,
    /// Viewport-bound expansion applied before intersection testing, so
    /// the mount starts slightly before the region is literally visible.
    pub proximity_margin: Dp,
    /// Reserved layout extent while the content is not yet mounted.
    pub min_placeholder_extent: Dp,
}

impl DeferredSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn proximity_margin(mut self, margin: Dp) -> Self {
        self.proximity_margin = margin;
        self
    }

    pub fn min_placeholder_extent(mut self, extent: Dp) -> Self {
        self.min_placeholder_extent = extent;
        self
    }
}

impl Default for DeferredSpec {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            proximity_margin: DEFAULT_PROXIMITY_MARGIN,
            min_placeholder_extent: DEFAULT_PLACEHOLDER_EXTENT,
        }
    }
}

/// Composes `content` only once the hosting region is about to enter the
/// viewport; until then a layout-stable placeholder reserves the space.
///
/// The commitment is permanent: scrolling away afterwards never unmounts.
/// Each call owns one [`DeferredGate`]; the gate attaches to the ambient
/// visibility facility ([`host`]) after the first pass and is torn down
/// when this widget leaves the composition, whichever state it is in. When
/// no facility is installed the gate opens immediately, so content renders
/// rather than staying hidden.
pub fn Deferred<F>(modifier: Modifier, spec: DeferredSpec, content: F)
where
    F: FnOnce(),
{
    folio_core::with_key(&"Deferred", || {
        let visible = useState(|| false);
        let region = remember(RegionHandle::new);
        let gate = {
            let visible = visible.clone();
            remember(move || {
                DeferredGate::new(spec.threshold, spec.proximity_margin)
                    .on_visible(move || visible.set(true))
            })
        };

        let runtime = with_current_composer(|composer| composer.runtime_handle());
        {
            let gate = gate.with(|gate| gate.clone());
            let region = region.with(|region| region.clone());
            DisposableEffect!((), move |scope| {
                let tracker = host::current().unwrap_or_else(|| {
                    log::warn!("no visibility facility installed; deferred content mounts now");
                    VisibilityTracker::unavailable(runtime)
                });
                gate.attach(&tracker, &region);
                scope.on_dispose(move || gate.teardown())
            });
        }

        if visible.get() {
            builder::emit_container(NodeKind::Column { spacing: 0.0 }, modifier, content);
        } else {
            let region = region.with(|region| region.clone());
            builder::emit(UiNode::new(
                NodeKind::Placeholder {
                    min_extent: spec.min_placeholder_extent,
                    region,
                },
                modifier,
            ));
        }
    });
}
