//! Headless page host.
//!
//! [`PageShell`] owns the composition, the laid-out node tree, the scroll
//! viewport and the visibility tracker, and drives them through update
//! passes: recompose when dirty, lay the tree out, evaluate region
//! visibility, then drain the task queue so tracker callbacks (and the
//! recompositions they request) land before the host reports idle.

use folio_core::{Composition, RuntimeHandle};
use folio_foundation::{host, Viewport, VisibilityTracker};
use folio_ui::tree::{collect_texts, count_placeholders, find_text_bounds, hit_test_click};
use folio_ui::{build_tree, layout, UiNode};
use folio_ui_graphics::{Rect, Size};

const MAX_SETTLE_PASSES: usize = 64;

pub struct PageShell {
    runtime: RuntimeHandle,
    composition: Composition,
    content: Box<dyn FnMut()>,
    tracker: VisibilityTracker,
    viewport: Viewport,
    density: f32,
    tree: Option<UiNode>,
    content_height: f32,
    needs_render: bool,
}

impl PageShell {
    /// Shell with working visibility detection.
    pub fn new(content: impl FnMut() + 'static) -> Self {
        Self::with_capability(true, Box::new(content))
    }

    /// Shell modeling a platform without visibility detection; deferred
    /// regions mount immediately (fail-open).
    pub fn without_visibility(content: impl FnMut() + 'static) -> Self {
        Self::with_capability(false, Box::new(content))
    }

    fn with_capability(available: bool, content: Box<dyn FnMut()>) -> Self {
        let runtime = RuntimeHandle::new();
        let tracker = if available {
            VisibilityTracker::new(runtime.clone())
        } else {
            VisibilityTracker::unavailable(runtime.clone())
        };
        Self {
            composition: Composition::with_runtime(runtime.clone()),
            runtime,
            content,
            tracker,
            viewport: Viewport::new(Size::new(1280.0, 720.0)),
            density: 1.0,
            tree: None,
            content_height: 0.0,
            needs_render: true,
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport.set_size(Size::new(width, height));
        self.needs_render = true;
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn scroll_offset(&self) -> f32 {
        self.viewport.scroll_offset()
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Scrolls to `y`, clamped to the laid-out content range.
    pub fn scroll_to(&mut self, y: f32) {
        let max_scroll = (self.content_height - self.viewport.size().height).max(0.0);
        let target = if self.content_height > 0.0 {
            y.min(max_scroll)
        } else {
            y
        };
        self.viewport.scroll_to(target);
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.viewport.scroll_offset() + dy);
    }

    /// One host pass. Returns whether more work is pending.
    pub fn update(&mut self) -> bool {
        let mut worked = false;
        if self.needs_render || self.runtime.recompose_requested() {
            self.needs_render = false;
            let _scope = host::enter(&self.tracker);
            let composition = &mut self.composition;
            let content = &mut self.content;
            let tree = build_tree(|| composition.render(&mut **content));
            self.content_height = layout(&tree, self.viewport.size().width, self.density);
            self.tree = Some(tree);
            worked = true;
        }
        self.tracker.evaluate(&self.viewport);
        if self.runtime.drain_ui_tasks() {
            worked = true;
        }
        worked || self.runtime.recompose_requested()
    }

    /// Pumps update passes until the page settles.
    pub fn run_until_idle(&mut self) {
        for _ in 0..MAX_SETTLE_PASSES {
            if !self.update() {
                return;
            }
        }
        log::warn!("page did not settle within {MAX_SETTLE_PASSES} passes");
    }

    /// Click at viewport coordinates. Returns whether a button was hit.
    pub fn click_at(&mut self, x: f32, y: f32) -> bool {
        let page_y = y + self.viewport.scroll_offset();
        let handler = self
            .tree
            .as_ref()
            .and_then(|tree| hit_test_click(tree, x, page_y));
        match handler {
            Some(handler) => {
                (handler.borrow_mut())();
                self.run_until_idle();
                true
            }
            None => false,
        }
    }

    /// All text contents currently mounted, in tree order.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(tree) = &self.tree {
            collect_texts(tree, &mut out);
        }
        out
    }

    pub fn has_text(&self, fragment: &str) -> bool {
        self.texts().iter().any(|text| text.contains(fragment))
    }

    /// Page-coordinate bounds of the first text containing `fragment`.
    pub fn find_text(&self, fragment: &str) -> Option<Rect> {
        self.tree
            .as_ref()
            .and_then(|tree| find_text_bounds(tree, fragment))
    }

    pub fn placeholder_count(&self) -> usize {
        self.tree.as_ref().map(count_placeholders).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::useState;
    use folio_ui::{
        Button, Column, ColumnSpec, Deferred, DeferredSpec, Modifier, Spacer, Text, TextSpec,
    };
    use folio_ui_graphics::{Dp, Size};

    fn tall_page_with_deferred_footer() -> impl FnMut() + 'static {
        move || {
            Column(Modifier::empty(), ColumnSpec::default(), || {
                Text("Top of page", TextSpec::default(), Modifier::empty());
                Spacer(Size::new(0.0, 2000.0));
                Deferred(Modifier::empty(), DeferredSpec::default(), || {
                    Text("Expensive footer", TextSpec::default(), Modifier::empty());
                });
            });
        }
    }

    #[test]
    fn test_deferred_region_mounts_after_scrolling_near() {
        let mut shell = PageShell::new(tall_page_with_deferred_footer());
        shell.set_viewport(800.0, 600.0);
        shell.run_until_idle();

        assert!(shell.has_text("Top of page"));
        assert!(!shell.has_text("Expensive footer"));
        assert_eq!(shell.placeholder_count(), 1);

        shell.scroll_to(1600.0);
        shell.run_until_idle();
        assert!(shell.has_text("Expensive footer"));
        assert_eq!(shell.placeholder_count(), 0);
    }

    #[test]
    fn test_mounted_region_survives_scrolling_back() {
        let mut shell = PageShell::new(tall_page_with_deferred_footer());
        shell.set_viewport(800.0, 600.0);
        shell.run_until_idle();
        shell.scroll_to(1600.0);
        shell.run_until_idle();
        assert!(shell.has_text("Expensive footer"));

        shell.scroll_to(0.0);
        shell.run_until_idle();
        assert!(
            shell.has_text("Expensive footer"),
            "one-shot mount must survive scrolling away"
        );
    }

    #[test]
    fn test_without_visibility_mounts_immediately() {
        let mut shell = PageShell::without_visibility(tall_page_with_deferred_footer());
        shell.set_viewport(800.0, 600.0);
        shell.run_until_idle();
        assert!(shell.has_text("Expensive footer"));
        assert_eq!(shell.placeholder_count(), 0);
    }

    #[test]
    fn test_click_updates_state_and_recomposes() {
        let mut shell = PageShell::new(|| {
            let count = useState(|| 0);
            Column(Modifier::empty(), ColumnSpec::default(), || {
                Text(
                    format!("Count: {}", count.get()),
                    TextSpec::default(),
                    Modifier::empty(),
                );
                let count = count.clone();
                Button(
                    Modifier::empty().padding(8.0),
                    move || count.update(|value| *value += 1),
                    || Text("Increment", TextSpec::default(), Modifier::empty()),
                );
            });
        });
        shell.set_viewport(800.0, 600.0);
        shell.run_until_idle();
        assert!(shell.has_text("Count: 0"));

        let button = shell.find_text("Increment").expect("button text laid out");
        assert!(shell.click_at(button.x + 1.0, button.y + 1.0));
        assert!(shell.has_text("Count: 1"));
    }

    #[test]
    fn test_custom_placeholder_extent_reserves_space() {
        let mut shell = PageShell::new(|| {
            Column(Modifier::empty(), ColumnSpec::default(), || {
                Deferred(
                    Modifier::empty(),
                    DeferredSpec::new()
                        .threshold(0.5)
                        .min_placeholder_extent(Dp(640.0)),
                    || Text("Gated", TextSpec::default(), Modifier::empty()),
                );
                Spacer(Size::new(0.0, 5000.0));
            });
        });
        shell.set_viewport(800.0, 600.0);
        // First pass lays out the placeholder before any tracker delivery.
        shell.update();
        assert_eq!(shell.content_height(), 5640.0);
    }
}
