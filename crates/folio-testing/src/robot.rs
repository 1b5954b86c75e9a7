//! Robot testing harness for headless page testing.
//!
//! Provides programmatic control over a real page host: scripted
//! scrolling, clicks and text queries, with the host pumped to idle after
//! every interaction so assertions always observe settled state.
//!
//! # Example
//!
//! ```
//! use folio_testing::robot::RobotPageRule;
//! # use folio_ui::{Modifier, Text, TextSpec};
//!
//! let mut robot = RobotPageRule::new(800, 600, || {
//!     Text("Hello", TextSpec::default(), Modifier::empty());
//! });
//! robot.wait_for_idle();
//! assert!(robot.has_text("Hello"));
//! ```

use folio_app_shell::PageShell;
use folio_core::RuntimeHandle;
use folio_ui_graphics::Rect;

/// Drives one page instance through scripted interactions.
pub struct RobotPageRule {
    shell: PageShell,
}

impl RobotPageRule {
    /// Launches the page at the given viewport size.
    pub fn new(width: u32, height: u32, content: impl FnMut() + 'static) -> Self {
        let mut shell = PageShell::new(content);
        shell.set_viewport(width as f32, height as f32);
        Self { shell }
    }

    /// Launches the page on a host without visibility detection, to test
    /// fail-open behavior of deferred regions.
    pub fn new_without_visibility(
        width: u32,
        height: u32,
        content: impl FnMut() + 'static,
    ) -> Self {
        let mut shell = PageShell::without_visibility(content);
        shell.set_viewport(width as f32, height as f32);
        Self { shell }
    }

    /// Runtime handle of the hosted page, for binding externally created
    /// state to the page's invalidation loop.
    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.shell.runtime_handle()
    }

    /// Resize the viewport (simulates window resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.shell.set_viewport(width as f32, height as f32);
    }

    /// Pump the page until it's idle (no pending updates).
    pub fn wait_for_idle(&mut self) {
        self.shell.run_until_idle();
    }

    /// Scrolls to an absolute offset and settles.
    pub fn scroll_to(&mut self, y: f32) {
        self.shell.scroll_to(y);
        self.wait_for_idle();
    }

    /// Scrolls by a delta and settles.
    pub fn scroll_by(&mut self, dy: f32) {
        self.shell.scroll_by(dy);
        self.wait_for_idle();
    }

    pub fn scroll_offset(&self) -> f32 {
        self.shell.scroll_offset()
    }

    pub fn content_height(&self) -> f32 {
        self.shell.content_height()
    }

    /// Click at viewport coordinates. Returns whether a button was hit.
    pub fn click_at(&mut self, x: f32, y: f32) -> bool {
        self.shell.click_at(x, y)
    }

    /// Scrolls the first text matching `fragment` into view and clicks it.
    /// Returns false when no such text is mounted or nothing handled the
    /// click.
    pub fn click_text(&mut self, fragment: &str) -> bool {
        let Some(bounds) = self.shell.find_text(fragment) else {
            return false;
        };
        self.shell.scroll_to(bounds.y);
        let viewport_y = bounds.y - self.shell.scroll_offset();
        self.shell
            .click_at(bounds.x + bounds.width / 2.0, viewport_y + bounds.height / 2.0)
    }

    /// All text contents currently mounted, in tree order.
    pub fn texts(&self) -> Vec<String> {
        self.shell.texts()
    }

    pub fn has_text(&self, fragment: &str) -> bool {
        self.shell.has_text(fragment)
    }

    /// Page-coordinate bounds of the first text containing `fragment`.
    pub fn find_text(&self, fragment: &str) -> Option<Rect> {
        self.shell.find_text(fragment)
    }

    /// Number of unmounted deferred regions currently reserving space.
    pub fn placeholder_count(&self) -> usize {
        self.shell.placeholder_count()
    }
}
