//! Scrollable viewport over a vertically laid out page.

use folio_ui_graphics::{Rect, Size};

/// The visible window onto the page: a size plus a vertical scroll offset.
///
/// Page coordinates are absolute; the viewport's bounds slide down as the
/// user scrolls. Horizontal scrolling is not modeled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    scroll_y: f32,
    size: Size,
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self {
            scroll_y: 0.0,
            size,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_y
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.scroll_y = y.max(0.0);
    }

    pub fn scroll_by(&mut self, dy: f32) {
        self.scroll_to(self.scroll_y + dy);
    }

    /// Current visible window in page coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.size.width, self.size.height)
    }
}
