//! Retained node tree produced by one composition pass, plus block layout.
//!
//! The tree is rebuilt from scratch on every pass; persistent identity
//! (state, gates, region handles) lives in the composition's slot table,
//! not in nodes. Layout is a single top-down vertical flow: containers get
//! the full available width, rows place children side by side at their
//! intrinsic widths, and text wraps against the width it is given.

use crate::modifier::Modifier;
use crate::widgets::TextSpec;
use folio_foundation::RegionHandle;
use folio_ui_graphics::{Dp, Rect, Size};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// Headless text metrics: average glyph advance and line height as fractions
// of the font size. Close enough for layout-stability purposes.
const GLYPH_ADVANCE: f32 = 0.55;
const LINE_HEIGHT: f32 = 1.5;

pub type ClickHandler = Rc<RefCell<dyn FnMut()>>;

pub enum NodeKind {
    Column { spacing: f32 },
    Row { spacing: f32 },
    Text { content: String, spec: TextSpec },
    Spacer { size: Size },
    Button { on_click: ClickHandler },
    Placeholder { min_extent: Dp, region: RegionHandle },
}

pub struct UiNode {
    pub kind: NodeKind,
    pub modifier: Modifier,
    pub children: Vec<UiNode>,
    pub bounds: Cell<Rect>,
}

impl UiNode {
    pub fn new(kind: NodeKind, modifier: Modifier) -> Self {
        Self {
            kind,
            modifier,
            children: Vec::new(),
            bounds: Cell::new(Rect::ZERO),
        }
    }

    pub fn with_children(kind: NodeKind, modifier: Modifier, children: Vec<UiNode>) -> Self {
        Self {
            kind,
            modifier,
            children,
            bounds: Cell::new(Rect::ZERO),
        }
    }
}

/// Lays out the tree in page coordinates and returns the content height.
///
/// Placeholder nodes publish their final bounds to their region handles as
/// part of this pass, which is what the visibility tracker evaluates
/// against.
pub fn layout(root: &UiNode, width: f32, density: f32) -> f32 {
    layout_node(root, 0.0, 0.0, width, density)
}

fn intrinsic_width(node: &UiNode, density: f32) -> f32 {
    if let Some(fixed) = node.modifier.fixed_width {
        return fixed;
    }
    let inner = match &node.kind {
        NodeKind::Text { content, spec } => {
            content.chars().count() as f32 * spec.font_size * GLYPH_ADVANCE
        }
        NodeKind::Spacer { size } => size.width,
        NodeKind::Placeholder { .. } => 0.0,
        NodeKind::Column { .. } | NodeKind::Button { .. } => node
            .children
            .iter()
            .map(|child| intrinsic_width(child, density))
            .fold(0.0, f32::max),
        NodeKind::Row { spacing } => {
            let children: f32 = node
                .children
                .iter()
                .map(|child| intrinsic_width(child, density))
                .sum();
            let gaps = node.children.len().saturating_sub(1) as f32 * spacing;
            children + gaps
        }
    };
    inner + node.modifier.padding.horizontal_total()
}

fn layout_node(node: &UiNode, x: f32, y: f32, width: f32, density: f32) -> f32 {
    let padding = node.modifier.padding;
    let width = node.modifier.fixed_width.unwrap_or(width);
    let inner_x = x + padding.left;
    let inner_y = y + padding.top;
    let inner_width = (width - padding.horizontal_total()).max(0.0);

    let inner_height = match &node.kind {
        NodeKind::Column { spacing } => {
            let mut cursor = inner_y;
            for (index, child) in node.children.iter().enumerate() {
                if index > 0 {
                    cursor += spacing;
                }
                cursor += layout_node(child, inner_x, cursor, inner_width, density);
            }
            cursor - inner_y
        }
        NodeKind::Row { spacing } => {
            let mut cursor = inner_x;
            let mut tallest: f32 = 0.0;
            for (index, child) in node.children.iter().enumerate() {
                if index > 0 {
                    cursor += spacing;
                }
                let child_width = if child.modifier.fill_max_width {
                    (inner_width - (cursor - inner_x)).max(0.0)
                } else {
                    intrinsic_width(child, density).min(inner_width)
                };
                let child_height = layout_node(child, cursor, inner_y, child_width, density);
                tallest = tallest.max(child_height);
                cursor += child_width;
            }
            tallest
        }
        NodeKind::Text { content, spec } => {
            let text_width = content.chars().count() as f32 * spec.font_size * GLYPH_ADVANCE;
            let lines = if inner_width > 0.0 {
                (text_width / inner_width).ceil().max(1.0)
            } else {
                1.0
            };
            lines * spec.font_size * LINE_HEIGHT
        }
        NodeKind::Spacer { size } => size.height,
        NodeKind::Button { .. } => {
            let mut cursor = inner_y;
            for child in &node.children {
                cursor += layout_node(child, inner_x, cursor, inner_width, density);
            }
            cursor - inner_y
        }
        NodeKind::Placeholder { min_extent, .. } => min_extent.to_px(density),
    };

    let mut height = inner_height + padding.vertical_total();
    if let Some(min_height) = node.modifier.min_height {
        height = height.max(min_height);
    }

    let bounds = Rect::new(x, y, width, height);
    node.bounds.set(bounds);
    if let NodeKind::Placeholder { region, .. } = &node.kind {
        region.set_bounds(bounds);
    }
    height
}

/// Deepest button whose bounds contain the page-coordinate point.
pub fn hit_test_click(node: &UiNode, x: f32, y: f32) -> Option<ClickHandler> {
    if !node.bounds.get().contains(x, y) {
        return None;
    }
    for child in node.children.iter().rev() {
        if let Some(handler) = hit_test_click(child, x, y) {
            return Some(handler);
        }
    }
    match &node.kind {
        NodeKind::Button { on_click } => Some(Rc::clone(on_click)),
        _ => None,
    }
}

/// All text contents in tree order.
pub fn collect_texts(node: &UiNode, out: &mut Vec<String>) {
    if let NodeKind::Text { content, .. } = &node.kind {
        out.push(content.clone());
    }
    for child in &node.children {
        collect_texts(child, out);
    }
}

/// Bounds of the first text node containing `fragment`.
pub fn find_text_bounds(node: &UiNode, fragment: &str) -> Option<Rect> {
    if let NodeKind::Text { content, .. } = &node.kind {
        if content.contains(fragment) {
            return Some(node.bounds.get());
        }
    }
    node.children
        .iter()
        .find_map(|child| find_text_bounds(child, fragment))
}

pub fn count_placeholders(node: &UiNode) -> usize {
    let own = usize::from(matches!(node.kind, NodeKind::Placeholder { .. }));
    own + node
        .children
        .iter()
        .map(count_placeholders)
        .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> UiNode {
        UiNode::new(
            NodeKind::Text {
                content: content.into(),
                spec: TextSpec::default(),
            },
            Modifier::empty(),
        )
    }

    #[test]
    fn test_column_stacks_children_with_spacing() {
        let root = UiNode::with_children(
            NodeKind::Column { spacing: 10.0 },
            Modifier::empty(),
            vec![text("one"), text("two")],
        );
        let height = layout(&root, 800.0, 1.0);
        // Two single-line texts at 16px * 1.5 plus one 10px gap.
        assert_eq!(height, 24.0 + 10.0 + 24.0);
        let first = root.children[0].bounds.get();
        let second = root.children[1].bounds.get();
        assert_eq!(first.y, 0.0);
        assert_eq!(second.y, 34.0);
    }

    #[test]
    fn test_placeholder_reports_bounds_to_region() {
        let region = RegionHandle::new();
        let root = UiNode::with_children(
            NodeKind::Column { spacing: 0.0 },
            Modifier::empty(),
            vec![
                UiNode::new(
                    NodeKind::Spacer {
                        size: Size::new(0.0, 500.0),
                    },
                    Modifier::empty(),
                ),
                UiNode::new(
                    NodeKind::Placeholder {
                        min_extent: Dp(200.0),
                        region: region.clone(),
                    },
                    Modifier::empty(),
                ),
            ],
        );
        let height = layout(&root, 800.0, 1.0);
        assert_eq!(height, 700.0);
        assert_eq!(region.bounds(), Rect::new(0.0, 500.0, 800.0, 200.0));
    }

    #[test]
    fn test_min_height_modifier_wins_over_content() {
        let node = UiNode::with_children(
            NodeKind::Column { spacing: 0.0 },
            Modifier::empty().min_height(300.0),
            vec![text("short")],
        );
        assert_eq!(layout(&node, 800.0, 1.0), 300.0);
    }
}
