//! Widgets, modifiers and block layout for Folio

pub mod builder;
pub mod modifier;
pub mod theme;
pub mod tree;
pub mod widgets;

pub use builder::build_tree;
pub use modifier::Modifier;
pub use theme::Theme;
pub use tree::{
    collect_texts, count_placeholders, find_text_bounds, hit_test_click, layout, NodeKind, UiNode,
};
pub use widgets::*;
