//! Spacer widget implementation

#![allow(non_snake_case)]

use crate::builder;
use crate::modifier::Modifier;
use crate::tree::{NodeKind, UiNode};
use folio_ui_graphics::Size;

/// Creates a fixed-size gap in the surrounding layout.
pub fn Spacer(size: Size) {
    builder::emit(UiNode::new(NodeKind::Spacer { size }, Modifier::empty()));
}
