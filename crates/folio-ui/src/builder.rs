//! Thread-local emission context for widget functions.
//!
//! Widget calls run inside a composition pass and append nodes to the
//! frame opened by their parent container. The page host opens the root
//! frame around the whole pass via [`build_tree`].

use crate::modifier::Modifier;
use crate::tree::{NodeKind, UiNode};
use std::cell::RefCell;

thread_local! {
    static FRAME_STACK: RefCell<Vec<Vec<UiNode>>> = const { RefCell::new(Vec::new()) };
}

/// Runs `content` with an open root frame and returns the resulting tree.
pub fn build_tree(content: impl FnOnce()) -> UiNode {
    FRAME_STACK.with(|stack| stack.borrow_mut().push(Vec::new()));
    content();
    let children = FRAME_STACK.with(|stack| {
        stack
            .borrow_mut()
            .pop()
            .expect("build_tree: frame stack underflow")
    });
    UiNode::with_children(NodeKind::Column { spacing: 0.0 }, Modifier::empty(), children)
}

/// Appends a finished node to the innermost open frame.
pub(crate) fn emit(node: UiNode) {
    FRAME_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        let frame = stack
            .last_mut()
            .expect("widget emitted outside build_tree scope");
        frame.push(node);
    });
}

/// Opens a child frame for `content` and emits a container node around
/// whatever it produced.
pub(crate) fn emit_container(kind: NodeKind, modifier: Modifier, content: impl FnOnce()) {
    FRAME_STACK.with(|stack| stack.borrow_mut().push(Vec::new()));
    content();
    let children = FRAME_STACK.with(|stack| {
        stack
            .borrow_mut()
            .pop()
            .expect("emit_container: frame stack underflow")
    });
    emit(UiNode::with_children(kind, modifier, children));
}
