//! Button widget implementation

#![allow(non_snake_case)]

use crate::builder;
use crate::modifier::Modifier;
use crate::tree::NodeKind;
use std::cell::RefCell;
use std::rc::Rc;

/// Creates a button with click handling.
///
/// The handler is stored in the node tree and invoked by the host's hit
/// testing; content is stacked vertically like a column.
pub fn Button<F, G>(modifier: Modifier, on_click: F, content: G)
where
    F: FnMut() + 'static,
    G: FnOnce(),
{
    let on_click: Rc<RefCell<dyn FnMut()>> = Rc::new(RefCell::new(on_click));
    builder::emit_container(NodeKind::Button { on_click }, modifier, content);
}
