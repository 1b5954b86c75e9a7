//! Row widget implementation

#![allow(non_snake_case)]

use crate::builder;
use crate::modifier::Modifier;
use crate::tree::NodeKind;

/// Specification for Row layout behavior.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RowSpec {
    pub spacing: f32,
}

impl RowSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }
}

pub fn Row<F>(modifier: Modifier, spec: RowSpec, content: F)
where
    F: FnOnce(),
{
    builder::emit_container(
        NodeKind::Row {
            spacing: spec.spacing,
        },
        modifier,
        content,
    );
}
