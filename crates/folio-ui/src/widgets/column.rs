//! Column widget implementation

#![allow(non_snake_case)]

use crate::builder;
use crate::modifier::Modifier;
use crate::tree::NodeKind;

/// Specification for Column layout behavior.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ColumnSpec {
    pub spacing: f32,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }
}

pub fn Column<F>(modifier: Modifier, spec: ColumnSpec, content: F)
where
    F: FnOnce(),
{
    builder::emit_container(
        NodeKind::Column {
            spacing: spec.spacing,
        },
        modifier,
        content,
    );
}
