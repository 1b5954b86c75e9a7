//! Text widget implementation

#![allow(non_snake_case)]

use crate::builder;
use crate::modifier::Modifier;
use crate::tree::{NodeKind, UiNode};
use folio_ui_graphics::Color;

/// Specification for text rendering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextSpec {
    pub font_size: f32,
    pub color: Option<Color>,
}

impl TextSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

impl Default for TextSpec {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            color: None,
        }
    }
}

pub fn Text(content: impl Into<String>, spec: TextSpec, modifier: Modifier) {
    builder::emit(UiNode::new(
        NodeKind::Text {
            content: content.into(),
            spec,
        },
        modifier,
    ));
}
