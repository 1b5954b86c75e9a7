//! Layout/decoration modifiers, combined with a builder chain.

use folio_ui_graphics::{Color, EdgeInsets};

/// Accumulated layout and decoration hints for one node.
///
/// Chained calls merge: paddings add up, later wins for scalar hints.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Modifier {
    pub(crate) padding: EdgeInsets,
    pub(crate) min_height: Option<f32>,
    pub(crate) fixed_width: Option<f32>,
    pub(crate) fill_max_width: bool,
    pub(crate) background: Option<Color>,
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn padding(mut self, all: f32) -> Self {
        self.padding = self.padding + EdgeInsets::uniform(all);
        self
    }

    pub fn padding_insets(mut self, insets: EdgeInsets) -> Self {
        self.padding = self.padding + insets;
        self
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = Some(height);
        self
    }

    pub fn width(mut self, width: f32) -> Self {
        self.fixed_width = Some(width);
        self
    }

    pub fn fill_max_width(mut self) -> Self {
        self.fill_max_width = true;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    /// Merges `other` on top of `self`.
    pub fn then(mut self, other: Modifier) -> Self {
        self.padding = self.padding + other.padding;
        if other.min_height.is_some() {
            self.min_height = other.min_height;
        }
        if other.fixed_width.is_some() {
            self.fixed_width = other.fixed_width;
        }
        self.fill_max_width |= other.fill_max_width;
        if other.background.is_some() {
            self.background = other.background;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_then_merges_padding_and_overrides_scalars() {
        let merged = Modifier::empty()
            .padding(10.0)
            .min_height(100.0)
            .then(Modifier::empty().padding(5.0).min_height(250.0));
        assert_eq!(merged.padding, EdgeInsets::uniform(15.0));
        assert_eq!(merged.min_height, Some(250.0));
    }
}
