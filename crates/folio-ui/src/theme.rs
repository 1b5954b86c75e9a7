//! Light/dark palette for the page.

use folio_ui_graphics::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub accent: Color,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            background: Color(0.98, 0.98, 0.97, 1.0),
            surface: Color(1.0, 1.0, 1.0, 1.0),
            text_primary: Color(0.12, 0.12, 0.14, 1.0),
            text_muted: Color(0.42, 0.44, 0.48, 1.0),
            accent: Color(0.20, 0.45, 0.90, 1.0),
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color(0.09, 0.10, 0.12, 1.0),
            surface: Color(0.13, 0.14, 0.17, 1.0),
            text_primary: Color(0.93, 0.94, 0.95, 1.0),
            text_muted: Color(0.62, 0.64, 0.68, 1.0),
            accent: Color(0.35, 0.58, 0.95, 1.0),
        }
    }
}
