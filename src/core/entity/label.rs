//=========================================================================
// Label Entity
//=========================================================================
//
// Text-backed entity data. Labels never take part in overlap or click
// testing.
//
//=========================================================================

use crate::core::geometry::Vec2;
use crate::core::surface::Font;

/// Construction options for a label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOptions {
    pub position: Vec2,
    pub font: Font,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            position: Vec2::new(50.0, 50.0),
            font: Font::default(),
        }
    }
}

impl LabelOptions {
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn with_size(mut self, size: u32) -> Self {
        self.font.size = size;
        self
    }

    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.font.family = family.into();
        self
    }
}

/// Text-backed payload of an [`Entity`](super::Entity).
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: Font,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_arial_30() {
        let options = LabelOptions::default();
        assert_eq!(options.font, Font::new(30, "Arial"));
        assert_eq!(options.position, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn builder_overrides_font() {
        let options = LabelOptions::default().with_size(10).with_family("Courier").at(1.0, 2.0);
        assert_eq!(options.font.to_string(), "10px Courier");
        assert_eq!(options.position, Vec2::new(1.0, 2.0));
    }
}
