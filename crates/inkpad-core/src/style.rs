//! Stroke styling.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn blue() -> Self {
        Self::new(0, 0, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::blue()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// How new paint combines with the pixels already on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeMode {
    /// Source-over blending.
    #[default]
    Normal,
    /// Clears destination pixels under the stroke (destination-out).
    Erase,
    Multiply,
    Screen,
    Darken,
    Lighten,
}

impl CompositeMode {
    /// Whether the mode removes paint rather than adding it.
    pub fn is_erase(self) -> bool {
        self == CompositeMode::Erase
    }
}

/// Shape of the stroke's open ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineCap {
    #[default]
    Round,
    Butt,
    Square,
}

/// Style of one stroke, captured when its gesture begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width in canvas pixels.
    pub line_width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
    /// Compositing against existing pixels.
    pub composite_mode: CompositeMode,
    /// End cap shape.
    pub line_cap: LineCap,
}

impl StrokeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn color(&self) -> Color {
        self.color.into()
    }

    /// Get the stroke color with opacity applied.
    pub fn color_with_opacity(&self) -> Color {
        let rgba = self.color().to_rgba8();
        let alpha = (rgba.a as f64 * self.opacity.clamp(0.0, 1.0)).round() as u8;
        Color::from_rgba8(rgba.r, rgba.g, rgba.b, alpha)
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::default(),
            line_width: 2.0,
            opacity: 1.0,
            composite_mode: CompositeMode::Normal,
            line_cap: LineCap::Round,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_with_opacity() {
        let style = StrokeStyle {
            color: SerializableColor::new(10, 20, 30, 200),
            opacity: 0.5,
            ..StrokeStyle::default()
        };

        let rgba = style.color_with_opacity().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (10, 20, 30, 100));
    }

    #[test]
    fn test_default_style() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, SerializableColor::blue());
        assert_eq!(style.line_cap, LineCap::Round);
        assert!(!style.composite_mode.is_erase());
    }

    #[test]
    fn test_composite_mode_serde() {
        let json = serde_json::to_string(&CompositeMode::Erase).unwrap();
        assert_eq!(json, "\"erase\"");
    }
}
