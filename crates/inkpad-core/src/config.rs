//! Canvas configuration.

use crate::style::{CompositeMode, LineCap, SerializableColor, StrokeStyle};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default number of supported undo steps.
pub const DEFAULT_UNDO_DEPTH: usize = 10;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// User-adjustable drawing settings.
///
/// Changing any field affects the next gesture only; a stroke in progress
/// keeps the style captured when it began.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width in canvas pixels.
    pub line_width: f64,
    /// Stroke opacity (0.0 to 1.0).
    pub opacity: f64,
    /// Compositing used when not erasing.
    pub composite_mode: CompositeMode,
    /// Erase instead of paint, regardless of `composite_mode`.
    pub is_eraser: bool,
    /// End cap shape.
    pub line_cap: LineCap,
    /// Number of supported undo steps (at least 1).
    pub undo_depth: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::blue(),
            line_width: 2.0,
            opacity: 1.0,
            composite_mode: CompositeMode::Normal,
            is_eraser: false,
            line_cap: LineCap::Round,
            undo_depth: DEFAULT_UNDO_DEPTH,
        }
    }
}

impl CanvasConfig {
    /// Parse from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.undo_depth < 1 {
            return Err(ConfigError::Invalid {
                field: "undo_depth",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "line_width",
                reason: format!("must be a positive number, got {}", self.line_width),
            });
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::Invalid {
                field: "opacity",
                reason: format!("must be within 0.0..=1.0, got {}", self.opacity),
            });
        }
        Ok(())
    }

    /// Compositing actually applied, taking the eraser flag into account.
    pub fn effective_composite_mode(&self) -> CompositeMode {
        if self.is_eraser {
            CompositeMode::Erase
        } else {
            self.composite_mode
        }
    }

    /// Snapshot the style for a new stroke.
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            color: self.stroke_color,
            line_width: self.line_width,
            opacity: self.opacity,
            composite_mode: self.effective_composite_mode(),
            line_cap: self.line_cap,
        }
    }
}
