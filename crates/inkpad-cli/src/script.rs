//! Gesture scripts replayed by the command line tool.
//!
//! A script is JSON:
//! ```json
//! {
//!   "width": 200, "height": 120,
//!   "operations": [
//!     { "op": "begin", "x": 10, "y": 10 },
//!     { "op": "move", "x": 40, "y": 30 },
//!     { "op": "end", "x": 90, "y": 60 },
//!     { "op": "set_config", "config": { "is_eraser": true, "line_width": 12 } },
//!     { "op": "undo" }
//!   ]
//! }
//! ```
//! `contact` defaults to 0. `set_config` replaces the whole configuration;
//! omitted fields take their defaults.

use anyhow::{Context, Result};
use inkpad_core::{CanvasConfig, CanvasController, ContactId, GestureEvent, RasterSurface};
use kurbo::Point;
use serde::Deserialize;

/// A canvas size plus the operations to apply to it.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse gesture script")
    }
}

/// One scripted host action.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Begin {
        x: f64,
        y: f64,
        #[serde(default)]
        contact: u64,
    },
    Move {
        x: f64,
        y: f64,
        #[serde(default)]
        contact: u64,
    },
    End {
        x: f64,
        y: f64,
        #[serde(default)]
        contact: u64,
    },
    Cancel {
        #[serde(default)]
        contact: u64,
    },
    Undo,
    Redo,
    SetConfig {
        config: CanvasConfig,
    },
}

impl Operation {
    fn gesture_event(&self) -> Option<GestureEvent> {
        match *self {
            Operation::Begin { x, y, contact } => {
                Some(GestureEvent::begin(Point::new(x, y), ContactId(contact)))
            }
            Operation::Move { x, y, contact } => {
                Some(GestureEvent::moved(Point::new(x, y), ContactId(contact)))
            }
            Operation::End { x, y, contact } => {
                Some(GestureEvent::end(Point::new(x, y), ContactId(contact)))
            }
            Operation::Cancel { contact } => Some(GestureEvent::cancel(ContactId(contact))),
            Operation::Undo | Operation::Redo | Operation::SetConfig { .. } => None,
        }
    }
}

/// Counters collected while replaying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Gesture events the controller accepted.
    pub accepted: usize,
    /// Gesture events the controller ignored.
    pub ignored: usize,
    /// Undo/redo requests that changed the canvas.
    pub history_steps: usize,
    /// Redraw requests raised by the controller.
    pub redraws: usize,
}

/// Apply `operations` to the controller in order.
pub fn replay<S: RasterSurface>(
    controller: &mut CanvasController<S>,
    operations: &[Operation],
) -> Result<ReplaySummary> {
    let mut summary = ReplaySummary::default();

    for (index, operation) in operations.iter().enumerate() {
        if let Some(event) = operation.gesture_event() {
            match controller.handle_event(event) {
                Ok(()) => summary.accepted += 1,
                Err(e) => {
                    log::debug!("Operation {} ignored: {}", index, e);
                    summary.ignored += 1;
                }
            }
        } else {
            match operation {
                Operation::Undo => summary.history_steps += usize::from(controller.undo()),
                Operation::Redo => summary.history_steps += usize::from(controller.redo()),
                Operation::SetConfig { config } => {
                    controller
                        .set_config(config.clone())
                        .with_context(|| format!("Invalid configuration at operation {}", index))?;
                }
                _ => {}
            }
        }

        if controller.take_redraw_request() {
            summary.redraws += 1;
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkpad_core::ImageSize;
    use inkpad_render::PixmapSurface;

    const SCRIPT: &str = r#"{
        "width": 64,
        "height": 64,
        "operations": [
            { "op": "begin", "x": 4, "y": 4 },
            { "op": "move", "x": 10, "y": 8 },
            { "op": "begin", "x": 50, "y": 50, "contact": 7 },
            { "op": "move", "x": 16, "y": 14 },
            { "op": "move", "x": 22, "y": 20 },
            { "op": "move", "x": 28, "y": 26 },
            { "op": "end", "x": 40, "y": 36 },
            { "op": "begin", "x": 4, "y": 60 },
            { "op": "cancel" },
            { "op": "undo" },
            { "op": "undo" },
            { "op": "undo" },
            { "op": "redo" }
        ]
    }"#;

    fn controller_for(script: &Script) -> CanvasController<PixmapSurface> {
        CanvasController::new(
            PixmapSurface::new(),
            ImageSize::new(script.width, script.height),
            CanvasConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_replay_script() {
        let script = Script::from_json(SCRIPT).unwrap();
        let mut controller = controller_for(&script);

        let summary = replay(&mut controller, &script.operations).unwrap();

        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.accepted, 8);
        // Two undos step back to the base, the third hits the floor
        assert_eq!(summary.history_steps, 3);
        assert_eq!(controller.history().backlog_len(), 2);
        assert!(!controller.current_image().is_blank());
    }

    #[test]
    fn test_set_config_rejects_invalid_values() {
        let script = Script::from_json(
            r#"{ "width": 8, "height": 8,
                 "operations": [ { "op": "set_config", "config": { "undo_depth": 0 } } ] }"#,
        )
        .unwrap();
        let mut controller = controller_for(&script);

        assert!(replay(&mut controller, &script.operations).is_err());
    }

    #[test]
    fn test_unknown_operation() {
        let result = Script::from_json(r#"{ "width": 8, "height": 8, "operations": [ { "op": "zoom" } ] }"#);
        assert!(result.is_err());
    }
}
