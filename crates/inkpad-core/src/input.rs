//! Pointer gesture events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Identifier of one pointer contact (finger, pen or mouse button).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContactId(pub u64);

/// Phase of a pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Begin,
    Move,
    End,
    Cancel,
}

/// One pointer notification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    /// Location in canvas space. Cancellations may carry none.
    pub position: Option<Point>,
    pub contact: ContactId,
}

impl GestureEvent {
    pub fn begin(position: Point, contact: ContactId) -> Self {
        Self {
            phase: GesturePhase::Begin,
            position: Some(position),
            contact,
        }
    }

    pub fn moved(position: Point, contact: ContactId) -> Self {
        Self {
            phase: GesturePhase::Move,
            position: Some(position),
            contact,
        }
    }

    pub fn end(position: Point, contact: ContactId) -> Self {
        Self {
            phase: GesturePhase::End,
            position: Some(position),
            contact,
        }
    }

    pub fn cancel(contact: ContactId) -> Self {
        Self {
            phase: GesturePhase::Cancel,
            position: None,
            contact,
        }
    }

    /// Cancellation reported together with the last known position.
    pub fn cancel_at(position: Point, contact: ContactId) -> Self {
        Self {
            phase: GesturePhase::Cancel,
            position: Some(position),
            contact,
        }
    }
}
