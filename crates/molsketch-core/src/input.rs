//! Pointer events delivered by the host.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in screen coordinates.
///
/// One event is processed to completion before the next is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
    },
    Up {
        position: Point,
    },
    Move {
        position: Point,
    },
    /// Wheel delta; positive values zoom out.
    Scroll {
        position: Point,
        delta: f64,
    },
    /// The pointer was released outside any tracked target.
    Cancel,
}

impl PointerEvent {
    /// Screen position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Up { position }
            | PointerEvent::Move { position }
            | PointerEvent::Scroll { position, .. } => Some(*position),
            PointerEvent::Cancel => None,
        }
    }
}
