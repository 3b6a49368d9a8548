//! Tool system and per-gesture interaction state.

use crate::element::Element;
use crate::molecule::AtomId;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Select,
    Draw,
    Erase,
}

impl ToolKind {
    /// Cycle to the next tool.
    pub fn next(self) -> Self {
        match self {
            ToolKind::Select => ToolKind::Draw,
            ToolKind::Draw => ToolKind::Erase,
            ToolKind::Erase => ToolKind::Select,
        }
    }
}

/// The gesture currently in progress, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// Waiting for a pointer press.
    #[default]
    Idle,
    /// Dragging the view; `last` is the previous screen position.
    Pan { last: Point },
    /// Dragging an atom with the select tool.
    Move { atom: AtomId, origin: Point },
    /// Drawing a bond out of `anchor` with the draw tool.
    Bond { anchor: AtomId, origin: Point },
}

impl Gesture {
    /// The atom a drag is anchored at, if any.
    pub fn anchor(&self) -> Option<AtomId> {
        match self {
            Gesture::Move { atom, .. } => Some(*atom),
            Gesture::Bond { anchor, .. } => Some(*anchor),
            Gesture::Idle | Gesture::Pan { .. } => None,
        }
    }
}

/// Manages the current tool and ephemeral interaction state.
///
/// Nothing here is part of the exported snapshot.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Element given to new atoms and click-relabels.
    pub active_element: Element,
    /// Current gesture.
    pub gesture: Gesture,
    /// Pointer position in world space (locked onto a snap when drawing).
    pub pointer: Option<Point>,
    /// Last pointer position in screen space, used to finish cancelled gestures.
    pub last_screen: Option<Point>,
    /// Atom under the pointer while the draw tool is idle.
    pub hovered: Option<AtomId>,
    /// Atom a bond being drawn would attach to.
    pub snap_target: Option<AtomId>,
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the current tool, abandoning any gesture.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.end_gesture();
    }

    /// Begin a gesture at the given world position.
    pub fn begin(&mut self, gesture: Gesture, pointer: Point) {
        log::trace!("begin gesture {:?}", gesture);
        self.gesture = gesture;
        self.pointer = Some(pointer);
        self.hovered = None;
        self.snap_target = None;
    }

    /// Take the active gesture, leaving the manager idle.
    pub fn take_gesture(&mut self) -> Gesture {
        std::mem::take(&mut self.gesture)
    }

    /// Reset all gesture-local state.
    pub fn end_gesture(&mut self) {
        if self.gesture != Gesture::Idle {
            log::trace!("end gesture {:?}", self.gesture);
        }
        self.gesture = Gesture::Idle;
        self.pointer = None;
        self.hovered = None;
        self.snap_target = None;
    }

    /// Check if a gesture is in progress.
    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Select);

        tm.set_tool(ToolKind::Draw);
        assert_eq!(tm.current_tool, ToolKind::Draw);
        assert_eq!(ToolKind::Erase.next(), ToolKind::Select);
    }

    #[test]
    fn test_set_tool_cancels_gesture() {
        let mut tm = ToolManager::new();
        let atom = Uuid::new_v4();
        tm.begin(Gesture::Move { atom, origin: Point::ZERO }, Point::ZERO);
        assert!(tm.is_active());
        assert_eq!(tm.gesture.anchor(), Some(atom));

        tm.set_tool(ToolKind::Erase);
        assert!(!tm.is_active());
        assert!(tm.pointer.is_none());
    }

    #[test]
    fn test_take_gesture_leaves_idle() {
        let mut tm = ToolManager::new();
        tm.begin(Gesture::Pan { last: Point::new(1.0, 2.0) }, Point::ZERO);
        assert_eq!(tm.take_gesture(), Gesture::Pan { last: Point::new(1.0, 2.0) });
        assert_eq!(tm.gesture, Gesture::Idle);
    }

    #[test]
    fn test_tool_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ToolKind::Erase).unwrap(), "\"erase\"");
        let tool: ToolKind = serde_json::from_str("\"draw\"").unwrap();
        assert_eq!(tool, ToolKind::Draw);
    }
}
