//! State objects exchanged with the host application.

use crate::camera::View;
use crate::element::Element;
use crate::error::EditorResult;
use crate::molecule::{Atom, Bond, Snapshot};
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Full editor state, handed to the change callback.
///
/// This is a value: the host may keep or store it, but changes to it have no
/// effect on the editor until supplied back through `Editor::apply_patch`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorState {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    pub history: Vec<Snapshot>,
    pub history_index: usize,
    pub tool: ToolKind,
    pub active_element: Element,
    pub view: View,
}

impl EditorState {
    /// Serialize the state to JSON.
    pub fn to_json(&self) -> EditorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a state from JSON.
    pub fn from_json(json: &str) -> EditorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Overlay a patch, keeping current values for anything it leaves out.
    pub fn merged(&self, patch: StatePatch) -> Self {
        Self {
            atoms: patch.atoms,
            bonds: patch.bonds,
            history: patch.history.unwrap_or_else(|| self.history.clone()),
            history_index: patch.history_index.unwrap_or(self.history_index),
            tool: patch.tool.unwrap_or(self.tool),
            active_element: patch.active_element.unwrap_or(self.active_element),
            view: patch.view.unwrap_or(self.view),
        }
    }
}

/// Partial state supplied by the host.
///
/// Atoms and bonds are required; every other field defaults to the editor's
/// current value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePatch {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
    #[serde(default)]
    pub history: Option<Vec<Snapshot>>,
    #[serde(default)]
    pub history_index: Option<usize>,
    #[serde(default)]
    pub tool: Option<ToolKind>,
    #[serde(default)]
    pub active_element: Option<Element>,
    #[serde(default)]
    pub view: Option<View>,
}

impl StatePatch {
    /// A patch replacing only the graph.
    pub fn graph(snapshot: Snapshot) -> Self {
        Self {
            atoms: snapshot.atoms,
            bonds: snapshot.bonds,
            history: None,
            history_index: None,
            tool: None,
            active_element: None,
            view: None,
        }
    }
}

impl From<EditorState> for StatePatch {
    fn from(state: EditorState) -> Self {
        Self {
            atoms: state.atoms,
            bonds: state.bonds,
            history: Some(state.history),
            history_index: Some(state.history_index),
            tool: Some(state.tool),
            active_element: Some(state.active_element),
            view: Some(state.view),
        }
    }
}
