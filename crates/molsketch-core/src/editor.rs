//! Editor instance: owns the graph, view and history, and turns pointer
//! gestures into committed edits.

use crate::bond_geometry::bond_lines;
use crate::camera::Camera;
use crate::element::Element;
use crate::history::History;
use crate::input::PointerEvent;
use crate::label::render_label;
use crate::molecule::{AtomId, BondId, Molecule, Snapshot};
use crate::smiles::to_smiles;
use crate::snap::snap_bond;
use crate::state::{EditorState, StatePatch};
use crate::tools::{Gesture, ToolKind, ToolManager};
use kurbo::{Line, Point, Size};
use std::fmt;

/// Pointer distance (world units) within which an atom is hit.
pub const ATOM_HIT_RADIUS: f64 = 15.0;

/// Pointer distance (world units) within which a bond is hit.
pub const BOND_HIT_TOLERANCE: f64 = 8.0;

/// Draw gestures shorter than this are clicks, not drags.
pub const CLICK_THRESHOLD: f64 = 5.0;

/// Padding (screen units) kept around content by [`Editor::fit_to_content`].
pub const FIT_PADDING: f64 = 40.0;

/// Callback receiving the full state after every change.
pub type ChangeCallback = Box<dyn FnMut(&EditorState)>;

/// Text drawn at an atom's position.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomLabel {
    pub atom: AtomId,
    pub position: Point,
    pub text: String,
}

/// An interactive molecular structure editor.
pub struct Editor {
    molecule: Molecule,
    history: History,
    camera: Camera,
    tools: ToolManager,
    read_only: bool,
    on_change: Option<ChangeCallback>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("molecule", &self.molecule)
            .field("history_index", &self.history.index())
            .field("camera", &self.camera)
            .field("tools", &self.tools)
            .field("read_only", &self.read_only)
            .finish_non_exhaustive()
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create an editor with an empty drawing.
    pub fn new() -> Self {
        Self::with_snapshot(Snapshot::default())
    }

    /// Create an editor starting from an existing drawing.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            molecule: Molecule::from(snapshot.clone()),
            history: History::new(snapshot),
            camera: Camera::new(),
            tools: ToolManager::new(),
            read_only: false,
            on_change: None,
        }
    }

    /// Register the change callback, replacing any previous one.
    pub fn set_on_change(&mut self, callback: impl FnMut(&EditorState) + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn active_element(&self) -> Element {
        self.tools.active_element
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Enable or disable read-only mode. Read-only editors ignore pointer
    /// input and tool, element and history commands.
    ///
    /// Entering read-only finishes any gesture in progress first.
    pub fn set_read_only(&mut self, read_only: bool) {
        if read_only && self.tools.is_active() {
            self.pointer_cancel();
        }
        self.read_only = read_only;
    }

    /// Snapshot of the full state, as sent to the change callback.
    pub fn state(&self) -> EditorState {
        EditorState {
            atoms: self.molecule.atoms().to_vec(),
            bonds: self.molecule.bonds().to_vec(),
            history: self.history.entries().to_vec(),
            history_index: self.history.index(),
            tool: self.tools.current_tool,
            active_element: self.tools.active_element,
            view: self.camera.view(),
        }
    }

    fn notify(&mut self) {
        if self.on_change.is_none() {
            return;
        }
        let state = self.state();
        if let Some(callback) = self.on_change.as_mut() {
            callback(&state);
        }
    }

    /// Record the live graph as a new history entry.
    fn commit(&mut self) {
        self.history.commit(self.molecule.snapshot());
        self.notify();
    }

    /// Step back one history entry. Returns false if nothing changed.
    pub fn undo(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        let Some(snapshot) = self.history.undo().cloned() else {
            return false;
        };
        self.molecule = Molecule::from(snapshot);
        self.tools.end_gesture();
        self.notify();
        true
    }

    /// Step forward one history entry. Returns false if nothing changed.
    pub fn redo(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        let Some(snapshot) = self.history.redo().cloned() else {
            return false;
        };
        self.molecule = Molecule::from(snapshot);
        self.tools.end_gesture();
        self.notify();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Set the current tool, finishing any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.read_only {
            return;
        }
        if self.tools.is_active() {
            self.pointer_cancel();
        }
        self.tools.set_tool(tool);
        self.notify();
    }

    /// Set the element used for new atoms and relabels.
    pub fn set_element(&mut self, element: Element) {
        if self.read_only {
            return;
        }
        self.tools.active_element = element;
        self.notify();
    }

    /// Remove everything from the drawing, as one undoable step.
    pub fn clear(&mut self) {
        if self.read_only || self.molecule.is_empty() {
            return;
        }
        self.tools.end_gesture();
        self.molecule = Molecule::new();
        self.commit();
    }

    /// Fit the view to the drawing, or reset it if the drawing is empty.
    pub fn fit_to_content(&mut self, viewport: Size) {
        match self.molecule.bounds() {
            Some(bounds) => self.camera.fit_to_bounds(bounds, viewport, FIT_PADDING),
            None => self.camera.reset(),
        }
        self.notify();
    }

    /// Dispatch a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position),
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => self.pointer_up(position),
            PointerEvent::Scroll { position, delta } => self.pointer_wheel(position, delta),
            PointerEvent::Cancel => self.pointer_cancel(),
        }
    }

    /// Handle a pointer press at a screen position.
    pub fn pointer_down(&mut self, screen: Point) {
        if self.read_only {
            return;
        }
        // A press without a release for the previous gesture finishes it first
        if self.tools.is_active() {
            self.pointer_cancel();
        }

        let world = self.camera.screen_to_world(screen);
        self.tools.last_screen = Some(screen);

        let atom_hit = self.molecule.atom_at(world, ATOM_HIT_RADIUS);
        let bond_hit = match atom_hit {
            Some(_) => None,
            None => self.molecule.bond_at(world, BOND_HIT_TOLERANCE),
        };
        let tool = self.tools.current_tool;

        if tool != ToolKind::Draw && atom_hit.is_none() && bond_hit.is_none() {
            self.tools.begin(Gesture::Pan { last: screen }, world);
            return;
        }

        match tool {
            ToolKind::Erase => {
                if let Some(atom) = atom_hit {
                    self.molecule.remove_atom(atom);
                    log::debug!("erased atom {atom}");
                    self.commit();
                } else if let Some(bond) = bond_hit {
                    self.molecule.remove_bond(bond);
                    log::debug!("erased bond {bond}");
                    self.commit();
                }
            }
            ToolKind::Select => {
                if let Some((atom, origin)) = atom_hit.and_then(|id| self.atom_origin(id)) {
                    self.tools.begin(Gesture::Move { atom, origin }, world);
                }
            }
            ToolKind::Draw => {
                if let Some((anchor, origin)) = atom_hit.and_then(|id| self.atom_origin(id)) {
                    self.tools.begin(Gesture::Bond { anchor, origin }, world);
                } else if let Some(bond) = bond_hit {
                    if let Some(order) = self.molecule.cycle_bond_order(bond) {
                        log::debug!("bond {bond} cycled to order {}", order.value());
                    }
                    self.commit();
                } else {
                    let anchor = self.molecule.add_atom(world, self.tools.active_element);
                    self.tools.begin(Gesture::Bond { anchor, origin: world }, world);
                }
            }
        }
    }

    fn atom_origin(&self, id: AtomId) -> Option<(AtomId, Point)> {
        self.molecule.atom(id).map(|a| (id, a.position))
    }

    /// Handle pointer motion at a screen position.
    pub fn pointer_move(&mut self, screen: Point) {
        if self.read_only {
            return;
        }
        let world = self.camera.screen_to_world(screen);
        self.tools.last_screen = Some(screen);

        match self.tools.gesture {
            Gesture::Pan { last } => {
                self.camera.pan(screen - last);
                self.tools.gesture = Gesture::Pan { last: screen };
            }
            Gesture::Move { atom, .. } => {
                self.molecule.set_position(atom, world);
                self.tools.pointer = Some(world);
            }
            Gesture::Bond { anchor, .. } => {
                let snap = snap_bond(&self.molecule, anchor, world);
                self.tools.pointer = Some(snap.point);
                self.tools.snap_target = snap.target;
            }
            Gesture::Idle => {
                if self.tools.current_tool == ToolKind::Draw {
                    self.tools.hovered = self.molecule.atom_at(world, ATOM_HIT_RADIUS);
                }
            }
        }
    }

    /// Handle a pointer release at a screen position.
    pub fn pointer_up(&mut self, screen: Point) {
        if self.read_only {
            return;
        }
        let world = self.camera.screen_to_world(screen);
        self.tools.last_screen = Some(screen);

        match self.tools.take_gesture() {
            Gesture::Idle => {}
            Gesture::Pan { last } => {
                self.camera.pan(screen - last);
                self.notify();
            }
            Gesture::Move { atom, .. } => {
                self.molecule.set_position(atom, world);
                self.commit();
            }
            Gesture::Bond { anchor, origin } => self.finish_bond(anchor, origin, world),
        }
        self.tools.end_gesture();
    }

    /// Complete a draw gesture: relabel on click, otherwise bond to the
    /// snap target or a new atom.
    fn finish_bond(&mut self, anchor: AtomId, origin: Point, world: Point) {
        let element = self.tools.active_element;

        if origin.distance(world) < CLICK_THRESHOLD {
            self.molecule.set_element(anchor, element);
            self.commit();
            return;
        }

        // The target locked during the last move wins over the release position
        let recorded = self
            .tools
            .snap_target
            .filter(|&id| id != anchor && self.molecule.atom(id).is_some());
        let other = match recorded {
            Some(target) => target,
            None => {
                let snap = snap_bond(&self.molecule, anchor, world);
                match snap.target {
                    Some(target) => target,
                    None => self.molecule.add_atom(snap.point, element),
                }
            }
        };

        if other != anchor {
            let existing = self.molecule.find_bond(anchor, other).map(|b| b.id);
            match existing {
                Some(bond) => {
                    if let Some(order) = self.molecule.cycle_bond_order(bond) {
                        log::debug!("bond {bond} cycled to order {}", order.value());
                    }
                }
                None => match self.molecule.add_bond(anchor, other) {
                    Ok(bond) => log::debug!("bond {bond} created"),
                    Err(e) => log::warn!("bond not created: {e}"),
                },
            }
        }
        self.commit();
    }

    /// Handle a wheel event: zoom around the pointer.
    pub fn pointer_wheel(&mut self, screen: Point, delta: f64) {
        if self.read_only {
            return;
        }
        self.camera.wheel(screen, delta);
        self.notify();
    }

    /// The pointer was released outside any tracked target: finish the
    /// gesture as a release at the last known position.
    pub fn pointer_cancel(&mut self) {
        match self.tools.last_screen {
            Some(screen) => self.pointer_up(screen),
            None => self.tools.end_gesture(),
        }
    }

    /// Adopt host-supplied state.
    ///
    /// Returns false, changing nothing, when the patch matches the current
    /// state. Does not call the change callback.
    pub fn apply_patch(&mut self, patch: StatePatch) -> bool {
        let current = self.state();
        let next = current.merged(patch);
        if next == current {
            return false;
        }

        log::debug!(
            "adopting host state: {} atoms, {} bonds, {} history entries",
            next.atoms.len(),
            next.bonds.len(),
            next.history.len()
        );
        let snapshot = Snapshot {
            atoms: next.atoms,
            bonds: next.bonds,
        };
        self.history = History::from_parts(next.history, next.history_index, snapshot.clone());
        self.molecule = Molecule::from(snapshot);
        self.tools.end_gesture();
        self.tools.current_tool = next.tool;
        self.tools.active_element = next.active_element;
        self.camera.set_view(next.view);
        true
    }

    /// Adopt host-supplied state given as loosely-typed JSON.
    ///
    /// Input without `atoms` and `bonds` arrays, or that fails to
    /// deserialize, is ignored.
    pub fn apply_value(&mut self, value: &serde_json::Value) -> bool {
        let shaped = ["atoms", "bonds"]
            .iter()
            .all(|key| value.get(key).is_some_and(serde_json::Value::is_array));
        if !shaped {
            log::debug!("ignoring host state without atom and bond arrays");
            return false;
        }

        match serde_json::from_value::<StatePatch>(value.clone()) {
            Ok(patch) => self.apply_patch(patch),
            Err(e) => {
                log::warn!("ignoring malformed host state: {e}");
                false
            }
        }
    }

    /// Linear notation for the current drawing.
    pub fn notation(&self) -> String {
        to_smiles(&self.molecule)
    }

    /// Line segments for every drawable bond.
    pub fn bond_lines(&self) -> Vec<(BondId, Vec<Line>)> {
        self.molecule
            .bonds()
            .iter()
            .map(|bond| (bond.id, bond_lines(bond, &self.molecule)))
            .filter(|(_, lines)| !lines.is_empty())
            .collect()
    }

    /// Visible atom labels (bonded carbons have none).
    pub fn atom_labels(&self) -> Vec<AtomLabel> {
        self.molecule
            .atoms()
            .iter()
            .map(|atom| AtomLabel {
                atom: atom.id,
                position: atom.position,
                text: render_label(atom, &self.molecule),
            })
            .filter(|label| !label.text.is_empty())
            .collect()
    }

    /// Rubber-band segment for a bond being drawn.
    pub fn preview_bond(&self) -> Option<Line> {
        let Gesture::Bond { anchor, .. } = self.tools.gesture else {
            return None;
        };
        let start = self.molecule.atom(anchor)?.position;
        let end = self.tools.pointer?;
        Some(Line::new(start, end))
    }

    /// Atom under the pointer while the draw tool is idle.
    pub fn hovered_atom(&self) -> Option<AtomId> {
        self.tools.hovered
    }

    /// Atom the bond being drawn would attach to.
    pub fn snap_target(&self) -> Option<AtomId> {
        self.tools.snap_target
    }

    /// Check if a gesture is in progress.
    pub fn is_gesture_active(&self) -> bool {
        self.tools.is_active()
    }
}
