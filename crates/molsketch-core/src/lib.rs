//! MolSketch Core Library
//!
//! Platform-agnostic core of an interactive 2D molecular structure editor:
//! the atom/bond graph, view transform, undo history, pointer interaction,
//! bond drawing geometry and linear notation.

pub mod bond_geometry;
pub mod camera;
pub mod editor;
pub mod element;
pub mod error;
pub mod geom;
pub mod history;
pub mod input;
pub mod label;
pub mod molecule;
pub mod smiles;
pub mod snap;
pub mod state;
pub mod tools;

pub use bond_geometry::bond_lines;
pub use camera::{Camera, View};
pub use editor::{AtomLabel, Editor};
pub use element::Element;
pub use error::{EditorError, EditorResult};
pub use history::History;
pub use input::PointerEvent;
pub use label::render_label;
pub use molecule::{Atom, AtomId, Bond, BondId, BondOrder, Molecule, Snapshot};
pub use smiles::to_smiles;
pub use snap::{BOND_LENGTH, BondSnap, snap_bond};
pub use state::{EditorState, StatePatch};
pub use tools::{Gesture, ToolKind, ToolManager};
