//! Molecular graph: atoms, bonds and the indexed working graph.

use crate::element::Element;
use crate::error::{EditorError, EditorResult};
use crate::geom::distance_to_segment;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for atoms.
pub type AtomId = Uuid;

/// Unique identifier for bonds.
pub type BondId = Uuid;

/// A labeled vertex with a world-space position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub id: AtomId,
    pub position: Point,
    pub element: Element,
}

impl Atom {
    /// Create an atom with a fresh id.
    pub fn new(position: Point, element: Element) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            element,
        }
    }
}

/// Bond multiplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BondOrder {
    #[default]
    Single,
    Double,
    Triple,
}

impl BondOrder {
    /// Numeric bond order for valence calculations.
    pub fn value(self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
        }
    }

    /// Cycle to the next order (1 → 2 → 3 → 1).
    pub fn next(self) -> Self {
        match self {
            BondOrder::Single => BondOrder::Double,
            BondOrder::Double => BondOrder::Triple,
            BondOrder::Triple => BondOrder::Single,
        }
    }

    /// Symbol used in linear notation (empty for single bonds).
    pub fn symbol(self) -> &'static str {
        match self {
            BondOrder::Single => "",
            BondOrder::Double => "=",
            BondOrder::Triple => "#",
        }
    }
}

impl TryFrom<u8> for BondOrder {
    type Error = EditorError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(BondOrder::Single),
            2 => Ok(BondOrder::Double),
            3 => Ok(BondOrder::Triple),
            other => Err(EditorError::InvalidBondOrder(other)),
        }
    }
}

impl From<BondOrder> for u8 {
    fn from(order: BondOrder) -> Self {
        order.value()
    }
}

/// A typed edge between two distinct atoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub id: BondId,
    pub source: AtomId,
    pub target: AtomId,
    pub order: BondOrder,
}

impl Bond {
    /// Check whether the bond touches the given atom.
    pub fn involves(&self, atom: AtomId) -> bool {
        self.source == atom || self.target == atom
    }

    /// The endpoint opposite `atom`, if `atom` is an endpoint.
    pub fn other(&self, atom: AtomId) -> Option<AtomId> {
        if self.source == atom {
            Some(self.target)
        } else if self.target == atom {
            Some(self.source)
        } else {
            None
        }
    }

    /// Check whether the bond joins `a` and `b`, in either direction.
    pub fn connects(&self, a: AtomId, b: AtomId) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// One immutable state of the drawing.
///
/// This is the unit stored in history and exchanged with the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub atoms: Vec<Atom>,
    pub bonds: Vec<Bond>,
}

/// The live molecular graph, with an id index over its atoms.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Snapshot", into = "Snapshot")]
pub struct Molecule {
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    /// Atom id to position in `atoms`.
    index: HashMap<AtomId, usize>,
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        self.atoms == other.atoms && self.bonds == other.bonds
    }
}

impl From<Snapshot> for Molecule {
    fn from(snapshot: Snapshot) -> Self {
        let mut molecule = Self {
            atoms: snapshot.atoms,
            bonds: snapshot.bonds,
            index: HashMap::new(),
        };
        molecule.rebuild_index();
        molecule
    }
}

impl From<Molecule> for Snapshot {
    fn from(molecule: Molecule) -> Self {
        Self {
            atoms: molecule.atoms,
            bonds: molecule.bonds,
        }
    }
}

impl Molecule {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    fn rebuild_index(&mut self) {
        self.index = self
            .atoms
            .iter()
            .enumerate()
            .map(|(i, atom)| (atom.id, i))
            .collect();
    }

    /// Copy the graph out as an immutable snapshot.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            atoms: self.atoms.clone(),
            bonds: self.bonds.clone(),
        }
    }

    /// All atoms, in insertion order.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// All bonds, in insertion order.
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    /// Check if the graph has no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Get an atom by id.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.index.get(&id).and_then(|&i| self.atoms.get(i))
    }

    fn atom_mut(&mut self, id: AtomId) -> Option<&mut Atom> {
        let i = *self.index.get(&id)?;
        self.atoms.get_mut(i)
    }

    /// Get a bond by id.
    pub fn bond(&self, id: BondId) -> Option<&Bond> {
        self.bonds.iter().find(|b| b.id == id)
    }

    /// Bonds touching the given atom, in bond order.
    pub fn bonds_of(&self, atom: AtomId) -> impl Iterator<Item = &Bond> {
        self.bonds.iter().filter(move |b| b.involves(atom))
    }

    /// Find the bond joining two atoms, if any.
    pub fn find_bond(&self, a: AtomId, b: AtomId) -> Option<&Bond> {
        self.bonds.iter().find(|bond| bond.connects(a, b))
    }

    /// Add an atom at `position` and return its id.
    pub fn add_atom(&mut self, position: Point, element: Element) -> AtomId {
        let atom = Atom::new(position, element);
        let id = atom.id;
        self.index.insert(id, self.atoms.len());
        self.atoms.push(atom);
        id
    }

    /// Add a single bond between two existing, distinct atoms.
    pub fn add_bond(&mut self, source: AtomId, target: AtomId) -> EditorResult<BondId> {
        if source == target {
            return Err(EditorError::SelfBond(source));
        }
        for id in [source, target] {
            if !self.index.contains_key(&id) {
                return Err(EditorError::MissingAtom(id));
            }
        }

        let id = Uuid::new_v4();
        self.bonds.push(Bond {
            id,
            source,
            target,
            order: BondOrder::Single,
        });
        Ok(id)
    }

    /// Remove an atom and every bond touching it.
    pub fn remove_atom(&mut self, id: AtomId) -> Option<Atom> {
        let i = self.index.get(&id).copied()?;
        let atom = self.atoms.remove(i);
        self.bonds.retain(|b| !b.involves(id));
        self.rebuild_index();
        Some(atom)
    }

    /// Remove a single bond.
    pub fn remove_bond(&mut self, id: BondId) -> Option<Bond> {
        let i = self.bonds.iter().position(|b| b.id == id)?;
        Some(self.bonds.remove(i))
    }

    /// Move an atom. Returns false if the atom does not exist.
    pub fn set_position(&mut self, id: AtomId, position: Point) -> bool {
        match self.atom_mut(id) {
            Some(atom) => {
                atom.position = position;
                true
            }
            None => false,
        }
    }

    /// Relabel an atom. Returns false if the atom does not exist.
    pub fn set_element(&mut self, id: AtomId, element: Element) -> bool {
        match self.atom_mut(id) {
            Some(atom) => {
                atom.element = element;
                true
            }
            None => false,
        }
    }

    /// Advance a bond's order (1 → 2 → 3 → 1) and return the new order.
    pub fn cycle_bond_order(&mut self, id: BondId) -> Option<BondOrder> {
        let bond = self.bonds.iter_mut().find(|b| b.id == id)?;
        bond.order = bond.order.next();
        Some(bond.order)
    }

    /// Bonds touching `atom` whose other endpoint is present.
    fn attached_bonds(&self, atom: AtomId) -> impl Iterator<Item = &Bond> {
        self.bonds_of(atom)
            .filter(move |b| b.other(atom).is_some_and(|other| self.index.contains_key(&other)))
    }

    /// Sum of the orders of all bonds linking an atom to another atom.
    pub fn bond_order_sum(&self, atom: AtomId) -> u32 {
        self.attached_bonds(atom).map(|b| u32::from(b.order.value())).sum()
    }

    /// Number of bonds linking an atom to another atom.
    pub fn degree(&self, atom: AtomId) -> usize {
        self.attached_bonds(atom).count()
    }

    /// Find the first atom whose center lies within `radius` of `point`.
    pub fn atom_at(&self, point: Point, radius: f64) -> Option<AtomId> {
        self.atoms
            .iter()
            .find(|a| a.position.distance(point) < radius)
            .map(|a| a.id)
    }

    /// Find the first bond whose segment lies within `tolerance` of `point`.
    ///
    /// Bonds with a missing endpoint are ignored.
    pub fn bond_at(&self, point: Point, tolerance: f64) -> Option<BondId> {
        self.bonds
            .iter()
            .find(|b| {
                match (self.atom(b.source), self.atom(b.target)) {
                    (Some(s), Some(t)) => {
                        distance_to_segment(point, s.position, t.position) < tolerance
                    }
                    _ => false,
                }
            })
            .map(|b| b.id)
    }

    /// Bounding box of all atom centers.
    pub fn bounds(&self) -> Option<Rect> {
        let mut iter = self.atoms.iter();
        let first = iter.next()?;
        Some(iter.fold(Rect::from_points(first.position, first.position), |r, a| {
            r.union_pt(a.position)
        }))
    }
}
