//! Linear text notation for the drawn graph.
//!
//! A SMILES-like, bracket-free form: element symbols in depth-first order,
//! `=`/`#` for double/triple bonds, numeric ring-closure labels, parentheses
//! around side branches and `.` between disconnected fragments.

use crate::molecule::{AtomId, BondId, Molecule};
use std::collections::{HashMap, HashSet};

struct Writer<'a> {
    molecule: &'a Molecule,
    visited: HashSet<AtomId>,
    ring_labels: HashMap<BondId, u32>,
    next_label: u32,
}

impl Writer<'_> {
    /// Emit the fragment rooted at `atom`, entered through `parent_bond`.
    fn visit(&mut self, atom: AtomId, parent_bond: Option<BondId>) -> String {
        self.visited.insert(atom);

        let mut out = self
            .molecule
            .atom(atom)
            .map(|a| a.element.symbol().to_string())
            .unwrap_or_default();
        let mut branches: Vec<String> = Vec::new();

        let molecule = self.molecule;
        for bond in molecule.bonds_of(atom) {
            if Some(bond.id) == parent_bond {
                continue;
            }
            let Some(other) = bond.other(atom) else { continue };
            if molecule.atom(other).is_none() {
                continue;
            }

            if self.visited.contains(&other) {
                let label = match self.ring_labels.get(&bond.id) {
                    Some(&label) => label,
                    None => {
                        let label = self.next_label;
                        self.next_label += 1;
                        self.ring_labels.insert(bond.id, label);
                        label
                    }
                };
                out.push_str(bond.order.symbol());
                out.push_str(&label.to_string());
            } else {
                let branch = self.visit(other, Some(bond.id));
                branches.push(format!("{}{}", bond.order.symbol(), branch));
            }
        }

        // All but the last branch are parenthesized side chains
        if let Some(main) = branches.pop() {
            for side in branches {
                out.push('(');
                out.push_str(&side);
                out.push(')');
            }
            out.push_str(&main);
        }
        out
    }
}

/// Serialize a graph to linear notation.
///
/// Traversal follows atom and bond insertion order, so the same graph
/// always produces the same string. An empty graph yields "".
pub fn to_smiles(molecule: &Molecule) -> String {
    let mut writer = Writer {
        molecule,
        visited: HashSet::new(),
        ring_labels: HashMap::new(),
        next_label: 1,
    };

    let mut fragments = Vec::new();
    for atom in molecule.atoms() {
        if !writer.visited.contains(&atom.id) {
            fragments.push(writer.visit(atom.id, None));
        }
    }
    fragments.join(".")
}
