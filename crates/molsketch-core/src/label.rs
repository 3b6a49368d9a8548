//! Atom label text and implicit hydrogen counts.

use crate::element::Element;
use crate::molecule::{Atom, Molecule};

/// Map ASCII digits to their Unicode subscript glyphs.
fn subscript(n: u8) -> String {
    n.to_string()
        .chars()
        .map(|c| match c {
            '0' => '₀',
            '1' => '₁',
            '2' => '₂',
            '3' => '₃',
            '4' => '₄',
            '5' => '₅',
            '6' => '₆',
            '7' => '₇',
            '8' => '₈',
            '9' => '₉',
            other => other,
        })
        .collect()
}

/// Hydrogens needed to fill the atom's valence, floored at zero.
pub fn implicit_hydrogens(atom: &Atom, molecule: &Molecule) -> u8 {
    let used = molecule.bond_order_sum(atom.id);
    u32::from(atom.element.valence()).saturating_sub(used) as u8
}

/// Hydrogen group text: "", "H", or "H" followed by a subscript count.
fn hydrogen_group(count: u8) -> String {
    match count {
        0 => String::new(),
        1 => "H".to_string(),
        n => format!("H{}", subscript(n)),
    }
}

/// Label text for an atom, following skeletal drawing conventions.
///
/// Bonded carbons have no label. Isolated atoms other than nitrogen and
/// hydrogen put their hydrogens first ("H₂O"), everything else puts them
/// after the symbol ("NH₃", "OH").
pub fn render_label(atom: &Atom, molecule: &Molecule) -> String {
    let bonded = molecule.degree(atom.id) > 0;
    let hydrogens = hydrogen_group(implicit_hydrogens(atom, molecule));

    match atom.element {
        Element::C if bonded => String::new(),
        Element::C => "CH₄".to_string(),
        Element::N | Element::H => format!("{}{}", atom.element, hydrogens),
        element if !bonded => format!("{}{}", hydrogens, element),
        element => format!("{}{}", element, hydrogens),
    }
}
