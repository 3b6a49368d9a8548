//! Chemical elements available in the editor palette.

use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elements that can be placed as atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Element {
    #[default]
    C,
    N,
    O,
    H,
    S,
    Cl,
    F,
    P,
    Br,
    I,
}

impl Element {
    /// Every element, in palette order.
    pub const ALL: [Element; 10] = [
        Element::C,
        Element::N,
        Element::O,
        Element::H,
        Element::S,
        Element::Cl,
        Element::F,
        Element::P,
        Element::Br,
        Element::I,
    ];

    /// Element symbol as written in labels and notation.
    pub fn symbol(self) -> &'static str {
        match self {
            Element::C => "C",
            Element::N => "N",
            Element::O => "O",
            Element::H => "H",
            Element::S => "S",
            Element::Cl => "Cl",
            Element::F => "F",
            Element::P => "P",
            Element::Br => "Br",
            Element::I => "I",
        }
    }

    /// Default valence, used to derive implicit hydrogens.
    pub fn valence(self) -> u8 {
        match self {
            Element::C => 4,
            Element::N => 3,
            Element::O => 2,
            Element::H => 1,
            Element::S => 2,
            Element::Cl => 1,
            Element::F => 1,
            Element::P => 5,
            Element::Br => 1,
            Element::I => 1,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = EditorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .into_iter()
            .find(|e| e.symbol() == s)
            .ok_or_else(|| EditorError::UnknownElement(s.to_string()))
    }
}
