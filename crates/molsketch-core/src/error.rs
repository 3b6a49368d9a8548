//! Error types for the editor core.

use crate::molecule::AtomId;
use thiserror::Error;

/// Errors raised by fallible graph and state operations.
///
/// Interactive paths never surface these to the user; they are logged and
/// the offending input is ignored.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Unknown element symbol: {0}")]
    UnknownElement(String),
    #[error("Invalid bond order: {0}")]
    InvalidBondOrder(u8),
    #[error("Bond endpoint not in graph: {0}")]
    MissingAtom(AtomId),
    #[error("Bond would connect atom {0} to itself")]
    SelfBond(AtomId),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
