//! Snap functionality for bond drawing.

use crate::molecule::{AtomId, Molecule};
use kurbo::{Point, Vec2};

/// Standard bond length in world units.
pub const BOND_LENGTH: f64 = 60.0;

/// Angle snap increment in degrees.
pub const ANGLE_SNAP_INCREMENT: f64 = 30.0;

/// Radius within which the pointer locks onto an existing atom.
pub const SNAP_RADIUS: f64 = 20.0;

/// Snap an angle to the nearest increment.
/// Returns the snapped angle in degrees (0-360).
pub fn snap_angle(angle_degrees: f64, increment: f64) -> f64 {
    let snapped = (angle_degrees / increment).round() * increment;
    // Normalize to 0-360
    if snapped < 0.0 {
        snapped + 360.0
    } else if snapped >= 360.0 {
        snapped - 360.0
    } else {
        snapped
    }
}

/// Candidate endpoint for a bond drawn from `anchor` toward `pointer`.
///
/// The direction snaps to the nearest 30° and the length is always
/// [`BOND_LENGTH`]. A pointer sitting on the anchor points along +x.
pub fn bond_endpoint(anchor: Point, pointer: Point) -> Point {
    let delta = pointer - anchor;
    let angle = if delta.hypot2() < f64::EPSILON {
        0.0
    } else {
        delta.atan2().to_degrees()
    };
    let snapped = snap_angle(angle, ANGLE_SNAP_INCREMENT).to_radians();
    anchor + Vec2::from_angle(snapped) * BOND_LENGTH
}

/// Where a bond-drawing pointer should visually sit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BondSnap {
    /// Locked pointer position.
    pub point: Point,
    /// Existing atom the pointer locked onto, if any.
    pub target: Option<AtomId>,
}

/// Resolve the pointer for a bond drawn from `anchor`.
///
/// Atoms other than the anchor within [`SNAP_RADIUS`] of either the raw
/// pointer or the angle-snapped candidate capture the pointer; the closest
/// one wins. Otherwise the pointer follows the candidate.
pub fn snap_bond(molecule: &Molecule, anchor: AtomId, pointer: Point) -> BondSnap {
    let Some(origin) = molecule.atom(anchor).map(|a| a.position) else {
        return BondSnap { point: pointer, target: None };
    };
    let candidate = bond_endpoint(origin, pointer);

    let nearest = molecule
        .atoms()
        .iter()
        .filter(|a| a.id != anchor)
        .map(|a| {
            let dist = a.position.distance(pointer).min(a.position.distance(candidate));
            (a, dist)
        })
        .filter(|(_, dist)| *dist < SNAP_RADIUS)
        .min_by(|(_, d1), (_, d2)| d1.total_cmp(d2));

    match nearest {
        Some((atom, _)) => BondSnap {
            point: atom.position,
            target: Some(atom.id),
        },
        None => BondSnap {
            point: candidate,
            target: None,
        },
    }
}
