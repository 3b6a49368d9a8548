//! Line geometry for drawing bonds.
//!
//! A bond renders as one to three parallel segments. Multiple bonds between
//! two labeled (non-carbon) atoms are drawn symmetrically; otherwise the
//! extra lines are offset to one side and shortened where a neighboring
//! bond on that side would overlap them.

use crate::element::Element;
use crate::geom::{angle_between, perpendicular, unit};
use crate::molecule::{Atom, Bond, BondOrder, Molecule};
use kurbo::{Line, Point, Vec2};
use std::f64::consts::PI;

/// Perpendicular distance between parallel bond lines.
pub const BOND_OFFSET: f64 = 6.0;

/// Side of a bond axis, by the sign of `axis × neighbor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Positive cross product (along the axis normal).
    Left,
    /// Negative cross product.
    Right,
}

impl Side {
    fn sign(self) -> f64 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Smallest neighbor angle on each side of the bond at one endpoint.
#[derive(Debug, Clone, Copy, Default)]
struct SideAngles {
    left: Option<f64>,
    right: Option<f64>,
}

impl SideAngles {
    fn get(self, side: Side) -> Option<f64> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Side score: the minimal angle, or π when the side is empty.
    fn score(self, side: Side) -> f64 {
        self.get(side).unwrap_or(PI)
    }
}

/// Classify the other bonds at `at` by side of `axis` and keep the minimal
/// angle each makes with the bond, measured from `at` toward `toward`.
fn side_angles(
    molecule: &Molecule,
    bond: &Bond,
    at: &Atom,
    toward: Point,
    axis: Vec2,
) -> SideAngles {
    let inward = toward - at.position;
    let mut angles = SideAngles::default();

    for neighbor in molecule.bonds_of(at.id).filter(|b| b.id != bond.id) {
        let Some(other) = neighbor.other(at.id).and_then(|id| molecule.atom(id)) else {
            continue;
        };
        let v = other.position - at.position;
        let cross = axis.cross(v);
        if cross.abs() < f64::EPSILON {
            // Collinear neighbors are on neither side
            continue;
        }

        let angle = angle_between(inward, v);
        let slot = if cross > 0.0 { &mut angles.left } else { &mut angles.right };
        *slot = Some(slot.map_or(angle, |current: f64| current.min(angle)));
    }
    angles
}

/// How far to pull an offset line back from an endpoint.
///
/// `interior` is the angle between the bond and its neighbor at that
/// endpoint. The line stops where it meets their bisector, so it never
/// reaches the neighbor. In terms of the neighbor's deflection `a` from the
/// straight continuation of the bond this is `offset / tan((π - a) / 2)`.
fn trim_distance(interior: Option<f64>, half_length: f64) -> f64 {
    match interior {
        Some(angle) => (BOND_OFFSET / (angle / 2.0).tan()).min(half_length),
        None => 0.0,
    }
}

/// Endpoint-aware geometry for one bond.
struct Frame<'a> {
    source: &'a Atom,
    target: &'a Atom,
    dir: Vec2,
    normal: Vec2,
    half_length: f64,
    at_source: SideAngles,
    at_target: SideAngles,
}

impl Frame<'_> {
    fn center(&self) -> Line {
        Line::new(self.source.position, self.target.position)
    }

    /// Untrimmed parallel line at a signed perpendicular distance.
    fn parallel(&self, distance: f64) -> Line {
        let shift = self.normal * distance;
        Line::new(self.source.position + shift, self.target.position + shift)
    }

    /// Offset line on `side`, shortened at each end that has a neighbor there.
    fn offset(&self, side: Side) -> Line {
        let shift = self.normal * (side.sign() * BOND_OFFSET);
        let trim_source = trim_distance(self.at_source.get(side), self.half_length);
        let trim_target = trim_distance(self.at_target.get(side), self.half_length);
        Line::new(
            self.source.position + shift + self.dir * trim_source,
            self.target.position + shift - self.dir * trim_target,
        )
    }

    /// Side for the second line of a double bond: the lower summed score,
    /// i.e. the more crowded side. Ties go left.
    fn double_bond_side(&self) -> Side {
        let left = self.at_source.score(Side::Left) + self.at_target.score(Side::Left);
        let right = self.at_source.score(Side::Right) + self.at_target.score(Side::Right);
        if left <= right { Side::Left } else { Side::Right }
    }
}

/// Compute the line segments that draw `bond`.
///
/// Returns an empty list when either endpoint is missing from `molecule`.
pub fn bond_lines(bond: &Bond, molecule: &Molecule) -> Vec<Line> {
    let (Some(source), Some(target)) = (molecule.atom(bond.source), molecule.atom(bond.target))
    else {
        return Vec::new();
    };

    let axis = target.position - source.position;
    let Some(dir) = unit(axis).filter(|_| bond.order != BondOrder::Single) else {
        return vec![Line::new(source.position, target.position)];
    };

    let frame = Frame {
        source,
        target,
        dir,
        normal: perpendicular(dir),
        half_length: axis.hypot() / 2.0,
        at_source: side_angles(molecule, bond, source, target.position, axis),
        at_target: side_angles(molecule, bond, target, source.position, axis),
    };

    let labeled = source.element != Element::C && target.element != Element::C;
    match bond.order {
        BondOrder::Single => vec![frame.center()],
        BondOrder::Double if labeled => vec![
            frame.parallel(BOND_OFFSET / 2.0),
            frame.parallel(-BOND_OFFSET / 2.0),
        ],
        BondOrder::Triple if labeled => vec![
            frame.parallel(BOND_OFFSET),
            frame.center(),
            frame.parallel(-BOND_OFFSET),
        ],
        BondOrder::Double => vec![frame.center(), frame.offset(frame.double_bond_side())],
        BondOrder::Triple => vec![
            frame.center(),
            frame.offset(Side::Left),
            frame.offset(Side::Right),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::{AtomId, BondId};

    fn assert_line(line: &Line, x0: f64, y0: f64, x1: f64, y1: f64) {
        let ok = (line.p0.x - x0).abs() < 1e-9
            && (line.p0.y - y0).abs() < 1e-9
            && (line.p1.x - x1).abs() < 1e-9
            && (line.p1.y - y1).abs() < 1e-9;
        assert!(ok, "{line:?} != ({x0}, {y0}) -> ({x1}, {y1})");
    }

    /// A horizontal bond from (0, 0) to (60, 0) of the given order.
    fn axis_bond(
        source: Element,
        target: Element,
        order: BondOrder,
    ) -> (Molecule, AtomId, AtomId, BondId) {
        let mut mol = Molecule::new();
        let s = mol.add_atom(Point::new(0.0, 0.0), source);
        let t = mol.add_atom(Point::new(60.0, 0.0), target);
        let bond = mol.add_bond(s, t).unwrap();
        while mol.bond(bond).unwrap().order != order {
            mol.cycle_bond_order(bond);
        }
        (mol, s, t, bond)
    }

    fn attach(mol: &mut Molecule, to: AtomId, x: f64, y: f64) {
        let n = mol.add_atom(Point::new(x, y), Element::C);
        mol.add_bond(to, n).unwrap();
    }

    fn lines(mol: &Molecule, bond: BondId) -> Vec<Line> {
        bond_lines(mol.bond(bond).unwrap(), mol)
    }

    // 6 / tan(60°): the trim for a neighbor at 120° to the bond.
    const TRIM_120: f64 = 3.4641016151377544;

    #[test]
    fn test_single_bond() {
        let (mol, _, _, bond) = axis_bond(Element::C, Element::O, BondOrder::Single);
        let lines = lines(&mol, bond);
        assert_eq!(lines.len(), 1);
        assert_line(&lines[0], 0.0, 0.0, 60.0, 0.0);
    }

    #[test]
    fn test_symmetric_double_between_labels() {
        let (mol, _, _, bond) = axis_bond(Element::N, Element::O, BondOrder::Double);
        let lines = lines(&mol, bond);
        assert_eq!(lines.len(), 2);
        assert_line(&lines[0], 0.0, 3.0, 60.0, 3.0);
        assert_line(&lines[1], 0.0, -3.0, 60.0, -3.0);
    }

    #[test]
    fn test_symmetric_triple_between_labels() {
        let (mol, _, _, bond) = axis_bond(Element::N, Element::N, BondOrder::Triple);
        let lines = lines(&mol, bond);
        assert_eq!(lines.len(), 3);
        assert_line(&lines[0], 0.0, 6.0, 60.0, 6.0);
        assert_line(&lines[1], 0.0, 0.0, 60.0, 0.0);
        assert_line(&lines[2], 0.0, -6.0, 60.0, -6.0);
    }

    #[test]
    fn test_isolated_double_goes_left_untrimmed() {
        let (mol, _, _, bond) = axis_bond(Element::C, Element::C, BondOrder::Double);
        let lines = lines(&mol, bond);
        assert_eq!(lines.len(), 2);
        assert_line(&lines[0], 0.0, 0.0, 60.0, 0.0);
        assert_line(&lines[1], 0.0, 6.0, 60.0, 6.0);
    }

    #[test]
    fn test_double_bond_prefers_crowded_side() {
        let (mut mol, s, t, bond) = axis_bond(Element::C, Element::C, BondOrder::Double);
        // Both neighbors below the axis, at 120° to the bond
        attach(&mut mol, s, -30.0, -30.0 * 3f64.sqrt());
        attach(&mut mol, t, 90.0, -30.0 * 3f64.sqrt());

        let lines = lines(&mol, bond);
        assert_eq!(lines.len(), 2);
        assert_line(&lines[0], 0.0, 0.0, 60.0, 0.0);
        assert_line(&lines[1], TRIM_120, -6.0, 60.0 - TRIM_120, -6.0);
    }

    #[test]
    fn test_double_bond_mixed_sides() {
        let (mut mol, s, t, bond) = axis_bond(Element::C, Element::C, BondOrder::Double);
        let h = 30.0 * 3f64.sqrt();
        // Left has neighbors at both ends, right only at the target
        attach(&mut mol, s, -30.0, h);
        attach(&mut mol, t, 90.0, h);
        attach(&mut mol, t, 90.0, -h);

        let lines = lines(&mol, bond);
        assert_line(&lines[1], TRIM_120, 6.0, 60.0 - TRIM_120, 6.0);
    }

    #[test]
    fn test_triple_trims_only_crowded_ends() {
        let (mut mol, s, _, bond) = axis_bond(Element::C, Element::C, BondOrder::Triple);
        attach(&mut mol, s, -30.0, 30.0 * 3f64.sqrt());

        let lines = lines(&mol, bond);
        assert_eq!(lines.len(), 3);
        assert_line(&lines[0], 0.0, 0.0, 60.0, 0.0);
        assert_line(&lines[1], TRIM_120, 6.0, 60.0, 6.0);
        assert_line(&lines[2], 0.0, -6.0, 60.0, -6.0);
    }

    #[test]
    fn test_trim_capped_at_half_length() {
        let (mut mol, s, _, bond) = axis_bond(Element::C, Element::C, BondOrder::Triple);
        // Neighbor folded back almost onto the bond
        attach(&mut mol, s, 50.0, 5.0);

        let lines = lines(&mol, bond);
        assert_line(&lines[1], 30.0, 6.0, 60.0, 6.0);
    }

    #[test]
    fn test_near_straight_neighbor_barely_trims() {
        let (mut mol, s, _, bond) = axis_bond(Element::C, Element::C, BondOrder::Triple);
        attach(&mut mol, s, -60.0, 0.5);

        let lines = lines(&mol, bond);
        assert!(lines[1].p0.x > 0.0);
        assert!(lines[1].p0.x < 0.1);
    }

    #[test]
    fn test_acute_neighbor_does_not_cross_offset_line() {
        let (mut mol, s, _, bond) = axis_bond(Element::C, Element::C, BondOrder::Triple);
        // Neighbor at 30° above the bond
        attach(&mut mol, s, 30.0 * 3f64.sqrt(), 30.0);

        let lines = lines(&mol, bond);
        // The neighbor reaches y = 6 at x = 6 / tan(30°)
        let crossing = 6.0 * 3f64.sqrt();
        assert!(lines[1].p0.x > crossing);
        assert!((lines[1].p0.x - 6.0 / 15f64.to_radians().tan()).abs() < 1e-9);
        assert_line(&lines[2], 0.0, -6.0, 60.0, -6.0);
    }

    #[test]
    fn test_collinear_neighbor_ignored() {
        let (mut mol, s, _, bond) = axis_bond(Element::C, Element::C, BondOrder::Triple);
        attach(&mut mol, s, -60.0, 0.0);

        let lines = lines(&mol, bond);
        assert_line(&lines[1], 0.0, 6.0, 60.0, 6.0);
        assert_line(&lines[2], 0.0, -6.0, 60.0, -6.0);
    }

    #[test]
    fn test_dangling_bond_skipped() {
        let (mut mol, _, t, bond) = axis_bond(Element::C, Element::C, BondOrder::Double);
        let stale = mol.bond(bond).unwrap().clone();
        mol.remove_atom(t);
        assert!(bond_lines(&stale, &mol).is_empty());
    }

    #[test]
    fn test_geometry_is_deterministic() {
        let (mut mol, s, t, bond) = axis_bond(Element::C, Element::C, BondOrder::Double);
        attach(&mut mol, s, -20.0, 40.0);
        attach(&mut mol, t, 80.0, -45.0);
        assert_eq!(lines(&mol, bond), lines(&mol, bond));
    }
}
