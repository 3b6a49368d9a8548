//! 2D vector helpers on top of kurbo.
//!
//! Addition, subtraction, scaling, length, dot and cross products come from
//! [`kurbo::Vec2`] directly; this module adds the few operations the bond
//! geometry and hit-testing need on top.

use kurbo::{Point, Vec2};

/// Rotate a vector by 90° counter-clockwise (in a y-up frame).
pub fn perpendicular(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Unit vector in the direction of `v`, or `None` for a zero-length vector.
pub fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    if len < f64::EPSILON {
        None
    } else {
        Some(v / len)
    }
}

/// Unsigned angle between two vectors, in radians within `[0, π]`.
///
/// Returns 0 when either vector has zero length.
pub fn angle_between(a: Vec2, b: Vec2) -> f64 {
    if a.hypot2() < f64::EPSILON || b.hypot2() < f64::EPSILON {
        return 0.0;
    }
    a.cross(b).abs().atan2(a.dot(b))
}

/// Distance from `point` to the segment `start..end`, clamped to the segment.
pub fn distance_to_segment(point: Point, start: Point, end: Point) -> f64 {
    let seg = end - start;
    let rel = point - start;

    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        // Degenerate segment
        return rel.hypot();
    }

    let t = (rel.dot(seg) / len_sq).clamp(0.0, 1.0);
    let projection = start + seg * t;
    point.distance(projection)
}
