//! Stateless vector and rectangle helpers shared by every gameplay module.
//!
//! World space is 2D with +x to the right and +y pointing down the map
//! (row 0 is the top wall), matching how tile coordinates grow.

use bevy::math::{Rect, Vec2};

/// Euclidean distance between two points.
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Length of a vector.
pub fn length(v: Vec2) -> f32 {
    v.length()
}

/// Unit vector in the direction of `v`. The zero vector stays zero.
pub fn normalize(v: Vec2) -> Vec2 {
    v.normalize_or_zero()
}

/// Unit vector pointing from `from` towards `to`.
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    normalize(to - from)
}

/// True when the rectangles overlap with a positive area.
///
/// Rectangles that only share an edge, and empty rectangles, never intersect.
pub fn intersects(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// True when `a` and `b` are at most `range` apart.
pub fn in_range(a: Vec2, b: Vec2, range: f32) -> bool {
    distance(a, b) <= range
}

/// Rotate a direction by `radians` (counter-clockwise in math convention).
pub fn rotate(v: Vec2, radians: f32) -> Vec2 {
    Vec2::from_angle(radians).rotate(v)
}

/// Axis-aligned box of the given size centred on `center`.
pub fn centered_rect(center: Vec2, size: Vec2) -> Rect {
    Rect::from_center_size(center, size)
}
