//! Axis-aligned bounding box overlap test.

use invaders_core::types::Rect;

/// True when `a` and `b` overlap on both axes. Boxes that only share an
/// edge do not collide.
pub fn aabb(a: &Rect, b: &Rect) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
