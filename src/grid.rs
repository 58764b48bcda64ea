//! Grid snapping.
//!
//! Positions are quantised per axis to the nearest multiple of the grid
//! unit, rounding half up. The remainder is taken with Euclidean semantics
//! so negative coordinates (tiles hanging off the left or top edge) snap
//! the same way positive ones do.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::geom::{Point, Rect};

/// Snap `value` to the nearest multiple of `unit`.
///
/// A non-positive `unit` leaves the value untouched.
#[must_use]
pub fn snap(value: i32, unit: i32) -> i32 {
    if unit <= 0 {
        return value;
    }
    let excess = value.rem_euclid(unit);
    if excess == 0 {
        value
    } else if excess >= unit - excess {
        value.saturating_add(unit - excess)
    } else {
        value - excess
    }
}

/// Quantise a drag delta to whole grid multiples.
#[must_use]
pub fn snap_delta(delta: i32, unit: i32) -> i32 {
    snap(delta, unit)
}

/// Whether `value` already lies on the grid.
#[must_use]
pub fn is_aligned(value: i32, unit: i32) -> bool {
    unit > 0 && value.rem_euclid(unit) == 0
}

/// Snap both axes of a point.
#[must_use]
pub fn snap_point(pt: Point, unit: i32) -> Point {
    Point::new(snap(pt.x, unit), snap(pt.y, unit))
}

/// Snap the top-left corner of a rectangle, keeping its size.
#[must_use]
pub fn snap_rect(rect: Rect, unit: i32) -> Rect {
    rect.moved_to(snap(rect.x, unit), snap(rect.y, unit))
}

/// Whether the rectangle's top-left corner is on the grid.
#[must_use]
pub fn is_rect_aligned(rect: Rect, unit: i32) -> bool {
    is_aligned(rect.x, unit) && is_aligned(rect.y, unit)
}
