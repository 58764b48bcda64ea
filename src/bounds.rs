//! Placement region and boundary validation.
//!
//! A tile is allowed to hang part-way off any edge of the valid region before
//! it counts as out of bounds. The allowance is a fraction of the tile's own
//! extent along the axis being checked, expressed in thousandths so the
//! comparison stays in integer space.

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;

use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_FOOTER_BAND_TOP, DEFAULT_HEADER_BAND_HEIGHT,
    DEFAULT_TOLERANCE_PER_MILLE,
};
use crate::geom::Rect;

/// Canvas extent plus the fixed header and footer bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    /// Canvas width in pixels.
    pub width: i32,
    /// Canvas height in pixels.
    pub height: i32,
    /// Bottom edge of the header band.
    pub header_band_height: i32,
    /// Top edge of the footer band.
    pub footer_band_top: i32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            header_band_height: DEFAULT_HEADER_BAND_HEIGHT,
            footer_band_top: DEFAULT_FOOTER_BAND_TOP,
        }
    }
}

/// Boundary check with the default half-extent tolerance.
#[must_use]
pub fn is_out_of_bounds(rect: Rect, bounds: &Bounds) -> bool {
    is_out_of_bounds_with(rect, bounds, DEFAULT_TOLERANCE_PER_MILLE)
}

/// Boundary check with an explicit tolerance in thousandths of the tile extent.
///
/// Horizontally the tile is out when its left edge is further than the
/// tolerance past either side of the canvas; vertically the same rule applies
/// against the header band bottom and the footer band top.
#[must_use]
pub fn is_out_of_bounds_with(rect: Rect, bounds: &Bounds, tolerance_per_mille: i32) -> bool {
    let pm = i64::from(tolerance_per_mille);
    let left = i64::from(rect.left()) * 1000;
    let top = i64::from(rect.top()) * 1000;
    let slack_x = i64::from(rect.width) * pm;
    let slack_y = i64::from(rect.height) * pm;

    let horizontal = left < -slack_x || left > i64::from(bounds.width) * 1000 - slack_x;
    let vertical = top < i64::from(bounds.header_band_height) * 1000 - slack_y
        || top > i64::from(bounds.footer_band_top) * 1000 - slack_y;

    horizontal || vertical
}
