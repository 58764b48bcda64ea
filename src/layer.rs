#[cfg(test)]
#[path = "layer_test.rs"]
mod layer_test;

use crate::bounds::Bounds;
use crate::geom::Rect;

/// Whether a rectangle spanning `top..bottom` should render above sibling content.
///
/// Only rectangles strictly between the header band and the footer band go on
/// top; anything overlapping either band is drawn beneath it.
#[must_use]
pub fn should_be_on_top(top: i32, bottom: i32, header_band_height: i32, footer_band_top: i32) -> bool {
    bottom < footer_band_top && top > header_band_height
}

/// [`should_be_on_top`] for a rectangle against the canvas bands.
#[must_use]
pub fn rect_on_top(rect: Rect, bounds: &Bounds) -> bool {
    should_be_on_top(rect.top(), rect.bottom(), bounds.header_band_height, bounds.footer_band_top)
}
