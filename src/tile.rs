//! Tiles and their satellites.
//!
//! A tile is the unit of placement: a named rectangle with movability and
//! registration state. It may carry one satellite, a companion surface owned
//! by the host. The canvas only tracks the satellite's handle and rectangle so
//! it can keep it in lock-step with the tile and apply the layering rule to it.

#[cfg(test)]
#[path = "tile_test.rs"]
mod tile_test;

use uuid::Uuid;

use crate::bounds::Bounds;
use crate::geom::Rect;
use crate::layer::rect_on_top;
use crate::source::Record;

/// Opaque handle to a host-owned satellite surface.
pub type SatelliteId = Uuid;

/// Display mode value. Interpreted by the host renderer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DisplayMode(pub u32);

/// Companion surface attached to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Satellite {
    /// Host handle for the surface.
    pub id: SatelliteId,
    /// Current rectangle in canvas coordinates.
    pub rect: Rect,
    /// Most recent layering decision for the satellite's own rectangle.
    pub on_top: bool,
}

/// A placeable tile.
///
/// State flags are only mutated by the canvas; the movable flag in particular
/// must change through [`crate::store::TileStore::set_movable`] so the movable
/// set stays in sync.
#[derive(Debug, Clone)]
pub struct Tile {
    name: String,
    pub(crate) rect: Rect,
    pub(crate) movable: bool,
    pub(crate) registered: bool,
    pub(crate) pending_removal: bool,
    pub(crate) on_top: bool,
    pub(crate) highlighted: bool,
    pub(crate) unknown: bool,
    pub(crate) mode: DisplayMode,
    pub(crate) satellite: Option<Satellite>,
    pub(crate) record: Option<Record>,
}

impl Tile {
    /// A fresh, immovable, unregistered tile.
    #[must_use]
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            rect,
            movable: false,
            registered: false,
            pending_removal: false,
            on_top: false,
            highlighted: false,
            unknown: false,
            mode: DisplayMode::default(),
            satellite: None,
            record: None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[must_use]
    pub fn is_movable(&self) -> bool {
        self.movable
    }

    #[must_use]
    pub fn is_registered(&self) -> bool {
        self.registered
    }

    #[must_use]
    pub fn is_pending_removal(&self) -> bool {
        self.pending_removal
    }

    /// Whether the tile currently renders above sibling content.
    #[must_use]
    pub fn is_on_top(&self) -> bool {
        self.on_top
    }

    #[must_use]
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Whether the host flagged this tile as having no backing data.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.unknown
    }

    #[must_use]
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    #[must_use]
    pub fn satellite(&self) -> Option<&Satellite> {
        self.satellite.as_ref()
    }

    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        self.record.as_ref()
    }

    /// Move the top-left corner to `(x, y)`. An attached satellite is shifted
    /// by the same amount.
    pub(crate) fn move_to(&mut self, x: i32, y: i32) {
        let dx = x.saturating_sub(self.rect.x);
        let dy = y.saturating_sub(self.rect.y);
        self.rect = self.rect.moved_to(x, y);
        if let Some(sat) = self.satellite.as_mut() {
            sat.rect = sat.rect.translated(dx, dy);
        }
    }

    /// Re-evaluate the layering rule for the tile and its satellite.
    pub(crate) fn relayer(&mut self, bounds: &Bounds) {
        self.on_top = rect_on_top(self.rect, bounds);
        if let Some(sat) = self.satellite.as_mut() {
            sat.on_top = rect_on_top(sat.rect, bounds);
        }
    }
}
