//! Group-drag session.
//!
//! A session starts when a movable tile is pressed and ends on pointer
//! release. While it runs, every pointer move places each movable tile at its
//! anchor (its position when the session started) plus the pointer delta
//! quantised to whole grid units. Each step re-layers the tile and re-runs
//! boundary validation, which only marks tiles for removal.
//!
//! Release commits every movable tile: the absolute position is snapped to the
//! grid on its own, validated again, and the tile is either registered or
//! evicted. Moves are never rolled back.
//!
//! Validation and commit are pure functions of a rectangle and the
//! [`PlacementRules`], so the session only has to decide when to call them.

#[cfg(test)]
#[path = "drag_test.rs"]
mod drag_test;

use std::collections::HashMap;

use crate::bounds::{Bounds, is_out_of_bounds_with};
use crate::geom::{Point, Rect};
use crate::grid::{snap_delta, snap_rect};
use crate::store::TileStore;
use crate::tile::Tile;

/// Grid and boundary settings a placement is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRules {
    pub grid_unit: i32,
    pub bounds: Bounds,
    pub tolerance_per_mille: i32,
}

/// Final decision for a committed rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// Keep the tile at this grid-aligned rectangle.
    Register(Rect),
    /// The snapped rectangle lies outside the valid region.
    Evict(Rect),
}

impl PlacementRules {
    /// Whether `rect` should be marked for removal.
    #[must_use]
    pub fn validate(&self, rect: Rect) -> bool {
        is_out_of_bounds_with(rect, &self.bounds, self.tolerance_per_mille)
    }

    /// Snap `rect` to the grid and decide whether it survives.
    #[must_use]
    pub fn commit(&self, rect: Rect) -> Commit {
        let snapped = snap_rect(rect, self.grid_unit);
        if self.validate(snapped) {
            Commit::Evict(snapped)
        } else {
            Commit::Register(snapped)
        }
    }
}

/// Result of releasing a drag.
#[derive(Debug, Default)]
pub struct DragOutcome {
    /// Tiles that survived and are now registered, in insertion order.
    pub registered: Vec<String>,
    /// Tiles removed from the store.
    pub evicted: Vec<Tile>,
}

#[derive(Debug, Clone, Default)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        origin: Point,
        anchors: HashMap<String, Point>,
        delta: (i32, i32),
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Pointer position the running session started from.
    #[must_use]
    pub fn origin(&self) -> Option<Point> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging { origin, .. } => Some(*origin),
        }
    }

    /// Start a session at `origin`, anchoring every movable tile at its
    /// current position. Returns false if a session is already running.
    pub fn begin(&mut self, origin: Point, store: &TileStore) -> bool {
        if self.is_active() {
            return false;
        }
        let anchors = store
            .iter()
            .filter(|t| t.is_movable())
            .map(|t| (t.name().to_string(), Point::new(t.rect().x, t.rect().y)))
            .collect();
        self.state = DragState::Dragging { origin, anchors, delta: (0, 0) };
        true
    }

    /// Apply one pointer move to the whole movable group.
    ///
    /// Returns the names of tiles whose position changed. A tile promoted
    /// after the session started is anchored so that it keeps its current
    /// position under the current delta.
    pub fn apply_move(&mut self, pointer: Point, store: &mut TileStore, rules: &PlacementRules) -> Vec<String> {
        let DragState::Dragging { origin, anchors, delta } = &mut self.state else {
            return Vec::new();
        };
        let dx = snap_delta(pointer.x.saturating_sub(origin.x), rules.grid_unit);
        let dy = snap_delta(pointer.y.saturating_sub(origin.y), rules.grid_unit);
        let (prev_dx, prev_dy) = *delta;
        *delta = (dx, dy);

        let mut moved = Vec::new();
        for name in store.movable_names() {
            let Some(tile) = store.get_mut(&name) else {
                continue;
            };
            let anchor = *anchors.entry(name.clone()).or_insert_with(|| {
                Point::new(tile.rect.x.saturating_sub(prev_dx), tile.rect.y.saturating_sub(prev_dy))
            });
            let before = tile.rect;
            tile.move_to(anchor.x.saturating_add(dx), anchor.y.saturating_add(dy));
            tile.relayer(&rules.bounds);
            tile.pending_removal = rules.validate(tile.rect);
            if tile.rect != before {
                moved.push(name);
            }
        }
        moved
    }

    /// Drop a tile from the running session. If it is promoted again before
    /// release it rejoins at its position at that time.
    pub fn detach(&mut self, name: &str) {
        if let DragState::Dragging { anchors, .. } = &mut self.state {
            anchors.remove(name);
        }
    }

    /// End the session and commit every movable tile.
    ///
    /// Does nothing and returns an empty outcome when no session is running.
    pub fn finish(&mut self, store: &mut TileStore, rules: &PlacementRules) -> DragOutcome {
        let mut outcome = DragOutcome::default();
        if !self.is_active() {
            return outcome;
        }
        self.state = DragState::Idle;

        for name in store.movable_names() {
            let Some(tile) = store.get_mut(&name) else {
                continue;
            };
            match rules.commit(tile.rect) {
                Commit::Register(rect) => {
                    tile.move_to(rect.x, rect.y);
                    tile.relayer(&rules.bounds);
                    tile.pending_removal = false;
                    tile.registered = true;
                    outcome.registered.push(name);
                }
                Commit::Evict(_) => {
                    if let Some(evicted) = store.remove(&name) {
                        outcome.evicted.push(evicted);
                    }
                }
            }
        }
        outcome
    }
}
