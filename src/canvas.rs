//! The canvas: aggregate root of the placement engine.
//!
//! DESIGN
//! ======
//! The canvas owns the tile store, the drag session, and the current
//! placement rules. Every operation runs synchronously to completion and
//! leaves its outbound notifications in an action queue; the host drains
//! the queue after each call (input handlers drain it for the caller).
//!
//! Faults never escape an operation. Internals return `PlacementError`
//! through `?`; the public entry points log the error and report failure
//! through their return value. Eviction of an out-of-bounds tile is an
//! expected outcome, not a failure.

#[cfg(test)]
#[path = "canvas_test.rs"]
mod canvas_test;

use crate::bounds::Bounds;
use crate::config::CanvasConfig;
use crate::drag::{Commit, DragSession, PlacementRules};
use crate::error::{ErrorCode, PlacementError};
use crate::geom::{Point, Rect};
use crate::grid::is_rect_aligned;
use crate::scan::{Gesture, find_target};
use crate::source::DataSource;
use crate::store::TileStore;
use crate::tile::{DisplayMode, Satellite, SatelliteId, Tile};

/// Notifications for the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// The named tile's appearance changed. Advisory; the host coalesces.
    RenderNeeded { name: String },
    /// The tile is gone. Any satellite resources must be released by the host.
    TileEvicted { name: String, satellite: Option<SatelliteId> },
    /// A tile joined or left the movable set.
    MovabilityChanged { name: String, movable: bool },
    /// One display-mode change, with every tile it was applied to.
    ModeBroadcast { names: Vec<String>, mode: DisplayMode },
}

pub struct Canvas {
    store: TileStore,
    drag: DragSession,
    config: CanvasConfig,
    filter_text: Option<String>,
    source: Option<Box<dyn DataSource + Send>>,
    actions: Vec<Action>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    #[must_use]
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            store: TileStore::new(),
            drag: DragSession::new(),
            config,
            filter_text: None,
            source: None,
            actions: Vec::new(),
        }
    }

    /// A canvas that materialises tile content from `source`.
    #[must_use]
    pub fn with_source(config: CanvasConfig, source: Box<dyn DataSource + Send>) -> Self {
        let mut canvas = Self::new(config);
        canvas.source = Some(source);
        canvas
    }

    /// Install or replace the data source.
    pub fn set_source(&mut self, source: Box<dyn DataSource + Send>) {
        self.source = Some(source);
    }

    /// Take every action queued since the last drain.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.actions)
    }

    // --- Tile lifecycle ---

    /// Create a tile at `(x, y)`.
    ///
    /// Returns false for a blank name, for a name that already exists (the
    /// existing tile gets a highlight signal instead), and when the data
    /// source cannot supply the tile's record. With `registered` set, the new
    /// tile goes through the same commit as a finished drag; if that evicts
    /// it, the call still succeeds and a `TileEvicted` action is queued.
    pub fn add_tile(&mut self, name: &str, x: i32, y: i32, registered: bool) -> bool {
        if self.store.contains(name) {
            self.signal_existing(name);
            return false;
        }
        match self.build_tile(name, x, y, registered) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(tile = %name, code = e.error_code(), error = %e, "tile not added");
                false
            }
        }
    }

    fn build_tile(&mut self, name: &str, x: i32, y: i32, registered: bool) -> Result<(), PlacementError> {
        if name.trim().is_empty() {
            return Err(PlacementError::BlankName);
        }
        let mut tile = Tile::new(name, Rect::new(x, y, self.config.tile_width, self.config.tile_height));
        if let Some(source) = &self.source {
            let record = source
                .lookup(name)?
                .ok_or_else(|| PlacementError::MissingEntry(name.to_string()))?;
            tile.record = Some(record);
        }

        if registered {
            match self.rules().commit(tile.rect) {
                Commit::Register(rect) => {
                    tile.move_to(rect.x, rect.y);
                    tile.registered = true;
                }
                Commit::Evict(rect) => {
                    tracing::info!(tile = %name, x = rect.x, y = rect.y, "tile evicted on placement");
                    self.actions.push(Action::TileEvicted { name: name.to_string(), satellite: None });
                    return Ok(());
                }
            }
        }
        tile.relayer(&self.config.bounds);
        self.store.insert(tile)?;
        tracing::debug!(tile = %name, x, y, registered, "tile added");
        self.render(name);
        Ok(())
    }

    /// Commit an existing tile where it stands: snap, validate, then register
    /// or evict. Returns false if the tile does not exist.
    pub fn place_tile(&mut self, name: &str) -> bool {
        match self.commit_tile(name) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(tile = %name, code = e.error_code(), "place skipped");
                false
            }
        }
    }

    fn commit_tile(&mut self, name: &str) -> Result<(), PlacementError> {
        let rules = self.rules();
        let tile = self
            .store
            .get_mut(name)
            .ok_or_else(|| PlacementError::NotFound(name.to_string()))?;
        match rules.commit(tile.rect) {
            Commit::Register(rect) => {
                tile.move_to(rect.x, rect.y);
                tile.relayer(&rules.bounds);
                tile.pending_removal = false;
                tile.registered = true;
                self.render(name);
            }
            Commit::Evict(_) => self.evict(name),
        }
        Ok(())
    }

    /// Flag a tile as having no backing data. No-op for unknown names.
    pub fn mark_unknown(&mut self, name: &str) {
        if let Some(tile) = self.store.get_mut(name) {
            tile.unknown = true;
            self.render(name);
        }
    }

    /// Apply a new filter.
    ///
    /// Every tile that is neither registered nor movable is evicted and all
    /// highlights are cleared. A non-blank filter then highlights existing
    /// tiles whose name contains it (case-insensitively) and materialises a
    /// stacked tile for every matching data-source entry not yet on the canvas.
    pub fn reapply_filter(&mut self, text: &str) {
        let stale: Vec<String> = self
            .store
            .iter()
            .filter(|t| !t.registered && !t.movable)
            .map(|t| t.name().to_string())
            .collect();
        for name in &stale {
            self.evict(name);
        }

        for name in self.store.names() {
            if let Some(tile) = self.store.get_mut(&name) {
                if tile.highlighted {
                    tile.highlighted = false;
                    self.render(&name);
                }
            }
        }

        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            self.filter_text = None;
            tracing::info!(evicted = stale.len(), "filter cleared");
            return;
        }
        self.filter_text = Some(text.trim().to_string());

        for name in self.store.names() {
            if name.to_lowercase().contains(&needle) {
                self.signal_existing(&name);
            }
        }

        let candidates = match &self.source {
            Some(source) => source.names(),
            None => Vec::new(),
        };
        let mut slot = 0;
        for name in candidates {
            if !name.to_lowercase().contains(&needle) || self.store.contains(&name) {
                continue;
            }
            let y = self.stack_y(slot);
            if self.add_tile(&name, self.config.stack_x, y, false) {
                slot += 1;
            }
        }
        tracing::info!(filter = %needle, evicted = stale.len(), materialised = slot, "filter applied");
    }

    fn stack_y(&self, slot: i32) -> i32 {
        let top = self.config.bounds.header_band_height.saturating_add(self.config.stack_gap);
        let pitch = self.config.tile_height.saturating_add(self.config.stack_gap);
        top.saturating_add(slot.saturating_mul(pitch))
    }

    /// Change the grid unit and re-snap every registered tile that is off the
    /// new grid. Tiles that land out of bounds are evicted at once.
    ///
    /// Returns false, leaving everything unchanged, for a non-positive unit.
    pub fn change_grid_unit(&mut self, unit: i32) -> bool {
        if unit <= 0 {
            let e = PlacementError::InvalidGridUnit(unit);
            tracing::warn!(code = e.error_code(), error = %e, "grid unit rejected");
            return false;
        }
        self.config.grid_unit = unit;
        let off_grid: Vec<String> = self
            .store
            .iter()
            .filter(|t| t.registered && !is_rect_aligned(t.rect, unit))
            .map(|t| t.name().to_string())
            .collect();
        for name in &off_grid {
            if let Err(e) = self.commit_tile(name) {
                tracing::warn!(tile = %name, error = %e, "re-snap failed");
            }
        }
        tracing::info!(unit, resnapped = off_grid.len(), "grid unit changed");
        true
    }

    /// Apply a display mode. When the originating tile is movable the mode is
    /// broadcast to the whole movable set; otherwise only that tile changes.
    /// Returns false if the originating tile does not exist.
    pub fn change_display_mode(&mut self, origin: &str, mode: DisplayMode) -> bool {
        let names = if self.store.is_movable(origin) {
            self.store.movable_names()
        } else if self.store.contains(origin) {
            vec![origin.to_string()]
        } else {
            return false;
        };
        for name in &names {
            if let Some(tile) = self.store.get_mut(name) {
                tile.mode = mode;
            }
            self.render(name);
        }
        tracing::debug!(origin = %origin, count = names.len(), mode = mode.0, "display mode changed");
        self.actions.push(Action::ModeBroadcast { names, mode });
        true
    }

    /// Resize the canvas or move its bands. Layering is re-evaluated for every
    /// tile; nothing is evicted until the next commit.
    pub fn set_bounds(&mut self, bounds: Bounds) {
        self.config.bounds = bounds;
        for name in self.store.names() {
            if let Some(tile) = self.store.get_mut(&name) {
                let was_on_top = tile.on_top;
                tile.relayer(&bounds);
                if tile.on_top != was_on_top {
                    self.render(&name);
                }
            }
        }
    }

    // --- Satellites ---

    /// Record that the host acquired a satellite for `name`. Returns false if
    /// the tile does not exist or already has one.
    pub fn attach_satellite(&mut self, name: &str, id: SatelliteId, rect: Rect) -> bool {
        let bounds = self.config.bounds;
        let Some(tile) = self.store.get_mut(name) else {
            return false;
        };
        if tile.satellite.is_some() {
            tracing::warn!(tile = %name, "satellite already attached");
            return false;
        }
        tile.satellite = Some(Satellite { id, rect, on_top: false });
        tile.relayer(&bounds);
        self.render(name);
        true
    }

    /// The host moved or resized a satellite.
    pub fn satellite_moved(&mut self, name: &str, rect: Rect) -> bool {
        let bounds = self.config.bounds;
        let Some(tile) = self.store.get_mut(name) else {
            return false;
        };
        let Some(sat) = tile.satellite.as_mut() else {
            return false;
        };
        sat.rect = rect;
        tile.relayer(&bounds);
        self.render(name);
        true
    }

    /// The host aborted a satellite; its tile is destroyed with it.
    pub fn abort_satellite(&mut self, name: &str) -> bool {
        let has_satellite = self.store.get(name).is_some_and(|t| t.satellite.is_some());
        if has_satellite {
            self.evict(name);
        }
        has_satellite
    }

    // --- Input events ---

    /// Pointer pressed on a tile. Starts a group drag when the tile is movable
    /// and no drag is running.
    pub fn on_tile_pressed(&mut self, name: &str, pt: Point) -> Vec<Action> {
        if self.store.is_movable(name) && self.drag.begin(pt, &self.store) {
            tracing::debug!(tile = %name, x = pt.x, y = pt.y, group = self.store.movable_len(), "drag started");
        }
        self.drain_actions()
    }

    /// Pointer moved. Ignored unless a drag is running and the button is held.
    pub fn on_pointer_move(&mut self, pt: Point, button_held: bool) -> Vec<Action> {
        if button_held && self.drag.is_active() {
            let rules = self.rules();
            for name in self.drag.apply_move(pt, &mut self.store, &rules) {
                self.render(&name);
            }
        }
        self.drain_actions()
    }

    /// Pointer released. Commits the running drag; outside a drag this is a
    /// click on the canvas and demotes every movable tile.
    pub fn on_pointer_up(&mut self) -> Vec<Action> {
        if self.drag.is_active() {
            let rules = self.rules();
            let outcome = self.drag.finish(&mut self.store, &rules);
            for name in &outcome.registered {
                self.render(name);
            }
            for tile in outcome.evicted {
                tracing::info!(tile = %tile.name(), "tile evicted on release");
                self.actions.push(Action::TileEvicted {
                    name: tile.name().to_string(),
                    satellite: tile.satellite().map(|s| s.id),
                });
            }
            tracing::debug!(registered = outcome.registered.len(), "drag committed");
        } else {
            self.release_all();
        }
        self.drain_actions()
    }

    /// Demote every movable tile.
    pub fn release_all(&mut self) {
        for name in self.store.movable_names() {
            self.set_movable(&name, false);
        }
    }

    /// One wheel notch. A gesture already consumed by another handler is
    /// ignored; otherwise it is consumed here and at most one tile flips.
    pub fn on_pulse(&mut self, gesture: &mut Gesture) -> Vec<Action> {
        if gesture.is_consumed() {
            return self.drain_actions();
        }
        gesture.consume();
        match find_target(&self.store, gesture, self.config.bounds.height, &self.config.scan) {
            Some(hit) => self.set_movable(&hit.name, hit.movable),
            None => tracing::debug!(x = gesture.point.x, y = gesture.point.y, "pulse hit nothing"),
        }
        self.drain_actions()
    }

    /// A tile that leaves the group while a drag is running is committed on
    /// the spot, so it never stays off-grid or out of bounds.
    fn set_movable(&mut self, name: &str, movable: bool) {
        if self.store.set_movable(name, movable) != Some(true) {
            return;
        }
        tracing::debug!(tile = %name, movable, "movability changed");
        self.actions.push(Action::MovabilityChanged { name: name.to_string(), movable });
        self.render(name);
        if !movable && self.drag.is_active() {
            self.drag.detach(name);
            if let Err(e) = self.commit_tile(name) {
                tracing::warn!(tile = %name, code = e.error_code(), "commit on demote failed");
            }
        }
    }

    // --- Internals ---

    fn rules(&self) -> PlacementRules {
        PlacementRules {
            grid_unit: self.config.grid_unit,
            bounds: self.config.bounds,
            tolerance_per_mille: self.config.tolerance_per_mille,
        }
    }

    fn signal_existing(&mut self, name: &str) {
        if let Some(tile) = self.store.get_mut(name) {
            tile.highlighted = tile.registered;
            self.render(name);
        }
    }

    fn evict(&mut self, name: &str) {
        if let Some(tile) = self.store.remove(name) {
            tracing::info!(tile = %name, registered = tile.registered, "tile evicted");
            self.actions.push(Action::TileEvicted {
                name: name.to_string(),
                satellite: tile.satellite.map(|s| s.id),
            });
        }
    }

    fn render(&mut self, name: &str) {
        self.actions.push(Action::RenderNeeded { name: name.to_string() });
    }

    // --- Queries ---

    #[must_use]
    pub fn tile(&self, name: &str) -> Option<&Tile> {
        self.store.get(name)
    }

    /// Tiles in insertion order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.store.iter()
    }

    #[must_use]
    pub fn store(&self) -> &TileStore {
        &self.store
    }

    #[must_use]
    pub fn movable_names(&self) -> Vec<String> {
        self.store.movable_names()
    }

    #[must_use]
    pub fn grid_unit(&self) -> i32 {
        self.config.grid_unit
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.config.bounds
    }

    #[must_use]
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    #[must_use]
    pub fn filter_text(&self) -> Option<&str> {
        self.filter_text.as_deref()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}
