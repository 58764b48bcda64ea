//! Insertion-ordered tile store.
//!
//! Owns every tile on the canvas plus the movable set. The set is never
//! written independently of the tiles: [`TileStore::set_movable`] updates the
//! flag and the set together, and [`TileStore::remove`] drops a tile from both.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::collections::{HashMap, HashSet};

use crate::error::PlacementError;
use crate::tile::Tile;

#[derive(Debug, Default)]
pub struct TileStore {
    tiles: HashMap<String, Tile>,
    order: Vec<String>,
    movable: HashSet<String>,
}

impl TileStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new tile at the end of the order.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if a tile with the same name exists.
    pub fn insert(&mut self, tile: Tile) -> Result<(), PlacementError> {
        let name = tile.name().to_string();
        if self.tiles.contains_key(&name) {
            return Err(PlacementError::DuplicateName(name));
        }
        if tile.movable {
            self.movable.insert(name.clone());
        }
        self.order.push(name.clone());
        self.tiles.insert(name, tile);
        Ok(())
    }

    /// Remove a tile, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Tile> {
        let tile = self.tiles.remove(name)?;
        self.movable.remove(name);
        self.order.retain(|n| n != name);
        Some(tile)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Tile> {
        self.tiles.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Tile> {
        self.tiles.get_mut(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tiles.contains_key(name)
    }

    /// Set a tile's movability. Returns `Some(true)` if the flag changed,
    /// `Some(false)` if it already had that value, `None` if the tile is unknown.
    ///
    /// Demoting a tile also clears its pending-removal mark.
    pub fn set_movable(&mut self, name: &str, movable: bool) -> Option<bool> {
        let tile = self.tiles.get_mut(name)?;
        if tile.movable == movable {
            return Some(false);
        }
        tile.movable = movable;
        if movable {
            self.movable.insert(name.to_string());
        } else {
            tile.pending_removal = false;
            self.movable.remove(name);
        }
        Some(true)
    }

    /// Tiles in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.order.iter().filter_map(|n| self.tiles.get(n))
    }

    /// Names in insertion order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Movable tile names in insertion order.
    #[must_use]
    pub fn movable_names(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|n| self.movable.contains(*n))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn movable_len(&self) -> usize {
        self.movable.len()
    }

    #[must_use]
    pub fn is_movable(&self, name: &str) -> bool {
        self.movable.contains(name)
    }

    /// Whether the movable set matches the tiles' flags exactly and no
    /// immovable tile is marked for removal.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let flagged: HashSet<&str> = self
            .tiles
            .values()
            .filter(|t| t.movable)
            .map(Tile::name)
            .collect();
        let tracked: HashSet<&str> = self.movable.iter().map(String::as_str).collect();
        let pending_ok = self.tiles.values().all(|t| t.movable || !t.pending_removal);
        flagged == tracked && pending_ok && self.order.len() == self.tiles.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
