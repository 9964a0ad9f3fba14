//! Tile pool - hands out tile identities and tracks which ones are live.
//!
//! Releasing a tile that is not active is a bookkeeping bug and is reported as
//! [`BoardError::DuplicateRelease`].

use std::collections::HashSet;

use crate::error::BoardError;
use crate::grid::{Grid, Tile};
use crate::types::{Coordinate, TileId, TileType};

#[derive(Debug, Clone, Default)]
pub struct TilePool {
    next_id: u32,
    active: HashSet<TileId>,
    released: u32,
}

impl TilePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh tile of `tile_type` placed at `at`
    pub fn spawn(&mut self, tile_type: TileType, at: Coordinate) -> Tile {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.active.insert(id);
        Tile::new(id, tile_type, at)
    }

    /// Return a removed tile to the pool
    pub fn release(&mut self, id: TileId) -> Result<(), BoardError> {
        if !self.active.remove(&id) {
            return Err(BoardError::DuplicateRelease(id));
        }
        self.released += 1;
        Ok(())
    }

    /// Register every tile already on `grid` as active.
    ///
    /// Used when a board is loaded from a layout instead of being generated;
    /// later allocations continue after the highest adopted id.
    pub fn adopt(&mut self, grid: &Grid) {
        for tile in grid.tiles() {
            self.active.insert(tile.id);
            self.next_id = self.next_id.max(tile.id.0.wrapping_add(1));
        }
    }

    pub fn is_active(&self, id: TileId) -> bool {
        self.active.contains(&id)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Total number of releases since creation
    pub fn released_count(&self) -> u32 {
        self.released
    }
}
