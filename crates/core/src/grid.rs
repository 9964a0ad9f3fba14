//! Grid module - owns the slots of the board
//!
//! The grid is `rows x cols` slots stored in a flat row-major array. Each slot
//! holds at most one [`Tile`]. Coordinates are `(row, col)` with row 0 at the
//! top; every coordinate outside `0..rows` x `0..cols` is rejected.

use crate::error::BoardError;
use crate::types::{Coordinate, TileId, TileType};

/// A tile sitting in exactly one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub tile_type: TileType,
    /// Kept equal to the owning slot's coordinate by the grid.
    pub coordinate: Coordinate,
}

impl Tile {
    pub fn new(id: TileId, tile_type: TileType, coordinate: Coordinate) -> Self {
        Self {
            id,
            tile_type,
            coordinate,
        }
    }
}

/// A slot is either empty or occupied by one tile.
pub type Slot = Option<Tile>;

/// The board grid - flat array storage, row-major (row * cols + col)
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u16,
    cols: u16,
    slots: Vec<Slot>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(rows: u16, cols: u16) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            slots: vec![None; rows as usize * cols as usize],
        })
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, coord: Coordinate) -> Option<usize> {
        if !self.in_bounds(coord) {
            return None;
        }
        Some(coord.row as usize * self.cols as usize + coord.col as usize)
    }

    fn checked_index(&self, coord: Coordinate) -> Result<usize, BoardError> {
        self.index(coord).ok_or(BoardError::OutOfBounds(coord))
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && coord.row < self.rows as i32
            && coord.col < self.cols as i32
    }

    /// Tile at `coord`, `Ok(None)` for an empty slot
    pub fn get(&self, coord: Coordinate) -> Result<Option<&Tile>, BoardError> {
        let idx = self.checked_index(coord)?;
        Ok(self.slots[idx].as_ref())
    }

    /// Type of the tile at `coord`; `None` when out of bounds or empty
    pub fn tile_type_at(&self, coord: Coordinate) -> Option<TileType> {
        self.index(coord)
            .and_then(|idx| self.slots[idx].map(|t| t.tile_type))
    }

    pub fn is_empty(&self, coord: Coordinate) -> Result<bool, BoardError> {
        let idx = self.checked_index(coord)?;
        Ok(self.slots[idx].is_none())
    }

    /// Check if position is in bounds and holds a tile
    pub fn is_occupied(&self, coord: Coordinate) -> bool {
        matches!(self.index(coord).map(|idx| self.slots[idx]), Some(Some(_)))
    }

    /// Place a tile (or clear the slot) and return the previous occupant.
    ///
    /// A placed tile gets its coordinate rewritten to `coord`.
    pub fn set(&mut self, coord: Coordinate, tile: Option<Tile>) -> Result<Option<Tile>, BoardError> {
        let idx = self.checked_index(coord)?;
        let placed = tile.map(|t| Tile {
            coordinate: coord,
            ..t
        });
        Ok(std::mem::replace(&mut self.slots[idx], placed))
    }

    /// Remove and return the tile at `coord`
    pub fn take(&mut self, coord: Coordinate) -> Result<Option<Tile>, BoardError> {
        let idx = self.checked_index(coord)?;
        Ok(self.slots[idx].take())
    }

    /// Exchange the contents of two slots, keeping tile coordinates in sync
    pub fn swap(&mut self, a: Coordinate, b: Coordinate) -> Result<(), BoardError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.slots.swap(ia, ib);
        if let Some(tile) = self.slots[ia].as_mut() {
            tile.coordinate = a;
        }
        if let Some(tile) = self.slots[ib].as_mut() {
            tile.coordinate = b;
        }
        Ok(())
    }

    /// Move the tile at `from` into the empty slot `to`
    pub fn move_tile(&mut self, from: Coordinate, to: Coordinate) -> Result<Tile, BoardError> {
        let ito = self.checked_index(to)?;
        if self.slots[ito].is_some() {
            return Err(BoardError::SlotOccupied(to));
        }
        let tile = self.take(from)?.ok_or(BoardError::EmptySlot(from))?;
        let moved = Tile {
            coordinate: to,
            ..tile
        };
        self.slots[ito] = Some(moved);
        Ok(moved)
    }

    /// All coordinates in row-major order
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        let cols = self.cols as i32;
        (0..self.rows as i32).flat_map(move |row| (0..cols).map(move |col| Coordinate::new(row, col)))
    }

    /// Occupied slots in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.slots.iter().filter_map(|s| s.as_ref())
    }

    /// Number of occupied slots
    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Flat row-major view of tile types, used by snapshots
    pub fn type_rows(&self) -> Vec<Vec<Option<TileType>>> {
        let cols = self.cols as usize;
        self.slots
            .chunks(cols)
            .map(|row| row.iter().map(|s| s.map(|t| t.tile_type)).collect())
            .collect()
    }

    /// Text dump, one line per row, `.` for empty slots
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity(self.slots.len() + self.rows as usize);
        for row in self.slots.chunks(self.cols as usize) {
            for slot in row {
                out.push(slot.map(|t| t.tile_type.as_char()).unwrap_or('.'));
            }
            out.push('\n');
        }
        out
    }

    /// Build a grid from rows of type labels (`B`, `G`, `R`, `Y`, `.` for empty).
    ///
    /// Tile ids are assigned in row-major order starting at `first_id`.
    /// Unknown characters are treated as empty slots.
    pub fn from_rows(rows: &[&str], first_id: u32) -> Result<Self, BoardError> {
        let height = rows.len() as u16;
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0) as u16;
        let mut grid = Grid::new(height, width)?;
        let mut next_id = first_id;
        for (r, line) in rows.iter().enumerate() {
            for (c, ch) in line.chars().enumerate().take(width as usize) {
                let Some(tile_type) = TileType::from_str(&ch.to_string()) else {
                    continue;
                };
                let coord = Coordinate::new(r as i32, c as i32);
                grid.set(coord, Some(Tile::new(TileId(next_id), tile_type, coord)))?;
                next_id += 1;
            }
        }
        Ok(grid)
    }
}
