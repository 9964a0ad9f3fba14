//! Board generation - initial fill without ready-made matches.
//!
//! Cells are filled in row-major order. Before a cell is placed, the type of
//! the two cells above is banned when they are equal, and so is the type of
//! the two cells to the left. The draw is repeated until an allowed type
//! comes up, so no row or column starts with a run of three.

use arrayvec::ArrayVec;
use log::debug;

use crate::error::BoardError;
use crate::grid::Grid;
use crate::pool::TilePool;
use crate::rng::TileSource;
use crate::types::{BoardEvent, Coordinate, TileType};

/// Redraws allowed before falling back to the first allowed type.
///
/// Only reachable with a degenerate source (e.g. a scripted one that keeps
/// returning a banned type).
const MAX_REDRAWS: u32 = 64;

#[derive(Debug, Clone, Copy, Default)]
pub struct BoardGenerator;

impl BoardGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Uniform draw over the tile types. Spawns during a cascade use this
    /// directly, without any adjacency constraint.
    pub fn random_type(&self, source: &mut dyn TileSource) -> TileType {
        source.next_type()
    }

    /// Fill every slot of `grid`, replacing whatever was there.
    ///
    /// Returns one `TileAppeared` event per placed tile, preceded by a
    /// `TileDisappeared` for the tile it replaced, if any.
    pub fn fill(
        &self,
        grid: &mut Grid,
        pool: &mut TilePool,
        source: &mut dyn TileSource,
        appear_ms: u32,
    ) -> Result<Vec<BoardEvent>, BoardError> {
        let coords: Vec<Coordinate> = grid.coordinates().collect();
        let mut events = Vec::with_capacity(coords.len());

        for at in coords {
            let banned = Self::banned_types(grid, at);
            let tile_type = self.draw_allowed(source, &banned);
            let tile = pool.spawn(tile_type, at);
            if let Some(old) = grid.set(at, Some(tile))? {
                pool.release(old.id)?;
                events.push(BoardEvent::TileDisappeared {
                    id: old.id,
                    at,
                    duration_ms: appear_ms,
                });
            }
            events.push(BoardEvent::TileAppeared {
                id: tile.id,
                at,
                tile_type,
                duration_ms: appear_ms,
            });
        }

        debug!("Board filled: {}x{} ({} events)", grid.rows(), grid.cols(), events.len());
        Ok(events)
    }

    fn banned_types(grid: &Grid, at: Coordinate) -> ArrayVec<TileType, 2> {
        let mut banned = ArrayVec::new();
        for step in [Coordinate::UP, Coordinate::LEFT] {
            let first = grid.tile_type_at(at + step);
            let second = grid.tile_type_at(at + step + step);
            if let (Some(a), Some(b)) = (first, second) {
                if a == b && !banned.contains(&a) {
                    banned.push(a);
                }
            }
        }
        banned
    }

    fn draw_allowed(&self, source: &mut dyn TileSource, banned: &[TileType]) -> TileType {
        for _ in 0..MAX_REDRAWS {
            let candidate = self.random_type(source);
            if !banned.contains(&candidate) {
                return candidate;
            }
        }
        let fallback = TileType::ALL
            .iter()
            .copied()
            .find(|t| !banned.contains(t))
            .unwrap_or(TileType::Blue);
        debug!("Tile source kept drawing banned types, using {:?}", fallback);
        fallback
    }
}

/// Check for any horizontal or vertical run of three equal types.
pub fn has_run_of_three(grid: &Grid) -> bool {
    grid.coordinates().any(|at| {
        let Some(t) = grid.tile_type_at(at) else {
            return false;
        };
        [Coordinate::RIGHT, Coordinate::DOWN].iter().any(|&step| {
            grid.tile_type_at(at + step) == Some(t) && grid.tile_type_at(at + step + step) == Some(t)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedSequence, SeededTiles};

    #[test]
    fn test_generated_boards_have_no_runs() {
        for seed in 1..=50 {
            let mut grid = Grid::new(8, 8).unwrap();
            let mut pool = TilePool::new();
            let mut source = SeededTiles::new(seed);
            let events = BoardGenerator
                .fill(&mut grid, &mut pool, &mut source, 0)
                .unwrap();
            assert_eq!(events.len(), 64);
            assert_eq!(grid.occupied_count(), 64);
            assert!(!has_run_of_three(&grid), "seed {}:\n{}", seed, grid.render_text());
        }
    }

    #[test]
    fn test_ban_rerolls_from_source() {
        // Two reds, then the source offers red again before green.
        let mut source = FixedSequence::new([TileType::Red, TileType::Red, TileType::Red, TileType::Green]);
        let mut grid = Grid::new(1, 3).unwrap();
        let mut pool = TilePool::new();
        BoardGenerator.fill(&mut grid, &mut pool, &mut source, 0).unwrap();
        assert_eq!(grid.render_text(), "RRG\n");
    }

    #[test]
    fn test_degenerate_source_falls_back() {
        let mut source = FixedSequence::new([TileType::Blue]);
        let mut grid = Grid::new(3, 3).unwrap();
        let mut pool = TilePool::new();
        BoardGenerator.fill(&mut grid, &mut pool, &mut source, 0).unwrap();
        assert!(!has_run_of_three(&grid));
        assert_eq!(grid.tile_type_at(Coordinate::new(0, 2)), Some(TileType::Green));
    }

    #[test]
    fn test_refill_releases_previous_tiles() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut pool = TilePool::new();
        let mut source = SeededTiles::new(3);
        let first = BoardGenerator.fill(&mut grid, &mut pool, &mut source, 0).unwrap();
        let second = BoardGenerator.fill(&mut grid, &mut pool, &mut source, 0).unwrap();
        assert_eq!(pool.active_count(), 16);
        assert_eq!(pool.released_count(), 16);

        let gone: Vec<_> = second
            .iter()
            .filter_map(|e| match e {
                BoardEvent::TileDisappeared { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        let placed: Vec<_> = first
            .iter()
            .filter_map(|e| match e {
                BoardEvent::TileAppeared { id, .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(gone, placed);
        assert_eq!(second.len(), 32);
    }
}
