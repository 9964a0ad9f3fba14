//! Swap resolution - validates, applies and evaluates one swap attempt.
//!
//! The grid is updated immediately; the game turns the outcome into timed
//! events (glide, glide back, bounce).

use log::debug;

use crate::error::BoardError;
use crate::grid::Grid;
use crate::matcher::MatchFinder;
use crate::types::{Coordinate, SwapOutcome};

#[derive(Debug, Clone, Copy, Default)]
pub struct SwapResolver;

impl SwapResolver {
    pub fn new() -> Self {
        Self
    }

    /// Whether `b` can receive a swap from `a`.
    ///
    /// The origin must hold a tile; that is a caller contract, so a bad
    /// origin is an error rather than an `Invalid` outcome.
    pub fn can_swap(&self, grid: &Grid, a: Coordinate, b: Coordinate) -> Result<bool, BoardError> {
        if grid.get(a)?.is_none() {
            return Err(BoardError::EmptySlot(a));
        }
        Ok(grid.is_occupied(b))
    }

    /// Try to swap the tiles at `a` and `b`.
    ///
    /// - `Invalid`: `b` is out of bounds or empty, grid untouched
    /// - `Matched`: the swap stays applied; carries both match lists
    /// - `Reverted`: no match at either end, the swap has been undone
    pub fn attempt_swap(
        &self,
        grid: &mut Grid,
        finder: &dyn MatchFinder,
        a: Coordinate,
        b: Coordinate,
    ) -> Result<SwapOutcome, BoardError> {
        if !self.can_swap(grid, a, b)? {
            debug!("Swap {} -> {} rejected", a, b);
            return Ok(SwapOutcome::Invalid);
        }

        grid.swap(a, b)?;

        let mut removals = Vec::new();
        for origin in [a, b] {
            let Some(tile_type) = grid.tile_type_at(origin) else {
                continue;
            };
            let result = finder.search(grid, origin, tile_type);
            if result.is_match {
                removals.extend(result.coordinates);
            }
        }

        if removals.is_empty() {
            grid.swap(a, b)?;
            debug!("Swap {} <-> {} made no match, reverted", a, b);
            return Ok(SwapOutcome::Reverted);
        }

        debug!("Swap {} <-> {} matched {} cells", a, b, removals.len());
        Ok(SwapOutcome::Matched(removals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::LineMatchFinder;
    use crate::types::TileType;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_out_of_bounds_target_is_invalid() {
        let mut grid = Grid::from_rows(&["RGB", "GBR"], 0).unwrap();
        let before = grid.clone();
        let outcome = SwapResolver
            .attempt_swap(&mut grid, &LineMatchFinder, c(0, 2), c(-1, 2))
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Invalid);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_empty_target_is_invalid() {
        let mut grid = Grid::from_rows(&["R.", "GB"], 0).unwrap();
        let outcome = SwapResolver
            .attempt_swap(&mut grid, &LineMatchFinder, c(0, 0), c(0, 1))
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Invalid);
    }

    #[test]
    fn test_empty_origin_is_an_error() {
        let mut grid = Grid::from_rows(&["R.", "GB"], 0).unwrap();
        assert_eq!(
            SwapResolver.attempt_swap(&mut grid, &LineMatchFinder, c(0, 1), c(0, 0)),
            Err(BoardError::EmptySlot(c(0, 1)))
        );
    }

    #[test]
    fn test_no_match_reverts() {
        let mut grid = Grid::from_rows(&["RGB", "GBR", "BRG"], 0).unwrap();
        let before = grid.clone();
        let outcome = SwapResolver
            .attempt_swap(&mut grid, &LineMatchFinder, c(0, 0), c(0, 1))
            .unwrap();
        assert_eq!(outcome, SwapOutcome::Reverted);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_match_keeps_swap_and_lists_both_ends() {
        // Completes RRR on row 0 and GGG on row 1 at the same time.
        let mut grid = Grid::from_rows(&["GRR", "RGG", "BBY"], 0).unwrap();
        let outcome = SwapResolver
            .attempt_swap(&mut grid, &LineMatchFinder, c(0, 0), c(1, 0))
            .unwrap();
        let SwapOutcome::Matched(removals) = outcome else {
            panic!("expected a match, got {:?}", outcome);
        };
        assert_eq!(grid.tile_type_at(c(0, 0)), Some(TileType::Red));
        assert_eq!(grid.tile_type_at(c(1, 0)), Some(TileType::Green));
        for at in [c(0, 0), c(0, 1), c(0, 2)] {
            assert!(removals.contains(&at));
        }
        for at in [c(1, 0), c(1, 1), c(1, 2)] {
            assert!(removals.contains(&at), "row 1 run missing {}", at);
        }
        assert_eq!(removals.len(), 6);
    }
}
