use arrayvec::ArrayVec;
use log::trace;

use crate::core::{BoardError, Grid, MatchFinder, SwapResolver};
use crate::types::{Coordinate, SwapOutcome};

/// An adjacent swap that produces at least one match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapHint {
    pub a: Coordinate,
    pub b: Coordinate,
    /// Cells the swap would clear before any cascade (duplicates included)
    pub removals: usize,
}

/// Right and lower neighbours of `at` that lie on the grid.
///
/// Walking every cell with its forward neighbours visits each adjacent pair
/// exactly once.
pub fn forward_neighbours(grid: &Grid, at: Coordinate) -> ArrayVec<Coordinate, 2> {
    let mut out = ArrayVec::new();
    for dir in [Coordinate::RIGHT, Coordinate::DOWN] {
        let next = at + dir;
        if grid.in_bounds(next) {
            out.push(next);
        }
    }
    out
}

/// Every adjacent swap that would produce a match, in row-major order of
/// the first cell.
pub fn find_valid_swaps(grid: &Grid, finder: &dyn MatchFinder) -> Result<Vec<SwapHint>, BoardError> {
    let mut trial = grid.clone();
    let mut hints = Vec::new();

    for a in grid.coordinates() {
        let Some(type_a) = grid.tile_type_at(a) else {
            continue;
        };
        for b in forward_neighbours(grid, a) {
            match grid.tile_type_at(b) {
                Some(type_b) if type_b != type_a => {}
                _ => continue,
            }
            if let SwapOutcome::Matched(removals) = SwapResolver.attempt_swap(&mut trial, finder, a, b)? {
                trace!("Valid swap {} <-> {} ({} cells)", a, b, removals.len());
                hints.push(SwapHint {
                    a,
                    b,
                    removals: removals.len(),
                });
                // A match leaves the swap applied on the scratch grid.
                trial.swap(a, b)?;
            }
        }
    }
    Ok(hints)
}

/// The swap clearing the most cells; ties go to the first in row-major order.
pub fn best_swap(grid: &Grid, finder: &dyn MatchFinder) -> Result<Option<SwapHint>, BoardError> {
    let hints = find_valid_swaps(grid, finder)?;
    Ok(hints
        .into_iter()
        .fold(None, |best: Option<SwapHint>, hint| match best {
            Some(b) if b.removals >= hint.removals => Some(b),
            _ => Some(hint),
        }))
}

/// False on a dead board: no adjacent swap makes a match.
pub fn has_valid_swap(grid: &Grid, finder: &dyn MatchFinder) -> Result<bool, BoardError> {
    Ok(!find_valid_swaps(grid, finder)?.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LineMatchFinder;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_forward_neighbours_at_edges() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(forward_neighbours(&grid, c(0, 0)).as_slice(), &[c(0, 1), c(1, 0)]);
        assert_eq!(forward_neighbours(&grid, c(0, 2)).as_slice(), &[c(1, 2)]);
        assert!(forward_neighbours(&grid, c(2, 2)).is_empty());
    }

    #[test]
    fn test_finds_completing_swap_without_touching_grid() {
        let grid = Grid::from_rows(&["BGYR", "GRRB", "YBGY", "BGYB"], 0).unwrap();
        let before = grid.clone();
        let hints = find_valid_swaps(&grid, &LineMatchFinder).unwrap();
        assert!(hints.contains(&SwapHint {
            a: c(0, 3),
            b: c(1, 3),
            removals: 3,
        }));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_best_swap_prefers_larger_clear() {
        // (1,2) down clears R R R R on row 1; (1,2) right clears an R run
        // and a G column at once.
        let grid = Grid::from_rows(&["GBYG", "RRGR", "YBRG"], 0).unwrap();
        let hints = find_valid_swaps(&grid, &LineMatchFinder).unwrap();
        assert!(hints.contains(&SwapHint {
            a: c(1, 2),
            b: c(2, 2),
            removals: 4,
        }));
        let best = best_swap(&grid, &LineMatchFinder).unwrap().unwrap();
        assert_eq!((best.a, best.b, best.removals), (c(1, 2), c(1, 3), 6));
    }

    #[test]
    fn test_diagonal_pattern_is_dead() {
        // (row + col) % 3 over three types never lines up after one swap.
        let grid = Grid::from_rows(&["BGYB", "GYBG", "YBGY", "BGYB"], 0).unwrap();
        assert!(!has_valid_swap(&grid, &LineMatchFinder).unwrap());
        assert_eq!(best_swap(&grid, &LineMatchFinder).unwrap(), None);
    }
}
