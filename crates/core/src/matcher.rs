//! Match search - finds runs of equal tiles through an origin.
//!
//! From the origin, each of the four cardinal directions is walked one step
//! at a time while the next slot holds a tile of the searched type. The
//! vertical axis matches when `up + down >= 2`, the horizontal axis when
//! `left + right >= 2`, i.e. a run of at least three including the origin.

use crate::grid::Grid;
use crate::types::{Coordinate, TileType, MIN_MATCH_LEN};

/// Outcome of one search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub is_match: bool,
    /// Matched coordinates, origin last, without duplicates.
    /// Empty when there is no match.
    pub coordinates: Vec<Coordinate>,
}

impl MatchResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

/// Match detection strategy
///
/// Implementations must be pure queries: searching twice on an unchanged grid
/// gives identical results.
pub trait MatchFinder {
    fn search(&self, grid: &Grid, origin: Coordinate, tile_type: TileType) -> MatchResult;
}

/// Straight-line search along both axes through the origin
#[derive(Debug, Clone, Copy, Default)]
pub struct LineMatchFinder;

impl LineMatchFinder {
    pub fn new() -> Self {
        Self
    }

    /// Collect consecutive `tile_type` coordinates starting one step from
    /// `origin`. Bounded by the grid extent along the walked axis.
    fn walk(grid: &Grid, origin: Coordinate, step: Coordinate, tile_type: TileType) -> Vec<Coordinate> {
        let limit = grid.rows().max(grid.cols()) as usize;
        let mut run = Vec::new();
        let mut at = origin + step;
        while run.len() < limit && grid.tile_type_at(at) == Some(tile_type) {
            run.push(at);
            at = at + step;
        }
        run
    }
}

impl MatchFinder for LineMatchFinder {
    fn search(&self, grid: &Grid, origin: Coordinate, tile_type: TileType) -> MatchResult {
        let up = Self::walk(grid, origin, Coordinate::UP, tile_type);
        let down = Self::walk(grid, origin, Coordinate::DOWN, tile_type);
        let left = Self::walk(grid, origin, Coordinate::LEFT, tile_type);
        let right = Self::walk(grid, origin, Coordinate::RIGHT, tile_type);

        let mut coordinates: Vec<Coordinate> = Vec::new();
        let needed = MIN_MATCH_LEN - 1;
        if up.len() + down.len() >= needed {
            push_unique(&mut coordinates, up.iter().chain(down.iter()));
        }
        if left.len() + right.len() >= needed {
            push_unique(&mut coordinates, left.iter().chain(right.iter()));
        }

        if coordinates.is_empty() {
            return MatchResult::none();
        }
        push_unique(&mut coordinates, std::iter::once(&origin));

        MatchResult {
            is_match: true,
            coordinates,
        }
    }
}

fn push_unique<'a>(out: &mut Vec<Coordinate>, coords: impl Iterator<Item = &'a Coordinate>) {
    for &c in coords {
        if !out.contains(&c) {
            out.push(c);
        }
    }
}
