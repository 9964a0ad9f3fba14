//! Core types module - shared value types and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain values, usable from the game core, the input layer and
//! any front end that renders the board.
//!
//! # Board Orientation
//!
//! - **Rows**: indexed from 0 at the top, gravity pulls tiles toward higher rows
//! - **Columns**: indexed from 0 at the left
//! - **Spawn row**: new tiles always appear in row 0
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds and are only defaults; the core receives
//! its durations through configuration.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `DEFAULT_SWAP_MS` | 500 | Swap glide (and revert glide) |
//! | `DEFAULT_SLIDE_MS` | 500 | One-row slide, also the fail-swap bounce |
//! | `DEFAULT_POST_SLIDE_DELAY_MS` | 100 | Pause after each shift+spawn step |
//! | `DEFAULT_TILE_ANIMATION_MS` | 500 | Appear/disappear scale |
//!
//! # Examples
//!
//! ```
//! use match3_types::{Coordinate, TileType};
//!
//! let a = Coordinate::new(3, 3);
//! let b = a + Coordinate::RIGHT;
//! assert_eq!(b, Coordinate::new(3, 4));
//! assert_eq!(b - a, Coordinate::RIGHT);
//!
//! assert_eq!(TileType::from_str("red"), Some(TileType::Red));
//! assert_eq!(TileType::ALL.len(), TileType::COUNT);
//! ```

use std::fmt;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Default board height in rows
pub const DEFAULT_ROWS: u16 = 8;

/// Default board width in columns
pub const DEFAULT_COLS: u16 = 8;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Swap glide duration; a rejected swap glides back for the same duration.
pub const DEFAULT_SWAP_MS: u32 = 500;

/// One-row slide duration. The fail-swap bounce uses it too.
pub const DEFAULT_SLIDE_MS: u32 = 500;

/// Extra pause after every shift+spawn step of a column.
pub const DEFAULT_POST_SLIDE_DELAY_MS: u32 = 100;

/// Appear/disappear scale animation duration.
pub const DEFAULT_TILE_ANIMATION_MS: u32 = 500;

/// Pointer travel (pixels) needed before a press becomes a swipe.
pub const DEFAULT_SWIPE_PIXELS: u32 = 50;

/// Shortest run of equal tiles that counts as a match.
pub const MIN_MATCH_LEN: usize = 3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(DEFAULT_SWAP_MS, 500);
        assert_eq!(DEFAULT_SLIDE_MS, 500);
        assert_eq!(DEFAULT_POST_SLIDE_DELAY_MS, 100);
        assert_eq!(DEFAULT_TILE_ANIMATION_MS, 500);
        assert_eq!(DEFAULT_SWIPE_PIXELS, 50);
    }

    #[test]
    fn coordinate_arithmetic() {
        let a = Coordinate::new(2, 5);
        assert_eq!(a + Coordinate::DOWN, Coordinate::new(3, 5));
        assert_eq!(a + Coordinate::UP, Coordinate::new(1, 5));
        assert_eq!(a + Coordinate::LEFT - a, Coordinate::LEFT);
        assert_eq!(Coordinate::new(-1, 2) - Coordinate::new(0, 2), Coordinate::UP);
    }

    #[test]
    fn coordinate_equality_is_structural() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Coordinate::new(1, 1));
        set.insert(Coordinate::new(0, 0) + Coordinate::new(1, 1));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn tile_type_index_roundtrip() {
        for (i, t) in TileType::ALL.iter().enumerate() {
            assert_eq!(t.index(), i);
            assert_eq!(TileType::from_index(i), Some(*t));
            assert_eq!(TileType::from_str(t.as_str()), Some(*t));
        }
        assert_eq!(TileType::from_index(TileType::COUNT), None);
    }
}

/// Grid position as (row, column)
///
/// Components are signed so that neighbours of edge cells (e.g. `(-1, 2)`)
/// can be expressed and then rejected by bounds checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: i32,
    pub col: i32,
}

impl Coordinate {
    /// One row toward the top (spawn) edge
    pub const UP: Coordinate = Coordinate { row: -1, col: 0 };
    /// One row toward the bottom edge (direction of gravity)
    pub const DOWN: Coordinate = Coordinate { row: 1, col: 0 };
    pub const LEFT: Coordinate = Coordinate { row: 0, col: -1 };
    pub const RIGHT: Coordinate = Coordinate { row: 0, col: 1 };

    /// The four cardinal steps, vertical axis first.
    pub const CARDINALS: [Coordinate; 4] = [
        Coordinate::UP,
        Coordinate::DOWN,
        Coordinate::LEFT,
        Coordinate::RIGHT,
    ];

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Coordinate {
    type Output = Coordinate;

    fn sub(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The closed set of tile kinds
///
/// Only equality matters; the enumeration order is used for uniform draws
/// and as the deterministic fallback order of the board generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileType {
    Blue,
    Green,
    Red,
    Yellow,
}

impl TileType {
    /// Number of distinct tile types
    pub const COUNT: usize = 4;

    /// All tile types in enumeration order
    pub const ALL: [TileType; TileType::COUNT] =
        [TileType::Blue, TileType::Green, TileType::Red, TileType::Yellow];

    pub fn index(&self) -> usize {
        match self {
            TileType::Blue => 0,
            TileType::Green => 1,
            TileType::Red => 2,
            TileType::Yellow => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Parse tile type from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use match3_types::TileType;
    ///
    /// assert_eq!(TileType::from_str("Blue"), Some(TileType::Blue));
    /// assert_eq!(TileType::from_str("y"), Some(TileType::Yellow));
    /// assert_eq!(TileType::from_str("purple"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" | "b" => Some(TileType::Blue),
            "green" | "g" => Some(TileType::Green),
            "red" | "r" => Some(TileType::Red),
            "yellow" | "y" => Some(TileType::Yellow),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Blue => "blue",
            TileType::Green => "green",
            TileType::Red => "red",
            TileType::Yellow => "yellow",
        }
    }

    /// Single-character label, handy for text dumps of a board.
    pub fn as_char(&self) -> char {
        match self {
            TileType::Blue => 'B',
            TileType::Green => 'G',
            TileType::Red => 'R',
            TileType::Yellow => 'Y',
        }
    }
}

/// Identity of one tile instance, stable for the tile's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of one swap attempt
///
/// `Invalid` and `Reverted` are terminal: the player has to issue a new swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "removals", rename_all = "camelCase")]
pub enum SwapOutcome {
    /// At least one endpoint formed a match. Carries both match lists
    /// concatenated; duplicates are tolerated downstream.
    Matched(Vec<Coordinate>),
    /// Neither endpoint matched and the tiles went back to their slots.
    Reverted,
    /// Target out of bounds or empty; nothing moved.
    Invalid,
}

impl SwapOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, SwapOutcome::Matched(_))
    }
}

/// Event emitted by the game core for the environment (renderer, input layer).
///
/// Durations tell the environment how long the core will wait before it
/// continues; the core never waits for visual completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BoardEvent {
    TileAppeared {
        id: TileId,
        at: Coordinate,
        tile_type: TileType,
        duration_ms: u32,
    },
    TileDisappeared {
        id: TileId,
        at: Coordinate,
        duration_ms: u32,
    },
    TileMoved {
        id: TileId,
        from: Coordinate,
        to: Coordinate,
        duration_ms: u32,
    },
    /// Bounce-back cue for a rejected swap, pointing from origin toward target.
    FailSwap {
        origin: Coordinate,
        direction: Coordinate,
        duration_ms: u32,
    },
    InputChanged {
        enabled: bool,
    },
    /// The cascade reached quiescence after `passes` remove/refill rounds.
    CascadeSettled {
        passes: u32,
        cleared: u32,
    },
}
