//! Board analysis on top of the core rules.
//!
//! Nothing here mutates a live board: every trial runs on a scratch copy of
//! the grid. Used for hints, dead-board detection and the autoplay runner.

pub mod moves;

pub use match3_core as core;
pub use match3_types as types;

pub use moves::{best_swap, find_valid_swaps, forward_neighbours, has_valid_swap, SwapHint};
