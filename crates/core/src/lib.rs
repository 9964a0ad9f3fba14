//! Core board logic - pure, deterministic, and testable
//!
//! This crate contains the board, the match rules and the turn state machine.
//! It has no dependencies on rendering, windowing or I/O:
//!
//! - **Deterministic**: the same seed (or the same scripted tile sequence)
//!   produces identical boards and cascades
//! - **Tick driven**: animation waits are countdowns advanced by
//!   [`Match3Game::tick`], never sleeps
//! - **Observable**: everything the environment must animate comes out as
//!   [`BoardEvent`](types::BoardEvent)s
//!
//! # Module Structure
//!
//! - [`grid`]: flat row-major slot storage with bounds checks
//! - [`matcher`]: run detection through an origin cell
//! - [`swap`]: swap validation and outcome
//! - [`cascade`]: remove/shift/spawn/re-match with per-column pipelines
//! - [`generator`]: initial fill without 3-in-a-row
//! - [`gate`]: input gate and pipeline barrier
//! - [`game`]: the state machine tying the above together
//!
//! # Example
//!
//! ```
//! use match3_core::{GameConfig, Match3Game, Timings};
//! use match3_core::types::{Coordinate, SwapOutcome};
//!
//! let config = GameConfig::default().with_timings(Timings::instant());
//! let mut game = Match3Game::new(config).unwrap();
//! game.drain_events();
//!
//! // Swapping off the board is rejected with a bounce cue.
//! let outcome = game
//!     .request_swap(Coordinate::new(0, 0), Coordinate::new(-1, 0))
//!     .unwrap();
//! assert_eq!(outcome, SwapOutcome::Invalid);
//! assert!(!game.input_enabled());
//!
//! game.tick(16).unwrap();
//! assert!(game.input_enabled());
//! ```
//!
//! # Coordinates
//!
//! `(row, col)` with row 0 at the top. Gravity pulls tiles toward higher
//! rows and new tiles spawn into row 0.

pub mod cascade;
pub mod config;
pub mod delay;
pub mod error;
pub mod game;
pub mod gate;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod pool;
pub mod rng;
pub mod snapshot;
pub mod swap;

pub use match3_types as types;

pub use cascade::{AffectedSet, BoardContext, CascadeEngine, CascadeProgress};
pub use config::{GameConfig, RematchScope, Timings};
pub use delay::Delay;
pub use error::BoardError;
pub use game::{Match3Game, Phase};
pub use gate::{InputGate, PipelineBarrier};
pub use generator::{has_run_of_three, BoardGenerator};
pub use grid::{Grid, Slot, Tile};
pub use matcher::{LineMatchFinder, MatchFinder, MatchResult};
pub use pool::TilePool;
pub use rng::{FixedSequence, SeededTiles, SimpleRng, TileSource};
pub use snapshot::{CascadeStats, GameSnapshot};
pub use swap::SwapResolver;
