//! Game module - the turn-resolution state machine
//!
//! [`Match3Game`] owns the grid, the tile pool, the tile source, the input
//! gate and the cascade engine. It accepts swap requests while the gate is
//! open and advances in-flight animations with [`Match3Game::tick`].
//!
//! ```text
//! Idle --request_swap--> FailSwap  --slide_ms--> Idle
//!                   \--> Swapping  --swap_ms--> Cascading --settled--> Idle
//!                                          \--> Reverting --swap_ms--> Idle
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cascade::{BoardContext, CascadeEngine, CascadeProgress};
use crate::config::GameConfig;
use crate::delay::Delay;
use crate::error::BoardError;
use crate::gate::InputGate;
use crate::generator::BoardGenerator;
use crate::grid::Grid;
use crate::matcher::{LineMatchFinder, MatchFinder};
use crate::pool::TilePool;
use crate::rng::{SeededTiles, TileSource};
use crate::snapshot::{CascadeStats, GameSnapshot};
use crate::swap::SwapResolver;
use crate::types::{BoardEvent, Coordinate, SwapOutcome, TileId};

/// Externally visible phase of the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Idle,
    FailSwap,
    Swapping,
    Reverting,
    Cascading,
}

/// What happens when the swap glide finishes
#[derive(Debug, Clone)]
enum Resolution {
    Cascade(Vec<Coordinate>),
    /// Glide both tiles back; ids of the tiles that started at `a` and `b`
    Revert(TileId, TileId),
}

#[derive(Debug, Clone)]
enum Stage {
    Idle,
    FailSwap {
        delay: Delay,
    },
    Swapping {
        delay: Delay,
        a: Coordinate,
        b: Coordinate,
        resolution: Resolution,
    },
    Reverting {
        delay: Delay,
    },
    Cascading,
}

impl Stage {
    fn phase(&self) -> Phase {
        match self {
            Stage::Idle => Phase::Idle,
            Stage::FailSwap { .. } => Phase::FailSwap,
            Stage::Swapping { .. } => Phase::Swapping,
            Stage::Reverting { .. } => Phase::Reverting,
            Stage::Cascading => Phase::Cascading,
        }
    }
}

/// Complete board state plus the turn state machine
pub struct Match3Game {
    config: GameConfig,
    grid: Grid,
    pool: TilePool,
    source: Box<dyn TileSource>,
    finder: Box<dyn MatchFinder>,
    gate: InputGate,
    cascade: CascadeEngine,
    stage: Stage,
    events: Vec<BoardEvent>,
    stats: CascadeStats,
}

impl Match3Game {
    /// Create a game with a seeded tile source and a freshly generated board
    pub fn new(config: GameConfig) -> Result<Self, BoardError> {
        Self::with_source(config, Box::new(SeededTiles::new(config.seed)))
    }

    /// Create a game drawing tile types from `source`
    pub fn with_source(config: GameConfig, source: Box<dyn TileSource>) -> Result<Self, BoardError> {
        let grid = Grid::new(config.rows, config.cols)?;
        let mut game = Self::assemble(config, grid, source);
        game.events = BoardGenerator.fill(
            &mut game.grid,
            &mut game.pool,
            game.source.as_mut(),
            config.timings.tile_animation_ms,
        )?;
        info!(
            "Board generated: {}x{} (seed {})",
            config.rows, config.cols, config.seed
        );
        Ok(game)
    }

    /// Create a game around an existing grid.
    ///
    /// The tiles already on `grid` are adopted by the pool; the config's
    /// dimensions are replaced by the grid's.
    pub fn from_grid(config: GameConfig, grid: Grid, source: Box<dyn TileSource>) -> Self {
        let (rows, cols) = grid.dimensions();
        let config = GameConfig { rows, cols, ..config };
        let mut game = Self::assemble(config, grid, source);
        game.pool.adopt(&game.grid);
        game
    }

    fn assemble(config: GameConfig, grid: Grid, source: Box<dyn TileSource>) -> Self {
        Self {
            cascade: CascadeEngine::new(grid.cols(), config.rematch_scope),
            config,
            grid,
            pool: TilePool::new(),
            source,
            finder: Box::new(LineMatchFinder),
            gate: InputGate::new(),
            stage: Stage::Idle,
            events: Vec::new(),
            stats: CascadeStats::default(),
        }
    }

    /// Replace the match finder
    pub fn with_finder(mut self, finder: Box<dyn MatchFinder>) -> Self {
        self.finder = finder;
        self
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn pool(&self) -> &TilePool {
        &self.pool
    }

    pub fn finder(&self) -> &dyn MatchFinder {
        self.finder.as_ref()
    }

    pub fn cascade(&self) -> &CascadeEngine {
        &self.cascade
    }

    pub fn input_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    pub fn phase(&self) -> Phase {
        self.stage.phase()
    }

    /// No swap, bounce or cascade in flight
    pub fn is_idle(&self) -> bool {
        matches!(self.stage, Stage::Idle)
    }

    pub fn stats(&self) -> &CascadeStats {
        &self.stats
    }

    /// Events not yet drained, oldest first
    pub fn events(&self) -> &[BoardEvent] {
        &self.events
    }

    /// Take every pending event, oldest first
    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    /// Ask to swap the tiles at `a` and `b`.
    ///
    /// Fails with [`BoardError::InputDisabled`] while the gate is closed and
    /// with `OutOfBounds`/`EmptySlot` for a bad origin. Any accepted request
    /// closes the gate, including one with an invalid target. The grid
    /// reflects the outcome immediately; the events describe the animation.
    pub fn request_swap(&mut self, a: Coordinate, b: Coordinate) -> Result<SwapOutcome, BoardError> {
        if !self.gate.is_enabled() {
            return Err(BoardError::InputDisabled);
        }

        let outcome = SwapResolver.attempt_swap(&mut self.grid, self.finder.as_ref(), a, b)?;
        self.stats.swaps += 1;
        self.close_gate();

        let timings = self.config.timings;
        match &outcome {
            SwapOutcome::Invalid => {
                self.stats.invalid_swaps += 1;
                debug!("FailSwap: {} towards {}", a, b - a);
                self.events.push(BoardEvent::FailSwap {
                    origin: a,
                    direction: b - a,
                    duration_ms: timings.slide_ms,
                });
                self.stage = Stage::FailSwap {
                    delay: Delay::new(timings.slide_ms),
                };
            }
            SwapOutcome::Matched(removals) => {
                // The swap stays applied: the tile that started at `a` is now at `b`.
                let from_a = self.tile_id(b)?;
                let from_b = self.tile_id(a)?;
                self.push_glide(from_a, a, b);
                self.push_glide(from_b, b, a);
                self.stage = Stage::Swapping {
                    delay: Delay::new(timings.swap_ms),
                    a,
                    b,
                    resolution: Resolution::Cascade(removals.clone()),
                };
            }
            SwapOutcome::Reverted => {
                let from_a = self.tile_id(a)?;
                let from_b = self.tile_id(b)?;
                self.push_glide(from_a, a, b);
                self.push_glide(from_b, b, a);
                self.stage = Stage::Swapping {
                    delay: Delay::new(timings.swap_ms),
                    a,
                    b,
                    resolution: Resolution::Revert(from_a, from_b),
                };
            }
        }
        Ok(outcome)
    }

    /// Advance animations by `elapsed_ms`.
    ///
    /// Time left when one phase ends is spent on the next, so the result
    /// does not depend on how elapsed time is sliced into ticks.
    pub fn tick(&mut self, elapsed_ms: u32) -> Result<(), BoardError> {
        let mut budget = elapsed_ms;
        loop {
            match std::mem::replace(&mut self.stage, Stage::Idle) {
                Stage::Idle => return Ok(()),
                Stage::FailSwap { mut delay } => {
                    if !delay.advance(&mut budget) {
                        self.stage = Stage::FailSwap { delay };
                        return Ok(());
                    }
                    self.open_gate();
                }
                Stage::Swapping {
                    mut delay,
                    a,
                    b,
                    resolution,
                } => {
                    if !delay.advance(&mut budget) {
                        self.stage = Stage::Swapping {
                            delay,
                            a,
                            b,
                            resolution,
                        };
                        return Ok(());
                    }
                    match resolution {
                        Resolution::Cascade(removals) => {
                            self.stage = Stage::Cascading;
                            let mut ctx = BoardContext {
                                grid: &mut self.grid,
                                pool: &mut self.pool,
                                source: self.source.as_mut(),
                                finder: self.finder.as_ref(),
                                timings: self.config.timings,
                                events: &mut self.events,
                            };
                            self.cascade.begin(&removals, &mut ctx)?;
                        }
                        Resolution::Revert(from_a, from_b) => {
                            self.push_glide(from_a, b, a);
                            self.push_glide(from_b, a, b);
                            self.stage = Stage::Reverting {
                                delay: Delay::new(self.config.timings.swap_ms),
                            };
                        }
                    }
                }
                Stage::Reverting { mut delay } => {
                    if !delay.advance(&mut budget) {
                        self.stage = Stage::Reverting { delay };
                        return Ok(());
                    }
                    self.stats.reverted_swaps += 1;
                    self.open_gate();
                }
                Stage::Cascading => {
                    let mut ctx = BoardContext {
                        grid: &mut self.grid,
                        pool: &mut self.pool,
                        source: self.source.as_mut(),
                        finder: self.finder.as_ref(),
                        timings: self.config.timings,
                        events: &mut self.events,
                    };
                    let progress = match self.cascade.advance(&mut budget, &mut ctx) {
                        Ok(progress) => progress,
                        Err(err) => {
                            // The engine keeps its place; a later tick resumes it.
                            self.stage = Stage::Cascading;
                            return Err(err);
                        }
                    };
                    match progress {
                        CascadeProgress::Running => {
                            self.stage = Stage::Cascading;
                            return Ok(());
                        }
                        CascadeProgress::Settled { passes, cleared } => {
                            self.stats.record_cascade(passes, cleared);
                            self.events.push(BoardEvent::CascadeSettled { passes, cleared });
                            self.open_gate();
                        }
                        CascadeProgress::Idle => self.open_gate(),
                    }
                }
            }
        }
    }

    /// Discard the board and generate a new one.
    ///
    /// Only allowed while idle; used when no valid swap is left.
    pub fn regenerate(&mut self) -> Result<(), BoardError> {
        if !self.is_idle() || !self.gate.is_enabled() {
            return Err(BoardError::InputDisabled);
        }
        let appeared = BoardGenerator.fill(
            &mut self.grid,
            &mut self.pool,
            self.source.as_mut(),
            self.config.timings.tile_animation_ms,
        )?;
        self.events.extend(appeared);
        self.stats.regenerations += 1;
        info!("Board regenerated");
        Ok(())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            rows: self.grid.rows(),
            cols: self.grid.cols(),
            board: self.grid.type_rows(),
            input_enabled: self.gate.is_enabled(),
            phase: self.phase(),
            pending_spawns: self.cascade.spawn_queues().to_vec(),
            seed: self.config.seed,
            stats: self.stats,
        }
    }

    fn tile_id(&self, at: Coordinate) -> Result<TileId, BoardError> {
        self.grid
            .get(at)?
            .map(|t| t.id)
            .ok_or(BoardError::EmptySlot(at))
    }

    fn push_glide(&mut self, id: TileId, from: Coordinate, to: Coordinate) {
        self.events.push(BoardEvent::TileMoved {
            id,
            from,
            to,
            duration_ms: self.config.timings.swap_ms,
        });
    }

    fn close_gate(&mut self) {
        if self.gate.close() {
            self.events.push(BoardEvent::InputChanged { enabled: false });
        }
    }

    fn open_gate(&mut self) {
        if self.gate.open() {
            self.events.push(BoardEvent::InputChanged { enabled: true });
        }
    }
}
