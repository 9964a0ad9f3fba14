//! Cascade engine - remove, shift, spawn, re-match until the board is stable.
//!
//! One cascade is a sequence of passes. A pass removes the matched tiles and
//! queues one spawn per removed tile in its column. Every column with pending
//! spawns then runs its own pipeline: shift the column down by one gap, spawn
//! one tile into row 0, wait `slide + post-slide delay`, repeat until the
//! queue is empty. Columns advance independently; a [`PipelineBarrier`]
//! joins them. When every column is idle the affected cells are searched
//! again and, if anything matched, the next pass starts.
//!
//! The re-match only looks at the cells touched during the pass unless
//! [`RematchScope::FullBoard`] is configured. A match formed entirely outside
//! those cells is left on the board.

use std::collections::HashSet;

use log::{debug, trace, warn};

use crate::config::{RematchScope, Timings};
use crate::delay::Delay;
use crate::error::BoardError;
use crate::gate::PipelineBarrier;
use crate::generator::BoardGenerator;
use crate::grid::Grid;
use crate::matcher::MatchFinder;
use crate::pool::TilePool;
use crate::rng::TileSource;
use crate::types::{BoardEvent, Coordinate};

/// Everything a cascade step touches, borrowed from the game for one call.
pub struct BoardContext<'a> {
    pub grid: &'a mut Grid,
    pub pool: &'a mut TilePool,
    pub source: &'a mut dyn TileSource,
    pub finder: &'a dyn MatchFinder,
    pub timings: Timings,
    pub events: &'a mut Vec<BoardEvent>,
}

/// Insertion-ordered set of coordinates touched in the current pass
#[derive(Debug, Clone, Default)]
pub struct AffectedSet {
    order: Vec<Coordinate>,
    seen: HashSet<Coordinate>,
}

impl AffectedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the coordinate was already present.
    pub fn insert(&mut self, coord: Coordinate) -> bool {
        if !self.seen.insert(coord) {
            return false;
        }
        self.order.push(coord);
        true
    }

    pub fn contains(&self, coord: Coordinate) -> bool {
        self.seen.contains(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.seen.clear();
    }
}

/// One column's shift+spawn sequence in flight
#[derive(Debug, Clone, Copy)]
struct ColumnPipeline {
    col: usize,
    delay: Delay,
    finished: bool,
}

/// Result of advancing the cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CascadeProgress {
    /// No cascade in progress
    Idle,
    /// Columns still shifting/spawning
    Running,
    /// The board is quiescent; `passes` rounds removed `cleared` tiles
    Settled { passes: u32, cleared: u32 },
}

#[derive(Debug)]
pub struct CascadeEngine {
    spawn_queues: Vec<u32>,
    pipelines: Vec<ColumnPipeline>,
    barrier: PipelineBarrier,
    affected: AffectedSet,
    scope: RematchScope,
    running: bool,
    passes: u32,
    cleared: u32,
}

impl CascadeEngine {
    pub fn new(cols: u16, scope: RematchScope) -> Self {
        Self {
            spawn_queues: vec![0; cols as usize],
            pipelines: Vec::new(),
            barrier: PipelineBarrier::new(),
            affected: AffectedSet::new(),
            scope,
            running: false,
            passes: 0,
            cleared: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn scope(&self) -> RematchScope {
        self.scope
    }

    /// Pending spawns for `col` (0 for unknown columns)
    pub fn pending_spawns(&self, col: usize) -> u32 {
        self.spawn_queues.get(col).copied().unwrap_or(0)
    }

    pub fn spawn_queues(&self) -> &[u32] {
        &self.spawn_queues
    }

    pub fn affected(&self) -> &AffectedSet {
        &self.affected
    }

    /// Columns whose pipeline has not finished yet
    pub fn active_pipelines(&self) -> usize {
        self.barrier.active()
    }

    /// Passes run so far by the current (or last) cascade
    pub fn passes(&self) -> u32 {
        self.passes
    }

    /// Tiles removed so far by the current (or last) cascade
    pub fn cleared(&self) -> u32 {
        self.cleared
    }

    /// Start a cascade from the removals of a matched swap
    pub fn begin(&mut self, removals: &[Coordinate], ctx: &mut BoardContext<'_>) -> Result<(), BoardError> {
        self.running = true;
        self.passes = 0;
        self.cleared = 0;
        self.affected.clear();
        self.start_pass(removals, ctx)
    }

    fn start_pass(&mut self, removals: &[Coordinate], ctx: &mut BoardContext<'_>) -> Result<(), BoardError> {
        self.remove(removals, ctx)?;
        self.passes += 1;
        debug!("Cascade pass {}: {} removals", self.passes, removals.len());

        let step_ms = ctx.timings.spawn_step_ms();
        for col in 0..self.spawn_queues.len() {
            if self.spawn_queues[col] == 0 {
                continue;
            }
            self.barrier.enter();
            debug!("Spawning: column {} | {}", col, self.spawn_queues[col]);
            self.step_column(col, ctx)?;
            self.pipelines.push(ColumnPipeline {
                col,
                delay: Delay::new(step_ms),
                finished: false,
            });
        }
        Ok(())
    }

    /// Step 1: clear matched slots, release their tiles and queue spawns.
    ///
    /// Coordinates whose slot is already empty (duplicates in the removal
    /// list) are skipped. An off-board coordinate fails the whole call
    /// before anything is removed.
    pub fn remove(&mut self, removals: &[Coordinate], ctx: &mut BoardContext<'_>) -> Result<(), BoardError> {
        if let Some(&at) = removals.iter().find(|&&at| !ctx.grid.in_bounds(at)) {
            return Err(BoardError::OutOfBounds(at));
        }
        let cols = ctx.grid.cols() as usize;
        if self.spawn_queues.len() < cols {
            self.spawn_queues.resize(cols, 0);
        }

        for &at in removals {
            let Some(tile) = ctx.grid.take(at)? else {
                continue;
            };
            ctx.pool.release(tile.id)?;
            self.affected.insert(at);
            self.spawn_queues[at.col as usize] += 1;
            self.cleared += 1;
            debug!("Disappear: {} {}", tile.id, at);
            ctx.events.push(BoardEvent::TileDisappeared {
                id: tile.id,
                at,
                duration_ms: ctx.timings.tile_animation_ms,
            });
        }
        Ok(())
    }

    /// One shift+spawn cycle of a column; consumes one queued spawn.
    fn step_column(&mut self, col: usize, ctx: &mut BoardContext<'_>) -> Result<(), BoardError> {
        self.shift_column(col, ctx)?;
        self.spawn_top(col, ctx)?;
        self.spawn_queues[col] = self.spawn_queues[col].saturating_sub(1);
        Ok(())
    }

    /// Step 2: close the first gap below the spawn row by one row.
    ///
    /// Walks down from row 0 over the contiguous occupied run (each visited
    /// cell is affected) until the first empty slot, then slides that run
    /// down by one, bottom-most tile first. A full column moves nothing.
    pub fn shift_column(&mut self, col: usize, ctx: &mut BoardContext<'_>) -> Result<(), BoardError> {
        let rows = ctx.grid.rows() as i32;
        let col = col as i32;

        let mut gap = None;
        for row in 0..rows {
            let at = Coordinate::new(row, col);
            self.affected.insert(at);
            if ctx.grid.is_empty(at)? {
                gap = Some(row);
                break;
            }
        }

        let Some(gap) = gap else {
            warn!("Shift requested on full column {}", col);
            return Ok(());
        };

        for row in (0..gap).rev() {
            let from = Coordinate::new(row, col);
            let to = from + Coordinate::DOWN;
            let tile = ctx.grid.move_tile(from, to)?;
            trace!("MoveToPosition: {} {} -> {}", tile.id, from, to);
            ctx.events.push(BoardEvent::TileMoved {
                id: tile.id,
                from,
                to,
                duration_ms: ctx.timings.slide_ms,
            });
        }
        Ok(())
    }

    /// Step 3: spawn one random tile into row 0 of `col`.
    pub fn spawn_top(&mut self, col: usize, ctx: &mut BoardContext<'_>) -> Result<(), BoardError> {
        let at = Coordinate::new(0, col as i32);
        if !ctx.grid.is_empty(at)? {
            warn!("Spawn slot {} still occupied, skipping spawn", at);
            return Ok(());
        }
        let tile_type = BoardGenerator.random_type(&mut *ctx.source);
        let tile = ctx.pool.spawn(tile_type, at);
        ctx.grid.set(at, Some(tile))?;
        self.affected.insert(at);
        debug!("Appear: {} {} {:?}", tile.id, at, tile_type);
        ctx.events.push(BoardEvent::TileAppeared {
            id: tile.id,
            at,
            tile_type,
            duration_ms: ctx.timings.tile_animation_ms,
        });
        Ok(())
    }

    /// Step 5: search the re-match candidates and collect a new removal set
    /// without duplicates.
    pub fn rematch(&self, grid: &Grid, finder: &dyn MatchFinder) -> Vec<Coordinate> {
        let candidates: Vec<Coordinate> = match self.scope {
            RematchScope::Affected => self.affected.iter().copied().collect(),
            RematchScope::FullBoard => grid.coordinates().collect(),
        };

        let mut removals = AffectedSet::new();
        for at in candidates {
            // Cells emptied again are skipped.
            let Some(tile_type) = grid.tile_type_at(at) else {
                continue;
            };
            let result = finder.search(grid, at, tile_type);
            if result.is_match {
                for c in result.coordinates {
                    removals.insert(c);
                }
            }
        }
        removals.iter().copied().collect()
    }

    /// Advance all column pipelines by up to `*budget_ms`.
    ///
    /// Pipelines fire in time order, ties in column order, so one large
    /// budget and many small ones draw spawn types in the same sequence.
    /// Time left over after the cascade settles is returned through
    /// `budget_ms`.
    pub fn advance(&mut self, budget_ms: &mut u32, ctx: &mut BoardContext<'_>) -> Result<CascadeProgress, BoardError> {
        loop {
            if !self.running {
                return Ok(CascadeProgress::Idle);
            }

            self.run_pipelines(budget_ms, ctx)?;
            if !self.barrier.is_clear() {
                return Ok(CascadeProgress::Running);
            }

            let removals = self.rematch(ctx.grid, ctx.finder);
            self.affected.clear();
            if removals.is_empty() {
                self.running = false;
                debug!(
                    "Cascade settled after {} passes ({} tiles)",
                    self.passes, self.cleared
                );
                return Ok(CascadeProgress::Settled {
                    passes: self.passes,
                    cleared: self.cleared,
                });
            }
            self.start_pass(&removals, ctx)?;
        }
    }

    fn run_pipelines(&mut self, budget_ms: &mut u32, ctx: &mut BoardContext<'_>) -> Result<(), BoardError> {
        let step_ms = ctx.timings.spawn_step_ms();
        let mut pipelines = std::mem::take(&mut self.pipelines);

        while let Some(next) = pipelines.iter().map(|p| p.delay.remaining_ms()).min() {
            if next > *budget_ms {
                for pipeline in pipelines.iter_mut() {
                    let mut budget = *budget_ms;
                    pipeline.delay.advance(&mut budget);
                }
                *budget_ms = 0;
                break;
            }
            *budget_ms -= next;
            trace!("Pipelines fire after {}ms ({} active)", next, pipelines.len());

            for pipeline in pipelines.iter_mut() {
                let mut budget = next;
                if !pipeline.delay.advance(&mut budget) {
                    continue;
                }
                if self.spawn_queues[pipeline.col] > 0 {
                    self.step_column(pipeline.col, ctx)?;
                    pipeline.delay = Delay::new(step_ms);
                } else {
                    pipeline.finished = true;
                    self.barrier.leave()?;
                }
            }
            pipelines.retain(|p| !p.finished);
        }

        self.pipelines = pipelines;
        Ok(())
    }
}
