//! Input gate and column pipeline barrier.
//!
//! Both are explicit state objects owned by the game and passed to whoever
//! needs them; nothing here is global.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::warn;

use crate::error::BoardError;

/// Permission for player-initiated swaps
///
/// Closed while any swap, revert, fail-swap bounce or cascade is in flight.
#[derive(Debug, Clone)]
pub struct InputGate {
    enabled: bool,
    transitions: u32,
}

impl InputGate {
    pub fn new() -> Self {
        Self {
            enabled: true,
            transitions: 0,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Disable input. Returns true if the state changed.
    pub fn close(&mut self) -> bool {
        if !self.enabled {
            return false;
        }
        self.enabled = false;
        self.transitions += 1;
        true
    }

    /// Re-enable input. Returns true if the state changed.
    ///
    /// Opening an open gate is a no-op so the environment never sees two
    /// enables in a row.
    pub fn open(&mut self) -> bool {
        if self.enabled {
            warn!("Input gate opened while already open");
            return false;
        }
        self.enabled = true;
        self.transitions += 1;
        true
    }

    /// Number of state changes so far
    pub fn transitions(&self) -> u32 {
        self.transitions
    }
}

impl Default for InputGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Join point for the per-column shift/spawn pipelines
///
/// Each pipeline enters when it starts and leaves after its last step; the
/// cascade may re-match only once the count is back to zero. The counter is
/// atomic so the barrier stays correct if pipelines ever run on separate
/// threads.
#[derive(Debug, Default)]
pub struct PipelineBarrier {
    active: AtomicUsize,
}

impl PipelineBarrier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self) {
        self.active.fetch_add(1, Ordering::AcqRel);
    }

    pub fn leave(&self) -> Result<(), BoardError> {
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .map(|_| ())
            .map_err(|_| BoardError::BarrierUnderflow)
    }

    pub fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }

    pub fn is_clear(&self) -> bool {
        self.active() == 0
    }
}
