use serde::{Deserialize, Serialize};

use crate::game::Phase;
use crate::types::TileType;

/// Running totals kept by the game across turns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CascadeStats {
    /// Accepted swap requests, whatever their outcome
    pub swaps: u32,
    pub invalid_swaps: u32,
    pub reverted_swaps: u32,
    /// Cascades run to completion
    pub cascades: u32,
    /// Passes of the most recent cascade
    pub last_passes: u32,
    /// Longest chain seen so far
    pub max_passes: u32,
    pub total_cleared: u32,
    pub regenerations: u32,
}

impl CascadeStats {
    pub fn record_cascade(&mut self, passes: u32, cleared: u32) {
        self.cascades += 1;
        self.last_passes = passes;
        self.max_passes = self.max_passes.max(passes);
        self.total_cleared += cleared;
    }
}

/// Serializable view of the game at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub rows: u16,
    pub cols: u16,
    /// Tile type per slot, row 0 first
    pub board: Vec<Vec<Option<TileType>>>,
    pub input_enabled: bool,
    pub phase: Phase,
    pub pending_spawns: Vec<u32>,
    pub seed: u32,
    pub stats: CascadeStats,
}

impl GameSnapshot {
    pub fn occupied(&self) -> usize {
        self.board.iter().flatten().filter(|s| s.is_some()).count()
    }

    /// True when no column has an empty slot below an occupied one
    pub fn is_settled(&self) -> bool {
        (0..self.cols as usize).all(|col| {
            let mut seen_tile = false;
            self.board.iter().all(|row| match row.get(col).copied().flatten() {
                Some(_) => {
                    seen_tile = true;
                    true
                }
                None => !seen_tile,
            })
        })
    }
}
