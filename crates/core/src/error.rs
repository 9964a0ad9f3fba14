//! Error type shared by every board operation.

use std::fmt;

use crate::types::{Coordinate, TileId};

/// Errors raised by the board core.
///
/// `OutOfBounds` and `EmptySlot` are ordinary rejections. `DuplicateRelease`
/// and `BarrierUnderflow` mean the bookkeeping is broken and must not be
/// swallowed by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate outside the grid.
    OutOfBounds(Coordinate),
    /// An operation needed a tile but the slot is empty.
    EmptySlot(Coordinate),
    /// A tile was moved onto a slot that already holds one.
    SlotOccupied(Coordinate),
    /// A grid needs at least one row and one column.
    InvalidDimensions { rows: u16, cols: u16 },
    /// A tile was released that is not currently active.
    DuplicateRelease(TileId),
    /// A swap was requested while input is gated.
    InputDisabled,
    /// More column pipelines left the barrier than entered it.
    BarrierUnderflow,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds(c) => write!(f, "coordinate {} is out of bounds", c),
            BoardError::EmptySlot(c) => write!(f, "slot {} is empty", c),
            BoardError::SlotOccupied(c) => write!(f, "slot {} is already occupied", c),
            BoardError::InvalidDimensions { rows, cols } => {
                write!(f, "invalid board dimensions {}x{}", rows, cols)
            }
            BoardError::DuplicateRelease(id) => {
                write!(f, "tile {} released but not active", id)
            }
            BoardError::InputDisabled => write!(f, "input is disabled"),
            BoardError::BarrierUnderflow => write!(f, "column pipeline barrier underflow"),
        }
    }
}

impl std::error::Error for BoardError {}
