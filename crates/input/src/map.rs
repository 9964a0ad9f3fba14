//! Mouse mapping from terminal events to board pointer events.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::Coordinate;

/// Left-button pointer activity in terminal cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Down { x: i32, y: i32 },
    Drag { x: i32, y: i32 },
    Up,
}

/// Map a terminal mouse event; anything but the left button is ignored.
pub fn pointer_from_mouse(mouse: MouseEvent) -> Option<PointerEvent> {
    let x = mouse.column as i32;
    let y = mouse.row as i32;
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Down { x, y }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Drag { x, y }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Up),
        _ => None,
    }
}

/// Where the board is drawn on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub left: i32,
    pub top: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    pub rows: u16,
    pub cols: u16,
}

impl BoardLayout {
    /// Board cell under screen position `(x, y)`, if any
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Coordinate> {
        if x < self.left || y < self.top || self.cell_width <= 0 || self.cell_height <= 0 {
            return None;
        }
        let col = (x - self.left) / self.cell_width;
        let row = (y - self.top) / self.cell_height;
        if row >= self.rows as i32 || col >= self.cols as i32 {
            return None;
        }
        Some(Coordinate::new(row, col))
    }
}
