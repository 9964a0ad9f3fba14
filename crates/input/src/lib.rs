//! Pointer input module (board-facing).
//!
//! This module is independent of any UI framework. It turns a press-and-drag
//! on a tile into a swap request once the pointer has travelled far enough,
//! and maps `crossterm` mouse events onto board cells for terminal front
//! ends.

pub mod map;
pub mod swipe;

pub use match3_types as types;

pub use map::{pointer_from_mouse, BoardLayout, PointerEvent};
pub use swipe::{SwapRequest, SwipeDetector};
