//! Swipe detection: pointer down on a tile, drag past a threshold, swap.
//!
//! Only one selection can be active at a time and a press yields at most one
//! swap. Pointer-up cancels a press that has not turned into a swipe.

use log::debug;

use crate::map::{BoardLayout, PointerEvent};
use crate::types::{BoardEvent, Coordinate, DEFAULT_SWIPE_PIXELS};

/// Swap asked for by the player: `from` is the pressed tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwapRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Press {
    origin: Coordinate,
    x: i32,
    y: i32,
    fired: bool,
}

/// Tracks one press at a time and reports the swap it turns into.
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    threshold: i32,
    input_enabled: bool,
    press: Option<Press>,
}

impl SwipeDetector {
    pub fn new() -> Self {
        Self::with_threshold(DEFAULT_SWIPE_PIXELS)
    }

    /// `threshold` is the travel (in pointer units) that turns a press into
    /// a swipe; values below 1 are raised to 1.
    pub fn with_threshold(threshold: u32) -> Self {
        Self {
            threshold: threshold.max(1).min(i32::MAX as u32) as i32,
            input_enabled: true,
            press: None,
        }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold as u32
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Mirror the game's input gate.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    /// Follow `InputChanged` events coming out of the game.
    pub fn observe(&mut self, event: &BoardEvent) {
        if let BoardEvent::InputChanged { enabled } = event {
            self.set_input_enabled(*enabled);
        }
    }

    /// A press is being tracked (until pointer-up)
    pub fn is_tracking(&self) -> bool {
        self.press.is_some()
    }

    /// Start tracking a press on `origin`.
    ///
    /// Ignored (returns false) while input is disabled or another press is
    /// already active.
    pub fn pointer_down(&mut self, origin: Coordinate, x: i32, y: i32) -> bool {
        if !self.input_enabled || self.press.is_some() {
            return false;
        }
        debug!("Pointer down: {}", origin);
        self.press = Some(Press {
            origin,
            x,
            y,
            fired: false,
        });
        true
    }

    /// Report the swap once the pointer has moved `threshold` units away
    /// from where it was pressed.
    ///
    /// The enabled flag is left alone: it only follows the game's
    /// `InputChanged` events, so a request the game rejects does not lock
    /// the detector.
    ///
    /// Horizontal travel is checked before vertical. Pointer y grows
    /// downward, so dragging down targets the next row.
    pub fn pointer_move(&mut self, x: i32, y: i32) -> Option<SwapRequest> {
        let press = self.press.as_mut()?;
        if press.fired {
            return None;
        }

        let dx = x.saturating_sub(press.x);
        let dy = y.saturating_sub(press.y);
        let direction = if dx >= self.threshold {
            Coordinate::RIGHT
        } else if dx <= -self.threshold {
            Coordinate::LEFT
        } else if dy >= self.threshold {
            Coordinate::DOWN
        } else if dy <= -self.threshold {
            Coordinate::UP
        } else {
            return None;
        };

        press.fired = true;
        let request = SwapRequest {
            from: press.origin,
            to: press.origin + direction,
        };
        debug!("Swipe: {} -> {}", request.from, request.to);
        Some(request)
    }

    /// Release the pointer; cancels a press that has not swiped yet.
    pub fn pointer_up(&mut self) {
        if let Some(press) = self.press.take() {
            debug!("Pointer up: {}", press.origin);
        }
    }

    /// Feed one pointer event; presses outside the board are ignored.
    pub fn handle(&mut self, event: PointerEvent, layout: &BoardLayout) -> Option<SwapRequest> {
        match event {
            PointerEvent::Down { x, y } => {
                let origin = layout.cell_at(x, y)?;
                self.pointer_down(origin, x, y);
                None
            }
            PointerEvent::Drag { x, y } => self.pointer_move(x, y),
            PointerEvent::Up => {
                self.pointer_up();
                None
            }
        }
    }
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: i32, col: i32) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn test_swipe_fires_at_threshold() {
        let mut swipe = SwipeDetector::with_threshold(50);
        assert!(swipe.pointer_down(c(3, 3), 100, 100));
        assert_eq!(swipe.pointer_move(149, 100), None);
        assert_eq!(
            swipe.pointer_move(150, 100),
            Some(SwapRequest {
                from: c(3, 3),
                to: c(3, 4),
            })
        );
        // One swap per press.
        assert_eq!(swipe.pointer_move(300, 100), None);
        assert!(swipe.input_enabled());
    }

    #[test]
    fn test_rejected_request_leaves_detector_usable() {
        let mut swipe = SwipeDetector::with_threshold(10);
        swipe.pointer_down(c(0, 1), 0, 0);
        assert!(swipe.pointer_move(0, -10).is_some());
        // No InputChanged arrives when the game refuses the request.
        swipe.pointer_up();
        assert!(swipe.pointer_down(c(2, 2), 0, 0));

        swipe.observe(&BoardEvent::InputChanged { enabled: false });
        swipe.pointer_up();
        assert!(!swipe.pointer_down(c(2, 2), 0, 0));
    }

    #[test]
    fn test_swipe_directions() {
        let cases = [
            ((-50, 0), c(3, 2)),
            ((0, 50), c(4, 3)),
            ((0, -50), c(2, 3)),
        ];
        for ((dx, dy), target) in cases {
            let mut swipe = SwipeDetector::with_threshold(50);
            swipe.pointer_down(c(3, 3), 0, 0);
            let request = swipe.pointer_move(dx, dy).unwrap();
            assert_eq!(request.to, target, "drag ({}, {})", dx, dy);
        }
    }

    #[test]
    fn test_horizontal_wins_over_vertical() {
        let mut swipe = SwipeDetector::with_threshold(10);
        swipe.pointer_down(c(1, 1), 0, 0);
        assert_eq!(swipe.pointer_move(20, 20).unwrap().to, c(1, 2));
    }

    #[test]
    fn test_pointer_up_cancels() {
        let mut swipe = SwipeDetector::with_threshold(50);
        swipe.pointer_down(c(0, 0), 0, 0);
        swipe.pointer_move(20, 0);
        swipe.pointer_up();
        assert!(!swipe.is_tracking());
        assert_eq!(swipe.pointer_move(100, 0), None);
    }

    #[test]
    fn test_press_ignored_while_disabled_or_selected() {
        let mut swipe = SwipeDetector::new();
        swipe.observe(&BoardEvent::InputChanged { enabled: false });
        assert!(!swipe.pointer_down(c(0, 0), 0, 0));

        swipe.observe(&BoardEvent::InputChanged { enabled: true });
        assert!(swipe.pointer_down(c(0, 0), 0, 0));
        assert!(!swipe.pointer_down(c(1, 1), 0, 0));
    }

    #[test]
    fn test_handle_maps_cells() {
        let layout = BoardLayout {
            left: 2,
            top: 1,
            cell_width: 2,
            cell_height: 1,
            rows: 8,
            cols: 8,
        };
        let mut swipe = SwipeDetector::with_threshold(2);
        assert_eq!(swipe.handle(PointerEvent::Down { x: 6, y: 2 }, &layout), None);
        assert!(swipe.is_tracking());
        assert_eq!(
            swipe.handle(PointerEvent::Drag { x: 6, y: 4 }, &layout),
            Some(SwapRequest {
                from: c(1, 2),
                to: c(2, 2),
            })
        );
        swipe.handle(PointerEvent::Up, &layout);
        assert!(!swipe.is_tracking());
    }
}
