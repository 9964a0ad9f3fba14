//! Swipe input driving the game through the facade

use match3_board::core::{GameConfig, Grid, Match3Game, SeededTiles};
use match3_board::input::{BoardLayout, PointerEvent, SwipeDetector};
use match3_board::types::{Coordinate, SwapOutcome, TICK_MS};

const LAYOUT: BoardLayout = BoardLayout {
    left: 0,
    top: 0,
    cell_width: 4,
    cell_height: 2,
    rows: 4,
    cols: 4,
};

fn game() -> Match3Game {
    Match3Game::from_grid(
        GameConfig::default(),
        Grid::from_rows(&["BGYR", "GRRB", "YBGY", "BGYB"], 0).unwrap(),
        Box::new(SeededTiles::new(11)),
    )
}

fn pump(game: &mut Match3Game, swipe: &mut SwipeDetector) {
    for event in game.drain_events() {
        swipe.observe(&event);
    }
}

#[test]
fn test_swipe_down_plays_matching_swap() {
    let mut game = game();
    let mut swipe = SwipeDetector::with_threshold(2);

    // Press on (0,3) and drag one cell down.
    assert_eq!(swipe.handle(PointerEvent::Down { x: 13, y: 0 }, &LAYOUT), None);
    let request = swipe
        .handle(PointerEvent::Drag { x: 13, y: 2 }, &LAYOUT)
        .unwrap();
    assert_eq!((request.from, request.to), (Coordinate::new(0, 3), Coordinate::new(1, 3)));

    let outcome = game.request_swap(request.from, request.to).unwrap();
    assert!(outcome.is_matched());
    pump(&mut game, &mut swipe);
    swipe.handle(PointerEvent::Up, &LAYOUT);

    // Presses are ignored until the cascade settles.
    assert!(!swipe.pointer_down(Coordinate::new(2, 2), 8, 4));
    while !game.is_idle() {
        game.tick(TICK_MS).unwrap();
        pump(&mut game, &mut swipe);
    }
    assert!(swipe.input_enabled());
    assert!(swipe.pointer_down(Coordinate::new(2, 2), 8, 4));
}

#[test]
fn test_swipe_off_board_bounces() {
    let mut game = game();
    let mut swipe = SwipeDetector::with_threshold(2);

    swipe.handle(PointerEvent::Down { x: 1, y: 1 }, &LAYOUT);
    let request = swipe
        .handle(PointerEvent::Drag { x: 1, y: -3 }, &LAYOUT)
        .unwrap();
    assert_eq!(request.to, Coordinate::new(-1, 0));
    assert_eq!(
        game.request_swap(request.from, request.to).unwrap(),
        SwapOutcome::Invalid
    );
    pump(&mut game, &mut swipe);
    swipe.handle(PointerEvent::Up, &LAYOUT);
    assert!(!swipe.input_enabled());

    game.tick(game.config().timings.slide_ms).unwrap();
    pump(&mut game, &mut swipe);
    assert!(swipe.input_enabled());
}

#[test]
fn test_released_press_never_swaps() {
    let mut swipe = SwipeDetector::with_threshold(4);
    swipe.handle(PointerEvent::Down { x: 5, y: 1 }, &LAYOUT);
    assert_eq!(swipe.handle(PointerEvent::Drag { x: 7, y: 1 }, &LAYOUT), None);
    swipe.handle(PointerEvent::Up, &LAYOUT);
    assert_eq!(swipe.handle(PointerEvent::Drag { x: 20, y: 1 }, &LAYOUT), None);
    assert!(swipe.input_enabled());
}
