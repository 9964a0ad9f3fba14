use criterion::{black_box, criterion_group, criterion_main, Criterion};
use match3_board::core::{
    BoardGenerator, GameConfig, Grid, LineMatchFinder, Match3Game, MatchFinder, SeededTiles,
    TilePool, Timings,
};
use match3_board::engine::{best_swap, find_valid_swaps};
use match3_board::types::{Coordinate, TileType};

fn generated_grid(seed: u32) -> Grid {
    let mut grid = Grid::new(8, 8).unwrap();
    let mut pool = TilePool::new();
    BoardGenerator
        .fill(&mut grid, &mut pool, &mut SeededTiles::new(seed), 0)
        .unwrap();
    grid
}

fn bench_fill(c: &mut Criterion) {
    c.bench_function("fill_8x8", |b| {
        let mut grid = Grid::new(8, 8).unwrap();
        let mut pool = TilePool::new();
        let mut source = SeededTiles::new(12345);
        b.iter(|| {
            BoardGenerator
                .fill(&mut grid, &mut pool, &mut source, 0)
                .unwrap();
        })
    });
}

fn bench_search(c: &mut Criterion) {
    let grid = Grid::from_rows(&["RRRR", "GBYG", "RRRR", "BYGB"], 0).unwrap();
    c.bench_function("search_run_of_four", |b| {
        b.iter(|| LineMatchFinder.search(&grid, black_box(Coordinate::new(0, 1)), TileType::Red))
    });
}

fn bench_find_valid_swaps(c: &mut Criterion) {
    let grid = generated_grid(12345);
    c.bench_function("find_valid_swaps_8x8", |b| {
        b.iter(|| find_valid_swaps(black_box(&grid), &LineMatchFinder).unwrap())
    });
}

fn bench_turn(c: &mut Criterion) {
    let config = GameConfig::default().with_timings(Timings::instant());
    c.bench_function("turn_with_cascade", |b| {
        b.iter(|| {
            let mut game = Match3Game::new(config).unwrap();
            if let Some(hint) = best_swap(game.grid(), game.finder()).unwrap() {
                game.request_swap(hint.a, hint.b).unwrap();
                game.tick(0).unwrap();
            }
            black_box(game.drain_events())
        })
    });
}

fn bench_tick_idle(c: &mut Criterion) {
    let mut game = Match3Game::new(GameConfig::default()).unwrap();
    c.bench_function("tick_idle_16ms", |b| b.iter(|| game.tick(black_box(16)).unwrap()));
}

criterion_group!(
    benches,
    bench_fill,
    bench_search,
    bench_find_valid_swaps,
    bench_turn,
    bench_tick_idle
);
criterion_main!(benches);
