//! Headless autoplay runner (default binary).
//!
//! Generates a board, then repeatedly plays the swap that clears the most
//! cells and ticks the game at a fixed timestep until the cascade settles.
//! Prints the final snapshot as JSON on stdout; `--events` also prints every
//! board event as one JSON line.
//!
//! Board size, seed and timings come from the `MATCH3_*` environment
//! variables (see `match3_core::config`); `MATCH3_LOG` sets the log level.

use anyhow::{anyhow, bail, Context, Result};
use log::{info, warn, LevelFilter, Log, Metadata, Record};

use match3_board::core::{GameConfig, Match3Game};
use match3_board::engine::best_swap;
use match3_board::types::{BoardEvent, TICK_MS};

/// Upper bound on ticks spent resolving one turn.
const MAX_TICKS_PER_TURN: u32 = 100_000;

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logger() -> Result<()> {
    let level = std::env::var("MATCH3_LOG")
        .ok()
        .and_then(|v| v.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);
    log::set_logger(&LOGGER).map_err(|e| anyhow!("failed to install logger: {}", e))?;
    log::set_max_level(level);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Options {
    turns: u32,
    seed: Option<u32>,
    events: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut opts = Options {
            turns: 20,
            seed: None,
            events: false,
        };
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--events" => opts.events = true,
                "--turns" => {
                    let value = args.next().context("--turns needs a value")?;
                    opts.turns = value
                        .parse()
                        .with_context(|| format!("invalid --turns value: {}", value))?;
                }
                "--seed" => {
                    let value = args.next().context("--seed needs a value")?;
                    opts.seed = Some(
                        value
                            .parse()
                            .with_context(|| format!("invalid --seed value: {}", value))?,
                    );
                }
                other => bail!("unknown argument: {} (expected --turns N, --seed N, --events)", other),
            }
        }
        Ok(opts)
    }
}

fn main() -> Result<()> {
    let opts = Options::parse(std::env::args().skip(1))?;
    init_logger()?;

    let mut config = GameConfig::from_env();
    if let Some(seed) = opts.seed {
        config.seed = seed;
    }

    let mut game = Match3Game::new(config).context("failed to generate board")?;
    let mut event_log = Vec::new();
    collect_events(&mut game, opts.events, &mut event_log);

    for turn in 1..=opts.turns {
        let hint = best_swap(game.grid(), game.finder()).context("move analysis failed")?;
        let Some(hint) = hint else {
            warn!("Turn {}: no valid swap left, regenerating board", turn);
            game.regenerate().context("failed to regenerate board")?;
            collect_events(&mut game, opts.events, &mut event_log);
            continue;
        };

        info!("Turn {}: swap {} <-> {} ({} cells)", turn, hint.a, hint.b, hint.removals);
        game.request_swap(hint.a, hint.b)
            .with_context(|| format!("swap {} <-> {} rejected", hint.a, hint.b))?;
        run_until_idle(&mut game, opts.events, &mut event_log)?;
    }

    let stats = game.stats();
    info!(
        "Done: {} cascades, {} tiles cleared, longest chain {}",
        stats.cascades, stats.total_cleared, stats.max_passes
    );

    for event in &event_log {
        println!("{}", serde_json::to_string(event)?);
    }
    println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    Ok(())
}

fn run_until_idle(game: &mut Match3Game, keep: bool, event_log: &mut Vec<BoardEvent>) -> Result<()> {
    let mut ticks = 0;
    while !game.is_idle() {
        if ticks >= MAX_TICKS_PER_TURN {
            bail!("turn did not settle after {} ticks", ticks);
        }
        game.tick(TICK_MS).context("tick failed")?;
        collect_events(game, keep, event_log);
        ticks += 1;
    }
    collect_events(game, keep, event_log);
    Ok(())
}

fn collect_events(game: &mut Match3Game, keep: bool, event_log: &mut Vec<BoardEvent>) {
    let events = game.drain_events();
    if keep {
        event_log.extend(events);
    }
}
