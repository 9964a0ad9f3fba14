//! Game configuration: board size, seed, animation timings.
//!
//! Durations are opaque to the core: it only waits for them. Every value has
//! a default and can be overridden from the environment.
//!
//! # Environment Variables
//!
//! - `MATCH3_ROWS`, `MATCH3_COLS`: board size (default 8x8)
//! - `MATCH3_SEED`: tile RNG seed (default 1)
//! - `MATCH3_SWAP_MS`, `MATCH3_SLIDE_MS`, `MATCH3_POST_SLIDE_MS`,
//!   `MATCH3_TILE_ANIM_MS`: animation timings in milliseconds
//! - `MATCH3_SWIPE_PX`: pointer travel that turns a press into a swipe
//! - `MATCH3_FULL_REMATCH`: `1`/`true` to re-match the whole board after each
//!   cascade pass instead of only the affected cells

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_COLS, DEFAULT_POST_SLIDE_DELAY_MS, DEFAULT_ROWS, DEFAULT_SLIDE_MS, DEFAULT_SWAP_MS,
    DEFAULT_SWIPE_PIXELS, DEFAULT_TILE_ANIMATION_MS,
};

/// Animation durations in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timings {
    pub swap_ms: u32,
    pub slide_ms: u32,
    pub post_slide_delay_ms: u32,
    pub tile_animation_ms: u32,
    pub swipe_pixels: u32,
}

impl Timings {
    /// Every duration zero: cascades resolve within a single tick.
    pub fn instant() -> Self {
        Self {
            swap_ms: 0,
            slide_ms: 0,
            post_slide_delay_ms: 0,
            tile_animation_ms: 0,
            swipe_pixels: DEFAULT_SWIPE_PIXELS,
        }
    }

    /// Wait between two shift+spawn steps of one column
    pub fn spawn_step_ms(&self) -> u32 {
        self.slide_ms.saturating_add(self.post_slide_delay_ms)
    }

    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            swap_ms: env_parse("MATCH3_SWAP_MS").unwrap_or(d.swap_ms),
            slide_ms: env_parse("MATCH3_SLIDE_MS").unwrap_or(d.slide_ms),
            post_slide_delay_ms: env_parse("MATCH3_POST_SLIDE_MS").unwrap_or(d.post_slide_delay_ms),
            tile_animation_ms: env_parse("MATCH3_TILE_ANIM_MS").unwrap_or(d.tile_animation_ms),
            swipe_pixels: env_parse("MATCH3_SWIPE_PX").unwrap_or(d.swipe_pixels),
        }
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            swap_ms: DEFAULT_SWAP_MS,
            slide_ms: DEFAULT_SLIDE_MS,
            post_slide_delay_ms: DEFAULT_POST_SLIDE_DELAY_MS,
            tile_animation_ms: DEFAULT_TILE_ANIMATION_MS,
            swipe_pixels: DEFAULT_SWIPE_PIXELS,
        }
    }
}

/// Which cells are re-searched after a cascade pass
///
/// `Affected` only looks at cells emptied, shifted through or spawned into
/// during the pass, so a match lying entirely outside them is not found.
/// `FullBoard` searches every occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RematchScope {
    #[default]
    Affected,
    FullBoard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    pub seed: u32,
    pub timings: Timings,
    pub rematch_scope: RematchScope,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            seed: 1,
            timings: Timings::default(),
            rematch_scope: RematchScope::Affected,
        }
    }
}

impl GameConfig {
    /// Create from environment variables, falling back to defaults on
    /// missing or unparseable values
    pub fn from_env() -> Self {
        let d = Self::default();
        let full_rematch = std::env::var("MATCH3_FULL_REMATCH")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        Self {
            rows: env_parse("MATCH3_ROWS").unwrap_or(d.rows),
            cols: env_parse("MATCH3_COLS").unwrap_or(d.cols),
            seed: env_parse("MATCH3_SEED").unwrap_or(d.seed),
            timings: Timings::from_env(),
            rematch_scope: if full_rematch {
                RematchScope::FullBoard
            } else {
                RematchScope::Affected
            },
        }
    }

    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    pub fn with_rematch_scope(mut self, scope: RematchScope) -> Self {
        self.rematch_scope = scope;
        self
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!((config.rows, config.cols), (8, 8));
        assert_eq!(config.rematch_scope, RematchScope::Affected);
        assert_eq!(config.timings.spawn_step_ms(), 600);
    }

    #[test]
    fn test_config_json_shape() {
        let config = GameConfig::default().with_rematch_scope(RematchScope::FullBoard);
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"rematch_scope\":\"fullBoard\""));
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
