//! Match-3 board (workspace facade crate).
//!
//! Re-exports the member crates under short names so callers can write
//! `match3_board::{core, engine, input, types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_input as input;
pub use match3_types as types;
