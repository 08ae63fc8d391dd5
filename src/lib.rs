//! Mahjong pilot (workspace facade crate).
//!
//! This package keeps a stable `mahjong_pilot::{core,engine,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use mahjong_pilot_core as core;
pub use mahjong_pilot_engine as engine;
pub use mahjong_pilot_types as types;
