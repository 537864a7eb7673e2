//! Memory Match (workspace facade crate).
//!
//! Re-exports the workspace crates as `memory_match::{core,engine,types}` and
//! adds the memorising [`bot::Bot`] used by the headless runner.

pub mod bot;

pub use memory_match_core as core;
pub use memory_match_engine as engine;
pub use memory_match_types as types;
