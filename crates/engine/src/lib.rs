//! Engine module - async runtime around the core game state
//!
//! The core [`GameState`](memory_match_core::GameState) never sleeps. This
//! crate runs it inside a tokio task and supplies the two timed stimuli it
//! needs: a one-second countdown tick and the deferred unflip after a mismatch.
//!
//! # Concurrency
//!
//! - **Single owner**: one task owns the state; handles talk to it over a queue
//! - **Serialized stimuli**: selections, ticks and unflips never interleave
//! - **Cancellable timers**: the countdown task is aborted on game over, reset
//!   and shutdown; pending unflips are aborted on reset
//! - **Episode guards**: a tick or unflip from an earlier episode is ignored
//!
//! # Observation
//!
//! Renderers read [`GameSnapshot`](memory_match_core::GameSnapshot)s from
//! [`EngineHandle::subscribe`], published after every transition. Sound cues go
//! to the [`SoundPlayer`](memory_match_core::SoundPlayer) given to the engine.
//!
//! # Example
//!
//! ```
//! use memory_match_core::{GameConfig, GameState, SelectOutcome};
//! use memory_match_engine::Engine;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = GameConfig::new(1, vec!["⭐".into()]);
//! let handle = Engine::from_state(GameState::with_layout(config, &["⭐", "⭐"])?).spawn();
//!
//! let ids: Vec<_> = handle.latest().cards.iter().map(|c| c.id).collect();
//! handle.select(ids[0]).await?;
//! assert_eq!(handle.select(ids[1]).await?, SelectOutcome::Matched { completed: true });
//! assert!(handle.snapshot().await?.won);
//!
//! handle.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod handle;
pub mod runtime;

pub use memory_match_core as core;
pub use memory_match_types as types;

pub use handle::{EngineError, EngineHandle};
pub use runtime::{Engine, EngineOptions};
