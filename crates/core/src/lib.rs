//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and scoring.
//! It does no I/O and never sleeps or spawns, making it:
//!
//! - **Deterministic**: Same seed produces the same deal
//! - **Testable**: Every rule is exercised by unit tests
//! - **Portable**: Can be driven by an async runtime, a UI loop, or a test
//!
//! # Module Structure
//!
//! - [`config`]: Session configuration, player settings, and `ConfigError`
//! - [`game_state`]: Card selection, match resolution, countdown, lifecycle
//! - [`rng`]: Seeded shuffling for deals
//! - [`scoring`]: Match awards and mismatch penalties
//! - [`snapshot`]: Read-only session view for renderers
//! - [`sound`]: The `SoundPlayer` capability the engine reports cues to
//!
//! # Game Rules
//!
//! - **Pairs**: Each dealt symbol appears on exactly two cards
//! - **Turns**: Flip one card, then a second; a match keeps both face-up
//! - **Mismatch**: Both cards stay visible briefly, then flip back
//! - **Streak**: Consecutive matches; any mismatch resets it to zero
//! - **Time Attack**: The session ends when the countdown reaches zero
//!
//! # Example
//!
//! ```
//! use memory_match_core::{GameConfig, GameState, SelectOutcome};
//!
//! let config = GameConfig::new(2, vec!["🐶".into(), "🐱".into()]);
//! let mut game = GameState::with_layout(config, &["🐶", "🐱", "🐶", "🐱"]).unwrap();
//!
//! let ids: Vec<_> = game.cards().iter().map(|c| c.id()).collect();
//! assert_eq!(game.select(ids[0]), SelectOutcome::Revealed);
//! assert_eq!(game.select(ids[2]), SelectOutcome::Matched { completed: false });
//! assert_eq!(game.score(), 10);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) once per second while
//! [`GameState::timer_running`](game_state::GameState::timer_running) is true,
//! and pass each [`UnflipToken`](game_state::UnflipToken) back to
//! [`GameState::resolve_unflip`](game_state::GameState::resolve_unflip) after the
//! configured delay.

pub mod config;
pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod sound;

pub use memory_match_types as types;

// Re-export commonly used types for convenience
pub use config::{seed_from_env, ConfigError, GameConfig, GameSettings};
pub use game_state::{GameState, SelectOutcome, UnflipToken};
pub use rng::SimpleRng;
pub use scoring::ScoringRules;
pub use snapshot::{CardSnapshot, GameSnapshot};
pub use sound::{NullSoundPlayer, SoundPlayer, TracingSoundPlayer};
