//! Headless Memory Match runner (default binary).
//!
//! Deals one session from `MEMORY_MATCH_*` settings and lets the memorising
//! bot play it through the async engine. Sound cues and transitions are
//! logged; set `RUST_LOG=debug` to see every flip.
//!
//! Extra knobs:
//! - `MEMORY_MATCH_SEED`: deal seed (default: wall clock)
//! - `MEMORY_MATCH_MOVE_DELAY_MS`: pause before each flip (default: 250)

use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use memory_match::bot::Bot;
use memory_match::core::{seed_from_env, GameSettings, TracingSoundPlayer};
use memory_match::engine::Engine;

const DEFAULT_MOVE_DELAY_MS: u64 = 250;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = GameSettings::from_env();
    let seed = seed_from_env();
    let move_delay = Duration::from_millis(
        std::env::var("MEMORY_MATCH_MOVE_DELAY_MS")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_MOVE_DELAY_MS),
    );

    tracing::info!(
        theme = settings.theme.name,
        difficulty = settings.difficulty.as_str(),
        mode = settings.mode.as_str(),
        seed,
        "dealing"
    );

    let handle = Engine::new(settings.to_config(), seed)
        .context("invalid game settings")?
        .with_sound_player(TracingSoundPlayer::new())
        .spawn();

    let mut updates = handle.subscribe();
    let mut bot = Bot::new();
    let mut moves = 0u32;

    loop {
        let snap = updates.borrow_and_update().clone();
        if snap.over {
            break;
        }
        bot.observe(&snap);

        match bot.next_move(&snap) {
            Some(id) => {
                tokio::time::sleep(move_delay).await;
                let outcome = handle.select(id).await?;
                moves += 1;
                tracing::debug!(?outcome, card = id.0, "flipped");
            }
            // Mismatched pair still showing: wait for the unflip (or time-out).
            None => updates
                .changed()
                .await
                .context("engine stopped before the game ended")?,
        }
    }

    let result = handle.snapshot().await?;
    tracing::info!(
        won = result.won,
        score = result.score,
        moves,
        time_remaining = result.time_remaining,
        "game over"
    );

    handle.shutdown().await?;
    Ok(())
}
