//! The memorising bot should clear any board it is given.

use std::time::Duration;

use memory_match::bot::Bot;
use memory_match::core::{GameSettings, GameState, SelectOutcome};
use memory_match::engine::Engine;
use memory_match::types::{Difficulty, GameMode, Theme};

#[test]
fn test_bot_clears_every_difficulty() {
    for difficulty in Difficulty::ALL {
        let settings = GameSettings {
            theme: Theme::FACES,
            difficulty,
            mode: GameMode::Classic,
            sound_enabled: false,
        };
        let mut state = GameState::new(settings.to_config(), 42).unwrap();
        let mut bot = Bot::new();
        let mut mismatches = 0;

        while !state.over() {
            bot.observe(&state.snapshot());
            let id = bot.next_move(&state.snapshot()).expect("a move while playing");
            if let SelectOutcome::Mismatched(token) = state.select(id) {
                mismatches += 1;
                bot.observe(&state.snapshot());
                state.resolve_unflip(token);
            }
        }

        assert!(state.won(), "{difficulty:?}");
        // Each card is revealed blind at most once.
        assert!(mismatches <= difficulty.pair_count() * 2, "{difficulty:?}");
    }
}

#[tokio::test(start_paused = true)]
async fn test_bot_wins_through_engine() {
    let settings = GameSettings {
        theme: Theme::ANIMALS,
        difficulty: Difficulty::Easy,
        mode: GameMode::TimeAttack,
        sound_enabled: true,
    };
    let handle = Engine::new(settings.to_config(), 7).unwrap().spawn();
    let mut updates = handle.subscribe();
    let mut bot = Bot::new();

    let result = tokio::time::timeout(Duration::from_secs(90), async {
        loop {
            let snap = updates.borrow_and_update().clone();
            if snap.over {
                return snap;
            }
            bot.observe(&snap);
            match bot.next_move(&snap) {
                Some(id) => {
                    handle.select(id).await.unwrap();
                }
                None => updates.changed().await.unwrap(),
            }
        }
    })
    .await
    .unwrap();

    assert!(result.won);
    assert!(result.time_remaining > 0);
    assert_eq!(result.remaining_pairs, 0);
    handle.shutdown().await.unwrap();
}
