//! Integration tests for the game state through the facade crate

use std::collections::{HashMap, HashSet};

use memory_match::core::{
    ConfigError, GameConfig, GameSettings, GameState, ScoringRules, SelectOutcome,
};
use memory_match::types::{CardId, Difficulty, GameMode, SoundKind, Theme};

fn settings(theme: Theme, difficulty: Difficulty, mode: GameMode) -> GameSettings {
    GameSettings {
        theme,
        difficulty,
        mode,
        sound_enabled: true,
    }
}

fn ids(state: &GameState) -> Vec<CardId> {
    state.cards().iter().map(|c| c.id()).collect()
}

/// Pair up card ids by symbol, in deal order
fn pairs(state: &GameState) -> Vec<(CardId, CardId)> {
    let mut open: HashMap<&str, CardId> = HashMap::new();
    let mut out = Vec::new();
    for card in state.cards() {
        match open.remove(card.content()) {
            Some(first) => out.push((first, card.id())),
            None => {
                open.insert(card.content(), card.id());
            }
        }
    }
    out
}

#[test]
fn test_every_preset_deals_a_valid_board() {
    for theme in Theme::ALL {
        for difficulty in Difficulty::ALL {
            for seed in [1, 7, 12345, u32::MAX] {
                let config = settings(theme, difficulty, GameMode::Classic).to_config();
                let state = GameState::new(config, seed).unwrap();

                let mut counts: HashMap<&str, usize> = HashMap::new();
                for card in state.cards() {
                    assert!(!card.face_up());
                    assert!(!card.matched());
                    *counts.entry(card.content()).or_default() += 1;
                }

                assert_eq!(state.cards().len(), difficulty.pair_count() * 2);
                assert_eq!(counts.len(), difficulty.pair_count());
                assert!(counts.values().all(|&n| n == 2));
                assert!(counts.keys().all(|s| theme.symbols.iter().any(|t| t == s)));

                let unique: HashSet<CardId> = ids(&state).into_iter().collect();
                assert_eq!(unique.len(), state.cards().len());
                assert_eq!(state.remaining_pairs() as usize, difficulty.pair_count());
                assert_eq!(state.score(), 0);
            }
        }
    }
}

#[test]
fn test_same_seed_same_deal() {
    let config = GameSettings::default().to_config();
    let a = GameState::new(config.clone(), 99).unwrap();
    let b = GameState::new(config, 99).unwrap();

    let contents = |s: &GameState| s.cards().iter().map(|c| c.content().to_string()).collect::<Vec<_>>();
    assert_eq!(contents(&a), contents(&b));
}

#[test]
fn test_perfect_play_wins_with_growing_awards() {
    let config = settings(Theme::FOOD, Difficulty::Easy, GameMode::Classic).to_config();
    let mut state = GameState::new(config, 2024).unwrap();
    let pairs = pairs(&state);
    assert_eq!(pairs.len(), 8);

    let mut expected = 0;
    for (i, (a, b)) in pairs.iter().enumerate() {
        assert_eq!(state.select(*a), SelectOutcome::Revealed);
        let last = i == pairs.len() - 1;
        assert_eq!(state.select(*b), SelectOutcome::Matched { completed: last });
        expected += 10 * (i as u32 + 1);
        assert_eq!(state.score(), expected);
        assert_eq!(state.streak(), i as u32 + 1);
    }

    assert!(state.over());
    assert!(state.won());
    assert_eq!(state.remaining_pairs(), 0);
    assert_eq!(state.sounds(), &[SoundKind::Flip, SoundKind::Match, SoundKind::Win]);
}

#[test]
fn test_mismatch_then_unflip_then_match() {
    let config = GameConfig::new(2, vec!["A".into(), "B".into()]);
    let mut state = GameState::with_layout(config, &["A", "B", "A", "B"]).unwrap();
    let ids = ids(&state);

    state.select(ids[0]);
    let SelectOutcome::Mismatched(token) = state.select(ids[1]) else {
        panic!("expected mismatch");
    };
    assert_eq!(state.score(), 0);
    assert_eq!(state.sounds(), &[SoundKind::Flip, SoundKind::NoMatch]);

    assert!(state.resolve_unflip(token));
    assert!(state.cards().iter().all(|c| !c.face_up()));
    assert!(!state.resolve_unflip(token));

    state.select(ids[0]);
    assert_eq!(state.select(ids[2]), SelectOutcome::Matched { completed: false });
    assert_eq!(state.score(), 10);
    assert_eq!(state.remaining_pairs(), 1);
}

#[test]
fn test_relaxed_scoring_only_penalises_informed_mistakes() {
    let pool = vec!["A".into(), "B".into(), "C".into()];
    let config = GameConfig::new(3, pool).with_scoring(ScoringRules::relaxed());
    let mut state = GameState::with_layout(config, &["A", "A", "B", "C", "B", "C"]).unwrap();
    let ids = ids(&state);

    state.select(ids[0]);
    state.select(ids[1]);
    assert_eq!(state.score(), 5);

    // Neither card had been seen: free.
    state.select(ids[2]);
    let SelectOutcome::Mismatched(token) = state.select(ids[3]) else {
        panic!("expected mismatch");
    };
    assert_eq!(state.score(), 5);
    state.resolve_unflip(token);

    // Same two cards again: both known, so it costs.
    state.select(ids[2]);
    let SelectOutcome::Mismatched(token) = state.select(ids[3]) else {
        panic!("expected mismatch");
    };
    assert_eq!(state.score(), 3);
    state.resolve_unflip(token);

    state.select(ids[2]);
    assert_eq!(state.select(ids[4]), SelectOutcome::Matched { completed: false });
    assert_eq!(state.score(), 8);
}

#[test]
fn test_time_attack_runs_out() {
    let config = settings(Theme::SPORTS, Difficulty::Easy, GameMode::TimeAttack).to_config();
    let mut state = GameState::new(config, 5).unwrap();
    assert_eq!(state.time_remaining(), 90);

    // Countdown does nothing before the session starts.
    assert!(!state.tick());

    state.start();
    for _ in 0..89 {
        assert!(state.tick());
        assert!(!state.over());
    }
    assert_eq!(state.sounds(), &[SoundKind::Tick]);

    assert!(state.tick());
    assert!(state.over());
    assert!(!state.won());
    assert_eq!(state.time_remaining(), 0);
    assert_eq!(state.sounds(), &[SoundKind::GameOver]);
    assert!(!state.tick());
}

#[test]
fn test_reset_invalidates_old_ids() {
    let mut state = GameState::new(GameSettings::default().to_config(), 3).unwrap();
    let old = ids(&state);
    let episode = state.episode_id();

    state.select(old[0]);
    state.reset();

    assert_eq!(state.episode_id(), episode + 1);
    assert_eq!(state.select(old[0]), SelectOutcome::Ignored);
    let fresh: HashSet<CardId> = ids(&state).into_iter().collect();
    assert!(old.iter().all(|id| !fresh.contains(id)));
    assert!(!state.started());
}

#[test]
fn test_update_settings_rejects_bad_config_and_keeps_game() {
    let mut state = GameState::new(GameSettings::default().to_config(), 3).unwrap();
    let before = ids(&state);

    let err = state
        .update_settings(GameConfig::new(4, vec!["x".into()]))
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::SymbolPoolTooSmall {
            required: 4,
            available: 1
        }
    );
    assert_eq!(ids(&state), before);

    let hard = settings(Theme::VEHICLES, Difficulty::Hard, GameMode::Classic).to_config();
    state.update_settings(hard).unwrap();
    assert_eq!(state.cards().len(), 64);
    assert_eq!(state.remaining_pairs(), 32);
}

#[test]
fn test_snapshot_reflects_state() {
    let config = GameConfig::new(2, vec!["A".into(), "B".into()]).timed(30);
    let mut state = GameState::with_layout(config, &["A", "A", "B", "B"]).unwrap();
    let ids = ids(&state);
    state.select(ids[0]);
    state.select(ids[1]);

    let snap = state.snapshot();
    assert_eq!(snap.episode_id, state.episode_id());
    assert_eq!(snap.cards.len(), 4);
    assert_eq!(snap.matched_count(), 2);
    assert_eq!(snap.score, 10);
    assert_eq!(snap.remaining_pairs, 1);
    assert_eq!(snap.time_remaining, 30);
    assert!(snap.timed);
    assert!(snap.started);
    assert!(!snap.over);

    let json = serde_json::to_value(&snap).unwrap();
    assert_eq!(json["cards"][1]["matched"], true);
    assert_eq!(json["cards"][2]["face_up"], false);
}
