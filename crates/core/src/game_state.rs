//! Game state module - manages one complete play session
//!
//! This module ties together the deal, scoring and countdown. It handles card
//! selection, match resolution, the deferred unflip after a mismatch, and the
//! game lifecycle. Nothing here sleeps or spawns: timing is driven from the
//! outside through [`GameState::tick`] and [`GameState::resolve_unflip`].

use std::collections::HashSet;

use arrayvec::ArrayVec;

use crate::config::{ConfigError, GameConfig};
use crate::rng::SimpleRng;
use crate::snapshot::{CardSnapshot, GameSnapshot};
use crate::types::{Card, CardId, SoundKind, TICK_WARNING_SECS};

/// Most cues a single operation can emit (flip + match + win).
pub const MAX_CUES: usize = 4;

/// The face-up card waiting for its partner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    id: CardId,
    /// Whether the card had been revealed before this attempt.
    seen_before: bool,
}

/// Handle for a deferred unflip, returned by a mismatching selection.
///
/// Only valid for the episode it was issued in; after a reset it resolves to
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnflipToken {
    pub episode_id: u32,
    pub first: CardId,
    pub second: CardId,
}

/// Result of [`GameState::select`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Game over, a mismatched pair still showing, unknown id, or the card
    /// was already face-up or matched.
    Ignored,
    /// First card of an attempt is now face-up and pending.
    Revealed,
    /// Second card completed a pair. `completed` is true when it was the last one.
    Matched { completed: bool },
    /// Second card did not match; both stay face-up until the token is resolved.
    Mismatched(UnflipToken),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    rng: SimpleRng,
    /// Explicit deal order, reused on reset instead of shuffling.
    layout: Option<Vec<String>>,
    cards: Vec<Card>,
    /// Id of `cards[0]`; ids within a deal are contiguous.
    id_base: u32,
    next_id: u32,
    pending: Option<Pending>,
    /// Mismatched pair still showing; selections are ignored until it is resolved.
    unresolved: Option<UnflipToken>,
    seen: HashSet<CardId>,
    score: u32,
    streak: u32,
    remaining_pairs: u32,
    time_remaining: u32,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    started: bool,
    over: bool,
    timer_running: bool,
    /// Cues emitted by the most recent operation.
    sounds: ArrayVec<SoundKind, MAX_CUES>,
}

impl GameState {
    /// Deal a shuffled session from `config`
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut state = Self::blank(config, seed, None);
        state.deal();
        Ok(state)
    }

    /// Deal `layout` in the given order, without shuffling
    ///
    /// Every symbol must appear exactly twice and the layout must hold
    /// `2 * config.pair_count` cards. Resets reuse the same layout.
    pub fn with_layout<S: AsRef<str>>(config: GameConfig, layout: &[S]) -> Result<Self, ConfigError> {
        if config.pair_count == 0 {
            return Err(ConfigError::NoPairs);
        }
        let layout: Vec<String> = layout.iter().map(|s| s.as_ref().to_string()).collect();
        validate_layout(&layout, config.pair_count)?;

        let mut state = Self::blank(config, 1, Some(layout));
        state.deal();
        Ok(state)
    }

    fn blank(config: GameConfig, seed: u32, layout: Option<Vec<String>>) -> Self {
        Self {
            config,
            rng: SimpleRng::new(seed),
            layout,
            cards: Vec::new(),
            id_base: 0,
            next_id: 0,
            pending: None,
            unresolved: None,
            seen: HashSet::new(),
            score: 0,
            streak: 0,
            remaining_pairs: 0,
            time_remaining: 0,
            episode_id: 0,
            started: false,
            over: false,
            timer_running: false,
            sounds: ArrayVec::new(),
        }
    }

    /// Replace the cards and clear every per-session field
    fn deal(&mut self) {
        let symbols: Vec<String> = match &self.layout {
            Some(layout) => layout.clone(),
            None => {
                let picked: Vec<String> = self
                    .rng
                    .sample_distinct(&self.config.symbol_pool, self.config.pair_count)
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                let mut deck = Vec::with_capacity(picked.len() * 2);
                for symbol in picked {
                    deck.push(symbol.clone());
                    deck.push(symbol);
                }
                self.rng.shuffle(&mut deck);
                deck
            }
        };

        self.id_base = self.next_id;
        self.next_id = self.next_id.wrapping_add(symbols.len() as u32);
        self.cards = symbols
            .into_iter()
            .enumerate()
            .map(|(i, symbol)| Card::new(CardId(self.id_base.wrapping_add(i as u32)), symbol))
            .collect();

        self.pending = None;
        self.unresolved = None;
        self.seen.clear();
        self.score = 0;
        self.streak = 0;
        self.remaining_pairs = (self.cards.len() / 2) as u32;
        self.time_remaining = self.config.initial_time();
        self.started = false;
        self.over = false;
        self.timer_running = false;
        self.sounds.clear();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index_of(id).map(|i| &self.cards[i])
    }

    pub fn pending(&self) -> Option<CardId> {
        self.pending.map(|p| p.id)
    }

    /// The mismatch waiting to be flipped back, if any
    pub fn unresolved(&self) -> Option<UnflipToken> {
        self.unresolved
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn remaining_pairs(&self) -> u32 {
        self.remaining_pairs
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn over(&self) -> bool {
        self.over
    }

    /// Over with every pair found
    pub fn won(&self) -> bool {
        self.over && self.remaining_pairs == 0
    }

    /// Whether the countdown should currently be ticking
    pub fn timer_running(&self) -> bool {
        self.timer_running
    }

    /// Sound cues emitted by the last operation
    pub fn sounds(&self) -> &[SoundKind] {
        &self.sounds
    }

    /// Take the pending cues (consumed by the sound layer).
    pub fn take_sounds(&mut self) -> ArrayVec<SoundKind, MAX_CUES> {
        std::mem::take(&mut self.sounds)
    }

    fn index_of(&self, id: CardId) -> Option<usize> {
        let i = id.0.wrapping_sub(self.id_base) as usize;
        (i < self.cards.len()).then_some(i)
    }

    fn cue(&mut self, kind: SoundKind) {
        if self.config.sound_enabled {
            let _ = self.sounds.try_push(kind);
        }
    }

    /// Start the session (and the countdown in timed mode)
    pub fn start(&mut self) {
        self.sounds.clear();
        self.begin();
    }

    fn begin(&mut self) {
        if self.started || self.over {
            return;
        }
        self.started = true;
        if self.config.timed {
            self.timer_running = true;
        }
        tracing::info!(
            episode = self.episode_id,
            timed = self.config.timed,
            time_remaining = self.time_remaining,
            "session started"
        );
    }

    /// Flip a card
    pub fn select(&mut self, id: CardId) -> SelectOutcome {
        self.sounds.clear();

        if self.over || self.unresolved.is_some() {
            return SelectOutcome::Ignored;
        }
        let Some(index) = self.index_of(id) else {
            return SelectOutcome::Ignored;
        };
        if !self.cards[index].selectable() {
            return SelectOutcome::Ignored;
        }

        if !self.started {
            self.begin();
        }

        self.cue(SoundKind::Flip);
        let seen_before = !self.seen.insert(id);
        self.cards[index].flip_up();

        let first = match self.pending.take() {
            Some(p) => p,
            None => {
                self.pending = Some(Pending { id, seen_before });
                tracing::debug!(card = id.0, "first card revealed");
                return SelectOutcome::Revealed;
            }
        };
        // Pending is cleared on every deal, so its id belongs to this one.
        let first_index = first.id.0.wrapping_sub(self.id_base) as usize;

        if self.cards[first_index].content() == self.cards[index].content() {
            self.cards[first_index].mark_matched();
            self.cards[index].mark_matched();

            self.streak += 1;
            self.score = self
                .score
                .saturating_add(self.config.scoring.award(self.streak));
            self.remaining_pairs = self.remaining_pairs.saturating_sub(1);
            self.cue(SoundKind::Match);
            tracing::debug!(
                first = first.id.0,
                second = id.0,
                streak = self.streak,
                score = self.score,
                remaining = self.remaining_pairs,
                "pair matched"
            );

            if self.remaining_pairs == 0 {
                self.finish();
            }
            SelectOutcome::Matched {
                completed: self.over,
            }
        } else {
            self.streak = 0;
            self.cue(SoundKind::NoMatch);
            if self
                .config
                .scoring
                .penalizes(first.seen_before, seen_before)
            {
                self.score = self.config.scoring.apply_penalty(self.score);
            }
            tracing::debug!(first = first.id.0, second = id.0, score = self.score, "mismatch");

            let token = UnflipToken {
                episode_id: self.episode_id,
                first: first.id,
                second: id,
            };
            self.unresolved = Some(token);
            SelectOutcome::Mismatched(token)
        }
    }

    /// Flip a mismatched pair back face-down
    ///
    /// Does nothing unless `token` is the outstanding mismatch of this episode
    /// and the session is still running. Matched cards are never flipped down.
    /// Returns whether any card changed. Selection resumes afterwards.
    pub fn resolve_unflip(&mut self, token: UnflipToken) -> bool {
        self.sounds.clear();

        if self.over || self.unresolved != Some(token) {
            return false;
        }
        self.unresolved = None;

        let mut changed = false;
        for id in [token.first, token.second] {
            if let Some(i) = self.index_of(id) {
                let card = &mut self.cards[i];
                if card.face_up() && !card.matched() {
                    card.flip_down();
                    changed = true;
                }
            }
        }
        changed
    }

    /// Advance the countdown by one second
    ///
    /// No-op unless the countdown is running. Returns whether time advanced.
    pub fn tick(&mut self) -> bool {
        self.sounds.clear();

        if !self.timer_running || self.over {
            return false;
        }

        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            self.finish();
        } else if self.time_remaining <= TICK_WARNING_SECS {
            self.cue(SoundKind::Tick);
        }
        true
    }

    /// End the session now
    pub fn end_game(&mut self) {
        self.sounds.clear();
        self.finish();
    }

    fn finish(&mut self) {
        if self.over {
            return;
        }
        self.timer_running = false;
        self.over = true;

        let won = self.remaining_pairs == 0;
        self.cue(if won { SoundKind::Win } else { SoundKind::GameOver });
        tracing::info!(
            episode = self.episode_id,
            won,
            score = self.score,
            time_remaining = self.time_remaining,
            "game over"
        );
    }

    /// Re-deal with the current configuration
    pub fn reset(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.deal();
        tracing::info!(episode = self.episode_id, pairs = self.remaining_pairs, "session reset");
    }

    /// Re-deal with a new configuration (shuffled)
    ///
    /// On error the current session is left untouched.
    pub fn reset_with(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.layout = None;
        self.reset();
        Ok(())
    }

    /// Apply new settings, discarding current progress
    pub fn update_settings(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        tracing::debug!(
            pairs = config.pair_count,
            timed = config.timed,
            sound = config.sound_enabled,
            "settings updated"
        );
        self.reset_with(config)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cards.truncate(self.cards.len());
        for (dst, card) in out.cards.iter_mut().zip(&self.cards) {
            dst.copy_from(card);
        }
        let have = out.cards.len();
        out.cards
            .extend(self.cards[have..].iter().map(CardSnapshot::from));

        out.episode_id = self.episode_id;
        out.score = self.score;
        out.streak = self.streak;
        out.remaining_pairs = self.remaining_pairs;
        out.time_remaining = self.time_remaining;
        out.timed = self.config.timed;
        out.started = self.started;
        out.over = self.over;
        out.won = self.won();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

fn validate_layout(layout: &[String], pair_count: usize) -> Result<(), ConfigError> {
    if layout.len() != pair_count * 2 {
        return Err(ConfigError::InvalidLayout(format!(
            "expected {} cards, got {}",
            pair_count * 2,
            layout.len()
        )));
    }
    for symbol in layout {
        let count = layout.iter().filter(|s| *s == symbol).count();
        if count != 2 {
            return Err(ConfigError::InvalidLayout(format!(
                "symbol {symbol:?} appears {count} times"
            )));
        }
    }
    Ok(())
}
