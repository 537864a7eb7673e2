//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no I/O, making them usable in any context
//! (core logic, async runtime, renderers, tests).
//!
//! # Difficulty Presets
//!
//! | Difficulty | Grid | Pairs | Time Attack |
//! |------------|------|-------|-------------|
//! | Easy | 4x4 | 8 | 90s |
//! | Medium | 6x6 | 18 | 150s |
//! | Hard | 8x8 | 32 | 210s |
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds unless noted:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_INTERVAL_MS` | 1000 | Countdown tick interval |
//! | `UNFLIP_DELAY_MS` | 800 | Mismatch display window before cards flip back |
//! | `TICK_WARNING_SECS` | 10 | Tick cue plays at or below this many seconds (seconds) |
//!
//! # Examples
//!
//! ```
//! use memory_match_types::{Difficulty, GameMode, SoundKind, Theme};
//!
//! assert_eq!(Difficulty::Medium.pair_count(), 18);
//! assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
//! assert_eq!(GameMode::from_str("time-attack"), Some(GameMode::TimeAttack));
//! assert_eq!(SoundKind::NoMatch.asset_name(), "card_nomatch");
//!
//! let theme = Theme::by_name("animals").unwrap();
//! assert!(theme.symbols.len() >= Difficulty::Hard.pair_count());
//! ```

use serde::{Deserialize, Serialize};

/// Countdown tick interval (1 second)
pub const TICK_INTERVAL_MS: u64 = 1000;

/// How long a mismatched pair stays face-up before flipping back
pub const UNFLIP_DELAY_MS: u64 = 800;

/// Remaining seconds at or below which every tick plays the tick cue
pub const TICK_WARNING_SECS: u32 = 10;

/// Base points per match, multiplied by the current streak
pub const DEFAULT_BASE_AWARD: u32 = 10;

/// Smallest award a match can ever earn
pub const DEFAULT_MIN_AWARD: u32 = 10;

/// Points deducted on a mismatch (score never drops below zero)
pub const DEFAULT_MISMATCH_PENALTY: u32 = 5;


/// Stable identity of a card.
///
/// Ids are never reused by the same game state, so an id held by a renderer
/// from a previous deal simply stops resolving after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub u32);

/// A single card on the table
///
/// The symbol is fixed at deal time. Only the face flags change, and a matched
/// card stays face-up for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Card {
    id: CardId,
    content: String,
    face_up: bool,
    matched: bool,
}

impl Card {
    /// Create a face-down, unmatched card
    pub fn new(id: CardId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            face_up: false,
            matched: false,
        }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn face_up(&self) -> bool {
        self.face_up
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Whether a player may pick this card right now
    pub fn selectable(&self) -> bool {
        !self.face_up && !self.matched
    }

    pub fn flip_up(&mut self) {
        self.face_up = true;
    }

    /// Turn the card face-down. Matched cards ignore this.
    pub fn flip_down(&mut self) {
        if !self.matched {
            self.face_up = false;
        }
    }

    pub fn mark_matched(&mut self) {
        self.matched = true;
        self.face_up = true;
    }
}

/// Board size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 4x4 grid
    #[default]
    Easy,
    /// 6x6 grid
    Medium,
    /// 8x8 grid
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Parse difficulty from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "4x4" => Some(Difficulty::Easy),
            "medium" | "6x6" => Some(Difficulty::Medium),
            "hard" | "8x8" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Grid dimensions as (columns, rows)
    pub fn grid_size(&self) -> (u8, u8) {
        match self {
            Difficulty::Easy => (4, 4),
            Difficulty::Medium => (6, 6),
            Difficulty::Hard => (8, 8),
        }
    }

    pub fn pair_count(&self) -> usize {
        let (columns, rows) = self.grid_size();
        (columns as usize * rows as usize) / 2
    }

    /// Countdown length for Time Attack, in seconds
    pub fn time_attack_secs(&self) -> u32 {
        match self {
            Difficulty::Easy => 90,
            Difficulty::Medium => 150,
            Difficulty::Hard => 210,
        }
    }
}

/// Untimed or timed play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    #[default]
    Classic,
    /// The session ends when the countdown reaches zero
    TimeAttack,
}

impl GameMode {
    /// Parse mode from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "timeattack" | "time-attack" | "time_attack" | "timed" => Some(GameMode::TimeAttack),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::TimeAttack => "timeAttack",
        }
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, GameMode::TimeAttack)
    }
}

/// Sound cues emitted by the engine
///
/// Each cue maps to an audio asset stem; the player layer decides how (and
/// whether) to play it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundKind {
    Flip,
    Match,
    NoMatch,
    GameOver,
    Win,
    Tick,
}

impl SoundKind {
    pub const ALL: [SoundKind; 6] = [
        SoundKind::Flip,
        SoundKind::Match,
        SoundKind::NoMatch,
        SoundKind::GameOver,
        SoundKind::Win,
        SoundKind::Tick,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flip" => Some(SoundKind::Flip),
            "match" => Some(SoundKind::Match),
            "nomatch" => Some(SoundKind::NoMatch),
            "gameover" => Some(SoundKind::GameOver),
            "win" => Some(SoundKind::Win),
            "tick" => Some(SoundKind::Tick),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Flip => "flip",
            SoundKind::Match => "match",
            SoundKind::NoMatch => "noMatch",
            SoundKind::GameOver => "gameOver",
            SoundKind::Win => "win",
            SoundKind::Tick => "tick",
        }
    }

    /// File stem of the audio asset for this cue
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundKind::Flip => "card_flip",
            SoundKind::Match => "card_match",
            SoundKind::NoMatch => "card_nomatch",
            SoundKind::GameOver => "game_over",
            SoundKind::Win => "game_win",
            SoundKind::Tick => "timer_tick",
        }
    }
}

/// When a mismatch costs points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PenaltyPolicy {
    /// Every mismatch is penalized
    #[default]
    Always,
    /// Only mismatches where both cards had been revealed before the attempt
    SeenOnly,
}

/// A named symbol set cards are dealt from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Theme {
    pub name: &'static str,
    pub symbols: &'static [&'static str],
}

impl Theme {
    pub const ANIMALS: Theme = Theme {
        name: "Animals",
        symbols: &[
            "🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼", "🐨", "🐯", "🦁", "🐮", "🐷", "🐸",
            "🐵", "🐔", "🐧", "🐦", "🐤", "🦆", "🦅", "🦉", "🦇", "🐺", "🐗", "🐴", "🦄", "🐝",
            "🐛", "🦋", "🐌", "🐞",
        ],
    };

    pub const FOOD: Theme = Theme {
        name: "Food",
        symbols: &[
            "🍎", "🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓", "🫐", "🍈", "🍒", "🍑", "🥭", "🍍",
            "🥥", "🥝", "🍅", "🍆", "🥑", "🥦", "🥕", "🌽", "🌶", "🥔", "🍠", "🥐", "🍞", "🧀",
            "🥚", "🍳", "🥞", "🍕",
        ],
    };

    pub const SPORTS: Theme = Theme {
        name: "Sports",
        symbols: &[
            "⚽", "🏀", "🏈", "⚾", "🥎", "🎾", "🏐", "🏉", "🥏", "🎱", "🪀", "🏓", "🏸", "🏒",
            "🏑", "🥍", "🏏", "🪃", "🥅", "⛳", "🪁", "🏹", "🎣", "🤿", "🥊", "🥋", "🎽", "🛹",
            "🛼", "🛷", "⛸", "🥌",
        ],
    };

    pub const FACES: Theme = Theme {
        name: "Faces",
        symbols: &[
            "😀", "😃", "😄", "😁", "😆", "😅", "🤣", "😂", "🙂", "🙃", "😉", "😊", "😇", "🥰",
            "😍", "🤩", "😘", "😗", "😚", "😙", "😋", "😛", "😜", "🤪", "😝", "🤑", "🤗", "🤭",
            "🤫", "🤔", "🤐", "🤨",
        ],
    };

    pub const VEHICLES: Theme = Theme {
        name: "Vehicles",
        symbols: &[
            "🚗", "🚕", "🚙", "🚌", "🚎", "🏎", "🚓", "🚑", "🚒", "🚐", "🛻", "🚚", "🚛", "🚜",
            "🛵", "🏍", "🚲", "🛴", "🚨", "🚔", "🚍", "🚘", "🚖", "🚡", "🚠", "🚟", "🚃", "🚋",
            "🚞", "🚝", "🚄", "🚅",
        ],
    };

    pub const ALL: [Theme; 5] = [
        Theme::ANIMALS,
        Theme::FOOD,
        Theme::SPORTS,
        Theme::FACES,
        Theme::VEHICLES,
    ];

    /// Look up a theme by name (case-insensitive)
    pub fn by_name(name: &str) -> Option<Theme> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Owned copy of the symbol list, for building a config
    pub fn symbol_pool(&self) -> Vec<String> {
        self.symbols.iter().map(|s| (*s).to_string()).collect()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::ANIMALS
    }
}
