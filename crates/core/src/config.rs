//! Session configuration
//!
//! [`GameConfig`] is what the engine consumes. [`GameSettings`] is the
//! player-facing record (theme, difficulty, mode, sound) that produces one.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scoring::ScoringRules;
use crate::types::{Difficulty, GameMode, Theme, UNFLIP_DELAY_MS};

/// Configuration rejected at session construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("pair count must be at least 1")]
    NoPairs,
    #[error("symbol pool has {available} distinct symbols but {required} pairs were requested")]
    SymbolPoolTooSmall { required: usize, available: usize },
    #[error("invalid card layout: {0}")]
    InvalidLayout(String),
}

/// Everything needed to deal and run one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub pair_count: usize,
    pub symbol_pool: Vec<String>,
    pub timed: bool,
    /// Countdown length in seconds; ignored when `timed` is false.
    pub duration_secs: u32,
    pub sound_enabled: bool,
    #[serde(default)]
    pub scoring: ScoringRules,
    /// Mismatch display window before the deferred unflip.
    #[serde(default = "default_unflip_delay_ms")]
    pub unflip_delay_ms: u64,
}

fn default_unflip_delay_ms() -> u64 {
    UNFLIP_DELAY_MS
}

impl GameConfig {
    /// Untimed config with the default scoring rules
    pub fn new(pair_count: usize, symbol_pool: Vec<String>) -> Self {
        Self {
            pair_count,
            symbol_pool,
            timed: false,
            duration_secs: 0,
            sound_enabled: true,
            scoring: ScoringRules::standard(),
            unflip_delay_ms: UNFLIP_DELAY_MS,
        }
    }

    /// Switch to Time Attack with the given countdown
    pub fn timed(mut self, duration_secs: u32) -> Self {
        self.timed = true;
        self.duration_secs = duration_secs;
        self
    }

    pub fn with_sound(mut self, enabled: bool) -> Self {
        self.sound_enabled = enabled;
        self
    }

    pub fn with_scoring(mut self, scoring: ScoringRules) -> Self {
        self.scoring = scoring;
        self
    }

    /// Number of distinct symbols in the pool
    pub fn distinct_symbols(&self) -> usize {
        let mut seen: Vec<&str> = Vec::with_capacity(self.symbol_pool.len());
        for s in &self.symbol_pool {
            if !seen.contains(&s.as_str()) {
                seen.push(s);
            }
        }
        seen.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pair_count == 0 {
            return Err(ConfigError::NoPairs);
        }
        let available = self.distinct_symbols();
        if available < self.pair_count {
            return Err(ConfigError::SymbolPoolTooSmall {
                required: self.pair_count,
                available,
            });
        }
        Ok(())
    }

    /// Starting value of the countdown
    pub fn initial_time(&self) -> u32 {
        if self.timed {
            self.duration_secs
        } else {
            0
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameSettings::default().to_config()
    }
}

/// Player-facing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub theme: Theme,
    pub difficulty: Difficulty,
    pub mode: GameMode,
    pub sound_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            difficulty: Difficulty::default(),
            mode: GameMode::default(),
            sound_enabled: true,
        }
    }
}

impl GameSettings {
    /// Create from environment variables
    ///
    /// - `MEMORY_MATCH_THEME`: theme name (default: Animals)
    /// - `MEMORY_MATCH_DIFFICULTY`: easy | medium | hard (default: easy)
    /// - `MEMORY_MATCH_MODE`: classic | time-attack (default: classic)
    /// - `MEMORY_MATCH_SOUND`: 0/false disables sound cues (default: on)
    ///
    /// Unrecognised values fall back to the default and are logged.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameSettings::from_env`], reading variables through `get`
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let theme = match get("MEMORY_MATCH_THEME") {
            Some(name) => Theme::by_name(&name).unwrap_or_else(|| {
                tracing::warn!("unknown MEMORY_MATCH_THEME {:?}, using {}", name, defaults.theme.name);
                defaults.theme
            }),
            None => defaults.theme,
        };

        let difficulty = match get("MEMORY_MATCH_DIFFICULTY") {
            Some(s) => Difficulty::from_str(&s).unwrap_or_else(|| {
                tracing::warn!("unknown MEMORY_MATCH_DIFFICULTY {:?}, using {}", s, defaults.difficulty.as_str());
                defaults.difficulty
            }),
            None => defaults.difficulty,
        };

        let mode = match get("MEMORY_MATCH_MODE") {
            Some(s) => GameMode::from_str(&s).unwrap_or_else(|| {
                tracing::warn!("unknown MEMORY_MATCH_MODE {:?}, using {}", s, defaults.mode.as_str());
                defaults.mode
            }),
            None => defaults.mode,
        };

        let sound_enabled = match get("MEMORY_MATCH_SOUND") {
            Some(s) => parse_flag(&s).unwrap_or_else(|| {
                tracing::warn!("unknown MEMORY_MATCH_SOUND {:?}, using {}", s, defaults.sound_enabled);
                defaults.sound_enabled
            }),
            None => defaults.sound_enabled,
        };

        Self {
            theme,
            difficulty,
            mode,
            sound_enabled,
        }
    }

    /// Derive the engine configuration
    pub fn to_config(&self) -> GameConfig {
        let config = GameConfig::new(self.difficulty.pair_count(), self.theme.symbol_pool())
            .with_sound(self.sound_enabled);
        if self.mode.is_timed() {
            config.timed(self.difficulty.time_attack_secs())
        } else {
            config
        }
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Deal seed from `MEMORY_MATCH_SEED`, else from the wall clock
pub fn seed_from_env() -> u32 {
    if let Some(seed) = std::env::var("MEMORY_MATCH_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
    {
        return seed;
    }

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
