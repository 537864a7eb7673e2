//! Scoring module - match awards and mismatch penalties
//!
//! Two presets:
//! - `standard`: 10 points × streak, flat 5 point penalty on every mismatch.
//! - `relaxed`: 5 points × streak, 2 point penalty only when both cards had
//!   already been seen.
//!
//! Neither is a hard contract; a config can carry any `ScoringRules`.

use serde::{Deserialize, Serialize};

use crate::types::{PenaltyPolicy, DEFAULT_BASE_AWARD, DEFAULT_MIN_AWARD, DEFAULT_MISMATCH_PENALTY};

/// Point values and penalty policy for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoringRules {
    /// Points per match, multiplied by the streak after the match.
    pub base_award: u32,
    /// Floor for a single award; keeps every match worth something.
    pub min_award: u32,
    pub penalty: u32,
    pub penalty_policy: PenaltyPolicy,
}

impl ScoringRules {
    pub fn standard() -> Self {
        Self {
            base_award: DEFAULT_BASE_AWARD,
            min_award: DEFAULT_MIN_AWARD,
            penalty: DEFAULT_MISMATCH_PENALTY,
            penalty_policy: PenaltyPolicy::Always,
        }
    }

    pub fn relaxed() -> Self {
        Self {
            base_award: 5,
            min_award: 5,
            penalty: 2,
            penalty_policy: PenaltyPolicy::SeenOnly,
        }
    }

    /// Points for a match that brings the streak to `streak`
    ///
    /// Non-decreasing in `streak` and never below `min_award`.
    pub fn award(&self, streak: u32) -> u32 {
        self.base_award.saturating_mul(streak).max(self.min_award)
    }

    /// Whether a mismatch should cost points
    ///
    /// `first_seen_before` / `second_seen_before` say whether each card had been
    /// revealed at some point before this attempt.
    pub fn penalizes(&self, first_seen_before: bool, second_seen_before: bool) -> bool {
        match self.penalty_policy {
            PenaltyPolicy::Always => true,
            PenaltyPolicy::SeenOnly => first_seen_before && second_seen_before,
        }
    }

    /// Score after a penalty, clamped at zero
    pub fn apply_penalty(&self, score: u32) -> u32 {
        score.saturating_sub(self.penalty)
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::standard()
    }
}
