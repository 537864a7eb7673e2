//! Memorising autoplayer.
//!
//! Remembers every symbol it has seen face-up and plays known pairs first.
//! Used by the headless runner and by end-to-end tests.

use std::collections::HashMap;

use crate::core::GameSnapshot;
use crate::types::CardId;

#[derive(Debug, Clone, Default)]
pub struct Bot {
    memory: HashMap<CardId, String>,
}

impl Bot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remembered(&self) -> usize {
        self.memory.len()
    }

    /// Record face-up symbols and forget cards that are out of play.
    pub fn observe(&mut self, snap: &GameSnapshot) {
        self.memory
            .retain(|id, _| snap.card(*id).is_some_and(|c| !c.matched));
        for card in snap.revealed_unmatched() {
            self.memory.insert(card.id, card.content.clone());
        }
    }

    /// Next card to flip, or `None` while a mismatched pair is still showing
    /// or the game is over.
    pub fn next_move(&self, snap: &GameSnapshot) -> Option<CardId> {
        if snap.over {
            return None;
        }

        let mut revealed = snap.revealed_unmatched();
        let pending = match (revealed.next(), revealed.next()) {
            (None, _) => None,
            (Some(card), None) => Some(card),
            (Some(_), Some(_)) => return None,
        };

        let face_down = || snap.cards.iter().filter(|c| !c.face_up && !c.matched);
        let unknown = || face_down().find(|c| !self.memory.contains_key(&c.id));

        match pending {
            Some(first) => face_down()
                .find(|c| self.memory.get(&c.id) == Some(&first.content))
                .or_else(unknown)
                .or_else(|| face_down().next())
                .map(|c| c.id),
            None => self
                .known_pair(snap)
                .or_else(|| unknown().map(|c| c.id))
                .or_else(|| face_down().next().map(|c| c.id)),
        }
    }

    /// First card of a pair whose both halves are remembered and face-down
    fn known_pair(&self, snap: &GameSnapshot) -> Option<CardId> {
        let mut by_symbol: HashMap<&str, CardId> = HashMap::new();
        for card in snap.cards.iter().filter(|c| !c.face_up && !c.matched) {
            let Some(symbol) = self.memory.get(&card.id) else {
                continue;
            };
            if let Some(&first) = by_symbol.get(symbol.as_str()) {
                return Some(first);
            }
            by_symbol.insert(symbol.as_str(), card.id);
        }
        None
    }
}
