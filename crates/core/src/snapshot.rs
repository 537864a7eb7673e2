use serde::{Deserialize, Serialize};

use crate::types::{Card, CardId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub id: CardId,
    pub content: String,
    pub face_up: bool,
    pub matched: bool,
}

impl From<&Card> for CardSnapshot {
    fn from(value: &Card) -> Self {
        Self {
            id: value.id(),
            content: value.content().to_string(),
            face_up: value.face_up(),
            matched: value.matched(),
        }
    }
}

impl CardSnapshot {
    /// Overwrite in place, reusing the content buffer
    pub(crate) fn copy_from(&mut self, card: &Card) {
        self.id = card.id();
        if self.content != card.content() {
            self.content.clear();
            self.content.push_str(card.content());
        }
        self.face_up = card.face_up();
        self.matched = card.matched();
    }
}

/// Read-only view of a session, produced after every transition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub episode_id: u32,
    pub cards: Vec<CardSnapshot>,
    pub score: u32,
    pub streak: u32,
    pub remaining_pairs: u32,
    pub time_remaining: u32,
    pub timed: bool,
    pub started: bool,
    pub over: bool,
    pub won: bool,
}

impl GameSnapshot {
    pub fn card(&self, id: CardId) -> Option<&CardSnapshot> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards currently showing their face but not yet matched
    pub fn revealed_unmatched(&self) -> impl Iterator<Item = &CardSnapshot> {
        self.cards.iter().filter(|c| c.face_up && !c.matched)
    }

    pub fn matched_count(&self) -> usize {
        self.cards.iter().filter(|c| c.matched).count()
    }
}
