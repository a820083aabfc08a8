//! Hand: bounded, ordered.

use serde::{Deserialize, Serialize};

use super::list::CardList;
use crate::core::EntityId;

/// A player's hand. Additions past capacity are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: CardList,
    capacity: usize,
}

impl Hand {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            cards: CardList::new(),
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cards.len() >= self.capacity
    }

    /// Add a card. Returns false (and leaves the hand unchanged) when full.
    pub fn add(&mut self, id: EntityId) -> bool {
        if self.is_full() {
            return false;
        }
        self.cards.push_back(id);
        true
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        self.cards.remove(id)
    }

    /// Replace the card at `index` in place.
    pub fn replace_at(&mut self, index: usize, id: EntityId) -> Option<EntityId> {
        self.cards.set(index, id)
    }

    /// Empty the hand, returning what it held.
    pub fn discard_all(&mut self) -> Vec<EntityId> {
        self.cards.drain().into_iter().collect()
    }

    #[must_use]
    pub fn cards(&self) -> &CardList {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cards.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.cards.iter()
    }
}
