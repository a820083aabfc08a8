//! Grave: unbounded discard pile with a necromancy counter.
//!
//! Every admission adds one necromancy. Spending necromancy also removes
//! up to that many cards from the front of the grave.

use serde::{Deserialize, Serialize};

use super::list::CardList;
use crate::core::EntityId;

/// A player's grave.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grave {
    cards: CardList,
    necromancy: u32,
}

impl Grave {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: EntityId) {
        self.cards.push_back(id);
        self.necromancy += 1;
    }

    #[must_use]
    pub fn necromancy(&self) -> u32 {
        self.necromancy
    }

    /// Spend `usage` necromancy. Fails without side effects when short.
    pub fn use_necromancy(&mut self, usage: u32) -> bool {
        if self.necromancy < usage {
            return false;
        }
        self.necromancy -= usage;
        for _ in 0..usage {
            if self.cards.pop_front().is_none() {
                break;
            }
        }
        true
    }

    pub fn add_necromancy(&mut self, amount: u32) {
        self.necromancy += amount;
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_necromancy_tracks_admissions() {
        let mut grave = Grave::new();
        grave.add(EntityId::new(1));
        grave.add(EntityId::new(2));
        assert_eq!(grave.necromancy(), 2);
    }

    #[test]
    fn test_use_necromancy() {
        let mut grave = Grave::new();
        for i in 0..3 {
            grave.add(EntityId::new(i));
        }
        assert!(!grave.use_necromancy(4));
        assert_eq!((grave.necromancy(), grave.len()), (3, 3));

        assert!(grave.use_necromancy(2));
        assert_eq!(grave.necromancy(), 1);
        assert_eq!(grave.cards().get(0), Some(EntityId::new(2)));
    }

    #[test]
    fn test_added_necromancy_outlasts_cards() {
        let mut grave = Grave::new();
        grave.add(EntityId::new(1));
        grave.add_necromancy(4);
        assert!(grave.use_necromancy(5));
        assert!(grave.is_empty());
        assert_eq!(grave.necromancy(), 0);
    }
}
