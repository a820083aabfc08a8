//! Field: the bounded battle zone for followers and amulets.
//!
//! The field never decides when a card leaves; the rules layer removes
//! destroyed or banished cards. Consequently the predicates below see
//! dead cards until the next sweep and filter on liveness where it matters.

use serde::{Deserialize, Serialize};

use super::list::CardList;
use crate::cards::{Card, CardType, CraftTrait, Follower};
use crate::core::{CardArena, EntityId};
use crate::error::{Result, RulesError};

/// A player's field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    cards: CardList,
    capacity: usize,
}

impl Field {
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

    /// Place a card. Returns `Ok(false)` when the field is full.
    ///
    /// Spells are never admitted; trying is a configuration error.
    pub fn add(&mut self, id: EntityId, arena: &CardArena) -> Result<bool> {
        let card = arena.get(id)?;
        if card.card_type() == CardType::Spell {
            return Err(RulesError::SpellOnField(card.name().to_string()));
        }
        if self.is_full() {
            return Ok(false);
        }
        self.cards.push_back(id);
        Ok(true)
    }

    pub fn remove(&mut self, id: EntityId) -> bool {
        self.cards.remove(id)
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

    /// Followers on this field paired with their ids.
    pub fn followers<'a>(&'a self, arena: &'a CardArena) -> impl Iterator<Item = (EntityId, &'a Follower)> + 'a {
        self.cards
            .iter()
            .filter_map(move |id| arena.as_follower(id).map(|f| (id, f)))
    }

    /// Ids of the living followers, in field order.
    #[must_use]
    pub fn living_followers(&self, arena: &CardArena) -> Vec<EntityId> {
        self.followers(arena)
            .filter(|(_, f)| f.is_alive())
            .map(|(id, _)| id)
            .collect()
    }

    // === Predicates ===

    /// True when no living follower here has Ward.
    #[must_use]
    pub fn have_no_ward(&self, arena: &CardArena) -> bool {
        !self.followers(arena).any(|(_, f)| f.is_alive() && f.has_ward())
    }

    /// Number of living followers.
    #[must_use]
    pub fn follower_count(&self, arena: &CardArena) -> usize {
        self.followers(arena).filter(|(_, f)| f.is_alive()).count()
    }

    #[must_use]
    pub fn amulet_count(&self, arena: &CardArena) -> usize {
        self.cards
            .iter()
            .filter(|&id| arena.try_get(id).and_then(Card::as_amulet).is_some())
            .count()
    }

    #[must_use]
    pub fn has_targetable_follower(&self, arena: &CardArena) -> bool {
        self.followers(arena).any(|(_, f)| f.can_be_targeted())
    }

    #[must_use]
    pub fn has_countdown_amulet(&self, arena: &CardArena) -> bool {
        self.cards.iter().any(|id| {
            arena
                .try_get(id)
                .and_then(Card::as_amulet)
                .is_some_and(|a| a.is_countdown())
        })
    }

    #[must_use]
    pub fn has_trait_follower(&self, arena: &CardArena, craft_trait: CraftTrait) -> bool {
        self.count_trait(arena, craft_trait) > 0
    }

    /// Number of followers (alive or not) with the given trait.
    #[must_use]
    pub fn count_trait(&self, arena: &CardArena, craft_trait: CraftTrait) -> usize {
        self.followers(arena)
            .filter(|(_, f)| f.craft_trait() == craft_trait)
            .count()
    }

    #[must_use]
    pub fn has_targetable_follower_hp_at_most(&self, arena: &CardArena, limit: i32) -> bool {
        self.followers(arena)
            .any(|(_, f)| f.health() <= limit && f.can_be_targeted())
    }

    #[must_use]
    pub fn has_targetable_follower_attack_at_least(&self, arena: &CardArena, limit: i32) -> bool {
        self.followers(arena)
            .any(|(_, f)| f.attack() >= limit && f.can_be_targeted())
    }

    /// Check for a follower costing exactly `cost`.
    #[must_use]
    pub fn has_follower_costing(&self, arena: &CardArena, cost: i32) -> bool {
        self.cards.iter().any(|id| {
            arena
                .try_get(id)
                .is_some_and(|c| c.as_follower().is_some() && c.cost() == cost)
        })
    }
}
