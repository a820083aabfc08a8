//! Player: one leader, four zones and the per-round counters.
//!
//! ## Round counters
//!
//! - `max_cost` grows by one each round up to the configured cap and
//!   `cost_left` refills to it.
//! - `used_cards` counts cards played this round and resets at round end.
//! - `has_evolved` allows one evolve per round, free or paid.
//!
//! Round order is fixed at creation and decides the starting evolve
//! points, the round evolving unlocks, and the first-round draw.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::cards::{Follower, Keyword, Leader, LeaderClass};
use crate::core::{CardArena, EntityId, PlayerId, RoundOrder, RulesConfig};
use crate::error::{Result, RulesError};
use crate::zones::{Deck, Field, Grave, Hand};

/// One side of the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    order: RoundOrder,
    leader: Leader,
    deck: Deck,
    hand: Hand,
    field: Field,
    grave: Grave,
    max_cost: i32,
    cost_left: i32,
    max_cost_cap: i32,
    evolve_points: u32,
    used_cards: u32,
    round: u32,
    has_evolved: bool,
}

impl Player {
    /// Create a player with an empty deck. Round order follows seat order.
    #[must_use]
    pub fn new(id: PlayerId, class: LeaderClass, config: &RulesConfig) -> Self {
        let order = RoundOrder::of(id);
        Self {
            id,
            order,
            leader: Leader::new(class, config.leader_health),
            deck: Deck::new(),
            hand: Hand::new(config.hand_capacity),
            field: Field::new(config.field_capacity),
            grave: Grave::new(),
            max_cost: 0,
            cost_left: 0,
            max_cost_cap: config.max_cost,
            evolve_points: config.evolve_points(order),
            used_cards: 0,
            round: 0,
            has_evolved: false,
        }
    }

    /// Install a deck (builder pattern).
    #[must_use]
    pub fn with_deck(mut self, deck: Deck) -> Self {
        self.deck = deck;
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn round_order(&self) -> RoundOrder {
        self.order
    }

    #[must_use]
    pub fn class(&self) -> LeaderClass {
        self.leader.class()
    }

    #[must_use]
    pub fn leader(&self) -> &Leader {
        &self.leader
    }

    pub fn leader_mut(&mut self) -> &mut Leader {
        &mut self.leader
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut Deck {
        &mut self.deck
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    #[must_use]
    pub fn grave(&self) -> &Grave {
        &self.grave
    }

    pub fn grave_mut(&mut self) -> &mut Grave {
        &mut self.grave
    }

    #[must_use]
    pub fn max_cost(&self) -> i32 {
        self.max_cost
    }

    #[must_use]
    pub fn cost_left(&self) -> i32 {
        self.cost_left
    }

    #[must_use]
    pub fn evolve_points(&self) -> u32 {
        self.evolve_points
    }

    #[must_use]
    pub fn used_card_count(&self) -> u32 {
        self.used_cards
    }

    #[must_use]
    pub fn round_number(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn has_evolved(&self) -> bool {
        self.has_evolved
    }

    // === Cost ===

    /// Spend cost. Fails, spending nothing, when `usage` exceeds what is left.
    pub fn use_cost(&mut self, usage: i32) -> Result<()> {
        if usage > self.cost_left {
            return Err(RulesError::NotEnoughCost {
                needed: usage,
                left: self.cost_left,
            });
        }
        self.cost_left -= usage;
        Ok(())
    }

    /// Take a card out of hand as played and count it.
    pub fn use_card(&mut self, id: EntityId) -> Result<()> {
        if !self.hand.remove(id) {
            return Err(RulesError::CardNotInHand(id));
        }
        self.used_cards += 1;
        Ok(())
    }

    /// Raise max cost by one, up to the cap.
    pub fn increase_max_cost(&mut self) {
        if self.max_cost < self.max_cost_cap {
            self.max_cost += 1;
        }
    }

    // === Leader states ===

    /// Dragoncraft only: max cost at or above the overflow threshold.
    pub fn is_overflow(&self, config: &RulesConfig) -> Result<bool> {
        match self.class() {
            LeaderClass::Dragoncraft => Ok(self.max_cost >= config.overflow_threshold),
            _ => Err(RulesError::NoOverflow),
        }
    }

    /// Bloodcraft only: leader health at or below the vengeance threshold.
    pub fn is_vengeance(&self, config: &RulesConfig) -> Result<bool> {
        match self.class() {
            LeaderClass::Bloodcraft => Ok(self.leader.health() <= config.vengeance_threshold),
            _ => Err(RulesError::NoVengeance),
        }
    }

    // === Evolve ===

    /// Check the round-order dependent unlock round.
    pub fn evolve_unlocked(&self, config: &RulesConfig) -> Result<()> {
        let unlock = config.evolve_round(self.order);
        if self.round < unlock {
            return Err(RulesError::EvolveLocked {
                rounds_left: unlock - self.round,
            });
        }
        Ok(())
    }

    /// Use this round's evolve.
    ///
    /// With a follower, one evolve point is spent and the follower evolves.
    /// Without one the evolve is free: only the per-round flag is set.
    /// Requires an evolve point either way.
    pub fn evolve(&mut self, follower: Option<&mut Follower>) -> Result<()> {
        if self.evolve_points == 0 {
            return Err(RulesError::NoEvolvePoints);
        }
        if self.has_evolved {
            return Err(RulesError::EvolveUsed);
        }
        if let Some(follower) = follower {
            follower.evolve()?;
            self.evolve_points -= 1;
        }
        self.has_evolved = true;
        Ok(())
    }

    // === Drawing ===

    /// Draw `amount` cards from the front of the deck.
    ///
    /// A card drawn into a full hand goes straight to the grave. Returns
    /// false as soon as the deck runs dry.
    pub fn draw_cards(&mut self, amount: usize) -> bool {
        for _ in 0..amount {
            let Some(card) = self.deck.draw() else {
                return false;
            };
            if !self.hand.add(card) {
                debug!("{}: hand full, {} goes to the grave", self.id, card);
                self.grave.add(card);
            }
        }
        true
    }

    // === Round lifecycle ===

    /// Start a new round. Returns false when the round-start draw fails.
    pub fn begin_round(&mut self, arena: &mut CardArena, config: &RulesConfig) -> Result<bool> {
        self.round += 1;
        self.increase_max_cost();
        self.cost_left = self.max_cost;
        self.has_evolved = false;

        for id in self.field.iter() {
            let card = arena.get_mut(id)?;
            if let Some(follower) = card.as_follower_mut() {
                follower.grant(Keyword::Storm);
            }
            if let Some(amulet) = card.as_amulet_mut() {
                if amulet.is_countdown() {
                    amulet.decrease_countdown(1)?;
                }
            }
            card.reset_effect_toggle();
        }

        Ok(self.draw_cards(config.round_start_draw(self.order, self.round)))
    }

    /// Finish the current round: reset the play count, settle follower
    /// status to Attacked and clear the evolve flag.
    pub fn end_round(&mut self, arena: &mut CardArena) -> Result<()> {
        self.used_cards = 0;
        for id in self.field.iter() {
            if let Some(follower) = arena.get_mut(id)?.as_follower_mut() {
                follower.revoke(Keyword::Disabled);
                follower.grant(Keyword::Attacked);
            }
        }
        self.has_evolved = false;
        Ok(())
    }
}
