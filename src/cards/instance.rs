//! Card instances - runtime card state.
//!
//! `Card` is one independently mutable copy of a [`CardDefinition`]. It holds
//! the state every card variant shares (cost, entrance flag, effect toggle,
//! spellboost) and a [`CardKind`] with the variant-specific battle state.
//!
//! Variant-specific opcodes go through [`Card::follower`] /
//! [`Card::amulet`] (and their `_mut` forms), which report a configuration
//! error when the card is the wrong variant.

use serde::{Deserialize, Serialize};

use super::amulet::Amulet;
use super::attributes::{CardType, LeaderClass, Rarity};
use super::definition::{CardDefinition, TriggerSlot, Triggers, VariantTemplate};
use super::follower::Follower;
use crate::error::{Result, RulesError};

/// Highest cost a card may be set to.
pub const MAX_CARD_COST: i32 = 20;
/// Lowest cost a card may be set to.
pub const MIN_CARD_COST: i32 = 0;

/// Name of the card whose round-end effect can be swapped.
const EFFECT_SWAP_CARD: &str = "Lucifer";
/// Round-end effect installed by the swap.
const EFFECT_SWAP_OPCODE: &str = "DMGENELED@4";

/// Variant-specific battle state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Follower(Follower),
    Amulet(Amulet),
    Spell,
}

/// Spellboost behaviour of a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpellBoost {
    /// Card has no spellboost.
    None,
    /// Each boost increments a counter read by the card's own effects.
    Counter(u32),
    /// Each boost lowers the card's cost by one.
    Cost,
}

/// A card instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    name: String,
    cost: i32,
    original_cost: i32,
    class: LeaderClass,
    rarity: Rarity,
    triggers: Triggers,
    entrance_round: bool,
    effect_toggle: bool,
    spell_boost: SpellBoost,
    /// Variant state.
    pub kind: CardKind,
}

impl Card {
    /// Build a fresh instance from a definition.
    #[must_use]
    pub fn from_definition(def: &CardDefinition) -> Self {
        let kind = match &def.variant {
            VariantTemplate::Follower(stats) => CardKind::Follower(Follower::from_template(stats)),
            VariantTemplate::Amulet { countdown } => CardKind::Amulet(Amulet::new(*countdown)),
            VariantTemplate::Spell => CardKind::Spell,
        };
        let spell_boost = match (def.spell_boost, def.is_boost_cost()) {
            (false, _) => SpellBoost::None,
            (true, true) => SpellBoost::Cost,
            (true, false) => SpellBoost::Counter(0),
        };

        Self {
            name: def.name.clone(),
            cost: def.cost,
            original_cost: def.cost,
            class: def.class,
            rarity: def.rarity,
            triggers: def.triggers.clone(),
            entrance_round: true,
            effect_toggle: true,
            spell_boost,
            kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    #[must_use]
    pub fn original_cost(&self) -> i32 {
        self.original_cost
    }

    #[must_use]
    pub fn class(&self) -> LeaderClass {
        self.class
    }

    #[must_use]
    pub fn rarity(&self) -> Rarity {
        self.rarity
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self.kind {
            CardKind::Follower(_) => CardType::Follower,
            CardKind::Amulet(_) => CardType::Amulet,
            CardKind::Spell => CardType::Spell,
        }
    }

    /// Opcode string for a trigger slot.
    #[must_use]
    pub fn trigger(&self, slot: TriggerSlot) -> Option<&str> {
        self.triggers.get(slot)
    }

    /// Followers live while health > 0, amulets until destroyed. Spells are never alive.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        match &self.kind {
            CardKind::Follower(f) => f.is_alive(),
            CardKind::Amulet(a) => a.is_alive(),
            CardKind::Spell => false,
        }
    }

    // === Round flags ===

    #[must_use]
    pub fn is_entrance_round(&self) -> bool {
        self.entrance_round
    }

    /// End the entrance round. One-way.
    pub fn pass_entrance_round(&mut self) {
        self.entrance_round = false;
    }

    #[must_use]
    pub fn effect_toggle(&self) -> bool {
        self.effect_toggle
    }

    /// Mark that one of this card's effects fired this round.
    pub fn effect_activated(&mut self) {
        self.effect_toggle = false;
    }

    pub fn reset_effect_toggle(&mut self) {
        self.effect_toggle = true;
    }

    // === Spellboost ===

    #[must_use]
    pub fn is_spell_boost(&self) -> bool {
        self.spell_boost != SpellBoost::None
    }

    #[must_use]
    pub fn is_boost_cost(&self) -> bool {
        self.spell_boost == SpellBoost::Cost
    }

    /// Apply one spellboost.
    pub fn boost(&mut self) -> Result<()> {
        match &mut self.spell_boost {
            SpellBoost::None => Err(RulesError::NotSpellBoost(self.name.clone())),
            SpellBoost::Cost => {
                self.cost = (self.cost - 1).max(MIN_CARD_COST);
                Ok(())
            }
            SpellBoost::Counter(count) => {
                *count += 1;
                Ok(())
            }
        }
    }

    /// Number of boosts received by a counting spellboost card.
    pub fn boost_amount(&self) -> Result<u32> {
        match self.spell_boost {
            SpellBoost::Counter(count) => Ok(count),
            SpellBoost::Cost => Err(RulesError::BoostCostCard(self.name.clone())),
            SpellBoost::None => Err(RulesError::NotSpellBoost(self.name.clone())),
        }
    }

    /// Set the cost to `cost`, which must be within 0..=20.
    pub fn change_cost(&mut self, cost: i32) -> Result<()> {
        if !(MIN_CARD_COST..=MAX_CARD_COST).contains(&cost) {
            return Err(RulesError::CostOutOfRange(cost));
        }
        self.cost = cost;
        Ok(())
    }

    /// Swap this card's round-end effect. Only one card supports it.
    pub fn change_effect(&mut self) -> Result<()> {
        if self.name != EFFECT_SWAP_CARD {
            return Err(RulesError::EffectNotChangeable(self.name.clone()));
        }
        self.triggers.set(TriggerSlot::RoundEnd, EFFECT_SWAP_OPCODE);
        Ok(())
    }

    // === Variant access ===

    #[must_use]
    pub fn as_follower(&self) -> Option<&Follower> {
        match &self.kind {
            CardKind::Follower(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_follower_mut(&mut self) -> Option<&mut Follower> {
        match &mut self.kind {
            CardKind::Follower(f) => Some(f),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_amulet(&self) -> Option<&Amulet> {
        match &self.kind {
            CardKind::Amulet(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_amulet_mut(&mut self) -> Option<&mut Amulet> {
        match &mut self.kind {
            CardKind::Amulet(a) => Some(a),
            _ => None,
        }
    }

    /// Follower state, or a configuration error for other variants.
    pub fn follower(&self) -> Result<&Follower> {
        let name = &self.name;
        match &self.kind {
            CardKind::Follower(f) => Ok(f),
            _ => Err(wrong_kind(name, CardType::Follower)),
        }
    }

    pub fn follower_mut(&mut self) -> Result<&mut Follower> {
        let name = &self.name;
        match &mut self.kind {
            CardKind::Follower(f) => Ok(f),
            _ => Err(wrong_kind(name, CardType::Follower)),
        }
    }

    pub fn amulet_mut(&mut self) -> Result<&mut Amulet> {
        let name = &self.name;
        match &mut self.kind {
            CardKind::Amulet(a) => Ok(a),
            _ => Err(wrong_kind(name, CardType::Amulet)),
        }
    }

    /// Destroy a follower (health to zero) or an amulet.
    pub fn kill(&mut self) -> Result<()> {
        match &mut self.kind {
            CardKind::Follower(f) => f.kill(),
            CardKind::Amulet(a) => a.destroy(),
            CardKind::Spell => return Err(wrong_kind(&self.name, CardType::Follower)),
        }
        Ok(())
    }
}

fn wrong_kind(name: &str, expected: CardType) -> RulesError {
    RulesError::WrongCardKind {
        card: name.to_string(),
        expected,
    }
}
