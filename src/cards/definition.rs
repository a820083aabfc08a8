//! Card definitions - immutable per-card templates.
//!
//! A `CardDefinition` holds what is printed on a card: name, cost, class,
//! rarity, variant stats and its trigger effects. Runtime state lives in
//! [`Card`](super::Card), which is built fresh from a definition every time
//! a card is requested.
//!
//! ## Trigger text
//!
//! Triggers are written once, at definition time, as
//! `KEY=OPCODE+KEY=OPCODE...`:
//!
//! ```
//! use shadow_rules::cards::{TriggerSlot, Triggers};
//!
//! let triggers = Triggers::parse("FANFARE=DRWCRD@1+LSTWRD=DMGENELED@2").unwrap();
//! assert_eq!(triggers.get(TriggerSlot::Fanfare), Some("DRWCRD@1"));
//! assert_eq!(triggers.get(TriggerSlot::Lastword), Some("DMGENELED@2"));
//! assert_eq!(triggers.get(TriggerSlot::RoundEnd), None);
//! ```

use serde::{Deserialize, Serialize};

use super::attributes::{CardType, LeaderClass, Rarity};
use super::follower::FollowerTemplate;
use crate::error::{Result, RulesError};

/// The nine trigger slots a card may fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerSlot {
    /// Played from hand.
    Fanfare,
    /// Destroyed (not banished).
    Lastword,
    /// Another allied follower is played while this card is on the field.
    AllyEnter,
    /// This follower attacks.
    Attack,
    /// This follower fights another follower.
    Fight,
    /// Owner's round starts.
    RoundStart,
    /// Owner's round ends.
    RoundEnd,
    /// This follower evolves.
    Evolve,
    /// Owner's round ends while this card is still in its entrance round.
    EntranceEnd,
}

impl TriggerSlot {
    pub const ALL: [TriggerSlot; 9] = [
        TriggerSlot::Fanfare,
        TriggerSlot::Lastword,
        TriggerSlot::AllyEnter,
        TriggerSlot::Attack,
        TriggerSlot::Fight,
        TriggerSlot::RoundStart,
        TriggerSlot::RoundEnd,
        TriggerSlot::Evolve,
        TriggerSlot::EntranceEnd,
    ];

    /// Key used in trigger text.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            TriggerSlot::Fanfare => "FANFARE",
            TriggerSlot::Lastword => "LSTWRD",
            TriggerSlot::AllyEnter => "WETR",
            TriggerSlot::Attack => "WATK",
            TriggerSlot::Fight => "WFIG",
            TriggerSlot::RoundStart => "WSTA",
            TriggerSlot::RoundEnd => "WEND",
            TriggerSlot::Evolve => "WEVO",
            TriggerSlot::EntranceEnd => "WENTEND",
        }
    }

    pub fn from_key(key: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.key() == key)
            .ok_or_else(|| RulesError::UnknownTriggerKey(key.to_string()))
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Opcode strings per trigger slot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Triggers {
    slots: [Option<String>; 9],
}

impl Triggers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `KEY=OPCODE+KEY=OPCODE...`. Empty text yields no triggers.
    pub fn parse(text: &str) -> Result<Self> {
        let mut triggers = Self::new();
        for entry in text.split('+').filter(|e| !e.is_empty()) {
            let (key, opcode) = entry
                .split_once('=')
                .ok_or_else(|| RulesError::UnknownTriggerKey(entry.to_string()))?;
            triggers.set(TriggerSlot::from_key(key)?, opcode);
        }
        Ok(triggers)
    }

    /// Set a slot (builder pattern).
    #[must_use]
    pub fn with(mut self, slot: TriggerSlot, opcode: impl Into<String>) -> Self {
        self.set(slot, opcode);
        self
    }

    pub fn set(&mut self, slot: TriggerSlot, opcode: impl Into<String>) {
        self.slots[slot.index()] = Some(opcode.into());
    }

    #[must_use]
    pub fn get(&self, slot: TriggerSlot) -> Option<&str> {
        self.slots[slot.index()].as_deref()
    }

    /// Check whether any slot contains `needle`.
    #[must_use]
    pub fn mentions(&self, needle: &str) -> bool {
        self.slots.iter().flatten().any(|s| s.contains(needle))
    }
}

/// Variant-specific template data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantTemplate {
    Follower(FollowerTemplate),
    /// Countdown; zero or less means no countdown.
    Amulet { countdown: i32 },
    Spell,
}

impl VariantTemplate {
    #[must_use]
    pub fn card_type(&self) -> CardType {
        match self {
            VariantTemplate::Follower(_) => CardType::Follower,
            VariantTemplate::Amulet { .. } => CardType::Amulet,
            VariantTemplate::Spell => CardType::Spell,
        }
    }
}

/// Immutable card template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub name: String,
    pub cost: i32,
    pub class: LeaderClass,
    pub rarity: Rarity,
    pub variant: VariantTemplate,
    pub triggers: Triggers,
    pub spell_boost: bool,
}

impl CardDefinition {
    /// Create a definition with no triggers.
    pub fn new(name: impl Into<String>, cost: i32, class: LeaderClass, variant: VariantTemplate) -> Self {
        Self {
            name: name.into(),
            cost,
            class,
            rarity: Rarity::Bronze,
            variant,
            triggers: Triggers::new(),
            spell_boost: false,
        }
    }

    /// Shorthand for a follower definition.
    pub fn follower(name: impl Into<String>, cost: i32, class: LeaderClass, stats: FollowerTemplate) -> Self {
        Self::new(name, cost, class, VariantTemplate::Follower(stats))
    }

    /// Shorthand for an amulet definition.
    pub fn amulet(name: impl Into<String>, cost: i32, class: LeaderClass, countdown: i32) -> Self {
        Self::new(name, cost, class, VariantTemplate::Amulet { countdown })
    }

    /// Shorthand for a spell definition.
    pub fn spell(name: impl Into<String>, cost: i32, class: LeaderClass) -> Self {
        Self::new(name, cost, class, VariantTemplate::Spell)
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, slot: TriggerSlot, opcode: impl Into<String>) -> Self {
        self.triggers.set(slot, opcode);
        self
    }

    /// Replace all triggers with parsed trigger text.
    pub fn with_trigger_text(mut self, text: &str) -> Result<Self> {
        self.triggers = Triggers::parse(text)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_spell_boost(mut self) -> Self {
        self.spell_boost = true;
        self
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.variant.card_type()
    }

    /// Spellboost cards whose text mentions `BSTCST` get cheaper instead of counting boosts.
    #[must_use]
    pub fn is_boost_cost(&self) -> bool {
        self.spell_boost && self.triggers.mentions("BSTCST")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_keys() {
        let text = "FANFARE=A@1+LSTWRD=B+WETR=C+WATK=D+WFIG=E+WSTA=F+WEND=G+WEVO=H+WENTEND=I";
        let triggers = Triggers::parse(text).unwrap();
        let values: Vec<_> = TriggerSlot::ALL.iter().map(|s| triggers.get(*s).unwrap()).collect();
        assert_eq!(values, ["A@1", "B", "C", "D", "E", "F", "G", "H", "I"]);
    }

    #[test]
    fn test_parse_unknown_key() {
        assert_eq!(
            Triggers::parse("WHATEVER=DRWCRD@1"),
            Err(RulesError::UnknownTriggerKey("WHATEVER".into()))
        );
        assert!(Triggers::parse("").unwrap().get(TriggerSlot::Fanfare).is_none());
    }

    #[test]
    fn test_boost_cost_detection() {
        let spell = CardDefinition::spell("Fiery Embrace", 8, LeaderClass::Runecraft)
            .with_trigger(TriggerSlot::Fanfare, "KILENEFOLBSTCST")
            .with_spell_boost();
        assert!(spell.is_boost_cost());

        let counter = CardDefinition::spell("Fate's Hand", 4, LeaderClass::Runecraft)
            .with_trigger(TriggerSlot::Fanfare, "DRWCRD@2")
            .with_spell_boost();
        assert!(!counter.is_boost_cost());

        let plain = CardDefinition::spell("Plain", 1, LeaderClass::Neutral)
            .with_trigger(TriggerSlot::Fanfare, "BSTCST");
        assert!(!plain.is_boost_cost());
    }

    #[test]
    fn test_card_type() {
        let def = CardDefinition::amulet("Fairy Circle", 1, LeaderClass::Forestcraft, 0);
        assert_eq!(def.card_type(), CardType::Amulet);
    }
}
