//! Deck: ordered draw pile, reshuffled on every insertion.
//!
//! ## Presets
//!
//! [`DeckPreset`] names the fixed deck lists known to the engine. The two
//! class starter decks are used when a player brings no deck list of their
//! own; `APOCALYPSE` only appears through the deck-replacement opcode.
//!
//! ```
//! use shadow_rules::cards::LeaderClass;
//! use shadow_rules::zones::DeckPreset;
//!
//! let preset = DeckPreset::for_class(LeaderClass::Swordcraft).unwrap();
//! assert_eq!(preset.card_names().len(), 40);
//! assert_eq!(DeckPreset::from_code("APOCALYPSE").unwrap().card_names().len(), 10);
//! ```

use serde::{Deserialize, Serialize};

use super::list::CardList;
use crate::cards::{CardType, CraftTrait, LeaderClass};
use crate::core::{CardArena, EntityId, GameRng};
use crate::error::{Result, RulesError};

/// Fixed deck lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeckPreset {
    Apocalypse,
    PurgatoryForest,
    SpeedSword,
}

const APOCALYPSE: &[(&str, usize)] = &[
    ("Servant_of_Darkness", 3),
    ("Silent_Rider", 3),
    ("Dis's_Damnation", 3),
    ("Astaroth's_Reckoning", 1),
];

const PURGATORY_FOREST: &[(&str, usize)] = &[
    ("Water_Fairy", 3),
    ("Elf_Child_May", 3),
    ("Nature's_Guidance", 3),
    ("Fairy_Circle", 3),
    ("Woodland_Refuge", 2),
    ("Altered_Fate", 3),
    ("Fairy_Whisperer", 3),
    ("Rhinoceroach", 3),
    ("Sylvan_Justice", 3),
    ("Pixie_Mischief", 3),
    ("Ancient_Elf", 3),
    ("Path_to_Purgatory", 3),
    ("Will_of_the_Forest", 3),
    ("Homecoming", 2),
];

const SPEED_SWORD: &[(&str, usize)] = &[
    ("Quickblader", 3),
    ("Ninja_Trainee", 3),
    ("Vanguard", 3),
    ("Keen_Enchantment", 3),
    ("Oathless_Knight", 3),
    ("Kunoichi_Trainee", 3),
    ("Palace_Fencer", 3),
    ("Centaur_Vanguard", 3),
    ("Princess_Vanguard", 3),
    ("Novice_Trooper", 3),
    ("Demonic_Strike", 3),
    ("White_General", 3),
    ("Tsubaki", 2),
    ("Alwida's_Command", 2),
];

impl DeckPreset {
    /// Preset by the code used in effect strings.
    pub fn from_code(code: &str) -> Result<Self> {
        match code {
            "APOCALYPSE" => Ok(DeckPreset::Apocalypse),
            "PURGATORY_FOREST" => Ok(DeckPreset::PurgatoryForest),
            "SPEED_SWORD" => Ok(DeckPreset::SpeedSword),
            other => Err(RulesError::UnknownDeck(other.to_string())),
        }
    }

    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            DeckPreset::Apocalypse => "APOCALYPSE",
            DeckPreset::PurgatoryForest => "PURGATORY_FOREST",
            DeckPreset::SpeedSword => "SPEED_SWORD",
        }
    }

    /// Starter deck for a leader class, if the class has one.
    #[must_use]
    pub const fn for_class(class: LeaderClass) -> Option<Self> {
        match class {
            LeaderClass::Forestcraft => Some(DeckPreset::PurgatoryForest),
            LeaderClass::Swordcraft => Some(DeckPreset::SpeedSword),
            _ => None,
        }
    }

    /// Every card name in the list, duplicates included.
    #[must_use]
    pub fn card_names(self) -> Vec<&'static str> {
        let list = match self {
            DeckPreset::Apocalypse => APOCALYPSE,
            DeckPreset::PurgatoryForest => PURGATORY_FOREST,
            DeckPreset::SpeedSword => SPEED_SWORD,
        };
        list.iter()
            .flat_map(|&(name, copies)| std::iter::repeat(name).take(copies))
            .collect()
    }
}

/// Filter for random deck searches.
///
/// Unset filters match everything; the cost window is inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CardQuery {
    pub class: Option<LeaderClass>,
    pub craft_trait: Option<CraftTrait>,
    pub card_type: Option<CardType>,
    pub min_cost: i32,
    pub max_cost: i32,
}

impl CardQuery {
    /// Match any card costing `min_cost..=max_cost`.
    #[must_use]
    pub fn cost_between(min_cost: i32, max_cost: i32) -> Self {
        Self {
            class: None,
            craft_trait: None,
            card_type: None,
            min_cost,
            max_cost,
        }
    }

    #[must_use]
    pub fn with_class(mut self, class: LeaderClass) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub fn with_trait(mut self, craft_trait: CraftTrait) -> Self {
        self.craft_trait = Some(craft_trait);
        self
    }

    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    /// Check a card in the arena against this query.
    #[must_use]
    pub fn matches(&self, arena: &CardArena, id: EntityId) -> bool {
        let Some(card) = arena.try_get(id) else {
            return false;
        };
        let trait_ok = match self.craft_trait {
            None => true,
            Some(wanted) => card.as_follower().is_some_and(|f| f.craft_trait() == wanted),
        };
        self.card_type.map_or(true, |t| card.card_type() == t)
            && self.class.map_or(true, |c| card.class() == c)
            && trait_ok
            && (self.min_cost..=self.max_cost).contains(&card.cost())
    }
}

/// A player's deck.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: CardList,
}

impl Deck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a shuffled deck from card handles.
    pub fn from_cards(cards: impl IntoIterator<Item = EntityId>, rng: &mut GameRng) -> Self {
        let mut deck = Self {
            cards: cards.into_iter().collect(),
        };
        deck.cards.shuffle(rng);
        deck
    }

    /// Insert a card, then reshuffle the whole deck.
    pub fn add(&mut self, id: EntityId, rng: &mut GameRng) {
        self.cards.push_back(id);
        self.cards.shuffle(rng);
    }

    /// Take the front card, if any.
    pub fn draw(&mut self) -> Option<EntityId> {
        self.cards.pop_front()
    }

    /// Discard the current contents and replace them with `cards`, shuffled.
    pub fn replace(&mut self, cards: impl IntoIterator<Item = EntityId>, rng: &mut GameRng) {
        *self = Self::from_cards(cards, rng);
    }

    /// Shuffle, then find the first card matching `query`.
    ///
    /// With `remove` set the found card is taken out of the deck.
    pub fn random_requested_card(
        &mut self,
        query: &CardQuery,
        arena: &CardArena,
        rng: &mut GameRng,
        remove: bool,
    ) -> Option<EntityId> {
        self.cards.shuffle(rng);
        let found = self.cards.iter().find(|&id| query.matches(arena, id))?;
        if remove {
            self.cards.remove(found);
        }
        Some(found)
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, CardDefinition, FollowerTemplate};

    #[test]
    fn test_preset_sizes() {
        assert_eq!(DeckPreset::PurgatoryForest.card_names().len(), 40);
        assert_eq!(DeckPreset::SpeedSword.card_names().len(), 40);
        assert_eq!(DeckPreset::for_class(LeaderClass::Runecraft), None);
        assert_eq!(
            DeckPreset::from_code("NOPE"),
            Err(RulesError::UnknownDeck("NOPE".into()))
        );
    }

    #[test]
    fn test_draw_from_front_until_empty() {
        let mut rng = GameRng::new(1);
        let mut deck = Deck::from_cards([EntityId::new(1), EntityId::new(2)], &mut rng);
        let front = deck.cards().get(0);
        assert_eq!(deck.draw(), front);
        assert!(deck.draw().is_some());
        assert_eq!(deck.draw(), None);
    }

    #[test]
    fn test_random_requested_card() {
        let mut arena = CardArena::new();
        let officer = CardDefinition::follower(
            "Quickblader",
            1,
            LeaderClass::Swordcraft,
            FollowerTemplate::new(1, 1).with_trait(CraftTrait::Officer),
        );
        let spell = CardDefinition::spell("Bolt", 1, LeaderClass::Swordcraft);
        let a = arena.insert(Card::from_definition(&officer));
        let b = arena.insert(Card::from_definition(&spell));

        let mut rng = GameRng::new(9);
        let mut deck = Deck::from_cards([a, b], &mut rng);
        let query = CardQuery::cost_between(0, 10)
            .with_class(LeaderClass::Swordcraft)
            .with_trait(CraftTrait::Officer)
            .with_type(CardType::Follower);

        assert_eq!(deck.random_requested_card(&query, &arena, &mut rng, false), Some(a));
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.random_requested_card(&query, &arena, &mut rng, true), Some(a));
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.random_requested_card(&query, &arena, &mut rng, true), None);
    }
}
