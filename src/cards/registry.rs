//! Card registry and the card factory seam.
//!
//! The rules engine never builds cards from text itself. It asks a
//! [`CardFactory`] for a fresh instance by name, every time, and never
//! assumes two requests for the same name share state. `CardRegistry` is
//! the stock factory: a name-keyed table of [`CardDefinition`]s.

use rustc_hash::FxHashMap;

use super::definition::CardDefinition;
use super::instance::Card;
use crate::error::{Result, RulesError};

/// Produces independent card instances by name.
pub trait CardFactory {
    /// Build a new instance of the named card.
    fn create(&self, name: &str) -> Result<Card>;

    /// Printed cost of the named card.
    fn base_cost(&self, name: &str) -> Result<i32> {
        Ok(self.create(name)?.original_cost())
    }
}

/// Registry of card definitions, keyed by card name.
///
/// ## Example
///
/// ```
/// use shadow_rules::cards::{CardDefinition, CardFactory, CardRegistry, FollowerTemplate, LeaderClass};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::follower(
///     "Goblin",
///     1,
///     LeaderClass::Neutral,
///     FollowerTemplate::new(1, 2),
/// ));
///
/// let a = registry.create("Goblin").unwrap();
/// let b = registry.create("Goblin").unwrap();
/// assert_eq!(a, b);
/// assert!(registry.create("Dragon").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, CardDefinition>,
}

impl CardRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition, returning any definition it replaces.
    pub fn register(&mut self, card: CardDefinition) -> Option<CardDefinition> {
        self.cards.insert(card.name.clone(), card)
    }

    /// Register several definitions (builder pattern).
    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = CardDefinition>) -> Self {
        for card in cards {
            self.register(card);
        }
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CardDefinition> {
        self.cards.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Find definitions matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &CardDefinition>
    where
        F: Fn(&CardDefinition) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

impl CardFactory for CardRegistry {
    fn create(&self, name: &str) -> Result<Card> {
        self.get(name)
            .map(Card::from_definition)
            .ok_or_else(|| RulesError::UnknownCard(name.to_string()))
    }

    fn base_cost(&self, name: &str) -> Result<i32> {
        self.get(name)
            .map(|def| def.cost)
            .ok_or_else(|| RulesError::UnknownCard(name.to_string()))
    }
}
