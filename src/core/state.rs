//! Game state: the card arena plus both players.
//!
//! ## CardArena
//!
//! Owns every card instance created during a game, keyed by [`EntityId`].
//! Zones only hold ids. A card that leaves every zone (banished, replaced,
//! returned as a fresh copy) stays in the arena so that an effect still
//! resolving on its behalf can read it; it is simply unreachable from play.
//!
//! ## GameState
//!
//! Everything the effect interpreter and rules mutate: arena, players,
//! RNG, rules configuration and the game outcome. Once `outcome` is set the
//! game is over and the orchestration layer rejects further mutation.

use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::config::RulesConfig;
use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{Amulet, Card, Follower};
use crate::error::{Result, RulesError};
use crate::player::Player;
use crate::rules::GameResult;

/// Storage for every card instance in a game.
///
/// Nothing is ever removed, so the arena grows by one entry per card
/// created: the starting decks plus every card an effect summons, puts
/// into a hand or returns as a fresh copy. Over a game that is a few
/// hundred entries at most.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CardArena {
    cards: FxHashMap<EntityId, Card>,
    next_id: EntityId,
}

impl CardArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a card and hand out its id.
    pub fn insert(&mut self, card: Card) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        self.cards.insert(id, card);
        id
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Result<&Card> {
        self.cards.get(&id).ok_or(RulesError::MissingCard(id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Card> {
        self.cards.get_mut(&id).ok_or(RulesError::MissingCard(id))
    }

    /// Look up a card without treating absence as an error.
    #[must_use]
    pub fn try_get(&self, id: EntityId) -> Option<&Card> {
        self.cards.get(&id)
    }

    pub fn follower(&self, id: EntityId) -> Result<&Follower> {
        self.get(id)?.follower()
    }

    pub fn follower_mut(&mut self, id: EntityId) -> Result<&mut Follower> {
        self.get_mut(id)?.follower_mut()
    }

    pub fn amulet_mut(&mut self, id: EntityId) -> Result<&mut Amulet> {
        self.get_mut(id)?.amulet_mut()
    }

    /// Follower state if `id` is a follower.
    #[must_use]
    pub fn as_follower(&self, id: EntityId) -> Option<&Follower> {
        self.try_get(id).and_then(Card::as_follower)
    }

    /// Follower state if `id` is a living follower.
    #[must_use]
    pub fn living_follower(&self, id: EntityId) -> Option<&Follower> {
        self.as_follower(id).filter(|f| f.is_alive())
    }

    #[must_use]
    pub fn is_alive(&self, id: EntityId) -> bool {
        self.try_get(id).is_some_and(Card::is_alive)
    }
}

/// Complete mutable game state.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: RulesConfig,
    pub arena: CardArena,
    pub players: PlayerMap<Player>,
    pub rng: GameRng,
    /// Player whose round it is.
    pub current: PlayerId,
    outcome: Option<GameResult>,
}

impl GameState {
    /// Assemble a state from two prepared players.
    #[must_use]
    pub fn new(config: RulesConfig, arena: CardArena, players: PlayerMap<Player>, rng: GameRng) -> Self {
        Self {
            config,
            arena,
            players,
            rng,
            current: PlayerId::FIRST,
            outcome: None,
        }
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    // === Outcome ===

    /// Record the winner. The first recorded result stands.
    pub fn end_game(&mut self, winner: PlayerId) {
        if self.outcome.is_none() {
            info!("game over: {} wins", winner);
            self.outcome = Some(GameResult::Winner(winner));
        }
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameResult> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.outcome {
            Some(GameResult::Winner(p)) => Some(p),
            None => None,
        }
    }

    // === Lookup ===

    /// Which player's field holds `id`, if any.
    #[must_use]
    pub fn field_owner(&self, id: EntityId) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.field().contains(id))
            .map(|(pid, _)| pid)
    }

    /// Draw `amount` cards for `player`. An empty deck ends the game in the
    /// opponent's favour and returns false.
    pub fn draw_or_lose(&mut self, player: PlayerId, amount: usize) -> bool {
        let drew = self.players[player].draw_cards(amount);
        if !drew {
            info!("{} cannot draw from an empty deck", player);
            self.end_game(player.opponent());
        }
        drew
    }
}
