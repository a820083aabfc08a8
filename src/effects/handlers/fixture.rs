//! Table for the handler tests: two seated players, a small card pool and
//! an interpreter driven directly, without the orchestration layer.
//!
//! Hands start empty and each deck holds ten Goblins. The first player
//! controls a Caster, which is the default source of every effect.

#![allow(dead_code)]

use crate::cards::{
    CardDefinition, CardFactory, CardRegistry, CraftTrait, Follower, FollowerTemplate, LeaderClass,
};
use crate::core::{CardArena, EntityId, GameRng, GameState, PlayerId, PlayerMap, RulesConfig};
use crate::effects::interpreter::Interpreter;
use crate::effects::registry::Outcome;
use crate::effects::targeting::Target;
use crate::error::Result;
use crate::player::Player;
use crate::zones::Deck;

pub const ME: PlayerId = PlayerId::FIRST;
pub const FOE: PlayerId = PlayerId::SECOND;

fn pool() -> CardRegistry {
    use LeaderClass::{Neutral, Swordcraft};

    CardRegistry::new().with_cards([
        CardDefinition::follower("Goblin", 1, Neutral, FollowerTemplate::new(1, 2)),
        CardDefinition::follower("Brute", 3, Neutral, FollowerTemplate::new(3, 2)),
        CardDefinition::follower("Veteran", 5, Neutral, FollowerTemplate::new(5, 5)),
        CardDefinition::follower("Caster", 2, Neutral, FollowerTemplate::new(2, 2).with_evolve(2, 2)),
        CardDefinition::follower(
            "Knight",
            1,
            Swordcraft,
            FollowerTemplate::new(1, 1).with_trait(CraftTrait::Commander),
        ),
        CardDefinition::follower(
            "Lieutenant",
            2,
            Swordcraft,
            FollowerTemplate::new(1, 2).with_trait(CraftTrait::Officer),
        ),
        CardDefinition::follower("Lucifer", 6, Neutral, FollowerTemplate::new(6, 7)),
        CardDefinition::amulet("Hourglass", 1, Neutral, 3),
        CardDefinition::amulet("Totem", 1, Neutral, 0),
        CardDefinition::spell("Bolt", 1, Neutral),
        CardDefinition::spell("Surge", 2, Neutral).with_spell_boost(),
        // APOCALYPSE deck list
        CardDefinition::follower("Servant_of_Darkness", 1, Neutral, FollowerTemplate::new(1, 1)),
        CardDefinition::follower("Silent_Rider", 2, Neutral, FollowerTemplate::new(2, 2)),
        CardDefinition::spell("Dis's_Damnation", 2, Neutral),
        CardDefinition::spell("Astaroth's_Reckoning", 10, Neutral),
    ])
}

pub struct Table {
    pub state: GameState,
    pub cards: CardRegistry,
    pub interpreter: Interpreter,
    pub caster: EntityId,
}

impl Table {
    pub fn new() -> Self {
        let config = RulesConfig::default();
        let cards = pool();
        let mut arena = CardArena::new();
        let mut rng = GameRng::new(11);

        let goblins = |arena: &mut CardArena| -> Vec<EntityId> {
            (0..10)
                .map(|_| arena.insert(cards.create("Goblin").unwrap()))
                .collect()
        };
        let first = Player::new(ME, LeaderClass::Runecraft, &config)
            .with_deck(Deck::from_cards(goblins(&mut arena), &mut rng));
        let second = Player::new(FOE, LeaderClass::Havencraft, &config)
            .with_deck(Deck::from_cards(goblins(&mut arena), &mut rng));
        let mut players = PlayerMap::from_pair(first, second);

        let caster = arena.insert(cards.create("Caster").unwrap());
        players[ME].field_mut().add(caster, &arena).unwrap();

        Self {
            state: GameState::new(config, arena, players, rng),
            cards,
            interpreter: Interpreter::default(),
            caster,
        }
    }

    // === Driving effects ===

    /// Process `text` for the first player with the Caster as source.
    pub fn run(&mut self, text: &str) -> Outcome {
        self.run_from(self.caster, text)
    }

    pub fn run_from(&mut self, source: EntityId, text: &str) -> Outcome {
        self.try_run(source, text).unwrap()
    }

    pub fn try_run(&mut self, source: EntityId, text: &str) -> Result<Outcome> {
        self.interpreter
            .process(&mut self.state, &self.cards, text, source, ME)
    }

    /// Finish the pending effect against `target`.
    pub fn choose(&mut self, target: Target) {
        assert!(self.interpreter.is_pending(), "nothing to choose for");
        self.interpreter
            .proceed(&mut self.state, &self.cards, target)
            .unwrap();
    }

    // === Setting up zones ===

    /// Register a fresh card in the arena without placing it.
    pub fn create(&mut self, name: &str) -> EntityId {
        let card = self.cards.create(name).unwrap();
        self.state.arena.insert(card)
    }

    pub fn summon(&mut self, player: PlayerId, name: &str) -> EntityId {
        let id = self.create(name);
        let GameState { arena, players, .. } = &mut self.state;
        assert!(players[player].field_mut().add(id, arena).unwrap(), "field is full");
        id
    }

    pub fn give(&mut self, player: PlayerId, name: &str) -> EntityId {
        let id = self.create(name);
        assert!(self.state.player_mut(player).hand_mut().add(id), "hand is full");
        id
    }

    /// Replace `player`'s deck with these cards, shuffled.
    pub fn stack_deck(&mut self, player: PlayerId, names: &[&str]) {
        let ids: Vec<_> = names.iter().map(|name| self.create(name)).collect();
        let GameState { players, rng, .. } = &mut self.state;
        *players[player].deck_mut() = Deck::from_cards(ids, rng);
    }

    // === Reading state ===

    pub fn player(&self, player: PlayerId) -> &Player {
        self.state.player(player)
    }

    pub fn follower(&self, id: EntityId) -> &Follower {
        self.state.arena.follower(id).unwrap()
    }

    pub fn stats(&self, id: EntityId) -> (i32, i32) {
        let follower = self.follower(id);
        (follower.attack(), follower.health())
    }

    pub fn leader_health(&self, player: PlayerId) -> i32 {
        self.player(player).leader().health()
    }

    pub fn on_field(&self, player: PlayerId, id: EntityId) -> bool {
        self.player(player).field().contains(id)
    }

    fn names(&self, ids: impl Iterator<Item = EntityId>) -> Vec<String> {
        ids.map(|id| self.state.arena.get(id).unwrap().name().to_string())
            .collect()
    }

    pub fn hand_names(&self, player: PlayerId) -> Vec<String> {
        self.names(self.player(player).hand().iter())
    }

    pub fn field_names(&self, player: PlayerId) -> Vec<String> {
        self.names(self.player(player).field().iter())
    }

    pub fn deck_names(&self, player: PlayerId) -> Vec<String> {
        self.names(self.player(player).deck().cards().iter())
    }
}
