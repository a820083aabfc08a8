//! Core engine types: entities, players, state, RNG, configuration.
//!
//! Everything above this module (zones, effects, rules) reads and mutates
//! game data through the types defined here.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod state;

pub use entity::EntityId;
pub use player::{PlayerId, PlayerMap, RoundOrder};
pub use rng::GameRng;
pub use config::RulesConfig;
pub use state::{CardArena, GameState};
