//! # shadow-rules
//!
//! Rules engine for a two-player, turn-based collectible card game.
//!
//! ## Design Principles
//!
//! 1. **Cards are data**: abilities are opcode strings (`TAG@arg@arg`)
//!    interpreted at runtime through a tag-keyed handler registry.
//!
//! 2. **Suspend, never block**: an effect that needs a choice returns
//!    `NeedsTarget` and waits in a single pending slot until the
//!    orchestration layer hands back a selection.
//!
//! 3. **Stable handles**: every card instance lives in an arena and zones
//!    hold ids, so two copies of the same card are never confused.
//!
//! ## Architecture
//!
//! - **Deterministic**: all randomness comes from a seeded ChaCha8
//!   [`GameRng`], so a game replays exactly from its seed.
//!
//! - **Persistent zones**: zone contents are `im-rs` vectors, making the
//!   defensive snapshots taken before trigger sweeps O(1).
//!
//! ## Modules
//!
//! - `core`: entity ids, players, RNG, rules configuration, game state
//! - `cards`: card definitions, instances, followers, amulets, leaders
//! - `zones`: deck, hand, field and grave
//! - `player`: one side of the game and its round counters
//! - `effects`: opcode interpreter, conditions, variables, target kinds
//! - `resolution`: deferred effects and pending selections
//! - `rules`: the `Game` orchestration layer: play, combat, rounds

pub mod core;
pub mod cards;
pub mod zones;
pub mod player;
pub mod effects;
pub mod resolution;
pub mod rules;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    CardArena, EntityId, GameRng, GameState, PlayerId, PlayerMap, RoundOrder, RulesConfig,
};

pub use crate::cards::{
    Amulet, AttackStatus, Card, CardDefinition, CardFactory, CardKind, CardRegistry, CardType, CraftTrait,
    Follower, FollowerTemplate, Keyword, Leader, LeaderClass, Rarity, TriggerSlot, Triggers,
};

pub use crate::zones::{CardQuery, Deck, DeckPreset, Field, Grave, Hand};

pub use crate::player::Player;

pub use crate::effects::{
    Condition, Interpreter, Opcode, OpcodeHandler, OpcodeRegistry, Outcome, PendingEffect, Target, TargetKind,
    Variable,
};

pub use crate::resolution::{EffectQueue, QueuedEffect, ResolutionStatus, Selection};

pub use crate::rules::{
    AttackTarget, DeckList, Game, GameBuilder, GameResult, NullPresenter, Presenter, RecordingPresenter,
};

pub use crate::error::{ErrorKind, Result, RulesError};
