//! Card system: attributes, definitions, instances and the card factory.
//!
//! ## Key Types
//!
//! - `CardDefinition`: immutable printed card data and trigger text
//! - `Card`: runtime instance with a [`CardKind`] variant
//! - `Follower`, `Amulet`: variant battle state
//! - `Leader`: a player's avatar
//! - `CardFactory`: builds fresh instances by name; `CardRegistry` is the
//!   stock implementation

pub mod attributes;
pub mod follower;
pub mod amulet;
pub mod leader;
pub mod definition;
pub mod instance;
pub mod registry;

pub use attributes::{AttackStatus, CardType, CraftTrait, Keyword, LeaderClass, Rarity};
pub use follower::{BuffRecord, Follower, FollowerTemplate};
pub use amulet::Amulet;
pub use leader::Leader;
pub use definition::{CardDefinition, TriggerSlot, Triggers, VariantTemplate};
pub use instance::{Card, CardKind, SpellBoost, MAX_CARD_COST, MIN_CARD_COST};
pub use registry::{CardFactory, CardRegistry};
