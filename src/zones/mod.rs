//! Zone containers for card locations.
//!
//! Each player owns one of each zone. Zones hold [`EntityId`] handles into
//! the game's [`CardArena`]; the arena owns the cards themselves.
//!
//! ## Key Types
//!
//! - `CardList`: ordered handle list shared by every zone
//! - `Hand`: bounded, rejects additions past capacity
//! - `Deck`: draws from the front, reshuffles on insertion
//! - `Field`: bounded, followers and amulets only
//! - `Grave`: unbounded, tracks necromancy
//!
//! [`EntityId`]: crate::core::EntityId
//! [`CardArena`]: crate::core::CardArena

pub mod list;
pub mod hand;
pub mod deck;
pub mod field;
pub mod grave;

pub use list::CardList;
pub use hand::Hand;
pub use deck::{CardQuery, Deck, DeckPreset};
pub use field::Field;
pub use grave::Grave;
