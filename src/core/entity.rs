//! Card instance handles.
//!
//! Every card instance in a game gets its own `EntityId` when it enters the
//! card arena. Two copies of the same card (same name) always have distinct
//! ids, and all zone membership and removal goes through the id, never the
//! name.
//!
//! ```
//! use shadow_rules::core::EntityId;
//!
//! let first = EntityId::new(7);
//! assert_ne!(first, first.next());
//! assert_eq!(first.to_string(), "card#7");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable handle for one card instance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The id the arena allocates after this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    #[cfg(test)]
    pub(crate) const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "card#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next() {
        assert_eq!(EntityId::new(41).next(), EntityId::new(42));
    }

    #[test]
    fn test_display() {
        assert_eq!(EntityId::new(42).to_string(), "card#42");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId::new(123);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "123");
        assert_eq!(serde_json::from_str::<EntityId>(&json).unwrap(), id);
    }
}
