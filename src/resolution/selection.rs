//! What the next player selection is for.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::effects::TargetKind;

/// An attack waiting for its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeclaredAttack {
    pub player: PlayerId,
    pub attacker: EntityId,
}

/// Meaning of the next selection handed to the game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// No selection expected.
    #[default]
    Idle,
    /// A follower has been declared as an attacker.
    Attack(DeclaredAttack),
    /// A pending effect needs a target of this kind.
    Target(TargetKind),
}

impl Selection {
    #[must_use]
    pub const fn is_idle(self) -> bool {
        matches!(self, Selection::Idle)
    }

    /// The declared attack, if one is waiting.
    #[must_use]
    pub const fn attack(self) -> Option<DeclaredAttack> {
        match self {
            Selection::Attack(attack) => Some(attack),
            _ => None,
        }
    }
}
