//! Error types for the rules engine.
//!
//! Every variant falls into one of two classes (see [`ErrorKind`]):
//!
//! - **Configuration**: the card data itself is malformed (unknown opcode,
//!   missing argument, opcode applied to the wrong card variant). These abort
//!   the current operation; there is no sensible way to continue.
//! - **Invalid operation**: a well-formed request that the current game state
//!   does not allow. State is left unchanged and the caller may retry.
//!
//! Running out of targets and the end of the game are *not* errors. The
//! former discards the pending effect, the latter is reported through
//! [`GameResult`](crate::rules::GameResult).

use thiserror::Error;

use crate::cards::CardType;
use crate::core::EntityId;

/// Broad classification of a [`RulesError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed card or effect data.
    Configuration,
    /// Request rejected by the current game state.
    InvalidOperation,
}

/// Errors produced by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    // === Configuration ===
    #[error("unknown opcode: {0}")]
    UnknownOpcode(String),
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
    #[error("unknown variable: {0}")]
    UnknownVariable(String),
    #[error("unknown keyword: {0}")]
    UnknownKeyword(String),
    #[error("unknown trigger key: {0}")]
    UnknownTriggerKey(String),
    #[error("unknown card: {0}")]
    UnknownCard(String),
    #[error("unknown deck preset: {0}")]
    UnknownDeck(String),
    #[error("opcode {tag} is missing argument {index}")]
    MissingArgument { tag: String, index: usize },
    #[error("opcode {tag} argument {index} is not a number: {value}")]
    MalformedArgument {
        tag: String,
        index: usize,
        value: String,
    },
    #[error("{card} is not a {expected:?}")]
    WrongCardKind { card: String, expected: CardType },
    #[error("{0} does not allow its effect to change")]
    EffectNotChangeable(String),
    #[error("a spell cannot be placed on the field: {0}")]
    SpellOnField(String),
    #[error("invalid rules configuration: {0}")]
    InvalidConfig(String),

    // === Invalid operations ===
    #[error("amulet has no countdown")]
    NotCountdown,
    #[error("follower has already evolved")]
    AlreadyEvolved,
    #[error("{0} has no spellboost")]
    NotSpellBoost(String),
    #[error("{0} reduces its cost instead of counting boosts")]
    BoostCostCard(String),
    #[error("cost {0} is outside the allowed range")]
    CostOutOfRange(i32),
    #[error("not enough cost: needs {needed}, {left} left")]
    NotEnoughCost { needed: i32, left: i32 },
    #[error("{0} is not in hand")]
    CardNotInHand(EntityId),
    #[error("{0} is not on the field")]
    CardNotOnField(EntityId),
    #[error("card {0} does not exist")]
    MissingCard(EntityId),
    #[error("the field is full")]
    FieldFull,
    #[error("overflow only applies to Dragoncraft")]
    NoOverflow,
    #[error("vengeance only applies to Bloodcraft")]
    NoVengeance,
    #[error("evolve is locked for {rounds_left} more round(s)")]
    EvolveLocked { rounds_left: u32 },
    #[error("only one evolve per round is allowed")]
    EvolveUsed,
    #[error("no evolve points left")]
    NoEvolvePoints,
    #[error("attacker cannot attack under its current status")]
    CannotAttack,
    #[error("illegal attack target")]
    IllegalAttackTarget,
    #[error("target is not eligible for the pending effect")]
    IneligibleTarget,
    #[error("no attack has been declared")]
    NoAttackDeclared,
    #[error("it is not this player's round")]
    NotActivePlayer,
    #[error("an effect is already waiting for a target")]
    EffectPending,
    #[error("no effect is waiting for a target")]
    NoPendingEffect,
    #[error("the game has already ended")]
    GameOver,
}

impl RulesError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        use RulesError::*;
        match self {
            UnknownOpcode(_)
            | UnknownCondition(_)
            | UnknownVariable(_)
            | UnknownKeyword(_)
            | UnknownTriggerKey(_)
            | UnknownCard(_)
            | UnknownDeck(_)
            | MissingArgument { .. }
            | MalformedArgument { .. }
            | WrongCardKind { .. }
            | EffectNotChangeable(_)
            | SpellOnField(_)
            | InvalidConfig(_) => ErrorKind::Configuration,
            _ => ErrorKind::InvalidOperation,
        }
    }

    /// Check if this error indicates malformed card data.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert!(RulesError::UnknownOpcode("XYZ".into()).is_configuration());
        assert!(RulesError::WrongCardKind {
            card: "Fairy".into(),
            expected: CardType::Amulet
        }
        .is_configuration());
        assert_eq!(RulesError::FieldFull.kind(), ErrorKind::InvalidOperation);
        assert_eq!(RulesError::GameOver.kind(), ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_display() {
        let err = RulesError::NotEnoughCost { needed: 4, left: 2 };
        assert_eq!(err.to_string(), "not enough cost: needs 4, 2 left");
        let err = RulesError::MissingArgument {
            tag: "DRWCRD".into(),
            index: 1,
        };
        assert_eq!(err.to_string(), "opcode DRWCRD is missing argument 1");
    }
}
