//! Condition sub-language.
//!
//! Conditions gate part or all of an opcode. They are written
//! `NAME?arg?arg` inside an opcode argument:
//!
//! | Token          | Holds when                                              |
//! |----------------|---------------------------------------------------------|
//! | `USDCRD?n`     | the owner played at least `n` cards this round          |
//! | `OVRFLW`       | the owner is a Dragoncraft leader in overflow           |
//! | `ATKED`        | the source follower has attacked this round             |
//! | `NEC?n`        | `n` necromancy can be spent (and is spent)              |
//! | `VENG`         | the owner is a Bloodcraft leader in vengeance           |
//! | `GRAVE?n`      | the owner's grave holds at least `n` cards              |
//! | `CONATK?n`     | the owner controls a follower with exactly `n` attack   |
//! | `COMFLD`       | the owner controls a Commander                          |
//! | `ACTIVATED`    | the source card's effect toggle is still set            |
//! | `ENEFOL?n`     | the opponent controls at least `n` living followers     |
//! | `CST?n?name`   | the printed cost of `name` is at most `n`               |
//!
//! A bare integer is also accepted and holds when non-zero.
//!
//! `NEC` is the only condition with a side effect: evaluating it spends
//! the necromancy when it succeeds. [`Condition::describe`] never
//! evaluates, so rendering card text is free.

use crate::cards::{AttackStatus, CraftTrait};
use crate::error::{Result, RulesError};

use super::context::EffectScope;

/// Separator between a condition or variable name and its arguments.
pub const PART_SEPARATOR: char = '?';

/// A parsed condition token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Condition {
    UsedCards(u32),
    Overflow,
    Attacked,
    Necromancy(u32),
    Vengeance,
    Grave(usize),
    ControlAttack(i32),
    CommanderOnField,
    Activated,
    EnemyFollowers(usize),
    CostAtMost { cost: i32, card: String },
    Literal(i32),
}

impl Condition {
    pub fn parse(token: &str) -> Result<Self> {
        if let Ok(value) = token.parse::<i32>() {
            return Ok(Condition::Literal(value));
        }

        let parts: Vec<&str> = token.split(PART_SEPARATOR).collect();
        let number = |index: usize| -> Result<i64> {
            parts
                .get(index)
                .and_then(|p| p.parse().ok())
                .ok_or_else(|| RulesError::UnknownCondition(token.to_string()))
        };

        Ok(match parts[0] {
            "USDCRD" => Condition::UsedCards(to_unsigned(number(1)?, token)?),
            "OVRFLW" => Condition::Overflow,
            "ATKED" => Condition::Attacked,
            "NEC" => Condition::Necromancy(to_unsigned(number(1)?, token)?),
            "VENG" => Condition::Vengeance,
            "GRAVE" => Condition::Grave(to_unsigned(number(1)?, token)? as usize),
            "CONATK" => Condition::ControlAttack(to_signed(number(1)?, token)?),
            "COMFLD" => Condition::CommanderOnField,
            "ACTIVATED" => Condition::Activated,
            "ENEFOL" => Condition::EnemyFollowers(to_unsigned(number(1)?, token)? as usize),
            "CST" => Condition::CostAtMost {
                cost: to_signed(number(1)?, token)?,
                card: parts
                    .get(2)
                    .map(|s| s.to_string())
                    .ok_or_else(|| RulesError::UnknownCondition(token.to_string()))?,
            },
            _ => return Err(RulesError::UnknownCondition(token.to_string())),
        })
    }

    /// Evaluate against live state. `Necromancy` spends on success.
    pub fn evaluate(&self, scope: &mut EffectScope<'_>) -> Result<bool> {
        Ok(match self {
            Condition::UsedCards(n) => scope.me().used_card_count() >= *n,
            Condition::Overflow => matches!(scope.me().is_overflow(&scope.state.config), Ok(true)),
            Condition::Attacked => {
                scope.source_card()?.follower()?.status() == AttackStatus::Attacked
            }
            Condition::Necromancy(n) => scope.me_mut().grave_mut().use_necromancy(*n),
            Condition::Vengeance => matches!(scope.me().is_vengeance(&scope.state.config), Ok(true)),
            Condition::Grave(n) => scope.me().grave().len() >= *n,
            Condition::ControlAttack(attack) => scope
                .me()
                .field()
                .followers(&scope.state.arena)
                .any(|(_, f)| f.attack() == *attack),
            Condition::CommanderOnField => scope
                .me()
                .field()
                .has_trait_follower(&scope.state.arena, CraftTrait::Commander),
            Condition::Activated => scope.source_card()?.effect_toggle(),
            Condition::EnemyFollowers(n) => scope.foe().field().follower_count(&scope.state.arena) >= *n,
            Condition::CostAtMost { cost, card } => scope.cards.base_cost(card)? <= *cost,
            Condition::Literal(value) => *value != 0,
        })
    }

    /// Card-text prefix for this condition.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Condition::UsedCards(n) => format!("If at least {} other cards were played this round, ", n),
            Condition::Overflow => "If Overflow is active, ".to_string(),
            Condition::Attacked => "If this follower has attacked this round, ".to_string(),
            Condition::Necromancy(n) => format!("Necromancy {}: ", n),
            Condition::Vengeance => "If Vengeance is active, ".to_string(),
            Condition::Grave(n) => format!("If you have at least {} cards in your grave, ", n),
            Condition::ControlAttack(n) => format!("If you have a follower with {} attack in play, ", n),
            Condition::CommanderOnField => "If an allied Commander is in play, ".to_string(),
            Condition::Activated => "If this card's other effect has not activated this round, ".to_string(),
            Condition::EnemyFollowers(n) => {
                format!("If there are at least {} enemy followers in play, ", n)
            }
            Condition::CostAtMost { cost, .. } => {
                format!("If the follower's cost is {} or less, ", cost)
            }
            Condition::Literal(_) => String::new(),
        }
    }
}

fn to_unsigned(value: i64, token: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| RulesError::UnknownCondition(token.to_string()))
}

fn to_signed(value: i64, token: &str) -> Result<i32> {
    i32::try_from(value).map_err(|_| RulesError::UnknownCondition(token.to_string()))
}
