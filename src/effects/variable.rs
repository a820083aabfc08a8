//! Variable sub-language.
//!
//! Some opcode arguments are computed at resolution time. A variable token
//! is either an integer literal or one of:
//!
//! - `FRIFOLONFLD`: living followers the owner controls
//! - `NEC?cost?boosted?base`: `boosted` if `cost` necromancy is spent, else `base`
//! - `HND`: cards in the owner's hand
//! - `ENELEDONE`: damage that would leave the enemy leader at 1 health
//! - `USDCRD`: cards the owner played this round
//! - `ORGATK`: the source follower's printed attack (evolved value once evolved)
//! - `COND?name?arg?else?then`: `then` if condition `name?arg` holds, else `else`
//! - `FRIOFFONFLD`: Officer followers the owner controls
//! - `ENEFOL`: living followers the opponent controls

use crate::cards::CraftTrait;
use crate::error::{Result, RulesError};

use super::condition::{Condition, PART_SEPARATOR};
use super::context::EffectScope;

/// A parsed variable token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Variable {
    Literal(i32),
    FriendlyFollowers,
    Necromancy { cost: u32, boosted: i32, base: i32 },
    Hand,
    EnemyLeaderToOne,
    UsedCards,
    OriginalAttack,
    Conditional {
        condition: Condition,
        otherwise: i32,
        then: i32,
    },
    FriendlyOfficers,
    EnemyFollowers,
}

impl Variable {
    pub fn parse(token: &str) -> Result<Self> {
        if let Ok(value) = token.parse::<i32>() {
            return Ok(Variable::Literal(value));
        }

        let parts: Vec<&str> = token.split(PART_SEPARATOR).collect();
        let malformed = || RulesError::UnknownVariable(token.to_string());
        let number = |index: usize| -> Result<i32> {
            parts
                .get(index)
                .and_then(|p| p.parse().ok())
                .ok_or_else(malformed)
        };

        Ok(match parts[0] {
            "FRIFOLONFLD" => Variable::FriendlyFollowers,
            "NEC" => Variable::Necromancy {
                cost: u32::try_from(number(1)?).map_err(|_| malformed())?,
                boosted: number(2)?,
                base: number(3)?,
            },
            "HND" => Variable::Hand,
            "ENELEDONE" => Variable::EnemyLeaderToOne,
            "USDCRD" => Variable::UsedCards,
            "ORGATK" => Variable::OriginalAttack,
            "COND" => {
                let name = parts.get(1).ok_or_else(malformed)?;
                let arg = parts.get(2).ok_or_else(malformed)?;
                Variable::Conditional {
                    condition: Condition::parse(&format!("{}{}{}", name, PART_SEPARATOR, arg))?,
                    otherwise: number(3)?,
                    then: number(4)?,
                }
            }
            "FRIOFFONFLD" => Variable::FriendlyOfficers,
            "ENEFOL" => Variable::EnemyFollowers,
            _ => return Err(malformed()),
        })
    }

    /// Current value. `Necromancy` and conditional necromancy spend on success.
    pub fn evaluate(&self, scope: &mut EffectScope<'_>) -> Result<i32> {
        Ok(match self {
            Variable::Literal(value) => *value,
            Variable::FriendlyFollowers => count(scope.me().field().follower_count(&scope.state.arena)),
            Variable::Necromancy { cost, boosted, base } => {
                if scope.me_mut().grave_mut().use_necromancy(*cost) {
                    *boosted
                } else {
                    *base
                }
            }
            Variable::Hand => count(scope.me().hand().len()),
            Variable::EnemyLeaderToOne => scope.foe().leader().health() - 1,
            Variable::UsedCards => scope.me().used_card_count() as i32,
            Variable::OriginalAttack => match scope.source_card()?.as_follower() {
                Some(f) if f.has_evolved() => f.original_evolved_attack(),
                Some(f) => f.original_attack(),
                None => 0,
            },
            Variable::Conditional {
                condition,
                otherwise,
                then,
            } => {
                if condition.evaluate(scope)? {
                    *then
                } else {
                    *otherwise
                }
            }
            Variable::FriendlyOfficers => {
                count(scope.me().field().count_trait(&scope.state.arena, CraftTrait::Officer))
            }
            Variable::EnemyFollowers => count(scope.foe().field().follower_count(&scope.state.arena)),
        })
    }

    /// Card-text rendering.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Variable::Literal(value) => value.to_string(),
            Variable::FriendlyFollowers => "the number of allied followers in play".to_string(),
            Variable::Necromancy { cost, boosted, base } => {
                format!("{}. Necromancy {}: {} instead", base, cost, boosted)
            }
            Variable::Hand => "the number of cards in your hand".to_string(),
            Variable::EnemyLeaderToOne => "enough to leave the enemy leader at 1 health".to_string(),
            Variable::UsedCards => "the number of cards played this round".to_string(),
            Variable::OriginalAttack => "this follower's printed attack".to_string(),
            Variable::Conditional {
                condition,
                otherwise,
                then,
            } => format!("{}{}, else {}", condition.describe(), then, otherwise),
            Variable::FriendlyOfficers => "the number of allied Officer followers in play".to_string(),
            Variable::EnemyFollowers => "the number of enemy followers in play".to_string(),
        }
    }
}

fn count(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_literal_and_names() {
        assert_eq!(Variable::parse("3").unwrap(), Variable::Literal(3));
        assert_eq!(Variable::parse("-2").unwrap(), Variable::Literal(-2));
        assert_eq!(Variable::parse("HND").unwrap(), Variable::Hand);
        assert_eq!(
            Variable::parse("NEC?2?4?1").unwrap(),
            Variable::Necromancy {
                cost: 2,
                boosted: 4,
                base: 1
            }
        );
    }

    #[test]
    fn test_parse_conditional() {
        let var = Variable::parse("COND?USDCRD?2?1?3").unwrap();
        assert_eq!(
            var,
            Variable::Conditional {
                condition: Condition::UsedCards(2),
                otherwise: 1,
                then: 3
            }
        );
        assert_eq!(
            var.describe(),
            "If at least 2 other cards were played this round, 3, else 1"
        );
    }

    #[test]
    fn test_unknown_variable_is_fatal() {
        let err = Variable::parse("MOON").unwrap_err();
        assert_eq!(err, RulesError::UnknownVariable("MOON".into()));
        assert!(Variable::parse("NEC?2").is_err());
        assert!(Variable::parse("COND?SUNNY?1?0?1").is_err());
    }
}
