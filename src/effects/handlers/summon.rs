//! Opcodes that put new followers onto the field.

use log::debug;

use crate::cards::CardType;
use crate::effects::context::EffectScope;
use crate::effects::opcode::Opcode;
use crate::effects::registry::{OpcodeHandler, OpcodeRegistry};
use crate::effects::targeting::TargetKind;
use crate::error::Result;
use crate::zones::CardQuery;

use super::{applied, card_of, done, gated, request};

pub(super) fn register(registry: &mut OpcodeRegistry) {
    registry.register(
        "SUMFOL",
        OpcodeHandler::immediate(
            |s, op| {
                summon_all(s, op.args_from(1))?;
                done()
            },
            |op, _| Ok(format!("Summon {}", names_text(op.args_from(1)))),
        ),
    );
    registry.register(
        "SUMFOLCOND",
        OpcodeHandler::immediate(
            |s, op| {
                let (names, condition) = names_and_condition(op)?;
                if !s.check(condition)? {
                    return applied(false);
                }
                summon_all(s, names.into_iter())?;
                done()
            },
            |op, _| {
                let (names, _) = names_and_condition(op)?;
                gated(op, op.arg_count(), &format!("summon {}", names_text(names.into_iter())))
            },
        ),
    );
    registry.register(
        "SUMMULFOL",
        OpcodeHandler::immediate(
            |s, op| {
                let name = op.arg(1)?;
                for _ in 0..op.count(2)? {
                    s.summon(name)?;
                }
                done()
            },
            |op, _| Ok(format!("Summon {} {}", op.count(2)?, op.arg(1)?)),
        ),
    );
    registry.register(
        "SUMFOLBSTNUM",
        OpcodeHandler::immediate(
            |s, op| {
                let name = op.arg(1)?;
                let copies = 1 + s.source_card()?.boost_amount()?;
                for _ in 0..copies {
                    s.summon(name)?;
                }
                done()
            },
            |op, card| {
                Ok(format!(
                    "Summon {} {}.\nSpellboost: summon 1 more",
                    1 + card.boost_amount()?,
                    op.arg(1)?
                ))
            },
        ),
    );
    registry.register(
        "SUMFOLCOMETR",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyCommanderEntrance),
            |s, op, _| summon_all(s, op.args_from(1)),
            |op, _| {
                Ok(format!(
                    "Whenever an allied Commander comes into play, summon {}",
                    names_text(op.args_from(1))
                ))
            },
        ),
    );
    registry.register(
        "SUMEFXFOL",
        OpcodeHandler::immediate(
            |s, op| {
                let id = s.create(op.arg(1)?)?;
                s.state.arena.follower_mut(id)?.grant(op.keyword(2)?);
                s.place_on_field(s.owner, id)?;
                done()
            },
            |op, _| Ok(format!("Summon a {} with {:?}", op.arg(1)?, op.keyword(2)?)),
        ),
    );
    registry.register(
        "SUMFULFLDFOL",
        OpcodeHandler::immediate(
            |s, op| {
                let name = op.arg(1)?;
                let limit = s.state.config.summon_fill_limit;
                while s.me().field().len() < limit {
                    if !s.summon(name)? {
                        break;
                    }
                }
                done()
            },
            |op, _| Ok(format!("Summon {} until your field is full", op.arg(1)?)),
        ),
    );
    registry.register(
        "SUMCSTDEKFOL",
        OpcodeHandler::immediate(
            |s, op| {
                summon_from_deck(s, op)?;
                done()
            },
            |op, _| {
                let max = op.int(1)?;
                let min = op.optional_arg(2).map_or(Ok(max), |_| op.int(2))?;
                Ok(if min == max {
                    format!("Summon a random {}-cost follower from your deck", max)
                } else {
                    format!("Summon a random follower costing {} to {} from your deck", min, max)
                })
            },
        ),
    );
    registry.register(
        "KILENEFOLSUMFOLCOND",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            |s, op, t| {
                if s.check(op.arg(2)?)? {
                    s.summon(op.arg(1)?)?;
                }
                s.destroy(card_of(t)?)
            },
            |op, _| {
                Ok(format!(
                    "Destroy an enemy follower. {}",
                    gated(op, 2, &format!("summon a {}", op.arg(1)?))?
                ))
            },
        ),
    );
}

fn summon_all<'a>(scope: &mut EffectScope<'_>, names: impl Iterator<Item = &'a str>) -> Result<()> {
    for name in names {
        scope.summon(name)?;
    }
    Ok(())
}

/// Every argument but the last names a card; the last is the condition.
fn names_and_condition(op: &Opcode) -> Result<(Vec<&str>, &str)> {
    let condition = op.arg(op.arg_count().max(2))?;
    let names = op.args_from(1).take(op.arg_count() - 1).collect();
    Ok((names, condition))
}

fn names_text<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(", ")
}

/// Move a random follower in the cost window from the deck to the field.
fn summon_from_deck(scope: &mut EffectScope<'_>, op: &Opcode) -> Result<()> {
    let max = op.int(1)?;
    let min = op.optional_arg(2).map_or(Ok(max), |_| op.int(2))?;
    let query = CardQuery::cost_between(min, max).with_type(CardType::Follower);

    let owner = scope.owner;
    let state = &mut *scope.state;
    let found = state.players[owner].deck_mut().random_requested_card(
        &query,
        &state.arena,
        &mut state.rng,
        true,
    );
    match found {
        Some(id) => {
            scope.place_on_field(owner, id)?;
        }
        None => debug!("{}: no follower costing {}..={} in deck", owner, min, max),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixture::{Table, FOE, ME};
    use crate::cards::AttackStatus;
    use crate::effects::registry::Outcome;
    use crate::effects::targeting::{Target, TargetKind};

    #[test]
    fn test_summon_each_name() {
        let mut table = Table::new();
        table.run("SUMFOL@Goblin@Brute");
        assert_eq!(table.field_names(ME), ["Caster", "Goblin", "Brute"]);
    }

    #[test]
    fn test_conditional_summon() {
        let mut table = Table::new();

        assert_eq!(table.run("SUMFOLCOND@Goblin@Brute@0"), Outcome::Fail);
        assert_eq!(table.field_names(ME), ["Caster"]);

        assert_eq!(table.run("SUMFOLCOND@Goblin@1"), Outcome::Done);
        assert_eq!(table.field_names(ME), ["Caster", "Goblin"]);
    }

    #[test]
    fn test_fill_field_stops_at_limit() {
        let mut table = Table::new();
        table.run("SUMFULFLDFOL@Goblin");
        assert_eq!(table.player(ME).field().len(), table.state.config.summon_fill_limit);
    }

    #[test]
    fn test_multiple_summons_stop_at_capacity() {
        let mut table = Table::new();
        let before = table.state.arena.len();

        assert_eq!(table.run("SUMMULFOL@Goblin@9"), Outcome::Done);

        assert_eq!(table.player(ME).field().len(), table.state.config.field_capacity);
        // copies that did not fit are still registered
        assert_eq!(table.state.arena.len(), before + 9);
    }

    #[test]
    fn test_summon_from_deck_by_cost() {
        let mut table = Table::new();
        table.stack_deck(ME, &["Goblin", "Brute", "Bolt"]);

        table.run("SUMCSTDEKFOL@3");

        assert_eq!(table.field_names(ME), ["Caster", "Brute"]);
        let mut deck = table.deck_names(ME);
        deck.sort();
        assert_eq!(deck, ["Bolt", "Goblin"]);
    }

    #[test]
    fn test_summon_from_deck_without_match() {
        let mut table = Table::new();
        table.stack_deck(ME, &["Goblin", "Brute", "Bolt"]);

        assert_eq!(table.run("SUMCSTDEKFOL@5@4"), Outcome::Done);

        assert_eq!(table.field_names(ME), ["Caster"]);
        assert_eq!(table.player(ME).deck().len(), 3);
    }

    #[test]
    fn test_spellboost_summons_more() {
        let mut table = Table::new();
        let surge = table.create("Surge");
        for _ in 0..2 {
            table.state.arena.get_mut(surge).unwrap().boost().unwrap();
        }

        table.run_from(surge, "SUMFOLBSTNUM@Goblin");

        assert_eq!(table.field_names(ME), ["Caster", "Goblin", "Goblin", "Goblin"]);
    }

    #[test]
    fn test_summon_with_keyword() {
        let mut table = Table::new();
        table.run("SUMEFXFOL@Goblin@STORM");

        let goblin = table.player(ME).field().iter().last().unwrap();
        assert_eq!(table.follower(goblin).status(), AttackStatus::Storm);
    }

    #[test]
    fn test_destroy_then_maybe_summon() {
        let mut table = Table::new();
        let veteran = table.summon(FOE, "Veteran");

        assert_eq!(
            table.run("KILENEFOLSUMFOLCOND@Brute@0"),
            Outcome::NeedsTarget(TargetKind::EnemyFollower)
        );
        table.choose(Target::card(FOE, veteran));

        assert!(!table.state.arena.is_alive(veteran));
        assert_eq!(table.field_names(ME), ["Caster"]);
    }

    #[test]
    fn test_describe_cost_window() {
        let table = Table::new();
        let caster = table.state.arena.get(table.caster).unwrap();
        assert_eq!(
            table.interpreter.describe("SUMCSTDEKFOL@5@4", caster).unwrap(),
            "Summon a random follower costing 4 to 5 from your deck"
        );
    }
}
