//! Damage opcodes.

use crate::effects::context::EffectScope;
use crate::effects::opcode::Opcode;
use crate::effects::registry::{OpcodeHandler, OpcodeRegistry};
use crate::effects::targeting::{Target, TargetKind};
use crate::error::Result;

use super::{card_of, done, gated, request, request_if, times, var_text};

pub(super) fn register(registry: &mut OpcodeRegistry) {
    // === Single enemy follower ===

    registry.register(
        "DMGENEFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            |s, op, t| s.damage_target(t, op.int(1)?),
            |op, _| Ok(format!("Deal {} damage to an enemy follower", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGENEFOLCOND",
        OpcodeHandler::targeted(
            |s, op| request_if(s.check(op.arg(2)?)?, TargetKind::EnemyFollower),
            |s, op, t| s.damage_target(t, op.int(1)?),
            |op, _| gated(op, 2, &format!("deal {} damage to an enemy follower", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGENEFOLPUTFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            damage_and_put,
            |op, _| {
                Ok(format!(
                    "Deal {} damage to an enemy follower. Put {} {} into your hand",
                    op.int(1)?,
                    op.count(3)?,
                    op.arg(2)?
                ))
            },
        ),
    );
    registry.register(
        "DMGENEFOLVAR",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            |s, op, t| {
                let amount = s.value(op.arg(1)?)?;
                s.damage_target(t, amount)
            },
            |op, _| Ok(format!("Deal X damage to an enemy follower. X equals {}", var_text(op, 1)?)),
        ),
    );
    registry.register(
        "DMGENEFOLDRWCRD",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            |s, op, t| {
                if s.draw_own(op.count(2)?) {
                    s.damage_target(t, op.int(1)?)?;
                }
                Ok(())
            },
            |op, _| {
                Ok(format!(
                    "Deal {} damage to an enemy follower. Draw {} card(s)",
                    op.int(1)?,
                    op.count(2)?
                ))
            },
        ),
    );
    registry.register(
        "DMGENEFOLBSTDMG",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            |s, op, t| {
                let boost = s.source_card()?.boost_amount()? as i32;
                s.damage_target(t, op.int(1)? + boost)
            },
            |op, card| {
                Ok(format!(
                    "Deal {} damage to an enemy follower.\nSpellboost: deal 1 more",
                    op.int(1)? + card.boost_amount()? as i32
                ))
            },
        ),
    );
    registry.register(
        "DMGENEFOLHELSLFLED",
        OpcodeHandler::targeted(
            |s, op| {
                s.heal_own_leader(op.int(2)?);
                request(TargetKind::EnemyFollower)
            },
            |s, op, t| s.damage_target(t, op.int(1)?),
            |op, _| {
                Ok(format!(
                    "Deal {} damage to an enemy follower. Restore {} health to your leader",
                    op.int(1)?,
                    op.int(2)?
                ))
            },
        ),
    );
    registry.register(
        "DMGFIGENEFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FightingEnemy),
            |s, op, t| s.damage_target(t, op.int(1)?),
            |op, _| Ok(format!("Deal {} damage to the follower this follower fights", op.int(1)?)),
        ),
    );

    // === Enemy follower or leader ===

    registry.register(
        "DMGENETAR",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollowerOrLeader),
            |s, op, t| s.damage_target(t, op.int(1)?),
            |op, _| Ok(format!("Deal {} damage to an enemy", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGENETARHELSLFLED",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollowerOrLeader),
            |s, op, t| {
                s.damage_target(t, op.int(1)?)?;
                s.heal_own_leader(op.int(2)?);
                Ok(())
            },
            |op, _| {
                Ok(format!(
                    "Deal {} damage to an enemy. Restore {} health to your leader",
                    op.int(1)?,
                    op.int(2)?
                ))
            },
        ),
    );
    registry.register(
        "DRWCRDDMGENETARVAR",
        OpcodeHandler::targeted(
            |s, op| {
                if s.draw_own(op.count(1)?) {
                    request(TargetKind::EnemyFollowerOrLeader)
                } else {
                    done()
                }
            },
            |s, op, t| {
                let amount = s.value(op.arg(2)?)?;
                s.damage_target(t, amount)
            },
            |op, _| {
                Ok(format!(
                    "Draw {} card(s). Then deal X damage to an enemy. X equals {}",
                    op.count(1)?,
                    var_text(op, 2)?
                ))
            },
        ),
    );

    // === Own leader ===

    registry.register(
        "DMGSLFLED",
        OpcodeHandler::immediate(
            |s, op| {
                s.damage_own_leader(op.int(1)?);
                done()
            },
            |op, _| Ok(format!("Deal {} damage to your leader", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGSLFLEDDRWCRD",
        OpcodeHandler::immediate(
            |s, op| {
                if s.damage_own_leader(op.int(1)?) {
                    s.draw_own(op.count(2)?);
                }
                done()
            },
            |op, _| {
                Ok(format!(
                    "Deal {} damage to your leader. Draw {} card(s)",
                    op.int(1)?,
                    op.count(2)?
                ))
            },
        ),
    );
    registry.register(
        "DMGSLFLEDDMGENETAR",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollowerOrLeader),
            |s, op, t| {
                if s.damage_own_leader(op.int(1)?) {
                    s.damage_target(t, op.int(2)?)?;
                }
                Ok(())
            },
            |op, _| {
                Ok(format!(
                    "Deal {} damage to your leader. Deal {} damage to an enemy",
                    op.int(1)?,
                    op.int(2)?
                ))
            },
        ),
    );
    registry.register(
        "DMGSLFLEDKILENEFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            |s, op, t| {
                if s.damage_own_leader(op.int(1)?) {
                    s.destroy(card_of(t)?)?;
                }
                Ok(())
            },
            |op, _| {
                Ok(format!(
                    "Deal {} damage to your leader. Destroy an enemy follower",
                    op.int(1)?
                ))
            },
        ),
    );

    // === Enemy leader ===

    registry.register(
        "DMGENELED",
        OpcodeHandler::immediate(
            |s, op| {
                s.damage_enemy_leader(op.int(1)?);
                done()
            },
            |op, _| Ok(format!("Deal {} damage to the enemy leader", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGENELEDVAR",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = s.value(op.arg(1)?)?;
                s.damage_enemy_leader(amount);
                done()
            },
            |op, _| Ok(format!("Deal X damage to the enemy leader. X equals {}", var_text(op, 1)?)),
        ),
    );

    // === Many followers ===

    registry.register(
        "DMGALLENEFOL",
        OpcodeHandler::immediate(
            |s, op| {
                s.damage_all_followers(s.opponent(), op.int(1)?)?;
                done()
            },
            |op, _| Ok(format!("Deal {} damage to all enemy followers", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGALLFRIFOL",
        OpcodeHandler::immediate(
            |s, op| {
                s.damage_all_followers(s.owner, op.int(1)?)?;
                done()
            },
            |op, _| Ok(format!("Deal {} damage to all allied followers", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGALLFOL",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = op.int(1)?;
                s.damage_all_followers(s.opponent(), amount)?;
                s.damage_all_followers(s.owner, amount)?;
                done()
            },
            |op, _| Ok(format!("Deal {} damage to all followers", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGALL",
        OpcodeHandler::immediate(
            |s, op| {
                damage_everything(s, op.int(1)?)?;
                done()
            },
            |op, _| Ok(format!("Deal {} damage to all followers and both leaders", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGENEALL",
        OpcodeHandler::immediate(
            |s, op| {
                damage_all_enemies(s, op.int(1)?)?;
                done()
            },
            |op, _| Ok(format!("Deal {} damage to the enemy leader and all enemy followers", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGENEALLCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(2)?)? {
                    damage_all_enemies(s, op.int(1)?)?;
                }
                done()
            },
            |op, _| {
                gated(
                    op,
                    2,
                    &format!("deal {} damage to the enemy leader and all enemy followers", op.int(1)?),
                )
            },
        ),
    );

    // === Random enemy followers ===

    registry.register(
        "DMGRDMENEFOL",
        OpcodeHandler::immediate(
            |s, op| {
                damage_random_enemy(s, op.int(1)?, 1)?;
                done()
            },
            |op, _| Ok(format!("Deal {} damage to a random enemy follower", op.int(1)?)),
        ),
    );
    registry.register(
        "DMGRDMMULENEFOL",
        OpcodeHandler::immediate(
            |s, op| {
                damage_random_enemy(s, op.int(1)?, op.count(2)?)?;
                done()
            },
            |op, _| {
                Ok(format!(
                    "Deal {} damage to a random enemy follower {} times",
                    op.int(1)?,
                    op.count(2)?
                ))
            },
        ),
    );
    registry.register(
        "DMGRDMMULENEFOLVAR",
        OpcodeHandler::immediate(
            |s, op| {
                let repeat = times(s.value(op.arg(2)?)?);
                damage_random_enemy(s, op.int(1)?, repeat)?;
                done()
            },
            |op, _| {
                Ok(format!(
                    "Deal {} damage to a random enemy follower X times. X equals {}",
                    op.int(1)?,
                    var_text(op, 2)?
                ))
            },
        ),
    );
}

fn damage_and_put(scope: &mut EffectScope<'_>, op: &Opcode, target: Target) -> Result<()> {
    let name = op.arg(2)?;
    for _ in 0..op.count(3)? {
        scope.put_in_hand(name)?;
    }
    scope.damage_target(target, op.int(1)?)
}

/// Both leaders first, own then enemy. Followers only if both survive.
fn damage_everything(scope: &mut EffectScope<'_>, amount: i32) -> Result<()> {
    if scope.damage_own_leader(amount) && scope.damage_enemy_leader(amount) {
        scope.damage_all_followers(scope.owner, amount)?;
        scope.damage_all_followers(scope.opponent(), amount)?;
    }
    Ok(())
}

fn damage_all_enemies(scope: &mut EffectScope<'_>, amount: i32) -> Result<()> {
    if scope.damage_enemy_leader(amount) {
        scope.damage_all_followers(scope.opponent(), amount)?;
    }
    Ok(())
}

/// Each hit picks again among living enemy followers.
fn damage_random_enemy(scope: &mut EffectScope<'_>, amount: i32, repeat: usize) -> Result<()> {
    for _ in 0..repeat {
        let Some(id) = scope.random_follower(scope.opponent(), |_| true) else {
            break;
        };
        scope.damage_follower(id, amount)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::fixture::{Table, FOE, ME};
    use crate::effects::registry::Outcome;
    use crate::effects::targeting::{Target, TargetKind};

    #[test]
    fn test_enemy_follower_waits_for_target() {
        let mut table = Table::new();
        let goblin = table.summon(FOE, "Goblin");

        assert_eq!(table.run("DMGENEFOL@2"), Outcome::NeedsTarget(TargetKind::EnemyFollower));
        assert_eq!(table.follower(goblin).health(), 2);

        table.choose(Target::card(FOE, goblin));
        assert!(!table.follower(goblin).is_alive());
    }

    #[test]
    fn test_conditional_damage_fails_without_pending() {
        let mut table = Table::new();
        table.summon(FOE, "Goblin");

        assert_eq!(table.run("DMGENEFOLCOND@2@0"), Outcome::Fail);
        assert!(!table.interpreter.is_pending());

        assert_eq!(
            table.run("DMGENEFOLCOND@2@USDCRD?0"),
            Outcome::NeedsTarget(TargetKind::EnemyFollower)
        );
    }

    #[test]
    fn test_variable_damage_reads_hand_on_resolve() {
        let mut table = Table::new();
        let veteran = table.summon(FOE, "Veteran");
        table.give(ME, "Goblin");
        table.give(ME, "Goblin");

        table.run("DMGENEFOLVAR@HND");
        table.give(ME, "Goblin");
        table.choose(Target::card(FOE, veteran));

        assert_eq!(table.follower(veteran).health(), 2);
    }

    #[test]
    fn test_spellboost_adds_damage() {
        let mut table = Table::new();
        let veteran = table.summon(FOE, "Veteran");
        let surge = table.create("Surge");
        for _ in 0..2 {
            table.state.arena.get_mut(surge).unwrap().boost().unwrap();
        }

        table.run_from(surge, "DMGENEFOLBSTDMG@1");
        table.choose(Target::card(FOE, veteran));

        assert_eq!(table.follower(veteran).health(), 2);
    }

    #[test]
    fn test_enemy_target_can_be_leader() {
        let mut table = Table::new();
        assert_eq!(
            table.run("DRWCRDDMGENETARVAR@1@ENELEDONE"),
            Outcome::NeedsTarget(TargetKind::EnemyFollowerOrLeader)
        );
        assert_eq!(table.player(ME).hand().len(), 1);

        table.choose(Target::Leader(FOE));
        assert_eq!(table.leader_health(FOE), 1);
        assert!(!table.state.is_over());
    }

    #[test]
    fn test_failed_draw_skips_target() {
        let mut table = Table::new();
        table.stack_deck(ME, &[]);

        assert_eq!(table.run("DRWCRDDMGENETARVAR@1@ENELEDONE"), Outcome::Done);
        assert!(!table.interpreter.is_pending());
        assert_eq!(table.state.winner(), Some(FOE));
    }

    #[test]
    fn test_own_leader_damage_then_draw() {
        let mut table = Table::new();
        table.run("DMGSLFLEDDRWCRD@2@1");
        assert_eq!(table.leader_health(ME), 18);
        assert_eq!(table.player(ME).hand().len(), 1);

        table.state.player_mut(ME).leader_mut().take_damage(16);
        table.run("DMGSLFLEDDRWCRD@2@1");
        assert_eq!(table.state.winner(), Some(FOE));
        assert_eq!(table.player(ME).hand().len(), 1);
    }

    #[test]
    fn test_damage_all_followers_both_sides() {
        let mut table = Table::new();
        let mine = table.summon(ME, "Goblin");
        let theirs = table.summon(FOE, "Brute");

        table.run("DMGALLFOL@1");

        assert_eq!(table.follower(mine).health(), 1);
        assert_eq!(table.follower(theirs).health(), 1);
        assert_eq!(table.follower(table.caster).health(), 1);
        assert_eq!(table.leader_health(ME), 20);
        assert_eq!(table.leader_health(FOE), 20);
    }

    #[test]
    fn test_damage_everything() {
        let mut table = Table::new();
        let goblin = table.summon(FOE, "Goblin");

        table.run("DMGALL@2");

        assert_eq!(table.leader_health(ME), 18);
        assert_eq!(table.leader_health(FOE), 18);
        assert!(!table.follower(goblin).is_alive());
        assert!(!table.follower(table.caster).is_alive());
    }

    #[test]
    fn test_own_leader_death_stops_damage_everything() {
        let mut table = Table::new();
        let goblin = table.summon(FOE, "Goblin");
        table.state.player_mut(ME).leader_mut().take_damage(19);

        table.run("DMGALL@2");

        assert_eq!(table.state.winner(), Some(FOE));
        assert_eq!(table.leader_health(FOE), 20);
        assert_eq!(table.follower(goblin).health(), 2);
        assert_eq!(table.follower(table.caster).health(), 2);
    }

    #[test]
    fn test_enemy_leader_death_stops_follower_sweep() {
        let mut table = Table::new();
        let goblin = table.summon(FOE, "Goblin");
        table.state.player_mut(FOE).leader_mut().take_damage(18);

        table.run("DMGENEALL@2");

        assert_eq!(table.state.winner(), Some(ME));
        assert_eq!(table.follower(goblin).health(), 2);
    }

    #[test]
    fn test_conditional_sweep_checks_first() {
        let mut table = Table::new();
        let goblin = table.summon(FOE, "Goblin");

        assert_eq!(table.run("DMGENEALLCOND@1@ENEFOL?2"), Outcome::Done);
        assert_eq!(table.leader_health(FOE), 20);

        table.summon(FOE, "Goblin");
        table.run("DMGENEALLCOND@1@ENEFOL?2");
        assert_eq!(table.leader_health(FOE), 19);
        assert_eq!(table.follower(goblin).health(), 1);
    }

    #[test]
    fn test_random_hits_skip_dead_followers() {
        let mut table = Table::new();
        let goblin = table.summon(FOE, "Goblin");

        table.run("DMGRDMMULENEFOL@1@3");

        // Third hit finds nothing alive.
        assert_eq!(table.follower(goblin).health(), 0);
    }

    #[test]
    fn test_describe() {
        let table = Table::new();
        let caster = table.state.arena.get(table.caster).unwrap();
        let text = table.interpreter.describe("DMGENELEDVAR@NEC?2?4?1", caster).unwrap();
        assert_eq!(text, "Deal X damage to the enemy leader. X equals 1. Necromancy 2: 4 instead");
        assert_eq!(
            table.interpreter.describe("DMGALL@3", caster).unwrap(),
            "Deal 3 damage to all followers and both leaders"
        );
    }
}
