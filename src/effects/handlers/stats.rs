//! Buffs, keywords, stat overrides and evolving.

use crate::cards::{Card, CraftTrait, Follower};
use crate::core::PlayerId;
use crate::effects::context::EffectScope;
use crate::effects::opcode::Opcode;
use crate::effects::registry::{OpcodeHandler, OpcodeRegistry};
use crate::effects::targeting::{Target, TargetKind};
use crate::error::Result;

use super::{applied, card_of, done, gated, request, request_if, stat_text, times, var_text};

pub(super) fn register(registry: &mut OpcodeRegistry) {
    register_self(registry);
    register_chosen(registry);
    register_groups(registry);
    register_overrides(registry);
}

// === The source follower ===

fn register_self(registry: &mut OpcodeRegistry) {
    registry.register(
        "BUFSLF",
        OpcodeHandler::immediate(
            |s, op| {
                s.buff(s.source, op.int(1)?, op.int(2)?)?;
                done()
            },
            |op, _| Ok(format!("Give this follower {}", stat_text(op, 1, 2)?)),
        ),
    );
    registry.register(
        "BUFSLFCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if !s.check(op.arg(3)?)? {
                    return applied(false);
                }
                s.buff(s.source, op.int(1)?, op.int(2)?)?;
                done()
            },
            |op, _| gated(op, 3, &format!("give this follower {}", stat_text(op, 1, 2)?)),
        ),
    );
    registry.register(
        "BUFSLFVAR",
        OpcodeHandler::immediate(
            |s, op| {
                let attack = s.value(op.arg(1)?)?;
                let health = s.value(op.arg(2)?)?;
                s.buff(s.source, attack, health)?;
                done()
            },
            |op, _| {
                Ok(format!(
                    "Give this follower +X/+Y. X equals {}. Y equals {}",
                    var_text(op, 1)?,
                    var_text(op, 2)?
                ))
            },
        ),
    );
    registry.register(
        "BUFSLFVARDISHND",
        OpcodeHandler::immediate(
            |s, op| {
                let (attack, health) = (op.int(1)?, op.int(2)?);
                for _ in 0..times(s.value(op.arg(3)?)?) {
                    s.buff(s.source, attack, health)?;
                }
                s.discard_hand();
                done()
            },
            |op, _| {
                Ok(format!(
                    "Give this follower {} X times. X equals {}. Discard your hand",
                    stat_text(op, 1, 2)?,
                    var_text(op, 3)?
                ))
            },
        ),
    );
    registry.register(
        "BUFSLFVARRTNALLFRIFOL",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = s.value(op.arg(1)?)?;
                s.buff(s.source, amount, amount)?;
                let source = s.source;
                for id in s.followers_of(s.owner, |_| true) {
                    if id != source {
                        s.return_to_hand(id, s.owner)?;
                    }
                }
                done()
            },
            |op, _| {
                Ok(format!(
                    "Give this follower +X/+X. X equals {}. Return your other followers to your hand",
                    var_text(op, 1)?
                ))
            },
        ),
    );
    registry.register(
        "BUFSLFCOMETR",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyCommanderEntrance),
            |s, op, _| s.buff(s.source, op.int(1)?, op.int(2)?),
            |op, _| {
                Ok(format!(
                    "Whenever an allied Commander comes into play, give this follower {}",
                    stat_text(op, 1, 2)?
                ))
            },
        ),
    );
    registry.register(
        "BUFSLFGVESLFEFXVARCOND",
        OpcodeHandler::immediate(
            |s, op| {
                let attack = s.value(op.arg(2)?)?;
                s.buff(s.source, attack, 0)?;
                let condition = op.optional_arg(3).unwrap_or(op.arg(2)?);
                if s.check(condition)? {
                    s.grant(s.source, op.keyword(1)?)?;
                }
                done()
            },
            |op, _| {
                Ok(format!(
                    "Give this follower +X/+0. X equals {}. If X is not zero, give it {:?}",
                    var_text(op, 2)?,
                    op.keyword(1)?
                ))
            },
        ),
    );
    registry.register(
        "GVEEFX",
        OpcodeHandler::immediate(
            |s, op| {
                s.grant(s.source, op.keyword(1)?)?;
                done()
            },
            |op, _| Ok(format!("Give this follower {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVEEFXCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if !s.check(op.arg(2)?)? {
                    return applied(false);
                }
                s.grant(s.source, op.keyword(1)?)?;
                done()
            },
            |op, _| gated(op, 2, &format!("give this follower {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVESLFEFXCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(2)?)? {
                    s.grant(s.source, op.keyword(1)?)?;
                }
                done()
            },
            |op, _| gated(op, 2, &format!("give this follower {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVEEFXBUFSLFCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if !s.check(op.arg(4)?)? {
                    return applied(false);
                }
                s.grant(s.source, op.keyword(1)?)?;
                s.buff(s.source, op.int(2)?, op.int(3)?)?;
                done()
            },
            |op, _| {
                gated(
                    op,
                    4,
                    &format!("give this follower {:?} and {}", op.keyword(1)?, stat_text(op, 2, 3)?),
                )
            },
        ),
    );
    registry.register(
        "EVOSLFCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(1)?)? {
                    let follower = s.source_follower_mut()?;
                    if !follower.has_evolved() {
                        follower.evolve()?;
                    }
                }
                done()
            },
            |op, _| gated(op, 1, "evolve this follower"),
        ),
    );
}

// === A chosen follower ===

fn register_chosen(registry: &mut OpcodeRegistry) {
    registry.register(
        "BUFFRIFOL",
        OpcodeHandler::targeted(|_, _| request(TargetKind::FriendlyFollower), buff_chosen, describe_buff_chosen),
    );
    registry.register(
        "BUFFRIOFF",
        OpcodeHandler::targeted(|_, _| request(TargetKind::FriendlyOfficer), buff_chosen, describe_buff_chosen),
    );
    registry.register(
        "BUFFRIOFFETR",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyOfficerEntrance),
            buff_chosen,
            describe_buff_chosen,
        ),
    );
    registry.register(
        "BUFONECSTFRIFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyCostOneFollower),
            buff_chosen,
            describe_buff_chosen,
        ),
    );
    registry.register(
        "BUFFRIFOLCOND",
        OpcodeHandler::targeted(
            |s, op| request_if(s.check(op.arg(3)?)?, TargetKind::FriendlyFollower),
            buff_chosen,
            |op, _| gated(op, 3, &format!("give an allied follower {}", stat_text(op, 1, 2)?)),
        ),
    );

    registry.register(
        "GVEENEFOLEFX",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            grant_chosen,
            |op, _| Ok(format!("Give an enemy follower {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVEFRICOMEFX",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyCommander),
            grant_chosen,
            |op, _| Ok(format!("Give an allied Commander follower {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVEETROFFEFX",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyOfficerEntrance),
            grant_chosen,
            |op, _| {
                Ok(format!(
                    "Whenever an allied Officer follower comes into play, give it {:?}",
                    op.keyword(1)?
                ))
            },
        ),
    );
    registry.register(
        "GVEETRFRIFOLEFXCOND",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyFollowerEntrance),
            |s, op, t| {
                let id = card_of(t)?;
                let name = s.state.arena.get(id)?.name().to_string();
                if s.check(&format!("{}?{}", op.arg(2)?, name))? {
                    s.grant(id, op.keyword(1)?)?;
                }
                Ok(())
            },
            |op, _| {
                Ok(format!(
                    "Whenever an allied follower comes into play, if its cost is at most {}, give it {:?}",
                    op.arg(2)?.split('?').nth(1).unwrap_or_default(),
                    op.keyword(1)?
                ))
            },
        ),
    );
    registry.register(
        "FREEVOFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyFollowerEntrance),
            evolve_for_free,
            |op, _| {
                Ok(format!(
                    "Whenever an allied {} comes into play, evolve it using this round's evolve",
                    op.arg(1)?
                ))
            },
        ),
    );
}

fn buff_chosen(scope: &mut EffectScope<'_>, op: &Opcode, target: Target) -> Result<()> {
    scope.buff(card_of(target)?, op.int(1)?, op.int(2)?)
}

fn grant_chosen(scope: &mut EffectScope<'_>, op: &Opcode, target: Target) -> Result<()> {
    scope.grant(card_of(target)?, op.keyword(1)?)
}

fn describe_buff_chosen(op: &Opcode, _: &Card) -> Result<String> {
    let who = match op.tag() {
        "BUFFRIOFF" => "an allied Officer follower",
        "BUFFRIOFFETR" => "the Officer follower that came into play",
        "BUFONECSTFRIFOL" => "an allied 1-cost follower",
        _ => "an allied follower",
    };
    Ok(format!("Give {} {}", who, stat_text(op, 1, 2)?))
}

/// Evolve an entering follower with this round's evolve, spending no point.
fn evolve_for_free(scope: &mut EffectScope<'_>, op: &Opcode, target: Target) -> Result<()> {
    let id = card_of(target)?;
    let card = scope.state.arena.get(id)?;
    let eligible = card.name() == op.arg(1)?
        && card.as_follower().is_some_and(|f| !f.has_evolved());
    if eligible && scope.me_mut().evolve(None).is_ok() {
        scope.state.arena.follower_mut(id)?.evolve()?;
    }
    Ok(())
}

// === Groups and random picks ===

fn register_groups(registry: &mut OpcodeRegistry) {
    registry.register(
        "BUFALLFRIFOL",
        OpcodeHandler::immediate(
            |s, op| {
                s.buff_all(op.int(1)?, op.int(2)?, |_| true)?;
                done()
            },
            |op, _| Ok(format!("Give all allied followers {}", stat_text(op, 1, 2)?)),
        ),
    );
    registry.register(
        "BUFALLFRIFOLCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(3)?)? {
                    s.buff_all(op.int(1)?, op.int(2)?, |_| true)?;
                }
                done()
            },
            |op, _| gated(op, 3, &format!("give all allied followers {}", stat_text(op, 1, 2)?)),
        ),
    );
    registry.register(
        "BUFALLFRIOFF",
        OpcodeHandler::immediate(
            |s, op| {
                s.buff_all(op.int(1)?, op.int(2)?, is_officer)?;
                done()
            },
            |op, _| Ok(format!("Give all allied Officer followers {}", stat_text(op, 1, 2)?)),
        ),
    );
    registry.register(
        "RDMBUFFRIFOL",
        OpcodeHandler::immediate(
            |s, op| {
                if let Some(id) = s.random_follower(s.owner, |_| true) {
                    s.buff(id, op.int(1)?, op.int(2)?)?;
                }
                done()
            },
            |op, _| Ok(format!("Give a random allied follower {}", stat_text(op, 1, 2)?)),
        ),
    );
    registry.register(
        "BUFRDMFRIOFF",
        OpcodeHandler::immediate(
            |s, op| {
                if let Some(id) = s.random_officer() {
                    s.buff(id, op.int(1)?, op.int(2)?)?;
                }
                done()
            },
            |op, _| Ok(format!("Give a random allied Officer follower {}", stat_text(op, 1, 2)?)),
        ),
    );
    registry.register(
        "BUFRDMFRIFOLCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(3)?)? {
                    if let Some(id) = s.random_follower(s.owner, |f| f.attack() == 1) {
                        s.buff(id, op.int(1)?, op.int(2)?)?;
                    }
                }
                done()
            },
            |op, _| {
                gated(
                    op,
                    3,
                    &format!("give a random allied follower with 1 attack {}", stat_text(op, 1, 2)?),
                )
            },
        ),
    );

    registry.register(
        "GVEALLFRIFOLEFX",
        OpcodeHandler::immediate(
            |s, op| {
                s.grant_all(s.owner, op.keyword(1)?, |_| true)?;
                done()
            },
            |op, _| Ok(format!("Give all allied followers {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVEALLENEFOLEFX",
        OpcodeHandler::immediate(
            |s, op| {
                s.grant_all(s.opponent(), op.keyword(1)?, |_| true)?;
                done()
            },
            |op, _| Ok(format!("Give all enemy followers {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVEALLFRIOFFEFX",
        OpcodeHandler::immediate(
            |s, op| {
                s.grant_all(s.owner, op.keyword(1)?, is_officer)?;
                done()
            },
            |op, _| Ok(format!("Give all allied Officer followers {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "REVALLFRIFOLEFX",
        OpcodeHandler::immediate(
            |s, op| {
                s.revoke_all(s.owner, op.keyword(1)?)?;
                done()
            },
            |op, _| Ok(format!("Remove {:?} from all allied followers", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVERDMFRIFOLEFX",
        OpcodeHandler::immediate(
            |s, op| {
                let owner = s.owner;
                grant_random(s, owner, op)?;
                done()
            },
            |op, _| Ok(format!("Give a random allied follower {:?}", op.keyword(1)?)),
        ),
    );
    registry.register(
        "GVERDMENEFOLEFX",
        OpcodeHandler::immediate(
            |s, op| {
                let opponent = s.opponent();
                grant_random(s, opponent, op)?;
                done()
            },
            |op, _| Ok(format!("Give a random enemy follower {:?}", op.keyword(1)?)),
        ),
    );
}

fn is_officer(follower: &Follower) -> bool {
    follower.craft_trait() == CraftTrait::Officer
}

fn grant_random(scope: &mut EffectScope<'_>, player: PlayerId, op: &Opcode) -> Result<()> {
    let keyword = op.keyword(1)?;
    if let Some(id) = scope.random_follower(player, |_| true) {
        scope.grant(id, keyword)?;
    }
    Ok(())
}

// === Stat overrides ===

fn register_overrides(registry: &mut OpcodeRegistry) {
    registry.register(
        "CHGSLFATKVAR",
        OpcodeHandler::immediate(
            |s, op| {
                let attack = s.value(op.arg(1)?)?;
                s.source_follower_mut()?.set_attack(attack);
                done()
            },
            |op, _| Ok(format!("Set this follower's attack to {}", var_text(op, 1)?)),
        ),
    );
    registry.register(
        "CHGENEFOLHP",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            |s, op, t| {
                s.state.arena.follower_mut(card_of(t)?)?.set_health(op.int(1)?);
                Ok(())
            },
            |op, _| Ok(format!("Set an enemy follower's defense to {}", op.int(1)?)),
        ),
    );
    registry.register(
        "CHGENEFLDHPCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(2)?)? {
                    let health = op.int(1)?;
                    for id in s.followers_of(s.opponent(), |_| true) {
                        s.state.arena.follower_mut(id)?.set_health(health);
                    }
                }
                done()
            },
            |op, _| gated(op, 2, &format!("set the defense of all enemy followers to {}", op.int(1)?)),
        ),
    );
}
