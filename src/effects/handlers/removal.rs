//! Destroying, banishing, returning and transforming cards on the field.

use crate::effects::context::EffectScope;
use crate::effects::opcode::Opcode;
use crate::effects::registry::{OpcodeHandler, OpcodeRegistry};
use crate::effects::targeting::{Target, TargetKind};
use crate::error::Result;

use super::{card_of, done, gated, request};

pub(super) fn register(registry: &mut OpcodeRegistry) {
    // === Destroy ===

    registry.register(
        "KILENEFOLBSTCST",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            destroy_chosen,
            |_, card| {
                Ok(format!(
                    "Destroy an enemy follower.\nSpellboost: subtract 1 from the cost of this card (currently {})",
                    card.cost()
                ))
            },
        ),
    );
    registry.register(
        "KILENEFOLAMU",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollowerOrAmulet),
            destroy_chosen,
            |_, _| Ok("Destroy an enemy follower or amulet".to_string()),
        ),
    );
    registry.register(
        "KILENEAMUCOND",
        OpcodeHandler::targeted(
            |s, op| {
                if s.check(op.arg(1)?)? {
                    request(TargetKind::EnemyAmulet)
                } else {
                    done()
                }
            },
            destroy_chosen,
            |op, _| gated(op, 1, "destroy an enemy amulet"),
        ),
    );
    registry.register(
        "KILENEATKFOL",
        OpcodeHandler::targeted(
            |_, op| request(TargetKind::EnemyFollowerAttackAtLeast(op.int(1)?)),
            destroy_chosen,
            |op, _| Ok(format!("Destroy an enemy follower with at least {} attack", op.int(1)?)),
        ),
    );
    registry.register(
        "KILFOLREVFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::AnyFollower),
            |s, _, t| {
                let id = card_of(t)?;
                s.destroy(id)?;
                let name = s.state.arena.get(id)?.name().to_string();
                let copy = s.create(&name)?;
                s.place_on_field(t.owner(), copy)?;
                Ok(())
            },
            |_, _| Ok("Destroy a follower. Then summon a copy of it for its owner".to_string()),
        ),
    );

    // === Banish ===

    registry.register(
        "BANENEFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::EnemyFollower),
            banish_chosen,
            |_, _| Ok("Banish an enemy follower".to_string()),
        ),
    );
    registry.register(
        "BANENEFOLHPLES",
        OpcodeHandler::targeted(
            |_, op| request(TargetKind::EnemyFollowerHpAtMost(op.int(1)?)),
            banish_chosen,
            |op, _| Ok(format!("Banish an enemy follower with {} defense or less", op.int(1)?)),
        ),
    );
    registry.register(
        "SLFBAN",
        OpcodeHandler::immediate(
            |s, _| {
                s.source_card()?.follower()?;
                s.banish(s.source, s.owner);
                done()
            },
            |_, _| Ok("Banish this card".to_string()),
        ),
    );

    // === Return to hand ===

    registry.register(
        "RTNFOLTOHND",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::AnyFollower),
            return_chosen,
            |_, _| Ok("Return a follower to its owner's hand".to_string()),
        ),
    );
    registry.register(
        "RTNFRIFOLAMU",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyFollowerOrAmulet),
            return_chosen,
            |_, _| Ok("Return an allied follower or amulet to your hand".to_string()),
        ),
    );
    registry.register(
        "RTNFRIFOLAMUDRWCRD",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyFollowerOrAmulet),
            |s, op, t| {
                return_chosen(s, op, t)?;
                s.draw_own(op.count(1)?);
                Ok(())
            },
            |op, _| {
                Ok(format!(
                    "Return an allied follower or amulet to your hand. Draw {} card(s)",
                    op.count(1)?
                ))
            },
        ),
    );
    registry.register(
        "RTNFRIFOLRDMRTNENEFOL",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyFollowerOrAmulet),
            |s, op, t| {
                return_chosen(s, op, t)?;
                return_random_enemy(s)
            },
            |_, _| {
                Ok("Return an allied follower or amulet to your hand. Then return a random enemy card in play to its owner's hand".to_string())
            },
        ),
    );
    registry.register(
        "RTNALLFOL",
        OpcodeHandler::immediate(
            |s, _| {
                s.return_all_followers(s.owner)?;
                s.return_all_followers(s.opponent())?;
                done()
            },
            |_, _| Ok("Return all followers to their owners' hands".to_string()),
        ),
    );

    // === Transform ===

    registry.register(
        "CHGETRCRD",
        OpcodeHandler::targeted(
            |_, _| request(TargetKind::FriendlyFollowerEntrance),
            |s, op, t| {
                let id = card_of(t)?;
                let matches = s
                    .state
                    .arena
                    .living_follower(id)
                    .is_some()
                    && s.state.arena.get(id)?.name() == op.arg(1)?;
                if matches {
                    s.destroy(id)?;
                    let replacement = s.create(op.arg(2)?)?;
                    s.place_on_field(s.owner, replacement)?;
                }
                Ok(())
            },
            |op, _| {
                Ok(format!(
                    "Whenever an allied {} comes into play, transform it into a {}",
                    op.arg(1)?,
                    op.arg(2)?
                ))
            },
        ),
    );
}

fn destroy_chosen(scope: &mut EffectScope<'_>, _: &Opcode, target: Target) -> Result<()> {
    scope.destroy(card_of(target)?)
}

fn banish_chosen(scope: &mut EffectScope<'_>, _: &Opcode, target: Target) -> Result<()> {
    scope.banish(card_of(target)?, target.owner());
    Ok(())
}

fn return_chosen(scope: &mut EffectScope<'_>, _: &Opcode, target: Target) -> Result<()> {
    scope.return_to_hand(card_of(target)?, target.owner())
}

/// Return any one enemy card in play, chosen uniformly.
fn return_random_enemy(scope: &mut EffectScope<'_>) -> Result<()> {
    let enemy = scope.opponent();
    let pool: Vec<_> = scope.foe().field().iter().collect();
    let Some(&id) = scope.state.rng.choose(&pool) else {
        return Ok(());
    };
    scope.return_to_hand(id, enemy)
}
