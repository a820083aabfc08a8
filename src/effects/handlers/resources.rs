//! Leader healing, necromancy, countdowns and card text swaps.

use crate::effects::registry::{OpcodeHandler, OpcodeRegistry};
use crate::effects::targeting::TargetKind;

use super::{card_of, done, request, var_text};

pub(super) fn register(registry: &mut OpcodeRegistry) {
    registry.register(
        "HELSLFLED",
        OpcodeHandler::immediate(
            |s, op| {
                s.heal_own_leader(op.int(1)?);
                done()
            },
            |op, _| Ok(format!("Restore {} defense to your leader", op.int(1)?)),
        ),
    );
    registry.register(
        "HELSLFLEDVAR",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = s.value(op.arg(1)?)?;
                s.heal_own_leader(amount);
                done()
            },
            |op, _| Ok(format!("Restore X defense to your leader. X equals {}", var_text(op, 1)?)),
        ),
    );
    registry.register(
        "ADDNEC",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = u32::try_from(op.count(1)?).unwrap_or(u32::MAX);
                s.me_mut().grave_mut().add_necromancy(amount);
                done()
            },
            |op, _| Ok(format!("Add {} to your necromancy", op.count(1)?)),
        ),
    );

    // === Countdowns ===

    registry.register(
        "DECCDALL",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = op.int(1)?;
                let amulets: Vec<_> = s.me().field().iter().collect();
                for id in amulets {
                    if let Some(amulet) = s.state.arena.get_mut(id)?.as_amulet_mut() {
                        if amulet.is_countdown() {
                            amulet.decrease_countdown(amount)?;
                        }
                    }
                }
                done()
            },
            |op, _| Ok(format!("Subtract {} from the countdown of all allied amulets", op.int(1)?)),
        ),
    );
    registry.register(
        "DECCDDRWCRD",
        OpcodeHandler::targeted(
            |s, op| {
                if s.draw_own(op.count(2)?) {
                    request(TargetKind::FriendlyCountdownAmulet)
                } else {
                    done()
                }
            },
            |s, op, t| s.state.arena.amulet_mut(card_of(t)?)?.decrease_countdown(op.int(1)?),
            |op, _| {
                Ok(format!(
                    "Draw {} card(s). Subtract {} from the countdown of an allied amulet",
                    op.count(2)?,
                    op.int(1)?
                ))
            },
        ),
    );

    // === Card text ===

    registry.register(
        "LUCIFER",
        OpcodeHandler::immediate(
            |s, _| {
                s.source_card_mut()?.change_effect()?;
                done()
            },
            |_, _| Ok("At the end of your turn, deal 4 damage to the enemy leader instead".to_string()),
        ),
    );
    // Spellboost cost reduction is tracked by the card itself.
    registry.register(
        "BSTCST",
        OpcodeHandler::immediate(
            |_, _| done(),
            |_, card| Ok(format!("Spellboost: subtract 1 from the cost of this card (currently {})", card.cost())),
        ),
    );
}
