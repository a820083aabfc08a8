//! Drawing, hand and deck opcodes.

use log::debug;

use crate::cards::{CardType, CraftTrait, LeaderClass};
use crate::effects::context::EffectScope;
use crate::effects::registry::{OpcodeHandler, OpcodeRegistry};
use crate::error::Result;
use crate::zones::{CardQuery, DeckPreset};

use super::{done, gated, times, var_text};

/// Cost window searched when tutoring Swordcraft followers.
const TUTOR_MIN_COST: i32 = 0;
const TUTOR_MAX_COST: i32 = 10;

pub(super) fn register(registry: &mut OpcodeRegistry) {
    // === Drawing ===

    registry.register(
        "DRWCRD",
        OpcodeHandler::immediate(
            |s, op| {
                s.draw_own(op.count(1)?);
                done()
            },
            |op, _| Ok(format!("Draw {} card(s)", op.count(1)?)),
        ),
    );
    registry.register(
        "DRWCRDCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(2)?)? {
                    s.draw_own(op.count(1)?);
                }
                done()
            },
            |op, _| gated(op, 2, &format!("draw {} card(s)", op.count(1)?)),
        ),
    );
    registry.register(
        "DRWCRDVAR",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = times(s.value(op.arg(1)?)?);
                s.draw_own(amount);
                done()
            },
            |op, _| Ok(format!("Draw X cards. X equals {}", var_text(op, 1)?)),
        ),
    );
    registry.register(
        "BTHDRWCRD",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = op.count(1)?;
                if s.draw_own(amount) {
                    s.draw(s.opponent(), amount);
                }
                done()
            },
            |op, _| Ok(format!("Both players draw {} card(s)", op.count(1)?)),
        ),
    );
    registry.register(
        "DISHNDDRWHND",
        OpcodeHandler::immediate(
            |s, _| {
                let amount = s.me().hand().len();
                s.discard_hand();
                s.draw_own(amount);
                done()
            },
            |_, _| Ok("Discard your hand. Draw a card for each card discarded".to_string()),
        ),
    );
    registry.register(
        "INCCSTDRWCRDCOND",
        OpcodeHandler::immediate(
            |s, op| {
                if s.check(op.arg(2)?)? {
                    s.draw_own(op.count(1)?);
                }
                s.me_mut().increase_max_cost();
                done()
            },
            |op, _| {
                Ok(format!(
                    "Increase your max cost by 1. {}",
                    gated(op, 2, &format!("draw {} card(s)", op.count(1)?))?
                ))
            },
        ),
    );

    // === Tutoring from the deck ===

    registry.register(
        "DRWRDMCOM",
        OpcodeHandler::immediate(
            |s, op| {
                tutor_swordcraft(s, CraftTrait::Commander, op.count(1)?)?;
                done()
            },
            |op, _| {
                Ok(format!(
                    "Put {} random Commander follower(s) from your deck into your hand",
                    op.count(1)?
                ))
            },
        ),
    );
    registry.register(
        "DRWRDMOFFVAR",
        OpcodeHandler::immediate(
            |s, op| {
                let amount = times(s.value(op.arg(1)?)?);
                tutor_swordcraft(s, CraftTrait::Officer, amount)?;
                done()
            },
            |op, _| {
                Ok(format!(
                    "Put X random Officer follower(s) from your deck into your hand. X equals {}",
                    var_text(op, 1)?
                ))
            },
        ),
    );
    registry.register(
        "REPDEK",
        OpcodeHandler::immediate(
            |s, op| {
                replace_deck(s, DeckPreset::from_code(op.arg(1)?)?)?;
                done()
            },
            |op, _| {
                let preset = DeckPreset::from_code(op.arg(1)?)?;
                Ok(format!("Replace your deck with the {} deck", preset.code()))
            },
        ),
    );

    // === Putting cards into hand ===

    registry.register(
        "PUTFOL",
        OpcodeHandler::immediate(
            |s, op| {
                let name = op.arg(1)?;
                for _ in 0..op.count(2)? {
                    s.put_in_hand(name)?;
                }
                done()
            },
            |op, _| Ok(format!("Put {} {} into your hand", op.count(2)?, op.arg(1)?)),
        ),
    );
    registry.register(
        "PUTFOLCHGCST",
        OpcodeHandler::immediate(
            |s, op| {
                let (name, cost) = (op.arg(1)?, op.int(3)?);
                for _ in 0..op.count(2)? {
                    let id = s.create(name)?;
                    s.state.arena.get_mut(id)?.change_cost(cost)?;
                    s.me_mut().hand_mut().add(id);
                }
                done()
            },
            |op, _| {
                Ok(format!(
                    "Put {} {} into your hand and set their cost to {}",
                    op.count(2)?,
                    op.arg(1)?,
                    op.int(3)?
                ))
            },
        ),
    );
    registry.register(
        "PUTHNDFULFOL",
        OpcodeHandler::immediate(
            |s, op| {
                let name = op.arg(1)?;
                while !s.me().hand().is_full() {
                    s.put_in_hand(name)?;
                }
                done()
            },
            |op, _| Ok(format!("Put {} into your hand until it is full", op.arg(1)?)),
        ),
    );

    // === Changing cards in hand ===

    registry.register(
        "TRAALLHNDCRD",
        OpcodeHandler::immediate(
            |s, op| {
                transform_hand(s, op.arg(1)?, op.arg(2)?)?;
                done()
            },
            |op, _| Ok(format!("Transform each {} in your hand into a {}", op.arg(1)?, op.arg(2)?)),
        ),
    );
    registry.register(
        "CHGCST",
        OpcodeHandler::immediate(
            |s, op| {
                let (name, cost) = (op.arg(1)?, op.int(2)?);
                let found = s
                    .me()
                    .hand()
                    .iter()
                    .find(|&id| s.state.arena.try_get(id).is_some_and(|c| c.name() == name));
                if let Some(id) = found {
                    s.state.arena.get_mut(id)?.change_cost(cost)?;
                }
                done()
            },
            |op, _| Ok(format!("Set the cost of a {} in your hand to {}", op.arg(1)?, op.int(2)?)),
        ),
    );
}

/// Move up to `amount` random Swordcraft followers of a trait from deck to
/// hand, stopping at the first miss. A card that does not fit is lost.
fn tutor_swordcraft(scope: &mut EffectScope<'_>, craft_trait: CraftTrait, amount: usize) -> Result<()> {
    let query = CardQuery::cost_between(TUTOR_MIN_COST, TUTOR_MAX_COST)
        .with_class(LeaderClass::Swordcraft)
        .with_trait(craft_trait)
        .with_type(CardType::Follower);

    for _ in 0..amount {
        let owner = scope.owner;
        let state = &mut *scope.state;
        let found = state.players[owner].deck_mut().random_requested_card(
            &query,
            &state.arena,
            &mut state.rng,
            true,
        );
        let Some(id) = found else {
            debug!("{}: no {:?} left to tutor", owner, craft_trait);
            break;
        };
        if !scope.me_mut().hand_mut().add(id) {
            debug!("{}: hand full, tutored {} is lost", owner, id);
        }
    }
    Ok(())
}

fn replace_deck(scope: &mut EffectScope<'_>, preset: DeckPreset) -> Result<()> {
    let mut ids = Vec::new();
    for name in preset.card_names() {
        ids.push(scope.create(name)?);
    }
    let owner = scope.owner;
    let state = &mut *scope.state;
    state.players[owner].deck_mut().replace(ids, &mut state.rng);
    debug!("{}: deck replaced with {}", owner, preset.code());
    Ok(())
}

/// Swap every copy of `from` in hand for a fresh `to`, keeping positions.
fn transform_hand(scope: &mut EffectScope<'_>, from: &str, to: &str) -> Result<()> {
    let positions: Vec<usize> = scope
        .me()
        .hand()
        .iter()
        .enumerate()
        .filter(|&(_, id)| scope.state.arena.try_get(id).is_some_and(|c| c.name() == from))
        .map(|(i, _)| i)
        .collect();

    for index in positions {
        let id = scope.create(to)?;
        scope.me_mut().hand_mut().replace_at(index, id);
    }
    Ok(())
}
