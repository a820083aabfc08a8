//! Built-in opcode handlers, grouped by what they act on.
//!
//! - `damage`: leader and follower damage
//! - `cards`: drawing, hand and deck manipulation
//! - `stats`: buffs, keywords, stat overrides and evolving
//! - `summon`: putting new followers onto the field
//! - `removal`: destroying, banishing, returning and transforming
//! - `resources`: leader healing, countdowns, necromancy, card text swaps

mod damage;
mod cards;
mod stats;
mod summon;
mod removal;
mod resources;

#[cfg(test)]
mod fixture;

use crate::core::EntityId;
use crate::error::{Result, RulesError};

use super::condition::Condition;
use super::opcode::Opcode;
use super::registry::{OpcodeRegistry, Outcome};
use super::targeting::{Target, TargetKind};
use super::variable::Variable;

/// Register every built-in opcode.
pub(super) fn install(registry: &mut OpcodeRegistry) {
    damage::register(registry);
    cards::register(registry);
    stats::register(registry);
    summon::register(registry);
    removal::register(registry);
    resources::register(registry);

    // Spellings found in shipped card data.
    for (alias, tag) in ALIASES {
        if let Ok(handler) = registry.get(tag).copied() {
            registry.register(*alias, handler);
        }
    }
}

/// Alternate tags bound to the same handler as their canonical spelling.
const ALIASES: &[(&str, &str)] = &[
    ("BUFFFRIFOLCOND", "BUFFRIFOLCOND"),
    ("GVEEFXBUFSLFFCOND", "GVEEFXBUFSLFCOND"),
];

fn done() -> Result<Outcome> {
    Ok(Outcome::Done)
}

fn request(kind: TargetKind) -> Result<Outcome> {
    Ok(Outcome::NeedsTarget(kind))
}

/// Request a target when `pass`, otherwise fail without effect.
fn request_if(pass: bool, kind: TargetKind) -> Result<Outcome> {
    Ok(if pass {
        Outcome::NeedsTarget(kind)
    } else {
        Outcome::Fail
    })
}

/// `Done` when `applied`, `Fail` otherwise.
fn applied(applied: bool) -> Result<Outcome> {
    Ok(if applied { Outcome::Done } else { Outcome::Fail })
}

/// The card a selection points at. Leaders are never valid here.
fn card_of(target: Target) -> Result<EntityId> {
    target.card_id().ok_or(RulesError::IneligibleTarget)
}

/// Non-negative repeat count from a computed value.
fn times(value: i32) -> usize {
    usize::try_from(value).unwrap_or(0)
}

// === Description helpers ===

fn cond_text(op: &Opcode, index: usize) -> Result<String> {
    Ok(Condition::parse(op.arg(index)?)?.describe())
}

/// Condition prefix followed by a lower-case clause.
fn gated(op: &Opcode, index: usize, clause: &str) -> Result<String> {
    let prefix = cond_text(op, index)?;
    if prefix.is_empty() {
        return Ok(capitalize(clause));
    }
    Ok(format!("{}{}", prefix, clause))
}

fn var_text(op: &Opcode, index: usize) -> Result<String> {
    Ok(Variable::parse(op.arg(index)?)?.describe())
}

/// `+2/+1` style stat text from two integer arguments.
fn stat_text(op: &Opcode, attack: usize, health: usize) -> Result<String> {
    Ok(format!("{:+}/{:+}", op.int(attack)?, op.int(health)?))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_text_signs() {
        let op = Opcode::parse("BUFSLF@-1@0");
        assert_eq!(stat_text(&op, 1, 2).unwrap(), "-1/+0");
    }

    #[test]
    fn test_gated_literal_capitalizes() {
        let op = Opcode::parse("X@1");
        assert_eq!(gated(&op, 1, "draw a card").unwrap(), "Draw a card");
        let op = Opcode::parse("X@VENG");
        assert_eq!(gated(&op, 1, "draw a card").unwrap(), "If Vengeance is active, draw a card");
    }

    #[test]
    fn test_aliases_share_handlers() {
        let registry = OpcodeRegistry::standard();
        for (alias, tag) in ALIASES {
            assert!(registry.contains(tag), "{} missing", tag);
            assert!(registry.contains(alias), "{} missing", alias);
        }
    }

    #[test]
    fn test_times_clamps_negative() {
        assert_eq!(times(-3), 0);
        assert_eq!(times(2), 2);
    }
}
