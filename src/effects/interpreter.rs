//! The two-phase effect interpreter.
//!
//! [`Interpreter::process`] runs an opcode against the game state. Most
//! opcodes finish in one call. Those that need a choice return
//! [`Outcome::NeedsTarget`] and leave a [`PendingEffect`] behind; the
//! orchestration layer later hands a selection to [`Interpreter::proceed`],
//! which finishes the effect and clears the pending slot.
//!
//! ## Pending slot
//!
//! There is exactly one pending slot per interpreter, and therefore per
//! game. Processing a second opcode while one is pending is rejected with
//! [`RulesError::EffectPending`] before anything is applied.

use log::{debug, warn};

use crate::cards::{Card, CardFactory};
use crate::core::{EntityId, GameState, PlayerId};
use crate::error::{Result, RulesError};

use super::context::EffectScope;
use super::opcode::Opcode;
use super::registry::{OpcodeRegistry, Outcome};
use super::targeting::{Target, TargetKind};

/// An effect suspended until its target is chosen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingEffect {
    pub opcode: Opcode,
    /// Card the effect is printed on.
    pub source: EntityId,
    /// Player who owns the effect.
    pub owner: PlayerId,
    /// What the effect is waiting for.
    pub kind: TargetKind,
}

/// Opcode interpreter with a single pending-effect slot.
#[derive(Debug)]
pub struct Interpreter {
    registry: OpcodeRegistry,
    pending: Option<PendingEffect>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(OpcodeRegistry::standard())
    }
}

impl Interpreter {
    #[must_use]
    pub fn new(registry: OpcodeRegistry) -> Self {
        Self {
            registry,
            pending: None,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &OpcodeRegistry {
        &self.registry
    }

    /// Run one opcode on behalf of `source`, owned by `owner`.
    ///
    /// Marks the source card's effect as fired, then applies whatever the
    /// opcode can apply without a choice. On `NeedsTarget` the effect is
    /// stored and must be finished with [`proceed`](Self::proceed) or
    /// dropped with [`discard`](Self::discard).
    pub fn process(
        &mut self,
        state: &mut GameState,
        cards: &dyn CardFactory,
        text: &str,
        source: EntityId,
        owner: PlayerId,
    ) -> Result<Outcome> {
        if self.pending.is_some() {
            return Err(RulesError::EffectPending);
        }
        let opcode = Opcode::parse(text);
        let handler = *self.registry.get(opcode.tag())?;
        debug!("{}: processing {} for {}", owner, opcode, source);

        state.arena.get_mut(source)?.effect_activated();
        let mut scope = EffectScope::new(state, cards, source, owner);
        let outcome = (handler.begin)(&mut scope, &opcode)?;

        if let Outcome::NeedsTarget(kind) = outcome {
            if handler.resolve.is_none() {
                return Err(RulesError::InvalidConfig(format!(
                    "{} asked for a target but cannot resolve one",
                    opcode.tag()
                )));
            }
            debug!("{}: {} waits for {}", owner, opcode, kind);
            self.pending = Some(PendingEffect {
                opcode,
                source,
                owner,
                kind,
            });
        }
        Ok(outcome)
    }

    /// Finish the pending effect against `target`.
    ///
    /// Does nothing when no effect is pending. Eligibility is the caller's
    /// responsibility; the pending slot is cleared whatever the result.
    pub fn proceed(&mut self, state: &mut GameState, cards: &dyn CardFactory, target: Target) -> Result<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        let handler = *self.registry.get(pending.opcode.tag())?;
        let Some(resolve) = handler.resolve else {
            return Ok(());
        };
        debug!("{}: resolving {} against {:?}", pending.owner, pending.opcode, target);
        let mut scope = EffectScope::new(state, cards, pending.source, pending.owner);
        resolve(&mut scope, &pending.opcode, target)
    }

    /// Drop the pending effect without applying it.
    pub fn discard(&mut self) -> Option<PendingEffect> {
        let dropped = self.pending.take();
        if let Some(effect) = &dropped {
            warn!("{}: discarding {} ({} unavailable)", effect.owner, effect.opcode, effect.kind);
        }
        dropped
    }

    #[must_use]
    pub fn pending(&self) -> Option<&PendingEffect> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Card text for one opcode string.
    pub fn describe(&self, text: &str, card: &Card) -> Result<String> {
        self.registry.describe(text, card)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, CardRegistry, FollowerTemplate, LeaderClass};
    use crate::core::{CardArena, GameRng, PlayerMap, RulesConfig};
    use crate::player::Player;

    fn registry() -> CardRegistry {
        CardRegistry::new().with_cards([
            CardDefinition::follower("Goblin", 1, LeaderClass::Neutral, FollowerTemplate::new(1, 2)),
            CardDefinition::spell("Bolt", 1, LeaderClass::Runecraft),
        ])
    }

    fn setup() -> (GameState, CardRegistry, EntityId, EntityId) {
        let config = RulesConfig::default();
        let cards = registry();
        let mut arena = CardArena::new();
        let spell = arena.insert(cards.create("Bolt").unwrap());
        let goblin = arena.insert(cards.create("Goblin").unwrap());
        let mut players = PlayerMap::new(|id| Player::new(id, LeaderClass::Runecraft, &config));
        players[PlayerId::SECOND].field_mut().add(goblin, &arena).unwrap();
        let state = GameState::new(config, arena, players, GameRng::new(7));
        (state, cards, spell, goblin)
    }

    #[test]
    fn test_process_immediate() {
        let (mut state, cards, spell, _) = setup();
        let mut interpreter = Interpreter::default();
        let outcome = interpreter
            .process(&mut state, &cards, "DMGENELED@3", spell, PlayerId::FIRST)
            .unwrap();
        assert_eq!(outcome, Outcome::Done);
        assert!(!interpreter.is_pending());
        assert_eq!(state.player(PlayerId::SECOND).leader().health(), 17);
        assert!(!state.arena.get(spell).unwrap().effect_toggle());
    }

    #[test]
    fn test_process_then_proceed() {
        let (mut state, cards, spell, goblin) = setup();
        let mut interpreter = Interpreter::default();
        let outcome = interpreter
            .process(&mut state, &cards, "DMGENEFOL@1", spell, PlayerId::FIRST)
            .unwrap();
        assert_eq!(outcome, Outcome::NeedsTarget(TargetKind::EnemyFollower));
        assert_eq!(interpreter.pending().unwrap().kind, TargetKind::EnemyFollower);

        interpreter
            .proceed(&mut state, &cards, Target::card(PlayerId::SECOND, goblin))
            .unwrap();
        assert!(!interpreter.is_pending());
        assert_eq!(state.arena.follower(goblin).unwrap().health(), 1);
    }

    #[test]
    fn test_second_process_rejected() {
        let (mut state, cards, spell, _) = setup();
        let mut interpreter = Interpreter::default();
        interpreter
            .process(&mut state, &cards, "DMGENEFOL@1", spell, PlayerId::FIRST)
            .unwrap();
        let err = interpreter
            .process(&mut state, &cards, "DMGENELED@3", spell, PlayerId::FIRST)
            .unwrap_err();
        assert_eq!(err, RulesError::EffectPending);
        assert_eq!(state.player(PlayerId::SECOND).leader().health(), 20);
    }

    #[test]
    fn test_unknown_tag_is_fatal() {
        let (mut state, cards, spell, _) = setup();
        let mut interpreter = Interpreter::default();
        let err = interpreter
            .process(&mut state, &cards, "FIREBALL@3", spell, PlayerId::FIRST)
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(state.arena.get(spell).unwrap().effect_toggle());
    }

    #[test]
    fn test_proceed_without_pending_is_noop() {
        let (mut state, cards, _, goblin) = setup();
        let mut interpreter = Interpreter::default();
        interpreter
            .proceed(&mut state, &cards, Target::card(PlayerId::SECOND, goblin))
            .unwrap();
        assert_eq!(state.arena.follower(goblin).unwrap().health(), 2);
    }

    #[test]
    fn test_discard() {
        let (mut state, cards, spell, _) = setup();
        let mut interpreter = Interpreter::default();
        interpreter
            .process(&mut state, &cards, "DMGENEFOL@1", spell, PlayerId::FIRST)
            .unwrap();
        let dropped = interpreter.discard().unwrap();
        assert_eq!(dropped.opcode.tag(), "DMGENEFOL");
        assert!(interpreter.discard().is_none());
    }
}
