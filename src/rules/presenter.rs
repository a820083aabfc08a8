//! The presentation seam.
//!
//! Rendering and input live outside the rules engine. The engine only
//! tells a [`Presenter`] what happened; answers come back through the
//! game's entry points (`select_target`, `confirm_attack`). Every method
//! has an empty default so a presenter implements only what it shows.

use crate::core::{EntityId, GameState, PlayerId};
use crate::effects::TargetKind;

/// Receives notifications from the game.
pub trait Presenter {
    /// `player` must pick a target of `kind` via `select_target`.
    fn prompt_target(&mut self, _player: PlayerId, _kind: TargetKind) {}

    /// A user-visible message, such as an effect discarded for lack of targets.
    fn notice(&mut self, _message: &str) {}

    /// `attacker` is waiting for `confirm_attack`.
    fn attack_declared(&mut self, _player: PlayerId, _attacker: EntityId) {}

    /// Zones changed; redraw from `state`.
    fn refresh(&mut self, _state: &GameState) {}
}

/// Presenter that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {}

/// One notification seen by a [`RecordingPresenter`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    PromptTarget { player: PlayerId, kind: TargetKind },
    Notice(String),
    AttackDeclared { player: PlayerId, attacker: EntityId },
}

/// Presenter that keeps a log of notifications, for tests and replays.
#[derive(Clone, Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
    pub refreshes: usize,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of target prompts seen.
    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PresenterEvent::PromptTarget { .. }))
            .count()
    }

    pub fn notices(&self) -> impl Iterator<Item = &str> {
        self.events.iter().filter_map(|e| match e {
            PresenterEvent::Notice(message) => Some(message.as_str()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.refreshes = 0;
    }
}

impl Presenter for RecordingPresenter {
    fn prompt_target(&mut self, player: PlayerId, kind: TargetKind) {
        self.events.push(PresenterEvent::PromptTarget { player, kind });
    }

    fn notice(&mut self, message: &str) {
        self.events.push(PresenterEvent::Notice(message.to_string()));
    }

    fn attack_declared(&mut self, player: PlayerId, attacker: EntityId) {
        self.events.push(PresenterEvent::AttackDeclared { player, attacker });
    }

    fn refresh(&mut self, _state: &GameState) {
        self.refreshes += 1;
    }
}
