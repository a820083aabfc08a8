//! First-in, first-out queue of triggered effects.
//!
//! Triggers that fire while another effect waits for a target cannot run
//! yet: the interpreter has a single pending slot. They are parked here
//! together with the trigger that caused them and drained in order once
//! the pending effect resolves or is discarded.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::effects::Target;

/// A triggered effect waiting for its turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedEffect {
    /// Opcode string to run.
    pub text: String,
    /// Card the effect is printed on.
    pub source: EntityId,
    /// Player who owns the source card.
    pub owner: PlayerId,
    /// Card (and its owner) that caused the trigger, for automatic targets.
    pub trigger: Option<Target>,
}

impl QueuedEffect {
    #[must_use]
    pub fn new(text: impl Into<String>, source: EntityId, owner: PlayerId) -> Self {
        Self {
            text: text.into(),
            source,
            owner,
            trigger: None,
        }
    }

    /// Attach the trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: Option<Target>) -> Self {
        self.trigger = trigger;
        self
    }
}

/// Effects deferred while a target is pending.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EffectQueue {
    pending: VecDeque<QueuedEffect>,
}

impl EffectQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of queued effects.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn push(&mut self, effect: QueuedEffect) {
        if !effect.text.is_empty() {
            self.pending.push_back(effect);
        }
    }

    /// Next effect in firing order.
    pub fn pop(&mut self) -> Option<QueuedEffect> {
        self.pending.pop_front()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
