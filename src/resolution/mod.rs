//! Resolution state: what the game is waiting for between entry points.
//!
//! The interpreter can suspend in the middle of a chain of triggers. This
//! module holds everything the orchestration layer keeps across that gap:
//!
//! - **`EffectQueue`**: triggered effects that fired while a target was
//!   pending. They run, in order, once the pending effect is resolved.
//! - **`Selection`**: what the next player input means: nothing, the
//!   target of a declared attack, or the target of a pending effect.
//!
//! ## Example Usage
//!
//! ```
//! use shadow_rules::core::{EntityId, PlayerId};
//! use shadow_rules::resolution::{EffectQueue, QueuedEffect, ResolutionStatus};
//!
//! let mut queue = EffectQueue::new();
//! queue.push(QueuedEffect::new("DRWCRD@1", EntityId::new(3), PlayerId::FIRST));
//! assert_eq!(queue.pending_count(), 1);
//!
//! let next = queue.pop().unwrap();
//! assert_eq!(next.text, "DRWCRD@1");
//! assert!(queue.is_complete());
//! assert_eq!(ResolutionStatus::default(), ResolutionStatus::Complete);
//! ```

mod queue;
mod selection;

pub use queue::{EffectQueue, QueuedEffect};
pub use selection::{DeclaredAttack, Selection};

use serde::{Deserialize, Serialize};

use crate::effects::TargetKind;

/// Status reported after every entry point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// Nothing is waiting; the active player may act.
    #[default]
    Complete,

    /// An effect is suspended until a target of this kind is selected.
    AwaitingTarget(TargetKind),
}

impl ResolutionStatus {
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, ResolutionStatus::Complete)
    }
}
