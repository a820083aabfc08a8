//! Effect interpreter for card abilities.
//!
//! Card data carries abilities as opcode strings (`TAG@arg@arg...`). This
//! module turns them into state changes:
//!
//! - `Opcode`: a parsed opcode string
//! - `Condition` / `Variable`: the two small sub-languages opcodes embed
//! - `OpcodeRegistry`: tag to handler table, filled by `handlers`
//! - `Interpreter`: the two-phase `process` / `proceed` protocol
//! - `TargetKind`: what a suspended effect is waiting for
//!
//! ## Design Philosophy
//!
//! Handlers are plain functions over an [`EffectScope`]. They never see
//! the orchestration layer: triggered follow-ups, the destroy sweep and
//! target prompting all happen above this module. A handler only mutates
//! state and reports whether it finished, failed its precondition or needs
//! a target.

mod opcode;
mod condition;
mod variable;
mod context;
mod ops;
mod targeting;
mod registry;
mod handlers;
mod interpreter;

pub use opcode::Opcode;
pub use condition::Condition;
pub use variable::Variable;
pub use context::EffectScope;
pub use targeting::{Target, TargetKind};
pub use registry::{BeginFn, DescribeFn, OpcodeHandler, OpcodeRegistry, Outcome, ResolveFn};
pub use interpreter::{Interpreter, PendingEffect};
