//! Opcode registry: tag to handler table.
//!
//! Tags are the contract between card data and the interpreter, so they
//! are matched exactly. Each [`OpcodeHandler`] has up to three parts:
//!
//! - `begin`: runs when the opcode is processed. Applies everything that
//!   needs no choice and returns an [`Outcome`].
//! - `resolve`: runs once a target has been chosen. Present exactly for
//!   opcodes whose `begin` can return `NeedsTarget`.
//! - `describe`: renders card text without touching game state.

use rustc_hash::FxHashMap;

use crate::cards::Card;
use crate::error::{Result, RulesError};

use super::context::EffectScope;
use super::handlers;
use super::opcode::Opcode;
use super::targeting::{Target, TargetKind};

/// Result of processing an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Fully applied.
    Done,
    /// A precondition was false; nothing was applied.
    Fail,
    /// Suspended until a target of this kind is chosen.
    NeedsTarget(TargetKind),
}

pub type BeginFn = fn(&mut EffectScope<'_>, &Opcode) -> Result<Outcome>;
pub type ResolveFn = fn(&mut EffectScope<'_>, &Opcode, Target) -> Result<()>;
pub type DescribeFn = fn(&Opcode, &Card) -> Result<String>;

/// The behaviour bound to one tag.
#[derive(Clone, Copy)]
pub struct OpcodeHandler {
    pub begin: BeginFn,
    pub resolve: Option<ResolveFn>,
    pub describe: DescribeFn,
}

impl OpcodeHandler {
    /// Handler that never needs a target.
    #[must_use]
    pub const fn immediate(begin: BeginFn, describe: DescribeFn) -> Self {
        Self {
            begin,
            resolve: None,
            describe,
        }
    }

    /// Handler that may suspend for a target.
    #[must_use]
    pub const fn targeted(begin: BeginFn, resolve: ResolveFn, describe: DescribeFn) -> Self {
        Self {
            begin,
            resolve: Some(resolve),
            describe,
        }
    }
}

impl std::fmt::Debug for OpcodeHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpcodeHandler")
            .field("targeted", &self.resolve.is_some())
            .finish()
    }
}

/// Tag-keyed handler table.
///
/// ```
/// use shadow_rules::effects::OpcodeRegistry;
///
/// let registry = OpcodeRegistry::standard();
/// assert!(registry.get("DRWCRD").is_ok());
/// assert!(registry.get("DRAW").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct OpcodeRegistry {
    handlers: FxHashMap<String, OpcodeHandler>,
}

impl OpcodeRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in opcode.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        handlers::install(&mut registry);
        registry
    }

    /// Bind `tag`, returning the handler it replaces.
    pub fn register(&mut self, tag: impl Into<String>, handler: OpcodeHandler) -> Option<OpcodeHandler> {
        self.handlers.insert(tag.into(), handler)
    }

    /// Look up a tag. Unknown tags are a configuration error.
    pub fn get(&self, tag: &str) -> Result<&OpcodeHandler> {
        self.handlers
            .get(tag)
            .ok_or_else(|| RulesError::UnknownOpcode(tag.to_string()))
    }

    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.handlers.contains_key(tag)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Card text for one opcode string.
    pub fn describe(&self, text: &str, source: &Card) -> Result<String> {
        let opcode = Opcode::parse(text);
        (self.get(opcode.tag())?.describe)(&opcode, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_tag() {
        let registry = OpcodeRegistry::standard();
        let err = registry.get("NOPE").unwrap_err();
        assert_eq!(err, RulesError::UnknownOpcode("NOPE".into()));
    }

    #[test]
    fn test_register_replaces() {
        let mut registry = OpcodeRegistry::new();
        assert!(registry.is_empty());
        let noop = OpcodeHandler::immediate(|_, _| Ok(Outcome::Done), |_, _| Ok(String::new()));
        assert!(registry.register("NOOP", noop).is_none());
        assert!(registry.register("NOOP", noop).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_standard_covers_catalogue() {
        let registry = OpcodeRegistry::standard();
        assert!(registry.len() >= 100);
        for tag in ["DMGENEFOL", "SUMFULFLDFOL", "GVEETRFRIFOLEFXCOND", "BSTCST", "LUCIFER"] {
            assert!(registry.contains(tag), "{tag}");
        }
    }
}
