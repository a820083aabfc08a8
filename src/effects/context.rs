//! The scope an opcode runs in.
//!
//! `EffectScope` bundles what every handler needs: the mutable game state,
//! the card factory for anything the effect creates, the card the effect
//! belongs to and the player who owns it. It lives only for the duration
//! of one `process` or `proceed` call; nothing in it outlives the call.

use crate::cards::{Card, CardFactory, Follower};
use crate::core::{EntityId, GameState, PlayerId};
use crate::error::Result;
use crate::player::Player;

use super::condition::Condition;
use super::variable::Variable;

/// Borrowed context for one opcode invocation.
pub struct EffectScope<'a> {
    pub state: &'a mut GameState,
    pub cards: &'a dyn CardFactory,
    /// Card the effect is printed on.
    pub source: EntityId,
    /// Player who owns the source card.
    pub owner: PlayerId,
}

impl<'a> EffectScope<'a> {
    pub fn new(
        state: &'a mut GameState,
        cards: &'a dyn CardFactory,
        source: EntityId,
        owner: PlayerId,
    ) -> Self {
        Self {
            state,
            cards,
            source,
            owner,
        }
    }

    #[must_use]
    pub fn opponent(&self) -> PlayerId {
        self.owner.opponent()
    }

    // === Players ===

    /// The effect owner.
    #[must_use]
    pub fn me(&self) -> &Player {
        self.state.player(self.owner)
    }

    pub fn me_mut(&mut self) -> &mut Player {
        self.state.player_mut(self.owner)
    }

    /// The effect owner's opponent.
    #[must_use]
    pub fn foe(&self) -> &Player {
        self.state.player(self.opponent())
    }

    pub fn foe_mut(&mut self) -> &mut Player {
        let opponent = self.opponent();
        self.state.player_mut(opponent)
    }

    // === Source card ===

    pub fn source_card(&self) -> Result<&Card> {
        self.state.arena.get(self.source)
    }

    pub fn source_card_mut(&mut self) -> Result<&mut Card> {
        self.state.arena.get_mut(self.source)
    }

    /// Source card as a follower; a configuration error for other variants.
    pub fn source_follower_mut(&mut self) -> Result<&mut Follower> {
        self.state.arena.follower_mut(self.source)
    }

    /// Name of the source card, used to tag buffs.
    pub fn source_name(&self) -> Result<String> {
        Ok(self.source_card()?.name().to_string())
    }

    // === Sub-languages ===

    /// Parse and evaluate a condition token.
    pub fn check(&mut self, token: &str) -> Result<bool> {
        Condition::parse(token)?.evaluate(self)
    }

    /// Parse and evaluate a variable token.
    pub fn value(&mut self, token: &str) -> Result<i32> {
        Variable::parse(token)?.evaluate(self)
    }
}
