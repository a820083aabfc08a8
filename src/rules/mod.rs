//! Game orchestration: playing cards, combat, rounds and targeting.
//!
//! [`Game`] owns a [`GameState`](crate::core::GameState) together with the
//! interpreter, the deferred-effect queue and a [`Presenter`]. Every entry
//! point validates first, mutates second, and finishes by running the
//! destroy sweep and reporting a
//! [`ResolutionStatus`](crate::resolution::ResolutionStatus).
//!
//! ## Entry points
//!
//! - `play_card`, `evolve`: actions of the active player
//! - `declare_attack` / `confirm_attack` / `attack`: combat
//! - `end_round`: hand the round to the opponent
//! - `select_target`: answer a target prompt
//!
//! Once a [`GameResult`] is recorded every entry point returns
//! [`RulesError::GameOver`](crate::error::RulesError::GameOver).

mod game;
mod combat;
mod turn;
mod presenter;

pub use game::{DeckList, Game, GameBuilder};
pub use combat::AttackTarget;
pub use presenter::{NullPresenter, Presenter, PresenterEvent, RecordingPresenter};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
        }
    }

    #[must_use]
    pub fn loser(&self) -> PlayerId {
        match self {
            GameResult::Winner(p) => p.opponent(),
        }
    }
}
