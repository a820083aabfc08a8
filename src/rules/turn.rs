//! Round lifecycle.
//!
//! Ending a round fires the leaving player's round-end triggers, settles
//! their followers and hands the round to the opponent, whose round-start
//! draw can end the game.

use log::info;

use crate::cards::TriggerSlot;
use crate::core::{GameState, PlayerId};
use crate::error::Result;
use crate::resolution::{ResolutionStatus, Selection};

use super::game::Game;
use super::presenter::Presenter;

impl<P: Presenter> Game<P> {
    /// End `player`'s round and start the opponent's.
    pub fn end_round(&mut self, player: PlayerId) -> Result<ResolutionStatus> {
        self.ensure_can_act(player)?;
        self.selection = Selection::Idle;
        info!("{}: round {} ends", player, self.state.player(player).round_number());

        let snapshot: Vec<_> = self.state.player(player).field().iter().collect();
        for id in snapshot {
            self.fire(id, player, TriggerSlot::RoundEnd, None)?;
            if self.state.arena.get(id)?.is_entrance_round() {
                self.fire(id, player, TriggerSlot::EntranceEnd, None)?;
            }
            self.state.arena.get_mut(id)?.pass_entrance_round();
        }

        {
            let GameState { arena, players, .. } = &mut self.state;
            players[player].end_round(arena)?;
        }
        self.clean_field()?;
        if self.state.is_over() {
            return Ok(self.settle());
        }

        let next = player.opponent();
        self.state.current = next;
        self.begin_round(next)?;
        Ok(self.settle())
    }

    /// Refresh `player`'s resources, draw, then fire round-start triggers.
    ///
    /// Countdown amulets that expire here are swept before any trigger fires.
    pub(super) fn begin_round(&mut self, player: PlayerId) -> Result<()> {
        let drew = {
            let GameState { arena, players, config, .. } = &mut self.state;
            players[player].begin_round(arena, config)?
        };
        info!("{}: round {} begins", player, self.state.player(player).round_number());
        if !drew {
            info!("{} cannot draw from an empty deck", player);
            self.state.end_game(player.opponent());
            return Ok(());
        }
        self.clean_field()?;

        let snapshot: Vec<_> = self.state.player(player).field().iter().collect();
        for id in snapshot {
            if self.state.player(player).field().contains(id) {
                self.fire(id, player, TriggerSlot::RoundStart, None)?;
            }
        }
        self.clean_field()
    }
}
