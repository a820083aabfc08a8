//! Game operations shared by opcode handlers.
//!
//! Handlers stay short by composing these. Every operation that can end
//! the game (leader damage, drawing) records the winner on the state and
//! reports whether play continues.
//!
//! Whole-field operations work on a snapshot of the field taken before
//! the loop, so creating or removing cards mid-loop cannot skip or repeat
//! a card.

use log::{debug, trace};

use crate::cards::{CraftTrait, Follower, Keyword};
use crate::core::{EntityId, GameState, PlayerId};
use crate::error::Result;

use super::context::EffectScope;
use super::targeting::Target;

impl EffectScope<'_> {
    // === Leaders ===

    /// Damage `player`'s leader. Returns false if it died, ending the game.
    pub fn damage_leader(&mut self, player: PlayerId, amount: i32) -> bool {
        let leader = self.state.player_mut(player).leader_mut();
        leader.take_damage(amount);
        if leader.is_alive() {
            return true;
        }
        self.state.end_game(player.opponent());
        false
    }

    pub fn damage_enemy_leader(&mut self, amount: i32) -> bool {
        self.damage_leader(self.opponent(), amount)
    }

    pub fn damage_own_leader(&mut self, amount: i32) -> bool {
        self.damage_leader(self.owner, amount)
    }

    pub fn heal_own_leader(&mut self, amount: i32) {
        self.me_mut().leader_mut().heal(amount);
    }

    /// Damage a chosen follower, or the chosen leader.
    pub fn damage_target(&mut self, target: Target, amount: i32) -> Result<()> {
        match target {
            Target::Leader(player) => {
                self.damage_leader(player, amount);
                Ok(())
            }
            Target::Card { id, .. } => self.damage_follower(id, amount),
        }
    }

    // === Followers ===

    pub fn damage_follower(&mut self, id: EntityId, amount: i32) -> Result<()> {
        let follower = self.state.arena.follower_mut(id)?;
        if !follower.take_damage(amount) {
            trace!("{} is immune to damage", id);
        }
        Ok(())
    }

    /// Damage every follower on `player`'s field.
    pub fn damage_all_followers(&mut self, player: PlayerId, amount: i32) -> Result<()> {
        for id in self.followers_of(player, |_| true) {
            self.damage_follower(id, amount)?;
        }
        Ok(())
    }

    /// Buff a follower, crediting the source card.
    pub fn buff(&mut self, id: EntityId, attack: i32, health: i32) -> Result<()> {
        let source = self.source_name()?;
        self.state.arena.follower_mut(id)?.buff(attack, health, &source);
        Ok(())
    }

    /// Buff every follower on the owner's field that passes `filter`.
    pub fn buff_all(&mut self, attack: i32, health: i32, filter: impl Fn(&Follower) -> bool) -> Result<()> {
        for id in self.followers_of(self.owner, filter) {
            self.buff(id, attack, health)?;
        }
        Ok(())
    }

    pub fn grant(&mut self, id: EntityId, keyword: Keyword) -> Result<()> {
        self.state.arena.follower_mut(id)?.grant(keyword);
        Ok(())
    }

    /// Grant a keyword to every follower of `player` passing `filter`.
    pub fn grant_all(&mut self, player: PlayerId, keyword: Keyword, filter: impl Fn(&Follower) -> bool) -> Result<()> {
        for id in self.followers_of(player, filter) {
            self.grant(id, keyword)?;
        }
        Ok(())
    }

    pub fn revoke_all(&mut self, player: PlayerId, keyword: Keyword) -> Result<()> {
        for id in self.followers_of(player, |_| true) {
            self.state.arena.follower_mut(id)?.revoke(keyword);
        }
        Ok(())
    }

    /// Ids of `player`'s followers (living or not) that pass `filter`.
    #[must_use]
    pub fn followers_of(&self, player: PlayerId, filter: impl Fn(&Follower) -> bool) -> Vec<EntityId> {
        self.state
            .player(player)
            .field()
            .followers(&self.state.arena)
            .filter(|(_, f)| filter(f))
            .map(|(id, _)| id)
            .collect()
    }

    /// Uniformly pick one of `player`'s living followers that pass `filter`.
    pub fn random_follower(&mut self, player: PlayerId, filter: impl Fn(&Follower) -> bool) -> Option<EntityId> {
        let pool = self.followers_of(player, |f| f.is_alive() && filter(f));
        self.state.rng.choose(&pool).copied()
    }

    pub fn random_officer(&mut self) -> Option<EntityId> {
        self.random_follower(self.owner, |f| f.craft_trait() == CraftTrait::Officer)
    }

    /// Destroy a follower or amulet.
    pub fn destroy(&mut self, id: EntityId) -> Result<()> {
        debug!("destroying {}", id);
        self.state.arena.get_mut(id)?.kill()
    }

    // === Zones ===

    /// Draw for `player`. An empty deck ends the game against them.
    pub fn draw(&mut self, player: PlayerId, amount: usize) -> bool {
        self.state.draw_or_lose(player, amount)
    }

    pub fn draw_own(&mut self, amount: usize) -> bool {
        self.draw(self.owner, amount)
    }

    /// Build a fresh card by name and register it in the arena.
    pub fn create(&mut self, name: &str) -> Result<EntityId> {
        let card = self.cards.create(name)?;
        Ok(self.state.arena.insert(card))
    }

    /// Put a fresh copy of `name` onto the owner's field. False when full.
    pub fn summon(&mut self, name: &str) -> Result<bool> {
        let id = self.create(name)?;
        self.place_on_field(self.owner, id)
    }

    /// Put an existing card onto `player`'s field. False when full.
    pub fn place_on_field(&mut self, player: PlayerId, id: EntityId) -> Result<bool> {
        let placed = {
            let GameState { arena, players, .. } = &mut *self.state;
            players[player].field_mut().add(id, arena)?
        };
        if !placed {
            debug!("{}: field full, {} is lost", player, id);
        }
        Ok(placed)
    }

    /// Put a fresh copy of `name` into the owner's hand. False when full.
    pub fn put_in_hand(&mut self, name: &str) -> Result<bool> {
        let id = self.create(name)?;
        Ok(self.me_mut().hand_mut().add(id))
    }

    /// Return a card from `owner`'s field to their hand as a fresh copy.
    ///
    /// Buffs, damage and keywords are lost. Does nothing when the card is
    /// no longer on that field.
    pub fn return_to_hand(&mut self, id: EntityId, owner: PlayerId) -> Result<()> {
        if !self.state.player_mut(owner).field_mut().remove(id) {
            return Ok(());
        }
        let name = self.state.arena.get(id)?.name().to_string();
        let copy = self.cards.create(&name)?;
        let copy = self.state.arena.insert(copy);
        if !self.state.player_mut(owner).hand_mut().add(copy) {
            debug!("{}: hand full, returned {} is lost", owner, name);
        }
        Ok(())
    }

    /// Return every follower on `player`'s field to their hand.
    pub fn return_all_followers(&mut self, player: PlayerId) -> Result<()> {
        for id in self.followers_of(player, |_| true) {
            self.return_to_hand(id, player)?;
        }
        Ok(())
    }

    /// Remove a card from `owner`'s field without a lastword.
    pub fn banish(&mut self, id: EntityId, owner: PlayerId) {
        if self.state.player_mut(owner).field_mut().remove(id) {
            debug!("{} banished", id);
        }
    }

    /// Move the owner's whole hand to their grave.
    pub fn discard_hand(&mut self) {
        let player = self.me_mut();
        for id in player.hand_mut().discard_all() {
            player.grave_mut().add(id);
        }
    }
}
