//! Combat between followers and against leaders.
//!
//! ## Legality
//!
//! - Storm followers may attack anything, Rush followers only followers.
//! - While the defending field holds a living Ward follower, an attacker
//!   without ward-pierce may only attack Ward followers.
//! - Followers in Ambush cannot be attacked.
//!
//! Every check runs before the first trigger fires, so a rejected attack
//! leaves the game untouched.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::cards::{Follower, TriggerSlot};
use crate::core::{EntityId, PlayerId};
use crate::effects::Target;
use crate::error::{Result, RulesError};
use crate::resolution::{DeclaredAttack, ResolutionStatus, Selection};

use super::game::Game;
use super::presenter::Presenter;

/// What an attack is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackTarget {
    /// The defending leader.
    Leader,
    /// A follower on the defending field.
    Follower(EntityId),
}

impl<P: Presenter> Game<P> {
    /// Pick `attacker` as the attacking follower and wait for a target.
    pub fn declare_attack(&mut self, player: PlayerId, attacker: EntityId) -> Result<()> {
        self.ensure_can_act(player)?;
        let follower = self.attacker(player, attacker)?;
        if !follower.status().can_attack_follower() {
            return Err(RulesError::CannotAttack);
        }
        debug!("{}: {} declared as attacker", player, attacker);
        self.selection = Selection::Attack(DeclaredAttack { player, attacker });
        self.presenter.attack_declared(player, attacker);
        Ok(())
    }

    /// Finish the declared attack against `target`.
    ///
    /// An illegal target is rejected and the declaration stands.
    pub fn confirm_attack(&mut self, target: AttackTarget) -> Result<ResolutionStatus> {
        if self.state.is_over() {
            return Err(RulesError::GameOver);
        }
        let DeclaredAttack { player, attacker } =
            self.selection.attack().ok_or(RulesError::NoAttackDeclared)?;
        self.check_attack(player, attacker, target)?;
        self.selection = Selection::Idle;

        match target {
            AttackTarget::Leader => self.attack_leader(player, attacker)?,
            AttackTarget::Follower(defender) => self.attack_follower(player, attacker, defender)?,
        }
        self.clean_field()?;
        Ok(self.settle())
    }

    /// Drop a declared attack.
    pub fn cancel_attack(&mut self) {
        if self.selection.attack().is_some() {
            self.selection = Selection::Idle;
        }
    }

    /// Declare and confirm in one step.
    pub fn attack(&mut self, player: PlayerId, attacker: EntityId, target: AttackTarget) -> Result<ResolutionStatus> {
        self.declare_attack(player, attacker)?;
        let result = self.confirm_attack(target);
        if result.is_err() {
            self.cancel_attack();
        }
        result
    }

    /// Would `attacker` be allowed to hit `target` right now?
    #[must_use]
    pub fn can_attack(&self, player: PlayerId, attacker: EntityId, target: AttackTarget) -> bool {
        self.check_attack(player, attacker, target).is_ok()
    }

    // === Validation ===

    fn attacker(&self, player: PlayerId, attacker: EntityId) -> Result<&Follower> {
        if !self.state.player(player).field().contains(attacker) {
            return Err(RulesError::CardNotOnField(attacker));
        }
        self.state
            .arena
            .living_follower(attacker)
            .ok_or(RulesError::CannotAttack)
    }

    fn check_attack(&self, player: PlayerId, attacker: EntityId, target: AttackTarget) -> Result<()> {
        let follower = self.attacker(player, attacker)?;
        let defending = self.state.player(player.opponent()).field();
        let ward_blocks = !defending.have_no_ward(&self.state.arena) && !follower.has_ward_pierce();

        match target {
            AttackTarget::Leader => {
                if !follower.status().can_attack_leader() {
                    return Err(RulesError::CannotAttack);
                }
                if ward_blocks {
                    return Err(RulesError::IllegalAttackTarget);
                }
            }
            AttackTarget::Follower(defender) => {
                if !follower.status().can_attack_follower() {
                    return Err(RulesError::CannotAttack);
                }
                let target = defending
                    .contains(defender)
                    .then(|| self.state.arena.living_follower(defender))
                    .flatten()
                    .ok_or(RulesError::IllegalAttackTarget)?;
                if target.has_ambush() || (ward_blocks && !target.has_ward()) {
                    return Err(RulesError::IllegalAttackTarget);
                }
            }
        }
        Ok(())
    }

    // === Resolution ===

    fn attack_follower(&mut self, player: PlayerId, attacker: EntityId, defender: EntityId) -> Result<()> {
        let enemy = player.opponent();
        info!("{}: {} attacks {}", player, attacker, defender);

        self.fire(attacker, player, TriggerSlot::Fight, Some(Target::card(enemy, defender)))?;
        self.fire(attacker, player, TriggerSlot::Attack, Some(Target::card(enemy, defender)))?;
        if self.state.arena.is_alive(defender) {
            self.fire(defender, enemy, TriggerSlot::Fight, Some(Target::card(player, attacker)))?;
        }
        if self.state.is_over() {
            return Ok(());
        }

        if self.state.arena.is_alive(defender) {
            self.exchange_damage(player, attacker, defender)?;
        }
        if let Some(follower) = self.state.arena.get_mut(attacker)?.as_follower_mut() {
            follower.finish_attack();
        }
        Ok(())
    }

    /// Simultaneous damage, then drain and bane.
    ///
    /// The attacker strikes even if a trigger already killed it. Bane
    /// destroys its recipient whether or not the damage landed.
    fn exchange_damage(&mut self, player: PlayerId, attacker: EntityId, defender: EntityId) -> Result<()> {
        let arena = &mut self.state.arena;
        let (power, bane, drain) = {
            let a = arena.follower(attacker)?;
            (a.attack(), a.has_bane(), a.has_drain())
        };
        let (counter, counter_bane) = {
            let d = arena.follower(defender)?;
            (d.attack(), d.has_bane())
        };

        arena.follower_mut(defender)?.take_damage(power);
        arena.follower_mut(attacker)?.take_damage(counter);
        if bane {
            arena.follower_mut(defender)?.kill();
        }
        if counter_bane {
            arena.follower_mut(attacker)?.kill();
        }
        if drain {
            self.state.player_mut(player).leader_mut().heal(power);
        }
        Ok(())
    }

    fn attack_leader(&mut self, player: PlayerId, attacker: EntityId) -> Result<()> {
        let enemy = player.opponent();
        info!("{}: {} attacks the enemy leader", player, attacker);

        self.fire(attacker, player, TriggerSlot::Attack, Some(Target::Leader(enemy)))?;
        if self.state.is_over() {
            return Ok(());
        }

        let (power, drain) = {
            let follower = self.state.arena.follower(attacker)?;
            (follower.attack(), follower.has_drain())
        };
        self.state.player_mut(enemy).leader_mut().take_damage(power);
        if drain {
            self.state.player_mut(player).leader_mut().heal(power);
        }
        if !self.state.player(enemy).leader().is_alive() {
            self.state.end_game(player);
        }
        if let Some(follower) = self.state.arena.get_mut(attacker)?.as_follower_mut() {
            follower.finish_attack();
        }
        Ok(())
    }
}
