//! Target kinds and eligibility.
//!
//! When an opcode needs a choice it returns a [`TargetKind`]. Each kind
//! defines which cards (and, for two kinds, which leader) may be chosen,
//! relative to the player who owns the effect.
//!
//! ## Automatic kinds
//!
//! Four kinds never prompt anyone. The three "entrance" kinds resolve
//! against the follower that just came into play and the fighting kind
//! resolves against the follower being fought. [`TargetKind::auto_target`]
//! picks that card from the trigger, or reports that the effect does not
//! apply.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CraftTrait, Follower};
use crate::core::{EntityId, GameState, PlayerId};

/// Something an effect can be aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A player's leader.
    Leader(PlayerId),
    /// A card, together with the player whose field (or trigger) it belongs to.
    Card { owner: PlayerId, id: EntityId },
}

impl Target {
    #[must_use]
    pub const fn card(owner: PlayerId, id: EntityId) -> Self {
        Target::Card { owner, id }
    }

    #[must_use]
    pub const fn owner(self) -> PlayerId {
        match self {
            Target::Leader(player) => player,
            Target::Card { owner, .. } => owner,
        }
    }

    #[must_use]
    pub const fn card_id(self) -> Option<EntityId> {
        match self {
            Target::Leader(_) => None,
            Target::Card { id, .. } => Some(id),
        }
    }
}

/// What kind of target a suspended effect is waiting for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetKind {
    EnemyFollower,
    FriendlyFollower,
    AnyFollower,
    FriendlyOfficer,
    FriendlyOfficerEntrance,
    EnemyFollowerOrLeader,
    FriendlyFollowerOrLeader,
    FriendlyCountdownAmulet,
    /// Enemy follower with at most this much health.
    EnemyFollowerHpAtMost(i32),
    EnemyFollowerOrAmulet,
    FriendlyFollowerOrAmulet,
    EnemyAmulet,
    FriendlyFollowerEntrance,
    FightingEnemy,
    FriendlyCommanderEntrance,
    FriendlyCommander,
    FriendlyCostOneFollower,
    /// Enemy follower with at least this much attack.
    EnemyFollowerAttackAtLeast(i32),
}

impl TargetKind {
    /// Kinds resolved from the trigger instead of a player choice.
    #[must_use]
    pub const fn is_automatic(self) -> bool {
        matches!(
            self,
            TargetKind::FriendlyOfficerEntrance
                | TargetKind::FriendlyCommanderEntrance
                | TargetKind::FriendlyFollowerEntrance
                | TargetKind::FightingEnemy
        )
    }

    /// Can `target` be chosen for an effect owned by `owner`?
    #[must_use]
    pub fn is_eligible(self, state: &GameState, owner: PlayerId, target: Target) -> bool {
        let enemy = owner.opponent();
        let (side, id) = match target {
            Target::Leader(player) => {
                return match self {
                    TargetKind::EnemyFollowerOrLeader => player == enemy,
                    TargetKind::FriendlyFollowerOrLeader => player == owner,
                    _ => false,
                };
            }
            Target::Card { owner: side, id } => (side, id),
        };

        if state.field_owner(id) != Some(side) {
            return false;
        }
        let Some(card) = state.arena.try_get(id).filter(|c| c.is_alive()) else {
            return false;
        };

        let enemy_follower = |extra: &dyn Fn(&Follower) -> bool| {
            side == enemy && card.as_follower().is_some_and(|f| f.can_be_targeted() && extra(f))
        };
        let friendly_follower = |extra: &dyn Fn(&Card, &Follower) -> bool| {
            side == owner && card.as_follower().is_some_and(|f| extra(card, f))
        };
        let amulet_of = |player: PlayerId| side == player && card.as_amulet().is_some();

        match self {
            TargetKind::EnemyFollower | TargetKind::EnemyFollowerOrLeader => enemy_follower(&|_| true),
            TargetKind::FriendlyFollower | TargetKind::FriendlyFollowerOrLeader => {
                friendly_follower(&|_, _| true)
            }
            TargetKind::AnyFollower => friendly_follower(&|_, _| true) || enemy_follower(&|_| true),
            TargetKind::FriendlyOfficer => {
                friendly_follower(&|_, f| f.craft_trait() == CraftTrait::Officer)
            }
            TargetKind::FriendlyCommander => {
                friendly_follower(&|_, f| f.craft_trait() == CraftTrait::Commander)
            }
            TargetKind::FriendlyCountdownAmulet => {
                side == owner && card.as_amulet().is_some_and(|a| a.is_countdown())
            }
            TargetKind::EnemyFollowerHpAtMost(limit) => enemy_follower(&|f| f.health() <= limit),
            TargetKind::EnemyFollowerOrAmulet => enemy_follower(&|_| true) || amulet_of(enemy),
            TargetKind::FriendlyFollowerOrAmulet => {
                friendly_follower(&|_, _| true) || amulet_of(owner)
            }
            TargetKind::EnemyAmulet => amulet_of(enemy),
            TargetKind::FriendlyCostOneFollower => friendly_follower(&|c, _| c.cost() == 1),
            TargetKind::EnemyFollowerAttackAtLeast(limit) => enemy_follower(&|f| f.attack() >= limit),
            TargetKind::FriendlyOfficerEntrance
            | TargetKind::FriendlyCommanderEntrance
            | TargetKind::FriendlyFollowerEntrance
            | TargetKind::FightingEnemy => false,
        }
    }

    /// Every eligible target, leaders first, then fields in seat order.
    #[must_use]
    pub fn candidates(self, state: &GameState, owner: PlayerId) -> Vec<Target> {
        let leaders = PlayerId::both().map(Target::Leader);
        let cards = state
            .players
            .iter()
            .flat_map(|(pid, p)| p.field().iter().map(move |id| Target::card(pid, id)));
        leaders
            .chain(cards)
            .filter(|&t| self.is_eligible(state, owner, t))
            .collect()
    }

    #[must_use]
    pub fn has_candidates(self, state: &GameState, owner: PlayerId) -> bool {
        !self.candidates(state, owner).is_empty()
    }

    /// Resolve an automatic kind from the trigger that fired the effect.
    ///
    /// Returns `None` when the kind needs a choice or the trigger does not
    /// qualify.
    #[must_use]
    pub fn auto_target(self, state: &GameState, owner: PlayerId, trigger: Option<Target>) -> Option<Target> {
        let trigger = trigger?;
        let entering = |craft_trait: Option<CraftTrait>| -> Option<Target> {
            let id = trigger.card_id()?;
            let follower = state.arena.as_follower(id)?;
            let fits = craft_trait.map_or(true, |t| follower.craft_trait() == t);
            (trigger.owner() == owner && fits).then_some(trigger)
        };

        match self {
            TargetKind::FriendlyOfficerEntrance => entering(Some(CraftTrait::Officer)),
            TargetKind::FriendlyCommanderEntrance => entering(Some(CraftTrait::Commander)),
            TargetKind::FriendlyFollowerEntrance => entering(None),
            TargetKind::FightingEnemy => Some(trigger),
            _ => None,
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetKind::EnemyFollower => write!(f, "an enemy follower"),
            TargetKind::FriendlyFollower => write!(f, "an allied follower"),
            TargetKind::AnyFollower => write!(f, "a follower"),
            TargetKind::FriendlyOfficer => write!(f, "an allied Officer follower"),
            TargetKind::FriendlyOfficerEntrance => write!(f, "the entering Officer follower"),
            TargetKind::EnemyFollowerOrLeader => write!(f, "an enemy follower or the enemy leader"),
            TargetKind::FriendlyFollowerOrLeader => write!(f, "an allied follower or your leader"),
            TargetKind::FriendlyCountdownAmulet => write!(f, "an allied countdown amulet"),
            TargetKind::EnemyFollowerHpAtMost(n) => write!(f, "an enemy follower with {} health or less", n),
            TargetKind::EnemyFollowerOrAmulet => write!(f, "an enemy follower or amulet"),
            TargetKind::FriendlyFollowerOrAmulet => write!(f, "an allied follower or amulet"),
            TargetKind::EnemyAmulet => write!(f, "an enemy amulet"),
            TargetKind::FriendlyFollowerEntrance => write!(f, "the entering follower"),
            TargetKind::FightingEnemy => write!(f, "the follower being fought"),
            TargetKind::FriendlyCommanderEntrance => write!(f, "the entering Commander follower"),
            TargetKind::FriendlyCommander => write!(f, "an allied Commander follower"),
            TargetKind::FriendlyCostOneFollower => write!(f, "an allied 1-cost follower"),
            TargetKind::EnemyFollowerAttackAtLeast(n) => {
                write!(f, "an enemy follower with at least {} attack", n)
            }
        }
    }
}
