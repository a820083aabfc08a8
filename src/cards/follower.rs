//! Follower battle state.
//!
//! A follower keeps its original stats (pre- and post-evolve) next to its
//! current attack and health. Health is allowed to go to zero or below;
//! `is_alive` reports `health > 0` and the destroy sweep does the rest.
//!
//! ## Keyword grants
//!
//! Attack-status keywords interact: Storm does not override Disabled, Rush
//! overrides neither Storm nor Disabled, Attacked does not override
//! Disabled, and Disabled always applies. Revoking Disabled puts the
//! follower back into Entry.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::attributes::{AttackStatus, CraftTrait, Keyword};
use crate::error::{Result, RulesError};

/// Static follower stats used to build new instances.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerTemplate {
    pub attack: i32,
    pub health: i32,
    pub evolve_attack: i32,
    pub evolve_health: i32,
    pub default_status: AttackStatus,
    pub craft_trait: CraftTrait,
    pub bane: bool,
    pub ward: bool,
    pub drain: bool,
    pub ambush: bool,
    pub untargetable: bool,
}

impl FollowerTemplate {
    /// Base stats with no keywords.
    #[must_use]
    pub fn new(attack: i32, health: i32) -> Self {
        Self {
            attack,
            health,
            ..Self::default()
        }
    }

    /// Stat gains on evolve (builder pattern).
    #[must_use]
    pub fn with_evolve(mut self, attack: i32, health: i32) -> Self {
        self.evolve_attack = attack;
        self.evolve_health = health;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: AttackStatus) -> Self {
        self.default_status = status;
        self
    }

    #[must_use]
    pub fn with_trait(mut self, craft_trait: CraftTrait) -> Self {
        self.craft_trait = craft_trait;
        self
    }

    /// Add a printed keyword. Only Bane, Ward, Drain, Ambush and
    /// Untargetable are printed; Storm and Rush come from the default status.
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        match keyword {
            Keyword::Bane => self.bane = true,
            Keyword::Ward => self.ward = true,
            Keyword::Drain => self.drain = true,
            Keyword::Ambush => self.ambush = true,
            Keyword::Untargetable => self.untargetable = true,
            Keyword::Storm => self.default_status = AttackStatus::Storm,
            Keyword::Rush => self.default_status = AttackStatus::Rush,
            _ => {}
        }
        self
    }
}

/// One entry of the append-only buff log.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuffRecord {
    /// Name of the card that granted the buff.
    pub source: String,
    pub attack: i32,
    pub health: i32,
}

/// Runtime state of a follower.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Follower {
    attack: i32,
    health: i32,
    original_attack: i32,
    original_health: i32,
    evolve_attack: i32,
    evolve_health: i32,
    evolved: bool,
    bane: bool,
    ward: bool,
    drain: bool,
    ambush: bool,
    untargetable: bool,
    damage_immune: bool,
    ward_pierce: bool,
    status: AttackStatus,
    craft_trait: CraftTrait,
    buffs: Vector<BuffRecord>,
}

impl Follower {
    /// Create a fresh follower from its template.
    #[must_use]
    pub fn from_template(template: &FollowerTemplate) -> Self {
        Self {
            attack: template.attack,
            health: template.health,
            original_attack: template.attack,
            original_health: template.health,
            evolve_attack: template.evolve_attack,
            evolve_health: template.evolve_health,
            evolved: false,
            bane: template.bane,
            ward: template.ward,
            drain: template.drain,
            ambush: template.ambush,
            untargetable: template.untargetable,
            damage_immune: false,
            ward_pierce: false,
            status: template.default_status,
            craft_trait: template.craft_trait,
            buffs: Vector::new(),
        }
    }

    // === Stats ===

    #[must_use]
    pub fn attack(&self) -> i32 {
        self.attack
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[must_use]
    pub fn original_attack(&self) -> i32 {
        self.original_attack
    }

    #[must_use]
    pub fn original_health(&self) -> i32 {
        self.original_health
    }

    /// Original attack after evolving (original + evolve gain).
    #[must_use]
    pub fn original_evolved_attack(&self) -> i32 {
        self.original_attack + self.evolve_attack
    }

    /// Original health after evolving (original + evolve gain).
    #[must_use]
    pub fn original_evolved_health(&self) -> i32 {
        self.original_health + self.evolve_health
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub fn has_evolved(&self) -> bool {
        self.evolved
    }

    #[must_use]
    pub fn status(&self) -> AttackStatus {
        self.status
    }

    #[must_use]
    pub fn craft_trait(&self) -> CraftTrait {
        self.craft_trait
    }

    #[must_use]
    pub fn buffs(&self) -> &Vector<BuffRecord> {
        &self.buffs
    }

    // === Keywords ===

    #[must_use]
    pub fn has_bane(&self) -> bool {
        self.bane
    }

    #[must_use]
    pub fn has_ward(&self) -> bool {
        self.ward
    }

    #[must_use]
    pub fn has_drain(&self) -> bool {
        self.drain
    }

    #[must_use]
    pub fn has_ambush(&self) -> bool {
        self.ambush
    }

    #[must_use]
    pub fn has_untargetable(&self) -> bool {
        self.untargetable
    }

    #[must_use]
    pub fn has_damage_immune(&self) -> bool {
        self.damage_immune
    }

    #[must_use]
    pub fn has_ward_pierce(&self) -> bool {
        self.ward_pierce
    }

    /// Effects may only choose followers without Untargetable or Ambush.
    #[must_use]
    pub fn can_be_targeted(&self) -> bool {
        !(self.untargetable || self.ambush)
    }

    // === Mutation ===

    /// Lose `damage` health unless damage-immune. Returns whether damage was taken.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if self.damage_immune {
            return false;
        }
        self.health -= damage;
        true
    }

    /// Restore health. Followers have no health cap.
    pub fn heal(&mut self, amount: i32) {
        self.health += amount;
    }

    /// Force health to zero.
    pub fn kill(&mut self) {
        self.health = 0;
    }

    /// Add attack and health, recording the source in the buff log.
    pub fn buff(&mut self, attack: i32, health: i32, source: &str) {
        self.attack += attack;
        self.health += health;
        self.buffs.push_back(BuffRecord {
            source: source.to_string(),
            attack,
            health,
        });
    }

    /// Override current attack.
    pub fn set_attack(&mut self, attack: i32) {
        self.attack = attack;
    }

    /// Override current health.
    pub fn set_health(&mut self, health: i32) {
        self.health = health;
    }

    /// Grant a simple effect.
    pub fn grant(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::Storm => {
                if self.status != AttackStatus::Disabled {
                    self.status = AttackStatus::Storm;
                }
            }
            Keyword::Rush => {
                if !matches!(self.status, AttackStatus::Storm | AttackStatus::Disabled) {
                    self.status = AttackStatus::Rush;
                }
            }
            Keyword::Attacked => {
                if self.status != AttackStatus::Disabled {
                    self.status = AttackStatus::Attacked;
                }
            }
            Keyword::Disabled => self.status = AttackStatus::Disabled,
            Keyword::Bane => self.bane = true,
            Keyword::Ward => self.ward = true,
            Keyword::Drain => self.drain = true,
            Keyword::Ambush => self.ambush = true,
            Keyword::Untargetable => self.untargetable = true,
            Keyword::DamageImmune => self.damage_immune = true,
            Keyword::WardPierce => self.ward_pierce = true,
        }
    }

    /// Revoke a simple effect. Only Damage immune and Disabled can be revoked.
    pub fn revoke(&mut self, keyword: Keyword) {
        match keyword {
            Keyword::DamageImmune => self.damage_immune = false,
            Keyword::Disabled => self.status = AttackStatus::Entry,
            _ => {}
        }
    }

    /// Evolve once, adding the evolve gains. Entry becomes Rush.
    pub fn evolve(&mut self) -> Result<()> {
        if self.evolved {
            return Err(RulesError::AlreadyEvolved);
        }
        self.attack += self.evolve_attack;
        self.health += self.evolve_health;
        self.evolved = true;
        if self.status == AttackStatus::Entry {
            self.status = AttackStatus::Rush;
        }
        Ok(())
    }

    /// Settle the attacker's own state after an attack.
    pub(crate) fn finish_attack(&mut self) {
        self.ambush = false;
        self.status = AttackStatus::Attacked;
    }
}
