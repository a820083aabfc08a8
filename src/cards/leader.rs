//! Leader: the player's avatar and life total.

use serde::{Deserialize, Serialize};

use super::attributes::LeaderClass;

/// A player's leader.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Leader {
    class: LeaderClass,
    health: i32,
    max_health: i32,
    damage_immune: bool,
}

impl Leader {
    /// Create a leader at full health.
    #[must_use]
    pub fn new(class: LeaderClass, max_health: i32) -> Self {
        Self {
            class,
            health: max_health,
            max_health,
            damage_immune: false,
        }
    }

    #[must_use]
    pub fn class(&self) -> LeaderClass {
        self.class
    }

    /// Character name of this leader.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.class.leader_name()
    }

    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    #[must_use]
    pub fn has_damage_immune(&self) -> bool {
        self.damage_immune
    }

    /// Lose `damage` health unless damage-immune. Returns whether damage was taken.
    pub fn take_damage(&mut self, damage: i32) -> bool {
        if self.damage_immune {
            return false;
        }
        self.health -= damage;
        true
    }

    /// Restore health, capped at max health.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn grant_damage_immune(&mut self) {
        self.damage_immune = true;
    }

    pub fn revoke_damage_immune(&mut self) {
        self.damage_immune = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heal_cap() {
        let mut leader = Leader::new(LeaderClass::Havencraft, 20);
        leader.take_damage(5);
        leader.heal(3);
        assert_eq!(leader.health(), 18);
        leader.heal(10);
        assert_eq!(leader.health(), 20);
    }

    #[test]
    fn test_damage_immune() {
        let mut leader = Leader::new(LeaderClass::Runecraft, 20);
        leader.grant_damage_immune();
        assert!(!leader.take_damage(30));
        assert!(leader.is_alive());

        leader.revoke_damage_immune();
        leader.take_damage(20);
        assert!(!leader.is_alive());
        assert_eq!(leader.name(), "Isabelle");
    }
}
