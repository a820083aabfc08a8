//! Rules configuration.
//!
//! Every numeric rule constant lives in [`RulesConfig`]. The defaults are
//! the standard ruleset; tests and variants override individual values with
//! the `with_*` builders:
//!
//! ```
//! use shadow_rules::core::RulesConfig;
//!
//! let config = RulesConfig::default().with_hand_capacity(5).with_leader_health(10);
//! assert_eq!(config.hand_capacity, 5);
//! assert_eq!(config.field_capacity, 5);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::player::RoundOrder;
use crate::error::{Result, RulesError};

/// Numeric rule constants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Maximum cards in hand.
    pub hand_capacity: usize,
    /// Maximum cards on the field.
    pub field_capacity: usize,
    /// Size of a standard deck.
    pub deck_size: usize,
    /// Cards drawn by each player before the first round.
    pub opening_hand: usize,
    /// Leader starting and maximum health.
    pub leader_health: i32,
    /// Ceiling for a player's max cost.
    pub max_cost: i32,
    /// Starting evolve points for the Offensive player.
    pub offensive_evolve_points: u32,
    /// Starting evolve points for the Defensive player.
    pub defensive_evolve_points: u32,
    /// First round in which the Offensive player may evolve.
    pub offensive_evolve_round: u32,
    /// First round in which the Defensive player may evolve.
    pub defensive_evolve_round: u32,
    /// Cards drawn by the Defensive player at the start of round 1.
    pub defensive_first_draw: usize,
    /// Cards drawn at the start of every other round.
    pub round_draw: usize,
    /// Max cost at which overflow becomes active.
    pub overflow_threshold: i32,
    /// Leader health at or below which vengeance becomes active.
    pub vengeance_threshold: i32,
    /// Field size below which "until the field is full" summons continue.
    pub summon_fill_limit: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hand_capacity: 9,
            field_capacity: 5,
            deck_size: 40,
            opening_hand: 3,
            leader_health: 20,
            max_cost: 10,
            offensive_evolve_points: 2,
            defensive_evolve_points: 3,
            offensive_evolve_round: 5,
            defensive_evolve_round: 4,
            defensive_first_draw: 2,
            round_draw: 1,
            overflow_threshold: 7,
            vengeance_threshold: 10,
            summon_fill_limit: 4,
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_hand_capacity(mut self, capacity: usize) -> Self {
        self.hand_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_field_capacity(mut self, capacity: usize) -> Self {
        self.field_capacity = capacity;
        self
    }

    #[must_use]
    pub fn with_opening_hand(mut self, cards: usize) -> Self {
        self.opening_hand = cards;
        self
    }

    #[must_use]
    pub fn with_leader_health(mut self, health: i32) -> Self {
        self.leader_health = health;
        self
    }

    #[must_use]
    pub fn with_max_cost(mut self, cost: i32) -> Self {
        self.max_cost = cost;
        self
    }

    /// Set the first evolve round for both round orders.
    #[must_use]
    pub fn with_evolve_rounds(mut self, offensive: u32, defensive: u32) -> Self {
        self.offensive_evolve_round = offensive;
        self.defensive_evolve_round = defensive;
        self
    }

    /// Starting evolve points for a round order.
    #[must_use]
    pub fn evolve_points(&self, order: RoundOrder) -> u32 {
        match order {
            RoundOrder::Offensive => self.offensive_evolve_points,
            RoundOrder::Defensive => self.defensive_evolve_points,
        }
    }

    /// First round in which a round order may evolve.
    #[must_use]
    pub fn evolve_round(&self, order: RoundOrder) -> u32 {
        match order {
            RoundOrder::Offensive => self.offensive_evolve_round,
            RoundOrder::Defensive => self.defensive_evolve_round,
        }
    }

    /// Cards to draw at the start of `round`.
    #[must_use]
    pub fn round_start_draw(&self, order: RoundOrder, round: u32) -> usize {
        if order == RoundOrder::Defensive && round == 1 {
            self.defensive_first_draw
        } else {
            self.round_draw
        }
    }

    /// Reject configurations that cannot host a game.
    pub fn validate(&self) -> Result<()> {
        if self.hand_capacity == 0 {
            return Err(RulesError::InvalidConfig("hand capacity must be positive".into()));
        }
        if self.field_capacity == 0 {
            return Err(RulesError::InvalidConfig("field capacity must be positive".into()));
        }
        if self.leader_health <= 0 {
            return Err(RulesError::InvalidConfig("leader health must be positive".into()));
        }
        if self.max_cost <= 0 {
            return Err(RulesError::InvalidConfig("max cost must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();
        assert_eq!(config.hand_capacity, 9);
        assert_eq!(config.field_capacity, 5);
        assert_eq!(config.evolve_points(RoundOrder::Offensive), 2);
        assert_eq!(config.evolve_points(RoundOrder::Defensive), 3);
        assert_eq!(config.evolve_round(RoundOrder::Offensive), 5);
        assert_eq!(config.evolve_round(RoundOrder::Defensive), 4);
    }

    #[test]
    fn test_round_start_draw() {
        let config = RulesConfig::default();
        assert_eq!(config.round_start_draw(RoundOrder::Defensive, 1), 2);
        assert_eq!(config.round_start_draw(RoundOrder::Defensive, 2), 1);
        assert_eq!(config.round_start_draw(RoundOrder::Offensive, 1), 1);
    }

    #[test]
    fn test_validate() {
        assert!(RulesConfig::default().validate().is_ok());
        let err = RulesConfig::default().with_field_capacity(0).validate().unwrap_err();
        assert!(err.is_configuration());
        assert!(RulesConfig::default().with_hand_capacity(0).validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let config = RulesConfig::default().with_evolve_rounds(1, 1);
        let json = serde_json::to_string(&config).unwrap();
        let back: RulesConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
