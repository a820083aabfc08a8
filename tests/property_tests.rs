//! Property-based tests for the arithmetic the rules rely on.

mod common;

use proptest::prelude::*;

use common::*;
use shadow_rules::cards::{
    Amulet, Card, CardDefinition, Follower, FollowerTemplate, Leader, LeaderClass, MAX_CARD_COST, MIN_CARD_COST,
};
use shadow_rules::core::{EntityId, RulesConfig};
use shadow_rules::zones::{Grave, Hand};

proptest! {
    // ========================================================================
    // Cards
    // ========================================================================

    /// Damage subtracts exactly; a follower lives while health is positive.
    #[test]
    fn prop_follower_damage(attack in 0..10i32, health in 1..10i32, damage in 0..20i32) {
        let mut follower = Follower::from_template(&FollowerTemplate::new(attack, health));
        prop_assert!(follower.take_damage(damage));
        prop_assert_eq!(follower.health(), health - damage);
        prop_assert_eq!(follower.is_alive(), health > damage);
        prop_assert_eq!(follower.attack(), attack);
    }

    /// Leader healing never exceeds maximum health.
    #[test]
    fn prop_leader_heal_capped(damage in 0..20i32, heal in 0..40i32) {
        let mut leader = Leader::new(LeaderClass::Havencraft, 20);
        leader.take_damage(damage);
        leader.heal(heal);
        prop_assert_eq!(leader.health(), (20 - damage + heal).min(20));
    }

    /// Countdown never goes below zero and the amulet breaks at zero.
    #[test]
    fn prop_countdown_floor(start in 1..10i32, ticks in 0..15i32) {
        let mut amulet = Amulet::new(start);
        amulet.decrease_countdown(ticks).unwrap();
        let left = (start - ticks).max(0);
        prop_assert_eq!(amulet.countdown(), Some(left));
        prop_assert_eq!(amulet.is_alive(), left > 0);
    }

    /// Costs can be set anywhere in range and nowhere outside it.
    #[test]
    fn prop_change_cost_range(cost in -5..30i32) {
        let mut card = Card::from_definition(&CardDefinition::spell("Bolt", 1, LeaderClass::Neutral));
        let result = card.change_cost(cost);
        if (MIN_CARD_COST..=MAX_CARD_COST).contains(&cost) {
            prop_assert!(result.is_ok());
            prop_assert_eq!(card.cost(), cost);
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(card.cost(), 1);
        }
    }

    // ========================================================================
    // Zones
    // ========================================================================

    /// A hand never grows past its capacity.
    #[test]
    fn prop_hand_capacity(capacity in 1..12usize, cards in 0..20u32) {
        let mut hand = Hand::new(capacity);
        let accepted = (0..cards).filter(|&i| hand.add(EntityId::new(i))).count();
        prop_assert_eq!(accepted, (cards as usize).min(capacity));
        prop_assert_eq!(hand.len(), accepted);
    }

    /// Necromancy is spent all at once or not at all.
    #[test]
    fn prop_necromancy_all_or_nothing(buried in 0..10u32, usage in 0..12u32) {
        let mut grave = Grave::new();
        for i in 0..buried {
            grave.add(EntityId::new(i));
        }
        let spent = grave.use_necromancy(usage);
        prop_assert_eq!(spent, usage <= buried);
        let left = if spent { buried - usage } else { buried };
        prop_assert_eq!(grave.necromancy(), left);
    }

    // ========================================================================
    // Games
    // ========================================================================

    /// The same seed deals the same opening hands.
    #[test]
    fn prop_seed_determinism(seed in any::<u64>()) {
        let deck = ["Goblin", "Brute", "Wall", "Viper", "Leech", "Fighter"].repeat(5);
        let hand_names = |seed: u64| -> Vec<String> {
            let game = builder().seed(seed).deck(P1, deck.clone()).start().unwrap();
            game.player(P1)
                .hand()
                .iter()
                .map(|id| game.state().arena.get(id).unwrap().name().to_string())
                .collect()
        };
        prop_assert_eq!(hand_names(seed), hand_names(seed));
    }
}

/// Rule configurations survive a JSON round trip, so variants can be stored.
#[test]
fn test_config_json() {
    let config = RulesConfig::default().with_hand_capacity(7).with_evolve_rounds(3, 2);
    let json = serde_json::to_string(&config).unwrap();
    let back: RulesConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
    assert!(back.validate().is_ok());
}

/// Invalid configurations are refused before a game starts.
#[test]
fn test_invalid_config_rejected() {
    let result = builder().config(RulesConfig::default().with_hand_capacity(0)).start();
    assert!(result.is_err());
}
