//! Effect interpreter integration tests.
//!
//! Opcodes running through a live game: spellboost, necromancy, sweeps
//! with lastwords, entrance-triggered buffs and configuration errors.

mod common;

use common::*;
use shadow_rules::core::EntityId;
use shadow_rules::effects::Target;
use shadow_rules::error::{ErrorKind, RulesError};
use shadow_rules::resolution::ResolutionStatus;
use shadow_rules::rules::{Game, RecordingPresenter};

fn card_cost(game: &Game<RecordingPresenter>, id: EntityId) -> i32 {
    game.state().arena.get(id).unwrap().cost()
}

// ============================================================================
// Spellboost
// ============================================================================

/// Every spell played lowers the cost of cost-boost cards in hand.
#[test]
fn test_spellboost_lowers_cost() {
    let mut game = game_at_round(3);
    let reaper = give(&mut game, P1, "Reaper");
    let bolt = give(&mut game, P1, "Bolt");
    let inferno = give(&mut game, P1, "Inferno");
    let goblin = summon(&mut game, P2, "Goblin");
    assert_eq!(card_cost(&game, reaper), 4);

    // The boost lands while Bolt is still waiting for its target.
    game.play_card(P1, bolt).unwrap();
    assert_eq!(card_cost(&game, reaper), 3);
    game.select_target(Target::card(P2, goblin)).unwrap();
    assert!(in_grave(&game, P1, bolt));

    game.play_card(P1, inferno).unwrap();
    assert_eq!(card_cost(&game, reaper), 2);
    assert!(game
        .describe("KILENEFOLBSTCST", reaper)
        .unwrap()
        .contains("currently 2"));
}

// ============================================================================
// Necromancy
// ============================================================================

/// A necromancy variable spends the resource only when enough is there.
#[test]
fn test_necromancy_variable() {
    let mut game = game_at_round(2);
    let first = give(&mut game, P1, "Necro");
    let second = give(&mut game, P1, "Necro");

    game.play_card(P1, first).unwrap();
    assert_eq!(leader_health(&game, P2), 19);
    assert_eq!(game.player(P1).grave().necromancy(), 0);

    game.state_mut().player_mut(P1).grave_mut().add_necromancy(3);
    game.play_card(P1, second).unwrap();
    assert_eq!(leader_health(&game, P2), 15);
    assert_eq!(game.player(P1).grave().necromancy(), 1);
}

/// Describing an effect never spends necromancy.
#[test]
fn test_describe_is_pure() {
    let mut game = new_game();
    let necro = give(&mut game, P1, "Necro");
    game.state_mut().player_mut(P1).grave_mut().add_necromancy(5);

    let text = game.describe("DMGENELEDVAR@NEC?2?4?1", necro).unwrap();
    assert!(!text.is_empty());
    assert_eq!(game.player(P1).grave().necromancy(), 5);
    assert_eq!(leader_health(&game, P2), 20);
}

// ============================================================================
// Sweeps and lastwords
// ============================================================================

/// Area damage kills several followers; each goes to the grave and its
/// lastword runs for its owner.
#[test]
fn test_area_damage_with_lastword() {
    let mut game = new_game();
    let inferno = give(&mut game, P1, "Inferno");
    let fighter = summon(&mut game, P2, "Fighter");
    let goblin = summon(&mut game, P2, "Goblin");
    let wall = summon(&mut game, P2, "Wall");
    let p2_hand = game.player(P2).hand().len();

    let status = game.play_card(P1, inferno).unwrap();
    assert_eq!(status, ResolutionStatus::Complete);

    assert!(in_grave(&game, P2, fighter));
    assert!(in_grave(&game, P2, goblin));
    assert_eq!(health(&game, wall), 2);
    assert_eq!(game.player(P2).field().len(), 1);
    assert_eq!(game.player(P2).grave().necromancy(), 2);
    assert_eq!(game.player(P2).hand().len(), p2_hand + 1);
}

/// The vanishing card leaves play without reaching the grave.
#[test]
fn test_vanishing_card() {
    let mut game = new_game();
    let bolt = give(&mut game, P1, "Bolt");
    let ghost = summon(&mut game, P2, "Ghost");

    game.play_card(P1, bolt).unwrap();
    game.select_target(Target::card(P2, ghost)).unwrap();

    assert!(!on_field(&game, P2, ghost));
    assert!(!in_grave(&game, P2, ghost));
    assert_eq!(game.player(P2).grave().necromancy(), 0);
}

// ============================================================================
// Entrance triggers
// ============================================================================

/// An ally-enter buff applies only when the entering follower qualifies.
#[test]
fn test_commander_entrance_buff() {
    let mut game = game_at_round(2);
    let captain = summon(&mut game, P1, "Captain");
    let knight = give(&mut game, P1, "Knight");
    let goblin = give(&mut game, P1, "Goblin");

    game.play_card(P1, knight).unwrap();
    let buffed = game.state().arena.follower(captain).unwrap();
    assert_eq!((buffed.attack(), buffed.health()), (3, 3));
    assert_eq!(buffed.buffs().len(), 1);

    // Not a Commander: the effect is dropped without a prompt or notice.
    let status = game.play_card(P1, goblin).unwrap();
    assert!(status.is_complete());
    assert_eq!(health(&game, captain), 3);
    assert_eq!(game.presenter().prompt_count(), 0);
    assert_eq!(game.presenter().notices().count(), 0);
}

/// A fanfare fires when the card is played and never again.
#[test]
fn test_fanfare_runs_once() {
    let mut game = game_at_round(2);
    let necro = give(&mut game, P1, "Necro");

    game.play_card(P1, necro).unwrap();
    game.end_round(P1).unwrap();
    game.end_round(P2).unwrap();
    assert_eq!(leader_health(&game, P2), 19);
}

// ============================================================================
// Configuration errors
// ============================================================================

/// Unknown opcodes surface as configuration errors.
#[test]
fn test_unknown_opcode_is_configuration_error() {
    let mut game = new_game();
    let mistake = give(&mut game, P1, "Mistake");

    let err = game.play_card(P1, mistake).unwrap_err();
    assert!(matches!(err, RulesError::UnknownOpcode(ref tag) if tag == "NOSUCHOP"));
    assert!(err.is_configuration());
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

/// Unknown card names are rejected when building a game.
#[test]
fn test_unknown_card_in_deck() {
    let result = builder().deck(P1, ["Goblin", "Dragon"]).start();
    assert!(matches!(result, Err(RulesError::UnknownCard(ref name)) if name == "Dragon"));
}
