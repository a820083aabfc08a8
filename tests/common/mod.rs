//! Shared fixtures for the integration tests.
//!
//! A small card pool exercising every trigger slot, plus helpers that put
//! cards straight into zones so each test starts from the position it needs.

#![allow(dead_code)]

use shadow_rules::cards::{
    CardDefinition, CardRegistry, CraftTrait, FollowerTemplate, Keyword, LeaderClass, TriggerSlot,
};
use shadow_rules::core::{EntityId, GameState, PlayerId};
use shadow_rules::rules::{Game, GameBuilder, RecordingPresenter};

pub const P1: PlayerId = PlayerId::FIRST;
pub const P2: PlayerId = PlayerId::SECOND;

/// The test card pool.
pub fn card_pool() -> CardRegistry {
    use LeaderClass::Neutral;

    CardRegistry::new().with_cards([
        // === Plain followers ===
        CardDefinition::follower("Goblin", 1, Neutral, FollowerTemplate::new(1, 2)),
        CardDefinition::follower("Brute", 3, Neutral, FollowerTemplate::new(3, 2)),
        CardDefinition::follower("Raider", 3, Neutral, FollowerTemplate::new(3, 2))
            .with_trigger(TriggerSlot::Lastword, "DRWCRD@1"),
        CardDefinition::follower("Fighter", 2, Neutral, FollowerTemplate::new(2, 2))
            .with_trigger(TriggerSlot::Lastword, "DRWCRD@1"),
        CardDefinition::follower("Ghost", 1, Neutral, FollowerTemplate::new(1, 1)),
        // === Keywords ===
        CardDefinition::follower(
            "Wall",
            2,
            Neutral,
            FollowerTemplate::new(2, 4).with_keyword(Keyword::Ward),
        ),
        CardDefinition::follower(
            "Viper",
            2,
            Neutral,
            FollowerTemplate::new(1, 1).with_keyword(Keyword::Bane),
        ),
        CardDefinition::follower(
            "Leech",
            2,
            Neutral,
            FollowerTemplate::new(2, 2).with_keyword(Keyword::Drain),
        ),
        CardDefinition::follower(
            "Lurker",
            2,
            Neutral,
            FollowerTemplate::new(1, 1).with_keyword(Keyword::Ambush),
        ),
        CardDefinition::follower(
            "Charger",
            2,
            Neutral,
            FollowerTemplate::new(2, 1).with_keyword(Keyword::Storm),
        ),
        CardDefinition::follower(
            "Squire",
            1,
            Neutral,
            FollowerTemplate::new(1, 1).with_keyword(Keyword::Rush),
        ),
        // === Traits and triggers ===
        CardDefinition::follower(
            "Knight",
            1,
            LeaderClass::Swordcraft,
            FollowerTemplate::new(1, 1).with_trait(CraftTrait::Commander),
        ),
        CardDefinition::follower(
            "Captain",
            2,
            LeaderClass::Swordcraft,
            FollowerTemplate::new(2, 2).with_trait(CraftTrait::Officer),
        )
        .with_trigger(TriggerSlot::AllyEnter, "BUFSLFCOMETR@1@1"),
        CardDefinition::follower("Duelist", 2, Neutral, FollowerTemplate::new(2, 3))
            .with_trigger(TriggerSlot::Fight, "DMGFIGENEFOL@1"),
        CardDefinition::follower("Spiker", 2, Neutral, FollowerTemplate::new(2, 4))
            .with_trigger(TriggerSlot::Fight, "DMGFIGENEFOL@5"),
        CardDefinition::follower("Martyr", 2, Neutral, FollowerTemplate::new(2, 1))
            .with_trigger(TriggerSlot::Attack, "DMGALLFRIFOL@5"),
        CardDefinition::follower("Sentry", 1, Neutral, FollowerTemplate::new(1, 3))
            .with_trigger(TriggerSlot::RoundEnd, "DMGENEFOL@1"),
        CardDefinition::follower("Hunter", 1, Neutral, FollowerTemplate::new(1, 1))
            .with_trigger(TriggerSlot::Fanfare, "DMGENETAR@2"),
        CardDefinition::follower(
            "Phoenix",
            1,
            Neutral,
            FollowerTemplate::new(1, 1).with_evolve(2, 2),
        )
        .with_trigger(TriggerSlot::Evolve, "DMGENELED@2"),
        CardDefinition::follower("Necro", 1, LeaderClass::Shadowcraft, FollowerTemplate::new(1, 1))
            .with_trigger(TriggerSlot::Fanfare, "DMGENELEDVAR@NEC?2?4?1"),
        CardDefinition::amulet("Hourglass", 1, Neutral, 2)
            .with_trigger(TriggerSlot::Lastword, "DMGENELED@3"),
        // === Spells ===
        CardDefinition::spell("Bolt", 1, Neutral).with_trigger(TriggerSlot::Fanfare, "DMGENEFOL@3"),
        CardDefinition::spell("Blast", 1, Neutral).with_trigger(TriggerSlot::Fanfare, "DMGENETAR@2"),
        CardDefinition::spell("Inferno", 1, Neutral).with_trigger(TriggerSlot::Fanfare, "DMGALLENEFOL@2"),
        CardDefinition::spell("Exile", 1, Neutral).with_trigger(TriggerSlot::Fanfare, "BANENEFOLHPLES@2"),
        CardDefinition::spell("Mistake", 1, Neutral).with_trigger(TriggerSlot::Fanfare, "NOSUCHOP@1"),
        CardDefinition::spell("Reaper", 4, LeaderClass::Runecraft)
            .with_trigger(TriggerSlot::Fanfare, "KILENEFOLBSTCST")
            .with_spell_boost(),
    ])
}

/// Runecraft against Havencraft, thirty Goblins each.
pub fn builder() -> GameBuilder<RecordingPresenter> {
    GameBuilder::new(card_pool())
        .seed(42)
        .leader(P1, LeaderClass::Runecraft)
        .deck(P1, vec!["Goblin"; 30])
        .leader(P2, LeaderClass::Havencraft)
        .deck(P2, vec!["Goblin"; 30])
        .presenter(RecordingPresenter::new())
}

pub fn new_game() -> Game<RecordingPresenter> {
    builder().start().unwrap()
}

/// A game in which the first player is on round `round` with its full cost.
pub fn game_at_round(round: u32) -> Game<RecordingPresenter> {
    let mut game = new_game();
    for _ in 1..round {
        game.end_round(P1).unwrap();
        game.end_round(P2).unwrap();
    }
    game
}

/// Create `name` and put it in `player`'s hand.
pub fn give(game: &mut Game<RecordingPresenter>, player: PlayerId, name: &str) -> EntityId {
    let id = game.create_card(name).unwrap();
    assert!(game.state_mut().player_mut(player).hand_mut().add(id), "hand is full");
    id
}

/// Create `name` and put it straight onto `player`'s field.
pub fn summon(game: &mut Game<RecordingPresenter>, player: PlayerId, name: &str) -> EntityId {
    let id = game.create_card(name).unwrap();
    let GameState { arena, players, .. } = game.state_mut();
    assert!(players[player].field_mut().add(id, arena).unwrap(), "field is full");
    id
}

/// Summon `name` with Storm so it can attack this round.
pub fn summon_ready(game: &mut Game<RecordingPresenter>, player: PlayerId, name: &str) -> EntityId {
    let id = summon(game, player, name);
    grant(game, id, Keyword::Storm);
    id
}

pub fn grant(game: &mut Game<RecordingPresenter>, id: EntityId, keyword: Keyword) {
    game.state_mut().arena.follower_mut(id).unwrap().grant(keyword);
}

pub fn health(game: &Game<RecordingPresenter>, id: EntityId) -> i32 {
    game.state().arena.follower(id).unwrap().health()
}

pub fn leader_health(game: &Game<RecordingPresenter>, player: PlayerId) -> i32 {
    game.player(player).leader().health()
}

pub fn on_field(game: &Game<RecordingPresenter>, player: PlayerId, id: EntityId) -> bool {
    game.player(player).field().contains(id)
}

pub fn in_grave(game: &Game<RecordingPresenter>, player: PlayerId, id: EntityId) -> bool {
    game.player(player).grave().contains(id)
}
