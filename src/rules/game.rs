//! The game: state plus everything needed to drive it.
//!
//! ## Effect flow
//!
//! Card triggers go through [`Game::send_effect`]:
//!
//! 1. If the game is over the effect is dropped.
//! 2. If another effect is waiting for a target, the new one is queued.
//! 3. Otherwise the interpreter processes it. A target request is then
//!    either resolved from the trigger (automatic kinds), prompted for
//!    (when a candidate exists) or discarded with a notice.
//! 4. The destroy sweep runs over both fields.
//!
//! Queued effects run, in order, once the pending effect is resolved.

use log::{debug, info, warn};

use crate::cards::{CardFactory, CardType, LeaderClass, TriggerSlot};
use crate::core::{CardArena, EntityId, GameRng, GameState, PlayerId, PlayerMap, RulesConfig};
use crate::effects::{Interpreter, Outcome, Target, TargetKind};
use crate::error::{Result, RulesError};
use crate::player::Player;
use crate::resolution::{EffectQueue, QueuedEffect, ResolutionStatus, Selection};
use crate::zones::{Deck, DeckPreset};

use super::presenter::{NullPresenter, Presenter};
use super::GameResult;

/// Card that vanishes instead of going to the grave.
const VANISHING_CARD: &str = "Ghost";

/// Where a player's deck comes from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DeckList {
    /// The starter deck of the leader's class.
    #[default]
    Starter,
    /// An explicit list of card names, duplicates included.
    Cards(Vec<String>),
}

#[derive(Clone, Debug)]
struct Seat {
    class: LeaderClass,
    deck: DeckList,
}

/// Builder for a [`Game`].
///
/// ```
/// use shadow_rules::cards::{CardDefinition, CardRegistry, FollowerTemplate, LeaderClass};
/// use shadow_rules::core::PlayerId;
/// use shadow_rules::rules::GameBuilder;
///
/// let cards = CardRegistry::new().with_cards([CardDefinition::follower(
///     "Goblin",
///     1,
///     LeaderClass::Neutral,
///     FollowerTemplate::new(1, 2),
/// )]);
/// let deck = vec!["Goblin"; 10];
///
/// let game = GameBuilder::new(cards)
///     .seed(7)
///     .leader(PlayerId::FIRST, LeaderClass::Runecraft)
///     .deck(PlayerId::FIRST, deck.clone())
///     .leader(PlayerId::SECOND, LeaderClass::Havencraft)
///     .deck(PlayerId::SECOND, deck)
///     .start()
///     .unwrap();
///
/// assert_eq!(game.current_player(), PlayerId::FIRST);
/// assert_eq!(game.player(PlayerId::FIRST).hand().len(), 4);
/// assert_eq!(game.player(PlayerId::SECOND).hand().len(), 3);
/// ```
pub struct GameBuilder<P = NullPresenter> {
    cards: Box<dyn CardFactory>,
    config: RulesConfig,
    seed: u64,
    seats: PlayerMap<Seat>,
    presenter: P,
}

impl GameBuilder<NullPresenter> {
    /// Forestcraft against Swordcraft with starter decks, seed 0.
    pub fn new(cards: impl CardFactory + 'static) -> Self {
        Self {
            cards: Box::new(cards),
            config: RulesConfig::default(),
            seed: 0,
            seats: PlayerMap::from_pair(
                Seat {
                    class: LeaderClass::Forestcraft,
                    deck: DeckList::Starter,
                },
                Seat {
                    class: LeaderClass::Swordcraft,
                    deck: DeckList::Starter,
                },
            ),
            presenter: NullPresenter,
        }
    }
}

impl<P: Presenter> GameBuilder<P> {
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Set a player's leader class. Their deck becomes the class starter
    /// deck unless [`deck`](Self::deck) is called afterwards.
    #[must_use]
    pub fn leader(mut self, player: PlayerId, class: LeaderClass) -> Self {
        self.seats[player] = Seat {
            class,
            deck: DeckList::Starter,
        };
        self
    }

    /// Give a player an explicit deck list.
    #[must_use]
    pub fn deck<S: Into<String>>(mut self, player: PlayerId, names: impl IntoIterator<Item = S>) -> Self {
        self.seats[player].deck = DeckList::Cards(names.into_iter().map(Into::into).collect());
        self
    }

    /// Swap the presenter.
    pub fn presenter<Q: Presenter>(self, presenter: Q) -> GameBuilder<Q> {
        GameBuilder {
            cards: self.cards,
            config: self.config,
            seed: self.seed,
            seats: self.seats,
            presenter,
        }
    }

    /// Build decks, draw opening hands and begin the first player's round.
    pub fn start(self) -> Result<Game<P>> {
        self.config.validate()?;
        let rng = GameRng::new(self.seed);
        let mut deck_rng = rng.for_context("decks");
        let mut arena = CardArena::new();

        let first = self.build_player(PlayerId::FIRST, &mut arena, &mut deck_rng)?;
        let second = self.build_player(PlayerId::SECOND, &mut arena, &mut deck_rng)?;
        let state = GameState::new(self.config, arena, PlayerMap::from_pair(first, second), rng);

        let mut game = Game {
            state,
            cards: self.cards,
            interpreter: Interpreter::default(),
            queue: EffectQueue::new(),
            selection: Selection::Idle,
            presenter: self.presenter,
        };

        let opening = game.state.config.opening_hand;
        for player in PlayerId::both() {
            if !game.state.draw_or_lose(player, opening) {
                return Ok(game);
            }
        }
        info!("game started with seed {}", self.seed);
        game.begin_round(PlayerId::FIRST)?;
        game.presenter.refresh(&game.state);
        Ok(game)
    }

    fn build_player(&self, id: PlayerId, arena: &mut CardArena, rng: &mut GameRng) -> Result<Player> {
        let seat = &self.seats[id];
        let names: Vec<String> = match &seat.deck {
            DeckList::Starter => DeckPreset::for_class(seat.class)
                .ok_or_else(|| {
                    RulesError::InvalidConfig(format!(
                        "{} has no starter deck; give an explicit deck list",
                        seat.class.display_name()
                    ))
                })?
                .card_names()
                .into_iter()
                .map(String::from)
                .collect(),
            DeckList::Cards(names) => names.clone(),
        };

        let mut ids = Vec::with_capacity(names.len());
        for name in &names {
            ids.push(arena.insert(self.cards.create(name)?));
        }
        debug!("{}: {} deck of {} cards", id, seat.class.display_name(), ids.len());
        Ok(Player::new(id, seat.class, &self.config).with_deck(Deck::from_cards(ids, rng)))
    }
}

/// A running game.
pub struct Game<P = NullPresenter> {
    pub(super) state: GameState,
    pub(super) cards: Box<dyn CardFactory>,
    pub(super) interpreter: Interpreter,
    pub(super) queue: EffectQueue,
    pub(super) selection: Selection,
    pub(super) presenter: P,
}

impl<P: Presenter> Game<P> {
    // === Queries ===

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for tools and scenario setup.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        self.state.player(id)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.state.winner()
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&GameResult> {
        self.state.outcome()
    }

    #[must_use]
    pub fn status(&self) -> ResolutionStatus {
        match self.interpreter.pending() {
            Some(pending) => ResolutionStatus::AwaitingTarget(pending.kind),
            None => ResolutionStatus::Complete,
        }
    }

    #[must_use]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Kind of target the pending effect waits for.
    #[must_use]
    pub fn pending_target(&self) -> Option<TargetKind> {
        self.interpreter.pending().map(|p| p.kind)
    }

    /// Every target the pending effect would accept.
    #[must_use]
    pub fn candidates(&self) -> Vec<Target> {
        self.interpreter
            .pending()
            .map(|p| p.kind.candidates(&self.state, p.owner))
            .unwrap_or_default()
    }

    /// Number of effects deferred behind the pending one.
    #[must_use]
    pub fn queued_effects(&self) -> usize {
        self.queue.pending_count()
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Card text for one opcode string printed on `card`.
    pub fn describe(&self, text: &str, card: EntityId) -> Result<String> {
        self.interpreter.describe(text, self.state.arena.get(card)?)
    }

    /// Build a fresh card by name and register it. It belongs to no zone.
    pub fn create_card(&mut self, name: &str) -> Result<EntityId> {
        let card = self.cards.create(name)?;
        Ok(self.state.arena.insert(card))
    }

    // === Playing cards ===

    /// Play `card` from `player`'s hand.
    pub fn play_card(&mut self, player: PlayerId, card: EntityId) -> Result<ResolutionStatus> {
        self.ensure_can_act(player)?;
        let (cost, card_type) = {
            let hand_owner = self.state.player(player);
            if !hand_owner.hand().contains(card) {
                return Err(RulesError::CardNotInHand(card));
            }
            let played = self.state.arena.get(card)?;
            if played.cost() > hand_owner.cost_left() {
                return Err(RulesError::NotEnoughCost {
                    needed: played.cost(),
                    left: hand_owner.cost_left(),
                });
            }
            if played.card_type() != CardType::Spell && hand_owner.field().is_full() {
                return Err(RulesError::FieldFull);
            }
            (played.cost(), played.card_type())
        };

        self.selection = Selection::Idle;
        let me = self.state.player_mut(player);
        me.use_cost(cost)?;
        me.use_card(card)?;
        info!("{}: plays {} ({:?}, cost {})", player, card, card_type, cost);

        match card_type {
            CardType::Follower | CardType::Amulet => {
                if card_type == CardType::Follower {
                    let allies: Vec<_> = self.state.player(player).field().iter().collect();
                    for ally in allies {
                        if self.state.player(player).field().contains(ally) {
                            let trigger = Some(Target::card(player, card));
                            self.fire(ally, player, TriggerSlot::AllyEnter, trigger)?;
                        }
                    }
                }
                self.fire(card, player, TriggerSlot::Fanfare, None)?;
                if self.state.arena.is_alive(card) {
                    let GameState { arena, players, .. } = &mut self.state;
                    players[player].field_mut().add(card, arena)?;
                }
            }
            CardType::Spell => {
                self.fire(card, player, TriggerSlot::Fanfare, None)?;
                self.boost_hand(player)?;
                self.state.player_mut(player).grave_mut().add(card);
            }
        }

        self.clean_field()?;
        Ok(self.settle())
    }

    /// Spellboost every boostable card in `player`'s hand.
    fn boost_hand(&mut self, player: PlayerId) -> Result<()> {
        let hand: Vec<_> = self.state.player(player).hand().iter().collect();
        for id in hand {
            let card = self.state.arena.get_mut(id)?;
            if card.is_spell_boost() {
                card.boost()?;
            }
        }
        Ok(())
    }

    /// Evolve one of `player`'s followers with an evolve point.
    pub fn evolve(&mut self, player: PlayerId, follower: EntityId) -> Result<ResolutionStatus> {
        self.ensure_can_act(player)?;
        if !self.state.player(player).field().contains(follower) {
            return Err(RulesError::CardNotOnField(follower));
        }
        self.state.player(player).evolve_unlocked(&self.state.config)?;
        {
            let GameState { arena, players, .. } = &mut self.state;
            players[player].evolve(Some(arena.follower_mut(follower)?))?;
        }
        info!("{}: evolves {}", player, follower);

        self.fire(follower, player, TriggerSlot::Evolve, None)?;
        self.clean_field()?;
        Ok(self.settle())
    }

    // === Targeting ===

    /// Answer the pending target prompt.
    ///
    /// An ineligible target is rejected and the effect keeps waiting.
    pub fn select_target(&mut self, target: Target) -> Result<ResolutionStatus> {
        if self.state.is_over() {
            return Err(RulesError::GameOver);
        }
        let Some(pending) = self.interpreter.pending() else {
            return Err(RulesError::NoPendingEffect);
        };
        if !pending.kind.is_eligible(&self.state, pending.owner, target) {
            warn!("{}: {:?} is not {}", pending.owner, target, pending.kind);
            return Err(RulesError::IneligibleTarget);
        }

        self.selection = Selection::Idle;
        self.interpreter.proceed(&mut self.state, &*self.cards, target)?;
        self.clean_field()?;
        self.drain_queue()?;
        Ok(self.settle())
    }

    // === Effect plumbing ===

    /// Fire a card's trigger slot, if it has one.
    pub(super) fn fire(
        &mut self,
        source: EntityId,
        owner: PlayerId,
        slot: TriggerSlot,
        trigger: Option<Target>,
    ) -> Result<()> {
        let Some(text) = self.state.arena.get(source)?.trigger(slot).map(str::to_string) else {
            return Ok(());
        };
        debug!("{}: {} fires {:?}", owner, source, slot);
        self.send_effect(&text, source, owner, trigger)
    }

    /// Run an effect now, or queue it behind a pending one.
    pub fn send_effect(
        &mut self,
        text: &str,
        source: EntityId,
        owner: PlayerId,
        trigger: Option<Target>,
    ) -> Result<()> {
        if self.state.is_over() {
            return Ok(());
        }
        if self.interpreter.is_pending() {
            debug!("{}: queueing {} behind the pending effect", owner, text);
            self.queue
                .push(QueuedEffect::new(text, source, owner).with_trigger(trigger));
            return Ok(());
        }
        self.run_effect(text, source, owner, trigger)
    }

    fn run_effect(
        &mut self,
        text: &str,
        source: EntityId,
        owner: PlayerId,
        trigger: Option<Target>,
    ) -> Result<()> {
        let outcome = self
            .interpreter
            .process(&mut self.state, &*self.cards, text, source, owner)?;

        if let Outcome::NeedsTarget(kind) = outcome {
            if self.state.is_over() {
                self.interpreter.discard();
            } else if kind.is_automatic() {
                match kind.auto_target(&self.state, owner, trigger) {
                    Some(target) => self.interpreter.proceed(&mut self.state, &*self.cards, target)?,
                    None => {
                        self.interpreter.discard();
                    }
                }
            } else if kind.has_candidates(&self.state, owner) {
                self.selection = Selection::Target(kind);
                self.presenter.prompt_target(owner, kind);
            } else {
                self.interpreter.discard();
                self.presenter
                    .notice(&format!("Effect discarded: no valid target ({})", kind));
            }
        }
        self.clean_field()
    }

    /// Run deferred effects until one suspends or the queue is empty.
    fn drain_queue(&mut self) -> Result<()> {
        while !self.interpreter.is_pending() {
            let Some(effect) = self.queue.pop() else {
                break;
            };
            if self.state.is_over() {
                self.queue.clear();
                break;
            }
            self.run_effect(&effect.text, effect.source, effect.owner, effect.trigger)?;
        }
        Ok(())
    }

    // === Leaving the field ===

    /// Take a card off `owner`'s field.
    ///
    /// Banished cards, and the vanishing card, just disappear. Anything
    /// else goes to the grave and fires its lastword.
    pub fn process_card_exit(&mut self, id: EntityId, owner: PlayerId, banish: bool) -> Result<()> {
        self.state.player_mut(owner).field_mut().remove(id);
        if banish || self.state.arena.get(id)?.name() == VANISHING_CARD {
            debug!("{}: {} leaves play without a trace", owner, id);
            return Ok(());
        }
        debug!("{}: {} is destroyed", owner, id);
        self.state.player_mut(owner).grave_mut().add(id);
        self.fire(id, owner, TriggerSlot::Lastword, None)
    }

    /// Destroy sweep: remove dead cards, first player's field first, until
    /// both fields hold only living cards.
    pub fn clean_field(&mut self) -> Result<()> {
        loop {
            let dead = PlayerId::both().find_map(|player| {
                self.state
                    .player(player)
                    .field()
                    .iter()
                    .find(|&id| !self.state.arena.is_alive(id))
                    .map(|id| (id, player))
            });
            let Some((id, owner)) = dead else {
                return Ok(());
            };
            self.process_card_exit(id, owner, false)?;
        }
    }

    // === Guards ===

    pub(super) fn ensure_can_act(&self, player: PlayerId) -> Result<()> {
        if self.state.is_over() {
            return Err(RulesError::GameOver);
        }
        if self.interpreter.is_pending() {
            return Err(RulesError::EffectPending);
        }
        if player != self.state.current {
            return Err(RulesError::NotActivePlayer);
        }
        Ok(())
    }

    /// Tell the presenter to redraw and report the status.
    pub(super) fn settle(&mut self) -> ResolutionStatus {
        self.presenter.refresh(&self.state);
        self.status()
    }
}
