//! The two seats of a game.
//!
//! ## PlayerId
//!
//! Names a seat. `PlayerId::FIRST` takes the first round and always has
//! the Offensive round order.
//!
//! ## PlayerMap
//!
//! One value per seat, indexed by `PlayerId`.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the two seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlayerId {
    First,
    Second,
}

impl PlayerId {
    /// The player who takes the first round.
    pub const FIRST: PlayerId = PlayerId::First;
    /// The player who takes the second round.
    pub const SECOND: PlayerId = PlayerId::Second;

    const fn seat(self) -> usize {
        match self {
            PlayerId::First => 0,
            PlayerId::Second => 1,
        }
    }

    /// The other seat.
    ///
    /// ```
    /// use shadow_rules::core::PlayerId;
    ///
    /// assert_eq!(PlayerId::FIRST.opponent(), PlayerId::SECOND);
    /// assert_eq!(PlayerId::SECOND.opponent(), PlayerId::FIRST);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::First => PlayerId::Second,
            PlayerId::Second => PlayerId::First,
        }
    }

    /// Both seats in round order.
    pub fn both() -> impl Iterator<Item = PlayerId> {
        [PlayerId::First, PlayerId::Second].into_iter()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.seat() + 1)
    }
}

/// Fixed round order, chosen at player creation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOrder {
    /// Takes the first round.
    Offensive,
    /// Takes the second round; draws an extra card in round 1 and evolves earlier.
    Defensive,
}

impl RoundOrder {
    #[must_use]
    pub const fn of(player: PlayerId) -> Self {
        match player {
            PlayerId::First => RoundOrder::Offensive,
            PlayerId::Second => RoundOrder::Defensive,
        }
    }
}

/// One value per seat.
///
/// ```
/// use shadow_rules::core::{PlayerId, PlayerMap};
///
/// let mut life = PlayerMap::new(|_| 20);
/// life[PlayerId::SECOND] -= 5;
/// assert_eq!(life[PlayerId::FIRST], 20);
/// assert_eq!(life[PlayerId::SECOND], 15);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Build each seat's value from its id.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            seats: [factory(PlayerId::First), factory(PlayerId::Second)],
        }
    }

    pub fn from_pair(first: T, second: T) -> Self {
        Self {
            seats: [first, second],
        }
    }

    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.seat()]
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.seat()]
    }

    /// Seats in round order with their values.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::both().zip(self.seats.iter())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &T {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut T {
        self.get_mut(player)
    }
}
