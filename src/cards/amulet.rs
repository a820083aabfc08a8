//! Amulet state: optional countdown and an alive flag.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// Runtime state of an amulet.
///
/// A countdown of zero or less at creation means the amulet has no
/// countdown at all. Alive flips to false exactly when the countdown reaches
/// zero, or when the amulet is destroyed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Amulet {
    original_countdown: Option<i32>,
    countdown: Option<i32>,
    alive: bool,
}

impl Amulet {
    #[must_use]
    pub fn new(countdown: i32) -> Self {
        let countdown = (countdown > 0).then_some(countdown);
        Self {
            original_countdown: countdown,
            countdown,
            alive: true,
        }
    }

    #[must_use]
    pub fn is_countdown(&self) -> bool {
        self.countdown.is_some()
    }

    /// Current countdown, if this is a countdown amulet.
    #[must_use]
    pub fn countdown(&self) -> Option<i32> {
        self.countdown
    }

    #[must_use]
    pub fn original_countdown(&self) -> Option<i32> {
        self.original_countdown
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Subtract `amount` from the countdown, flooring at zero.
    pub fn decrease_countdown(&mut self, amount: i32) -> Result<()> {
        let current = self.countdown.ok_or(RulesError::NotCountdown)?;
        let next = (current - amount).max(0);
        self.countdown = Some(next);
        if next == 0 {
            self.alive = false;
        }
        Ok(())
    }

    pub fn destroy(&mut self) {
        self.alive = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_countdown() {
        let mut amulet = Amulet::new(0);
        assert!(!amulet.is_countdown());
        assert_eq!(amulet.decrease_countdown(1), Err(RulesError::NotCountdown));
        assert!(amulet.is_alive());

        assert!(!Amulet::new(-1).is_countdown());
    }

    #[test]
    fn test_countdown_reaches_zero() {
        let mut amulet = Amulet::new(3);
        amulet.decrease_countdown(1).unwrap();
        assert_eq!(amulet.countdown(), Some(2));
        assert!(amulet.is_alive());

        amulet.decrease_countdown(5).unwrap();
        assert_eq!(amulet.countdown(), Some(0));
        assert!(!amulet.is_alive());
        assert_eq!(amulet.original_countdown(), Some(3));
    }

    #[test]
    fn test_destroy() {
        let mut amulet = Amulet::new(0);
        amulet.destroy();
        assert!(!amulet.is_alive());
    }
}
