//! Domain types with enforced invariants.
//!
//! - Sign: which player a mark or move belongs to, relative to the player to move
//! - Outcome: the rules oracle's verdict after a move
//! - Reward: a backpropagated score in [0, 1]

use crate::{Result, UctError};
use std::fmt;

/// Player sign relative to a perspective-normalized state.
///
/// The player about to move is always `Plus` (+1); the opponent is `Minus` (-1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    /// The other player.
    pub fn flip(self) -> Self {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }

    /// Cell value used on boards: +1 or -1.
    pub fn as_i8(self) -> i8 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i8())
    }
}

/// Result of a position as judged by the oracle after `last_action`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The player who made the last action won.
    Win,
    /// The board is exhausted without a winner.
    Draw,
    /// The game continues.
    Ongoing,
}

impl Outcome {
    /// Numeric encoding: 1 for a win, 0.5 for a draw, -1 while ongoing.
    pub fn value(self) -> f64 {
        match self {
            Outcome::Win => 1.0,
            Outcome::Draw => 0.5,
            Outcome::Ongoing => -1.0,
        }
    }

    /// Reward for the player who made the last action, or `None` while ongoing.
    pub fn reward(self) -> Option<Reward> {
        match self {
            Outcome::Win => Some(Reward::WIN),
            Outcome::Draw => Some(Reward::DRAW),
            Outcome::Ongoing => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != Outcome::Ongoing
    }
}

/// A simulation reward credited to one player.
///
/// Invariant: value is in range [0, 1] where:
/// - 1 means the credited player won
/// - 0.5 means a draw
/// - 0 means the credited player lost
///
/// # Example
/// ```
/// use uct_core::Reward;
///
/// let reward = Reward::new(1.0).unwrap();
/// assert_eq!(reward.flip(), Reward::LOSS);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Reward(f64);

impl Reward {
    pub const WIN: Self = Self(1.0);
    pub const DRAW: Self = Self(0.5);
    pub const LOSS: Self = Self(0.0);

    /// Create a new reward.
    ///
    /// # Errors
    /// Returns `UctError::InvalidReward` if the value is outside [0, 1] or NaN.
    pub fn new(value: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(UctError::InvalidReward(value));
        }
        Ok(Self(value))
    }

    /// The same result seen by the other player.
    pub fn flip(self) -> Self {
        Self(1.0 - self.0)
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

impl From<Reward> for f64 {
    fn from(r: Reward) -> f64 {
        r.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_flip() {
        assert_eq!(Sign::Plus.flip(), Sign::Minus);
        assert_eq!(Sign::Minus.flip().flip(), Sign::Minus);
        assert_eq!(Sign::Plus.as_i8(), 1);
        assert_eq!(Sign::Minus.as_i8(), -1);
    }

    #[test]
    fn test_outcome_values() {
        assert_eq!(Outcome::Win.value(), 1.0);
        assert_eq!(Outcome::Draw.value(), 0.5);
        assert_eq!(Outcome::Ongoing.value(), -1.0);
        assert!(Outcome::Ongoing.reward().is_none());
        assert!(!Outcome::Ongoing.is_over());
    }

    #[test]
    fn test_reward_new() {
        assert!(Reward::new(0.0).is_ok());
        assert!(Reward::new(0.5).is_ok());
        assert!(Reward::new(1.0).is_ok());
        assert_eq!(Reward::new(-1.0), Err(UctError::InvalidReward(-1.0)));
        assert!(Reward::new(f64::NAN).is_err());
    }

    #[test]
    fn test_reward_flip() {
        assert_eq!(Reward::WIN.flip(), Reward::LOSS);
        assert_eq!(Reward::DRAW.flip(), Reward::DRAW);
        assert_eq!(Reward::LOSS.flip().get(), 1.0);
    }
}
