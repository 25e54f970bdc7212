//! MCTS configuration parameters.
//!
//! These parameters control the behavior of the Monte Carlo Tree Search algorithm.

use std::fmt;
use std::str::FromStr;
use uct_core::{Result, UctError};

/// How to choose between candidates with exactly equal scores.
///
/// Applies both to UCT selection (for example several unvisited children,
/// all scoring +infinity) and to the final most-visited choice at the root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The earliest-created child wins.
    #[default]
    FirstCreated,
    /// A uniformly random child among the tied ones wins.
    Random,
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::FirstCreated => write!(f, "first-created"),
            TieBreak::Random => write!(f, "random"),
        }
    }
}

impl FromStr for TieBreak {
    type Err = UctError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-created" | "first" => Ok(TieBreak::FirstCreated),
            "random" => Ok(TieBreak::Random),
            other => Err(UctError::InvalidConfiguration(format!(
                "unknown tie-break policy '{}' (expected 'first-created' or 'random')",
                other
            ))),
        }
    }
}

/// MCTS configuration parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Number of simulations (select, expand, simulate, backpropagate) per search.
    pub simulations: usize,

    /// Exploration constant `C` in the UCT formula.
    /// Higher values favor rarely visited children, lower values favor high win rates.
    pub exploration_constant: f64,

    /// Tie-break policy for selection and for the final action.
    pub tie_break: TieBreak,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            simulations: 1000,
            exploration_constant: std::f64::consts::SQRT_2,
            tie_break: TieBreak::FirstCreated,
        }
    }
}

impl SearchConfig {
    /// Create a new config with the specified number of simulations.
    pub fn with_simulations(simulations: usize) -> Self {
        Self {
            simulations,
            ..Default::default()
        }
    }

    /// Builder pattern: set the exploration constant.
    pub fn exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Builder pattern: set the tie-break policy.
    pub fn tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Check that the configuration can drive a search.
    ///
    /// # Errors
    /// Returns `UctError::InvalidConfiguration` if the simulation budget is zero
    /// or the exploration constant is negative or not finite.
    pub fn validate(&self) -> Result<()> {
        if self.simulations == 0 {
            return Err(UctError::InvalidConfiguration(
                "simulation budget must be positive".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(UctError::InvalidConfiguration(format!(
                "exploration constant {} must be finite and non-negative",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
