use crate::Action;
use thiserror::Error;

/// Errors that can occur while searching or applying game rules.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UctError {
    #[error("Invalid action {action}: not legal in this position")]
    InvalidAction { action: Action },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    #[error("Invalid reward {0}: must lie in [0, 1]")]
    InvalidReward(f64),

    #[error("Node has no untried actions left to expand")]
    NodeExhausted,

    #[error("Oracle reported a finished game without an outcome")]
    MissingOutcome,
}

/// Convenience Result type for search and rule operations
pub type Result<T> = std::result::Result<T, UctError>;
