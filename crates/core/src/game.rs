use crate::{Action, Outcome, Result, Sign};
use std::fmt::Debug;

/// A rules oracle for a two-player, zero-sum, turn-alternating board game.
///
/// The search engine treats implementations as black boxes. Every state it
/// stores is perspective-normalized: the player about to move owns the `+1`
/// marks, the opponent the `-1` marks. Implementations are stateless values
/// so they can be shared freely between independent searches.
pub trait GameOracle: Clone + Send + Sync {
    /// A board position.
    type State: Clone + Send + PartialEq + Debug;

    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Size of the flattened action space.
    fn num_actions(&self) -> usize;

    /// Returns a fresh state with no moves played.
    fn initial_state(&self) -> Self::State;

    /// Returns all legal actions in `state`. Empty means no moves remain.
    fn legal_actions(&self, state: &Self::State) -> Vec<Action>;

    /// Returns the state after `mover` plays `action`.
    ///
    /// # Errors
    /// Returns `UctError::InvalidAction` if `action` is not legal in `state`.
    fn apply_action(&self, state: &Self::State, action: Action, mover: Sign)
        -> Result<Self::State>;

    /// True iff `last_action` won the game or no legal actions remain.
    /// Always false when `last_action` is `None`.
    fn is_terminal(&self, state: &Self::State, last_action: Option<Action>) -> bool;

    /// Verdict after `last_action`, from the perspective of the player who made it.
    fn outcome(&self, state: &Self::State, last_action: Option<Action>) -> Outcome;

    /// Multiplies every mark by `sign`.
    fn flip_perspective(&self, state: &Self::State, sign: Sign) -> Self::State;

    /// Human-readable board, `X` for `+1` marks and `O` for `-1` marks.
    fn render(&self, state: &Self::State) -> String;
}
