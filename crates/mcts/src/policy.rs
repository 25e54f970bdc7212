//! UCT selection policy.
//!
//! UCT(child) = W / N + C * sqrt(ln(N_parent) / N)
//!
//! where `W` is the child's accumulated reward and `N` its visit count.
//! Unvisited children score +infinity so every child is tried once before
//! any is revisited.

use crate::config::TieBreak;
use rand::Rng;

/// Upper confidence bound of a child node.
///
/// `parent_visit_count` must be at least 1 whenever `visit_count` is non-zero,
/// which holds because a child is only ever visited through its parent.
#[inline]
pub fn uct(win_score: f64, visit_count: u32, parent_visit_count: u32, exploration_constant: f64) -> f64 {
    if visit_count == 0 {
        return f64::INFINITY;
    }
    let n = visit_count as f64;
    let exploration = ((parent_visit_count as f64).ln() / n).sqrt();
    win_score / n + exploration_constant * exploration
}

/// Pick the candidate with the highest score, resolving exact ties by `tie_break`.
///
/// Candidates are visited in creation order. With `TieBreak::Random` a tied
/// candidate replaces the incumbent with probability `1 / ties_seen`, which
/// makes the choice uniform over all tied candidates in a single pass.
pub(crate) fn argmax<T, I, R>(candidates: I, tie_break: TieBreak, rng: &mut R) -> Option<T>
where
    I: IntoIterator<Item = (T, f64)>,
    R: Rng + ?Sized,
{
    let mut best: Option<(T, f64)> = None;
    let mut ties = 0u32;

    for (item, score) in candidates {
        let incumbent = best.as_ref().map(|(_, s)| *s);
        match incumbent {
            // NaN never displaces an existing candidate
            Some(_) if score.is_nan() => {}
            Some(best_score) if score < best_score => {}
            Some(best_score) if score == best_score => {
                ties += 1;
                if tie_break == TieBreak::Random && rng.gen_range(0..ties) == 0 {
                    best = Some((item, score));
                }
            }
            _ => {
                best = Some((item, score));
                ties = 1;
            }
        }
    }

    best.map(|(item, _)| item)
}
