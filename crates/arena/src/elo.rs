//! Elo ratings for comparing engine configurations.

use std::collections::BTreeMap;

pub const INITIAL_RATING: f64 = 1200.0;
pub const K_FACTOR: f64 = 32.0;

/// Ratings keyed by bot name. Unknown bots start at the initial rating.
#[derive(Debug, Clone)]
pub struct EloRanking {
    ratings: BTreeMap<String, f64>,
    initial: f64,
    k_factor: f64,
}

impl Default for EloRanking {
    fn default() -> Self {
        Self::new(INITIAL_RATING, K_FACTOR)
    }
}

impl EloRanking {
    pub fn new(initial: f64, k_factor: f64) -> Self {
        Self {
            ratings: BTreeMap::new(),
            initial,
            k_factor,
        }
    }

    pub fn rating(&self, bot: &str) -> f64 {
        self.ratings.get(bot).copied().unwrap_or(self.initial)
    }

    /// Expected score of `a` against `b`.
    pub fn expected_score(&self, a: &str, b: &str) -> f64 {
        1.0 / (1.0 + 10f64.powf((self.rating(b) - self.rating(a)) / 400.0))
    }

    /// Record one game. `score_a` is 1 for a win by `a`, 0.5 for a draw, 0 for a loss.
    pub fn update(&mut self, a: &str, b: &str, score_a: f64) {
        let expected_a = self.expected_score(a, b);
        let expected_b = 1.0 - expected_a;
        let delta_a = self.k_factor * (score_a - expected_a);
        let delta_b = self.k_factor * ((1.0 - score_a) - expected_b);

        let rating_a = self.rating(a) + delta_a;
        let rating_b = self.rating(b) + delta_b;
        self.ratings.insert(a.to_string(), rating_a);
        self.ratings.insert(b.to_string(), rating_b);
    }

    /// All rated bots, highest rating first.
    pub fn standings(&self) -> Vec<(String, f64)> {
        let mut standings: Vec<(String, f64)> = self
            .ratings
            .iter()
            .map(|(name, rating)| (name.clone(), *rating))
            .collect();
        standings.sort_by(|a, b| b.1.total_cmp(&a.1));
        standings
    }
}
