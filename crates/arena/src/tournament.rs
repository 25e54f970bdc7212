//! Round-robin tournaments between engine configurations.
//!
//! Every ordered pair of distinct bots plays a fixed number of games, so each
//! pairing is played with both move orders. Games run in parallel; ratings
//! are then updated in task order, which keeps results reproducible for a
//! given seed.

use crate::elo::EloRanking;
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};
use uct_core::{GameOracle, Outcome, Result, Sign, UctError};
use uct_mcts::{Mcts, SearchConfig};

/// An engine configuration taking part in a tournament.
#[derive(Debug, Clone, PartialEq)]
pub struct Bot {
    pub name: String,
    pub config: SearchConfig,
}

impl Bot {
    /// A bot using `base` with its own simulation budget, named after the budget.
    pub fn with_simulations(base: &SearchConfig, simulations: usize) -> Self {
        let mut config = base.clone();
        config.simulations = simulations;
        Self {
            name: format!("mcts-{}", simulations),
            config,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    FirstWin,
    SecondWin,
    Draw,
}

impl MatchResult {
    /// Score of the first bot: 1 for a win, 0.5 for a draw, 0 for a loss.
    pub fn first_score(self) -> f64 {
        match self {
            MatchResult::FirstWin => 1.0,
            MatchResult::Draw => 0.5,
            MatchResult::SecondWin => 0.0,
        }
    }
}

/// Play one game: `first` moves as +1, `second` sees the flipped board.
pub fn run_match<G: GameOracle>(oracle: &G, first: &Bot, second: &Bot, seed: u64) -> Result<MatchResult> {
    let mut engines = [
        Mcts::new(first.config.clone(), ChaCha8Rng::seed_from_u64(seed)),
        Mcts::new(
            second.config.clone(),
            ChaCha8Rng::seed_from_u64(seed.wrapping_add(1)),
        ),
    ];

    let mut state = oracle.initial_state();
    let mut mover = Sign::Plus;

    loop {
        let engine = match mover {
            Sign::Plus => &mut engines[0],
            Sign::Minus => &mut engines[1],
        };
        let view = oracle.flip_perspective(&state, mover);
        let action = engine.run(oracle, &view)?;
        state = oracle.apply_action(&state, action, mover)?;

        match oracle.outcome(&state, Some(action)) {
            Outcome::Win if mover == Sign::Plus => return Ok(MatchResult::FirstWin),
            Outcome::Win => return Ok(MatchResult::SecondWin),
            Outcome::Draw => return Ok(MatchResult::Draw),
            Outcome::Ongoing => mover = mover.flip(),
        }
    }
}

/// Final line of the table for one bot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub bot: String,
    pub simulations: usize,
    pub rating: f64,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TournamentReport {
    pub game: String,
    pub games_per_pairing: usize,
    pub seed: u64,
    /// Highest rating first.
    pub standings: Vec<Standing>,
}

/// Schedule of a round robin: (first bot, second bot, game seed) per game.
fn schedule(bots: usize, games: usize, seed: u64) -> Vec<(usize, usize, u64)> {
    let mut tasks = Vec::with_capacity(bots * bots.saturating_sub(1) * games);
    for first in 0..bots {
        for second in (0..bots).filter(|&second| second != first) {
            for _ in 0..games {
                let game_seed = seed.wrapping_add(tasks.len() as u64 * 1000);
                tasks.push((first, second, game_seed));
            }
        }
    }
    tasks
}

fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({eta})")
    {
        pb.set_style(style.progress_chars("=>-"));
    }
    pb
}

/// Play a full round robin between `bots` and rate them.
///
/// Ratings are keyed by bot name, so names must be distinct.
pub fn run_tournament<G: GameOracle>(
    oracle: &G,
    bots: &[Bot],
    games: usize,
    seed: u64,
    show_progress: bool,
) -> Result<TournamentReport> {
    if bots.len() < 2 || games == 0 {
        return Err(UctError::InvalidConfiguration(
            "tournament needs at least two bots and one game per pairing".into(),
        ));
    }
    for (i, bot) in bots.iter().enumerate() {
        if bots[..i].iter().any(|other| other.name == bot.name) {
            return Err(UctError::InvalidConfiguration(format!(
                "duplicate tournament bot {}",
                bot.name
            )));
        }
    }

    let tasks = schedule(bots.len(), games, seed);
    info!(
        game = oracle.name(),
        bots = bots.len(),
        matches = tasks.len(),
        "Starting tournament"
    );

    let pb = if show_progress {
        progress_bar(tasks.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<MatchResult> = tasks
        .par_iter()
        .map(|&(first, second, game_seed)| {
            let result = run_match(oracle, &bots[first], &bots[second], game_seed);
            pb.inc(1);
            result
        })
        .collect::<Result<_>>()?;
    pb.finish_and_clear();

    let mut elo = EloRanking::default();
    let mut tally = vec![(0usize, 0usize, 0usize); bots.len()];
    for (&(first, second, _), &result) in tasks.iter().zip(&results) {
        debug!(
            first = %bots[first].name,
            second = %bots[second].name,
            ?result,
            "Match finished"
        );
        elo.update(&bots[first].name, &bots[second].name, result.first_score());
        match result {
            MatchResult::FirstWin => {
                tally[first].0 += 1;
                tally[second].1 += 1;
            }
            MatchResult::SecondWin => {
                tally[first].1 += 1;
                tally[second].0 += 1;
            }
            MatchResult::Draw => {
                tally[first].2 += 1;
                tally[second].2 += 1;
            }
        }
    }

    // Every bot has played, so every bot is rated
    let standings: Vec<Standing> = elo
        .standings()
        .into_iter()
        .filter_map(|(name, rating)| {
            let index = bots.iter().position(|bot| bot.name == name)?;
            let (wins, losses, draws) = tally[index];
            Some(Standing {
                bot: name,
                simulations: bots[index].config.simulations,
                rating,
                wins,
                losses,
                draws,
            })
        })
        .collect();

    Ok(TournamentReport {
        game: oracle.name().to_string(),
        games_per_pairing: games,
        seed,
        standings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uct_mcts::games::{Connect4, TicTacToe};

    fn bots(budgets: &[usize]) -> Vec<Bot> {
        let base = SearchConfig::default();
        budgets
            .iter()
            .map(|&sims| Bot::with_simulations(&base, sims))
            .collect()
    }

    #[test]
    fn test_bot_naming() {
        let bot = Bot::with_simulations(&SearchConfig::default(), 50);
        assert_eq!(bot.name, "mcts-50");
        assert_eq!(bot.config.simulations, 50);
    }

    #[test]
    fn test_schedule_covers_ordered_pairs() {
        let tasks = schedule(3, 2, 7);
        assert_eq!(tasks.len(), 12);
        assert!(tasks.iter().all(|&(a, b, _)| a != b));
        assert_eq!(tasks.iter().filter(|&&(a, b, _)| a == 0 && b == 1).count(), 2);
        assert_eq!(tasks.iter().filter(|&&(a, b, _)| a == 1 && b == 0).count(), 2);
    }

    #[test]
    fn test_run_match_is_deterministic() {
        let game = TicTacToe::default();
        let players = bots(&[20, 40]);
        let a = run_match(&game, &players[0], &players[1], 11).unwrap();
        let b = run_match(&game, &players[0], &players[1], 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_strong_bot_beats_single_simulation() {
        let game = TicTacToe::default();
        let players = bots(&[1000, 1]);
        let mut strong_losses = 0;
        for seed in 0..10 {
            if run_match(&game, &players[0], &players[1], seed).unwrap() == MatchResult::SecondWin {
                strong_losses += 1;
            }
            if run_match(&game, &players[1], &players[0], seed).unwrap() == MatchResult::FirstWin {
                strong_losses += 1;
            }
        }
        assert_eq!(strong_losses, 0);
    }

    #[test]
    fn test_connect4_match_finishes() {
        let players = bots(&[5, 5]);
        assert!(run_match(&Connect4, &players[0], &players[1], 3).is_ok());
    }

    #[test]
    fn test_tournament_report() {
        let game = TicTacToe::default();
        let report = run_tournament(&game, &bots(&[1, 300]), 4, 5, false).unwrap();

        assert_eq!(report.game, "tictactoe");
        assert_eq!(report.standings.len(), 2);
        assert_eq!(report.standings[0].bot, "mcts-300");
        assert!(report.standings[0].rating > report.standings[1].rating);

        // 2 ordered pairings x 4 games, each counted once per side
        let played: usize = report
            .standings
            .iter()
            .map(|s| s.wins + s.losses + s.draws)
            .sum();
        assert_eq!(played, 16);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"standings\""));
    }

    #[test]
    fn test_tournament_rejects_duplicate_bots() {
        let game = TicTacToe::default();
        let result = run_tournament(&game, &bots(&[5, 5]), 2, 1, false);
        assert!(matches!(result, Err(UctError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_tournament_rejects_empty_schedule() {
        let game = TicTacToe::default();
        assert!(run_tournament(&game, &bots(&[5]), 2, 1, false).is_err());
        assert!(run_tournament(&game, &bots(&[5, 10]), 0, 1, false).is_err());
    }

    #[test]
    fn test_tournament_lists_every_bot_once() {
        let game = TicTacToe::default();
        let report = run_tournament(&game, &bots(&[3, 10, 30]), 2, 4, false).unwrap();

        let mut names: Vec<&str> = report.standings.iter().map(|s| s.bot.as_str()).collect();
        assert!(report
            .standings
            .windows(2)
            .all(|pair| pair[0].rating >= pair[1].rating));
        names.sort_unstable();
        assert_eq!(names, vec!["mcts-10", "mcts-3", "mcts-30"]);

        let total: f64 = report.standings.iter().map(|s| s.rating).sum();
        assert!((total - 3.0 * 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_tournament_reproducible() {
        let game = TicTacToe::default();
        let players = bots(&[10, 30, 60]);
        let a = run_tournament(&game, &players, 2, 9, false).unwrap();
        let b = run_tournament(&game, &players, 2, 9, false).unwrap();
        assert_eq!(a, b);
    }
}
