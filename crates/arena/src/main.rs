//! Command-line front end for the UCT search engine.
//!
//! - `play`: a console game against the engine
//! - `search`: analyse a position reached by a list of moves
//! - `tournament`: rate engine budgets against each other with Elo

mod elo;
mod play;
mod settings;
mod tournament;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use settings::Settings;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tournament::Bot;
use tracing::info;
use uct_core::{Action, GameOracle, Sign};
use uct_mcts::{
    games::{Connect4, TicTacToe},
    Mcts, SearchConfig,
};

/// UCT Monte Carlo Tree Search for two-player board games.
#[derive(Parser)]
#[command(name = "uct")]
#[command(about = "Play, analyse and benchmark games with UCT search")]
struct Cli {
    /// Path to a TOML config file (default: uct.toml or $UCT_CONFIG).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level filter, overridden by RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GameKind {
    Tictactoe,
    Connect4,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game against the engine in the terminal.
    Play {
        #[arg(short, long, value_enum, default_value_t = GameKind::Tictactoe)]
        game: GameKind,

        /// Number of MCTS simulations per engine move.
        #[arg(short, long)]
        simulations: Option<usize>,

        /// Let the engine make the first move.
        #[arg(long)]
        engine_first: bool,

        /// Tic-tac-toe board size.
        #[arg(long, default_value = "3")]
        size: usize,

        /// Random seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Search the position reached by a sequence of moves.
    Search {
        #[arg(short, long, value_enum, default_value_t = GameKind::Tictactoe)]
        game: GameKind,

        /// Comma-separated moves played from the initial position.
        #[arg(short, long, value_delimiter = ',')]
        moves: Vec<Action>,

        /// Number of MCTS simulations.
        #[arg(short, long)]
        simulations: Option<usize>,

        /// Tic-tac-toe board size.
        #[arg(long, default_value = "3")]
        size: usize,

        /// Random seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Round-robin Elo tournament between simulation budgets.
    Tournament {
        #[arg(short, long, value_enum, default_value_t = GameKind::Tictactoe)]
        game: GameKind,

        /// Comma-separated simulation budgets, one bot each.
        #[arg(short, long, value_delimiter = ',')]
        bots: Option<Vec<usize>>,

        /// Games per ordered pair of bots.
        #[arg(long)]
        games: Option<usize>,

        /// Random seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,

        /// Write the final standings as JSON.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hide the progress bar.
        #[arg(long)]
        no_progress: bool,
    },
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    Ok(())
}

fn rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Replay `moves` from the initial position with alternating movers.
///
/// Returns the reached position (first player's marks are +1) and the player to move.
fn replay<G: GameOracle>(oracle: &G, moves: &[Action]) -> Result<(G::State, Sign)> {
    let mut state = oracle.initial_state();
    let mut mover = Sign::Plus;
    for (ply, &action) in moves.iter().enumerate() {
        state = oracle
            .apply_action(&state, action, mover)
            .with_context(|| format!("move {} ({}) is illegal", ply + 1, action))?;
        if oracle.is_terminal(&state, Some(action)) {
            bail!("the game is already over after move {} ({})", ply + 1, action);
        }
        mover = mover.flip();
    }
    Ok((state, mover))
}

fn cmd_play<G: GameOracle>(
    oracle: &G,
    config: SearchConfig,
    engine_first: bool,
    seed: Option<u64>,
) -> Result<()> {
    info!(
        game = oracle.name(),
        simulations = config.simulations,
        engine_first,
        "Starting console game"
    );
    let mut engine = Mcts::new(config, rng(seed));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play::play_console(oracle, &mut engine, engine_first, stdin.lock(), &mut stdout)?;
    Ok(())
}

fn cmd_search<G: GameOracle>(
    oracle: &G,
    config: SearchConfig,
    moves: &[Action],
    seed: Option<u64>,
) -> Result<()> {
    let (state, mover) = replay(oracle, moves)?;
    let view = oracle.flip_perspective(&state, mover);

    let mut engine = Mcts::new(config, rng(seed));
    let result = engine.search(oracle, &view)?;

    let symbol = match mover {
        Sign::Plus => 'X',
        Sign::Minus => 'O',
    };
    println!("{}\n", oracle.render(&state));
    println!("{} to move", symbol);
    println!(
        "Best move: {} (win rate {:.3}, {} simulations, {} nodes)",
        result.best_action, result.best_win_rate, result.simulations, result.tree_size
    );
    println!("------------------------------------------------");
    println!("{:>6} {:>8} {:>7}", "move", "visits", "share");
    let total = result.total_visits().max(1) as f64;
    for (action, visits) in &result.visit_counts {
        println!(
            "{:>6} {:>8} {:>6.1}%",
            action,
            visits,
            *visits as f64 / total * 100.0
        );
    }
    Ok(())
}

fn cmd_tournament<G: GameOracle>(
    oracle: &G,
    base: &SearchConfig,
    settings: &settings::TournamentSettings,
    output: Option<PathBuf>,
    show_progress: bool,
) -> Result<()> {
    let bots: Vec<Bot> = settings
        .bots
        .iter()
        .map(|&sims| Bot::with_simulations(base, sims))
        .collect();

    println!(
        "Playing {} games per pairing between {} bots ({})",
        settings.games,
        bots.len(),
        oracle.name()
    );

    let report = tournament::run_tournament(oracle, &bots, settings.games, settings.seed, show_progress)?;

    println!("================================================");
    println!("{:<12} {:>8} {:>6} {:>6} {:>6}", "bot", "elo", "wins", "losses", "draws");
    println!("------------------------------------------------");
    for standing in &report.standings {
        println!(
            "{:<12} {:>8.1} {:>6} {:>6} {:>6}",
            standing.bot, standing.rating, standing.wins, standing.losses, standing.draws
        );
    }

    if let Some(path) = output {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)
            .with_context(|| format!("Failed to write standings to {:?}", path))?;
        println!("Standings saved to: {:?}", path);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(level) = cli.log_level {
        settings.log_level = level;
    }
    init_tracing(&settings.log_level)?;

    match cli.command {
        Commands::Play {
            game,
            simulations,
            engine_first,
            size,
            seed,
        } => {
            if let Some(simulations) = simulations {
                settings.search.simulations = simulations;
            }
            let config = settings.search_config()?;
            match game {
                GameKind::Tictactoe => cmd_play(&TicTacToe::new(size)?, config, engine_first, seed),
                GameKind::Connect4 => cmd_play(&Connect4, config, engine_first, seed),
            }
        }

        Commands::Search {
            game,
            moves,
            simulations,
            size,
            seed,
        } => {
            if let Some(simulations) = simulations {
                settings.search.simulations = simulations;
            }
            let config = settings.search_config()?;
            match game {
                GameKind::Tictactoe => cmd_search(&TicTacToe::new(size)?, config, &moves, seed),
                GameKind::Connect4 => cmd_search(&Connect4, config, &moves, seed),
            }
        }

        Commands::Tournament {
            game,
            bots,
            games,
            seed,
            output,
            no_progress,
        } => {
            if let Some(bots) = bots {
                settings.tournament.bots = bots;
            }
            if let Some(games) = games {
                settings.tournament.games = games;
            }
            if let Some(seed) = seed {
                settings.tournament.seed = seed;
            }
            settings.validate()?;
            let base = settings.search_config()?;
            match game {
                GameKind::Tictactoe => cmd_tournament(
                    &TicTacToe::default(),
                    &base,
                    &settings.tournament,
                    output,
                    !no_progress,
                ),
                GameKind::Connect4 => {
                    cmd_tournament(&Connect4, &base, &settings.tournament, output, !no_progress)
                }
            }
        }
    }
}
