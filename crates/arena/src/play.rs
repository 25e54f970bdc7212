//! Interactive console games against the engine.
//!
//! The human plays the `+1` marks (`X`); the engine plays `-1` and searches
//! on the board flipped to its own perspective.

use anyhow::{bail, Result};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::debug;
use uct_core::{Action, GameOracle, Outcome, Sign};
use uct_mcts::Mcts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    HumanWin,
    EngineWin,
    Draw,
}

/// Play one game, reading moves from `input` and writing the board and
/// prompts to `output`.
///
/// Non-numeric and illegal moves are rejected and asked for again.
///
/// # Errors
/// Fails if `input` runs out before the game ends, on I/O errors, or if the
/// engine reports an error.
pub fn play_console<G, R, In, Out>(
    oracle: &G,
    engine: &mut Mcts<R>,
    engine_first: bool,
    input: In,
    output: &mut Out,
) -> Result<GameEnd>
where
    G: GameOracle,
    R: Rng,
    In: BufRead,
    Out: Write,
{
    let mut lines = input.lines();
    let mut state = oracle.initial_state();
    let mut mover = if engine_first { Sign::Minus } else { Sign::Plus };

    writeln!(output, "You are X. Enter the number of your move.")?;

    loop {
        writeln!(output, "\n{}\n", oracle.render(&state))?;

        let action = match mover {
            Sign::Plus => {
                let legal = oracle.legal_actions(&state);
                let listed: Vec<String> = legal.iter().map(Action::to_string).collect();
                writeln!(output, "Legal moves: {}", listed.join(", "))?;
                loop {
                    write!(output, "Your move: ")?;
                    output.flush()?;
                    let line = match lines.next() {
                        Some(line) => line?,
                        None => bail!("input closed before the game finished"),
                    };
                    match line.trim().parse::<Action>() {
                        Ok(action) if legal.contains(&action) => break action,
                        Ok(action) => writeln!(output, "Move {} is not legal, try again.", action)?,
                        Err(_) => writeln!(output, "Please enter a number.")?,
                    }
                }
            }
            Sign::Minus => {
                let view = oracle.flip_perspective(&state, Sign::Minus);
                let action = engine.run(oracle, &view)?;
                writeln!(output, "Engine plays {}", action)?;
                action
            }
        };

        state = oracle.apply_action(&state, action, mover)?;
        debug!(action, mover = %mover, "Move played");

        let end = match oracle.outcome(&state, Some(action)) {
            Outcome::Ongoing => {
                mover = mover.flip();
                continue;
            }
            Outcome::Draw => GameEnd::Draw,
            Outcome::Win if mover == Sign::Plus => GameEnd::HumanWin,
            Outcome::Win => GameEnd::EngineWin,
        };

        writeln!(output, "\n{}\n", oracle.render(&state))?;
        let message = match end {
            GameEnd::HumanWin => "You win!",
            GameEnd::EngineWin => "The engine wins.",
            GameEnd::Draw => "It's a draw.",
        };
        writeln!(output, "{}", message)?;
        return Ok(end);
    }
}
