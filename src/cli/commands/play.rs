//! Play command - Interactive game in the terminal
//!
//! Humans type a column for each move; the solver, when it controls the
//! player to move, plays its lowest optimal action.

use std::{
    fmt,
    io::{self, BufRead, Write},
    str::FromStr,
};

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use tracing::debug;

use crate::{
    cli::{config::BoardArgs, output::format_actions},
    game::{BoardState, Game, GameOutcome, Player, RowGame, StepOutcome},
    ports::GameRules,
    solver::Agent,
};

/// Which players the solver controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverSide {
    #[default]
    None,
    First,
    Second,
    Both,
}

impl SolverSide {
    pub fn controls(self, player: Player) -> bool {
        matches!(
            (self, player),
            (SolverSide::Both, _)
                | (SolverSide::First, Player::First)
                | (SolverSide::Second, Player::Second)
        )
    }
}

impl fmt::Display for SolverSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SolverSide::None => "none",
            SolverSide::First => "1",
            SolverSide::Second => "2",
            SolverSide::Both => "both",
        };
        f.write_str(label)
    }
}

impl FromStr for SolverSide {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "0" => Ok(SolverSide::None),
            "1" | "first" => Ok(SolverSide::First),
            "2" | "second" => Ok(SolverSide::Second),
            "both" => Ok(SolverSide::Both),
            other => Err(anyhow!(
                "Unknown solver side: '{other}'. Supported: none, 1, 2, both"
            )),
        }
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play the row game in the terminal")]
pub struct PlayArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Players controlled by the solver (none, 1, 2, both)
    #[arg(long, default_value = "none")]
    pub solver: SolverSide,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let rules = args.board.rules()?;
    let agents = if args.solver == SolverSide::None {
        None
    } else {
        Some(Agent::new_agents(&rules)?)
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut session = PlaySession::new(
        rules,
        args.solver,
        agents.as_ref(),
        stdin.lock(),
        stdout.lock(),
    );
    session.run()?;
    Ok(())
}

/// One interactive game over arbitrary input and output streams.
pub struct PlaySession<'a, I, O> {
    rules: RowGame,
    side: SolverSide,
    agents: Option<&'a (Agent, Agent)>,
    input: I,
    output: O,
}

impl<'a, I: BufRead, O: Write> PlaySession<'a, I, O> {
    pub fn new(
        rules: RowGame,
        side: SolverSide,
        agents: Option<&'a (Agent, Agent)>,
        input: I,
        output: O,
    ) -> Self {
        Self {
            rules,
            side,
            agents,
            input,
            output,
        }
    }

    /// Play until the game ends.
    pub fn run(&mut self) -> Result<GameOutcome> {
        let mut game = Game::new(self.rules.board_size())?;
        self.print_state(&game.initial)?;

        loop {
            let state = game.current_state()?;
            let column = if self.side.controls(state.to_move) {
                self.solver_action(&state)?
            } else {
                self.read_action(&state)?
            };

            let outcome = game.play(column)?;
            self.print_state(&game.current_state()?)?;
            match outcome {
                StepOutcome::Win => writeln!(self.output, "Player {} wins!", state.to_move)?,
                StepOutcome::Draw => writeln!(self.output, "draw!")?,
                StepOutcome::WaitingNextAction => continue,
            }
            return game
                .outcome
                .ok_or_else(|| anyhow!("game ended without an outcome"));
        }
    }

    fn solver_action(&mut self, state: &BoardState) -> Result<usize> {
        let agents = self
            .agents
            .ok_or_else(|| anyhow!("solver tables are not available"))?;
        let agent = match state.to_move {
            Player::First => &agents.0,
            Player::Second => &agents.1,
        };
        let key = self.rules.encode(state);
        let best = agent
            .optimal_actions(key)?
            .first()
            .copied()
            .ok_or_else(|| anyhow!("no optimal action recorded for {}", state.label()))?;
        debug!(state = %state.label(), action = %best, "solver move");
        writeln!(self.output, "Player {} plays {best}", state.to_move)?;
        Ok(best.column())
    }

    fn read_action(&mut self, state: &BoardState) -> Result<usize> {
        let legal = state.legal_actions();
        loop {
            write!(
                self.output,
                "Player {} action? {}: ",
                state.to_move,
                format_actions(&legal)
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("input closed before the game ended");
            }

            let Ok(column) = line.trim().parse::<i64>() else {
                writeln!(self.output, "you should enter a nonnegative integer!")?;
                continue;
            };
            match usize::try_from(column) {
                Ok(column) if legal.iter().any(|a| a.column() == column) => return Ok(column),
                _ => writeln!(self.output, "invalid action for the current state!")?,
            }
        }
    }

    fn print_state(&mut self, state: &BoardState) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{state}")?;
        Ok(())
    }
}
