//! Inspect command - Value and optimal moves of a single position

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;

use crate::{
    cli::{
        config::BoardArgs,
        output::{format_actions, print_kv, print_section, print_subsection},
    },
    config::{Coverage, SolverConfig},
    game::{BoardState, Player},
    solver::{Agent, EncodedState, SavedAgents},
};

#[derive(Parser, Debug)]
#[command(about = "Show the solved value of one position")]
pub struct InspectArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Position to inspect, e.g. `1,_,_` (`_` or `.` for empty cells)
    #[arg(long)]
    pub state: String,

    /// Read solved agents from a MessagePack file instead of solving
    #[arg(long)]
    pub load: Option<PathBuf>,

    /// Coverage used when solving from scratch (principal, exhaustive)
    #[arg(long, default_value = "exhaustive", conflicts_with = "load")]
    pub coverage: Coverage,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    let (first, second) = match &args.load {
        Some(path) => SavedAgents::load_from_file(path)
            .with_context(|| format!("failed to load agents from {}", path.display()))?
            .into_agents(),
        None => {
            let rules = args.board.rules()?;
            let config = SolverConfig::default().with_coverage(args.coverage);
            Agent::new_agents_with(&rules, config)?
        }
    };

    if let Some(size) = args.board.size.filter(|&size| size != first.board_size()) {
        bail!(
            "--size {size} does not match the loaded tables ({} cells)",
            first.board_size()
        );
    }

    let board = BoardState::from_label_sized(&args.state, first.board_size())
        .with_context(|| format!("invalid --state '{}'", args.state))?;
    let agent = match board.to_move {
        Player::First => &first,
        Player::Second => &second,
    };
    let key = EncodedState::from_board(&board);
    if !agent.contains(key) {
        bail!(
            "position {} is terminal or unreachable; no moves are recorded for player {}",
            board.label(),
            board.to_move
        );
    }

    print_section(&format!("Position {}", board.label()));
    println!("{board}");
    print_kv("Player to move", &board.to_move.to_string());
    print_kv("Encoded", &format!("{:#x}", key.value()));
    print_kv("Value", &agent.value_of(key)?.to_string());
    print_kv("Optimal actions", &format_actions(&agent.optimal_actions(key)?));

    print_subsection("All actions");
    for (action, entry) in agent.actions(key)? {
        println!(
            "  {:6} {:10} -> {} ({:?})",
            action.to_string(),
            entry.value().to_string(),
            agent.label(entry.successor()),
            entry.outcome()
        );
    }

    Ok(())
}
