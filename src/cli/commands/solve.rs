//! Solve command - Discover and train both players for one board length

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::BoardArgs,
        output::{
            create_spinner, format_actions, format_number, print_kv, print_section,
            print_subsection,
        },
    },
    config::{Coverage, SolverConfig},
    game::Player,
    solver::{PolicyExport, SavedAgents, Solver},
};

#[derive(Parser, Debug)]
#[command(about = "Solve the row game for a board length")]
pub struct SolveArgs {
    #[command(flatten)]
    pub board: BoardArgs,

    /// Which positions seed each training epoch (principal, exhaustive)
    #[arg(long, default_value = "principal")]
    pub coverage: Coverage,

    /// Print both players' full tables
    #[arg(long)]
    pub tables: bool,

    /// Export the solved policy as JSON
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Save the solved agents as MessagePack
    #[arg(long)]
    pub save: Option<PathBuf>,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let rules = args.board.rules()?;
    let config = SolverConfig::default().with_coverage(args.coverage);

    let spinner = create_spinner("Discovering positions...");
    let mut solver = Solver::new(&rules, config)?;
    spinner.set_message("Training...");
    let report = solver.train()?;
    spinner.finish_and_clear();

    let discovery = solver.discovery();
    let initial = solver.initial();
    let first = solver.first();
    let second = solver.second();

    print_section(&format!("Row game on {} cells", first.board_size()));
    print_kv("Coverage", &args.coverage.to_string());
    print_kv("Player 1 states", &format_number(discovery.first_states));
    print_kv("Player 2 states", &format_number(discovery.second_states));
    print_kv("Entries", &format_number(discovery.entries));
    print_kv("Epochs", &report.epoch_count().to_string());
    if let Some(epoch) = report.converged_at() {
        print_kv("Converged at epoch", &epoch.to_string());
    }
    print_kv("Initial value", &first.value_of(initial)?.to_string());
    print_kv(
        "Optimal first moves",
        &format_actions(&first.optimal_actions(initial)?),
    );

    if args.tables {
        for player in [Player::First, Player::Second] {
            print_subsection(&format!("Player {player}"));
            println!("{}", solver.agent(player));
        }
    }

    if let Some(path) = &args.export {
        PolicyExport::from_agents(first, second)?
            .write_json(path)
            .with_context(|| format!("failed to export policy to {}", path.display()))?;
        println!("\nPolicy exported to: {}", path.display());
    }

    if let Some(path) = &args.save {
        let (first, second) = solver.into_agents();
        SavedAgents::new(first, second, args.coverage)?
            .save_to_file(path)
            .with_context(|| format!("failed to save agents to {}", path.display()))?;
        println!("Agents saved to: {}", path.display());
    }

    Ok(())
}
