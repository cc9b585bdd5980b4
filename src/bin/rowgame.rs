//! rowgame CLI - solve, inspect and play the adjacency row game

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "rowgame")]
#[command(version, about = "Exhaustive solver for the adjacency row game", long_about = None)]
struct Cli {
    /// Log solver progress (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover and train both players, then print a summary
    Solve(rowgame::cli::commands::solve::SolveArgs),

    /// Show the value and optimal moves of one position
    Inspect(rowgame::cli::commands::inspect::InspectArgs),

    /// Play an interactive game in the terminal
    Play(rowgame::cli::commands::play::PlayArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "rowgame=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Solve(args) => rowgame::cli::commands::solve::execute(args),
        Commands::Inspect(args) => rowgame::cli::commands::inspect::execute(args),
        Commands::Play(args) => rowgame::cli::commands::play::execute(args),
    }
}
