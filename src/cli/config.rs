//! Shared argument groups for CLI commands

use anyhow::{Context, Result};
use clap::Args;

use crate::{config::GameConfig, game::RowGame};

/// Board selection shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct BoardArgs {
    /// Number of cells in the row (overrides ROWGAME_BOARD_SIZE)
    #[arg(long, short = 's')]
    pub size: Option<usize>,
}

impl BoardArgs {
    /// Resolve the game configuration: `--size`, then the environment, then
    /// the default.
    pub fn game_config(&self) -> Result<GameConfig> {
        match self.size {
            Some(size) => GameConfig::default()
                .with_board_size(size)
                .with_context(|| format!("invalid --size {size}")),
            None => GameConfig::from_env().context("failed to read board size from environment"),
        }
    }

    pub fn rules(&self) -> Result<RowGame> {
        let config = self.game_config()?;
        Ok(RowGame::new(config.board_size)?)
    }
}
