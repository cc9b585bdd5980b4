//! Configuration for the game and the solver.

use std::{env, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_BOARD_SIZE, check_board_size};

/// Environment variable that selects the board length.
pub const BOARD_SIZE_ENV: &str = "ROWGAME_BOARD_SIZE";

/// Which positions seed each training epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Coverage {
    /// Player 1 epochs start from the empty row; player 2 epochs start from
    /// the positions after player 1's currently optimal opening moves.
    /// Positions off the principal line may stay undefined.
    #[default]
    Principal,
    /// Every epoch starts from every position recorded for its player, so
    /// the whole discovered table ends up solved.
    Exhaustive,
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Coverage::Principal => "principal",
            Coverage::Exhaustive => "exhaustive",
        };
        f.write_str(label)
    }
}

impl FromStr for Coverage {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "principal" | "path" => Ok(Coverage::Principal),
            "exhaustive" | "all" | "full" => Ok(Coverage::Exhaustive),
            _ => Err(crate::Error::ParseCoverage {
                input: s.to_string(),
                expected: "principal, exhaustive".to_string(),
            }),
        }
    }
}

/// Configuration for the game being solved.
///
/// # Examples
///
/// ```
/// use rowgame::config::GameConfig;
///
/// let config = GameConfig::default().with_board_size(7).unwrap();
/// assert_eq!(config.board_size, 7);
/// assert!(GameConfig::default().with_board_size(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of cells in the row
    pub board_size: usize,
}

impl GameConfig {
    /// Read the board length from [`BOARD_SIZE_ENV`], falling back to the
    /// default when the variable is unset.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if the variable is set
    /// but is not a valid board length.
    pub fn from_env() -> Result<Self, crate::Error> {
        match env::var(BOARD_SIZE_ENV) {
            Ok(raw) => Self::parse_board_size(&raw),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(crate::Error::InvalidConfiguration {
                message: format!("{BOARD_SIZE_ENV} is not valid unicode"),
            }),
        }
    }

    fn parse_board_size(raw: &str) -> Result<Self, crate::Error> {
        let size: usize = raw
            .trim()
            .parse()
            .map_err(|_| crate::Error::InvalidConfiguration {
                message: format!("{BOARD_SIZE_ENV}='{raw}' is not a non-negative integer"),
            })?;
        Self::default().with_board_size(size).map_err(|e| {
            crate::Error::InvalidConfiguration {
                message: format!("{BOARD_SIZE_ENV}: {e}"),
            }
        })
    }

    /// Set the board length.
    pub fn with_board_size(mut self, board_size: usize) -> Result<Self, crate::Error> {
        self.board_size = check_board_size(board_size)?;
        Ok(self)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
        }
    }
}

/// Configuration for discovery and training.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Which positions seed each epoch
    pub coverage: Coverage,
}

impl SolverConfig {
    /// Set the epoch coverage.
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }
}
