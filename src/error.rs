//! Error types for the rowgame crate

use thiserror::Error;

/// Main error type for the rowgame crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action: column {column} is not a legal move on board '{state}'")]
    InvalidAction { column: usize, state: String },

    #[error("game already over")]
    GameOver,

    #[error("board size {size} is out of range (must be 1-{max})")]
    InvalidBoardSize { size: usize, max: usize },

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: 1={first}, 2={second} (must be equal or player 1 ahead by 1)")]
    InvalidPieceCounts { first: usize, second: usize },

    #[error("encoded state {key:#x} is not a valid board of {board_size} cells: {reason}")]
    InvalidEncoding {
        key: u64,
        board_size: usize,
        reason: String,
    },

    #[error("no entry recorded for state '{state}' in player {player}'s table")]
    MissingEntry { state: String, player: String },

    #[error("no entry recorded for action ({action}) at state '{state}'")]
    MissingAction { state: String, action: usize },

    #[error("invalid coverage '{input}'. Expected one of: {expected}")]
    ParseCoverage { input: String, expected: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("failed to {operation}: {message}")]
    SerializationContext { operation: String, message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
