//! Exhaustive solver for the adjacency row game
//!
//! Two players take turns placing their mark on an empty cell of a fixed
//! length row. Placing a mark directly next to one of your own wins; filling
//! the row without that happening is a draw.
//!
//! This crate provides:
//! - The row game itself with validated boards and moves ([`game`])
//! - Compact integer encoding of positions ([`solver::EncodedState`])
//! - Per-player value tables filled by breadth-first discovery and refined
//!   by alternating backward induction ([`solver::Agent`])
//! - MessagePack persistence and JSON policy export
//! - A small CLI for solving, inspecting and playing ([`cli`])

pub mod cli;
pub mod config;
pub mod error;
pub mod game;
pub mod ports;
pub mod solver;
pub mod types;

pub use config::{Coverage, GameConfig, SolverConfig};
pub use error::{Error, Result};
pub use game::{BoardState, Player, RowGame, StepOutcome};
pub use solver::{Agent, EncodedState, Solver, Value};
pub use types::Action;
