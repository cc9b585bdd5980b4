//! Adjacency row game implementation

pub mod board;
pub mod play;
pub mod rules;
pub mod tree;

pub use board::{BoardState, Cell, Player, StepOutcome};
pub use play::{Game, GameOutcome, Move};
pub use rules::RowGame;
pub use tree::{ReachableStates, collect_reachable_states};
