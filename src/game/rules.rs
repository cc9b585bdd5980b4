//! The row game as a [`GameRules`] adapter

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Cell, Player, StepOutcome};
use crate::{
    Result,
    ports::GameRules,
    solver::EncodedState,
    types::{Action, check_board_size},
};

/// Rules of the adjacency row game on a board of fixed length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowGame {
    board_size: usize,
}

impl RowGame {
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardSize`] for zero or oversized rows.
    pub fn new(board_size: usize) -> Result<Self> {
        Ok(Self {
            board_size: check_board_size(board_size)?,
        })
    }
}

impl GameRules for RowGame {
    type State = BoardState;

    fn board_size(&self) -> usize {
        self.board_size
    }

    fn initial_state(&self) -> BoardState {
        BoardState {
            cells: vec![Cell::Empty; self.board_size],
            to_move: Player::First,
        }
    }

    fn legal_actions(&self, state: &BoardState) -> Vec<Action> {
        state.legal_actions()
    }

    fn step(&self, state: &BoardState, action: Action) -> Result<(BoardState, StepOutcome)> {
        state.step(action)
    }

    fn encode(&self, state: &BoardState) -> EncodedState {
        EncodedState::from_board(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_matches_board_constructor() {
        let rules = RowGame::new(4).unwrap();
        assert_eq!(rules.initial_state(), BoardState::new(4).unwrap());
        assert_eq!(rules.encode(&rules.initial_state()).value(), 0);
    }

    #[test]
    fn test_step_delegates_to_board() {
        let rules = RowGame::new(3).unwrap();
        let start = rules.initial_state();
        let centre = rules.legal_actions(&start)[1];
        let (next, outcome) = rules.step(&start, centre).unwrap();
        assert_eq!(outcome, StepOutcome::WaitingNextAction);
        assert_eq!(next.label(), "_,1,_");
        assert!(rules.step(&next, centre).is_err());
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(RowGame::new(0).is_err());
        assert!(RowGame::new(33).is_err());
    }
}
