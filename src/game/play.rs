//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player, StepOutcome};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub column: usize,
    pub player: Player,
}

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Create a new game on an empty row of `size` cells
    pub fn new(size: usize) -> Result<Self, crate::Error> {
        Ok(Game {
            initial: BoardState::new(size)?,
            moves: Vec::new(),
            outcome: None,
        })
    }

    /// Play a move in `column` for whoever is to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::GameOver`] once the game has ended and
    /// [`crate::Error::InvalidAction`] for an occupied or out-of-range column.
    pub fn play(&mut self, column: usize) -> Result<StepOutcome, crate::Error> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let current = self.current_state()?;
        let (_, outcome) = current.play(column)?;

        self.moves.push(Move {
            column,
            player: current.to_move,
        });

        self.outcome = match outcome {
            StepOutcome::Win => Some(GameOutcome::Win(current.to_move)),
            StepOutcome::Draw => Some(GameOutcome::Draw),
            StepOutcome::WaitingNextAction => None,
        };

        Ok(outcome)
    }

    /// Replay moves up to a given index (exclusive)
    ///
    /// # Errors
    ///
    /// Returns error if any move in the history is invalid for the state it
    /// was played on. This indicates corrupted game data.
    fn replay_moves_until(&self, end_index: usize) -> Result<BoardState, crate::Error> {
        let mut state = self.initial.clone();
        for m in self.moves.iter().take(end_index) {
            let (next, _) = state.play(m.column)?;
            state = next;
        }
        Ok(state)
    }

    /// Get current board state
    pub fn current_state(&self) -> Result<BoardState, crate::Error> {
        self.replay_moves_until(self.moves.len())
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }
}
