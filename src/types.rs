//! Newtype wrappers and board-wide constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game::BoardState;

/// Largest supported board: 32 cells of 2 bits fill a `u64` key.
pub const MAX_BOARD_SIZE: usize = 32;

/// Board length used when neither the CLI nor the environment picks one.
pub const DEFAULT_BOARD_SIZE: usize = 5;

/// A column on the board where the player to move places a mark.
///
/// Actions order by column index, which makes every enumeration of
/// moves (and therefore every tie-break between optimal moves)
/// deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(usize);

impl Action {
    /// Create an action, validating that `column` is empty in `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] if the column is out of range
    /// or already occupied.
    ///
    /// # Examples
    ///
    /// ```
    /// use rowgame::{game::BoardState, types::Action};
    ///
    /// let board = BoardState::new(3).unwrap();
    /// let centre = Action::new(&board, 1).unwrap();
    /// assert_eq!(centre.column(), 1);
    /// assert!(Action::new(&board, 3).is_err());
    /// ```
    pub fn new(state: &BoardState, column: usize) -> Result<Self, crate::Error> {
        if column < state.size() && state.is_empty(column) {
            Ok(Action(column))
        } else {
            Err(crate::Error::InvalidAction {
                column,
                state: state.label(),
            })
        }
    }

    /// Wrap a column that the caller already knows to be empty.
    pub(crate) const fn unchecked(column: usize) -> Self {
        Action(column)
    }

    /// Get the column index.
    pub fn column(&self) -> usize {
        self.0
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0)
    }
}

/// Validate a board length against [`MAX_BOARD_SIZE`].
///
/// # Errors
///
/// Returns [`crate::Error::InvalidBoardSize`] for zero or oversized boards.
pub fn check_board_size(size: usize) -> Result<usize, crate::Error> {
    if (1..=MAX_BOARD_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(crate::Error::InvalidBoardSize {
            size,
            max: MAX_BOARD_SIZE,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_validation() {
        let board = BoardState::new(3).unwrap();
        assert!(Action::new(&board, 0).is_ok());
        assert!(Action::new(&board, 2).is_ok());
        assert!(Action::new(&board, 3).is_err());

        let (after, _) = board.play(1).unwrap();
        let err = Action::new(&after, 1).unwrap_err();
        assert!(err.to_string().contains("not a legal move"));
    }

    #[test]
    fn test_action_ordering_and_display() {
        let mut actions = vec![Action(2), Action(0), Action(1)];
        actions.sort();
        assert_eq!(actions, vec![Action(0), Action(1), Action(2)]);
        assert_eq!(Action(4).to_string(), "(4)");
    }

    #[test]
    fn test_board_size_bounds() {
        assert!(check_board_size(0).is_err());
        assert_eq!(check_board_size(1).unwrap(), 1);
        assert_eq!(check_board_size(MAX_BOARD_SIZE).unwrap(), MAX_BOARD_SIZE);
        assert!(check_board_size(MAX_BOARD_SIZE + 1).is_err());
    }
}
