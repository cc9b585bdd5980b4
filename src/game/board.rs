//! Board state representation and the placement rule

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Action, check_board_size};

/// A cell on the row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    First,
    Second,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::First => '1',
            Cell::Second => '2',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '_' | '.' => Some(Cell::Empty),
            '1' => Some(Cell::First),
            '2' => Some(Cell::Second),
            _ => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::First => Cell::First,
            Player::Second => Cell::Second,
        }
    }

    /// Player number as shown to humans (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Player::First => 1,
            Player::Second => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Immediate consequence of placing a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The mover placed a mark next to one of their own marks.
    Win,
    /// The row is full and nobody completed an adjacent pair.
    Draw,
    /// The opponent moves next.
    WaitingNextAction,
}

impl StepOutcome {
    pub fn is_terminal(self) -> bool {
        !matches!(self, StepOutcome::WaitingNextAction)
    }
}

/// Complete board state: the row of cells and whose turn it is
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub cells: Vec<Cell>,
    pub to_move: Player,
}

/// Count of each piece type on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PieceCount {
    first: usize,
    second: usize,
}

impl BoardState {
    /// Create an empty row with player 1 to move.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardSize`] if `size` is zero or larger
    /// than [`crate::types::MAX_BOARD_SIZE`].
    pub fn new(size: usize) -> Result<Self, crate::Error> {
        let size = check_board_size(size)?;
        Ok(BoardState {
            cells: vec![Cell::Empty; size],
            to_move: Player::First,
        })
    }

    /// Build a board from explicit cells, inferring whose turn it is.
    ///
    /// Player 1 always opens, so equal piece counts mean player 1 moves and a
    /// one-piece lead for player 1 means player 2 moves.
    ///
    /// # Errors
    ///
    /// Returns an error if the length is out of range or the piece counts
    /// cannot arise from alternating play.
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, crate::Error> {
        check_board_size(cells.len())?;
        let count = Self::count_pieces(&cells);
        let to_move = if count.first == count.second {
            Player::First
        } else if count.first == count.second + 1 {
            Player::Second
        } else {
            return Err(crate::Error::InvalidPieceCounts {
                first: count.first,
                second: count.second,
            });
        };
        Ok(BoardState { cells, to_move })
    }

    /// Parse a board label such as `1,_,2` or `1_2`.
    ///
    /// Commas and whitespace are ignored; `_` and `.` mark empty cells.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown characters or impossible piece counts.
    pub fn from_label(label: &str) -> Result<Self, crate::Error> {
        let mut cells = Vec::new();
        for (position, c) in label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .enumerate()
        {
            let cell = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position,
                context: label.to_string(),
            })?;
            cells.push(cell);
        }
        Self::from_cells(cells)
    }

    /// Parse a label and check it has exactly `size` cells.
    pub fn from_label_sized(label: &str, size: usize) -> Result<Self, crate::Error> {
        let board = Self::from_label(label)?;
        if board.size() != size {
            return Err(crate::Error::InvalidBoardLength {
                expected: size,
                got: board.size(),
                context: label.to_string(),
            });
        }
        Ok(board)
    }

    fn count_pieces(cells: &[Cell]) -> PieceCount {
        let mut count = PieceCount {
            first: 0,
            second: 0,
        };
        for cell in cells {
            match cell {
                Cell::First => count.first += 1,
                Cell::Second => count.second += 1,
                Cell::Empty => {}
            }
        }
        count
    }

    /// Number of cells in the row
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Check if a column is empty
    pub fn is_empty(&self, column: usize) -> bool {
        self.cells[column] == Cell::Empty
    }

    /// Check whether every cell is occupied
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// All empty columns, ascending
    pub fn legal_actions(&self) -> Vec<Action> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(column, _)| Action::unchecked(column))
            .collect()
    }

    /// Place the mover's mark and report the immediate outcome.
    ///
    /// The move wins when the left or right neighbour already holds the
    /// mover's own mark. Otherwise a full row is a draw.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidAction`] if the column is outside the
    /// row or already occupied.
    #[must_use = "step returns a new board state; the original is unchanged"]
    pub fn step(&self, action: Action) -> Result<(BoardState, StepOutcome), crate::Error> {
        let column = action.column();
        if column >= self.size() || !self.is_empty(column) {
            return Err(crate::Error::InvalidAction {
                column,
                state: self.label(),
            });
        }

        let mover = self.to_move.to_cell();
        let mut next = self.clone();
        next.cells[column] = mover;
        next.to_move = self.to_move.opponent();

        let left = column > 0 && next.cells[column - 1] == mover;
        let right = column + 1 < next.size() && next.cells[column + 1] == mover;

        let outcome = if left || right {
            StepOutcome::Win
        } else if next.is_full() {
            StepOutcome::Draw
        } else {
            StepOutcome::WaitingNextAction
        };

        Ok((next, outcome))
    }

    /// Validate `column` and apply it
    #[must_use = "play returns a new board state; the original is unchanged"]
    pub fn play(&self, column: usize) -> Result<(BoardState, StepOutcome), crate::Error> {
        self.step(Action::new(self, column)?)
    }

    /// Comma-separated cell label, e.g. `1,_,2`
    pub fn label(&self) -> String {
        self.cells
            .iter()
            .map(|c| c.to_char().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = "-".repeat(4 * self.size() + 1);
        writeln!(f, "{line}")?;
        write!(f, "|")?;
        for cell in &self.cells {
            match cell {
                Cell::Empty => write!(f, "   |")?,
                occupied => write!(f, " {} |", occupied.to_char())?,
            }
        }
        writeln!(f)?;
        write!(f, "{line}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board() {
        let board = BoardState::new(4).unwrap();
        assert_eq!(board.to_move, Player::First);
        assert_eq!(board.size(), 4);
        assert!(board.cells.iter().all(|&c| c == Cell::Empty));
        assert!(BoardState::new(0).is_err());
        assert!(BoardState::new(33).is_err());
    }

    #[test]
    fn test_step_alternates_players() {
        let board = BoardState::new(5).unwrap();
        let (board, outcome) = board.play(0).unwrap();
        assert_eq!(outcome, StepOutcome::WaitingNextAction);
        assert_eq!(board.to_move, Player::Second);

        let (board, _) = board.play(4).unwrap();
        assert_eq!(board.to_move, Player::First);
        assert_eq!(board.label(), "1,_,_,_,2");
    }

    #[test]
    fn test_step_rejects_occupied_column() {
        let (board, _) = BoardState::new(3).unwrap().play(1).unwrap();
        let err = board.step(Action::unchecked(1)).unwrap_err();
        assert!(err.to_string().contains("column 1"));
        assert!(board.step(Action::unchecked(7)).is_err());
    }

    #[test]
    fn test_own_neighbour_wins() {
        // 1 plays 0, 2 plays 3, 1 plays 1 next to its own mark
        let board = BoardState::from_label("1,_,_,2").unwrap();
        let (next, outcome) = board.play(1).unwrap();
        assert_eq!(outcome, StepOutcome::Win);
        assert_eq!(next.label(), "1,1,_,2");

        // right neighbour counts as well
        let board = BoardState::from_label("_,_,1,2").unwrap();
        let (_, outcome) = board.play(1).unwrap();
        assert_eq!(outcome, StepOutcome::Win);
    }

    #[test]
    fn test_opponent_neighbour_does_not_win() {
        let board = BoardState::from_label("1,_,_").unwrap();
        let (_, outcome) = board.play(1).unwrap();
        assert_eq!(outcome, StepOutcome::WaitingNextAction);
    }

    #[test]
    fn test_full_row_is_draw() {
        let board = BoardState::from_label("1,_").unwrap();
        let (next, outcome) = board.play(1).unwrap();
        assert_eq!(outcome, StepOutcome::Draw);
        assert!(next.is_full());

        let (_, outcome) = BoardState::new(1).unwrap().play(0).unwrap();
        assert_eq!(outcome, StepOutcome::Draw);
    }

    #[test]
    fn test_win_takes_priority_over_full_row() {
        let board = BoardState::from_label("1,2,_,1,2").unwrap();
        let (_, outcome) = board.play(2).unwrap();
        assert_eq!(outcome, StepOutcome::Win);
    }

    #[test]
    fn test_from_label_variants() {
        let board = BoardState::from_label("1,_,2").unwrap();
        assert_eq!(board.cells, vec![Cell::First, Cell::Empty, Cell::Second]);
        assert_eq!(board.to_move, Player::First);

        let compact = BoardState::from_label("1._").unwrap();
        assert_eq!(compact.to_move, Player::Second);

        assert!(BoardState::from_label("1,x,_").is_err());
        assert!(BoardState::from_label("2,_,_").is_err());
        assert!(BoardState::from_label("1,1,_").is_err());
        assert!(BoardState::from_label_sized("1,_", 3).is_err());
    }

    #[test]
    fn test_legal_actions_are_empty_columns() {
        let board = BoardState::from_label("_,1,2,_").unwrap();
        let columns: Vec<usize> = board.legal_actions().iter().map(|a| a.column()).collect();
        assert_eq!(columns, vec![0, 3]);
    }

    #[test]
    fn test_display() {
        let board = BoardState::from_label("1,_,2").unwrap();
        let rendered = board.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "-------------");
        assert_eq!(lines[1], "| 1 |   | 2 |");
        assert_eq!(lines[2], "-------------");
    }
}
