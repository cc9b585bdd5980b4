//! Compact integer keys for board positions
//!
//! Each cell takes a 2-bit field (`00` empty, `01` player 1, `10` player 2).
//! Fields are concatenated in board order with cell 0 in the most
//! significant position, so the empty row always encodes to zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    game::{BoardState, Cell},
    types::check_board_size,
};

/// Bits used per cell.
pub const CELL_BITS: u32 = 2;

const CELL_MASK: u64 = 0b11;
const EMPTY_CODE: u64 = 0b00;
const FIRST_CODE: u64 = 0b01;
const SECOND_CODE: u64 = 0b10;

fn cell_code(cell: Cell) -> u64 {
    match cell {
        Cell::Empty => EMPTY_CODE,
        Cell::First => FIRST_CODE,
        Cell::Second => SECOND_CODE,
    }
}

fn code_cell(code: u64) -> Option<Cell> {
    match code {
        EMPTY_CODE => Some(Cell::Empty),
        FIRST_CODE => Some(Cell::First),
        SECOND_CODE => Some(Cell::Second),
        _ => None,
    }
}

/// A board packed into a `u64`.
///
/// The key does not record the board length (leading empty cells are zero
/// bits), so decoding takes the length explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedState(u64);

impl EncodedState {
    /// Pack a sequence of cells.
    pub fn from_cells(cells: &[Cell]) -> Self {
        debug_assert!(cells.len() <= crate::types::MAX_BOARD_SIZE);
        let key = cells
            .iter()
            .fold(0u64, |key, &cell| (key << CELL_BITS) | cell_code(cell));
        EncodedState(key)
    }

    pub fn from_board(board: &BoardState) -> Self {
        Self::from_cells(&board.cells)
    }

    pub const fn from_raw(key: u64) -> Self {
        EncodedState(key)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Unpack the key into `board_size` cells.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardSize`] if `board_size` does not fit
    /// a key, and [`crate::Error::InvalidEncoding`] if a field holds the
    /// reserved code `11` or bits are set beyond the board.
    pub fn to_cells(self, board_size: usize) -> Result<Vec<Cell>, crate::Error> {
        check_board_size(board_size)?;
        let invalid = |reason: String| crate::Error::InvalidEncoding {
            key: self.0,
            board_size,
            reason,
        };

        let width = CELL_BITS * board_size as u32;
        if self.0.checked_shr(width).unwrap_or(0) != 0 {
            return Err(invalid("bits set beyond the last cell".to_string()));
        }

        (0..board_size)
            .map(|column| {
                let shift = CELL_BITS * (board_size - 1 - column) as u32;
                let code = (self.0 >> shift) & CELL_MASK;
                code_cell(code).ok_or_else(|| invalid(format!("reserved code {code:#b} in cell {column}")))
            })
            .collect()
    }

    /// Rebuild the full board, inferring whose turn it is.
    pub fn to_board(self, board_size: usize) -> Result<BoardState, crate::Error> {
        BoardState::from_cells(self.to_cells(board_size)?)
    }

    /// Human-readable label such as `1,_,2`.
    ///
    /// Undecodable fields render as `?`; this is for diagnostics only.
    pub fn label(self, board_size: usize) -> String {
        self.display(board_size).to_string()
    }

    pub fn display(self, board_size: usize) -> EncodedLabel {
        EncodedLabel {
            key: self,
            board_size,
        }
    }
}

/// [`fmt::Display`] adapter pairing a key with its board length.
#[derive(Debug, Clone, Copy)]
pub struct EncodedLabel {
    key: EncodedState,
    board_size: usize,
}

impl fmt::Display for EncodedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in 0..self.board_size {
            if column > 0 {
                f.write_str(",")?;
            }
            let shift = CELL_BITS * (self.board_size - 1 - column) as u32;
            let code = self.key.0.checked_shr(shift).unwrap_or(0) & CELL_MASK;
            let c = code_cell(code).map_or('?', Cell::to_char);
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
