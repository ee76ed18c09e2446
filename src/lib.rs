use core::fmt;
use std::{fmt::Display, ops::Not};

pub mod engine;
mod error;
mod game;
mod layout;
mod legal;
mod piece;

pub use error::{ChessError, Result};
pub use game::{GameState, MoveRecord, TerminalStatus};
pub use layout::STANDARD_LAYOUT;
pub use piece::{Piece, PieceKind};

/// Number of rows and columns of the board.
pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub const ALL_SIDES: [Side; 2] = [Side::White, Side::Black];

    /// Row delta of a pawn move for this side.
    #[inline]
    pub fn forward(self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    /// Row the pawns of this side start on.
    #[inline]
    pub fn pawn_row(self) -> usize {
        match self {
            Side::White => 1,
            Side::Black => BOARD_SIZE - 2,
        }
    }

    /// Row a pawn of this side promotes on.
    #[inline]
    pub fn promotion_row(self) -> usize {
        match self {
            Side::White => BOARD_SIZE - 1,
            Side::Black => 0,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::White => f.write_str("White"),
            Side::Black => f.write_str("Black"),
        }
    }
}

impl Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

/// A cell of the board. Row 0 / column 0 is the top-left corner of the grid.
///
/// A `Position` can only be constructed inside the grid, so every value of
/// this type is a valid index into the board.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// creates a position, failing with [ChessError::OutOfRange] outside of the grid.
    pub fn new(row: i32, col: i32) -> Result<Self> {
        Self::checked(row, col).ok_or(ChessError::OutOfRange { row, col })
    }

    #[inline]
    fn checked(row: i32, col: i32) -> Option<Self> {
        let size = BOARD_SIZE as i32;
        if !(0..size).contains(&row) || !(0..size).contains(&col) {
            return None;
        }
        Some(Position {
            row: row as u8,
            col: col as u8,
        })
    }

    #[inline]
    pub fn row(self) -> usize {
        self.row as usize
    }

    #[inline]
    pub fn col(self) -> usize {
        self.col as usize
    }

    /// The position `(row + d_row, col + d_col)` or `None` if that leaves the board.
    #[inline]
    pub fn offset(self, d_row: i32, d_col: i32) -> Option<Position> {
        Self::checked(self.row as i32 + d_row, self.col as i32 + d_col)
    }

    /// Every position of the board in scan order (row by row).
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE as u8)
            .flat_map(|row| (0..BOARD_SIZE as u8).map(move |col| Position { row, col }))
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = ChessError;

    fn try_from((row, col): (i32, i32)) -> Result<Self> {
        Position::new(row, col)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Shorthand used throughout the tests.
#[cfg(test)]
pub(crate) fn pos(row: i32, col: i32) -> Position {
    Position::new(row, col).unwrap()
}
