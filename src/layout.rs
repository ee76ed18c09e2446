use core::fmt;
use std::fmt::{Display, Write};

use lazy_static::lazy_static;

use crate::{ChessError, GameState, Piece, PieceKind, Position, Result, Side, BOARD_SIZE};

/// The standard starting arrangement, row 0 first.
pub const STANDARD_LAYOUT: &str = "\
R N B K Q B N R
P P P P P P P P
- - - - - - - -
- - - - - - - -
- - - - - - - -
- - - - - - - -
p p p p p p p p
r n b k q b n r";

const EMPTY_CELL: char = '-';

lazy_static! {
    pub(crate) static ref STARTING_POSITION: GameState =
        GameState::from_layout(STANDARD_LAYOUT, Side::White)
            .expect("standard layout is well formed");
}

impl GameState {
    /// Builds a board from eight lines of eight whitespace separated symbols.
    ///
    /// Upper case symbols are white pieces, lower case black ones and `-` an
    /// empty cell. Blank lines are skipped.
    pub fn from_layout(layout: &str, side_to_move: Side) -> Result<Self> {
        let mut state = GameState::empty(side_to_move);

        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != BOARD_SIZE {
            return Err(ChessError::Layout {
                line: rows.len(),
                message: format!("expected {BOARD_SIZE} rows but got {}", rows.len()),
            });
        }

        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<&str> = line.split_whitespace().collect();
            if symbols.len() != BOARD_SIZE {
                return Err(ChessError::Layout {
                    line: row,
                    message: format!("expected {BOARD_SIZE} cells but got {}", symbols.len()),
                });
            }

            for (col, symbol) in symbols.into_iter().enumerate() {
                let mut chars = symbol.chars();
                let (Some(symbol), None) = (chars.next(), chars.next()) else {
                    return Err(ChessError::Layout {
                        line: row,
                        message: format!("'{symbol}' is not a single symbol"),
                    });
                };
                if symbol == EMPTY_CELL {
                    continue;
                }
                let Some((kind, side)) = PieceKind::from_symbol(symbol) else {
                    return Err(ChessError::Layout {
                        line: row,
                        message: format!("unexpected '{symbol}' instead of piece"),
                    });
                };
                let position = Position::new(row as i32, col as i32)?;
                state.place(Piece::new(kind, side, position));
            }
        }

        Ok(state)
    }

    /// Renders the board in the format read by [GameState::from_layout].
    pub fn to_layout(&self) -> String {
        let mut layout = String::with_capacity(BOARD_SIZE * BOARD_SIZE * 2);
        for (i, position) in Position::all().enumerate() {
            if i > 0 {
                layout.push(if position.col() == 0 { '\n' } else { ' ' });
            }
            layout.push(self.piece_at(position).map_or(EMPTY_CELL, |p| p.symbol()));
        }
        layout
    }
}

impl Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('*')?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col}")?;
        }
        for (row, line) in self.to_layout().lines().enumerate() {
            write!(f, "\n{row} {line}")?;
        }
        write!(f, "\n{} to move", self.side_to_move())?;
        if self.in_check() {
            f.write_str(" (check)")?;
        }
        Ok(())
    }
}
