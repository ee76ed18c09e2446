use thiserror::Error;

use crate::Position;

/// Contract violations reported by the rules engine.
///
/// Routine "nothing there" outcomes (an empty selection, undo without
/// history) are not errors and are reported as empty results instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// A coordinate outside of the 8x8 grid was referenced.
    #[error("position ({row}, {col}) is outside of the board")]
    OutOfRange { row: i32, col: i32 },

    /// A move was requested that is not among the legal destinations of `from`.
    #[error("illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// A textual board layout could not be parsed.
    #[error("invalid layout on line {line}: {message}")]
    Layout { line: usize, message: String },
}

pub type Result<T, E = ChessError> = std::result::Result<T, E>;
