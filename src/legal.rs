//! King safety: filtering pseudo-legal moves down to the legal ones.

use std::ops::Deref;

use crate::{GameState, Piece, Position, Side};

/// A move tried out on the cells only.
///
/// Side to move, check flag and history stay as they are. Dropping the
/// trial puts both cells back, whichever way the check is left.
struct Trial<'a> {
    state: &'a mut GameState,
    piece: Piece,
    to: Position,
    captured: Option<Piece>,
}

impl<'a> Trial<'a> {
    fn new(state: &'a mut GameState, piece: Piece, to: Position) -> Self {
        *state.cell_mut(piece.position()) = None;
        let captured = state.cell_mut(to).replace(piece.moved_to(to));
        Trial {
            state,
            piece,
            to,
            captured,
        }
    }
}

impl Deref for Trial<'_> {
    type Target = GameState;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        *self.state.cell_mut(self.to) = self.captured;
        *self.state.cell_mut(self.piece.position()) = Some(self.piece);
    }
}

impl GameState {
    /// Returns `true` if any piece of `by` could capture on `target`.
    pub fn is_attacked(&self, target: Position, by: Side) -> bool {
        self.pieces_of(by).any(|piece| piece.attacks(self, target))
    }

    /// Returns `true` if the king of `side` is attacked on the current board.
    /// A side without a king is never in check.
    pub fn is_in_check(&self, side: Side) -> bool {
        self.king_position(side)
            .is_some_and(|king| self.is_attacked(king, !side))
    }

    /// Legal destinations of the piece on `position`.
    ///
    /// Empty if the cell is empty, holds a piece of the side not to move, or
    /// the piece has nowhere to go without exposing its own king.
    pub fn legal_destinations(&self, position: Position) -> Vec<Position> {
        let Some(piece) = self.piece_at(position) else {
            return vec![];
        };
        if piece.side() != self.side_to_move() {
            return vec![];
        }

        let mut scratch = self.scratch_copy();
        let mut moves = piece.all_moves(self);
        moves.retain(|&to| scratch.keeps_king_safe(piece, to));
        moves
    }

    /// Every legal move of the side to move, in board scan order.
    pub fn legal_moves(&self) -> Vec<(Position, Position)> {
        let mut moves = Vec::with_capacity(64);
        for piece in self.pieces_of(self.side_to_move()) {
            let from = piece.position();
            moves.extend(self.legal_destinations(from).into_iter().map(|to| (from, to)));
        }
        moves
    }

    /// Tries `piece` on `to` and reports whether its own king is safe there.
    /// The board is restored before this returns.
    fn keeps_king_safe(&mut self, piece: Piece, to: Position) -> bool {
        let trial = Trial::new(self, piece, to);
        !trial.is_in_check(piece.side())
    }
}
