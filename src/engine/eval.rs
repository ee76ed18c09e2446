use crate::{GameState, PieceKind, Side};

/// Material value of a piece kind.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 10,
        PieceKind::Knight => 30,
        PieceKind::Bishop => 30,
        PieceKind::Rook => 50,
        PieceKind::Queen => 90,
        PieceKind::King => 900,
    }
}

/// Material balance seen from `perspective`: own pieces count positive,
/// opposing ones negative.
pub fn evaluate(state: &GameState, perspective: Side) -> i32 {
    state
        .pieces()
        .map(|piece| {
            let value = piece_value(piece.kind());
            if piece.side() == perspective {
                value
            } else {
                -value
            }
        })
        .sum()
}
