use core::fmt;

use crate::{GameState, Position, Side};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL_KINDS: [PieceKind; 6] = {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    };

    pub const ALL_PROMOTION_TARGETS: [PieceKind; 4] = {
        use PieceKind::*;
        [Queen, Rook, Bishop, Knight]
    };

    /// upper case symbol of this kind, as used for the white pieces.
    pub fn symbol(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parses a display symbol. Upper case is white, lower case black.
    pub fn from_symbol(symbol: char) -> Option<(PieceKind, Side)> {
        let side = if symbol.is_ascii_uppercase() {
            Side::White
        } else {
            Side::Black
        };
        let kind = match symbol.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some((kind, side))
    }

    /// Ray directions of the sliding pieces, empty for everything else.
    fn rays(self) -> &'static [(i32, i32)] {
        match self {
            PieceKind::Rook => &ROOK_RAYS,
            PieceKind::Bishop => &BISHOP_RAYS,
            PieceKind::Queen => &QUEEN_RAYS,
            _ => &[],
        }
    }
}

const ROOK_RAYS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];
const BISHOP_RAYS: [(i32, i32); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
const QUEEN_RAYS: [(i32, i32); 8] = [
    (-1, 0),
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
    (-1, -1),
];

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// One chess piece together with the cell it stands on.
///
/// The board keeps `position` in sync with the cell holding the piece, a
/// detached piece (one not placed on any board) may still be asked for its
/// moves against a board.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    side: Side,
    position: Position,
}

/// Destinations of a piece, split by whether they take an opposing piece.
#[derive(Debug, Default)]
struct Targets {
    peaceful: Vec<Position>,
    captures: Vec<Position>,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side, position: Position) -> Self {
        Piece {
            kind,
            side,
            position,
        }
    }

    #[inline(always)]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline(always)]
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn symbol(&self) -> char {
        match self.side {
            Side::White => self.kind.symbol(),
            Side::Black => self.kind.symbol().to_ascii_lowercase(),
        }
    }

    /// a copy of this piece standing on `position`.
    #[inline]
    pub(crate) fn moved_to(self, position: Position) -> Piece {
        Piece { position, ..self }
    }

    #[inline]
    pub(crate) fn promoted_to(self, kind: PieceKind) -> Piece {
        Piece { kind, ..self }
    }

    /// Empty cells this piece can move to, respecting blocking.
    pub fn peaceful_moves(&self, board: &GameState) -> Vec<Position> {
        self.targets(board).peaceful
    }

    /// Cells holding an opposing piece that this piece can take.
    pub fn capture_moves(&self, board: &GameState) -> Vec<Position> {
        self.targets(board).captures
    }

    /// Pseudo-legal destinations: peaceful moves followed by captures.
    pub fn all_moves(&self, board: &GameState) -> Vec<Position> {
        let Targets {
            mut peaceful,
            captures,
        } = self.targets(board);
        peaceful.extend(captures);
        peaceful
    }

    /// Returns `true` if this piece could take a piece standing on `target`.
    pub(crate) fn attacks(&self, board: &GameState, target: Position) -> bool {
        self.targets(board).captures.contains(&target)
    }

    fn targets(&self, board: &GameState) -> Targets {
        match self.kind {
            PieceKind::Pawn => self.pawn_targets(board),
            PieceKind::Knight => self.step_targets(board, &KNIGHT_JUMPS),
            PieceKind::King => self.step_targets(board, &KING_STEPS),
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                self.sliding_targets(board, self.kind.rays())
            }
        }
    }

    fn pawn_targets(&self, board: &GameState) -> Targets {
        let mut targets = Targets::default();
        let forward = self.side.forward();

        // move 1 forward
        if let Some(one) = self.position.offset(forward, 0) {
            if board.piece_at(one).is_none() {
                targets.peaceful.push(one);

                // check if we can move 2 forward
                if self.position.row() == self.side.pawn_row() {
                    if let Some(two) = self.position.offset(2 * forward, 0) {
                        if board.piece_at(two).is_none() {
                            targets.peaceful.push(two);
                        }
                    }
                }
            }
        }

        for d_col in [-1, 1] {
            if let Some(target) = self.position.offset(forward, d_col) {
                if self.is_opponent(board, target) {
                    targets.captures.push(target);
                }
            }
        }

        targets
    }

    /// Knight and King: single steps that ignore anything in between.
    fn step_targets(&self, board: &GameState, offsets: &[(i32, i32)]) -> Targets {
        let mut targets = Targets::default();
        for &(d_row, d_col) in offsets {
            let Some(target) = self.position.offset(d_row, d_col) else {
                continue;
            };
            match board.piece_at(target) {
                None => targets.peaceful.push(target),
                Some(other) if other.side != self.side => targets.captures.push(target),
                Some(_) => {}
            }
        }
        targets
    }

    fn sliding_targets(&self, board: &GameState, rays: &[(i32, i32)]) -> Targets {
        let mut targets = Targets::default();
        for &(d_row, d_col) in rays {
            let mut current = self.position;
            while let Some(target) = current.offset(d_row, d_col) {
                match board.piece_at(target) {
                    None => targets.peaceful.push(target),
                    Some(other) => {
                        if other.side != self.side {
                            targets.captures.push(target);
                        }
                        break;
                    }
                }
                current = target;
            }
        }
        targets
    }

    #[inline]
    fn is_opponent(&self, board: &GameState, target: Position) -> bool {
        board
            .piece_at(target)
            .is_some_and(|other| other.side != self.side)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("kind", &self.kind)
            .field("side", &self.side)
            .field("position", &self.position)
            .finish()
    }
}
