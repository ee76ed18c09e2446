use std::ops::{Deref, DerefMut, Index};

use log::debug;

use crate::{
    layout::STARTING_POSITION, ChessError, Piece, PieceKind, Position, Result, Side, BOARD_SIZE,
};

/// Everything needed to take back one applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Position,
    pub to: Position,
    /// the moving piece as it stood on `from` before the move
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promoted_to: Option<PieceKind>,
    pub by_engine: bool,
    /// `in_check` before the move was applied
    pub was_in_check: bool,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalStatus {
    Ongoing,
    Checkmate { winner: Side },
    Stalemate,
}

impl TerminalStatus {
    #[inline]
    pub fn is_over(self) -> bool {
        self != TerminalStatus::Ongoing
    }
}

#[derive(Debug, Clone)]
pub struct GameState {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
    side_to_move: Side,
    in_check: bool,
    history: Vec<MoveRecord>,
}

impl PartialEq<GameState> for GameState {
    fn eq(&self, other: &GameState) -> bool {
        // the move history is not part of the position
        self.cells == other.cells
            && self.side_to_move == other.side_to_move
            && self.in_check == other.in_check
    }
}
impl Eq for GameState {}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// The standard starting position, white to move.
    pub fn new() -> Self {
        STARTING_POSITION.clone()
    }

    /// A board without any pieces.
    pub fn empty(side_to_move: Side) -> Self {
        GameState {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
            side_to_move,
            in_check: false,
            history: Vec::new(),
        }
    }

    /// Restarts the game from the standard starting position.
    pub fn reset(&mut self) {
        *self = Self::new();
        debug!("game reset");
    }

    /// Puts `piece` on the cell named by its position, replacing whatever
    /// stood there. Meant for building explicit arrangements.
    pub fn place(&mut self, piece: Piece) -> Option<Piece> {
        let replaced = self.cell_mut(piece.position()).replace(piece);
        self.refresh_check();
        replaced
    }

    /// Clears the cell at `position`, returning the piece that stood there.
    pub fn remove(&mut self, position: Position) -> Option<Piece> {
        let removed = self.cell_mut(position).take();
        self.refresh_check();
        removed
    }

    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<Piece> {
        self[position]
    }

    /// Bounds-checked lookup by raw coordinates.
    pub fn piece_at_coords(&self, row: i32, col: i32) -> Result<Option<Piece>> {
        Ok(self.piece_at(Position::new(row, col)?))
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// Whether the side to move is attacked right now.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Applied moves, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// All pieces in board scan order.
    pub fn pieces(&self) -> impl Iterator<Item = Piece> + '_ {
        self.cells.iter().flatten().filter_map(|cell| *cell)
    }

    pub fn pieces_of(&self, side: Side) -> impl Iterator<Item = Piece> + '_ {
        self.pieces().filter(move |piece| piece.side() == side)
    }

    pub fn king_position(&self, side: Side) -> Option<Position> {
        self.pieces_of(side)
            .find(|piece| piece.kind() == PieceKind::King)
            .map(|king| king.position())
    }

    /// true if `position` holds a piece of the side to move.
    pub fn is_occupied_by_movable_piece(&self, position: Position) -> bool {
        self.piece_at(position)
            .is_some_and(|piece| piece.side() == self.side_to_move)
    }

    /// Moves the piece on `from` to `to`, promoting pawns to a queen.
    ///
    /// Returns the piece as it stands after the move and whether something
    /// was captured. Fails with [ChessError::IllegalMove] if `to` is not one of
    /// [GameState::legal_destinations] of `from`; the board is untouched then.
    pub fn apply_move(
        &mut self,
        from: Position,
        to: Position,
        is_engine_move: bool,
    ) -> Result<(Piece, bool)> {
        self.apply_move_promoting(from, to, PieceKind::Queen, is_engine_move)
    }

    /// Like [GameState::apply_move] but promotes a pawn reaching the far row
    /// to `promotion` instead of a queen.
    pub fn apply_move_promoting(
        &mut self,
        from: Position,
        to: Position,
        promotion: PieceKind,
        is_engine_move: bool,
    ) -> Result<(Piece, bool)> {
        if matches!(promotion, PieceKind::Pawn | PieceKind::King)
            || !self.legal_destinations(from).contains(&to)
        {
            return Err(ChessError::IllegalMove { from, to });
        }

        let record = self.play_vetted(from, to, promotion, is_engine_move);
        debug!(
            "{} {:?} {from} -> {to}{}",
            record.piece.side(),
            record.piece.kind(),
            if record.is_capture() { " (capture)" } else { "" }
        );

        let moved = self[to].ok_or(ChessError::IllegalMove { from, to })?;
        Ok((moved, record.is_capture()))
    }

    /// Plays a move that is already known to be legal and returns its record.
    pub(crate) fn play_vetted(
        &mut self,
        from: Position,
        to: Position,
        promotion: PieceKind,
        by_engine: bool,
    ) -> MoveRecord {
        debug_assert!(self.is_occupied_by_movable_piece(from));

        let piece = self
            .cell_mut(from)
            .take()
            .expect("vetted move must start on an occupied cell");
        let promoted_to = (piece.kind() == PieceKind::Pawn
            && to.row() == piece.side().promotion_row())
        .then_some(promotion);

        let mut moved = piece.moved_to(to);
        if let Some(kind) = promoted_to {
            moved = moved.promoted_to(kind);
        }
        let captured = self.cell_mut(to).replace(moved);

        let record = MoveRecord {
            from,
            to,
            piece,
            captured,
            promoted_to,
            by_engine,
            was_in_check: self.in_check,
        };
        self.history.push(record);

        self.side_to_move = !self.side_to_move;
        self.refresh_check();

        record
    }

    /// Takes back the most recent move. Returns `None` if there is no history.
    pub fn undo_last_move(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;

        *self.cell_mut(record.from) = Some(record.piece);
        *self.cell_mut(record.to) = record.captured;
        self.side_to_move = !self.side_to_move;
        self.in_check = record.was_in_check;

        Some(record)
    }

    /// Plays a vetted move for as long as the returned guard lives.
    pub(crate) fn scoped_move(&mut self, from: Position, to: Position) -> ScopedMove<'_> {
        self.play_vetted(from, to, PieceKind::Queen, true);
        ScopedMove { state: self }
    }

    /// Checkmate, stalemate or neither for the side to move, computed fresh.
    pub fn terminal_status(&self) -> TerminalStatus {
        let side = self.side_to_move;
        let can_move = self
            .pieces_of(side)
            .any(|piece| !self.legal_destinations(piece.position()).is_empty());

        if can_move {
            TerminalStatus::Ongoing
        } else if self.is_in_check(side) {
            TerminalStatus::Checkmate { winner: !side }
        } else {
            TerminalStatus::Stalemate
        }
    }

    /// Counts the leaf positions `depth` plies of legal moves away.
    pub fn perft(&mut self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut count = 0;
        for (from, to) in moves {
            let mut child = self.scoped_move(from, to);
            count += child.perft(depth - 1);
        }
        count
    }

    /// Same cells, side and check flag, without the history.
    pub(crate) fn scratch_copy(&self) -> GameState {
        GameState {
            cells: self.cells,
            side_to_move: self.side_to_move,
            in_check: self.in_check,
            history: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn cell_mut(&mut self, position: Position) -> &mut Option<Piece> {
        &mut self.cells[position.row()][position.col()]
    }

    #[inline]
    fn refresh_check(&mut self) {
        self.in_check = self.is_in_check(self.side_to_move);
    }
}

/// A move that is taken back when the guard is dropped.
///
/// Every exit path out of the scope holding the guard, an early `return`
/// or `break` included, undoes the move exactly once.
pub struct ScopedMove<'a> {
    state: &'a mut GameState,
}

impl Deref for ScopedMove<'_> {
    type Target = GameState;

    fn deref(&self) -> &Self::Target {
        self.state
    }
}

impl DerefMut for ScopedMove<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.state
    }
}

impl Drop for ScopedMove<'_> {
    fn drop(&mut self) {
        self.state.undo_last_move();
    }
}

impl Index<Position> for GameState {
    type Output = Option<Piece>;

    fn index(&self, index: Position) -> &Self::Output {
        &self.cells[index.row()][index.col()]
    }
}


#[cfg(test)]
mod test {
    use crate::{pos, ChessError, GameState, Piece, PieceKind, Position, Side, TerminalStatus};

    /// Snapshot of everything `undo_last_move` has to restore.
    fn snapshot(state: &GameState) -> (Vec<Option<Piece>>, Side, bool) {
        (
            Position::all().map(|p| state.piece_at(p)).collect(),
            state.side_to_move(),
            state.in_check(),
        )
    }

    #[test]
    fn standard_position() {
        let state = GameState::new();
        assert_eq!(state.side_to_move(), Side::White);
        assert!(!state.in_check());
        assert_eq!(state.pieces().count(), 32);
        assert_eq!(state.king_position(Side::White), Some(pos(0, 3)));
        assert_eq!(state.king_position(Side::Black), Some(pos(7, 3)));
        for piece in state.pieces() {
            assert_eq!(state.piece_at(piece.position()), Some(piece));
        }
        assert_eq!(state.terminal_status(), TerminalStatus::Ongoing);
    }

    #[test]
    fn piece_at_out_of_range() {
        let state = GameState::new();
        assert_eq!(
            state.piece_at_coords(8, 3),
            Err(ChessError::OutOfRange { row: 8, col: 3 })
        );
        assert_eq!(
            state.piece_at_coords(0, 0).unwrap().map(|p| p.kind()),
            Some(PieceKind::Rook)
        );
        assert_eq!(state.piece_at_coords(4, 4), Ok(None));
    }

    #[test]
    fn movable_piece_selection() {
        let state = GameState::new();
        assert!(state.is_occupied_by_movable_piece(pos(1, 0)));
        assert!(!state.is_occupied_by_movable_piece(pos(6, 0)));
        assert!(!state.is_occupied_by_movable_piece(pos(3, 3)));
    }

    #[test]
    fn apply_move_flips_side_and_moves_piece() {
        let mut state = GameState::new();
        let (piece, captured) = state.apply_move(pos(1, 4), pos(3, 4), false).unwrap();
        assert!(!captured);
        assert_eq!(piece.position(), pos(3, 4));
        assert_eq!(piece.kind(), PieceKind::Pawn);
        assert_eq!(state.piece_at(pos(3, 4)), Some(piece));
        assert_eq!(state.piece_at(pos(1, 4)), None);
        assert_eq!(state.side_to_move(), Side::Black);
        assert_eq!(state.history().len(), 1);
        assert!(!state.history()[0].by_engine);
    }

    #[test]
    fn illegal_moves_are_rejected() {
        let mut state = GameState::new();
        let before = snapshot(&state);

        // pawn three cells forward
        assert_eq!(
            state.apply_move(pos(1, 4), pos(4, 4), false),
            Err(ChessError::IllegalMove {
                from: pos(1, 4),
                to: pos(4, 4)
            })
        );
        // black piece while white is to move
        assert!(state.apply_move(pos(6, 4), pos(5, 4), false).is_err());
        // empty origin
        assert!(state.apply_move(pos(4, 4), pos(5, 4), false).is_err());

        assert_eq!(snapshot(&state), before);
        assert!(state.history().is_empty());
    }

    #[test]
    fn undo_without_history() {
        let mut state = GameState::new();
        assert_eq!(state.undo_last_move(), None);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn capture_and_undo() {
        let mut state = GameState::new();
        state.apply_move(pos(1, 4), pos(3, 4), false).unwrap();
        state.apply_move(pos(6, 3), pos(4, 3), false).unwrap();
        let before = snapshot(&state);

        let (piece, captured) = state.apply_move(pos(3, 4), pos(4, 3), true).unwrap();
        assert!(captured);
        assert_eq!(piece.side(), Side::White);
        assert_eq!(state.pieces_of(Side::Black).count(), 15);
        assert!(state.last_move().unwrap().by_engine);

        let record = state.undo_last_move().unwrap();
        assert_eq!(record.captured.map(|p| p.position()), Some(pos(4, 3)));
        assert_eq!(snapshot(&state), before);
    }

    #[test]
    fn four_move_checkmate() {
        let mut state = GameState::new();
        state.apply_move(pos(1, 2), pos(2, 2), false).unwrap();
        state.apply_move(pos(6, 3), pos(5, 3), false).unwrap();
        state.apply_move(pos(1, 1), pos(3, 1), false).unwrap();
        assert_eq!(state.terminal_status(), TerminalStatus::Ongoing);
        state.apply_move(pos(7, 4), pos(3, 0), false).unwrap();

        assert!(state.in_check());
        assert_eq!(
            state.terminal_status(),
            TerminalStatus::Checkmate {
                winner: Side::Black
            }
        );
        assert!(state.legal_moves().is_empty());

        state.undo_last_move();
        assert!(!state.in_check());
        assert_eq!(state.terminal_status(), TerminalStatus::Ongoing);
    }

    #[test]
    fn stalemate() {
        let mut state = GameState::empty(Side::Black);
        state.place(Piece::new(PieceKind::King, Side::Black, pos(7, 0)));
        state.place(Piece::new(PieceKind::Queen, Side::White, pos(5, 1)));
        state.place(Piece::new(PieceKind::King, Side::White, pos(0, 7)));

        assert!(!state.in_check());
        assert_eq!(state.terminal_status(), TerminalStatus::Stalemate);
    }

    #[test]
    fn promotion() {
        let mut state = GameState::empty(Side::White);
        state.place(Piece::new(PieceKind::Pawn, Side::White, pos(6, 6)));
        state.place(Piece::new(PieceKind::King, Side::White, pos(0, 0)));
        state.place(Piece::new(PieceKind::King, Side::Black, pos(7, 0)));
        let before = snapshot(&state);

        let (piece, _) = state.apply_move(pos(6, 6), pos(7, 6), true).unwrap();
        assert_eq!(piece.kind(), PieceKind::Queen);
        assert_eq!(state.last_move().unwrap().promoted_to, Some(PieceKind::Queen));
        // the new queen gives check along the last row
        assert!(state.in_check());

        state.undo_last_move();
        assert_eq!(snapshot(&state), before);

        let (piece, _) = state
            .apply_move_promoting(pos(6, 6), pos(7, 6), PieceKind::Knight, false)
            .unwrap();
        assert_eq!(piece.kind(), PieceKind::Knight);
        assert!(!state.in_check());
        state.undo_last_move();

        assert!(state
            .apply_move_promoting(pos(6, 6), pos(7, 6), PieceKind::King, false)
            .is_err());
        assert_eq!(snapshot(&state), before);
    }

    #[test]
    fn scoped_move_undoes_on_drop() {
        let mut state = GameState::new();
        let before = snapshot(&state);
        {
            let child = state.scoped_move(pos(0, 1), pos(2, 2));
            assert_eq!(child.side_to_move(), Side::Black);
            assert_eq!(child.last_move().map(|r| r.to), Some(pos(2, 2)));
        }
        assert_eq!(snapshot(&state), before);
        assert!(state.history().is_empty());
    }

    #[test]
    fn perft_from_start() {
        let mut state = GameState::new();
        assert_eq!(state.perft(0), 1);
        assert_eq!(state.perft(1), 20);
        assert_eq!(state.perft(2), 400);
        assert_eq!(state.perft(3), 8902);
        assert_eq!(state, GameState::new());
        assert!(state.history().is_empty());
    }

    #[test]
    fn reset_restores_start() {
        let mut state = GameState::new();
        state.apply_move(pos(1, 0), pos(2, 0), false).unwrap();
        state.reset();
        assert_eq!(state, GameState::new());
        assert!(state.history().is_empty());
    }
}
