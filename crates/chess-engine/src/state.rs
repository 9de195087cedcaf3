//! Game state: board, side to move, castling and en passant state, and the
//! move log that makes every move reversible.

use chess_core::{Board, CastlingRights, Cell, Color, Fen, FenError, Move, MoveFlag, Piece, Square};

use crate::movegen::{
    generate_legal, generate_pseudo_legal, is_king_attacked, is_square_attacked, MoveList,
};
use crate::rules::{self, GameResult};

/// One entry of the move log: the move plus the state it overwrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogEntry {
    pub mov: Move,
    pub castling_before: CastlingRights,
    pub en_passant_before: Option<Square>,
    pub halfmove_clock_before: u32,
    pub fullmove_number_before: u32,
}

/// The mutable state of a game in progress.
///
/// [`apply_move`](GameState::apply_move) trusts its caller: only moves taken
/// from [`legal_moves`](GameState::legal_moves) (or matched against it with
/// [`find_legal_move`](GameState::find_legal_move)) keep the state valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    log: Vec<LogEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Standard starting position, white to move, empty log.
    pub fn new() -> Self {
        GameState {
            board: Board::standard(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            log: Vec::new(),
        }
    }

    /// Creates a state from a FEN string. The log starts empty.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from(Fen::parse(fen)?))
    }

    /// Converts the current position to a FEN string.
    pub fn to_fen(&self) -> String {
        Fen {
            board: self.board,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_string()
    }

    /// Read-only view of the board.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Cell {
        self.board.get(sq)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn white_to_move(&self) -> bool {
        self.side_to_move == Color::White
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant, set only right after a
    /// double push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// The move log, oldest first.
    pub fn move_log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn last_move(&self) -> Option<Move> {
        self.log.last().map(|entry| entry.mov)
    }

    /// Plays a move and records it in the log.
    ///
    /// The move is not validated.
    pub fn apply_move(&mut self, m: Move) {
        let side = self.side_to_move;
        self.make_move(m);
        tracing::debug!(mv = %m, %side, ply = self.log.len(), "applied move");
    }

    /// Takes back the most recent move. Does nothing on an empty log.
    pub fn undo_move(&mut self) -> Option<Move> {
        let undone = self.unmake_move();
        match undone {
            Some(m) => tracing::debug!(mv = %m, ply = self.log.len(), "undid move"),
            None => tracing::debug!("undo with empty move log ignored"),
        }
        undone
    }

    pub(crate) fn make_move(&mut self, m: Move) {
        let us = self.side_to_move;
        let from = m.from();
        let to = m.to();

        self.log.push(LogEntry {
            mov: m,
            castling_before: self.castling,
            en_passant_before: self.en_passant,
            halfmove_clock_before: self.halfmove_clock,
            fullmove_number_before: self.fullmove_number,
        });

        self.board.set(from, None);
        if m.flag() == MoveFlag::EnPassant {
            self.board.set(Square::new(from.row(), to.col()), None);
        }
        let placed = match (m.promotion(), m.piece_moved()) {
            (Some(promoted), Some((_, color))) => Some((promoted, color)),
            (_, cell) => cell,
        };
        self.board.set(to, placed);

        match m.flag() {
            MoveFlag::CastleKingside => self.move_rook(from.row(), 7, 5),
            MoveFlag::CastleQueenside => self.move_rook(from.row(), 0, 3),
            _ => {}
        }

        if let Some((Piece::King, color)) = m.piece_moved() {
            self.castling.remove_color(color);
        }
        self.castling.touch(from);
        self.castling.touch(to);

        self.en_passant = (m.flag() == MoveFlag::DoublePush)
            .then(|| Square::new((from.row() + to.row()) / 2, from.col()));

        let pawn_move = matches!(m.piece_moved(), Some((Piece::Pawn, _)));
        if pawn_move || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if us == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.side_to_move = us.opposite();
    }

    pub(crate) fn unmake_move(&mut self) -> Option<Move> {
        let entry = self.log.pop()?;
        let m = entry.mov;
        let from = m.from();
        let to = m.to();

        self.side_to_move = self.side_to_move.opposite();

        self.board.set(from, m.piece_moved());
        if m.flag() == MoveFlag::EnPassant {
            self.board.set(to, None);
            self.board
                .set(Square::new(from.row(), to.col()), m.piece_captured());
        } else {
            self.board.set(to, m.piece_captured());
        }

        match m.flag() {
            MoveFlag::CastleKingside => self.move_rook(from.row(), 5, 7),
            MoveFlag::CastleQueenside => self.move_rook(from.row(), 3, 0),
            _ => {}
        }

        self.castling = entry.castling_before;
        self.en_passant = entry.en_passant_before;
        self.halfmove_clock = entry.halfmove_clock_before;
        self.fullmove_number = entry.fullmove_number_before;

        Some(m)
    }

    fn move_rook(&mut self, row: u8, from_col: u8, to_col: u8) {
        let rook = self.board.take(Square::new(row, from_col));
        self.board.set(Square::new(row, to_col), rook);
    }

    /// All legal moves of the side to move, freshly generated.
    pub fn legal_moves(&self) -> MoveList {
        generate_legal(self)
    }

    /// Moves obeying piece movement only; some may leave the king in check.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        generate_pseudo_legal(self)
    }

    /// Looks up the legal move between two squares.
    ///
    /// For promotions `promotion` picks the piece (queen when `None`); for
    /// other moves it must be `None`.
    pub fn find_legal_move(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    ) -> Option<Move> {
        self.legal_moves().iter().copied().find(|m| {
            m.from() == from
                && m.to() == to
                && match (m.promotion(), promotion) {
                    (None, None) => true,
                    (None, Some(_)) => false,
                    (Some(p), wanted) => p == wanted.unwrap_or(Piece::Queen),
                }
        })
    }

    /// Returns the engine's move equal to `candidate`, carrying the
    /// authoritative flag and captured piece.
    pub fn matching_legal_move(&self, candidate: &Move) -> Option<Move> {
        self.legal_moves().iter().copied().find(|m| m == candidate)
    }

    pub fn is_square_attacked(&self, sq: Square, by_color: Color) -> bool {
        is_square_attacked(&self.board, sq, by_color)
    }

    /// Returns true if `side`'s king is attacked.
    pub fn is_in_check(&self, side: Color) -> bool {
        is_king_attacked(&self.board, side)
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    /// The result of the game if it has ended, otherwise `None`.
    pub fn outcome(&self) -> Option<GameResult> {
        rules::outcome(self)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check() && self.legal_moves().is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && self.legal_moves().is_empty()
    }
}

impl From<Fen> for GameState {
    fn from(fen: Fen) -> Self {
        GameState {
            board: fen.board,
            side_to_move: fen.side_to_move,
            castling: fen.castling,
            en_passant: fen.en_passant,
            halfmove_clock: fen.halfmove_clock,
            fullmove_number: fen.fullmove_number,
            log: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: &mut GameState, notation: &str) -> Move {
        let (from, to, promo) = Move::parse_notation(notation).unwrap();
        let m = state
            .find_legal_move(from, to, promo)
            .unwrap_or_else(|| panic!("{notation} is not legal"));
        state.apply_move(m);
        m
    }

    #[test]
    fn initial_state() {
        let state = GameState::new();
        assert_eq!(state.board(), &Board::standard());
        assert!(state.white_to_move());
        assert!(state.move_log().is_empty());
        assert_eq!(state.castling(), CastlingRights::ALL);
        assert_eq!(state.to_fen(), Fen::STARTPOS);
    }

    #[test]
    fn apply_moves_piece_and_flips_turn() {
        let mut state = GameState::new();
        let m = play(&mut state, "e2e4");
        assert_eq!(m.flag(), MoveFlag::DoublePush);
        assert!(state.piece_at(Square::new(6, 4)).is_none());
        assert_eq!(
            state.piece_at(Square::new(4, 4)),
            Some((Piece::Pawn, Color::White))
        );
        assert!(!state.white_to_move());
        assert_eq!(state.en_passant(), Some(Square::new(5, 4)));
        assert_eq!(state.last_move(), Some(m));
    }

    #[test]
    fn undo_restores_initial_position() {
        let mut state = GameState::new();
        play(&mut state, "e2e4");
        assert_eq!(state.undo_move().map(|m| m.notation()), Some("e2e4".into()));
        assert_eq!(state, GameState::new());
        assert!(state.white_to_move());
        assert!(state.move_log().is_empty());
    }

    #[test]
    fn undo_on_empty_log_is_noop() {
        let mut state = GameState::new();
        assert_eq!(state.undo_move(), None);
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn apply_trusts_caller() {
        // A hand-built move is played as given, even if it is not legal.
        let mut state = GameState::new();
        let m = Move::new(Square::new(6, 4), Square::new(3, 4), state.board());
        state.apply_move(m);
        assert_eq!(
            state.piece_at(Square::new(3, 4)),
            Some((Piece::Pawn, Color::White))
        );
        state.undo_move();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn capture_and_undo() {
        let mut state = GameState::new();
        for mv in ["e2e4", "d7d5"] {
            play(&mut state, mv);
        }
        let capture = play(&mut state, "e4d5");
        assert_eq!(capture.piece_captured(), Some((Piece::Pawn, Color::Black)));
        assert_eq!(state.halfmove_clock(), 0);
        state.undo_move();
        assert_eq!(
            state.piece_at(Square::new(3, 3)),
            Some((Piece::Pawn, Color::Black))
        );
        assert_eq!(
            state.piece_at(Square::new(4, 4)),
            Some((Piece::Pawn, Color::White))
        );
    }

    #[test]
    fn kingside_castle_moves_rook_and_undoes() {
        let mut state =
            GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R w KQkq - 3 10").unwrap();
        let before = state.clone();
        let castle = play(&mut state, "e1g1");
        assert_eq!(castle.flag(), MoveFlag::CastleKingside);
        assert_eq!(state.piece_at(Square::G1), Some((Piece::King, Color::White)));
        assert_eq!(state.piece_at(Square::F1), Some((Piece::Rook, Color::White)));
        assert!(state.piece_at(Square::H1).is_none());
        assert!(!state.castling().can_castle_kingside(Color::White));
        assert!(!state.castling().can_castle_queenside(Color::White));
        assert!(state.castling().can_castle_kingside(Color::Black));

        state.undo_move();
        assert_eq!(state, before);
        assert_eq!(state.to_fen(), before.to_fen());
    }

    #[test]
    fn queenside_castle_for_black() {
        let mut state =
            GameState::from_fen("r3k2r/pppppppp/8/8/8/8/PPPPPPPP/R3K2R b KQkq - 0 1").unwrap();
        play(&mut state, "e8c8");
        assert_eq!(state.piece_at(Square::C8), Some((Piece::King, Color::Black)));
        assert_eq!(state.piece_at(Square::D8), Some((Piece::Rook, Color::Black)));
        assert!(state.piece_at(Square::A8).is_none());
        assert_eq!(state.fullmove_number(), 2);
        state.undo_move();
        assert_eq!(state.fullmove_number(), 1);
        assert_eq!(state.piece_at(Square::A8), Some((Piece::Rook, Color::Black)));
    }

    #[test]
    fn rook_move_and_rook_capture_clear_rights() {
        let mut state =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
        play(&mut state, "a1a8");
        assert_eq!(state.castling().to_fen(), "Kk");
        state.undo_move();
        assert_eq!(state.castling(), CastlingRights::ALL);
    }

    #[test]
    fn en_passant_removes_and_restores_pawn() {
        let mut state = GameState::new();
        for mv in ["e2e4", "a7a6", "e4e5", "d7d5"] {
            play(&mut state, mv);
        }
        assert_eq!(state.en_passant(), Some(Square::new(2, 3)));
        let before = state.clone();

        let ep = play(&mut state, "e5d6");
        assert_eq!(ep.flag(), MoveFlag::EnPassant);
        assert!(state.piece_at(Square::new(3, 3)).is_none());
        assert_eq!(
            state.piece_at(Square::new(2, 3)),
            Some((Piece::Pawn, Color::White))
        );
        assert_eq!(state.en_passant(), None);

        state.undo_move();
        assert_eq!(state, before);
    }

    #[test]
    fn en_passant_expires_after_one_move() {
        let mut state = GameState::new();
        for mv in ["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"] {
            play(&mut state, mv);
        }
        assert!(state
            .find_legal_move(Square::new(3, 4), Square::new(2, 3), None)
            .is_none());
    }

    #[test]
    fn promotion_choice_and_undo() {
        let mut state = GameState::from_fen("1n2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let before = state.clone();

        let promo = play(&mut state, "a7b8n");
        assert_eq!(promo.promotion(), Some(Piece::Knight));
        assert_eq!(state.piece_at(Square::B8), Some((Piece::Knight, Color::White)));
        assert!(state.piece_at(Square::new(1, 0)).is_none());
        state.undo_move();
        assert_eq!(state, before);

        play(&mut state, "a7a8");
        assert_eq!(state.piece_at(Square::A8), Some((Piece::Queen, Color::White)));
    }

    #[test]
    fn find_legal_move_rejects_stray_promotion_letter() {
        let state = GameState::new();
        assert!(state
            .find_legal_move(Square::new(6, 4), Square::new(4, 4), Some(Piece::Queen))
            .is_none());
    }

    #[test]
    fn matching_candidate_gets_engine_metadata() {
        let state = GameState::new();
        let candidate = Move::new(Square::new(6, 4), Square::new(4, 4), &Board::empty());
        let m = state.matching_legal_move(&candidate).unwrap();
        assert_eq!(m.flag(), MoveFlag::DoublePush);
        assert_eq!(m.piece_moved(), Some((Piece::Pawn, Color::White)));

        let bogus = Move::new(Square::new(6, 4), Square::new(3, 4), state.board());
        assert!(state.matching_legal_move(&bogus).is_none());
    }

    #[test]
    fn clocks_follow_fen_rules() {
        let mut state = GameState::new();
        play(&mut state, "g1f3");
        assert_eq!(state.halfmove_clock(), 1);
        assert_eq!(state.fullmove_number(), 1);
        play(&mut state, "g8f6");
        assert_eq!(state.halfmove_clock(), 2);
        assert_eq!(state.fullmove_number(), 2);
        play(&mut state, "e2e4");
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(
            state.to_fen(),
            "rnbqkb1r/pppppppp/5n2/8/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq e3 0 2"
        );
    }

    #[test]
    fn clocks_saturate_at_the_limit() {
        let fen = "4k3/8/8/8/8/8/8/4K2R w - - 4294967295 4294967295";
        let mut state = GameState::from_fen(fen).unwrap();
        let before = state.clone();
        assert!(!state.legal_moves().is_empty());

        play(&mut state, "h1h2");
        assert_eq!(state.halfmove_clock(), u32::MAX);
        assert_eq!(
            state.outcome(),
            Some(GameResult::Draw(rules::DrawReason::FiftyMoveRule))
        );
        play(&mut state, "e8d8");
        assert_eq!(state.fullmove_number(), u32::MAX);

        state.undo_move();
        state.undo_move();
        assert_eq!(state, before);
        assert_eq!(state.to_fen(), fen);
    }

    #[test]
    fn check_detection() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/r3K3 w - - 0 1").unwrap();
        assert!(state.in_check());
        assert!(state.is_in_check(Color::White));
        assert!(!state.is_in_check(Color::Black));
        assert!(state.is_square_attacked(Square::D1, Color::Black));
    }
}
