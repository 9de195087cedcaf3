//! Move generation.
//!
//! Pseudo-legal moves come from a row-major scan of the board: every square
//! holding a piece of the side to move is handed to the generator registered
//! for that piece kind in [`GENERATORS`]. Legal moves are the pseudo-legal
//! moves that survive being played on a scratch copy of the state without
//! leaving the mover's king attacked.

mod attacks;
pub mod perft;

use crate::GameState;
use chess_core::{Board, Color, Move, MoveFlag, Piece, Square};

pub use attacks::{
    is_king_attacked, is_square_attacked, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS,
    ROOK_DIRECTIONS,
};

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of moves in any chess position, with headroom.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.as_slice().iter()
    }

    /// Returns true if a move with the same squares is in the list.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.as_slice().contains(m)
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        let mut write = 0;
        for read in 0..self.len {
            if f(&self.moves[read]) {
                self.moves[write] = self.moves[read];
                write += 1;
            }
        }
        self.len = write;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// Generates the moves of one piece standing on `from`.
type Generator = fn(&GameState, Square, Color, &mut MoveList);

/// Per-kind generators, indexed by [`Piece::index`].
const GENERATORS: [Generator; 6] = [
    pawn_moves,
    knight_moves,
    bishop_moves,
    rook_moves,
    queen_moves,
    king_moves,
];

/// Generates all moves of the side to move that obey piece movement and
/// occupancy, ignoring whether the mover's king ends up attacked.
pub fn generate_pseudo_legal(state: &GameState) -> MoveList {
    let us = state.side_to_move();
    let mut moves = MoveList::new();
    for (from, piece, color) in state.board().pieces() {
        if color == us {
            GENERATORS[piece.index()](state, from, us, &mut moves);
        }
    }
    moves
}

/// Generates all legal moves for the side to move.
///
/// Each candidate is played and taken back on a private clone of `state`;
/// the caller's state is never touched.
pub fn generate_legal(state: &GameState) -> MoveList {
    let mut moves = generate_pseudo_legal(state);
    let us = state.side_to_move();
    let mut scratch = state.clone();
    moves.retain(|m| {
        scratch.make_move(*m);
        let safe = !is_king_attacked(scratch.board(), us);
        scratch.unmake_move();
        safe
    });
    moves
}

fn pawn_moves(state: &GameState, from: Square, us: Color, moves: &mut MoveList) {
    let board = state.board();
    let dir = us.pawn_direction();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty_at(one) {
            push_pawn_move(board, from, one, us, moves);
            if from.row() == us.pawn_start_row() {
                if let Some(two) = one.offset(dir, 0) {
                    if board.is_empty_at(two) {
                        moves.push(Move::with_flag(from, two, board, MoveFlag::DoublePush));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match board.color_at(to) {
            Some(color) if color != us => push_pawn_move(board, from, to, us, moves),
            Some(_) => {}
            None => {
                let beside = Square::new(from.row(), to.col());
                if state.en_passant() == Some(to)
                    && board.get(beside) == Some((Piece::Pawn, us.opposite()))
                {
                    moves.push(Move::with_flag(from, to, board, MoveFlag::EnPassant));
                }
            }
        }
    }
}

/// Pushes a pawn move, expanded into the four promotions on the last row.
fn push_pawn_move(board: &Board, from: Square, to: Square, us: Color, moves: &mut MoveList) {
    if to.row() == us.promotion_row() {
        for flag in Piece::PROMOTIONS.into_iter().filter_map(MoveFlag::promote_to) {
            moves.push(Move::with_flag(from, to, board, flag));
        }
    } else {
        moves.push(Move::new(from, to, board));
    }
}

fn knight_moves(state: &GameState, from: Square, us: Color, moves: &mut MoveList) {
    step_moves(state.board(), from, us, &KNIGHT_OFFSETS, moves);
}

fn bishop_moves(state: &GameState, from: Square, us: Color, moves: &mut MoveList) {
    slide_moves(state.board(), from, us, &BISHOP_DIRECTIONS, moves);
}

fn rook_moves(state: &GameState, from: Square, us: Color, moves: &mut MoveList) {
    slide_moves(state.board(), from, us, &ROOK_DIRECTIONS, moves);
}

fn queen_moves(state: &GameState, from: Square, us: Color, moves: &mut MoveList) {
    slide_moves(state.board(), from, us, &ROOK_DIRECTIONS, moves);
    slide_moves(state.board(), from, us, &BISHOP_DIRECTIONS, moves);
}

fn king_moves(state: &GameState, from: Square, us: Color, moves: &mut MoveList) {
    step_moves(state.board(), from, us, &KING_OFFSETS, moves);
    castling_moves(state, from, us, moves);
}

/// Single-step moves onto squares not held by a friendly piece.
fn step_moves(board: &Board, from: Square, us: Color, offsets: &[(i8, i8)], moves: &mut MoveList) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            if board.color_at(to) != Some(us) {
                moves.push(Move::new(from, to, board));
            }
        }
    }
}

/// Sliding moves: each ray runs until the edge, stops before a friendly
/// piece, and stops on (capturing) an enemy piece.
fn slide_moves(
    board: &Board,
    from: Square,
    us: Color,
    directions: &[(i8, i8)],
    moves: &mut MoveList,
) {
    for &(dr, dc) in directions {
        let mut cur = from;
        while let Some(to) = cur.offset(dr, dc) {
            match board.color_at(to) {
                None => moves.push(Move::new(from, to, board)),
                Some(color) if color == us => break,
                Some(_) => {
                    moves.push(Move::new(from, to, board));
                    break;
                }
            }
            cur = to;
        }
    }
}

/// Kingside then queenside castling.
///
/// Requires the right, king and rook on their home squares, empty squares
/// between them, and no attack on the king's start, crossed or landing
/// square.
fn castling_moves(state: &GameState, from: Square, us: Color, moves: &mut MoveList) {
    let row = us.back_row();
    let rights = state.castling();
    if from != Square::new(row, 4)
        || !(rights.can_castle_kingside(us) || rights.can_castle_queenside(us))
    {
        return;
    }

    let board = state.board();
    let them = us.opposite();
    if is_square_attacked(board, from, them) {
        return;
    }

    let rook = Some((Piece::Rook, us));
    let clear = |cols: &[u8]| cols.iter().all(|&c| board.is_empty_at(Square::new(row, c)));
    let safe = |cols: &[u8]| {
        cols.iter()
            .all(|&c| !is_square_attacked(board, Square::new(row, c), them))
    };

    if rights.can_castle_kingside(us)
        && board.get(Square::new(row, 7)) == rook
        && clear(&[5, 6])
        && safe(&[5, 6])
    {
        moves.push(Move::with_flag(
            from,
            Square::new(row, 6),
            board,
            MoveFlag::CastleKingside,
        ));
    }

    if rights.can_castle_queenside(us)
        && board.get(Square::new(row, 0)) == rook
        && clear(&[1, 2, 3])
        && safe(&[3, 2])
    {
        moves.push(Move::with_flag(
            from,
            Square::new(row, 2),
            board,
            MoveFlag::CastleQueenside,
        ));
    }
}
