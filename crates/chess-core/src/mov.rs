//! Move representation.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::{Board, Cell};
use crate::{Piece, Square, SquareError};

/// Flags for special move types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Normal move or capture.
    Normal = 0,
    /// Pawn double push from its starting row.
    DoublePush = 1,
    /// Kingside castling (O-O).
    CastleKingside = 2,
    /// Queenside castling (O-O-O).
    CastleQueenside = 3,
    /// En passant capture.
    EnPassant = 4,
    PromoteKnight = 5,
    PromoteBishop = 6,
    PromoteRook = 7,
    PromoteQueen = 8,
}

impl MoveFlag {
    /// Returns the promotion piece if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<Piece> {
        match self {
            MoveFlag::PromoteKnight => Some(Piece::Knight),
            MoveFlag::PromoteBishop => Some(Piece::Bishop),
            MoveFlag::PromoteRook => Some(Piece::Rook),
            MoveFlag::PromoteQueen => Some(Piece::Queen),
            _ => None,
        }
    }

    /// The promotion flag for a piece, if that piece is a promotion target.
    #[inline]
    pub const fn promote_to(piece: Piece) -> Option<Self> {
        match piece {
            Piece::Knight => Some(MoveFlag::PromoteKnight),
            Piece::Bishop => Some(MoveFlag::PromoteBishop),
            Piece::Rook => Some(MoveFlag::PromoteRook),
            Piece::Queen => Some(MoveFlag::PromoteQueen),
            Piece::Pawn | Piece::King => None,
        }
    }

    /// Returns true if this is a promotion move.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    /// Returns true if this is a castling move.
    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleKingside | MoveFlag::CastleQueenside)
    }
}

/// A single board transition.
///
/// A move carries snapshots of the piece that moved and the piece it
/// captured, taken from the board it was built against. Equality and hashing
/// only look at the two squares, so a move typed in by a user matches the
/// engine-generated move for the same squares.
#[derive(Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece_moved: Cell,
    piece_captured: Cell,
    flag: MoveFlag,
}

impl Move {
    /// A placeholder move (a8a8), used to fill fixed-capacity move buffers.
    pub const NULL: Move = Move {
        from: Square::A8,
        to: Square::A8,
        piece_moved: None,
        piece_captured: None,
        flag: MoveFlag::Normal,
    };

    /// Builds a plain move, reading both squares of `board`.
    pub fn new(from: Square, to: Square, board: &Board) -> Self {
        Self::with_flag(from, to, board, MoveFlag::Normal)
    }

    /// Builds a move with a special-move flag.
    ///
    /// For [`MoveFlag::EnPassant`] the captured piece is the pawn beside the
    /// origin square rather than the (empty) destination.
    pub fn with_flag(from: Square, to: Square, board: &Board, flag: MoveFlag) -> Self {
        let captured_sq = if flag == MoveFlag::EnPassant {
            Square::new(from.row(), to.col())
        } else {
            to
        };
        Move {
            from,
            to,
            piece_moved: board.get(from),
            piece_captured: board.get(captured_sq),
            flag,
        }
    }

    /// Returns the origin square.
    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Returns the move flag.
    #[inline]
    pub const fn flag(&self) -> MoveFlag {
        self.flag
    }

    /// The piece on the origin square when the move was built.
    #[inline]
    pub const fn piece_moved(&self) -> Cell {
        self.piece_moved
    }

    /// The piece this move removes from the board, if any.
    #[inline]
    pub const fn piece_captured(&self) -> Cell {
        self.piece_captured
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    #[inline]
    pub const fn promotion(&self) -> Option<Piece> {
        self.flag.promotion_piece()
    }

    /// Numeric identity derived from the coordinates alone.
    ///
    /// Laid out as decimal digits: start row, start col, end row, end col.
    pub const fn id(&self) -> u16 {
        self.from.row() as u16 * 1000
            + self.from.col() as u16 * 100
            + self.to.row() as u16 * 10
            + self.to.col() as u16
    }

    /// Coordinate notation, origin then destination (e.g., "e2e4").
    pub fn notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    /// Coordinate notation with the promotion letter appended (e.g., "e7e8q").
    pub fn long_notation(&self) -> String {
        match self.promotion() {
            Some(p) => format!("{}{}", self.notation(), p.letter()),
            None => self.notation(),
        }
    }

    /// Parses coordinate notation with an optional promotion letter.
    ///
    /// Returns the two squares and the requested promotion piece. Building
    /// the actual move is left to the caller, which knows the board.
    pub fn parse_notation(s: &str) -> Result<(Square, Square, Option<Piece>), SquareError> {
        let invalid = || SquareError::InvalidNotation(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        let promotion = match s[4..].chars().next() {
            Some(c) => match Piece::from_letter(c) {
                Some(p) if MoveFlag::promote_to(p).is_some() => Some(p),
                _ => return Err(invalid()),
            },
            None => None,
        };
        Ok((from, to, promotion))
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.long_notation())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
