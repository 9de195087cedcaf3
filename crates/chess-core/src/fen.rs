//! FEN (Forsyth-Edwards Notation) parsing and serialization.

use std::fmt;

use thiserror::Error;

use crate::{Board, CastlingRights, Color, Piece, Square};

/// Errors that can occur when parsing FEN strings.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// A fully parsed FEN record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fen {
    pub board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Fen {
    /// The standard starting position FEN.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let board = Self::parse_placement(parts[0])?;
        Self::check_kings(&board)?;

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidActiveColor(other.to_string())),
        };

        let castling = Self::parse_castling(parts[2])?;

        let en_passant = match parts[3] {
            "-" => None,
            sq => {
                let square = Square::from_algebraic(sq)
                    .map_err(|_| FenError::InvalidEnPassantSquare(sq.to_string()))?;
                // Target must sit on rank 3 or rank 6.
                if square.row() != 2 && square.row() != 5 {
                    return Err(FenError::InvalidEnPassantSquare(sq.to_string()));
                }
                Some(square)
            }
        };

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;
        let fullmove_number = parts[5]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(Fen {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// FEN lists ranks from 8 down to 1, which is board-array row order.
    fn parse_placement(placement: &str) -> Result<Board, FenError> {
        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, text) in rows.iter().enumerate() {
            let rank = 8 - row;
            let mut col = 0u32;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip;
                } else if let Some(cell) = Piece::from_fen_char(c) {
                    if col < 8 {
                        board.set(Square::new(row as u8, col as u8), Some(cell));
                    }
                    col += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c, rank
                    )));
                }
            }
            if col != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank, col
                )));
            }
        }
        Ok(board)
    }

    /// Play needs exactly one king per side.
    fn check_kings(board: &Board) -> Result<(), FenError> {
        for color in Color::BOTH {
            let kings = board
                .pieces()
                .filter(|&(_, piece, c)| piece == Piece::King && c == color)
                .count();
            if kings != 1 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "expected one {} king, found {}",
                    color, kings
                )));
            }
        }
        Ok(())
    }

    fn parse_castling(castling: &str) -> Result<CastlingRights, FenError> {
        if castling == "-" {
            return Ok(CastlingRights::NONE);
        }
        let mut flags = 0u8;
        for c in castling.chars() {
            let flag = match c {
                'K' => CastlingRights::WHITE_KINGSIDE,
                'Q' => CastlingRights::WHITE_QUEENSIDE,
                'k' => CastlingRights::BLACK_KINGSIDE,
                'q' => CastlingRights::BLACK_QUEENSIDE,
                _ => return Err(FenError::InvalidCastlingRights(castling.to_string())),
            };
            if flags & flag != 0 {
                return Err(FenError::InvalidCastlingRights(castling.to_string()));
            }
            flags |= flag;
        }
        Ok(CastlingRights::new(flags))
    }

    fn placement(&self) -> String {
        let mut out = String::new();
        for row in 0..8u8 {
            let mut empty = 0;
            for cell in self.board.row(row) {
                match cell {
                    Some((piece, color)) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(piece.to_fen_char(*color));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        let en_passant = self
            .en_passant
            .map_or_else(|| "-".to_string(), Square::to_algebraic);
        write!(
            f,
            "{} {} {} {} {} {}",
            self.placement(),
            side,
            self.castling.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

impl std::str::FromStr for Fen {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}
