//! End-of-game detection.

use std::fmt;

use chess_core::{Board, Color, Piece};

use crate::GameState;

/// Halfmoves without a pawn move or capture that end the game.
pub const FIFTY_MOVE_HALFMOVES: u32 = 100;

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    /// White wins by checkmate.
    WhiteWins,
    /// Black wins by checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Neither side has the material to checkmate.
    InsufficientMaterial,
    /// 100 halfmoves without a pawn move or capture.
    FiftyMoveRule,
}

impl GameResult {
    /// The winning color, or `None` for a draw.
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameResult::WhiteWins => Some(Color::White),
            GameResult::BlackWins => Some(Color::Black),
            GameResult::Draw(_) => None,
        }
    }

    const fn checkmated(loser: Color) -> Self {
        match loser {
            Color::White => GameResult::BlackWins,
            Color::Black => GameResult::WhiteWins,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameResult::WhiteWins => write!(f, "checkmate, White wins"),
            GameResult::BlackWins => write!(f, "checkmate, Black wins"),
            GameResult::Draw(reason) => write!(f, "draw by {}", reason),
        }
    }
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DrawReason::Stalemate => "stalemate",
            DrawReason::InsufficientMaterial => "insufficient material",
            DrawReason::FiftyMoveRule => "the fifty-move rule",
        };
        f.write_str(text)
    }
}

/// Returns the result of the game in `state`, or `None` if play goes on.
///
/// Checkmate and stalemate take precedence over the other draws.
pub fn outcome(state: &GameState) -> Option<GameResult> {
    if state.legal_moves().is_empty() {
        return Some(if state.in_check() {
            GameResult::checkmated(state.side_to_move())
        } else {
            GameResult::Draw(DrawReason::Stalemate)
        });
    }

    if is_insufficient_material(state.board()) {
        return Some(GameResult::Draw(DrawReason::InsufficientMaterial));
    }

    if state.halfmove_clock() >= FIFTY_MOVE_HALFMOVES {
        return Some(GameResult::Draw(DrawReason::FiftyMoveRule));
    }

    None
}

/// Bare kings, or kings plus a single knight or bishop.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = 0;
    for (_, piece, _) in board.pieces() {
        match piece {
            Piece::King => {}
            p if p.is_minor() => minors += 1,
            _ => return false,
        }
    }
    minors <= 1
}
