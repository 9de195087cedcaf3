//! Movement offsets and attack detection.
//!
//! Offsets are `(row delta, col delta)` in board-array coordinates, so
//! "up" (toward black's back rank) is a negative row delta. The order of
//! each table fixes the order in which moves are generated.

use chess_core::{Board, Color, Piece, Square};

/// Knight jumps.
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps, row-major.
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Orthogonal rays: up, left, down, right.
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// Diagonal rays: up-left, up-right, down-left, down-right.
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Returns true if a piece of `by_color` could capture on `sq`.
///
/// Pawns attack diagonally only and castling never attacks. The contents of
/// `sq` itself are irrelevant.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    let dir = by_color.pawn_direction();
    for dc in [-1, 1] {
        if let Some(from) = sq.offset(-dir, dc) {
            if board.get(from) == Some((Piece::Pawn, by_color)) {
                return true;
            }
        }
    }

    if attacked_by_step(board, sq, by_color, &KNIGHT_OFFSETS, Piece::Knight)
        || attacked_by_step(board, sq, by_color, &KING_OFFSETS, Piece::King)
    {
        return true;
    }

    attacked_by_ray(board, sq, by_color, &ROOK_DIRECTIONS, Piece::Rook)
        || attacked_by_ray(board, sq, by_color, &BISHOP_DIRECTIONS, Piece::Bishop)
}

fn attacked_by_step(
    board: &Board,
    sq: Square,
    by_color: Color,
    offsets: &[(i8, i8)],
    piece: Piece,
) -> bool {
    offsets.iter().any(|&(dr, dc)| {
        sq.offset(dr, dc)
            .is_some_and(|from| board.get(from) == Some((piece, by_color)))
    })
}

/// Walks each ray to the first occupied square; a `slider` or a queen of
/// `by_color` there is an attacker.
fn attacked_by_ray(
    board: &Board,
    sq: Square,
    by_color: Color,
    directions: &[(i8, i8)],
    slider: Piece,
) -> bool {
    for &(dr, dc) in directions {
        let mut cur = sq;
        while let Some(next) = cur.offset(dr, dc) {
            if let Some((piece, color)) = board.get(next) {
                if color == by_color && (piece == slider || piece == Piece::Queen) {
                    return true;
                }
                break;
            }
            cur = next;
        }
    }
    false
}

/// Returns true if the king of `color` stands on an attacked square.
///
/// A board without that king is never in check.
pub fn is_king_attacked(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_square_attacked(board, king, color.opposite()))
}
