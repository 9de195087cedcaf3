//! Text rendering of boards and move lists.

use chess_core::{Board, Color, Move, Piece};

const FILES: &str = "  a b c d e f g h";

fn glyph(piece: Piece, color: Color) -> char {
    match (color, piece) {
        (Color::White, Piece::King) => '♔',
        (Color::White, Piece::Queen) => '♕',
        (Color::White, Piece::Rook) => '♖',
        (Color::White, Piece::Bishop) => '♗',
        (Color::White, Piece::Knight) => '♘',
        (Color::White, Piece::Pawn) => '♙',
        (Color::Black, Piece::King) => '♚',
        (Color::Black, Piece::Queen) => '♛',
        (Color::Black, Piece::Rook) => '♜',
        (Color::Black, Piece::Bishop) => '♝',
        (Color::Black, Piece::Knight) => '♞',
        (Color::Black, Piece::Pawn) => '♟',
    }
}

/// Draws the board with rank 8 at the top and file letters underneath.
pub fn board(board: &Board, unicode: bool) -> String {
    let mut out = String::new();
    for row in 0..8u8 {
        out.push(char::from(b'8' - row));
        for cell in board.row(row) {
            out.push(' ');
            out.push(match *cell {
                Some((piece, color)) if unicode => glyph(piece, color),
                Some((piece, color)) => piece.to_fen_char(color),
                None => '.',
            });
        }
        out.push('\n');
    }
    out.push_str(FILES);
    out
}

/// Space-separated move list.
pub fn move_list<'a>(moves: impl IntoIterator<Item = &'a Move>) -> String {
    moves
        .into_iter()
        .map(Move::long_notation)
        .collect::<Vec<_>>()
        .join(" ")
}
