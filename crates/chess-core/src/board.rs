//! 8x8 board contents as a plain value.

use std::fmt;

use crate::{Color, Piece, Square};

/// Contents of one square: a piece and its owner, or empty.
pub type Cell = Option<(Piece, Color)>;

const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

/// The 64 squares of a chess board, indexed row-major from a8.
///
/// `Board` is `Copy`: taking a snapshot is a 64-byte copy with no shared
/// state between the copies.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; 64],
}

impl Board {
    /// A board with no pieces.
    pub const fn empty() -> Self {
        Board { cells: [None; 64] }
    }

    /// The standard starting position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for (col, &piece) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col), Some((piece, Color::Black)));
            board.set(Square::new(1, col), Some((Piece::Pawn, Color::Black)));
            board.set(Square::new(6, col), Some((Piece::Pawn, Color::White)));
            board.set(Square::new(7, col), Some((piece, Color::White)));
        }
        board
    }

    /// Returns the contents of a square.
    #[inline]
    pub const fn get(&self, sq: Square) -> Cell {
        self.cells[sq.index() as usize]
    }

    /// Replaces the contents of a square.
    #[inline]
    pub fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.index() as usize] = cell;
    }

    /// Empties a square and returns what was on it.
    #[inline]
    pub fn take(&mut self, sq: Square) -> Cell {
        std::mem::take(&mut self.cells[sq.index() as usize])
    }

    /// Returns the color of the piece on a square, if any.
    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|(_, color)| color)
    }

    /// Returns true if nothing stands on the square.
    #[inline]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.get(sq).is_none()
    }

    /// Iterates occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|(piece, color)| (sq, piece, color)))
    }

    /// Finds the king of the given color.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece, c)| piece == Piece::King && c == color)
            .map(|(sq, _, _)| sq)
    }

    /// Returns one row of the board, a-file first.
    pub fn row(&self, row: u8) -> &[Cell] {
        let start = row as usize * 8;
        &self.cells[start..start + 8]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    /// Renders the board as eight lines of FEN letters, `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8 {
            let line: String = self
                .row(row)
                .iter()
                .map(|cell| match cell {
                    Some((piece, color)) => piece.to_fen_char(*color),
                    None => '.',
                })
                .collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\n{})", self)
    }
}
