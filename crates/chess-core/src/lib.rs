//! Core types for chess.
//!
//! This crate provides the value types shared by the engine and its front
//! ends:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`] for board coordinates (row 0 is black's back rank)
//! - [`Board`], a copyable 8x8 array of square contents
//! - [`CastlingRights`]
//! - [`Move`] for board transitions
//! - FEN parsing and serialization

mod board;
mod castling;
mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use board::{Board, Cell};
pub use castling::CastlingRights;
pub use color::Color;
pub use fen::{Fen, FenError};
pub use mov::{Move, MoveFlag};
pub use piece::Piece;
pub use square::{Square, SquareError};
