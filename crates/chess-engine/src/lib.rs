//! Chess game-state engine.
//!
//! This crate provides:
//! - [`GameState`] - board, side to move, castling and en passant state,
//!   and a reversible move log
//! - Pseudo-legal and legal move generation, dispatched per piece kind
//! - Check, checkmate and stalemate detection
//! - [`perft`](movegen::perft) for validating the move generator
//!
//! # Architecture
//!
//! The board is a plain 64-cell array ([`chess_core::Board`]), so copying a
//! state for speculative play is cheap and shares nothing with the original.
//! Moves are applied in place and undone from the log; every special move
//! (castling, en passant, promotion) is reversed exactly.
//!
//! # Example
//!
//! ```
//! use chess_engine::GameState;
//! use chess_core::Square;
//!
//! let mut game = GameState::new();
//! assert_eq!(game.legal_moves().len(), 20);
//!
//! let e4 = game
//!     .find_legal_move(Square::new(6, 4), Square::new(4, 4), None)
//!     .expect("e2e4 is legal");
//! game.apply_move(e4);
//! assert!(!game.white_to_move());
//!
//! game.undo_move();
//! assert_eq!(game, GameState::new());
//! ```

pub mod movegen;
pub mod rules;
mod state;

pub use movegen::{
    generate_legal, generate_pseudo_legal, is_king_attacked, is_square_attacked, MoveList,
};
pub use rules::{DrawReason, GameResult};
pub use state::{GameState, LogEntry};
