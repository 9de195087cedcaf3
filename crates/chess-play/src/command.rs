//! Session command parsing.

use chess_core::{Move, Piece, Square, SquareError};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),
    #[error("bad move notation: {0}")]
    Notation(#[from] SquareError),
}

/// Commands typed by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play a move in coordinate notation, e.g. `e2e4` or `e7e8n`.
    Move {
        from: Square,
        to: Square,
        promotion: Option<Piece>,
    },
    /// Take back the last move.
    Undo,
    /// List the legal moves.
    Moves,
    /// Redraw the board.
    Board,
    /// Print the position as FEN.
    Fen,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  <from><to>[q|r|b|n]  play a move, e.g. e2e4 or e7e8n
  undo                 take back the last move
  moves                list the legal moves
  board                redraw the board
  fen                  print the position as FEN
  help                 show this text
  quit                 leave the game";

impl Command {
    /// Parse one line of input.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let input = input.trim();
        let mut parts = input.split_whitespace();

        let word = match parts.next() {
            Some(word) => word.to_ascii_lowercase(),
            None => return Err(CommandError::Empty),
        };
        if parts.next().is_some() {
            return Err(CommandError::Unknown(input.to_string()));
        }

        match word.as_str() {
            "undo" | "u" => Ok(Command::Undo),
            "moves" | "m" => Ok(Command::Moves),
            "board" | "b" => Ok(Command::Board),
            "fen" => Ok(Command::Fen),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            w if looks_like_move(w) => {
                let (from, to, promotion) = Move::parse_notation(w)?;
                Ok(Command::Move {
                    from,
                    to,
                    promotion,
                })
            }
            _ => Err(CommandError::Unknown(input.to_string())),
        }
    }
}

fn looks_like_move(word: &str) -> bool {
    let mut chars = word.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('a'..='h'), Some(c)) if c.is_ascii_digit()
    )
}
