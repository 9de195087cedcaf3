//! Interactive game loop.
//!
//! Reads one command per line, plays it against the [`GameState`] and writes
//! the board back. Input and output are generic so the loop runs the same on
//! a terminal and in tests.

use std::io::{self, BufRead, Write};

use chess_core::{Piece, Square};
use chess_engine::{GameResult, GameState};

use crate::command::{Command, HELP};
use crate::render;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The game reached a result.
    Finished(GameResult),
    /// The player quit or input ran out.
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    pub unicode: bool,
    pub show_legal_moves: bool,
}

pub struct Session {
    state: GameState,
    options: SessionOptions,
}

impl Session {
    pub fn new(state: GameState, options: SessionOptions) -> Self {
        Session { state, options }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Runs until the game ends, the player quits, or `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> io::Result<SessionEnd> {
        self.show_position(out)?;
        if let Some(result) = self.state.outcome() {
            writeln!(out, "{}", result)?;
            return Ok(SessionEnd::Finished(result));
        }

        let mut lines = input.lines();
        loop {
            write!(out, "{} to move> ", self.state.side_to_move())?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    writeln!(out)?;
                    tracing::info!("input closed");
                    return Ok(SessionEnd::Quit);
                }
            };

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(e) => {
                    tracing::warn!(input = %line.trim(), "rejected command: {}", e);
                    writeln!(out, "error: {}", e)?;
                    continue;
                }
            };

            match command {
                Command::Move {
                    from,
                    to,
                    promotion,
                } => {
                    if let Some(end) = self.play(from, to, promotion, &line, out)? {
                        return Ok(end);
                    }
                }
                Command::Undo => match self.state.undo_move() {
                    Some(m) => {
                        tracing::info!(mv = %m.long_notation(), "took back move");
                        writeln!(out, "took back {}", m.long_notation())?;
                        self.show_position(out)?;
                    }
                    None => writeln!(out, "nothing to undo")?,
                },
                Command::Moves => {
                    writeln!(out, "{}", render::move_list(&self.state.legal_moves()))?;
                }
                Command::Board => {
                    let text = render::board(self.state.board(), self.options.unicode);
                    writeln!(out, "{}", text)?;
                }
                Command::Fen => writeln!(out, "{}", self.state.to_fen())?,
                Command::Help => writeln!(out, "{}", HELP)?,
                Command::Quit => {
                    tracing::info!("player quit");
                    return Ok(SessionEnd::Quit);
                }
            }
        }
    }

    fn play<W: Write>(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Piece>,
        typed: &str,
        out: &mut W,
    ) -> io::Result<Option<SessionEnd>> {
        let Some(m) = self.state.find_legal_move(from, to, promotion) else {
            tracing::warn!(input = %typed.trim(), "illegal move");
            writeln!(out, "{} is not a legal move", typed.trim())?;
            return Ok(None);
        };

        let side = self.state.side_to_move();
        self.state.apply_move(m);
        tracing::info!(mv = %m.long_notation(), %side, "played move");
        self.show_position(out)?;

        if let Some(result) = self.state.outcome() {
            tracing::info!(%result, "game over");
            writeln!(out, "{}", result)?;
            return Ok(Some(SessionEnd::Finished(result)));
        }
        Ok(None)
    }

    fn show_position<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", render::board(self.state.board(), self.options.unicode))?;
        if self.state.in_check() {
            writeln!(out, "{} is in check", self.state.side_to_move())?;
        }
        if self.options.show_legal_moves {
            writeln!(out, "legal: {}", render::move_list(&self.state.legal_moves()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_engine::DrawReason;

    fn run(
        state: GameState,
        options: SessionOptions,
        input: &str,
    ) -> (SessionEnd, String, Session) {
        let mut session = Session::new(state, options);
        let mut out = Vec::new();
        let end = session.run(input.as_bytes(), &mut out).unwrap();
        (end, String::from_utf8(out).unwrap(), session)
    }

    #[test]
    fn plays_moves_until_quit() {
        let (end, out, session) = run(
            GameState::new(),
            SessionOptions::default(),
            "e2e4\ne7e5\nquit\n",
        );
        assert_eq!(end, SessionEnd::Quit);
        assert_eq!(session.state().move_log().len(), 2);
        assert!(out.contains("4 . . . . P . . ."));
        assert!(out.contains("White to move> "));
        assert!(out.contains("Black to move> "));
    }

    #[test]
    fn end_of_input_quits() {
        let (end, _, session) = run(GameState::new(), SessionOptions::default(), "e2e4\n");
        assert_eq!(end, SessionEnd::Quit);
        assert!(!session.state().white_to_move());
    }

    #[test]
    fn illegal_move_is_reported_and_ignored() {
        let (_, out, session) = run(GameState::new(), SessionOptions::default(), "e2e5\n");
        assert!(out.contains("e2e5 is not a legal move"));
        assert!(session.state().move_log().is_empty());
    }

    #[test]
    fn bad_command_is_reported() {
        let (_, out, _) = run(GameState::new(), SessionOptions::default(), "castle\n");
        assert!(out.contains("error: unknown command 'castle'"));
    }

    #[test]
    fn undo_restores_previous_position() {
        let (_, out, session) = run(
            GameState::new(),
            SessionOptions::default(),
            "undo\ne2e4\nundo\n",
        );
        assert!(out.contains("nothing to undo"));
        assert!(out.contains("took back e2e4"));
        assert_eq!(session.state(), &GameState::new());
    }

    #[test]
    fn fools_mate_finishes_the_game() {
        let (end, out, _) = run(
            GameState::new(),
            SessionOptions::default(),
            "f2f3\ne7e5\ng2g4\nd8h4\ne2e4\n",
        );
        assert_eq!(end, SessionEnd::Finished(GameResult::BlackWins));
        assert!(out.contains("White is in check"));
        assert!(out.trim_end().ends_with("checkmate, Black wins"));
    }

    #[test]
    fn finished_position_ends_immediately() {
        let state = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let (end, out, _) = run(state, SessionOptions::default(), "h8g8\n");
        assert_eq!(
            end,
            SessionEnd::Finished(GameResult::Draw(DrawReason::Stalemate))
        );
        assert!(out.contains("draw by stalemate"));
        assert!(!out.contains("to move>"));
    }

    #[test]
    fn underpromotion_by_letter() {
        let state = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let (_, out, session) = run(state, SessionOptions::default(), "b7b8n\nfen\n");
        let promoted = session.state().last_move().and_then(|m| m.promotion());
        assert_eq!(promoted, Some(Piece::Knight));
        assert!(out.contains("1N2k3/8/8/8/8/8/8/4K3 b - - 0 1"));
    }

    #[test]
    fn show_legal_moves_option() {
        let options = SessionOptions {
            unicode: true,
            show_legal_moves: true,
        };
        let (_, out, _) = run(GameState::new(), options, "quit\n");
        assert!(out.contains("legal: a2a3 a2a4 b2b3"));
        assert!(out.contains("♜"));
    }
}
