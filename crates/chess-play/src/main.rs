//! chess-play - two players at one terminal.
//!
//! Moves are typed in coordinate notation (`e2e4`, `e7e8n`). The board is
//! written to stdout; logs go to stderr.

mod command;
mod config;
mod render;
mod session;

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chess_engine::GameState;
use clap::Parser;
use config::Config;
use session::{Session, SessionEnd, SessionOptions};
use tracing_subscriber::EnvFilter;

/// Two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play chess against another person in the terminal")]
struct Args {
    /// Config file (default: chess.toml in the current or parent directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start from this FEN position instead of the standard setup
    #[arg(long)]
    fen: Option<String>,

    /// Draw pieces with Unicode chess glyphs
    #[arg(long)]
    unicode: bool,

    /// List the legal moves after every turn
    #[arg(long)]
    show_moves: bool,

    /// Log filter when RUST_LOG is unset (e.g. "info", "chess_engine=debug")
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::load(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .with_context(|| format!("invalid log level '{}'", config.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match &config.source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No chess.toml found, using defaults"),
    }

    let state = match &config.start_fen {
        Some(fen) => {
            GameState::from_fen(fen).with_context(|| format!("bad start FEN '{}'", fen))?
        }
        None => GameState::new(),
    };
    tracing::info!(fen = %state.to_fen(), "starting game");

    let mut session = Session::new(
        state,
        SessionOptions {
            unicode: config.unicode,
            show_legal_moves: config.show_legal_moves,
        },
    );
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let end = session.run(stdin.lock(), &mut stdout)?;
    let plies = session.state().move_log().len();
    match end {
        SessionEnd::Finished(result) => tracing::info!(%result, plies, "session finished"),
        SessionEnd::Quit => tracing::info!(plies, "session ended without a result"),
    }

    Ok(())
}

/// Command-line flags win over the config file.
fn apply_overrides(config: &mut Config, args: &Args) {
    if args.fen.is_some() {
        config.start_fen = args.fen.clone();
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    config.unicode |= args.unicode;
    config.show_legal_moves |= args.show_moves;
}
