//! Engine sessions for mirror matches.
//!
//! An [`EngineSession`] is the process-shaped capability the match driver
//! talks to: give it a position and a time budget, get a move back, and
//! shut it down when the match ends. The real implementation wraps a UCI
//! engine subprocess; [`testing::ScriptedSession`] replaces it in tests.

pub mod testing;
mod uci;

pub use uci::UciEngineSession;

use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to launch engine at {path}: {source}")]
    Spawn { path: PathBuf, source: io::Error },

    #[error("engine i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("engine process closed its output stream")]
    Closed,

    #[error("engine did not respond in time")]
    Timeout,

    #[error("engine returned no usable move")]
    NoMove,
}

/// One side of a match.
///
/// Exactly one session has an outstanding request at a time; the driver
/// owns both and never overlaps them. `shutdown` must be safe to call
/// more than once.
pub trait EngineSession: Send {
    /// Name used in logs and error reports.
    fn name(&self) -> &str;

    /// Ask for the best move in the given position (FEN), thinking for at
    /// most `think_time`. Returns the move in UCI notation.
    fn best_move(&mut self, fen: &str, think_time: Duration) -> Result<String, SessionError>;

    /// Terminate the session. Idempotent.
    fn shutdown(&mut self) -> Result<(), SessionError>;
}
