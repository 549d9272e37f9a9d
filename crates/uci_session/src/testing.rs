//! In-memory sessions for exercising match code without a subprocess.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::{EngineSession, SessionError};

/// Plays a fixed list of moves in order, then reports `NoMove`.
///
/// Shutdown calls are counted through a shared handle so tests can assert
/// that the driver released the session on every exit path.
pub struct ScriptedSession {
    name: String,
    moves: VecDeque<String>,
    shutdowns: Arc<AtomicUsize>,
}

impl ScriptedSession {
    pub fn new(name: &str, moves: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            moves: moves.iter().map(|m| m.to_string()).collect(),
            shutdowns: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle that observes how many times `shutdown` was called.
    pub fn shutdown_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.shutdowns)
    }
}

impl EngineSession for ScriptedSession {
    fn name(&self) -> &str {
        &self.name
    }

    fn best_move(&mut self, _fen: &str, _think_time: Duration) -> Result<String, SessionError> {
        self.moves.pop_front().ok_or(SessionError::NoMove)
    }

    fn shutdown(&mut self) -> Result<(), SessionError> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod testing_tests {
    use super::*;

    #[test]
    fn scripted_session_plays_in_order_then_runs_dry() {
        let mut session = ScriptedSession::new("stub", &["e2e4", "g1f3"]);
        let think = Duration::ZERO;
        assert_eq!(session.best_move("-", think).unwrap(), "e2e4");
        assert_eq!(session.best_move("-", think).unwrap(), "g1f3");
        assert!(matches!(
            session.best_move("-", think),
            Err(SessionError::NoMove)
        ));
    }

    #[test]
    fn shutdown_is_counted_and_idempotent() {
        let mut session = ScriptedSession::new("stub", &[]);
        let counter = session.shutdown_counter();
        session.shutdown().unwrap();
        session.shutdown().unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
