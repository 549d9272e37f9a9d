//! Subprocess-backed UCI session.
//!
//! Speaks just enough of the UCI protocol to run a match: handshake on
//! spawn, then `position fen ...` / `go movetime ...` per think request,
//! reading lines until `bestmove`. Every read carries a deadline, so an
//! engine that stays alive but goes silent surfaces as a fatal session
//! error instead of wedging the driver. Anything unexpected from the
//! process is fatal; the driver never retries a broken engine.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::{EngineSession, SessionError};

/// Deadline for the uciok/readyok handshake after launch.
const HANDSHAKE_LIMIT: Duration = Duration::from_secs(5);
/// Allowance past the requested think time before a silent engine counts
/// as unresponsive.
const REPLY_GRACE: Duration = Duration::from_secs(2);
/// How long `quit` gets before the process is reaped by force.
const QUIT_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug)]
pub struct UciEngineSession {
    name: String,
    proc: Option<EngineProc>,
}

#[derive(Debug)]
struct EngineProc {
    child: Child,
    stdin: BufWriter<ChildStdin>,
    lines: Receiver<String>,
    reader: JoinHandle<()>,
}

impl UciEngineSession {
    /// Launch the engine binary and complete the UCI handshake.
    pub fn spawn(name: &str, binary: &Path) -> Result<Self, SessionError> {
        let mut child = Command::new(binary)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| SessionError::Spawn {
                path: binary.to_path_buf(),
                source,
            })?;

        let stdin = BufWriter::new(child.stdin.take().ok_or(SessionError::Closed)?);
        let stdout = child.stdout.take().ok_or(SessionError::Closed)?;

        // A dedicated reader feeds lines through a channel, which gives
        // every read a deadline via recv_timeout. The thread exits on EOF
        // or when the session is dropped.
        let (line_tx, lines) = mpsc::channel();
        let reader = thread::spawn(move || {
            let mut stdout = BufReader::new(stdout);
            let mut line = String::new();
            loop {
                line.clear();
                match stdout.read_line(&mut line) {
                    Ok(0) | Err(_) => break,
                    Ok(_) => {
                        if line_tx.send(line.trim().to_string()).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        let mut session = Self {
            name: name.to_string(),
            proc: Some(EngineProc {
                child,
                stdin,
                lines,
                reader,
            }),
        };

        session.send("uci")?;
        session.read_until("uciok", HANDSHAKE_LIMIT)?;
        session.send("isready")?;
        session.read_until("readyok", HANDSHAKE_LIMIT)?;

        info!(engine = %session.name, path = %binary.display(), "engine session ready");
        Ok(session)
    }

    fn send(&mut self, command: &str) -> Result<(), SessionError> {
        let proc = self.proc.as_mut().ok_or(SessionError::Closed)?;
        writeln!(proc.stdin, "{command}")?;
        proc.stdin.flush()?;
        Ok(())
    }

    /// Read lines until one whose first token matches `token`, returning
    /// that line. EOF means the process died; passing the deadline with
    /// no matching line means it is unresponsive.
    fn read_until(&mut self, token: &str, limit: Duration) -> Result<String, SessionError> {
        let proc = self.proc.as_mut().ok_or(SessionError::Closed)?;
        let deadline = Instant::now() + limit;
        loop {
            let remaining = deadline
                .checked_duration_since(Instant::now())
                .unwrap_or(Duration::ZERO);
            match proc.lines.recv_timeout(remaining) {
                Ok(line) => {
                    if line.split_whitespace().next() == Some(token) {
                        return Ok(line);
                    }
                }
                Err(RecvTimeoutError::Timeout) => return Err(SessionError::Timeout),
                Err(RecvTimeoutError::Disconnected) => return Err(SessionError::Closed),
            }
        }
    }
}

impl EngineSession for UciEngineSession {
    fn name(&self) -> &str {
        &self.name
    }

    fn best_move(&mut self, fen: &str, think_time: Duration) -> Result<String, SessionError> {
        self.send(&format!("position fen {fen}"))?;
        self.send(&format!("go movetime {}", think_time.as_millis()))?;

        let line = match self.read_until("bestmove", think_time + REPLY_GRACE) {
            Ok(line) => line,
            Err(e) => {
                // A silent or dead engine is unrecoverable; reap it now.
                warn!(engine = %self.name, error = %e, "engine stopped responding");
                let _ = self.shutdown();
                return Err(e);
            }
        };
        let mv = line.split_whitespace().nth(1).ok_or(SessionError::NoMove)?;
        // "(none)" / "0000" mean the engine had nothing to play.
        if mv == "(none)" || mv == "0000" {
            return Err(SessionError::NoMove);
        }
        debug!(engine = %self.name, %mv, "bestmove received");
        Ok(mv.to_string())
    }

    fn shutdown(&mut self) -> Result<(), SessionError> {
        if let Some(mut proc) = self.proc.take() {
            // Best effort: the process may already be gone.
            let _ = writeln!(proc.stdin, "quit");
            let _ = proc.stdin.flush();

            // Give quit a moment to land, then reap by force. A wedged
            // engine must not be able to stall shutdown either.
            let deadline = Instant::now() + QUIT_GRACE;
            loop {
                match proc.child.try_wait() {
                    Ok(Some(_)) => break,
                    Ok(None) if Instant::now() < deadline => {
                        thread::sleep(Duration::from_millis(10));
                    }
                    _ => {
                        let _ = proc.child.kill();
                        let _ = proc.child.wait();
                        break;
                    }
                }
            }
            let _ = proc.reader.join();
            debug!(engine = %self.name, "engine session shut down");
        }
        Ok(())
    }
}

impl Drop for UciEngineSession {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

#[cfg(all(test, unix))]
#[path = "uci_tests.rs"]
mod uci_tests;
