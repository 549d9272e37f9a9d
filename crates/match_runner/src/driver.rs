//! The match driver: alternates two engine sessions until the game ends.

use std::thread;
use thiserror::Error;
use tracing::{debug, error, info};

use match_core::{
    Color, GameBoard, GameError, MatchHeaders, MatchRecord, ResultTag, SnapshotEvent,
};
use uci_session::{EngineSession, SessionError};

use crate::config::MatchConfig;
use crate::publish::Publisher;

/// Fatal, match-aborting failures. Either way the engine broke its side
/// of the contract; the driver does not retry within a match.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("engine session failed: {0}")]
    Session(#[from] SessionError),

    #[error("{engine} played illegal move {uci}: {source}")]
    IllegalMove {
        engine: String,
        uci: String,
        source: GameError,
    },
}

/// Result tag plus the full record of a finished match.
#[derive(Debug)]
pub struct MatchOutcome {
    pub result: ResultTag,
    pub record: MatchRecord,
}

/// Play one match between `white` and `black`.
///
/// One move is applied and one snapshot published per iteration, with a
/// pacing delay in between; a `GameOver` event is published exactly once,
/// after the last move of a completed game. An aborted match returns an
/// error without publishing any terminal event. Both sessions are shut
/// down on every exit path.
pub fn run_match(
    white: &mut dyn EngineSession,
    black: &mut dyn EngineSession,
    config: &MatchConfig,
    publisher: &mut Publisher,
) -> Result<MatchOutcome, MatchError> {
    let outcome = play(white, black, config, publisher);
    release(white);
    release(black);
    outcome
}

fn release(session: &mut dyn EngineSession) {
    if let Err(e) = session.shutdown() {
        error!(engine = session.name(), error = %e, "engine shutdown failed");
    }
}

fn play(
    white: &mut dyn EngineSession,
    black: &mut dyn EngineSession,
    config: &MatchConfig,
    publisher: &mut Publisher,
) -> Result<MatchOutcome, MatchError> {
    let mut board = GameBoard::new();
    let mut record = MatchRecord::new(MatchHeaders::new(
        &config.white_name,
        &config.black_name,
        config.think_time,
    ));

    info!(
        white = white.name(),
        black = black.name(),
        think_ms = config.think_time.as_millis() as u64,
        "starting match"
    );

    let result = loop {
        if let Some(termination) = board.termination() {
            debug!(?termination, "game over");
            break termination.result();
        }
        if record.len() as u32 >= config.max_plies {
            break ResultTag::Unterminated;
        }

        let session: &mut dyn EngineSession = match board.turn() {
            Color::White => &mut *white,
            Color::Black => &mut *black,
        };
        let uci = session.best_move(&board.fen(), config.think_time)?;
        let engine = session.name().to_string();

        let applied = board
            .apply_uci(&uci)
            .map_err(|source| MatchError::IllegalMove {
                engine,
                uci: uci.clone(),
                source,
            })?;
        record.push(&applied);

        publisher.publish(&SnapshotEvent::Move {
            ply: record.len() as u32,
            fen: board.fen(),
            san: applied.san,
            uci: applied.uci,
        });

        // Pace between moves only; the terminal event follows the last
        // move without delay.
        let done = board.termination().is_some() || record.len() as u32 >= config.max_plies;
        if !done {
            thread::sleep(config.move_delay);
        }
    };

    record.result = result;
    publisher.publish(&SnapshotEvent::GameOver { result });
    info!(result = %result, plies = record.len(), "match finished");

    Ok(MatchOutcome { result, record })
}

#[cfg(test)]
#[path = "driver_tests.rs"]
mod driver_tests;
