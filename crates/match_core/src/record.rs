use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::game::AppliedMove;
use crate::types::ResultTag;

/// PGN-style header metadata for one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchHeaders {
    pub event: String,
    pub site: String,
    pub date: String,
    pub white: String,
    pub black: String,
    pub time_control: String,
}

impl MatchHeaders {
    /// Headers for a local mirror match played today.
    pub fn new(white: &str, black: &str, think_time: Duration) -> Self {
        Self {
            event: "Engine mirror match".to_string(),
            site: "localhost".to_string(),
            date: Utc::now().format("%Y.%m.%d").to_string(),
            white: white.to_string(),
            black: black.to_string(),
            time_control: format!("{}+0", think_time.as_millis()),
        }
    }
}

/// A single recorded ply.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecordedMove {
    pub san: String,
    pub uci: String,
}

/// Ordered move list plus headers, built one ply at a time and finalized
/// with a result once the game is over.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MatchRecord {
    pub headers: MatchHeaders,
    pub moves: Vec<RecordedMove>,
    pub result: ResultTag,
}

impl MatchRecord {
    pub fn new(headers: MatchHeaders) -> Self {
        Self {
            headers,
            moves: Vec::new(),
            result: ResultTag::Unterminated,
        }
    }

    pub fn push(&mut self, mv: &AppliedMove) {
        self.moves.push(RecordedMove {
            san: mv.san.clone(),
            uci: mv.uci.clone(),
        });
    }

    /// Number of plies recorded so far.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
