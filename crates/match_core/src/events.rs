use serde::{Deserialize, Serialize};

use crate::types::ResultTag;

/// One event on the snapshot stream.
///
/// A completed match is a sequence of `Move` events, one per ply, followed
/// by exactly one `GameOver`. An aborted match ends without a `GameOver`.
/// This is also the WebSocket wire format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SnapshotEvent {
    Move {
        /// 1-based ply number.
        ply: u32,
        /// Position after the move was applied.
        fen: String,
        san: String,
        uci: String,
    },
    GameOver {
        result: ResultTag,
    },
}

impl SnapshotEvent {
    pub fn is_game_over(&self) -> bool {
        matches!(self, SnapshotEvent::GameOver { .. })
    }
}
