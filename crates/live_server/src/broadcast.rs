//! Broadcast sink bridging the (blocking) match loop to async subscribers.

use match_core::SnapshotEvent;
use match_runner::SnapshotSink;
use tokio::sync::broadcast;

/// Channel capacity; a subscriber that lags further than this skips ahead.
pub const EVENT_BUFFER: usize = 64;

/// Pushes every snapshot onto a `tokio::sync::broadcast` channel.
///
/// Delivery is best-effort by construction. Receivers that joined late
/// see only subsequent events, slow receivers lag and skip, and with no
/// receivers at all the send simply fails. None of that reaches the
/// match driver.
pub struct BroadcastSink {
    tx: broadcast::Sender<SnapshotEvent>,
}

impl BroadcastSink {
    pub fn new(tx: broadcast::Sender<SnapshotEvent>) -> Self {
        Self { tx }
    }
}

impl SnapshotSink for BroadcastSink {
    fn deliver(&mut self, event: &SnapshotEvent) {
        if self.tx.send(event.clone()).is_err() {
            tracing::trace!("no live subscribers for snapshot");
        }
    }
}

#[cfg(test)]
#[path = "broadcast_tests.rs"]
mod broadcast_tests;
