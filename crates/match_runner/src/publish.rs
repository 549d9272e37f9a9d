//! Snapshot fan-out.
//!
//! Delivery is best-effort: a sink that cannot keep up or has lost its
//! consumer must swallow the problem itself; nothing here propagates back
//! into the match loop.

use std::sync::{Arc, Mutex};

use match_core::SnapshotEvent;

/// One consumer of the snapshot stream.
pub trait SnapshotSink: Send {
    fn deliver(&mut self, event: &SnapshotEvent);
}

/// Fans each event out to every attached sink, in attach order.
#[derive(Default)]
pub struct Publisher {
    sinks: Vec<Box<dyn SnapshotSink>>,
}

impl Publisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, sink: Box<dyn SnapshotSink>) {
        self.sinks.push(sink);
    }

    pub fn publish(&mut self, event: &SnapshotEvent) {
        for sink in &mut self.sinks {
            sink.deliver(event);
        }
    }
}

/// Prints the board and the move just played, like watching the match in
/// a terminal.
pub struct ConsoleSink;

impl SnapshotSink for ConsoleSink {
    fn deliver(&mut self, event: &SnapshotEvent) {
        match event {
            SnapshotEvent::Move { ply, fen, san, .. } => {
                println!("{}", render_board(fen));
                println!("{ply}. {san}");
                println!("{}", "-".repeat(60));
            }
            SnapshotEvent::GameOver { result } => {
                println!("Game over - result: {result}");
            }
        }
    }
}

/// Collects every event into shared memory; used by tests and anything
/// that wants the stream as a move list.
#[derive(Default)]
pub struct MemorySink {
    events: Arc<Mutex<Vec<SnapshotEvent>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the captured events.
    pub fn events(&self) -> Arc<Mutex<Vec<SnapshotEvent>>> {
        Arc::clone(&self.events)
    }
}

impl SnapshotSink for MemorySink {
    fn deliver(&mut self, event: &SnapshotEvent) {
        if let Ok(mut log) = self.events.lock() {
            log.push(event.clone());
        }
    }
}

/// ASCII board from the piece-placement field of a FEN.
fn render_board(fen: &str) -> String {
    let placement = fen.split_whitespace().next().unwrap_or("");
    let mut out = String::new();
    for (i, rank) in placement.split('/').enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut first = true;
        for ch in rank.chars() {
            let run = ch.to_digit(10).map_or(1, |n| n as usize);
            let cell = if ch.is_ascii_digit() { '.' } else { ch };
            for _ in 0..run {
                if !first {
                    out.push(' ');
                }
                out.push(cell);
                first = false;
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod publish_tests;
