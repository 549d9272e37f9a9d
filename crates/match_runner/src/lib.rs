//! Match driver and snapshot publishing.
//!
//! [`run_match`] alternates two engine sessions from the starting
//! position until the board reports a terminal state, publishing one
//! snapshot per ply through a [`Publisher`]. Consumers (console,
//! WebSocket broadcast, in-memory capture) attach as [`SnapshotSink`]s.

pub mod config;
pub mod driver;
pub mod publish;

pub use config::*;
pub use driver::*;
pub use publish::*;
