//! Core data model for engine mirror matches.
//!
//! Chess rules (legality, terminal detection) are delegated to `shakmaty`;
//! this crate wraps them behind [`GameBoard`] and adds the surrounding
//! match vocabulary: colors and result tags, snapshot events, the match
//! record, and PGN export.

pub mod events;
pub mod game;
pub mod pgn;
pub mod record;
pub mod types;

pub use events::*;
pub use game::*;
pub use record::*;
pub use types::*;
