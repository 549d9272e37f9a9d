//! Board state for a single match, wrapping shakmaty.
//!
//! The wrapper owns everything the match driver needs from the rules
//! capability: FEN in/out, validated move application with SAN capture,
//! and terminal detection. Fifty-move and threefold-repetition draws are
//! claimed automatically, so a mirror match always ends on its own.

use shakmaty::{
    fen::Fen, san::SanPlus, uci::UciMove, CastlingMode, Chess, EnPassantMode, Position,
};
use std::collections::HashMap;
use thiserror::Error;

use crate::types::{Color, ResultTag};

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid UCI move: {0}")]
    InvalidUci(String),

    #[error("illegal move: {0}")]
    IllegalMove(String),
}

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// Checkmate; the given color delivered it.
    Checkmate(Color),
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl Termination {
    pub fn result(self) -> ResultTag {
        match self {
            Termination::Checkmate(Color::White) => ResultTag::WhiteWins,
            Termination::Checkmate(Color::Black) => ResultTag::BlackWins,
            Termination::Stalemate
            | Termination::InsufficientMaterial
            | Termination::FiftyMoveRule
            | Termination::ThreefoldRepetition => ResultTag::Draw,
        }
    }
}

/// A move that has been validated and applied to the board.
#[derive(Clone, Debug)]
pub struct AppliedMove {
    /// Normalized UCI text (castling as king from/to squares).
    pub uci: String,
    /// Standard algebraic notation, captured before the move was played.
    pub san: String,
}

/// The authoritative position of one match.
///
/// shakmaty positions carry no move history, so repetition is tracked
/// here by counting position keys (FEN minus the move counters).
#[derive(Clone, Debug)]
pub struct GameBoard {
    position: Chess,
    seen: HashMap<String, u32>,
}

impl GameBoard {
    /// Standard starting position.
    pub fn new() -> Self {
        let position = Chess::default();
        let mut board = Self {
            position,
            seen: HashMap::new(),
        };
        board.note_position();
        board
    }

    /// Reconstruct a board from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let parsed: Fen = fen
            .parse()
            .map_err(|_| GameError::InvalidFen(fen.to_string()))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|_| GameError::InvalidFen(fen.to_string()))?;
        let mut board = Self {
            position,
            seen: HashMap::new(),
        };
        board.note_position();
        Ok(board)
    }

    /// Single-line FEN encoding of the current position.
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    /// Whose turn it is.
    pub fn turn(&self) -> Color {
        self.position.turn().into()
    }

    /// Validate and apply a move given in UCI notation.
    pub fn apply_uci(&mut self, uci: &str) -> Result<AppliedMove, GameError> {
        let parsed: UciMove = uci
            .parse()
            .map_err(|_| GameError::InvalidUci(uci.to_string()))?;
        let m = parsed
            .to_move(&self.position)
            .map_err(|_| GameError::IllegalMove(uci.to_string()))?;
        if !self.position.is_legal(&m) {
            return Err(GameError::IllegalMove(uci.to_string()));
        }

        // SAN (with check/mate suffix) depends on the position before the move.
        let san = SanPlus::from_move(self.position.clone(), &m).to_string();
        let normalized = UciMove::from_move(&m, CastlingMode::Standard).to_string();

        self.position.play_unchecked(&m);
        self.note_position();

        Ok(AppliedMove {
            uci: normalized,
            san,
        })
    }

    /// Terminal state of the game, if any.
    pub fn termination(&self) -> Option<Termination> {
        if self.position.is_checkmate() {
            // The side to move is mated; the mover was the other color.
            return Some(Termination::Checkmate(self.turn().other()));
        }
        if self.position.is_stalemate() {
            return Some(Termination::Stalemate);
        }
        if self.position.is_insufficient_material() {
            return Some(Termination::InsufficientMaterial);
        }
        if self.position.halfmoves() >= 100 {
            return Some(Termination::FiftyMoveRule);
        }
        if self.seen.get(&self.position_key()).copied().unwrap_or(0) >= 3 {
            return Some(Termination::ThreefoldRepetition);
        }
        None
    }

    pub fn is_game_over(&self) -> bool {
        self.termination().is_some()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.position.halfmoves()
    }

    /// FEN minus the halfmove clock and move number, which the
    /// repetition rule ignores.
    fn position_key(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace()
            .take(4)
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn note_position(&mut self) {
        let key = self.position_key();
        *self.seen.entry(key).or_insert(0) += 1;
    }
}

impl Default for GameBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
