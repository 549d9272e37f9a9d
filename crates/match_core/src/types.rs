use serde::{Deserialize, Serialize};
use std::fmt;

/// Side to move / piece color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<shakmaty::Color> for Color {
    fn from(c: shakmaty::Color) -> Self {
        match c {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }
}

impl From<Color> for shakmaty::Color {
    fn from(c: Color) -> Self {
        match c {
            Color::White => shakmaty::Color::White,
            Color::Black => shakmaty::Color::Black,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// Final result of a match.
///
/// `Unterminated` covers the ply-cap safety net: the game was stopped
/// without the board reaching a terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTag {
    WhiteWins,
    BlackWins,
    Draw,
    Unterminated,
}

impl ResultTag {
    /// The PGN result token for this tag.
    pub fn as_pgn(self) -> &'static str {
        match self {
            ResultTag::WhiteWins => "1-0",
            ResultTag::BlackWins => "0-1",
            ResultTag::Draw => "1/2-1/2",
            ResultTag::Unterminated => "*",
        }
    }
}

impl fmt::Display for ResultTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Logs and exports agree on the PGN token.
        write!(f, "{}", self.as_pgn())
    }
}
