//! PGN export for a finished match record.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::record::MatchRecord;

const MOVETEXT_WRAP: usize = 80;

#[derive(Debug, Error)]
pub enum PgnError {
    #[error("failed to write PGN to {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Render the record as a PGN document: tag pairs, then numbered SAN
/// movetext ending with the result token.
pub fn render(record: &MatchRecord) -> String {
    let h = &record.headers;
    let mut out = String::new();
    out.push_str(&format!("[Event \"{}\"]\n", h.event));
    out.push_str(&format!("[Site \"{}\"]\n", h.site));
    out.push_str(&format!("[Date \"{}\"]\n", h.date));
    out.push_str("[Round \"1\"]\n");
    out.push_str(&format!("[White \"{}\"]\n", h.white));
    out.push_str(&format!("[Black \"{}\"]\n", h.black));
    out.push_str(&format!("[TimeControl \"{}\"]\n", h.time_control));
    out.push_str(&format!("[Result \"{}\"]\n\n", record.result.as_pgn()));

    let mut line_len = 0;
    let mut push_token = |out: &mut String, token: &str| {
        if line_len > 0 && line_len + 1 + token.len() > MOVETEXT_WRAP {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        out.push_str(token);
        line_len += token.len();
    };

    for (i, mv) in record.moves.iter().enumerate() {
        if i % 2 == 0 {
            push_token(&mut out, &format!("{}.", i / 2 + 1));
        }
        push_token(&mut out, &mv.san);
    }
    push_token(&mut out, record.result.as_pgn());
    out.push('\n');
    out
}

/// Write the record to a file, once, after the match has concluded.
pub fn write_file(path: &Path, record: &MatchRecord) -> Result<(), PgnError> {
    std::fs::write(path, render(record)).map_err(|source| PgnError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "pgn_tests.rs"]
mod pgn_tests;
