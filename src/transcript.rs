//! Move transcripts.
//!
//! A transcript is the move list as whitespace-separated 1-based field
//! indices, `-1` standing for a swap. Lines are folded so that none exceeds
//! [`LOG_WIDTH`] columns, and non-empty output ends with a newline.

use std::io::{Read, Write};

use thiserror::Error;

use crate::constants::{LOG_WIDTH, SWAP_TOKEN};
use crate::game::Move;

#[derive(Debug, Error)]
pub enum TranscriptError {
    /// `position` is the 1-based index of the token in the transcript.
    #[error("transcript: invalid move {token:?} at position {position}")]
    InvalidToken { position: usize, token: String },

    #[error("transcript: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse one transcript token.
pub fn parse_move(token: &str) -> Option<Move> {
    if let Ok(i) = token.parse::<usize>() {
        return i.checked_sub(1).map(Move::Place);
    }
    (token.parse::<i64>().ok()? == SWAP_TOKEN).then_some(Move::Swap)
}

/// Render `moves` as transcript text.
pub fn format_transcript(moves: &[Move]) -> String {
    let mut text = String::new();
    let mut col = 0;
    for mv in moves {
        let token = mv.to_string();
        if col > 0 {
            if col + 1 + token.len() <= LOG_WIDTH {
                text.push(' ');
                col += 1;
            } else {
                text.push('\n');
                col = 0;
            }
        }
        text.push_str(&token);
        col += token.len();
    }
    if col > 0 {
        text.push('\n');
    }
    text
}

pub fn write_transcript<W: Write>(moves: &[Move], mut w: W) -> std::io::Result<()> {
    w.write_all(format_transcript(moves).as_bytes())?;
    w.flush()
}

pub fn parse_transcript(text: &str) -> Result<Vec<Move>, TranscriptError> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            parse_move(token).ok_or_else(|| TranscriptError::InvalidToken {
                position: i + 1,
                token: token.to_string(),
            })
        })
        .collect()
}

pub fn read_transcript<R: Read>(mut reader: R) -> Result<Vec<Move>, TranscriptError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_transcript(&text)
}
