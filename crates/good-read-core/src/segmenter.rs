//! Whitespace chunking.
//!
//! Text is split into whitespace-separated tokens, which are packed in order
//! into chunks that stay under a character limit. A token that is at least as
//! long as the limit becomes a chunk on its own and is never broken apart.

use std::fmt;
use std::mem;
use std::num::NonZeroUsize;
use thiserror::Error;

/// Maximum number of characters (not bytes) a chunk may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkLimit(NonZeroUsize);

impl ChunkLimit {
    pub const fn new(limit: NonZeroUsize) -> Self {
        ChunkLimit(limit)
    }

    /// Validate a raw integer limit, naming the setting in the error.
    pub fn from_raw(name: &'static str, value: i64) -> Result<Self, LimitError> {
        if value <= 0 {
            return Err(LimitError::NonPositive { name, value });
        }
        let value = usize::try_from(value).map_err(|_| LimitError::TooLarge { name, value })?;
        NonZeroUsize::new(value)
            .map(ChunkLimit)
            .ok_or(LimitError::NonPositive {
                name,
                value: value as i64,
            })
    }

    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for ChunkLimit {
    type Error = LimitError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        ChunkLimit::from_raw("limit", value)
    }
}

impl fmt::Display for ChunkLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LimitError {
    #[error("{name} must be a positive integer, got {value}")]
    NonPositive { name: &'static str, value: i64 },
    #[error("{name} does not fit in a usize on this platform: {value}")]
    TooLarge { name: &'static str, value: i64 },
}

/// Pack the whitespace-separated tokens of `text` into chunks.
///
/// A chunk is closed as soon as appending the next token (plus a joining
/// space) would bring it to `limit` characters or more. The token then starts
/// the next chunk, whatever its own length. Empty or whitespace-only input
/// yields no chunks.
pub fn segment(text: &str, limit: ChunkLimit) -> Vec<String> {
    let limit = limit.get();
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for token in text.split_whitespace() {
        let token_len = token.chars().count();
        let separator_len = if current.is_empty() { 0 } else { 1 };
        let prospective_len = current_len + separator_len + token_len;

        if prospective_len >= limit {
            if !current.is_empty() {
                chunks.push(mem::take(&mut current));
            }
            current.push_str(token);
            current_len = token_len;
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(token);
        current_len = prospective_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// [`segment`] with an unchecked integer limit.
pub fn segment_with(text: &str, limit: i64) -> Result<Vec<String>, LimitError> {
    let limit = ChunkLimit::from_raw("limit", limit)?;
    Ok(segment(text, limit))
}
