//! Where text blocks come from.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// One structural unit of a book, usually a single spine document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock(String);

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        TextBlock(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for TextBlock {
    fn from(text: String) -> Self {
        TextBlock(text)
    }
}

impl From<&str> for TextBlock {
    fn from(text: &str) -> Self {
        TextBlock(text.to_string())
    }
}

impl fmt::Display for TextBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves a book identifier to its ordered text blocks.
pub trait DocumentSource: Send + Sync {
    fn load_blocks(&self, book: &str) -> Result<Vec<TextBlock>, DocumentError>;
}

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid book name {name:?}: {reason}")]
    InvalidIdentifier { name: String, reason: &'static str },
    #[error("book {name:?} not found at {}", path.display())]
    NotFound { name: String, path: PathBuf },
    #[error("book {name:?} could not be parsed: {reason}")]
    Malformed { name: String, reason: String },
    #[error("failed to read book {name:?}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl DocumentError {
    /// Short machine-readable label, used in logs and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            DocumentError::InvalidIdentifier { .. } => "invalid_identifier",
            DocumentError::NotFound { .. } => "not_found",
            DocumentError::Malformed { .. } => "malformed",
            DocumentError::Io { .. } => "io",
        }
    }
}
