//! # Error Types

use std::error::Error;

/// An opaque failure reported by a tokenizer backend.
///
/// The predictor never interprets these; they surface to the caller
/// inside [`ImbalanceError::Tokenizer`] unchanged.
#[derive(Debug, thiserror::Error)]
#[error("tokenizer \"{tokenizer}\" failed: {source}")]
pub struct TokenizerError {
    /// The name of the failing tokenizer.
    pub tokenizer: String,

    /// The backend error.
    #[source]
    pub source: Box<dyn Error + Send + Sync>,
}

impl TokenizerError {
    /// Wrap a backend error.
    pub fn new<E>(
        tokenizer: impl Into<String>,
        source: E,
    ) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        Self {
            tokenizer: tokenizer.into(),
            source: source.into(),
        }
    }
}

/// Errors from moe-imbalance operations.
#[derive(Debug, thiserror::Error)]
pub enum ImbalanceError {
    /// The sample batch violates a precondition.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The tokenizer collaborator failed.
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),

    /// The requested tokenizer is unknown, or its backend is not compiled in.
    #[error("unsupported tokenizer: {0}")]
    UnsupportedTokenizer(String),

    /// A dataset line could not be parsed.
    #[error("dataset line {line}: {source}")]
    Dataset {
        /// The 1-based line number.
        line: usize,

        /// The parse error.
        #[source]
        source: serde_json::Error,
    },

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for moe-imbalance operations.
pub type ImbalanceResult<T> = core::result::Result<T, ImbalanceError>;
