//! Error types for building embedding matrices and parsing
//! pretrained vector files.

use thiserror::Error;

/// Errors raised by the embedding pipeline.
///
/// A word that has no pretrained vector is deliberately NOT an
/// error — it becomes a zero row in the matrix.
#[derive(Debug, Error, PartialEq)]
pub enum EmbeddingError {
    /// A size argument was zero, or two words share one index
    /// of the word index.
    #[error("Invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// A pretrained vector does not have `embedding_dim` components.
    #[error("Dimension mismatch for word '{word}': expected {expected}, actual {actual}")]
    DimensionMismatch {
        word: String,
        expected: usize,
        actual: usize,
    },

    /// A line of a pretrained vector file could not be parsed.
    #[error("Malformed vector line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number in the source file
        line: usize,
        reason: String,
    },
}

impl EmbeddingError {
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument { name, reason: reason.into() }
    }

    pub fn dimension_mismatch(word: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch { word: word.into(), expected, actual }
    }

    pub fn malformed_line(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedLine { line, reason: reason.into() }
    }
}
