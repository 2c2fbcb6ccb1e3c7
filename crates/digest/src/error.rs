//! Error types for digest parsing.

use thiserror::Error;

/// Errors that can occur when parsing the hex form of a digest.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseDigestError {
    /// The string does not contain exactly two characters per digest byte.
    #[error("expected {expected} hex characters, got {got}")]
    BadLength {
        /// Required number of characters.
        expected: usize,
        /// Number of characters supplied.
        got: usize,
    },

    /// The string contains a character outside `[0-9a-fA-F]`.
    #[error("invalid hex: {0}")]
    BadHex(#[from] hex::FromHexError),
}

impl Eq for ParseDigestError {}
