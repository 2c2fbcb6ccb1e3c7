//! Error types for tree construction and verification.

use thiserror::Error;

/// Errors that can occur when building or verifying a blob's digest tree.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// A declared data length is too large to shape into a tree.
    #[error("unsupported data length")]
    InvalidArgs,

    /// An offset or length reaches past the declared data length.
    #[error("offset or length out of range")]
    OutOfRange,

    /// The tree buffer cannot hold every intermediate digest.
    #[error("tree buffer too small")]
    BufferTooSmall,

    /// A streaming call arrived before the builder was fully fed.
    #[error("builder is missing data")]
    BadState,

    /// A recomputed digest does not match the stored value.
    ///
    /// This is the only failure with security meaning: the data, the tree
    /// buffer, or the root has been altered since the tree was built.
    #[error("digest mismatch")]
    DataIntegrity,
}
