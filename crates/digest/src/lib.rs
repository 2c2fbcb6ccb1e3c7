//! Content digest primitives.
//!
//! Modules:
//! - [`Digest`]: opaque 32-byte hash value with a fixed hex form
//! - [`Context`]: incremental SHA-256 context producing a [`Digest`]

pub mod error;

use std::fmt;
use std::str::FromStr;

use sha2::{Digest as _, Sha256};

pub use error::ParseDigestError;

/// Length of a digest in bytes.
pub const DIGEST_LEN: usize = 32;

/// Length of the hex form of a digest in characters.
pub const DIGEST_HEX_LEN: usize = DIGEST_LEN * 2;

/// An opaque 32-byte content digest.
///
/// Digests compare for equality only; they have no ordering. The canonical
/// textual form is 64 lowercase hex characters with no prefix or separators,
/// produced by `Display` and accepted (in either case) by [`Digest::parse`].
#[derive(Clone, Copy, Default, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Hashes `data` in one shot.
    pub fn hash(data: &[u8]) -> Self {
        Self(Sha256::digest(data).into())
    }

    /// Parses a digest from its hex form.
    pub fn parse(s: &str) -> Result<Self, ParseDigestError> {
        if s.len() != DIGEST_HEX_LEN {
            return Err(ParseDigestError::BadLength {
                expected: DIGEST_HEX_LEN,
                got: s.len(),
            });
        }
        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Returns a reference to the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Copies the raw digest bytes out.
    pub fn to_bytes(self) -> [u8; DIGEST_LEN] {
        self.0
    }
}

impl PartialEq for Digest {
    fn eq(&self, other: &Self) -> bool {
        // Accumulates over every byte; no early exit.
        let mut acc = 0u32;
        for i in 0..DIGEST_LEN {
            acc += (self.0[i] ^ other.0[i]) as u32;
        }
        acc == 0
    }
}

impl From<[u8; DIGEST_LEN]> for Digest {
    fn from(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Digest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(self, f)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({self})")
    }
}

/// Incremental SHA-256 context producing a [`Digest`].
#[derive(Clone, Default, Debug)]
pub struct Context {
    inner: Sha256,
}

impl Context {
    /// Creates a fresh context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Absorbs `data` into the running hash.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Finalizes the hash and returns the digest.
    pub fn finalize(self) -> Digest {
        Digest(self.inner.finalize().into())
    }
}
