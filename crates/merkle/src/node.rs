//! Hashing discipline for a single tree node.
//!
//! Every node digest commits to its position and size as well as its
//! payload:
//!
//! ```text
//! digest = Hash(le64(offset | level) || le32(length) || payload || padding)
//! ```
//!
//! where `offset` is the node-aligned byte offset within the level, `level`
//! is the node's height (data nodes are level 0), `length` is the payload
//! size capped at [`NODE_SIZE`], and `padding` is zeros up to the node
//! boundary. The offset's low bits are zero by alignment, so OR-ing in the
//! level is lossless.

use blob_digest::{Context, Digest};

use crate::NODE_SIZE;

/// A node-sized run of zeros, used for padding and for flushing the tail
/// of a level at finalisation.
pub(crate) const ZEROS: [u8; NODE_SIZE as usize] = [0; NODE_SIZE as usize];

/// Digest of one node, computed incrementally over a
/// [`blob_digest::Context`].
#[derive(Debug)]
pub(crate) struct NodeHasher {
    inner: Context,
}

impl NodeHasher {
    /// Primes a hasher with the node's locality and length tags.
    pub(crate) fn new(locality: u64, length: u64) -> Self {
        let mut inner = Context::new();
        inner.update(&locality.to_le_bytes());
        inner.update(&(length.min(NODE_SIZE) as u32).to_le_bytes());
        Self { inner }
    }

    /// Absorbs bytes from `data`, stopping at the next node boundary as
    /// determined from `offset`. Returns the number of bytes consumed.
    pub(crate) fn update(&mut self, data: &[u8], offset: u64) -> usize {
        let take = (data.len() as u64).min(NODE_SIZE - offset % NODE_SIZE) as usize;
        self.inner.update(&data[..take]);
        take
    }

    /// Pads the absorbed payload with zeros up to the node boundary and
    /// returns the digest. A node ending exactly on a boundary gets no
    /// padding.
    pub(crate) fn finalize(mut self, offset: u64) -> Digest {
        let tail = (offset % NODE_SIZE) as usize;
        if tail != 0 {
            self.inner.update(&ZEROS[..NODE_SIZE as usize - tail]);
        }
        self.inner.finalize()
    }
}
