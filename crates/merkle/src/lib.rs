//! Merkle-tree integrity engine for block-addressable blobs.
//!
//! A blob is split into fixed-size nodes and hashed level by level until a
//! single 32-byte root remains. Each node digest commits to its payload,
//! its position, and its level, so the root commits to both the content
//! and the length of the blob. The intermediate digests live in a
//! caller-owned tree buffer, which later lets [`verify`] authenticate any
//! sub-range of the blob against the root by rehashing only the touched
//! nodes and their ancestors.
//!
//! Modules:
//! - `error`: the [`TreeError`] taxonomy
//! - `geometry`: tree-buffer sizing via [`tree_length`]
//! - `tree`: streaming [`TreeBuilder`] and one-shot [`create`]
//! - `verify`: aligned sub-range verification
//!
//! ```
//! use blob_merkle::{create, tree_length, verify};
//!
//! let data = vec![0xff; 65536];
//! let mut tree = vec![0u8; tree_length(data.len() as u64) as usize];
//! let root = create(&data, &mut tree)?;
//! verify(&data, &tree, 8192, 16384, &root)?;
//! # Ok::<(), blob_merkle::TreeError>(())
//! ```

pub mod error;
pub mod geometry;
mod node;
pub mod tree;
pub mod verify;

pub use blob_digest::{Digest, DIGEST_LEN};
pub use error::TreeError;
pub use geometry::tree_length;
pub use tree::{create, TreeBuilder};
pub use verify::verify;

/// Size of a node in bytes, at every level of the tree.
pub const NODE_SIZE: u64 = 8192;

/// Number of digests that fit in one node. A node-aligned length at one
/// level, divided by this, is the digest-byte length of the level above.
pub const DIGESTS_PER_NODE: u64 = NODE_SIZE / DIGEST_LEN as u64;

/// Largest data length the builder accepts; declared lengths above this
/// would overflow the per-node length arithmetic.
pub const MAX_DATA_LEN: u64 = 1 << 63;
