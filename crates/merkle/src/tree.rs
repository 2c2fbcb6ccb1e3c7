//! Streaming construction of the digest tree.

use blob_digest::{Digest, DIGEST_LEN};

use crate::error::TreeError;
use crate::geometry::{next_aligned, tree_length};
use crate::node::{NodeHasher, ZEROS};
use crate::{DIGESTS_PER_NODE, MAX_DATA_LEN, NODE_SIZE};

/// Progress of one tree level while the blob is being fed.
#[derive(Debug)]
struct Level {
    /// Height in the tree; level 0 hashes the caller's data.
    height: u64,
    /// Total bytes this level covers. Level 0 covers the declared data
    /// length; every level above covers the node-aligned digest region of
    /// the level below it.
    length: u64,
    /// Bytes consumed so far, monotonic up to `length`.
    offset: u64,
    /// Byte offset in the tree buffer where this level's digests land.
    out_base: u64,
    /// Node hash in progress; present between a node's first and last byte.
    hasher: Option<NodeHasher>,
    /// Digest of the final node, kept only at the top level as the root.
    root: Option<Digest>,
}

/// Streaming builder for a blob's digest tree.
///
/// The caller declares the total data length up front, feeds the bytes in
/// chunks of any size with [`update`](Self::update), and collects the root
/// with [`finalize`](Self::finalize). The root depends only on the data
/// length and content, never on the chunking.
///
/// The tree buffer is caller-owned and must hold at least
/// [`tree_length`]`(data_len)` bytes; it is passed to every call so the
/// builder never holds a borrow across calls.
#[derive(Debug)]
pub struct TreeBuilder {
    levels: Vec<Level>,
    tree_len: u64,
}

impl TreeBuilder {
    /// Starts building a tree over `data_len` bytes, to be stored in a
    /// tree buffer of `tree_cap` bytes.
    ///
    /// Fails with [`TreeError::InvalidArgs`] when `data_len` exceeds
    /// [`MAX_DATA_LEN`] and [`TreeError::BufferTooSmall`] when `tree_cap`
    /// cannot hold every intermediate digest.
    pub fn new(data_len: u64, tree_cap: u64) -> Result<Self, TreeError> {
        if data_len > MAX_DATA_LEN {
            return Err(TreeError::InvalidArgs);
        }
        let tree_len = tree_length(data_len);
        if tree_cap < tree_len {
            return Err(TreeError::BufferTooSmall);
        }
        // One entry per level, stopping at the first level that fits in a
        // single node: that level's digest is the root.
        let mut levels = Vec::new();
        let mut height = 0;
        let mut length = data_len;
        let mut out_base = 0;
        loop {
            levels.push(Level {
                height,
                length,
                offset: 0,
                out_base,
                hasher: None,
                root: None,
            });
            if length <= NODE_SIZE {
                break;
            }
            let aligned = next_aligned(length);
            out_base += aligned;
            length = aligned;
            height += 1;
        }
        Ok(Self { levels, tree_len })
    }

    /// Feeds the next run of data bytes, writing any completed digests
    /// into `tree`.
    ///
    /// Fails with [`TreeError::OutOfRange`] when the feed would pass the
    /// declared length and [`TreeError::BufferTooSmall`] when `tree` is
    /// shorter than promised at construction. An empty `data` is a no-op.
    pub fn update(&mut self, data: &[u8], tree: &mut [u8]) -> Result<(), TreeError> {
        if data.is_empty() {
            return Ok(());
        }
        let level0 = &self.levels[0];
        match level0.offset.checked_add(data.len() as u64) {
            Some(end) if end <= level0.length => {}
            _ => return Err(TreeError::OutOfRange),
        }
        if (tree.len() as u64) < self.tree_len {
            return Err(TreeError::BufferTooSmall);
        }
        self.update_level(0, data, tree);
        Ok(())
    }

    /// Completes the tree and returns the root digest, consuming the
    /// builder.
    ///
    /// Fails with [`TreeError::BadState`] when fewer than `data_len` bytes
    /// were fed.
    pub fn finalize(mut self, tree: &mut [u8]) -> Result<Digest, TreeError> {
        if self.levels[0].offset != self.levels[0].length {
            return Err(TreeError::BadState);
        }
        if (tree.len() as u64) < self.tree_len {
            return Err(TreeError::BufferTooSmall);
        }
        // The empty blob hashes as a single all-padding node.
        if self.levels[0].length == 0 {
            return Ok(NodeHasher::new(0, 0).finalize(0));
        }
        // Each level's digest region is node-aligned, so after the level
        // below finishes there may be a zero tail left to absorb before the
        // level's last node closes. Flushing bottom-up lets each close
        // cascade upward before the next level's tail is measured.
        for idx in 0..self.levels.len() {
            let level = &self.levels[idx];
            let remaining = level.length - level.offset;
            debug_assert!(idx == 0 || remaining < NODE_SIZE);
            if remaining > 0 {
                self.update_level(idx, &ZEROS[..remaining as usize], tree);
            }
        }
        let top = self.levels.last().expect("builder has at least one level");
        Ok(top.root.expect("top level closes during finalize"))
    }

    /// Absorbs `data` into the level at `idx`, closing nodes as their last
    /// byte arrives and cascading each emitted digest into the level above.
    ///
    /// Callers have already bounds-checked the feed and the tree buffer,
    /// so this cannot fail.
    fn update_level(&mut self, idx: usize, mut data: &[u8], tree: &mut [u8]) {
        while !data.is_empty() {
            let level = &mut self.levels[idx];
            if level.offset % NODE_SIZE == 0 {
                level.hasher = Some(NodeHasher::new(
                    level.offset | level.height,
                    level.length - level.offset,
                ));
            }
            let hasher = level.hasher.as_mut().expect("hasher primed at node start");
            let consumed = hasher.update(data, level.offset);
            level.offset += consumed as u64;
            data = &data[consumed..];
            if level.offset % NODE_SIZE != 0 && level.offset != level.length {
                // Mid-node: the input is exhausted, the hash carries over.
                return;
            }
            let digest = level
                .hasher
                .take()
                .expect("hasher present at node end")
                .finalize(level.offset);
            if level.length <= NODE_SIZE {
                // Top of the tree: the digest is the root, not stored.
                level.root = Some(digest);
                return;
            }
            let node_index = (level.offset - 1) / NODE_SIZE;
            let out = (level.out_base + node_index * DIGEST_LEN as u64) as usize;
            if node_index % DIGESTS_PER_NODE == 0 {
                // First digest of a fresh output node: zero it so the tail
                // past the last real digest is defined.
                tree[out..out + NODE_SIZE as usize].fill(0);
            }
            let bytes = digest.to_bytes();
            tree[out..out + DIGEST_LEN].copy_from_slice(&bytes);
            self.update_level(idx + 1, &bytes, tree);
        }
    }
}

/// Builds the digest tree for `data` in one shot and returns the root.
///
/// Equivalent to a [`TreeBuilder`] fed the whole blob at once; `tree` must
/// hold at least [`tree_length`]`(data.len())` bytes.
pub fn create(data: &[u8], tree: &mut [u8]) -> Result<Digest, TreeError> {
    let mut builder = TreeBuilder::new(data.len() as u64, tree.len() as u64)?;
    builder.update(data, tree)?;
    builder.finalize(tree)
}
