//! Level arithmetic for sizing the digest tree.
//!
//! A level of `len` bytes hashes into one digest per node, so the level
//! above it holds `ceil(len / NODE_SIZE) * DIGEST_LEN` bytes, stored
//! node-aligned in the tree buffer. These functions walk that ascent.

use crate::{DIGESTS_PER_NODE, NODE_SIZE};

/// Rounds `len` up to the next multiple of `align`, saturating at
/// `u64::MAX` instead of wrapping.
pub(crate) fn round_up(len: u64, align: u64) -> u64 {
    len.div_ceil(align).saturating_mul(align)
}

/// Byte length of the digests emitted by a level of `len` bytes.
///
/// Zero when the level fits in a single node: such a level is the top of
/// the tree and its digest is the root, which is not stored.
pub(crate) fn next_len(len: u64) -> u64 {
    if len > NODE_SIZE {
        round_up(len, NODE_SIZE) / DIGESTS_PER_NODE
    } else {
        0
    }
}

/// Node-aligned byte length of the level above a level of `len` bytes.
pub(crate) fn next_aligned(len: u64) -> u64 {
    round_up(next_len(len), NODE_SIZE)
}

/// Returns the number of tree-buffer bytes needed to commit to `data_len`
/// bytes of data.
///
/// This is the sum of every level's node-aligned digest region, excluding
/// the root. Zero when the data fits in a single node.
pub fn tree_length(data_len: u64) -> u64 {
    let mut total: u64 = 0;
    let mut len = data_len;
    loop {
        let next = next_aligned(len);
        if next == 0 {
            return total;
        }
        total = total.saturating_add(next);
        len = next;
    }
}
