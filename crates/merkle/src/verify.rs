//! Bottom-up verification of aligned sub-ranges.

use blob_digest::{Digest, DIGEST_LEN};

use crate::error::TreeError;
use crate::geometry::{next_aligned, next_len, round_up, tree_length};
use crate::node::NodeHasher;
use crate::{DIGESTS_PER_NODE, NODE_SIZE};

/// Checks `length` bytes of `data` starting at `offset` against the tree
/// and the trusted `root`.
///
/// The range is rounded outward to node boundaries, so bytes sharing a
/// node with the requested range are authenticated along with it; callers
/// needing byte precision must verify the whole containing node. At each
/// level the touched nodes are rehashed and compared with the stored
/// digests, ascending until the single top node is checked against `root`.
///
/// Fails with [`TreeError::OutOfRange`] when the range reaches past the
/// data, [`TreeError::BufferTooSmall`] when `tree` is shorter than
/// [`tree_length`]`(data.len())` (trailing extra bytes are ignored), and
/// [`TreeError::DataIntegrity`] on any digest mismatch. A zero-length
/// range hashes no data but still checks the root.
pub fn verify(
    data: &[u8],
    tree: &[u8],
    offset: u64,
    length: u64,
    root: &Digest,
) -> Result<(), TreeError> {
    let data_len = data.len() as u64;
    let end = offset.checked_add(length).ok_or(TreeError::OutOfRange)?;
    if end > data_len {
        return Err(TreeError::OutOfRange);
    }
    if (tree.len() as u64) < tree_length(data_len) {
        return Err(TreeError::BufferTooSmall);
    }

    let mut height = 0;
    // Byte length of the current level: the true data length at level 0,
    // the node-aligned region length above.
    let mut level_len = data_len;
    // Real bytes in the level above the loop's last iteration; what the
    // root node covers.
    let mut top_len = data_len;
    let mut level_data = data;
    let mut rest = tree;
    let mut start = offset;
    let mut end = end;

    while level_len > NODE_SIZE {
        // Round the range outward to node boundaries within this level.
        let aligned_start = start - start % NODE_SIZE;
        let aligned_end = if start == end {
            aligned_start
        } else {
            round_up(end, NODE_SIZE)
        };

        let region_len = next_aligned(level_len) as usize;
        let (region, upper) = rest.split_at(region_len);

        let mut pos = aligned_start;
        while pos < aligned_end {
            // The last node of a level may cover fewer than NODE_SIZE
            // bytes; the hasher pads it exactly as construction did.
            let node_end = (pos + NODE_SIZE).min(level_len);
            let mut hasher = NodeHasher::new(pos | height, level_len - pos);
            hasher.update(&level_data[pos as usize..node_end as usize], pos);
            let digest = hasher.finalize(node_end);
            let at = ((pos / NODE_SIZE) * DIGEST_LEN as u64) as usize;
            if digest.as_bytes()[..] != region[at..at + DIGEST_LEN] {
                return Err(TreeError::DataIntegrity);
            }
            pos += NODE_SIZE;
        }

        // Ascend: this level's digest region becomes the data, and the
        // aligned bounds shrink to the digests they cover so the ancestors
        // of every touched node are rechecked.
        top_len = next_len(level_len);
        level_len = region_len as u64;
        level_data = region;
        rest = upper;
        start = aligned_start / DIGESTS_PER_NODE;
        end = aligned_end / DIGESTS_PER_NODE;
        height += 1;
    }

    verify_root(level_data, top_len, level_len, height, root)
}

/// Hashes the top level as a single node and compares it with `root`.
///
/// The empty blob hashes zero nodes, every other blob exactly one.
fn verify_root(
    level_data: &[u8],
    top_len: u64,
    level_len: u64,
    height: u64,
    root: &Digest,
) -> Result<(), TreeError> {
    let length = if top_len == 0 { 0 } else { level_len };
    let mut hasher = NodeHasher::new(height, length);
    hasher.update(&level_data[..top_len as usize], 0);
    if hasher.finalize(top_len) == *root {
        Ok(())
    } else {
        Err(TreeError::DataIntegrity)
    }
}
