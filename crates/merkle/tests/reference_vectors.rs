//! End-to-end scenarios pinned to the wire-visible digest format.
//!
//! The hex roots below are fixed for all time: any change to the node
//! tags, padding, level shaping, or tree-buffer layout shows up here as a
//! mismatch against a previously published root.

use blob_merkle::{
    create, tree_length, verify, Digest, TreeBuilder, TreeError, DIGEST_LEN, NODE_SIZE,
};

const NODE: usize = NODE_SIZE as usize;

/// Sizes mirror the shape-sensitive cases: one node of digests holds 256
/// entries, so `LARGE` forces a second tree level and `UNALIGNED` adds a
/// partial data node on top of that.
const SMALL: usize = 8 * NODE;
const LARGE: usize = 257 * NODE;
const UNALIGNED: usize = LARGE + NODE / 2;

const NO_DATA_ROOT: &str = "15ec7bf0b50732b49f8228e07d24365338f9e3ab994b00af08e5a3bffe55fd8b";
const ONE_NODE_ROOT: &str = "68d131bc271f9c192d4f6dcd8fe61bef90004856da19d0f2f514a7f4098b0737";
const SMALL_ROOT: &str = "f75f59a944d2433bc6830ec243bfefa457704d2aed12f30539cd4f18bf1d62cf";
const LARGE_ROOT: &str = "7d75dfb18bfd48e03b5be4e8e9aeea2f89880cb81c1551df855e0d0a0cc59a67";
const UNALIGNED_ROOT: &str = "7577266aa98ce587922fdc668c186e27f3c742fb1b732737153b70ae46973e43";

fn expect(hex: &str) -> Digest {
    hex.parse().unwrap()
}

fn build(data: &[u8]) -> (Digest, Vec<u8>) {
    let mut tree = vec![0u8; tree_length(data.len() as u64) as usize];
    let root = create(data, &mut tree).unwrap();
    (root, tree)
}

#[test]
fn published_roots_are_reproduced() {
    for (len, hex) in [
        (0usize, NO_DATA_ROOT),
        (NODE, ONE_NODE_ROOT),
        (SMALL, SMALL_ROOT),
        (LARGE, LARGE_ROOT),
        (UNALIGNED, UNALIGNED_ROOT),
    ] {
        let (root, _) = build(&vec![0xff; len]);
        assert_eq!(root, expect(hex), "root for {len} bytes");
    }
}

#[test]
fn supplementary_roots_are_reproduced() {
    let cases: [(Vec<u8>, &str); 4] = [
        (
            vec![0xff; 1],
            "0967e0f62a104d1595610d272dfab3d2fa2fe07be0eebce13ef5d79db142610e",
        ),
        (
            vec![0x00; 100],
            "59414d953e5af96222b7f25cd96daadac1bfdff1ee2b72bdc968093010ca705f",
        ),
        (
            vec![0xff; NODE + 1],
            "374781f7d770b6ee9c1a63e186d2d0ccdad10d6aef4fd027e82b1be5b70a2a0c",
        ),
        (
            vec![0xff; 2 * NODE],
            "f53527f507a5c019a77578345d41220860fa9facda0167007f65b3705bd2e0cd",
        ),
    ];
    for (data, hex) in cases {
        let len = data.len();
        let (root, _) = build(&data);
        assert_eq!(root, expect(hex), "root for {len} bytes");
    }
}

// E1: the empty blob has a distinguished root and verifies with no
// buffers at all.
#[test]
fn empty_blob() {
    let root = create(&[], &mut []).unwrap();
    assert_eq!(root, expect(NO_DATA_ROOT));
    verify(&[], &[], 0, 0, &root).unwrap();
}

// E2: a single node needs no tree buffer for either direction.
#[test]
fn one_node_without_tree() {
    let data = vec![0xff; NODE];
    let root = create(&data, &mut []).unwrap();
    assert_eq!(root, expect(ONE_NODE_ROOT));
    verify(&data, &[], 0, NODE_SIZE, &root).unwrap();
}

// E3: byte-by-byte streaming, node-by-node verification, and tampering
// inside versus outside the requested range.
#[test]
fn small_blob_streaming_and_tampering() {
    let mut data = vec![0xff; SMALL];
    let mut tree = vec![0u8; tree_length(SMALL as u64) as usize];

    let mut builder = TreeBuilder::new(SMALL as u64, tree.len() as u64).unwrap();
    for i in 0..data.len() {
        builder.update(&data[i..i + 1], &mut tree).unwrap();
    }
    let root = builder.finalize(&mut tree).unwrap();
    assert_eq!(root, expect(SMALL_ROOT));

    for offset in (0..SMALL).step_by(NODE) {
        verify(&data, &tree, offset as u64, NODE_SIZE, &root).unwrap();
    }

    let range_start = 6 * NODE_SIZE;
    data[0] ^= 1;
    verify(&data, &tree, range_start, 2 * NODE_SIZE, &root).unwrap();
    data[0] ^= 1;

    data[range_start as usize] ^= 1;
    assert_eq!(
        verify(&data, &tree, range_start, 2 * NODE_SIZE, &root).unwrap_err(),
        TreeError::DataIntegrity
    );
}

// E4: a flipped stored digest is caught when its node is in range and
// ignored when the range is elsewhere.
#[test]
fn large_blob_tree_tampering() {
    let data = vec![0xff; LARGE];
    let (root, mut tree) = build(&data);
    assert_eq!(root, expect(LARGE_ROOT));

    let offset = LARGE as u64 - 3 * NODE_SIZE;
    let digest_at = (offset / NODE_SIZE) as usize * DIGEST_LEN;
    tree[digest_at] ^= 1;

    assert_eq!(
        verify(&data, &tree, offset, 2 * NODE_SIZE, &root).unwrap_err(),
        TreeError::DataIntegrity
    );
    verify(&data, &tree, 256 * NODE_SIZE, NODE_SIZE, &root).unwrap();
}

// E5: an unaligned blob round-trips, and trailing spare tree bytes are
// ignored.
#[test]
fn unaligned_blob_with_spare_tree_capacity() {
    let data = vec![0xff; UNALIGNED];
    let (root, mut tree) = build(&data);
    assert_eq!(root, expect(UNALIGNED_ROOT));

    tree.push(0);
    verify(&data, &tree, 0, UNALIGNED as u64, &root).unwrap();

    let offset = UNALIGNED as u64 - 3 * NODE_SIZE;
    verify(&data, &tree, offset, UNALIGNED as u64 - offset, &root).unwrap();
}

// E6: a tree buffer one byte short is rejected at init.
#[test]
fn short_tree_rejected_at_init() {
    let need = tree_length(LARGE as u64);
    assert_eq!(
        TreeBuilder::new(LARGE as u64, need - 1).unwrap_err(),
        TreeError::BufferTooSmall
    );
}

#[test]
fn flipped_root_is_caught() {
    let data = vec![0xff; SMALL];
    let (root, tree) = build(&data);
    let mut bad = root.to_bytes();
    bad[0] ^= 1;
    assert_eq!(
        verify(&data, &tree, 0, SMALL as u64, &Digest::from(bad)).unwrap_err(),
        TreeError::DataIntegrity
    );
}

#[test]
fn small_tree_region_is_the_top_level() {
    // For SMALL the whole tree is one node of digests, and its first
    // entry is the digest of a full 0xff node at offset zero, which is
    // also the root of a one-node blob.
    let data = vec![0xff; SMALL];
    let (_, tree) = build(&data);
    assert_eq!(tree.len(), NODE);
    assert_eq!(tree[..DIGEST_LEN], expect(ONE_NODE_ROOT).to_bytes()[..]);
}
