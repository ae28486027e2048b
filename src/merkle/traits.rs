use crate::hash::{Blake3Hasher, Hasher};
use crate::params::HashFamily;

use super::types::{Digest, LEAF_DOMAIN_TAG, NODE_DOMAIN_TAG, PADDING_DOMAIN_TAG};

/// Hash abstraction used by the Merkle commitment layer.
///
/// Leaf, node and padding hashes are domain separated by a one-byte tag plus
/// the parameter set's `domain_sep` value, so digests from different trees or
/// tree levels never collide structurally.
pub trait MerkleHasher {
    /// Hashes an encoded leaf payload.
    fn hash_leaf(domain_sep: u64, encoded_leaf: &[u8]) -> Digest;

    /// Hashes an ordered pair of child digests.
    fn hash_nodes(domain_sep: u64, left: &Digest, right: &Digest) -> Digest;

    /// Digest standing in for the missing sibling on ragged levels.
    fn padding_digest(domain_sep: u64) -> Digest;

    /// Runtime identifier checked against the parameter set.
    fn family() -> HashFamily;
}

/// Blake2s-backed Merkle hasher, the default commitment backend.
#[derive(Debug)]
pub struct Blake2sMerkleHasher;

impl MerkleHasher for Blake2sMerkleHasher {
    fn hash_leaf(domain_sep: u64, encoded_leaf: &[u8]) -> Digest {
        let mut hasher = Hasher::new();
        hasher.update(&[LEAF_DOMAIN_TAG]);
        hasher.update(&domain_sep.to_le_bytes());
        hasher.update(encoded_leaf);
        hasher.finalize().into_bytes()
    }

    fn hash_nodes(domain_sep: u64, left: &Digest, right: &Digest) -> Digest {
        let mut hasher = Hasher::new();
        hasher.update(&[NODE_DOMAIN_TAG]);
        hasher.update(&domain_sep.to_le_bytes());
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into_bytes()
    }

    fn padding_digest(domain_sep: u64) -> Digest {
        let mut hasher = Hasher::new();
        hasher.update(&[PADDING_DOMAIN_TAG]);
        hasher.update(&domain_sep.to_le_bytes());
        hasher.finalize().into_bytes()
    }

    fn family() -> HashFamily {
        HashFamily::Blake2s
    }
}

/// BLAKE3-backed Merkle hasher.
#[derive(Debug)]
pub struct Blake3MerkleHasher;

impl MerkleHasher for Blake3MerkleHasher {
    fn hash_leaf(domain_sep: u64, encoded_leaf: &[u8]) -> Digest {
        let mut hasher = Blake3Hasher::new();
        hasher.update(&[LEAF_DOMAIN_TAG]);
        hasher.update(&domain_sep.to_le_bytes());
        hasher.update(encoded_leaf);
        hasher.finalize().into_bytes()
    }

    fn hash_nodes(domain_sep: u64, left: &Digest, right: &Digest) -> Digest {
        let mut hasher = Blake3Hasher::new();
        hasher.update(&[NODE_DOMAIN_TAG]);
        hasher.update(&domain_sep.to_le_bytes());
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into_bytes()
    }

    fn padding_digest(domain_sep: u64) -> Digest {
        let mut hasher = Blake3Hasher::new();
        hasher.update(&[PADDING_DOMAIN_TAG]);
        hasher.update(&domain_sep.to_le_bytes());
        hasher.finalize().into_bytes()
    }

    fn family() -> HashFamily {
        HashFamily::Blake3
    }
}
