use core::marker::PhantomData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::params::FriParams;
#[cfg(feature = "parallel")]
use crate::utils::parallel::parallelism_enabled;

use super::traits::MerkleHasher;
use super::types::{Digest, Leaf, MerkleError, MerklePath};

/// Binary Merkle tree over encoded leaves.
///
/// All levels are retained so single-leaf openings are O(depth) lookups;
/// FRI opens every committed layer once per query, which makes commit-once /
/// open-many the dominant access pattern.
#[derive(Debug, Clone)]
pub struct MerkleTree<H: MerkleHasher> {
    /// `levels[0]` holds leaf digests; the last level is the root alone.
    levels: Vec<Vec<Digest>>,
    leaf_count: usize,
    domain_sep: u64,
    _hasher: PhantomData<H>,
}

impl<H: MerkleHasher> MerkleTree<H> {
    /// Commits to the ordered leaf set.
    pub fn commit(params: &FriParams, leaves: &[Leaf]) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::EmptyLeaves);
        }
        let expected = params.hash().family();
        if H::family() != expected {
            return Err(MerkleError::HashFamilyMismatch {
                expected,
                got: H::family(),
            });
        }
        let domain_sep = params.merkle().domain_sep;
        let leaf_level = hash_leaves::<H>(domain_sep, leaves);

        let mut levels = vec![leaf_level];
        while levels.last().map_or(0, Vec::len) > 1 {
            let below = levels.last().expect("levels is never empty");
            let mut above = Vec::with_capacity((below.len() + 1) / 2);
            for pair in below.chunks(2) {
                let right = pair
                    .get(1)
                    .copied()
                    .unwrap_or_else(|| H::padding_digest(domain_sep));
                above.push(H::hash_nodes(domain_sep, &pair[0], &right));
            }
            levels.push(above);
        }

        Ok(Self {
            levels,
            leaf_count: leaves.len(),
            domain_sep,
            _hasher: PhantomData,
        })
    }

    /// Returns the committed root digest.
    pub fn root(&self) -> Digest {
        self.levels.last().expect("levels is never empty")[0]
    }

    /// Number of committed leaves.
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Produces the authentication path for a single leaf.
    pub fn open(&self, index: usize) -> Result<MerklePath, MerkleError> {
        if index >= self.leaf_count {
            return Err(MerkleError::IndexOutOfRange {
                index,
                leaf_count: self.leaf_count,
            });
        }
        let mut siblings = Vec::with_capacity(self.levels.len() - 1);
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling_position = position ^ 1;
            let sibling = level
                .get(sibling_position)
                .copied()
                .unwrap_or_else(|| H::padding_digest(self.domain_sep));
            siblings.push(sibling);
            position /= 2;
        }
        Ok(MerklePath {
            index: index as u32,
            siblings,
        })
    }
}

fn hash_leaves<H: MerkleHasher>(domain_sep: u64, leaves: &[Leaf]) -> Vec<Digest> {
    #[cfg(feature = "parallel")]
    if parallelism_enabled() && leaves.len() > 1 {
        return leaves
            .par_iter()
            .map(|leaf| H::hash_leaf(domain_sep, leaf.as_bytes()))
            .collect();
    }
    leaves
        .iter()
        .map(|leaf| H::hash_leaf(domain_sep, leaf.as_bytes()))
        .collect()
}

/// Expected path length for a tree with `leaf_count` leaves.
pub(crate) fn tree_depth(leaf_count: usize) -> usize {
    let mut width = leaf_count;
    let mut depth = 0;
    while width > 1 {
        width = (width + 1) / 2;
        depth += 1;
    }
    depth
}

/// Recomputes the root implied by `leaf` and `path` and compares it to `root`.
///
/// Never panics on attacker-controlled input: any structural mismatch (wrong
/// index, wrong depth for the claimed leaf count) yields `false`.
pub fn verify_path<H: MerkleHasher>(
    params: &FriParams,
    root: &Digest,
    leaf: &Leaf,
    index: usize,
    leaf_count: usize,
    path: &MerklePath,
) -> bool {
    if leaf_count == 0 || index >= leaf_count {
        return false;
    }
    if path.index as usize != index {
        return false;
    }
    if path.siblings.len() != tree_depth(leaf_count) {
        return false;
    }
    let domain_sep = params.merkle().domain_sep;
    let mut node = H::hash_leaf(domain_sep, leaf.as_bytes());
    let mut position = index;
    for sibling in &path.siblings {
        node = if position % 2 == 0 {
            H::hash_nodes(domain_sep, &node, sibling)
        } else {
            H::hash_nodes(domain_sep, sibling, &node)
        };
        position /= 2;
    }
    node == *root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElement;
    use crate::merkle::traits::Blake2sMerkleHasher;
    use crate::merkle::types::encode_leaf;
    use crate::params::FriParamsBuilder;

    fn sample_leaves(params: &FriParams, count: usize) -> Vec<Leaf> {
        (0..count)
            .map(|i| {
                let values = [
                    FieldElement::from(i as u64),
                    FieldElement::from((i * 7 + 1) as u64),
                ];
                encode_leaf(params, &values)
            })
            .collect()
    }

    #[test]
    fn every_leaf_opens_and_verifies() {
        let params = FriParamsBuilder::new().build().unwrap();
        let leaves = sample_leaves(&params, 16);
        let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
        let root = tree.root();
        for (index, leaf) in leaves.iter().enumerate() {
            let path = tree.open(index).unwrap();
            assert!(verify_path::<Blake2sMerkleHasher>(
                &params, &root, leaf, index, 16, &path
            ));
        }
    }

    #[test]
    fn ragged_leaf_counts_commit_and_verify() {
        let params = FriParamsBuilder::new().build().unwrap();
        for count in [1usize, 3, 5, 11] {
            let leaves = sample_leaves(&params, count);
            let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
            let root = tree.root();
            let path = tree.open(count - 1).unwrap();
            assert!(verify_path::<Blake2sMerkleHasher>(
                &params,
                &root,
                &leaves[count - 1],
                count - 1,
                count,
                &path
            ));
        }
    }

    #[test]
    fn empty_commit_is_rejected() {
        let params = FriParamsBuilder::new().build().unwrap();
        let err = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &[]).unwrap_err();
        assert!(matches!(err, MerkleError::EmptyLeaves));
    }

    #[test]
    fn out_of_range_open_is_rejected() {
        let params = FriParamsBuilder::new().build().unwrap();
        let leaves = sample_leaves(&params, 4);
        let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
        let err = tree.open(4).unwrap_err();
        assert!(matches!(err, MerkleError::IndexOutOfRange { index: 4, .. }));
    }

    #[test]
    fn tampered_path_fails_verification() {
        let params = FriParamsBuilder::new().build().unwrap();
        let leaves = sample_leaves(&params, 8);
        let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
        let root = tree.root();
        let mut path = tree.open(3).unwrap();
        path.siblings[0][0] ^= 0x01;
        assert!(!verify_path::<Blake2sMerkleHasher>(
            &params, &root, &leaves[3], 3, 8, &path
        ));
    }

    #[test]
    fn wrong_index_fails_verification() {
        let params = FriParamsBuilder::new().build().unwrap();
        let leaves = sample_leaves(&params, 8);
        let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
        let root = tree.root();
        let path = tree.open(3).unwrap();
        assert!(!verify_path::<Blake2sMerkleHasher>(
            &params, &root, &leaves[3], 2, 8, &path
        ));
    }
}
