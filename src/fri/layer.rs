use crate::field::FieldElement;
use crate::merkle::{encode_leaf, Digest, MerkleHasher, MerklePath, MerkleTree};
use crate::params::FriParams;

use super::types::FriError;

/// A committed folding round: the evaluation vector plus its Merkle tree.
///
/// Leaf `i` transposes the fiber `[v[i], v[i + m/k], …, v[i + (k-1)m/k]]`
/// so a query opens all of its folding partners with one path.
pub(crate) struct FriLayer<H: MerkleHasher> {
    evaluations: Vec<FieldElement>,
    fold_width: usize,
    tree: MerkleTree<H>,
}

impl<H: MerkleHasher> FriLayer<H> {
    /// Commits to `evaluations` with fiber-transposed leaf chunking.
    pub(crate) fn commit(
        params: &FriParams,
        evaluations: Vec<FieldElement>,
        fold_width: usize,
    ) -> Result<Self, FriError> {
        let leaf_count = evaluations.len() / fold_width;
        let leaves: Vec<_> = (0..leaf_count)
            .map(|i| {
                let chunk: Vec<_> = (0..fold_width)
                    .map(|j| evaluations[i + j * leaf_count])
                    .collect();
                encode_leaf(params, &chunk)
            })
            .collect();
        let tree = MerkleTree::<H>::commit(params, &leaves)?;
        Ok(Self {
            evaluations,
            fold_width,
            tree,
        })
    }

    pub(crate) fn root(&self) -> Digest {
        self.tree.root()
    }

    pub(crate) fn evaluations(&self) -> &[FieldElement] {
        &self.evaluations
    }

    pub(crate) fn leaf_count(&self) -> usize {
        self.evaluations.len() / self.fold_width
    }

    /// Returns the transposed fiber committed in leaf `index`.
    pub(crate) fn leaf_values(&self, index: usize) -> Vec<FieldElement> {
        let leaf_count = self.leaf_count();
        (0..self.fold_width)
            .map(|j| self.evaluations[index + j * leaf_count])
            .collect()
    }

    /// Opens leaf `index`, returning its values and authentication path.
    pub(crate) fn open(&self, index: usize) -> Result<(Vec<FieldElement>, MerklePath), FriError> {
        let path = self.tree.open(index)?;
        Ok((self.leaf_values(index), path))
    }
}
