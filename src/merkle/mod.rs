//! Merkle vector commitments used by the FRI layers.
//!
//! Trees are binary, hash-agnostic (generic over [`MerkleHasher`]) and commit
//! to length-prefixed field-element chunks. Leaf hashing parallelises behind
//! the `parallel` feature; verification is a stateless root recomputation.

mod traits;
mod tree;
mod types;

pub use traits::{Blake2sMerkleHasher, Blake3MerkleHasher, MerkleHasher};
pub use tree::{verify_path, MerkleTree};
pub use types::{encode_leaf, Digest, Leaf, MerkleError, MerklePath};
