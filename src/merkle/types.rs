use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::params::{Endianness, FriParams, HashFamily};

/// Domain tag prepended when hashing leaf payloads.
pub const LEAF_DOMAIN_TAG: u8 = 0x00;
/// Domain tag prepended when hashing internal nodes.
pub const NODE_DOMAIN_TAG: u8 = 0x01;
/// Domain tag used for padding digests on ragged levels.
pub const PADDING_DOMAIN_TAG: u8 = 0x02;

/// Raw digest type used by the commitment layer.
pub type Digest = [u8; 32];

/// Encoded leaf payload committed by a Merkle tree.
///
/// Payloads carry a `u32` little-endian byte-length prefix so that leaves of
/// different widths can never collide under the leaf hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf(Vec<u8>);

impl Leaf {
    /// Wraps already-encoded leaf bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Returns the encoded bytes including the length prefix.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Encodes a chunk of field elements into a committed leaf.
pub fn encode_leaf(params: &FriParams, values: &[FieldElement]) -> Leaf {
    let payload_len = values.len() * 8;
    let mut bytes = Vec::with_capacity(4 + payload_len);
    bytes.extend_from_slice(&(payload_len as u32).to_le_bytes());
    for value in values {
        match params.merkle().leaf_encoding {
            Endianness::Little => bytes.extend_from_slice(&value.as_u64().to_le_bytes()),
            Endianness::Big => bytes.extend_from_slice(&value.as_u64().to_be_bytes()),
        }
    }
    Leaf(bytes)
}

/// Authentication path for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerklePath {
    /// Index of the opened leaf.
    pub index: u32,
    /// Sibling digests from the leaf level up to the root's children.
    pub siblings: Vec<Digest>,
}

/// Errors surfaced by Merkle commitment operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MerkleError {
    /// A tree cannot commit to zero leaves.
    EmptyLeaves,
    /// Requested leaf index is outside the committed range.
    IndexOutOfRange { index: usize, leaf_count: usize },
    /// The hasher's family does not match the parameter set.
    HashFamilyMismatch {
        expected: HashFamily,
        got: HashFamily,
    },
}

impl fmt::Display for MerkleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MerkleError::EmptyLeaves => write!(f, "cannot commit to an empty leaf set"),
            MerkleError::IndexOutOfRange { index, leaf_count } => {
                write!(f, "leaf index {index} out of range for {leaf_count} leaves")
            }
            MerkleError::HashFamilyMismatch { expected, got } => write!(
                f,
                "hash family mismatch: params expect {expected:?}, hasher is {got:?}"
            ),
        }
    }
}

impl std::error::Error for MerkleError {}
