use serde::{Deserialize, Serialize};

use crate::field::FieldElement;
use crate::merkle::Digest;
use crate::ser::SerError;

use super::ser::{deserialize_proof, serialize_proof};

/// Opened values and sibling digests for one committed round of one query.
///
/// The leaf index is not stored; both sides derive it from the query
/// position and the folding schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriLayerOpening {
    /// Transposed fiber committed in the opened leaf.
    pub values: Vec<FieldElement>,
    /// Sibling digests from the leaf level up to the root's children.
    pub path: Vec<Digest>,
}

/// All per-round openings for a single sampled query position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriQueryProof {
    /// Sampled position in the initial evaluation domain.
    pub position: u32,
    /// One opening per committed round, in round order.
    pub layers: Vec<FriLayerOpening>,
}

/// Complete FRI low-degree proof.
///
/// | Field | Content |
/// |-------|---------|
/// | `layer_roots` | Merkle root per committed round, in round order. |
/// | `terminal_polynomial` | Coefficients of the residual polynomial, trimmed. |
/// | `queries` | λ query openings in sampling order. |
/// | `grinding_nonce` | Proof-of-work nonce when grinding is enabled. |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriProof {
    pub layer_roots: Vec<Digest>,
    pub terminal_polynomial: Vec<FieldElement>,
    pub queries: Vec<FriQueryProof>,
    pub grinding_nonce: Option<u64>,
}

impl FriProof {
    /// Encodes the proof into its canonical byte layout.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SerError> {
        serialize_proof(self)
    }

    /// Decodes a proof, enforcing exact consumption of the input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SerError> {
        deserialize_proof(bytes)
    }
}
