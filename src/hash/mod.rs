//! Deterministic hashing backends for the commitment layer.
//!
//! Two byte-oriented hash families are supported:
//!
//! * [`deterministic`] – Blake2s-256 helpers, the default family for
//!   transcripts and Merkle commitments. Includes the counter-chained
//!   pseudo-XOF used for challenge expansion.
//! * [`blake3`] – native BLAKE3, selectable through the parameter set for
//!   Merkle commitments.
//!
//! Prover and verifier must agree on the family through the shared parameter
//! set; every digest in this crate is 32 bytes regardless of family.

pub mod blake3;
pub mod deterministic;

pub use blake3::{blake3_hash, Blake3Hasher};
pub use deterministic::{hash, Blake2sXof, Hash, Hasher, HexOutput};
