//! BLAKE3 hashing backend.
//!
//! The commitment layer defaults to Blake2s but parameter sets may select
//! BLAKE3 instead. Both backends expose the same digest surface so the
//! Merkle layer can stay hash-agnostic.

use super::deterministic::Hash;

/// Computes a 32-byte BLAKE3 digest of the payload.
pub fn blake3_hash(input: &[u8]) -> Hash {
    Hash::from_bytes(*blake3::hash(input).as_bytes())
}

/// Streaming BLAKE3 helper matching the Blake2s `Hasher` surface.
#[derive(Clone)]
pub struct Blake3Hasher {
    state: blake3::Hasher,
}

impl Blake3Hasher {
    pub fn new() -> Self {
        Self {
            state: blake3::Hasher::new(),
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        self.state.update(bytes);
    }

    pub fn finalize(self) -> Hash {
        Hash::from_bytes(*self.state.finalize().as_bytes())
    }
}

impl Default for Blake3Hasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streaming_matches_oneshot() {
        let payload = b"blake3 backend";
        let mut hasher = Blake3Hasher::new();
        hasher.update(payload);
        assert_eq!(hasher.finalize(), blake3_hash(payload));
    }
}
