//! Proof-of-work gate.
//!
//! After the terminal polynomial is absorbed the prover searches a nonce
//! whose domain-tagged digest over the transcript state clears the
//! configured number of leading zero bits. The predicate depends only on
//! the parameter set and the transcript state, never on proof contents.

use crate::hash::Hasher;

const POW_DOMAIN_TAG: &[u8] = b"RS-PCS-POW";

/// Digest bound to the transcript state and candidate nonce.
pub(crate) fn grinding_digest(state: &[u8; 32], nonce: u64) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(POW_DOMAIN_TAG);
    hasher.update(state);
    hasher.update(&nonce.to_le_bytes());
    hasher.finalize().into_bytes()
}

/// Checks the leading-zero-bits difficulty predicate.
pub(crate) fn meets_difficulty(digest: &[u8; 32], difficulty_bits: u8) -> bool {
    let mut remaining = difficulty_bits as u32;
    for byte in digest {
        if remaining == 0 {
            return true;
        }
        let zeros = byte.leading_zeros();
        if zeros < remaining.min(8) {
            return false;
        }
        if remaining <= 8 {
            return true;
        }
        if *byte != 0 {
            return false;
        }
        remaining -= 8;
    }
    remaining == 0
}

/// Sequentially searches nonces from zero until the predicate holds.
pub(crate) fn search_nonce(state: &[u8; 32], difficulty_bits: u8) -> Option<u64> {
    (0..=u64::MAX).find(|nonce| meets_difficulty(&grinding_digest(state, *nonce), difficulty_bits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_predicate_counts_leading_zero_bits() {
        let mut digest = [0u8; 32];
        digest[0] = 0b0000_0101;
        assert!(meets_difficulty(&digest, 0));
        assert!(meets_difficulty(&digest, 5));
        assert!(!meets_difficulty(&digest, 6));

        digest[0] = 0;
        digest[1] = 0b0100_0000;
        assert!(meets_difficulty(&digest, 9));
        assert!(!meets_difficulty(&digest, 10));
    }

    #[test]
    fn searched_nonce_satisfies_the_predicate() {
        let state = [7u8; 32];
        let nonce = search_nonce(&state, 8).expect("8 bits are cheap to grind");
        assert!(meets_difficulty(&grinding_digest(&state, nonce), 8));
        // Sequential search returns the first satisfying nonce.
        for earlier in 0..nonce {
            assert!(!meets_difficulty(&grinding_digest(&state, earlier), 8));
        }
    }
}
