use core::fmt;

use blake2::{Blake2s256, Digest};

/// Internal deterministic hash value produced by the canonical helper.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Hash {
    bytes: [u8; 32],
}

impl Hash {
    /// Constructs a hash value from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Returns the canonical byte representation of the digest.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Consumes the hash and returns the underlying byte array.
    pub const fn into_bytes(self) -> [u8; 32] {
        self.bytes
    }

    /// Returns a helper that formats the digest as lowercase hexadecimal.
    pub fn to_hex(&self) -> HexOutput {
        HexOutput(self.bytes)
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Hash> for [u8; 32] {
    fn from(hash: Hash) -> Self {
        hash.into_bytes()
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash(0x{})", self.to_hex())
    }
}

/// Hexadecimal representation of a deterministic digest.
#[derive(Clone, Copy)]
pub struct HexOutput([u8; 32]);

impl fmt::Display for HexOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0.iter() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Debug for HexOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Deterministic streaming helper over Blake2s-256.
#[derive(Clone)]
pub struct Hasher {
    state: Blake2s256,
}

impl Hasher {
    /// Creates a new deterministic hasher instance.
    pub fn new() -> Self {
        Self {
            state: Blake2s256::new(),
        }
    }

    /// Absorbs additional bytes into the hasher state.
    pub fn update(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.state, bytes);
    }

    /// Finalises the hasher and returns a 32-byte digest.
    pub fn finalize(self) -> Hash {
        Hash::from_bytes(self.state.finalize().into())
    }
}

impl Default for Hasher {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes a deterministic 32-byte hash of the provided payload.
pub fn hash(input: &[u8]) -> Hash {
    let mut hasher = Hasher::new();
    hasher.update(input);
    hasher.finalize()
}

/// Blake2s-based extendable output reader.
///
/// Blake2s has no native XOF mode; the stream is the chain
/// `state_{i+1} = Blake2s(state_i || counter_i)` with each block emitted in
/// order, which keeps challenge expansion within a single hash family.
#[derive(Debug, Clone)]
pub struct Blake2sXof {
    state: [u8; 32],
    counter: u64,
}

impl Blake2sXof {
    /// Creates a new XOF instance from an arbitrary seed.
    pub fn new(seed: &[u8]) -> Self {
        let mut hasher = Blake2s256::new();
        Digest::update(&mut hasher, seed);
        Digest::update(&mut hasher, b"/XOF");
        Self {
            state: hasher.finalize().into(),
            counter: 0,
        }
    }

    /// Creates a new XOF starting from an existing 32-byte hash state.
    pub fn from_state(state: [u8; 32]) -> Self {
        Self { state, counter: 0 }
    }

    /// Returns the next 64 bits from the deterministic stream.
    pub fn next_u64(&mut self) -> u64 {
        let block = self.squeeze_block();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&block[..8]);
        u64::from_le_bytes(bytes)
    }

    /// Fills the provided buffer with bytes from the stream.
    pub fn squeeze(&mut self, output: &mut [u8]) {
        let mut remaining = output;
        while !remaining.is_empty() {
            let block = self.squeeze_block();
            let take = remaining.len().min(block.len());
            let (dst, rest) = remaining.split_at_mut(take);
            dst.copy_from_slice(&block[..take]);
            remaining = rest;
        }
    }

    fn squeeze_block(&mut self) -> [u8; 32] {
        let mut hasher = Blake2s256::new();
        Digest::update(&mut hasher, self.state);
        Digest::update(&mut hasher, self.counter.to_le_bytes());
        let block: [u8; 32] = hasher.finalize().into();
        self.state = block;
        self.counter = self.counter.wrapping_add(1);
        block
    }
}
