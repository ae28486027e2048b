use serde::{Deserialize, Serialize};

/// Hash families usable for commitments.
///
/// | Variant | Digest Bits | Notes |
/// |---------|-------------|-------|
/// | `Blake2s` | 256 | Byte-oriented Blake2s with counter-chained XOF. |
/// | `Blake3` | 256 | Single-chunk BLAKE3. |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum HashFamily {
    /// Blake2s byte hash.
    #[default]
    Blake2s,
    /// BLAKE3 byte hash.
    Blake3,
}

impl HashFamily {
    pub(crate) const fn code(self) -> u8 {
        match self {
            HashFamily::Blake2s => 1,
            HashFamily::Blake3 => 2,
        }
    }

    pub(crate) const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(HashFamily::Blake2s),
            2 => Some(HashFamily::Blake3),
            _ => None,
        }
    }
}

/// Specific hash kind including the digest-size identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashKind {
    /// Blake2s configuration with a digest size identifier.
    Blake2s { digest_size: u16 },
    /// BLAKE3 configuration with a digest size identifier.
    Blake3 { digest_size: u16 },
}

impl HashKind {
    /// Returns the hash family backing this configuration.
    pub const fn family(self) -> HashFamily {
        match self {
            HashKind::Blake2s { .. } => HashFamily::Blake2s,
            HashKind::Blake3 { .. } => HashFamily::Blake3,
        }
    }

    pub(crate) const fn parameter_id(self) -> u16 {
        match self {
            HashKind::Blake2s { digest_size } | HashKind::Blake3 { digest_size } => digest_size,
        }
    }

    pub(crate) const fn from_codes(family: HashFamily, parameter: u16) -> Self {
        match family {
            HashFamily::Blake2s => HashKind::Blake2s {
                digest_size: parameter,
            },
            HashFamily::Blake3 => HashKind::Blake3 {
                digest_size: parameter,
            },
        }
    }
}

/// Fold width of a single FRI round.
///
/// Each round collapses groups of `width` coset points into one point of the
/// next layer, dividing the domain by the same factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepWidth {
    /// Classic binary even/odd fold.
    W2,
    /// Quartic fold.
    W4,
    /// Octal fold.
    W8,
    /// Hexadecimal fold.
    W16,
}

impl StepWidth {
    /// Fold factor as a `usize`.
    pub const fn as_usize(self) -> usize {
        match self {
            StepWidth::W2 => 2,
            StepWidth::W4 => 4,
            StepWidth::W8 => 8,
            StepWidth::W16 => 16,
        }
    }

    /// `log2` of the fold factor.
    pub const fn log2(self) -> u32 {
        match self {
            StepWidth::W2 => 1,
            StepWidth::W4 => 2,
            StepWidth::W8 => 3,
            StepWidth::W16 => 4,
        }
    }

    pub(crate) const fn code(self) -> u8 {
        self.as_usize() as u8
    }

    pub(crate) const fn from_code(code: u8) -> Option<Self> {
        match code {
            2 => Some(StepWidth::W2),
            4 => Some(StepWidth::W4),
            8 => Some(StepWidth::W8),
            16 => Some(StepWidth::W16),
            _ => None,
        }
    }
}

/// Evaluation-domain configuration.
///
/// | Field | Type | Endianness |
/// |-------|------|------------|
/// | `log2_size` | `u16` | Little-endian |
/// | `blowup` | `u32` | Little-endian |
/// | `coset_shift` | `u64` | Little-endian canonical field element |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainParams {
    /// Log<sub>2</sub> of the committed evaluation domain size.
    pub log2_size: u16,
    /// Rate expansion: the degree bound is `size / blowup`.
    pub blowup: u32,
    /// Multiplicative coset shift applied to the whole domain.
    pub coset_shift: u64,
}

/// FRI folding schedule: one fold width per committed round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldingParams {
    /// Fold widths applied in order; the schedule length fixes the number of
    /// committed layers and transcript roots.
    pub steps: Vec<StepWidth>,
}

impl FoldingParams {
    /// Product of all fold factors.
    pub fn total_factor(&self) -> usize {
        self.steps.iter().map(|s| s.as_usize()).product()
    }

    /// Number of committed FRI rounds.
    pub fn num_rounds(&self) -> usize {
        self.steps.len()
    }
}

/// Proof-of-work gate appended between commitment and query phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrindingParams {
    /// Whether a grinding nonce is required.
    pub enabled: bool,
    /// Required number of leading zero bits in the grinding digest.
    pub difficulty_bits: u8,
}

/// Endianness for byte encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endianness {
    /// Little-endian representation.
    Little,
    /// Big-endian representation.
    Big,
}

impl Endianness {
    pub(crate) const fn code(self) -> u8 {
        match self {
            Endianness::Little => 1,
            Endianness::Big => 2,
        }
    }

    pub(crate) const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Endianness::Little),
            2 => Some(Endianness::Big),
            _ => None,
        }
    }
}

/// Merkle commitment parameters.
///
/// | Field | Type | Endianness |
/// |-------|------|------------|
/// | `leaf_encoding` | [`Endianness`] | `u8` discriminant |
/// | `domain_sep` | `u64` | Little-endian |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleParams {
    /// Byte order for leaf encoding.
    pub leaf_encoding: Endianness,
    /// Domain separation tag for commitments.
    pub domain_sep: u64,
}

/// Bounds for transcript challenge sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeBounds {
    /// Minimum number of transcript challenges required.
    pub minimum: u8,
    /// Maximum number of transcript challenges allowed.
    pub maximum: u8,
}

/// Transcript configuration for Fiat–Shamir.
///
/// | Field | Type | Endianness |
/// |-------|------|------------|
/// | `protocol_tag` | `u64` | Little-endian |
/// | `seed` | `[u8; 32]` | Native order |
/// | `challenge_bounds` | [`ChallengeBounds`] | LE scalars |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptParams {
    /// Non-zero domain separation tag.
    pub protocol_tag: u64,
    /// Seed for deterministic transcript initialisation.
    pub seed: [u8; 32],
    /// Challenge sampling bounds.
    pub challenge_bounds: ChallengeBounds,
}

/// Security budget controlling soundness slack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityBudget {
    /// Target bits of soundness.
    pub target_bits: u16,
    /// Slack bits allocated for batching or composition.
    pub soundness_slack_bits: u8,
}
