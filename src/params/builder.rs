use super::types::{
    ChallengeBounds, DomainParams, Endianness, FoldingParams, GrindingParams, HashKind,
    MerkleParams, SecurityBudget, StepWidth, TranscriptParams,
};
use super::{FriParams, ParamsError};
use crate::field::FieldElement;

/// Builder used to assemble [`FriParams`] with validation.
///
/// | Field | Default (`PROFILE_X4`) |
/// |-------|------------------------|
/// | `params_version` | `1` |
/// | `hash` | [`HashKind::Blake2s { digest_size: 32 }`] |
/// | `domain` | `log2_size = 12`, blowup `4`, coset shift = field generator |
/// | `folding` | Steps `[W4, W4, W2]` |
/// | `queries` | `30` |
/// | `grinding` | Enabled, 12 bits |
/// | `merkle` | Little-endian leaves, domain sep `0x5253_4d4b_4c31_0001` |
/// | `transcript` | Protocol tag `0x5253_5043_5331_0001`, deterministic seed, challenge bounds `1..=64` |
/// | `security` | Target `96` bits, slack `16` bits |
#[derive(Debug, Clone)]
pub struct FriParamsBuilder {
    pub params_version: u16,
    pub hash: HashKind,
    pub domain: DomainParams,
    pub folding: FoldingParams,
    pub queries: u16,
    pub grinding: GrindingParams,
    pub merkle: MerkleParams,
    pub transcript: TranscriptParams,
    pub security: SecurityBudget,
}

impl FriParamsBuilder {
    /// Returns a builder initialised with safe defaults.
    pub fn new() -> Self {
        Self::from_profile(BuiltinProfile::PROFILE_X4)
    }

    /// Loads one of the built-in profiles.
    ///
    /// | Profile | Hash | Domain | Blowup | Schedule | Queries | Grinding | Target Bits |
    /// |---------|------|--------|--------|----------|---------|----------|-------------|
    /// | `PROFILE_X4` | Blake2s | 2^12 | 4 | W4,W4,W2 | 30 | 12 bits | 96 |
    /// | `PROFILE_HISEC_X8` | Blake3 | 2^14 | 8 | W8,W4,W4 | 64 | 18 bits | 128 |
    pub fn from_profile(profile: BuiltinProfile) -> Self {
        match profile {
            BuiltinProfile::PROFILE_X4 => FriParamsBuilder {
                params_version: 1,
                hash: HashKind::Blake2s { digest_size: 32 },
                domain: DomainParams {
                    log2_size: 12,
                    blowup: 4,
                    coset_shift: FieldElement::GENERATOR.as_u64(),
                },
                folding: FoldingParams {
                    steps: vec![StepWidth::W4, StepWidth::W4, StepWidth::W2],
                },
                queries: 30,
                grinding: GrindingParams {
                    enabled: true,
                    difficulty_bits: 12,
                },
                merkle: MerkleParams {
                    leaf_encoding: Endianness::Little,
                    domain_sep: 0x5253_4d4b_4c31_0001,
                },
                transcript: TranscriptParams {
                    protocol_tag: 0x5253_5043_5331_0001,
                    seed: *b"RS-PCS-PROFILE-X4_____________00",
                    challenge_bounds: ChallengeBounds {
                        minimum: 1,
                        maximum: 64,
                    },
                },
                security: SecurityBudget {
                    target_bits: 96,
                    soundness_slack_bits: 16,
                },
            },
            BuiltinProfile::PROFILE_HISEC_X8 => FriParamsBuilder {
                params_version: 1,
                hash: HashKind::Blake3 { digest_size: 32 },
                domain: DomainParams {
                    log2_size: 14,
                    blowup: 8,
                    coset_shift: FieldElement::GENERATOR.as_u64(),
                },
                folding: FoldingParams {
                    steps: vec![StepWidth::W8, StepWidth::W4, StepWidth::W4],
                },
                queries: 64,
                grinding: GrindingParams {
                    enabled: true,
                    difficulty_bits: 18,
                },
                merkle: MerkleParams {
                    leaf_encoding: Endianness::Little,
                    domain_sep: 0x5253_4d4b_4c31_0002,
                },
                transcript: TranscriptParams {
                    protocol_tag: 0x5253_5043_5331_0002,
                    seed: *b"RS-PCS-HISEC-X8_______________00",
                    challenge_bounds: ChallengeBounds {
                        minimum: 1,
                        maximum: 96,
                    },
                },
                security: SecurityBudget {
                    target_bits: 128,
                    soundness_slack_bits: 32,
                },
            },
        }
    }

    /// Validates the builder fields and emits a [`FriParams`] instance.
    pub fn build(&self) -> Result<FriParams, ParamsError> {
        FriParams::try_from_builder(self)
    }
}

/// Supported built-in profiles.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinProfile {
    /// Balanced profile with blowup 4.
    PROFILE_X4,
    /// High security profile with blowup 8 over BLAKE3.
    PROFILE_HISEC_X8,
}

impl Default for FriParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
