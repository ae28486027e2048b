use serde::{Deserialize, Serialize};

use super::hash::params_hash;
use super::types::{
    DomainParams, FoldingParams, GrindingParams, HashKind, MerkleParams, SecurityBudget,
    TranscriptParams,
};
use super::validate::ParamsError;

/// Canonical FRI parameter set shared by prover and verifier.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `params_version` | `u16` | Version of the parameter schema. |
/// | `hash` | [`HashKind`] | Hash function selection including digest size. |
/// | `domain` | [`DomainParams`] | Evaluation domain size, blowup and coset shift. |
/// | `folding` | [`FoldingParams`] | Runtime folding schedule. |
/// | `queries` | `u16` | Query budget λ. |
/// | `grinding` | [`GrindingParams`] | Proof-of-work gate. |
/// | `merkle` | [`MerkleParams`] | Merkle commitment encoding options. |
/// | `transcript` | [`TranscriptParams`] | Fiat–Shamir transcript framing. |
/// | `security` | [`SecurityBudget`] | Global soundness budget. |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriParams {
    pub(crate) params_version: u16,
    pub(crate) hash: HashKind,
    pub(crate) domain: DomainParams,
    pub(crate) folding: FoldingParams,
    pub(crate) queries: u16,
    pub(crate) grinding: GrindingParams,
    pub(crate) merkle: MerkleParams,
    pub(crate) transcript: TranscriptParams,
    pub(crate) security: SecurityBudget,
}

impl FriParams {
    /// Returns the parameter schema version.
    pub const fn params_version(&self) -> u16 {
        self.params_version
    }

    /// Returns the configured hash function.
    pub const fn hash(&self) -> HashKind {
        self.hash
    }

    /// Returns the evaluation-domain configuration.
    pub const fn domain(&self) -> &DomainParams {
        &self.domain
    }

    /// Returns the folding schedule.
    pub const fn folding(&self) -> &FoldingParams {
        &self.folding
    }

    /// Returns the query budget λ.
    pub const fn queries(&self) -> u16 {
        self.queries
    }

    /// Returns the grinding configuration.
    pub const fn grinding(&self) -> &GrindingParams {
        &self.grinding
    }

    /// Returns the Merkle configuration.
    pub const fn merkle(&self) -> &MerkleParams {
        &self.merkle
    }

    /// Returns the transcript configuration.
    pub const fn transcript(&self) -> &TranscriptParams {
        &self.transcript
    }

    /// Returns the security budget configuration.
    pub const fn security(&self) -> &SecurityBudget {
        &self.security
    }

    /// Size of the committed evaluation domain.
    pub fn initial_domain_size(&self) -> usize {
        1usize << self.domain.log2_size
    }

    /// Exclusive degree bound enforced by the low-degree test.
    pub fn max_degree_bound(&self) -> usize {
        self.initial_domain_size() / self.domain.blowup as usize
    }

    /// Domain size remaining after the full folding schedule.
    pub fn terminal_domain_size(&self) -> usize {
        self.initial_domain_size() / self.folding.total_factor()
    }

    /// Maximum number of coefficients the terminal polynomial may carry.
    pub fn terminal_coeff_bound(&self) -> usize {
        (self.max_degree_bound() / self.folding.total_factor()).max(1)
    }

    /// Number of committed FRI rounds.
    pub fn num_rounds(&self) -> usize {
        self.folding.num_rounds()
    }

    /// Computes the canonical parameter hash.
    ///
    /// The digest is computed over the canonical byte layout defined in
    /// [`crate::params::serialize_params`].
    pub fn params_hash(&self) -> [u8; 32] {
        params_hash(self)
    }

    /// Produces a human-readable profile identifier.
    ///
    /// The identifier is deterministic and contains only ASCII alphanumeric
    /// characters and underscores.
    pub fn profile_id(&self) -> String {
        format!(
            "{}_H{}{}_D{}_B{}_Q{}_G{}_V{}",
            match self.security.target_bits {
                bits if bits >= 128 => "PROFILE_HISEC",
                _ => "PROFILE",
            },
            self.hash.family().code(),
            self.hash.parameter_id(),
            self.domain.log2_size,
            self.domain.blowup,
            self.queries,
            if self.grinding.enabled {
                self.grinding.difficulty_bits
            } else {
                0
            },
            self.params_version
        )
    }

    /// Checks whether two parameter sets are compatible on security-critical fields.
    pub fn is_compatible_with(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.domain == other.domain
            && self.folding == other.folding
            && self.queries == other.queries
            && self.grinding == other.grinding
            && self.merkle == other.merkle
            && self.transcript.protocol_tag == other.transcript.protocol_tag
    }

    pub(crate) fn try_from_builder(
        builder: &super::builder::FriParamsBuilder,
    ) -> Result<Self, ParamsError> {
        let params = Self {
            params_version: builder.params_version,
            hash: builder.hash,
            domain: builder.domain,
            folding: builder.folding.clone(),
            queries: builder.queries,
            grinding: builder.grinding,
            merkle: builder.merkle,
            transcript: builder.transcript,
            security: builder.security,
        };
        let _ = super::validate::validate(&params)?;
        Ok(params)
    }
}
