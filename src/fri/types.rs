use core::fmt;

use crate::fft::DomainError;
use crate::merkle::MerkleError;
use crate::transcript::TranscriptError;

/// Errors surfaced by the FRI prover and verifier.
///
/// Verification failures are diagnostic kinds only; callers treat the whole
/// `Result` as a single accept/reject decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FriError {
    /// The committed polynomial has no coefficients.
    EmptyPolynomial,
    /// The batch contains no registered members.
    EmptyBatch,
    /// The committed polynomial exceeds the degree bound enforced by the test.
    DegreeTooLarge { degree: usize, bound: usize },
    /// The proof carries a different number of layer roots than the schedule.
    RootMismatch,
    /// An opened value disagrees with the fold of the previous round.
    FoldingInconsistency { layer: u8 },
    /// A Merkle authentication path failed to reproduce the committed root.
    MerklePathInvalid { layer: u8 },
    /// The terminal polynomial exceeds the folded degree bound.
    TerminalDegreeExceeded { length: usize, bound: usize },
    /// The proof-of-work nonce does not meet the configured difficulty.
    GrindingInsufficient,
    /// The proof is structurally inconsistent with the parameter set.
    MalformedProof { reason: &'static str },
    /// A batched evaluation claim disagrees with the member commitment.
    ClaimInvalid { member: usize },
    /// Transcript schedule violation while proving or replaying.
    Transcript(TranscriptError),
    /// Commitment construction failed.
    Merkle(MerkleError),
    /// Evaluation-domain construction or FFT failure.
    Domain(DomainError),
}

impl fmt::Display for FriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FriError::EmptyPolynomial => write!(f, "cannot commit to an empty polynomial"),
            FriError::EmptyBatch => write!(f, "batch has no registered members"),
            FriError::DegreeTooLarge { degree, bound } => {
                write!(f, "degree {degree} exceeds the bound {bound}")
            }
            FriError::RootMismatch => {
                write!(f, "layer root count disagrees with the folding schedule")
            }
            FriError::FoldingInconsistency { layer } => {
                write!(f, "folding inconsistency at layer {layer}")
            }
            FriError::MerklePathInvalid { layer } => {
                write!(f, "merkle path invalid at layer {layer}")
            }
            FriError::TerminalDegreeExceeded { length, bound } => write!(
                f,
                "terminal polynomial has {length} coefficients, bound is {bound}"
            ),
            FriError::GrindingInsufficient => {
                write!(f, "grinding nonce fails the difficulty predicate")
            }
            FriError::MalformedProof { reason } => write!(f, "malformed proof: {reason}"),
            FriError::ClaimInvalid { member } => {
                write!(f, "evaluation claim invalid for batch member {member}")
            }
            FriError::Transcript(err) => write!(f, "transcript error: {err}"),
            FriError::Merkle(err) => write!(f, "merkle error: {err}"),
            FriError::Domain(err) => write!(f, "domain error: {err}"),
        }
    }
}

impl std::error::Error for FriError {}

impl From<TranscriptError> for FriError {
    fn from(err: TranscriptError) -> Self {
        FriError::Transcript(err)
    }
}

impl From<MerkleError> for FriError {
    fn from(err: MerkleError) -> Self {
        FriError::Merkle(err)
    }
}

impl From<DomainError> for FriError {
    fn from(err: DomainError) -> Self {
        FriError::Domain(err)
    }
}

/// Successful verification outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriVerification {
    /// Query positions re-derived from the transcript, in sampling order.
    pub query_positions: Vec<u32>,
}
