use core::fmt;

use crate::field::FieldElement;

/// Canonical field element type absorbed by the transcript.
pub type Felt = FieldElement;

/// Transcript contexts provide coarse domain separation between protocol runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptContext {
    /// Single-codeword low-degree test.
    FriMain,
    /// Batched opening combining several codewords.
    Batch,
    /// Custom user supplied domain separation tag.
    Custom(u64),
}

impl TranscriptContext {
    /// Returns the canonical little-endian encoding of the context tag.
    pub(crate) fn to_le_bytes(self) -> [u8; 8] {
        match self {
            TranscriptContext::FriMain => 0x5253_5043_4652_495fu64.to_le_bytes(),
            TranscriptContext::Batch => 0x5253_5043_4241_5443u64.to_le_bytes(),
            TranscriptContext::Custom(tag) => tag.to_le_bytes(),
        }
    }
}

/// Transcript phases exposed for diagnostics and sequencing checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptPhase {
    /// Initialisation phase: params hash, protocol tag, seed and context.
    Init,
    /// Codeword commitment phase preceding the first folding round.
    Commit,
    /// Folding round identified by its index.
    Round(u8),
    /// Terminal polynomial binding phase.
    Terminal,
    /// Query sampling phase.
    Queries,
    /// Final binding phase producing the proof close digest.
    Final,
}

/// Canonical transcript labels.  Every variant appears exactly once in the
/// transcript order unless otherwise documented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranscriptLabel {
    /// Canonical parameter hash absorbed during initialisation.
    ParamsHash,
    /// Protocol tag separating transcript families.
    ProtocolTag,
    /// Deterministic seed provided by the parameter set.
    Seed,
    /// Context tag absorbed during transcript initialisation.
    ContextTag,
    /// Layer-zero root of batch member `j`, absorbed once per member.
    CodewordRoot(u8),
    /// Combination challenge θ drawn after all member roots.
    BatchChallenge,
    /// Merkle root of folding round `i`.
    LayerRoot(u8),
    /// Folding challenge β for round `i`.
    FoldChallenge(u8),
    /// Coefficients of the terminal polynomial.
    TerminalPolynomial,
    /// Proof-of-work nonce absorbed when grinding is enabled.
    GrindingNonce,
    /// Number of queries announced by the prover.
    QueryCount,
    /// Challenge stream used to derive query positions.
    QueryIndexStream,
    /// Final binding bytes stored in the proof envelope.
    ProofClose,
}

impl TranscriptLabel {
    pub(crate) fn domain_tag(self) -> [u8; 16] {
        match self {
            TranscriptLabel::ParamsHash => *b"RS_LABEL_PARAMSH",
            TranscriptLabel::ProtocolTag => *b"RS_LABEL_PROTO__",
            TranscriptLabel::Seed => *b"RS_LABEL_SEED___",
            TranscriptLabel::ContextTag => *b"RS_LABEL_CTX____",
            TranscriptLabel::CodewordRoot(idx) => {
                let mut tag = *b"RS_LABEL_CWROOT_";
                tag[15] = idx;
                tag
            }
            TranscriptLabel::BatchChallenge => *b"RS_LABEL_BATCHC_",
            TranscriptLabel::LayerRoot(idx) => {
                let mut tag = *b"RS_LABEL_LYROOT_";
                tag[15] = idx;
                tag
            }
            TranscriptLabel::FoldChallenge(idx) => {
                let mut tag = *b"RS_LABEL_FOLDCH_";
                tag[15] = idx;
                tag
            }
            TranscriptLabel::TerminalPolynomial => *b"RS_LABEL_TERMPO_",
            TranscriptLabel::GrindingNonce => *b"RS_LABEL_GRNDNC_",
            TranscriptLabel::QueryCount => *b"RS_LABEL_QCOUNT_",
            TranscriptLabel::QueryIndexStream => *b"RS_LABEL_QINDXS_",
            TranscriptLabel::ProofClose => *b"RS_LABEL_CLOSE__",
        }
    }
}

/// Error type returned by the transcript API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// Label was used outside of the documented phase ordering.
    InvalidLabel,
    /// Range exclusive argument was zero during `challenge_usize`.
    RangeZero,
    /// Internal counter overflowed the supported range.
    Overflow,
    /// Challenge counter or round index violated the configured bounds.
    BoundsViolation,
}

impl fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptError::InvalidLabel => write!(f, "label used outside canonical phase order"),
            TranscriptError::RangeZero => write!(f, "challenge range must be non-zero"),
            TranscriptError::Overflow => write!(f, "internal counter overflow"),
            TranscriptError::BoundsViolation => write!(f, "transcript bounds violated"),
        }
    }
}

impl std::error::Error for TranscriptError {}
