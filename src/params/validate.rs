use core::fmt;

use super::hash::params_hash;
use super::types::ChallengeBounds;
use super::FriParams;
use crate::field::FieldElement;

/// Result of a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Canonical parameter hash derived during validation.
    pub params_hash: [u8; 32],
}

/// Error enumeration for parameter validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamsError {
    /// Domain exponent exceeded the field's 2-adicity or was zero.
    InvalidDomainLog2 { max: u16, got: u16 },
    /// Blowup factor must be a power of two of at least the threshold.
    InvalidBlowup { min: u32, got: u32 },
    /// Blowup factor may not exceed the domain size.
    BlowupExceedsDomain { domain: usize, blowup: u32 },
    /// Coset shift must be a nonzero canonical field element.
    InvalidCosetShift { got: u64 },
    /// The folding schedule may not be empty.
    EmptyFoldingSchedule,
    /// The schedule folds past the degree bound, leaving no terminal polynomial.
    FoldFactorTooLarge { max: usize, got: usize },
    /// Number of queries was below the allowed threshold.
    InvalidQueries { min: u16, got: u16 },
    /// Grinding difficulty exceeded the supported digest width.
    GrindingDifficultyTooLarge { max: u8, got: u8 },
    /// Transcript protocol tag must be non-zero.
    InvalidProtocolTag,
    /// Challenge bounds were invalid (`minimum` must be non-zero and <= `maximum`).
    InvalidChallengeBounds { minimum: u8, maximum: u8 },
    /// The folding schedule needs more challenges than the bounds allow.
    ChallengeBudgetTooSmall { required: u8, maximum: u8 },
    /// Security target bits were below the minimum threshold.
    SecurityBudgetTooLow { min: u16, got: u16 },
    /// Slack bits exceeded the allowed ratio of the target bits.
    SecuritySlackTooLarge { slack: u8, max_allowed: u8 },
    /// Serialisation failure when processing the parameter set.
    SerializationError { kind: crate::ser::SerKind },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::InvalidDomainLog2 { max, got } => {
                write!(f, "domain log2 {got} outside supported range 1..={max}")
            }
            ParamsError::InvalidBlowup { min, got } => {
                write!(f, "blowup {got} must be a power of two >= {min}")
            }
            ParamsError::BlowupExceedsDomain { domain, blowup } => {
                write!(f, "blowup {blowup} exceeds domain size {domain}")
            }
            ParamsError::InvalidCosetShift { got } => {
                write!(f, "coset shift {got} is not a nonzero canonical element")
            }
            ParamsError::EmptyFoldingSchedule => write!(f, "folding schedule is empty"),
            ParamsError::FoldFactorTooLarge { max, got } => {
                write!(f, "total fold factor {got} exceeds degree bound {max}")
            }
            ParamsError::InvalidQueries { min, got } => {
                write!(f, "query budget {got} below minimum {min}")
            }
            ParamsError::GrindingDifficultyTooLarge { max, got } => {
                write!(f, "grinding difficulty {got} exceeds maximum {max}")
            }
            ParamsError::InvalidProtocolTag => write!(f, "protocol tag must be non-zero"),
            ParamsError::InvalidChallengeBounds { minimum, maximum } => {
                write!(f, "challenge bounds {minimum}..={maximum} are invalid")
            }
            ParamsError::ChallengeBudgetTooSmall { required, maximum } => {
                write!(
                    f,
                    "schedule requires {required} challenges but bounds allow {maximum}"
                )
            }
            ParamsError::SecurityBudgetTooLow { min, got } => {
                write!(f, "security target {got} bits below minimum {min}")
            }
            ParamsError::SecuritySlackTooLarge { slack, max_allowed } => {
                write!(f, "soundness slack {slack} bits exceeds {max_allowed}")
            }
            ParamsError::SerializationError { kind } => {
                write!(f, "parameter serialization failed in {kind} section")
            }
        }
    }
}

impl std::error::Error for ParamsError {}

/// Validates all parameter invariants and returns a [`ValidationReport`].
pub fn validate(params: &FriParams) -> Result<ValidationReport, ParamsError> {
    validate_domain(params)?;
    validate_folding(params)?;
    validate_queries(params.queries)?;
    validate_grinding(params)?;
    validate_transcript(
        params.transcript.protocol_tag,
        &params.transcript.challenge_bounds,
        params.num_rounds(),
    )?;
    validate_security(params)?;
    Ok(ValidationReport {
        params_hash: params_hash(params),
    })
}

fn validate_domain(params: &FriParams) -> Result<(), ParamsError> {
    let log2 = params.domain.log2_size;
    let max = FieldElement::TWO_ADICITY as u16;
    if log2 == 0 || log2 > max {
        return Err(ParamsError::InvalidDomainLog2 { max, got: log2 });
    }
    let blowup = params.domain.blowup;
    if blowup < 2 || !blowup.is_power_of_two() {
        return Err(ParamsError::InvalidBlowup {
            min: 2,
            got: blowup,
        });
    }
    let domain = 1usize << log2;
    if blowup as usize > domain {
        return Err(ParamsError::BlowupExceedsDomain { domain, blowup });
    }
    let shift = params.domain.coset_shift;
    if shift == 0 || shift >= FieldElement::MODULUS.value {
        return Err(ParamsError::InvalidCosetShift { got: shift });
    }
    Ok(())
}

fn validate_folding(params: &FriParams) -> Result<(), ParamsError> {
    if params.folding.steps.is_empty() {
        return Err(ParamsError::EmptyFoldingSchedule);
    }
    // Every round needs a strictly smaller committed layer, and at least one
    // terminal coefficient has to survive the full schedule.
    let degree_bound = params.max_degree_bound();
    let total = params.folding.total_factor();
    if total > degree_bound {
        return Err(ParamsError::FoldFactorTooLarge {
            max: degree_bound,
            got: total,
        });
    }
    Ok(())
}

fn validate_queries(queries: u16) -> Result<(), ParamsError> {
    if queries < 1 {
        return Err(ParamsError::InvalidQueries {
            min: 1,
            got: queries,
        });
    }
    Ok(())
}

fn validate_grinding(params: &FriParams) -> Result<(), ParamsError> {
    if params.grinding.enabled && params.grinding.difficulty_bits > 64 {
        return Err(ParamsError::GrindingDifficultyTooLarge {
            max: 64,
            got: params.grinding.difficulty_bits,
        });
    }
    Ok(())
}

fn validate_transcript(
    protocol_tag: u64,
    bounds: &ChallengeBounds,
    num_rounds: usize,
) -> Result<(), ParamsError> {
    if protocol_tag == 0 {
        return Err(ParamsError::InvalidProtocolTag);
    }
    if bounds.minimum == 0 || bounds.minimum > bounds.maximum {
        return Err(ParamsError::InvalidChallengeBounds {
            minimum: bounds.minimum,
            maximum: bounds.maximum,
        });
    }
    // One fold challenge per round, the query stream draw, plus headroom for
    // a batch challenge and post-proof binding draws.
    let required = num_rounds.saturating_add(4).min(u8::MAX as usize) as u8;
    if required > bounds.maximum {
        return Err(ParamsError::ChallengeBudgetTooSmall {
            required,
            maximum: bounds.maximum,
        });
    }
    Ok(())
}

fn validate_security(params: &FriParams) -> Result<(), ParamsError> {
    let security = &params.security;
    if security.target_bits < 64 {
        return Err(ParamsError::SecurityBudgetTooLow {
            min: 64,
            got: security.target_bits,
        });
    }
    let max_allowed = (security.target_bits / 2).min(u8::MAX as u16) as u8;
    if security.soundness_slack_bits > max_allowed {
        return Err(ParamsError::SecuritySlackTooLarge {
            slack: security.soundness_slack_bits,
            max_allowed,
        });
    }
    Ok(())
}
