use super::types::{
    ChallengeBounds, DomainParams, Endianness, FoldingParams, GrindingParams, HashFamily,
    HashKind, MerkleParams, SecurityBudget, StepWidth, TranscriptParams,
};
use super::FriParams;
use crate::ser::{
    ensure_consumed, read_bool, read_u16, read_u32, read_u64, read_u8, write_bool, write_u16,
    write_u32, write_u64, write_u8, ByteReader, SerError, SerKind, SerResult,
};

/// Canonical binary serialisation for [`FriParams`].
///
/// | Field | Encoding |
/// |-------|----------|
/// | `params_version` | `u16` little-endian |
/// | `hash.family` | `u8` discriminant |
/// | `hash.parameter_id` | `u16` little-endian |
/// | `domain.log2_size` | `u16` little-endian |
/// | `domain.blowup` | `u32` little-endian |
/// | `domain.coset_shift` | `u64` little-endian |
/// | `folding.steps` | `u8` count, then one `u8` fold factor per step |
/// | `queries` | `u16` little-endian |
/// | `grinding.enabled` | `u8` flag |
/// | `grinding.difficulty_bits` | `u8` |
/// | `merkle.leaf_encoding` | `u8` discriminant |
/// | `merkle.domain_sep` | `u64` little-endian |
/// | `transcript.protocol_tag` | `u64` little-endian |
/// | `transcript.seed` | 32 raw bytes |
/// | `transcript.challenge_bounds` | two `u8` scalars |
/// | `security.target_bits` | `u16` little-endian |
/// | `security.soundness_slack_bits` | `u8` |
///
/// The layout avoids padding so byte-for-byte equality implies identical
/// parameter sets; [`super::params_hash`] commits to exactly these bytes.
pub fn serialize_params(params: &FriParams) -> Vec<u8> {
    let mut out = Vec::with_capacity(96);
    write_u16(&mut out, params.params_version());
    write_u8(&mut out, params.hash().family().code());
    write_u16(&mut out, params.hash().parameter_id());
    write_u16(&mut out, params.domain().log2_size);
    write_u32(&mut out, params.domain().blowup);
    write_u64(&mut out, params.domain().coset_shift);
    // The schedule is bounded by the domain's log2, which fits a u8.
    write_u8(&mut out, params.folding().steps.len() as u8);
    for step in &params.folding().steps {
        write_u8(&mut out, step.code());
    }
    write_u16(&mut out, params.queries());
    write_bool(&mut out, params.grinding().enabled);
    write_u8(&mut out, params.grinding().difficulty_bits);
    write_u8(&mut out, params.merkle().leaf_encoding.code());
    write_u64(&mut out, params.merkle().domain_sep);
    write_u64(&mut out, params.transcript().protocol_tag);
    out.extend_from_slice(&params.transcript().seed);
    write_u8(&mut out, params.transcript().challenge_bounds.minimum);
    write_u8(&mut out, params.transcript().challenge_bounds.maximum);
    write_u16(&mut out, params.security().target_bits);
    write_u8(&mut out, params.security().soundness_slack_bits);
    out
}

/// Deserialises a parameter set from canonical bytes.
pub fn deserialize_params(bytes: &[u8]) -> SerResult<FriParams> {
    const KIND: SerKind = SerKind::Params;
    let mut cursor = ByteReader::new(bytes);
    let params_version = read_u16(&mut cursor, KIND, "params_version")?;
    let family_code = read_u8(&mut cursor, KIND, "hash.family")?;
    let family = HashFamily::from_code(family_code)
        .ok_or_else(|| SerError::invalid_value(KIND, "hash.family"))?;
    let parameter_id = read_u16(&mut cursor, KIND, "hash.parameter_id")?;
    let hash = HashKind::from_codes(family, parameter_id);
    let log2_size = read_u16(&mut cursor, KIND, "domain.log2_size")?;
    let blowup = read_u32(&mut cursor, KIND, "domain.blowup")?;
    let coset_shift = read_u64(&mut cursor, KIND, "domain.coset_shift")?;
    let step_count = read_u8(&mut cursor, KIND, "folding.step_count")? as usize;
    let mut steps = Vec::with_capacity(step_count);
    for _ in 0..step_count {
        let code = read_u8(&mut cursor, KIND, "folding.step")?;
        let step = StepWidth::from_code(code)
            .ok_or_else(|| SerError::invalid_value(KIND, "folding.step"))?;
        steps.push(step);
    }
    let queries = read_u16(&mut cursor, KIND, "queries")?;
    let grinding_enabled = read_bool(&mut cursor, KIND, "grinding.enabled")?;
    let difficulty_bits = read_u8(&mut cursor, KIND, "grinding.difficulty_bits")?;
    let encoding_code = read_u8(&mut cursor, KIND, "merkle.leaf_encoding")?;
    let leaf_encoding = Endianness::from_code(encoding_code)
        .ok_or_else(|| SerError::invalid_value(KIND, "merkle.leaf_encoding"))?;
    let domain_sep = read_u64(&mut cursor, KIND, "merkle.domain_sep")?;
    let protocol_tag = read_u64(&mut cursor, KIND, "transcript.protocol_tag")?;
    let seed = cursor.read_array::<32>(KIND, "transcript.seed")?;
    let minimum = read_u8(&mut cursor, KIND, "transcript.challenge_bounds.minimum")?;
    let maximum = read_u8(&mut cursor, KIND, "transcript.challenge_bounds.maximum")?;
    let target_bits = read_u16(&mut cursor, KIND, "security.target_bits")?;
    let soundness_slack_bits = read_u8(&mut cursor, KIND, "security.soundness_slack_bits")?;
    ensure_consumed(&cursor, KIND)?;

    Ok(FriParams {
        params_version,
        hash,
        domain: DomainParams {
            log2_size,
            blowup,
            coset_shift,
        },
        folding: FoldingParams { steps },
        queries,
        grinding: GrindingParams {
            enabled: grinding_enabled,
            difficulty_bits,
        },
        merkle: MerkleParams {
            leaf_encoding,
            domain_sep,
        },
        transcript: TranscriptParams {
            protocol_tag,
            seed,
            challenge_bounds: ChallengeBounds { minimum, maximum },
        },
        security: SecurityBudget {
            target_bits,
            soundness_slack_bits,
        },
    })
}
