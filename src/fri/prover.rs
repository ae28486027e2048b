use crate::fft::EvaluationDomain;
use crate::field::{FieldElement, Polynomial};
use crate::hash::Blake2sXof;
use crate::merkle::{Blake2sMerkleHasher, Blake3MerkleHasher, MerkleHasher};
use crate::params::{FriParams, HashFamily};
use crate::transcript::{Transcript, TranscriptLabel};

use super::folding::fold_vector;
use super::grinding::search_nonce;
use super::layer::FriLayer;
use super::proof::{FriLayerOpening, FriProof, FriQueryProof};
use super::types::FriError;

/// Produces a low-degree proof for `poly` over the configured coset domain.
///
/// The transcript must be freshly positioned at the commitment stage; the
/// prover drives it through the full schedule, so the caller can draw
/// post-proof binding challenges afterwards.
pub fn fri_prove(
    poly: &Polynomial,
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<FriProof, FriError> {
    if poly.coefficients.is_empty() {
        return Err(FriError::EmptyPolynomial);
    }
    let bound = params.max_degree_bound();
    if let Some(degree) = poly.degree() {
        if degree >= bound {
            return Err(FriError::DegreeTooLarge { degree, bound });
        }
    }
    let domain = initial_domain(params)?;
    let evaluations = domain.forward_fft(&poly.coefficients)?;
    fri_prove_codeword(&evaluations, params, transcript)
}

/// Evaluation-form entry point used by the batching layer.
///
/// `evaluations` must cover the full coset domain in natural order.
pub fn fri_prove_codeword(
    evaluations: &[FieldElement],
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<FriProof, FriError> {
    match params.hash().family() {
        HashFamily::Blake2s => prove_with::<Blake2sMerkleHasher>(evaluations, params, transcript),
        HashFamily::Blake3 => prove_with::<Blake3MerkleHasher>(evaluations, params, transcript),
    }
}

pub(crate) fn initial_domain(params: &FriParams) -> Result<EvaluationDomain, FriError> {
    let shift = FieldElement::from_u64(params.domain().coset_shift);
    Ok(EvaluationDomain::new_coset(
        params.initial_domain_size(),
        shift,
    )?)
}

fn prove_with<H: MerkleHasher>(
    evaluations: &[FieldElement],
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<FriProof, FriError> {
    let mut domain = initial_domain(params)?;
    if evaluations.len() != domain.size() {
        return Err(FriError::MalformedProof {
            reason: "codeword length disagrees with the domain",
        });
    }

    // Commit / absorb / challenge / fold, once per scheduled round.
    let mut current = evaluations.to_vec();
    let mut layers = Vec::with_capacity(params.num_rounds());
    for (round, step) in params.folding().steps.iter().enumerate() {
        let width = step.as_usize();
        let layer = FriLayer::<H>::commit(params, current, width)?;
        transcript.absorb_digest(TranscriptLabel::LayerRoot(round as u8), &layer.root())?;
        let beta = transcript.challenge_field(TranscriptLabel::FoldChallenge(round as u8))?;
        current = fold_vector(&domain, layer.evaluations(), width, beta);
        domain = domain.fold(width)?;
        layers.push(layer);
    }

    let mut terminal = Polynomial::new(domain.inverse_fft(&current)?);
    terminal.truncate_leading_zeros();
    transcript.absorb_field_elements(
        TranscriptLabel::TerminalPolynomial,
        &terminal.coefficients,
    )?;

    let grinding_nonce = if params.grinding().enabled {
        let state = transcript.state_digest();
        let nonce = search_nonce(&state, params.grinding().difficulty_bits)
            .ok_or(FriError::GrindingInsufficient)?;
        transcript.absorb_bytes(TranscriptLabel::GrindingNonce, &nonce.to_le_bytes())?;
        Some(nonce)
    } else {
        None
    };

    transcript.absorb_bytes(
        TranscriptLabel::QueryCount,
        &params.queries().to_le_bytes(),
    )?;
    let positions = sample_query_positions(params, transcript)?;

    let queries = positions
        .iter()
        .map(|&position| open_query(&layers, position))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FriProof {
        layer_roots: layers.iter().map(FriLayer::root).collect(),
        terminal_polynomial: terminal.coefficients,
        queries,
        grinding_nonce,
    })
}

/// Samples λ positions from the transcript's query stream.
///
/// Draws are independent `next_u64 mod m`, so repeats are possible and the
/// query budget may exceed the domain size.
pub(crate) fn sample_query_positions(
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<Vec<u32>, FriError> {
    let seed_bytes = transcript.challenge_bytes(TranscriptLabel::QueryIndexStream, 32)?;
    let mut seed = [0u8; 32];
    seed.copy_from_slice(&seed_bytes);
    let mut stream = Blake2sXof::from_state(seed);
    let domain_size = params.initial_domain_size() as u64;
    Ok((0..params.queries())
        .map(|_| (stream.next_u64() % domain_size) as u32)
        .collect())
}

fn open_query<H: MerkleHasher>(
    layers: &[FriLayer<H>],
    position: u32,
) -> Result<FriQueryProof, FriError> {
    let mut index = position as usize;
    let mut openings = Vec::with_capacity(layers.len());
    for layer in layers {
        let leaf = index % layer.leaf_count();
        let (values, path) = layer.open(leaf)?;
        openings.push(FriLayerOpening {
            values,
            path: path.siblings,
        });
        index = leaf;
    }
    Ok(FriQueryProof {
        position,
        layers: openings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FriParamsBuilder;
    use crate::transcript::TranscriptContext;

    #[test]
    fn oversized_degree_is_rejected() {
        let params = FriParamsBuilder::new().build().unwrap();
        let bound = params.max_degree_bound();
        let poly = Polynomial::new(vec![FieldElement::ONE; bound + 1]);
        let mut transcript = Transcript::new(&params, TranscriptContext::FriMain);
        let err = fri_prove(&poly, &params, &mut transcript).unwrap_err();
        assert!(matches!(err, FriError::DegreeTooLarge { .. }));
    }

    #[test]
    fn empty_polynomial_is_rejected() {
        let params = FriParamsBuilder::new().build().unwrap();
        let mut transcript = Transcript::new(&params, TranscriptContext::FriMain);
        let err = fri_prove(&Polynomial::zero(), &params, &mut transcript).unwrap_err();
        assert!(matches!(err, FriError::EmptyPolynomial));
    }
}
