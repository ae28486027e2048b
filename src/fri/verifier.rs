use crate::fft::EvaluationDomain;
use crate::field::{FieldElement, Polynomial};
use crate::merkle::{
    encode_leaf, verify_path, Blake2sMerkleHasher, Blake3MerkleHasher, MerkleHasher, MerklePath,
};
use crate::params::{FriParams, HashFamily};
use crate::transcript::{Transcript, TranscriptLabel};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "parallel")]
use crate::utils::parallel::parallelism_enabled;

use super::folding::fold_group;
use super::grinding::{grinding_digest, meets_difficulty};
use super::prover::{initial_domain, sample_query_positions};
use super::proof::{FriProof, FriQueryProof};
use super::types::{FriError, FriVerification};

/// Verifies a low-degree proof by replaying the prover's transcript.
///
/// Strictly sequential: structure checks first, then the transcript replay,
/// then the per-query opening checks. Any failure is terminal; the error
/// kind is diagnostic only and callers treat the `Result` as accept/reject.
pub fn fri_verify(
    proof: &FriProof,
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<FriVerification, FriError> {
    match params.hash().family() {
        HashFamily::Blake2s => verify_with::<Blake2sMerkleHasher>(proof, params, transcript),
        HashFamily::Blake3 => verify_with::<Blake3MerkleHasher>(proof, params, transcript),
    }
}

fn verify_with<H: MerkleHasher>(
    proof: &FriProof,
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<FriVerification, FriError> {
    let num_rounds = params.num_rounds();
    if proof.layer_roots.len() != num_rounds {
        return Err(FriError::RootMismatch);
    }
    if proof.queries.len() != params.queries() as usize {
        return Err(FriError::MalformedProof {
            reason: "query count disagrees with the parameter set",
        });
    }
    if proof.grinding_nonce.is_some() != params.grinding().enabled {
        return Err(FriError::MalformedProof {
            reason: "grinding nonce presence disagrees with the parameter set",
        });
    }

    // Replay the commitment schedule to re-derive every fold challenge.
    let mut betas = Vec::with_capacity(num_rounds);
    for (round, root) in proof.layer_roots.iter().enumerate() {
        transcript.absorb_digest(TranscriptLabel::LayerRoot(round as u8), root)?;
        betas.push(transcript.challenge_field(TranscriptLabel::FoldChallenge(round as u8))?);
    }

    let terminal_bound = params.terminal_coeff_bound();
    if proof.terminal_polynomial.len() > terminal_bound {
        return Err(FriError::TerminalDegreeExceeded {
            length: proof.terminal_polynomial.len(),
            bound: terminal_bound,
        });
    }
    transcript.absorb_field_elements(
        TranscriptLabel::TerminalPolynomial,
        &proof.terminal_polynomial,
    )?;

    if let Some(nonce) = proof.grinding_nonce {
        let state = transcript.state_digest();
        let digest = grinding_digest(&state, nonce);
        if !meets_difficulty(&digest, params.grinding().difficulty_bits) {
            return Err(FriError::GrindingInsufficient);
        }
        transcript.absorb_bytes(TranscriptLabel::GrindingNonce, &nonce.to_le_bytes())?;
    }

    transcript.absorb_bytes(
        TranscriptLabel::QueryCount,
        &params.queries().to_le_bytes(),
    )?;
    let expected_positions = sample_query_positions(params, transcript)?;
    for (query, &expected) in proof.queries.iter().zip(&expected_positions) {
        if query.position != expected {
            return Err(FriError::MalformedProof {
                reason: "query position disagrees with the transcript",
            });
        }
    }

    // Per-round domains: domains[i] is the domain committed in round i and
    // domains[num_rounds] carries the terminal evaluation points.
    let mut domains = Vec::with_capacity(num_rounds + 1);
    domains.push(initial_domain(params)?);
    for step in &params.folding().steps {
        let folded = domains
            .last()
            .expect("domains is never empty")
            .fold(step.as_usize())?;
        domains.push(folded);
    }

    let terminal = Polynomial::new(proof.terminal_polynomial.clone());
    let check =
        |query: &FriQueryProof| verify_query::<H>(proof, params, &domains, &betas, &terminal, query);

    #[cfg(feature = "parallel")]
    if parallelism_enabled() && proof.queries.len() > 1 {
        proof
            .queries
            .par_iter()
            .map(check)
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(FriVerification {
            query_positions: expected_positions,
        });
    }

    proof
        .queries
        .iter()
        .map(check)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FriVerification {
        query_positions: expected_positions,
    })
}

fn verify_query<H: MerkleHasher>(
    proof: &FriProof,
    params: &FriParams,
    domains: &[EvaluationDomain],
    betas: &[FieldElement],
    terminal: &Polynomial,
    query: &FriQueryProof,
) -> Result<(), FriError> {
    if query.layers.len() != betas.len() {
        return Err(FriError::MalformedProof {
            reason: "query opening count disagrees with the schedule",
        });
    }

    let mut index = query.position as usize;
    let mut expected: Option<FieldElement> = None;
    for (round, step) in params.folding().steps.iter().enumerate() {
        let width = step.as_usize();
        let leaf_count = domains[round].size() / width;
        let leaf = index % leaf_count;
        let offset = index / leaf_count;
        let opening = &query.layers[round];

        if opening.values.len() != width {
            return Err(FriError::MalformedProof {
                reason: "opened leaf width disagrees with the fold width",
            });
        }
        if let Some(value) = expected {
            if opening.values[offset] != value {
                return Err(FriError::FoldingInconsistency {
                    layer: round as u8,
                });
            }
        }

        let encoded = encode_leaf(params, &opening.values);
        let path = MerklePath {
            index: leaf as u32,
            siblings: opening.path.clone(),
        };
        if !verify_path::<H>(
            params,
            &proof.layer_roots[round],
            &encoded,
            leaf,
            leaf_count,
            &path,
        ) {
            return Err(FriError::MerklePathInvalid {
                layer: round as u8,
            });
        }

        let points: Vec<_> = (0..width)
            .map(|j| {
                (
                    domains[round].element(leaf + j * leaf_count),
                    opening.values[j],
                )
            })
            .collect();
        expected = Some(fold_group(&points, betas[round]));
        index = leaf;
    }

    let terminal_domain = domains.last().expect("domains is never empty");
    let point = terminal_domain.element(index);
    let folded = expected.expect("the schedule has at least one round");
    if terminal.evaluate(point) != folded {
        return Err(FriError::FoldingInconsistency {
            layer: betas.len() as u8,
        });
    }
    Ok(())
}
