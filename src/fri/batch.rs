//! Batched openings: many codewords, one low-degree test.
//!
//! Members are committed individually with layer-zero leaf chunking, their
//! roots are absorbed in registration order, and a single combination
//! challenge θ collapses them into `Σ θ^j · codeword_j`, which runs through
//! the ordinary FRI pipeline on the same transcript. Per-member evaluation
//! claims and per-query member openings are authenticated against the
//! individual member roots, so a cheating combination cannot hide behind
//! the aggregate.

use serde::{Deserialize, Serialize};

use crate::field::{FieldElement, FieldElementOps, Polynomial};
use crate::merkle::{encode_leaf, verify_path, Digest, MerkleHasher, MerklePath};
use crate::merkle::{Blake2sMerkleHasher, Blake3MerkleHasher};
use crate::params::{FriParams, HashFamily};
use crate::transcript::{Transcript, TranscriptLabel};

use super::layer::FriLayer;
use super::proof::{FriLayerOpening, FriProof};
use super::prover::initial_domain;
use super::types::{FriError, FriVerification};
use super::{fri_verify, prover};

/// A claim that a member codeword takes `value` at domain `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationClaim {
    /// Position in the initial evaluation domain.
    pub position: u32,
    /// Claimed codeword value at that position.
    pub value: FieldElement,
}

struct BatchMember {
    poly: Polynomial,
    claims: Vec<EvaluationClaim>,
}

/// Accumulates polynomials and their evaluation claims for a joint proof.
#[derive(Default)]
pub struct FriBatch {
    members: Vec<BatchMember>,
}

impl FriBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a polynomial together with its evaluation claims.
    ///
    /// Registration order is the member order absorbed into the transcript.
    pub fn push(&mut self, poly: Polynomial, claims: Vec<EvaluationClaim>) {
        self.members.push(BatchMember { poly, claims });
    }

    /// Number of registered members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the batch is empty.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns the claims of every member, in registration order.
    pub fn claims(&self) -> Vec<Vec<EvaluationClaim>> {
        self.members
            .iter()
            .map(|member| member.claims.clone())
            .collect()
    }

    /// Produces the joint proof for all registered members.
    pub fn prove(
        &self,
        params: &FriParams,
        transcript: &mut Transcript,
    ) -> Result<BatchProof, FriError> {
        match params.hash().family() {
            HashFamily::Blake2s => self.prove_with::<Blake2sMerkleHasher>(params, transcript),
            HashFamily::Blake3 => self.prove_with::<Blake3MerkleHasher>(params, transcript),
        }
    }

    fn prove_with<H: MerkleHasher>(
        &self,
        params: &FriParams,
        transcript: &mut Transcript,
    ) -> Result<BatchProof, FriError> {
        if self.members.is_empty() {
            return Err(FriError::EmptyBatch);
        }
        let domain = initial_domain(params)?;
        let bound = params.max_degree_bound();
        let width = params.folding().steps[0].as_usize();
        let leaf_count = domain.size() / width;

        // Commit every member with layer-zero chunking and absorb the roots.
        let mut member_layers = Vec::with_capacity(self.members.len());
        for (j, member) in self.members.iter().enumerate() {
            if member.poly.coefficients.is_empty() {
                return Err(FriError::EmptyPolynomial);
            }
            if let Some(degree) = member.poly.degree() {
                if degree >= bound {
                    return Err(FriError::DegreeTooLarge { degree, bound });
                }
            }
            let evaluations = domain.forward_fft(&member.poly.coefficients)?;
            let layer = FriLayer::<H>::commit(params, evaluations, width)?;
            transcript.absorb_digest(TranscriptLabel::CodewordRoot(j as u8), &layer.root())?;
            member_layers.push(layer);
        }

        let theta = transcript.challenge_field(TranscriptLabel::BatchChallenge)?;

        // Claims must hold for the member codewords before anything is opened.
        let mut claim_openings = Vec::with_capacity(self.members.len());
        for (j, (member, layer)) in self.members.iter().zip(&member_layers).enumerate() {
            let mut openings = Vec::with_capacity(member.claims.len());
            for claim in &member.claims {
                let position = claim.position as usize;
                if position >= domain.size() {
                    return Err(FriError::ClaimInvalid { member: j });
                }
                if layer.evaluations()[position] != claim.value {
                    return Err(FriError::ClaimInvalid { member: j });
                }
                let (values, path) = layer.open(position % leaf_count)?;
                openings.push(FriLayerOpening {
                    values,
                    path: path.siblings,
                });
            }
            claim_openings.push(openings);
        }

        // Combine with powers of θ and run the single-codeword pipeline.
        let mut combined = vec![FieldElement::ZERO; domain.size()];
        let mut power = FieldElement::ONE;
        for layer in &member_layers {
            for (acc, value) in combined.iter_mut().zip(layer.evaluations()) {
                *acc = acc.add(&power.mul(value));
            }
            power = power.mul(&theta);
        }
        let fri = prover::fri_prove_codeword(&combined, params, transcript)?;

        // Open every member at the layer-zero leaf of each sampled query.
        let query_openings = fri
            .queries
            .iter()
            .map(|query| {
                let leaf = query.position as usize % leaf_count;
                member_layers
                    .iter()
                    .map(|layer| {
                        let (values, path) = layer.open(leaf)?;
                        Ok(FriLayerOpening {
                            values,
                            path: path.siblings,
                        })
                    })
                    .collect::<Result<Vec<_>, FriError>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(BatchProof {
            member_roots: member_layers.iter().map(FriLayer::root).collect(),
            claim_openings,
            query_openings,
            fri,
        })
    }
}

/// Joint proof for a batch of codewords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProof {
    /// Layer-zero Merkle root per member, in registration order.
    pub member_roots: Vec<Digest>,
    /// Per-member, per-claim openings against the member roots.
    pub claim_openings: Vec<Vec<FriLayerOpening>>,
    /// Per-query, per-member openings at the sampled layer-zero leaves.
    pub query_openings: Vec<Vec<FriLayerOpening>>,
    /// Low-degree proof for the combined codeword.
    pub fri: FriProof,
}

/// Verifies a joint proof against the public evaluation claims.
///
/// `claims[j]` are the claims of member `j` in registration order; they are
/// part of the statement, not the proof.
pub fn batch_verify(
    proof: &BatchProof,
    claims: &[Vec<EvaluationClaim>],
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<FriVerification, FriError> {
    match params.hash().family() {
        HashFamily::Blake2s => batch_verify_with::<Blake2sMerkleHasher>(proof, claims, params, transcript),
        HashFamily::Blake3 => batch_verify_with::<Blake3MerkleHasher>(proof, claims, params, transcript),
    }
}

fn batch_verify_with<H: MerkleHasher>(
    proof: &BatchProof,
    claims: &[Vec<EvaluationClaim>],
    params: &FriParams,
    transcript: &mut Transcript,
) -> Result<FriVerification, FriError> {
    if proof.member_roots.is_empty() {
        return Err(FriError::EmptyBatch);
    }
    if claims.len() != proof.member_roots.len()
        || proof.claim_openings.len() != proof.member_roots.len()
    {
        return Err(FriError::MalformedProof {
            reason: "member count disagrees between roots, claims and openings",
        });
    }

    let domain_size = params.initial_domain_size();
    let width = params.folding().steps[0].as_usize();
    let leaf_count = domain_size / width;

    for (j, root) in proof.member_roots.iter().enumerate() {
        transcript.absorb_digest(TranscriptLabel::CodewordRoot(j as u8), root)?;
    }
    let theta = transcript.challenge_field(TranscriptLabel::BatchChallenge)?;

    // Authenticate every claim against its member commitment.
    for (j, (member_claims, openings)) in claims.iter().zip(&proof.claim_openings).enumerate() {
        if member_claims.len() != openings.len() {
            return Err(FriError::MalformedProof {
                reason: "claim opening count disagrees with the claims",
            });
        }
        for (claim, opening) in member_claims.iter().zip(openings) {
            let position = claim.position as usize;
            if position >= domain_size || opening.values.len() != width {
                return Err(FriError::ClaimInvalid { member: j });
            }
            let leaf = position % leaf_count;
            if !verify_member_opening::<H>(params, &proof.member_roots[j], opening, leaf, leaf_count) {
                return Err(FriError::MerklePathInvalid { layer: 0 });
            }
            if opening.values[position / leaf_count] != claim.value {
                return Err(FriError::ClaimInvalid { member: j });
            }
        }
    }

    let verification = fri_verify(&proof.fri, params, transcript)?;

    if proof.query_openings.len() != verification.query_positions.len() {
        return Err(FriError::MalformedProof {
            reason: "query opening count disagrees with the query budget",
        });
    }

    // The combined layer-zero leaf must be the θ-weighted sum of the member
    // leaves, elementwise.
    for ((position, member_openings), query) in verification
        .query_positions
        .iter()
        .zip(&proof.query_openings)
        .zip(&proof.fri.queries)
    {
        if member_openings.len() != proof.member_roots.len() {
            return Err(FriError::MalformedProof {
                reason: "member opening count disagrees with the batch size",
            });
        }
        let leaf = *position as usize % leaf_count;
        let mut combined = vec![FieldElement::ZERO; width];
        let mut power = FieldElement::ONE;
        for (j, opening) in member_openings.iter().enumerate() {
            if opening.values.len() != width {
                return Err(FriError::MalformedProof {
                    reason: "member opening width disagrees with the fold width",
                });
            }
            if !verify_member_opening::<H>(params, &proof.member_roots[j], opening, leaf, leaf_count) {
                return Err(FriError::MerklePathInvalid { layer: 0 });
            }
            for (acc, value) in combined.iter_mut().zip(&opening.values) {
                *acc = acc.add(&power.mul(value));
            }
            power = power.mul(&theta);
        }
        if combined != query.layers[0].values {
            return Err(FriError::FoldingInconsistency { layer: 0 });
        }
    }

    Ok(verification)
}

fn verify_member_opening<H: MerkleHasher>(
    params: &FriParams,
    root: &Digest,
    opening: &FriLayerOpening,
    leaf: usize,
    leaf_count: usize,
) -> bool {
    let encoded = encode_leaf(params, &opening.values);
    let path = MerklePath {
        index: leaf as u32,
        siblings: opening.path.clone(),
    };
    verify_path::<H>(params, root, &encoded, leaf, leaf_count, &path)
}
