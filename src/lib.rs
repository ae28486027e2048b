//! Polynomial commitment layer built on FRI low-degree testing.
//!
//! The crate provides the commitment-side plumbing of a Redshift-style
//! proving stack: power-of-two coset evaluation domains with cached FFTs,
//! binary Merkle vector commitments, a deterministic Fiat–Shamir transcript
//! and the FRI prover/verifier pair with batched openings and an optional
//! proof-of-work gate.
//!
//! Everything is driven by a shared [`params::FriParams`] value that prover
//! and verifier agree on out-of-band; the parameter hash is bound into the
//! transcript so mismatched configurations fail verification instead of
//! silently diverging.
//!
//! ```
//! use redshift_pcs::field::{FieldElement, Polynomial};
//! use redshift_pcs::fri::{fri_prove, fri_verify};
//! use redshift_pcs::params::FriParamsBuilder;
//! use redshift_pcs::transcript::{Transcript, TranscriptContext};
//!
//! let params = FriParamsBuilder::new().build().unwrap();
//! let poly = Polynomial::new((1u64..=32).map(FieldElement::from_u64).collect());
//!
//! let mut prover = Transcript::new(&params, TranscriptContext::FriMain);
//! let proof = fri_prove(&poly, &params, &mut prover).unwrap();
//!
//! let mut verifier = Transcript::new(&params, TranscriptContext::FriMain);
//! fri_verify(&proof, &params, &mut verifier).unwrap();
//! ```

#![forbid(unsafe_code)]

pub mod fft;
pub mod field;
pub mod fri;
pub mod hash;
pub mod merkle;
pub mod params;
pub mod ser;
pub mod transcript;
pub mod utils;

pub use fri::{
    batch_verify, fri_prove, fri_prove_codeword, fri_verify, BatchProof, EvaluationClaim,
    FriBatch, FriError, FriProof, FriVerification,
};
pub use params::{FriParams, FriParamsBuilder};
pub use transcript::{Transcript, TranscriptContext};
