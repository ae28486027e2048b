//! FRI low-degree testing over coset evaluation domains.
//!
//! The prover commits the codeword round by round, folding with
//! transcript-derived challenges until the residual polynomial is small
//! enough to ship in the clear; the verifier replays the transcript and
//! spot-checks the folding chain at sampled positions. Batched openings
//! combine several codewords under one combination challenge and run a
//! single test.

mod batch;
mod folding;
mod grinding;
mod layer;
mod proof;
mod prover;
mod ser;
mod types;
mod verifier;

pub use batch::{batch_verify, BatchProof, EvaluationClaim, FriBatch};
pub use proof::{FriLayerOpening, FriProof, FriQueryProof};
pub use prover::{fri_prove, fri_prove_codeword};
pub use types::{FriError, FriVerification};
pub use verifier::fri_verify;
