//! Deterministic Fiat–Shamir transcript.
//!
//! The transcript binds the parameter hash, protocol tag and seed at
//! construction, then enforces the canonical label schedule through an
//! internal stage machine: commitment roots and the terminal polynomial are
//! absorbed, folding and query challenges are drawn, and every challenge
//! mixes back into the running Blake2s state. Identical inputs always yield
//! identical challenge streams, so the verifier replays the prover's
//! transcript byte for byte.

mod core;
mod types;

pub use self::core::Transcript;
pub use types::{Felt, TranscriptContext, TranscriptError, TranscriptLabel, TranscriptPhase};
