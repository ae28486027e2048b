//! Canonical parameter registry for the commitment layer.
//!
//! This module defines [`FriParams`] as the single source of truth for every
//! security and performance relevant knob of the low-degree test: the
//! evaluation domain, the folding schedule, query and grinding budgets,
//! Merkle encoding rules and transcript framing. The structure serialises
//! into a deterministic byte layout shared by prover, verifier and tooling.
//!
//! # Invariants
//!
//! * The canonical serialisation is strictly ordered as documented in the
//!   `ser` module and is stable across Rust versions.
//! * [`FriParams::params_hash`] commits to this serialisation and therefore
//!   uniquely identifies compatible parameter sets; the transcript absorbs it
//!   at construction, so provers and verifiers with different parameters
//!   derive unrelated challenges.
//! * The folding schedule is a runtime value: the same binary proves and
//!   verifies any supported step list without recompilation.
//!
//! Consumers are expected to use the [`FriParamsBuilder`] helper, which
//! offers safe defaults and pre-defined [`BuiltinProfile`] presets.

mod builder;
mod fri_params;
mod hash;
mod ser;
mod types;
mod validate;

pub use builder::{BuiltinProfile, FriParamsBuilder};
pub use fri_params::FriParams;
pub use hash::params_hash;
pub use ser::{deserialize_params, serialize_params};
pub use types::{
    ChallengeBounds, DomainParams, Endianness, FoldingParams, GrindingParams, HashFamily,
    HashKind, MerkleParams, SecurityBudget, StepWidth, TranscriptParams,
};
pub use validate::{validate, ParamsError, ValidationReport};
