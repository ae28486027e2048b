//! Field arithmetic primitives for the commitment layer.
//! Contains the Goldilocks field implementation and polynomial utilities.

pub mod polynomial;
pub mod prime_field;

pub use polynomial::Polynomial;
pub use prime_field::{FieldElement, FieldElementOps};
