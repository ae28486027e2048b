//! Radix-2 evaluation domains and FFTs over the Goldilocks field.
//!
//! Domains are multiplicative subgroups of size `2^k` (optionally shifted to
//! a coset) whose primitive roots come from the field's 2-adic generator.
//! Twiddle tables are built once per size and shared process-wide through a
//! cache: the cache is populated under a mutex and entries are immutable
//! afterwards, so concurrent provers reuse the same table.

use core::fmt;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

use crate::field::prime_field::FieldElementOps;
use crate::field::{FieldElement, Polynomial};

/// Maximum supported radix-2 domain size expressed as `log2(n)`.
///
/// Bounded by the 2-adicity of the field: larger subgroups do not exist.
pub const MAX_LOG2_SIZE: usize = 32;

/// Errors surfaced while constructing or using evaluation domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    /// Requested size was zero, not a power of two, or above `2^32`.
    InvalidSize { got: usize },
    /// Input length did not match what the operation requires.
    LengthMismatch { expected: usize, got: usize },
    /// Coset shift must be a nonzero field element.
    ZeroShift,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::InvalidSize { got } => {
                write!(f, "domain size {got} is not a supported power of two")
            }
            DomainError::LengthMismatch { expected, got } => {
                write!(f, "expected at most {expected} values, got {got}")
            }
            DomainError::ZeroShift => write!(f, "coset shift must be nonzero"),
        }
    }
}

impl std::error::Error for DomainError {}

/// Immutable per-size twiddle data shared between domains.
#[derive(Debug)]
pub struct TwiddleTable {
    root: FieldElement,
    size_inv: FieldElement,
    /// Successive powers of the primitive root in natural order.
    forward: Vec<FieldElement>,
}

static TWIDDLE_CACHE: OnceLock<Mutex<HashMap<usize, Arc<TwiddleTable>>>> = OnceLock::new();

fn twiddle_cache() -> &'static Mutex<HashMap<usize, Arc<TwiddleTable>>> {
    TWIDDLE_CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

fn twiddle_table_for(log2_size: usize) -> Arc<TwiddleTable> {
    let cache = twiddle_cache();
    let mut guard = cache.lock().expect("twiddle cache mutex poisoned");
    guard
        .entry(log2_size)
        .or_insert_with(|| Arc::new(build_twiddle_table(log2_size)))
        .clone()
}

fn build_twiddle_table(log2_size: usize) -> TwiddleTable {
    let size = 1usize << log2_size;
    let root = FieldElement::two_adic_root(log2_size as u32)
        .expect("log2 size is validated against the field's 2-adicity");
    let size_inv = FieldElement::from_u64(size as u64)
        .inv()
        .expect("domain sizes are nonzero");
    let mut forward = Vec::with_capacity(size);
    let mut current = FieldElement::ONE;
    for _ in 0..size {
        forward.push(current);
        current = current.mul(&root);
    }
    TwiddleTable {
        root,
        size_inv,
        forward,
    }
}

/// Power-of-two evaluation domain, optionally shifted onto a coset.
///
/// The `i`-th element is `shift * w^i` where `w` is the cached primitive
/// root. Folding a domain by a factor `k` squares-out to the subgroup of
/// size `m/k` with shift `shift^k`, exactly the domain the next FRI layer
/// lives on.
#[derive(Debug, Clone)]
pub struct EvaluationDomain {
    log2_size: usize,
    shift: FieldElement,
    twiddles: Arc<TwiddleTable>,
}

impl EvaluationDomain {
    /// Builds the trivial-coset domain of the given size.
    pub fn new(size: usize) -> Result<Self, DomainError> {
        Self::new_coset(size, FieldElement::ONE)
    }

    /// Builds a domain shifted by `shift`.
    pub fn new_coset(size: usize, shift: FieldElement) -> Result<Self, DomainError> {
        if size == 0 || !size.is_power_of_two() {
            return Err(DomainError::InvalidSize { got: size });
        }
        let log2_size = size.trailing_zeros() as usize;
        if log2_size > MAX_LOG2_SIZE {
            return Err(DomainError::InvalidSize { got: size });
        }
        if shift.is_zero() {
            return Err(DomainError::ZeroShift);
        }
        Ok(Self {
            log2_size,
            shift,
            twiddles: twiddle_table_for(log2_size),
        })
    }

    /// Returns a same-size domain with a different coset shift.
    pub fn coset(&self, shift: FieldElement) -> Result<Self, DomainError> {
        if shift.is_zero() {
            return Err(DomainError::ZeroShift);
        }
        Ok(Self {
            log2_size: self.log2_size,
            shift,
            twiddles: Arc::clone(&self.twiddles),
        })
    }

    /// Number of points in the domain.
    pub fn size(&self) -> usize {
        1usize << self.log2_size
    }

    /// `log2` of the domain size.
    pub fn log2_size(&self) -> usize {
        self.log2_size
    }

    /// Coset shift of this domain.
    pub fn shift(&self) -> FieldElement {
        self.shift
    }

    /// Primitive root of unity generating the underlying subgroup.
    pub fn generator(&self) -> FieldElement {
        self.twiddles.root
    }

    /// Returns the `index`-th domain point `shift * w^index`.
    pub fn element(&self, index: usize) -> FieldElement {
        let mask = self.size() - 1;
        self.shift.mul(&self.twiddles.forward[index & mask])
    }

    /// Derives the domain one FRI fold of width `factor` descends to.
    pub fn fold(&self, factor: usize) -> Result<Self, DomainError> {
        if factor == 0 || !factor.is_power_of_two() || factor > self.size() {
            return Err(DomainError::InvalidSize { got: factor });
        }
        let next_size = self.size() / factor;
        // shift^k is nonzero whenever shift is, so this cannot fail.
        Self::new_coset(next_size, self.shift.pow(factor as u64))
    }

    /// Evaluates the coefficient vector over the full domain.
    ///
    /// Coefficient vectors shorter than the domain are zero-padded. Output is
    /// in natural order: `out[i] = f(shift * w^i)`.
    pub fn forward_fft(&self, coeffs: &[FieldElement]) -> Result<Vec<FieldElement>, DomainError> {
        let size = self.size();
        if coeffs.len() > size {
            return Err(DomainError::LengthMismatch {
                expected: size,
                got: coeffs.len(),
            });
        }
        let mut values = vec![FieldElement::ZERO; size];
        // Folding in the coset shift per coefficient turns the coset
        // evaluation into a plain subgroup FFT.
        let mut shift_power = FieldElement::ONE;
        for (slot, coeff) in values.iter_mut().zip(coeffs.iter()) {
            *slot = coeff.mul(&shift_power);
            shift_power = shift_power.mul(&self.shift);
        }
        self.ntt_in_place(&mut values, false);
        Ok(values)
    }

    /// Interpolates domain evaluations back into coefficients.
    ///
    /// Requires exactly `size` values in natural order.
    pub fn inverse_fft(&self, evals: &[FieldElement]) -> Result<Vec<FieldElement>, DomainError> {
        let size = self.size();
        if evals.len() != size {
            return Err(DomainError::LengthMismatch {
                expected: size,
                got: evals.len(),
            });
        }
        let mut values = evals.to_vec();
        self.ntt_in_place(&mut values, true);
        let shift_inv = self
            .shift
            .inv()
            .expect("coset shifts are validated nonzero");
        let mut unscale = self.twiddles.size_inv;
        for value in values.iter_mut() {
            *value = value.mul(&unscale);
            unscale = unscale.mul(&shift_inv);
        }
        Ok(values)
    }

    /// The vanishing polynomial `x^m - shift^m` of this domain.
    pub fn vanishing_polynomial(&self) -> Polynomial {
        let size = self.size();
        let mut coefficients = vec![FieldElement::ZERO; size + 1];
        coefficients[0] = self.shift.pow(size as u64).neg();
        coefficients[size] = FieldElement::ONE;
        Polynomial::new(coefficients)
    }

    /// Evaluates the vanishing polynomial at an arbitrary point.
    pub fn vanishing_at(&self, point: FieldElement) -> FieldElement {
        let size = self.size() as u64;
        point.pow(size).sub(&self.shift.pow(size))
    }

    /// Iterative Cooley-Tukey NTT over the subgroup, natural order in and out.
    fn ntt_in_place(&self, values: &mut [FieldElement], inverse: bool) {
        let size = values.len();
        if size <= 1 {
            return;
        }
        bit_reverse_permute(values);
        let table = &self.twiddles.forward;
        let mut len = 2usize;
        while len <= size {
            let half = len / 2;
            let stride = size / len;
            for start in (0..size).step_by(len) {
                for offset in 0..half {
                    let twiddle_index = offset * stride;
                    let twiddle = if inverse && twiddle_index != 0 {
                        table[size - twiddle_index]
                    } else {
                        table[twiddle_index]
                    };
                    let even = values[start + offset];
                    let odd = values[start + offset + half].mul(&twiddle);
                    values[start + offset] = even.add(&odd);
                    values[start + offset + half] = even.sub(&odd);
                }
            }
            len <<= 1;
        }
    }
}

fn bit_reverse_permute(values: &mut [FieldElement]) {
    let size = values.len();
    let bits = size.trailing_zeros();
    for index in 0..size {
        let reversed = (index.reverse_bits() >> (usize::BITS - bits)) as usize;
        if reversed > index {
            values.swap(index, reversed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn felts(raw: &[u64]) -> Vec<FieldElement> {
        raw.iter().copied().map(FieldElement::from).collect()
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert!(matches!(
            EvaluationDomain::new(0),
            Err(DomainError::InvalidSize { got: 0 })
        ));
        assert!(matches!(
            EvaluationDomain::new(12),
            Err(DomainError::InvalidSize { got: 12 })
        ));
        assert!(EvaluationDomain::new(16).is_ok());
    }

    #[test]
    fn forward_fft_matches_horner() {
        let domain = EvaluationDomain::new(8).unwrap();
        let coeffs = felts(&[5, 1, 0, 2]);
        let poly = Polynomial::new(coeffs.clone());
        let evals = domain.forward_fft(&coeffs).unwrap();
        for i in 0..domain.size() {
            assert_eq!(evals[i], poly.evaluate(domain.element(i)), "index {i}");
        }
    }

    #[test]
    fn coset_fft_matches_horner() {
        let domain = EvaluationDomain::new_coset(8, FieldElement::GENERATOR).unwrap();
        let coeffs = felts(&[3, 9, 4, 7, 1]);
        let poly = Polynomial::new(coeffs.clone());
        let evals = domain.forward_fft(&coeffs).unwrap();
        for i in 0..domain.size() {
            assert_eq!(evals[i], poly.evaluate(domain.element(i)), "index {i}");
        }
    }

    #[test]
    fn fft_roundtrip() {
        let domain = EvaluationDomain::new_coset(16, FieldElement::from(11u64)).unwrap();
        let mut coeffs = felts(&[1, 3, 4, 1, 5, 6, 7, 2]);
        let evals = domain.forward_fft(&coeffs).unwrap();
        let recovered = domain.inverse_fft(&evals).unwrap();
        coeffs.resize(domain.size(), FieldElement::ZERO);
        assert_eq!(recovered, coeffs);
    }

    #[test]
    fn vanishing_polynomial_behaviour() {
        let domain = EvaluationDomain::new_coset(8, FieldElement::GENERATOR).unwrap();
        let vanishing = domain.vanishing_polynomial();
        for i in 0..domain.size() {
            assert_eq!(vanishing.evaluate(domain.element(i)), FieldElement::ZERO);
            assert_eq!(domain.vanishing_at(domain.element(i)), FieldElement::ZERO);
        }
        // A point off the coset must not vanish.
        let off = FieldElement::from(12345u64);
        assert_ne!(domain.vanishing_at(off), FieldElement::ZERO);
    }

    #[test]
    fn folded_domain_contains_squared_points() {
        let domain = EvaluationDomain::new_coset(16, FieldElement::GENERATOR).unwrap();
        let folded = domain.fold(4).unwrap();
        assert_eq!(folded.size(), 4);
        assert_eq!(folded.shift(), domain.shift().pow(4));
        for i in 0..folded.size() {
            assert_eq!(folded.element(i), domain.element(i).pow(4));
        }
    }

    #[test]
    fn domains_share_twiddle_tables() {
        let a = EvaluationDomain::new(64).unwrap();
        let b = EvaluationDomain::new_coset(64, FieldElement::GENERATOR).unwrap();
        assert!(Arc::ptr_eq(&a.twiddles, &b.twiddles));
    }
}
