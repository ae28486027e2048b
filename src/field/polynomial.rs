//! Polynomial utilities operating over the prime field.
//! The module provides deterministic arithmetic for committed codewords.

use super::prime_field::FieldElementOps;
use super::FieldElement;

/// Dense polynomial represented by coefficients in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    /// Coefficients starting from the constant term.
    pub coefficients: Vec<FieldElement>,
}

impl Polynomial {
    /// Constructs a polynomial from raw coefficients.
    pub fn new(coefficients: Vec<FieldElement>) -> Self {
        Self { coefficients }
    }

    /// The zero polynomial.
    pub fn zero() -> Self {
        Self {
            coefficients: Vec::new(),
        }
    }

    /// Evaluates the polynomial at the provided point using Horner's method.
    pub fn evaluate(&self, point: FieldElement) -> FieldElement {
        let mut result = FieldElement::ZERO;
        for coeff in self.coefficients.iter().rev() {
            result = result.mul(&point).add(coeff);
        }
        result
    }

    /// Returns the degree of the polynomial or `None` if the polynomial is zero.
    pub fn degree(&self) -> Option<usize> {
        for (idx, coeff) in self.coefficients.iter().enumerate().rev() {
            if coeff.as_u64() != 0 {
                return Some(idx);
            }
        }
        None
    }

    /// Drops trailing zero coefficients in place.
    pub fn truncate_leading_zeros(&mut self) {
        let len = self.degree().map_or(0, |d| d + 1);
        self.coefficients.truncate(len);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_matches_direct_evaluation() {
        // 3 + 2x + x^2 at x = 5
        let poly = Polynomial::new(vec![
            FieldElement(3),
            FieldElement(2),
            FieldElement(1),
        ]);
        assert_eq!(poly.evaluate(FieldElement(5)), FieldElement(38));
    }

    #[test]
    fn degree_ignores_trailing_zeros() {
        let mut poly = Polynomial::new(vec![
            FieldElement(1),
            FieldElement(4),
            FieldElement::ZERO,
            FieldElement::ZERO,
        ]);
        assert_eq!(poly.degree(), Some(1));
        poly.truncate_leading_zeros();
        assert_eq!(poly.coefficients.len(), 2);
        assert_eq!(Polynomial::zero().degree(), None);
    }
}
