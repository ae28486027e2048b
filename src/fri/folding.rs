//! Coset folding arithmetic.
//!
//! A round with fold width `k` partitions the current domain of size `m`
//! into `m/k` fibers; fiber `i` is `{shift·w^(i + j·m/k)}` for `j < k`, the
//! set of points sharing the k-th power `element(i)^k`. Folding interpolates
//! the unique degree-<k polynomial through the fiber's evaluations and
//! reads it off at the challenge β, which divides the degree bound by `k`.

use crate::fft::EvaluationDomain;
use crate::field::{FieldElement, FieldElementOps};

/// Evaluates the interpolant through `points` at `beta`.
///
/// The abscissae are distinct coset points, so every Lagrange denominator is
/// invertible. For width 2 this reduces to the classic even/odd split.
pub(crate) fn fold_group(points: &[(FieldElement, FieldElement)], beta: FieldElement) -> FieldElement {
    let mut acc = FieldElement::ZERO;
    for (i, (x_i, y_i)) in points.iter().enumerate() {
        let mut numerator = FieldElement::ONE;
        let mut denominator = FieldElement::ONE;
        for (j, (x_j, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            numerator = numerator.mul(&beta.sub(x_j));
            denominator = denominator.mul(&x_i.sub(x_j));
        }
        let weight = denominator.inv().expect("coset points are distinct");
        acc = acc.add(&y_i.mul(&numerator).mul(&weight));
    }
    acc
}

/// Folds a full evaluation vector into the next round's vector.
///
/// `values.len()` must equal `domain.size()` and be divisible by `width`;
/// both hold for vectors produced by the committed layer pipeline.
pub(crate) fn fold_vector(
    domain: &EvaluationDomain,
    values: &[FieldElement],
    width: usize,
    beta: FieldElement,
) -> Vec<FieldElement> {
    let stride = values.len() / width;
    let mut folded = Vec::with_capacity(stride);
    for i in 0..stride {
        let points = fiber_points(domain, values, i, stride, width);
        folded.push(fold_group(&points, beta));
    }
    folded
}

/// Collects the `(x, y)` pairs of fiber `i`.
pub(crate) fn fiber_points(
    domain: &EvaluationDomain,
    values: &[FieldElement],
    fiber: usize,
    stride: usize,
    width: usize,
) -> Vec<(FieldElement, FieldElement)> {
    (0..width)
        .map(|j| {
            let index = fiber + j * stride;
            (domain.element(index), values[index])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Polynomial;

    #[test]
    fn width_two_fold_matches_even_odd_formula() {
        let domain = EvaluationDomain::new_coset(8, FieldElement::from_u64(3)).unwrap();
        let poly = Polynomial::new(
            (1u64..=6).map(FieldElement::from_u64).collect(),
        );
        let values = domain.forward_fft(&poly.coefficients).unwrap();
        let beta = FieldElement::from_u64(11);

        let folded = fold_vector(&domain, &values, 2, beta);

        // f(x) = e(x^2) + x·o(x^2) implies the fold at x is
        // e(x^2) + β·o(x^2) = (f(x) + f(-x))/2 + β·(f(x) - f(-x))/(2x).
        let two_inv = FieldElement::from_u64(2).inv().unwrap();
        for i in 0..4 {
            let x = domain.element(i);
            let f_pos = values[i];
            let f_neg = values[i + 4];
            let even = f_pos.add(&f_neg).mul(&two_inv);
            let odd = f_pos
                .sub(&f_neg)
                .mul(&two_inv)
                .mul(&x.inv().unwrap());
            assert_eq!(folded[i], even.add(&beta.mul(&odd)));
        }
    }

    #[test]
    fn folded_vector_is_codeword_of_folded_polynomial() {
        // f(x) = Σ x^r f_r(x^4); the width-4 fold of its codeword must be the
        // codeword of Σ β^r f_r(y) over the fourth-power domain.
        let domain = EvaluationDomain::new_coset(16, FieldElement::from_u64(5)).unwrap();
        let poly = Polynomial::new(
            (0u64..8).map(|i| FieldElement::from_u64(i * i + 1)).collect(),
        );
        let values = domain.forward_fft(&poly.coefficients).unwrap();
        let beta = FieldElement::from_u64(42);

        let folded = fold_vector(&domain, &values, 4, beta);
        let folded_domain = domain.fold(4).unwrap();

        let mut expected_coeffs = vec![FieldElement::ZERO; 2];
        for (idx, coeff) in poly.coefficients.iter().enumerate() {
            let residue = idx % 4;
            expected_coeffs[idx / 4] =
                expected_coeffs[idx / 4].add(&coeff.mul(&beta.pow(residue as u64)));
        }
        let expected = Polynomial::new(expected_coeffs);
        for i in 0..folded_domain.size() {
            assert_eq!(folded[i], expected.evaluate(folded_domain.element(i)));
        }
    }
}
