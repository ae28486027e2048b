use proptest::prelude::*;
use redshift_pcs::fft::{DomainError, EvaluationDomain};
use redshift_pcs::field::{FieldElement, FieldElementOps, Polynomial};

fn deterministic_field_vector(len: usize) -> Vec<FieldElement> {
    let mut state = 0x9e37_79b9_7f4a_7c15u64;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(0x5851_f42d_4c95_7f2d)
                .wrapping_add(0x1405_7b7e_f767_814f);
            FieldElement::from_u64(state)
        })
        .collect()
}

#[test]
fn forward_inverse_roundtrip_recovers_coefficients() {
    let domain = EvaluationDomain::new(64).unwrap();
    let coeffs = deterministic_field_vector(64);
    let evals = domain.forward_fft(&coeffs).unwrap();
    assert_eq!(domain.inverse_fft(&evals).unwrap(), coeffs);
}

#[test]
fn coset_roundtrip_recovers_coefficients() {
    let domain = EvaluationDomain::new_coset(32, FieldElement::GENERATOR).unwrap();
    let coeffs = deterministic_field_vector(20);
    let evals = domain.forward_fft(&coeffs).unwrap();
    let mut recovered = domain.inverse_fft(&evals).unwrap();
    recovered.truncate(coeffs.len());
    assert_eq!(recovered, coeffs);
}

#[test]
fn forward_fft_agrees_with_horner_on_cosets() {
    let shift = FieldElement::from_u64(5);
    let domain = EvaluationDomain::new_coset(16, shift).unwrap();
    let poly = Polynomial::new(deterministic_field_vector(9));
    let evals = domain.forward_fft(&poly.coefficients).unwrap();
    for i in 0..16 {
        assert_eq!(evals[i], poly.evaluate(domain.element(i)));
    }
}

#[test]
fn vanishing_polynomial_is_zero_exactly_on_the_domain() {
    let shift = FieldElement::from_u64(3);
    let domain = EvaluationDomain::new_coset(8, shift).unwrap();
    for i in 0..8 {
        assert!(domain.vanishing_at(domain.element(i)).is_zero());
    }
    // A point off the coset: scale an element by a non-eighth root.
    let off = domain.element(1).mul(&FieldElement::from_u64(2));
    assert!(!domain.vanishing_at(off).is_zero());
    let poly = domain.vanishing_polynomial();
    assert_eq!(poly.evaluate(off), domain.vanishing_at(off));
}

#[test]
fn non_power_of_two_sizes_are_rejected() {
    for size in [0usize, 3, 12, 100] {
        let err = EvaluationDomain::new(size).unwrap_err();
        assert!(matches!(err, DomainError::InvalidSize { .. }));
    }
}

#[test]
fn folded_domain_squares_the_points() {
    let domain = EvaluationDomain::new_coset(16, FieldElement::from_u64(7)).unwrap();
    let folded = domain.fold(2).unwrap();
    assert_eq!(folded.size(), 8);
    for i in 0..8 {
        assert_eq!(folded.element(i), domain.element(i).square());
    }
}

proptest! {
    #[test]
    fn roundtrip_holds_for_arbitrary_coefficients(
        raw in proptest::collection::vec(any::<u64>(), 1..=64)
    ) {
        let coeffs: Vec<FieldElement> = raw.into_iter().map(FieldElement::from_u64).collect();
        let domain = EvaluationDomain::new(64).unwrap();
        let evals = domain.forward_fft(&coeffs).unwrap();
        let mut recovered = domain.inverse_fft(&evals).unwrap();
        recovered.truncate(coeffs.len());
        prop_assert_eq!(recovered, coeffs);
    }

    #[test]
    fn evaluations_match_horner(
        raw in proptest::collection::vec(any::<u64>(), 1..=16),
        shift in 1u64..1_000_000,
    ) {
        let coeffs: Vec<FieldElement> = raw.into_iter().map(FieldElement::from_u64).collect();
        let domain = EvaluationDomain::new_coset(16, FieldElement::from_u64(shift)).unwrap();
        let evals = domain.forward_fft(&coeffs).unwrap();
        let poly = Polynomial::new(coeffs);
        for i in 0..16 {
            prop_assert_eq!(evals[i], poly.evaluate(domain.element(i)));
        }
    }
}
