use redshift_pcs::field::{FieldElement, Polynomial};
use redshift_pcs::fri::{fri_prove, fri_verify, FriProof};
use redshift_pcs::params::{FriParams, FriParamsBuilder, GrindingParams, StepWidth};
use redshift_pcs::ser::SerError;
use redshift_pcs::transcript::{Transcript, TranscriptContext};

fn small_params(grinding: bool) -> FriParams {
    let mut builder = FriParamsBuilder::new();
    builder.domain.log2_size = 5;
    builder.domain.blowup = 2;
    builder.folding.steps = vec![StepWidth::W2, StepWidth::W2];
    builder.queries = 8;
    builder.grinding = GrindingParams {
        enabled: grinding,
        difficulty_bits: if grinding { 8 } else { 0 },
    };
    builder.build().expect("params must be valid")
}

fn sample_proof(params: &FriParams) -> FriProof {
    let poly = Polynomial::new((1u64..=16).map(FieldElement::from_u64).collect());
    let mut transcript = Transcript::new(params, TranscriptContext::FriMain);
    fri_prove(&poly, params, &mut transcript).expect("honest proof")
}

#[test]
fn real_proofs_roundtrip_through_bytes() {
    for grinding in [false, true] {
        let params = small_params(grinding);
        let proof = sample_proof(&params);
        let bytes = proof.to_bytes().unwrap();
        let decoded = FriProof::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, proof);

        let mut transcript = Transcript::new(&params, TranscriptContext::FriMain);
        assert!(fri_verify(&decoded, &params, &mut transcript).is_ok());
    }
}

#[test]
fn every_truncation_is_rejected() {
    let params = small_params(true);
    let bytes = sample_proof(&params).to_bytes().unwrap();
    for cut in 0..bytes.len() {
        assert!(
            FriProof::from_bytes(&bytes[..cut]).is_err(),
            "truncation at {cut} must not decode"
        );
    }
}

#[test]
fn trailing_bytes_are_rejected() {
    let params = small_params(false);
    let mut bytes = sample_proof(&params).to_bytes().unwrap();
    bytes.extend_from_slice(&[0u8; 3]);
    let err = FriProof::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, SerError::TrailingBytes { remaining: 3, .. }));
}

#[test]
fn noncanonical_terminal_felts_are_rejected() {
    let params = small_params(false);
    let proof = sample_proof(&params);
    let bytes = proof.to_bytes().unwrap();

    // terminal_len lives right after the version and the root section.
    let terminal_offset = 2 + 4 + proof.layer_roots.len() * 32;
    let mut corrupted = bytes.clone();
    assert!(!proof.terminal_polynomial.is_empty());
    // Overwrite the first coefficient with a value >= the modulus.
    corrupted[terminal_offset + 4..terminal_offset + 12]
        .copy_from_slice(&u64::MAX.to_le_bytes());
    let err = FriProof::from_bytes(&corrupted).unwrap_err();
    assert!(matches!(err, SerError::InvalidValue { .. }));
}

#[test]
fn nonce_flag_must_be_binary() {
    let params = small_params(false);
    let mut bytes = sample_proof(&params).to_bytes().unwrap();
    let flag = bytes.len() - 1;
    assert_eq!(bytes[flag], 0);
    bytes[flag] = 2;
    let err = FriProof::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, SerError::InvalidValue { .. }));
}
