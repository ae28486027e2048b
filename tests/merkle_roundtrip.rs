use proptest::prelude::*;
use redshift_pcs::field::FieldElement;
use redshift_pcs::merkle::{
    encode_leaf, verify_path, Blake2sMerkleHasher, Blake3MerkleHasher, Leaf, MerkleHasher,
    MerkleTree,
};
use redshift_pcs::params::{BuiltinProfile, FriParams, FriParamsBuilder};

fn params(profile: BuiltinProfile) -> FriParams {
    FriParamsBuilder::from_profile(profile)
        .build()
        .expect("profile must be valid")
}

fn leaves_from(params: &FriParams, values: &[u64]) -> Vec<Leaf> {
    values
        .iter()
        .map(|&v| {
            encode_leaf(
                params,
                &[FieldElement::from_u64(v), FieldElement::from_u64(v ^ 0xff)],
            )
        })
        .collect()
}

fn roundtrip_with<H: MerkleHasher>(params: &FriParams, count: usize) {
    let values: Vec<u64> = (0..count as u64).map(|i| i * 31 + 7).collect();
    let leaves = leaves_from(params, &values);
    let tree = MerkleTree::<H>::commit(params, &leaves).unwrap();
    let root = tree.root();
    for (index, leaf) in leaves.iter().enumerate() {
        let path = tree.open(index).unwrap();
        assert!(verify_path::<H>(params, &root, leaf, index, count, &path));
    }
}

#[test]
fn every_index_opens_under_both_hash_families() {
    let blake2s = params(BuiltinProfile::PROFILE_X4);
    let blake3 = params(BuiltinProfile::PROFILE_HISEC_X8);
    for count in [1usize, 2, 7, 16, 33] {
        roundtrip_with::<Blake2sMerkleHasher>(&blake2s, count);
        roundtrip_with::<Blake3MerkleHasher>(&blake3, count);
    }
}

#[test]
fn roots_differ_between_hash_families() {
    let blake2s_params = params(BuiltinProfile::PROFILE_X4);
    let blake3_params = params(BuiltinProfile::PROFILE_HISEC_X8);
    let values: Vec<u64> = (0..8).collect();
    let a = MerkleTree::<Blake2sMerkleHasher>::commit(
        &blake2s_params,
        &leaves_from(&blake2s_params, &values),
    )
    .unwrap();
    let b = MerkleTree::<Blake3MerkleHasher>::commit(
        &blake3_params,
        &leaves_from(&blake3_params, &values),
    )
    .unwrap();
    assert_ne!(a.root(), b.root());
}

#[test]
fn leaf_tamper_is_rejected() {
    let params = params(BuiltinProfile::PROFILE_X4);
    let leaves = leaves_from(&params, &[1, 2, 3, 4, 5, 6]);
    let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
    let root = tree.root();
    let path = tree.open(2).unwrap();
    let forged = encode_leaf(
        &params,
        &[FieldElement::from_u64(99), FieldElement::from_u64(98)],
    );
    assert!(!verify_path::<Blake2sMerkleHasher>(
        &params, &root, &forged, 2, 6, &path
    ));
}

proptest! {
    #[test]
    fn single_bit_flips_in_the_path_are_rejected(
        count in 2usize..40,
        seed in any::<u64>(),
        flip_bit in 0u8..8,
    ) {
        let params = params(BuiltinProfile::PROFILE_X4);
        let values: Vec<u64> = (0..count as u64).map(|i| i.wrapping_mul(seed | 1)).collect();
        let leaves = leaves_from(&params, &values);
        let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
        let root = tree.root();

        let index = (seed as usize) % count;
        let mut path = tree.open(index).unwrap();
        prop_assert!(verify_path::<Blake2sMerkleHasher>(
            &params, &root, &leaves[index], index, count, &path
        ));

        let entry = (seed as usize / 7) % path.siblings.len();
        let byte = (seed as usize / 13) % 32;
        path.siblings[entry][byte] ^= 1 << flip_bit;
        prop_assert!(!verify_path::<Blake2sMerkleHasher>(
            &params, &root, &leaves[index], index, count, &path
        ));
    }

    #[test]
    fn wrong_index_claims_are_rejected(count in 2usize..20, seed in any::<u64>()) {
        let params = params(BuiltinProfile::PROFILE_X4);
        let values: Vec<u64> = (0..count as u64).map(|i| i + seed % 1000).collect();
        let leaves = leaves_from(&params, &values);
        let tree = MerkleTree::<Blake2sMerkleHasher>::commit(&params, &leaves).unwrap();
        let root = tree.root();

        let index = (seed as usize) % count;
        let other = (index + 1) % count;
        let path = tree.open(index).unwrap();
        prop_assert!(!verify_path::<Blake2sMerkleHasher>(
            &params, &root, &leaves[index], other, count, &path
        ));
    }
}
