use crate::hash::blake3::blake3_hash;
use crate::hash::deterministic::hash;

use super::ser::serialize_params;
use super::types::HashFamily;
use super::FriParams;

/// Computes the canonical parameter digest for a [`FriParams`] instance.
///
/// The digest reuses the hash family selected for commitments so that a
/// parameter set is bound with the same primitive it configures. The payload
/// is the canonical byte layout of [`serialize_params`] behind a fixed
/// domain tag.
pub fn params_hash(params: &FriParams) -> [u8; 32] {
    let payload = serialize_params(params);
    let mut prefixed = Vec::with_capacity(payload.len() + 16);
    prefixed.extend_from_slice(b"RS-PCS-PARAMS-V1");
    prefixed.extend_from_slice(&payload);
    match params.hash().family() {
        HashFamily::Blake2s => hash(&prefixed).into(),
        HashFamily::Blake3 => blake3_hash(&prefixed).into(),
    }
}

#[cfg(test)]
mod tests {
    use crate::params::{BuiltinProfile, FriParamsBuilder};

    #[test]
    fn hash_is_stable_and_discriminating() {
        let base = FriParamsBuilder::new().build().expect("valid params");
        assert_eq!(base.params_hash(), base.params_hash());

        let mut tweaked = FriParamsBuilder::new();
        tweaked.queries += 1;
        let tweaked = tweaked.build().expect("valid params");
        assert_ne!(base.params_hash(), tweaked.params_hash());

        let hisec = FriParamsBuilder::from_profile(BuiltinProfile::PROFILE_HISEC_X8)
            .build()
            .expect("valid params");
        assert_ne!(base.params_hash(), hisec.params_hash());
    }
}
