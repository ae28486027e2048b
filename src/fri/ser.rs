//! Canonical byte layout for [`FriProof`].
//!
//! ```text
//! u16  version (=1)
//! u32  root_count      || root_count × [u8;32]
//! u32  terminal_len    || terminal_len × u64 felt (LE)
//! u32  query_count     || per query:
//!        u32 position
//!        root_count × ( u32 value_count || felts ; u32 path_len || [u8;32]s )
//! u8   nonce flag (0|1) || u64 nonce when flag = 1
//! ```
//!
//! Every length prefix is bounded against the remaining input before
//! allocation and decoding rejects trailing bytes.

use crate::ser::{
    ensure_consumed, ensure_u32, read_bool, read_digest, read_u16, read_u32, read_u64,
    write_bool, write_digest, write_felt_vec, write_u16, write_u32, write_u64, ByteReader,
    SerError, SerKind, SerResult, DIGEST_SIZE,
};

use super::proof::{FriLayerOpening, FriProof, FriQueryProof};

pub(crate) const PROOF_VERSION: u16 = 1;

pub(crate) fn serialize_proof(proof: &FriProof) -> SerResult<Vec<u8>> {
    let mut out = Vec::new();
    write_u16(&mut out, PROOF_VERSION);

    let root_count = ensure_u32(proof.layer_roots.len(), SerKind::Proof, "root_count")?;
    write_u32(&mut out, root_count);
    for root in &proof.layer_roots {
        write_digest(&mut out, root);
    }

    write_felt_vec(
        &mut out,
        &proof.terminal_polynomial,
        SerKind::Proof,
        "terminal_polynomial",
    )?;

    let query_count = ensure_u32(proof.queries.len(), SerKind::Proof, "query_count")?;
    write_u32(&mut out, query_count);
    for query in &proof.queries {
        write_u32(&mut out, query.position);
        for opening in &query.layers {
            write_felt_vec(&mut out, &opening.values, SerKind::Query, "values")?;
            let path_len = ensure_u32(opening.path.len(), SerKind::Query, "path_len")?;
            write_u32(&mut out, path_len);
            for digest in &opening.path {
                write_digest(&mut out, digest);
            }
        }
    }

    write_bool(&mut out, proof.grinding_nonce.is_some());
    if let Some(nonce) = proof.grinding_nonce {
        write_u64(&mut out, nonce);
    }
    Ok(out)
}

pub(crate) fn deserialize_proof(bytes: &[u8]) -> SerResult<FriProof> {
    let mut cursor = ByteReader::new(bytes);

    let version = read_u16(&mut cursor, SerKind::Proof, "version")?;
    if version != PROOF_VERSION {
        return Err(SerError::invalid_value(SerKind::Proof, "version"));
    }

    let root_count = read_u32(&mut cursor, SerKind::Proof, "root_count")? as usize;
    if root_count.saturating_mul(DIGEST_SIZE) > cursor.remaining() {
        return Err(SerError::invalid_length(SerKind::Proof, "root_count"));
    }
    let mut layer_roots = Vec::with_capacity(root_count);
    for _ in 0..root_count {
        layer_roots.push(read_digest(&mut cursor, SerKind::Proof, "layer_root")?);
    }

    let terminal_polynomial =
        crate::ser::read_felt_vec(&mut cursor, SerKind::Proof, "terminal_polynomial")?;

    let query_count = read_u32(&mut cursor, SerKind::Proof, "query_count")? as usize;
    // A query carries at least a position plus two prefixes per round.
    if query_count.saturating_mul(4) > cursor.remaining() {
        return Err(SerError::invalid_length(SerKind::Proof, "query_count"));
    }
    let mut queries = Vec::with_capacity(query_count);
    for _ in 0..query_count {
        let position = read_u32(&mut cursor, SerKind::Query, "position")?;
        let mut layers = Vec::with_capacity(root_count);
        for _ in 0..root_count {
            let values = crate::ser::read_felt_vec(&mut cursor, SerKind::Query, "values")?;
            let path_len = read_u32(&mut cursor, SerKind::Query, "path_len")? as usize;
            if path_len.saturating_mul(DIGEST_SIZE) > cursor.remaining() {
                return Err(SerError::invalid_length(SerKind::Query, "path_len"));
            }
            let mut path = Vec::with_capacity(path_len);
            for _ in 0..path_len {
                path.push(read_digest(&mut cursor, SerKind::Query, "path")?);
            }
            layers.push(FriLayerOpening { values, path });
        }
        queries.push(FriQueryProof { position, layers });
    }

    let grinding_nonce = if read_bool(&mut cursor, SerKind::Proof, "nonce_flag")? {
        Some(read_u64(&mut cursor, SerKind::Proof, "nonce")?)
    } else {
        None
    };

    ensure_consumed(&cursor, SerKind::Proof)?;
    Ok(FriProof {
        layer_roots,
        terminal_polynomial,
        queries,
        grinding_nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElement;

    fn sample_proof() -> FriProof {
        FriProof {
            layer_roots: vec![[1u8; 32], [2u8; 32]],
            terminal_polynomial: vec![FieldElement::from_u64(9), FieldElement::from_u64(4)],
            queries: vec![FriQueryProof {
                position: 17,
                layers: vec![
                    FriLayerOpening {
                        values: vec![FieldElement::from_u64(1), FieldElement::from_u64(2)],
                        path: vec![[3u8; 32]],
                    },
                    FriLayerOpening {
                        values: vec![FieldElement::from_u64(5), FieldElement::from_u64(6)],
                        path: vec![[4u8; 32], [5u8; 32]],
                    },
                ],
            }],
            grinding_nonce: Some(0xdead_beef),
        }
    }

    #[test]
    fn proof_bytes_roundtrip() {
        let proof = sample_proof();
        let bytes = serialize_proof(&proof).unwrap();
        assert_eq!(deserialize_proof(&bytes).unwrap(), proof);
    }

    #[test]
    fn truncated_input_is_rejected() {
        let bytes = serialize_proof(&sample_proof()).unwrap();
        for cut in [0, 1, 10, bytes.len() - 1] {
            assert!(deserialize_proof(&bytes[..cut]).is_err());
        }
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = serialize_proof(&sample_proof()).unwrap();
        bytes.push(0);
        let err = deserialize_proof(&bytes).unwrap_err();
        assert!(matches!(err, SerError::TrailingBytes { .. }));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let mut bytes = serialize_proof(&sample_proof()).unwrap();
        bytes[0] = 9;
        let err = deserialize_proof(&bytes).unwrap_err();
        assert!(matches!(err, SerError::InvalidValue { .. }));
    }

    #[test]
    fn oversized_root_count_is_rejected() {
        let mut bytes = Vec::new();
        write_u16(&mut bytes, PROOF_VERSION);
        write_u32(&mut bytes, u32::MAX);
        let err = deserialize_proof(&bytes).unwrap_err();
        assert!(matches!(err, SerError::InvalidLength { .. }));
    }
}
