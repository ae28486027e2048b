use super::cursor::ByteReader;
use super::error::{SerError, SerKind, SerResult};
use crate::field::FieldElement;

/// Canonical digest width used across the commitment layer.
pub const DIGEST_SIZE: usize = 32;

/// Encodes a `u8` into the output buffer.
pub fn write_u8(out: &mut Vec<u8>, value: u8) {
    out.push(value);
}

/// Encodes a `u16` in little-endian order.
pub fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u32` in little-endian order.
pub fn write_u32(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Encodes a `u64` in little-endian order.
pub fn write_u64(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Writes a boolean flag as a single byte (`0` or `1`).
pub fn write_bool(out: &mut Vec<u8>, value: bool) {
    write_u8(out, value as u8);
}

/// Writes a raw 32-byte digest to the output buffer.
pub fn write_digest(out: &mut Vec<u8>, digest: &[u8; DIGEST_SIZE]) {
    out.extend_from_slice(digest);
}

/// Writes a field element in canonical little-endian order.
pub fn write_felt(out: &mut Vec<u8>, value: FieldElement) {
    write_u64(out, value.as_u64());
}

/// Writes a slice of field elements with a `u32` length prefix.
pub fn write_felt_vec(
    out: &mut Vec<u8>,
    values: &[FieldElement],
    kind: SerKind,
    field: &'static str,
) -> SerResult<()> {
    let count = ensure_u32(values.len(), kind, field)?;
    write_u32(out, count);
    for value in values {
        write_felt(out, *value);
    }
    Ok(())
}

/// Converts a `usize` into a `u32` length prefix.
pub fn ensure_u32(value: usize, kind: SerKind, field: &'static str) -> SerResult<u32> {
    u32::try_from(value).map_err(|_| SerError::invalid_length(kind, field))
}

/// Reads a `u8` from the cursor.
pub fn read_u8(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<u8> {
    Ok(cursor.read_array::<1>(kind, field)?[0])
}

/// Reads a `u16` in little-endian order.
pub fn read_u16(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<u16> {
    let bytes = cursor.read_array::<2>(kind, field)?;
    Ok(u16::from_le_bytes(bytes))
}

/// Reads a `u32` in little-endian order.
pub fn read_u32(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<u32> {
    let bytes = cursor.read_array::<4>(kind, field)?;
    Ok(u32::from_le_bytes(bytes))
}

/// Reads a `u64` in little-endian order.
pub fn read_u64(cursor: &mut ByteReader<'_>, kind: SerKind, field: &'static str) -> SerResult<u64> {
    let bytes = cursor.read_array::<8>(kind, field)?;
    Ok(u64::from_le_bytes(bytes))
}

/// Reads a boolean flag encoded as `0` or `1`.
pub fn read_bool(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<bool> {
    match read_u8(cursor, kind, field)? {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(SerError::invalid_value(kind, field)),
    }
}

/// Reads a 32-byte digest from the cursor.
pub fn read_digest(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<[u8; DIGEST_SIZE]> {
    cursor.read_array::<DIGEST_SIZE>(kind, field)
}

/// Reads a canonical field element, rejecting non-canonical residues.
pub fn read_felt(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<FieldElement> {
    let raw = cursor.read_array::<8>(kind, field)?;
    FieldElement::from_bytes(&raw).ok_or_else(|| SerError::invalid_value(kind, field))
}

/// Reads a length-prefixed vector of field elements.
pub fn read_felt_vec(
    cursor: &mut ByteReader<'_>,
    kind: SerKind,
    field: &'static str,
) -> SerResult<Vec<FieldElement>> {
    let count = read_u32(cursor, kind, field)? as usize;
    if count.saturating_mul(8) > cursor.remaining() {
        return Err(SerError::invalid_length(kind, field));
    }
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(read_felt(cursor, kind, field)?);
    }
    Ok(out)
}

/// Ensures that the reader consumed all bytes, otherwise returns a trailing-bytes error.
pub fn ensure_consumed(cursor: &ByteReader<'_>, kind: SerKind) -> SerResult<()> {
    let remaining = cursor.remaining();
    if remaining == 0 {
        Ok(())
    } else {
        Err(SerError::trailing_bytes(kind, cursor.position(), remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn felt_decoding_rejects_noncanonical_residues() {
        let mut out = Vec::new();
        write_u64(&mut out, u64::MAX);
        let mut cursor = ByteReader::new(&out);
        let err = read_felt(&mut cursor, SerKind::Proof, "felt").unwrap_err();
        assert!(matches!(err, SerError::InvalidValue { .. }));
    }

    #[test]
    fn felt_vec_rejects_oversized_length_prefix() {
        let mut out = Vec::new();
        write_u32(&mut out, u32::MAX);
        let mut cursor = ByteReader::new(&out);
        let err = read_felt_vec(&mut cursor, SerKind::Proof, "values").unwrap_err();
        assert!(matches!(err, SerError::InvalidLength { .. }));
    }

    #[test]
    fn trailing_bytes_are_reported() {
        let bytes = [1u8, 2, 3];
        let mut cursor = ByteReader::new(&bytes);
        let _ = read_u8(&mut cursor, SerKind::Proof, "first").unwrap();
        let err = ensure_consumed(&cursor, SerKind::Proof).unwrap_err();
        assert_eq!(
            err,
            SerError::TrailingBytes {
                kind: SerKind::Proof,
                consumed: 1,
                remaining: 2
            }
        );
    }
}
