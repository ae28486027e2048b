//! Canonical serialization helpers for the commitment layer.
//!
//! Every byte layout in this crate (parameter sets, FRI proofs) is
//! little-endian with `u32` length prefixes. The helpers here provide a
//! shared vocabulary for encoding and decoding primitives with error context,
//! so that a truncated or padded payload is reported with the structure and
//! field that failed.

mod cursor;
mod error;
mod primitives;

pub use cursor::ByteReader;
pub use error::{SerError, SerKind, SerResult};
pub use primitives::{
    ensure_consumed, ensure_u32, read_bool, read_digest, read_felt, read_felt_vec, read_u16,
    read_u32, read_u64, read_u8, write_bool, write_digest, write_felt, write_felt_vec, write_u16,
    write_u32, write_u64, write_u8, DIGEST_SIZE,
};
