use super::error::{SerError, SerKind, SerResult};

/// Consuming view over an input slice.
///
/// Each read splits the requested prefix off the front and records how many
/// bytes have been taken, so a short buffer surfaces as an
/// [`SerError::UnexpectedEnd`] naming the field that ran dry and the final
/// trailing-bytes check can report exact offsets.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    rest: &'a [u8],
    consumed: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self {
            rest: bytes,
            consumed: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.rest.len()
    }

    /// Takes the next `len` bytes, or fails with the offending `field`.
    pub fn read_exact(
        &mut self,
        len: usize,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<&'a [u8]> {
        if self.rest.len() < len {
            return Err(SerError::unexpected_end(kind, field));
        }
        let (taken, rest) = self.rest.split_at(len);
        self.rest = rest;
        self.consumed += len;
        Ok(taken)
    }

    /// Takes the next `N` bytes as a fixed-size array.
    pub fn read_array<const N: usize>(
        &mut self,
        kind: SerKind,
        field: &'static str,
    ) -> SerResult<[u8; N]> {
        let taken = self.read_exact(N, kind, field)?;
        let mut out = [0u8; N];
        out.copy_from_slice(taken);
        Ok(out)
    }
}
