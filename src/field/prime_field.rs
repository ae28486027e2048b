//! Goldilocks prime field used by the commitment layer.
//!
//! Elements are canonical residues modulo `p = 2^64 - 2^32 + 1`. The modulus
//! has 2-adicity 32, so every power-of-two evaluation domain up to `2^32` has
//! a primitive root of unity, which is what the FRI folding schedule relies
//! on.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Metadata describing the underlying field modulus.
#[derive(Debug, Clone, Copy)]
pub struct Modulus {
    /// Prime modulus value in canonical representation.
    pub value: u64,
    /// Indicates whether the modulus passed primality checks during configuration.
    pub is_prime: bool,
}

impl Modulus {
    /// Creates a new modulus descriptor.
    pub const fn new(value: u64, is_prime: bool) -> Self {
        Self { value, is_prime }
    }
}

/// The Goldilocks modulus `2^64 - 2^32 + 1`.
pub const DEFAULT_MODULUS: Modulus = Modulus::new(0xffffffff00000001, true);

const P: u64 = DEFAULT_MODULUS.value;

/// Field element represented as a canonical value modulo the prime.
///
/// # Representation
///
/// * `FieldElement` is a transparent wrapper around a raw `u64`. The wrapped
///   integer is always within the range `[0, MODULUS.value)`.
/// * Serialization uses **little-endian** byte order.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FieldElement(pub u64);

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FieldElement").field(&self.0).finish()
    }
}

impl FieldElement {
    /// Canonical prime modulus associated with this field.
    pub const MODULUS: Modulus = DEFAULT_MODULUS;
    /// Designated generator of the full multiplicative group.
    pub const GENERATOR: FieldElement = FieldElement(7);
    /// `log2` of the order of the largest power-of-two subgroup.
    pub const TWO_ADICITY: u32 = 32;
    /// Additive identity in canonical form.
    pub const ZERO: FieldElement = FieldElement(0);
    /// Multiplicative identity in canonical form.
    pub const ONE: FieldElement = FieldElement(1);

    /// Builds an element from an arbitrary `u64`, reducing modulo the prime.
    pub const fn from_u64(value: u64) -> Self {
        Self(value % P)
    }

    /// Returns the canonical residue.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns `true` for the additive identity.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Raises the element to the given power via square-and-multiply.
    pub fn pow(&self, mut exponent: u64) -> Self {
        let mut base = *self;
        let mut acc = Self::ONE;
        while exponent != 0 {
            if exponent & 1 == 1 {
                acc = acc.mul(&base);
            }
            base = base.square();
            exponent >>= 1;
        }
        acc
    }

    /// Primitive `2^log2_size`-th root of unity.
    ///
    /// Derived as `g^((p-1) / 2^log2_size)`; callers must keep `log2_size`
    /// within the field's 2-adicity.
    pub fn two_adic_root(log2_size: u32) -> Option<Self> {
        if log2_size > Self::TWO_ADICITY {
            return None;
        }
        let exponent = (P - 1) >> log2_size;
        Some(Self::GENERATOR.pow(exponent))
    }

    /// Serializes into canonical little-endian bytes.
    pub fn to_bytes(&self) -> [u8; 8] {
        self.0.to_le_bytes()
    }

    /// Deserializes from canonical little-endian bytes, rejecting
    /// non-canonical residues.
    pub fn from_bytes(bytes: &[u8; 8]) -> Option<Self> {
        let value = u64::from_le_bytes(*bytes);
        if value < P {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Reduces a 16-byte little-endian challenge into a field element.
    ///
    /// A 128-bit intermediate keeps the modular bias below `2^-64`.
    pub fn from_transcript_bytes(bytes: &[u8; 16]) -> Self {
        let wide = u128::from_le_bytes(*bytes);
        Self((wide % P as u128) as u64)
    }
}

impl From<u64> for FieldElement {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<FieldElement> for u64 {
    fn from(value: FieldElement) -> Self {
        value.0
    }
}

/// Trait describing the high-level arithmetic contract for field elements.
pub trait FieldElementOps: Sized {
    /// Adds two canonical field elements, returning the canonical representative.
    fn add(&self, rhs: &Self) -> Self;
    /// Subtracts `rhs` from `self` in canonical form.
    fn sub(&self, rhs: &Self) -> Self;
    /// Computes the additive inverse of `self`.
    fn neg(&self) -> Self;
    /// Multiplies two field elements.
    fn mul(&self, rhs: &Self) -> Self;
    /// Squares the field element.
    fn square(&self) -> Self;
    /// Computes the multiplicative inverse, returning `None` for zero.
    fn inv(&self) -> Option<Self>;
}

impl FieldElementOps for FieldElement {
    fn add(&self, rhs: &Self) -> Self {
        let (sum, overflow) = self.0.overflowing_add(rhs.0);
        // The sum of two residues is below 2p < 2^65, so a single conditional
        // subtraction restores canonical form.
        if overflow || sum >= P {
            Self(sum.wrapping_sub(P))
        } else {
            Self(sum)
        }
    }

    fn sub(&self, rhs: &Self) -> Self {
        let (diff, borrow) = self.0.overflowing_sub(rhs.0);
        if borrow {
            Self(diff.wrapping_add(P))
        } else {
            Self(diff)
        }
    }

    fn neg(&self) -> Self {
        if self.0 == 0 {
            Self::ZERO
        } else {
            Self(P - self.0)
        }
    }

    fn mul(&self, rhs: &Self) -> Self {
        let wide = (self.0 as u128) * (rhs.0 as u128);
        Self((wide % P as u128) as u64)
    }

    fn square(&self) -> Self {
        self.mul(self)
    }

    fn inv(&self) -> Option<Self> {
        if self.0 == 0 {
            return None;
        }
        // Fermat: a^(p-2) = a^-1 for nonzero a.
        Some(self.pow(P - 2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_wraps_at_modulus() {
        let a = FieldElement(P - 1);
        assert_eq!(a.add(&FieldElement::ONE), FieldElement::ZERO);
        assert_eq!(a.add(&FieldElement(5)), FieldElement(4));
    }

    #[test]
    fn subtraction_borrows_through_zero() {
        let a = FieldElement(3);
        assert_eq!(a.sub(&FieldElement(5)), FieldElement(P - 2));
        assert_eq!(FieldElement::ZERO.sub(&FieldElement::ONE), FieldElement(P - 1));
    }

    #[test]
    fn inverse_roundtrip() {
        for raw in [1u64, 2, 7, 0xdeadbeef, P - 1] {
            let a = FieldElement(raw);
            let inv = a.inv().expect("nonzero element");
            assert_eq!(a.mul(&inv), FieldElement::ONE);
        }
        assert!(FieldElement::ZERO.inv().is_none());
    }

    #[test]
    fn two_adic_roots_have_exact_order() {
        for log2 in [1u32, 3, 5, 16] {
            let root = FieldElement::two_adic_root(log2).unwrap();
            assert_eq!(root.pow(1u64 << log2), FieldElement::ONE);
            assert_ne!(root.pow(1u64 << (log2 - 1)), FieldElement::ONE);
        }
        assert!(FieldElement::two_adic_root(33).is_none());
    }

    #[test]
    fn transcript_reduction_is_canonical() {
        let bytes = [0xffu8; 16];
        let reduced = FieldElement::from_transcript_bytes(&bytes);
        assert!(reduced.as_u64() < P);
    }

    #[test]
    fn canonical_byte_roundtrip() {
        let a = FieldElement(0x0123456789abcdef % P);
        let decoded = FieldElement::from_bytes(&a.to_bytes()).unwrap();
        assert_eq!(a, decoded);
        assert!(FieldElement::from_bytes(&u64::MAX.to_le_bytes()).is_none());
    }
}
