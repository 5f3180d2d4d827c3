//! Multiplication and exponentiation in GF(2)[x]/G(x)
//!
//! The only place the (arbitrarily large) byte distance enters the
//! computation is [`Crc32Ring::pow`], which is O(log e) multiplications.

use super::field::{remainder_of_word, shift_in};
use super::polynomial::{carryless_multiply, product_to_bytes};

/// Multiply two residues modulo G(x).
///
/// The 63-bit carry-less product is serialized big-endian and run through
/// the remainder engine.
#[inline]
pub fn multiply_mod(a: u32, b: u32) -> u32 {
    let [b0, b1, b2, b3, tail @ ..] = product_to_bytes(carryless_multiply(a, b));
    shift_in(u32::from_be_bytes([b0, b1, b2, b3]), &tail)
}

/// `base^exponent mod G(x)` with a freshly derived ring.
pub fn exponentiate(base: u32, exponent: u64) -> u32 {
    Crc32Ring::new().pow(base, exponent)
}

/// The constants a sparse accumulation needs, derived once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32Ring {
    /// Residue of 1
    identity: u32,
    /// Residue of x^8 (one byte of left shift)
    byte_shift: u32,
}

impl Default for Crc32Ring {
    fn default() -> Self {
        Self::new()
    }
}

impl Crc32Ring {
    /// Derive the identity and `x^8` residues from the remainder engine.
    pub fn new() -> Self {
        Self {
            identity: remainder_of_word([0, 0, 0, 1]),
            byte_shift: remainder_of_word([0, 0, 1, 0]),
        }
    }

    /// Multiplicative identity residue.
    pub fn identity(&self) -> u32 {
        self.identity
    }

    /// Residue of `x^8`.
    pub fn byte_shift(&self) -> u32 {
        self.byte_shift
    }

    /// Ring multiplication.
    #[inline]
    pub fn mul_mod(&self, a: u32, b: u32) -> u32 {
        multiply_mod(a, b)
    }

    /// Square-and-multiply, low exponent bit first.
    pub fn pow(&self, base: u32, exponent: u64) -> u32 {
        let mut acc = self.identity;
        let mut power = base;
        let mut e = exponent;

        while e != 0 {
            if e & 1 == 1 {
                acc = self.mul_mod(acc, power);
            }
            e >>= 1;
            if e != 0 {
                power = self.mul_mod(power, power);
            }
        }

        acc
    }

    /// `x^(8·bytes) mod G(x)`: moves a residue `bytes` positions toward
    /// higher degree.
    pub fn shift_bytes(&self, bytes: u64) -> u32 {
        self.pow(self.byte_shift, bytes)
    }

    /// Contribution of a lone `value` byte sitting `distance` bytes before
    /// the end of an otherwise all-zero buffer.
    #[inline]
    pub fn place(&self, value: u8, distance: u64) -> u32 {
        let residue = remainder_of_word([0, 0, 0, value]);
        self.mul_mod(residue, self.shift_bytes(distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::remainder;

    #[test]
    fn test_ring_constants() {
        let ring = Crc32Ring::new();
        assert_eq!(ring.identity(), 1);
        assert_eq!(ring.byte_shift(), 0x100);
    }

    #[test]
    fn test_pow_boundaries() {
        let ring = Crc32Ring::new();
        assert_eq!(ring.pow(ring.byte_shift(), 0), ring.identity());
        assert_eq!(ring.pow(ring.byte_shift(), 1), ring.byte_shift());
        assert_eq!(exponentiate(0xDEAD_BEEF, 0), 1);
        assert_eq!(exponentiate(0, 5), 0);
    }

    #[test]
    fn test_square_matches_long_division() {
        // (x^32)^2 = x^64
        let x32 = remainder(&[1, 0, 0, 0, 0]).unwrap();
        let x64 = remainder(&[1, 0, 0, 0, 0, 0, 0, 0, 0]).unwrap();
        assert_eq!(multiply_mod(x32, x32), x64);
    }

    #[test]
    fn test_shift_bytes_matches_padding() {
        let ring = Crc32Ring::new();
        for bytes in 0..40u64 {
            let mut padded = vec![0, 0, 0, 1];
            padded.resize(4 + bytes as usize, 0);
            assert_eq!(ring.shift_bytes(bytes), remainder(&padded).unwrap(), "x^(8·{})", bytes);
        }
    }

    #[test]
    fn test_pow_adds_exponents() {
        let ring = Crc32Ring::new();
        let m = 1_000_003u64;
        let n = 77_777u64;
        assert_eq!(
            ring.shift_bytes(m + n),
            ring.mul_mod(ring.shift_bytes(m), ring.shift_bytes(n))
        );
    }

    #[test]
    fn test_place_matches_dense_remainder() {
        let ring = Crc32Ring::new();
        let mut dense = vec![0u8; 12];
        dense[5] = 0xA7;
        assert_eq!(ring.place(0xA7, 6), remainder(&dense).unwrap());
    }
}
