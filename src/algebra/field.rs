//! Remainder engine modulo the CRC-32 generator
//!
//! Emulates the classic shift register: the first 4 bytes load the 32-bit
//! window, then every further bit is shifted in from the bottom, folding
//! G(x) back in whenever an x^32 term falls off the top.

use crate::SparseCrcError;

/// IEEE 802.3 generator in reflected (LSB-first) form.
pub const GENERATOR_REFLECTED: u32 = 0xEDB8_8320;

/// IEEE 802.3 generator in non-reflected form, x^32 term implicit.
///
/// G(x) = x^32 + x^26 + x^23 + x^22 + x^16 + x^12 + x^11 + x^10 + x^8 + x^7 + x^5 + x^4 + x^2 + x + 1
pub const GENERATOR: u32 = GENERATOR_REFLECTED.reverse_bits();

/// Remainder of `bytes`, read as a big-endian polynomial, modulo G(x).
///
/// Needs at least the 4-byte leading window.
pub fn remainder(bytes: &[u8]) -> Result<u32, SparseCrcError> {
    let (window, tail) = bytes
        .split_first_chunk::<4>()
        .ok_or(SparseCrcError::MalformedInput { len: bytes.len() })?;
    Ok(shift_in(u32::from_be_bytes(*window), tail))
}

/// Remainder of a lone 4-byte window.
///
/// A window has degree < 32 and is already its own residue.
#[inline]
pub fn remainder_of_word(window: [u8; 4]) -> u32 {
    shift_in(u32::from_be_bytes(window), &[])
}

/// Fold `tail` into an already-loaded window, MSB first.
#[inline]
pub(crate) fn shift_in(mut window: u32, tail: &[u8]) -> u32 {
    for &byte in tail {
        for bit in (0..8).rev() {
            let overflow = window >> 31;
            window = (window << 1) | u32::from((byte >> bit) & 1);
            if overflow == 1 {
                window ^= GENERATOR;
            }
        }
    }
    window
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_forms() {
        assert_eq!(GENERATOR, 0x04C1_1DB7);
        assert_eq!(GENERATOR.reverse_bits(), GENERATOR_REFLECTED);
    }

    #[test]
    fn test_short_input_rejected() {
        for len in 0..4 {
            let bytes = vec![0xAB; len];
            assert_eq!(
                remainder(&bytes),
                Err(SparseCrcError::MalformedInput { len })
            );
        }
    }

    #[test]
    fn test_window_is_its_own_residue() {
        assert_eq!(remainder(&[0x80, 0, 0, 0]).unwrap(), 0x8000_0000);
        assert_eq!(remainder(&[0xDE, 0xAD, 0xBE, 0xEF]).unwrap(), 0xDEAD_BEEF);
        assert_eq!(remainder_of_word([0, 0, 1, 0]), 0x100);
    }

    #[test]
    fn test_x32_reduces_to_generator() {
        // x^32 ≡ G(x) - x^32
        assert_eq!(remainder(&[0, 0, 0, 1, 0, 0, 0, 0]).unwrap(), GENERATOR);
    }

    #[test]
    fn test_leading_zeros_are_ignored() {
        let short = remainder(&[0, 1, 0, 0, 0, 0]).unwrap();
        let longer = remainder(&[0, 0, 1, 0, 0, 0, 0]).unwrap();
        let longest = remainder(&[0, 0, 0, 1, 0, 0, 0, 0]).unwrap();
        assert_eq!(short, longer);
        assert_eq!(longer, longest);
    }

    #[test]
    fn test_generator_divides_itself() {
        // G(x) as 5 bytes: 0x01_04C11DB7
        let g = [0x01, 0x04, 0xC1, 0x1D, 0xB7];
        assert_eq!(remainder(&g).unwrap(), 0);
    }
}
