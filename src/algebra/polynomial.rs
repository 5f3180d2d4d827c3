//! Carry-less (GF(2)) multiplication
//!
//! Products are left unreduced; a 32×32 product fits in 63 bits.

/// Multiply `a` and `b` as polynomials over GF(2).
///
/// Russian peasant with XOR in place of addition. Runs at most 32 rounds,
/// one per bit of `a`.
pub fn carryless_multiply(a: u32, b: u32) -> u64 {
    let mut a = a;
    let mut b = u64::from(b);
    let mut product = 0u64;

    while a != 0 {
        if a & 1 != 0 {
            product ^= b;
        }
        a >>= 1;
        b <<= 1;
    }

    product
}

/// Big-endian bytes of an unreduced product, ready for the remainder engine.
#[inline]
pub fn product_to_bytes(product: u64) -> [u8; 8] {
    product.to_be_bytes()
}
