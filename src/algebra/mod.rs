//! Quotient ring GF(2)[x]/G(x) for the IEEE CRC-32 generator
//!
//! Everything here works in non-reflected polynomial form:
//! - Bit-serial remainder engine (MSB of byte 0 is the highest degree)
//! - Carry-less products, never reduced
//! - Ring multiplication and square-and-multiply exponentiation

mod field;
mod polynomial;
mod ring;

pub use field::{remainder, remainder_of_word, GENERATOR, GENERATOR_REFLECTED};
pub use polynomial::{carryless_multiply, product_to_bytes};
pub use ring::{exponentiate, multiply_mod, Crc32Ring};
