//! Byte-serial CRC-32 (IEEE 802.3) reference
//!
//! Reflected, LSB-first, one bit per step. Slow on purpose: this is the
//! ground truth the sparse accumulator must agree with bit for bit.
//!
//! | Parameter | Value        |
//! |-----------|--------------|
//! | `poly`    | `0xEDB88320` |
//! | `init`    | `0xFFFFFFFF` |
//! | `refin`   | true         |
//! | `refout`  | true         |
//! | `xorout`  | `0xFFFFFFFF` |

use crate::algebra::GENERATOR_REFLECTED;

/// Standard CRC-32 of `data`.
#[must_use]
pub const fn crc32_ieee(data: &[u8]) -> u32 {
    crc32_update(!0u32, data) ^ !0u32
}

/// Run the raw register over `data` starting from `crc`.
///
/// No pre- or post-complement is applied.
#[must_use]
pub const fn crc32_update(mut crc: u32, data: &[u8]) -> u32 {
    let mut i = 0;
    while i < data.len() {
        crc ^= data[i] as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ GENERATOR_REFLECTED
            } else {
                crc >> 1
            };
            bit += 1;
        }
        i += 1;
    }
    crc
}

// Check value from the CRC catalogue.
const _: () = assert!(crc32_ieee(b"123456789") == 0xCBF4_3926);
