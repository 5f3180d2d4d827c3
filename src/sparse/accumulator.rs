//! Sparse CRC-32 accumulator
//!
//! CRC-32 without its complements is GF(2)-linear, so the remainder of the
//! whole buffer is the XOR of each non-zero byte's remainder taken alone.
//! Each lone byte is reduced at the low end and then moved into place by
//! `x^(8·distance)`, with `distance` counted from the end of the buffer.
//!
//! The IEEE convention is layered on top:
//! - input bytes are reflected before entering the (non-reflected) ring
//! - the all-ones initial register is an `0xFF` perturbation on bytes 0..4
//! - the appended 32 zero bits are one final multiply by `x^32`, so the
//!   padded length never has to exist as a value
//! - the remainder is reflected and complemented on the way out

use std::collections::HashMap;

use tracing::{debug, trace};

use super::types::{validate_positions, SparseByte, SparseFile};
use crate::{algebra::Crc32Ring, ChecksumConfig, SparseCrcError};

/// Bytes of zero padding the standard algorithm appends (32 bits).
const CRC_PADDING: u64 = 4;

/// Width of the initial-value perturbation, in bytes.
const INIT_WINDOW: u64 = 4;

/// CRC-32 of the buffer `file` describes, using default configuration.
pub fn compute_sparse_crc32(file: &SparseFile) -> Result<u32, SparseCrcError> {
    compute_sparse_crc32_with(file, &ChecksumConfig::default())
}

/// CRC-32 of the buffer `file` describes.
///
/// Bit-identical to the byte-serial CRC-32 of `file.materialize()`. The
/// caller's entries are never touched; all adjustments happen on a working
/// copy.
pub fn compute_sparse_crc32_with(
    file: &SparseFile,
    config: &ChecksumConfig,
) -> Result<u32, SparseCrcError> {
    file.validate()?;
    let size = file.size;

    let mut working = collapse(
        file.entries
            .iter()
            .map(|entry| (entry.position, entry.value.reverse_bits())),
    );
    for position in 0..INIT_WINDOW {
        *working.entry(position).or_insert(0) ^= 0xFF;
    }

    // Init bytes past the end of a short buffer land in the padding itself.
    let (body, padding): (HashMap<u64, u8>, HashMap<u64, u8>) =
        working.into_iter().partition(|&(position, _)| position < size);

    let ring = Crc32Ring::new();
    let tail = padding.into_iter().fold(0, |acc, (position, value)| {
        // position < 4 here, so size < 4 and the distance cannot overflow
        acc ^ ring.place(value, size + CRC_PADDING - 1 - position)
    });
    let body = sum_contributions(body, size, config);
    let remainder = ring.mul_mod(body, ring.shift_bytes(CRC_PADDING)) ^ tail;
    let crc = remainder.reverse_bits() ^ 0xFFFF_FFFF;

    debug!(size, "sparse CRC-32 is {crc:#010x}");
    Ok(crc)
}

/// Remainder mod G(x) of the buffer `entries` describe, no CRC convention
/// applied.
///
/// Equal to [`crate::algebra::remainder`] of the materialized buffer
/// whenever `size >= 4`. Duplicate positions resolve last-writer-wins.
pub fn combined_remainder(entries: &[SparseByte], size: u64) -> Result<u32, SparseCrcError> {
    validate_positions(entries, size)?;
    let working = collapse(entries.iter().map(|entry| (entry.position, entry.value)));
    Ok(sum_contributions(working, size, &ChecksumConfig::default()))
}

/// One value per position, later entries overwriting earlier ones.
fn collapse(entries: impl Iterator<Item = (u64, u8)>) -> HashMap<u64, u8> {
    let mut working = HashMap::new();
    for (position, value) in entries {
        working.insert(position, value);
    }
    working
}

/// XOR of every entry's placed residue. Every position must be `< size`.
fn sum_contributions(working: HashMap<u64, u8>, size: u64, config: &ChecksumConfig) -> u32 {
    let entries: Vec<(u64, u8)> = working.into_iter().filter(|&(_, value)| value != 0).collect();
    let ring = Crc32Ring::new();
    let parallel = config.use_parallel(entries.len());

    debug!(entries = entries.len(), size, parallel, "summing sparse contributions");

    #[cfg(feature = "parallel")]
    {
        if parallel {
            return sum_parallel(&ring, &entries, size);
        }
    }

    entries.iter().fold(0, |acc, &(position, value)| {
        let contribution = ring.place(value, size - 1 - position);
        trace!(position, value, contribution, "placed byte");
        acc ^ contribution
    })
}

#[cfg(feature = "parallel")]
fn sum_parallel(ring: &Crc32Ring, entries: &[(u64, u8)], size: u64) -> u32 {
    use rayon::prelude::*;

    entries
        .par_iter()
        .map(|&(position, value)| ring.place(value, size - 1 - position))
        .reduce(|| 0, |a, b| a ^ b)
}
