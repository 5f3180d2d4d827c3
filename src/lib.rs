//! # Sparse CRC-32 via GF(2) Polynomial Arithmetic
//!
//! This library computes the standard IEEE 802.3 CRC-32 (gzip, zip, png,
//! ethernet) of a logical byte buffer that is almost entirely zero, given
//! only its length and the positions of its non-zero bytes.
//!
//! ## Core Algorithm
//!
//! Apart from the pre/post complement, CRC-32 is a linear map over GF(2):
//!
//! 1. **Remainder engine**: bit-serial reduction modulo G(x)
//! 2. **Carry-less multiply**: unreduced products of field elements
//! 3. **Ring arithmetic**: `a·b mod G(x)` and `x^(8e) mod G(x)` in O(log e)
//! 4. **Sparse accumulation**: XOR of each byte's shifted contribution,
//!    wrapped in the reflected/complemented CRC-32 convention
//!
//! Result: O(k · log L) ring multiplications for k entries over L bytes.
//!
//! ## Usage Example
//!
//! ```
//! use sparse_crc32::{compute_sparse_crc32, SparseByte, SparseFile};
//!
//! let file = SparseFile::from_entries(vec![SparseByte::new(0, 1), SparseByte::new(4, 55)], 8);
//! let crc = compute_sparse_crc32(&file)?;
//! assert_eq!(crc, sparse_crc32::reference::crc32_ieee(&file.materialize()?));
//! # Ok::<(), sparse_crc32::SparseCrcError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod algebra; // GF(2)[x]/G(x) arithmetic
pub mod sparse; // Sparse buffers and the checksum accumulator

// Re-exports for convenience
pub use algebra::{carryless_multiply, remainder, Crc32Ring};
pub use sparse::{
    combined_remainder, compute_sparse_crc32, compute_sparse_crc32_with, reference, SparseByte,
    SparseFile,
};

use thiserror::Error;

/// Default number of distinct entries before the parallel path is taken.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Configuration parameters for a checksum run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecksumConfig {
    /// Minimum number of distinct non-zero entries before per-entry
    /// contributions are spread across worker threads.
    ///
    /// Only consulted when the `parallel` feature is enabled.
    pub parallel_threshold: usize,
}

impl Default for ChecksumConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ChecksumConfig {
    /// Set the parallel threshold.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Whether `entries` distinct entries should go down the parallel path.
    pub fn use_parallel(&self, entries: usize) -> bool {
        cfg!(feature = "parallel") && entries >= self.parallel_threshold
    }
}

/// Errors that can occur while checksumming a sparse buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SparseCrcError {
    /// A sparse entry lies at or beyond the end of the logical buffer
    #[error("sparse entry at position {position} is out of range for size {size}")]
    OutOfRange {
        /// Offending entry position
        position: u64,
        /// Logical buffer size
        size: u64,
    },

    /// The remainder engine needs at least a 32-bit leading window
    #[error("remainder input of {len} bytes is shorter than the 4-byte leading window")]
    MalformedInput {
        /// Length of the rejected input
        len: usize,
    },

    /// The dense buffer does not fit in addressable memory
    #[error("cannot materialize a buffer of {size} bytes")]
    TooLargeToMaterialize {
        /// Logical buffer size
        size: u64,
    },
}
