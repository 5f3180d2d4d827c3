//! Sparse buffers and the CRC-32 accumulator built on the ring engine.

mod accumulator;
pub mod reference;
mod types;

pub use accumulator::{combined_remainder, compute_sparse_crc32, compute_sparse_crc32_with};
pub use types::{SparseByte, SparseFile};
