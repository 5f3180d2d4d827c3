//! Sparse buffer description
//!
//! A logical buffer of `size` bytes, all zero except at the listed
//! positions.

use crate::SparseCrcError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single non-zero byte of a sparse buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SparseByte {
    /// 0-based offset into the logical buffer.
    pub position: u64,
    /// Byte stored at that offset.
    pub value: u8,
}

impl SparseByte {
    /// Construct a new sparse byte.
    pub fn new(position: u64, value: u8) -> Self {
        Self { position, value }
    }
}

impl From<(u64, u8)> for SparseByte {
    fn from((position, value): (u64, u8)) -> Self {
        Self::new(position, value)
    }
}

/// Sparse description of a mostly-zero buffer.
///
/// Every entry must satisfy `position < size`. Entries sharing a position
/// resolve last-writer-wins, both in [`SparseFile::materialize`] and in the
/// checksum.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SparseFile {
    /// Non-zero bytes, in caller order.
    pub entries: Vec<SparseByte>,
    /// Total logical length in bytes.
    pub size: u64,
}

impl SparseFile {
    /// An all-zero buffer of `size` bytes.
    pub fn new(size: u64) -> Self {
        Self {
            entries: Vec::new(),
            size,
        }
    }

    /// Wrap caller-provided entries.
    pub fn from_entries(entries: Vec<SparseByte>, size: u64) -> Self {
        Self { entries, size }
    }

    /// Append an entry. Later entries win over earlier ones at the same
    /// position.
    pub fn push(&mut self, position: u64, value: u8) {
        self.entries.push(SparseByte::new(position, value));
    }

    /// Whether the logical buffer has zero length.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Check every entry lies inside the logical buffer.
    pub fn validate(&self) -> Result<(), SparseCrcError> {
        validate_positions(&self.entries, self.size)
    }

    /// Expand into the dense buffer this description stands for.
    ///
    /// Test oracle only: allocates `size` bytes.
    pub fn materialize(&self) -> Result<Vec<u8>, SparseCrcError> {
        self.validate()?;
        let len = usize::try_from(self.size)
            .map_err(|_| SparseCrcError::TooLargeToMaterialize { size: self.size })?;

        let mut buffer = vec![0u8; len];
        for entry in &self.entries {
            // validated above: position < size <= usize::MAX
            buffer[entry.position as usize] = entry.value;
        }
        Ok(buffer)
    }
}

pub(crate) fn validate_positions(entries: &[SparseByte], size: u64) -> Result<(), SparseCrcError> {
    match entries.iter().find(|entry| entry.position >= size) {
        Some(entry) => Err(SparseCrcError::OutOfRange {
            position: entry.position,
            size,
        }),
        None => Ok(()),
    }
}
