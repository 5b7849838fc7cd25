use std::io::{Read, Write};

use sucds::bit_vectors::{Access, BitVector, NumBits};
use sucds::Serializable;

use crate::error::{Error, Result};
use crate::succinct;

/// Marks the first column of every suffix group.
///
/// A suffix group is a maximal run of consecutive columns sharing the same
/// (k-1)-suffix. An empty marker means the index has no streaming support.
#[derive(Clone, Debug, Default)]
pub struct SuffixGroups {
    marks: BitVector,
}
impl SuffixGroups {
    /// Wraps a marker bit vector; column 0 must be marked unless it is empty.
    #[must_use]
    pub fn new(marks: BitVector) -> Self {
        Self { marks }
    }

    /// A marker with no columns, i.e. no streaming support
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Number of suffix groups
    #[must_use]
    pub fn num_groups(&self) -> usize {
        self.marks.num_ones()
    }

    /// Checks if `col` begins a suffix group
    #[inline]
    #[must_use]
    pub fn is_group_start(&self, col: usize) -> bool {
        self.marks.access(col).unwrap_or(false)
    }

    /// First column of the suffix group containing `col`
    ///
    /// Walks backward over unmarked columns. Column 0 is always marked, so the
    /// walk stops there at the latest.
    #[inline]
    #[must_use]
    pub fn group_start(&self, mut col: usize) -> usize {
        while col > 0 && !self.is_group_start(col) {
            col -= 1;
        }
        col
    }

    /// The raw marker bits
    #[must_use]
    pub fn bits(&self) -> &BitVector {
        &self.marks
    }

    pub(crate) fn serialize_into<W: Write>(&self, writer: &mut W) -> Result<usize> {
        self.marks
            .serialize_into(&mut *writer)
            .map_err(Error::from_succinct_write)
    }

    pub(crate) fn deserialize_from<R: Read>(reader: &mut R) -> Result<Self> {
        let marks = succinct::read_bit_vector(reader, "suffix groups")?;
        Ok(Self { marks })
    }
}
