//! Binary persistence of an index
//!
//! Fields are written in this fixed order:
//!
//! | Field | Encoding |
//! |-------|----------|
//! | rank capability | its own self-delimiting serialization |
//! | suffix-group marker | `sucds` bit vector serialization (may be empty) |
//! | C-array | `u64` byte count (32) followed by four `u64` |
//! | `n_nodes` | `u64` |
//! | `k` | `u64` |
//! | `colex` | one byte, nonzero = true |
//!
//! Integers are in native byte order. `n_kmers` is not persisted.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use byteorder::{NativeEndian, ReadBytesExt, WriteBytesExt};
use memmap2::Mmap;

use crate::alphabet::{Symbol, SIGMA};
use crate::error::{LoadError, Result};
use crate::index::{compute_c_array, SbwtIndex};
use crate::subset_rank::{SubsetRank, SubsetRankSerialize};
use crate::suffix_group::SuffixGroups;

/// Number of bytes in the serialized C-array payload
const C_ARRAY_BYTES: u64 = (SIGMA * size_of::<u64>()) as u64;

impl<R: SubsetRank + SubsetRankSerialize> SbwtIndex<R> {
    /// Writes the index and returns the number of bytes written.
    pub fn serialize<W: Write>(&self, writer: &mut W) -> Result<usize> {
        let mut written = 0;
        written += self.subset_rank.serialize_into(writer)?;
        written += self.suffix_groups.serialize_into(writer)?;

        writer.write_u64::<NativeEndian>(C_ARRAY_BYTES)?;
        writer.write_all(bytemuck::cast_slice::<u64, u8>(&self.c_array))?;
        written += size_of::<u64>() + C_ARRAY_BYTES as usize;

        writer.write_u64::<NativeEndian>(self.n_nodes as u64)?;
        writer.write_u64::<NativeEndian>(self.k as u64)?;
        writer.write_u8(u8::from(self.colex))?;
        written += 2 * size_of::<u64>() + 1;

        Ok(written)
    }

    /// Writes the index to a file and returns the number of bytes written.
    pub fn serialize_to_path<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let mut writer = BufWriter::new(File::create(path.as_ref())?);
        let written = self.serialize(&mut writer)?;
        writer.flush()?;
        log::info!("Wrote {written} bytes to {}", path.as_ref().display());
        Ok(written)
    }

    /// Reads an index previously written with [`SbwtIndex::serialize`].
    ///
    /// Nothing is returned unless every field was read and the fields agree
    /// with each other.
    pub fn load<Rd: Read>(reader: &mut Rd) -> Result<Self> {
        let subset_rank = R::deserialize_from(reader)?;
        let suffix_groups = SuffixGroups::deserialize_from(reader)?;

        let c_bytes = reader
            .read_u64::<NativeEndian>()
            .map_err(|e| LoadError::from_io(e, "C-array length"))?;
        if c_bytes != C_ARRAY_BYTES {
            return Err(LoadError::InvalidCArrayLength(c_bytes).into());
        }
        let mut c_array = [0u64; SIGMA];
        reader
            .read_exact(bytemuck::cast_slice_mut::<u64, u8>(&mut c_array))
            .map_err(|e| LoadError::from_io(e, "C-array"))?;

        let n_nodes = reader
            .read_u64::<NativeEndian>()
            .map_err(|e| LoadError::from_io(e, "n_nodes"))?;
        let n_nodes = to_usize(n_nodes, "n_nodes")?;
        let k = reader
            .read_u64::<NativeEndian>()
            .map_err(|e| LoadError::from_io(e, "k"))?;
        let colex = reader
            .read_u8()
            .map_err(|e| LoadError::from_io(e, "colex flag"))?
            != 0;

        if n_nodes != subset_rank.len() {
            return Err(LoadError::InconsistentLength {
                field: "subset rank",
                found: subset_rank.len(),
                expected: n_nodes,
            }
            .into());
        }
        if !suffix_groups.is_empty() && suffix_groups.len() != n_nodes {
            return Err(LoadError::InconsistentLength {
                field: "suffix groups",
                found: suffix_groups.len(),
                expected: n_nodes,
            }
            .into());
        }
        if !suffix_groups.is_empty() && !suffix_groups.is_group_start(0) {
            return Err(LoadError::UnmarkedFirstColumn.into());
        }
        if k == 0 {
            return Err(LoadError::InvalidK(k).into());
        }
        let k = to_usize(k, "k")?;

        let derived = compute_c_array(&subset_rank);
        let total = derived[SIGMA - 1] + subset_rank.rank(n_nodes, Symbol::T) as u64;
        if c_array != derived || total != n_nodes as u64 {
            return Err(LoadError::InvalidCArray {
                stored: c_array,
                derived,
            }
            .into());
        }
        log::debug!("C-array for {n_nodes} columns: {c_array:?}");

        Ok(Self {
            colex,
            subset_rank,
            suffix_groups,
            c_array,
            n_nodes,
            k,
            n_kmers: 0,
        })
    }

    /// Loads an index from a file through a read-only memory map.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;

        // Load the mmap
        let map = unsafe { Mmap::map(&file) }?;
        let mut bytes = &map[..];
        let index = Self::load(&mut bytes)?;

        log::info!(
            "Loaded index with {} columns (k={}) from {}",
            index.n_nodes,
            index.k,
            path.as_ref().display()
        );
        if !bytes.is_empty() {
            log::warn!(
                "Ignoring {} trailing bytes after index in {}",
                bytes.len(),
                path.as_ref().display()
            );
        }
        Ok(index)
    }
}

fn to_usize(value: u64, field: &'static str) -> Result<usize> {
    usize::try_from(value).map_err(|_| LoadError::Oversized { field, value }.into())
}
