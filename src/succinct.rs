//! Bounded reading of `sucds` structures
//!
//! The `sucds` deserializers reserve every vector at its declared length
//! before reading a single element. Each structure is first copied into
//! memory by following its length prefixes, so a prefix that claims more
//! bytes than the stream holds ends as [`LoadError::Truncated`] and the
//! deserializer only ever sees complete input.

use std::io::Read;

use sucds::bit_vectors::{BitVector, Rank9Sel};
use sucds::Serializable;

use crate::error::{LoadError, Result};

/// Bytes per `sucds` machine word and length prefix
const WORD_BYTES: usize = size_of::<usize>();

/// Bits per `sucds` bit-vector word
const WORD_BITS: usize = usize::BITS as usize;

/// Raw bytes of one serialized structure, read prefix by prefix
struct Frame<'a, R> {
    reader: &'a mut R,
    field: &'static str,
    bytes: Vec<u8>,
}
impl<'a, R: Read> Frame<'a, R> {
    fn new(reader: &'a mut R, field: &'static str) -> Self {
        Self {
            reader,
            field,
            bytes: Vec::new(),
        }
    }

    fn word(&mut self) -> Result<usize> {
        let mut buf = [0u8; WORD_BYTES];
        self.reader
            .read_exact(&mut buf)
            .map_err(|e| LoadError::from_io(e, self.field))?;
        self.bytes.extend_from_slice(&buf);
        Ok(usize::from_le_bytes(buf))
    }

    fn flag(&mut self) -> Result<bool> {
        let mut buf = [0u8; 1];
        self.reader
            .read_exact(&mut buf)
            .map_err(|e| LoadError::from_io(e, self.field))?;
        self.bytes.push(buf[0]);
        Ok(buf[0] != 0)
    }

    /// A `Vec<usize>`: length prefix, then that many words
    fn words(&mut self) -> Result<()> {
        let len = self.word()?;
        let Some(expected) = len.checked_mul(WORD_BYTES) else {
            return Err(LoadError::Truncated { field: self.field }.into());
        };

        // grows with the bytes actually read, never with the prefix
        let found = self
            .reader
            .by_ref()
            .take(expected as u64)
            .read_to_end(&mut self.bytes)
            .map_err(|e| LoadError::from_io(e, self.field))?;
        if found < expected {
            return Err(LoadError::Truncated { field: self.field }.into());
        }
        Ok(())
    }

    fn optional_words(&mut self) -> Result<()> {
        if self.flag()? {
            self.words()?;
        }
        Ok(())
    }

    fn bit_vector(&mut self) -> Result<()> {
        self.words()?;
        self.word()?;
        Ok(())
    }

    fn rank9_directory(&mut self) -> Result<()> {
        self.word()?;
        self.words()?;
        // select hints
        self.optional_words()?;
        self.optional_words()
    }

    fn decode<T: Serializable>(self) -> Result<T> {
        T::deserialize_from(self.bytes.as_slice())
            .map_err(|e| LoadError::from_succinct(e, self.field))
    }
}

fn check_bit_vector(bv: &BitVector, field: &'static str) -> Result<()> {
    let expected = bv.len().div_ceil(WORD_BITS);
    if bv.num_words() != expected {
        return Err(LoadError::InconsistentLength {
            field,
            found: bv.num_words(),
            expected,
        }
        .into());
    }
    Ok(())
}

/// Reads a [`BitVector`] and checks its word count against its length.
pub(crate) fn read_bit_vector<R: Read>(reader: &mut R, field: &'static str) -> Result<BitVector> {
    let mut frame = Frame::new(reader, field);
    frame.bit_vector()?;
    let bv: BitVector = frame.decode()?;
    check_bit_vector(&bv, field)?;
    Ok(bv)
}

/// Reads a [`Rank9Sel`] and checks its rank directory against its bits.
pub(crate) fn read_rank9sel<R: Read>(reader: &mut R, field: &'static str) -> Result<Rank9Sel> {
    let mut frame = Frame::new(reader, field);
    frame.bit_vector()?;
    frame.rank9_directory()?;
    let row: Rank9Sel = frame.decode()?;

    check_bit_vector(row.bit_vector(), field)?;
    if row != Rank9Sel::new(row.bit_vector().clone()) {
        return Err(LoadError::Succinct {
            field,
            message: "rank directory does not match its bit vector".to_string(),
        }
        .into());
    }
    Ok(row)
}
