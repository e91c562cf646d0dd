//! # Calldata Word Reader
//!
//! Fixed-width cursor over an ABI-encoded argument tail. Arguments are
//! packed into 32-byte words; an address is right-aligned in its word, so
//! only the low 20 bytes carry data.

use chief_types::{Address, SlateHash};
use primitive_types::U256;

/// Bytes per ABI word.
pub const WORD_SIZE: usize = 32;

/// Bytes per address within a word.
pub const ADDRESS_SIZE: usize = 20;

/// The tail ended before a full word could be read.
///
/// `expected` is the total tail length the read required, `actual` what was
/// supplied. Mapped to `DecodeError::MalformedCallData` by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated {
    pub expected: usize,
    pub actual: usize,
}

/// Word-at-a-time reader over a calldata argument tail.
#[derive(Debug)]
pub struct CalldataReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> CalldataReader<'a> {
    /// Creates a reader over the argument tail (call data after the selector).
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Reads the next 32-byte word.
    ///
    /// # Errors
    ///
    /// Returns `Truncated` if fewer than 32 bytes remain.
    pub fn read_word(&mut self) -> Result<&'a [u8], Truncated> {
        let end = self.offset + WORD_SIZE;
        if end > self.data.len() {
            return Err(Truncated {
                expected: end,
                actual: self.data.len(),
            });
        }
        let word = &self.data[self.offset..end];
        self.offset = end;
        Ok(word)
    }

    /// Reads a word and discards it (e.g. a dynamic-array offset head).
    pub fn skip_word(&mut self) -> Result<(), Truncated> {
        self.read_word().map(|_| ())
    }

    /// Reads an address: the low 20 bytes of the next word.
    pub fn read_address(&mut self) -> Result<Address, Truncated> {
        let word = self.read_word()?;
        // from_slice cannot fail on a WORD_SIZE slice tail
        Ok(Address::from_slice(&word[WORD_SIZE - ADDRESS_SIZE..]).unwrap_or(Address::ZERO))
    }

    /// Reads a full word as a 32-byte hash.
    pub fn read_hash(&mut self) -> Result<SlateHash, Truncated> {
        let word = self.read_word()?;
        Ok(SlateHash::from_slice(word).unwrap_or(SlateHash::ZERO))
    }

    /// Reads a word as a big-endian 256-bit integer.
    pub fn read_u256(&mut self) -> Result<U256, Truncated> {
        let word = self.read_word()?;
        Ok(U256::from_big_endian(word))
    }
}

// =============================================================================
// TESTS
// =============================================================================
