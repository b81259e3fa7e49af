//! Memory Store Implementation.
//!
//! This module provides the byte-addressable backing storage of the DRAM model.
//! The store is sized once at construction, pre-filled with
//! [`SENTINEL_BYTE`](crate::common::SENTINEL_BYTE), and never resized. The test
//! harness writes it directly to seed known data; the protocol engine only reads it.

use std::ops::{Index, IndexMut, Range};

use crate::common::SENTINEL_BYTE;

/// Fixed-size byte buffer holding every data value the model can return.
#[derive(Clone, PartialEq, Eq)]
pub struct MemoryStore {
    bytes: Box<[u8]>,
}

impl MemoryStore {
    /// Creates a new store of `size` bytes filled with the sentinel pattern.
    ///
    /// # Arguments
    ///
    /// * `size` - Size of the store in bytes.
    pub fn new(size: usize) -> Self {
        Self {
            bytes: vec![SENTINEL_BYTE; size].into_boxed_slice(),
        }
    }

    /// Returns the size of the store in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the store holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns true if `len` bytes starting at `offset` lie inside the store.
    #[inline]
    pub fn contains(&self, offset: u64, len: usize) -> bool {
        Self::span(offset, len).is_some_and(|r| r.end <= self.bytes.len())
    }

    /// Reads a single byte.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the store.
    pub fn read_u8(&self, offset: usize) -> u8 {
        assert!(offset < self.bytes.len(), "DRAM read out of bounds");
        self.bytes[offset]
    }

    /// Writes a single byte.
    ///
    /// # Panics
    ///
    /// Panics if `offset` is past the end of the store.
    pub fn write_byte(&mut self, offset: usize, val: u8) {
        assert!(offset < self.bytes.len(), "DRAM write out of bounds");
        self.bytes[offset] = val;
    }

    /// Reads `len` bytes starting at `offset`.
    ///
    /// # Panics
    ///
    /// Panics if any byte of the span lies outside the store.
    pub fn read_span(&self, offset: u64, len: usize) -> &[u8] {
        match Self::span(offset, len) {
            Some(r) if r.end <= self.bytes.len() => &self.bytes[r],
            _ => panic!("DRAM read out of bounds"),
        }
    }

    /// Copies `data` into the store starting at `offset`.
    ///
    /// Used to seed whole regions (matrices, lookup tables) before a run.
    ///
    /// # Panics
    ///
    /// Panics if `data` does not fit at `offset`.
    pub fn load(&mut self, offset: usize, data: &[u8]) {
        assert!(
            offset
                .checked_add(data.len())
                .is_some_and(|end| end <= self.bytes.len()),
            "DRAM write out of bounds"
        );
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
    }

    /// Overwrites every byte with `f(offset)`.
    pub fn fill_with(&mut self, mut f: impl FnMut(usize) -> u8) {
        for (i, b) in self.bytes.iter_mut().enumerate() {
            *b = f(i);
        }
    }

    /// Returns the whole store as a slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    fn span(offset: u64, len: usize) -> Option<Range<usize>> {
        let start = usize::try_from(offset).ok()?;
        let end = start.checked_add(len)?;
        Some(start..end)
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("size", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

impl Index<usize> for MemoryStore {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bytes[index]
    }
}

impl IndexMut<usize> for MemoryStore {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.bytes[index]
    }
}
