//! Memory Image Loader.
//!
//! This module seeds the memory store before a run. It provides:
//! 1. **Binary images:** Raw files copied into the store at a byte offset.
//! 2. **Patterns:** The address-derived pattern used by the reference driver tests.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::common::{DramError, DramResult};
use crate::memory::MemoryStore;

/// Copies the contents of a binary file into the store at `offset`.
///
/// # Arguments
///
/// * `store` - Memory store to seed.
/// * `path` - Path to the raw image.
/// * `offset` - Byte offset of the first image byte.
///
/// # Returns
///
/// The number of bytes loaded.
///
/// # Errors
///
/// [`DramError::Io`] if the file cannot be read, or
/// [`DramError::AddressOutOfRange`] if the image does not fit at `offset`.
pub fn load_image(store: &mut MemoryStore, path: impl AsRef<Path>, offset: usize) -> DramResult<usize> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    if offset.checked_add(data.len()).is_none_or(|end| end > store.len()) {
        return Err(DramError::AddressOutOfRange {
            offset: offset as u64,
            len: data.len(),
            size: store.len(),
        });
    }
    store.load(offset, &data);
    debug!(path = %path.display(), offset, len = data.len(), "loaded memory image");
    Ok(data.len())
}

/// Seeds every byte with the low eight bits of its own address.
///
/// With this pattern a beat's value identifies the address it was read from.
pub fn seed_address_pattern(store: &mut MemoryStore) {
    store.fill_with(|i| (i & 0xFF) as u8);
}
