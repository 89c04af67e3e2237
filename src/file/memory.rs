//! In-memory buffer backend.
//!
//! Implements the [`crate::file::Backend`] trait for container data that is already in
//! memory, such as bytes staged from a repository mirror fetch or buffers assembled by
//! tests. It complements [`crate::file::physical::Physical`], which maps files from
//! disk.

use super::Backend;
use crate::Result;

/// A backend over an owned byte buffer.
///
/// `Memory` takes ownership of a `Vec<u8>` and serves bounds-checked slices from it. It
/// is the backend behind `from_mem` constructors on the container extractors.
#[derive(Debug)]
pub struct Memory {
    /// Owned container data
    data: Vec<u8>,
}

impl Memory {
    /// Create a new memory backend taking ownership of `data`.
    #[must_use]
    pub fn new(data: Vec<u8>) -> Memory {
        Memory { data }
    }
}

impl Backend for Memory {
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]> {
        let Some(offset_end) = offset.checked_add(len) else {
            return Err(out_of_bounds_error!());
        };

        if offset_end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        Ok(&self.data[offset..offset_end])
    }

    fn data(&self) -> &[u8] {
        &self.data
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}
