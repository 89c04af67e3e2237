//! Data-source abstraction and low-level parsing for HPKG containers.
//!
//! This module abstracts over where container bytes come from (a memory-mapped file on
//! disk, or a buffer already in memory) and provides the cursor parser used to decode
//! the fixed headers.
//!
//! # Key Components
//!
//! - [`Backend`] - Trait for container data sources
//! - [`physical::Physical`] - Memory-mapped file backend
//! - [`memory::Memory`] - In-memory buffer backend
//! - [`parser::Parser`] - Bounds-checked cursor over a byte slice
//! - [`io`] - Endian-aware primitive reads underlying the parser
//!
//! The heap reader in [`crate::heap`] consumes a `Backend` through an `Arc`, so the same
//! mapping serves the header parse and every subsequent chunk fetch.

pub mod io;
pub mod parser;

pub mod memory;
pub mod physical;

use crate::Result;

/// Backend trait for container data sources.
///
/// This trait abstracts over the source of HPKG/HPKR data, allowing for both in-memory
/// and on-disk representations. All implementations must be thread-safe.
pub trait Backend: Send + Sync {
    /// Returns a slice of the data at the given offset and length.
    ///
    /// Provides bounds-checked access to the underlying data; the heap reader uses it to
    /// fetch chunk-sized spans without copying.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if the requested range is out of bounds.
    fn data_slice(&self, offset: usize, len: usize) -> Result<&[u8]>;

    /// Returns the entire data buffer.
    fn data(&self) -> &[u8];

    /// Returns the total length of the data buffer.
    fn len(&self) -> usize;

    /// Returns `true` if the backend holds no data.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
