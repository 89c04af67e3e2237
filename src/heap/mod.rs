//! The chunk-compressed heap of an HPKG container.
//!
//! Both container kinds store their bulk data in a *heap*: a logical, uncompressed byte
//! address space that is physically stored as a sequence of fixed-size chunks, each
//! chunk either zlib-compressed or raw. Consumers address the heap exclusively through
//! logical coordinates; [`reader::HpkHeapReader`] hides the chunking, the per-chunk
//! compression decision and the trailer of compressed chunk lengths.
//!
//! # Key Components
//!
//! - [`HeapCompression`] - The compression kind declared in the container header
//! - [`HeapCoordinates`] - An `(offset, length)` reference into the uncompressed space
//! - [`reader::HpkHeapReader`] - Random-access decompressing reader with a bounded
//!   chunk cache

pub mod reader;

pub use reader::HpkHeapReader;

/// Compression applied to the chunks of a heap.
///
/// The numeric values are those stored in the container header; anything else is
/// rejected with [`crate::Error::NotSupported`] before any heap work begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeapCompression {
    /// Chunks are stored verbatim.
    None,
    /// Chunks are zlib streams when compression actually shrank them.
    Zlib,
}

impl HeapCompression {
    /// Map the numeric header value onto a compression kind.
    ///
    /// # Errors
    /// Returns [`crate::Error::NotSupported`] for values other than 0 or 1.
    pub fn from_numeric(value: u16) -> crate::Result<HeapCompression> {
        match value {
            0 => Ok(HeapCompression::None),
            1 => Ok(HeapCompression::Zlib),
            _ => Err(crate::Error::NotSupported),
        }
    }
}

/// A reference into the *uncompressed* heap address space.
///
/// Coordinates carry no validity guarantee of their own; they are checked against the
/// owning heap's uncompressed size when a read is attempted. Violated coordinates are a
/// decode error, never a panic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeapCoordinates {
    /// Logical byte offset into the uncompressed heap.
    pub offset: u64,
    /// Number of bytes referenced.
    pub length: u64,
}

impl HeapCoordinates {
    /// Create coordinates for `length` bytes at `offset`.
    #[must_use]
    pub fn new(offset: u64, length: u64) -> HeapCoordinates {
        HeapCoordinates { offset, length }
    }
}

impl std::fmt::Display for HeapCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}+{}", self.offset, self.length)
    }
}
