//! Container headers and extractors for the two archive kinds.
//!
//! An HPKG container is a single package: a header, then a chunk-compressed heap
//! holding the table of contents (the file tree) and the package attributes. An HPKR
//! container is a repository index: a header, then a heap holding repository info and
//! one `package` attribute subtree per package.
//!
//! Both headers open with the same layout after their magic: header size, version,
//! total size, minor version, and the heap parameters. [`read_heap_parameters`] parses
//! that shared run; the extractors hand the parameters straight to
//! [`crate::heap::HpkHeapReader`].

mod hpkg;
mod hpkr;

pub use hpkg::{HpkgExtractor, HpkgHeader};
pub use hpkr::{HpkrExtractor, HpkrHeader};

use crate::{file::parser::Parser, heap::HeapCompression, Result};

/// The container format version both extractors understand.
const SUPPORTED_VERSION: u16 = 2;

/// Heap geometry shared by both header layouts.
pub(crate) struct HeapParameters {
    pub(crate) compression: HeapCompression,
    pub(crate) chunk_size: u32,
    pub(crate) size_compressed: u64,
    pub(crate) size_uncompressed: u64,
}

/// Parse the header run common to HPKG and HPKR: header size, version, total size,
/// minor version, then the heap parameters. The cursor is left at the first
/// format-specific field.
pub(crate) fn read_common_header(
    parser: &mut Parser<'_>,
    magic: &[u8; 4],
    kind: &str,
) -> Result<(u16, u16, u64, u16, HeapParameters)> {
    if parser.is_empty() {
        return Err(crate::Error::Empty);
    }

    let found = parser.read_bytes(4)?;
    if found != &magic[..] {
        return Err(malformed_error!(
            "magic incorrect at the start of the {} container",
            kind
        ));
    }

    let header_size = parser.read_be::<u16>()?;
    let version = parser.read_be::<u16>()?;
    if version != SUPPORTED_VERSION {
        return Err(crate::Error::NotSupported);
    }

    let total_size = parser.read_be::<u64>()?;
    let minor_version = parser.read_be::<u16>()?;

    let compression = HeapCompression::from_numeric(parser.read_be::<u16>()?)?;
    let chunk_size = parser.read_be::<u32>()?;
    let size_compressed = parser.read_be::<u64>()?;
    let size_uncompressed = parser.read_be::<u64>()?;

    Ok((
        header_size,
        version,
        total_size,
        minor_version,
        HeapParameters {
            compression,
            chunk_size,
            size_compressed,
            size_uncompressed,
        },
    ))
}
