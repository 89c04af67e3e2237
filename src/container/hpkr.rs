//! Repository-index (HPKR) container access.

use std::path::Path;
use std::sync::Arc;

use crate::{
    attributes::{Attribute, AttributeContext, AttributeIterator, StringTable},
    container::{read_common_header, HeapParameters},
    file::{memory::Memory, parser::Parser, physical::Physical, Backend},
    heap::{HeapCompression, HeapCoordinates, HpkHeapReader},
    Result,
};

/// Decoded HPKR header fields, all integers big-endian on the wire.
#[derive(Debug, Clone)]
pub struct HpkrHeader {
    /// Size of the header block; the heap begins at this file offset.
    pub header_size: u16,
    pub version: u16,
    pub total_size: u64,
    pub minor_version: u16,
    pub heap_compression: HeapCompression,
    pub heap_chunk_size: u32,
    /// Stored heap size, including the chunk-length trailer.
    pub heap_size_compressed: u64,
    /// Logical heap size, excluding the trailer.
    pub heap_size_uncompressed: u64,
    /// Size of the repository-info section at the start of the heap.
    pub info_length: u32,
    /// Size of the package-attributes section.
    pub packages_length: u64,
    pub packages_strings_length: u64,
    pub packages_strings_count: u64,
}

impl HpkrHeader {
    /// Parse the 72-byte header from the start of the container.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a wrong magic,
    /// [`crate::Error::NotSupported`] for an unknown version or compression, and
    /// [`crate::Error::OutOfBounds`] for a truncated header.
    pub fn parse(data: &[u8]) -> Result<HpkrHeader> {
        let mut parser = Parser::new(data);
        let (header_size, version, total_size, minor_version, heap) =
            read_common_header(&mut parser, b"hpkr", "hpkr")?;

        let info_length = parser.read_be::<u32>()?;
        let _reserved = parser.read_be::<u32>()?;

        let packages_length = parser.read_be::<u64>()?;
        let packages_strings_length = parser.read_be::<u64>()?;
        let packages_strings_count = parser.read_be::<u64>()?;

        let HeapParameters {
            compression,
            chunk_size,
            size_compressed,
            size_uncompressed,
        } = heap;

        Ok(HpkrHeader {
            header_size,
            version,
            total_size,
            minor_version,
            heap_compression: compression,
            heap_chunk_size: chunk_size,
            heap_size_compressed: size_compressed,
            heap_size_uncompressed: size_uncompressed,
            info_length,
            packages_length,
            packages_strings_length,
            packages_strings_count,
        })
    }
}

/// Read-only access to one HPKR repository index.
///
/// The heap opens with a repository-info section of `info_length` bytes; the package
/// attributes string table follows it and the attribute stream begins after that. The
/// stream's top level is one `package` subtree per package in the repository, so a
/// whole index can be scanned one package at a time without ever materializing more
/// than one subtree.
///
/// # Examples
///
/// ```rust,no_run
/// use hpkscope::container::HpkrExtractor;
/// use hpkscope::AttributeId;
/// use std::path::Path;
///
/// let extractor = HpkrExtractor::open(Path::new("repo.hpkr"))?;
/// let mut packages = extractor.package_attributes_iterator();
/// while let Some(package) = packages.next()? {
///     assert_eq!(package.id(), AttributeId::Package);
/// }
/// # Ok::<(), hpkscope::Error>(())
/// ```
pub struct HpkrExtractor {
    header: HpkrHeader,
    heap_reader: HpkHeapReader,
    attributes_string_table: StringTable,
    /// Heap offset of the package-attributes stream, past its string table.
    attributes_stream_offset: u64,
}

impl HpkrExtractor {
    /// Open a container from a file via a read-only memory map.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] when the file cannot be opened and the
    /// parse errors of [`HpkrHeader::parse`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<HpkrExtractor> {
        Self::from_backend(Arc::new(Physical::new(path)?))
    }

    /// Open a container from bytes already in memory.
    pub fn from_mem(data: Vec<u8>) -> Result<HpkrExtractor> {
        Self::from_backend(Arc::new(Memory::new(data)))
    }

    fn from_backend(backend: Arc<dyn Backend>) -> Result<HpkrExtractor> {
        let header = HpkrHeader::parse(backend.data())?;

        let heap_reader = HpkHeapReader::new(
            backend,
            header.heap_compression,
            u64::from(header.header_size),
            u64::from(header.heap_chunk_size),
            header.heap_size_compressed,
            header.heap_size_uncompressed,
        )?;

        let attributes_string_table = StringTable::from_heap(
            &heap_reader,
            HeapCoordinates::new(
                u64::from(header.info_length),
                header.packages_strings_length,
            ),
            header.packages_strings_count,
        )?;

        let attributes_stream_offset =
            u64::from(header.info_length) + header.packages_strings_length;

        Ok(HpkrExtractor {
            header,
            heap_reader,
            attributes_string_table,
            attributes_stream_offset,
        })
    }

    #[must_use]
    pub fn header(&self) -> &HpkrHeader {
        &self.header
    }

    #[must_use]
    pub fn heap_reader(&self) -> &HpkHeapReader {
        &self.heap_reader
    }

    /// Context for resolving package attributes.
    #[must_use]
    pub fn attribute_context(&self) -> AttributeContext<'_> {
        AttributeContext::new(&self.heap_reader, &self.attributes_string_table)
    }

    /// Iterator over the package-attributes stream; each top-level record is one
    /// package's subtree.
    #[must_use]
    pub fn package_attributes_iterator(&self) -> AttributeIterator<'_> {
        AttributeIterator::new(self.attribute_context(), self.attributes_stream_offset)
    }

    /// Materialize every package subtree in the index.
    ///
    /// # Errors
    /// Propagates decode errors from the stream.
    pub fn package_attributes(&self) -> Result<Vec<Attribute>> {
        let mut assembly = Vec::new();
        let mut iterator = self.package_attributes_iterator();
        while let Some(attribute) = iterator.next()? {
            assembly.push(attribute);
        }
        Ok(assembly)
    }
}
