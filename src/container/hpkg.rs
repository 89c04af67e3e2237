//! Single-package (HPKG) container access.

use std::path::Path;
use std::sync::Arc;

use crate::{
    attributes::{Attribute, AttributeContext, AttributeIterator, StringTable},
    container::{read_common_header, HeapParameters},
    file::{memory::Memory, parser::Parser, physical::Physical, Backend},
    heap::{HeapCompression, HeapCoordinates, HpkHeapReader},
    Result,
};

/// Decoded HPKG header fields, all integers big-endian on the wire.
#[derive(Debug, Clone)]
pub struct HpkgHeader {
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
    /// Size of the package-attributes section at the end of the heap.
    pub attributes_length: u32,
    pub attributes_strings_length: u32,
    pub attributes_strings_count: u32,
    /// Size of the table-of-contents section preceding the package attributes.
    pub toc_length: u64,
    pub toc_strings_length: u64,
    pub toc_strings_count: u64,
}

impl HpkgHeader {
    /// Parse the 80-byte header from the start of the container.
    ///
    /// # Errors
    /// Returns [`crate::Error::Malformed`] for a wrong magic,
    /// [`crate::Error::NotSupported`] for an unknown version or compression, and
    /// [`crate::Error::OutOfBounds`] for a truncated header.
    pub fn parse(data: &[u8]) -> Result<HpkgHeader> {
        let mut parser = Parser::new(data);
        let (header_size, version, total_size, minor_version, heap) =
            read_common_header(&mut parser, b"hpkg", "hpkg")?;

        let attributes_length = parser.read_be::<u32>()?;
        let attributes_strings_length = parser.read_be::<u32>()?;
        let attributes_strings_count = parser.read_be::<u32>()?;
        let _reserved = parser.read_be::<u32>()?;

        let toc_length = parser.read_be::<u64>()?;
        let toc_strings_length = parser.read_be::<u64>()?;
        let toc_strings_count = parser.read_be::<u64>()?;

        let HeapParameters {
            compression,
            chunk_size,
            size_compressed,
            size_uncompressed,
        } = heap;

        Ok(HpkgHeader {
            header_size,
            version,
            total_size,
            minor_version,
            heap_compression: compression,
            heap_chunk_size: chunk_size,
            heap_size_compressed: size_compressed,
            heap_size_uncompressed: size_uncompressed,
            attributes_length,
            attributes_strings_length,
            attributes_strings_count,
            toc_length,
            toc_strings_length,
            toc_strings_count,
        })
    }

    /// Heap offset of the table-of-contents section.
    fn toc_offset(&self) -> Result<u64> {
        self.heap_size_uncompressed
            .checked_sub(u64::from(self.attributes_length) + self.toc_length)
            .ok_or_else(|| {
                malformed_error!(
                    "the toc and attributes sections ({} + {} bytes) exceed the {} byte heap",
                    self.toc_length,
                    self.attributes_length,
                    self.heap_size_uncompressed
                )
            })
    }

    /// Heap offset of the package-attributes section.
    fn attributes_offset(&self) -> Result<u64> {
        self.heap_size_uncompressed
            .checked_sub(u64::from(self.attributes_length))
            .ok_or_else(|| {
                malformed_error!(
                    "the attributes section ({} bytes) exceeds the {} byte heap",
                    self.attributes_length,
                    self.heap_size_uncompressed
                )
            })
    }
}

/// Read-only access to one HPKG package container.
///
/// Opening parses the header, sets up the heap reader, and eagerly reads both string
/// tables, so structural problems surface here rather than mid-iteration. The two
/// attribute streams - the table of contents and the package attributes - are then
/// available through iterators and contexts borrowing from the extractor.
///
/// # Examples
///
/// ```rust,no_run
/// use hpkscope::container::HpkgExtractor;
/// use std::path::Path;
///
/// let extractor = HpkgExtractor::open(Path::new("package.hpkg"))?;
/// let context = extractor.package_attributes_context();
/// let mut attributes = extractor.package_attributes_iterator();
/// while let Some(attribute) = attributes.next()? {
///     println!("{}", attribute.id().attribute_name());
/// }
/// # Ok::<(), hpkscope::Error>(())
/// ```
pub struct HpkgExtractor {
    header: HpkgHeader,
    heap_reader: HpkHeapReader,
    toc_string_table: StringTable,
    attributes_string_table: StringTable,
    /// Heap offset of the TOC attribute stream, past its string table.
    toc_stream_offset: u64,
    /// Heap offset of the package-attributes stream, past its string table.
    attributes_stream_offset: u64,
}

impl HpkgExtractor {
    /// Open a container from a file via a read-only memory map.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] when the file cannot be opened and the
    /// parse errors of [`HpkgHeader::parse`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<HpkgExtractor> {
        Self::from_backend(Arc::new(Physical::new(path)?))
    }

    /// Open a container from bytes already in memory.
    pub fn from_mem(data: Vec<u8>) -> Result<HpkgExtractor> {
        Self::from_backend(Arc::new(Memory::new(data)))
    }

    fn from_backend(backend: Arc<dyn Backend>) -> Result<HpkgExtractor> {
        let header = HpkgHeader::parse(backend.data())?;

        let heap_reader = HpkHeapReader::new(
            backend,
            header.heap_compression,
            u64::from(header.header_size),
            u64::from(header.heap_chunk_size),
            header.heap_size_compressed,
            header.heap_size_uncompressed,
        )?;

        let toc_offset = header.toc_offset()?;
        let toc_string_table = StringTable::from_heap(
            &heap_reader,
            HeapCoordinates::new(toc_offset, header.toc_strings_length),
            header.toc_strings_count,
        )?;

        let attributes_offset = header.attributes_offset()?;
        let attributes_string_table = StringTable::from_heap(
            &heap_reader,
            HeapCoordinates::new(
                attributes_offset,
                u64::from(header.attributes_strings_length),
            ),
            u64::from(header.attributes_strings_count),
        )?;

        let toc_stream_offset = toc_offset + header.toc_strings_length;
        let attributes_stream_offset =
            attributes_offset + u64::from(header.attributes_strings_length);

        Ok(HpkgExtractor {
            header,
            heap_reader,
            toc_string_table,
            attributes_string_table,
            toc_stream_offset,
            attributes_stream_offset,
        })
    }

    #[must_use]
    pub fn header(&self) -> &HpkgHeader {
        &self.header
    }

    #[must_use]
    pub fn heap_reader(&self) -> &HpkHeapReader {
        &self.heap_reader
    }

    /// Context for resolving table-of-contents attributes.
    #[must_use]
    pub fn toc_context(&self) -> AttributeContext<'_> {
        AttributeContext::new(&self.heap_reader, &self.toc_string_table)
    }

    /// Iterator over the top level of the table of contents.
    #[must_use]
    pub fn toc_iterator(&self) -> AttributeIterator<'_> {
        AttributeIterator::new(self.toc_context(), self.toc_stream_offset)
    }

    /// Materialize the whole table of contents.
    ///
    /// # Errors
    /// Propagates decode errors from the stream.
    pub fn toc(&self) -> Result<Vec<Attribute>> {
        let mut assembly = Vec::new();
        let mut iterator = self.toc_iterator();
        while let Some(attribute) = iterator.next()? {
            assembly.push(attribute);
        }
        Ok(assembly)
    }

    /// Context for resolving package attributes.
    #[must_use]
    pub fn package_attributes_context(&self) -> AttributeContext<'_> {
        AttributeContext::new(&self.heap_reader, &self.attributes_string_table)
    }

    /// Iterator over the package-attributes stream.
    #[must_use]
    pub fn package_attributes_iterator(&self) -> AttributeIterator<'_> {
        AttributeIterator::new(
            self.package_attributes_context(),
            self.attributes_stream_offset,
        )
    }

    /// Materialize the package-attributes stream.
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
