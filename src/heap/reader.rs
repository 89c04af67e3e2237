//! Random-access decompressing reader over the heap region.
//!
//! The heap is stored as a run of chunks, each `chunk_size` bytes of uncompressed data
//! (the last chunk may be shorter), each stored zlib-compressed when compression
//! actually shrank it and raw otherwise. A trailer of big-endian u16 values, one per
//! chunk except the last, records each chunk's compressed length minus one; the last
//! chunk's length is derived by subtraction from the declared compressed size.
//!
//! [`HpkHeapReader`] resolves logical coordinates into bytes on demand. Decompressed
//! chunks are kept in a small bounded LRU cache behind a mutex, so a burst of reads
//! within the same neighbourhood of the heap does not inflate the same chunk twice.
//! This is a working-set cache, not a full-file cache.
//!
//! # Concurrency
//!
//! The reader itself is `Send + Sync`; the only mutable state is the chunk cache, which
//! is serialized by its mutex. Decoded attribute trees never hold a reference into the
//! cache - resolved values are copied out.
//!
//! # Failure modes
//!
//! Chunk lengths that do not reconcile with the declared compressed size, inflation
//! producing the wrong byte count or not consuming its whole input, and coordinates
//! beyond the uncompressed size all surface as [`crate::Error::MalformedHeap`], never as
//! silent truncation.

use std::sync::{Arc, Mutex};

use flate2::{Decompress, FlushDecompress, Status};

use crate::{
    file::Backend,
    heap::{HeapCompression, HeapCoordinates},
    Result,
};

/// Number of decompressed chunks kept resident at once.
const CHUNK_CACHE_CAPACITY: usize = 3;

/// A bounded most-recently-used-first chunk cache.
///
/// With a capacity this small a linear scan beats any map structure; entries are kept
/// ordered most recent first and the tail is evicted on overflow.
struct ChunkCache {
    entries: Vec<(usize, Arc<[u8]>)>,
}

impl ChunkCache {
    fn new() -> ChunkCache {
        ChunkCache {
            entries: Vec::with_capacity(CHUNK_CACHE_CAPACITY),
        }
    }

    fn get(&mut self, index: usize) -> Option<Arc<[u8]>> {
        let position = self.entries.iter().position(|(i, _)| *i == index)?;
        let entry = self.entries.remove(position);
        let data = entry.1.clone();
        self.entries.insert(0, entry);
        Some(data)
    }

    fn insert(&mut self, index: usize, data: Arc<[u8]>) {
        self.entries.insert(0, (index, data));
        self.entries.truncate(CHUNK_CACHE_CAPACITY);
    }
}

/// Random-access reader over the chunk-compressed heap of an HPKG/HPKR container.
///
/// The reader owns (a share of) the container backend and translates reads in the
/// logical, uncompressed heap address space into chunk loads, decompressing and caching
/// chunks as needed. One reader serves all attribute iteration over a container.
///
/// # Examples
///
/// ```rust,no_run
/// use hpkscope::container::HpkrExtractor;
/// use hpkscope::heap::HeapCoordinates;
/// use std::path::Path;
///
/// let extractor = HpkrExtractor::open(Path::new("repo.hpkr"))?;
/// let mut buffer = vec![0u8; 16];
/// extractor
///     .heap_reader()
///     .read_heap(&mut buffer, 0, HeapCoordinates::new(0, 16))?;
/// # Ok::<(), hpkscope::Error>(())
/// ```
pub struct HpkHeapReader {
    backend: Arc<dyn Backend>,
    compression: HeapCompression,
    chunk_size: u64,
    uncompressed_size: u64,
    /// Compressed length of each chunk, recovered from the trailer.
    chunk_compressed_lengths: Vec<u64>,
    /// Absolute file offset of each chunk's stored bytes.
    chunk_file_offsets: Vec<u64>,
    cache: Mutex<ChunkCache>,
}

impl HpkHeapReader {
    /// Construct a heap reader from the header fields of a container.
    ///
    /// Reads and reconciles the trailer of compressed chunk lengths eagerly, so every
    /// length problem is reported at open time rather than at first read.
    ///
    /// # Arguments
    /// * `backend` - The container data source
    /// * `compression` - Heap compression kind from the header
    /// * `heap_offset` - Absolute file offset of the heap region
    /// * `chunk_size` - Uncompressed size of every chunk but the last
    /// * `compressed_size` - Stored size of the heap, including the trailer
    /// * `uncompressed_size` - Logical size of the heap, excluding the trailer
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedHeap`] when the sizes do not reconcile and
    /// [`crate::Error::OutOfBounds`] when the declared region exceeds the file.
    pub fn new(
        backend: Arc<dyn Backend>,
        compression: HeapCompression,
        heap_offset: u64,
        chunk_size: u64,
        compressed_size: u64,
        uncompressed_size: u64,
    ) -> Result<HpkHeapReader> {
        if uncompressed_size > 0 && chunk_size == 0 {
            return Err(malformed_heap_error!(
                "the heap declares {} uncompressed bytes with a chunk size of zero",
                uncompressed_size
            ));
        }

        let heap_end = heap_offset
            .checked_add(compressed_size)
            .ok_or(out_of_bounds_error!())?;
        if heap_end > backend.len() as u64 {
            return Err(malformed_heap_error!(
                "the heap region {}..{} runs past the end of the {} byte file",
                heap_offset,
                heap_end,
                backend.len()
            ));
        }

        let chunk_count = if uncompressed_size == 0 {
            0
        } else {
            usize::try_from(uncompressed_size.div_ceil(chunk_size))
                .map_err(|_| out_of_bounds_error!())?
        };

        let chunk_compressed_lengths = Self::read_chunk_compressed_lengths(
            backend.as_ref(),
            heap_offset,
            compressed_size,
            uncompressed_size,
            chunk_count,
        )?;

        let mut chunk_file_offsets = Vec::with_capacity(chunk_count);
        let mut offset = heap_offset;
        for length in &chunk_compressed_lengths {
            chunk_file_offsets.push(offset);
            offset = offset.checked_add(*length).ok_or(out_of_bounds_error!())?;
        }

        Ok(HpkHeapReader {
            backend,
            compression,
            chunk_size,
            uncompressed_size,
            chunk_compressed_lengths,
            chunk_file_offsets,
            cache: Mutex::new(ChunkCache::new()),
        })
    }

    /// After the chunk data comes a trailer of unsigned shorts holding the compressed
    /// size of every chunk except the last; each stored value is the true length minus
    /// one. The last chunk's length is derived by subtraction.
    fn read_chunk_compressed_lengths(
        backend: &dyn Backend,
        heap_offset: u64,
        compressed_size: u64,
        uncompressed_size: u64,
        chunk_count: usize,
    ) -> Result<Vec<u64>> {
        if chunk_count == 0 {
            if compressed_size != 0 {
                return Err(malformed_heap_error!(
                    "an empty heap declares {} compressed bytes",
                    compressed_size
                ));
            }
            return Ok(Vec::new());
        }

        let trailer_size = 2 * (chunk_count as u64 - 1);
        if compressed_size < trailer_size {
            return Err(malformed_heap_error!(
                "the heap compressed size {} cannot hold the {} byte chunk length trailer",
                compressed_size,
                trailer_size
            ));
        }

        let trailer_offset = usize::try_from(heap_offset + compressed_size - trailer_size)
            .map_err(|_| out_of_bounds_error!())?;
        let trailer = backend.data_slice(
            trailer_offset,
            usize::try_from(trailer_size).map_err(|_| out_of_bounds_error!())?,
        )?;

        let mut lengths = Vec::with_capacity(chunk_count);
        let mut total_compressed = 0u64;

        for (i, pair) in trailer.chunks_exact(2).enumerate() {
            // The stored size is the length of the chunk minus one.
            let length = u64::from(u16::from_be_bytes([pair[0], pair[1]])) + 1;

            if length > uncompressed_size {
                return Err(malformed_heap_error!(
                    "the chunk at {} is of size {}, but the uncompressed length of the chunks is {}",
                    i,
                    length,
                    uncompressed_size
                ));
            }

            total_compressed += length;
            lengths.push(length);
        }

        let last = compressed_size
            .checked_sub(trailer_size + total_compressed)
            .filter(|l| *l > 0 && *l <= uncompressed_size)
            .ok_or_else(|| {
                malformed_heap_error!(
                    "the derivation of the last chunk size from {} compressed bytes is out of bounds",
                    compressed_size
                )
            })?;
        lengths.push(last);

        Ok(lengths)
    }

    /// The quantity of chunks that are in the heap.
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.chunk_compressed_lengths.len()
    }

    /// The logical size of the heap in uncompressed bytes.
    #[must_use]
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    /// The compression kind declared for this heap.
    #[must_use]
    pub fn compression(&self) -> HeapCompression {
        self.compression
    }

    fn chunk_uncompressed_length(&self, index: usize) -> u64 {
        if index < self.chunk_count() - 1 {
            return self.chunk_size;
        }

        self.uncompressed_size - (self.chunk_size * (self.chunk_count() as u64 - 1))
    }

    /// Load-or-fetch a decompressed chunk through the cache.
    fn chunk(&self, index: usize) -> Result<Arc<[u8]>> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| crate::Error::Error("heap chunk cache lock poisoned".to_string()))?;

        if let Some(data) = cache.get(index) {
            return Ok(data);
        }

        let data = self.load_chunk(index)?;
        cache.insert(index, data.clone());
        Ok(data)
    }

    /// Materialize one chunk from the backend, inflating it when it was stored
    /// compressed.
    fn load_chunk(&self, index: usize) -> Result<Arc<[u8]>> {
        let compressed_length = self.chunk_compressed_lengths[index];
        let uncompressed_length = usize::try_from(self.chunk_uncompressed_length(index))
            .map_err(|_| out_of_bounds_error!())?;
        let file_offset =
            usize::try_from(self.chunk_file_offsets[index]).map_err(|_| out_of_bounds_error!())?;

        if compressed_length < self.chunk_uncompressed_length(index) {
            if self.compression == HeapCompression::None {
                return Err(malformed_heap_error!(
                    "chunk {} claims compression inside a heap declared uncompressed",
                    index
                ));
            }

            let input = self.backend.data_slice(
                file_offset,
                usize::try_from(compressed_length).map_err(|_| out_of_bounds_error!())?,
            )?;
            let inflated = self.inflate_chunk(index, input, uncompressed_length)?;
            Ok(Arc::from(inflated.into_boxed_slice()))
        } else {
            // Stored raw; compression did not shrink this chunk.
            let raw = self.backend.data_slice(file_offset, uncompressed_length)?;
            Ok(Arc::from(raw.to_vec().into_boxed_slice()))
        }
    }

    /// Inflate a zlib chunk, demanding the exact expected byte count and complete
    /// consumption of the input.
    fn inflate_chunk(&self, index: usize, input: &[u8], expected: usize) -> Result<Vec<u8>> {
        let mut inflater = Decompress::new(true);
        let mut output = vec![0u8; expected];

        loop {
            let before_in = inflater.total_in();
            let before_out = inflater.total_out();

            let in_pos = usize::try_from(before_in).map_err(|_| out_of_bounds_error!())?;
            let out_pos = usize::try_from(before_out).map_err(|_| out_of_bounds_error!())?;

            let status = inflater
                .decompress(
                    &input[in_pos..],
                    &mut output[out_pos..],
                    FlushDecompress::Finish,
                )
                .map_err(|e| {
                    malformed_heap_error!("unable to inflate (decompress) heap chunk {}: {}", index, e)
                })?;

            match status {
                Status::StreamEnd => break,
                Status::Ok | Status::BufError => {
                    if inflater.total_in() == before_in && inflater.total_out() == before_out {
                        return Err(malformed_heap_error!(
                            "incomplete inflation of input data while reading chunk {}",
                            index
                        ));
                    }
                }
            }
        }

        if inflater.total_out() != expected as u64 {
            return Err(malformed_heap_error!(
                "a compressed heap chunk inflated to {} bytes; was expecting {}",
                inflater.total_out(),
                expected
            ));
        }

        if inflater.total_in() != input.len() as u64 {
            return Err(malformed_heap_error!(
                "heap chunk {} left {} compressed bytes unconsumed",
                index,
                input.len() as u64 - inflater.total_in()
            ));
        }

        Ok(output)
    }

    /// Read a single byte at a logical heap offset.
    ///
    /// A convenience special case of [`HpkHeapReader::read_heap`] sharing the same
    /// chunk-resolution logic; the attribute decoder leans on this for its
    /// byte-at-a-time LEB128 reads.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedHeap`] when `offset` lies outside the
    /// uncompressed heap.
    pub fn read_heap_byte(&self, offset: u64) -> Result<u8> {
        if offset >= self.uncompressed_size {
            return Err(malformed_heap_error!(
                "read at heap offset {} but the uncompressed size is {}",
                offset,
                self.uncompressed_size
            ));
        }

        let chunk_index = usize::try_from(offset / self.chunk_size).map_err(|_| out_of_bounds_error!())?;
        let chunk_offset = usize::try_from(offset % self.chunk_size).map_err(|_| out_of_bounds_error!())?;

        let chunk = self.chunk(chunk_index)?;
        Ok(chunk[chunk_offset])
    }

    /// Copy the bytes referenced by `coordinates` into `buffer` starting at
    /// `buffer_offset`.
    ///
    /// A read spanning several chunks is served by an explicit loop over the chunks it
    /// touches, so pathological inputs (large reads over tiny chunk sizes) cannot drive
    /// the stack.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedHeap`] for coordinates outside the heap and
    /// [`crate::Error::OutOfBounds`] when the destination range exceeds `buffer`.
    pub fn read_heap(
        &self,
        buffer: &mut [u8],
        buffer_offset: usize,
        coordinates: HeapCoordinates,
    ) -> Result<()> {
        let end = coordinates
            .offset
            .checked_add(coordinates.length)
            .ok_or(out_of_bounds_error!())?;

        if coordinates.offset >= self.uncompressed_size || end > self.uncompressed_size {
            return Err(malformed_heap_error!(
                "the heap coordinates {} lie outside the {} uncompressed bytes",
                coordinates,
                self.uncompressed_size
            ));
        }

        let length = usize::try_from(coordinates.length).map_err(|_| out_of_bounds_error!())?;
        match buffer_offset.checked_add(length) {
            Some(end) if end <= buffer.len() => {}
            _ => return Err(out_of_bounds_error!()),
        }

        let mut heap_offset = coordinates.offset;
        let mut destination = buffer_offset;
        let mut remaining = length;

        while remaining > 0 {
            let chunk_index =
                usize::try_from(heap_offset / self.chunk_size).map_err(|_| out_of_bounds_error!())?;
            let chunk_offset =
                usize::try_from(heap_offset % self.chunk_size).map_err(|_| out_of_bounds_error!())?;
            let chunk_length = usize::try_from(self.chunk_uncompressed_length(chunk_index))
                .map_err(|_| out_of_bounds_error!())?;

            let take = remaining.min(chunk_length - chunk_offset);
            let chunk = self.chunk(chunk_index)?;
            buffer[destination..destination + take]
                .copy_from_slice(&chunk[chunk_offset..chunk_offset + take]);

            heap_offset += take as u64;
            destination += take;
            remaining -= take;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::memory::Memory;
    use flate2::{write::ZlibEncoder, Compression};
    use std::io::Write;

    /// Assemble a heap image from raw chunk contents, compressing each chunk when that
    /// makes it smaller, and return the full file bytes plus the declared sizes.
    fn build_heap(chunks: &[&[u8]], heap_offset: usize, force_raw: bool) -> (Vec<u8>, u64, u64) {
        let mut file = vec![0u8; heap_offset];
        let mut stored_lengths = Vec::new();
        let mut uncompressed = 0u64;

        for chunk in chunks {
            uncompressed += chunk.len() as u64;

            let stored = if force_raw {
                chunk.to_vec()
            } else {
                let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(chunk).unwrap();
                let compressed = encoder.finish().unwrap();
                if compressed.len() < chunk.len() {
                    compressed
                } else {
                    chunk.to_vec()
                }
            };

            stored_lengths.push(stored.len());
            file.extend_from_slice(&stored);
        }

        for length in &stored_lengths[..stored_lengths.len() - 1] {
            file.extend_from_slice(&u16::to_be_bytes((*length - 1) as u16));
        }

        let compressed = (file.len() - heap_offset) as u64;
        (file, compressed, uncompressed)
    }

    fn reader_over(
        chunks: &[&[u8]],
        chunk_size: u64,
        compression: HeapCompression,
        force_raw: bool,
    ) -> HpkHeapReader {
        let (file, compressed, uncompressed) = build_heap(chunks, 8, force_raw);
        HpkHeapReader::new(
            Arc::new(Memory::new(file)),
            compression,
            8,
            chunk_size,
            compressed,
            uncompressed,
        )
        .unwrap()
    }

    fn patterned(len: usize, seed: u8) -> Vec<u8> {
        (0..len)
            .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
            .collect()
    }

    #[test]
    fn read_across_chunk_boundaries_zlib() {
        let c0 = patterned(64, 3);
        let c1 = patterned(64, 7);
        let c2 = patterned(20, 11);
        let reader = reader_over(&[&c0, &c1, &c2], 64, HeapCompression::Zlib, false);

        assert_eq!(reader.chunk_count(), 3);
        assert_eq!(reader.uncompressed_size(), 148);

        let mut expected = Vec::new();
        expected.extend_from_slice(&c0);
        expected.extend_from_slice(&c1);
        expected.extend_from_slice(&c2);

        // one big read over everything
        let mut buffer = vec![0u8; 148];
        reader
            .read_heap(&mut buffer, 0, HeapCoordinates::new(0, 148))
            .unwrap();
        assert_eq!(buffer, expected);

        // a read spanning the first boundary equals the concatenation of per-chunk reads
        let mut spanning = vec![0u8; 32];
        reader
            .read_heap(&mut spanning, 0, HeapCoordinates::new(48, 32))
            .unwrap();
        assert_eq!(&spanning[..], &expected[48..80]);
    }

    #[test]
    fn read_partitions_agree() {
        let c0 = patterned(32, 1);
        let c1 = patterned(32, 2);
        let c2 = patterned(9, 3);
        let reader = reader_over(&[&c0, &c1, &c2], 32, HeapCompression::Zlib, false);

        let mut whole = vec![0u8; 73];
        reader
            .read_heap(&mut whole, 0, HeapCoordinates::new(0, 73))
            .unwrap();

        let mut pieced = vec![0u8; 73];
        let mut offset = 0u64;
        for step in [5u64, 17, 31, 11, 9] {
            reader
                .read_heap(
                    &mut pieced,
                    offset as usize,
                    HeapCoordinates::new(offset, step),
                )
                .unwrap();
            offset += step;
        }
        // the remainder in one final read
        reader
            .read_heap(
                &mut pieced,
                offset as usize,
                HeapCoordinates::new(offset, 73 - offset),
            )
            .unwrap();

        assert_eq!(whole, pieced);
    }

    #[test]
    fn read_heap_none_compression() {
        let c0 = patterned(16, 9);
        let c1 = patterned(10, 4);
        let reader = reader_over(&[&c0, &c1], 16, HeapCompression::None, true);

        let mut buffer = vec![0u8; 26];
        reader
            .read_heap(&mut buffer, 0, HeapCoordinates::new(0, 26))
            .unwrap();
        assert_eq!(&buffer[..16], &c0[..]);
        assert_eq!(&buffer[16..], &c1[..]);

        assert_eq!(reader.read_heap_byte(17).unwrap(), c1[1]);
    }

    #[test]
    fn single_byte_reads_match_buffer_reads() {
        let c0 = patterned(32, 21);
        let reader = reader_over(&[&c0], 32, HeapCompression::Zlib, false);

        for (i, expected) in c0.iter().enumerate() {
            assert_eq!(reader.read_heap_byte(i as u64).unwrap(), *expected);
        }
        assert!(reader.read_heap_byte(32).is_err());
    }

    #[test]
    fn raw_heap_reads_are_idempotent() {
        let c0 = patterned(40, 5);
        let reader = reader_over(&[&c0], 64, HeapCompression::Zlib, false);
        let coordinates = HeapCoordinates::new(8, 24);

        let mut first = vec![0u8; 24];
        reader.read_heap(&mut first, 0, coordinates).unwrap();
        let mut second = vec![0u8; 24];
        reader.read_heap(&mut second, 0, coordinates).unwrap();

        assert_eq!(first, second);
        assert_eq!(&first[..], &c0[8..32]);
    }

    #[test]
    fn zero_size_heap_rejects_reads() {
        let backend = Arc::new(Memory::new(vec![0u8; 8]));
        let reader =
            HpkHeapReader::new(backend, HeapCompression::Zlib, 8, 65536, 0, 0).unwrap();

        assert_eq!(reader.chunk_count(), 0);
        assert!(reader.read_heap_byte(0).is_err());

        let mut buffer = [0u8; 1];
        assert!(matches!(
            reader.read_heap(&mut buffer, 0, HeapCoordinates::new(0, 1)),
            Err(crate::Error::MalformedHeap { .. })
        ));
    }

    #[test]
    fn coordinates_beyond_heap_rejected() {
        let c0 = patterned(16, 2);
        let reader = reader_over(&[&c0], 16, HeapCompression::Zlib, false);

        let mut buffer = vec![0u8; 32];
        assert!(matches!(
            reader.read_heap(&mut buffer, 0, HeapCoordinates::new(8, 16)),
            Err(crate::Error::MalformedHeap { .. })
        ));
        assert!(matches!(
            reader.read_heap(&mut buffer, 0, HeapCoordinates::new(16, 1)),
            Err(crate::Error::MalformedHeap { .. })
        ));
    }

    #[test]
    fn truncated_trailer_is_malformed() {
        let c0 = patterned(64, 3);
        let c1 = patterned(64, 7);
        let (file, compressed, uncompressed) = build_heap(&[&c0, &c1], 8, false);

        // lop the trailer off and shrink the declared compressed size accordingly; the
        // last-chunk derivation can no longer reconcile
        let truncated = file[..file.len() - 2].to_vec();
        let result = HpkHeapReader::new(
            Arc::new(Memory::new(truncated)),
            HeapCompression::Zlib,
            8,
            64,
            compressed - 2,
            uncompressed,
        );

        assert!(matches!(result, Err(crate::Error::MalformedHeap { .. })));
    }

    #[test]
    fn corrupted_chunk_fails_inflation() {
        let c0 = patterned(64, 3);
        let c1 = patterned(64, 7);
        let (mut file, compressed, uncompressed) = build_heap(&[&c0, &c1], 8, false);

        // stomp on the middle of the first chunk's compressed bytes
        file[16] ^= 0xFF;
        file[17] ^= 0xFF;

        let reader = HpkHeapReader::new(
            Arc::new(Memory::new(file)),
            HeapCompression::Zlib,
            8,
            64,
            compressed,
            uncompressed,
        )
        .unwrap();

        let mut buffer = vec![0u8; 16];
        assert!(matches!(
            reader.read_heap(&mut buffer, 0, HeapCoordinates::new(0, 16)),
            Err(crate::Error::MalformedHeap { .. })
        ));
    }

    #[test]
    fn chunk_declared_compressed_in_uncompressed_heap() {
        // a "NONE" heap whose trailer claims the first chunk shrank
        let c0 = patterned(64, 1);
        let c1 = patterned(10, 2);
        let mut file = vec![0u8; 8];
        file.extend_from_slice(&c0[..32]); // only 32 stored bytes for a 64 byte chunk
        file.extend_from_slice(&c1);
        file.extend_from_slice(&u16::to_be_bytes(31));

        let compressed = (file.len() - 8) as u64;
        let reader = HpkHeapReader::new(
            Arc::new(Memory::new(file)),
            HeapCompression::None,
            8,
            64,
            compressed,
            74,
        )
        .unwrap();

        assert!(matches!(
            reader.read_heap_byte(0),
            Err(crate::Error::MalformedHeap { .. })
        ));
    }

    #[test]
    fn cache_eviction_keeps_results_correct() {
        // more chunks than the cache holds; walking forward and back re-faults chunks
        let contents: Vec<Vec<u8>> = (0..6).map(|i| patterned(16, i as u8)).collect();
        let refs: Vec<&[u8]> = contents.iter().map(|c| c.as_slice()).collect();
        let reader = reader_over(&refs, 16, HeapCompression::Zlib, false);

        for round in 0..2 {
            for (i, chunk) in contents.iter().enumerate() {
                let mut buffer = vec![0u8; 16];
                reader
                    .read_heap(&mut buffer, 0, HeapCoordinates::new(i as u64 * 16, 16))
                    .unwrap();
                assert_eq!(&buffer, chunk, "round {} chunk {}", round, i);
            }
        }
    }
}
