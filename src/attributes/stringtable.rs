//! Shared string table referenced by attribute streams.

use crate::{
    heap::{HeapCoordinates, HpkHeapReader},
    Result,
};

/// A table of strings shared by the records of one attribute stream.
///
/// String attributes stored with the table-reference encoding carry only an index into
/// this table. The table region holds `count` consecutive NUL-terminated UTF-8 strings;
/// it is read and split once, eagerly, when its container is opened, so every indexing
/// problem left is an out-of-range index at lookup time.
pub struct StringTable {
    strings: Vec<String>,
}

impl StringTable {
    /// Read a string table out of a heap region.
    ///
    /// # Arguments
    /// * `heap_reader` - The heap the region lives in
    /// * `coordinates` - The table region within the uncompressed heap
    /// * `count` - The number of strings the region must contain
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedAttributes`] when the region is exhausted
    /// before `count` strings are found or a string is not valid UTF-8, and heap
    /// errors when the region itself is out of range.
    pub fn from_heap(
        heap_reader: &HpkHeapReader,
        coordinates: HeapCoordinates,
        count: u64,
    ) -> Result<StringTable> {
        let count = usize::try_from(count).map_err(|_| out_of_bounds_error!())?;
        if count == 0 {
            return Ok(StringTable {
                strings: Vec::new(),
            });
        }

        let length = usize::try_from(coordinates.length).map_err(|_| out_of_bounds_error!())?;
        let mut buffer = vec![0u8; length];
        heap_reader.read_heap(&mut buffer, 0, coordinates)?;

        let mut strings = Vec::with_capacity(count);
        let mut position = 0usize;

        while strings.len() < count {
            let terminator = buffer[position..]
                .iter()
                .position(|b| *b == 0)
                .ok_or_else(|| {
                    malformed_attributes_error!(
                        "the string table region ran out after {} of {} strings",
                        strings.len(),
                        count
                    )
                })?;

            let string = std::str::from_utf8(&buffer[position..position + terminator])
                .map_err(|_| {
                    malformed_attributes_error!(
                        "the string table entry {} is not valid utf-8",
                        strings.len()
                    )
                })?;

            strings.push(string.to_string());
            position += terminator + 1;
        }

        Ok(StringTable { strings })
    }

    /// The quantity of strings in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Look a string up by its table index.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedAttributes`] when the index is out of range.
    pub fn string(&self, index: usize) -> Result<&str> {
        self.strings.get(index).map(String::as_str).ok_or_else(|| {
            malformed_attributes_error!(
                "string table index {} out of range; the table holds {} strings",
                index,
                self.strings.len()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::memory::Memory;
    use crate::heap::HeapCompression;
    use std::sync::Arc;

    fn raw_heap(content: &[u8]) -> HpkHeapReader {
        // single raw chunk, no trailer
        HpkHeapReader::new(
            Arc::new(Memory::new(content.to_vec())),
            HeapCompression::None,
            0,
            65536,
            content.len() as u64,
            content.len() as u64,
        )
        .unwrap()
    }

    #[test]
    fn reads_and_indexes_strings() {
        let reader = raw_heap(b"alpha\0beta\0gamma\0");
        let table =
            StringTable::from_heap(&reader, HeapCoordinates::new(0, 17), 3).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.string(0).unwrap(), "alpha");
        assert_eq!(table.string(1).unwrap(), "beta");
        assert_eq!(table.string(2).unwrap(), "gamma");
        assert!(matches!(
            table.string(3),
            Err(crate::Error::MalformedAttributes { .. })
        ));
    }

    #[test]
    fn empty_table_needs_no_region() {
        let reader = raw_heap(b"x");
        let table = StringTable::from_heap(&reader, HeapCoordinates::new(0, 0), 0).unwrap();
        assert!(table.is_empty());
        assert!(table.string(0).is_err());
    }

    #[test]
    fn short_region_is_malformed() {
        let reader = raw_heap(b"alpha\0beta");
        let result = StringTable::from_heap(&reader, HeapCoordinates::new(0, 10), 2);
        assert!(matches!(
            result,
            Err(crate::Error::MalformedAttributes { .. })
        ));
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let reader = raw_heap(b"ok\0\xFF\xFE\0");
        let result = StringTable::from_heap(&reader, HeapCoordinates::new(0, 6), 2);
        assert!(matches!(
            result,
            Err(crate::Error::MalformedAttributes { .. })
        ));
    }
}
