//! Shared decode context for one attribute stream.

use crate::{attributes::StringTable, heap::HpkHeapReader};

/// Everything an attribute stream needs to be decoded and resolved: the heap its
/// coordinates point into and the string table its table-reference strings index.
///
/// A context borrows both from the owning container extractor, so resolved values can
/// never outlive the container they came from.
#[derive(Clone, Copy)]
pub struct AttributeContext<'a> {
    heap_reader: &'a HpkHeapReader,
    string_table: &'a StringTable,
}

impl<'a> AttributeContext<'a> {
    #[must_use]
    pub fn new(heap_reader: &'a HpkHeapReader, string_table: &'a StringTable) -> Self {
        AttributeContext {
            heap_reader,
            string_table,
        }
    }

    #[must_use]
    pub fn heap_reader(&self) -> &'a HpkHeapReader {
        self.heap_reader
    }

    #[must_use]
    pub fn string_table(&self) -> &'a StringTable {
        self.string_table
    }
}
