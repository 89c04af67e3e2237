//! Streaming decoder for attribute streams.
//!
//! An attribute stream is a sequence of records, each introduced by an unsigned LEB128
//! *tag*. Tag zero terminates the current level. For any other tag, with `t = tag - 1`:
//!
//! ```text
//! id        = t & 0x7F          attribute identifier code
//! type      = (t >> 7) & 0x7    1=INT  2=UINT  3=STRING  4=RAW
//! children  = (t >> 10) & 0x1   a zero-terminated child sequence follows the payload
//! encoding  = (t >> 11) & 0x3   payload width / representation selector
//! ```
//!
//! INT and UINT payloads are `1 << encoding` big-endian bytes, sign- or zero-extended.
//! STRING payloads are inline NUL-terminated UTF-8 (encoding 0) or a LEB128 string
//! table index (encoding 1). RAW payloads are a LEB128 length followed by inline bytes
//! (encoding 0), or LEB128 length and offset forming heap coordinates (encoding 1).
//!
//! [`AttributeIterator`] walks one level of a stream, decoding child sequences
//! recursively into each returned [`Attribute`]. Iteration is streaming: only the
//! current record and its (already decoded) children are in memory, so a repository
//! index with thousands of packages can be scanned one package at a time.
//!
//! Once any decode step fails, the iterator is poisoned: the stream position is no
//! longer trustworthy, and every further call reports failure instead of yielding
//! records from a corrupt position.

use crate::{
    attributes::{Attribute, AttributeContext, AttributeId, AttributeValue},
    heap::HeapCoordinates,
    Result,
};

const TAG_TYPE_INVALID: u64 = 0;
const TAG_TYPE_INT: u64 = 1;
const TAG_TYPE_UINT: u64 = 2;
const TAG_TYPE_STRING: u64 = 3;
const TAG_TYPE_RAW: u64 = 4;

const ENCODING_STRING_INLINE: u64 = 0;
const ENCODING_STRING_TABLE: u64 = 1;

const ENCODING_RAW_INLINE: u64 = 0;
const ENCODING_RAW_HEAP: u64 = 1;

/// Maximum depth of child nesting accepted before the stream is declared corrupt.
const MAX_CHILD_DEPTH: usize = 64;

/// A streaming decoder over one level of an attribute stream.
///
/// Obtained from a container extractor positioned at a stream's start offset. Call
/// [`AttributeIterator::has_next`] to probe for another record and
/// [`AttributeIterator::next`] to decode it; child sequences are decoded eagerly into
/// the returned record. This is deliberately not [`std::iter::Iterator`]: every step
/// can fail, and the fallible-iterator shape keeps `?` available at each call site.
pub struct AttributeIterator<'a> {
    context: AttributeContext<'a>,
    offset: u64,
    next_tag: Option<u64>,
    failed: bool,
}

impl<'a> AttributeIterator<'a> {
    #[must_use]
    pub fn new(context: AttributeContext<'a>, offset: u64) -> AttributeIterator<'a> {
        AttributeIterator {
            context,
            offset,
            next_tag: None,
            failed: false,
        }
    }

    #[must_use]
    pub fn context(&self) -> &AttributeContext<'a> {
        &self.context
    }

    /// The current decode position in the uncompressed heap.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether another record is available at this level.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedAttributes`] on a corrupt tag or when the
    /// iterator already failed.
    pub fn has_next(&mut self) -> Result<bool> {
        self.ensure_usable()?;
        match self.peek_tag() {
            Ok(tag) => Ok(tag != 0),
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    /// Decode the next record at this level, or `None` at the level terminator.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedAttributes`] for corrupt tags, ids, or
    /// payloads, [`crate::Error::RecursionLimit`] for over-deep nesting, and heap
    /// errors when the stream runs past the heap. After any error the iterator is
    /// poisoned and further calls fail.
    pub fn next(&mut self) -> Result<Option<Attribute>> {
        self.ensure_usable()?;
        match self.read_record(0) {
            Ok(result) => Ok(result),
            Err(e) => {
                self.failed = true;
                Err(e)
            }
        }
    }

    fn ensure_usable(&self) -> Result<()> {
        if self.failed {
            return Err(malformed_attributes_error!(
                "the attribute stream failed earlier; the position at heap offset {} is not trustworthy",
                self.offset
            ));
        }
        Ok(())
    }

    fn read_record(&mut self, depth: usize) -> Result<Option<Attribute>> {
        let tag = self.peek_tag()?;

        if tag == 0 {
            // A terminator ends a child sequence and is consumed so the parent
            // level can continue. At the top level it stays cached: the stream is
            // exhausted and the bytes beyond it belong to whatever follows.
            if depth > 0 {
                self.next_tag = None;
            }
            return Ok(None);
        }

        self.next_tag = None;

        let t = tag - 1;
        let id_code = t & 0x7F;
        let tag_type = (t >> 7) & 0x7;
        let has_children = (t >> 10) & 0x1 != 0;
        let encoding = (t >> 11) & 0x3;

        let id = AttributeId::from_repr(id_code as u8)
            .ok_or_else(|| malformed_attributes_error!("illegal attribute id; {}", id_code))?;

        let value = self.read_value(tag_type, encoding)?;

        if value.attribute_type() != id.attribute_type() {
            return Err(malformed_attributes_error!(
                "mismatch in attribute type for id {}; expecting {:?}, but got {:?}",
                id.attribute_name(),
                id.attribute_type(),
                value.attribute_type()
            ));
        }

        let mut attribute = Attribute::new(id, value);

        if has_children {
            if depth >= MAX_CHILD_DEPTH {
                return Err(crate::Error::RecursionLimit(MAX_CHILD_DEPTH));
            }

            let mut children = Vec::new();
            while let Some(child) = self.read_record(depth + 1)? {
                children.push(child);
            }
            attribute = attribute.with_children(children);
        }

        Ok(Some(attribute))
    }

    fn read_value(&mut self, tag_type: u64, encoding: u64) -> Result<AttributeValue> {
        match tag_type {
            TAG_TYPE_INVALID => Err(malformed_attributes_error!(
                "an invalid attribute tag type has been encountered"
            )),
            TAG_TYPE_INT => {
                let buffer = self.read_int_payload(encoding)?;
                let mut value = i128::from(buffer[0] as i8);
                for byte in &buffer[1..] {
                    value = (value << 8) | i128::from(*byte);
                }
                Ok(AttributeValue::Int(value))
            }
            TAG_TYPE_UINT => {
                let buffer = self.read_int_payload(encoding)?;
                let mut value = 0i128;
                for byte in &buffer {
                    value = (value << 8) | i128::from(*byte);
                }
                Ok(AttributeValue::Int(value))
            }
            TAG_TYPE_STRING => match encoding {
                ENCODING_STRING_INLINE => self.read_string_inline(),
                ENCODING_STRING_TABLE => {
                    let index = self.read_unsigned_leb128()?;
                    let index = usize::try_from(index).map_err(|_| {
                        malformed_attributes_error!(
                            "the string table index {} is preposterously large",
                            index
                        )
                    })?;
                    Ok(AttributeValue::StringTableRef(index))
                }
                _ => Err(malformed_attributes_error!(
                    "unknown string encoding; {}",
                    encoding
                )),
            },
            TAG_TYPE_RAW => match encoding {
                ENCODING_RAW_INLINE => {
                    let length = self.read_unsigned_leb128()?;
                    let length = usize::try_from(length).map_err(|_| {
                        malformed_attributes_error!(
                            "the length {} of the inline data is too large",
                            length
                        )
                    })?;
                    let mut buffer = vec![0u8; length];
                    self.context.heap_reader().read_heap(
                        &mut buffer,
                        0,
                        HeapCoordinates::new(self.offset, length as u64),
                    )?;
                    self.offset += length as u64;
                    Ok(AttributeValue::RawInline(buffer))
                }
                ENCODING_RAW_HEAP => {
                    let length = self.read_unsigned_leb128()?;
                    let offset = self.read_unsigned_leb128()?;
                    Ok(AttributeValue::RawHeap(HeapCoordinates::new(
                        offset, length,
                    )))
                }
                _ => Err(malformed_attributes_error!(
                    "unknown raw encoding; {}",
                    encoding
                )),
            },
            _ => Err(malformed_attributes_error!(
                "unable to read the tag type [{}]",
                tag_type
            )),
        }
    }

    /// Integer payloads are `1 << encoding` big-endian bytes; the two encoding bits
    /// make every width 1/2/4/8 valid by construction.
    fn read_int_payload(&mut self, encoding: u64) -> Result<Vec<u8>> {
        let length = 1usize << encoding;
        let mut buffer = vec![0u8; length];
        self.context.heap_reader().read_heap(
            &mut buffer,
            0,
            HeapCoordinates::new(self.offset, length as u64),
        )?;
        self.offset += length as u64;
        Ok(buffer)
    }

    fn read_string_inline(&mut self) -> Result<AttributeValue> {
        let mut assembly = Vec::new();

        loop {
            let byte = self.context.heap_reader().read_heap_byte(self.offset)?;
            self.offset += 1;

            if byte == 0 {
                let string = String::from_utf8(assembly).map_err(|_| {
                    malformed_attributes_error!(
                        "an inline string ending at heap offset {} is not valid utf-8",
                        self.offset
                    )
                })?;
                return Ok(AttributeValue::StringInline(string));
            }

            assembly.push(byte);
        }
    }

    /// The cached next tag, reading it from the stream on first access. Consumption
    /// clears the cache so `has_next` stays free of side effects on the position.
    fn peek_tag(&mut self) -> Result<u64> {
        if let Some(tag) = self.next_tag {
            return Ok(tag);
        }

        let tag = self.read_unsigned_leb128()?;
        self.next_tag = Some(tag);
        Ok(tag)
    }

    fn read_unsigned_leb128(&mut self) -> Result<u64> {
        let start = self.offset;
        let mut result = 0u64;
        let mut shift = 0u32;

        loop {
            let byte = self.context.heap_reader().read_heap_byte(self.offset)?;
            self.offset += 1;

            let payload = u64::from(byte & 0x7F);

            if shift > 63 || (shift == 63 && payload > 1) {
                return Err(malformed_attributes_error!(
                    "the LEB128 quantity at heap offset {} overflows 64 bits",
                    start
                ));
            }

            result |= payload << shift;

            if byte & 0x80 == 0 {
                return Ok(result);
            }

            shift += 7;
        }
    }
}
