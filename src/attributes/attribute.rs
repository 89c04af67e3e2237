//! Decoded attribute records and their values.
//!
//! An [`Attribute`] is one record of an attribute stream together with its decoded
//! children. Its [`AttributeValue`] preserves the wire representation - a table
//! reference stays an index, a heap reference stays coordinates - and is only turned
//! into bytes or text by [`Attribute::value`] against an [`AttributeContext`]. Large
//! file payloads therefore cost nothing until somebody actually asks for them, and
//! resolution is repeatable: resolving the same heap reference twice yields the same
//! bytes.

use std::borrow::Cow;

use crate::{
    attributes::{AttributeContext, AttributeId, AttributeType},
    heap::HeapCoordinates,
    Result,
};

/// The stored form of an attribute's value, exactly as decoded from the stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttributeValue {
    /// An integer, widened from its 1/2/4/8 byte wire form. Signed values are
    /// sign-extended, unsigned values zero-extended; `i128` holds both full ranges.
    Int(i128),
    /// A string stored inline in the stream.
    StringInline(String),
    /// A string stored as an index into the stream's string table.
    StringTableRef(usize),
    /// Binary data stored inline in the stream.
    RawInline(Vec<u8>),
    /// Binary data stored elsewhere in the heap, not yet read.
    RawHeap(HeapCoordinates),
}

impl AttributeValue {
    /// The value type this representation belongs to.
    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        match self {
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::StringInline(_) | AttributeValue::StringTableRef(_) => {
                AttributeType::String
            }
            AttributeValue::RawInline(_) | AttributeValue::RawHeap(_) => AttributeType::Raw,
        }
    }
}

/// An attribute value resolved against its context.
///
/// Borrows from the attribute (inline strings and data) or the string table where it
/// can; heap-referenced data is copied out of the heap and owned.
#[derive(Debug, PartialEq, Eq)]
pub enum Value<'a> {
    Int(i128),
    String(&'a str),
    Raw(Cow<'a, [u8]>),
}

impl<'a> Value<'a> {
    #[must_use]
    pub fn as_int(&self) -> Option<i128> {
        match self {
            Value::Int(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_raw(&self) -> Option<&[u8]> {
        match self {
            Value::Raw(value) => Some(value.as_ref()),
            _ => None,
        }
    }
}

/// One decoded attribute record: identifier, stored value, and child records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    id: AttributeId,
    value: AttributeValue,
    children: Vec<Attribute>,
}

impl Attribute {
    #[must_use]
    pub fn new(id: AttributeId, value: AttributeValue) -> Attribute {
        Attribute {
            id,
            value,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Attribute>) -> Attribute {
        self.children = children;
        self
    }

    #[must_use]
    pub fn id(&self) -> AttributeId {
        self.id
    }

    /// The stored, unresolved value.
    #[must_use]
    pub fn raw_value(&self) -> &AttributeValue {
        &self.value
    }

    #[must_use]
    pub fn attribute_type(&self) -> AttributeType {
        self.value.attribute_type()
    }

    #[must_use]
    pub fn children(&self) -> &[Attribute] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// The first child with the given identifier, if any.
    #[must_use]
    pub fn child(&self, id: AttributeId) -> Option<&Attribute> {
        self.children.iter().find(|a| a.id == id)
    }

    /// All children with the given identifier, in stream order.
    pub fn children_with_id(&self, id: AttributeId) -> impl Iterator<Item = &Attribute> {
        self.children.iter().filter(move |a| a.id == id)
    }

    /// The single child with the given identifier.
    ///
    /// # Errors
    /// Returns [`crate::Error::Projection`] when there are zero or several matches.
    pub fn only_child(&self, id: AttributeId) -> Result<&Attribute> {
        let mut matches = self.children_with_id(id);
        let first = matches.next().ok_or_else(|| {
            crate::Error::Projection(format!(
                "expected exactly one '{}' child of '{}', found none",
                id.attribute_name(),
                self.id.attribute_name()
            ))
        })?;
        if matches.next().is_some() {
            return Err(crate::Error::Projection(format!(
                "expected exactly one '{}' child of '{}', found several",
                id.attribute_name(),
                self.id.attribute_name()
            )));
        }
        Ok(first)
    }

    /// A child required to be present.
    ///
    /// # Errors
    /// Returns [`crate::Error::Projection`] naming the missing attribute.
    pub fn expect_child(&self, id: AttributeId) -> Result<&Attribute> {
        self.child(id).ok_or_else(|| {
            crate::Error::Projection(format!(
                "the '{}' attribute must be available under '{}'",
                id.attribute_name(),
                self.id.attribute_name()
            ))
        })
    }

    /// Resolve the stored value against `context`.
    ///
    /// Inline values never consult the context; table references index the string
    /// table and heap references read the heap.
    ///
    /// # Errors
    /// Returns [`crate::Error::MalformedAttributes`] for an out-of-range string table
    /// index and heap errors for unreadable heap coordinates.
    pub fn value<'a>(&'a self, context: &AttributeContext<'a>) -> Result<Value<'a>> {
        match &self.value {
            AttributeValue::Int(value) => Ok(Value::Int(*value)),
            AttributeValue::StringInline(value) => Ok(Value::String(value)),
            AttributeValue::StringTableRef(index) => {
                Ok(Value::String(context.string_table().string(*index)?))
            }
            AttributeValue::RawInline(value) => Ok(Value::Raw(Cow::Borrowed(value))),
            AttributeValue::RawHeap(coordinates) => {
                let length =
                    usize::try_from(coordinates.length).map_err(|_| out_of_bounds_error!())?;
                let mut buffer = vec![0u8; length];
                context
                    .heap_reader()
                    .read_heap(&mut buffer, 0, *coordinates)?;
                Ok(Value::Raw(Cow::Owned(buffer)))
            }
        }
    }
}
