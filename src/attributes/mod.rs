//! Attribute model and stream decoding.
//!
//! HPKG and HPKR containers describe everything - file trees, package metadata,
//! repository contents - as trees of typed attributes serialized into streams inside
//! the heap. This module holds the closed identifier set, the decoded tree model, the
//! streaming decoder, and the string table and context the decoder works against.

mod attribute;
mod context;
mod id;
mod iterator;
mod stringtable;

pub use attribute::{Attribute, AttributeValue, Value};
pub use context::AttributeContext;
pub use id::{AttributeId, AttributeType};
pub use iterator::AttributeIterator;
pub use stringtable::StringTable;
