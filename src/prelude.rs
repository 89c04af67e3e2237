//! # hpkscope Prelude
//!
//! A convenient prelude for the most commonly used types in the library. Import this
//! module to get quick access to the essentials for reading package archives.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all operations
pub use crate::Error;

/// The result type used throughout the library
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Single-package container access
pub use crate::container::{HpkgExtractor, HpkgHeader};

/// Repository-index container access
pub use crate::container::{HpkrExtractor, HpkrHeader};

// ================================================================================================
// Attribute Model
// ================================================================================================

/// Decoded attribute records and their identifiers
pub use crate::attributes::{
    Attribute, AttributeContext, AttributeId, AttributeIterator, AttributeType, AttributeValue,
    StringTable, Value,
};

// ================================================================================================
// Heap Access
// ================================================================================================

/// Heap addressing and the decompressing reader
pub use crate::heap::{HeapCompression, HeapCoordinates, HpkHeapReader};

// ================================================================================================
// Package Projection
// ================================================================================================

/// The high-level package model and its projection
pub use crate::pkg::{
    factory::create_package, Pkg, PkgArchitecture, PkgUrl, PkgUrlType, PkgVersion,
};
