// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![allow(clippy::too_many_arguments)]
// - 'file/physical.rs' uses mmap to map a file into memory

//! # hpkscope
//!
//! A pure-Rust, read-only decoder for Haiku package archives: single-package HPKG
//! containers and HPKR repository indices. `hpkscope` parses the container headers,
//! reads the chunk-compressed heap on demand, decodes the typed attribute trees that
//! describe file contents and package metadata, and can project a package attribute
//! subtree into a high-level package model.
//!
//! ## Features
//!
//! - **Memory-mapped access** - containers are read through a read-only map, released
//!   deterministically when the extractor is dropped
//! - **Streaming decode** - repository indices are scanned one package subtree at a
//!   time, without materializing the whole index
//! - **Lazy payloads** - file data referenced in the heap is only read when asked for
//! - **Hostile-input safe** - every length, offset, index and nesting depth is
//!   validated; corrupt containers produce errors, never panics or hangs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hpkscope::prelude::*;
//! use std::path::Path;
//!
//! let extractor = HpkrExtractor::open(Path::new("repo.hpkr"))?;
//! let context = extractor.attribute_context();
//!
//! let mut packages = extractor.package_attributes_iterator();
//! while let Some(subtree) = packages.next()? {
//!     let pkg = create_package(&context, &subtree)?;
//!     println!("{} {}", pkg.name, pkg.version);
//! }
//! # Ok::<(), hpkscope::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - [`file`] - data backends (memory map / owned buffer) and the bounds-checked
//!   cursor [`Parser`]
//! - [`heap`] - the chunk-compressed heap reader with its bounded chunk cache
//! - [`attributes`] - attribute identifiers, the decoded tree model, the string
//!   table, and the streaming [`attributes::AttributeIterator`]
//! - [`container`] - HPKG and HPKR headers and extractors
//! - [`pkg`] - the projected package model and its factory
//!
//! Decoding is read-only by design: nothing in this crate writes, repairs, or
//! re-encodes a container.

#[macro_use]
pub(crate) mod error;

pub mod attributes;
pub mod container;
pub mod file;
pub mod heap;
pub mod pkg;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust,no_run
/// use hpkscope::prelude::*;
///
/// let extractor = HpkgExtractor::open("package.hpkg")?;
/// let toc = extractor.toc()?;
/// # Ok::<(), hpkscope::Error>(())
/// ```
pub mod prelude;

/// The error type for every fallible operation in this crate.
pub use error::Error;

/// Result alias used throughout this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifiers and types of the attributes a container can carry.
pub use attributes::{Attribute, AttributeId, AttributeType, AttributeValue};

/// Low-level cursor over raw bytes, used for header decoding.
///
/// # Example
///
/// ```rust,no_run
/// use hpkscope::Parser;
/// let data = [0x68, 0x70, 0x6B, 0x67];
/// let mut parser = Parser::new(&data);
/// let magic = parser.read_bytes(4)?;
/// assert_eq!(magic, &b"hpkg"[..]);
/// # Ok::<(), hpkscope::Error>(())
/// ```
pub use file::parser::Parser;

/// Container entry points.
///
/// # Example
///
/// ```rust,no_run
/// use hpkscope::{HpkgExtractor, HpkrExtractor};
///
/// let package = HpkgExtractor::open("package.hpkg")?;
/// let repository = HpkrExtractor::open("repo.hpkr")?;
/// # Ok::<(), hpkscope::Error>(())
/// ```
pub use container::{HpkgExtractor, HpkrExtractor};
