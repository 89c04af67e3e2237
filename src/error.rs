use thiserror::Error;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! malformed_heap_error {
    ($msg:expr) => {
        crate::Error::MalformedHeap {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedHeap {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! malformed_attributes_error {
    ($msg:expr) => {
        crate::Error::MalformedAttributes {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::MalformedAttributes {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

macro_rules! out_of_bounds_error {
    () => {
        crate::Error::OutOfBounds {
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure mode of decoding an HPKG or HPKR container maps onto one of these variants,
/// so callers can distinguish a damaged file from an unsupported one and from plain I/O
/// trouble.
///
/// # Error Categories
///
/// ## Format errors
/// - [`Error::Malformed`] - Header magic/version mismatch or any other structural violation
/// - [`Error::NotSupported`] - Unknown heap compression kind or unsupported format version
/// - [`Error::Empty`] - Empty input provided
///
/// ## Heap errors
/// - [`Error::MalformedHeap`] - Chunk lengths that do not reconcile, inflate mismatches,
///   out-of-bounds heap coordinates
/// - [`Error::OutOfBounds`] - Attempted to read beyond file or buffer boundaries
///
/// ## Attribute stream errors
/// - [`Error::MalformedAttributes`] - Truncated records, unknown attribute ids or storage
///   kinds, missing terminator, string-table index out of range
/// - [`Error::RecursionLimit`] - Attribute nesting deeper than the decoder allows
///
/// ## Projection errors
/// - [`Error::Projection`] - A required field was absent or of the wrong kind while
///   assembling a [`crate::pkg::Pkg`]
///
/// ## I/O errors
/// - [`Error::FileError`] - Underlying filesystem read/open failures
///
/// # Examples
///
/// ```rust,no_run
/// use hpkscope::{container::HpkgExtractor, Error};
/// use std::path::Path;
///
/// match HpkgExtractor::open(Path::new("tipster-1.1.1-1-x86_64.hpkg")) {
///     Ok(extractor) => println!("opened ok"),
///     Err(Error::Malformed { message, file, line }) => {
///         eprintln!("malformed container: {} ({}:{})", message, file, line);
///     }
///     Err(Error::FileError(io_err)) => eprintln!("i/o: {}", io_err),
///     Err(e) => eprintln!("other: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The container structure is damaged or does not conform to the HPKG/HPKR format.
    ///
    /// Covers header-level problems such as a wrong magic, a header shorter than the
    /// fixed layout, or section offsets that do not fit inside the heap. The error
    /// includes the source location where the malformation was detected.
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// The heap region of the container cannot be decoded.
    ///
    /// Raised when chunk compressed lengths do not reconcile with the declared
    /// compressed size, when inflation yields an unexpected byte count or fails to
    /// reach stream end, or when heap coordinates point outside the uncompressed
    /// address space.
    #[error("Malformed heap - {file}:{line}: {message}")]
    MalformedHeap {
        /// The message to be printed for the MalformedHeap error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An attribute stream cannot be decoded.
    ///
    /// Raised for truncated records, tags with an unknown attribute id or storage
    /// kind, a record whose kind disagrees with the id's declared type, a missing
    /// level terminator before the end of the stream, or an out-of-range
    /// string-table index at resolution time.
    #[error("Malformed attributes - {file}:{line}: {message}")]
    MalformedAttributes {
        /// The message to be printed for the MalformedAttributes error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// An out of bound access was attempted while parsing the file.
    ///
    /// This is a safety check to prevent buffer overruns when reading malformed or
    /// truncated data.
    #[error("Out of bound read would have occurred! ({file}:{line})")]
    OutOfBounds {
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// This file type, format version or compression kind is not supported.
    #[error("This file type is not supported")]
    NotSupported,

    /// Provided input was empty.
    #[error("Provided input was empty")]
    Empty,

    /// Attribute nesting exceeded the maximum depth allowed by the decoder.
    ///
    /// The associated value is the depth limit that was reached. A legitimate
    /// container never comes close to this; hitting it means the child flags in the
    /// stream are corrupt.
    #[error("Reached the maximum recursion level allowed - {0}")]
    RecursionLimit(usize),

    /// Projecting a decoded attribute tree into a package model failed.
    ///
    /// A structurally required field (such as the package name) was absent, or a
    /// field held a value of the wrong kind.
    #[error("{0}")]
    Projection(String),

    /// File I/O error.
    #[error("{0}")]
    FileError(#[from] std::io::Error),

    /// Generic error for miscellaneous failures.
    #[error("{0}")]
    Error(String),
}
