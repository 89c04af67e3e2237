//! Low-level byte order utilities for container decoding.
//!
//! This module provides endian-aware, bounds-checked reading of primitive types from byte
//! buffers. The HPKG family of formats stores every multi-byte integer big-endian, so
//! [`read_be_at`] is the workhorse here; little-endian counterparts exist for completeness
//! and for tests that craft buffers byte by byte.
//!
//! # Key Components
//!
//! - [`HpkIO`] - Trait defining endian-aware conversions for primitive types
//! - [`read_be_at`] / [`read_le_at`] - Read a value at an offset, advancing the offset
//! - [`read_be`] / [`read_le`] - Read a value from the start of a buffer
//!
//! # Usage Examples
//!
//! ```rust
//! use hpkscope::file::io::read_be_at;
//!
//! let data = [0x00, 0x00, 0x00, 0x2A];
//! let mut offset = 0;
//! let value: u32 = read_be_at(&data, &mut offset)?;
//! assert_eq!(value, 42);
//! assert_eq!(offset, 4);
//! # Ok::<(), hpkscope::Error>(())
//! ```

use crate::Result;

/// Trait for primitive types that can be decoded from fixed-size byte arrays in either
/// byte order.
///
/// Implementations exist for the unsigned and signed integer types used by the HPKG
/// header and heap structures. All implementations are pure conversions with no shared
/// state.
pub trait HpkIO: Sized {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Read T from a byte buffer in big-endian
    fn from_be_bytes(bytes: Self::Bytes) -> Self;
}

macro_rules! impl_hpk_io {
    ($($t:ty => $n:literal),* $(,)?) => {
        $(
            impl HpkIO for $t {
                type Bytes = [u8; $n];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$t>::from_be_bytes(bytes)
                }
            }
        )*
    };
}

impl_hpk_io! {
    u8 => 1, i8 => 1,
    u16 => 2, i16 => 2,
    u32 => 4, i32 => 4,
    u64 => 8, i64 => 8,
}

/// Read a value of type `T` from `data` at `*offset` in little-endian order, advancing
/// the offset past the value.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
pub fn read_le_at<T: HpkIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if type_len + *offset > data.len() {
        return Err(out_of_bounds_error!());
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(out_of_bounds_error!());
    };

    *offset += type_len;

    Ok(T::from_le_bytes(read))
}

/// Read a value of type `T` from `data` at `*offset` in big-endian order, advancing the
/// offset past the value.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes remain.
pub fn read_be_at<T: HpkIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    if type_len + *offset > data.len() {
        return Err(out_of_bounds_error!());
    }

    let Ok(read) = data[*offset..*offset + type_len].try_into() else {
        return Err(out_of_bounds_error!());
    };

    *offset += type_len;

    Ok(T::from_be_bytes(read))
}

/// Read a value of type `T` from the start of `data` in little-endian order.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is shorter than `T`.
pub fn read_le<T: HpkIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0;
    read_le_at(data, &mut offset)
}

/// Read a value of type `T` from the start of `data` in big-endian order.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the buffer is shorter than `T`.
pub fn read_be<T: HpkIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0;
    read_be_at(data, &mut offset)
}
