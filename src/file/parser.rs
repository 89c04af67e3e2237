//! Cursor-based binary parser for container headers and heap regions.
//!
//! This module provides the [`Parser`] type, a bounds-checked cursor over a byte slice.
//! It is used for decoding the fixed HPKG/HPKR headers and for walking heap-resident
//! structures such as the string table once their bytes have been materialized.
//!
//! All read operations validate data availability before touching the buffer, so a
//! truncated or hostile file can never cause an out-of-range access; it produces a typed
//! error instead.
//!
//! # Usage Examples
//!
//! ```rust
//! use hpkscope::Parser;
//!
//! let data = [0x00, 0x02, b'h', b'i', 0x00];
//! let mut parser = Parser::new(&data);
//!
//! let version: u16 = parser.read_be()?;
//! assert_eq!(version, 2);
//!
//! let name = parser.read_string_utf8()?;
//! assert_eq!(name, "hi");
//! # Ok::<(), hpkscope::Error>(())
//! ```

use crate::{
    file::io::{read_be_at, read_le_at, HpkIO},
    Result,
};

/// A generic binary data parser for reading HPKG container structures.
///
/// `Parser` maintains an internal position cursor within a borrowed byte slice and
/// provides strongly typed, bounds-checked reads in both byte orders. The container
/// formats are big-endian throughout, so [`Parser::read_be`] is the common path.
pub struct Parser<'a> {
    /// The binary data being parsed
    data: &'a [u8],
    /// Current position within the data buffer
    position: usize,
}

impl<'a> Parser<'a> {
    /// Create a new [`Parser`] from a byte slice.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Parser { data, position: 0 }
    }

    /// Returns the length of the underlying data buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the parser has no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` if there is more data available to parse.
    #[must_use]
    pub fn has_more_data(&self) -> bool {
        self.position < self.data.len()
    }

    /// Move the current position to the specified index.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is beyond the data length.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = pos;
        Ok(())
    }

    /// Move the position forward by the specified number of bytes.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if advancing by step would exceed the data length.
    pub fn advance_by(&mut self, step: usize) -> Result<()> {
        if self.position + step > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position += step;
        Ok(())
    }

    /// Get the current position of the parser within the data buffer.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes remaining from the current position.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Peek at the next byte without advancing the position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if position is at or beyond the data length.
    pub fn peek_byte(&self) -> Result<u8> {
        if self.position >= self.data.len() {
            return Err(out_of_bounds_error!());
        }
        Ok(self.data[self.position])
    }

    /// Read a type `T` from the current position in little-endian format and advance the
    /// position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_le<T: HpkIO>(&mut self) -> Result<T> {
        read_le_at::<T>(self.data, &mut self.position)
    }

    /// Read a type `T` from the current position in big-endian format and advance the
    /// position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading would exceed the data length.
    pub fn read_be<T: HpkIO>(&mut self) -> Result<T> {
        read_be_at::<T>(self.data, &mut self.position)
    }

    /// Reads a slice of bytes of the specified length from the current position.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if reading `length` bytes would exceed the data.
    pub fn read_bytes(&mut self, length: usize) -> Result<&'a [u8]> {
        let end = self
            .position
            .checked_add(length)
            .ok_or(out_of_bounds_error!())?;

        if end > self.data.len() {
            return Err(out_of_bounds_error!());
        }

        let bytes = &self.data[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Read a UTF-8 encoded null-terminated string.
    ///
    /// Reads bytes from the current position until a null terminator (0x00) is found,
    /// then decodes the bytes as UTF-8. The position is advanced past the null
    /// terminator. Running into the end of the buffer before a terminator is found is an
    /// error; string-table regions always carry their terminators.
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] for a missing terminator or
    /// [`crate::Error::Malformed`] for invalid UTF-8 encoding.
    pub fn read_string_utf8(&mut self) -> Result<&'a str> {
        let start = self.position;
        let mut end = start;

        while end < self.data.len() && self.data[end] != 0 {
            end += 1;
        }

        if end >= self.data.len() {
            return Err(out_of_bounds_error!());
        }

        self.position = end + 1;

        std::str::from_utf8(&self.data[start..end])
            .map_err(|e| malformed_error!("Invalid UTF-8 string at offset {}-{}: {}", start, end, e))
    }
}
