//! Shared helpers for building synthetic containers in integration tests.
//!
//! Real archives are produced by Haiku's packaging tools; these helpers assemble
//! byte-exact equivalents in memory so the tests control every length, offset and
//! chunk boundary.

#![allow(dead_code)]

use flate2::{write::ZlibEncoder, Compression};
use std::io::Write;

pub const TAG_TYPE_INT: u64 = 1;
pub const TAG_TYPE_UINT: u64 = 2;
pub const TAG_TYPE_STRING: u64 = 3;
pub const TAG_TYPE_RAW: u64 = 4;

pub fn push_leb128(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

pub fn push_tag(out: &mut Vec<u8>, id: u8, tag_type: u64, encoding: u64, children: bool) {
    let tag =
        1 + (u64::from(id) | (tag_type << 7) | (u64::from(children) << 10) | (encoding << 11));
    push_leb128(out, tag);
}

/// A string attribute stored inline.
pub fn push_string_inline(out: &mut Vec<u8>, id: u8, value: &str, children: bool) {
    push_tag(out, id, TAG_TYPE_STRING, 0, children);
    out.extend_from_slice(value.as_bytes());
    out.push(0);
}

/// A string attribute stored as a string-table reference.
pub fn push_string_table_ref(out: &mut Vec<u8>, id: u8, index: u64, children: bool) {
    push_tag(out, id, TAG_TYPE_STRING, 1, children);
    push_leb128(out, index);
}

/// An unsigned integer attribute, stored in the smallest of the 1/2/4/8 byte widths.
pub fn push_uint(out: &mut Vec<u8>, id: u8, value: u64, children: bool) {
    let (encoding, width) = match value {
        0..=0xFF => (0u64, 1usize),
        0x100..=0xFFFF => (1, 2),
        0x1_0000..=0xFFFF_FFFF => (2, 4),
        _ => (3, 8),
    };
    push_tag(out, id, TAG_TYPE_UINT, encoding, children);
    out.extend_from_slice(&value.to_be_bytes()[8 - width..]);
}

/// Raw data stored inline in the stream.
pub fn push_raw_inline(out: &mut Vec<u8>, id: u8, data: &[u8], children: bool) {
    push_tag(out, id, TAG_TYPE_RAW, 0, children);
    push_leb128(out, data.len() as u64);
    out.extend_from_slice(data);
}

/// Raw data referenced elsewhere in the heap.
pub fn push_raw_heap(out: &mut Vec<u8>, id: u8, offset: u64, length: u64, children: bool) {
    push_tag(out, id, TAG_TYPE_RAW, 1, children);
    push_leb128(out, length);
    push_leb128(out, offset);
}

/// Terminate the current attribute level.
pub fn push_terminator(out: &mut Vec<u8>) {
    out.push(0);
}

/// A string-table region: consecutive NUL-terminated strings.
pub fn string_table(strings: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    for s in strings {
        out.extend_from_slice(s.as_bytes());
        out.push(0);
    }
    out
}

/// Store a logical heap as chunks with the trailer of compressed chunk lengths.
///
/// With `zlib` set, every chunk that zlib actually shrinks is stored compressed;
/// otherwise all chunks are stored raw. Returns the stored bytes including the
/// trailer.
pub fn store_heap(heap: &[u8], chunk_size: usize, zlib: bool) -> Vec<u8> {
    let mut stored = Vec::new();
    let mut lengths = Vec::new();

    for chunk in heap.chunks(chunk_size) {
        let bytes = if zlib {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(chunk).unwrap();
            let compressed = encoder.finish().unwrap();
            if compressed.len() < chunk.len() {
                compressed
            } else {
                chunk.to_vec()
            }
        } else {
            chunk.to_vec()
        };
        lengths.push(bytes.len());
        stored.extend_from_slice(&bytes);
    }

    if !lengths.is_empty() {
        for length in &lengths[..lengths.len() - 1] {
            stored.extend_from_slice(&u16::to_be_bytes((*length - 1) as u16));
        }
    }

    stored
}

/// Assemble a complete HPKG container.
///
/// The heap is laid out as `body ++ toc strings ++ toc stream ++ attribute strings ++
/// attribute stream`, so raw heap coordinates in the streams can reference into
/// `body`.
pub struct HpkgLayout<'a> {
    pub body: &'a [u8],
    pub toc_strings: &'a [&'a str],
    pub toc_stream: &'a [u8],
    pub attribute_strings: &'a [&'a str],
    pub attribute_stream: &'a [u8],
    pub chunk_size: u32,
    pub zlib: bool,
}

pub fn build_hpkg(layout: &HpkgLayout<'_>) -> Vec<u8> {
    let toc_strings = string_table(layout.toc_strings);
    let attribute_strings = string_table(layout.attribute_strings);

    let mut heap = Vec::new();
    heap.extend_from_slice(layout.body);
    heap.extend_from_slice(&toc_strings);
    heap.extend_from_slice(layout.toc_stream);
    heap.extend_from_slice(&attribute_strings);
    heap.extend_from_slice(layout.attribute_stream);

    let stored = store_heap(&heap, layout.chunk_size as usize, layout.zlib);

    let toc_length = (toc_strings.len() + layout.toc_stream.len()) as u64;
    let attributes_length = (attribute_strings.len() + layout.attribute_stream.len()) as u32;

    let mut data = Vec::new();
    data.extend_from_slice(b"hpkg");
    data.extend_from_slice(&80u16.to_be_bytes()); // header_size
    data.extend_from_slice(&2u16.to_be_bytes()); // version
    data.extend_from_slice(&((80 + stored.len()) as u64).to_be_bytes()); // total_size
    data.extend_from_slice(&0u16.to_be_bytes()); // minor_version
    data.extend_from_slice(&u16::from(layout.zlib).to_be_bytes()); // compression
    data.extend_from_slice(&layout.chunk_size.to_be_bytes());
    data.extend_from_slice(&(stored.len() as u64).to_be_bytes()); // heap compressed
    data.extend_from_slice(&(heap.len() as u64).to_be_bytes()); // heap uncompressed
    data.extend_from_slice(&attributes_length.to_be_bytes());
    data.extend_from_slice(&(attribute_strings.len() as u32).to_be_bytes());
    data.extend_from_slice(&(layout.attribute_strings.len() as u32).to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes()); // reserved
    data.extend_from_slice(&toc_length.to_be_bytes());
    data.extend_from_slice(&(toc_strings.len() as u64).to_be_bytes());
    data.extend_from_slice(&(layout.toc_strings.len() as u64).to_be_bytes());
    data.extend_from_slice(&stored);
    data
}

/// Assemble a complete HPKR container.
///
/// The heap is laid out as `info ++ package strings ++ package stream`.
pub struct HpkrLayout<'a> {
    pub info: &'a [u8],
    pub package_strings: &'a [&'a str],
    pub package_stream: &'a [u8],
    pub chunk_size: u32,
    pub zlib: bool,
}

pub fn build_hpkr(layout: &HpkrLayout<'_>) -> Vec<u8> {
    let package_strings = string_table(layout.package_strings);

    let mut heap = Vec::new();
    heap.extend_from_slice(layout.info);
    heap.extend_from_slice(&package_strings);
    heap.extend_from_slice(layout.package_stream);

    let stored = store_heap(&heap, layout.chunk_size as usize, layout.zlib);

    let packages_length = (package_strings.len() + layout.package_stream.len()) as u64;

    let mut data = Vec::new();
    data.extend_from_slice(b"hpkr");
    data.extend_from_slice(&72u16.to_be_bytes()); // header_size
    data.extend_from_slice(&2u16.to_be_bytes()); // version
    data.extend_from_slice(&((72 + stored.len()) as u64).to_be_bytes()); // total_size
    data.extend_from_slice(&0u16.to_be_bytes()); // minor_version
    data.extend_from_slice(&u16::from(layout.zlib).to_be_bytes()); // compression
    data.extend_from_slice(&layout.chunk_size.to_be_bytes());
    data.extend_from_slice(&(stored.len() as u64).to_be_bytes()); // heap compressed
    data.extend_from_slice(&(heap.len() as u64).to_be_bytes()); // heap uncompressed
    data.extend_from_slice(&(layout.info.len() as u32).to_be_bytes());
    data.extend_from_slice(&0u32.to_be_bytes()); // reserved
    data.extend_from_slice(&packages_length.to_be_bytes());
    data.extend_from_slice(&(package_strings.len() as u64).to_be_bytes());
    data.extend_from_slice(&(layout.package_strings.len() as u64).to_be_bytes());
    data.extend_from_slice(&stored);
    data
}
