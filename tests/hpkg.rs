//! Integration tests for single-package (HPKG) containers.

mod common;

use common::*;
use hpkscope::prelude::*;

const FILE_PAYLOAD: &[u8] = b"#!/bin/sh\necho tipster\n";

/// A small package: one directory holding a script, plus package attributes.
///
/// The script's contents are stored at the start of the heap and referenced by
/// coordinates; its shebang-sized prefix makes a convenient lazy-resolution probe.
fn build_package(chunk_size: u32, zlib: bool) -> Vec<u8> {
    let mut toc = Vec::new();
    // dir:entry "apps", with children
    push_string_inline(&mut toc, 0, "apps", true);
    {
        // dir:entry "tipster.sh"
        push_string_inline(&mut toc, 0, "tipster.sh", true);
        {
            push_uint(&mut toc, 1, 0, false); // file:type
            push_uint(&mut toc, 2, 0o755, false); // file:permissions
            push_string_table_ref(&mut toc, 3, 0, false); // file:user
            // data, referenced in the heap body
            push_raw_heap(&mut toc, 13, 0, FILE_PAYLOAD.len() as u64, false);
            push_terminator(&mut toc);
        }
        push_terminator(&mut toc);
    }
    push_terminator(&mut toc);

    let mut attributes = Vec::new();
    push_string_inline(&mut attributes, 15, "tipster", false); // package:name
    push_string_inline(&mut attributes, 18, "Test Vendor", false); // package:vendor
    push_string_inline(&mut attributes, 16, "A test package", false); // summary
    push_uint(&mut attributes, 21, 4, false); // architecture x86_64
    push_string_inline(&mut attributes, 22, "1", true); // version.major
    {
        push_string_inline(&mut attributes, 23, "1", false);
        push_string_inline(&mut attributes, 24, "1", false);
        push_uint(&mut attributes, 25, 1, false);
        push_terminator(&mut attributes);
    }
    push_terminator(&mut attributes);

    build_hpkg(&HpkgLayout {
        body: FILE_PAYLOAD,
        toc_strings: &["baron"],
        toc_stream: &toc,
        attribute_strings: &[],
        attribute_stream: &attributes,
        chunk_size,
        zlib,
    })
}

#[test]
fn reads_table_of_contents() {
    let extractor = HpkgExtractor::from_mem(build_package(4096, true)).unwrap();
    let context = extractor.toc_context();

    let toc = extractor.toc().unwrap();
    assert_eq!(toc.len(), 1);

    let apps = &toc[0];
    assert_eq!(apps.id(), AttributeId::DirectoryEntry);
    assert_eq!(apps.value(&context).unwrap().as_str(), Some("apps"));

    let script = apps.only_child(AttributeId::DirectoryEntry).unwrap();
    assert_eq!(script.value(&context).unwrap().as_str(), Some("tipster.sh"));
    assert_eq!(
        script
            .child(AttributeId::FilePermissions)
            .unwrap()
            .value(&context)
            .unwrap()
            .as_int(),
        Some(0o755)
    );
    // resolved through the TOC string table
    assert_eq!(
        script
            .child(AttributeId::FileUser)
            .unwrap()
            .value(&context)
            .unwrap()
            .as_str(),
        Some("baron")
    );
}

#[test]
fn file_data_resolves_lazily_and_idempotently() {
    let extractor = HpkgExtractor::from_mem(build_package(16, true)).unwrap();
    let context = extractor.toc_context();

    let toc = extractor.toc().unwrap();
    let script = toc[0].only_child(AttributeId::DirectoryEntry).unwrap();
    let data = script.child(AttributeId::Data).unwrap();

    // stored as coordinates, untouched until asked for
    assert!(matches!(data.raw_value(), AttributeValue::RawHeap(_)));

    let first = data.value(&context).unwrap();
    let second = data.value(&context).unwrap();
    assert_eq!(first.as_raw(), Some(FILE_PAYLOAD));
    assert_eq!(first, second);
}

#[test]
fn reads_package_attributes_section() {
    let extractor = HpkgExtractor::from_mem(build_package(4096, true)).unwrap();
    let context = extractor.package_attributes_context();

    let attributes = extractor.package_attributes().unwrap();
    let name = attributes
        .iter()
        .find(|a| a.id() == AttributeId::PackageName)
        .unwrap();
    assert_eq!(name.value(&context).unwrap().as_str(), Some("tipster"));

    let major = attributes
        .iter()
        .find(|a| a.id() == AttributeId::PackageVersionMajor)
        .unwrap();
    assert_eq!(major.children().len(), 3);
}

#[test]
fn chunk_size_does_not_affect_decoding() {
    let wide = HpkgExtractor::from_mem(build_package(4096, true)).unwrap();
    let narrow = HpkgExtractor::from_mem(build_package(16, true)).unwrap();

    assert_eq!(wide.toc().unwrap(), narrow.toc().unwrap());
    assert_eq!(
        wide.package_attributes().unwrap(),
        narrow.package_attributes().unwrap()
    );
}

#[test]
fn uncompressed_container_matches_compressed() {
    let compressed = HpkgExtractor::from_mem(build_package(64, true)).unwrap();
    let raw = HpkgExtractor::from_mem(build_package(64, false)).unwrap();

    assert_eq!(compressed.toc().unwrap(), raw.toc().unwrap());
}

#[test]
fn empty_container_has_empty_streams() {
    let data = build_hpkg(&HpkgLayout {
        body: &[],
        toc_strings: &[],
        toc_stream: &[],
        attribute_strings: &[],
        attribute_stream: &[],
        chunk_size: 4096,
        zlib: true,
    });

    let extractor = HpkgExtractor::from_mem(data).unwrap();
    assert_eq!(extractor.heap_reader().uncompressed_size(), 0);
    // an empty stream has no terminator to read; iteration must fail, not hang
    let mut iterator = extractor.toc_iterator();
    assert!(iterator.next().is_err());
}

#[test]
fn corrupted_chunk_surfaces_as_heap_error() {
    let mut data = build_package(64, true);
    // stomp a byte in the middle of the stored heap
    let target = 80 + 20;
    data[target] ^= 0xFF;

    match HpkgExtractor::from_mem(data) {
        // string table reads at open time may already trip over it
        Err(e) => assert!(matches!(
            e,
            Error::MalformedHeap { .. } | Error::MalformedAttributes { .. }
        )),
        Ok(extractor) => {
            let outcome = extractor.toc();
            assert!(outcome.is_err());
        }
    }
}

#[test]
fn header_shorter_than_fixed_layout_is_rejected() {
    let data = build_package(4096, true);
    assert!(matches!(
        HpkgExtractor::from_mem(data[..60].to_vec()),
        Err(Error::OutOfBounds { .. })
    ));
}
