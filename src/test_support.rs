//! Fixtures shared by the unit tests.

use std::io::{Cursor, Write};
use zip::write::{FileOptions, ZipWriter};

/// A class file header followed by a few bytes of filler.
pub fn class_bytes(major: u16, minor: u16) -> Vec<u8> {
    let mut bytes = vec![0xCA, 0xFE, 0xBA, 0xBE];
    bytes.extend_from_slice(&minor.to_be_bytes());
    bytes.extend_from_slice(&major.to_be_bytes());
    bytes.extend_from_slice(&[0x00, 0x10, 0x0A]);
    bytes
}

/// Builds a jar in memory. Names ending in `/` become directory entries.
pub fn jar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        if let Some(dir) = name.strip_suffix('/') {
            zip.add_directory(dir, options).unwrap();
            continue;
        }
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }

    zip.finish().unwrap().into_inner()
}
