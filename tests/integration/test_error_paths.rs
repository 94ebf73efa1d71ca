//! Error path integration tests.
//!
//! These tests verify that malformed or foreign files are rejected with
//! the right error kind rather than misread.

use crate::helpers::compress_to_temp;
use flate2::write::GzEncoder;
use mzgzip_lib::gzip::EOF_MEMBER_SIZE;
use mzgzip_lib::{MzgfError, MzgfReader};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_vanilla_gzip_is_not_mzgf() {
    let temp = NamedTempFile::new().unwrap();
    let mut encoder = GzEncoder::new(
        std::fs::File::create(temp.path()).unwrap(),
        flate2::Compression::default(),
    );
    encoder.write_all(b"hello").unwrap();
    encoder.finish().unwrap();

    let result = MzgfReader::open(temp.path());
    assert!(matches!(result, Err(MzgfError::NotMzgzip)), "got {result:?}");
}

#[test]
fn test_unknown_version_rejected() {
    let temp = compress_to_temp(b"hello");
    let mut bytes = std::fs::read(temp.path()).unwrap();
    bytes[16] = 255; // version byte of the MZ subfield
    std::fs::write(temp.path(), &bytes).unwrap();

    let result = MzgfReader::open(temp.path());
    assert!(matches!(result, Err(MzgfError::BadVersion { version: 255 })));
}

#[test]
fn test_non_gzip_file_rejected() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), vec![0x42u8; 128]).unwrap();

    let result = MzgfReader::open(temp.path());
    assert!(matches!(result, Err(MzgfError::NotGzip)));
}

#[test]
fn test_file_shorter_than_eof_member_rejected() {
    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), [0x1f, 0x8b, 0x08]).unwrap();

    let result = MzgfReader::open(temp.path());
    assert!(matches!(result, Err(MzgfError::Header { .. } | MzgfError::Format { .. })));
}

#[test]
fn test_garbage_tail_rejected() {
    let temp = compress_to_temp(b"hello");
    let mut bytes = std::fs::read(temp.path()).unwrap();
    let tail = bytes.len() - EOF_MEMBER_SIZE as usize;
    for b in &mut bytes[tail..tail + 4] {
        *b = 0xAA;
    }
    std::fs::write(temp.path(), &bytes).unwrap();

    let result = MzgfReader::open(temp.path());
    assert!(matches!(result, Err(MzgfError::Header { .. } | MzgfError::Format { .. })));
}

#[test]
fn test_bo_tag_mismatch_rejected() {
    let temp = compress_to_temp(b"hello");
    let mut bytes = std::fs::read(temp.path()).unwrap();
    let tag = bytes.len() - EOF_MEMBER_SIZE as usize + 12;
    bytes[tag] = b'X'; // BO -> XO
    std::fs::write(temp.path(), &bytes).unwrap();

    let result = MzgfReader::open(temp.path());
    assert!(matches!(result, Err(MzgfError::Format { .. })));
}

#[test]
fn test_bi_chain_offset_out_of_range_rejected() {
    let temp = compress_to_temp(b"hello");
    let mut bytes = std::fs::read(temp.path()).unwrap();
    // Point the BO member's first-BI offset past end of file; the chain
    // walk then reads an incomplete header.
    let bi_offset_field = bytes.len() - EOF_MEMBER_SIZE as usize + 24;
    let new_offset = bytes.len() as u64 + 1000;
    bytes[bi_offset_field..bi_offset_field + 8]
        .copy_from_slice(&new_offset.to_le_bytes());
    std::fs::write(temp.path(), &bytes).unwrap();

    let result = MzgfReader::open(temp.path());
    assert!(matches!(result, Err(MzgfError::Header { .. })), "got {result:?}");
}

#[test]
fn test_missing_input_file() {
    let result = MzgfReader::open("/nonexistent/archive.mgz");
    assert!(matches!(result, Err(MzgfError::Io(_))));
}
