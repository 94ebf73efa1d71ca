//! Helper utilities for integration tests.

use mzgzip_lib::driver;
use std::io::Cursor;
use tempfile::NamedTempFile;

/// Deterministic test payload: byte `i` is `i mod 256`.
pub fn pattern_bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 256) as u8).collect()
}

/// Compress `data` into a fresh temp file and return its handle.
pub fn compress_to_temp(data: &[u8]) -> NamedTempFile {
    let temp = NamedTempFile::new().expect("create temp file");
    let mut dst = std::fs::File::create(temp.path()).expect("open temp file");
    driver::compress(&mut Cursor::new(data), &mut dst).expect("compress fixture");
    temp
}
