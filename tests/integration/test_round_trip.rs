//! Round-trip tests: everything the writer produces, the reader (and any
//! vanilla gzip decoder) must turn back into the original bytes.

use crate::helpers::{compress_to_temp, pattern_bytes};
use flate2::read::MultiGzDecoder;
use mzgzip_lib::{BLOCK_SIZE, MzgfReader, driver};
use std::io::Read;

#[test]
fn test_empty_input() {
    let temp = compress_to_temp(b"");
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    assert_eq!(reader.ufilesize(), 0);
    assert_eq!(reader.bindex().len(), 1);
    assert_eq!(reader.bindex().entries()[0].uoffset, 0);

    let mut out = Vec::new();
    let written = driver::decompress(&mut reader, &mut out, None).unwrap();
    assert_eq!(written, 0);
    assert!(out.is_empty());
}

#[test]
fn test_single_block_input() {
    let temp = compress_to_temp(b"abcdefghij");
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    assert_eq!(reader.bindex().len(), 1);
    assert_eq!(reader.bindex().entries()[0].uoffset, 0);

    let mut out = Vec::new();
    driver::decompress(&mut reader, &mut out, None).unwrap();
    assert_eq!(out, b"abcdefghij");
}

#[test]
fn test_multi_block_input() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    // ceil(200000 / 65280) = 4 blocks
    assert_eq!(reader.bindex().len(), 4);
    assert_eq!(reader.ufilesize(), 200_000);

    let mut out = Vec::new();
    driver::decompress(&mut reader, &mut out, None).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_block_aligned_input() {
    let data = pattern_bytes(BLOCK_SIZE * 2);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    let mut out = Vec::new();
    driver::decompress(&mut reader, &mut out, None).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_incompressible_input() {
    // A simple xorshift fill defeats deflate matching without pulling in
    // an RNG dependency for one test.
    let mut state = 0x2545_F491_4F6C_DD1Du64;
    let data: Vec<u8> = (0..300_000)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state & 0xFF) as u8
        })
        .collect();

    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();
    let mut out = Vec::new();
    driver::decompress(&mut reader, &mut out, None).unwrap();
    assert_eq!(out, data);
}

#[test]
fn test_vanilla_gzip_decoder_reads_archive() {
    let data = pattern_bytes(150_000);
    let temp = compress_to_temp(&data);

    let file = std::fs::File::open(temp.path()).unwrap();
    let mut decoder = MultiGzDecoder::new(file);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed).unwrap();
    assert_eq!(decompressed, data);
}

#[test]
fn test_decompress_size_limit() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    let mut out = Vec::new();
    let written = driver::decompress(&mut reader, &mut out, Some(70_000)).unwrap();
    assert_eq!(written, 70_000);
    assert_eq!(out, &data[..70_000]);
}
