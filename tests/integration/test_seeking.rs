//! Random-access tests: useek by uncompressed offset, vseek by virtual
//! offset, and the block-boundary edge cases between them.

use crate::helpers::{compress_to_temp, pattern_bytes};
use mzgzip_lib::{BLOCK_SIZE, MzgfReader, driver};

#[test]
fn test_useek_then_read_matches_slice() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    reader.useek(130_560).unwrap();
    let mut buf = [0u8; 10];
    assert_eq!(reader.read(&mut buf).unwrap(), 10);
    assert_eq!(&buf[..], &data[130_560..130_570]);
}

#[test]
fn test_useek_exact_boundary() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    reader.useek(65_280).unwrap();
    let mut buf = [0u8; 1];
    assert_eq!(reader.read(&mut buf).unwrap(), 1);
    assert_eq!(buf[0], data[65_280]);
}

#[test]
fn test_useek_every_block_start() {
    let data = pattern_bytes(BLOCK_SIZE * 3 + 500);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    let entries: Vec<_> = reader.bindex().entries().to_vec();
    for entry in entries {
        if entry.uoffset as usize >= data.len() {
            continue;
        }
        reader.useek(entry.uoffset).unwrap();
        let mut buf = [0u8; 4];
        let n = reader.read(&mut buf).unwrap();
        let expect = &data[entry.uoffset as usize..(entry.uoffset as usize + n)];
        assert_eq!(&buf[..n], expect, "mismatch at block uoffset {}", entry.uoffset);
    }
}

#[test]
fn test_vseek_round_trip_via_index() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    let second = reader.bindex().entries()[1];
    reader.vseek(second.zoffset << 16).unwrap();
    let mut buf = [0u8; 4];
    assert_eq!(reader.read(&mut buf).unwrap(), 4);
    let u = second.uoffset as usize;
    assert_eq!(&buf[..], &data[u..u + 4]);
}

#[test]
fn test_vseek_sequential_read_to_end() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    let third = reader.bindex().entries()[2];
    reader.vseek(third.zoffset << 16).unwrap();
    let mut out = Vec::new();
    driver::decompress(&mut reader, &mut out, None).unwrap();
    assert_eq!(out, &data[third.uoffset as usize..]);
}

#[test]
fn test_seek_rewind_after_eof() {
    let data = pattern_bytes(100_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    let mut out = Vec::new();
    driver::decompress(&mut reader, &mut out, None).unwrap();
    assert!(reader.eof());

    reader.useek(0).unwrap();
    assert!(!reader.eof());
    let mut again = Vec::new();
    driver::decompress(&mut reader, &mut again, None).unwrap();
    assert_eq!(again, data);
}

#[test]
fn test_useek_near_end_of_stream() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    reader.useek(199_990).unwrap();
    let mut out = Vec::new();
    driver::decompress(&mut reader, &mut out, None).unwrap();
    assert_eq!(out, &data[199_990..]);
}

#[test]
fn test_interleaved_seeks_and_reads() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    for &offset in &[0u64, 199_000, 65_280, 12_345, 130_561] {
        reader.useek(offset).unwrap();
        let mut buf = [0u8; 7];
        let n = reader.read(&mut buf).unwrap();
        let end = (offset as usize + n).min(data.len());
        assert_eq!(&buf[..n], &data[offset as usize..end], "offset {offset}");
    }
}
