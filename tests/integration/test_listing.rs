//! Listing tests: the index summary printed for `--list`.

use crate::helpers::{compress_to_temp, pattern_bytes};
use mzgzip_lib::{MzgfReader, driver};

#[test]
fn test_listing_single_block() {
    let temp = compress_to_temp(b"abcdefghij");
    let reader = MzgfReader::open(temp.path()).unwrap();

    let mut out = Vec::new();
    driver::list(&reader, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("MZGF Version: 1"));
    assert!(text.contains("MZGF Date Time: "));
    assert!(text.contains("MZGF Uncompressed size: 10"));
    assert!(text.contains("MZGF Virtual/Uncompressed Offsets:"));
}

#[test]
fn test_listing_offsets_match_index() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let reader = MzgfReader::open(temp.path()).unwrap();

    let mut out = Vec::new();
    driver::list(&reader, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let offset_lines: Vec<&str> =
        text.lines().skip_while(|l| !l.starts_with("MZGF Virtual")).skip(1).collect();
    assert_eq!(offset_lines.len(), reader.bindex().len());

    for (line, entry) in offset_lines.iter().zip(reader.bindex().entries()) {
        let mut fields = line.split_whitespace();
        let voffset: u64 = fields.next().unwrap().parse().unwrap();
        let uoffset: u64 = fields.next().unwrap().parse().unwrap();
        assert_eq!(voffset, entry.zoffset << 16);
        assert_eq!(uoffset, entry.uoffset);
    }
}

#[test]
fn test_listing_virtual_offsets_are_seekable() {
    let data = pattern_bytes(200_000);
    let temp = compress_to_temp(&data);
    let mut reader = MzgfReader::open(temp.path()).unwrap();

    let mut out = Vec::new();
    driver::list(&reader, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    // Every listed virtual offset must be a valid vseek target.
    let pairs: Vec<(u64, u64)> = text
        .lines()
        .skip_while(|l| !l.starts_with("MZGF Virtual"))
        .skip(1)
        .map(|l| {
            let mut fields = l.split_whitespace();
            (fields.next().unwrap().parse().unwrap(), fields.next().unwrap().parse().unwrap())
        })
        .collect();

    for (voffset, uoffset) in pairs {
        if uoffset as usize >= data.len() {
            continue;
        }
        reader.vseek(voffset).unwrap();
        let mut buf = [0u8; 2];
        let n = reader.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], &data[uoffset as usize..uoffset as usize + n]);
    }
}
