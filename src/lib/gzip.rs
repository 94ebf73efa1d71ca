//! Single gzip member construction and parsing.
//!
//! MZGF files are a concatenation of RFC 1952 gzip members whose headers
//! carry extra subfields. This module handles the member framing only:
//! the 10-byte fixed header plus XLEN, the extras region, the two-byte
//! empty raw-deflate body used by index and EOF members, and the 8-byte
//! CRC32/ISIZE trailer. Interpretation of the MZ/BI/BO subfields belongs
//! to the writer and reader.
//!
//! ```text
//! +---+---+---+---+---+---+---+---+---+---+
//! |ID1|ID2|CM |FLG|     MTIME     |XFL|OS | (more-->)
//! +---+---+---+---+---+---+---+---+---+---+
//! (FLG.FEXTRA is always set)
//! +---+---+=================================+
//! | XLEN  |...XLEN bytes of subfield data...| (more-->)
//! +---+---+=================================+
//! +=======================+---+---+---+---+---+---+---+---+
//! |...compressed blocks...|     CRC32     |     ISIZE     |
//! +=======================+---+---+---+---+---+---+---+---+
//! ```

use crate::codec;
use crate::errors::{MzgfError, Result};
use std::io::{self, Read, Write};

/// RFC 1952 § 2.3.1 magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Compression method byte for DEFLATE.
pub const CM_DEFLATE: u8 = 8;

/// FLG bit: file is probably ASCII text.
pub const FTEXT: u8 = 0x01;
/// FLG bit: a CRC16 of the header is present.
pub const FHCRC: u8 = 0x02;
/// FLG bit: extra subfields are present.
pub const FEXTRA: u8 = 0x04;
/// FLG bit: an original file name is present.
pub const FNAME: u8 = 0x08;
/// FLG bit: a file comment is present.
pub const FCOMMENT: u8 = 0x10;

/// OS byte: unknown origin.
pub const OS_UNKNOWN: u8 = 255;

// ID1 (1) + ID2 (1) + CM (1) + FLG (1) + MTIME (4) + XFL (1) + OS (1)
/// Size of the fixed gzip header.
pub const HEADER_SIZE: usize = 10;

// XLEN (2)
/// Size of the XLEN field following the fixed header.
pub const XLEN_SIZE: usize = 2;

/// Size of the fixed header including XLEN, as written by this crate.
pub const FULL_HEADER_SIZE: usize = HEADER_SIZE + XLEN_SIZE;

// CRC32 (4) + ISIZE (4)
/// Size of the gzip member trailer.
pub const TRAILER_SIZE: usize = 8;

/// Upper bound on XLEN, and so on any extras region.
pub const MAX_EXTRA_LEN: usize = 0xFFFF;

/// A single final empty stored block: the raw-deflate encoding of zero bytes.
pub const EMPTY_DEFLATE_BLOCK: [u8; 2] = [0x03, 0x00];

/// Subfield tag announcing the MZGF version (1-byte payload).
pub const TAG_MZ: [u8; 2] = *b"MZ";
/// Subfield tag carrying a block index chunk.
pub const TAG_BI: [u8; 2] = *b"BI";
/// Subfield tag of the EOF locator member.
pub const TAG_BO: [u8; 2] = *b"BO";

/// Extras length of the first (MZ + data) member: subfield frame plus version byte.
pub const MZ_EXTRA_LEN: usize = 4 + 1;
/// Extras length of the EOF member: subfield frame plus ufilesize and index offset.
pub const BO_EXTRA_LEN: usize = 4 + 16;
/// Bytes of a BI extras region preceding the (zoffset, uoffset) pairs:
/// subfield frame plus the next-chunk offset.
pub const BI_PREFIX_LEN: usize = 4 + 8;

/// Total on-disk size of the terminal EOF member. The reader locates it by
/// seeking this many bytes back from end-of-file, so no trailing padding is
/// permitted after it.
pub const EOF_MEMBER_SIZE: u64 =
    (FULL_HEADER_SIZE + BO_EXTRA_LEN + EMPTY_DEFLATE_BLOCK.len() + TRAILER_SIZE) as u64;

/// Fields of a parsed gzip member header.
#[derive(Debug, Clone)]
pub struct ParsedHeader {
    /// MTIME field, seconds since the epoch as stored by the writer.
    pub mtime: u32,
    /// The extras region, XLEN bytes verbatim.
    pub extras: Vec<u8>,
}

/// Write a gzip member header with the given extras region.
///
/// Returns the number of bytes written (`FULL_HEADER_SIZE + extras.len()`).
///
/// # Errors
///
/// Returns an error if the sink write fails.
pub fn write_header<W: Write + ?Sized>(dst: &mut W, mtime: u32, extras: &[u8]) -> Result<usize> {
    debug_assert!(extras.len() <= MAX_EXTRA_LEN);

    let mut header = [0u8; FULL_HEADER_SIZE];
    header[0] = GZIP_MAGIC[0];
    header[1] = GZIP_MAGIC[1];
    header[2] = CM_DEFLATE;
    header[3] = FEXTRA;
    codec::pack32(&mut header[4..8], mtime);
    header[8] = 0; // XFL
    header[9] = OS_UNKNOWN;
    codec::pack16(&mut header[10..12], extras.len() as u16);

    dst.write_all(&header)?;
    dst.write_all(extras)?;
    Ok(FULL_HEADER_SIZE + extras.len())
}

/// Write the two-byte empty raw-deflate body used by index and EOF members.
///
/// # Errors
///
/// Returns an error if the sink write fails.
pub fn write_empty_body<W: Write + ?Sized>(dst: &mut W) -> Result<usize> {
    dst.write_all(&EMPTY_DEFLATE_BLOCK)?;
    Ok(EMPTY_DEFLATE_BLOCK.len())
}

/// Write the 8-byte gzip member trailer.
///
/// `crc32` covers the uncompressed bytes of this member only and `isize_`
/// is their count modulo 2^32; both are zero for empty members.
///
/// # Errors
///
/// Returns an error if the sink write fails.
pub fn write_trailer<W: Write + ?Sized>(dst: &mut W, crc32: u32, isize_: u32) -> Result<usize> {
    let mut trailer = [0u8; TRAILER_SIZE];
    codec::pack32(&mut trailer[0..4], crc32);
    codec::pack32(&mut trailer[4..8], isize_);
    dst.write_all(&trailer)?;
    Ok(TRAILER_SIZE)
}

/// Read and validate a gzip member header, returning its MTIME and extras.
///
/// The caller states the largest extras region it is prepared to accept;
/// a larger XLEN is rejected rather than read.
///
/// # Errors
///
/// - [`MzgfError::NotGzip`] if the magic bytes or compression method do not match
/// - [`MzgfError::Header`] if the header or extras are truncated, or if the
///   member carries FNAME/FCOMMENT/FHCRC fields this writer never emits
/// - [`MzgfError::Format`] if FEXTRA is unset or XLEN exceeds `max_extra_len`
pub fn read_header<R: Read + ?Sized>(src: &mut R, max_extra_len: usize) -> Result<ParsedHeader> {
    let mut header = [0u8; FULL_HEADER_SIZE];
    read_exact_or(src, &mut header, "read incomplete gzip header")?;

    if header[0] != GZIP_MAGIC[0] || header[1] != GZIP_MAGIC[1] || header[2] != CM_DEFLATE {
        return Err(MzgfError::NotGzip);
    }

    let flags = header[3];
    if flags & FEXTRA == 0 {
        return Err(MzgfError::format("missing extra field(s) in gzip header"));
    }
    if flags & (FNAME | FCOMMENT | FHCRC) != 0 {
        return Err(MzgfError::header("unsupported optional gzip header fields"));
    }

    let mtime = codec::unpack32(&header[4..8]);
    let xlen = codec::unpack16(&header[10..12]) as usize;
    if xlen > max_extra_len {
        return Err(MzgfError::format("length of extra fields exceeded expectation"));
    }

    let mut extras = vec![0u8; xlen];
    read_exact_or(src, &mut extras, "read incomplete gzip extras")?;

    Ok(ParsedHeader { mtime, extras })
}

/// `read_exact` that reports truncation as a header error instead of raw I/O.
fn read_exact_or<R: Read + ?Sized>(src: &mut R, buf: &mut [u8], message: &str) -> Result<()> {
    src.read_exact(buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            MzgfError::header(message)
        } else {
            MzgfError::Io(e)
        }
    })
}
