//! MZGF compression: block-oriented deflate with an appended block index.
//!
//! The writer reads the source in fixed-size uncompressed blocks and emits
//! a single gzip member whose DEFLATE payload is a sequence of
//! full-flushed blocks, so every recorded block boundary is an independent
//! inflate entry point. After the payload it appends the serialized block
//! index as one or more empty gzip members (BI subfields) and the fixed
//! 42-byte EOF locator member (BO subfield).

use crate::bindex::BlockIndex;
use crate::codec;
use crate::errors::Result;
use crate::gzip;
use flate2::{Compress, Compression, FlushCompress, Status};
use std::io::{self, Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// MZGF format version emitted by this writer (max 255).
pub const MZGF_VERSION: u8 = 1;

/// Size of uncompressed input blocks, and of the compressed scratch buffer.
pub const BLOCK_SIZE: usize = 0xFF00;

/// Ceiling a compressed block must stay under.
pub const MAX_BLOCK_SIZE: usize = 0x10000;

// Worst-case raw-deflate expansion of one block (stored blocks plus
// per-block overhead) must fit under the ceiling.
const _: () = assert!(BLOCK_SIZE + 5 * (BLOCK_SIZE / 16383 + 1) + 7 < MAX_BLOCK_SIZE);

/// Most (zoffset, uoffset) pairs one BI member can carry without its
/// extras region overflowing the u16 XLEN field.
const MAX_PAIRS_PER_BI: usize = (gzip::MAX_EXTRA_LEN - gzip::BI_PREFIX_LEN) / 16;

/// Streaming MZGF compressor.
///
/// One instance drives one [`deflate`](MzgfWriter::deflate) invocation; the
/// deflate context, running CRC and size counters, and the in-memory block
/// index all reset at the start of each call.
pub struct MzgfWriter {
    version: u8,
    mtime: u32,
    compress: Compress,
    /// Uncompressed input scratch, one block at a time.
    ublock: Vec<u8>,
    /// Compressed output scratch.
    zblock: Vec<u8>,
    /// Cumulative uncompressed bytes ingested.
    uoffset: u64,
    /// CRC32 over all uncompressed input.
    ucrc32: crc32fast::Hasher,
    /// Bytes written to the sink so far.
    zoffset: u64,
    bindex: BlockIndex,
    /// File offset of the first BI member, once written.
    bindex_offset: u64,
    /// Pairs per BI member; smaller values force a longer chain.
    pub(crate) bi_chunk_pairs: usize,
}

impl MzgfWriter {
    /// Create a writer stamping the current wall clock into member headers.
    #[must_use]
    pub fn new() -> Self {
        let mtime = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs() as u32);
        Self {
            version: MZGF_VERSION,
            mtime,
            compress: Compress::new(Compression::default(), false),
            ublock: vec![0u8; BLOCK_SIZE],
            zblock: vec![0u8; BLOCK_SIZE],
            uoffset: 0,
            ucrc32: crc32fast::Hasher::new(),
            zoffset: 0,
            bindex: BlockIndex::new(),
            bindex_offset: 0,
            bi_chunk_pairs: MAX_PAIRS_PER_BI,
        }
    }

    /// Read all of `src`, deflate it, and write the complete MZGF stream
    /// (payload member, BI chain, EOF member) to `dst`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the source, compressing, or writing the
    /// sink fails. On error the output is left partially written.
    pub fn deflate<R, W>(&mut self, src: &mut R, dst: &mut W) -> Result<()>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        self.compress.reset();
        self.uoffset = 0;
        self.ucrc32 = crc32fast::Hasher::new();
        self.zoffset = 0;
        self.bindex = BlockIndex::new();
        self.bindex_offset = 0;

        // The first member announces the version and carries the payload,
        // so a vanilla gzip reader inflates the data directly.
        let mut mz = [0u8; gzip::MZ_EXTRA_LEN];
        mz[..2].copy_from_slice(&gzip::TAG_MZ);
        codec::pack16(&mut mz[2..4], 1);
        mz[4] = self.version;
        self.write_header(dst, &mz)?;

        loop {
            let len = read_full(src, &mut self.ublock)?;
            self.bindex.push(self.zoffset, self.uoffset);
            self.uoffset += len as u64;
            self.ucrc32.update(&self.ublock[..len]);
            self.flush_block(dst, len)?;
            if len < BLOCK_SIZE {
                break;
            }
        }

        let crc32 = self.ucrc32.clone().finalize();
        self.write_trailer(dst, crc32, self.uoffset as u32)?;
        self.write_bindex(dst)?;
        self.write_eof(dst)?;
        dst.flush()?;
        Ok(())
    }

    /// Block index accumulated by the last [`deflate`](MzgfWriter::deflate) call.
    #[must_use]
    pub fn bindex(&self) -> &BlockIndex {
        &self.bindex
    }

    /// Total uncompressed bytes ingested by the last deflate call.
    #[must_use]
    pub fn ufilesize(&self) -> u64 {
        self.uoffset
    }

    /// Total compressed bytes written by the last deflate call.
    #[must_use]
    pub fn zfilesize(&self) -> u64 {
        self.zoffset
    }

    /// MTIME stamped into member headers.
    #[must_use]
    pub fn mtime(&self) -> u32 {
        self.mtime
    }

    fn write_header<W: Write + ?Sized>(&mut self, dst: &mut W, extras: &[u8]) -> Result<()> {
        self.zoffset += gzip::write_header(dst, self.mtime, extras)? as u64;
        Ok(())
    }

    fn write_empty<W: Write + ?Sized>(&mut self, dst: &mut W) -> Result<()> {
        self.zoffset += gzip::write_empty_body(dst)? as u64;
        Ok(())
    }

    fn write_trailer<W: Write + ?Sized>(&mut self, dst: &mut W, crc32: u32, isize_: u32) -> Result<()> {
        self.zoffset += gzip::write_trailer(dst, crc32, isize_)? as u64;
        Ok(())
    }

    /// Deflate one uncompressed block (`self.ublock[..len]`) to the sink.
    ///
    /// A short block is the last one and finishes the stream; a full block
    /// is full-flushed so the next block starts an independently decodable
    /// DEFLATE block at a byte boundary.
    fn flush_block<W: Write + ?Sized>(&mut self, dst: &mut W, len: usize) -> Result<()> {
        let flush = if len < BLOCK_SIZE { FlushCompress::Finish } else { FlushCompress::Full };
        let mut consumed = 0usize;
        loop {
            let in_before = self.compress.total_in();
            let out_before = self.compress.total_out();
            let status = self
                .compress
                .compress(&self.ublock[consumed..len], &mut self.zblock, flush)
                .map_err(|e| io::Error::other(format!("deflate failed: {e}")))?;
            consumed += (self.compress.total_in() - in_before) as usize;
            let produced = (self.compress.total_out() - out_before) as usize;
            dst.write_all(&self.zblock[..produced])?;
            self.zoffset += produced as u64;
            match status {
                Status::StreamEnd => break,
                Status::Ok | Status::BufError => {
                    // A full flush is complete once all input is consumed and
                    // the output scratch was not filled to the brim; a finish
                    // runs until the stream end appears.
                    if matches!(flush, FlushCompress::Full)
                        && consumed == len
                        && produced < self.zblock.len()
                    {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Serialize the block index as a chain of empty gzip members whose
    /// extras hold BI subfields. Each chunk's `next` field is the absolute
    /// file offset of the following BI member header, zero on the last.
    fn write_bindex<W: Write + ?Sized>(&mut self, dst: &mut W) -> Result<()> {
        self.bindex_offset = self.zoffset;

        let total = self.bindex.len();
        let per_chunk = self.bi_chunk_pairs;
        let mut start = 0usize;
        while start < total {
            let end = (start + per_chunk).min(total);
            let extras = {
                let chunk = &self.bindex.entries()[start..end];
                let extras_len = gzip::BI_PREFIX_LEN + chunk.len() * 16;
                let member_size = (gzip::FULL_HEADER_SIZE
                    + extras_len
                    + gzip::EMPTY_DEFLATE_BLOCK.len()
                    + gzip::TRAILER_SIZE) as u64;
                let next = if end < total { self.zoffset + member_size } else { 0 };

                let mut extras = vec![0u8; extras_len];
                extras[..2].copy_from_slice(&gzip::TAG_BI);
                codec::pack16(&mut extras[2..4], (extras_len - 4) as u16);
                codec::pack64(&mut extras[4..12], next);
                for (pair, entry) in extras[gzip::BI_PREFIX_LEN..].chunks_exact_mut(16).zip(chunk) {
                    codec::pack64(&mut pair[..8], entry.zoffset);
                    codec::pack64(&mut pair[8..16], entry.uoffset);
                }
                extras
            };

            self.write_header(dst, &extras)?;
            self.write_empty(dst)?;
            self.write_trailer(dst, 0, 0)?;
            start = end;
        }
        Ok(())
    }

    /// Write the terminal fixed-size EOF member locating the BI chain.
    fn write_eof<W: Write + ?Sized>(&mut self, dst: &mut W) -> Result<()> {
        let mut extras = [0u8; gzip::BO_EXTRA_LEN];
        extras[..2].copy_from_slice(&gzip::TAG_BO);
        codec::pack16(&mut extras[2..4], 16);
        codec::pack64(&mut extras[4..12], self.uoffset);
        codec::pack64(&mut extras[12..20], self.bindex_offset);

        self.write_header(dst, &extras)?;
        self.write_empty(dst)?;
        self.write_trailer(dst, 0, 0)
    }
}

impl Default for MzgfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill `buf` from `src`, stopping early only at end of input.
fn read_full<R: Read + ?Sized>(src: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
