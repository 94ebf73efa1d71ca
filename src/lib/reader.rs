//! MZGF decompression with random access by virtual or uncompressed offset.
//!
//! Opening a file validates the MZ version subfield, locates the fixed-size
//! EOF member at the tail, and walks the BI chain to rebuild the block
//! index. Sequential [`read`](MzgfReader::read) then inflates the payload;
//! [`vseek`](MzgfReader::vseek) and [`useek`](MzgfReader::useek) jump to
//! any full-flushed block boundary. Because the index marks raw-deflate
//! block starts inside a single gzip member, the inflater has no history
//! to keep and is reinitialized on every seek.

use crate::bindex::BlockIndex;
use crate::codec;
use crate::errors::{MzgfError, Result};
use crate::gzip;
use crate::writer::{BLOCK_SIZE, MZGF_VERSION};
use flate2::{Decompress, FlushDecompress, Status};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Seekable MZGF decompressor over an open file.
///
/// Instances are created by [`open`](MzgfReader::open) and release their
/// file handle on [`close`](MzgfReader::close) or drop. Not safe for
/// concurrent use; two readers over the same file are fine.
#[derive(Debug)]
pub struct MzgfReader {
    file: Option<File>,
    decompress: Decompress,
    version: u8,
    mtime: u32,
    is_eof: bool,
    zfilesize: u64,
    ufilesize: u64,
    /// Compressed input scratch and its fill/consume cursors.
    zblock: Vec<u8>,
    zlen: usize,
    zpos: usize,
    /// Compressed bytes consumed through the sequential read path.
    zoffset: u64,
    /// Uncompressed output scratch; `blen` bytes valid, `boffset` consumed.
    ublock: Vec<u8>,
    blen: usize,
    boffset: usize,
    bindex: BlockIndex,
    bindex_offset: u64,
}

impl MzgfReader {
    /// Open an MZGF file and parse its version, EOF member, and block index.
    ///
    /// On return the reader is positioned at the start of the uncompressed
    /// stream.
    ///
    /// # Errors
    ///
    /// - [`MzgfError::NotGzip`] if the file does not start with a gzip header
    /// - [`MzgfError::NotMzgzip`] if the first member lacks the MZ subfield
    /// - [`MzgfError::BadVersion`] if the MZ subfield declares an unknown version
    /// - [`MzgfError::Format`] / [`MzgfError::Header`] if the EOF member or
    ///   block index chain is missing or malformed
    /// - [`MzgfError::Io`] for underlying I/O failures
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path.as_ref())?;
        let zfilesize = file.metadata()?.len();

        let header = match gzip::read_header(&mut file, gzip::MZ_EXTRA_LEN) {
            // Plain gzip (no FEXTRA, or extras that are not ours) is not MZGF.
            Err(MzgfError::Format { .. }) => return Err(MzgfError::NotMzgzip),
            other => other?,
        };
        if header.extras.len() < gzip::MZ_EXTRA_LEN || header.extras[..2] != gzip::TAG_MZ {
            return Err(MzgfError::NotMzgzip);
        }
        let version = header.extras[4];
        if version != MZGF_VERSION {
            return Err(MzgfError::BadVersion { version });
        }
        let data_offset = (gzip::FULL_HEADER_SIZE + header.extras.len()) as u64;

        let (ufilesize, bindex_offset) = read_eof_member(&mut file, zfilesize)?;
        let bindex = read_bindex_chain(&mut file, bindex_offset)?;

        file.seek(SeekFrom::Start(data_offset))?;

        Ok(Self {
            file: Some(file),
            decompress: Decompress::new(false),
            version,
            mtime: header.mtime,
            is_eof: false,
            zfilesize,
            ufilesize,
            zblock: vec![0u8; BLOCK_SIZE],
            zlen: 0,
            zpos: 0,
            zoffset: data_offset,
            ublock: vec![0u8; BLOCK_SIZE],
            blen: 0,
            boffset: 0,
            bindex,
            bindex_offset,
        })
    }

    /// Read up to `buf.len()` bytes of decompressed data from the current
    /// position, returning the number delivered. `Ok(0)` signals end of
    /// stream (or a zero-length `buf`).
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or a corrupt DEFLATE stream.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut copied = 0;
        while copied < buf.len() {
            if self.boffset < self.blen {
                let avail = self.blen - self.boffset;
                let have = avail.min(buf.len() - copied);
                buf[copied..copied + have]
                    .copy_from_slice(&self.ublock[self.boffset..self.boffset + have]);
                copied += have;
                self.boffset += have;
                if self.boffset >= self.blen {
                    self.boffset = 0;
                    self.blen = 0;
                }
            } else {
                if self.is_eof {
                    break;
                }
                if self.read_block()? == 0 {
                    break;
                }
                if self.boffset >= self.blen {
                    // A seek left an in-block offset beyond this (short)
                    // block; carry the surplus into the next one.
                    self.boffset -= self.blen;
                    self.blen = 0;
                }
            }
        }
        Ok(copied)
    }

    /// Current compressed byte position. Opaque beyond being accepted by a
    /// later seek against the same file.
    #[must_use]
    pub fn vtell(&self) -> u64 {
        self.zoffset
    }

    /// Position the reader at a virtual offset: the high 48 bits address a
    /// compressed block start, the low 16 bits an offset into that block's
    /// uncompressed data.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader is closed or the file seek fails.
    /// Offsets past end-of-file are not validated here; a later read will
    /// fail or deliver zero bytes.
    pub fn vseek(&mut self, voffset: u64) -> Result<()> {
        let boffset = (voffset & 0xFFFF) as usize;
        self.seek_to(voffset >> 16, boffset)
    }

    /// Position the reader at an offset into the uncompressed stream,
    /// resolved through the block index.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader is closed, the block index is
    /// missing, or the file seek fails.
    pub fn useek(&mut self, uoffset: u64) -> Result<()> {
        if self.bindex.is_empty() {
            let head = self.bindex_offset;
            let file = self.file_mut()?;
            self.bindex = read_bindex_chain(file, head)?;
        }
        let entry = *self
            .bindex
            .lookup(uoffset)
            .ok_or_else(|| MzgfError::format("missing MZGF block index"))?;
        self.seek_to(entry.zoffset, (uoffset - entry.uoffset) as usize)
    }

    /// Release the file handle. Safe to call more than once.
    pub fn close(&mut self) {
        self.file = None;
    }

    /// True once the end of the uncompressed stream has been reached.
    /// Cleared by any successful seek.
    #[must_use]
    pub fn eof(&self) -> bool {
        self.is_eof
    }

    /// The block index parsed at open, for listing.
    #[must_use]
    pub fn bindex(&self) -> &BlockIndex {
        &self.bindex
    }

    /// MZGF format version from the MZ subfield.
    #[must_use]
    pub fn version(&self) -> u8 {
        self.version
    }

    /// MTIME of the first member header, seconds since the epoch.
    #[must_use]
    pub fn mtime(&self) -> u32 {
        self.mtime
    }

    /// Uncompressed stream size recorded in the EOF member.
    #[must_use]
    pub fn ufilesize(&self) -> u64 {
        self.ufilesize
    }

    /// On-disk size of the compressed file.
    #[must_use]
    pub fn zfilesize(&self) -> u64 {
        self.zfilesize
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| MzgfError::Io(io::Error::other("reader is closed")))
    }

    /// Seek the file to a compressed block start and reset decode state.
    /// Raw deflate keeps no history across full-flushed blocks, so the
    /// inflater restarts clean every time.
    fn seek_to(&mut self, zoffset: u64, boffset: usize) -> Result<()> {
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(zoffset))?;
        self.zoffset = zoffset;
        self.boffset = boffset;
        self.blen = 0;
        self.zlen = 0;
        self.zpos = 0;
        self.is_eof = false;
        self.decompress.reset(false);
        Ok(())
    }

    /// Inflate the next span of the stream into the uncompressed scratch,
    /// refilling the compressed scratch from the file as needed. Returns
    /// the bytes produced by this call (`blen`); zero only at stream end.
    fn read_block(&mut self) -> Result<usize> {
        loop {
            if self.zpos == self.zlen {
                let file = self
                    .file
                    .as_mut()
                    .ok_or_else(|| MzgfError::Io(io::Error::other("reader is closed")))?;
                let n = file.read(&mut self.zblock)?;
                if n == 0 {
                    return Err(MzgfError::Io(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "read past end of file",
                    )));
                }
                self.zlen = n;
                self.zpos = 0;
                self.zoffset += n as u64;
            }

            let in_before = self.decompress.total_in();
            let out_before = self.decompress.total_out();
            let status = self
                .decompress
                .decompress(
                    &self.zblock[self.zpos..self.zlen],
                    &mut self.ublock,
                    FlushDecompress::None,
                )
                .map_err(|e| io::Error::other(format!("inflate failed: {e}")))?;
            let consumed = (self.decompress.total_in() - in_before) as usize;
            let produced = (self.decompress.total_out() - out_before) as usize;
            self.zpos += consumed;

            if matches!(status, Status::StreamEnd) {
                self.is_eof = true;
            } else if consumed == 0 && produced == 0 && matches!(status, Status::BufError) {
                return Err(MzgfError::Io(io::Error::other("inflate made no progress")));
            }

            if produced > 0 || self.is_eof {
                self.blen = produced;
                return Ok(produced);
            }
            // No output yet: the inflater wants more input.
        }
    }
}

/// Parse the fixed-size EOF member at the tail, returning the uncompressed
/// file size and the offset of the first BI member.
fn read_eof_member(file: &mut File, zfilesize: u64) -> Result<(u64, u64)> {
    if zfilesize < gzip::EOF_MEMBER_SIZE {
        return Err(MzgfError::format("file too short to hold an MZGF EOF member"));
    }
    file.seek(SeekFrom::Start(zfilesize - gzip::EOF_MEMBER_SIZE))?;

    let header = match gzip::read_header(file, gzip::BO_EXTRA_LEN) {
        Err(MzgfError::NotGzip) => {
            return Err(MzgfError::format("no MZGF EOF member at end of file"));
        }
        other => other?,
    };
    if header.extras.len() < gzip::BO_EXTRA_LEN || header.extras[..2] != gzip::TAG_BO {
        return Err(MzgfError::format("missing MZGF block index offset"));
    }
    let ufilesize = codec::unpack64(&header.extras[4..12]);
    let bindex_offset = codec::unpack64(&header.extras[12..20]);
    Ok((ufilesize, bindex_offset))
}

/// Walk the BI member chain starting at `head`, collecting all
/// (zoffset, uoffset) pairs in stream order.
fn read_bindex_chain(file: &mut File, head: u64) -> Result<BlockIndex> {
    let mut bindex = BlockIndex::new();
    let mut offset = head;
    while offset != 0 {
        file.seek(SeekFrom::Start(offset))?;
        let header = gzip::read_header(file, gzip::MAX_EXTRA_LEN)?;
        let extras = &header.extras;
        if extras.len() < gzip::BI_PREFIX_LEN || extras[..2] != gzip::TAG_BI {
            return Err(MzgfError::format("missing MZGF block index"));
        }
        let slen = codec::unpack16(&extras[2..4]) as usize;
        if slen + 4 != extras.len() || slen < 8 || (slen - 8) % 16 != 0 {
            return Err(MzgfError::format("corrupt MZGF block index subfield"));
        }
        for pair in extras[gzip::BI_PREFIX_LEN..].chunks_exact(16) {
            bindex.push(codec::unpack64(&pair[..8]), codec::unpack64(&pair[8..16]));
        }
        let next = codec::unpack64(&extras[4..12]);
        if next != 0 && next <= offset {
            return Err(MzgfError::format("MZGF block index chain does not advance"));
        }
        offset = next;
    }
    Ok(bindex)
}

/// Convenience wrapper so the reader can feed any `std::io::Write` sink.
impl Read for MzgfReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        MzgfReader::read(self, buf).map_err(io::Error::other)
    }
}
