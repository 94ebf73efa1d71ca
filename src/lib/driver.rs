//! Operations exported to the command-line driver.
//!
//! These wrap the [`MzgfWriter`] and [`MzgfReader`] engines behind the
//! three things the CLI does: compress a stream, decompress (a slice of)
//! a stream, and list an archive's index. File naming, overwrite policy,
//! and stdout plumbing stay in the binary.

use crate::errors::Result;
use crate::reader::MzgfReader;
use crate::writer::{BLOCK_SIZE, MzgfWriter};
use chrono::{Local, TimeZone};
use std::io::{Read, Write};

/// Compress all of `src` into an MZGF stream on `dst`.
///
/// Returns the number of uncompressed bytes consumed.
///
/// # Errors
///
/// Returns an error if reading, compressing, or writing fails; the output
/// is left partially written in that case.
pub fn compress<R, W>(src: &mut R, dst: &mut W) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut writer = MzgfWriter::new();
    writer.deflate(src, dst)?;
    Ok(writer.ufilesize())
}

/// Decompress from the reader's current position into `dst`, stopping at
/// end of stream or after `limit` bytes. Callers seek first when they want
/// to start elsewhere.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns an error if inflating or writing fails.
pub fn decompress<W>(reader: &mut MzgfReader, dst: &mut W, limit: Option<u64>) -> Result<u64>
where
    W: Write + ?Sized,
{
    let mut remaining = limit.unwrap_or(u64::MAX);
    let mut buffer = vec![0u8; BLOCK_SIZE];
    let mut written = 0u64;
    while remaining > 0 && !reader.eof() {
        let want = remaining.min(BLOCK_SIZE as u64) as usize;
        let n = reader.read(&mut buffer[..want])?;
        if n == 0 {
            break;
        }
        dst.write_all(&buffer[..n])?;
        written += n as u64;
        remaining -= n as u64;
    }
    Ok(written)
}

/// Write a human-readable summary of the archive: version, stored mtime,
/// uncompressed size, and the virtual/uncompressed offset of every block.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn list<W>(reader: &MzgfReader, out: &mut W) -> Result<()>
where
    W: Write + ?Sized,
{
    writeln!(out, "MZGF Version: {}", reader.version())?;
    writeln!(out, "MZGF Date Time: {}", format_mtime(reader.mtime()))?;
    writeln!(out, "MZGF Uncompressed size: {}", reader.ufilesize())?;
    writeln!(out, "MZGF Virtual/Uncompressed Offsets:")?;
    for entry in reader.bindex().entries() {
        writeln!(out, "{:>14} {:>12}", entry.zoffset << 16, entry.uoffset)?;
    }
    Ok(())
}

/// Render a stored MTIME as local time, or the raw value if out of range.
fn format_mtime(mtime: u32) -> String {
    match Local.timestamp_opt(i64::from(mtime), 0).single() {
        Some(dt) => dt.format("%a %b %e %H:%M:%S %Y").to_string(),
        None => mtime.to_string(),
    }
}
