#![deny(unsafe_code)]
// Clippy lint configuration for CI
// These lints are allowed because:
// - cast_*: container offset math intentionally casts between numeric types
// - missing_*_doc: Documentation improvements tracked separately
// - unnecessary_wraps: Some Result returns are for API consistency
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::unnecessary_wraps
)]

//! # mzgzip - Seekable Block-Compressed Gzip (MZGF)
//!
//! This library reads and writes MZGF, a strict superset of the RFC 1952
//! gzip stream format. The payload of an MZGF file is ordinary gzip whose
//! member headers carry extra subfields encoding a format version, a
//! persistent block index for O(log N) random access by uncompressed byte
//! offset, and a fixed-size end-of-file locator. A gzip decoder that
//! ignores extras still inflates the stream to the original bytes; an
//! MZGF-aware reader can additionally seek to any uncompressed offset
//! without scanning.
//!
//! ## Overview
//!
//! - **[`writer`]** - Block-oriented compression with index construction
//! - **[`reader`]** - Sequential reads plus virtual/uncompressed seeks
//! - **[`bindex`]** - The in-memory block index and its binary search
//! - **[`gzip`]** - Gzip member framing (headers, extras, trailers)
//! - **[`codec`]** - Little-endian pack/unpack helpers
//! - **[`driver`]** - Compress/decompress/list operations for the CLI
//! - **[`errors`]** - The container error taxonomy
//!
//! ## Quick Start
//!
//! ```no_run
//! use mzgzip_lib::driver;
//! use mzgzip_lib::reader::MzgfReader;
//! use std::fs::File;
//!
//! # fn main() -> mzgzip_lib::errors::Result<()> {
//! // Compress a file into an MZGF archive.
//! let mut src = File::open("data.mzML")?;
//! let mut dst = File::create("data.mzML.mgz")?;
//! driver::compress(&mut src, &mut dst)?;
//!
//! // Random access by uncompressed offset.
//! let mut reader = MzgfReader::open("data.mzML.mgz")?;
//! reader.useek(1_000_000)?;
//! let mut buf = vec![0u8; 4096];
//! let n = reader.read(&mut buf)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Format
//!
//! ```text
//! [MZ+DATA member] [BI member]+ [BO member]
//! ```
//!
//! The first member announces the version in an `MZ` subfield and carries
//! the whole compressed payload as a sequence of full-flushed DEFLATE
//! blocks. Each `BI` member stores a chunk of (zoffset, uoffset) pairs in
//! its extras region, chained by absolute file offsets. The terminal `BO`
//! member has a fixed 42-byte size so a reader can find it from the end of
//! the file.
//!
//! ## See Also
//!
//! - [BGZF](https://samtools.github.io/hts-specs/SAMv1.pdf) - the blocked
//!   gzip variant this layout is modeled on

pub mod bindex;
pub mod codec;
pub mod driver;
pub mod errors;
pub mod gzip;
pub mod logging;
pub mod reader;
pub mod validation;
pub mod writer;

// Re-export the types nearly every caller touches
pub use bindex::{BindexEntry, BlockIndex};
pub use errors::{MzgfError, Result};
pub use reader::MzgfReader;
pub use writer::{BLOCK_SIZE, MAX_BLOCK_SIZE, MZGF_VERSION, MzgfWriter};
