//! Decompress (a slice of) an MZGF archive.

use anyhow::{Context, Result, bail};
use log::info;
use mzgzip_lib::driver;
use mzgzip_lib::logging::OperationTimer;
use mzgzip_lib::reader::MzgfReader;
use mzgzip_lib::validation::validate_file_exists;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use crate::commands::common::{
    MZGF_SUFFIX, decompressed_name, ensure_overwritable, has_mzgf_suffix,
};

/// Options for the decompress operation.
#[derive(Debug, Clone)]
pub struct DecompressOptions {
    /// Archive to decompress.
    pub file: PathBuf,
    /// Write the output to stdout instead of the suffix-stripped name.
    pub to_stdout: bool,
    /// Overwrite an existing output without asking.
    pub force: bool,
    /// Start at this virtual offset.
    pub voffset: Option<u64>,
    /// Start at this uncompressed offset.
    pub uoffset: Option<u64>,
    /// Decompress at most this many bytes.
    pub size: Option<u64>,
}

/// Run the decompress operation.
///
/// # Errors
///
/// Returns an error if the archive is missing, misnamed, or malformed, if
/// the output exists and the user declines to overwrite, or if inflating
/// fails.
pub fn run(opts: &DecompressOptions) -> Result<()> {
    validate_file_exists(&opts.file, "Input file")?;
    if !has_mzgf_suffix(&opts.file) {
        bail!("{}: unknown suffix -- ignored (expected {})", opts.file.display(), MZGF_SUFFIX);
    }

    let mut reader =
        MzgfReader::open(&opts.file).with_context(|| opts.file.display().to_string())?;

    if let Some(voffset) = opts.voffset {
        reader.vseek(voffset).with_context(|| opts.file.display().to_string())?;
    } else if let Some(uoffset) = opts.uoffset {
        reader.useek(uoffset).with_context(|| opts.file.display().to_string())?;
    }

    if opts.to_stdout {
        let timer = OperationTimer::new("Decompressing");
        let stdout = io::stdout();
        let mut dst = stdout.lock();
        let written = driver::decompress(&mut reader, &mut dst, opts.size)
            .with_context(|| opts.file.display().to_string())?;
        dst.flush()?;
        timer.log_completion(written);
    } else {
        let output = decompressed_name(&opts.file);
        ensure_overwritable(&output, opts.force)?;
        info!("Input: {}", opts.file.display());
        info!("Output: {}", output.display());

        let timer = OperationTimer::new("Decompressing");
        let mut dst = File::create(&output).with_context(|| output.display().to_string())?;
        let written = driver::decompress(&mut reader, &mut dst, opts.size)
            .with_context(|| opts.file.display().to_string())?;
        timer.log_completion(written);
    }

    reader.close();
    Ok(())
}
