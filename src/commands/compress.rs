//! Compress a file into an MZGF archive.

use anyhow::{Context, Result, bail};
use log::info;
use mzgzip_lib::driver;
use mzgzip_lib::logging::OperationTimer;
use mzgzip_lib::validation::validate_file_exists;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use crate::commands::common::{MZGF_SUFFIX, compressed_name, ensure_overwritable, has_mzgf_suffix};

/// Options for the compress operation.
#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// File to compress.
    pub file: PathBuf,
    /// Write the archive to stdout instead of `<file>.mgz`.
    pub to_stdout: bool,
    /// Overwrite an existing archive without asking.
    pub force: bool,
}

/// Run the compress operation.
///
/// # Errors
///
/// Returns an error if the input is missing or already an archive, the
/// output exists and the user declines to overwrite, or compression fails.
pub fn run(opts: &CompressOptions) -> Result<()> {
    validate_file_exists(&opts.file, "Input file")?;
    if has_mzgf_suffix(&opts.file) {
        bail!("{}: already has {} suffix -- unchanged", opts.file.display(), MZGF_SUFFIX);
    }

    let mut src = File::open(&opts.file).with_context(|| opts.file.display().to_string())?;

    if opts.to_stdout {
        let timer = OperationTimer::new("Compressing");
        let stdout = io::stdout();
        let mut dst = stdout.lock();
        let n = driver::compress(&mut src, &mut dst)
            .with_context(|| opts.file.display().to_string())?;
        timer.log_completion(n);
    } else {
        let output = compressed_name(&opts.file);
        ensure_overwritable(&output, opts.force)?;
        info!("Input: {}", opts.file.display());
        info!("Output: {}", output.display());

        let timer = OperationTimer::new("Compressing");
        let mut dst = File::create(&output).with_context(|| output.display().to_string())?;
        let n = driver::compress(&mut src, &mut dst)
            .with_context(|| opts.file.display().to_string())?;
        timer.log_completion(n);
    }

    Ok(())
}
