//! List the contents of an MZGF archive: version, mtime, sizes, and the
//! block index as virtual/uncompressed offset pairs.

use anyhow::{Context, Result, bail};
use mzgzip_lib::driver;
use mzgzip_lib::reader::MzgfReader;
use mzgzip_lib::validation::validate_file_exists;
use std::io;
use std::path::PathBuf;

use crate::commands::common::{MZGF_SUFFIX, has_mzgf_suffix};

/// Options for the list operation.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Archive to list.
    pub file: PathBuf,
}

/// Run the list operation.
///
/// # Errors
///
/// Returns an error if the archive is missing, misnamed, or malformed.
pub fn run(opts: &ListOptions) -> Result<()> {
    validate_file_exists(&opts.file, "Input file")?;
    if !has_mzgf_suffix(&opts.file) {
        bail!("{}: unknown suffix -- ignored (expected {})", opts.file.display(), MZGF_SUFFIX);
    }

    let reader = MzgfReader::open(&opts.file).with_context(|| opts.file.display().to_string())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    driver::list(&reader, &mut out)?;
    Ok(())
}
