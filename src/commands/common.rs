//! Shared filename and overwrite helpers for the CLI commands.

use anyhow::{Result, bail};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Suffix carried by MZGF archives.
pub const MZGF_SUFFIX: &str = ".mgz";

/// True if the path already names an MZGF archive.
#[must_use]
pub fn has_mzgf_suffix(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().ends_with(MZGF_SUFFIX)
}

/// Archive name for an input: the input path with `.mgz` appended.
#[must_use]
pub fn compressed_name(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(MZGF_SUFFIX);
    PathBuf::from(name)
}

/// Output name for an archive: the input path with `.mgz` removed.
#[must_use]
pub fn decompressed_name(path: &Path) -> PathBuf {
    let name = path.as_os_str().to_string_lossy();
    PathBuf::from(name.strip_suffix(MZGF_SUFFIX).unwrap_or(&name).to_string())
}

/// Refuse to clobber an existing output unless forced or the user agrees.
///
/// # Errors
///
/// Returns an error (aborting the command) if the user declines, or if
/// reading the answer fails.
pub fn ensure_overwritable(path: &Path, force: bool) -> Result<()> {
    if force || !path.exists() {
        return Ok(());
    }

    print!("mzgzip: {} already exists; do you wish to overwrite (y or n)? ", path.display());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    if !answer.trim_start().starts_with(['y', 'Y']) {
        bail!("not overwritten");
    }
    Ok(())
}
