//! Input validation utilities
//!
//! Common validation for command-line file arguments with consistent
//! error messages.

use crate::errors::{MzgfError, Result};
use std::path::Path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input file")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use mzgzip_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.mgz", "Input file");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(MzgfError::format(format!(
            "{description} '{}' does not exist",
            path_ref.display()
        )));
    }
    Ok(())
}
