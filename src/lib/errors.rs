//! Custom error types for MZGF container operations.

use thiserror::Error;

/// Result type alias for MZGF operations
pub type Result<T> = std::result::Result<T, MzgfError>;

/// Error type for MZGF container operations
#[derive(Error, Debug)]
pub enum MzgfError {
    /// Underlying I/O failure, including compression-backend errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The stream does not start with a gzip member
    #[error("not in gzip format")]
    NotGzip,

    /// Valid gzip, but the first member does not carry the MZ subfield
    #[error("not in MZGF format")]
    NotMzgzip,

    /// A gzip member header could not be read in full
    #[error("gzip header error: {reason}")]
    Header {
        /// Explanation of the problem
        reason: String,
    },

    /// The container structure violates the MZGF layout
    #[error("MZGF format problem: {reason}")]
    Format {
        /// Explanation of the problem
        reason: String,
    },

    /// The MZ subfield declares a version this reader does not understand
    #[error("incompatible MZGF version: {version}")]
    BadVersion {
        /// The version byte found in the MZ subfield
        version: u8,
    },
}

impl MzgfError {
    /// Construct a [`MzgfError::Header`] from any message.
    pub fn header<S: Into<String>>(reason: S) -> Self {
        MzgfError::Header { reason: reason.into() }
    }

    /// Construct a [`MzgfError::Format`] from any message.
    pub fn format<S: Into<String>>(reason: S) -> Self {
        MzgfError::Format { reason: reason.into() }
    }
}
