//! CLI command implementations for mzgzip.
//!
//! Each submodule implements one of the driver operations (compress,
//! decompress, list) on top of [`mzgzip_lib::driver`], adding the
//! filesystem conventions the library stays out of: the `.mgz` suffix
//! discipline, overwrite prompting, and stdout redirection.

pub mod common;
pub mod compress;
pub mod decompress;
pub mod list;
