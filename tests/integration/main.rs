//! Integration tests for the mzgzip library.
//!
//! These tests validate end-to-end container workflows: compressing with
//! the writer, reopening with the reader, seeking, listing, and the
//! rejection of malformed inputs.

mod helpers;
mod test_error_paths;
mod test_listing;
mod test_round_trip;
mod test_seeking;
