//! CLI command implementations.
//!
//! Each command returns `Ok(false)` when the process should exit non-zero
//! without an error message (e.g. the file is invalid).

pub mod profile;
pub mod validate;
