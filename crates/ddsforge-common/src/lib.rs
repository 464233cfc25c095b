//! Shared types and utilities for ddsforge.
//!
//! - [`Error`] / [`Result`]: the error type used by every library crate.
//! - [`paths`]: extension checks and output path derivation.

pub mod error;
pub mod paths;

pub use error::{Error, Result};
