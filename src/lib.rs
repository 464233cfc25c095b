//! ddsforge - batch PNG to DDS texture conversion
//!
//! This library crate exposes the core functionality for integration testing.

pub mod batch;
pub mod config;
