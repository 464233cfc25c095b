//! # ddsforge-tools
//!
//! External tool plumbing for converting PNG images to DDS textures.
//!
//! This crate provides:
//!
//! - **Tool discovery** ([`locate_encoder`], [`resolve_shim`]) -- find
//!   `texconv.exe` next to the running program and, off Windows, the `wine`
//!   launcher needed to run it.
//! - **Command execution** ([`ToolCommand`]) -- builder for running an
//!   external process, optionally through a [`Shim`].
//! - **Encoders** ([`Encoder`], [`TexconvEncoder`]) -- the capability used by
//!   the batch converter to turn one image into one staged DDS file.
//! - **Staging** ([`StagingArea`]) -- the shared output directory the encoder
//!   writes into, plus relocation of results and final cleanup.
//!
//! ## Example
//!
//! ```no_run
//! use ddsforge_tools::{locate_encoder, resolve_shim, shim_required, Encoder, StagingArea, TexconvEncoder};
//! use std::path::Path;
//!
//! let texconv = locate_encoder(None)?;
//! let shim = if shim_required(None) { Some(resolve_shim(None)?) } else { None };
//! let encoder = TexconvEncoder::new(texconv, shim);
//!
//! let staging = StagingArea::create("temp_dds")?;
//! let staged = encoder.convert(Path::new("in/a/x.png"), staging.path())?;
//! staging.relocate(&staged, Path::new("out/a/x.dds"))?;
//! staging.cleanup();
//! # Ok::<(), ddsforge_common::Error>(())
//! ```

pub mod command;
pub mod encoder;
pub mod staging;
pub mod tools;

// Re-exports
pub use command::{ToolCommand, ToolOutput};
pub use encoder::{Encoder, TexconvEncoder, TexconvSettings};
pub use staging::StagingArea;
pub use tools::{locate_encoder, resolve_shim, shim_required, Shim};
