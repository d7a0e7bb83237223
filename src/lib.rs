//! # md2pug
//!
//! Batch-convert Markdown files into Pug templates.
//!
//! ## Features
//!
//! - Single-file or whole-directory conversion, optionally recursive
//! - Output tree mirrors the input structure
//! - Heading-anchor and syntax-highlight rendering plugins
//! - Safe mode with an interactive confirmation gate before any write
//!
//! ## Quick Start
//!
//! ```no_run
//! use md2pug::{Config, Pipeline};
//!
//! # fn main() -> md2pug::Result<()> {
//! let config = Config::builder()
//!     .directory("./docs")
//!     .recursive(true)
//!     .output_dir("./templates")
//!     .build()?;
//!
//! let stats = Pipeline::new(config)?.run()?;
//! println!("converted {} files", stats.files_converted);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The library is a small pipeline:
//! 1. **Scanner**: resolves the input selection into a file list
//! 2. **Renderer**: turns Markdown text into Pug text
//! 3. **File adapter**: reads sources and writes results, creating directories

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod error;
mod file;
mod pipeline;
mod render;
mod scanner;

pub use config::{Config, ConfigBuilder, InputSelection, MARKDOWN_EXTENSION, PUG_EXTENSION};
pub use error::{Error, Result};
pub use file::replace_extension;
pub use pipeline::{ConfirmSource, Pipeline, RunStats, StdinConfirm};
pub use render::{Plugin, Renderer};

/// Runs a complete conversion with the given configuration.
///
/// This is the main entry point for the library.
///
/// # Errors
///
/// Returns an error if:
/// - The input file/directory or output directory fails validation
/// - The input file is binary
/// - The user declines the safe-mode prompt
/// - A read or write fails during the convert loop
pub fn run(config: Config) -> Result<RunStats> {
    Pipeline::new(config)?.run()
}
