//! # code2tex
//!
//! Typesets a tree of source files as one LaTeX document: a table of
//! contents that mirrors the directory structure, one page per file, and a
//! `listings` directive per file tagged with a language picked from the
//! file extension.
//!
//! ## Quick Start
//!
//! ```no_run
//! use code2tex::{Config, Pipeline};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .files(["src/main.c", "src/util.c", "scripts/build.sh"])
//!     .output("listing.tex")
//!     .build()?;
//!
//! Pipeline::new(config)?.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Scanner**: collects and filters files when given a directory
//! 2. **Document**: validates every input, then drives the writer
//! 3. **Writer**: emits page breaks, headings and listing directives
//! 4. **Heading tracker**: declares only the headings that changed since
//!    the previous file

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod config;
mod document;
mod error;
mod escape;
mod file;
mod filter;
mod heading;
mod language;
mod pipeline;
mod scanner;
mod template;
mod writer;

pub use config::{Config, ConfigBuilder, Input};
pub use document::{generate_document, validate_files, DocumentOptions, DocumentStats};
pub use error::{Error, Result};
pub use escape::{escape_tex, ESCAPE_CHAR, TEX_SPECIALS};
pub use filter::{FileFilterConfig, FilterPreset};
pub use heading::{Heading, HeadingLevel, HeadingTracker, SEPARATOR};
pub use language::resolve_language;
pub use pipeline::{Pipeline, PipelineStats};
pub use template::WHITESPACE_PLACEHOLDER;
pub use writer::DocumentWriter;

/// Runs the complete pipeline with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - An input file doesn't exist
/// - A directory input yields no files
/// - Rendering or writing the document fails
///
/// # Examples
///
/// ```no_run
/// use code2tex::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .directory("./src")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<PipelineStats> {
    Pipeline::new(config)?.run()
}
