//! Whole-document generation.

use crate::{
    error::{Error, Result},
    writer::DocumentWriter,
};
use serde::Serialize;
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument};

/// Options that shape the generated document.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Render spaces and tabs inside listings as visible glyphs
    pub show_whitespace: bool,

    /// Prefix removed from heading text (not from listing paths)
    pub root_prefix: Option<PathBuf>,

    /// LaTeX file replacing the built-in preamble
    pub preamble_template: Option<PathBuf>,
}

/// Counts collected while writing a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Listing directives written
    pub listings: usize,

    /// Heading declarations written
    pub headings: usize,

    /// Listings written with an empty language hint
    pub unresolved_languages: usize,
}

/// Generates a complete listing document for `files`, in the given order.
///
/// Every path is checked before anything is written, so a missing file
/// leaves `out` untouched.
///
/// # Errors
///
/// Returns [`Error::MissingFile`] for the first path that is not an existing
/// regular file, or an error if rendering or writing fails.
///
/// # Examples
///
/// ```no_run
/// use code2tex::{generate_document, DocumentOptions};
///
/// # fn main() -> anyhow::Result<()> {
/// let mut out = Vec::new();
/// let stats = generate_document(&["src/main.c"], &DocumentOptions::default(), &mut out)?;
/// assert_eq!(stats.listings, 1);
/// # Ok(())
/// # }
/// ```
#[instrument(skip_all, fields(files = files.len()))]
pub fn generate_document<P, W>(
    files: &[P],
    options: &DocumentOptions,
    out: W,
) -> Result<DocumentStats>
where
    P: AsRef<Path>,
    W: Write,
{
    validate_files(files)?;

    let mut writer = DocumentWriter::new(out, options)?;
    writer.begin()?;
    for file in files {
        let path = file.as_ref().to_string_lossy();
        writer.add_listing(&path, None)?;
    }
    let (_, stats) = writer.finish()?;

    debug!(
        "Wrote {} listings with {} headings",
        stats.listings, stats.headings
    );
    Ok(stats)
}

/// Checks that every input is an existing regular file.
///
/// # Errors
///
/// Returns [`Error::MissingFile`] naming the first offending path.
pub fn validate_files<P: AsRef<Path>>(files: &[P]) -> Result<()> {
    for file in files {
        let path = file.as_ref();
        if !path.is_file() {
            return Err(Error::missing_file(path));
        }
    }
    Ok(())
}
