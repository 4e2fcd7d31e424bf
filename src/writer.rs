use crate::{
    document::{DocumentOptions, DocumentStats},
    error::{Error, Result},
    heading::HeadingTracker,
    language::resolve_language,
    template::{ListingView, TemplateEngine},
};
use std::{
    borrow::Cow,
    io::Write,
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

/// Streams a LaTeX listing document into a sink.
///
/// The writer owns the heading state for exactly one document. Call
/// [`begin`](Self::begin), then [`add_listing`](Self::add_listing) per file in
/// order, then [`finish`](Self::finish).
pub struct DocumentWriter<W: Write> {
    out: W,
    engine: TemplateEngine,
    tracker: HeadingTracker,
    root_prefix: Option<PathBuf>,
    show_whitespace: bool,
    stats: DocumentStats,
}

impl<W: Write> DocumentWriter<W> {
    /// Creates a writer for one document.
    ///
    /// # Errors
    ///
    /// Returns an error if the templates cannot be loaded.
    pub fn new(out: W, options: &DocumentOptions) -> Result<Self> {
        Ok(Self {
            out,
            engine: TemplateEngine::new(options.preamble_template.as_deref())?,
            tracker: HeadingTracker::new(),
            root_prefix: options.root_prefix.clone(),
            show_whitespace: options.show_whitespace,
            stats: DocumentStats::default(),
        })
    }

    /// Writes the preamble and table of contents.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn begin(&mut self) -> Result<()> {
        self.engine
            .render_preamble(self.show_whitespace, &mut self.out)
    }

    /// Writes one file's page break, new headings and listing directive.
    ///
    /// `heading` replaces the path as heading text. Either way the root
    /// prefix is removed from the heading, while the directive keeps the
    /// literal `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or writing fails.
    pub fn add_listing(&mut self, path: &str, heading: Option<&str>) -> Result<()> {
        let title = self.heading_text(heading.unwrap_or(path));
        let headings = self.tracker.headings_for(&title);

        trace!(
            "{}: {} new heading(s) under '{}'",
            path,
            headings.len(),
            title
        );

        self.engine.render_listing(
            &ListingView {
                path,
                title: &title,
                headings: &headings,
            },
            &mut self.out,
        )?;

        self.stats.listings += 1;
        self.stats.headings += headings.len();
        if resolve_language(path).is_empty() {
            debug!("No listings language for {}", path);
            self.stats.unresolved_languages += 1;
        }

        Ok(())
    }

    /// Writes the closing directive, flushes, and returns the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or flushing fails.
    pub fn finish(mut self) -> Result<(W, DocumentStats)> {
        self.engine.render_closing(&mut self.out)?;
        self.out
            .flush()
            .map_err(|e| Error::io("<output>", e))?;
        Ok((self.out, self.stats))
    }

    /// Removes the root prefix from heading text.
    fn heading_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let Some(root) = &self.root_prefix else {
            return Cow::Borrowed(text);
        };

        match Path::new(text).strip_prefix(root) {
            Ok(relative) if !relative.as_os_str().is_empty() => {
                Cow::Owned(relative.to_string_lossy().into_owned())
            }
            _ => Cow::Borrowed(text),
        }
    }
}

/// Writes a file atomically.
///
/// # Process
///
/// 1. Writes content to a uniquely named temporary file beside the target
/// 2. Syncs the temporary file to disk
/// 3. Renames it over the target path
///
/// On failure the temporary file is removed and the target is untouched.
pub(crate) fn write_file_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| Error::io(temp_file.path(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| Error::io(path, e.error))?;

    Ok(())
}
