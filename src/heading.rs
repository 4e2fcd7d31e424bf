//! Heading hierarchy derivation.
//!
//! Each listed file gets a chain of LaTeX sectioning commands, one per path
//! segment. Consecutive files under the same directories share the leading
//! part of that chain, so only the segments that changed since the previous
//! file are declared again. The table of contents then mirrors the source
//! tree without repeating directory headings.

use serde::Serialize;

/// Separator between path segments in heading paths.
pub const SEPARATOR: char = '/';

/// Sectioning levels, most general first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// `\section`
    Section,
    /// `\subsection`
    Subsection,
    /// `\subsubsection`
    Subsubsection,
    /// `\paragraph`
    Paragraph,
    /// `\subparagraph`
    Subparagraph,
}

impl HeadingLevel {
    /// All levels ordered by depth.
    pub const ALL: [Self; 5] = [
        Self::Section,
        Self::Subsection,
        Self::Subsubsection,
        Self::Paragraph,
        Self::Subparagraph,
    ];

    /// Number of available levels.
    pub const COUNT: usize = Self::ALL.len();

    /// Returns the LaTeX command name, without the backslash.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Section => "section",
            Self::Subsection => "subsection",
            Self::Subsubsection => "subsubsection",
            Self::Paragraph => "paragraph",
            Self::Subparagraph => "subparagraph",
        }
    }

    /// Returns the level used at `depth` (0-based), if any.
    #[must_use]
    pub fn at_depth(depth: usize) -> Option<Self> {
        Self::ALL.get(depth).copied()
    }
}

/// One heading declaration: a raw path segment and the level it occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Unescaped segment text, used as the short (TOC) title
    pub segment: String,
    /// Sectioning level for the segment
    pub level: HeadingLevel,
}

/// Tracks the previous file's segments to emit only new headings.
///
/// A tracker belongs to exactly one document; start a new one per document.
///
/// # Examples
///
/// ```
/// use code2tex::{HeadingLevel, HeadingTracker};
///
/// let mut tracker = HeadingTracker::new();
/// assert_eq!(tracker.headings_for("a/b/x.py").len(), 3);
///
/// let next = tracker.headings_for("a/b/y.py");
/// assert_eq!(next.len(), 1);
/// assert_eq!(next[0].segment, "y.py");
/// assert_eq!(next[0].level, HeadingLevel::Subsubsection);
/// ```
#[derive(Debug, Default, Clone)]
pub struct HeadingTracker {
    previous: Vec<String>,
}

impl HeadingTracker {
    /// Creates a tracker with no previous path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the headings `path` needs beyond those already declared.
    ///
    /// The result runs shallow to deep. It is empty only when `path` has the
    /// same segments as the previous call. The tracker then remembers `path`
    /// as the previous path.
    pub fn headings_for(&mut self, path: &str) -> Vec<Heading> {
        let segments = split_segments(path);

        let shared = self
            .previous
            .iter()
            .zip(&segments)
            .take_while(|(old, new)| old == new)
            .count();

        let headings = segments
            .iter()
            .enumerate()
            .skip(shared)
            .filter_map(|(depth, segment)| {
                HeadingLevel::at_depth(depth).map(|level| Heading {
                    segment: segment.clone(),
                    level,
                })
            })
            .collect();

        self.previous = segments;
        headings
    }

    /// Segments of the most recent path, after collapsing.
    #[must_use]
    pub fn previous(&self) -> &[String] {
        &self.previous
    }
}

/// Splits a heading path into at most [`HeadingLevel::COUNT`] segments.
///
/// Deep paths keep their first `COUNT - 2` segments and merge everything
/// after them into one trailing segment.
fn split_segments(path: &str) -> Vec<String> {
    let path = path.strip_prefix(SEPARATOR).unwrap_or(path);
    let mut segments: Vec<String> = path.split(SEPARATOR).map(str::to_owned).collect();

    if segments.len() > HeadingLevel::COUNT {
        let kept = HeadingLevel::COUNT - 2;
        let separator = SEPARATOR.to_string();
        let tail = segments.split_off(kept).join(separator.as_str());
        segments.push(tail);
    }

    segments
}
