//! File selection for directory mode.
//!
//! Decides which collected paths make it into the document: an extension
//! allow-list, a deny-list of directory names matched against every
//! directory component, and optional glob excludes.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::collections::BTreeSet;
use std::path::{Component, Path};

/// Canned filter setups for common trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPreset {
    /// Python sources only
    Python,
    /// Python sources of a TensorFlow checkout, without tests and vendored Keras
    Tensorflow,
}

impl FilterPreset {
    /// Returns the filter configuration for this preset.
    #[must_use]
    pub fn config(self) -> FileFilterConfig {
        match self {
            Self::Python => FileFilterConfig::new().include_extensions(["py"]),
            Self::Tensorflow => FileFilterConfig::new()
                .include_extensions(["py"])
                .exclude_directory_segments(["kernel_tests", "keras", "debug"]),
        }
    }
}

/// Configuration for file selection during directory collection.
///
/// Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileFilterConfig {
    include_extensions: BTreeSet<String>,
    exclude_directory_segments: BTreeSet<String>,
    exclude_files: Vec<String>,
}

impl FileFilterConfig {
    /// Creates an empty configuration that accepts every file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds extensions (without the dot) to the allow-list.
    #[must_use]
    pub fn include_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include_extensions
            .extend(extensions.into_iter().map(Into::into));
        self
    }

    /// Adds directory names whose contents are skipped at any depth.
    #[must_use]
    pub fn exclude_directory_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_directory_segments
            .extend(segments.into_iter().map(Into::into));
        self
    }

    /// Adds glob patterns, matched against root-relative paths, to skip.
    #[must_use]
    pub fn exclude_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_files
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Merges another configuration into this one.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        self.include_extensions(other.include_extensions)
            .exclude_directory_segments(other.exclude_directory_segments)
            .exclude_files(other.exclude_files)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FileFilter {
    include_extensions: BTreeSet<String>,
    exclude_directory_segments: BTreeSet<String>,
    exclude_files: GlobSet,
}

impl FileFilter {
    /// Compiles a filter from its configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid glob pattern.
    pub(crate) fn new(config: &FileFilterConfig) -> Result<Self> {
        Ok(Self {
            include_extensions: config.include_extensions.clone(),
            exclude_directory_segments: config.exclude_directory_segments.clone(),
            exclude_files: Self::build_globset(&config.exclude_files)?,
        })
    }

    fn build_globset(patterns: &[String]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                Error::config(format!("Invalid glob pattern '{pattern}': {e}"))
            })?;
            builder.add(glob);
        }

        builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build glob set: {e}")))
    }

    /// Returns true if a root-relative file path belongs in the document.
    pub(crate) fn should_process(&self, relative: &Path) -> bool {
        if !self.include_extensions.is_empty() {
            let extension = relative.extension().and_then(|e| e.to_str());
            if !extension.is_some_and(|e| self.include_extensions.contains(e)) {
                return false;
            }
        }

        if let Some(parent) = relative.parent() {
            let excluded = parent.components().any(|component| match component {
                Component::Normal(name) => name
                    .to_str()
                    .is_some_and(|name| self.exclude_directory_segments.contains(name)),
                _ => false,
            });
            if excluded {
                return false;
            }
        }

        !self.exclude_files.is_match(relative)
    }
}
