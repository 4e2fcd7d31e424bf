use crate::{
    error::{Error, Result},
    file::{has_binary_extension, is_likely_binary},
    filter::{FileFilter, FileFilterConfig},
};
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Statistics collected during scanning.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScanStats {
    /// Regular files seen by the walker
    pub(crate) total_files: usize,

    /// Files rejected by the filter
    pub(crate) filtered_files: usize,

    /// Binary files skipped
    pub(crate) binary_files: usize,

    /// Walk or read errors encountered
    pub(crate) errors: usize,
}

/// Collects the files of a directory tree in document order.
pub(crate) struct Scanner {
    root_dir: PathBuf,
    respect_gitignore: bool,
    file_filter: FileFilter,
    skipped: Option<PathBuf>,
}

impl Scanner {
    /// Creates a scanner for `root_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter configuration does not compile.
    pub(crate) fn new(
        root_dir: impl Into<PathBuf>,
        filter_config: &FileFilterConfig,
        respect_gitignore: bool,
    ) -> Result<Self> {
        Ok(Self {
            root_dir: root_dir.into(),
            respect_gitignore,
            file_filter: FileFilter::new(filter_config)?,
            skipped: None,
        })
    }

    /// Never selects `path`, typically the document being written.
    ///
    /// Paths are compared after resolving their parent directory, so a
    /// relative and an absolute spelling of the same file both match.
    #[must_use]
    pub(crate) fn skip_path(mut self, path: Option<&Path>) -> Self {
        self.skipped = path.and_then(resolved_path);
        self
    }

    /// Walks the root directory and returns the selected files, sorted.
    ///
    /// Hidden files are always skipped. Sorting by path keeps every
    /// directory's files contiguous, which lets consecutive listings share
    /// their directory headings.
    ///
    /// # Errors
    ///
    /// Returns an error if no files are selected.
    pub(crate) fn scan(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let mut stats = ScanStats::default();

        debug!("Scanning {}", self.root_dir.display());

        let walker = WalkBuilder::new(&self.root_dir)
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .ignore(self.respect_gitignore)
            .require_git(false)
            .hidden(true)
            .follow_links(false)
            .build();

        for result in walker {
            match result {
                Ok(entry) if entry.file_type().is_some_and(|ft| ft.is_file()) => {
                    stats.total_files += 1;
                    match self.select(&entry, &mut stats) {
                        Ok(true) => files.push(entry.into_path()),
                        Ok(false) => {}
                        Err(e) => {
                            warn!("Skipping {}: {}", entry.path().display(), e);
                            stats.errors += 1;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!("Walk error: {}", e);
                    stats.errors += 1;
                }
            }
        }

        debug!(
            "Scan complete: {} seen, {} filtered, {} binary, {} errors",
            stats.total_files, stats.filtered_files, stats.binary_files, stats.errors
        );

        if files.is_empty() {
            return Err(Error::no_files(&self.root_dir));
        }

        files.sort();

        debug!("Selected {} files", files.len());
        Ok(files)
    }

    /// Decides whether one walked file goes into the document.
    fn select(&self, entry: &DirEntry, stats: &mut ScanStats) -> Result<bool> {
        let path = entry.path();
        let relative = relative_path(path, &self.root_dir);

        trace!("Considering {}", relative.display());

        if self.is_skipped(path) {
            debug!("Skipping output file: {}", relative.display());
            stats.filtered_files += 1;
            return Ok(false);
        }

        if !self.file_filter.should_process(&relative) {
            stats.filtered_files += 1;
            return Ok(false);
        }

        if has_binary_extension(path) || is_likely_binary(path)? {
            debug!("Skipping binary file: {}", relative.display());
            stats.binary_files += 1;
            return Ok(false);
        }

        Ok(true)
    }

    fn is_skipped(&self, path: &Path) -> bool {
        self.skipped.as_ref().is_some_and(|skipped| {
            path.file_name() == skipped.file_name()
                && resolved_path(path).as_ref() == Some(skipped)
        })
    }
}

/// Canonicalizes the parent directory and re-attaches the file name.
///
/// The file itself need not exist yet.
fn resolved_path(path: &Path) -> Option<PathBuf> {
    let name = path.file_name()?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|dir| dir.join(name))
}

fn relative_path(path: &Path, root: &Path) -> PathBuf {
    pathdiff::diff_paths(path, root).unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    fn scan(root: &Path, config: &FileFilterConfig) -> Result<Vec<PathBuf>> {
        Scanner::new(root, config, true)?.scan()
    }

    fn names(root: &Path, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| relative_path(f, root).to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_scanner_finds_nested_files_sorted() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("src/util/io.py").write_str("pass").unwrap();
        temp.child("src/main.py").write_str("pass").unwrap();
        temp.child("setup.py").write_str("pass").unwrap();
        temp.child("src/app.py").write_str("pass").unwrap();

        let files = scan(temp.path(), &FileFilterConfig::new()).unwrap();

        assert_eq!(
            names(temp.path(), &files),
            vec!["setup.py", "src/app.py", "src/main.py", "src/util/io.py"]
        );
    }

    #[test]
    fn test_scanner_applies_filter() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("ops/math.py").write_str("pass").unwrap();
        temp.child("ops/math.cc").write_str("int x;").unwrap();
        temp.child("ops/kernel_tests/math_test.py").write_str("pass").unwrap();

        let config = crate::FilterPreset::Tensorflow.config();
        let files = scan(temp.path(), &config).unwrap();

        assert_eq!(names(temp.path(), &files), vec!["ops/math.py"]);
    }

    #[test]
    fn test_scanner_skips_binary_and_hidden() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("text.c").write_str("int main() {}").unwrap();
        temp.child("blob.dat").write_binary(&[0u8; 100]).unwrap();
        temp.child("icon.png").write_str("not really a png").unwrap();
        temp.child(".secret.c").write_str("int x;").unwrap();

        let files = scan(temp.path(), &FileFilterConfig::new()).unwrap();

        assert_eq!(names(temp.path(), &files), vec!["text.c"]);
    }

    #[test]
    fn test_scanner_respects_gitignore() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child(".gitignore").write_str("generated.py\n").unwrap();
        temp.child("kept.py").write_str("pass").unwrap();
        temp.child("generated.py").write_str("pass").unwrap();

        let files = scan(temp.path(), &FileFilterConfig::new()).unwrap();
        assert_eq!(names(temp.path(), &files), vec!["kept.py"]);

        let all = Scanner::new(temp.path(), &FileFilterConfig::new(), false)
            .unwrap()
            .scan()
            .unwrap();
        assert_eq!(names(temp.path(), &all), vec!["generated.py", "kept.py"]);
    }

    #[test]
    fn test_scanner_keeps_non_ascii_sources() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("ru.py")
            .write_str("# Вычисляем значение переменной\nx = 1\n")
            .unwrap();
        temp.child("en.py").write_str("# compute the value\nx = 1\n").unwrap();

        let files = scan(temp.path(), &FileFilterConfig::new()).unwrap();

        assert_eq!(names(temp.path(), &files), vec!["en.py", "ru.py"]);
    }

    #[test]
    fn test_scanner_skips_output_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("proj/main.py").write_str("pass").unwrap();
        temp.child("proj/listing.tex")
            .write_str("\\documentclass{article}")
            .unwrap();
        let root = temp.path().join("proj");

        let all = scan(&root, &FileFilterConfig::new()).unwrap();
        assert_eq!(names(&root, &all), vec!["listing.tex", "main.py"]);

        let output = temp.path().join("proj/../proj/listing.tex");
        let files = Scanner::new(&root, &FileFilterConfig::new(), true)
            .unwrap()
            .skip_path(Some(output.as_path()))
            .scan()
            .unwrap();
        assert_eq!(names(&root, &files), vec!["main.py"]);
    }

    #[test]
    fn test_scanner_empty_directory() {
        let temp = assert_fs::TempDir::new().unwrap();

        let result = scan(temp.path(), &FileFilterConfig::new());
        assert!(matches!(result, Err(Error::NoFiles { .. })));
    }
}
