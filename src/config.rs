use crate::document::DocumentOptions;
use crate::error::{Error, Result};
use crate::filter::FileFilterConfig;
use std::path::PathBuf;

/// Where the listed files come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Explicit files, listed in the given order
    Files(Vec<PathBuf>),
    /// Every selected file below a directory, sorted by path
    Directory(PathBuf),
}

/// Configuration for the code2tex pipeline.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Files or directory to list
    pub input: Input,

    /// Output file; `None` writes to stdout
    pub output: Option<PathBuf>,

    /// Render spaces and tabs in listings as visible glyphs
    pub show_whitespace: bool,

    /// LaTeX file replacing the built-in preamble
    pub preamble_template: Option<PathBuf>,

    /// File selection for directory input
    pub file_filter_config: FileFilterConfig,

    /// Honor `.gitignore` and `.ignore` files in directory input
    pub respect_gitignore: bool,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use code2tex::Config;
    ///
    /// let config = Config::builder()
    ///     .files(["src/main.c", "src/util.c"])
    ///     .show_whitespace(true)
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// Input files are not checked here; document generation reports the
    /// first missing one before writing anything.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No input files are given
    /// - The input directory doesn't exist
    /// - The output path is a directory
    /// - The preamble template is not a file
    pub fn validate(&self) -> Result<()> {
        match &self.input {
            Input::Files(files) if files.is_empty() => {
                return Err(Error::usage("at least one input file is required"));
            }
            Input::Files(_) => {}
            Input::Directory(dir) => {
                if !dir.is_dir() {
                    return Err(Error::config(format!(
                        "Input directory does not exist: {}",
                        dir.display()
                    )));
                }
            }
        }

        if let Some(ref output) = self.output {
            if output.is_dir() {
                return Err(Error::config(format!(
                    "Output path is a directory: {}",
                    output.display()
                )));
            }
        }

        if let Some(ref template_path) = self.preamble_template {
            if !template_path.is_file() {
                return Err(Error::config(format!(
                    "Preamble template does not exist: {}",
                    template_path.display()
                )));
            }
        }

        Ok(())
    }

    /// Returns the document options implied by this configuration.
    ///
    /// Directory input strips the directory from heading text.
    #[must_use]
    pub fn document_options(&self) -> DocumentOptions {
        DocumentOptions {
            show_whitespace: self.show_whitespace,
            root_prefix: match &self.input {
                Input::Directory(dir) => Some(dir.clone()),
                Input::Files(_) => None,
            },
            preamble_template: self.preamble_template.clone(),
        }
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    input: Option<Input>,
    output: Option<PathBuf>,
    show_whitespace: bool,
    preamble_template: Option<PathBuf>,
    file_filter_config: Option<FileFilterConfig>,
    respect_gitignore: Option<bool>,
}

impl ConfigBuilder {
    /// Lists the given files, in order.
    #[must_use]
    pub fn files<I, P>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.input = Some(Input::Files(files.into_iter().map(Into::into).collect()));
        self
    }

    /// Lists every selected file below `dir`.
    #[must_use]
    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input = Some(Input::Directory(dir.into()));
        self
    }

    /// Writes the document to `path` instead of stdout.
    #[must_use]
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Enables or disables visible whitespace in listings.
    #[must_use]
    pub fn show_whitespace(mut self, enabled: bool) -> Self {
        self.show_whitespace = enabled;
        self
    }

    /// Replaces the built-in preamble with a LaTeX file.
    ///
    /// Each `__WHITESPACE__` in the file becomes `true` or `false`.
    #[must_use]
    pub fn preamble_template(mut self, path: impl Into<PathBuf>) -> Self {
        self.preamble_template = Some(path.into());
        self
    }

    /// Sets the file selection used for directory input.
    #[must_use]
    pub fn file_filter_config(mut self, config: FileFilterConfig) -> Self {
        self.file_filter_config = Some(config);
        self
    }

    /// Enables or disables `.gitignore` handling for directory input.
    #[must_use]
    pub fn respect_gitignore(mut self, enabled: bool) -> Self {
        self.respect_gitignore = Some(enabled);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            input: self.input.unwrap_or_else(|| Input::Files(Vec::new())),
            output: self.output,
            show_whitespace: self.show_whitespace,
            preamble_template: self.preamble_template,
            file_filter_config: self.file_filter_config.unwrap_or_default(),
            respect_gitignore: self.respect_gitignore.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
