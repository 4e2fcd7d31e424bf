use crate::{
    config::{Config, Input},
    document::{generate_document, DocumentStats},
    error::Result,
    scanner::Scanner,
    writer::write_file_atomic,
};
use serde::Serialize;
use std::{
    io::{self, BufWriter},
    path::PathBuf,
    time::{Duration, Instant},
};
use tracing::{info, instrument};

/// Statistics collected during pipeline execution.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineStats {
    /// Number of files listed in the document
    pub total_files: usize,

    /// Counts from document generation
    pub document: DocumentStats,

    /// Total execution time
    pub duration: Duration,

    /// Time spent collecting files
    pub scan_duration: Duration,

    /// Output file, or `None` for stdout
    pub output: Option<PathBuf>,
}

impl PipelineStats {
    /// Logs a one-line summary.
    pub fn log_summary(&self) {
        let target = self
            .output
            .as_ref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());

        info!(
            "Listed {} files ({} headings, {} without a language) to {} in {:.2}s",
            self.total_files,
            self.document.headings,
            self.document.unresolved_languages,
            target,
            self.duration.as_secs_f64()
        );
    }
}

/// Where the pipeline gets its ordered file list.
enum FileSource {
    Listed(Vec<PathBuf>),
    Scanned(Scanner),
}

/// Orchestrates file collection and document generation.
pub struct Pipeline {
    config: Config,
    source: FileSource,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails or the file filter
    /// does not compile.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let source = match &config.input {
            Input::Directory(dir) => FileSource::Scanned(
                Scanner::new(dir, &config.file_filter_config, config.respect_gitignore)?
                    .skip_path(config.output.as_deref()),
            ),
            Input::Files(files) => FileSource::Listed(files.clone()),
        };

        Ok(Self { config, source })
    }

    /// Executes the pipeline and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Collect**: takes the explicit files, or walks the directory
    /// 2. **Generate**: validates every file, then renders the document
    /// 3. **Write**: streams to stdout, or replaces the output file atomically
    ///
    /// # Errors
    ///
    /// Returns an error if an input file is missing, the directory yields no
    /// files, or rendering and writing fail.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use code2tex::{Config, Pipeline};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .directory("./src")
    ///     .output("listing.tex")
    ///     .build()?;
    ///
    /// let stats = Pipeline::new(config)?.run()?;
    /// stats.log_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub fn run(self) -> Result<PipelineStats> {
        let start_time = Instant::now();

        let files = self.collect()?;
        let scan_duration = start_time.elapsed();
        info!("Collected {} files", files.len());

        let options = self.config.document_options();
        let document = match &self.config.output {
            Some(path) => {
                let mut buffer = Vec::new();
                let stats = generate_document(&files, &options, &mut buffer)?;
                write_file_atomic(path, &buffer)?;
                info!("Wrote {} bytes to {}", buffer.len(), path.display());
                stats
            }
            None => {
                let stdout = io::stdout();
                generate_document(&files, &options, BufWriter::new(stdout.lock()))?
            }
        };

        Ok(PipelineStats {
            total_files: files.len(),
            document,
            duration: start_time.elapsed(),
            scan_duration,
            output: self.config.output.clone(),
        })
    }

    /// Resolves the configured input into an ordered file list.
    fn collect(&self) -> Result<Vec<PathBuf>> {
        match &self.source {
            FileSource::Listed(files) => Ok(files.clone()),
            FileSource::Scanned(scanner) => scanner.scan(),
        }
    }
}
