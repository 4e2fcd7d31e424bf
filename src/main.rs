use anyhow::Context;
use clap::{ArgGroup, Parser};
use code2tex::{Config, FileFilterConfig, FilterPreset, Pipeline};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "code2tex",
    version,
    about = "Typeset source files as a single LaTeX listing document",
    long_about = "Typeset source files as a single LaTeX listing document.\n\n\
    The document is written to stdout unless --output is given. Languages for \
    syntax highlighting are picked from file extensions; the LaTeX listings \
    package does the highlighting when the document is compiled.\n\n\
    USAGE EXAMPLES:\n  \
      # List a few files\n  \
      code2tex main.py util.py > listing.tex\n\n  \
      # Show whitespace as visible glyphs\n  \
      code2tex -s Makefile build.sh > listing.tex\n\n  \
      # List every Python file below a directory\n  \
      code2tex --dir ./project --ext py -o project.tex"
)]
#[command(group(ArgGroup::new("input").required(true).args(["files", "dir"])))]
struct Cli {
    /// Files to list, in order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Collect files recursively from a directory instead
    #[arg(short, long, value_name = "PATH")]
    dir: Option<PathBuf>,

    /// Render spaces and tabs in listings as visible characters
    #[arg(short, long)]
    show_whitespace: bool,

    /// Write the document to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// LaTeX file replacing the built-in preamble
    ///
    /// Each `__WHITESPACE__` in the file becomes true or false.
    #[arg(long, value_name = "FILE")]
    preamble: Option<PathBuf>,

    /// Only list files with this extension (repeatable, --dir only)
    #[arg(short, long = "ext", value_name = "EXT", requires = "dir")]
    extensions: Vec<String>,

    /// Skip directories with this name at any depth (repeatable, --dir only)
    #[arg(short = 'x', long = "exclude-dir", value_name = "NAME", requires = "dir")]
    exclude_dirs: Vec<String>,

    /// Skip files matching this glob, relative to --dir (repeatable)
    #[arg(long = "exclude", value_name = "GLOB", requires = "dir")]
    exclude_globs: Vec<String>,

    /// Filter preset for common trees (--dir only)
    #[arg(short, long, value_enum, requires = "dir")]
    preset: Option<CliPreset>,

    /// Do not honor .gitignore files (--dir only)
    #[arg(long, requires = "dir")]
    no_gitignore: bool,

    /// Verbose output on stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliPreset {
    /// Python sources only
    Python,
    /// Python sources without kernel_tests, keras and debug directories
    Tensorflow,
}

impl From<CliPreset> for FilterPreset {
    fn from(p: CliPreset) -> Self {
        match p {
            CliPreset::Python => Self::Python,
            CliPreset::Tensorflow => Self::Tensorflow,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let filter_config = cli
        .preset
        .map(|preset| FilterPreset::from(preset).config())
        .unwrap_or_default()
        .merge(
            FileFilterConfig::new()
                .include_extensions(cli.extensions)
                .exclude_directory_segments(cli.exclude_dirs)
                .exclude_files(cli.exclude_globs),
        );

    let mut builder = Config::builder()
        .show_whitespace(cli.show_whitespace)
        .file_filter_config(filter_config)
        .respect_gitignore(!cli.no_gitignore);

    builder = match cli.dir {
        Some(dir) => builder.directory(dir),
        None => builder.files(cli.files),
    };

    if let Some(output) = cli.output {
        builder = builder.output(output);
    }

    if let Some(preamble) = cli.preamble {
        builder = builder.preamble_template(preamble);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let stats = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run()
        .context("Document generation failed")?;

    stats.log_summary();

    Ok(())
}

fn setup_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::new("code2tex=warn"),
        1 => EnvFilter::new("code2tex=info"),
        2 => EnvFilter::new("code2tex=debug"),
        _ => EnvFilter::new("code2tex=trace"),
    };

    // stdout carries the document
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false),
        )
        .init();
}
