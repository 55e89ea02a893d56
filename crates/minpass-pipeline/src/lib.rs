//! # minpass-pipeline
//!
//! Production build orchestration followed by a second, more aggressive
//! minification pass over every emitted script artifact.
//!
//! The pipeline has two stages that always run in this order:
//!
//! 1. [`Orchestrator`] invokes a [`Bundler`] exactly once and keeps the emitted
//!    `.js` artifacts, in emission order.
//! 2. [`Driver`] reads each artifact, runs it through a [`Minify`]
//!    implementation, overwrites it in place and reports raw and brotli sizes
//!    through a [`ProgressSink`].
//!
//! The shipped collaborators are [`RolldownBundler`], [`OxcMinifier`] (oxc
//! compression, identifier mangling and a property-mangling pass) and
//! [`BrotliEstimator`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minpass_pipeline::{BundleConfig, MinifyOptions, MinifyPreset, Pipeline, StdoutSink};
//!
//! # async fn example() -> minpass_pipeline::Result<()> {
//! let bundle = BundleConfig::new(["src/main.js"], "dist");
//! let options = MinifyOptions::preset(MinifyPreset::Current);
//!
//! let pipeline = Pipeline::with_defaults(bundle, options)?;
//! let summary = pipeline.run(&mut StdoutSink::default()).await?;
//! println!("minified {} artifacts", summary.processed());
//! # Ok(()) }
//! ```

pub mod config;
pub mod driver;
pub mod mangle;
pub mod minify;
pub mod orchestrator;
pub mod pipeline;
pub mod report;
pub mod rolldown_bundler;
pub mod size;
pub mod writer;

pub use config::{
    BundleConfig, ConcurrencyMode, EcmaVersion, FailurePolicy, MinifyOptions, MinifyPreset,
    OutputFormat, Platform, PropertyMangleOptions,
};
pub use driver::{ArtifactFailure, Driver, DriverSummary};
pub use mangle::{NameCache, PropertyManglePolicy, SharedNameCache};
pub use minify::{Minify, OxcMinifier};
pub use orchestrator::{ArtifactKind, Bundler, Orchestrator, OutputArtifact, is_script_artifact};
pub use pipeline::{Pipeline, load_name_cache};
pub use report::{ArtifactReport, ProgressSink, SizeReport, StdoutSink, format_size};
pub use rolldown_bundler::RolldownBundler;
pub use size::{BrotliEstimator, SizeEstimator};

/// Error types for pipeline operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The bundler rejected the build.
    #[error("Bundler error: {0}")]
    Bundler(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// The minifier could not process an artifact.
    #[error("Failed to minify {file}: {message}")]
    Minify { file: String, message: String },

    /// Compressed-size estimation failed.
    #[error("Compression estimate failed: {0}")]
    Compression(String),

    /// A failure while processing one artifact, tagged with its name.
    #[error("{file}: {source}")]
    Artifact {
        file: String,
        #[source]
        source: Box<Error>,
    },

    /// A worker task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(String),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error batch.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(format!("{error:?}"))
    }

    /// Attach the artifact name to an error, unless it already carries one.
    pub fn for_artifact(self, file: impl Into<String>) -> Self {
        match self {
            Error::Artifact { .. } | Error::Minify { .. } => self,
            other => Error::Artifact {
                file: file.into(),
                source: Box::new(other),
            },
        }
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::Minify { .. } => "MINIFY_ERROR",
            Error::Compression(_) => "COMPRESSION_ERROR",
            Error::Artifact { .. } => "ARTIFACT_ERROR",
            Error::Task(_) => "TASK_ERROR",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::Bundler(_) => Some(Box::new(
                "The build failed before any minification started. Fix the source and re-run.",
            )),
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check your configuration file for syntax errors.\nError: {}",
                msg
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Artifact names must stay inside the output directory.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::Minify { .. } => Some(Box::new(
                "The artifact could not be parsed. Check that the bundler emitted valid JavaScript.",
            )),
            _ => None,
        }
    }
}
