//! Pipeline orchestration: load → export → summarize.
//!
//! The three steps run sequentially with no rollback. If export fails the
//! loaded result set is discarded; if summarize fails after a successful
//! export, the CSV stays on disk.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::export;
use crate::loader;
use crate::record::ResultSet;
use crate::summary::MetricsSummary;

/// Report pipeline errors.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("cannot write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no test cases to summarize")]
    EmptyInput,

    #[error("invalid timestamp {0:?}: expected YYYY-MM-DDTHH:MM:SS")]
    TimestampFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl ReportError {
    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::MalformedInput(_) => 10,
            ReportError::Write { .. } => 20,
            ReportError::EmptyInput => 30,
            ReportError::TimestampFormat(_) => 40,
            ReportError::Io(_) => 1,
        }
    }
}

/// Result type for pipeline operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Include the rounded pass rate in the summary.
    pub include_pass_rate: bool,

    /// Include the formatted-timestamp projection in the summary.
    pub include_formatted_timestamps: bool,

    /// Progress messages on stderr.
    pub verbose: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            include_pass_rate: true,
            include_formatted_timestamps: false,
            verbose: false,
        }
    }
}

/// Report pipeline execution context.
///
/// Holds the result set from the last successful `process` call; it is
/// overwritten wholesale on each run.
pub struct ReportPipeline {
    config: PipelineConfig,
    result_set: Option<ResultSet>,
}

impl ReportPipeline {
    /// Create a new pipeline with the given configuration.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            result_set: None,
        }
    }

    /// The result set from the last successful `process` call, if any.
    pub fn result_set(&self) -> Option<&ResultSet> {
        self.result_set.as_ref()
    }

    /// Load a result set from a JSON document.
    pub fn load(&self, source: &Path) -> ReportResult<ResultSet> {
        loader::load(source)
    }

    /// Write the CSV report for a result set.
    pub fn export(&self, result_set: &ResultSet, destination: &Path) -> ReportResult<()> {
        export::export(result_set, destination)
    }

    /// Compute aggregate metrics for a result set.
    pub fn summarize(&self, result_set: &ResultSet) -> ReportResult<MetricsSummary> {
        MetricsSummary::from_result_set(
            result_set,
            self.config.include_pass_rate,
            self.config.include_formatted_timestamps,
        )
    }

    /// Run the full load → export → summarize sequence.
    pub fn process(&mut self, source: &Path, destination: &Path) -> ReportResult<MetricsSummary> {
        if self.config.verbose {
            eprintln!("Loading test results from {}...", source.display());
        }
        let result_set = self.load(source)?;

        if self.config.verbose {
            eprintln!(
                "Exporting {} record(s) to {}...",
                result_set.len(),
                destination.display()
            );
        }
        self.export(&result_set, destination)?;

        let summary = self.summarize(&result_set)?;
        self.result_set = Some(result_set);

        Ok(summary)
    }
}
