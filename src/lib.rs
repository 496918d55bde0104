//! trx-report - test-result report pipeline
//!
//! Reads a batch of test-execution records from a JSON document, exports
//! them to a CSV report, and derives aggregate metrics (pass/fail counts,
//! timing extremes, formatted timestamps) from the same in-memory set.

pub mod export;
pub mod loader;
pub mod pipeline;
pub mod record;
pub mod summary;

pub use pipeline::{PipelineConfig, ReportError, ReportPipeline, ReportResult};
pub use record::{ResultSet, Status, TestCaseRecord};
pub use summary::MetricsSummary;
