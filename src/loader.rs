//! JSON ingestion for test-result documents.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::pipeline::{ReportError, ReportResult};
use crate::record::{ResultSet, TestCaseRecord};

/// Top-level shape of the input document.
#[derive(Debug, Deserialize)]
struct ReportDocument {
    test_cases: Vec<TestCaseRecord>,
}

/// Load a result set from a JSON file.
pub fn load(source: &Path) -> ReportResult<ResultSet> {
    let data = fs::read_to_string(source)?;
    parse(&data)
}

/// Parse a result set from a JSON document.
///
/// The document must be an object with a `test_cases` array whose elements
/// carry `name`, `status`, `execution_time`, and `timestamp`. Execution
/// times must be non-negative.
pub fn parse(data: &str) -> ReportResult<ResultSet> {
    let document: ReportDocument =
        serde_json::from_str(data).map_err(|e| ReportError::MalformedInput(e.to_string()))?;

    for record in &document.test_cases {
        if record.execution_time < 0.0 {
            return Err(ReportError::MalformedInput(format!(
                "negative execution_time {} for test case {:?}",
                record.execution_time, record.name
            )));
        }
    }

    Ok(ResultSet::new(document.test_cases))
}
