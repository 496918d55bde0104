//! CSV export of a result set.

use std::fs;
use std::path::Path;

use crate::pipeline::{ReportError, ReportResult};
use crate::record::ResultSet;

/// Literal CSV header. Column order is fixed.
pub const CSV_HEADER: &str = "Test Case Name,Status,Execution Time,Timestamp";

/// Render a result set as a CSV document: header plus one row per record,
/// in input order. Execution times are rendered in their natural numeric
/// form (`1.5`, not `1.50`); all other values are taken verbatim.
pub fn to_csv(result_set: &ResultSet) -> String {
    let mut output = String::new();
    output.push_str(CSV_HEADER);
    output.push('\n');

    for record in result_set.iter() {
        output.push_str(&csv_escape(&record.name));
        output.push(',');
        output.push_str(&csv_escape(record.status.as_str()));
        output.push(',');
        output.push_str(&record.execution_time.to_string());
        output.push(',');
        output.push_str(&csv_escape(&record.timestamp));
        output.push('\n');
    }

    output
}

/// Write the CSV report, replacing any existing file at `destination`.
pub fn export(result_set: &ResultSet, destination: &Path) -> ReportResult<()> {
    fs::write(destination, to_csv(result_set)).map_err(|source| ReportError::Write {
        path: destination.to_path_buf(),
        source,
    })
}

/// Escape a field per RFC 4180: quote when it contains a comma, quote,
/// or newline, doubling embedded quotes.
fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
