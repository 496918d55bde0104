//! Test-case record types.

use serde::{Deserialize, Serialize};

/// Outcome of a single test case.
///
/// Anything that is not literally "pass" or "fail" is preserved verbatim so
/// the CSV export reproduces the input, but counts as a non-pass for metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Pass,
    Fail,
    Other(String),
}

impl Status {
    /// Whether this status counts toward the passed total.
    pub fn is_pass(&self) -> bool {
        matches!(self, Status::Pass)
    }

    /// The wire form of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pass => "pass",
            Status::Fail => "fail",
            Status::Other(s) => s,
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pass" => Status::Pass,
            "fail" => Status::Fail,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

/// One parsed test execution result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCaseRecord {
    /// Test case name.
    pub name: String,

    /// Outcome ("pass", "fail", or any other status string).
    pub status: Status,

    /// Wall-clock duration in seconds. Never negative.
    pub execution_time: f64,

    /// When the test ran, as `YYYY-MM-DDTHH:MM:SS`. Kept verbatim so the
    /// export reproduces the input byte-for-byte.
    pub timestamp: String,
}

/// The full ordered collection of records for one run.
///
/// Order is input order and is preserved through export and metric
/// derivation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub records: Vec<TestCaseRecord>,
}

impl ResultSet {
    /// Create a result set from records in input order.
    pub fn new(records: Vec<TestCaseRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TestCaseRecord> {
        self.records.iter()
    }
}
