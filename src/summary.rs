//! Aggregate metrics over a result set.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pipeline::{ReportError, ReportResult};
use crate::record::ResultSet;

/// Input timestamp pattern (`2024-01-01T10:00:00`).
pub const TIMESTAMP_INPUT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Display pattern for the formatted-timestamp projection.
pub const TIMESTAMP_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Aggregate statistics derived from a result set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    /// Total records in the set.
    pub total: usize,

    /// Count of records with status "pass".
    pub passed: usize,

    /// Count of all other records. `passed + failed == total`.
    pub failed: usize,

    /// Percentage of passed records, rounded to 2 decimals. Present when
    /// the pipeline is configured to include it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pass_rate: Option<f64>,

    /// Mean execution time in seconds, rounded to 2 decimals.
    pub avg_time: f64,

    /// Shortest execution time in seconds.
    pub min_time: f64,

    /// Longest execution time in seconds.
    pub max_time: f64,

    /// Timestamps re-rendered for display, parallel to record order.
    /// Present when the pipeline is configured to include them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_timestamps: Option<Vec<String>>,
}

impl MetricsSummary {
    /// Compute aggregate metrics from a result set.
    ///
    /// Fails with `EmptyInput` when the set has zero records, since the
    /// timing aggregates are undefined over an empty set.
    pub fn from_result_set(
        result_set: &ResultSet,
        include_pass_rate: bool,
        include_formatted_timestamps: bool,
    ) -> ReportResult<Self> {
        if result_set.is_empty() {
            return Err(ReportError::EmptyInput);
        }

        let total = result_set.len();
        let passed = result_set.iter().filter(|r| r.status.is_pass()).count();
        let failed = total - passed;

        let times: Vec<f64> = result_set.iter().map(|r| r.execution_time).collect();
        let avg_time = round2(times.iter().sum::<f64>() / total as f64);
        let min_time = times.iter().copied().fold(f64::INFINITY, f64::min);
        let max_time = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let pass_rate = if include_pass_rate {
            Some(round2(passed as f64 / total as f64 * 100.0))
        } else {
            None
        };

        let formatted_timestamps = if include_formatted_timestamps {
            Some(format_timestamps(result_set)?)
        } else {
            None
        };

        Ok(Self {
            total,
            passed,
            failed,
            pass_rate,
            avg_time,
            min_time,
            max_time,
            formatted_timestamps,
        })
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Render as the key/value listing printed by the CLI.
    pub fn to_key_values(&self) -> Vec<(String, String)> {
        let mut entries = vec![
            ("Total Test Cases".to_string(), self.total.to_string()),
            ("Passed Test Cases".to_string(), self.passed.to_string()),
            ("Failed Test Cases".to_string(), self.failed.to_string()),
        ];
        if let Some(rate) = self.pass_rate {
            entries.push(("Pass Rate (%)".to_string(), rate.to_string()));
        }
        entries.push((
            "Average Execution Time".to_string(),
            self.avg_time.to_string(),
        ));
        entries.push(("Min Execution Time".to_string(), self.min_time.to_string()));
        entries.push(("Max Execution Time".to_string(), self.max_time.to_string()));
        if let Some(ref timestamps) = self.formatted_timestamps {
            entries.push(("Formatted Timestamps".to_string(), timestamps.join(", ")));
        }
        entries
    }
}

/// Re-render each record's timestamp from the T-separated input form to the
/// space-separated display form. Pure reformatting: the calendar instant is
/// unchanged.
pub fn format_timestamps(result_set: &ResultSet) -> ReportResult<Vec<String>> {
    result_set
        .iter()
        .map(|record| {
            NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_INPUT_FORMAT)
                .map(|dt| dt.format(TIMESTAMP_DISPLAY_FORMAT).to_string())
                .map_err(|_| ReportError::TimestampFormat(record.timestamp.clone()))
        })
        .collect()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Status, TestCaseRecord};

    fn make_record(name: &str, status: Status, execution_time: f64, timestamp: &str) -> TestCaseRecord {
        TestCaseRecord {
            name: name.to_string(),
            status,
            execution_time,
            timestamp: timestamp.to_string(),
        }
    }

    fn two_record_set() -> ResultSet {
        ResultSet::new(vec![
            make_record("t1", Status::Pass, 1.5, "2024-01-01T10:00:00"),
            make_record("t2", Status::Fail, 2.5, "2024-01-01T10:01:00"),
        ])
    }

    #[test]
    fn test_two_record_scenario() {
        let summary = MetricsSummary::from_result_set(&two_record_set(), true, false).unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.pass_rate, Some(50.0));
        assert_eq!(summary.avg_time, 2.0);
        assert_eq!(summary.min_time, 1.5);
        assert_eq!(summary.max_time, 2.5);
        assert!(summary.formatted_timestamps.is_none());
    }

    #[test]
    fn test_empty_set_is_an_error() {
        let err = MetricsSummary::from_result_set(&ResultSet::default(), true, false).unwrap_err();
        assert!(matches!(err, ReportError::EmptyInput));
    }

    #[test]
    fn test_non_pass_status_counts_as_failed() {
        let set = ResultSet::new(vec![
            make_record("t1", Status::Pass, 1.0, "2024-01-01T10:00:00"),
            make_record("t2", Status::Other("skipped".to_string()), 1.0, "2024-01-01T10:01:00"),
            make_record("t3", Status::Other("error".to_string()), 1.0, "2024-01-01T10:02:00"),
        ]);
        let summary = MetricsSummary::from_result_set(&set, true, false).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.passed + summary.failed, summary.total);
    }

    #[test]
    fn test_pass_rate_bounds_and_rounding() {
        let set = ResultSet::new(vec![
            make_record("t1", Status::Pass, 1.0, "2024-01-01T10:00:00"),
            make_record("t2", Status::Pass, 1.0, "2024-01-01T10:01:00"),
            make_record("t3", Status::Fail, 1.0, "2024-01-01T10:02:00"),
        ]);
        let summary = MetricsSummary::from_result_set(&set, true, false).unwrap();

        // 2/3 * 100 = 66.666... rounds to 66.67
        assert_eq!(summary.pass_rate, Some(66.67));
    }

    #[test]
    fn test_min_avg_max_ordering() {
        let set = ResultSet::new(vec![
            make_record("t1", Status::Pass, 0.2, "2024-01-01T10:00:00"),
            make_record("t2", Status::Pass, 3.7, "2024-01-01T10:01:00"),
            make_record("t3", Status::Fail, 1.1, "2024-01-01T10:02:00"),
        ]);
        let summary = MetricsSummary::from_result_set(&set, false, false).unwrap();

        assert_eq!(summary.min_time, 0.2);
        assert_eq!(summary.max_time, 3.7);
        // Rounding keeps the mean within half a cent of the true value.
        assert!(summary.min_time <= summary.avg_time + 0.005);
        assert!(summary.avg_time <= summary.max_time + 0.005);
        assert!(summary.pass_rate.is_none());
    }

    #[test]
    fn test_formatted_timestamps_projection() {
        let summary = MetricsSummary::from_result_set(&two_record_set(), true, true).unwrap();

        assert_eq!(
            summary.formatted_timestamps,
            Some(vec![
                "2024-01-01 10:00:00".to_string(),
                "2024-01-01 10:01:00".to_string(),
            ])
        );
    }

    #[test]
    fn test_formatted_timestamp_is_pure_reformatting() {
        let set = two_record_set();
        let formatted = format_timestamps(&set).unwrap();

        for (record, display) in set.iter().zip(&formatted) {
            let original =
                NaiveDateTime::parse_from_str(&record.timestamp, TIMESTAMP_INPUT_FORMAT).unwrap();
            let recovered =
                NaiveDateTime::parse_from_str(display, TIMESTAMP_DISPLAY_FORMAT).unwrap();
            assert_eq!(original, recovered);
        }
    }

    #[test]
    fn test_invalid_timestamp_fails_projection() {
        let set = ResultSet::new(vec![make_record(
            "t1",
            Status::Pass,
            1.0,
            "01/01/2024 10:00",
        )]);
        let err = MetricsSummary::from_result_set(&set, true, true).unwrap_err();
        match err {
            ReportError::TimestampFormat(ts) => assert_eq!(ts, "01/01/2024 10:00"),
            other => panic!("expected TimestampFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_timestamp_ignored_without_projection() {
        let set = ResultSet::new(vec![make_record(
            "t1",
            Status::Pass,
            1.0,
            "01/01/2024 10:00",
        )]);
        assert!(MetricsSummary::from_result_set(&set, true, false).is_ok());
    }

    #[test]
    fn test_json_serialization_skips_absent_optionals() {
        let summary = MetricsSummary::from_result_set(&two_record_set(), false, false).unwrap();
        let json = summary.to_json().unwrap();

        assert!(json.contains("\"total\": 2"));
        assert!(!json.contains("pass_rate"));
        assert!(!json.contains("formatted_timestamps"));
    }

    #[test]
    fn test_key_values_listing() {
        let summary = MetricsSummary::from_result_set(&two_record_set(), true, true).unwrap();
        let entries = summary.to_key_values();

        assert_eq!(entries[0], ("Total Test Cases".to_string(), "2".to_string()));
        assert_eq!(entries[1], ("Passed Test Cases".to_string(), "1".to_string()));
        assert_eq!(entries[2], ("Failed Test Cases".to_string(), "1".to_string()));
        assert_eq!(entries[3], ("Pass Rate (%)".to_string(), "50".to_string()));
        assert!(entries
            .iter()
            .any(|(k, v)| k == "Formatted Timestamps" && v.contains("2024-01-01 10:00:00")));
    }
}
