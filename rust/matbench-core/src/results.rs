//! Append-only CSV results log shared across benchmark implementations.
//!
//! Every implementation in the comparison set (whatever its language)
//! appends rows in this exact schema, so field order, delimiter, header
//! text, and the 6-decimal fixed precision are a cross-process contract.
//! The log only ever grows; prior rows are never read or rewritten here.

use crate::harness::TrialResult;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header line of the shared results log.
pub const CSV_HEADER: &str = "language,matrix_size,iterations,individual_times,average_time";

#[derive(Debug, Error)]
#[error("cannot write results log '{}': {source}", .path.display())]
pub struct LogError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// One persisted benchmark outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    pub language: String,
    pub matrix_size: usize,
    pub iterations: usize,
    pub individual_times: Vec<f64>,
    pub average_time: f64,
}

impl ResultRecord {
    pub fn new(language: impl Into<String>, matrix_size: usize, trial: &TrialResult) -> Self {
        Self {
            language: language.into(),
            matrix_size,
            iterations: trial.iterations(),
            individual_times: trial.times().to_vec(),
            average_time: trial.average(),
        }
    }

    /// The record as one CSV data row (no trailing newline). Durations are
    /// fixed at 6 fractional digits so logs diff cleanly across
    /// implementations.
    pub fn to_csv_row(&self) -> String {
        let times = self
            .individual_times
            .iter()
            .map(|t| format!("{t:.6}"))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{},{},{},{},{:.6}",
            self.language, self.matrix_size, self.iterations, times, self.average_time
        )
    }
}

/// Appends one record to the log at `path`, creating the parent directory
/// and the header line on first write.
///
/// The header check and the write are not synchronized against concurrent
/// first-writers; two processes may both see a missing file and both emit a
/// header. The duplicated header stays line-parseable and is accepted. What
/// is guaranteed is row atomicity: the payload goes out as a single write on
/// an append-mode handle, so concurrent appenders cannot interleave partial
/// lines.
pub fn append(record: &ResultRecord, path: &Path) -> Result<(), LogError> {
    let log_err = |source| LogError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(log_err)?;
        }
    }

    let is_new = !path.exists();
    let mut payload = String::new();
    if is_new {
        payload.push_str(CSV_HEADER);
        payload.push('\n');
    }
    payload.push_str(&record.to_csv_row());
    payload.push('\n');

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_err)?;
    file.write_all(payload.as_bytes()).map_err(log_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(language: &str, times: Vec<f64>) -> ResultRecord {
        ResultRecord::new(language, 2, &TrialResult::from_times(times))
    }

    #[test]
    fn test_csv_row_fixed_precision() {
        let r = record("Rust", vec![0.1234567, 0.2]);
        assert_eq!(r.to_csv_row(), "Rust,2,2,0.123457 0.200000,0.161728");
    }

    #[test]
    fn test_csv_row_single_time_has_no_separator() {
        let r = record("Rust", vec![1.0]);
        assert_eq!(r.to_csv_row(), "Rust,2,1,1.000000,1.000000");
    }

    #[test]
    fn test_append_writes_header_once() {
        let dir = std::env::temp_dir().join("matbench_test_results_header");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("benchmark_rust_results.csv");

        append(&record("Rust", vec![0.5]), &path).unwrap();
        append(&record("Rust", vec![0.25, 0.75]), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "Rust,2,1,0.500000,0.500000");
        assert_eq!(lines[2], "Rust,2,2,0.250000 0.750000,0.500000");
        for line in &lines[1..] {
            assert_eq!(line.split(',').count(), 5);
        }
    }

    #[test]
    fn test_append_creates_parent_directory() {
        let dir = std::env::temp_dir().join("matbench_test_results_mkdir");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("nested").join("results.csv");

        append(&record("Rust", vec![0.5]), &path).unwrap();
        assert!(path.exists());
    }
}
