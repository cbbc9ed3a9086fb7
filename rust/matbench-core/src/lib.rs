//! Matbench Core
//!
//! Matrix scanning, naive multiplication, and timing primitives for the
//! cross-language matrix multiplication benchmark.

pub mod harness;
pub mod matrix;
pub mod multiply;
pub mod results;
pub mod scanner;

pub use harness::{measure, measure_with_progress, TrialResult};
pub use matrix::Matrix;
pub use multiply::multiply;
pub use results::ResultRecord;

use thiserror::Error;

/// Any error the benchmark pipeline can produce.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("scan error: {0}")]
    Scan(#[from] scanner::ScanError),
    #[error("multiply error: {0}")]
    Multiply(#[from] multiply::MultiplyError),
    #[error("measure error: {0}")]
    Measure(#[from] harness::MeasureError),
    #[error("log error: {0}")]
    Log(#[from] results::LogError),
}
