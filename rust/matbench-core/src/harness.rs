//! Trial harness: repeated timed multiplication runs.

use crate::matrix::Matrix;
use crate::multiply::{check_dimensions, multiply, MultiplyError};
use std::hint::black_box;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeasureError {
    #[error("iteration count must be at least 1")]
    InvalidIterations,
    #[error(transparent)]
    Multiply(#[from] MultiplyError),
}

/// Position within a measurement run, handed to the progress callback
/// roughly every 20% of iterations.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    /// 1-based iteration about to run.
    pub iteration: usize,
    pub total: usize,
}

impl Progress {
    /// Fraction of iterations already completed, in percent.
    pub fn percent(&self) -> f64 {
        (self.iteration - 1) as f64 / self.total as f64 * 100.0
    }
}

/// Per-iteration wall-clock durations and their exact arithmetic mean.
#[derive(Debug, Clone)]
pub struct TrialResult {
    times: Vec<f64>,
    average: f64,
}

impl TrialResult {
    /// Derives the average from an already-collected duration list.
    ///
    /// The mean is `sum / len` with no outlier trimming; every iteration
    /// counts equally in the cross-language comparison protocol.
    pub fn from_times(times: Vec<f64>) -> Self {
        let average = times.iter().sum::<f64>() / times.len() as f64;
        Self { times, average }
    }

    /// Elapsed seconds per iteration, in run order.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn average(&self) -> f64 {
        self.average
    }

    pub fn iterations(&self) -> usize {
        self.times.len()
    }
}

/// Runs the multiplication `iterations` times, timing each call.
pub fn measure(a: &Matrix, b: &Matrix, iterations: usize) -> Result<TrialResult, MeasureError> {
    measure_with_progress(a, b, iterations, |_| {})
}

/// Like [`measure`], reporting progress before every ~20% step and before
/// the final iteration.
///
/// Preconditions (a zero iteration count, mismatched or non-square
/// operands) fail before any timed work. Each product is discarded; the
/// clock is `Instant`, monotonic. There is no warm-up exclusion.
pub fn measure_with_progress(
    a: &Matrix,
    b: &Matrix,
    iterations: usize,
    mut progress: impl FnMut(Progress),
) -> Result<TrialResult, MeasureError> {
    if iterations == 0 {
        return Err(MeasureError::InvalidIterations);
    }
    check_dimensions(a, b)?;

    let step = (iterations / 5).max(1);
    let mut times = Vec::with_capacity(iterations);
    for i in 0..iterations {
        if i % step == 0 || i + 1 == iterations {
            progress(Progress {
                iteration: i + 1,
                total: iterations,
            });
        }
        let start = Instant::now();
        black_box(multiply(a, b)?);
        times.push(start.elapsed().as_secs_f64());
    }
    Ok(TrialResult::from_times(times))
}
