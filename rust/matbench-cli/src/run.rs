//! Benchmark orchestration: load matrices, measure, report, log.
//!
//! The measured timings are the primary output; they are printed before the
//! results log is touched, so a logging failure can never cost the user a
//! completed measurement. Logging problems surface as a warning and the run
//! still succeeds.

use crate::colors;
use matbench_core::harness::{measure_with_progress, MeasureError};
use matbench_core::results::{self, ResultRecord};
use matbench_core::scanner::{self, ScanError, ScanOutput};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Report rendering for a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    /// Lenient parse: anything that is not `json` renders as text.
    pub fn from_arg(arg: &str) -> Self {
        match arg {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Fully-resolved inputs for one benchmark run (flags over config file over
/// defaults, resolved by the caller).
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub dimension: usize,
    pub iterations: usize,
    pub label: String,
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
    pub format: OutputFormat,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("data file '{}' does not exist", .0.display())]
    MissingDataFile(PathBuf),
    #[error("cannot read '{}': {source}", .path.display())]
    UnreadableDataFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed matrix in '{}': {source}", .path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },
    #[error(transparent)]
    Measure(#[from] MeasureError),
    #[error("cannot render report: {0}")]
    Render(#[from] serde_json::Error),
}

/// The dataset path for one operand, e.g. `data/matrix_A_500.json`.
pub fn matrix_path(data_dir: &Path, operand: char, dimension: usize) -> PathBuf {
    data_dir.join(format!("matrix_{operand}_{dimension}.json"))
}

/// The per-label log path, e.g. `results/benchmark_rust_results.csv`.
pub fn log_path(results_dir: &Path, label: &str) -> PathBuf {
    results_dir.join(format!("benchmark_{}_results.csv", label.to_lowercase()))
}

fn load_matrix(path: &Path) -> Result<ScanOutput, RunError> {
    if !path.exists() {
        return Err(RunError::MissingDataFile(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path).map_err(|source| RunError::UnreadableDataFile {
        path: path.to_path_buf(),
        source,
    })?;
    let out = scanner::parse(&text).map_err(|source| RunError::Scan {
        path: path.to_path_buf(),
        source,
    })?;
    for warning in &out.warnings {
        eprintln!(
            "{} {} in '{}'",
            colors::yellow("warning:"),
            warning,
            path.display()
        );
    }
    Ok(out)
}

/// Runs the benchmark described by `opts` to completion.
pub fn execute(opts: &RunOptions) -> Result<(), RunError> {
    let a_path = matrix_path(&opts.data_dir, 'A', opts.dimension);
    let b_path = matrix_path(&opts.data_dir, 'B', opts.dimension);

    println!(
        "Loading matrices of dimension {} from the dataset...",
        opts.dimension
    );
    let a = load_matrix(&a_path)?.matrix;
    let b = load_matrix(&b_path)?.matrix;

    println!("Running benchmark with {} iterations...", opts.iterations);
    let trial = measure_with_progress(&a, &b, opts.iterations, |p| {
        println!(
            "Progress: iteration {}/{} ({:.1}%)",
            p.iteration,
            p.total,
            p.percent()
        );
    })?;

    let record = ResultRecord::new(opts.label.clone(), opts.dimension, &trial);
    match opts.format {
        OutputFormat::Text => {
            println!("Per-iteration times (seconds):");
            for t in trial.times() {
                println!("{t:.6}");
            }
            println!(
                "Average time: {} seconds",
                colors::bold(&format!("{:.6}", trial.average()))
            );
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }

    let log = log_path(&opts.results_dir, &opts.label);
    match results::append(&record, &log) {
        Ok(()) => println!(
            "{} results recorded in '{}'",
            colors::green("ok:"),
            log.display()
        ),
        // Timings are already on screen; a log failure must not fail the run.
        Err(err) => eprintln!("{} {}", colors::yellow("warning:"), err),
    }
    Ok(())
}
