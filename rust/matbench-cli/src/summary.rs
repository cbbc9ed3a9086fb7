//! Cross-implementation summary of recorded benchmark results.
//!
//! Reads every `benchmark_*_results.csv` in the results directory, derives
//! per-run statistics, and ranks implementations against the fastest average
//! at the same matrix dimension. Header lines are recognized by content, so
//! the benign duplicate-header artifact of concurrent first writers is
//! tolerated.

use crate::colors;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("cannot read results directory '{}': {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One log row with derived statistics.
#[derive(Debug, Clone)]
pub struct SummaryRow {
    pub language: String,
    pub matrix_size: usize,
    pub iterations: usize,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    /// `average / fastest-average` among rows with the same dimension;
    /// 1.0 marks the fastest implementation at that size.
    pub relative: f64,
}

/// Parsed results plus per-file warnings for anything skipped.
#[derive(Debug, Default)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
    pub warnings: Vec<String>,
}

/// Loads and summarizes every results log under `results_dir`.
pub fn load(results_dir: &Path) -> Result<Summary, SummaryError> {
    let entries = std::fs::read_dir(results_dir).map_err(|source| SummaryError::ReadDir {
        path: results_dir.to_path_buf(),
        source,
    })?;

    let mut summary = Summary::default();
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("benchmark_") && n.ends_with("_results.csv"))
        })
        .collect();
    files.sort();

    for path in files {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                summary
                    .warnings
                    .push(format!("skipping '{}': {err}", path.display()));
                continue;
            }
        };
        for (idx, line) in content.lines().enumerate() {
            if line.is_empty() || is_header(line) {
                continue;
            }
            match parse_row(line) {
                Some(row) => summary.rows.push(row),
                None => summary.warnings.push(format!(
                    "skipping malformed line {} in '{}'",
                    idx + 1,
                    path.display()
                )),
            }
        }
    }

    rank_relative(&mut summary.rows);
    summary.rows.sort_by(|a, b| {
        a.matrix_size
            .cmp(&b.matrix_size)
            .then(a.average.total_cmp(&b.average))
    });
    Ok(summary)
}

/// Header lines are identified by content, never by position.
fn is_header(line: &str) -> bool {
    line.starts_with("language,matrix_size")
}

fn parse_row(line: &str) -> Option<SummaryRow> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != 5 || fields[0].is_empty() {
        return None;
    }
    let matrix_size = fields[1].parse().ok()?;
    let iterations = fields[2].parse().ok()?;
    let times: Vec<f64> = fields[3]
        .split_whitespace()
        .map(|t| t.parse())
        .collect::<Result<_, _>>()
        .ok()?;
    let average: f64 = fields[4].parse().ok()?;
    if times.is_empty() {
        return None;
    }

    let min = times.iter().copied().fold(f64::INFINITY, f64::min);
    let max = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let variance = times.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / times.len() as f64;

    Some(SummaryRow {
        language: fields[0].to_string(),
        matrix_size,
        iterations,
        average,
        min,
        max,
        std_dev: variance.sqrt(),
        relative: 1.0,
    })
}

/// Fills in `relative` against the fastest average per dimension.
fn rank_relative(rows: &mut [SummaryRow]) {
    let mut fastest: Vec<(usize, f64)> = Vec::new();
    for row in rows.iter() {
        match fastest.iter_mut().find(|(size, _)| *size == row.matrix_size) {
            Some((_, best)) => *best = best.min(row.average),
            None => fastest.push((row.matrix_size, row.average)),
        }
    }
    for row in rows.iter_mut() {
        if let Some((_, best)) = fastest.iter().find(|(size, _)| *size == row.matrix_size) {
            if *best > 0.0 {
                row.relative = row.average / best;
            }
        }
    }
}

/// Renders the aligned comparison table.
pub fn render_table(rows: &[SummaryRow]) -> String {
    let mut out = String::new();
    out.push_str(&colors::bold(&format!(
        "{:<12} {:>8} {:>6} {:>12} {:>12} {:>12} {:>12} {:>8}\n",
        "language", "n", "iters", "avg (s)", "min (s)", "max (s)", "std (s)", "rel"
    )));
    for row in rows {
        out.push_str(&format!(
            "{:<12} {:>8} {:>6} {:>12.6} {:>12.6} {:>12.6} {:>12.6} {:>7.2}x\n",
            row.language,
            row.matrix_size,
            row.iterations,
            row.average,
            row.min,
            row.max,
            row.std_dev,
            row.relative
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let row = parse_row("C++,500,3,0.100000 0.200000 0.300000,0.200000").unwrap();
        assert_eq!(row.language, "C++");
        assert_eq!(row.matrix_size, 500);
        assert_eq!(row.iterations, 3);
        assert_eq!(row.average, 0.2);
        assert_eq!(row.min, 0.1);
        assert_eq!(row.max, 0.3);
        assert!((row.std_dev - 0.0816496580927726).abs() < 1e-12);
    }

    #[test]
    fn test_parse_row_rejects_wrong_field_count() {
        assert!(parse_row("Rust,500,3,0.1 0.2").is_none());
        assert!(parse_row("Rust,abc,3,0.1,0.1").is_none());
    }

    #[test]
    fn test_header_detected_by_content() {
        assert!(is_header(
            "language,matrix_size,iterations,individual_times,average_time"
        ));
        assert!(!is_header("Rust,500,3,0.1,0.1"));
    }

    #[test]
    fn test_relative_ranking() {
        let mut rows = vec![
            parse_row("Rust,100,1,0.100000,0.100000").unwrap(),
            parse_row("Python,100,1,0.400000,0.400000").unwrap(),
            parse_row("Go,250,1,0.300000,0.300000").unwrap(),
        ];
        rank_relative(&mut rows);
        assert_eq!(rows[0].relative, 1.0);
        assert_eq!(rows[1].relative, 4.0);
        assert_eq!(rows[2].relative, 1.0);
    }
}
