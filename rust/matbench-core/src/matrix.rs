//! Dense row-major matrix of `f64` values.

use serde::{Deserialize, Serialize};

/// A matrix stored as ordered rows of `f64`.
///
/// Constructed once (by the scanner or a generator) and read-only afterwards.
/// Rows are not forced to share a length at construction time; shape checks
/// happen where squareness actually matters, in the multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix {
    rows: Vec<Vec<f64>>,
}

impl Matrix {
    /// Wraps parsed rows without any shape validation.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    /// An `n` x `n` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            rows: vec![vec![0.0; n]; n],
        }
    }

    /// The `n` x `n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut rows = vec![vec![0.0; n]; n];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Side length, iff the matrix is rectangular and square.
    pub fn dimension(&self) -> Option<usize> {
        let n = self.rows.len();
        self.rows.iter().all(|row| row.len() == n).then_some(n)
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}
