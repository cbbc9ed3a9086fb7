//! Naive dense matrix multiplication.
//!
//! The triple loop in row-major i, j, k order is the whole point of the
//! benchmark: every implementation in the comparison set runs exactly this
//! access pattern with plain f64 accumulation. No blocking, no transposition,
//! no parallelism, no compensated summation.

use crate::matrix::Matrix;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MultiplyError {
    #[error("{side} matrix is not square ({rows} rows)")]
    NotSquare { side: &'static str, rows: usize },
    #[error("dimension mismatch: {left}x{left} vs {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },
}

/// Checks that both operands are square and equally sized, returning the
/// shared dimension.
pub fn check_dimensions(a: &Matrix, b: &Matrix) -> Result<usize, MultiplyError> {
    let n = a.dimension().ok_or(MultiplyError::NotSquare {
        side: "left",
        rows: a.row_count(),
    })?;
    let m = b.dimension().ok_or(MultiplyError::NotSquare {
        side: "right",
        rows: b.row_count(),
    })?;
    if n != m {
        return Err(MultiplyError::DimensionMismatch { left: n, right: m });
    }
    Ok(n)
}

/// Computes `C[i][j] = sum_k A[i][k] * B[k][j]`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, MultiplyError> {
    let n = check_dimensions(a, b)?;
    let a = a.rows();
    let b = b.rows();

    let mut c = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in 0..n {
            let mut sum = 0.0;
            for k in 0..n {
                sum += a[i][k] * b[k][j];
            }
            c[i][j] = sum;
        }
    }
    Ok(Matrix::from_rows(c))
}
