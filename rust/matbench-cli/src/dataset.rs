//! Seeded dataset generation for reproducible benchmark inputs.
//!
//! Every implementation in the comparison set loads the same
//! `matrix_A_<n>.json` / `matrix_B_<n>.json` files, so generation is
//! deterministic: a fixed seed always produces byte-identical datasets.

use matbench_core::matrix::Matrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Dimensions generated when none are requested.
pub const DEFAULT_SIZES: &[usize] = &[100, 250, 500];
/// Base seed for matrix A; matrix B uses the base seed plus one.
pub const DEFAULT_SEED: u64 = 42;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot serialize matrix: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// An `n` x `n` matrix of uniform values in `[0, 100)`.
pub fn random_matrix(n: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let rows = (0..n)
        .map(|_| (0..n).map(|_| rng.gen_range(0.0..100.0)).collect())
        .collect();
    Matrix::from_rows(rows)
}

/// Generates the A/B dataset pair for every requested dimension, returning
/// the written paths in order.
pub fn generate(sizes: &[usize], seed: u64, data_dir: &Path) -> Result<Vec<PathBuf>, DatasetError> {
    std::fs::create_dir_all(data_dir).map_err(|source| DatasetError::Write {
        path: data_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for &n in sizes {
        let a = random_matrix(n, seed);
        let b = random_matrix(n, seed + 1);
        for (operand, matrix) in [('A', &a), ('B', &b)] {
            let path = data_dir.join(format!("matrix_{operand}_{n}.json"));
            write_matrix(matrix, &path)?;
            written.push(path);
        }
    }
    Ok(written)
}

fn write_matrix(matrix: &Matrix, path: &Path) -> Result<(), DatasetError> {
    let json = serde_json::to_string(matrix)?;
    std::fs::write(path, json).map_err(|source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    })
}
