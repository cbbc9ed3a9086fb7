//! Configuration file parsing for `matbench.toml`.
//!
//! Searches the current directory then ancestors, falling back to built-in
//! defaults when no file is found. Command-line flags override whatever the
//! file provides; the defaults here are the only place the process-wide
//! dimension and iteration counts live.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default dimension of the square matrices.
fn default_dimension() -> usize {
    500
}

/// Default number of timed iterations.
fn default_iterations() -> usize {
    10
}

/// Label recorded in the shared results log.
fn default_label() -> String {
    "Rust".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

#[derive(Debug, Deserialize, Serialize, Default, Clone)]
pub struct MatbenchConfig {
    #[serde(default)]
    pub benchmark: BenchmarkSection,
    #[serde(default)]
    pub paths: PathsSection,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct BenchmarkSection {
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for BenchmarkSection {
    fn default() -> Self {
        Self {
            dimension: default_dimension(),
            iterations: default_iterations(),
            label: default_label(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PathsSection {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
}

impl Default for PathsSection {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            results_dir: default_results_dir(),
        }
    }
}

impl MatbenchConfig {
    /// Load config from `matbench.toml`, searching current dir then parents.
    /// Returns `Default` when no file is found.
    pub fn load() -> Self {
        Self::find_and_load()
            .map(|(_path, cfg)| cfg)
            .unwrap_or_default()
    }

    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e))?;
        toml::from_str(&content).map_err(|e| format!("invalid toml in '{}': {}", path.display(), e))
    }

    fn find_and_load() -> Option<(PathBuf, Self)> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join("matbench.toml");
            if config_path.exists() {
                let content = std::fs::read_to_string(&config_path).ok()?;
                let cfg: Self = toml::from_str(&content).ok()?;
                return Some((config_path, cfg));
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Parse a TOML string directly (useful for testing and embedding).
    pub fn from_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = MatbenchConfig::default();
        assert_eq!(cfg.benchmark.dimension, 500);
        assert_eq!(cfg.benchmark.iterations, 10);
        assert_eq!(cfg.benchmark.label, "Rust");
        assert_eq!(cfg.paths.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.paths.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_partial_file_keeps_remaining_defaults() {
        let cfg = MatbenchConfig::from_str("[benchmark]\ndimension = 250\n").unwrap();
        assert_eq!(cfg.benchmark.dimension, 250);
        assert_eq!(cfg.benchmark.iterations, 10);
        assert_eq!(cfg.paths.results_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_full_file() {
        let cfg = MatbenchConfig::from_str(
            "[benchmark]\ndimension = 100\niterations = 3\nlabel = \"Rust-opt\"\n\n\
             [paths]\ndata_dir = \"fixtures\"\nresults_dir = \"out\"\n",
        )
        .unwrap();
        assert_eq!(cfg.benchmark.dimension, 100);
        assert_eq!(cfg.benchmark.iterations, 3);
        assert_eq!(cfg.benchmark.label, "Rust-opt");
        assert_eq!(cfg.paths.data_dir, PathBuf::from("fixtures"));
        assert_eq!(cfg.paths.results_dir, PathBuf::from("out"));
    }
}
