//! Integration tests for the run orchestration.

use matbench_cli::dataset;
use matbench_cli::run::{self, OutputFormat, RunOptions};
use matbench_core::results::CSV_HEADER;

fn temp_workspace(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join("matbench_test_run").join(name);
    // Clean up from any prior run
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn options(root: &std::path::Path, dimension: usize) -> RunOptions {
    RunOptions {
        dimension,
        iterations: 2,
        label: "Rust".to_string(),
        data_dir: root.join("data"),
        results_dir: root.join("results"),
        format: OutputFormat::Text,
    }
}

#[test]
fn run_appends_one_row_per_invocation() {
    let root = temp_workspace("append");
    dataset::generate(&[6], 42, &root.join("data")).unwrap();

    let opts = options(&root, 6);
    run::execute(&opts).unwrap();
    run::execute(&opts).unwrap();

    let log = root.join("results").join("benchmark_rust_results.csv");
    let contents = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], CSV_HEADER);
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], "Rust");
        assert_eq!(fields[1], "6");
        assert_eq!(fields[2], "2");
        assert_eq!(fields[3].split(' ').count(), 2);
    }
}

#[test]
fn run_fails_cleanly_on_missing_dataset() {
    let root = temp_workspace("missing");
    let err = run::execute(&options(&root, 12)).unwrap_err();
    assert!(matches!(err, run::RunError::MissingDataFile(_)));
    assert!(err.to_string().contains("matrix_A_12.json"));
}

#[test]
fn run_json_format_still_logs() {
    let root = temp_workspace("json");
    dataset::generate(&[4], 42, &root.join("data")).unwrap();

    let mut opts = options(&root, 4);
    opts.format = OutputFormat::Json;
    run::execute(&opts).unwrap();

    assert!(root
        .join("results")
        .join("benchmark_rust_results.csv")
        .exists());
}
