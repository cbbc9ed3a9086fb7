//! Matbench CLI
//!
//! Orchestration around `matbench-core`: configuration, dataset generation,
//! benchmark runs, and cross-implementation result summaries.

pub mod colors;
pub mod config;
pub mod dataset;
pub mod run;
pub mod summary;
