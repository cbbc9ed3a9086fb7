//! Matbench CLI, the naive matrix multiplication benchmark runner.

use std::path::PathBuf;

use clap::{Parser as ClapParser, Subcommand};
use matbench_cli::config::MatbenchConfig;
use matbench_cli::run::{OutputFormat, RunOptions};
use matbench_cli::{colors, dataset, run, summary};

#[derive(ClapParser)]
#[command(
    name = "matbench",
    version,
    about = "Cross-language naive matrix multiplication benchmark",
    long_about = "Matbench measures naive O(n^3) dense matrix multiplication and \n\
                  appends the timings to a results log shared with the other \n\
                  language implementations in the comparison set.",
    help_template = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}

Examples:
  matbench gen --sizes 100,250        Generate seeded datasets
  matbench run --n 250 --iterations 5 Benchmark the 250x250 dataset
  matbench run --format json          Machine-readable report
  matbench summary                    Compare recorded results
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the benchmark and append the result to the shared log
    Run {
        /// Dimension of the square matrices
        #[arg(long)]
        n: Option<usize>,
        /// Number of timed iterations
        #[arg(long)]
        iterations: Option<usize>,
        /// Directory holding matrix_A_<n>.json / matrix_B_<n>.json
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Directory receiving the results log
        #[arg(long)]
        results_dir: Option<PathBuf>,
        /// Implementation label recorded in the log
        #[arg(long)]
        label: Option<String>,
        /// Report format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Generate seeded benchmark datasets
    Gen {
        /// Comma-separated matrix dimensions
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
        /// Base seed (matrix B uses seed + 1)
        #[arg(long)]
        seed: Option<u64>,
        /// Directory receiving the dataset files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Summarize recorded results across implementations
    Summary {
        /// Directory holding benchmark_*_results.csv logs
        #[arg(long)]
        results_dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    let config = MatbenchConfig::load();

    let outcome = match cli.command {
        Commands::Run {
            n,
            iterations,
            data_dir,
            results_dir,
            label,
            format,
        } => {
            let opts = RunOptions {
                dimension: n.unwrap_or(config.benchmark.dimension),
                iterations: iterations.unwrap_or(config.benchmark.iterations),
                label: label.unwrap_or(config.benchmark.label),
                data_dir: data_dir.unwrap_or(config.paths.data_dir),
                results_dir: results_dir.unwrap_or(config.paths.results_dir),
                format: OutputFormat::from_arg(&format),
            };
            run::execute(&opts).map_err(|e| e.to_string())
        }
        Commands::Gen {
            sizes,
            seed,
            data_dir,
        } => cmd_gen(
            &sizes.unwrap_or_else(|| dataset::DEFAULT_SIZES.to_vec()),
            seed.unwrap_or(dataset::DEFAULT_SEED),
            &data_dir.unwrap_or(config.paths.data_dir),
        ),
        Commands::Summary { results_dir } => {
            cmd_summary(&results_dir.unwrap_or(config.paths.results_dir))
        }
    };

    if let Err(message) = outcome {
        eprintln!("{} {}", colors::red("error:"), message);
        std::process::exit(1);
    }
}

fn cmd_gen(sizes: &[usize], seed: u64, data_dir: &std::path::Path) -> Result<(), String> {
    let written = dataset::generate(sizes, seed, data_dir).map_err(|e| e.to_string())?;
    for path in &written {
        println!("{} {}", colors::green("wrote"), path.display());
    }
    println!("Generated datasets for {} dimension(s).", sizes.len());
    Ok(())
}

fn cmd_summary(results_dir: &std::path::Path) -> Result<(), String> {
    let summary = summary::load(results_dir).map_err(|e| e.to_string())?;
    for warning in &summary.warnings {
        eprintln!("{} {}", colors::yellow("warning:"), warning);
    }
    if summary.rows.is_empty() {
        println!(
            "No results recorded under '{}' yet.",
            results_dir.display()
        );
        return Ok(());
    }
    print!("{}", summary::render_table(&summary.rows));
    Ok(())
}
