//! Headless arena runner.
//!
//! Plays matches without a UI. The round log goes to stdout, logs to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Play the classic line-up with its built-in seed
//! cargo run -p arena_headless
//!
//! # Play a scenario file with a round cap
//! cargo run -p arena_headless -- run --scenario scenarios/brawl.ron --max-rounds 200
//!
//! # Run batch balance test
//! cargo run -p arena_headless -- batch --count 1000 --output results/
//!
//! # Check that a seed replays identically
//! cargo run -p arena_headless -- verify --seed 12345 --runs 5
//! ```

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_headless::{
    batch::{run_batch, BatchConfig, DEFAULT_BATCH_MAX_ROUNDS},
    runner::{run_logged, RunConfig},
    scenario::Scenario,
};

#[derive(Parser)]
#[command(name = "arena_headless")]
#[command(about = "Headless arena runner for balance testing and CI")]
#[command(version)]
struct Cli {
    /// Enable verbose logging to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a single match and print the round log
    Run {
        /// Scenario file to load (default: classic line-up)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Seed override
        #[arg(long)]
        seed: Option<u64>,

        /// Stop after this many rounds
        #[arg(long)]
        max_rounds: Option<u32>,
    },

    /// Run a batch of matches for balance testing
    Batch {
        /// Scenario file to load (default: classic line-up)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Number of matches to run
        #[arg(short, long, default_value = "100")]
        count: u32,

        /// Maximum parallel matches (0 = auto)
        #[arg(short, long, default_value = "0")]
        parallel: u32,

        /// Output directory for results
        #[arg(short, long, default_value = "results")]
        output: PathBuf,

        /// Starting seed
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Round cap per match
        #[arg(long, default_value_t = DEFAULT_BATCH_MAX_ROUNDS)]
        max_rounds: u32,
    },

    /// Verify determinism by running the same seed multiple times
    Verify {
        /// Scenario file to load (default: classic line-up)
        #[arg(short, long)]
        scenario: Option<PathBuf>,

        /// Seed to verify
        #[arg(long, default_value = "12345")]
        seed: u64,

        /// Number of verification runs
        #[arg(short, long, default_value = "5")]
        runs: u32,
    },
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the round log
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Some(Commands::Run {
            scenario,
            seed,
            max_rounds,
        }) => cmd_run(scenario, seed, max_rounds),
        Some(Commands::Batch {
            scenario,
            count,
            parallel,
            output,
            seed,
            max_rounds,
        }) => cmd_batch(scenario, count, parallel, output, seed, max_rounds),
        Some(Commands::Verify {
            scenario,
            seed,
            runs,
        }) => cmd_verify(scenario, seed, runs),
        None => cmd_run(None, None, None),
    }
}

/// Load a scenario file, or the classic line-up. Exits on error.
fn load_scenario(path: Option<PathBuf>) -> Scenario {
    let Some(path) = path else {
        return Scenario::classic();
    };

    match Scenario::load(&path) {
        Ok(scenario) => {
            tracing::info!(path = %path.display(), name = %scenario.name, "Loaded scenario");
            scenario
        }
        Err(e) => {
            tracing::error!(error = %e, path = %path.display(), "Failed to load scenario");
            eprintln!("FATAL: {}", e);
            std::process::exit(1);
        }
    }
}

/// Play a single match
fn cmd_run(scenario: Option<PathBuf>, seed: Option<u64>, max_rounds: Option<u32>) {
    let scenario = load_scenario(scenario);
    let config = RunConfig { seed, max_rounds };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run_logged(&scenario, &config, &mut out) {
        Ok(result) => {
            tracing::info!(rounds = result.rounds, outcome = ?result.outcome, "Match finished");
        }
        Err(e) => {
            tracing::error!(error = %e, "Match failed");
            eprintln!("FATAL: {}", e);
            std::process::exit(1);
        }
    }
}

/// Run batch of matches for balance testing
fn cmd_batch(
    scenario: Option<PathBuf>,
    count: u32,
    parallel: u32,
    output: PathBuf,
    seed: u64,
    max_rounds: u32,
) {
    let batch_start = Instant::now();
    let scenario = load_scenario(scenario);

    let num_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);

    tracing::info!(
        scenario = %scenario.name,
        count = count,
        parallel = parallel,
        seed = seed,
        max_rounds = max_rounds,
        output = %output.display(),
        cpus_available = num_cpus,
        "Batch configuration"
    );

    // Ensure output directory exists
    if let Err(e) = std::fs::create_dir_all(&output) {
        tracing::error!(error = %e, path = %output.display(), "Failed to create output directory");
        eprintln!(
            "FATAL: Cannot create output directory '{}': {}",
            output.display(),
            e
        );
        std::process::exit(1);
    }

    let config = BatchConfig::new(scenario, count)
        .with_output(output.clone())
        .with_seed(seed)
        .with_parallel(parallel)
        .with_max_rounds(max_rounds);

    let results = run_batch(config);

    tracing::info!(
        matches_completed = results.matches.len(),
        matches_failed = results.errors.len(),
        total_duration_secs = format!("{:.1}", batch_start.elapsed().as_secs_f64()),
        "Batch execution finished"
    );

    let results_path = output.join("batch_results.json");
    if let Err(e) = results.save(&results_path) {
        tracing::error!(error = %e, path = %results_path.display(), "Failed to save results");
        eprintln!("FATAL: Failed to save results: {}", e);
        std::process::exit(1);
    }

    let summary = &results.summary;
    eprintln!("\n{}", "=".repeat(50));
    eprintln!("BATCH COMPLETE");
    eprintln!("{}", "=".repeat(50));
    eprintln!("Matches played: {}", results.matches.len());
    if !results.errors.is_empty() {
        eprintln!("Matches FAILED: {}", results.errors.len());
    }
    eprintln!("Duration: {:.1}s", results.duration_seconds);
    eprintln!(
        "Rounds: avg {:.1}, min {}, max {}",
        summary.avg_rounds, summary.min_rounds, summary.max_rounds
    );
    eprintln!("Draws: {}  Stalemates: {}", summary.draws, summary.stalemates);
    eprintln!("\nWin Rates:");
    for (archetype, rate) in &summary.win_rates {
        eprintln!("  {}: {:.1}%", archetype, rate * 100.0);
    }

    if !results.errors.is_empty() {
        eprintln!("\nMATCH FAILURES:");
        for error in results.errors.iter().take(10) {
            eprintln!(
                "  Match {} (seed {}): {}",
                error.match_index, error.seed, error.message
            );
        }
        if results.errors.len() > 10 {
            eprintln!("  ... and {} more failures", results.errors.len() - 10);
        }
    }

    eprintln!("\nResults saved to: {}", results_path.display());
}

/// Verify determinism
fn cmd_verify(scenario: Option<PathBuf>, seed: u64, runs: u32) {
    let scenario = load_scenario(scenario);
    tracing::info!(
        "Verifying determinism: {} with seed {} ({} runs)",
        scenario.name,
        seed,
        runs
    );

    let deterministic =
        arena_headless::batch::verify_determinism(&scenario, seed, runs, DEFAULT_BATCH_MAX_ROUNDS);

    if deterministic {
        eprintln!("PASS: All {} runs produced identical results", runs);
    } else {
        eprintln!("FAIL: Non-determinism detected!");
        std::process::exit(1);
    }
}
