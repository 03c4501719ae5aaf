//! Batch match runner for balance testing.
//!
//! Runs many seeds of one scenario in parallel using rayon. Every match owns
//! its roster and luck source, so matches never share state.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use arena_core::luck::SeededLuck;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::metrics::{BatchSummary, MatchMetrics};
use crate::scenario::Scenario;

/// Round cap applied to batch matches unless configured otherwise.
pub const DEFAULT_BATCH_MAX_ROUNDS: u32 = 10_000;

/// Configuration for a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Scenario to run
    pub scenario: Scenario,
    /// Number of matches to run
    pub match_count: u32,
    /// Maximum parallel matches (0 = use rayon default)
    pub parallel_matches: u32,
    /// Output directory for results
    pub output_dir: PathBuf,
    /// Starting seed; match `i` uses `seed_start + i`
    pub seed_start: u64,
    /// Round cap per match
    pub max_rounds: u32,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            scenario: Scenario::classic(),
            match_count: 100,
            parallel_matches: 0,
            output_dir: PathBuf::from("results"),
            seed_start: 0,
            max_rounds: DEFAULT_BATCH_MAX_ROUNDS,
        }
    }
}

impl BatchConfig {
    /// Create config for a specific scenario
    pub fn new(scenario: Scenario, match_count: u32) -> Self {
        Self {
            scenario,
            match_count,
            ..Default::default()
        }
    }

    /// Set output directory
    pub fn with_output(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Set seed start
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed_start = seed;
        self
    }

    /// Set worker count
    pub fn with_parallel(mut self, parallel: u32) -> Self {
        self.parallel_matches = parallel;
        self
    }

    /// Set round cap
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }
}

/// Results from a batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResults {
    /// Configuration used
    pub config: BatchConfig,
    /// Individual match metrics, in seed order
    pub matches: Vec<MatchMetrics>,
    /// Aggregate summary
    pub summary: BatchSummary,
    /// Total runtime
    pub duration_seconds: f64,
    /// Errors encountered
    pub errors: Vec<BatchError>,
}

impl BatchResults {
    /// Save results to JSON file
    pub fn save(&self, path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Load results from JSON file
    pub fn load(path: &std::path::Path) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }
}

/// Error during batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchError {
    /// Match index
    pub match_index: u32,
    /// Seed used
    pub seed: u64,
    /// Error message
    pub message: String,
}

/// Progress tracking for batch runs
#[derive(Debug)]
pub struct BatchProgress {
    /// Total matches
    pub total: u32,
    /// Completed matches
    completed: AtomicU32,
    /// Start time
    pub start_time: Instant,
    /// Partial results for live stats
    partial_wins: Mutex<std::collections::BTreeMap<String, u32>>,
}

impl BatchProgress {
    /// Create new progress tracker
    pub fn new(total: u32) -> Self {
        Self {
            total,
            completed: AtomicU32::new(0),
            start_time: Instant::now(),
            partial_wins: Mutex::new(std::collections::BTreeMap::new()),
        }
    }

    /// Record a completed match
    pub fn record_completion(&self, winner_archetype: Option<&str>) {
        self.completed.fetch_add(1, Ordering::Relaxed);
        if let Some(w) = winner_archetype {
            if let Ok(mut wins) = self.partial_wins.lock() {
                *wins.entry(w.to_string()).or_insert(0) += 1;
            }
        }
    }

    /// Get current completion count
    pub fn current(&self) -> u32 {
        self.completed.load(Ordering::Relaxed)
    }

    /// Get completion percentage
    pub fn percentage(&self) -> f64 {
        f64::from(self.current()) / f64::from(self.total.max(1)) * 100.0
    }

    /// Get estimated time remaining
    pub fn eta(&self) -> Duration {
        let completed = self.current();
        if completed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.start_time.elapsed();
        let per_match = elapsed.as_secs_f64() / f64::from(completed);
        let remaining = self.total.saturating_sub(completed);
        Duration::from_secs_f64(per_match * f64::from(remaining))
    }

    /// Get current win rates
    pub fn current_win_rates(&self) -> std::collections::BTreeMap<String, f64> {
        let completed = self.current();
        if completed == 0 {
            return std::collections::BTreeMap::new();
        }

        if let Ok(wins) = self.partial_wins.lock() {
            wins.iter()
                .map(|(k, v)| (k.clone(), f64::from(*v) / f64::from(completed)))
                .collect()
        } else {
            std::collections::BTreeMap::new()
        }
    }

    /// Display progress to stderr
    pub fn display(&self) {
        let eta = self.eta();
        eprintln!(
            "Batch progress: {}/{} ({:.1}%), ETA {}m {}s",
            self.current(),
            self.total,
            self.percentage(),
            eta.as_secs() / 60,
            eta.as_secs() % 60
        );
        for (archetype, rate) in self.current_win_rates() {
            eprintln!("  {:<12}: {:>5.1}%", archetype, rate * 100.0);
        }
    }
}

/// Play one seed of a scenario and collect its metrics.
pub fn run_single_match(
    scenario: &Scenario,
    seed: u64,
    max_rounds: u32,
) -> Result<MatchMetrics, String> {
    let mut arena = scenario
        .arena(Some(max_rounds))
        .map_err(|e| e.to_string())?;
    let mut metrics = MatchMetrics::new(format!("match_{seed}"), &scenario.name, seed);

    arena.run_with_reporter(&mut SeededLuck::new(seed), |_, report| {
        metrics.record_round(report);
    });
    metrics.finalize(&arena);

    debug!(
        seed,
        rounds = metrics.rounds,
        outcome = %metrics.outcome,
        "match complete"
    );
    Ok(metrics)
}

/// Run a batch of matches
pub fn run_batch(config: BatchConfig) -> BatchResults {
    let start = Instant::now();
    let progress = BatchProgress::new(config.match_count);

    info!(
        "Starting batch run: {} matches of '{}'",
        config.match_count, config.scenario.name
    );

    let run_all = || -> Vec<Result<MatchMetrics, BatchError>> {
        (0..config.match_count)
            .into_par_iter()
            .map(|i| {
                let seed = config.seed_start.wrapping_add(u64::from(i));
                match run_single_match(&config.scenario, seed, config.max_rounds) {
                    Ok(metrics) => {
                        progress.record_completion(metrics.winner_archetype.as_deref());

                        let completed = progress.current();
                        if completed % 100 == 0 {
                            progress.display();
                        }

                        Ok(metrics)
                    }
                    Err(e) => {
                        warn!("Match {} failed: {}", i, e);
                        Err(BatchError {
                            match_index: i,
                            seed,
                            message: e,
                        })
                    }
                }
            })
            .collect()
    };

    let results = if config.parallel_matches > 0 {
        match rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_matches as usize)
            .build()
        {
            Ok(pool) => pool.install(run_all),
            Err(e) => {
                warn!("Failed to build thread pool ({}), using the global pool", e);
                run_all()
            }
        }
    } else {
        run_all()
    };

    let (matches, errors): (Vec<_>, Vec<_>) = results.into_iter().partition(Result::is_ok);
    let matches: Vec<MatchMetrics> = matches.into_iter().filter_map(Result::ok).collect();
    let errors: Vec<BatchError> = errors.into_iter().filter_map(Result::err).collect();

    let summary = BatchSummary::from_matches(&matches);
    let duration_seconds = start.elapsed().as_secs_f64();

    info!(
        "Batch complete: {} matches in {:.1}s ({:.1} matches/sec)",
        matches.len(),
        duration_seconds,
        matches.len() as f64 / duration_seconds.max(0.001)
    );

    BatchResults {
        config,
        matches,
        summary,
        duration_seconds,
        errors,
    }
}

/// Verify determinism by running the same seed multiple times
pub fn verify_determinism(scenario: &Scenario, seed: u64, runs: u32, max_rounds: u32) -> bool {
    let results: Result<Vec<MatchMetrics>, String> = (0..runs.max(1))
        .map(|_| run_single_match(scenario, seed, max_rounds))
        .collect();

    let Ok(results) = results else {
        return false;
    };

    let first = &results[0];
    results.iter().all(|r| {
        r.final_state_hash == first.final_state_hash
            && r.rounds == first.rounds
            && r.winner == first.winner
            && r.outcome == first.outcome
    })
}
