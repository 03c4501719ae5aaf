//! Headless arena runner for balance testing and CI verification.
//!
//! This crate drives `arena_core` matches without any UI:
//!
//! - **Single matches**: play a scenario and print the round log
//! - **Batch runs**: play many seeds in parallel and aggregate metrics
//! - **Determinism checks**: replay a seed and compare state hashes
//!
//! # Example
//!
//! ```bash
//! # Play the classic six-fighter line-up
//! cargo run -p arena_headless -- run
//!
//! # Play a scenario file with a different seed
//! cargo run -p arena_headless -- run --scenario scenarios/brawl.ron --seed 9
//!
//! # 1000 seeds, results in results/batch_results.json
//! cargo run -p arena_headless -- batch --count 1000 --output results/
//! ```

pub mod batch;
pub mod metrics;
pub mod reporter;
pub mod runner;
pub mod scenario;

pub use batch::{run_batch, verify_determinism, BatchConfig, BatchResults};
pub use metrics::{BatchSummary, MatchMetrics};
pub use runner::{run_logged, RunConfig, RunError};
pub use scenario::{Scenario, ScenarioError};
