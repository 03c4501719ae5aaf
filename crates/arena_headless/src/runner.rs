//! Single-match runner with a live round log.

use std::io::{self, Write};

use arena_core::luck::SeededLuck;
use arena_core::simulation::MatchResult;
use tracing::info;

use crate::reporter::{render_outcome, render_round};
use crate::scenario::{Scenario, ScenarioError};

/// Runner configuration.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Seed override (otherwise the scenario's seed).
    pub seed: Option<u64>,
    /// Round cap override (otherwise the scenario's cap).
    pub max_rounds: Option<u32>,
}

/// Error from a logged run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The scenario could not be turned into an arena.
    #[error(transparent)]
    Scenario(#[from] ScenarioError),
    /// Writing the log failed.
    #[error("Failed to write round log: {0}")]
    Output(#[from] io::Error),
}

/// Play `scenario`, writing every round and the final line to `out`.
pub fn run_logged<W: Write>(
    scenario: &Scenario,
    config: &RunConfig,
    out: &mut W,
) -> Result<MatchResult, RunError> {
    let seed = config.seed.unwrap_or(scenario.seed);
    let mut arena = scenario.arena(config.max_rounds)?;
    let mut luck = SeededLuck::new(seed);

    info!(
        scenario = %scenario.name,
        seed,
        combatants = arena.roster().len(),
        max_rounds = ?arena.config().max_rounds,
        "Starting match"
    );

    while let Some(report) = arena.step_round(&mut luck) {
        writeln!(out, "{}", render_round(arena.roster(), &report))?;
    }

    let result = arena.into_result();
    writeln!(out, "{}", render_outcome(&result))?;
    Ok(result)
}
