//! Match metrics collection for balance analysis.
//!
//! This module collects per-match counters from the event stream and
//! aggregates them across a batch.

use std::collections::BTreeMap;

use arena_core::events::CombatEvent;
use arena_core::simulation::{Arena, MatchOutcome, RoundReport};
use serde::{Deserialize, Serialize};

/// Complete metrics for a single match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchMetrics {
    /// Unique match identifier.
    pub match_id: String,
    /// Scenario name.
    pub scenario: String,
    /// Seed used.
    pub seed: u64,
    /// Rounds played.
    pub rounds: u32,
    /// `"winner"`, `"draw"` or `"stalemate"`.
    pub outcome: String,
    /// Winner's name.
    pub winner: Option<String>,
    /// Winner's archetype identifier.
    pub winner_archetype: Option<String>,
    /// Attacks that reached the target.
    pub attacks: u32,
    /// Attacks blocked.
    pub blocks: u32,
    /// Attacks dodged.
    pub dodges: u32,
    /// Attacks that landed.
    pub hits: u32,
    /// Collisions (attacks from the same square).
    pub collisions: u32,
    /// Weapons broken.
    pub weapon_breaks: u32,
    /// Deaths.
    pub deaths: u32,
    /// Life removed across all combatants.
    pub life_lost: f64,
    /// Magic spent shielding across all combatants.
    pub magic_spent: f64,
    /// Final arena state hash (for determinism validation).
    pub final_state_hash: u64,
}

impl MatchMetrics {
    /// Create a new metrics instance.
    #[must_use]
    pub fn new(match_id: impl Into<String>, scenario: impl Into<String>, seed: u64) -> Self {
        Self {
            match_id: match_id.into(),
            scenario: scenario.into(),
            seed,
            ..Default::default()
        }
    }

    /// Count every event of a round.
    pub fn record_round(&mut self, report: &RoundReport) {
        self.rounds = report.round;
        for event in &report.events {
            self.record_event(event);
        }
    }

    fn record_event(&mut self, event: &CombatEvent) {
        match event {
            CombatEvent::Moved { .. } => {}
            CombatEvent::Attacked { collision, .. } => {
                self.attacks += 1;
                if *collision {
                    self.collisions += 1;
                }
            }
            CombatEvent::Blocked { .. } => self.blocks += 1,
            CombatEvent::Dodged { .. } => self.dodges += 1,
            CombatEvent::Hit {
                life_lost,
                magic_spent,
                ..
            } => {
                self.hits += 1;
                self.life_lost += life_lost.to_num::<f64>();
                self.magic_spent += magic_spent.to_num::<f64>();
            }
            CombatEvent::WeaponBroken { .. } => self.weapon_breaks += 1,
            CombatEvent::Died { .. } => self.deaths += 1,
        }
    }

    /// Record the final state of a finished match.
    pub fn finalize(&mut self, arena: &Arena) {
        self.rounds = arena.round();
        self.final_state_hash = arena.state_hash();
        match arena.outcome() {
            Some(MatchOutcome::Winner(id)) => {
                self.outcome = "winner".to_string();
                if let Some(winner) = arena.combatant(id) {
                    self.winner = Some(winner.name().to_string());
                    self.winner_archetype = Some(winner.archetype().id().to_string());
                }
            }
            Some(MatchOutcome::Draw) => self.outcome = "draw".to_string(),
            Some(MatchOutcome::Stalemate { .. }) | None => {
                self.outcome = "stalemate".to_string();
            }
        }
    }

    /// Fraction of attacks that were blocked.
    #[must_use]
    pub fn block_rate(&self) -> f64 {
        ratio(self.blocks, self.attacks)
    }

    /// Fraction of attacks that were dodged.
    #[must_use]
    pub fn dodge_rate(&self) -> f64 {
        ratio(self.dodges, self.attacks)
    }
}

fn ratio(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        0.0
    } else {
        f64::from(part) / f64::from(whole)
    }
}

/// Summary statistics across multiple matches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Total matches played.
    pub total_matches: u32,
    /// Matches won by each archetype.
    pub wins_by_archetype: BTreeMap<String, u32>,
    /// Win rates by archetype.
    pub win_rates: BTreeMap<String, f64>,
    /// Draws count.
    pub draws: u32,
    /// Capped matches.
    pub stalemates: u32,
    /// Average match length in rounds.
    pub avg_rounds: f64,
    /// Shortest match.
    pub min_rounds: u32,
    /// Longest match.
    pub max_rounds: u32,
    /// Blocks per attack across the batch.
    pub block_rate: f64,
    /// Dodges per attack across the batch.
    pub dodge_rate: f64,
    /// Average weapons broken per match.
    pub avg_weapon_breaks: f64,
}

impl BatchSummary {
    /// Calculate summary from a list of match metrics.
    #[must_use]
    pub fn from_matches(matches: &[MatchMetrics]) -> Self {
        if matches.is_empty() {
            return Self::default();
        }

        let total = u32::try_from(matches.len()).unwrap_or(u32::MAX);
        let mut summary = Self {
            total_matches: total,
            min_rounds: u32::MAX,
            ..Default::default()
        };

        let mut rounds_sum = 0u64;
        let mut attacks = 0u32;
        let mut blocks = 0u32;
        let mut dodges = 0u32;
        let mut breaks = 0u64;

        for m in matches {
            rounds_sum += u64::from(m.rounds);
            summary.min_rounds = summary.min_rounds.min(m.rounds);
            summary.max_rounds = summary.max_rounds.max(m.rounds);
            attacks = attacks.saturating_add(m.attacks);
            blocks = blocks.saturating_add(m.blocks);
            dodges = dodges.saturating_add(m.dodges);
            breaks += u64::from(m.weapon_breaks);

            match m.outcome.as_str() {
                "winner" => {
                    if let Some(archetype) = &m.winner_archetype {
                        *summary
                            .wins_by_archetype
                            .entry(archetype.clone())
                            .or_default() += 1;
                    }
                }
                "draw" => summary.draws += 1,
                _ => summary.stalemates += 1,
            }
        }

        summary.avg_rounds = rounds_sum as f64 / f64::from(total);
        summary.avg_weapon_breaks = breaks as f64 / f64::from(total);
        summary.block_rate = ratio(blocks, attacks);
        summary.dodge_rate = ratio(dodges, attacks);

        for (archetype, wins) in &summary.wins_by_archetype {
            summary
                .win_rates
                .insert(archetype.clone(), f64::from(*wins) / f64::from(total));
        }

        summary
    }

    /// The archetype winning more than `threshold` of all matches, if any.
    #[must_use]
    pub fn dominant_archetype(&self, threshold: f64) -> Option<&String> {
        self.win_rates
            .iter()
            .find(|(_, rate)| **rate > threshold)
            .map(|(archetype, _)| archetype)
    }
}
