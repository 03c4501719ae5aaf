//! Balance testing utilities for headless simulation.
//!
//! Runs many seeded duels to compare archetypes head to head.

use std::ops::Range;

use arena_core::archetype::Archetype;
use arena_core::combatant::CombatantId;
use arena_core::luck::SeededLuck;
use arena_core::simulation::{Arena, MatchConfig, MatchOutcome, MatchResult};
use tracing::debug;

use crate::fixtures::duel;

/// Statistics for a set of duels between two archetypes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchupStats {
    /// Total duels run.
    pub total_duels: u32,
    /// Wins for the first combatant.
    pub wins_a: u32,
    /// Wins for the second combatant.
    pub wins_b: u32,
    /// Both died.
    pub draws: u32,
    /// Round cap reached.
    pub stalemates: u32,
    /// Average rounds to resolution.
    pub avg_rounds: f64,
}

impl MatchupStats {
    /// Calculate win rate for the first combatant (0.0 to 1.0).
    pub fn win_rate_a(&self) -> f64 {
        if self.total_duels == 0 {
            return 0.5;
        }
        self.wins_a as f64 / self.total_duels as f64
    }

    /// Calculate win rate for the second combatant (0.0 to 1.0).
    pub fn win_rate_b(&self) -> f64 {
        if self.total_duels == 0 {
            return 0.5;
        }
        self.wins_b as f64 / self.total_duels as f64
    }

    /// Check if matchup is balanced (within acceptable range).
    pub fn is_balanced(&self, min_rate: f64, max_rate: f64) -> bool {
        let rate = self.win_rate_a();
        rate >= min_rate && rate <= max_rate
    }

    fn record(&mut self, result: &MatchResult) {
        self.total_duels += 1;
        match result.outcome {
            MatchOutcome::Winner(id) if id == CombatantId::new(0) => self.wins_a += 1,
            MatchOutcome::Winner(_) => self.wins_b += 1,
            MatchOutcome::Draw => self.draws += 1,
            MatchOutcome::Stalemate { .. } => self.stalemates += 1,
        }
        let n = f64::from(self.total_duels);
        self.avg_rounds += (f64::from(result.rounds) - self.avg_rounds) / n;
    }
}

/// Play one seeded duel.
pub fn run_duel(
    a: Archetype,
    b: Archetype,
    distance: i64,
    seed: u64,
    max_rounds: u32,
) -> MatchResult {
    let mut arena = Arena::with_config(duel(a, b, distance), MatchConfig::capped(max_rounds));
    arena.run(&mut SeededLuck::new(seed));
    arena.into_result()
}

/// Play one duel per seed and aggregate.
pub fn matchup_stats(
    a: Archetype,
    b: Archetype,
    distance: i64,
    seeds: Range<u64>,
    max_rounds: u32,
) -> MatchupStats {
    let mut stats = MatchupStats::default();
    for seed in seeds {
        stats.record(&run_duel(a, b, distance, seed, max_rounds));
    }
    debug!(
        a = %a,
        b = %b,
        wins_a = stats.wins_a,
        wins_b = stats.wins_b,
        draws = stats.draws,
        "matchup complete"
    );
    stats
}

/// Stats for every ordered pair of archetypes.
pub fn matchup_matrix(
    distance: i64,
    seeds: Range<u64>,
    max_rounds: u32,
) -> Vec<(Archetype, Archetype, MatchupStats)> {
    let mut results = Vec::new();

    for a in Archetype::ALL {
        for b in Archetype::ALL {
            let stats = matchup_stats(a, b, distance, seeds.clone(), max_rounds);
            results.push((a, b, stats));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matchup_stats_win_rate() {
        let stats = MatchupStats {
            total_duels: 100,
            wins_a: 55,
            wins_b: 40,
            draws: 3,
            stalemates: 2,
            avg_rounds: 12.0,
        };

        assert!((stats.win_rate_a() - 0.55).abs() < 0.001);
        assert!((stats.win_rate_b() - 0.40).abs() < 0.001);
        assert!(stats.is_balanced(0.45, 0.55));
    }

    #[test]
    fn test_every_duel_is_counted() {
        let stats = matchup_stats(Archetype::Warrior, Archetype::Archer, 3, 0..20, 2_000);
        assert_eq!(stats.total_duels, 20);
        assert_eq!(
            stats.wins_a + stats.wins_b + stats.draws + stats.stalemates,
            20
        );
        assert!(stats.avg_rounds >= 1.0);
    }

    #[test]
    fn test_dwarf_beats_bare_hands() {
        let stats = matchup_stats(Archetype::Base, Archetype::Dwarf, 1, 0..20, 2_000);
        assert!(
            stats.wins_b > stats.wins_a,
            "An axe should beat bare hands: {stats:?}"
        );
    }

    #[test]
    fn test_matrix_covers_all_pairs() {
        let matrix = matchup_matrix(2, 0..2, 500);
        assert_eq!(matrix.len(), Archetype::ALL.len() * Archetype::ALL.len());
    }
}
