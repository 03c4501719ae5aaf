//! Determinism testing utilities.
//!
//! Provides a harness for verifying that a match produces identical results
//! given an identical roster and seed.
//!
//! # Testing Strategy
//!
//! A seeded match must replay bit for bit, or batch statistics and bug
//! reports are worthless. Sources of non-determinism include:
//!
//! - **Floating-point math**: Different CPUs can produce different results.
//!   We use fixed-point arithmetic via [`arena_core::math::Fixed`] throughout.
//!
//! - **Global randomness**: Every roll comes from an injected
//!   [`arena_core::luck::LuckSource`]; seeded runs use ChaCha8.
//!
//! - **Iteration order**: Turns always follow roster order.
//!
//! # Test Levels
//!
//! 1. **Unit tests**: Individual rules with fixed or scripted luck
//! 2. **Property tests**: Random rosters and seeds must still replay exactly
//! 3. **Integration tests**: Full matches are reproducible
//! 4. **Parallel tests**: Running N matches in parallel all match

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread;

use arena_core::luck::SeededLuck;
use arena_core::simulation::Arena;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// Whether all runs produced identical results.
    pub is_deterministic: bool,
    /// Hashes from each run.
    pub hashes: Vec<u64>,
    /// Number of steps simulated.
    pub steps: u64,
}

impl DeterminismResult {
    /// Get all unique hashes (should be 1 for a deterministic match).
    #[must_use]
    pub fn unique_hashes(&self) -> Vec<u64> {
        let mut unique: Vec<u64> = self.hashes.clone();
        unique.sort_unstable();
        unique.dedup();
        unique
    }

    /// Assert that the match was deterministic, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic {
            let unique = self.unique_hashes();
            panic!(
                "Match is non-deterministic!\n\
                 Runs: {}\n\
                 Steps: {}\n\
                 Unique hashes: {} (expected 1)\n\
                 All hashes: {:?}",
                self.hashes.len(),
                self.steps,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Result of parallel match runs.
#[derive(Debug, Clone)]
pub struct ParallelRunResult {
    /// Final state hash from each match.
    pub hashes: Vec<u64>,
    /// Round limit each match ran with.
    pub rounds: u32,
    /// Number of matches run.
    pub num_runs: usize,
}

impl ParallelRunResult {
    /// Check if all matches produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.hashes.windows(2).all(|w| w[0] == w[1])
    }

    /// Assert all matches agreed.
    ///
    /// # Panics
    ///
    /// Panics if matches produced different hashes.
    pub fn assert_deterministic(&self) {
        if !self.is_deterministic() {
            let mut unique: Vec<u64> = self.hashes.clone();
            unique.sort_unstable();
            unique.dedup();
            panic!(
                "Parallel matches diverged!\n\
                 Matches: {}\n\
                 Rounds: {}\n\
                 Unique hashes: {}\n\
                 All hashes: {:?}",
                self.num_runs,
                self.rounds,
                unique.len(),
                self.hashes
            );
        }
    }
}

/// Run a state machine multiple times and verify determinism.
///
/// # Arguments
///
/// * `runs` - Number of times to run
/// * `steps` - Number of steps per run
/// * `setup` - Function to create initial state
/// * `step` - Function to advance the state by one step
/// * `hash` - Function to compute state hash
///
/// # Example
///
/// ```ignore
/// use arena_test_utils::determinism::verify_determinism;
/// use arena_core::prelude::*;
///
/// let result = verify_determinism(
///     5,   // Run 5 times
///     100, // 100 rounds each
///     || (Arena::new(classic_roster()), SeededLuck::new(42)),
///     |(arena, luck)| { arena.step_round(luck); },
///     |(arena, _)| arena.state_hash(),
/// );
/// result.assert_deterministic();
/// ```
pub fn verify_determinism<S, Setup, Step, HashFn>(
    runs: usize,
    steps: u64,
    setup: Setup,
    step: Step,
    hash: HashFn,
) -> DeterminismResult
where
    Setup: Fn() -> S,
    Step: Fn(&mut S),
    HashFn: Fn(&S) -> u64,
{
    let mut hashes = Vec::with_capacity(runs);

    for _ in 0..runs {
        let mut state = setup();

        for _ in 0..steps {
            step(&mut state);
        }

        hashes.push(hash(&state));
    }

    let is_deterministic = hashes.windows(2).all(|w| w[0] == w[1]);

    DeterminismResult {
        is_deterministic,
        hashes,
        steps,
    }
}

/// Play `rounds` rounds of a freshly built arena with a seeded luck source.
fn play(arena: &mut Arena, seed: u64, rounds: u32) {
    let mut luck = SeededLuck::new(seed);
    for _ in 0..rounds {
        if arena.step_round(&mut luck).is_none() {
            break;
        }
    }
}

/// Simplified determinism verification for [`Arena`].
///
/// Plays the match twice with identical setup and seed and verifies the
/// final state hashes match exactly.
///
/// # Example
///
/// ```ignore
/// use arena_test_utils::determinism::verify_match_determinism;
/// use arena_test_utils::fixtures::classic_roster;
/// use arena_core::simulation::Arena;
///
/// assert!(verify_match_determinism(|| Arena::new(classic_roster()), 42, 500));
/// ```
pub fn verify_match_determinism<F>(setup_fn: F, seed: u64, rounds: u32) -> bool
where
    F: Fn() -> Arena,
{
    let result = verify_determinism(
        2,
        1,
        || (setup_fn(), seed),
        |(arena, seed)| play(arena, *seed, rounds),
        |(arena, _)| arena.state_hash(),
    );
    result.is_deterministic
}

/// Run N matches in parallel using `thread::scope` and collect final hashes.
///
/// Catches non-determinism that only manifests under thread scheduling or
/// memory layout differences.
pub fn run_parallel_matches_scoped<F>(
    setup_fn: F,
    seed: u64,
    num_runs: usize,
    rounds: u32,
) -> ParallelRunResult
where
    F: Fn() -> Arena + Sync,
{
    let hashes = thread::scope(|s| {
        let handles: Vec<_> = (0..num_runs)
            .map(|_| {
                s.spawn(|| {
                    let mut arena = setup_fn();
                    play(&mut arena, seed, rounds);
                    arena.state_hash()
                })
            })
            .collect();

        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    ParallelRunResult {
        hashes,
        rounds,
        num_runs,
    }
}

/// Compare two runs round by round, finding the first divergence.
///
/// # Returns
///
/// `None` if the runs agree, `Some(round)` if they diverge at that round
/// (0 means the initial states already differ).
pub fn find_first_divergence<F>(setup_fn: F, seed: u64, rounds: u32) -> Option<u32>
where
    F: Fn() -> Arena,
{
    let mut first = setup_fn();
    let mut second = setup_fn();
    let mut luck_first = SeededLuck::new(seed);
    let mut luck_second = SeededLuck::new(seed);

    if first.state_hash() != second.state_hash() {
        return Some(0);
    }

    for round in 1..=rounds {
        let a = first.step_round(&mut luck_first);
        let b = second.step_round(&mut luck_second);

        if a != b || first.state_hash() != second.state_hash() {
            return Some(round);
        }
        if a.is_none() {
            break;
        }
    }

    None
}

/// Verify that a snapshot taken mid-match resumes identically.
///
/// Plays `split` rounds, snapshots the arena, then finishes both the
/// original and the restored copy with clones of the same luck state.
pub fn verify_snapshot_determinism<F>(setup_fn: F, seed: u64, split: u32, rounds: u32) -> bool
where
    F: Fn() -> Arena,
{
    let mut arena = setup_fn();
    let mut luck = SeededLuck::new(seed);
    for _ in 0..split {
        arena.step_round(&mut luck);
    }

    let Ok(bytes) = arena.serialize() else {
        return false;
    };
    let Ok(mut restored) = Arena::deserialize(&bytes) else {
        return false;
    };
    if restored.state_hash() != arena.state_hash() {
        return false;
    }

    let mut restored_luck = luck.clone();
    for _ in split..rounds {
        arena.step_round(&mut luck);
        restored.step_round(&mut restored_luck);
    }

    restored.state_hash() == arena.state_hash()
}

/// Compute a simple hash for any hashable value.
pub fn compute_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Proptest strategies for arena testing.
///
/// These strategies generate random but reproducible inputs for
/// property-based testing of the combat rules.
pub mod strategies {
    use arena_core::archetype::Archetype;
    use arena_core::catalog::WeaponKind;
    use arena_core::combatant::Combatant;
    use arena_core::math::Fixed;
    use proptest::prelude::*;

    /// Any archetype.
    pub fn arb_archetype() -> impl Strategy<Value = Archetype> {
        proptest::sample::select(Archetype::ALL.to_vec())
    }

    /// Any catalog weapon.
    pub fn arb_weapon_kind() -> impl Strategy<Value = WeaponKind> {
        proptest::sample::select(WeaponKind::ALL.to_vec())
    }

    /// Valid starting positions.
    ///
    /// Range: 0 to 20 (a short line keeps matches brief)
    pub fn arb_position() -> impl Strategy<Value = i64> {
        0i64..20i64
    }

    /// Luck rolls, including values above 1 reachable with high luck stats.
    pub fn arb_roll() -> impl Strategy<Value = Fixed> {
        (0u32..=120u32).prop_map(|n| Fixed::from_num(n) / Fixed::from_num(100))
    }

    /// Damage amounts (0-500).
    pub fn arb_damage() -> impl Strategy<Value = Fixed> {
        (0u32..500u32).prop_map(Fixed::from_num)
    }

    /// Match seeds.
    pub fn arb_seed() -> impl Strategy<Value = u64> {
        any::<u64>()
    }

    /// A freshly constructed combatant.
    pub fn arb_combatant() -> impl Strategy<Value = Combatant> {
        (arb_archetype(), arb_position()).prop_map(|(archetype, position)| {
            Combatant::new(archetype, position, archetype.description())
                .expect("generated positions are non-negative")
        })
    }

    /// A roster of 2 to `max_size` combatants.
    pub fn arb_roster(max_size: usize) -> impl Strategy<Value = Vec<Combatant>> {
        proptest::collection::vec(arb_combatant(), 2..=max_size.max(2))
    }
}

#[cfg(test)]
mod tests {
    use super::strategies::*;
    use super::*;
    use crate::fixtures::{classic_roster, duel};
    use arena_core::archetype::Archetype;
    use arena_core::simulation::MatchConfig;
    use proptest::prelude::*;

    // =========================================================================
    // Basic determinism tests
    // =========================================================================

    #[test]
    fn test_verify_determinism_simple() {
        let result = verify_determinism(3, 100, || 0u64, |n| *n += 1, |n| *n);

        assert!(result.is_deterministic);
        assert_eq!(result.hashes, vec![100, 100, 100]);
    }

    #[test]
    #[should_panic(expected = "non-deterministic")]
    fn test_assert_deterministic_reports_divergence() {
        let result = DeterminismResult {
            is_deterministic: false,
            hashes: vec![1, 2],
            steps: 10,
        };
        result.assert_deterministic();
    }

    #[test]
    fn test_classic_match_determinism() {
        assert!(verify_match_determinism(
            || Arena::new(classic_roster()),
            42,
            500
        ));
    }

    #[test]
    fn test_duel_determinism_across_seeds() {
        for seed in 0..10 {
            assert!(verify_match_determinism(
                || Arena::new(duel(Archetype::Dwarf, Archetype::Demiurge, 5)),
                seed,
                500
            ));
        }
    }

    #[test]
    fn test_parallel_matches_agree() {
        let result = run_parallel_matches_scoped(|| Arena::new(classic_roster()), 7, 4, 300);
        result.assert_deterministic();
        assert_eq!(result.hashes.len(), 4);
    }

    #[test]
    fn test_no_divergence() {
        assert_eq!(
            find_first_divergence(|| Arena::new(classic_roster()), 3, 200),
            None
        );
    }

    #[test]
    fn test_snapshot_resumes_identically() {
        assert!(verify_snapshot_determinism(
            || Arena::with_config(classic_roster(), MatchConfig::capped(400)),
            9,
            5,
            400
        ));
    }

    #[test]
    fn test_compute_hash_stable() {
        assert_eq!(compute_hash(&(1u32, "a")), compute_hash(&(1u32, "a")));
    }

    // =========================================================================
    // Property-based tests
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_random_roster_is_deterministic(roster in arb_roster(6), seed in arb_seed()) {
            let setup = || Arena::with_config(roster.clone(), MatchConfig::capped(200));
            prop_assert!(verify_match_determinism(setup, seed, 200));
        }

        #[test]
        fn prop_different_seeds_still_replay(
            archetype_a in arb_archetype(),
            archetype_b in arb_archetype(),
            distance in arb_position(),
            seed in arb_seed(),
        ) {
            let setup = || Arena::new(duel(archetype_a, archetype_b, distance));
            prop_assert_eq!(find_first_divergence(setup, seed, 100), None);
        }
    }
}
