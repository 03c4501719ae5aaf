//! Match driver.
//!
//! An [`Arena`] owns a fixed roster and plays it out round by round. Each
//! round every living combatant, in roster order, takes one turn; a
//! combatant killed earlier in the round does not act. The stop condition
//! is checked before every round:
//!
//! - one combatant alive: [`MatchOutcome::Winner`]
//! - nobody alive: [`MatchOutcome::Draw`]
//! - otherwise keep going, unless [`MatchConfig::max_rounds`] is reached
//!
//! Without a round cap a match in which no hit ever lands runs forever.
//! Callers that cannot accept that set `max_rounds` and handle
//! [`MatchOutcome::Stalemate`].
//!
//! # Example
//!
//! ```
//! use arena_core::combatant::Combatant;
//! use arena_core::luck::SeededLuck;
//! use arena_core::simulation::{Arena, MatchConfig, MatchOutcome};
//!
//! let roster = vec![
//!     Combatant::warrior(0, "Conan").unwrap(),
//!     Combatant::archer(3, "Robin").unwrap(),
//! ];
//! let mut arena = Arena::with_config(roster, MatchConfig::capped(10_000));
//! let outcome = arena.run(&mut SeededLuck::new(7));
//! assert!(arena.is_finished());
//! assert!(matches!(
//!     outcome,
//!     MatchOutcome::Winner(_) | MatchOutcome::Draw | MatchOutcome::Stalemate { .. }
//! ));
//! ```

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::take_turn;
use crate::combatant::{Combatant, CombatantId};
use crate::error::{ArenaError, Result};
use crate::events::CombatEvent;
use crate::luck::LuckSource;

/// Match settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Stop after this many rounds. `None` runs until at most one survives.
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

impl MatchConfig {
    /// No round cap.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_rounds: None }
    }

    /// Stop after `rounds` rounds.
    #[must_use]
    pub const fn capped(rounds: u32) -> Self {
        Self {
            max_rounds: Some(rounds),
        }
    }
}

/// How a match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Exactly one combatant survived.
    Winner(CombatantId),
    /// Everyone died.
    Draw,
    /// The round cap was reached with several combatants alive.
    Stalemate {
        /// Rounds played.
        rounds: u32,
    },
}

/// Match state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchState {
    /// More rounds to play.
    Running,
    /// Terminal.
    Finished(MatchOutcome),
}

/// Everything that happened in one round.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundReport {
    /// 1-based round number.
    pub round: u32,
    /// Events in the order they happened.
    pub events: Vec<CombatEvent>,
}

impl RoundReport {
    /// Combatants that died this round.
    pub fn deaths(&self) -> impl Iterator<Item = CombatantId> + '_ {
        self.events.iter().filter_map(|event| match event {
            CombatEvent::Died { combatant, .. } => Some(*combatant),
            _ => None,
        })
    }
}

/// Final state of a finished match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// How the match ended.
    pub outcome: MatchOutcome,
    /// Rounds played.
    pub rounds: u32,
    /// Roster in its terminal state.
    pub roster: Vec<Combatant>,
}

impl MatchResult {
    /// The surviving combatant, if there is exactly one.
    #[must_use]
    pub fn winner(&self) -> Option<&Combatant> {
        match self.outcome {
            MatchOutcome::Winner(id) => self.roster.get(id.index()),
            MatchOutcome::Draw | MatchOutcome::Stalemate { .. } => None,
        }
    }
}

/// A roster playing out a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arena {
    roster: Vec<Combatant>,
    config: MatchConfig,
    round: u32,
    state: MatchState,
}

impl Arena {
    /// Create an unbounded match.
    #[must_use]
    pub fn new(roster: Vec<Combatant>) -> Self {
        Self::with_config(roster, MatchConfig::default())
    }

    /// Create a match with explicit settings.
    ///
    /// The stop condition is evaluated immediately, so a roster with at
    /// most one living combatant starts out finished.
    #[must_use]
    pub fn with_config(roster: Vec<Combatant>, config: MatchConfig) -> Self {
        let mut arena = Self {
            roster,
            config,
            round: 0,
            state: MatchState::Running,
        };
        arena.state = arena.evaluate_state();
        arena
    }

    /// Roster in roster order.
    #[must_use]
    pub fn roster(&self) -> &[Combatant] {
        &self.roster
    }

    /// Look up a combatant.
    #[must_use]
    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id.index())
    }

    /// Settings.
    #[must_use]
    pub const fn config(&self) -> MatchConfig {
        self.config
    }

    /// Rounds played so far.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> MatchState {
        self.state
    }

    /// Whether the match has ended.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, MatchState::Finished(_))
    }

    /// The outcome, once finished.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        match self.state {
            MatchState::Running => None,
            MatchState::Finished(outcome) => Some(outcome),
        }
    }

    /// Number of living combatants.
    #[must_use]
    pub fn living_count(&self) -> usize {
        self.roster.iter().filter(|c| c.is_alive()).count()
    }

    /// Iterate living combatants with their IDs.
    pub fn living(&self) -> impl Iterator<Item = (CombatantId, &Combatant)> + '_ {
        self.ids()
            .zip(self.roster.iter())
            .filter(|(_, c)| c.is_alive())
    }

    fn ids(&self) -> impl Iterator<Item = CombatantId> {
        (0..self.roster.len()).filter_map(|i| u32::try_from(i).ok().map(CombatantId::new))
    }

    /// Play one round. Returns `None` if the match had already finished.
    pub fn step_round(&mut self, luck: &mut dyn LuckSource) -> Option<RoundReport> {
        if self.is_finished() {
            return None;
        }

        self.round += 1;
        let mut events = Vec::new();
        let ids: Vec<CombatantId> = self.ids().collect();
        for id in ids {
            take_turn(&mut self.roster, id, luck, &mut events);
        }

        #[cfg(feature = "debug-validation")]
        self.validate_invariants();

        self.state = self.evaluate_state();
        debug!(
            round = self.round,
            events = events.len(),
            living = self.living_count(),
            "round complete"
        );

        if let MatchState::Finished(outcome) = self.state {
            info!(rounds = self.round, ?outcome, "match finished");
        }

        Some(RoundReport {
            round: self.round,
            events,
        })
    }

    /// Play until the match finishes.
    pub fn run(&mut self, luck: &mut dyn LuckSource) -> MatchOutcome {
        self.run_with_reporter(luck, |_, _| {})
    }

    /// Play until the match finishes, handing every round to `report`.
    pub fn run_with_reporter<F>(&mut self, luck: &mut dyn LuckSource, mut report: F) -> MatchOutcome
    where
        F: FnMut(&Arena, &RoundReport),
    {
        loop {
            if let MatchState::Finished(outcome) = self.state {
                return outcome;
            }
            if let Some(round) = self.step_round(luck) {
                report(&*self, &round);
            }
        }
    }

    /// Consume the arena into its terminal result.
    ///
    /// A running match is reported as a stalemate at the current round.
    #[must_use]
    pub fn into_result(self) -> MatchResult {
        let outcome = self.outcome().unwrap_or(MatchOutcome::Stalemate { rounds: self.round });
        MatchResult {
            outcome,
            rounds: self.round,
            roster: self.roster,
        }
    }

    fn evaluate_state(&self) -> MatchState {
        let mut living = self.living();
        let first = living.next();
        let more = living.next().is_some();
        match (first, more) {
            (None, _) => MatchState::Finished(MatchOutcome::Draw),
            (Some((id, _)), false) => MatchState::Finished(MatchOutcome::Winner(id)),
            (Some(_), true) => match self.config.max_rounds {
                Some(cap) if self.round >= cap => MatchState::Finished(MatchOutcome::Stalemate {
                    rounds: self.round,
                }),
                _ => MatchState::Running,
            },
        }
    }

    #[cfg(feature = "debug-validation")]
    fn validate_invariants(&self) {
        use crate::math::Fixed;

        for combatant in &self.roster {
            assert!(combatant.life() >= Fixed::ZERO, "negative life: {combatant:?}");
            assert!(combatant.magic() >= Fixed::ZERO, "negative magic: {combatant:?}");
            if let Some(durability) = combatant.weapon().durability.current() {
                assert!(durability >= Fixed::ZERO, "negative durability: {combatant:?}");
            }
        }
    }

    /// Deterministic hash of the full arena state.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.round.hash(&mut hasher);
        self.state.hash(&mut hasher);
        self.roster.len().hash(&mut hasher);
        for combatant in &self.roster {
            combatant.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Serialize the arena to bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        bincode::serialize(self)
            .map_err(|e| ArenaError::InvalidState(format!("Failed to serialize arena: {}", e)))
    }

    /// Deserialize an arena from bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        bincode::deserialize(data)
            .map_err(|e| ArenaError::InvalidState(format!("Failed to deserialize arena: {}", e)))
    }
}

/// Run an unbounded match to completion.
pub fn run_match(roster: Vec<Combatant>, luck: &mut dyn LuckSource) -> MatchResult {
    let mut arena = Arena::new(roster);
    arena.run(luck);
    arena.into_result()
}
