//! Scenario loading and configuration.
//!
//! A scenario names a roster, the seed to play it with and an optional
//! round cap. Scenarios are RON documents:
//!
//! ```ron
//! Scenario(
//!     name: "Ranged Duel",
//!     description: "Crossbowman against Demiurge",
//!     seed: 7,
//!     max_rounds: Some(5000),
//!     roster: [
//!         (name: "Crossbow Master", archetype: "crossbowman", position: 0),
//!         (name: "Great Demiurge", archetype: "demiurge", position: 8, weapon: Some("staff")),
//!     ],
//! )
//! ```

use std::path::Path;

use arena_core::archetype::Archetype;
use arena_core::combatant::Combatant;
use arena_core::data::{CombatantData, RosterData};
use arena_core::error::ArenaError;
use arena_core::simulation::{Arena, MatchConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for scenario operations.
#[derive(Error, Debug)]
pub enum ScenarioError {
    /// File not found.
    #[error("Scenario file not found: {0}")]
    FileNotFound(String),
    /// Failed to read file.
    #[error("Failed to read scenario file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse RON.
    #[error("Failed to parse scenario: {0}")]
    ParseError(#[from] ron::error::SpannedError),
    /// The roster could not be built.
    #[error("Invalid scenario: {0}")]
    Invalid(#[from] ArenaError),
}

/// A complete scenario configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    /// Scenario name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Seed for the luck source.
    #[serde(default)]
    pub seed: u64,
    /// Round cap (`None` plays until at most one survives).
    #[serde(default)]
    pub max_rounds: Option<u32>,
    /// Combatants in turn order.
    pub roster: Vec<CombatantData>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self::classic()
    }
}

impl Scenario {
    /// Load a scenario from a RON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ScenarioError::FileNotFound(path.display().to_string()));
        }
        let contents = std::fs::read_to_string(path)?;
        let scenario: Scenario = ron::from_str(&contents)?;
        Ok(scenario)
    }

    /// Load from a RON string (useful for embedded scenarios).
    pub fn from_ron_str(ron: &str) -> Result<Self, ScenarioError> {
        let scenario: Scenario = ron::from_str(ron)?;
        Ok(scenario)
    }

    /// The six-fighter free-for-all.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            name: "Classic Melee".to_string(),
            description: "Warrior, Archer, Mage, Dwarf, Crossbowman and Demiurge, free for all"
                .to_string(),
            seed: 42,
            max_rounds: None,
            roster: vec![
                CombatantData::new("Alyosha Popovich", Archetype::Warrior, 0),
                CombatantData::new("Legolas", Archetype::Archer, 2),
                CombatantData::new("Gandalf", Archetype::Mage, 4),
                CombatantData::new("Gimli", Archetype::Dwarf, 1),
                CombatantData::new("Crossbow Master", Archetype::Crossbowman, 3),
                CombatantData::new("Great Demiurge", Archetype::Demiurge, 5),
            ],
        }
    }

    /// Roster as core data.
    #[must_use]
    pub fn roster_data(&self) -> RosterData {
        RosterData::from(self.roster.clone())
    }

    /// Build the roster.
    pub fn build_roster(&self) -> Result<Vec<Combatant>, ScenarioError> {
        Ok(self.roster_data().build()?)
    }

    /// Match settings, with `max_rounds` overriding the scenario's cap.
    #[must_use]
    pub fn match_config(&self, max_rounds: Option<u32>) -> MatchConfig {
        MatchConfig {
            max_rounds: max_rounds.or(self.max_rounds),
        }
    }

    /// A fresh arena for this scenario.
    pub fn arena(&self, max_rounds: Option<u32>) -> Result<Arena, ScenarioError> {
        Ok(Arena::with_config(
            self.build_roster()?,
            self.match_config(max_rounds),
        ))
    }

    /// All problems with this scenario (empty when valid).
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = self.roster_data().validate();
        if self.name.trim().is_empty() {
            errors.push("Scenario name is empty".to_string());
        }
        if self.max_rounds == Some(0) {
            errors.push("max_rounds of 0 ends every match before it starts".to_string());
        }
        errors
    }
}
