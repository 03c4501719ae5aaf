//! Roster entries as they appear in scenario files.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::catalog::WeaponKind;
use crate::combatant::Combatant;
use crate::error::{ArenaError, Result};

/// One combatant in a roster file.
///
/// # Example RON
///
/// ```ron
/// CombatantData(
///     name: "Legolas",
///     archetype: "archer",
///     position: 2,
///     weapon: Some("long_bow"),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantData {
    /// Display name.
    pub name: String,

    /// Archetype identifier (`"warrior"`, `"crossbowman"`, ...).
    pub archetype: String,

    /// Starting position on the line.
    pub position: i64,

    /// Replace the archetype's starting weapon with this catalog weapon.
    #[serde(default)]
    pub weapon: Option<String>,
}

impl CombatantData {
    /// Entry with the archetype's default weapon.
    pub fn new(name: impl Into<String>, archetype: Archetype, position: i64) -> Self {
        Self {
            name: name.into(),
            archetype: archetype.id().to_string(),
            position,
            weapon: None,
        }
    }

    /// Build the combatant this entry describes.
    ///
    /// # Errors
    ///
    /// Unknown archetype or weapon identifiers, or a negative position.
    pub fn build(&self) -> Result<Combatant> {
        let archetype: Archetype = self.archetype.parse()?;
        let combatant = Combatant::new(archetype, self.position, self.name.clone())?;
        match &self.weapon {
            Some(id) => {
                let kind: WeaponKind = id.parse()?;
                Ok(combatant.with_weapon(kind.forge()))
            }
            None => Ok(combatant),
        }
    }
}

/// An ordered roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterData {
    /// Entries in roster (turn) order.
    pub entries: Vec<CombatantData>,
}

impl RosterData {
    /// Parse a roster document. `label` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::DataParseError`] on malformed RON.
    pub fn from_ron_str(label: &str, content: &str) -> Result<Self> {
        ron::from_str(content).map_err(|e| ArenaError::DataParseError {
            path: label.to_string(),
            message: e.to_string(),
        })
    }

    /// Build every entry, failing on the first invalid one.
    ///
    /// # Errors
    ///
    /// See [`CombatantData::build`].
    pub fn build(&self) -> Result<Vec<Combatant>> {
        self.entries.iter().map(CombatantData::build).collect()
    }

    /// Validate every entry, collecting all problems.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                entry
                    .build()
                    .err()
                    .map(|e| format!("Entry {} ('{}'): {}", index, entry.name, e))
            })
            .collect();

        if self.entries.len() < 2 {
            errors.push(format!(
                "Roster has {} entries, a match needs at least 2",
                self.entries.len()
            ));
        }

        errors
    }
}

impl From<Vec<CombatantData>> for RosterData {
    fn from(entries: Vec<CombatantData>) -> Self {
        Self { entries }
    }
}
