//! Test fixtures and helpers.
//!
//! Pre-built rosters for consistent testing.

use arena_core::archetype::Archetype;
use arena_core::combatant::Combatant;
use arena_core::data::{CombatantData, RosterData};
use fixed::types::I32F32;

/// Create a fixed-point number from an integer.
#[must_use]
pub fn fixed(n: i32) -> I32F32 {
    I32F32::from_num(n)
}

/// Create a fixed-point number from a float (for tests only).
///
/// Note: In real simulation code, never use floats.
/// This is only for convenient test setup.
#[must_use]
pub fn fixed_f(n: f64) -> I32F32 {
    I32F32::from_num(n)
}

/// The six-fighter line-up every demo match starts from.
#[must_use]
pub fn classic_roster_data() -> RosterData {
    RosterData::from(vec![
        CombatantData::new("Alyosha Popovich", Archetype::Warrior, 0),
        CombatantData::new("Legolas", Archetype::Archer, 2),
        CombatantData::new("Gandalf", Archetype::Mage, 4),
        CombatantData::new("Gimli", Archetype::Dwarf, 1),
        CombatantData::new("Crossbow Master", Archetype::Crossbowman, 3),
        CombatantData::new("Great Demiurge", Archetype::Demiurge, 5),
    ])
}

/// Built [`classic_roster_data`].
///
/// # Panics
///
/// Never in practice: every entry is valid.
#[must_use]
pub fn classic_roster() -> Vec<Combatant> {
    classic_roster_data()
        .build()
        .expect("classic roster is valid")
}

/// Two combatants `distance` apart, the first at the origin.
///
/// # Panics
///
/// Panics if `distance` is negative.
#[must_use]
pub fn duel(first: Archetype, second: Archetype, distance: i64) -> Vec<Combatant> {
    vec![
        Combatant::new(first, 0, first.description()).expect("origin is valid"),
        Combatant::new(second, distance, second.description()).expect("distance must be >= 0"),
    ]
}

/// One combatant of every archetype, side by side in declaration order.
#[must_use]
pub fn one_of_each() -> Vec<Combatant> {
    Archetype::ALL
        .into_iter()
        .zip(0_i64..)
        .map(|(archetype, position)| {
            Combatant::new(archetype, position, archetype.description())
                .expect("positions start at 0")
        })
        .collect()
}
