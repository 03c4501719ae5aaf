//! Data structures for roster configuration.
//!
//! Pure serde types describing who enters the arena. They are deserialized
//! from RON and converted into validated [`Combatant`](crate::combatant::Combatant)s.
//!
//! **Note:** This module contains no IO. File loading is handled by
//! `arena_headless`.

mod roster_data;

pub use roster_data::{CombatantData, RosterData};
