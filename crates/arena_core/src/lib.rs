//! # Arena Core
//!
//! Turn-based arena combat on a one-dimensional line.
//!
//! This crate contains **only** the rules:
//! - No rendering
//! - No IO
//! - No global randomness (luck is injected through [`luck::LuckSource`])
//! - No floating-point math (uses fixed-point)
//!
//! so a seeded match replays bit for bit, can be hashed, snapshotted and
//! batch-run headless.
//!
//! ## Crate Structure
//!
//! - [`catalog`] / [`weapon`] - Weapon table, breakage fallback, durability
//! - [`archetype`] - The seven combatant classes and their damage overrides
//! - [`combatant`] - Combatant state and the damage pipeline
//! - [`combat`] - Target selection, movement and attacks
//! - [`simulation`] - Round-by-round match driver
//! - [`data`] - Serde roster definitions
//! - [`math`] - Fixed-point math utilities

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod archetype;
pub mod catalog;
pub mod combat;
pub mod combatant;
pub mod data;
pub mod error;
pub mod events;
pub mod luck;
pub mod math;
pub mod simulation;
pub mod weapon;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::archetype::{Archetype, ClassProfile};
    pub use crate::catalog::{WeaponKind, WeaponSpec};
    pub use crate::combatant::{Combatant, CombatantId, IncomingOutcome};
    pub use crate::data::{CombatantData, RosterData};
    pub use crate::error::{ArenaError, Result};
    pub use crate::events::CombatEvent;
    pub use crate::luck::{FixedLuck, LuckSource, SeededLuck};
    pub use crate::math::Fixed;
    pub use crate::simulation::{
        run_match, Arena, MatchConfig, MatchOutcome, MatchResult, MatchState, RoundReport,
    };
    pub use crate::weapon::{Durability, Weapon};
}
