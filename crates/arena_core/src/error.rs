//! Error types for the arena core.

use thiserror::Error;

/// Result type alias using [`ArenaError`].
pub type Result<T> = std::result::Result<T, ArenaError>;

/// Top-level error type for roster construction and state snapshots.
///
/// Gameplay itself never fails; only building a roster or encoding a
/// snapshot can.
#[derive(Debug, Error)]
pub enum ArenaError {
    /// A combatant was placed left of the origin.
    #[error("Combatant '{name}' has negative position {position}")]
    NegativePosition {
        /// Name of the rejected combatant.
        name: String,
        /// The offending position.
        position: i64,
    },

    /// Archetype identifier not in the fixed class table.
    #[error("Unknown archetype: {0}")]
    UnknownArchetype(String),

    /// Weapon identifier not in the weapon catalog.
    #[error("Unknown weapon: {0}")]
    UnknownWeapon(String),

    /// Data file parsing error.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// Path (or label) of the document that failed to parse.
        path: String,
        /// Error message.
        message: String,
    },

    /// Invalid arena state.
    #[error("Invalid arena state: {0}")]
    InvalidState(String),
}
