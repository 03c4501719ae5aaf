//! # Arena Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Scripted luck sources
//! - Roster fixtures
//! - Determinism test harness
//! - Matchup balance statistics
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod balance;
pub mod determinism;
pub mod fixtures;
pub mod luck;

/// Re-export proptest for convenience.
pub use proptest;
