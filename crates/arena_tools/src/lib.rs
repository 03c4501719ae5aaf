//! # Arena Development Tools
//!
//! Command-line tools for development:
//! - Scenario validation
//! - Weapon and class table dump

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod validate;
