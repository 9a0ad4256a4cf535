//! # Chill Limbic System
//!
//! Owns the live mood session and everything that mutates it:
//!
//! - `ActionExecutor`: the shared lifecycle every break action runs through
//! - `PatternDetector`: hidden combos that fire bonus effects
//! - cooldown heartbeat: the boss slowly forgets
//!
//! The session (mood + RNG) sits behind a single `tokio::sync::RwLock`. A
//! caller waiting out a penalty never holds it.

mod executor;
mod heartbeat;
pub mod patterns;
pub mod tools;

pub use executor::{ActionExecutor, BreakReport};
pub use heartbeat::CooldownConfig;
pub use patterns::{PatternDetector, PatternTrigger, TriggerCondition, TriggerEffect};
pub use tools::{register_all, BreakToolHandler, HelpToolHandler, HELP_TOOL};
