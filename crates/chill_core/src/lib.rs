//! # ChillMCP core
//!
//! Shared vocabulary for the break-room simulation: the action catalogue,
//! the mood state and its mutation primitives, the alert policy seam, the
//! response-rendering contract and the tool abstraction every surface
//! dispatches through.

pub mod action;
pub mod compose;
pub mod config;
pub mod escalation;
pub mod state;
pub mod tools;

pub use action::{ActionCatalog, ActionId, ActionSpec, RangeOverride, ReductionRange};
pub use compose::{BonusKind, ResponseComposer};
pub use config::ChillConfig;
pub use escalation::{AlertPolicy, BossAlertness};
pub use state::{MoodSnapshot, MoodState};
pub use tools::{Tool, ToolErrorKind, ToolHandler, ToolInputSchema, ToolOutcome, ToolRegistry};
