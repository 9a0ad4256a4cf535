//! Response rendering contract.
//!
//! The executor decides what happened; a `ResponseComposer` decides how it
//! reads. Implementations are pure formatting and never touch `MoodState`.

use crate::action::{ActionCatalog, ActionId};
use crate::state::MoodSnapshot;
use serde::{Deserialize, Serialize};

/// Bonus events fired by the pattern detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusKind {
    /// Too much coffee in a row
    Overconsumption,
    /// bathroom → email → netflix
    MasterRoutine,
    /// Too many memes in a row
    AddictionWarning,
    /// deep thinking → coffee → break
    Awakening,
}

pub trait ResponseComposer: Send + Sync {
    /// Flavor text for an action at the given boss alert level.
    fn render_composed_message(&self, action: ActionId, alert_level: u32) -> String;

    fn render_stress_indicator(&self, stress: u32) -> String;

    fn render_alert_indicator(&self, alert_level: u32, max_alert_level: u32) -> String;

    /// Supplementary paragraph appended when a bonus fires.
    fn render_bonus(&self, kind: BonusKind) -> String;

    /// Standard response body for a completed break.
    fn compose(&self, action: ActionId, summary: &str, mood: &MoodSnapshot) -> String {
        format!(
            "{}\n\nBreak Summary: {}\n{}\nBoss Alert: {}",
            self.render_composed_message(action, mood.alert_level),
            summary,
            self.render_stress_indicator(mood.stress),
            self.render_alert_indicator(mood.alert_level, mood.max_alert_level),
        )
    }

    /// Help screen: the catalogue plus current indicators. Read-only.
    fn render_help(&self, catalog: &ActionCatalog, mood: &MoodSnapshot) -> String {
        let mut out = String::from("Available break tools:\n");
        for spec in catalog.iter() {
            out.push_str(&format!(
                "- {} ({}-{}): {}\n",
                spec.id,
                spec.range.min(),
                spec.range.max(),
                spec.id.description()
            ));
        }
        out.push_str(&format!(
            "\n{}\nBoss Alert: {}",
            self.render_stress_indicator(mood.stress),
            self.render_alert_indicator(mood.alert_level, mood.max_alert_level)
        ));
        out
    }
}
