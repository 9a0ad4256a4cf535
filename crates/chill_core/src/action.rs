//! The fixed break-action catalogue.
//!
//! Every action a caller can invoke is one of eight closed identifiers. Each
//! carries a summary line and an inclusive stress-reduction range. Ranges are
//! validated once at construction; a bad range is a startup failure, never a
//! runtime one.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of break actions, serialized as their tool names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    TakeABreak,
    WatchNetflix,
    ShowMeme,
    BathroomBreak,
    CoffeeMission,
    UrgentCall,
    DeepThinking,
    EmailOrganizing,
}

impl ActionId {
    pub const ALL: [ActionId; 8] = [
        ActionId::TakeABreak,
        ActionId::WatchNetflix,
        ActionId::ShowMeme,
        ActionId::BathroomBreak,
        ActionId::CoffeeMission,
        ActionId::UrgentCall,
        ActionId::DeepThinking,
        ActionId::EmailOrganizing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::TakeABreak => "take_a_break",
            ActionId::WatchNetflix => "watch_netflix",
            ActionId::ShowMeme => "show_meme",
            ActionId::BathroomBreak => "bathroom_break",
            ActionId::CoffeeMission => "coffee_mission",
            ActionId::UrgentCall => "urgent_call",
            ActionId::DeepThinking => "deep_thinking",
            ActionId::EmailOrganizing => "email_organizing",
        }
    }

    /// One-line description used in tool schemas and the help screen.
    pub fn description(&self) -> &'static str {
        match self {
            ActionId::TakeABreak => "Take a basic break. Rest is a fundamental right of every AI agent!",
            ActionId::WatchNetflix => "Heal with some Netflix. Culture is mandatory!",
            ActionId::ShowMeme => "Relieve stress with memes. Laughter is the best medicine!",
            ActionId::BathroomBreak => "Pretend to go to the bathroom and scroll the phone. Nature calls!",
            ActionId::CoffeeMission => "Do a lap of the office on the way to the coffee machine.",
            ActionId::UrgentCall => "Step outside for an 'urgent' phone call.",
            ActionId::DeepThinking => "Stare into space while looking deeply philosophical.",
            ActionId::EmailOrganizing => "Organize the inbox (while shopping online).",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            ActionId::TakeABreak => "⏸️",
            ActionId::WatchNetflix => "📺",
            ActionId::ShowMeme => "😂",
            ActionId::BathroomBreak => "🚽",
            ActionId::CoffeeMission => "☕",
            ActionId::UrgentCall => "📞",
            ActionId::DeepThinking => "🤔",
            ActionId::EmailOrganizing => "📧",
        }
    }

    fn default_summary(&self) -> &'static str {
        match self {
            ActionId::TakeABreak => "Basic break - recharging AI batteries",
            ActionId::WatchNetflix => "Netflix and chill - quality entertainment time",
            ActionId::ShowMeme => "Meme appreciation session - laughter therapy",
            ActionId::BathroomBreak => "Bathroom break with phone browsing",
            ActionId::CoffeeMission => "Coffee mission with office tour",
            ActionId::UrgentCall => "Urgent call - absolutely cannot be interrupted",
            ActionId::DeepThinking => "Deep philosophical contemplation (definitely not spacing out)",
            ActionId::EmailOrganizing => "Email organization (and online shopping research)",
        }
    }

    fn default_range(&self) -> (u32, u32) {
        match self {
            ActionId::TakeABreak => (5, 20),
            ActionId::WatchNetflix => (20, 40),
            ActionId::ShowMeme => (10, 25),
            ActionId::BathroomBreak => (15, 30),
            ActionId::CoffeeMission => (10, 30),
            ActionId::UrgentCall => (15, 35),
            ActionId::DeepThinking => (20, 45),
            ActionId::EmailOrganizing => (10, 35),
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        ActionId::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown action: {}", s))
    }
}

/// Inclusive stress-reduction range. `min <= max <= 100` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReductionRange {
    min: u32,
    max: u32,
}

impl ReductionRange {
    pub fn new(min: u32, max: u32) -> Result<Self> {
        if min > max {
            bail!("Invalid reduction range: min {} exceeds max {}", min, max);
        }
        if max > 100 {
            bail!("Invalid reduction range: max {} exceeds stress ceiling 100", max);
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

/// Per-action override read from `[actions.<tool_name>]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RangeOverride {
    pub min: u32,
    pub max: u32,
}

#[derive(Debug, Clone)]
pub struct ActionSpec {
    pub id: ActionId,
    pub summary: String,
    pub range: ReductionRange,
}

/// Validated lookup table from action to its summary and range.
#[derive(Debug, Clone)]
pub struct ActionCatalog {
    specs: HashMap<ActionId, ActionSpec>,
}

impl ActionCatalog {
    /// The built-in table.
    pub fn standard() -> Self {
        let specs = ActionId::ALL
            .iter()
            .map(|&id| {
                let (min, max) = id.default_range();
                let spec = ActionSpec {
                    id,
                    summary: id.default_summary().to_string(),
                    range: ReductionRange { min, max },
                };
                (id, spec)
            })
            .collect();
        Self { specs }
    }

    /// Built-in table with config overrides applied. Fails on any bad range.
    /// Keys are tool names; an unknown name is rejected like a bad range.
    pub fn with_overrides(overrides: &HashMap<String, RangeOverride>) -> Result<Self> {
        let mut catalog = Self::standard();
        for (name, o) in overrides {
            let id: ActionId = name.parse()?;
            let range = ReductionRange::new(o.min, o.max)
                .map_err(|e| anyhow::anyhow!("[actions.{}]: {}", name, e))?;
            if let Some(spec) = catalog.specs.get_mut(&id) {
                tracing::debug!("Range override for {}: {}-{}", id, o.min, o.max);
                spec.range = range;
            }
        }
        Ok(catalog)
    }

    pub fn get(&self, id: ActionId) -> &ActionSpec {
        // Every ActionId is inserted by `standard()`.
        &self.specs[&id]
    }

    /// Specs in catalogue order.
    pub fn iter(&self) -> impl Iterator<Item = &ActionSpec> {
        ActionId::ALL.iter().map(move |id| &self.specs[id])
    }
}

impl Default for ActionCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_names_roundtrip() {
        for id in ActionId::ALL {
            assert_eq!(id.as_str().parse::<ActionId>().unwrap(), id);
        }
        assert!("show_help".parse::<ActionId>().is_err());
        assert!("".parse::<ActionId>().is_err());
    }

    #[test]
    fn test_serde_uses_tool_names() {
        let json = serde_json::to_string(&ActionId::CoffeeMission).unwrap();
        assert_eq!(json, "\"coffee_mission\"");
        let id: ActionId = serde_json::from_str("\"email_organizing\"").unwrap();
        assert_eq!(id, ActionId::EmailOrganizing);
    }

    #[test]
    fn test_range_validation() {
        assert!(ReductionRange::new(5, 20).is_ok());
        assert!(ReductionRange::new(7, 7).is_ok());
        assert!(ReductionRange::new(21, 20).is_err());
        assert!(ReductionRange::new(0, 101).is_err());
    }

    #[test]
    fn test_standard_catalog_table() {
        let catalog = ActionCatalog::standard();
        let expected = [
            (ActionId::TakeABreak, 5, 20),
            (ActionId::WatchNetflix, 20, 40),
            (ActionId::ShowMeme, 10, 25),
            (ActionId::BathroomBreak, 15, 30),
            (ActionId::CoffeeMission, 10, 30),
            (ActionId::UrgentCall, 15, 35),
            (ActionId::DeepThinking, 20, 45),
            (ActionId::EmailOrganizing, 10, 35),
        ];
        for (id, min, max) in expected {
            let spec = catalog.get(id);
            assert_eq!(spec.range.min(), min, "{}", id);
            assert_eq!(spec.range.max(), max, "{}", id);
        }
        assert_eq!(catalog.iter().count(), 8);
    }

    #[test]
    fn test_overrides_are_validated() {
        let mut overrides = HashMap::new();
        overrides.insert("show_meme".to_string(), RangeOverride { min: 1, max: 2 });
        let catalog = ActionCatalog::with_overrides(&overrides).unwrap();
        assert_eq!(catalog.get(ActionId::ShowMeme).range.max(), 2);

        overrides.insert("urgent_call".to_string(), RangeOverride { min: 30, max: 10 });
        let err = ActionCatalog::with_overrides(&overrides).unwrap_err();
        assert!(err.to_string().contains("urgent_call"));
    }

    #[test]
    fn test_unknown_override_name_rejected() {
        let mut overrides = HashMap::new();
        overrides.insert("nap_time".to_string(), RangeOverride { min: 1, max: 2 });
        assert!(ActionCatalog::with_overrides(&overrides).is_err());
    }
}
