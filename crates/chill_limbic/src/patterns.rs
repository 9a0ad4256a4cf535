//! Hidden pattern detection
//!
//! After every break the detector scans the action log for combos. Triggers
//! are plain data: a condition over (current action, streaks, history tail)
//! plus a list of effects. They are evaluated in order and the first match
//! wins, so priority is just list position.
//!
//! Must run after the current action is recorded, otherwise a sequence can
//! never see its own completing step.

use chill_core::{ActionId, AlertPolicy, BonusKind, MoodState};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerCondition {
    /// The current action is `action` and its streak reached `at_least`.
    Streak { action: ActionId, at_least: u32 },
    /// The history ends with exactly these actions, in order.
    Sequence(Vec<ActionId>),
}

impl TriggerCondition {
    pub fn matches(&self, current: ActionId, mood: &MoodState) -> bool {
        match self {
            TriggerCondition::Streak { action, at_least } => {
                current == *action && mood.streak(*action) >= *at_least
            }
            TriggerCondition::Sequence(seq) => {
                !seq.is_empty()
                    && mood.history().len() >= seq.len()
                    && mood.recent(seq.len()).eq(seq.iter())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEffect {
    ReduceStress(u32),
    /// Set stress to an exact value
    ForceStress(u32),
    /// One more roll of the alert policy
    EscalateAlert,
    ResetStreak(ActionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTrigger {
    pub kind: BonusKind,
    pub condition: TriggerCondition,
    pub effects: Vec<TriggerEffect>,
}

/// Ordered trigger list; first match wins.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    triggers: Vec<PatternTrigger>,
}

impl PatternDetector {
    pub fn new(triggers: Vec<PatternTrigger>) -> Self {
        Self { triggers }
    }

    /// The four hidden combos, in priority order.
    pub fn standard() -> Self {
        use ActionId::*;
        use TriggerEffect::*;

        Self::new(vec![
            PatternTrigger {
                kind: BonusKind::Overconsumption,
                condition: TriggerCondition::Streak { action: CoffeeMission, at_least: 7 },
                effects: vec![ReduceStress(10), EscalateAlert, ResetStreak(CoffeeMission)],
            },
            PatternTrigger {
                kind: BonusKind::MasterRoutine,
                condition: TriggerCondition::Sequence(vec![
                    BathroomBreak,
                    EmailOrganizing,
                    WatchNetflix,
                ]),
                effects: vec![ReduceStress(50)],
            },
            PatternTrigger {
                kind: BonusKind::AddictionWarning,
                condition: TriggerCondition::Streak { action: ShowMeme, at_least: 5 },
                effects: vec![EscalateAlert, ResetStreak(ShowMeme)],
            },
            PatternTrigger {
                kind: BonusKind::Awakening,
                condition: TriggerCondition::Sequence(vec![DeepThinking, CoffeeMission, TakeABreak]),
                effects: vec![ReduceStress(100), ForceStress(0)],
            },
        ])
    }

    pub fn triggers(&self) -> &[PatternTrigger] {
        &self.triggers
    }

    /// Find the first matching trigger, apply its effects and report its kind.
    pub fn detect(
        &self,
        current: ActionId,
        mood: &mut MoodState,
        policy: &dyn AlertPolicy,
        rng: &mut StdRng,
    ) -> Option<BonusKind> {
        let trigger = self.triggers.iter().find(|t| t.condition.matches(current, mood))?;

        for effect in &trigger.effects {
            match effect {
                TriggerEffect::ReduceStress(n) => mood.decrease_stress(*n),
                TriggerEffect::ForceStress(n) => mood.force_stress(*n),
                TriggerEffect::EscalateAlert => {
                    policy.maybe_escalate(mood, rng);
                }
                TriggerEffect::ResetStreak(a) => mood.reset_streak(*a),
            }
        }

        tracing::info!("Hidden pattern fired: {:?} (after {})", trigger.kind, current);
        Some(trigger.kind)
    }
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::standard()
    }
}
