//! Mood State: the two scalar simulation values plus the action log.
//!
//! - `stress` (0 - 100): lower is better, reduced by every break action
//! - `alert_level` (0 - max): how close the boss is to noticing
//! - `history`: the last N invoked actions, oldest first
//! - `streaks`: consecutive-invocation counters, only one ever non-zero
//!
//! The state is plain data. Ownership and locking belong to whoever holds it.

use crate::action::ActionId;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

pub const STRESS_CEILING: u32 = 100;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;
pub const DEFAULT_MAX_ALERT: u32 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodState {
    stress: u32,
    alert_level: u32,
    max_alert_level: u32,
    history: VecDeque<ActionId>,
    history_capacity: usize,
    streaks: HashMap<ActionId, u32>,

    /// Unix timestamp of last mutation
    pub last_updated: i64,
}

impl Default for MoodState {
    fn default() -> Self {
        Self::new(STRESS_CEILING, DEFAULT_MAX_ALERT, DEFAULT_HISTORY_CAPACITY)
    }
}

impl MoodState {
    /// Out-of-range inputs are clamped: stress to the ceiling, capacity to at least 1.
    pub fn new(initial_stress: u32, max_alert_level: u32, history_capacity: usize) -> Self {
        let history_capacity = history_capacity.max(1);
        Self {
            stress: initial_stress.min(STRESS_CEILING),
            alert_level: 0,
            max_alert_level,
            history: VecDeque::with_capacity(history_capacity),
            history_capacity,
            streaks: HashMap::new(),
            last_updated: chrono::Utc::now().timestamp(),
        }
    }

    pub fn stress(&self) -> u32 {
        self.stress
    }

    pub fn alert_level(&self) -> u32 {
        self.alert_level
    }

    pub fn max_alert_level(&self) -> u32 {
        self.max_alert_level
    }

    pub fn history(&self) -> &VecDeque<ActionId> {
        &self.history
    }

    /// Current streak for `action` (0 if never invoked).
    pub fn streak(&self, action: ActionId) -> u32 {
        self.streaks.get(&action).copied().unwrap_or(0)
    }

    /// The last `n` history entries, oldest first. Shorter if history is shorter.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &ActionId> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip)
    }

    pub fn decrease_stress(&mut self, amount: u32) {
        self.stress = self.stress.saturating_sub(amount);
        self.touch();
    }

    pub fn increase_stress(&mut self, amount: u32) {
        self.stress = self.stress.saturating_add(amount).min(STRESS_CEILING);
        self.touch();
    }

    /// Set stress outright, clamped to the ceiling.
    pub fn force_stress(&mut self, value: u32) {
        self.stress = value.min(STRESS_CEILING);
        self.touch();
    }

    /// Raise the alert level by one. Returns false if already at the cap.
    pub fn raise_alert(&mut self) -> bool {
        if self.alert_level >= self.max_alert_level {
            return false;
        }
        self.alert_level += 1;
        self.touch();
        true
    }

    /// Lower the alert level by one. Returns false if already at zero.
    pub fn lower_alert(&mut self) -> bool {
        if self.alert_level == 0 {
            return false;
        }
        self.alert_level -= 1;
        self.touch();
        true
    }

    /// Append to history (evicting the oldest on overflow), bump this action's
    /// streak and zero every other streak.
    pub fn record_action(&mut self, action: ActionId) {
        self.history.push_back(action);
        while self.history.len() > self.history_capacity {
            self.history.pop_front();
        }

        for (id, count) in self.streaks.iter_mut() {
            if *id != action {
                *count = 0;
            }
        }
        *self.streaks.entry(action).or_insert(0) += 1;
        self.touch();
    }

    pub fn reset_streak(&mut self, action: ActionId) {
        if let Some(count) = self.streaks.get_mut(&action) {
            *count = 0;
        }
    }

    pub fn snapshot(&self) -> MoodSnapshot {
        MoodSnapshot {
            stress: self.stress,
            alert_level: self.alert_level,
            max_alert_level: self.max_alert_level,
            history: self.history.iter().copied().collect(),
            last_updated: self.last_updated,
        }
    }

    fn touch(&mut self) {
        self.last_updated = chrono::Utc::now().timestamp();
    }
}

/// Read-only copy of the mood, for rendering and status reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodSnapshot {
    pub stress: u32,
    pub alert_level: u32,
    pub max_alert_level: u32,
    pub history: Vec<ActionId>,
    pub last_updated: i64,
}
