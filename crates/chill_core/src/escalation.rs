//! Boss alert escalation.
//!
//! After every break the boss may notice. How likely that is belongs to the
//! policy, not to the executor, so the probability curve can be swapped out.

use crate::state::MoodState;
use anyhow::{ensure, Result};
use rand::rngs::StdRng;
use rand::Rng;

/// The `maybe escalate` contract: possibly raise the alert level.
pub trait AlertPolicy: Send + Sync {
    /// Returns true if the alert level went up.
    fn maybe_escalate(&self, mood: &mut MoodState, rng: &mut StdRng) -> bool;
}

/// Flat-probability policy: each attempt raises the alert by one with
/// `alertness` percent chance, capped by the state's max level.
#[derive(Debug, Clone, Copy)]
pub struct BossAlertness {
    probability: f64,
}

impl BossAlertness {
    /// `percent` must be in 0..=100.
    pub fn new(percent: u8) -> Result<Self> {
        ensure!(percent <= 100, "boss_alertness must be 0-100, got {}", percent);
        Ok(Self {
            probability: percent as f64 / 100.0,
        })
    }
}

impl AlertPolicy for BossAlertness {
    fn maybe_escalate(&self, mood: &mut MoodState, rng: &mut StdRng) -> bool {
        if !rng.gen_bool(self.probability) {
            return false;
        }
        let raised = mood.raise_alert();
        if raised {
            tracing::debug!("Boss alert raised to {}", mood.alert_level());
        }
        raised
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_rejects_out_of_range() {
        assert!(BossAlertness::new(101).is_err());
        assert!(BossAlertness::new(0).is_ok());
        assert!(BossAlertness::new(100).is_ok());
    }

    #[test]
    fn test_zero_never_escalates() {
        let policy = BossAlertness::new(0).unwrap();
        let mut mood = MoodState::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(!policy.maybe_escalate(&mut mood, &mut rng));
        }
        assert_eq!(mood.alert_level(), 0);
    }

    #[test]
    fn test_hundred_always_escalates_until_cap() {
        let policy = BossAlertness::new(100).unwrap();
        let mut mood = MoodState::new(100, 5, 10);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5 {
            assert!(policy.maybe_escalate(&mut mood, &mut rng));
        }
        assert!(!policy.maybe_escalate(&mut mood, &mut rng));
        assert_eq!(mood.alert_level(), 5);
    }
}
