//! Action execution lifecycle
//!
//! Every break runs the same pipeline:
//! 1. Penalty wait if the boss is on high alert (no lock held while waiting)
//! 2. Random stress reduction from the action's range
//! 3. One roll of the alert policy
//! 4. History + streak bookkeeping
//! 5. Pattern detection
//! 6. Response composition (plus the bonus paragraph, if any)
//!
//! Steps 2-5 run under one write lock so concurrent callers cannot
//! interleave their bookkeeping.

use crate::patterns::PatternDetector;
use chill_core::{
    ActionCatalog, ActionId, AlertPolicy, BonusKind, ChillConfig, MoodSnapshot, MoodState,
    ReductionRange, ResponseComposer,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Mood plus the RNG that drives it. Locked as one unit.
pub(crate) struct Session {
    pub(crate) mood: MoodState,
    pub(crate) rng: StdRng,
}

pub(crate) type SharedSession = Arc<RwLock<Session>>;

/// What one break did.
#[derive(Debug, Clone)]
pub struct BreakReport {
    pub action: ActionId,
    /// Full response text returned to the caller
    pub text: String,
    pub bonus: Option<BonusKind>,
    /// Whether the penalty wait ran
    pub penalized: bool,
    pub stress_reduction: u32,
    /// Mood right after the break (bonus effects included)
    pub mood: MoodSnapshot,
}

pub struct ActionExecutor {
    session: SharedSession,
    catalog: ActionCatalog,
    detector: PatternDetector,
    policy: Arc<dyn AlertPolicy>,
    composer: Arc<dyn ResponseComposer>,
    penalty_threshold: u32,
    penalty: Duration,
}

impl ActionExecutor {
    /// Standard patterns, 20s penalty at alert level 5, entropy-seeded RNG.
    pub fn new(
        mood: MoodState,
        catalog: ActionCatalog,
        policy: Arc<dyn AlertPolicy>,
        composer: Arc<dyn ResponseComposer>,
    ) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session {
                mood,
                rng: StdRng::from_entropy(),
            })),
            catalog,
            detector: PatternDetector::standard(),
            policy,
            composer,
            penalty_threshold: 5,
            penalty: Duration::from_secs(20),
        }
    }

    /// Validate the config and build an executor from it.
    pub fn from_config(config: &ChillConfig, composer: Arc<dyn ResponseComposer>) -> anyhow::Result<Self> {
        config.validate()?;
        let mut executor = Self::new(
            config.initial_mood(),
            config.catalog()?,
            Arc::new(config.alert_policy()?),
            composer,
        )
        .with_penalty(config.alert.penalty_threshold, config.alert.penalty());
        if let Some(seed) = config.seed {
            executor = executor.with_seed(seed);
        }
        Ok(executor)
    }

    pub fn with_penalty(mut self, threshold: u32, wait: Duration) -> Self {
        self.penalty_threshold = threshold;
        self.penalty = wait;
        self
    }

    /// Deterministic RNG, for reproducible sessions and tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        match Arc::get_mut(&mut self.session) {
            Some(lock) => lock.get_mut().rng = StdRng::seed_from_u64(seed),
            None => tracing::warn!("Session already shared, seed {} ignored", seed),
        }
        self
    }

    pub fn catalog(&self) -> &ActionCatalog {
        &self.catalog
    }

    pub(crate) fn session(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    /// Run a catalogue action with its configured summary and range.
    pub async fn execute(&self, action: ActionId) -> BreakReport {
        let spec = self.catalog.get(action);
        let summary = spec.summary.clone();
        let range = spec.range;
        self.run(action, &summary, range).await
    }

    /// The full break lifecycle.
    pub async fn run(&self, action: ActionId, summary: &str, range: ReductionRange) -> BreakReport {
        let alert_level = self.session.read().await.mood.alert_level();
        let penalized = alert_level >= self.penalty_threshold;
        if penalized {
            tracing::warn!(
                "Boss alert at {}: {} waits {:?} before slacking off",
                alert_level,
                action,
                self.penalty
            );
            tokio::time::sleep(self.penalty).await;
        }

        let (stress_reduction, bonus, mood) = {
            let mut guard = self.session.write().await;
            let Session { mood, rng } = &mut *guard;

            let reduction = rng.gen_range(range.min()..=range.max());
            mood.decrease_stress(reduction);
            self.policy.maybe_escalate(mood, rng);
            mood.record_action(action);
            let bonus = self.detector.detect(action, mood, self.policy.as_ref(), rng);

            (reduction, bonus, mood.snapshot())
        };

        tracing::debug!(
            "{} done: -{} stress → {}, alert {}",
            action,
            stress_reduction,
            mood.stress,
            mood.alert_level
        );

        let mut text = self.composer.compose(action, summary, &mood);
        if let Some(kind) = bonus {
            text.push_str("\n\n");
            text.push_str(&self.composer.render_bonus(kind));
        }

        BreakReport {
            action,
            text,
            bonus,
            penalized,
            stress_reduction,
            mood,
        }
    }

    pub async fn snapshot(&self) -> MoodSnapshot {
        self.session.read().await.mood.snapshot()
    }

    /// Current streak counter for one action.
    pub async fn streak(&self, action: ActionId) -> u32 {
        self.session.read().await.mood.streak(action)
    }

    /// Help screen with live indicators. Does not mutate anything.
    pub async fn help_text(&self) -> String {
        let mood = self.snapshot().await;
        self.composer.render_help(&self.catalog, &mood)
    }

    /// Direct state access (for testing or manual intervention)
    pub async fn update_mood<F>(&self, f: F)
    where
        F: FnOnce(&mut MoodState),
    {
        let mut guard = self.session.write().await;
        f(&mut guard.mood);
    }
}
