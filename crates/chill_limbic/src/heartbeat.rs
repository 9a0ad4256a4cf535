//! Alert cooldown heartbeat
//!
//! The boss loses interest over time: every `interval` the alert level drops
//! by one. Runs as a background task sharing the executor's session lock.

use crate::executor::ActionExecutor;
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub struct CooldownConfig {
    /// How often the alert level drops by one (default: 300s)
    pub interval: Duration,
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(300),
        }
    }
}

impl ActionExecutor {
    /// Spawn the cooldown task. Abort the handle to stop it.
    pub fn spawn_cooldown(&self, config: CooldownConfig) -> JoinHandle<()> {
        let session = self.session();
        let period = config.interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            // First tick completes immediately
            interval.tick().await;

            loop {
                interval.tick().await;
                let mut guard = session.write().await;
                if guard.mood.lower_alert() {
                    tracing::info!("Boss calming down, alert level now {}", guard.mood.alert_level());
                }
            }
        })
    }
}
