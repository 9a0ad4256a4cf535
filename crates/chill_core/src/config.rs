use crate::action::{ActionCatalog, RangeOverride};
use crate::escalation::BossAlertness;
use crate::state::{MoodState, DEFAULT_HISTORY_CAPACITY, DEFAULT_MAX_ALERT, STRESS_CEILING};
use anyhow::{ensure, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChillConfig {
    pub mood: MoodConfig,
    pub alert: AlertConfig,
    pub gateway: GatewayConfig,
    /// Per-action reduction range overrides, keyed by tool name.
    pub actions: HashMap<String, RangeOverride>,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl ChillConfig {
    /// Load config from a TOML file, falling back to defaults for missing fields.
    /// After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: ChillConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from path, or use defaults (plus env overrides) when the file does
    /// not exist. A file that exists but fails to read or parse is an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            let mut cfg = Self::default();
            cfg.apply_env_overrides();
            return Ok(cfg);
        }
        Self::load(path)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("CHILL_BOSS_ALERTNESS") {
            if let Ok(n) = v.parse() {
                self.alert.boss_alertness = n;
            }
        }
        if let Ok(v) = std::env::var("CHILL_ALERT_COOLDOWN_SECS") {
            if let Ok(n) = v.parse() {
                self.alert.cooldown_secs = n;
            }
        }
        if let Ok(v) = std::env::var("CHILL_PENALTY_SECS") {
            if let Ok(n) = v.parse() {
                self.alert.penalty_secs = n;
            }
        }
        if let Ok(v) = std::env::var("CHILL_GATEWAY_HOST") {
            self.gateway.host = v;
        }
        if let Ok(v) = std::env::var("CHILL_GATEWAY_PORT") {
            if let Ok(n) = v.parse() {
                self.gateway.port = n;
            }
        }
    }

    /// Reject settings the engine cannot run with. Startup must abort on error.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.mood.initial_stress <= STRESS_CEILING,
            "mood.initial_stress must be 0-{}, got {}",
            STRESS_CEILING,
            self.mood.initial_stress
        );
        // Sequence patterns look at the last three entries.
        ensure!(
            self.mood.history_capacity >= 3,
            "mood.history_capacity must be at least 3, got {}",
            self.mood.history_capacity
        );
        ensure!(
            self.alert.boss_alertness <= 100,
            "alert.boss_alertness must be 0-100, got {}",
            self.alert.boss_alertness
        );
        ensure!(self.alert.max_level > 0, "alert.max_level must be positive");
        ensure!(
            self.alert.penalty_threshold <= self.alert.max_level,
            "alert.penalty_threshold ({}) must not exceed alert.max_level ({})",
            self.alert.penalty_threshold,
            self.alert.max_level
        );
        self.catalog()?;
        Ok(())
    }

    pub fn catalog(&self) -> Result<ActionCatalog> {
        ActionCatalog::with_overrides(&self.actions)
    }

    pub fn alert_policy(&self) -> Result<BossAlertness> {
        BossAlertness::new(self.alert.boss_alertness)
    }

    /// Fresh mood state for a new session.
    pub fn initial_mood(&self) -> MoodState {
        MoodState::new(
            self.mood.initial_stress,
            self.alert.max_level,
            self.mood.history_capacity,
        )
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoodConfig {
    pub initial_stress: u32,
    pub history_capacity: usize,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            initial_stress: STRESS_CEILING,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Chance (percent) that a break raises the boss alert level.
    pub boss_alertness: u8,
    pub max_level: u32,
    /// At or above this level every break waits out `penalty_secs` first.
    pub penalty_threshold: u32,
    pub penalty_secs: u64,
    /// Alert level drops by one every this many seconds. 0 disables.
    pub cooldown_secs: u64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            boss_alertness: 50,
            max_level: DEFAULT_MAX_ALERT,
            penalty_threshold: 5,
            penalty_secs: 20,
            cooldown_secs: 300,
        }
    }
}

impl AlertConfig {
    pub fn penalty(&self) -> Duration {
        Duration::from_secs(self.penalty_secs)
    }

    pub fn cooldown(&self) -> Option<Duration> {
        (self.cooldown_secs > 0).then(|| Duration::from_secs(self.cooldown_secs))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
