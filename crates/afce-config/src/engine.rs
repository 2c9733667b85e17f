//! Engine timing and randomness configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default perturbation latency in milliseconds.
const fn default_perturbation_latency_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Delay between triggering a perturbation and its effect landing.
    #[serde(default = "default_perturbation_latency_ms")]
    pub perturbation_latency_ms: u64,

    /// Seed for session seeding and geometry jitter. Unset means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            perturbation_latency_ms: default_perturbation_latency_ms(),
            seed: None,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub const fn perturbation_latency(&self) -> Duration {
        Duration::from_millis(self.perturbation_latency_ms)
    }
}
