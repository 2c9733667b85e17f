//! The perturbation (state-decay) transform.
//!
//! A perturbation models the patient's response to a named systemic
//! challenge: variability and flexibility shrink, recovery slows and rigidity
//! grows. The transform is deterministic and does not look at which challenge
//! was run; every challenge applies the same update. Scheduling (the latency
//! window and the single in-flight slot) belongs to the caller.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::PatientState;
use crate::errors::CoreError;

/// Multiplier applied to `variabilityIndex`.
pub const VARIABILITY_DECAY: f64 = 0.8;
/// Multiplier applied to `recoveryHalfLife`.
pub const RECOVERY_GROWTH: f64 = 1.5;
/// Multiplier applied to every domain's `flexibility`.
pub const FLEXIBILITY_DECAY: f64 = 0.9;
/// Multiplier applied to every domain's `rigidity`.
pub const RIGIDITY_GROWTH: f64 = 1.2;

/// Delay between triggering a perturbation and its effect landing.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(2000);

/// A named systemic stress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Challenge {
    #[serde(rename = "Metabolic Challenge")]
    MetabolicChallenge,
    #[serde(rename = "Immune Trigger")]
    ImmuneTrigger,
    #[serde(rename = "Neural Adaptation")]
    NeuralAdaptation,
}

impl Challenge {
    pub const ALL: [Self; 3] = [
        Self::MetabolicChallenge,
        Self::ImmuneTrigger,
        Self::NeuralAdaptation,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MetabolicChallenge => "Metabolic Challenge",
            Self::ImmuneTrigger => "Immune Trigger",
            Self::NeuralAdaptation => "Neural Adaptation",
        }
    }

    const fn alias(self) -> &'static str {
        match self {
            Self::MetabolicChallenge => "metabolic",
            Self::ImmuneTrigger => "immune",
            Self::NeuralAdaptation => "neural",
        }
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Challenge {
    type Err = CoreError;

    /// Accepts the display name in any case, with spaces, dashes or
    /// underscores between words, or the one-word alias (`metabolic`,
    /// `immune`, `neural`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|challenge| {
                normalized == challenge.alias()
                    || normalized == challenge.as_str().to_ascii_lowercase()
            })
            .ok_or_else(|| CoreError::UnknownChallenge(s.to_string()))
    }
}

/// Next state after one perturbation lands.
///
/// Only `variabilityIndex`, `recoveryHalfLife`, and each domain's
/// `flexibility` and `rigidity` change. Collapse risk, current value, device
/// source, identity and the chat transcript are carried over.
#[must_use]
pub fn perturb(state: &PatientState) -> PatientState {
    let mut next = state.clone();
    next.variability_index *= VARIABILITY_DECAY;
    next.recovery_half_life *= RECOVERY_GROWTH;
    for metric in &mut next.domains {
        metric.flexibility *= FLEXIBILITY_DECAY;
        metric.rigidity *= RIGIDITY_GROWTH;
    }
    next
}
