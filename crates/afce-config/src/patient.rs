//! Session patient baseline.

use afce_core::seed::PatientProfile;
use serde::{Deserialize, Serialize};

/// Identity and systemic baseline for the seeded patient. Per-domain readings
/// are always randomised at session start.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PatientConfig {
    pub id: String,
    pub name: String,
    pub age: u32,
    /// Seconds.
    pub recovery_half_life: f64,
    pub state_space_volume: f64,
    pub variability_index: f64,
}

impl Default for PatientConfig {
    fn default() -> Self {
        let profile = PatientProfile::default();
        Self {
            id: profile.id,
            name: profile.name,
            age: profile.age,
            recovery_half_life: profile.recovery_half_life,
            state_space_volume: profile.state_space_volume,
            variability_index: profile.variability_index,
        }
    }
}

impl PatientConfig {
    #[must_use]
    pub fn to_profile(&self) -> PatientProfile {
        PatientProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            age: self.age,
            recovery_half_life: self.recovery_half_life,
            state_space_volume: self.state_space_volume,
            variability_index: self.variability_index,
        }
    }
}
