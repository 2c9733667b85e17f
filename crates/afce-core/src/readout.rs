//! Display summary of the systemic indices.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::PatientState;
use crate::geometry::round3;

/// The numbers shown in the recovery-dynamics and geometry panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct StateReadout {
    pub patient_id: String,
    pub recovery_half_life: f64,
    /// `variabilityIndex * 100`, one decimal.
    pub system_stability_pct: f64,
    pub variability_index: f64,
    pub state_space_volume: f64,
    pub entropy: f64,
    pub tension: f64,
    pub mean_flexibility: f64,
    pub mean_rigidity: f64,
}

impl StateReadout {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_state(state: &PatientState) -> Self {
        let n = state.domains.len().max(1) as f64;
        let collapse = state.collapse_factor();
        Self {
            patient_id: state.id.clone(),
            recovery_half_life: state.recovery_half_life,
            system_stability_pct: (state.variability_index * 1000.0).round() / 10.0,
            variability_index: state.variability_index,
            state_space_volume: state.state_space_volume,
            entropy: round3(1.0 - collapse),
            tension: round3(collapse),
            mean_flexibility: state.domains.iter().map(|m| m.flexibility).sum::<f64>() / n,
            mean_rigidity: state.domains.iter().map(|m| m.rigidity).sum::<f64>() / n,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::DomainMetric;
    use crate::enums::ConstraintDomain;

    #[test]
    fn stability_is_percentage_with_one_decimal() {
        let state = PatientState {
            id: "PX-2".to_string(),
            name: "R".to_string(),
            age: 20,
            last_assessment: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            domains: ConstraintDomain::ALL
                .into_iter()
                .map(|domain| DomainMetric {
                    domain,
                    flexibility: 60.0,
                    rigidity: 30.0,
                    collapse_risk: 5.0,
                    current_value: 80.0,
                    device_source: None,
                })
                .collect(),
            recovery_half_life: 63.0,
            state_space_volume: 0.85,
            variability_index: 0.6243,
            chat_history: Vec::new(),
        };

        let readout = StateReadout::from_state(&state);
        assert_eq!(readout.system_stability_pct, 62.4);
        assert_eq!(readout.tension, 0.15);
        assert_eq!(readout.entropy, 0.85);
        assert_eq!(readout.mean_flexibility, 60.0);
        assert_eq!(readout.mean_rigidity, 30.0);
    }
}
