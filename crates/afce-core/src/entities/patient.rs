use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ChatMessage, DomainMetric};
use crate::enums::ConstraintDomain;
use crate::errors::CoreError;

/// The root aggregate: one simulated patient and everything observed about them.
///
/// Owned by a single caller and mutated only through the command functions in
/// [`crate::feed`], [`crate::perturbation`] and [`PatientState::with_message`].
/// Domain entries are never added or removed after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientState {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub last_assessment: NaiveDate,
    pub domains: Vec<DomainMetric>,
    /// Seconds.
    pub recovery_half_life: f64,
    pub state_space_volume: f64,
    pub variability_index: f64,
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

/// Everything the external service is told about a patient: the full state
/// minus the chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientContext {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub last_assessment: NaiveDate,
    pub domains: Vec<DomainMetric>,
    pub recovery_half_life: f64,
    pub state_space_volume: f64,
    pub variability_index: f64,
}

impl PatientState {
    /// Check the structural invariants: non-empty id and exactly one metric
    /// per constraint domain.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first violation.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.id.trim().is_empty() {
            return Err(CoreError::Validation("patient id is empty".to_string()));
        }
        for domain in ConstraintDomain::ALL {
            let count = self.domains.iter().filter(|m| m.domain == domain).count();
            if count != 1 {
                return Err(CoreError::Validation(format!(
                    "expected exactly one {domain} metric, found {count}"
                )));
            }
        }
        if self.domains.len() != ConstraintDomain::ALL.len() {
            return Err(CoreError::Validation(format!(
                "expected {} domain metrics, found {}",
                ConstraintDomain::ALL.len(),
                self.domains.len()
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn domain(&self, domain: ConstraintDomain) -> Option<&DomainMetric> {
        self.domains.iter().find(|m| m.domain == domain)
    }

    /// `1 - stateSpaceVolume`: how far the state-space has contracted.
    #[must_use]
    pub fn collapse_factor(&self) -> f64 {
        1.0 - self.state_space_volume
    }

    /// Snapshot sent to the external service.
    #[must_use]
    pub fn context(&self) -> PatientContext {
        PatientContext {
            id: self.id.clone(),
            name: self.name.clone(),
            age: self.age,
            last_assessment: self.last_assessment,
            domains: self.domains.clone(),
            recovery_half_life: self.recovery_half_life,
            state_space_volume: self.state_space_volume,
            variability_index: self.variability_index,
        }
    }

    /// Next state with `message` appended to the transcript.
    #[must_use]
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.chat_history.push(message);
        self
    }

    /// Append `message` to the transcript in place.
    pub fn append_message(&mut self, message: ChatMessage) {
        self.chat_history.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::Role;

    fn metric(domain: ConstraintDomain) -> DomainMetric {
        DomainMetric {
            domain,
            flexibility: 80.0,
            rigidity: 15.0,
            collapse_risk: 7.0,
            current_value: 80.0,
            device_source: None,
        }
    }

    fn patient() -> PatientState {
        PatientState {
            id: "PX-1".to_string(),
            name: "Test Subject".to_string(),
            age: 40,
            last_assessment: NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
            domains: ConstraintDomain::ALL.into_iter().map(metric).collect(),
            recovery_half_life: 42.0,
            state_space_volume: 0.85,
            variability_index: 0.78,
            chat_history: Vec::new(),
        }
    }

    #[test]
    fn valid_patient_passes() {
        assert!(patient().validate().is_ok());
    }

    #[test]
    fn duplicate_domain_fails_validation() {
        let mut p = patient();
        p.domains[1].domain = ConstraintDomain::Cellular;
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains("Cellular"));
    }

    #[test]
    fn blank_id_fails_validation() {
        let mut p = patient();
        p.id = "  ".to_string();
        assert!(matches!(p.validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn context_excludes_chat_history() {
        let p = patient().with_message(ChatMessage::user("hello"));
        let value = serde_json::to_value(p.context()).unwrap();
        assert!(value.get("chatHistory").is_none());
        assert_eq!(value["variabilityIndex"], 0.78);
        assert_eq!(value["domains"].as_array().map(Vec::len), Some(6));
    }

    #[test]
    fn messages_append_in_order() {
        let p = patient()
            .with_message(ChatMessage::user("first"))
            .with_message(ChatMessage::model("second"));
        let roles: Vec<Role> = p.chat_history.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::User, Role::Model]);
    }

    #[test]
    fn collapse_factor_is_complement_of_volume() {
        let p = patient();
        assert!((p.collapse_factor() - 0.15).abs() < 1e-12);
    }
}
