use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConstraintDomain, RiskLevel};

/// Structured assessment returned by the external service.
///
/// The core passes this through to the render layer untouched; the helpers
/// below only read it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub summary: String,
    pub risks: Vec<RiskFinding>,
    pub interventions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_grounding: Option<String>,
}

/// A single row of the risk matrix.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RiskFinding {
    /// Domain name as written by the model. Usually one of the six
    /// [`ConstraintDomain`] names, but not guaranteed.
    pub domain: String,
    pub finding: String,
    pub level: RiskLevel,
}

impl RiskFinding {
    /// The constraint domain this finding names, if it names one.
    #[must_use]
    pub fn constraint_domain(&self) -> Option<ConstraintDomain> {
        self.domain.parse().ok()
    }
}

impl AssessmentResult {
    /// Most severe level across all findings.
    #[must_use]
    pub fn highest_level(&self) -> Option<RiskLevel> {
        self.risks.iter().map(|risk| risk.level).max()
    }

    /// Findings flagged `Critical`, in response order.
    pub fn critical_risks(&self) -> impl Iterator<Item = &RiskFinding> {
        self.risks
            .iter()
            .filter(|risk| risk.level == RiskLevel::Critical)
    }
}
