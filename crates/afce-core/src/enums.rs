//! Closed enums for domains, chat roles, risk levels, and editable fields.
//!
//! Domain and risk-level variants serialise with their capitalised names
//! (`"Cellular"`, `"Critical"`) because that is the vocabulary the external
//! service is asked to answer in. Editable field names parse from either their
//! camelCase wire spelling or `snake_case`.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ConstraintDomain
// ---------------------------------------------------------------------------

/// One of the six fixed biological subsystems tracked per patient.
///
/// Declaration order is the order domains appear in a patient's collection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum ConstraintDomain {
    Cellular,
    Immune,
    Metabolic,
    Vascular,
    Epigenetic,
    Neural,
}

impl ConstraintDomain {
    /// Every domain, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Cellular,
        Self::Immune,
        Self::Metabolic,
        Self::Vascular,
        Self::Epigenetic,
        Self::Neural,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cellular => "Cellular",
            Self::Immune => "Immune",
            Self::Metabolic => "Metabolic",
            Self::Vascular => "Vascular",
            Self::Epigenetic => "Epigenetic",
            Self::Neural => "Neural",
        }
    }

    /// What the domain covers, as shown next to its plasticity bar.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Cellular => {
                "Tissue regeneration, protein folding stability, and DNA repair efficiency."
            }
            Self::Immune => {
                "Inflammatory equilibrium, self-recognition, and pathogen surveillance state-space."
            }
            Self::Metabolic => {
                "Bioenergetic efficiency, mitochondrial health, and endocrine signal integration."
            }
            Self::Vascular => {
                "Perfusion dynamics, endothelial flexibility, and cardiovascular reserve."
            }
            Self::Epigenetic => {
                "Gene expression plasticity and age-related chromatin remodeling constraints."
            }
            Self::Neural => {
                "Cognitive flexibility, autonomic tone, and neuro-endocrine feedback loops."
            }
        }
    }

    /// Instrument family that feeds this domain's readings.
    #[must_use]
    pub const fn device_feed(self) -> &'static str {
        match self {
            Self::Cellular => "Single-cell RNAseq / ctDNA",
            Self::Immune => "Flow Cytometry / Cytokine Panels",
            Self::Metabolic => "PET Scan / CGM / Lactate",
            Self::Vascular => "fMRI / Doppler / Elasticity",
            Self::Epigenetic => "RNAseq / Methylation Assay",
            Self::Neural => "HRV / Neuro-Immune Monitor",
        }
    }
}

impl fmt::Display for ConstraintDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintDomain {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownDomain(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Model,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Model => "model",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RiskLevel
// ---------------------------------------------------------------------------

/// Severity attached to a risk finding by the assessment service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CoreError::UnknownRiskLevel(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// DeviceField
// ---------------------------------------------------------------------------

/// Per-domain field that a device feed may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum DeviceField {
    Flexibility,
    Rigidity,
}

impl DeviceField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flexibility => "flexibility",
            Self::Rigidity => "rigidity",
        }
    }
}

impl fmt::Display for DeviceField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flexibility" | "flex" => Ok(Self::Flexibility),
            "rigidity" | "rigid" => Ok(Self::Rigidity),
            _ => Err(CoreError::UnknownField(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SystemIndex
// ---------------------------------------------------------------------------

/// Patient-level scalar that a device feed may overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum SystemIndex {
    VariabilityIndex,
    StateSpaceVolume,
}

impl SystemIndex {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VariabilityIndex => "variabilityIndex",
            Self::StateSpaceVolume => "stateSpaceVolume",
        }
    }
}

impl fmt::Display for SystemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemIndex {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "variabilityindex" | "variability_index" | "variability" => Ok(Self::VariabilityIndex),
            "statespacevolume" | "state_space_volume" | "volume" => Ok(Self::StateSpaceVolume),
            _ => Err(CoreError::UnknownField(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domains_parse_case_insensitively() {
        assert_eq!(
            "metabolic".parse::<ConstraintDomain>().unwrap(),
            ConstraintDomain::Metabolic
        );
        assert_eq!(
            " NEURAL ".parse::<ConstraintDomain>().unwrap(),
            ConstraintDomain::Neural
        );
        assert!(matches!(
            "hepatic".parse::<ConstraintDomain>(),
            Err(CoreError::UnknownDomain(_))
        ));
    }

    #[test]
    fn domain_serializes_capitalized() {
        let json = serde_json::to_string(&ConstraintDomain::Epigenetic).unwrap();
        assert_eq!(json, "\"Epigenetic\"");
    }

    #[test]
    fn field_and_index_accept_both_spellings() {
        assert_eq!("Rigidity".parse::<DeviceField>().unwrap(), DeviceField::Rigidity);
        assert_eq!(
            "variabilityIndex".parse::<SystemIndex>().unwrap(),
            SystemIndex::VariabilityIndex
        );
        assert_eq!(
            "state_space_volume".parse::<SystemIndex>().unwrap(),
            SystemIndex::StateSpaceVolume
        );
        assert!("collapseRisk".parse::<DeviceField>().is_err());
    }

    #[test]
    fn risk_levels_order_by_severity() {
        assert!(RiskLevel::Low < RiskLevel::Critical);
        assert_eq!(RiskLevel::ALL.iter().max(), Some(&RiskLevel::Critical));
    }

    #[test]
    fn risk_levels_parse_case_insensitively() {
        assert_eq!("high".parse::<RiskLevel>().unwrap(), RiskLevel::High);
        assert!(matches!(
            "Severe".parse::<RiskLevel>(),
            Err(CoreError::UnknownRiskLevel(_))
        ));
    }
}
