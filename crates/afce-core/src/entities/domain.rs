use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{ConstraintDomain, DeviceField};

/// Readings for one constraint domain.
///
/// `flexibility`, `rigidity` and `collapse_risk` are nominally percentages,
/// but nothing clamps them: device-feed edits and repeated perturbations may
/// push them outside `[0, 100]`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainMetric {
    pub domain: ConstraintDomain,
    pub flexibility: f64,
    pub rigidity: f64,
    pub collapse_risk: f64,
    pub current_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_source: Option<String>,
}

impl DomainMetric {
    /// Read an editable field.
    #[must_use]
    pub const fn field(&self, field: DeviceField) -> f64 {
        match field {
            DeviceField::Flexibility => self.flexibility,
            DeviceField::Rigidity => self.rigidity,
        }
    }

    /// Copy of this metric with one editable field replaced.
    #[must_use]
    pub fn with_field(&self, field: DeviceField, value: f64) -> Self {
        let mut next = self.clone();
        match field {
            DeviceField::Flexibility => next.flexibility = value,
            DeviceField::Rigidity => next.rigidity = value,
        }
        next
    }
}
