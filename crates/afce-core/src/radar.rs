//! Flexibility/rigidity radar series.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::DomainMetric;
use crate::enums::ConstraintDomain;

/// Outer ring of the radar chart.
pub const FULL_MARK: f64 = 100.0;

/// One spoke of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RadarAxis {
    pub subject: ConstraintDomain,
    pub flexibility: f64,
    pub rigidity: f64,
    pub full_mark: f64,
}

/// One spoke per domain, in collection order.
#[must_use]
pub fn series(domains: &[DomainMetric]) -> Vec<RadarAxis> {
    domains
        .iter()
        .map(|metric| RadarAxis {
            subject: metric.domain,
            flexibility: metric.flexibility,
            rigidity: metric.rigidity,
            full_mark: FULL_MARK,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_axis_per_domain() {
        let domains: Vec<DomainMetric> = ConstraintDomain::ALL
            .into_iter()
            .map(|domain| DomainMetric {
                domain,
                flexibility: 75.0,
                rigidity: 12.5,
                collapse_risk: 5.0,
                current_value: 80.0,
                device_source: None,
            })
            .collect();

        let axes = series(&domains);
        assert_eq!(axes.len(), 6);
        assert_eq!(axes[3].subject, ConstraintDomain::Vascular);
        assert!(axes.iter().all(|a| a.full_mark == FULL_MARK));
        assert_eq!(axes[0].rigidity, 12.5);
    }
}
