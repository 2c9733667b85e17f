//! Device-feed edits: direct numeric overrides of domain fields and systemic
//! indices.
//!
//! Raw input comes from free-text fields, so coercion is lenient and never
//! fails. Domain fields keep the leading integer of the input (`"72.9"` → 72,
//! `"65bpm"` → 65); systemic indices keep the leading decimal number
//! (`"0.42x"` → 0.42). Anything without a usable leading number, and any
//! non-finite result, becomes `0.0`. Values are not clamped.

use crate::entities::PatientState;
use crate::enums::{ConstraintDomain, DeviceField, SystemIndex};

/// Coerce a domain-field input to its leading integer, or `0.0`.
#[must_use]
pub fn coerce_integer(raw: &str) -> f64 {
    let s = raw.trim_start();
    let (sign, rest) = split_sign(s);
    let digits = leading_digits(rest);
    if digits.is_empty() {
        return 0.0;
    }
    finite_or_zero(digits.parse::<f64>().map(|v| sign * v).unwrap_or(0.0))
}

/// Coerce a systemic-index input to its leading decimal number, or `0.0`.
#[must_use]
pub fn coerce_decimal(raw: &str) -> f64 {
    let s = raw.trim_start();
    let (sign, rest) = split_sign(s);

    let int_part = leading_digits(rest);
    let mut end = int_part.len();
    let mut mantissa_digits = int_part.len();

    if rest[end..].starts_with('.') {
        let frac = leading_digits(&rest[end + 1..]);
        mantissa_digits += frac.len();
        if mantissa_digits > 0 {
            end += 1 + frac.len();
        }
    }
    if mantissa_digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it.
    let tail = &rest[end..];
    if tail.starts_with(['e', 'E']) {
        let (_, exp_body) = split_sign(&tail[1..]);
        let exp_digits = leading_digits(exp_body);
        if !exp_digits.is_empty() {
            end += tail.len() - exp_body.len() + exp_digits.len();
        }
    }

    finite_or_zero(rest[..end].parse::<f64>().map(|v| sign * v).unwrap_or(0.0))
}

/// Next state with one domain field overwritten from raw input.
#[must_use]
pub fn edit_domain(
    state: &PatientState,
    domain: ConstraintDomain,
    field: DeviceField,
    raw: &str,
) -> PatientState {
    set_domain_field(state, domain, field, coerce_integer(raw))
}

/// Next state with one domain field set to `value`. Every other field and
/// every other domain is carried over unchanged.
#[must_use]
pub fn set_domain_field(
    state: &PatientState,
    domain: ConstraintDomain,
    field: DeviceField,
    value: f64,
) -> PatientState {
    let mut next = state.clone();
    next.domains = state
        .domains
        .iter()
        .map(|metric| {
            if metric.domain == domain {
                metric.with_field(field, value)
            } else {
                metric.clone()
            }
        })
        .collect();
    next
}

/// Next state with a systemic index overwritten from raw input.
#[must_use]
pub fn edit_index(state: &PatientState, index: SystemIndex, raw: &str) -> PatientState {
    set_index(state, index, coerce_decimal(raw))
}

#[must_use]
pub fn set_index(state: &PatientState, index: SystemIndex, value: f64) -> PatientState {
    let mut next = state.clone();
    match index {
        SystemIndex::VariabilityIndex => next.variability_index = value,
        SystemIndex::StateSpaceVolume => next.state_space_volume = value,
    }
    next
}

fn split_sign(s: &str) -> (f64, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (-1.0, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (1.0, rest)
    } else {
        (1.0, s)
    }
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

// Negative zero is reported as plain zero.
fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value != 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::entities::DomainMetric;

    #[rstest]
    #[case("72", 72.0)]
    #[case("  72", 72.0)]
    #[case("72.9", 72.0)]
    #[case("65bpm", 65.0)]
    #[case("-12", -12.0)]
    #[case("+8", 8.0)]
    #[case("", 0.0)]
    #[case("abc", 0.0)]
    #[case("-", 0.0)]
    #[case("-0", 0.0)]
    #[case("150", 150.0)]
    fn integer_coercion(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(coerce_integer(raw), expected);
    }

    #[rstest]
    #[case("0.42", 0.42)]
    #[case(".5", 0.5)]
    #[case("3.", 3.0)]
    #[case("0.42x", 0.42)]
    #[case("1e-2", 0.01)]
    #[case("2e", 2.0)]
    #[case("2e+", 2.0)]
    #[case("-0.25", -0.25)]
    #[case("1.7", 1.7)]
    #[case(".", 0.0)]
    #[case("NaN", 0.0)]
    #[case("1e999", 0.0)]
    #[case("not a number", 0.0)]
    fn decimal_coercion(#[case] raw: &str, #[case] expected: f64) {
        assert_eq!(coerce_decimal(raw), expected);
    }

    fn patient() -> PatientState {
        PatientState {
            id: "PX-1".to_string(),
            name: "Test".to_string(),
            age: 30,
            last_assessment: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            domains: ConstraintDomain::ALL
                .into_iter()
                .map(|domain| DomainMetric {
                    domain,
                    flexibility: 80.0,
                    rigidity: 15.0,
                    collapse_risk: 6.0,
                    current_value: 80.0,
                    device_source: Some("SIM_GEN_01".to_string()),
                })
                .collect(),
            recovery_half_life: 42.0,
            state_space_volume: 0.85,
            variability_index: 0.78,
            chat_history: Vec::new(),
        }
    }

    #[test]
    fn non_numeric_flexibility_zeroes_only_that_field() {
        let before = patient();
        let after = edit_domain(
            &before,
            ConstraintDomain::Immune,
            DeviceField::Flexibility,
            "n/a",
        );

        for (old, new) in before.domains.iter().zip(&after.domains) {
            if new.domain == ConstraintDomain::Immune {
                assert_eq!(new.flexibility, 0.0);
                assert_eq!(new.rigidity, old.rigidity);
                assert_eq!(new.collapse_risk, old.collapse_risk);
                assert_eq!(new.current_value, old.current_value);
                assert_eq!(new.device_source, old.device_source);
            } else {
                assert_eq!(new, old);
            }
        }
        assert_eq!(after.variability_index, before.variability_index);
        assert_eq!(after.state_space_volume, before.state_space_volume);
        assert_eq!(after.recovery_half_life, before.recovery_half_life);
    }

    #[test]
    fn rigidity_edit_is_not_clamped() {
        let after = edit_domain(
            &patient(),
            ConstraintDomain::Vascular,
            DeviceField::Rigidity,
            "240",
        );
        let vascular = after.domain(ConstraintDomain::Vascular).unwrap();
        assert_eq!(vascular.rigidity, 240.0);
    }

    #[test]
    fn index_edits_replace_directly() {
        let after = edit_index(&patient(), SystemIndex::StateSpaceVolume, "1.7");
        assert_eq!(after.state_space_volume, 1.7);
        assert_eq!(after.variability_index, 0.78);

        let after = edit_index(&after, SystemIndex::VariabilityIndex, "garbage");
        assert_eq!(after.variability_index, 0.0);
        assert_eq!(after.state_space_volume, 1.7);
    }

    #[test]
    fn edits_leave_transcript_alone() {
        let before = patient().with_message(crate::ChatMessage::user("hi"));
        let after = edit_index(&before, SystemIndex::VariabilityIndex, "0.1");
        assert_eq!(after.chat_history, before.chat_history);
    }
}
