//! Error types for the core model.
//!
//! Only lookups and parses can fail here. Numeric coercion never errors: a
//! malformed device-feed value becomes `0.0` (see [`crate::feed`]).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Name does not match any of the six constraint domains.
    #[error("Unknown constraint domain: {0}")]
    UnknownDomain(String),

    /// Name does not match an editable field or systemic index.
    #[error("Unknown editable field: {0}")]
    UnknownField(String),

    /// Name does not match one of the four risk levels.
    #[error("Unknown risk level: {0}")]
    UnknownRiskLevel(String),

    /// Name does not match a known perturbation challenge.
    #[error("Unknown perturbation challenge: {0}")]
    UnknownChallenge(String),

    /// Data failed validation (empty id, negative half-life, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}
