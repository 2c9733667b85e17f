//! # afce-core
//!
//! Core types and transforms for the AFCE-M state-space engine.
//!
//! This crate owns everything that is computed locally:
//! - Entity structs for the patient record, domain metrics, chat messages,
//!   attached images, and assessment results
//! - Closed enums (constraint domains, chat roles, risk levels, editable fields)
//! - Session seeding from an injectable random source
//! - Device-feed edits with lenient numeric coercion
//! - The perturbation (state-decay) transform
//! - The geometry reconstruction grid and radar series
//! - Capability traits for the external assessment and chat services
//!
//! Nothing here performs I/O. The HTTP implementation of the service traits
//! lives in `afce-gemini`; the owned application state and its in-flight
//! bookkeeping live in `afce-engine`.

pub mod entities;
pub mod enums;
pub mod errors;
pub mod feed;
pub mod geometry;
pub mod perturbation;
pub mod radar;
pub mod readout;
pub mod seed;
pub mod services;

pub use entities::{
    AssessmentResult, ChatMessage, DomainMetric, MedicalImage, PatientContext, PatientState,
    RiskFinding,
};
pub use enums::{ConstraintDomain, DeviceField, RiskLevel, Role, SystemIndex};
pub use errors::CoreError;
pub use perturbation::Challenge;
