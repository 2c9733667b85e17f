//! Entity structs for the AFCE-M patient record and its external exchanges.

mod assessment;
mod chat;
mod domain;
mod image;
mod patient;

pub use assessment::{AssessmentResult, RiskFinding};
pub use chat::ChatMessage;
pub use domain::DomainMetric;
pub use image::MedicalImage;
pub use patient::{PatientContext, PatientState};
