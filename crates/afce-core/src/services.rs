//! Capability traits for the external assessment and chat services.
//!
//! The core never talks to the network. Whatever answers these traits (the
//! Gemini client in `afce-gemini`, or a stub in tests) is injected by the
//! caller. Errors are associated types so each implementation keeps its own
//! taxonomy; the engine treats them as opaque.

use std::future::Future;

use crate::entities::{AssessmentResult, MedicalImage, PatientContext};

/// One-shot structured assessment of a patient snapshot.
pub trait AssessmentService {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Assess `context`, optionally grounded in an attached image.
    fn assess(
        &self,
        context: &PatientContext,
        image: Option<&MedicalImage>,
    ) -> impl Future<Output = Result<AssessmentResult, Self::Error>> + Send;
}

/// Stateful question/answer sessions about a patient.
pub trait ChatService {
    /// Per-session conversation state.
    type Session: Send;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start a conversation primed with `context`.
    fn open_session(&self, context: &PatientContext) -> Self::Session;

    /// Send one user turn and wait for the model's reply text.
    fn send_message(
        &self,
        session: &mut Self::Session,
        text: &str,
        image: Option<&MedicalImage>,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}
