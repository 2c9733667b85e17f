use afce_core::services::{AssessmentService, ChatService};
use afce_core::{AssessmentResult, MedicalImage, PatientContext};
use afce_gemini::{ChatSession, GeminiClient, GeminiError};

/// The Gemini client when an API key is configured, otherwise a stand-in
/// that fails every call with [`GeminiError::NotConfigured`]. Lets offline
/// commands run without a key.
#[derive(Debug, Clone)]
pub struct Backend(Option<GeminiClient>);

impl Backend {
    #[must_use]
    pub const fn new(client: Option<GeminiClient>) -> Self {
        Self(client)
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.0.is_some()
    }
}

impl AssessmentService for Backend {
    type Error = GeminiError;

    async fn assess(
        &self,
        context: &PatientContext,
        image: Option<&MedicalImage>,
    ) -> Result<AssessmentResult, GeminiError> {
        match &self.0 {
            Some(client) => client.assess(context, image).await,
            None => Err(GeminiError::NotConfigured),
        }
    }
}

impl ChatService for Backend {
    type Session = ChatSession;
    type Error = GeminiError;

    fn open_session(&self, context: &PatientContext) -> ChatSession {
        match &self.0 {
            Some(client) => client.open_session(context),
            None => ChatSession::new(context),
        }
    }

    async fn send_message(
        &self,
        session: &mut ChatSession,
        text: &str,
        image: Option<&MedicalImage>,
    ) -> Result<String, GeminiError> {
        match &self.0 {
            Some(client) => client.send_message(session, text, image).await,
            None => Err(GeminiError::NotConfigured),
        }
    }
}

#[cfg(test)]
mod tests {
    use afce_core::seed::{PatientProfile, seed_patient};
    use chrono::NaiveDate;
    use rand::rngs::mock::StepRng;

    use super::*;

    #[tokio::test]
    async fn unconfigured_backend_fails_both_services() {
        let backend = Backend::new(None);
        let mut rng = StepRng::new(0, 1 << 60);
        let context = seed_patient(
            &PatientProfile::default(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            &mut rng,
        )
        .context();

        assert!(matches!(
            backend.assess(&context, None).await,
            Err(GeminiError::NotConfigured)
        ));
        let mut session = backend.open_session(&context);
        assert!(matches!(
            backend.send_message(&mut session, "hi", None).await,
            Err(GeminiError::NotConfigured)
        ));
        assert!(session.history().is_empty());
    }
}
