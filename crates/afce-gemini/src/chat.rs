//! Chat sessions on the chat model.
//!
//! Gemini's REST API is stateless, so a [`ChatSession`] keeps the system
//! instruction and every completed turn and replays them on each send.

use afce_core::services::ChatService;
use afce_core::{MedicalImage, PatientContext};

use crate::wire::{Content, GenerateContentRequest};
use crate::{GeminiClient, GeminiError};

/// System instruction priming a session with the engine persona and `context`.
#[must_use]
pub fn system_instruction(context: &PatientContext) -> String {
    let snapshot = serde_json::to_string(context).unwrap_or_default();
    format!(
        "You are the Abythral Medical Engine (AFCE-M) core intelligence.\n\
         Expertise: systems biology, molecular dynamics, systemic homeostasis.\n\
         Style: scientific, system-oriented, \"state-space\" terminology.\n\n\
         You can process multi-modal inputs. If a clinician uploads a scan (PET, MRI, \
         flow cytometry), ground your reasoning in the visual evidence and explain how \
         it maps to the patient's current flexibility/rigidity indices.\n\n\
         PATIENT SNAPSHOT: {snapshot}"
    )
}

/// Conversation state for one patient.
#[derive(Debug, Clone)]
pub struct ChatSession {
    patient_id: String,
    system: Content,
    history: Vec<Content>,
}

impl ChatSession {
    #[must_use]
    pub fn new(context: &PatientContext) -> Self {
        Self {
            patient_id: context.id.clone(),
            system: Content::instruction(system_instruction(context)),
            history: Vec::new(),
        }
    }

    /// Patient the session was opened for.
    #[must_use]
    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    /// Completed turns, alternating user and model.
    #[must_use]
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    #[must_use]
    pub fn system(&self) -> &Content {
        &self.system
    }
}

impl ChatService for GeminiClient {
    type Session = ChatSession;
    type Error = GeminiError;

    fn open_session(&self, context: &PatientContext) -> ChatSession {
        tracing::debug!(patient = %context.id, model = %self.chat_model, "gemini: chat session opened");
        ChatSession::new(context)
    }

    async fn send_message(
        &self,
        session: &mut ChatSession,
        text: &str,
        image: Option<&MedicalImage>,
    ) -> Result<String, GeminiError> {
        session.history.push(Content::user(text, image));
        let request = GenerateContentRequest {
            contents: &session.history,
            system_instruction: Some(&session.system),
            generation_config: None,
        };

        let result = self.generate(&self.chat_model, &request).await;
        match result {
            Ok(reply) => {
                session.history.push(Content::model(reply.clone()));
                Ok(reply)
            }
            Err(error) => {
                // A failed turn never reaches the transcript.
                session.history.pop();
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use afce_core::seed::{PatientProfile, seed_patient};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn context() -> PatientContext {
        seed_patient(
            &PatientProfile::default(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            &mut ChaCha8Rng::seed_from_u64(4),
        )
        .context()
    }

    #[test]
    fn instruction_embeds_persona_and_snapshot() {
        let text = system_instruction(&context());
        assert!(text.contains("Abythral Medical Engine (AFCE-M) core intelligence"));
        assert!(text.contains("multi-modal"));
        assert!(text.contains("\"id\":\"PX-9921-AFCE\""));
        assert!(!text.contains("chatHistory"));
    }

    #[test]
    fn new_session_is_bound_and_empty() {
        let session = ChatSession::new(&context());
        assert_eq!(session.patient_id(), "PX-9921-AFCE");
        assert!(session.history().is_empty());
        assert!(session.system().role.is_none());
    }

    #[tokio::test]
    async fn failed_turn_is_rolled_back() {
        let client =
            GeminiClient::new(&crate::tests::test_config("http://127.0.0.1:9/v1beta")).unwrap();
        let mut session = client.open_session(&context());

        let err = client
            .send_message(&mut session, "How stable is the vascular domain?", None)
            .await
            .unwrap_err();

        assert!(matches!(err, GeminiError::Http(_)));
        assert!(session.history().is_empty());
    }
}
