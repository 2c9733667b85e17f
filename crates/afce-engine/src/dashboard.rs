//! The owned application state.
//!
//! [`Dashboard`] is the single owner of the [`PatientState`]. Every command
//! replaces the state with the next one computed by `afce-core`. The three
//! asynchronous operations (perturbation, assessment, chat) each hold one
//! in-flight slot; starting one while its slot is taken fails with
//! [`EngineError::Busy`] and changes nothing.
//!
//! Assessment and chat come as `begin_*` / `complete_*` pairs so an event
//! loop can keep a request open across ticks, plus the [`Dashboard::assess`]
//! and [`Dashboard::send_message`] wrappers that drive the injected services.

use std::time::Duration;

use afce_config::AfceConfig;
use afce_core::enums::{ConstraintDomain, DeviceField, SystemIndex};
use afce_core::geometry::{self, Reconstruction};
use afce_core::perturbation::Challenge;
use afce_core::radar::{self, RadarAxis};
use afce_core::readout::StateReadout;
use afce_core::seed::{PatientProfile, seed_patient};
use afce_core::services::{AssessmentService, ChatService};
use afce_core::{AssessmentResult, ChatMessage, MedicalImage, PatientContext, PatientState, feed};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::time::Instant;

use crate::error::{EngineError, Operation};
use crate::scheduler::PerturbationScheduler;

/// Model reply recorded when the chat service fails.
pub const CHAT_FAILURE_REPLY: &str = "Error: Engine calculation timeout.";
/// Model reply recorded when the chat service answers with no text.
pub const CHAT_EMPTY_REPLY: &str = "Connection to engine lost.";

/// Snapshot handed to the assessment service by [`Dashboard::begin_assessment`].
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentRequest {
    pub context: PatientContext,
    pub image: Option<MedicalImage>,
}

/// One user turn handed out by [`Dashboard::begin_chat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub text: String,
    pub image: Option<MedicalImage>,
}

struct SessionBinding<S> {
    patient_id: String,
    session: S,
}

pub struct Dashboard<A, C: ChatService> {
    patient: PatientState,
    assessment: Option<AssessmentResult>,
    active_image: Option<MedicalImage>,
    scheduler: PerturbationScheduler,
    rng: ChaCha8Rng,
    assessor: A,
    chat: C,
    session: Option<SessionBinding<C::Session>>,
    assessing: bool,
    chatting: bool,
}

impl<A, C> Dashboard<A, C>
where
    A: AssessmentService,
    C: ChatService,
{
    /// Wrap an existing patient. Jitter draws from entropy until
    /// [`Dashboard::with_rng`] is applied.
    #[must_use]
    pub fn new(patient: PatientState, assessor: A, chat: C) -> Self {
        Self {
            patient,
            assessment: None,
            active_image: None,
            scheduler: PerturbationScheduler::default(),
            rng: ChaCha8Rng::from_entropy(),
            assessor,
            chat,
            session: None,
            assessing: false,
            chatting: false,
        }
    }

    /// Seed a fresh session from config: patient baseline, latency, and the
    /// optional seed shared by patient seeding and geometry jitter.
    #[must_use]
    pub fn from_config(config: &AfceConfig, today: NaiveDate, assessor: A, chat: C) -> Self {
        let mut rng = config
            .engine
            .seed
            .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        let patient = seed_patient(&config.patient.to_profile(), today, &mut rng);
        tracing::debug!(
            patient = %patient.id,
            seeded = config.engine.seed.is_some(),
            "dashboard session seeded"
        );
        Self::new(patient, assessor, chat)
            .with_latency(config.engine.perturbation_latency())
            .with_rng(rng)
    }

    /// Seed a fresh session from `profile` with default latency.
    #[must_use]
    pub fn seeded(profile: &PatientProfile, today: NaiveDate, seed: u64, assessor: A, chat: C) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let patient = seed_patient(profile, today, &mut rng);
        Self::new(patient, assessor, chat).with_rng(rng)
    }

    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.scheduler = PerturbationScheduler::new(latency);
        self
    }

    #[must_use]
    pub fn with_rng(mut self, rng: ChaCha8Rng) -> Self {
        self.rng = rng;
        self
    }

    #[must_use]
    pub const fn patient(&self) -> &PatientState {
        &self.patient
    }

    /// Swap in a different patient. The previous assessment is dropped; the
    /// chat session is re-opened on the next send if the id changed.
    pub fn replace_patient(&mut self, patient: PatientState) {
        tracing::info!(from = %self.patient.id, to = %patient.id, "patient replaced");
        self.patient = patient;
        self.assessment = None;
    }

    #[must_use]
    pub const fn assessment(&self) -> Option<&AssessmentResult> {
        self.assessment.as_ref()
    }

    #[must_use]
    pub const fn active_image(&self) -> Option<&MedicalImage> {
        self.active_image.as_ref()
    }

    /// Select (or clear) the image attached to the next assessment.
    pub fn set_active_image(&mut self, image: Option<MedicalImage>) {
        self.active_image = image;
    }

    /// Drop the current assessment and the active image.
    pub fn reset_assessment(&mut self) {
        self.assessment = None;
        self.active_image = None;
    }

    #[must_use]
    pub const fn is_perturbing(&self) -> bool {
        self.scheduler.is_pending()
    }

    #[must_use]
    pub const fn is_assessing(&self) -> bool {
        self.assessing
    }

    #[must_use]
    pub const fn is_chatting(&self) -> bool {
        self.chatting
    }

    #[must_use]
    pub const fn scheduler(&self) -> &PerturbationScheduler {
        &self.scheduler
    }

    // ── Derived views ─────────────────────────────────────────────────

    /// Reconstruct the geometry from the current state. Never cached.
    pub fn geometry(&mut self) -> Reconstruction {
        geometry::reconstruct(
            self.patient.variability_index,
            self.patient.collapse_factor(),
            &mut self.rng,
        )
    }

    #[must_use]
    pub fn radar(&self) -> Vec<RadarAxis> {
        radar::series(&self.patient.domains)
    }

    #[must_use]
    pub fn readout(&self) -> StateReadout {
        StateReadout::from_state(&self.patient)
    }

    // ── Device feed ───────────────────────────────────────────────────

    pub fn edit_domain(&mut self, domain: ConstraintDomain, field: DeviceField, raw: &str) {
        self.patient = feed::edit_domain(&self.patient, domain, field, raw);
        tracing::debug!(%domain, %field, raw, "domain field edited");
    }

    pub fn edit_index(&mut self, index: SystemIndex, raw: &str) {
        self.patient = feed::edit_index(&self.patient, index, raw);
        tracing::debug!(%index, raw, "systemic index edited");
    }

    // ── Perturbation ──────────────────────────────────────────────────

    /// Schedule `challenge` to land after the configured latency.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Busy`] while another perturbation is pending.
    pub fn trigger_perturbation(&mut self, challenge: Challenge) -> Result<Instant, EngineError> {
        self.trigger_perturbation_at(challenge, Instant::now())
    }

    /// [`Dashboard::trigger_perturbation`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Busy`] while another perturbation is pending.
    pub fn trigger_perturbation_at(
        &mut self,
        challenge: Challenge,
        now: Instant,
    ) -> Result<Instant, EngineError> {
        self.scheduler.trigger(challenge, now)
    }

    /// Apply the pending perturbation if it is due now.
    pub fn poll_perturbation(&mut self) -> Option<Challenge> {
        self.poll_perturbation_at(Instant::now())
    }

    pub fn poll_perturbation_at(&mut self, now: Instant) -> Option<Challenge> {
        self.scheduler.poll(&mut self.patient, now)
    }

    /// Wait out the latency window and apply the pending perturbation.
    pub async fn settle_perturbation(&mut self) -> Option<Challenge> {
        self.scheduler.settle(&mut self.patient).await
    }

    /// Trigger `challenge` and wait for it to land.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Busy`] while another perturbation is pending.
    pub async fn perturb(&mut self, challenge: Challenge) -> Result<Challenge, EngineError> {
        self.trigger_perturbation(challenge)?;
        Ok(self.settle_perturbation().await.unwrap_or(challenge))
    }

    // ── Assessment ────────────────────────────────────────────────────

    /// Claim the assessment slot and snapshot the state for the service.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Busy`] if an assessment is already in flight.
    pub fn begin_assessment(&mut self) -> Result<AssessmentRequest, EngineError> {
        if self.assessing {
            return Err(EngineError::Busy {
                operation: Operation::Assessment,
            });
        }
        self.assessing = true;
        tracing::debug!(
            patient = %self.patient.id,
            image = self.active_image.as_ref().map(|i| i.label.as_str()),
            "assessment started"
        );
        Ok(AssessmentRequest {
            context: self.patient.context(),
            image: self.active_image.clone(),
        })
    }

    /// Release the assessment slot with the service's outcome.
    ///
    /// On success the result replaces the previous assessment. On failure the
    /// previous assessment and the patient state are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NothingInFlight`] without a matching begin, and
    /// [`EngineError::AnalysisFailed`] wrapping the service error.
    pub fn complete_assessment<E>(
        &mut self,
        outcome: Result<AssessmentResult, E>,
    ) -> Result<&AssessmentResult, EngineError>
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        if !self.assessing {
            return Err(EngineError::NothingInFlight {
                operation: Operation::Assessment,
            });
        }
        self.assessing = false;
        match outcome {
            Ok(result) => {
                tracing::info!(
                    risks = result.risks.len(),
                    highest = ?result.highest_level(),
                    "assessment stored"
                );
                Ok(&*self.assessment.insert(result))
            }
            Err(error) => {
                tracing::warn!(%error, "assessment failed");
                Err(EngineError::AnalysisFailed {
                    source: Box::new(error),
                })
            }
        }
    }

    /// Run one assessment of the current state through the assessment service.
    ///
    /// # Errors
    ///
    /// Same as [`Dashboard::begin_assessment`] and [`Dashboard::complete_assessment`].
    pub async fn assess(&mut self) -> Result<&AssessmentResult, EngineError> {
        let request = self.begin_assessment()?;
        let outcome = self
            .assessor
            .assess(&request.context, request.image.as_ref())
            .await;
        self.complete_assessment(outcome)
    }

    // ── Chat ──────────────────────────────────────────────────────────

    /// Claim the chat slot and append the user's message to the transcript.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptyMessage`] for blank text and
    /// [`EngineError::Busy`] while a reply is pending. Neither appends anything.
    pub fn begin_chat(
        &mut self,
        text: &str,
        image: Option<MedicalImage>,
    ) -> Result<ChatRequest, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyMessage);
        }
        if self.chatting {
            return Err(EngineError::Busy {
                operation: Operation::Chat,
            });
        }
        self.chatting = true;
        self.patient
            .append_message(ChatMessage::user(text).with_image(image.clone()));
        Ok(ChatRequest {
            text: text.to_string(),
            image,
        })
    }

    /// Release the chat slot and append the model's reply.
    ///
    /// Service failures never propagate: they are recorded as a single
    /// fallback model message, which is returned like any other reply.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NothingInFlight`] without a matching begin.
    pub fn complete_chat<E>(&mut self, outcome: Result<String, E>) -> Result<ChatMessage, EngineError>
    where
        E: std::error::Error,
    {
        if !self.chatting {
            return Err(EngineError::NothingInFlight {
                operation: Operation::Chat,
            });
        }
        self.chatting = false;
        let text = match outcome {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                tracing::warn!("chat reply was empty");
                CHAT_EMPTY_REPLY.to_string()
            }
            Err(error) => {
                tracing::warn!(%error, "chat turn failed");
                CHAT_FAILURE_REPLY.to_string()
            }
        };
        let reply = ChatMessage::model(text);
        self.patient.append_message(reply.clone());
        Ok(reply)
    }

    /// The chat session for the current patient, opened (or re-opened when
    /// the patient id changed) on demand.
    pub fn chat_session(&mut self) -> &mut C::Session {
        bind_session(&self.chat, &mut self.session, &self.patient)
    }

    /// Send one user turn through the chat service and record the reply.
    ///
    /// # Errors
    ///
    /// Same as [`Dashboard::begin_chat`].
    pub async fn send_message(
        &mut self,
        text: &str,
        image: Option<MedicalImage>,
    ) -> Result<ChatMessage, EngineError> {
        let request = self.begin_chat(text, image)?;
        let session = bind_session(&self.chat, &mut self.session, &self.patient);
        let outcome = self
            .chat
            .send_message(session, &request.text, request.image.as_ref())
            .await;
        self.complete_chat(outcome)
    }
}

fn bind_session<'a, C: ChatService>(
    chat: &C,
    binding: &'a mut Option<SessionBinding<C::Session>>,
    patient: &PatientState,
) -> &'a mut C::Session {
    if binding
        .as_ref()
        .is_some_and(|bound| bound.patient_id != patient.id)
    {
        tracing::debug!(patient = %patient.id, "patient changed, re-opening chat session");
        *binding = None;
    }
    &mut binding
        .get_or_insert_with(|| SessionBinding {
            patient_id: patient.id.clone(),
            session: chat.open_session(&patient.context()),
        })
        .session
}
