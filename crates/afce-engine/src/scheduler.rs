//! Single-slot perturbation scheduling.
//!
//! A triggered perturbation lands once, `latency` after it was triggered.
//! While one is pending every further trigger is rejected. Time is passed in
//! explicitly so callers (and tests) control the clock; [`PerturbationScheduler::settle`]
//! is the tokio-timer convenience on top.

use std::time::Duration;

use afce_core::perturbation::{self, Challenge, DEFAULT_LATENCY};
use afce_core::PatientState;
use tokio::time::Instant;

use crate::error::{EngineError, Operation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    challenge: Challenge,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct PerturbationScheduler {
    latency: Duration,
    pending: Option<Pending>,
}

impl Default for PerturbationScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl PerturbationScheduler {
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self {
            latency,
            pending: None,
        }
    }

    #[must_use]
    pub const fn latency(&self) -> Duration {
        self.latency
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The challenge waiting to land, if any.
    #[must_use]
    pub fn pending_challenge(&self) -> Option<Challenge> {
        self.pending.map(|p| p.challenge)
    }

    #[must_use]
    pub fn due(&self) -> Option<Instant> {
        self.pending.map(|p| p.due)
    }

    /// Schedule `challenge` to land at `now + latency`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Busy`] if a perturbation is already pending.
    pub fn trigger(&mut self, challenge: Challenge, now: Instant) -> Result<Instant, EngineError> {
        if self.pending.is_some() {
            return Err(EngineError::Busy {
                operation: Operation::Perturbation,
            });
        }
        let due = now + self.latency;
        self.pending = Some(Pending { challenge, due });
        tracing::debug!(%challenge, latency_ms = self.latency.as_millis(), "perturbation scheduled");
        Ok(due)
    }

    /// Apply the pending perturbation to `state` if it is due at `now`.
    ///
    /// Returns the challenge that landed. The slot is cleared, so a second
    /// poll is a no-op.
    pub fn poll(&mut self, state: &mut PatientState, now: Instant) -> Option<Challenge> {
        let pending = self.pending.filter(|p| now >= p.due)?;
        self.pending = None;
        *state = perturbation::perturb(state);
        tracing::info!(
            challenge = %pending.challenge,
            variability_index = state.variability_index,
            recovery_half_life = state.recovery_half_life,
            "perturbation applied"
        );
        Some(pending.challenge)
    }

    /// Sleep until the pending perturbation is due, then apply it.
    pub async fn settle(&mut self, state: &mut PatientState) -> Option<Challenge> {
        let due = self.due()?;
        tokio::time::sleep_until(due).await;
        self.poll(state, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use afce_core::seed::{PatientProfile, seed_patient};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn patient() -> PatientState {
        seed_patient(
            &PatientProfile::default(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            &mut ChaCha8Rng::seed_from_u64(17),
        )
    }

    #[test]
    fn second_trigger_is_busy_and_changes_nothing() {
        let now = Instant::now();
        let mut scheduler = PerturbationScheduler::default();
        let due = scheduler.trigger(Challenge::ImmuneTrigger, now).unwrap();

        let err = scheduler
            .trigger(Challenge::NeuralAdaptation, now + Duration::from_millis(10))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Busy {
                operation: Operation::Perturbation
            }
        ));
        assert_eq!(scheduler.pending_challenge(), Some(Challenge::ImmuneTrigger));
        assert_eq!(scheduler.due(), Some(due));
    }

    #[test]
    fn poll_before_due_is_a_no_op() {
        let now = Instant::now();
        let mut scheduler = PerturbationScheduler::default();
        let mut state = patient();
        let before = state.clone();
        scheduler.trigger(Challenge::MetabolicChallenge, now).unwrap();

        assert_eq!(scheduler.poll(&mut state, now + Duration::from_millis(1999)), None);
        assert_eq!(state, before);
        assert!(scheduler.is_pending());
    }

    #[test]
    fn poll_at_due_applies_exactly_once() {
        let now = Instant::now();
        let mut scheduler = PerturbationScheduler::default();
        let mut state = patient();
        let before = state.clone();
        let due = scheduler.trigger(Challenge::MetabolicChallenge, now).unwrap();

        assert_eq!(
            scheduler.poll(&mut state, due),
            Some(Challenge::MetabolicChallenge)
        );
        assert_eq!(state, perturbation::perturb(&before));

        let once = state.clone();
        assert_eq!(scheduler.poll(&mut state, due + Duration::from_secs(10)), None);
        assert_eq!(state, once);
    }

    #[test]
    fn trigger_is_accepted_again_after_landing() {
        let now = Instant::now();
        let mut scheduler = PerturbationScheduler::new(Duration::from_millis(100));
        let mut state = patient();
        let due = scheduler.trigger(Challenge::ImmuneTrigger, now).unwrap();
        scheduler.poll(&mut state, due);

        assert!(scheduler.trigger(Challenge::ImmuneTrigger, due).is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn settle_waits_for_latency() {
        let mut scheduler = PerturbationScheduler::default();
        let mut state = patient();
        let start = Instant::now();
        scheduler.trigger(Challenge::NeuralAdaptation, start).unwrap();

        let landed = scheduler.settle(&mut state).await;
        assert_eq!(landed, Some(Challenge::NeuralAdaptation));
        assert!(start.elapsed() >= DEFAULT_LATENCY);
        assert!(!scheduler.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn settle_without_pending_returns_immediately() {
        let mut scheduler = PerturbationScheduler::default();
        let mut state = patient();
        assert_eq!(scheduler.settle(&mut state).await, None);
    }
}
