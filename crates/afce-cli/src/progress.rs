//! Stderr spinners for the three waits a user sits through: a perturbation
//! landing, an assessment, and a chat reply.

use std::time::Duration;

use afce_core::perturbation::Challenge;
use indicatif::{ProgressBar, ProgressStyle};

use crate::ui;

const TICK: Duration = Duration::from_millis(100);

/// Spinner handle. Inert when progress output is disabled.
pub struct Progress {
    bar: Option<ProgressBar>,
}

impl Progress {
    fn start(message: String) -> Self {
        if !ui::prefs().progress {
            return Self { bar: None };
        }

        let bar = ProgressBar::new_spinner();
        bar.enable_steady_tick(TICK);
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg} {elapsed:.dim}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message);
        Self { bar: Some(bar) }
    }

    /// Round `round` of `rounds` waiting out the latency window.
    #[must_use]
    pub fn perturbation(challenge: Challenge, round: u32, rounds: u32, latency: Duration) -> Self {
        let counter = if rounds > 1 {
            format!(" ({round}/{rounds})")
        } else {
            String::new()
        };
        Self::start(format!(
            "{challenge}{counter}: waiting {} ms for the system to respond",
            latency.as_millis()
        ))
    }

    #[must_use]
    pub fn assessment(with_image: bool) -> Self {
        let grounding = if with_image { " with imaging" } else { "" };
        Self::start(format!("Reconstructing state-space assessment{grounding}"))
    }

    #[must_use]
    pub fn chat() -> Self {
        Self::start("Waiting for the engine".to_string())
    }

    /// Clear on success, leave `failure` behind on error.
    pub fn finish<T, E>(&self, outcome: &Result<T, E>, failure: &str) {
        let Some(bar) = &self.bar else {
            return;
        };
        if outcome.is_ok() {
            bar.finish_and_clear();
        } else {
            bar.abandon_with_message(failure.to_string());
        }
    }
}
