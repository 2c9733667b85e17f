//! # afce-config
//!
//! Layered configuration loading for AFCE-M using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AFCE_*` prefix, `__` as separator)
//! 2. Bare `GEMINI_API_KEY`, then `API_KEY`, for `gemini.api_key` only
//! 3. Project-level `.afce/config.toml`
//! 4. User-level `~/.config/afce/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AFCE_GEMINI__API_KEY` -> `gemini.api_key`,
//! `AFCE_ENGINE__SEED` -> `engine.seed`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use afce_config::AfceConfig;
//!
//! let config = AfceConfig::load_with_dotenv().expect("config");
//!
//! if config.gemini.is_configured() {
//!     println!("assessment model: {}", config.gemini.assessment_model);
//! }
//! ```

mod engine;
mod error;
mod gemini;
mod patient;

pub use engine::EngineConfig;
pub use error::ConfigError;
pub use gemini::GeminiConfig;
pub use patient::PatientConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".afce/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AfceConfig {
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub patient: PatientConfig,
}

impl AfceConfig {
    /// Load and validate configuration from all sources.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed or
    /// extracted, and [`ConfigError::InvalidValue`] when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment
            .merge(Env::raw().only(&["API_KEY"]).map(|_| "gemini.api_key".into()))
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "gemini.api_key".into()),
            )
            .merge(Env::prefixed("AFCE_").split("__"))
    }

    /// Reject values that would make the session meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.patient.id.trim().is_empty() {
            return Err(invalid("patient.id", "must not be empty"));
        }
        if !self.patient.recovery_half_life.is_finite() || self.patient.recovery_half_life < 0.0
        {
            return Err(invalid(
                "patient.recovery_half_life",
                "must be a non-negative number of seconds",
            ));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(invalid("gemini.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("afce").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` looking for `.env`, then falls back
    /// to the current directory. Silently does nothing if none is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
