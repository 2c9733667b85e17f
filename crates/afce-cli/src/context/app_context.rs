use afce_config::AfceConfig;
use afce_engine::Dashboard;
use afce_gemini::GeminiClient;

use super::Backend;

/// Session resources built once at startup.
pub struct AppContext {
    pub config: AfceConfig,
    pub dashboard: Dashboard<Backend, Backend>,
}

impl AppContext {
    /// Seed the dashboard from `config`. The Gemini client is only built
    /// when an API key is configured.
    pub fn init(config: AfceConfig) -> anyhow::Result<Self> {
        let client = if config.gemini.is_configured() {
            Some(GeminiClient::new(&config.gemini)?)
        } else {
            tracing::debug!("gemini not configured; assessment and chat are unavailable");
            None
        };
        let backend = Backend::new(client);

        let today = chrono::Local::now().date_naive();
        let dashboard = Dashboard::from_config(&config, today, backend.clone(), backend);
        Ok(Self { config, dashboard })
    }

    /// Fail early for commands that need the external service.
    pub fn require_gemini(&self) -> anyhow::Result<()> {
        if !self.config.gemini.is_configured() {
            let error = afce_config::ConfigError::NotConfigured {
                section: "gemini".to_string(),
            };
            return Err(anyhow::Error::new(error)
                .context("set AFCE_GEMINI__API_KEY or GEMINI_API_KEY to use the engine"));
        }
        Ok(())
    }
}
