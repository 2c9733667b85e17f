use afce_config::AfceConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &AfceConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &AfceConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.gemini.is_configured() && has_env_prefix(&env_keys, "AFCE_GEMINI") {
        warnings.push(
            "Gemini config appears default while AFCE_GEMINI* env vars exist. Use double underscores (example: AFCE_GEMINI__API_KEY)."
                .to_string(),
        );
    }

    if config.engine.seed.is_none() && has_env_prefix(&env_keys, "AFCE_ENGINE_SEED") {
        warnings.push(
            "engine.seed is unset while AFCE_ENGINE_SEED is present. Use double underscores (example: AFCE_ENGINE__SEED)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}

#[cfg(test)]
mod tests {
    use afce_config::{AfceConfig, GeminiConfig};

    use super::collect_unconfigured_warnings;

    #[test]
    fn warns_for_single_underscore_keys() {
        let config = AfceConfig::default();
        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("AFCE_GEMINI_API_KEY".to_string(), "key".to_string()),
                ("AFCE_ENGINE_SEED".to_string(), "7".to_string()),
            ],
        );

        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn does_not_warn_when_configured() {
        let mut config = AfceConfig {
            gemini: GeminiConfig {
                api_key: "key".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        config.engine.seed = Some(7);

        let warnings = collect_unconfigured_warnings(
            &config,
            vec![
                ("AFCE_GEMINI__API_KEY".to_string(), "key".to_string()),
                ("AFCE_ENGINE__SEED".to_string(), "7".to_string()),
            ],
        );

        assert!(warnings.is_empty());
    }

    #[test]
    fn unrelated_env_is_ignored() {
        let warnings = collect_unconfigured_warnings(
            &AfceConfig::default(),
            vec![("AFCE_LOG".to_string(), "debug".to_string())],
        );
        assert!(warnings.is_empty());
    }
}
