use afce_config::AfceConfig;
use figment::Jail;

#[test]
fn prefixed_env_overrides_nested_fields() {
    Jail::expect_with(|jail| {
        jail.set_env("AFCE_GEMINI__API_KEY", "env-key");
        jail.set_env("AFCE_ENGINE__SEED", "99");
        jail.set_env("AFCE_PATIENT__AGE", "70");

        let config = AfceConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "env-key");
        assert_eq!(config.engine.seed, Some(99));
        assert_eq!(config.patient.age, 70);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".afce")?;
        jail.create_file(
            ".afce/config.toml",
            r#"
[gemini]
chat_model = "from-toml"
"#,
        )?;
        jail.set_env("AFCE_GEMINI__CHAT_MODEL", "from-env");

        let config = AfceConfig::load().expect("config loads");
        assert_eq!(config.gemini.chat_model, "from-env");
        Ok(())
    });
}

#[test]
fn bare_gemini_api_key_is_a_fallback() {
    Jail::expect_with(|jail| {
        jail.set_env("GEMINI_API_KEY", "bare-key");

        let config = AfceConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "bare-key");
        assert!(config.gemini.is_configured());
        Ok(())
    });
}

#[test]
fn gemini_api_key_beats_generic_api_key() {
    Jail::expect_with(|jail| {
        jail.set_env("API_KEY", "generic");
        jail.set_env("GEMINI_API_KEY", "specific");

        let config = AfceConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "specific");
        Ok(())
    });
}

#[test]
fn prefixed_key_beats_bare_fallbacks() {
    Jail::expect_with(|jail| {
        jail.set_env("API_KEY", "generic");
        jail.set_env("GEMINI_API_KEY", "bare");
        jail.set_env("AFCE_GEMINI__API_KEY", "prefixed");

        let config = AfceConfig::load().expect("config loads");
        assert_eq!(config.gemini.api_key, "prefixed");
        Ok(())
    });
}
