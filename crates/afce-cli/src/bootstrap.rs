use anyhow::Context;
use afce_config::AfceConfig;

use crate::cli::GlobalFlags;

/// Load `.env`, then the layered config, then apply CLI overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<AfceConfig> {
    load_dotenv()?;

    let mut config = AfceConfig::load().context("failed to load afce configuration")?;
    if let Some(seed) = flags.seed {
        config.engine.seed = Some(seed);
    }
    Ok(config)
}

/// Load `.env` from the working directory if present. A malformed file is an
/// error; a missing one is not.
fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }
    Ok(())
}
