//! Workspace config file source: config/config.toml and config/{env}.toml

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable selecting the environment-specific workspace file.
pub const ENV_VAR: &str = "PAGEHOLD_ENV";

const DEFAULT_ENV: &str = "development";

/// Candidate workspace files for `env`, lowest precedence first.
pub fn workspace_config_files(workspace_root: &Path, env: &str) -> [PathBuf; 2] {
    let config_dir = workspace_root.join("config");
    [
        config_dir.join("config.toml"),
        config_dir.join(format!("{}.toml", env)),
    ]
}

/// Name of the active environment; empty values fall back to `development`.
pub fn active_env() -> String {
    std::env::var(ENV_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_ENV.to_string())
}

/// Add the workspace files that exist to `builder`, base file first.
pub fn add_to_builder(
    mut builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let env = active_env();
    for path in workspace_config_files(workspace_root, &env) {
        if path.exists() {
            debug!(config_path = %path.display(), env = %env, "Adding workspace configuration");
            builder = builder.add_source(File::from(path).required(false));
        } else {
            debug!(config_path = %path.display(), env = %env, "No workspace configuration file");
        }
    }
    Ok(builder)
}
