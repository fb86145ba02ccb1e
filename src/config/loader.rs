//! Config loader: builds a validated `PageholdConfig` from layered sources.

use config::builder::DefaultState;
use config::{ConfigBuilder, Environment, File};
use std::path::Path;
use tracing::debug;

use super::merge::merge_policy;
use super::sources::{global_file, workspace_file};
use super::PageholdConfig;
use crate::error::PageholdError;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace: defaults, global file, workspace
    /// files, then environment overrides.
    pub fn load(workspace_root: &Path) -> Result<PageholdConfig, PageholdError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, workspace_root)?;
        debug!(workspace = %workspace_root.display(), "Loading configuration");
        Self::finish(builder)
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<PageholdConfig, PageholdError> {
        if !path.exists() {
            return Err(PageholdError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true));
        debug!(config_path = %path.display(), "Loading configuration file");
        Self::finish(builder)
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<PageholdConfig, PageholdError> {
        let config: PageholdConfig = builder
            .add_source(
                Environment::with_prefix("PAGEHOLD")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            PageholdError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;

        Ok(config)
    }
}
