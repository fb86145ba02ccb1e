//! CLI route: single route table and run context.

use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_output, format_identity_output, format_replay_json, format_replay_text,
};
use crate::config::{ConfigLoader, PageholdConfig};
use crate::error::PageholdError;
use crate::identity::{resolve, QueryArgs, QueryName};
use crate::replay::{replay, ReplayScript};
use crate::store::ContinuityStore;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Runtime context for CLI execution: the loaded configuration.
pub struct RunContext {
    config: PageholdConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, PageholdError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self { config })
    }

    pub fn from_config(config: PageholdConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PageholdConfig {
        &self.config
    }

    pub fn execute(&self, command: &Commands) -> Result<String, PageholdError> {
        match command {
            Commands::Resolve {
                query,
                args,
                format,
            } => self.handle_resolve(query, args, format),
            Commands::Replay { script, format } => self.handle_replay(script, format),
            Commands::Config { format } => format_config_output(&self.config, format),
        }
    }

    fn handle_resolve(&self, query: &str, args: &str, format: &str) -> Result<String, PageholdError> {
        let value: serde_json::Value = serde_json::from_str(args).map_err(|e| {
            PageholdError::ScriptError(format!("--args is not valid JSON: {}", e))
        })?;
        let args = QueryArgs::from_json(value)?;
        let identity = resolve(&QueryName::from(query), &args)?;
        debug!(query, digest = %identity.digest(), "Resolved identity");
        format_identity_output(&identity, format)
    }

    fn handle_replay(&self, script: &Path, format: &str) -> Result<String, PageholdError> {
        let script = ReplayScript::load(script)?;
        info!(ticks = script.ticks.len(), "Replaying script");

        let store = ContinuityStore::new();
        let rows = replay(&script, &store)?;
        let stats = store.stats();

        if format == "json" {
            format_replay_json(&rows, &stats)
        } else {
            Ok(format_replay_text(&rows, &stats))
        }
    }
}
