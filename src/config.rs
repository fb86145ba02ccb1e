//! Configuration System
//!
//! Layered configuration for pagination defaults and logging. Sources, lowest
//! precedence first: built-in defaults, the global config file, workspace
//! config files, then `PAGEHOLD__SECTION__KEY` environment variables.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

mod loader;

mod merge {
    pub mod merge_policy;
}

mod sources {
    pub mod global_file;
    pub mod workspace_file;
}

pub use loader::ConfigLoader;
pub use sources::global_file::global_config_path;

pub(crate) const DEFAULT_INITIAL_NUM_ITEMS: usize = 20;
pub(crate) const DEFAULT_LOAD_MORE_COUNT: usize = 20;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageholdConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Page sizes used by paginated query handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Items requested for the first page
    #[serde(default = "default_initial_num_items")]
    pub initial_num_items: usize,

    /// Items requested per load-more call
    #[serde(default = "default_load_more_count")]
    pub load_more_count: usize,
}

fn default_initial_num_items() -> usize {
    DEFAULT_INITIAL_NUM_ITEMS
}

fn default_load_more_count() -> usize {
    DEFAULT_LOAD_MORE_COUNT
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            initial_num_items: default_initial_num_items(),
            load_more_count: default_load_more_count(),
        }
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Pagination(String),
    Logging(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Pagination(msg) => write!(f, "Pagination: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_num_items == 0 {
            return Err("initial_num_items must be greater than zero".to_string());
        }
        if self.load_more_count == 0 {
            return Err("load_more_count must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl PageholdConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.pagination.validate() {
            errors.push(ValidationError::Pagination(e));
        }
        if let Err(e) = crate::logging::validate_format(&self.logging.format) {
            errors.push(ValidationError::Logging(e.to_string()));
        }
        if let Err(e) = crate::logging::validate_output(&self.logging.output) {
            errors.push(ValidationError::Logging(e.to_string()));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
