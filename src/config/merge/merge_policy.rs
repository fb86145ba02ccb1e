//! Merge rules: defaults and override order.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

use crate::config::{DEFAULT_INITIAL_NUM_ITEMS, DEFAULT_LOAD_MORE_COUNT};

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default(
            "pagination.initial_num_items",
            DEFAULT_INITIAL_NUM_ITEMS as i64,
        )?
        .set_default("pagination.load_more_count", DEFAULT_LOAD_MORE_COUNT as i64)
}
