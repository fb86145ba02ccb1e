//! CLI presentation: text and json formatters per command.

use crate::config::PageholdConfig;
use crate::error::PageholdError;
use crate::identity::QueryIdentity;
use crate::replay::ReplayRow;
use crate::store::StoreStats;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

fn to_pretty(value: &impl serde::Serialize) -> Result<String, PageholdError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PageholdError::ConfigError(format!("Failed to render JSON: {}", e)))
}

pub fn format_identity_output(
    identity: &QueryIdentity,
    format: &str,
) -> Result<String, PageholdError> {
    if format == "json" {
        return to_pretty(&json!({
            "identity": identity.as_str(),
            "digest": identity.digest(),
        }));
    }
    Ok(format!("{}\ndigest: {}", identity, identity.digest()))
}

pub fn format_replay_json(rows: &[ReplayRow], stats: &StoreStats) -> Result<String, PageholdError> {
    to_pretty(&json!({
        "ticks": rows,
        "stats": stats,
    }))
}

pub fn format_replay_text(rows: &[ReplayRow], stats: &StoreStats) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Tick",
        "Query",
        "Identity",
        "Live",
        "Shown",
        "Items",
        "First Page",
        "Origin",
    ]);
    for row in rows {
        table.add_row(vec![
            row.tick.to_string(),
            row.query.clone(),
            row.digest.clone(),
            row.live_status.to_string(),
            row.effective_status.to_string(),
            row.item_count.to_string(),
            if row.loading_first_page { "yes" } else { "no" }.to_string(),
            row.origin.to_string(),
        ]);
    }
    format!(
        "{}\n{} queries, {} recorded snapshots",
        table, stats.queries, stats.snapshots
    )
}

pub fn format_config_output(config: &PageholdConfig, format: &str) -> Result<String, PageholdError> {
    if format == "json" {
        return to_pretty(config);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Key", "Value"]);
    table.add_row(vec![
        "pagination.initial_num_items".to_string(),
        config.pagination.initial_num_items.to_string(),
    ]);
    table.add_row(vec![
        "pagination.load_more_count".to_string(),
        config.pagination.load_more_count.to_string(),
    ]);
    table.add_row(vec!["logging.level".to_string(), config.logging.level.clone()]);
    table.add_row(vec!["logging.format".to_string(), config.logging.format.clone()]);
    table.add_row(vec!["logging.output".to_string(), config.logging.output.clone()]);
    Ok(table.to_string())
}
