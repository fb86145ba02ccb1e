//! Tick replay
//!
//! Replays a recorded sequence of live snapshots through a continuity store
//! and reports what a consumer would have been shown on each tick. Items are
//! opaque JSON values.

use crate::error::PageholdError;
use crate::identity::{resolve, QueryArgs, QueryName};
use crate::snapshot::{ErrorDetail, LoadMore, PageStatus, Snapshot, SnapshotOrigin};
use crate::store::ContinuityStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::info;

/// A recorded script of ticks.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub ticks: Vec<ReplayTick>,
}

/// One live snapshot as delivered by the subscription provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayTick {
    pub query: String,
    #[serde(default = "empty_args")]
    pub args: Value,
    pub status: PageStatus,
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

/// What the consumer saw on one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayRow {
    pub tick: usize,
    pub query: String,
    pub identity: String,
    pub digest: String,
    pub live_status: PageStatus,
    pub effective_status: PageStatus,
    pub item_count: usize,
    pub items: Vec<Value>,
    pub loading_first_page: bool,
    pub origin: SnapshotOrigin,
}

impl ReplayScript {
    pub fn from_json(raw: &str) -> Result<Self, PageholdError> {
        serde_json::from_str(raw)
            .map_err(|e| PageholdError::ScriptError(format!("Invalid replay script: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, PageholdError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            PageholdError::ScriptError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }
}

/// Replay every tick in order through `store`.
///
/// Fails on the first tick whose arguments cannot be resolved, or whose error
/// detail does not match its status; ticks before it have already been observed.
pub fn replay(
    script: &ReplayScript,
    store: &ContinuityStore<Value>,
) -> Result<Vec<ReplayRow>, PageholdError> {
    let mut rows = Vec::with_capacity(script.ticks.len());

    for (tick, entry) in script.ticks.iter().enumerate() {
        let query = QueryName::from(entry.query.as_str());
        let args = QueryArgs::from_json(entry.args.clone()).map_err(|e| {
            PageholdError::ScriptError(format!("Tick {}: {}", tick, e))
        })?;
        let identity = resolve(&query, &args)?;

        let live = match (entry.status, &entry.error) {
            (PageStatus::Error, Some(error)) => {
                Snapshot::failed(entry.items.clone(), error.clone(), LoadMore::noop())
            }
            (PageStatus::Error, None) => {
                return Err(PageholdError::ScriptError(format!(
                    "Tick {}: status Error requires an error detail",
                    tick
                )));
            }
            (status, Some(_)) => {
                return Err(PageholdError::ScriptError(format!(
                    "Tick {}: error detail given for status {}",
                    tick, status
                )));
            }
            (status, None) => Snapshot::new(status, entry.items.clone(), LoadMore::noop()),
        };

        let observation = store.observe(&query, &identity, live);
        rows.push(ReplayRow {
            tick,
            query: entry.query.clone(),
            digest: identity.digest(),
            identity: identity.into(),
            live_status: entry.status,
            effective_status: observation.status(),
            item_count: observation.items().len(),
            items: observation.items().to_vec(),
            loading_first_page: observation.loading_first_page,
            origin: observation.origin,
        });
    }

    let stats = store.stats();
    info!(
        ticks = rows.len(),
        queries = stats.queries,
        snapshots = stats.snapshots,
        "Replay finished"
    );
    Ok(rows)
}
