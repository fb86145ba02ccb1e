//! Pagehold: continuity cache for paginated live subscriptions
//!
//! Remembers the last settled result of every paginated query identity and
//! serves it while a new identity (or a remount of the same one) is still
//! loading its first page, so consumers never flash back to an empty list
//! when a usable prior result exists.

pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod logging;
pub mod paginated;
pub mod replay;
pub mod snapshot;
pub mod store;
pub mod subscription;

pub use error::{IdentityError, PageholdError};
pub use identity::{resolve, resolve_serializable, ArgValue, QueryArgs, QueryIdentity, QueryName};
pub use paginated::CachedPaginatedQuery;
pub use snapshot::{ErrorDetail, LoadMore, Observation, PageStatus, Snapshot, SnapshotOrigin};
pub use store::{ContinuityStore, ListenerId, RecordedWrite, StoreStats};
pub use subscription::{MemorySubscription, PaginatedSubscription};
