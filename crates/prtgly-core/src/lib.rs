//! Object retrieval and resolution engine between `prtgly-api` and its
//! consumers (CLI, scripts).
//!
//! - **[`ObjectStream`]**: lazy, paginated sequence of records for one
//!   [`ContentParameters`]. Hides the [`PaginationCursor`], checks a
//!   `CancellationToken` before every page and reports how it ended
//!   through [`Termination`].
//!
//! - **[`TypeLifter`]**: turns a batch of generic [`PrtgObject`]s into
//!   typed entities ([`Sensor`], [`Device`], ...) with one secondary query
//!   per type partition, restoring the input order inside each partition.
//!
//! - **[`ObjectEngine`]**: facade owning the transport handle:
//!   [`query_objects`](ObjectEngine::query_objects) and
//!   [`resolve_objects`](ObjectEngine::resolve_objects).
//!
//! - **Domain model** ([`model`]): [`ObjectType`] is an open string
//!   enumeration: known kinds plus raw server values, compared by their
//!   normalized string form.

pub mod config;
pub mod engine;
pub mod error;
pub mod lift;
pub mod model;
pub mod parameters;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ServerConfig, TlsVerification};
pub use engine::{ObjectEngine, matches_type, type_filter};
pub use error::CoreError;
pub use lift::{
    DEFAULT_LIFT_CONCURRENCY, LiftOptions, LiftOutcome, LiftStream, Partition, TypeLifter,
    partition,
};
pub use parameters::{ContentParameters, DEFAULT_PAGE_SIZE};
pub use stream::{ObjectStream, PaginationCursor, Termination};

pub use model::{
    Device, Group, NotificationAction, ObjectKind, ObjectStatus, ObjectType, Probe, PrtgObject,
    Resolved, Schedule, Sensor, TableEntity,
};

// Transport-level types callers need to build filters and credentials.
pub use prtgly_api::{
    Content, Credentials, FilterOperator, Property, PrtgClient, SearchFilter, SortDirection,
    TableTransport,
};
pub use tokio_util::sync::CancellationToken;
