// ── Domain model ──
//
// Generic objects, typed entities, and the trait tying an entity to the
// table it is read from.

mod container;
mod object;
mod object_type;
mod resolved;
mod sensor;
mod serde_helpers;
mod status;
mod supporting;

use serde::de::DeserializeOwned;

use prtgly_api::{Content, Property};

pub use container::{Device, Group, Probe};
pub use object::PrtgObject;
pub use object_type::{ObjectKind, ObjectType};
pub use resolved::Resolved;
pub use sensor::Sensor;
pub use status::ObjectStatus;
pub use supporting::{NotificationAction, Schedule};

/// A record type backed by one server table.
pub trait TableEntity: DeserializeOwned + Send + Sync + 'static {
    /// The `content=` table rows are read from.
    const CONTENT: Content;

    /// Columns to request so every field can be populated.
    fn columns() -> &'static [Property];

    /// Object identifier (`objid`).
    fn id(&self) -> u32;
}
