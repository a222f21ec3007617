// ── Sensor ──

use serde::{Deserialize, Serialize};

use prtgly_api::{Content, Property};

use super::object::PrtgObject;
use super::serde_helpers::{non_empty, optional_i64};
use super::status::ObjectStatus;
use super::TableEntity;

/// A sensor with its monitoring state.
///
/// `object.type_tag` holds the raw sensor type (`ping`, `snmptraffic`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sensor {
    #[serde(flatten)]
    pub object: PrtgObject,

    #[serde(rename(deserialize = "status_raw"), default)]
    pub status: ObjectStatus,

    #[serde(
        rename(deserialize = "message_raw"),
        default,
        deserialize_with = "non_empty"
    )]
    pub message: Option<String>,

    /// Name of the parent device.
    #[serde(default)]
    pub device: String,

    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub probe: String,

    #[serde(
        rename(deserialize = "lastvalue"),
        default,
        deserialize_with = "non_empty"
    )]
    pub last_value: Option<String>,

    /// Scanning interval in seconds.
    #[serde(
        rename(deserialize = "interval_raw"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub interval_secs: Option<i64>,

    /// Priority, 1 to 5 stars.
    #[serde(
        rename(deserialize = "priority_raw"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub priority: Option<i64>,
}

impl TableEntity for Sensor {
    const CONTENT: Content = Content::Sensors;

    fn columns() -> &'static [Property] {
        &[
            Property::Id,
            Property::Name,
            Property::Type,
            Property::BaseType,
            Property::ParentId,
            Property::Tags,
            Property::Active,
            Property::Status,
            Property::Message,
            Property::Device,
            Property::Group,
            Property::Probe,
            Property::LastValue,
            Property::Interval,
            Property::Priority,
        ]
    }

    fn id(&self) -> u32 {
        self.object.id
    }
}
