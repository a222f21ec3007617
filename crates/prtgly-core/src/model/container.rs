// ── Container entities: devices, groups, probes ──

use serde::{Deserialize, Serialize};

use prtgly_api::{Content, Property};

use super::object::PrtgObject;
use super::serde_helpers::{non_empty, optional_i64};
use super::status::ObjectStatus;
use super::TableEntity;

/// A device: a host that sensors are attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
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

    /// IP address or DNS name the device's sensors target.
    #[serde(default, deserialize_with = "non_empty")]
    pub host: Option<String>,

    #[serde(default, deserialize_with = "non_empty")]
    pub location: Option<String>,

    #[serde(default)]
    pub group: String,

    #[serde(default)]
    pub probe: String,

    #[serde(
        rename(deserialize = "totalsens"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub total_sensors: Option<i64>,

    #[serde(
        rename(deserialize = "priority_raw"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub priority: Option<i64>,
}

impl TableEntity for Device {
    const CONTENT: Content = Content::Devices;

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
            Property::Priority,
            Property::Host,
            Property::Location,
            Property::Group,
            Property::Probe,
            Property::TotalSensors,
        ]
    }

    fn id(&self) -> u32 {
        self.object.id
    }
}

/// A group of devices (and nested groups).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
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

    #[serde(default)]
    pub probe: String,

    #[serde(
        rename(deserialize = "totalsens"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub total_sensors: Option<i64>,

    #[serde(
        rename(deserialize = "priority_raw"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub priority: Option<i64>,
}

impl TableEntity for Group {
    const CONTENT: Content = Content::Groups;

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
            Property::Priority,
            Property::Probe,
            Property::TotalSensors,
        ]
    }

    fn id(&self) -> u32 {
        self.object.id
    }
}

/// A probe: the root group of everything one probe service monitors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
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

    #[serde(
        rename(deserialize = "totalsens"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub total_sensors: Option<i64>,

    #[serde(
        rename(deserialize = "priority_raw"),
        default,
        deserialize_with = "optional_i64"
    )]
    pub priority: Option<i64>,
}

impl TableEntity for Probe {
    const CONTENT: Content = Content::Probes;

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
            Property::Priority,
            Property::TotalSensors,
        ]
    }

    fn id(&self) -> u32 {
        self.object.id
    }
}
