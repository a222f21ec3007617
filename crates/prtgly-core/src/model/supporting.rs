// ── Supporting objects: notification actions, schedules ──
//
// Small identifier-keyed tables. They carry no parent or type columns, so
// they do not embed `PrtgObject`.

use serde::{Deserialize, Serialize};

use prtgly_api::{Content, Property};

use super::serde_helpers::{flexible_bool, split_tags};
use super::TableEntity;

const SUPPORTING_COLUMNS: &[Property] =
    &[Property::Id, Property::Name, Property::Tags, Property::Active];

/// An action executed when a notification trigger fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    #[serde(rename(deserialize = "objid"))]
    pub id: u32,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "split_tags")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "flexible_bool")]
    pub active: bool,
}

impl TableEntity for NotificationAction {
    const CONTENT: Content = Content::Notifications;

    fn columns() -> &'static [Property] {
        SUPPORTING_COLUMNS
    }

    fn id(&self) -> u32 {
        self.id
    }
}

/// A time window during which monitoring is active or paused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(rename(deserialize = "objid"))]
    pub id: u32,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "split_tags")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "flexible_bool")]
    pub active: bool,
}

impl TableEntity for Schedule {
    const CONTENT: Content = Content::Schedules;

    fn columns() -> &'static [Property] {
        SUPPORTING_COLUMNS
    }

    fn id(&self) -> u32 {
        self.id
    }
}
