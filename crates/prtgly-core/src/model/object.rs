// ── Generic object ──

use serde::{Deserialize, Deserializer, Serialize};

use prtgly_api::{Content, Property};

use super::object_type::{ObjectKind, ObjectType};
use super::serde_helpers::{flexible_bool, optional_u32, split_tags};
use super::TableEntity;

/// A loosely-typed row of the `objects` table.
///
/// Carries just enough to identify an object and decide which typed table
/// it belongs to. Never mutated after deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrtgObject {
    #[serde(rename(deserialize = "objid"))]
    pub id: u32,

    #[serde(rename(deserialize = "type_raw"))]
    pub type_tag: ObjectType,

    /// Broad category reported next to the raw type. Lets a sensor whose
    /// raw type is `ping` still be recognised as a sensor.
    #[serde(
        rename(deserialize = "basetype"),
        default,
        deserialize_with = "lenient_kind",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_type: Option<ObjectKind>,

    #[serde(default)]
    pub name: String,

    #[serde(
        rename(deserialize = "parentid"),
        default,
        deserialize_with = "optional_u32"
    )]
    pub parent_id: Option<u32>,

    #[serde(default, deserialize_with = "split_tags")]
    pub tags: Vec<String>,

    #[serde(default, deserialize_with = "flexible_bool")]
    pub active: bool,
}

impl PrtgObject {
    /// The kind this object resolves to: its tag's kind, else its base type.
    pub fn kind(&self) -> Option<ObjectKind> {
        self.type_tag.kind().or(self.base_type)
    }
}

impl TableEntity for PrtgObject {
    const CONTENT: Content = Content::Objects;

    fn columns() -> &'static [Property] {
        OBJECT_COLUMNS
    }

    fn id(&self) -> u32 {
        self.id
    }
}

pub(crate) const OBJECT_COLUMNS: &[Property] = &[
    Property::Id,
    Property::Name,
    Property::Type,
    Property::BaseType,
    Property::ParentId,
    Property::Tags,
    Property::Active,
];

fn lenient_kind<'de, D: Deserializer<'de>>(d: D) -> Result<Option<ObjectKind>, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
