// ── Object type tags ──
//
// The server reports an object's type as a free-form string (`type_raw`):
// container kinds (`device`, `group`, `probenode`) plus one raw value per
// sensor type (`ping`, `snmptraffic`, ...). Known kinds get a variant, every
// other value is kept verbatim.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::EnumString;

/// Object kinds the server and this crate both know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ObjectKind {
    #[strum(to_string = "sensor")]
    Sensor,
    #[strum(to_string = "device")]
    Device,
    #[strum(to_string = "group")]
    Group,
    #[strum(to_string = "probe", serialize = "probenode")]
    Probe,
    #[strum(to_string = "notification", serialize = "notifications")]
    Notification,
    #[strum(to_string = "schedule")]
    Schedule,
    #[strum(to_string = "system")]
    System,
    #[strum(to_string = "user")]
    User,
    #[strum(to_string = "usergroup")]
    UserGroup,
    #[strum(to_string = "report")]
    Report,
    #[strum(to_string = "map")]
    Map,
    #[strum(to_string = "library")]
    Library,
}

impl ObjectKind {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sensor => "sensor",
            Self::Device => "device",
            Self::Group => "group",
            Self::Probe => "probe",
            Self::Notification => "notification",
            Self::Schedule => "schedule",
            Self::System => "system",
            Self::User => "user",
            Self::UserGroup => "usergroup",
            Self::Report => "report",
            Self::Map => "map",
            Self::Library => "library",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown object kind `{raw}`")))
    }
}

impl Serialize for ObjectKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ── ObjectType ──────────────────────────────────────────────────────

/// An object's type tag: a known kind, or the server's raw value.
///
/// Equality and hashing use the normalized string form, so
/// `Raw("Device")`, `Raw("device")` and `Known(Device)` are all the same tag.
#[derive(Debug, Clone)]
pub enum ObjectType {
    Known(ObjectKind),
    Raw(String),
}

impl ObjectType {
    /// The kind this tag denotes, if it is a known one.
    pub fn kind(&self) -> Option<ObjectKind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Raw(raw) => raw.parse().ok(),
        }
    }

    /// Normalized lowercase form used for comparison and display.
    pub fn canonical(&self) -> Cow<'_, str> {
        match self {
            Self::Known(kind) => Cow::Borrowed(kind.as_str()),
            Self::Raw(raw) => match raw.parse::<ObjectKind>() {
                Ok(kind) => Cow::Borrowed(kind.as_str()),
                Err(_) if raw.bytes().any(|b| b.is_ascii_uppercase()) => {
                    Cow::Owned(raw.to_ascii_lowercase())
                }
                Err(_) => Cow::Borrowed(raw.as_str()),
            },
        }
    }

    /// Value of the server's `type` column for this tag.
    pub fn server_value(&self) -> Cow<'_, str> {
        match self.kind() {
            Some(ObjectKind::Probe) => Cow::Borrowed("probenode"),
            _ => self.canonical(),
        }
    }

    /// `true` for the generic `sensor` tag, which stands for every sensor
    /// type at once.
    pub fn is_sensor_catch_all(&self) -> bool {
        self.kind() == Some(ObjectKind::Sensor)
    }
}

impl From<ObjectKind> for ObjectType {
    fn from(kind: ObjectKind) -> Self {
        Self::Known(kind)
    }
}

impl FromStr for ObjectType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(match trimmed.parse::<ObjectKind>() {
            Ok(kind) => Self::Known(kind),
            Err(_) => Self::Raw(trimmed.to_ascii_lowercase()),
        })
    }
}

impl From<&str> for ObjectType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(tag) => tag,
            Err(never) => match never {},
        }
    }
}

impl PartialEq for ObjectType {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for ObjectType {}

impl Hash for ObjectType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl<'de> Deserialize<'de> for ObjectType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

impl Serialize for ObjectType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.canonical())
    }
}
