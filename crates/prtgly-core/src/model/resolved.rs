// ── Resolution output ──

use serde::Serialize;

use super::{
    Device, Group, NotificationAction, ObjectKind, ObjectType, Probe, PrtgObject, Schedule, Sensor,
};

/// A generic object after type lifting.
///
/// Objects whose type has no typed table pass through unchanged as
/// [`Resolved::Object`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum Resolved {
    Sensor(Sensor),
    Device(Device),
    Group(Group),
    Probe(Probe),
    Notification(NotificationAction),
    Schedule(Schedule),
    Object(PrtgObject),
}

impl Resolved {
    pub fn id(&self) -> u32 {
        match self {
            Self::Sensor(s) => s.object.id,
            Self::Device(d) => d.object.id,
            Self::Group(g) => g.object.id,
            Self::Probe(p) => p.object.id,
            Self::Notification(n) => n.id,
            Self::Schedule(s) => s.id,
            Self::Object(o) => o.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Sensor(s) => &s.object.name,
            Self::Device(d) => &d.object.name,
            Self::Group(g) => &g.object.name,
            Self::Probe(p) => &p.object.name,
            Self::Notification(n) => &n.name,
            Self::Schedule(s) => &s.name,
            Self::Object(o) => &o.name,
        }
    }

    /// Type tag of the resolved entity. Sensors keep their raw sensor type.
    pub fn type_tag(&self) -> ObjectType {
        match self {
            Self::Sensor(s) => s.object.type_tag.clone(),
            Self::Device(d) => d.object.type_tag.clone(),
            Self::Group(g) => g.object.type_tag.clone(),
            Self::Probe(p) => p.object.type_tag.clone(),
            Self::Notification(_) => ObjectKind::Notification.into(),
            Self::Schedule(_) => ObjectKind::Schedule.into(),
            Self::Object(o) => o.type_tag.clone(),
        }
    }

    /// `true` unless the object passed through without a typed lookup.
    pub fn is_typed(&self) -> bool {
        !matches!(self, Self::Object(_))
    }
}

// ── Conversions ──

impl From<Sensor> for Resolved {
    fn from(value: Sensor) -> Self {
        Self::Sensor(value)
    }
}

impl From<Device> for Resolved {
    fn from(value: Device) -> Self {
        Self::Device(value)
    }
}

impl From<Group> for Resolved {
    fn from(value: Group) -> Self {
        Self::Group(value)
    }
}

impl From<Probe> for Resolved {
    fn from(value: Probe) -> Self {
        Self::Probe(value)
    }
}

impl From<NotificationAction> for Resolved {
    fn from(value: NotificationAction) -> Self {
        Self::Notification(value)
    }
}

impl From<Schedule> for Resolved {
    fn from(value: Schedule) -> Self {
        Self::Schedule(value)
    }
}

impl From<PrtgObject> for Resolved {
    fn from(value: PrtgObject) -> Self {
        Self::Object(value)
    }
}
