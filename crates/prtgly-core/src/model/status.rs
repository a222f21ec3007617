// ── Object status ──

use serde::{Deserialize, Deserializer, Serialize};
use strum::Display;

/// Monitoring state, decoded from the numeric `status_raw` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ObjectStatus {
    #[default]
    Unknown,
    Collecting,
    Up,
    Warning,
    Down,
    NoProbe,
    PausedByUser,
    PausedByDependency,
    PausedBySchedule,
    Unusual,
    PausedByLicense,
    PausedUntil,
    DownAcknowledged,
    DownPartial,
}

impl ObjectStatus {
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            2 => Self::Collecting,
            3 => Self::Up,
            4 => Self::Warning,
            5 => Self::Down,
            6 => Self::NoProbe,
            7 => Self::PausedByUser,
            8 => Self::PausedByDependency,
            9 => Self::PausedBySchedule,
            10 => Self::Unusual,
            11 => Self::PausedByLicense,
            12 => Self::PausedUntil,
            13 => Self::DownAcknowledged,
            14 => Self::DownPartial,
            _ => Self::Unknown,
        }
    }

    pub fn is_paused(self) -> bool {
        matches!(
            self,
            Self::PausedByUser
                | Self::PausedByDependency
                | Self::PausedBySchedule
                | Self::PausedByLicense
                | Self::PausedUntil
        )
    }

    pub fn is_down(self) -> bool {
        matches!(
            self,
            Self::Down | Self::DownAcknowledged | Self::DownPartial
        )
    }
}

impl<'de> Deserialize<'de> for ObjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = super::serde_helpers::optional_i64(deserializer)?;
        Ok(raw.map_or(Self::Unknown, Self::from_raw))
    }
}
