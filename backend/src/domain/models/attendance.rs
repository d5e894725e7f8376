//! backend/src/domain/models/attendance.rs

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::storage::CsvRecord;

/// Timestamp layout used in `attendance.csv`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One marking action, one row of `attendance.csv`
///
/// `id` is always the parent's user id. An empty `child_name` means the parent
/// marked their own presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEvent {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Timestamp", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    #[serde(rename = "ChildName")]
    pub child_name: String,
}

impl AttendanceEvent {
    pub fn parent(id: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            timestamp,
            child_name: String::new(),
        }
    }

    pub fn child(id: &str, child_name: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            id: id.to_string(),
            timestamp,
            child_name: child_name.to_string(),
        }
    }

    pub fn is_parent_presence(&self) -> bool {
        self.child_name.is_empty()
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

impl CsvRecord for AttendanceEvent {
    const FILE_NAME: &'static str = "attendance.csv";
    const HEADERS: &'static [&'static str] = &["ID", "Timestamp", "ChildName"];
}

/// Second-precision `YYYY-MM-DD HH:MM:SS` (de)serialization
pub mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&timestamp.format(TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
