use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::RecordId;

/// One status-change event for an application.
///
/// Every field is optional because the aggregator filters at the boundary
/// instead of failing deserialization of the whole list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub application_id: Option<RecordId>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimelineEntry {
    pub fn new(
        application_id: impl Into<RecordId>,
        status: impl Into<String>,
        date: Option<&str>,
    ) -> Self {
        Self {
            id: None,
            application_id: Some(application_id.into()),
            status: Some(status.into()),
            date: date.map(str::to_string),
            notes: None,
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }

    /// Grouping key of the owning application, `None` when the reference is
    /// missing or non-positive.
    pub fn owner_key(&self) -> Option<String> {
        self.application_id.as_ref().and_then(RecordId::owner_key)
    }

    /// Milliseconds since the Unix epoch. Missing or unparsable dates read as 0.
    pub fn timestamp_millis(&self) -> i64 {
        self.date.as_deref().and_then(parse_timestamp).unwrap_or(0)
    }
}

/// Parses the date shapes the backend emits: RFC 3339, naive datetimes with a
/// `T` or space separator (read as UTC), and bare dates.
pub fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc().timestamp_millis());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Body of `POST /api/applications/:id/timeline`. The backend stamps the date
/// itself when none is sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTimelineEntry {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
