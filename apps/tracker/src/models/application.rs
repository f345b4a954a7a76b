use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier as returned by the backend. Older rows and hand-edited fixtures
/// carry string ids, so both shapes are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl RecordId {
    /// Canonical key used to group timeline entries. `1` and `"1"` collapse to
    /// the same key. Returns `None` for ids that cannot reference an
    /// application: non-positive integers and blank strings.
    pub fn owner_key(&self) -> Option<String> {
        match self {
            RecordId::Int(n) if *n > 0 => Some(n.to_string()),
            RecordId::Int(_) => None,
            RecordId::Str(s) => {
                let s = s.trim();
                match s.parse::<i64>() {
                    Ok(n) if n > 0 => Some(n.to_string()),
                    Ok(_) => None,
                    Err(_) if s.is_empty() => None,
                    Err(_) => Some(s.to_string()),
                }
            }
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        RecordId::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        RecordId::Str(value.to_string())
    }
}

/// One tracked job application as listed by `GET /api/applications`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: RecordId,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub matched_skills: Vec<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub required_skills: Vec<String>,
    /// Computed by the listing query from the application's timeline.
    #[serde(default)]
    pub had_final_interview: bool,
    #[serde(default)]
    pub had_technical: bool,
}

impl ApplicationRecord {
    pub fn new(id: impl Into<RecordId>, status: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Some(status.into()),
            company: None,
            position: None,
            date: None,
            priority: None,
            matched_skills: Vec::new(),
            required_skills: Vec::new(),
            had_final_interview: false,
            had_technical: false,
        }
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }
}

/// Body of `POST /api/applications`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewApplication {
    pub company: String,
    pub position: String,
    pub status: String,
    pub date: String,
    pub priority: String,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// Body of `PUT /api/applications/:id`. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplicationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_skills: Option<Vec<String>>,
}
