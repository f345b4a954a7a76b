use serde::{Deserialize, Serialize};

/// Market summary for a role title, served by `GET /api/role-insights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleInsight {
    pub role_title: String,
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub common_skills: Vec<String>,
    #[serde(default)]
    pub average_salary: Option<f64>,
    #[serde(default)]
    pub demand_trend: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_empty")]
    pub top_companies: Vec<String>,
}
