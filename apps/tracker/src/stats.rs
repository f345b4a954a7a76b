use serde::Serialize;

use crate::models::ApplicationRecord;

const IN_PROGRESS: &[&str] = &["Initial Screen", "Technical Interview", "Final Interview"];
const INTERVIEWS: &[&str] = &["Technical Interview", "Final Interview"];
const OFFERS: &[&str] = &["Offer", "Accepted"];

/// Headline counters shown above the application list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub in_progress: usize,
    pub interviews: usize,
    pub offers: usize,
}

impl DashboardStats {
    /// Buckets applications by their current status. Matching is exact.
    pub fn from_applications(applications: &[ApplicationRecord]) -> Self {
        let count = |bucket: &[&str]| {
            applications
                .iter()
                .filter(|app| app.status().is_some_and(|s| bucket.contains(&s)))
                .count()
        };
        Self {
            total: applications.len(),
            in_progress: count(IN_PROGRESS),
            interviews: count(INTERVIEWS),
            offers: count(OFFERS),
        }
    }
}
